pub mod frame_orchestrator;
pub mod pipeline_logger;
pub mod pipeline_settings;
pub mod tick_output;
