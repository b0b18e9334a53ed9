use crate::shared::frame::Frame;

/// Domain interface for the live frame source polled once per tick.
///
/// Implementations own their device or decoder; the orchestrator only asks
/// for the most recent frame and never blocks on it.
pub trait CaptureSource: Send {
    fn current_frame(&mut self) -> Result<Frame, Box<dyn std::error::Error>>;
}
