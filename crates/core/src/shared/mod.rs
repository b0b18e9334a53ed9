pub mod channel;
pub mod constants;
pub mod frame;
pub mod region;
