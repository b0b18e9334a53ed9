pub mod capture;
pub mod compositing;
pub mod detection;
pub mod persistence;
pub mod pipeline;
pub mod shared;
pub mod transform;
