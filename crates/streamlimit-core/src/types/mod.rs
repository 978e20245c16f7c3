//! Core type definitions used across the StreamLimit workspace.

pub mod device;
pub mod id;
pub mod stream_limit;

pub use device::DeviceMarker;
pub use id::*;
pub use stream_limit::StreamLimit;
