// Math
pub mod math;
pub use math::Vector2D;
// Spatial engine
pub mod spatial_engine;
pub use spatial_engine::{SpatialGainEngine, SpatialProcessor, SpatialSettings};
// Offline host
pub mod host;
pub use host::{HostConfig, OfflineRenderer};

// Profiler
pub mod profiler;
// Utilities
pub mod utils;
