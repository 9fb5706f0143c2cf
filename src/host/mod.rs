pub mod audio_loading;
pub use audio_loading::{load_wav, HostError, LoadedAudio};

pub mod config;
pub use config::{HostConfig, RenderConfig};

pub mod safewavwriter;
pub use safewavwriter::{AudioBlock, SafeWavWriter};

pub mod offline_renderer;
pub use offline_renderer::{orbit_snapshot, OfflineRenderer, RenderReport};
