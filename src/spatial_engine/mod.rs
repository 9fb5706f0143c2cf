pub mod r#trait;
pub use r#trait::SpatialProcessor;

pub mod types;
pub use self::types::{DistanceModel, GainResult, ListenerGeometry, SourceGeometry, SpatialMethod};

pub mod settings;
pub use settings::{SpatialSettings, SpatialSettingsBuilder};

pub mod cone;
pub use cone::cone_gain;

pub mod distance;
pub use distance::distance_gain;

pub mod pan;
pub use pan::pan_gains;

pub mod param_queue;
pub use param_queue::{param_queue, ParamReceiver, ParamSender};

pub mod gain_engine;
pub use gain_engine::{apply_gain, compute_gains, SpatialGainEngine};
