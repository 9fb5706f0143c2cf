use crate::spatial_engine::settings::SpatialSettings;
use crate::spatial_engine::types::GainResult;

/// Block processor driven by a host (plugin wrapper, offline renderer, tests).
pub trait SpatialProcessor {
    /// Called before playback starts or when the sample rate changes.
    fn prepare(&mut self, sample_rate: f32, max_block_size: usize);
    fn release(&mut self);

    /// Processes one block of planar channels in place.
    ///
    /// `channels.len()` is the number of output channels; channels at index
    /// `>= num_input_channels` carry no input data and are cleared.
    fn process_block(&mut self, channels: &mut [&mut [f32]], num_input_channels: usize)
        -> GainResult;

    /// Processes one block of interleaved stereo frames in place.
    fn process_frames(&mut self, frames: &mut [[f32; 2]]) -> GainResult;

    // Getter/Setter
    fn settings(&self) -> &SpatialSettings;
    fn set_settings(&mut self, settings: SpatialSettings);
}
