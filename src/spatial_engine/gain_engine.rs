use crate::spatial_engine::cone::cone_gain_for;
use crate::spatial_engine::distance::distance_gain_for;
use crate::spatial_engine::pan::pan_gains_for;
use crate::spatial_engine::param_queue::ParamReceiver;
use crate::spatial_engine::settings::SpatialSettings;
use crate::spatial_engine::types::{
    DistanceModel, GainResult, ListenerGeometry, SourceGeometry, SpatialMethod,
};
use crate::spatial_engine::SpatialProcessor;
use log::{debug, info, warn};

/// Cone, distance and pan gains for one source/listener pair.
///
/// Pure function of its inputs: every value is finite for finite input.
pub fn compute_gains(
    source: &SourceGeometry,
    listener: &ListenerGeometry,
    distance: &DistanceModel,
) -> GainResult {
    let cone_gain = cone_gain_for(source, listener);
    let distance_gain = distance_gain_for(source, listener, distance);
    let (gain_left, gain_right) = pan_gains_for(source, listener);

    GainResult {
        cone_gain,
        distance_gain,
        gain_left,
        gain_right,
    }
}

/// Multiplies every sample of `channel` by `gain`.
#[inline]
pub fn apply_gain(channel: &mut [f32], gain: f32) {
    for sample in channel.iter_mut() {
        *sample *= gain;
    }
}

// =========================
// SpatialGainEngine
// =========================

/// Stateless per-block spatializer.
///
/// The only state carried between blocks is the current parameter snapshot
/// and the setup values computed in [`SpatialProcessor::prepare`].
pub struct SpatialGainEngine {
    settings: SpatialSettings,
    params: Option<ParamReceiver>,
    sample_rate: f32,
    max_block_size: usize,
    max_delay_samples: usize,
    warned_method: Option<SpatialMethod>,
}

impl SpatialGainEngine {
    pub fn new(settings: SpatialSettings) -> Self {
        Self {
            settings,
            params: None,
            sample_rate: 0.0,
            max_block_size: 0,
            max_delay_samples: 0,
            warned_method: None,
        }
    }

    /// Engine reading its snapshots from a parameter queue.
    pub fn with_param_queue(settings: SpatialSettings, params: ParamReceiver) -> Self {
        Self {
            params: Some(params),
            ..Self::new(settings)
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Delay budget in samples, reserved for an ITD delay line.
    pub fn max_delay_samples(&self) -> usize {
        self.max_delay_samples
    }

    /// Gains for the current snapshot.
    pub fn compute_gains(&self) -> GainResult {
        let s = &self.settings;
        compute_gains(&s.source, &s.listener, &s.distance)
    }

    fn update_max_delay(&mut self) {
        let samples = self.settings.max_delay_ms * 1e-3 * self.sample_rate;
        self.max_delay_samples = if samples.is_finite() && samples > 0.0 {
            samples as usize
        } else {
            0
        };
    }

    /// Pulls the newest snapshot from the queue, if any.
    fn poll_params(&mut self) {
        let Some(latest) = self.params.as_ref().and_then(ParamReceiver::latest) else {
            return;
        };
        self.settings = latest;
        self.update_max_delay();
        self.check_method();
    }

    fn check_method(&mut self) {
        let method = self.settings.method;
        if method.is_implemented() {
            self.warned_method = None;
        } else if self.warned_method != Some(method) {
            warn!(
                "Spatial method {:?} is not implemented, rendering with {:?}",
                method,
                SpatialMethod::PanoramaPrecedence
            );
            self.warned_method = Some(method);
        }
    }
}

impl SpatialProcessor for SpatialGainEngine {
    fn prepare(&mut self, sample_rate: f32, max_block_size: usize) {
        if !(sample_rate > 0.0 && sample_rate.is_finite()) {
            warn!("Invalid sample rate {}, delay budget disabled", sample_rate);
        }
        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        self.update_max_delay();
        self.check_method();
        info!(
            "Spatial engine prepared: sample_rate={} Hz, max_block_size={}, max_delay_samples={}",
            self.sample_rate, self.max_block_size, self.max_delay_samples
        );
    }

    fn release(&mut self) {
        debug!("Spatial engine released");
        self.max_delay_samples = 0;
        self.max_block_size = 0;
    }

    fn process_block(
        &mut self,
        channels: &mut [&mut [f32]],
        num_input_channels: usize,
    ) -> GainResult {
        self.poll_params();
        let gains = self.compute_gains();

        let num_output_channels = channels.len();
        for (index, channel) in channels.iter_mut().enumerate() {
            // Sorties sans entrée (ou au-delà de la paire stéréo) : silence
            if index >= num_input_channels || index >= 2 {
                channel.fill(0.0);
                continue;
            }
            let factor = match (index, num_output_channels) {
                (0, 1) => gains.common(),
                (0, _) => gains.left(),
                _ => gains.right(),
            };
            apply_gain(channel, factor);
        }

        gains
    }

    fn process_frames(&mut self, frames: &mut [[f32; 2]]) -> GainResult {
        self.poll_params();
        let gains = self.compute_gains();

        let (left, right) = (gains.left(), gains.right());
        for frame in frames.iter_mut() {
            frame[0] *= left;
            frame[1] *= right;
        }

        gains
    }

    fn settings(&self) -> &SpatialSettings {
        &self.settings
    }

    fn set_settings(&mut self, settings: SpatialSettings) {
        self.settings = settings;
        self.update_max_delay();
        self.check_method();
    }
}
