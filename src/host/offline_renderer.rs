use crate::host::audio_loading::load_wav;
use crate::host::config::RenderConfig;
use crate::host::safewavwriter::{AudioBlock, SafeWavWriter};
use crate::math::Vector2D;
use crate::profiler::Profiler;
use crate::spatial_engine::{GainResult, ParamSender, SpatialProcessor, SpatialSettings};
use crate::log_metrics;
use glam::Vec2;
use log::{debug, info, warn};
use std::path::Path;
use std::time::{Duration, Instant};

/// Summary of one offline render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderReport {
    pub blocks: u64,
    pub frames: u64,
    pub last_gains: Option<GainResult>,
    /// Largest absolute sample seen on output channels past the stereo pair
    pub extra_channel_peak: f32,
}

/// Source position/orientation after rotating the base geometry about the
/// listener by `angle` radians (clockwise).
pub fn orbit_snapshot(base: &SpatialSettings, angle: f32) -> SpatialSettings {
    let rotation = Vec2::from_angle(-angle);
    let listener: Vec2 = base.listener.position.into();
    let offset = Vec2::from(base.source.position) - listener;
    let orientation: Vec2 = base.source.orientation.into();

    let mut snapshot = *base;
    snapshot.source.position = Vector2D::from(listener + rotation.rotate(offset));
    snapshot.source.orientation = Vector2D::from(rotation.rotate(orientation));
    snapshot
}

/// Stand-in for a plugin host: feeds a processor fixed-size planar blocks.
pub struct OfflineRenderer<P: SpatialProcessor> {
    processor: P,
    config: RenderConfig,
    automation: Option<(ParamSender, SpatialSettings)>,
    scratch: Vec<Vec<f32>>,
    profiler: Profiler,
}

impl<P: SpatialProcessor> OfflineRenderer<P> {
    pub fn new(processor: P, config: RenderConfig) -> Self {
        let channels = config.output_channels.max(2);
        let block_size = config.block_size.max(1);
        Self {
            processor,
            config,
            automation: None,
            scratch: vec![vec![0.0; block_size]; channels],
            profiler: Profiler::new(256),
        }
    }

    /// Publishes an orbiting snapshot before every block when
    /// `orbit_period_s` is configured.
    pub fn with_orbit_automation(mut self, sender: ParamSender, base: SpatialSettings) -> Self {
        self.automation = Some((sender, base));
        self
    }

    pub fn processor(&self) -> &P {
        &self.processor
    }

    pub fn profiler(&self) -> &Profiler {
        &self.profiler
    }

    /// Processes `input` block by block and hands every processed block to `sink`.
    pub fn render_frames<F>(&mut self, input: &[[f32; 2]], sample_rate: u32, mut sink: F) -> RenderReport
    where
        F: FnMut(AudioBlock),
    {
        let block_size = self.config.block_size.max(1);
        self.processor.prepare(sample_rate as f32, block_size);

        let mut report = RenderReport {
            blocks: 0,
            frames: 0,
            last_gains: None,
            extra_channel_peak: 0.0,
        };
        let mut last_log = Instant::now();
        let log_interval = Duration::from_secs(4);

        for (index, chunk) in input.chunks(block_size).enumerate() {
            let n = chunk.len();
            let start_frame = index * block_size;
            self.publish_automation(start_frame, sample_rate);

            // Désentrelacement vers les canaux planaires
            for (i, frame) in chunk.iter().enumerate() {
                self.scratch[0][i] = frame[0];
                self.scratch[1][i] = frame[1];
            }

            let gains = {
                let mut channels: Vec<&mut [f32]> =
                    self.scratch.iter_mut().map(|c| &mut c[..n]).collect();
                let _guard = self.profiler.measure("process_block");
                self.processor.process_block(&mut channels, 2)
            };

            let extra_peak = self
                .scratch
                .iter()
                .skip(2)
                .flat_map(|c| c[..n].iter())
                .fold(0.0_f32, |acc, s| acc.max(s.abs()));
            report.extra_channel_peak = report.extra_channel_peak.max(extra_peak);

            let frames: Vec<[f32; 2]> = (0..n)
                .map(|i| [self.scratch[0][i], self.scratch[1][i]])
                .collect();
            let peak = frames
                .iter()
                .fold(0.0_f32, |acc, f| acc.max(f[0].abs()).max(f[1].abs()));
            self.profiler.record_metric("block_peak", peak);
            self.profiler.record_metric("gain_left", gains.left());
            self.profiler.record_metric("gain_right", gains.right());

            sink(AudioBlock {
                index: index as u64,
                frames,
            });

            report.blocks += 1;
            report.frames += n as u64;
            report.last_gains = Some(gains);

            // affichage périodique
            if last_log.elapsed() >= log_interval {
                log_metrics!(&self.profiler);
                last_log = Instant::now();
            }
        }

        self.processor.release();
        debug!("Rendered {} blocks ({} frames)", report.blocks, report.frames);
        report
    }

    fn publish_automation(&self, start_frame: usize, sample_rate: u32) {
        let (Some((sender, base)), Some(period)) = (&self.automation, self.config.orbit_period_s)
        else {
            return;
        };
        if sample_rate == 0 {
            return;
        }
        let t = start_frame as f32 / sample_rate as f32;
        let angle = std::f32::consts::TAU * t / period;
        if !sender.publish(orbit_snapshot(base, angle)) {
            warn!("Orbit snapshot at t={:.3}s dropped", t);
        }
    }

    /// Loads `input_path`, renders it and writes the result to `output_path`.
    pub fn render_file(
        &mut self,
        input_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
    ) -> anyhow::Result<RenderReport> {
        let audio = load_wav(input_path.as_ref())?;
        info!(
            "Loaded '{}': {} frames, {} Hz, {} channel(s), {:.2}s",
            input_path.as_ref().display(),
            audio.frames.len(),
            audio.sample_rate,
            audio.channels,
            audio.duration_secs()
        );

        let mut writer = SafeWavWriter::new(output_path.as_ref(), audio.sample_rate)?;
        let mut dropped = 0_u64;
        let report = self.render_frames(&audio.frames, audio.sample_rate, |block| {
            if !writer.push_block(block) {
                dropped += 1;
            }
        });
        let written = writer.stop()?;

        anyhow::ensure!(dropped == 0, "{} block(s) could not be written", dropped);
        anyhow::ensure!(
            written == report.frames,
            "Wrote {} frames, rendered {}",
            written,
            report.frames
        );
        log_metrics!(&self.profiler);
        info!(
            "Wrote '{}': {} frames in {} blocks",
            output_path.as_ref().display(),
            written,
            report.blocks
        );
        Ok(report)
    }
}
