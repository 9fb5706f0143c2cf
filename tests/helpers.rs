#![allow(dead_code)]

use immersive_panner::spatial_engine::{GainResult, SpatialProcessor, SpatialSettings};
use std::path::Path;

/// Initialise env_logger une seule fois pour tous les tests
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Processeur neutre : laisse passer le signal
pub struct DummyProcessor {
    pub settings: SpatialSettings,
}

impl DummyProcessor {
    pub fn new() -> Self {
        Self {
            settings: SpatialSettings::default(),
        }
    }
}

impl SpatialProcessor for DummyProcessor {
    fn prepare(&mut self, _sample_rate: f32, _max_block_size: usize) {}
    fn release(&mut self) {}
    fn process_block(
        &mut self,
        _channels: &mut [&mut [f32]],
        _num_input_channels: usize,
    ) -> GainResult {
        GainResult::UNITY
    }
    fn process_frames(&mut self, _frames: &mut [[f32; 2]]) -> GainResult {
        GainResult::UNITY
    }
    fn settings(&self) -> &SpatialSettings {
        &self.settings
    }
    fn set_settings(&mut self, settings: SpatialSettings) {
        self.settings = settings;
    }
}

/// Processeur qui trace les appels du host
pub struct LoggingProcessor {
    pub settings: SpatialSettings,
    pub log: Vec<String>,
    pub block_sizes: Vec<usize>,
}

impl LoggingProcessor {
    pub fn new() -> Self {
        Self {
            settings: SpatialSettings::default(),
            log: vec![],
            block_sizes: vec![],
        }
    }
}

impl SpatialProcessor for LoggingProcessor {
    fn prepare(&mut self, sample_rate: f32, max_block_size: usize) {
        self.log
            .push(format!("prepare {} {}", sample_rate, max_block_size));
    }
    fn release(&mut self) {
        self.log.push("release".into());
    }
    fn process_block(
        &mut self,
        channels: &mut [&mut [f32]],
        num_input_channels: usize,
    ) -> GainResult {
        self.log.push(format!(
            "process_block {} {}",
            channels.len(),
            num_input_channels
        ));
        self.block_sizes.push(channels.first().map_or(0, |c| c.len()));
        GainResult::UNITY
    }
    fn process_frames(&mut self, frames: &mut [[f32; 2]]) -> GainResult {
        self.log.push("process_frames".into());
        self.block_sizes.push(frames.len());
        GainResult::UNITY
    }
    fn settings(&self) -> &SpatialSettings {
        &self.settings
    }
    fn set_settings(&mut self, settings: SpatialSettings) {
        self.settings = settings;
    }
}

/// Sinus stéréo identique sur les deux canaux
pub fn sine_frames(freq: f32, sample_rate: u32, len: usize, amplitude: f32) -> Vec<[f32; 2]> {
    (0..len)
        .map(|i| {
            let s = amplitude
                * (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin();
            [s, s]
        })
        .collect()
}

/// Écrit un WAV stéréo 16 bits de test
pub fn write_stereo_wav(path: &Path, sample_rate: u32, frames: &[[f32; 2]]) {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for frame in frames {
        for s in frame {
            writer
                .write_sample((s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
                .unwrap();
        }
    }
    writer.finalize().unwrap();
}

/// Relit un WAV stéréo 16 bits en frames normalisées
pub fn read_stereo_wav(path: &Path) -> (hound::WavSpec, Vec<[f32; 2]>) {
    let mut reader = hound::WavReader::open(path).unwrap();
    let spec = reader.spec();
    let samples: Vec<f32> = reader
        .samples::<i16>()
        .map(|s| s.unwrap() as f32 / i16::MAX as f32)
        .collect();
    let frames = samples.chunks(2).map(|c| [c[0], c[1]]).collect();
    (spec, frames)
}

/// Somme des carrés d'un canal
pub fn energy(frames: &[[f32; 2]], channel: usize) -> f32 {
    frames.iter().map(|f| f[channel] * f[channel]).sum()
}
