// =========================
// Audio File Loading
// =========================
use hound::{SampleFormat, WavReader};
use std::fmt;
use std::io::Read;
use std::path::Path;

/// Errors raised while reading an input file
#[derive(Debug)]
pub enum HostError {
    UnsupportedFormat { format: SampleFormat, bits: u16 },
    UnsupportedChannels(u16),
    EmptyInput,
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::UnsupportedFormat { format, bits } => {
                write!(f, "Unsupported WAV sample format: {:?} {} bits", format, bits)
            }
            HostError::UnsupportedChannels(n) => {
                write!(f, "Unsupported channel count: {} (mono or stereo only)", n)
            }
            HostError::EmptyInput => write!(f, "Input file contains no audio frames"),
        }
    }
}

impl std::error::Error for HostError {}

/// Stereo frames plus the format they were read with.
#[derive(Debug, Clone)]
pub struct LoadedAudio {
    pub frames: Vec<[f32; 2]>,
    pub sample_rate: u32,
    /// Channel count of the source file (1 or 2)
    pub channels: u16,
}

impl LoadedAudio {
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames.len() as f32 / self.sample_rate as f32
    }
}

/// Charge un fichier WAV et le convertit en tampon stéréo `[f32; 2]`
///
/// - mono et stéréo (le canal unique est dupliqué si mono)
/// - PCM 16/24 bits et float 32 bits, normalisés dans [-1.0, 1.0]
pub fn load_wav(path: impl AsRef<Path>) -> anyhow::Result<LoadedAudio> {
    let path = path.as_ref();
    let mut reader = WavReader::open(path)
        .map_err(|e| anyhow::anyhow!("Failed to open WAV file '{}': {}", path.display(), e))?;
    let spec = reader.spec();

    if spec.channels == 0 || spec.channels > 2 {
        return Err(HostError::UnsupportedChannels(spec.channels).into());
    }

    let frames = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, 16) => {
            read_frames(&mut reader, spec.channels, |s: i16| s as f32 / 32768.0)?
        }
        (SampleFormat::Int, 24) => {
            read_frames(&mut reader, spec.channels, |s: i32| s as f32 / 8_388_608.0)?
        }
        (SampleFormat::Float, 32) => read_frames(&mut reader, spec.channels, |s: f32| s)?,
        (format, bits) => return Err(HostError::UnsupportedFormat { format, bits }.into()),
    };

    if frames.is_empty() {
        return Err(HostError::EmptyInput.into());
    }

    Ok(LoadedAudio {
        frames,
        sample_rate: spec.sample_rate,
        channels: spec.channels,
    })
}

fn read_frames<R, S, F>(
    reader: &mut WavReader<R>,
    channels: u16,
    convert: F,
) -> anyhow::Result<Vec<[f32; 2]>>
where
    R: Read,
    S: hound::Sample,
    F: Fn(S) -> f32,
{
    let channels = channels as usize;
    let mut data = Vec::with_capacity(reader.len() as usize / channels);
    // Tampon temporaire pour regrouper les échantillons d'une même frame (L/R)
    let mut temp = [0.0_f32; 2];
    let mut filled = 0;

    for sample in reader.samples::<S>() {
        temp[filled] = convert(sample?);
        filled += 1;
        if filled == channels {
            let right = if channels > 1 { temp[1] } else { temp[0] };
            data.push([temp[0], right]);
            filled = 0;
        }
    }

    Ok(data)
}
