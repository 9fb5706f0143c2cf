use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use hound::{WavSpec, WavWriter};
use log::{info, warn};
use std::{
    path::Path,
    sync::{Arc, Condvar, Mutex},
    thread,
    time::{Duration, Instant},
};

/// Bloc audio identifié
#[derive(Debug, Clone)]
pub struct AudioBlock {
    pub index: u64,
    pub frames: Vec<[f32; 2]>,
}

/// Writer WAV stéréo 16 bits, alimenté depuis un thread séparé
pub struct SafeWavWriter {
    tx: Sender<AudioBlock>,
    handle: Option<thread::JoinHandle<anyhow::Result<u64>>>,
    stop_pair: Arc<(Mutex<bool>, Condvar)>, // signal de fin
    frames_written: Option<u64>,
}

const FLUSH_INTERVAL: Duration = Duration::from_secs(2);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

impl SafeWavWriter {
    /// Creates the output file and starts the writer thread.
    ///
    /// # Errors
    /// Returns error if the file cannot be created.
    pub fn new(path: impl AsRef<Path>, sample_rate: u32) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let spec = WavSpec {
            channels: 2,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).map_err(|e| {
            anyhow::anyhow!("Failed to create WAV file at '{}': {}", path.display(), e)
        })?;

        let (tx, rx): (Sender<AudioBlock>, Receiver<AudioBlock>) = unbounded();
        let stop_pair = Arc::new((Mutex::new(true), Condvar::new()));
        let stop_pair_clone = stop_pair.clone();

        info!("Starting SafeWavWriter thread for '{}'", path.display());
        let handle = thread::spawn(move || -> anyhow::Result<u64> {
            let mut total_frames: u64 = 0;
            let mut last_flush = Instant::now();

            loop {
                match rx.recv_timeout(POLL_INTERVAL) {
                    Ok(block) => {
                        for frame in &block.frames {
                            writer.write_sample(to_i16(frame[0]))?;
                            writer.write_sample(to_i16(frame[1]))?;
                        }
                        total_frames += block.frames.len() as u64;

                        // Flush périodique
                        if last_flush.elapsed() >= FLUSH_INTERVAL {
                            writer.flush()?;
                            info!(
                                "[SafeWavWriter] Periodic flush after block #{:04} ({} frames)",
                                block.index, total_frames
                            );
                            last_flush = Instant::now();
                        }
                    }
                    Err(RecvTimeoutError::Timeout) => {
                        // Vérifie le signal de stop une fois la file vide
                        let (lock, _cvar) = &*stop_pair_clone;
                        let running = lock
                            .lock()
                            .map_err(|_| anyhow::anyhow!("Writer stop flag poisoned"))?;
                        if !*running {
                            break;
                        }
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }

            writer.finalize()?;
            info!(
                "[SafeWavWriter] Thread stopped, WAV file finalized ({} frames)",
                total_frames
            );
            Ok(total_frames)
        });

        Ok(Self {
            tx,
            handle: Some(handle),
            stop_pair,
            frames_written: None,
        })
    }

    /// Pousse un bloc audio dans le writer. Returns `false` once the writer
    /// thread is gone.
    pub fn push_block(&self, block: AudioBlock) -> bool {
        self.tx.send(block).is_ok()
    }

    /// Stoppe le thread et finalise le fichier. Pending blocks are written
    /// first. Calling it again returns the same frame count.
    pub fn stop(&mut self) -> anyhow::Result<u64> {
        if let Some(total) = self.frames_written {
            return Ok(total);
        }

        {
            let (lock, cvar) = &*self.stop_pair;
            let mut running = lock
                .lock()
                .map_err(|_| anyhow::anyhow!("Writer stop flag poisoned"))?;
            *running = false;
            cvar.notify_all();
        }

        let handle = self
            .handle
            .take()
            .ok_or_else(|| anyhow::anyhow!("Writer thread already joined"))?;
        let total = handle
            .join()
            .map_err(|_| anyhow::anyhow!("Writer thread panicked"))??;
        self.frames_written = Some(total);
        Ok(total)
    }
}

impl Drop for SafeWavWriter {
    fn drop(&mut self) {
        if self.handle.is_some() {
            if let Err(e) = self.stop() {
                warn!("SafeWavWriter dropped with error: {}", e);
            }
        }
    }
}
