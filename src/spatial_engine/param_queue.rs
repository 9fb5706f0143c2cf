//! Hand-off of parameter snapshots from a control thread to the audio thread.
//!
//! The control side publishes whole [`SpatialSettings`] values; the audio side
//! drains the queue once per block and keeps the newest one, so a block never
//! sees a mix of old and new fields.

use crate::spatial_engine::settings::SpatialSettings;
use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};
use log::debug;

pub const DEFAULT_QUEUE_CAPACITY: usize = 64;
const PUBLISH_ATTEMPTS: usize = 4;

/// Control-thread side (UI, automation, tests).
#[derive(Clone)]
pub struct ParamSender {
    sender: Sender<SpatialSettings>,
    // évince le plus ancien snapshot quand la file est pleine
    evict: Receiver<SpatialSettings>,
}

/// Audio-thread side, owned by the engine.
pub struct ParamReceiver {
    receiver: Receiver<SpatialSettings>,
}

/// Thread-safe queue : crossbeam channel (sender côté contrôle, receiver côté audio)
pub fn param_queue(capacity: usize) -> (ParamSender, ParamReceiver) {
    let (sender, receiver) = bounded(capacity.max(1));
    let evict = receiver.clone();
    (ParamSender { sender, evict }, ParamReceiver { receiver })
}

impl ParamSender {
    /// Publishes a snapshot without blocking.
    ///
    /// When the queue is full the oldest pending snapshot is discarded, so the
    /// newest published value always reaches the audio side. Returns `false`
    /// only if the snapshot could not be queued after a few attempts (other
    /// producers filling the queue concurrently).
    pub fn publish(&self, settings: SpatialSettings) -> bool {
        let mut pending = settings;
        for _ in 0..PUBLISH_ATTEMPTS {
            match self.sender.try_send(pending) {
                Ok(()) => return true,
                Err(TrySendError::Full(back)) => {
                    if self.evict.try_recv().is_ok() {
                        debug!("Parameter queue full, oldest snapshot discarded");
                    }
                    pending = back;
                }
                Err(TrySendError::Disconnected(_)) => return false,
            }
        }
        debug!("Parameter queue contended, snapshot dropped");
        false
    }

    /// Validates, then publishes.
    pub fn publish_validated(&self, settings: SpatialSettings) -> anyhow::Result<bool> {
        settings.validate()?;
        Ok(self.publish(settings))
    }
}

impl ParamReceiver {
    /// Drains every pending snapshot and returns the newest, if any.
    ///
    /// Never blocks and never allocates.
    pub fn latest(&self) -> Option<SpatialSettings> {
        let mut newest = None;
        loop {
            match self.receiver.try_recv() {
                Ok(settings) => newest = Some(settings),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        newest
    }

    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}
