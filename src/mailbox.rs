//! Single-slot hand-off between the detector feed and the frame loop.
//!
//! The detector publishes at its own cadence and the frame loop reads whatever
//! is resident. There is no queue: a newer signal replaces an older one, and
//! readers always get a whole signal, never a half-written one.

use crate::config::GestureConfig;
use crate::error::ConfigError;
use crate::gesture::{GestureExtractor, GestureSignal};
use crate::landmarks::Landmark;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug, Default)]
struct Slot {
    signal: GestureSignal,
    /// Set when a published signal starts a pinch; cleared by the reader.
    pinch_started: bool,
    /// Number of signals published so far.
    sequence: u64,
}

/// Latest-value gesture mailbox. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct GestureMailbox {
    slot: Arc<Mutex<Slot>>,
}

impl GestureMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned slot still holds a complete signal; keep using it.
    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace the resident signal.
    pub fn publish(&self, signal: GestureSignal) {
        let mut slot = self.lock();
        if signal.pinch_active && !slot.signal.pinch_active {
            debug!(sequence = slot.sequence + 1, "pinch started");
            slot.pinch_started = true;
        }
        slot.signal = signal;
        slot.sequence += 1;
    }

    /// Copy of the resident signal.
    pub fn latest(&self) -> GestureSignal {
        self.lock().signal.clone()
    }

    /// Whether a pinch has started since the last call. Consumes the edge.
    pub fn take_pinch_started(&self) -> bool {
        std::mem::take(&mut self.lock().pinch_started)
    }

    /// How many signals have been published.
    pub fn sequence(&self) -> u64 {
        self.lock().sequence
    }
}

/// Detector-side adapter: extracts a signal from each sample and publishes it.
#[derive(Debug)]
pub struct GestureFeed {
    extractor: GestureExtractor,
    previous: GestureSignal,
    mailbox: GestureMailbox,
}

impl GestureFeed {
    /// Fails if `config` does not validate.
    pub fn new(config: GestureConfig, mailbox: GestureMailbox) -> Result<Self, ConfigError> {
        Ok(Self::with_extractor(GestureExtractor::new(config)?, mailbox))
    }

    pub(crate) fn with_extractor(extractor: GestureExtractor, mailbox: GestureMailbox) -> Self {
        Self {
            extractor,
            previous: GestureSignal::rest(),
            mailbox,
        }
    }

    /// Handle one detector callback. `None` means no hand was found.
    pub fn push(&mut self, landmarks: Option<&[Landmark]>) -> &GestureSignal {
        self.previous = self.extractor.extract(landmarks, &self.previous);
        self.mailbox.publish(self.previous.clone());
        &self.previous
    }

    /// The mailbox this feed publishes into.
    pub fn mailbox(&self) -> &GestureMailbox {
        &self.mailbox
    }
}
