use std::sync::Arc;

use log::{debug, info, warn};
use rtrb::{Consumer, Producer};
use thiserror::Error;

use super::message::{EngineMessage, TriggerEvent};
use super::meters::EngineMeters;
use crate::player::SampleSource;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine message queue is full")]
    MessageQueueFull,
}

/// Control-thread half of an [`Engine`](super::Engine).
///
/// Owns the sending end of the message ring and the receiving ends of the
/// retire and event rings. Everything here may allocate, log, and drop.
pub struct EngineHandle {
    tx: Producer<EngineMessage>,
    retired_rx: Consumer<Arc<SampleSource>>,
    events_rx: Option<Consumer<TriggerEvent>>,
    meters: Arc<EngineMeters>,
}

impl EngineHandle {
    pub(crate) fn new(
        tx: Producer<EngineMessage>,
        retired_rx: Consumer<Arc<SampleSource>>,
        events_rx: Option<Consumer<TriggerEvent>>,
        meters: Arc<EngineMeters>,
    ) -> Self {
        Self {
            tx,
            retired_rx,
            events_rx,
            meters,
        }
    }

    fn send(&mut self, msg: EngineMessage) -> Result<(), EngineError> {
        self.tx.push(msg).map_err(|_| {
            warn!("engine message queue full, request dropped");
            EngineError::MessageQueueFull
        })
    }

    /// Hand a decoded sample to the audio thread.
    ///
    /// The previous source comes back through [`collect_retired`](Self::collect_retired).
    pub fn load_source(&mut self, source: Arc<SampleSource>) -> Result<(), EngineError> {
        info!(
            "loading sample: {} frames, {} ch, {} Hz",
            source.frames(),
            source.channels(),
            source.sample_rate()
        );
        self.collect_retired();
        self.send(EngineMessage::LoadSource(Some(source)))
    }

    pub fn unload_source(&mut self) -> Result<(), EngineError> {
        self.send(EngineMessage::LoadSource(None))
    }

    /// Play the sample from the start at audition gain (trigger output must be on).
    pub fn audition(&mut self) -> Result<(), EngineError> {
        self.send(EngineMessage::Audition)
    }

    pub fn stop(&mut self) -> Result<(), EngineError> {
        self.send(EngineMessage::Stop)
    }

    /// Drop sources the audio thread has swapped out. Returns how many.
    pub fn collect_retired(&mut self) -> usize {
        let mut count = 0;
        while let Ok(source) = self.retired_rx.pop() {
            debug!("releasing retired sample ({} frames)", source.frames());
            drop(source);
            count += 1;
        }
        count
    }

    /// Next fired trigger, oldest first.
    pub fn pop_event(&mut self) -> Option<TriggerEvent> {
        self.events_rx.as_mut()?.pop().ok()
    }

    pub fn meters(&self) -> &Arc<EngineMeters> {
        &self.meters
    }
}
