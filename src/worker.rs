use crate::prelude::*;
use crossbeam::channel::{Receiver, RecvTimeoutError};
use std::sync::atomic::{AtomicBool, Ordering};

/// Applies requests to the lobby one at a time, in arrival order.
pub struct Worker {
    lobby: Lobby,
    requests: Receiver<Message>,
    outbox: Outbox,
    poll_timeout: time::Duration,
}

impl Worker {
    pub fn new(lobby: Lobby, requests: Receiver<Message>, outbox: Outbox, poll_timeout: time::Duration) -> Self {
        Self { lobby, requests, outbox, poll_timeout }
    }

    /// Blocks on the queue until `shutdown` is set. Requests still queued at
    /// that point are dropped.
    pub fn run(mut self, shutdown: &AtomicBool) {
        while !shutdown.load(Ordering::Relaxed) {
            let request = match self.requests.recv_timeout(self.poll_timeout) {
                Ok(request) => request,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            };
            for reply in self.lobby.handle(&request) {
                self.outbox.deliver(&reply);
            }
        }
        log::info!("worker stopped");
    }
}
