use crate::prelude::*;
use crossbeam::channel::Sender;
use std::net::{SocketAddr, TcpListener};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub mod client;
mod message;
mod outbox;
mod request;
pub mod wire;

pub use message::{ConnectionId, Message};
pub use outbox::Outbox;
pub use request::Command;

/// The reactor: accepts sockets and turns whatever they send into requests
/// for the worker.
pub struct Network {
    listener: TcpListener,
    scratch_buffer: Vec<u8>,
    poll_timeout: time::Duration,

    poller: Arc<polling::Poller>,
    events: Vec<polling::Event>,

    outbox: Outbox,
}

const LISTENER: usize = usize::MAX - 1;
impl Network {
    pub fn bind(settings: &crate::config::Settings, requests: Sender<Message>) -> io::Result<Self> {
        let poller = Arc::new(polling::Poller::new()?);

        let listener = TcpListener::bind(settings.bind)?;
        listener.set_nonblocking(true)?;
        poller.add(&listener, polling::Event::readable(LISTENER))?;
        Ok(Self {
            listener,
            scratch_buffer: vec![0; settings.buffer_size],
            poll_timeout: settings.poll_timeout,

            outbox: Outbox::new(poller.clone(), requests, settings.buffer_size),
            poller,
            events: vec![],
        })
    }
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }
    /// Handle the worker writes replies through.
    pub fn outbox(&self) -> Outbox {
        self.outbox.clone()
    }

    /// Runs until `shutdown` is set. The flag is looked at once per poll, so
    /// stopping takes up to one poll timeout.
    pub fn run(&mut self, shutdown: &AtomicBool) {
        log::info!("listening on {:?}", self.listener.local_addr());
        while !shutdown.load(Ordering::Relaxed) {
            self.events.clear();
            match self.poller.wait(&mut self.events, Some(self.poll_timeout)) {
                Ok(0) => continue,
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::error!("waiting for sockets failed: {e}");
                    continue;
                }
            }
            let events = core::mem::take(&mut self.events);
            for event in &events {
                if event.key == LISTENER {
                    self.accept_clients();
                    if let Err(e) = self.poller.modify(&self.listener, polling::Event::readable(LISTENER)) {
                        log::error!("can't listen for new connections: {e}");
                    }
                } else if event.readable {
                    self.outbox.receive(event.key, &mut self.scratch_buffer);
                }
            }
            self.events = events;
        }
        log::info!("network stopped");
    }

    fn accept_clients(&mut self) {
        loop {
            match self.listener.accept() {
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::warn!("accepting a connection failed: {e}");
                    break;
                }
                Ok((conn, addr)) => {
                    if let Err(e) = self.outbox.register(conn, addr.into()) {
                        log::warn!("couldn't set up {addr}: {e}");
                    }
                }
            }
        }
    }
}
