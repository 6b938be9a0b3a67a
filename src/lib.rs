mod collections;
pub mod chess;
pub mod config;
pub mod lobby;
pub mod network;
pub mod store;
pub mod worker;

pub use lobby::Lobby;
pub use network::Network;
pub use worker::Worker;

mod prelude {
    pub(crate) use crate::chess::*;
    pub(crate) use crate::collections::*;
    pub(crate) use crate::lobby::Lobby;
    pub(crate) use crate::network::{Command, ConnectionId, Message, Outbox};
    pub(crate) use crate::store::Store;
    pub(crate) use std::{io, time};
    pub(crate) use std::net::TcpStream;
}

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The reactor and the worker, wired together through the request queue.
pub struct Server {
    network: Network,
    worker: Worker,
    shutdown: Arc<AtomicBool>,
}

impl Server {
    /// Binds the port and loads every saved game. Nothing is served until
    /// `run`.
    pub fn new(settings: &config::Settings) -> std::io::Result<Self> {
        let (requests, queue) = crossbeam::channel::unbounded();
        let network = Network::bind(settings, requests)?;
        let store = store::DiskStore::new(&settings.data_dir, settings.extension.as_str());
        let lobby = Lobby::new(Box::new(store));
        let worker = Worker::new(lobby, queue, network.outbox(), settings.poll_timeout);
        Ok(Self {
            network,
            worker,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.network.local_addr()
    }
    /// Setting this stops both loops within a poll timeout.
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        self.shutdown.clone()
    }

    /// Runs the worker on its own thread and the reactor on this one.
    pub fn run(self) -> std::io::Result<()> {
        let Self { mut network, worker, shutdown } = self;
        let worker_shutdown = shutdown.clone();
        let worker = std::thread::Builder::new()
            .name("worker".into())
            .spawn(move || worker.run(&worker_shutdown))?;
        network.run(&shutdown);
        shutdown.store(true, Ordering::Relaxed);
        if worker.join().is_err() {
            log::error!("worker thread panicked");
        }
        Ok(())
    }
}
