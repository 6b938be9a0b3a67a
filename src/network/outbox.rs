use super::client::{Client, Received};
use crate::prelude::*;
use crossbeam::channel::Sender;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// The live connection table, shared by the reactor (accept, read, close)
/// and the worker (write, close).
///
/// Everything that can touch a socket's lifetime goes through one lock.
#[derive(Clone)]
pub struct Outbox(Arc<Shared>);

struct Shared {
    table: Mutex<Table>,
    poller: Arc<polling::Poller>,
    requests: Sender<Message>,
}
struct Table {
    clients: SlotMap<Client>,
    index: HashMap<ConnectionId, usize>,
    write_buffer: Vec<u8>,
}

impl Outbox {
    pub(super) fn new(poller: Arc<polling::Poller>, requests: Sender<Message>, buffer_size: usize) -> Self {
        Self(Arc::new(Shared {
            table: Mutex::new(Table {
                clients: SlotMap::new(),
                index: HashMap::new(),
                write_buffer: Vec::with_capacity(buffer_size),
            }),
            poller,
            requests,
        }))
    }
    fn lock(&self) -> MutexGuard<'_, Table> {
        self.0.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
    fn enqueue(&self, message: Message) {
        if self.0.requests.send(message).is_err() {
            log::trace!("worker is gone, request dropped");
        }
    }

    pub fn is_connected(&self, id: &ConnectionId) -> bool {
        self.lock().index.contains_key(id)
    }
    pub fn connections(&self) -> usize {
        self.lock().clients.len()
    }

    /// Sends a reply, or drops the connection if the body is `CLOSE`.
    /// Replies to connections that are already gone are discarded.
    pub fn deliver(&self, message: &Message) {
        let mut table = self.lock();
        let Some(&key) = table.index.get(&message.connection) else {
            log::trace!("{} is gone, reply dropped", message.connection);
            return;
        };
        if message.is_close() {
            table.close(key, &self.0.poller);
            return;
        }
        let Table { clients, write_buffer, .. } = &mut *table;
        let Some(client) = clients.get_mut(key) else { return };
        super::wire::encode(&message.body, write_buffer);
        if let Err(e) = client.write(write_buffer) {
            log::warn!("write to {} failed: {e}", message.connection);
            if let Some(id) = table.close(key, &self.0.poller) {
                self.enqueue(Message::close(id));
            }
        }
    }

    pub(super) fn register(&self, conn: TcpStream, id: ConnectionId) -> io::Result<()> {
        let client = Client::accept(conn, id.clone())?;
        let mut table = self.lock();
        let key = table.clients.next_idx();
        self.0.poller.add(client.conn(), polling::Event::readable(key))?;
        table.clients.insert(client);
        table.index.insert(id.clone(), key);
        log::info!("connected {id}");
        Ok(())
    }

    /// Reads whatever the socket behind `key` has and queues it as one
    /// request. A closed or failed socket queues `CLOSE` instead.
    pub(super) fn receive(&self, key: usize, scratch: &mut [u8]) {
        let mut table = self.lock();
        let Some(client) = table.clients.get_mut(key) else { return };
        match client.read(scratch) {
            Received::Text(body) => {
                self.enqueue(Message::new(client.id().clone(), body));
                self.rearm(&mut table, key);
            }
            Received::Nothing => self.rearm(&mut table, key),
            Received::Closed => {
                if let Some(id) = table.close(key, &self.0.poller) {
                    self.enqueue(Message::close(id));
                }
            }
        }
    }

    // the poller reports each interest once, so reads are re-enabled by hand
    fn rearm(&self, table: &mut Table, key: usize) {
        let Some(client) = table.clients.get(key) else { return };
        if let Err(e) = self.0.poller.modify(client.conn(), polling::Event::readable(key)) {
            log::warn!("can't listen to {} anymore: {e}", client.id());
            if let Some(id) = table.close(key, &self.0.poller) {
                self.enqueue(Message::close(id));
            }
        }
    }
}

impl Table {
    fn close(&mut self, key: usize, poller: &polling::Poller) -> Option<ConnectionId> {
        let client = self.clients.release(key)?;
        if let Err(e) = poller.delete(client.conn()) {
            log::debug!("deregistering {} failed: {e}", client.id());
        }
        let id = client.id().clone();
        self.index.remove(&id);
        log::info!("disconnected {id}");
        Some(id)
    }
}
