use crate::prelude::*;
use std::io::{Read, Write};

pub(super) enum Received {
    Text(String),
    Nothing,
    Closed,
}

/// One accepted socket.
pub struct Client {
    conn: TcpStream,
    id: ConnectionId,
}
impl Client {
    pub fn accept(conn: TcpStream, id: ConnectionId) -> io::Result<Self> {
        conn.set_nonblocking(true)?;
        Ok(Self { conn, id })
    }
    pub(super) fn conn(&self) -> &TcpStream {
        &self.conn
    }
    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    /// A single read. Whatever arrived is one request.
    pub(super) fn read(&mut self, scratch: &mut [u8]) -> Received {
        match self.conn.read(scratch) {
            Ok(0) => Received::Closed,
            Ok(n) => Received::Text(super::wire::decode(&scratch[..n])),
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted) => {
                Received::Nothing
            }
            Err(e) => {
                log::debug!("read from {} failed: {e}", self.id);
                Received::Closed
            }
        }
    }

    /// Writes `bytes` without blocking. If the peer stops draining its
    /// socket the remainder is dropped.
    pub(super) fn write(&mut self, mut bytes: &[u8]) -> io::Result<()> {
        while !bytes.is_empty() {
            match self.conn.write(bytes) {
                Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
                Ok(n) => bytes = &bytes[n..],
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    log::warn!("{} isn't reading, dropped {} bytes", self.id, bytes.len());
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}
impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").field("id", &self.id).finish()
    }
}
