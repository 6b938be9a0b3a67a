use std::net::SocketAddr;

/// The remote `ip:port` of a socket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);
impl ConnectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}
impl From<SocketAddr> for ConnectionId {
    fn from(addr: SocketAddr) -> Self {
        Self(addr.to_string())
    }
}
impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Text travelling to or from one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub connection: ConnectionId,
    pub body: String,
}
impl Message {
    /// Body that tears the connection down instead of being written. The
    /// reactor also sends it inward when a peer goes away.
    pub const CLOSE: &'static str = "CLOSE";

    pub fn new(connection: ConnectionId, body: impl Into<String>) -> Self {
        Self { connection, body: body.into() }
    }
    pub fn close(connection: ConnectionId) -> Self {
        Self::new(connection, Self::CLOSE)
    }
    pub fn is_close(&self) -> bool {
        self.body == Self::CLOSE
    }
}
