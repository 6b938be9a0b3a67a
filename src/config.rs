use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Command line.
#[derive(Debug, clap::Parser)]
#[command(name = "chessd", about = "Two-player chess over plain TCP")]
pub struct Args {
    /// TCP port to listen on
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind: SocketAddr,
    /// Size of the read buffer. A request longer than this is cut short.
    pub buffer_size: usize,
    /// Longest time either loop sleeps before looking at the shutdown flag.
    pub poll_timeout: Duration,
    /// Folder holding one snapshot per unfinished game.
    pub data_dir: PathBuf,
    pub extension: String,
}

impl Settings {
    pub const BUFFER_SIZE: usize = 2 << 13;
    pub const POLL_TIMEOUT: Duration = Duration::from_millis(1000);
    pub const DATA_DIR: &'static str = "data";
    pub const EXTENSION: &'static str = "game";

    pub fn new(port: u16) -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], port)),
            buffer_size: Self::BUFFER_SIZE,
            poll_timeout: Self::POLL_TIMEOUT,
            data_dir: PathBuf::from(Self::DATA_DIR),
            extension: Self::EXTENSION.to_string(),
        }
    }
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Self::new(args.port)
    }
}
