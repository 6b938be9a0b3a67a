//! Durable snapshots of unfinished games.
//!
//! Each game lives in its own `<id>.<extension>` file holding a versioned
//! JSON document, so a record can be replaced or removed without touching
//! the others.

use crate::chess::{Board, Color};
use crate::lobby::{Game, GameId, Player, Token};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Encode(serde_json::Error),
    #[error("Deserialization error: {0}")]
    Decode(serde_json::Error),
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
    #[error("invalid snapshot: {0}")]
    Invalid(&'static str),
}

/// Where games go between moves and across restarts.
pub trait Store {
    /// Replaces the game's record.
    fn save(&mut self, game: &Game) -> Result<(), StoreError>;
    /// Every game that could be read back. Unreadable records are skipped.
    fn load_all(&mut self) -> Vec<Game>;
    fn delete(&mut self, id: GameId) -> Result<(), StoreError>;
}

/// On-disk form of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub id: GameId,
    pub turn: Color,
    pub players: Vec<PlayerRecord>,
    /// Rank 1 first. Upper case is white, lower case black, space empty.
    pub board: Vec<String>,
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub token: Token,
    pub color: Color,
}

impl Snapshot {
    pub fn of(game: &Game) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: game.id(),
            turn: game.turn(),
            players: game
                .players()
                .iter()
                .map(|p| PlayerRecord { token: p.token, color: p.color })
                .collect(),
            board: game.board().to_rows(),
        }
    }

    pub fn restore(self) -> Result<Game, StoreError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedVersion(self.version));
        }
        let board = Board::from_rows(&self.board).ok_or(StoreError::Invalid("malformed board"))?;
        match self.players.as_slice() {
            [] => return Err(StoreError::Invalid("no players")),
            [a, b] if a.color == b.color || a.token == b.token => {
                return Err(StoreError::Invalid("players share a color or token"))
            }
            [_] | [_, _] => {}
            _ => return Err(StoreError::Invalid("more than two players")),
        }
        let players = self
            .players
            .into_iter()
            .map(|p| Player { token: p.token, color: p.color, game: self.id })
            .collect();
        Ok(Game {
            id: self.id,
            players,
            board,
            turn: self.turn,
        })
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(self).map_err(StoreError::Encode)
    }
    pub fn from_json(s: &str) -> Result<Self, StoreError> {
        serde_json::from_str(s).map_err(StoreError::Decode)
    }
}

/// One file per game under a single folder.
#[derive(Debug)]
pub struct DiskStore {
    dir: PathBuf,
    extension: String,
}

impl DiskStore {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self { dir: dir.into(), extension: extension.into() }
    }
    pub fn path_of(&self, id: GameId) -> PathBuf {
        self.dir.join(format!("{id}.{}", self.extension))
    }
    fn read(path: &Path) -> Result<Game, StoreError> {
        let json = std::fs::read_to_string(path)?;
        Snapshot::from_json(&json)?.restore()
    }
}

impl Store for DiskStore {
    fn save(&mut self, game: &Game) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let json = Snapshot::of(game).to_json()?;
        let path = self.path_of(game.id());
        let partial = path.with_extension(format!("{}.partial", self.extension));
        std::fs::write(&partial, json)?;
        std::fs::rename(&partial, &path)?;
        log::trace!("saved game {} to {}", game.id(), path.display());
        Ok(())
    }

    fn load_all(&mut self) -> Vec<Game> {
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            log::error!("can't open game folder {}: {e}", self.dir.display());
            return vec![];
        }
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::error!("can't list game folder {}: {e}", self.dir.display());
                return vec![];
            }
        };
        let mut games = vec![];
        for entry in entries.flatten() {
            let path = entry.path();
            let is_record = path.is_file()
                && path.extension().map_or(false, |ext| *ext == *self.extension);
            if !is_record {
                continue;
            }
            match Self::read(&path) {
                Ok(game) => games.push(game),
                Err(e) => log::warn!("skipping game record {}: {e}", path.display()),
            }
        }
        games
    }

    fn delete(&mut self, id: GameId) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path_of(id)) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
