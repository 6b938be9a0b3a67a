//! Move legality for an 8x8 board. Pure state, no I/O.
mod board;
mod location;
mod outcome;

pub use board::Board;
pub use location::Location;
pub use outcome::{MoveResult, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
    pub const fn is_white(self) -> bool {
        matches!(self, Self::White)
    }
    /// Row delta a pawn of this color advances by.
    pub(crate) const fn forward(self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }
}
impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::White => "White",
            Self::Black => "Black",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Rook,
    Knight,
    Bishop,
    King,
    Queen,
    Pawn,
}
impl PieceKind {
    pub const fn letter(self) -> char {
        match self {
            Self::Rook => 'R',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::King => 'K',
            Self::Queen => 'Q',
            Self::Pawn => 'P',
        }
    }
    pub fn from_letter(c: char) -> Option<Self> {
        Some(match c.to_ascii_uppercase() {
            'R' => Self::Rook,
            'N' => Self::Knight,
            'B' => Self::Bishop,
            'K' => Self::King,
            'Q' => Self::Queen,
            'P' => Self::Pawn,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}
impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
    /// Upper-case letter for white, lower-case for black.
    pub fn to_char(self) -> char {
        match self.color {
            Color::White => self.kind.letter(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }
    pub fn from_char(c: char) -> Option<Self> {
        let kind = PieceKind::from_letter(c)?;
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some(Self { color, kind })
    }
    /// Short name used in move descriptions: `P` for white, `*P` for black.
    pub fn label(self) -> String {
        match self.color {
            Color::White => self.kind.letter().to_string(),
            Color::Black => format!("*{}", self.kind.letter()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_chars() {
        let black_knight = Piece::new(Color::Black, PieceKind::Knight);
        assert_eq!(black_knight.to_char(), 'n');
        assert_eq!(Piece::from_char('n'), Some(black_knight));
        assert_eq!(Piece::from_char('Q'), Some(Piece::new(Color::White, PieceKind::Queen)));
        assert_eq!(Piece::from_char(' '), None);
        assert_eq!(Piece::from_char('x'), None);
        assert_eq!(black_knight.label(), "*N");
        assert_eq!(Piece::new(Color::White, PieceKind::Pawn).label(), "P");
    }
}
