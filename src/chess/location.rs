use super::Board;

/// A square. `row` 0 is rank 1, `col` 0 is file a.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    row: u8,
    col: u8,
}

impl Location {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (usize::from(row) < Board::ROWS && usize::from(col) < Board::COLUMNS).then_some(Self { row, col })
    }
    /// Parses algebraic notation, exactly `[a-h][1-8]`.
    pub fn parse(s: &str) -> Option<Self> {
        match *s.as_bytes() {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => Self::new(rank - b'1', file - b'a'),
            _ => None,
        }
    }
    pub fn row(self) -> usize {
        self.row.into()
    }
    pub fn col(self) -> usize {
        self.col.into()
    }
    pub(crate) fn offset(self, drow: i8, dcol: i8) -> Option<Self> {
        let row = u8::try_from(self.row as i8 + drow).ok()?;
        let col = u8::try_from(self.col as i8 + dcol).ok()?;
        Self::new(row, col)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}
