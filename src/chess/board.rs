use super::*;

/// 8x8 grid, indexed `[row][col]` with row 0 holding white's back rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; Board::COLUMNS]; Board::ROWS],
}

const BACK_RANK: [PieceKind; Board::COLUMNS] = {
    use PieceKind::*;
    [Rook, Knight, Bishop, King, Queen, Bishop, Knight, Rook]
};

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub const ROWS: usize = 8;
    pub const COLUMNS: usize = 8;

    /// The starting position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for col in 0..Self::COLUMNS {
            board.cells[0][col] = Some(Piece::new(Color::White, BACK_RANK[col]));
            board.cells[1][col] = Some(Piece::new(Color::White, PieceKind::Pawn));
            board.cells[6][col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            board.cells[7][col] = Some(Piece::new(Color::Black, BACK_RANK[col]));
        }
        board
    }
    pub fn empty() -> Self {
        Self { cells: [[None; Self::COLUMNS]; Self::ROWS] }
    }

    pub fn get(&self, at: Location) -> Option<Piece> {
        self.cells[at.row()][at.col()]
    }
    pub fn set(&mut self, at: Location, piece: Option<Piece>) {
        self.cells[at.row()][at.col()] = piece;
    }
    pub fn contains(&self, piece: Piece) -> bool {
        self.cells.iter().flatten().any(|&cell| cell == Some(piece))
    }

    /// Validates and, if legal, plays `color`'s move from `start` to `end`.
    ///
    /// Only piece movement and blocking are checked. Check, castling and
    /// en passant don't exist here.
    pub fn make_move(&mut self, color: Color, start: Location, end: Location) -> MoveResult {
        let piece = match self.get(start) {
            Some(piece) if piece.color == color => piece,
            _ => return MoveResult::incorrect(format!("No {color} piece at the initial square")),
        };
        let target = self.get(end);
        if target.map_or(false, |t| t.color == color) {
            return MoveResult::incorrect("The target position is occupied with a piece of your own color");
        }
        if start == end {
            return MoveResult::incorrect("Current position and target position are equal");
        }
        if !reaches(piece, target.is_some(), start, end) {
            return MoveResult::incorrect("The piece cannot move to the target square");
        }
        if piece.kind != PieceKind::Knight && Path::between(start, end).any(|at| self.get(at).is_some()) {
            return MoveResult::incorrect("The path from the initial to the target square is not free.");
        }

        self.set(end, Some(piece));
        self.set(start, None);
        let promoted = self.try_promote(piece, end);

        let action = match target {
            Some(captured) => format!("attacks ({})", captured.label()),
            None => "moves".to_string(),
        };
        let mut description = format!("{color} ({}) {action}: '{start} - {end}'", piece.label());
        if promoted {
            description.push_str(" with promotion to queen");
        }
        MoveResult::correct(description)
    }

    // Only black pawns promote. A white pawn on rank 8 stays a pawn.
    fn try_promote(&mut self, piece: Piece, at: Location) -> bool {
        if piece == Piece::new(Color::Black, PieceKind::Pawn) && at.row() == 0 {
            self.set(at, Some(Piece::new(Color::Black, PieceKind::Queen)));
            return true;
        }
        false
    }

    /// Text picture of the board as `perspective` sits at it.
    pub fn render(&self, perspective: Color) -> String {
        let white = perspective.is_white();
        let mut out = String::from("\n   ---------------------------------\n");
        for i in 0..Self::ROWS {
            if i > 0 {
                out.push_str("\n   |---+---+---+---+---+---+---+---|\n");
            }
            let row = if white { Self::ROWS - i - 1 } else { i };
            out.push_str(&format!("{}  |", row + 1));
            for j in 0..Self::COLUMNS {
                let col = if white { j } else { Self::COLUMNS - j - 1 };
                let cell = match self.cells[row][col] {
                    None => "  ".to_string(),
                    Some(p) if p.color == Color::White => format!("{} ", p.kind.letter()),
                    Some(p) => p.label(),
                };
                out.push_str(&format!(" {cell}|"));
            }
        }
        out.push_str("\n   ---------------------------------\n");
        out.push_str(if white {
            "     a   b   c   d   e   f   g   h\n"
        } else {
            "     h   g   f   e   d   c   b   a\n"
        });
        out
    }

    /// One string per row from rank 1 upwards, using `Piece::to_char` and a
    /// space for empty squares.
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.map_or(' ', Piece::to_char)).collect())
            .collect()
    }
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Option<Self> {
        if rows.len() != Self::ROWS {
            return None;
        }
        let mut board = Self::empty();
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != Self::COLUMNS {
                return None;
            }
            for (c, ch) in row.chars().enumerate() {
                board.cells[r][c] = match ch {
                    ' ' => None,
                    ch => Some(Piece::from_char(ch)?),
                };
            }
        }
        Some(board)
    }
}

/// Whether `piece` could travel from `start` to `end`, ignoring anything in
/// between.
fn reaches(piece: Piece, capture: bool, start: Location, end: Location) -> bool {
    let dr = end.row() as i32 - start.row() as i32;
    let dc = end.col() as i32 - start.col() as i32;
    let diagonal = dr.abs() == dc.abs();
    let straight = dr == 0 || dc == 0;
    match piece.kind {
        PieceKind::Bishop => diagonal,
        PieceKind::Rook => straight,
        PieceKind::Queen => straight || diagonal,
        PieceKind::King => dr.abs() <= 1 && dc.abs() <= 1,
        PieceKind::Knight => (dr * dc).abs() == 2,
        PieceKind::Pawn => {
            let dir = i32::from(piece.color.forward());
            let home_row = match piece.color {
                Color::White => 1,
                Color::Black => Board::ROWS - 2,
            };
            if capture {
                dr == dir && dc.abs() == 1
            } else {
                dc == 0 && (dr == dir || dr == 2 * dir && start.row() == home_row)
            }
        }
    }
}

/// Squares strictly between two locations on a shared row, column or
/// diagonal.
struct Path {
    current: Location,
    end: Location,
    step: (i8, i8),
}
impl Path {
    fn between(start: Location, end: Location) -> Self {
        let step = |a: usize, b: usize| (b as i8 - a as i8).signum();
        Self {
            current: start,
            end,
            step: (step(start.row(), end.row()), step(start.col(), end.col())),
        }
    }
}
impl Iterator for Path {
    type Item = Location;
    fn next(&mut self) -> Option<Self::Item> {
        let next = self.current.offset(self.step.0, self.step.1)?;
        if next == self.end {
            return None;
        }
        self.current = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> Location {
        Location::parse(s).unwrap()
    }
    fn place(board: &mut Board, s: &str, piece: char) {
        board.set(at(s), Piece::from_char(piece));
    }
    fn destinations(board: &Board, color: Color, from: &str) -> Vec<String> {
        let mut out = vec![];
        for row in 0..8 {
            for col in 0..8 {
                let to = Location::new(row, col).unwrap();
                let mut scratch = board.clone();
                if scratch.make_move(color, at(from), to).status == Status::Correct {
                    out.push(to.to_string());
                }
            }
        }
        out.sort();
        out
    }

    #[test]
    fn starting_position() {
        let board = Board::new();
        assert_eq!(board.get(at("a1")), Piece::from_char('R'));
        assert_eq!(board.get(at("d1")), Piece::from_char('K'));
        assert_eq!(board.get(at("e1")), Piece::from_char('Q'));
        assert_eq!(board.get(at("e2")), Piece::from_char('P'));
        assert_eq!(board.get(at("e7")), Piece::from_char('p'));
        assert_eq!(board.get(at("d8")), Piece::from_char('k'));
        assert_eq!(board.get(at("e4")), None);
    }

    #[test]
    fn home_square_destinations() {
        let board = Board::new();
        assert_eq!(destinations(&board, Color::White, "e2"), ["e3", "e4"]);
        assert_eq!(destinations(&board, Color::Black, "e7"), ["e5", "e6"]);
        assert_eq!(destinations(&board, Color::White, "b1"), ["a3", "c3"]);
        assert_eq!(destinations(&board, Color::Black, "g8"), ["f6", "h6"]);
        assert!(destinations(&board, Color::White, "a1").is_empty());
        assert!(destinations(&board, Color::White, "c1").is_empty());
        assert!(destinations(&board, Color::White, "d1").is_empty());
    }

    #[test]
    fn lone_pieces_follow_their_predicates() {
        let mut board = Board::empty();
        place(&mut board, "a1", 'R');
        let rook = destinations(&board, Color::White, "a1");
        assert_eq!(rook.len(), 14);
        assert!(rook.contains(&"a8".to_string()) && rook.contains(&"h1".to_string()));
        assert!(!rook.contains(&"b2".to_string()));

        let mut board = Board::empty();
        place(&mut board, "d4", 'B');
        assert_eq!(destinations(&board, Color::White, "d4").len(), 13);

        let mut board = Board::empty();
        place(&mut board, "d4", 'Q');
        assert_eq!(destinations(&board, Color::White, "d4").len(), 27);

        let mut board = Board::empty();
        place(&mut board, "d4", 'K');
        assert_eq!(destinations(&board, Color::White, "d4").len(), 8);

        let mut board = Board::empty();
        place(&mut board, "d4", 'n');
        assert_eq!(
            destinations(&board, Color::Black, "d4"),
            ["b3", "b5", "c2", "c6", "e2", "e6", "f3", "f5"]
        );
    }

    #[test]
    fn sliders_are_blocked_knights_are_not() {
        let mut board = Board::empty();
        place(&mut board, "a1", 'R');
        place(&mut board, "a4", 'p');
        place(&mut board, "c3", 'B');
        place(&mut board, "d4", 'p');
        place(&mut board, "g1", 'N');

        assert_eq!(board.clone().make_move(Color::White, at("a1"), at("a4")).status, Status::Correct);
        let blocked = board.clone().make_move(Color::White, at("a1"), at("a6"));
        assert_eq!(blocked.message, "The path from the initial to the target square is not free.");
        assert_eq!(board.clone().make_move(Color::White, at("c3"), at("e5")).status, Status::Incorrect);

        // surround the white knight, it still jumps
        for s in ["f1", "h1", "f2", "g2", "h2"] {
            place(&mut board, s, 'P');
        }
        assert_eq!(board.clone().make_move(Color::White, at("g1"), at("f3")).status, Status::Correct);
        assert_eq!(board.make_move(Color::White, at("g1"), at("e2")).status, Status::Correct);
    }

    #[test]
    fn own_color_targets_are_rejected() {
        let mut board = Board::new();
        let result = board.make_move(Color::White, at("a1"), at("a2"));
        assert_eq!(result.message, "The target position is occupied with a piece of your own color");
        let result = board.make_move(Color::White, at("b1"), at("d2"));
        assert_eq!(result.status, Status::Incorrect);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn validation_order() {
        let mut board = Board::new();
        assert_eq!(
            board.make_move(Color::White, at("e7"), at("e6")).message,
            "No White piece at the initial square"
        );
        assert_eq!(
            board.make_move(Color::Black, at("e4"), at("e5")).message,
            "No Black piece at the initial square"
        );
        assert_eq!(
            board.make_move(Color::White, at("e2"), at("e2")).message,
            "The target position is occupied with a piece of your own color"
        );
        let mut board = Board::empty();
        place(&mut board, "e2", 'P');
        assert_eq!(
            board.make_move(Color::White, at("e2"), at("e2")).message,
            "The target position is occupied with a piece of your own color"
        );
        assert_eq!(
            board.make_move(Color::White, at("e2"), at("f3")).message,
            "The piece cannot move to the target square"
        );
    }

    #[test]
    fn pawns() {
        let mut board = Board::new();
        let result = board.make_move(Color::White, at("e2"), at("e4"));
        assert_eq!(result, MoveResult::correct("White (P) moves: 'e2 - e4'"));
        // no second double step
        assert_eq!(board.clone().make_move(Color::White, at("e4"), at("e6")).status, Status::Incorrect);
        // backwards
        assert_eq!(board.clone().make_move(Color::White, at("e4"), at("e3")).status, Status::Incorrect);

        board.make_move(Color::Black, at("d7"), at("d5"));
        // straight into a piece is not a capture
        place(&mut board, "e5", 'p');
        assert_eq!(board.clone().make_move(Color::White, at("e4"), at("e5")).status, Status::Incorrect);
        let result = board.make_move(Color::White, at("e4"), at("d5"));
        assert_eq!(result.message, "White (P) attacks (*P): 'e4 - d5'");
        // diagonal without a capture
        assert_eq!(board.make_move(Color::Black, at("c7"), at("b6")).status, Status::Incorrect);
        // double step through a piece
        place(&mut board, "a6", 'N');
        assert_eq!(board.make_move(Color::Black, at("a7"), at("a5")).status, Status::Incorrect);
    }

    #[test]
    fn only_black_pawns_promote() {
        let mut board = Board::empty();
        place(&mut board, "b2", 'p');
        place(&mut board, "g7", 'P');

        let result = board.make_move(Color::Black, at("b2"), at("b1"));
        assert_eq!(result.message, "Black (*P) moves: 'b2 - b1' with promotion to queen");
        assert_eq!(board.get(at("b1")), Piece::from_char('q'));

        // inherited behaviour: a white pawn on rank 8 stays a pawn
        let result = board.make_move(Color::White, at("g7"), at("g8"));
        assert_eq!(result.message, "White (P) moves: 'g7 - g8'");
        assert_eq!(board.get(at("g8")), Piece::from_char('P'));
    }

    #[test]
    fn renders_both_perspectives() {
        let board = Board::new();
        let white = board.render(Color::White);
        let lines: Vec<&str> = white.lines().collect();
        assert_eq!(lines[2], "8  | *R| *N| *B| *K| *Q| *B| *N| *R|");
        assert_eq!(lines[16], "1  | R | N | B | K | Q | B | N | R |");
        assert_eq!(lines[18], "     a   b   c   d   e   f   g   h");

        let black = board.render(Color::Black);
        let lines: Vec<&str> = black.lines().collect();
        assert_eq!(lines[2], "1  | R | N | B | Q | K | B | N | R |");
        assert_eq!(lines[16], "8  | *R| *N| *B| *Q| *K| *B| *N| *R|");
        assert_eq!(lines[18], "     h   g   f   e   d   c   b   a");
    }

    #[test]
    fn rows_round_trip() {
        let mut board = Board::new();
        board.make_move(Color::White, at("e2"), at("e4"));
        let rows = board.to_rows();
        assert_eq!(rows[0], "RNBKQBNR");
        assert_eq!(rows[3], "    P   ");
        assert_eq!(Board::from_rows(&rows), Some(board));

        assert_eq!(Board::from_rows(&["RNBKQBNR"]), None);
        let mut bad = Board::new().to_rows();
        bad[4] = "   x    ".to_string();
        assert_eq!(Board::from_rows(&bad), None);
    }
}
