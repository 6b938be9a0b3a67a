use crate::chess::{Board, Color, Location, MoveResult, Piece, PieceKind, Status};
use uuid::Uuid;

macro_rules! id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);
        impl $name {
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }
            /// Accepts only the canonical hyphenated form.
            pub fn parse(s: &str) -> Option<Self> {
                Uuid::try_parse(s)
                    .ok()
                    .filter(|id| id.hyphenated().to_string() == s.to_ascii_lowercase())
                    .map(Self)
            }
        }
        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }
    };
}
id!(GameId);
id! {
    /// Identifies a player across reconnects and restarts.
    Token
}

/// A seat at a game. Two players are the same player if their tokens match.
#[derive(Debug, Clone)]
pub struct Player {
    pub token: Token,
    pub color: Color,
    pub game: GameId,
}
impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}
impl Eq for Player {}
impl std::hash::Hash for Player {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.token.hash(state);
    }
}
impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} player", self.color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Forming,
    Active,
    Finished,
}

#[derive(Debug, Clone)]
pub struct Game {
    pub(crate) id: GameId,
    pub(crate) players: Vec<Player>,
    pub(crate) board: Board,
    pub(crate) turn: Color,
}

impl Game {
    pub fn new(id: GameId) -> Self {
        Self {
            id,
            players: Vec::with_capacity(2),
            board: Board::new(),
            turn: Color::White,
        }
    }
    pub fn id(&self) -> GameId {
        self.id
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn turn(&self) -> Color {
        self.turn
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Seats a new player. Fails when the game is full or the seat's color or
    /// token is taken.
    pub fn add_player(&mut self, token: Token, color: Color) -> Option<&Player> {
        let taken = self.players.iter().any(|p| p.color == color || p.token == token);
        if self.players.len() >= 2 || taken {
            return None;
        }
        self.players.push(Player { token, color, game: self.id });
        self.players.last()
    }
    /// The only seated player, if exactly one is seated.
    pub fn sole_player(&self) -> Option<&Player> {
        match self.players.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
    /// The color still open while the game is forming.
    pub fn free_color(&self) -> Option<Color> {
        self.sole_player().map(|p| p.color.opposite())
    }
    pub fn player(&self, token: Token) -> Option<&Player> {
        self.players.iter().find(|p| p.token == token)
    }
    pub fn opponent(&self, token: Token) -> Option<&Player> {
        self.player(token)?;
        self.players.iter().find(|p| p.token != token)
    }

    pub fn phase(&self) -> Phase {
        if self.players.len() < 2 {
            Phase::Forming
        } else if self.king_missing().is_some() {
            Phase::Finished
        } else {
            Phase::Active
        }
    }
    fn king_missing(&self) -> Option<Color> {
        [Color::White, Color::Black]
            .into_iter()
            .find(|&c| !self.board.contains(Piece::new(c, PieceKind::King)))
    }

    /// Plays `token`'s move. The turn passes on only when the board accepts
    /// it, and a captured king ends the game.
    pub fn make_move(&mut self, token: Token, from: &str, to: &str) -> MoveResult {
        if self.players.len() != 2 {
            return MoveResult::incorrect("Only one player in the game");
        }
        let color = match self.player(token) {
            Some(player) => player.color,
            None => return MoveResult::incorrect("Unknown player"),
        };
        if color != self.turn {
            return MoveResult::incorrect("Wait for your turn");
        }
        let (Some(start), Some(end)) = (Location::parse(from), Location::parse(to)) else {
            return MoveResult::incorrect("Start or end location is incorrect");
        };
        let result = self.board.make_move(color, start, end);
        if result.status != Status::Correct {
            return result;
        }
        self.turn = self.turn.opposite();
        if !self.board.contains(Piece::new(color.opposite(), PieceKind::King)) {
            return MoveResult::win(color);
        }
        result
    }

    /// Whose turn it is (while nobody has won yet) and the board as seen by
    /// `perspective`.
    pub fn print_state(&self, perspective: Color) -> String {
        let mut out = String::new();
        if self.phase() != Phase::Finished {
            out.push_str(&format!("\n{} turn ...\n", self.turn));
        }
        out.push_str(&self.board.render(perspective));
        out
    }
}

impl PartialEq for Game {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Game {}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_game() -> (Game, Token, Token) {
        let mut game = Game::new(GameId::generate());
        let (white, black) = (Token::generate(), Token::generate());
        game.add_player(white, Color::White).unwrap();
        game.add_player(black, Color::Black).unwrap();
        (game, white, black)
    }

    #[test]
    fn ids_parse_canonical_form_only() {
        let id = GameId::generate();
        assert_eq!(GameId::parse(&id.to_string()), Some(id));
        assert_eq!(GameId::parse(&id.to_string().to_uppercase()), Some(id));
        assert_eq!(GameId::parse(&id.0.simple().to_string()), None);
        assert_eq!(Token::parse("not-a-token"), None);
    }

    #[test]
    fn seats() {
        let mut game = Game::new(GameId::generate());
        assert_eq!(game.phase(), Phase::Forming);
        assert_eq!(game.free_color(), None);
        let first = Token::generate();
        game.add_player(first, Color::Black).unwrap();
        assert_eq!(game.free_color(), Some(Color::White));
        assert!(game.add_player(Token::generate(), Color::Black).is_none());
        assert!(game.add_player(first, Color::White).is_none());
        assert!(game.opponent(first).is_none());

        let second = Token::generate();
        game.add_player(second, Color::White).unwrap();
        assert_eq!(game.phase(), Phase::Active);
        assert!(game.sole_player().is_none());
        assert_eq!(game.opponent(first).map(|p| p.token), Some(second));
        assert!(game.add_player(Token::generate(), Color::White).is_none());
        assert!(game.opponent(Token::generate()).is_none());
    }

    #[test]
    fn turns_alternate_on_correct_moves_only() {
        let (mut game, white, black) = full_game();
        assert_eq!(game.make_move(black, "e7", "e5").message, "Wait for your turn");
        assert_eq!(game.turn(), Color::White);

        assert_eq!(game.make_move(white, "e2", "e5").status, Status::Incorrect);
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.make_move(white, "e2", "z9").message, "Start or end location is incorrect");
        assert_eq!(game.make_move(Token::generate(), "e2", "e4").message, "Unknown player");

        assert_eq!(game.make_move(white, "e2", "e4").status, Status::Correct);
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.make_move(white, "e2", "e4").message, "Wait for your turn");
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.make_move(black, "e7", "e5").status, Status::Correct);
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn forming_games_refuse_moves() {
        let mut game = Game::new(GameId::generate());
        let token = Token::generate();
        game.add_player(token, Color::White).unwrap();
        assert_eq!(game.make_move(token, "e2", "e4").message, "Only one player in the game");
    }

    #[test]
    fn capturing_the_king_wins() {
        let (mut game, white, _) = full_game();
        game.board = Board::empty();
        let at = |s| Location::parse(s).unwrap();
        game.board.set(at("d1"), Piece::from_char('K'));
        game.board.set(at("d7"), Piece::from_char('R'));
        game.board.set(at("d8"), Piece::from_char('k'));
        game.board.set(at("a8"), Piece::from_char('r'));

        let result = game.make_move(white, "d7", "d8");
        assert_eq!(result.status, Status::WhiteWins);
        assert_eq!(result.to_string(), "White wins\nGame over");
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.phase(), Phase::Finished);
        assert!(!game.print_state(Color::White).contains("turn ..."));
    }

    #[test]
    fn state_shows_turn_and_orientation() {
        let (game, ..) = full_game();
        let state = game.print_state(Color::Black);
        assert!(state.starts_with("\nWhite turn ...\n"));
        assert!(state.ends_with("     h   g   f   e   d   c   b   a\n"));
    }
}
