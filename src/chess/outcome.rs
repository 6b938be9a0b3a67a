use super::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Correct,
    Incorrect,
    WhiteWins,
    BlackWins,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub status: Status,
    pub message: String,
}

impl MoveResult {
    pub fn correct(message: impl Into<String>) -> Self {
        Self { status: Status::Correct, message: message.into() }
    }
    pub fn incorrect(message: impl Into<String>) -> Self {
        Self { status: Status::Incorrect, message: message.into() }
    }
    pub fn win(winner: Color) -> Self {
        Self {
            status: match winner {
                Color::White => Status::WhiteWins,
                Color::Black => Status::BlackWins,
            },
            message: format!("{winner} wins"),
        }
    }
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, Status::WhiteWins | Status::BlackWins)
    }
}

impl std::fmt::Display for MoveResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_terminal() {
            write!(f, "{}\nGame over", self.message)
        } else {
            f.write_str(&self.message)
        }
    }
}
