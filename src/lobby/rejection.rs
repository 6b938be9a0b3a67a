/// Why a command was refused. The `Display` text is what the client reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Unknown command")]
    UnknownCommand,

    #[error("Usage 'join gameId token (optional, use if connection fails)'")]
    JoinUsage,
    #[error("Incorrect gameId")]
    BadGameId,
    #[error("Game was not found")]
    GameNotFound,
    #[error("You are trying to play with yourself")]
    SelfPlay,
    #[error("The game has already begun, use input token to connect")]
    TokenRequired,
    #[error("Incorrect token")]
    BadToken,
    #[error("Game is inaccessible")]
    Inaccessible,

    #[error("Usage 'move f7 f6'")]
    MoveUsage,
    #[error("Create or join a game before making a move")]
    NoSessionToMove,
    #[error("Only one player in the game")]
    OpponentMissing,

    #[error("Create or join a game before printing")]
    NoSessionToPrint,
    #[error("Create or join a game before exiting")]
    NoSessionToExit,
}
