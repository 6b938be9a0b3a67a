/// First word of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Create,
    Join,
    Move,
    PrintState,
    Exit,
    /// Sent by the reactor when a socket goes away. Clients can send it too.
    Close,
}

impl Command {
    const ALL: [(&'static str, Command); 6] = [
        ("CREATE", Command::Create),
        ("JOIN", Command::Join),
        ("MOVE", Command::Move),
        ("PRINT_STATE", Command::PrintState),
        ("EXIT", Command::Exit),
        ("CLOSE", Command::Close),
    ];

    /// Case-insensitive.
    pub fn parse(word: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(word))
            .map(|&(_, command)| command)
    }
}
