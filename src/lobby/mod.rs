use crate::prelude::*;
use std::collections::HashMap;

mod game;
mod rejection;

pub use game::{Game, GameId, Phase, Player, Token};
pub use rejection::Rejection;

/// Points a session at one player of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seat {
    pub game: GameId,
    pub token: Token,
}

/// Every live game and which connection is playing which seat.
///
/// Only the worker thread touches this, one request at a time, so none of
/// it needs locking.
pub struct Lobby {
    games: HashMap<GameId, Game>,
    sessions: BiMap<ConnectionId, Seat>,
    store: Box<dyn Store + Send>,
}

impl Lobby {
    /// Starts from whatever games the store still holds.
    pub fn new(mut store: Box<dyn Store + Send>) -> Self {
        let games: HashMap<_, _> = store.load_all().into_iter().map(|g| (g.id(), g)).collect();
        log::info!("restored {} unfinished games", games.len());
        Self {
            games,
            sessions: BiMap::new(),
            store,
        }
    }
    pub fn game(&self, id: GameId) -> Option<&Game> {
        self.games.get(&id)
    }
    pub fn seat_of(&self, connection: &ConnectionId) -> Option<Seat> {
        self.sessions.get_by_left(connection).copied()
    }
    pub fn connection_of(&self, seat: Seat) -> Option<&ConnectionId> {
        self.sessions.get_by_right(&seat)
    }

    /// Runs one inbound message and returns everything that should be sent
    /// because of it.
    pub fn handle(&mut self, request: &Message) -> Vec<Message> {
        let from = &request.connection;
        let mut words = request.body.split_ascii_whitespace();
        let Some(command) = words.next().and_then(Command::parse) else {
            return vec![Message::new(from.clone(), Rejection::UnknownCommand.to_string())];
        };
        let args: Vec<&str> = words.collect();
        log::debug!("{from}: {command:?} {args:?}");

        let result = match command {
            Command::Create => Ok(self.create(from, &args)),
            Command::Join => self.join(from, &args),
            Command::Move => self.make_move(from, &args),
            Command::PrintState => self.print_state(from),
            Command::Exit => self.exit(from),
            Command::Close => {
                self.close(from);
                Ok(vec![])
            }
        };
        result.unwrap_or_else(|rejection| vec![Message::new(from.clone(), rejection.to_string())])
    }

    fn create(&mut self, from: &ConnectionId, args: &[&str]) -> Vec<Message> {
        let is_black = args.first().map_or(false, |arg| arg.eq_ignore_ascii_case("true"));
        let color = if is_black { Color::Black } else { Color::White };
        let (id, token) = (GameId::generate(), Token::generate());

        let mut game = Game::new(id);
        game.add_player(token, color);
        self.sessions.force_insert(from.clone(), Seat { game: id, token });
        let reply = format!(
            "GameId: {id}\nToken: {token} (use if connection fails){}",
            game.print_state(color)
        );
        self.games.insert(id, game);
        log::info!("{from} created game {id} playing {color}");
        vec![Message::new(from.clone(), reply)]
    }

    fn join(&mut self, from: &ConnectionId, args: &[&str]) -> Result<Vec<Message>, Rejection> {
        let id = args.first().ok_or(Rejection::JoinUsage)?;
        let id = GameId::parse(id).ok_or(Rejection::BadGameId)?;
        let game = self.games.get_mut(&id).ok_or(Rejection::GameNotFound)?;
        let seat = |token| Seat { game: id, token };

        let mut out = vec![];
        let (token, color) = if let Some(sole) = game.sole_player() {
            if self.sessions.get_by_right(&seat(sole.token)) == Some(from) {
                return Err(Rejection::SelfPlay);
            }
            let color = game.free_color().ok_or(Rejection::Inaccessible)?;
            let token = Token::generate();
            game.add_player(token, color).ok_or(Rejection::Inaccessible)?;
            (token, color)
        } else {
            let token = args.get(1).ok_or(Rejection::TokenRequired)?;
            let token = Token::parse(token).ok_or(Rejection::BadToken)?;
            let color = game.player(token).ok_or(Rejection::Inaccessible)?.color;
            if let Some(opponent) = game.opponent(token) {
                if self.sessions.get_by_right(&seat(opponent.token)) == Some(from) {
                    return Err(Rejection::SelfPlay);
                }
            }
            if let Some(previous) = self.sessions.remove_by_right(&seat(token)) {
                if previous != *from {
                    log::info!("{previous} replaced by {from} in game {id}");
                    out.push(Message::close(previous));
                }
            }
            (token, color)
        };
        self.sessions.force_insert(from.clone(), seat(token));
        log::info!("{from} joined game {id} playing {color}");
        out.push(Message::new(
            from.clone(),
            format!("Token: {token} (use if connection fails){}", game.print_state(color)),
        ));
        Ok(out)
    }

    fn make_move(&mut self, from: &ConnectionId, args: &[&str]) -> Result<Vec<Message>, Rejection> {
        let [start, end, ..] = args else {
            return Err(Rejection::MoveUsage);
        };
        let seat = self.seat_of(from).ok_or(Rejection::NoSessionToMove)?;
        let game = self.games.get_mut(&seat.game).ok_or(Rejection::NoSessionToMove)?;
        if game.phase() == Phase::Forming {
            return Err(Rejection::OpponentMissing);
        }

        let result = game.make_move(seat.token, start, end);
        if result.status == Status::Incorrect {
            return Ok(vec![Message::new(from.clone(), result.to_string())]);
        }
        let mut out = vec![];
        let mut opponent_connection = None;
        for player in game.players() {
            let to = if player.token == seat.token {
                from.clone()
            } else {
                let opponent = Seat { game: seat.game, token: player.token };
                match self.sessions.get_by_right(&opponent) {
                    Some(connection) => opponent_connection.insert(connection.clone()).clone(),
                    None => continue,
                }
            };
            out.push(Message::new(to, format!("{result}{}", game.print_state(player.color))));
        }

        if result.is_terminal() {
            log::info!("game {}: {}", seat.game, result.message);
            self.sessions.remove_by_left(from);
            if let Some(opponent) = &opponent_connection {
                self.sessions.remove_by_left(opponent);
            }
            self.dispose(seat.game);
        } else if let Err(e) = self.store.save(game) {
            log::warn!("couldn't save game {}: {e}", seat.game);
        }
        Ok(out)
    }

    fn print_state(&self, from: &ConnectionId) -> Result<Vec<Message>, Rejection> {
        let seat = self.seat_of(from).ok_or(Rejection::NoSessionToPrint)?;
        let game = self.games.get(&seat.game).ok_or(Rejection::NoSessionToPrint)?;
        let player = game.player(seat.token).ok_or(Rejection::NoSessionToPrint)?;
        Ok(vec![Message::new(from.clone(), game.print_state(player.color))])
    }

    fn exit(&mut self, from: &ConnectionId) -> Result<Vec<Message>, Rejection> {
        let seat = self.sessions.remove_by_left(from).ok_or(Rejection::NoSessionToExit)?;
        let mut out = vec![
            Message::new(from.clone(), "You have left the game"),
            Message::close(from.clone()),
        ];
        let Some(game) = self.dispose(seat.game) else {
            return Ok(out);
        };
        log::info!("{from} left game {}", seat.game);
        if let (Some(leaver), Some(opponent)) = (game.player(seat.token), game.opponent(seat.token)) {
            let opponent = Seat { game: seat.game, token: opponent.token };
            if let Some(connection) = self.sessions.remove_by_right(&opponent) {
                out.push(Message::new(connection, format!("{leaver} exits. Create or join a new game")));
            }
        }
        Ok(out)
    }

    /// A dropped connection. The seat stays free for a rejoin by token.
    fn close(&mut self, from: &ConnectionId) {
        if let Some(seat) = self.sessions.remove_by_left(from) {
            log::debug!("{from} dropped its session in game {}", seat.game);
        }
    }

    fn dispose(&mut self, id: GameId) -> Option<Game> {
        if let Err(e) = self.store.delete(id) {
            log::warn!("couldn't delete game {id}: {e}");
        }
        self.games.remove(&id)
    }
}
