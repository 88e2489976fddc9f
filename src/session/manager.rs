use rustc_hash::FxHashMap;

use crate::core::{EngineError, Result};
use crate::rules::Game;

/// Name of a room, as chosen by whoever opened it.
pub type RoomId = String;

/// Owns every running game, keyed by room.
#[derive(Default)]
pub struct SessionManager {
    games: FxHashMap<RoomId, Game>,
}

impl SessionManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start hosting `game` in `room`. Fails if the room is taken.
    pub fn open(&mut self, room: impl Into<RoomId>, game: Game) -> Result<&mut Game> {
        let room = room.into();
        if self.games.contains_key(&room) {
            return Err(EngineError::DuplicateRoom(room));
        }
        tracing::info!(%room, players = game.player_count(), "room opened");
        Ok(self.games.entry(room).or_insert(game))
    }

    pub fn get(&self, room: &str) -> Result<&Game> {
        self.games
            .get(room)
            .ok_or_else(|| EngineError::UnknownRoom(room.to_string()))
    }

    pub fn get_mut(&mut self, room: &str) -> Result<&mut Game> {
        self.games
            .get_mut(room)
            .ok_or_else(|| EngineError::UnknownRoom(room.to_string()))
    }

    /// Stop hosting a room and hand its game back.
    pub fn close(&mut self, room: &str) -> Result<Game> {
        let game = self
            .games
            .remove(room)
            .ok_or_else(|| EngineError::UnknownRoom(room.to_string()))?;
        tracing::info!(room, finished = game.is_over(), "room closed");
        Ok(game)
    }

    /// Open rooms, sorted by name.
    #[must_use]
    pub fn rooms(&self) -> Vec<&str> {
        let mut rooms: Vec<&str> = self.games.keys().map(String::as_str).collect();
        rooms.sort_unstable();
        rooms
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use crate::expansions::DominionSet;
    use crate::interaction::AutoInteraction;
    use crate::rules::GameBuilder;

    fn game(seed: u64) -> Game {
        GameBuilder::new(GameConfig::new(seed))
            .player("Ada", AutoInteraction::new())
            .player("Brook", AutoInteraction::new())
            .expansion(DominionSet)
            .build()
            .unwrap()
    }

    #[test]
    fn test_open_and_close() {
        let mut sessions = SessionManager::new();
        assert!(sessions.is_empty());

        sessions.open("beta", game(1)).unwrap();
        sessions.open("alpha", game(2)).unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions.rooms(), vec!["alpha", "beta"]);
        assert_eq!(sessions.get("alpha").unwrap().config().seed, 2);

        let closed = sessions.close("beta").unwrap();
        assert_eq!(closed.config().seed, 1);
        assert_eq!(sessions.rooms(), vec!["alpha"]);
    }

    #[test]
    fn test_room_errors() {
        let mut sessions = SessionManager::new();
        sessions.open("table", game(3)).unwrap();

        assert!(matches!(
            sessions.open("table", game(4)),
            Err(EngineError::DuplicateRoom(room)) if room == "table"
        ));
        assert!(matches!(sessions.get("nowhere"), Err(EngineError::UnknownRoom(_))));
        assert!(matches!(sessions.close("nowhere"), Err(EngineError::UnknownRoom(_))));
    }

    #[test]
    fn test_games_advance_independently() {
        let mut sessions = SessionManager::new();
        sessions.open("one", game(5)).unwrap();
        sessions.open("two", game(6)).unwrap();

        sessions.get_mut("one").unwrap().take_turn().unwrap();

        assert_eq!(sessions.get("one").unwrap().turns_taken(), 1);
        assert_eq!(sessions.get("two").unwrap().turns_taken(), 0);
    }
}
