pub const START_LIVES: u32 = 3;
pub const START_CONTINUES: u32 = 3;

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    AwaitingContinue,
    GameOver,
}

/// The scalar progress counters. Owned by the session and threaded through
/// the tick functions explicitly rather than living on any scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub continues_left: u32,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            score: 0,
            lives: START_LIVES,
            level: 1,
            continues_left: START_CONTINUES,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_state_new() {
        let state = GameState::new();
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.continues_left, 3);
    }
}
