use super::Body;

/// Horizontal travel per tick.
pub const PLAYER_SPEED: f32 = 5.0;
/// Minimum time between shots, in milliseconds of the host clock.
pub const PLAYER_SHOOT_DELAY_MS: u64 = 250;
pub const PLAYER_HALF_W: f32 = 20.0;
pub const PLAYER_HALF_H: f32 = 15.0;
/// The muzzle sits this far above the ship's center.
const MUZZLE_OFFSET: f32 = 25.0;

#[derive(Debug, Clone)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub last_shot: u64,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, last_shot: 0 }
    }

    /// Moves horizontally by `dir` (-1 left, +1 right), keeping the ship
    /// fully inside the field.
    pub fn steer(&mut self, dir: f32, dt: f32, field_width: f32) {
        self.x = (self.x + PLAYER_SPEED * dir * dt)
            .clamp(PLAYER_HALF_W, field_width - PLAYER_HALF_W);
    }

    /// Fires if the cooldown has elapsed, returning the muzzle position.
    pub fn try_fire(&mut self, now: u64) -> Option<(f32, f32)> {
        if now.saturating_sub(self.last_shot) <= PLAYER_SHOOT_DELAY_MS {
            return None;
        }
        self.last_shot = now;
        Some((self.x, self.y - MUZZLE_OFFSET))
    }
}

impl Body for Player {
    fn pos(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn half_extents(&self) -> (f32, f32) {
        (PLAYER_HALF_W, PLAYER_HALF_H)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_steer_left_and_right() {
        let mut player = Player::new(400.0, 550.0);
        player.steer(-1.0, 1.0, 800.0);
        assert_eq!(player.x, 395.0);
        player.steer(1.0, 2.0, 800.0);
        assert_eq!(player.x, 405.0);
    }

    #[test]
    fn test_player_clamped_at_field_edges() {
        let mut player = Player::new(21.0, 550.0);
        player.steer(-1.0, 1.0, 800.0);
        assert_eq!(player.x, PLAYER_HALF_W);

        player.x = 799.0;
        player.steer(1.0, 1.0, 800.0);
        assert_eq!(player.x, 800.0 - PLAYER_HALF_W);
    }

    #[test]
    fn test_player_fire_cooldown_boundary() {
        let mut player = Player::new(400.0, 550.0);

        let shot = player.try_fire(300);
        assert_eq!(shot, Some((400.0, 525.0)));
        assert_eq!(player.last_shot, 300);

        // Not yet: exactly at the cooldown is still blocked.
        assert!(player.try_fire(550).is_none());
        assert_eq!(player.last_shot, 300);

        assert!(player.try_fire(551).is_some());
        assert_eq!(player.last_shot, 551);
    }

    #[test]
    fn test_player_cannot_fire_immediately_after_spawn() {
        let mut player = Player::new(400.0, 550.0);
        assert!(player.try_fire(100).is_none());
        assert!(player.try_fire(251).is_some());
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_player_stays_in_bounds(
                initial_x in 20.0f32..780.0,
                moves in prop::collection::vec(prop::bool::ANY, 0..300)
            ) {
                let mut player = Player::new(initial_x, 550.0);
                for move_right in moves {
                    let dir = if move_right { 1.0 } else { -1.0 };
                    player.steer(dir, 1.0, 800.0);
                    prop_assert!(player.x >= PLAYER_HALF_W);
                    prop_assert!(player.x <= 800.0 - PLAYER_HALF_W);
                }
            }
        }
    }
}
