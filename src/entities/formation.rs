use rand::Rng;

use super::alien::{ALIEN_HALF_H, ALIEN_HALF_W};
use super::{Alien, EntityId, IdGen};

/// Vertical drop applied to the whole grid on an edge-contact tick.
pub const DESCENT_STEP: f32 = 8.0;
/// Once any alien's bottom edge reaches this line, the invasion is over.
pub const INVASION_Y: f32 = 500.0;
/// World y of the first grid row.
const TOP_MARGIN: f32 = 50.0;
const GAP_X: f32 = 19.0;
const GAP_Y: f32 = 7.0;

/// Difficulty knobs derived from the wave number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParams {
    pub rows: u32,
    pub cols: u32,
    pub speed: f32,
    pub shoot_interval: u64,
}

impl WaveParams {
    pub fn for_level(level: u32) -> Self {
        let l = level.saturating_sub(1);
        Self {
            rows: (5 + l / 4).min(7),
            cols: (10 + l / 6).min(12),
            speed: (1.0 + l as f32 * 0.2).min(3.0),
            shoot_interval: 1000u64.saturating_sub(l as u64 * 25).max(700),
        }
    }
}

/// What a movement step did, for the session to act on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormationDelta {
    pub reversed: bool,
    pub invaded: bool,
}

/// The collectively-moving alien grid for one wave. All members share the
/// same direction and speed; an empty formation means the wave is complete.
#[derive(Debug, Clone)]
pub struct Formation {
    pub aliens: Vec<Alien>,
    /// Horizontal travel sign, +1 right / -1 left.
    pub direction: f32,
    pub speed: f32,
    pub shoot_interval: u64,
    pub last_shot: u64,
}

impl Formation {
    /// Lays out the wave grid for `level`, centered near the top of the field.
    pub fn new(level: u32, field_width: f32, ids: &mut IdGen) -> Self {
        let params = WaveParams::for_level(level);
        let spacing_x = ALIEN_HALF_W * 2.0 + GAP_X;
        let spacing_y = ALIEN_HALF_H * 2.0 + GAP_Y;
        let total_width = (params.cols - 1) as f32 * spacing_x;
        let start_x = (field_width - total_width) / 2.0;

        let mut aliens = Vec::with_capacity((params.rows * params.cols) as usize);
        for row in 0..params.rows {
            for col in 0..params.cols {
                aliens.push(Alien::new(
                    ids.next(),
                    start_x + col as f32 * spacing_x,
                    TOP_MARGIN + row as f32 * spacing_y,
                ));
            }
        }

        Self {
            aliens,
            direction: 1.0,
            speed: params.speed,
            shoot_interval: params.shoot_interval,
            last_shot: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.aliens.is_empty()
    }

    /// Lowest bottom edge among live aliens.
    pub fn lowest_bottom(&self) -> Option<f32> {
        self.aliens.iter().map(|a| a.bottom()).reduce(f32::max)
    }

    /// One movement step. Edge contact is decided from the pre-move
    /// positions of every alien, so the outcome does not depend on
    /// iteration order: on a contact tick the whole grid reverses and
    /// descends once instead of moving sideways.
    pub fn advance(&mut self, dt: f32, field_width: f32) -> FormationDelta {
        let mut delta = FormationDelta::default();
        if self.aliens.is_empty() {
            return delta;
        }

        let dx = self.speed * self.direction * dt;
        let edge_hit = self.aliens.iter().any(|a| {
            let x = a.x + dx;
            x + ALIEN_HALF_W >= field_width || x - ALIEN_HALF_W <= 0.0
        });

        if edge_hit {
            self.direction = -self.direction;
            for alien in &mut self.aliens {
                alien.y += DESCENT_STEP;
            }
            delta.reversed = true;
        } else {
            for alien in &mut self.aliens {
                alien.x += dx;
            }
        }

        delta.invaded = self.aliens.iter().any(|a| a.bottom() >= INVASION_Y);
        delta
    }

    /// Cooldown-gated shot from a uniformly random live alien. Returns the
    /// muzzle position (the shooter's bottom edge) on fire.
    pub fn try_fire(&mut self, now: u64, rng: &mut impl Rng) -> Option<(f32, f32)> {
        if self.aliens.is_empty() || now.saturating_sub(self.last_shot) <= self.shoot_interval {
            return None;
        }
        self.last_shot = now;
        let shooter = &self.aliens[rng.random_range(0..self.aliens.len())];
        Some((shooter.x, shooter.bottom()))
    }

    /// Removes an alien by id; already-removed ids are ignored.
    pub fn remove(&mut self, id: EntityId) {
        self.aliens.retain(|a| a.id != id);
    }

    pub fn get(&self, id: EntityId) -> Option<&Alien> {
        self.aliens.iter().find(|a| a.id == id)
    }
}
