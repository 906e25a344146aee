use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::collision::{self, CollisionSource, Effect};
use crate::entities::{
    BarrierBlock, Bullet, BulletOwner, Explosion, Formation, GamePhase, GameState, IdGen, Player,
    START_LIVES, build_barriers, crush_front_row,
};

pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 600.0;
/// Where the ship starts and returns to after a continue.
pub const PLAYER_SPAWN: (f32, f32) = (FIELD_WIDTH / 2.0, FIELD_HEIGHT - 50.0);

/// Player intents for one tick, already decoded by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Fire,
}

/// One game in progress: every entity collection, the progress counters and
/// the phase machine, advanced one tick at a time by the host loop.
pub struct Session {
    pub phase: GamePhase,
    pub state: GameState,
    pub player: Player,
    pub formation: Formation,
    pub bullets: Vec<Bullet>,
    pub barriers: Vec<BarrierBlock>,
    pub explosions: Vec<Explosion>,
    ids: IdGen,
    rng: StdRng,
}

impl Session {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic session for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut ids = IdGen::default();
        let formation = Formation::new(1, FIELD_WIDTH, &mut ids);
        let barriers = build_barriers(FIELD_WIDTH, FIELD_HEIGHT, &mut ids);

        Self {
            phase: GamePhase::Playing,
            state: GameState::new(),
            player: Player::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1),
            formation,
            bullets: Vec::new(),
            barriers,
            explosions: Vec::new(),
            ids,
            rng,
        }
    }

    /// Advances the simulation by one tick. `now` is the host's monotonic
    /// clock in milliseconds; `contacts` is the host's broad phase. The
    /// order within a tick is fixed: player commands, formation movement,
    /// alien fire, bullet and explosion bookkeeping, collision resolution,
    /// progression, barrier overrun. Outside Playing this is a no-op.
    pub fn update(
        &mut self,
        dt: f32,
        now: u64,
        commands: &[Command],
        contacts: &dyn CollisionSource,
    ) {
        if self.phase != GamePhase::Playing {
            return;
        }

        for command in commands {
            match command {
                Command::MoveLeft => self.player.steer(-1.0, dt, FIELD_WIDTH),
                Command::MoveRight => self.player.steer(1.0, dt, FIELD_WIDTH),
                Command::Fire => {
                    if let Some((x, y)) = self.player.try_fire(now) {
                        let id = self.ids.next();
                        self.bullets.push(Bullet::new(id, x, y, BulletOwner::Player));
                    }
                }
            }
        }

        let delta = self.formation.advance(dt, FIELD_WIDTH);

        if let Some((x, y)) = self.formation.try_fire(now, &mut self.rng) {
            let id = self.ids.next();
            self.bullets.push(Bullet::new(id, x, y, BulletOwner::Alien));
        }

        for bullet in &mut self.bullets {
            bullet.update(dt);
        }
        self.bullets.retain(|b| !b.is_out_of_bounds(FIELD_HEIGHT));

        for explosion in &mut self.explosions {
            explosion.update();
        }
        self.explosions.retain(|e| !e.is_done());

        let pairs = contacts.intersections(self);
        let effects = collision::resolve(&pairs, &self.formation, &self.barriers, &self.player);
        for effect in effects {
            self.apply(effect);
        }

        self.evaluate(delta.invaded);

        if self.phase == GamePhase::Playing
            && let Some(lowest) = self.formation.lowest_bottom()
        {
            crush_front_row(&mut self.barriers, lowest);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::DestroyBullet(id) => self.bullets.retain(|b| b.id != id),
            Effect::DestroyAlien(id) => self.formation.remove(id),
            Effect::AddScore(points) => self.state.score += points,
            Effect::LoseLife => self.state.lives = self.state.lives.saturating_sub(1),
            Effect::DamageBlock(id) => {
                let destroyed = self
                    .barriers
                    .iter_mut()
                    .find(|b| b.id == id)
                    .is_some_and(|block| block.hit());
                if destroyed {
                    self.barriers.retain(|b| b.id != id);
                }
            }
            Effect::SpawnExplosion { x, y } => self.explosions.push(Explosion::new(x, y)),
        }
    }

    /// Progression step: invasion and death end the run (or pause it at the
    /// continue prompt), an emptied formation rolls the next wave with the
    /// barriers left as they stand.
    fn evaluate(&mut self, invaded: bool) {
        if invaded {
            self.phase = GamePhase::GameOver;
            return;
        }

        if self.state.lives == 0 {
            self.phase = if self.state.continues_left > 0 {
                GamePhase::AwaitingContinue
            } else {
                GamePhase::GameOver
            };
            return;
        }

        if self.formation.is_empty() {
            self.state.level += 1;
            self.formation = Formation::new(self.state.level, FIELD_WIDTH, &mut self.ids);
        }
    }

    /// Spends a continue: lives and ship position reset, shots and blasts
    /// cleared, barriers and formation rebuilt at the current level. No-op
    /// outside the continue prompt.
    pub fn confirm_continue(&mut self) {
        if self.phase != GamePhase::AwaitingContinue || self.state.continues_left == 0 {
            return;
        }
        self.state.continues_left -= 1;
        self.state.lives = START_LIVES;
        self.player = Player::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1);
        self.bullets.clear();
        self.explosions.clear();
        self.barriers = build_barriers(FIELD_WIDTH, FIELD_HEIGHT, &mut self.ids);
        self.formation = Formation::new(self.state.level, FIELD_WIDTH, &mut self.ids);
        self.phase = GamePhase::Playing;
    }

    /// Declining the continue prompt ends the game with the score intact.
    pub fn decline_continue(&mut self) {
        if self.phase == GamePhase::AwaitingContinue {
            self.phase = GamePhase::GameOver;
        }
    }

    /// Starts a fresh game. Only honored from the game-over screen.
    pub fn restart(&mut self) {
        if self.phase != GamePhase::GameOver {
            return;
        }
        self.ids = IdGen::default();
        self.state = GameState::new();
        self.formation = Formation::new(1, FIELD_WIDTH, &mut self.ids);
        self.barriers = build_barriers(FIELD_WIDTH, FIELD_HEIGHT, &mut self.ids);
        self.player = Player::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1);
        self.bullets.clear();
        self.explosions.clear();
        self.phase = GamePhase::Playing;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
