// Library exports for testing
pub use entities::{
    Alien, BarrierBlock, Bullet, BulletOwner, EntityId, Explosion, Formation, FormationDelta,
    GamePhase, GameState, Player, WaveParams,
};
pub use session::{Command, Session};

pub mod app;
pub mod collision;
pub mod entities;
pub mod input;
pub mod physics;
pub mod renderer;
pub mod session;
