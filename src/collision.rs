use std::collections::HashMap;

use crate::entities::{BarrierBlock, EntityId, Formation, Player};
use crate::session::Session;

/// Points for destroying an alien.
pub const KILL_SCORE: u32 = 10;

/// An intersection reported by the host's broad phase for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPair {
    PlayerBulletAlien { bullet: EntityId, alien: EntityId },
    AlienBulletPlayer { bullet: EntityId },
    BulletBlock { bullet: EntityId, block: EntityId },
}

/// State mutations decided by the resolver, applied in order by the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    DestroyBullet(EntityId),
    DestroyAlien(EntityId),
    AddScore(u32),
    LoseLife,
    DamageBlock(EntityId),
    SpawnExplosion { x: f32, y: f32 },
}

/// Supplies the tick's intersecting pairs. Broad-phase detection belongs to
/// the host layer; the core only consumes its output.
pub trait CollisionSource {
    fn intersections(&self, session: &Session) -> Vec<ContactPair>;
}

/// Maps the tick's contact pairs to effects. Each entity is consumed at most
/// once per batch: pairs naming an already-spent bullet, a dead alien or a
/// destroyed block are dropped rather than double-counted.
pub fn resolve(
    pairs: &[ContactPair],
    formation: &Formation,
    barriers: &[BarrierBlock],
    player: &Player,
) -> Vec<Effect> {
    let mut effects = Vec::new();
    let mut spent_bullets: Vec<EntityId> = Vec::new();
    let mut dead_aliens: Vec<EntityId> = Vec::new();
    let mut block_damage: HashMap<EntityId, u8> = HashMap::new();

    for pair in pairs {
        match *pair {
            ContactPair::PlayerBulletAlien { bullet, alien } => {
                if spent_bullets.contains(&bullet) || dead_aliens.contains(&alien) {
                    continue;
                }
                let Some(target) = formation.get(alien) else {
                    continue;
                };
                spent_bullets.push(bullet);
                dead_aliens.push(alien);
                effects.push(Effect::DestroyBullet(bullet));
                effects.push(Effect::DestroyAlien(alien));
                effects.push(Effect::AddScore(KILL_SCORE));
                effects.push(Effect::SpawnExplosion {
                    x: target.x,
                    y: target.y,
                });
            }
            ContactPair::AlienBulletPlayer { bullet } => {
                if spent_bullets.contains(&bullet) {
                    continue;
                }
                spent_bullets.push(bullet);
                effects.push(Effect::DestroyBullet(bullet));
                effects.push(Effect::LoseLife);
                effects.push(Effect::SpawnExplosion {
                    x: player.x,
                    y: player.y,
                });
            }
            ContactPair::BulletBlock { bullet, block } => {
                if spent_bullets.contains(&bullet) {
                    continue;
                }
                let Some(target) = barriers.iter().find(|b| b.id == block) else {
                    continue;
                };
                let dealt = block_damage.entry(block).or_insert(0);
                if *dealt >= target.health {
                    // Block already used up earlier in this batch.
                    continue;
                }
                *dealt += 1;
                spent_bullets.push(bullet);
                effects.push(Effect::DestroyBullet(bullet));
                effects.push(Effect::DamageBlock(block));
            }
        }
    }

    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::IdGen;

    fn fixtures() -> (Formation, Vec<BarrierBlock>, Player, IdGen) {
        let mut ids = IdGen::default();
        let formation = Formation::new(1, 800.0, &mut ids);
        let barriers = crate::entities::build_barriers(800.0, 600.0, &mut ids);
        let player = Player::new(400.0, 550.0);
        (formation, barriers, player, ids)
    }

    #[test]
    fn test_player_bullet_kills_alien() {
        let (formation, barriers, player, mut ids) = fixtures();
        let bullet = ids.next();
        let alien = formation.aliens[3].id;
        let (ax, ay) = (formation.aliens[3].x, formation.aliens[3].y);

        let effects = resolve(
            &[ContactPair::PlayerBulletAlien { bullet, alien }],
            &formation,
            &barriers,
            &player,
        );

        assert_eq!(
            effects,
            vec![
                Effect::DestroyBullet(bullet),
                Effect::DestroyAlien(alien),
                Effect::AddScore(KILL_SCORE),
                Effect::SpawnExplosion { x: ax, y: ay },
            ]
        );
    }

    #[test]
    fn test_alien_bullet_hits_player() {
        let (formation, barriers, player, mut ids) = fixtures();
        let bullet = ids.next();

        let effects = resolve(
            &[ContactPair::AlienBulletPlayer { bullet }],
            &formation,
            &barriers,
            &player,
        );

        assert_eq!(
            effects,
            vec![
                Effect::DestroyBullet(bullet),
                Effect::LoseLife,
                Effect::SpawnExplosion { x: 400.0, y: 550.0 },
            ]
        );
    }

    #[test]
    fn test_bullet_damages_block() {
        let (formation, barriers, player, mut ids) = fixtures();
        let bullet = ids.next();
        let block = barriers[0].id;

        let effects = resolve(
            &[ContactPair::BulletBlock { bullet, block }],
            &formation,
            &barriers,
            &player,
        );

        assert_eq!(
            effects,
            vec![Effect::DestroyBullet(bullet), Effect::DamageBlock(block)]
        );
    }

    #[test]
    fn test_spent_bullet_is_consumed_once() {
        let (formation, barriers, player, mut ids) = fixtures();
        let bullet = ids.next();
        let first = formation.aliens[0].id;
        let second = formation.aliens[1].id;

        // One bullet overlapping two aliens only kills the first.
        let effects = resolve(
            &[
                ContactPair::PlayerBulletAlien {
                    bullet,
                    alien: first,
                },
                ContactPair::PlayerBulletAlien {
                    bullet,
                    alien: second,
                },
            ],
            &formation,
            &barriers,
            &player,
        );

        let kills = effects
            .iter()
            .filter(|e| matches!(e, Effect::DestroyAlien(_)))
            .count();
        assert_eq!(kills, 1);
        assert_eq!(
            effects
                .iter()
                .filter(|e| matches!(e, Effect::DestroyBullet(_)))
                .count(),
            1
        );
    }

    #[test]
    fn test_stale_alien_id_is_ignored() {
        let (formation, barriers, player, mut ids) = fixtures();
        let bullet = ids.next();
        let stale = ids.next();

        let effects = resolve(
            &[ContactPair::PlayerBulletAlien {
                bullet,
                alien: stale,
            }],
            &formation,
            &barriers,
            &player,
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn test_block_absorbs_at_most_its_health_per_batch() {
        let (formation, mut barriers, player, mut ids) = fixtures();
        barriers[0].health = 1;
        let block = barriers[0].id;
        let first = ids.next();
        let second = ids.next();

        let effects = resolve(
            &[
                ContactPair::BulletBlock {
                    bullet: first,
                    block,
                },
                ContactPair::BulletBlock {
                    bullet: second,
                    block,
                },
            ],
            &formation,
            &barriers,
            &player,
        );

        // The second bullet flies on: the block was gone before it landed.
        assert_eq!(
            effects,
            vec![Effect::DestroyBullet(first), Effect::DamageBlock(block)]
        );
    }
}
