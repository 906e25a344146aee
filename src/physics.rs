use crate::collision::{CollisionSource, ContactPair};
use crate::entities::{Body, BulletOwner};
use crate::session::Session;

/// Axis-aligned overlap test between two bodies.
fn overlaps(a: &impl Body, b: &impl Body) -> bool {
    let (ax, ay) = a.pos();
    let (bx, by) = b.pos();
    let (ahw, ahh) = a.half_extents();
    let (bhw, bhh) = b.half_extents();
    (ax - bx).abs() < ahw + bhw && (ay - by).abs() < ahh + bhh
}

/// The broad phase the terminal shell injects into the session: a plain
/// pairwise sweep over the handful of live entities.
#[derive(Debug, Default)]
pub struct AabbCollisions;

impl CollisionSource for AabbCollisions {
    fn intersections(&self, session: &Session) -> Vec<ContactPair> {
        let mut pairs = Vec::new();

        for bullet in &session.bullets {
            match bullet.owner {
                BulletOwner::Player => {
                    for alien in &session.formation.aliens {
                        if overlaps(bullet, alien) {
                            pairs.push(ContactPair::PlayerBulletAlien {
                                bullet: bullet.id,
                                alien: alien.id,
                            });
                        }
                    }
                }
                BulletOwner::Alien => {
                    if overlaps(bullet, &session.player) {
                        pairs.push(ContactPair::AlienBulletPlayer { bullet: bullet.id });
                    }
                }
            }

            for block in &session.barriers {
                if overlaps(bullet, block) {
                    pairs.push(ContactPair::BulletBlock {
                        bullet: bullet.id,
                        block: block.id,
                    });
                }
            }
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Bullet, EntityId};

    #[test]
    fn test_player_bullet_over_alien_reports_a_pair() {
        let mut session = Session::with_seed(1);
        let alien = session.formation.aliens[0].clone();
        session.bullets.push(Bullet::new(
            EntityId(9000),
            alien.x,
            alien.y,
            BulletOwner::Player,
        ));

        let pairs = AabbCollisions.intersections(&session);
        assert!(pairs.contains(&ContactPair::PlayerBulletAlien {
            bullet: EntityId(9000),
            alien: alien.id,
        }));
    }

    #[test]
    fn test_alien_bullet_over_player_reports_a_pair() {
        let mut session = Session::with_seed(1);
        let (px, py) = (session.player.x, session.player.y);
        session
            .bullets
            .push(Bullet::new(EntityId(9000), px, py, BulletOwner::Alien));

        let pairs = AabbCollisions.intersections(&session);
        assert_eq!(
            pairs,
            vec![ContactPair::AlienBulletPlayer {
                bullet: EntityId(9000)
            }]
        );
    }

    #[test]
    fn test_alien_bullet_ignores_aliens() {
        let mut session = Session::with_seed(1);
        let alien = session.formation.aliens[0].clone();
        session.bullets.push(Bullet::new(
            EntityId(9000),
            alien.x,
            alien.y,
            BulletOwner::Alien,
        ));

        let pairs = AabbCollisions.intersections(&session);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_distant_entities_do_not_pair() {
        let mut session = Session::with_seed(1);
        session
            .bullets
            .push(Bullet::new(EntityId(9000), 5.0, 300.0, BulletOwner::Player));

        let pairs = AabbCollisions.intersections(&session);
        assert!(pairs.is_empty());
    }
}
