use glam::Vec2;
use rand::Rng;

use crate::config::PlayerTuning;
use crate::entity::{Bullet, Player};

/// Fires one volley if the trigger is held and the fire interval has passed.
///
/// Returns the number of bullets spawned. Volleys spread symmetrically
/// around the player; every bullet rolls for bounce on its own.
pub fn try_fire<R: Rng>(player: &mut Player, now_ms: f64, tuning: &PlayerTuning, rng: &mut R) -> usize {
    if !player.input.shoot {
        return 0;
    }
    let interval = player.upgrades.fire_interval_ms() as f64;
    if now_ms - player.last_shot_ms <= interval {
        return 0;
    }

    let upgrades = &player.upgrades;
    let count = upgrades.bullet_count() as usize;
    let speed = upgrades.bullet_speed();
    let radius = upgrades.bullet_radius();
    let damage = upgrades.damage();
    let bounce_chance = upgrades.bounce_chance();
    let aim_strength = upgrades.aim_strength();

    let center = (count as f32 - 1.0) / 2.0;
    for i in 0..count {
        let offset = (i as f32 - center) * tuning.shot_spread;
        let position = Vec2::new(player.position.x + offset, player.position.y);
        let mut bullet = Bullet::straight(player.id, position, speed, radius, damage);

        if bounce_chance > 0.0 && rng.gen_range(0.0f32..1.0) < bounce_chance {
            let spread = tuning.bounce_launch_angle;
            let angle = if spread > 0.0 {
                rng.gen_range(-spread..=spread)
            } else {
                0.0
            };
            bullet.is_bounce = true;
            bullet.velocity = Vec2::new(angle.sin(), -angle.cos()) * speed;
        }
        if aim_strength > 0.0 {
            bullet.is_aim = true;
            bullet.aim_strength = aim_strength;
        }
        player.bullets.push(bullet);
    }

    player.last_shot_ms = now_ms;
    count
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::config::ArenaConfig;
    use crate::upgrade::UpgradeKind;

    fn shooter() -> Player {
        let mut player = Player::new(0, 0, 1, &ArenaConfig::default());
        player.input.shoot = true;
        player
    }

    #[test]
    fn waits_for_the_fire_interval() {
        let tuning = PlayerTuning::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut player = shooter();

        assert_eq!(try_fire(&mut player, 400.0, &tuning, &mut rng), 0);
        assert_eq!(try_fire(&mut player, 416.0, &tuning, &mut rng), 1);
        assert_eq!(player.last_shot_ms, 416.0);
        assert_eq!(try_fire(&mut player, 800.0, &tuning, &mut rng), 0);
        assert_eq!(try_fire(&mut player, 832.0, &tuning, &mut rng), 1);
    }

    #[test]
    fn released_trigger_never_fires() {
        let tuning = PlayerTuning::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut player = shooter();
        player.input.shoot = false;
        assert_eq!(try_fire(&mut player, 10_000.0, &tuning, &mut rng), 0);
        assert!(player.bullets.is_empty());
    }

    #[test]
    fn volley_is_symmetric_and_uses_upgrades() {
        let tuning = PlayerTuning::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut player = shooter();
        player.upgrades.set_level(UpgradeKind::BulletCount, 3);
        player.upgrades.set_level(UpgradeKind::Damage, 2);
        player.upgrades.set_level(UpgradeKind::BulletSpeed, 2);

        assert_eq!(try_fire(&mut player, 1000.0, &tuning, &mut rng), 3);

        let x = player.position.x;
        let offsets: Vec<f32> = player.bullets.iter().map(|b| b.position.x - x).collect();
        assert_eq!(offsets, vec![-5.0, 0.0, 5.0]);
        for bullet in &player.bullets {
            assert_eq!(bullet.damage, 2);
            assert_eq!(bullet.speed, 20.0);
            assert_eq!(bullet.velocity, Vec2::new(0.0, -20.0));
            assert!(!bullet.is_bounce);
            assert!(!bullet.is_aim);
        }
    }

    #[test]
    fn guaranteed_bounce_keeps_speed() {
        let tuning = PlayerTuning::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut player = shooter();
        player.upgrades.set_level(UpgradeKind::Bounce, 10);
        player.upgrades.set_level(UpgradeKind::AutoAim, 1);

        try_fire(&mut player, 1000.0, &tuning, &mut rng);

        let bullet = &player.bullets[0];
        assert!(bullet.is_bounce);
        assert!(bullet.is_aim);
        assert!((bullet.velocity.length() - bullet.speed).abs() < 1e-4);
        assert!(bullet.velocity.y < 0.0);
    }
}
