use crate::config::ArenaConfig;
use crate::entity::{Bullet, Enemy, Player};
use crate::geometry::{clamp_within, distance, frame_scale, steer_toward};

/// Moves a player along its row according to its held input.
pub fn move_player(player: &mut Player, width: f32, dt_ms: f32) {
    let direction = player.input.direction();
    if direction == 0.0 {
        return;
    }
    let x = player.position.x + direction * player.speed * frame_scale(dt_ms);
    player.position.x = clamp_within(x, player.half_size(), width);
}

/// Closest enemy strictly inside `radius` of `bullet`, if any.
pub fn nearest_enemy_within<'a>(bullet: &Bullet, enemies: &'a [Enemy], radius: f32) -> Option<&'a Enemy> {
    enemies
        .iter()
        .map(|enemy| (enemy, distance(bullet.position, enemy.position)))
        .filter(|(_, d)| *d < radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(enemy, _)| enemy)
}

pub fn advance_bullet(bullet: &mut Bullet, enemies: &[Enemy], arena: &ArenaConfig, dt_ms: f32) {
    let scale = frame_scale(dt_ms);

    if bullet.is_aim {
        if let Some(target) = nearest_enemy_within(bullet, enemies, arena.player.aim_radius) {
            let towards = target.position - bullet.position;
            bullet.velocity = steer_toward(
                bullet.velocity,
                towards,
                bullet.aim_strength * scale,
                bullet.speed,
            );
        }
    }

    bullet.position += bullet.velocity * scale;

    if bullet.is_bounce {
        let left = bullet.radius;
        let right = arena.width - bullet.radius;
        if bullet.position.x < left {
            bullet.position.x = left;
            bullet.velocity.x = bullet.velocity.x.abs();
        } else if bullet.position.x > right {
            bullet.position.x = right;
            bullet.velocity.x = -bullet.velocity.x.abs();
        }
    }
}

pub fn advance_enemies(enemies: &mut [Enemy], dt_ms: f32) {
    let scale = frame_scale(dt_ms);
    for enemy in enemies {
        enemy.position.y += enemy.speed * scale;
    }
}
