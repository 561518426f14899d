mod combat;
mod firing;
mod movement;
mod spawn;
mod tick;

pub use combat::{CollisionReport, EscapeEvent, KillEvent, resolve_collisions, resolve_escapes};
pub use firing::try_fire;
pub use movement::{advance_bullet, advance_enemies, move_player, nearest_enemy_within};
pub use spawn::spawn_enemy;
pub use tick::{FixedTimestep, TickEngine, TickReport};
