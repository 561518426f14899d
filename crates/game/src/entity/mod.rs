mod bullet;
mod enemy;
mod player;
mod state;

pub use bullet::Bullet;
pub use enemy::Enemy;
pub use player::{Player, PlayerColor, PlayerId, PlayerInput};
pub use state::GameState;
