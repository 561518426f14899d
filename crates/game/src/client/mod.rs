mod prediction;
mod replica;

pub use prediction::{ClientPrediction, Correction};
pub use replica::Client;
