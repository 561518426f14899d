use crate::config::PredictionTuning;
use crate::entity::{Player, PlayerInput};
use crate::geometry::{clamp_within, frame_scale};

/// How a snapshot moved the locally predicted position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Correction {
    /// First authoritative position seen; adopted as is.
    Seeded,
    /// Small error, blended towards the server.
    Soft { error: f32 },
    /// Error beyond the snap threshold, jumped straight to the server.
    Hard { error: f32 },
}

/// Local-only horizontal prediction for the player this client controls.
///
/// Prediction runs every frame from raw input, independent of the network.
/// Snapshots pull it back towards the authoritative position.
#[derive(Debug, Clone)]
pub struct ClientPrediction {
    tuning: PredictionTuning,
    predicted_x: Option<f32>,
    displayed_x: Option<f32>,
}

impl ClientPrediction {
    pub fn new(tuning: PredictionTuning) -> Self {
        Self {
            tuning,
            predicted_x: None,
            displayed_x: None,
        }
    }

    pub fn predicted_x(&self) -> Option<f32> {
        self.predicted_x
    }

    pub fn displayed_x(&self) -> Option<f32> {
        self.displayed_x
    }

    /// Integrates one frame of input on top of the current prediction.
    pub fn apply_input(&mut self, player: &Player, input: PlayerInput, width: f32, dt_ms: f32) -> f32 {
        let base = self.predicted_x.unwrap_or(player.position.x);
        let x = base + input.direction() * player.speed * frame_scale(dt_ms);
        let x = clamp_within(x, player.half_size(), width);
        self.predicted_x = Some(x);
        self.displayed_x = Some(x);
        x
    }

    pub fn reconcile(&mut self, authoritative_x: f32) -> Correction {
        let Some(predicted) = self.predicted_x else {
            self.predicted_x = Some(authoritative_x);
            self.displayed_x = Some(authoritative_x);
            return Correction::Seeded;
        };

        let error = predicted - authoritative_x;
        if error.abs() > self.tuning.snap_threshold {
            log::debug!("Prediction off by {:.2}, snapping", error);
            self.predicted_x = Some(authoritative_x);
            self.displayed_x = Some(authoritative_x);
            Correction::Hard { error }
        } else {
            self.displayed_x = Some(predicted - error * self.tuning.soft_correction);
            self.predicted_x = Some(authoritative_x);
            Correction::Soft { error }
        }
    }

    pub fn reset(&mut self) {
        self.predicted_x = None;
        self.displayed_x = None;
    }
}
