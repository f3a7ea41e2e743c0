use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::TurnAction;
use crate::bot::Bot;
use crate::state::RoundView;

/// Baseline bot that samples uniformly from the legal action set.
pub struct RandomBot<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn select_action(&mut self, _view: &RoundView, legal_actions: &[TurnAction]) -> TurnAction {
        legal_actions
            .choose(&mut self.rng)
            .copied()
            .expect("at least one legal action must be available")
    }
}
