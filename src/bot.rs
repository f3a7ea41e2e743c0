use crate::action::TurnAction;
use crate::state::RoundView;

/// Interface for defining custom Onu bots.
pub trait Bot {
    fn select_action(&mut self, view: &RoundView, legal_actions: &[TurnAction]) -> TurnAction;
}
