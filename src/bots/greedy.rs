use crate::action::{Seat, TurnAction};
use crate::bot::Bot;
use crate::card::{Card, Color};
use crate::score::card_points;
use crate::state::RoundView;

/// Rule-based bot that plays "sensible" moves without search or learning.
///
/// In plain English:
/// - Always calls uno and calls out opponents who forgot to.
/// - Prefers playing a card over drawing, and dumps expensive cards
///   (draw-twos, skips) before cheap numbers so less is left to score
///   against it.
/// - Holds wilds and specials until no colored play exists.
/// - Recolors to whichever color it still holds the most of.
/// - Aims swaps and trades at the opponent with the fewest cards.
pub struct GreedyBot;

impl GreedyBot {
    pub fn new() -> Self {
        Self
    }

    fn hand_card(view: &RoundView, action: &TurnAction) -> Option<Card> {
        let id = action.card()?;
        view.hand.iter().copied().find(|card| card.id == id)
    }

    /// Count how many hand cards would still match the given color.
    fn color_weight(view: &RoundView, color: Color) -> i32 {
        view.hand
            .iter()
            .filter(|card| card.color() == Some(color))
            .count() as i32
    }

    /// Score a play of a concrete card. Larger is better. Pieces:
    /// - Base bonus so any play outranks drawing.
    /// - Penalty value of the card, so expensive cards leave the hand first.
    /// - Wilds and specials score below colored cards to keep them in reserve.
    /// - Chosen color weighted by how much of that color remains in hand.
    /// - Swap targets weighted toward the opponent closest to going out.
    fn score_play(view: &RoundView, action: &TurnAction) -> i32 {
        let TurnAction::Play {
            chosen_color,
            swap_with,
            ..
        } = action
        else {
            return i32::MIN / 2;
        };
        let Some(card) = Self::hand_card(view, action) else {
            return i32::MIN / 2;
        };
        let mut score = 10_000;
        if card.is_colorless() {
            score -= 1_500;
        } else {
            score += card_points(&card) as i32 * 30;
        }
        if let Some(color) = chosen_color {
            score += Self::color_weight(view, *color) * 250;
        }
        if let Some(target) = swap_with {
            score += Self::score_swap_target(view, *target);
        }
        if view.hand.len() == 1 {
            score += 5_000;
        }
        score
    }

    /// Swapping is best against a nearly empty hand: we inherit it.
    fn score_swap_target(view: &RoundView, target: Seat) -> i32 {
        let Some(seat) = view.seat(target) else {
            return i32::MIN / 2;
        };
        (view.hand.len() as i32 - seat.cards as i32) * 150
    }

    fn score_action(view: &RoundView, action: &TurnAction) -> i32 {
        match action {
            TurnAction::Play { .. } => Self::score_play(view, action),
            // Never forget to call uno; free penalties on opponents are free.
            TurnAction::CallUno => 20_000,
            TurnAction::CallOut { .. } => 15_000,
            // Contest a wild-draw-four only when the stacked stake got large.
            TurnAction::Challenge => {
                if view.draw_stack >= 6 {
                    500
                } else {
                    -2_000
                }
            }
            TurnAction::Draw => -3_000,
            TurnAction::PassAfterDraw => -1_000,
        }
    }
}

impl Default for GreedyBot {
    fn default() -> Self {
        Self::new()
    }
}

impl Bot for GreedyBot {
    fn select_action(&mut self, view: &RoundView, legal_actions: &[TurnAction]) -> TurnAction {
        assert!(
            !legal_actions.is_empty(),
            "greedy bot requires at least one legal action"
        );
        legal_actions
            .iter()
            .max_by_key(|action| Self::score_action(view, action))
            .copied()
            .unwrap_or(legal_actions[0])
    }
}
