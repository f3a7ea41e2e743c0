//! Scoring utilities for Onu simulations.
//!
//! Current scoring rule (winner-only):
//!   points = sum of opponents' remaining hand cards, where a number card
//!   scores its digit, skip/reverse/draw2 score 20, and wild, special and
//!   legendary cards score 50.
//! Non-winning players receive 0 points.
//! Aborted rounds award no points.

use crate::action::Seat;
use crate::card::{Card, Face};
use crate::round::Round;

/// Point value of a single card left in a losing hand.
pub fn card_points(card: &Card) -> u32 {
    match card.face {
        Face::Number { digit, .. } => digit as u32,
        Face::Action { .. } => 20,
        Face::Wild { .. } | Face::Special { .. } | Face::Legendary => 50,
    }
}

/// Sum of [`card_points`] over a hand.
pub fn hand_points(hand: &[Card]) -> u32 {
    hand.iter().map(card_points).sum()
}

/// Compute winner's points for a finished round.
///
/// Assumes `winner` is a valid seat in `round`. If the round was aborted
/// without a winner, caller should skip calling this.
pub fn winner_points(round: &Round, winner: Seat) -> u32 {
    round
        .players()
        .iter()
        .enumerate()
        .filter(|(seat, _)| *seat != winner)
        .map(|(_, player)| hand_points(player.hand()))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{ActionEffect, CardId, Color, SpecialEffect, WildEffect};
    use crate::mode::{ModeOverrides, custom_mode};

    #[test]
    fn card_points_follow_the_standard_table() {
        assert_eq!(card_points(&Card::number(CardId(0), Color::Red, 0)), 0);
        assert_eq!(card_points(&Card::number(CardId(1), Color::Blue, 9)), 9);
        assert_eq!(
            card_points(&Card::action(CardId(2), Color::Green, ActionEffect::Skip)),
            20
        );
        assert_eq!(
            card_points(&Card::action(CardId(3), Color::Red, ActionEffect::DrawTwo)),
            20
        );
        assert_eq!(card_points(&Card::wild(CardId(4), WildEffect::Recolor)), 50);
        assert_eq!(card_points(&Card::wild(CardId(5), WildEffect::DrawFour)), 50);
        assert_eq!(
            card_points(&Card::special(CardId(6), SpecialEffect::Shield)),
            50
        );
        assert_eq!(card_points(&Card::legendary(CardId(7))), 50);
    }

    #[test]
    fn winner_sums_the_opposing_hands() {
        let config = custom_mode(
            "normal",
            &ModeOverrides {
                initial_cards: Some(2),
                ..ModeOverrides::default()
            },
        );
        // Bottom-first: deal pops from the top, one card per seat per pass,
        // then the next card is flipped to start the discard pile.
        let deck = vec![
            Card::number(CardId(0), Color::Red, 5),
            Card::number(CardId(1), Color::Yellow, 3),
            Card::action(CardId(2), Color::Blue, ActionEffect::DrawTwo),
            Card::number(CardId(3), Color::Green, 9),
            Card::wild(CardId(4), WildEffect::Recolor),
            Card::number(CardId(5), Color::Red, 7),
        ];
        let round = Round::builder(config, vec![String::from("a"), String::from("b")])
            .with_deck(deck)
            .build()
            .expect("round");
        // Seat 0 holds red 7 and green 9; seat 1 holds wild and blue draw2.
        assert_eq!(winner_points(&round, 0), 70);
        assert_eq!(winner_points(&round, 1), 16);
    }
}
