use crate::card::{Card, Color};

/// Pure legality predicate: colorless cards always match, otherwise the
/// card must share the active color or the top card's value.
///
/// Order-independent and free of turn state; the round engine layers the
/// turn and draw-chain checks on top of it.
#[inline]
pub fn is_playable(card: &Card, top: &Card, current_color: Color) -> bool {
    if card.is_colorless() {
        return true;
    }
    if card.color() == Some(current_color) {
        return true;
    }
    card.same_value(top)
}

/// Filters a hand down to its legal subset; empty means the player must
/// draw.
pub fn playable_cards(hand: &[Card], top: &Card, current_color: Color) -> Vec<Card> {
    hand.iter()
        .filter(|card| is_playable(card, top, current_color))
        .copied()
        .collect()
}
