use serde::{Deserialize, Serialize};

use crate::action::Seat;
use crate::card::{Card, CardId, Color};
use crate::mode::Rules;
use crate::round::{Direction, RoundStatus};

/// Public portion of a seat's state that every opponent may observe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatView {
    pub seat: Seat,
    pub name: String,
    pub cards: usize,
    pub called_uno: bool,
    pub is_current: bool,
    pub is_host: bool,
}

/// Round snapshot tailored to one perspective: the own hand in full,
/// opponents as counts. This is what bots and clients decide from.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundView {
    pub mode: String,
    pub rules: Rules,
    pub status: RoundStatus,
    pub self_seat: Seat,
    pub current_seat: Seat,
    pub direction: Direction,
    pub current_color: Color,
    pub top_card: Option<Card>,
    pub draw_stack: u8,
    pub draw_pile_count: usize,
    pub discard_pile_count: usize,
    /// Set while this perspective may challenge a wild-draw-four.
    pub can_challenge: bool,
    /// Card offered for immediate play after this perspective drew it.
    pub offered_card: Option<CardId>,
    pub turn_time_secs: u16,
    pub seats: Vec<SeatView>,
    pub hand: Vec<Card>,
}

impl RoundView {
    pub fn is_own_turn(&self) -> bool {
        self.current_seat == self.self_seat
    }

    pub fn seat(&self, seat: Seat) -> Option<&SeatView> {
        self.seats.get(seat)
    }
}
