use crate::card::{Card, CardId};

/// One seated participant. Seat order is the index in the round's player
/// vector; external player ids map to seats at the session boundary.
#[derive(Clone, Debug)]
pub struct Player {
    pub name: String,
    pub is_host: bool,
    hand: Vec<Card>,
    called_uno: bool,
    uno_window: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, is_host: bool) -> Self {
        Self {
            name: name.into(),
            is_host,
            hand: Vec::new(),
            called_uno: false,
            uno_window: false,
        }
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn hand_len(&self) -> usize {
        self.hand.len()
    }

    pub fn has_empty_hand(&self) -> bool {
        self.hand.is_empty()
    }

    /// The uno declaration; meaningful only while the hand holds one card.
    pub fn called_uno(&self) -> bool {
        self.called_uno
    }

    pub fn call_uno(&mut self) {
        self.called_uno = true;
        self.uno_window = false;
    }

    /// True while the player can still be called out for a missed uno
    /// declaration. Opens when they play down to one card silently and
    /// closes when they declare, gain a card or start their next turn.
    pub fn uno_window_open(&self) -> bool {
        self.uno_window
    }

    pub fn open_uno_window(&mut self) {
        self.uno_window = true;
    }

    pub fn close_uno_window(&mut self) {
        self.uno_window = false;
    }

    /// Adds a card to the hand. Any uno declaration lapses.
    pub fn give(&mut self, card: Card) {
        self.hand.push(card);
        self.called_uno = false;
        self.uno_window = false;
    }

    pub fn give_all(&mut self, cards: impl IntoIterator<Item = Card>) {
        for card in cards {
            self.give(card);
        }
    }

    pub fn find(&self, id: CardId) -> Option<usize> {
        self.hand.iter().position(|card| card.id == id)
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.hand.iter().find(|card| card.id == id)
    }

    /// Removes a card by id; hand order of the rest is preserved.
    pub fn take_card(&mut self, id: CardId) -> Option<Card> {
        let index = self.find(id)?;
        Some(self.hand.remove(index))
    }

    /// Empties the hand, used by swap and rotate effects. The receiving
    /// side goes through [`Player::give_all`] so uno declarations lapse.
    pub fn take_hand(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.hand)
    }
}
