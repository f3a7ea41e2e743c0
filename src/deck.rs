use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::card::{ActionEffect, Card, CardId, Color, Face, SpecialEffect, WildEffect};
use crate::mode::ModeConfig;

/// Builds an unshuffled deck from a mode's card counts. Ids are allocated
/// sequentially from 0; the rng only decides legendary inclusion.
pub fn build_deck(config: &ModeConfig, rng: &mut StdRng) -> Vec<Card> {
    let counts = &config.card_counts;
    let mut next_id = 0u32;
    let mut id = || {
        let id = CardId(next_id);
        next_id += 1;
        id
    };

    let mut deck = Vec::new();
    for color in Color::ALL {
        if !config.rules.no_number_cards {
            for _ in 0..counts.zeros_per_color {
                deck.push(Card::number(id(), color, 0));
            }
            for digit in 1..=9 {
                for _ in 0..counts.numbers_per_color {
                    deck.push(Card::number(id(), color, digit));
                }
            }
        }
        for _ in 0..counts.skips_per_color {
            deck.push(Card::action(id(), color, ActionEffect::Skip));
        }
        for _ in 0..counts.reverses_per_color {
            deck.push(Card::action(id(), color, ActionEffect::Reverse));
        }
        for _ in 0..counts.draw_twos_per_color {
            deck.push(Card::action(id(), color, ActionEffect::DrawTwo));
        }
    }
    for _ in 0..counts.wilds {
        deck.push(Card::wild(id(), WildEffect::Recolor));
    }
    for _ in 0..counts.wild_draw_fours {
        deck.push(Card::wild(id(), WildEffect::DrawFour));
    }
    if config.rules.special_effects {
        for effect in SpecialEffect::ALL {
            for _ in 0..counts.specials_each {
                deck.push(Card::special(id(), effect));
            }
        }
    }
    if let Some(odds) = config.legendary_odds {
        if rng.gen_bool(odds.clamp(0.0, 1.0)) {
            deck.push(Card::legendary(id()));
        }
    }
    deck
}

/// Draw and discard piles of one round, plus the active color constraint.
///
/// Both piles keep their top at the end of the vector; the wire document
/// lists the discard pile top-first and the conversion lives in `snapshot`.
#[derive(Clone, Debug)]
pub struct Deck {
    draw: Vec<Card>,
    discard: Vec<Card>,
    current_color: Color,
}

impl Deck {
    /// Wraps an already shuffled pile. The discard pile starts empty; call
    /// [`Deck::flip_start`] to seed it.
    pub fn new(draw: Vec<Card>) -> Self {
        Self {
            draw,
            discard: Vec::new(),
            // Placeholder until the start flip establishes the real color.
            current_color: Color::Red,
        }
    }

    /// Rebuilds a deck from snapshot parts, both piles in internal order.
    pub fn from_parts(draw: Vec<Card>, discard: Vec<Card>, current_color: Color) -> Self {
        Self { draw, discard, current_color }
    }

    pub fn shuffle(&mut self, rng: &mut StdRng) {
        self.draw.shuffle(rng);
    }

    /// Deals `per_hand` cards to each of `players` hands, round-robin one
    /// card at a time.
    pub fn deal(&mut self, players: usize, per_hand: usize) -> Vec<Vec<Card>> {
        let mut hands = vec![Vec::with_capacity(per_hand); players];
        for _ in 0..per_hand {
            for hand in hands.iter_mut() {
                if let Some(card) = self.draw.pop() {
                    hand.push(card);
                }
            }
        }
        hands
    }

    /// Seeds the discard pile with the first card and establishes the
    /// starting color. A flipped wild-draw-four goes under the draw pile
    /// and the flip repeats; any other colorless flip gets a random color.
    pub fn flip_start(&mut self, rng: &mut StdRng) {
        let mut attempts = self.draw.len();
        let mut card = match self.draw.pop() {
            Some(card) => card,
            None => return,
        };
        while matches!(card.face, Face::Wild { effect: WildEffect::DrawFour, .. }) && attempts > 1 {
            self.draw.insert(0, card);
            attempts -= 1;
            match self.draw.pop() {
                Some(next) => card = next,
                None => return,
            }
        }
        let color = match card.color() {
            Some(color) => color,
            None => {
                let color = Color::ALL[rng.gen_range(0..Color::ALL.len())];
                card.set_chosen_color(color);
                color
            }
        };
        self.discard.push(card);
        self.current_color = color;
    }

    /// Pops the top of the draw pile, recycling the discard pile (minus its
    /// top card) first when empty. `None` means no card exists anywhere.
    pub fn draw(&mut self, rng: &mut StdRng) -> Option<Card> {
        if let Some(card) = self.draw.pop() {
            return Some(card);
        }
        if self.discard.len() < 2 {
            return None;
        }
        self.recycle(rng);
        self.draw.pop()
    }

    /// Places a played card on the discard top and updates the color
    /// constraint from its chosen or printed color.
    pub fn play(&mut self, card: Card) {
        debug_assert!(card.color().or(card.chosen_color()).is_some() || matches!(card.face, Face::Legendary));
        if let Some(color) = card.chosen_color().or(card.color()) {
            self.current_color = color;
        }
        self.discard.push(card);
    }

    pub fn top_discard(&self) -> Option<&Card> {
        self.discard.last()
    }

    pub fn current_color(&self) -> Color {
        self.current_color
    }

    pub fn draw_len(&self) -> usize {
        self.draw.len()
    }

    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    /// Draw pile in internal order, bottom first.
    pub fn draw_cards(&self) -> &[Card] {
        &self.draw
    }

    /// Discard pile in internal order, top last.
    pub fn discard_cards(&self) -> &[Card] {
        &self.discard
    }

    fn recycle(&mut self, rng: &mut StdRng) {
        let keep = self.discard.len() - 1;
        let mut recycled: Vec<Card> = self.discard.drain(..keep).collect();
        for card in recycled.iter_mut() {
            card.clear_chosen_color();
        }
        recycled.shuffle(rng);
        self.draw.append(&mut recycled);
    }
}
