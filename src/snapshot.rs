use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::card::{ActionEffect, Card, CardId, Color, Face, SpecialEffect, WildEffect};
use crate::deck::Deck;
use crate::error::{DirectoryError, SnapshotError};
use crate::mode::mode_config;
use crate::player::Player;
use crate::round::{Direction, Round};

/// Wire color token of colorless cards.
pub const COLORLESS: &str = "black";

/// One card as it crosses the session boundary: flat, JSON-compatible, no
/// nested references.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDoc {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chosen_color: Option<String>,
}

impl From<Card> for CardDoc {
    fn from(card: Card) -> CardDoc {
        CardDoc {
            id: card.id.to_string(),
            kind: card.kind_token().to_string(),
            color: card
                .color()
                .map(|color| color.token().to_string())
                .unwrap_or_else(|| COLORLESS.to_string()),
            value: card.value_token().to_string(),
            chosen_color: card.chosen_color().map(|color| color.token().to_string()),
        }
    }
}

impl TryFrom<CardDoc> for Card {
    type Error = SnapshotError;

    fn try_from(doc: CardDoc) -> Result<Card, SnapshotError> {
        let id = doc
            .id
            .parse::<u32>()
            .map(CardId)
            .map_err(|_| SnapshotError::BadCardId(doc.id.clone()))?;
        let chosen = match &doc.chosen_color {
            None => None,
            Some(token) => Some(
                Color::from_token(token)
                    .ok_or_else(|| SnapshotError::BadColor(token.clone()))?,
            ),
        };
        let face = match doc.kind.as_str() {
            "number" => {
                let color = standard_color("number", &doc.color)?;
                let digit = doc
                    .value
                    .parse::<u8>()
                    .ok()
                    .filter(|digit| *digit <= 9 && doc.value.len() == 1)
                    .ok_or_else(|| SnapshotError::BadValue {
                        kind: "number",
                        value: doc.value.clone(),
                    })?;
                Face::Number { color, digit }
            }
            "action" => {
                let color = standard_color("action", &doc.color)?;
                let effect = ActionEffect::from_token(&doc.value).ok_or_else(|| {
                    SnapshotError::BadValue { kind: "action", value: doc.value.clone() }
                })?;
                Face::Action { color, effect }
            }
            "wild" => {
                require_colorless("wild", &doc.color)?;
                let effect = WildEffect::from_token(&doc.value).ok_or_else(|| {
                    SnapshotError::BadValue { kind: "wild", value: doc.value.clone() }
                })?;
                Face::Wild { effect, chosen }
            }
            "special" => {
                require_colorless("special", &doc.color)?;
                let effect = SpecialEffect::from_token(&doc.value).ok_or_else(|| {
                    SnapshotError::BadValue { kind: "special", value: doc.value.clone() }
                })?;
                Face::Special { effect, chosen }
            }
            "legendary" => {
                require_colorless("legendary", &doc.color)?;
                if doc.value != "99" {
                    return Err(SnapshotError::BadValue {
                        kind: "legendary",
                        value: doc.value.clone(),
                    });
                }
                Face::Legendary
            }
            _ => return Err(SnapshotError::BadCardKind(doc.kind.clone())),
        };
        Ok(Card { id, face })
    }
}

fn standard_color(kind: &'static str, token: &str) -> Result<Color, SnapshotError> {
    if token == COLORLESS {
        return Err(SnapshotError::BadCardColor { kind, color: token.to_string() });
    }
    Color::from_token(token).ok_or_else(|| SnapshotError::BadColor(token.to_string()))
}

fn require_colorless(kind: &'static str, token: &str) -> Result<(), SnapshotError> {
    if token == COLORLESS {
        Ok(())
    } else {
        Err(SnapshotError::BadCardColor { kind, color: token.to_string() })
    }
}

// Cards always serialize in their wire shape so views and documents agree.
impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CardDoc::from(*self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let doc = CardDoc::deserialize(deserializer)?;
        Card::try_from(doc).map_err(serde::de::Error::custom)
    }
}

/// Deck document. `cards` is the draw pile bottom-first; `discardPile`
/// lists the active top card at index 0.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckDoc {
    pub cards: Vec<CardDoc>,
    pub discard_pile: Vec<CardDoc>,
    pub current_color: String,
    pub game_mode: String,
}

impl DeckDoc {
    pub fn capture(deck: &Deck, mode: &str) -> DeckDoc {
        DeckDoc {
            cards: deck.draw_cards().iter().copied().map(CardDoc::from).collect(),
            discard_pile: deck
                .discard_cards()
                .iter()
                .rev()
                .copied()
                .map(CardDoc::from)
                .collect(),
            current_color: deck.current_color().token().to_string(),
            game_mode: mode.to_string(),
        }
    }

    pub fn restore(&self) -> Result<Deck, SnapshotError> {
        let draw = self
            .cards
            .iter()
            .cloned()
            .map(Card::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let mut discard = self
            .discard_pile
            .iter()
            .cloned()
            .map(Card::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        discard.reverse();
        let color = Color::from_token(&self.current_color)
            .ok_or_else(|| SnapshotError::BadColor(self.current_color.clone()))?;
        Ok(Deck::from_parts(draw, discard, color))
    }
}

/// Turn pointer, direction and pending forced-draw count on the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundStateDoc {
    pub current_player_index: usize,
    pub direction: i8,
    pub draw_stack: u8,
}

impl RoundStateDoc {
    pub fn capture(round: &Round) -> RoundStateDoc {
        RoundStateDoc {
            current_player_index: round.current_seat(),
            direction: round.direction().delta(),
            draw_stack: round.draw_stack(),
        }
    }
}

/// The full session document the directory persists and pushes to
/// subscribers. Hands are keyed by external player id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDoc {
    pub version: u64,
    pub players: Vec<String>,
    pub hands: BTreeMap<String, Vec<CardDoc>>,
    pub deck: DeckDoc,
    pub round_state: RoundStateDoc,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}

impl SessionDoc {
    pub fn capture(round: &Round, player_ids: &[String], version: u64) -> SessionDoc {
        let mode = round.config().name.clone();
        let mut hands = BTreeMap::new();
        for (seat, id) in player_ids.iter().enumerate() {
            if let Some(player) = round.player(seat) {
                hands.insert(
                    id.clone(),
                    player.hand().iter().copied().map(CardDoc::from).collect(),
                );
            }
        }
        SessionDoc {
            version,
            players: player_ids.to_vec(),
            hands,
            deck: DeckDoc::capture(round.deck(), &mode),
            round_state: RoundStateDoc::capture(round),
            winner: round.winner().and_then(|seat| player_ids.get(seat).cloned()),
        }
    }

    /// Rebuilds an ongoing round from the document. Ephemeral windows
    /// (force-play offers, challenge windows, uno callout windows) do not
    /// cross the wire and start cleared; custom rule overrides are not part
    /// of the document, so the mode name must resolve in the registry.
    pub fn restore(&self, seed: u64) -> Result<Round, DirectoryError> {
        let config = mode_config(&self.deck.game_mode);
        let deck = self.deck.restore()?;
        let mut players = Vec::with_capacity(self.players.len());
        for (idx, id) in self.players.iter().enumerate() {
            let docs = self
                .hands
                .get(id)
                .ok_or_else(|| SnapshotError::BadSeat(id.clone()))?;
            let mut hand = Vec::with_capacity(docs.len());
            for doc in docs {
                hand.push(Card::try_from(doc.clone()).map_err(DirectoryError::from)?);
            }
            let mut player = Player::new(id.clone(), idx == 0);
            player.give_all(hand);
            players.push(player);
        }
        let direction = Direction::from_delta(self.round_state.direction)
            .ok_or(SnapshotError::BadDirection(self.round_state.direction))?;
        let round = Round::from_parts(
            config,
            players,
            deck,
            self.round_state.current_player_index,
            direction,
            self.round_state.draw_stack,
            seed,
        )?;
        Ok(round)
    }
}
