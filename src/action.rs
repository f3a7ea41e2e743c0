use serde::{Deserialize, Serialize};

use crate::card::{CardId, Color};

/// Zero-based seat index within a round.
pub type Seat = usize;

/// Action available to a seated player, expressed against engine state.
/// This is the surface bots and the simulator drive; clients go through
/// [`Mutation`] instead.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TurnAction {
    /// Play a card from the hand, with the color choice colorless cards
    /// need and the opponent choice swap effects need.
    Play {
        card: CardId,
        chosen_color: Option<Color>,
        swap_with: Option<Seat>,
    },
    /// Draw from the pile: one card, or the whole pending stack.
    Draw,
    /// Decline to play a just-drawn playable card.
    PassAfterDraw,
    /// Declare uno while going down to one card.
    CallUno,
    /// Accuse a player of missing their uno declaration.
    CallOut { target: Seat },
    /// Challenge the wild-draw-four that is pending against this seat.
    Challenge,
}

impl TurnAction {
    /// The played card id, when the action is a play.
    pub fn card(&self) -> Option<CardId> {
        match self {
            TurnAction::Play { card, .. } => Some(*card),
            _ => None,
        }
    }
}

/// One state change requested through the session boundary. `player` is
/// the external player id, mapped to a seat by the directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mutation {
    pub player: String,
    /// Session version this request was computed against. `None` skips the
    /// conflict check (last writer wins).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basis: Option<u64>,
    #[serde(flatten)]
    pub kind: MutationKind,
}

/// Wire-facing mutation payloads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MutationKind {
    #[serde(rename_all = "camelCase")]
    PlayCard {
        card: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        chosen_color: Option<Color>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        swap_with: Option<String>,
    },
    DrawCard,
    PassAfterDraw,
    CallUno,
    #[serde(rename_all = "camelCase")]
    CallOut { target: String },
    #[serde(rename_all = "camelCase")]
    ChooseColor { color: Color },
    ChallengeDrawFour,
}
