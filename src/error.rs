use thiserror::Error;

use crate::action::Seat;
use crate::card::Color;

/// Errors that can occur when driving a round. Every variant is a local,
/// synchronous rejection; the round state is left untouched.
#[derive(Debug, Error)]
pub enum RoundError {
    #[error("seat index {0} is out of range")]
    InvalidSeat(Seat),
    #[error("not the specified player's turn")]
    NotPlayersTurn,
    #[error("illegal play: {0}")]
    IllegalPlay(#[from] IllegalPlay),
    #[error("a color choice is required to play this card")]
    MissingColorChoice,
    #[error("a swap target is required to play this card")]
    MissingSwapTarget,
    #[error("round is already over")]
    RoundOver,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Details of rejected plays.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IllegalPlay {
    #[error("card is not in the player's hand")]
    NotInHand,
    #[error("card matches neither the active color {current} nor the top card")]
    NoMatch { current: Color },
    #[error("an out-of-turn play must be the identical card")]
    JumpInMismatch,
    #[error("a forced draw of {pending} cards is pending")]
    PendingDraw { pending: u8 },
    #[error("no wild-draw-four is pending against this seat")]
    NoChallengePending,
    #[error("swap target must be another seated player")]
    BadSwapTarget,
    #[error("only the just-drawn card may be played now")]
    OnlyDrawnCard,
    #[error("no drawn card is awaiting a decision")]
    NoDrawnCardPending,
}

/// Errors raised at the session directory boundary.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("session {0} not found")]
    SessionNotFound(u64),
    #[error("player {0:?} is not part of this session")]
    UnknownPlayer(String),
    #[error("session moved on: expected version {expected}, now at {current}")]
    VersionConflict { expected: u64, current: u64 },
    #[error("no play is awaiting a color choice")]
    NoPendingPlay,
    #[error(transparent)]
    Round(#[from] RoundError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("invalid session setup: {0}")]
    InvalidSetup(&'static str),
}

/// Field-level failures when decoding wire documents.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("card id {0:?} is not numeric")]
    BadCardId(String),
    #[error("unknown card type {0:?}")]
    BadCardKind(String),
    #[error("unknown color {0:?}")]
    BadColor(String),
    #[error("value {value:?} is not valid for a {kind} card")]
    BadValue { kind: &'static str, value: String },
    #[error("color {color:?} is not valid for a {kind} card")]
    BadCardColor { kind: &'static str, color: String },
    #[error("direction must be 1 or -1, got {0}")]
    BadDirection(i8),
    #[error("unknown seat name {0:?}")]
    BadSeat(String),
}
