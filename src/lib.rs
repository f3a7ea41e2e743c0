//! Onu card game engine: rounds, rule modes, session documents and bot experimentation.

pub mod action;
pub mod autoplay;
pub mod bot;
pub mod bots;
pub mod card;
pub mod deck;
pub mod error;
pub mod mode;
pub mod player;
pub mod round;
pub mod rules;
pub mod score;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod visualize;

pub use crate::action::{Mutation, MutationKind, Seat, TurnAction};
pub use crate::autoplay::{Difficulty, PlannedAction, Planner};
pub use crate::bot::Bot;
pub use crate::bots::{GreedyBot, HumanBot, RandomBot, create_bot_from_spec, label_for_spec};
pub use crate::card::{ActionEffect, Card, CardId, Color, Face, SpecialEffect, WildEffect};
pub use crate::deck::{Deck, build_deck};
pub use crate::error::{DirectoryError, IllegalPlay, RoundError, SnapshotError};
pub use crate::mode::{
    CardCounts, MODE_NAMES, ModeConfig, ModeOverrides, Rules, RulesPatch, custom_mode, mode_config,
    reroll_chaos,
};
pub use crate::player::Player;
pub use crate::round::{
    CallOutOutcome, ChallengeOutcome, Direction, DrawOutcome, MAX_PLAYERS, PlayOutcome, Round,
    RoundBuilder, RoundStatus,
};
pub use crate::rules::{is_playable, playable_cards};
pub use crate::score::{card_points, hand_points, winner_points};
pub use crate::session::{MemoryDirectory, SessionDirectory, SessionEvent, SessionId};
pub use crate::snapshot::{CardDoc, DeckDoc, RoundStateDoc, SessionDoc};
pub use crate::state::{RoundView, SeatView};
pub use crate::visualize::{DescribeOptions, VisualOptions, describe_action, render_state};
