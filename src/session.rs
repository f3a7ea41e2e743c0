use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender, channel};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::action::{Mutation, MutationKind, Seat};
use crate::card::CardId;
use crate::error::{DirectoryError, RoundError, SnapshotError};
use crate::mode::{ModeConfig, ModeOverrides, custom_mode, mode_config};
use crate::round::Round;
use crate::snapshot::SessionDoc;

pub type SessionId = u64;

/// Pushed to subscribers after every applied mutation.
#[derive(Clone, Debug)]
pub struct SessionEvent {
    pub session: SessionId,
    pub version: u64,
    pub player: String,
    pub kind: MutationKind,
    pub doc: SessionDoc,
}

/// The room/player directory boundary. The engine owns the rules; the
/// directory owns identity, persistence and change notification.
pub trait SessionDirectory {
    /// Starts a session for the given external player ids, first id hosting.
    fn create_session(
        &mut self,
        mode: &str,
        players: &[String],
    ) -> Result<SessionId, DirectoryError>;

    /// Current full document of a session.
    fn snapshot(&self, session: SessionId) -> Result<SessionDoc, DirectoryError>;

    /// Applies one mutation and returns the resulting document. A `basis`
    /// version that no longer matches is rejected with `VersionConflict`
    /// before the engine is consulted.
    fn apply(
        &mut self,
        session: SessionId,
        mutation: Mutation,
    ) -> Result<SessionDoc, DirectoryError>;

    /// Change feed; every applied mutation is delivered in order.
    fn subscribe(
        &mut self,
        session: SessionId,
    ) -> Result<Receiver<SessionEvent>, DirectoryError>;
}

/// In-memory directory: one process, mutations serialized by construction.
pub struct MemoryDirectory {
    sessions: HashMap<SessionId, Session>,
    next_id: SessionId,
    rng: StdRng,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic directory: every session's shuffle derives from this
    /// seed and the creation order.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self { sessions: HashMap::new(), next_id: 0, rng }
    }

    /// Starts a session from a fully resolved config instead of a registry
    /// name, for custom modes.
    pub fn create_session_with(
        &mut self,
        config: ModeConfig,
        players: &[String],
    ) -> Result<SessionId, DirectoryError> {
        let seed = self.rng.next_u64();
        let round = Round::builder(config, players.to_vec())
            .with_seed(seed)
            .build()?;
        self.create_session_from_round(round, players)
    }

    /// Starts a session from a base mode plus overrides.
    pub fn create_custom_session(
        &mut self,
        base: &str,
        overrides: &ModeOverrides,
        players: &[String],
    ) -> Result<SessionId, DirectoryError> {
        self.create_session_with(custom_mode(base, overrides), players)
    }

    /// Registers an already built round under the given external ids; pairs
    /// with [`Round::builder`]'s deck injection for deterministic sessions.
    pub fn create_session_from_round(
        &mut self,
        round: Round,
        players: &[String],
    ) -> Result<SessionId, DirectoryError> {
        if players.len() != round.players().len() {
            return Err(DirectoryError::InvalidSetup("one external id per seat"));
        }
        let mut unique = players.to_vec();
        unique.sort();
        unique.dedup();
        if unique.len() != players.len() {
            return Err(DirectoryError::InvalidSetup("player ids must be unique"));
        }
        let id = self.next_id;
        self.next_id += 1;
        self.sessions.insert(
            id,
            Session {
                round,
                players: players.to_vec(),
                version: 0,
                subscribers: Vec::new(),
                pending_color: HashMap::new(),
            },
        );
        tracing::debug!(session = id, players = players.len(), "session created");
        Ok(id)
    }

    fn session(&self, id: SessionId) -> Result<&Session, DirectoryError> {
        self.sessions.get(&id).ok_or(DirectoryError::SessionNotFound(id))
    }

    fn session_mut(&mut self, id: SessionId) -> Result<&mut Session, DirectoryError> {
        self.sessions
            .get_mut(&id)
            .ok_or(DirectoryError::SessionNotFound(id))
    }
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionDirectory for MemoryDirectory {
    fn create_session(
        &mut self,
        mode: &str,
        players: &[String],
    ) -> Result<SessionId, DirectoryError> {
        self.create_session_with(mode_config(mode), players)
    }

    fn snapshot(&self, session: SessionId) -> Result<SessionDoc, DirectoryError> {
        let session = self.session(session)?;
        Ok(SessionDoc::capture(
            &session.round,
            &session.players,
            session.version,
        ))
    }

    fn apply(
        &mut self,
        id: SessionId,
        mutation: Mutation,
    ) -> Result<SessionDoc, DirectoryError> {
        let session = self.session_mut(id)?;
        if let Some(basis) = mutation.basis {
            if basis != session.version {
                return Err(DirectoryError::VersionConflict {
                    expected: basis,
                    current: session.version,
                });
            }
        }
        let seat = session.seat_of(&mutation.player)?;
        match &mutation.kind {
            MutationKind::PlayCard { card, chosen_color, swap_with } => {
                let card_id = parse_card_id(card)?;
                let swap_seat = swap_with
                    .as_deref()
                    .map(|target| session.seat_of(target))
                    .transpose()?;
                match session
                    .round
                    .play_card(seat, card_id, *chosen_color, swap_seat)
                {
                    Err(RoundError::MissingColorChoice) => {
                        // Remember the play so a ChooseColor can finish it;
                        // the engine itself stays reject-and-retry.
                        session.pending_color.insert(
                            mutation.player.clone(),
                            PendingColorPlay { card: card_id, swap_with: swap_seat },
                        );
                        return Err(RoundError::MissingColorChoice.into());
                    }
                    other => {
                        other?;
                    }
                }
            }
            MutationKind::DrawCard => {
                session.round.draw_card(seat)?;
            }
            MutationKind::PassAfterDraw => {
                session.round.pass_after_draw(seat)?;
            }
            MutationKind::CallUno => {
                session.round.call_uno(seat)?;
            }
            MutationKind::CallOut { target } => {
                let target = session.seat_of(target)?;
                session.round.call_out(seat, target)?;
            }
            MutationKind::ChooseColor { color } => {
                let pending = session
                    .pending_color
                    .remove(&mutation.player)
                    .ok_or(DirectoryError::NoPendingPlay)?;
                session
                    .round
                    .play_card(seat, pending.card, Some(*color), pending.swap_with)?;
            }
            MutationKind::ChallengeDrawFour => {
                session.round.challenge_draw_four(seat)?;
            }
        }
        session.version += 1;
        let doc = SessionDoc::capture(&session.round, &session.players, session.version);
        session.broadcast(SessionEvent {
            session: id,
            version: session.version,
            player: mutation.player,
            kind: mutation.kind,
            doc: doc.clone(),
        });
        Ok(doc)
    }

    fn subscribe(
        &mut self,
        session: SessionId,
    ) -> Result<Receiver<SessionEvent>, DirectoryError> {
        let session = self.session_mut(session)?;
        let (sender, receiver) = channel();
        session.subscribers.push(sender);
        Ok(receiver)
    }
}

struct Session {
    round: Round,
    players: Vec<String>,
    version: u64,
    subscribers: Vec<Sender<SessionEvent>>,
    pending_color: HashMap<String, PendingColorPlay>,
}

impl Session {
    fn seat_of(&self, player: &str) -> Result<Seat, DirectoryError> {
        self.players
            .iter()
            .position(|id| id == player)
            .ok_or_else(|| DirectoryError::UnknownPlayer(player.to_string()))
    }

    fn broadcast(&mut self, event: SessionEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }
}

/// A play rejected for a missing color choice, kept so ChooseColor can
/// replay it.
struct PendingColorPlay {
    card: CardId,
    swap_with: Option<Seat>,
}

fn parse_card_id(card: &str) -> Result<CardId, DirectoryError> {
    card.parse::<u32>()
        .map(CardId)
        .map_err(|_| SnapshotError::BadCardId(card.to_string()).into())
}
