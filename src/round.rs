use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::action::{Seat, TurnAction};
use crate::card::{ActionEffect, Card, CardId, Color, Face, SpecialEffect, WildEffect};
use crate::deck::{Deck, build_deck};
use crate::error::{IllegalPlay, RoundError};
use crate::mode::ModeConfig;
use crate::player::Player;
use crate::rules::{is_playable, playable_cards};
use crate::state::{RoundView, SeatView};

pub const MAX_PLAYERS: usize = 10;

const DEFAULT_SEED: u64 = 0xCAFE_D00D_CAFE_D00D;

const COLOR_CHOICES: [Option<Color>; 4] = [
    Some(Color::Red),
    Some(Color::Blue),
    Some(Color::Green),
    Some(Color::Yellow),
];

/// Play order through the seats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    #[inline]
    pub fn flipped(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Wire encoding: +1 forward, -1 backward.
    #[inline]
    pub fn delta(self) -> i8 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    pub fn from_delta(delta: i8) -> Option<Direction> {
        match delta {
            1 => Some(Direction::Forward),
            -1 => Some(Direction::Backward),
            _ => None,
        }
    }
}

/// Status of the round.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum RoundStatus {
    Ongoing,
    Finished { winner: Seat },
}

/// Result of a successful play.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PlayOutcome {
    pub winner: Option<Seat>,
    pub jumped_in: bool,
}

/// Result of a draw. An exhausted deck is an outcome, never an error.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DrawOutcome {
    pub cards_drawn: u8,
    pub deck_exhausted: bool,
    /// Card the engine offers for immediate play under force-play.
    pub offered: Option<CardId>,
}

/// Result of an uno callout. A wrong accusation changes nothing.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CallOutOutcome {
    Penalized { cards_drawn: u8 },
    Unfounded,
}

/// Result of challenging a wild-draw-four.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ChallengeOutcome {
    /// The wild was a bluff; its player drew the pending cards and the
    /// challenger keeps the turn.
    BluffExposed { cards_drawn: u8 },
    /// The wild was honest; the challenger drew the pending cards plus two
    /// and lost the turn.
    Honest { cards_drawn: u8 },
}

/// Builder that enables deterministic deck injection for tests and bots.
pub struct RoundBuilder {
    config: ModeConfig,
    names: Vec<String>,
    seed: u64,
    deck: Option<Vec<Card>>,
}

impl RoundBuilder {
    pub fn new(config: ModeConfig, names: Vec<String>) -> Self {
        Self { config, names, seed: DEFAULT_SEED, deck: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Injects a prearranged draw pile, top at the end. It is dealt as-is,
    /// without shuffling.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn build(self) -> Result<Round, RoundError> {
        Round::from_builder(self)
    }
}

/// State machine for one round: hands, piles, turn pointer, pending
/// obligations. All mutations are synchronous and either apply fully or
/// reject with a typed error leaving the state untouched.
pub struct Round {
    config: ModeConfig,
    status: RoundStatus,
    players: Vec<Player>,
    deck: Deck,
    current: Seat,
    direction: Direction,
    draw_stack: u8,
    pending_challenge: Option<PendingChallenge>,
    /// Drawn card awaiting a play-or-pass decision under force-play.
    pending_play: Option<(Seat, CardId)>,
    /// Bumped on every applied mutation; lets planned bot decisions detect
    /// staleness.
    generation: u64,
    rng: StdRng,
}

impl Round {
    pub fn builder(config: ModeConfig, names: Vec<String>) -> RoundBuilder {
        RoundBuilder::new(config, names)
    }

    fn from_builder(builder: RoundBuilder) -> Result<Self, RoundError> {
        let RoundBuilder { mut config, names, seed, deck } = builder;
        if !(2..=MAX_PLAYERS).contains(&names.len()) {
            return Err(RoundError::InvalidConfiguration(
                "players must be between 2 and 10",
            ));
        }
        if config.initial_cards == 0 {
            return Err(RoundError::InvalidConfiguration(
                "initial hand must not be empty",
            ));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        crate::mode::reroll_chaos(&mut config, &mut rng);
        let cards = match deck {
            Some(cards) => cards,
            None => {
                let mut cards = build_deck(&config, &mut rng);
                cards.shuffle(&mut rng);
                cards
            }
        };
        let required = names.len() * config.initial_cards as usize + 1;
        if cards.len() < required {
            return Err(RoundError::InvalidConfiguration(
                "deck too small for the configured deal",
            ));
        }

        let mut deck = Deck::new(cards);
        let hands = deck.deal(names.len(), config.initial_cards as usize);
        let mut players: Vec<Player> = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| Player::new(name, idx == 0))
            .collect();
        for (player, hand) in players.iter_mut().zip(hands) {
            player.give_all(hand);
        }
        deck.flip_start(&mut rng);

        let mut round = Round {
            config,
            status: RoundStatus::Ongoing,
            players,
            deck,
            current: 0,
            direction: Direction::Forward,
            draw_stack: 0,
            pending_challenge: None,
            pending_play: None,
            generation: 0,
            rng,
        };
        tracing::debug!(
            mode = round.config.name.as_str(),
            players = round.players.len(),
            "round started"
        );
        round.on_turn_start();
        Ok(round)
    }

    /// Rebuilds a round from snapshot parts. Pending force-play offers and
    /// challenge windows do not cross the wire and start cleared.
    pub fn from_parts(
        config: ModeConfig,
        players: Vec<Player>,
        deck: Deck,
        current: Seat,
        direction: Direction,
        draw_stack: u8,
        seed: u64,
    ) -> Result<Self, RoundError> {
        if !(2..=MAX_PLAYERS).contains(&players.len()) {
            return Err(RoundError::InvalidConfiguration(
                "players must be between 2 and 10",
            ));
        }
        if current >= players.len() {
            return Err(RoundError::InvalidSeat(current));
        }
        Ok(Round {
            config,
            status: RoundStatus::Ongoing,
            players,
            deck,
            current,
            direction,
            draw_stack,
            pending_challenge: None,
            pending_play: None,
            generation: 0,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> &ModeConfig {
        &self.config
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, RoundStatus::Finished { .. })
    }

    pub fn winner(&self) -> Option<Seat> {
        match self.status {
            RoundStatus::Finished { winner } => Some(winner),
            RoundStatus::Ongoing => None,
        }
    }

    pub fn current_seat(&self) -> Seat {
        self.current
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn draw_stack(&self) -> u8 {
        self.draw_stack
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: Seat) -> Option<&Player> {
        self.players.get(seat)
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Card id offered for immediate play after a force-play draw.
    pub fn offered_card(&self) -> Option<(Seat, CardId)> {
        self.pending_play
    }

    pub fn challenge_open(&self) -> bool {
        self.pending_challenge.is_some()
    }

    /// Snapshot of the round as one seat is allowed to see it.
    pub fn view(&self, perspective: Seat) -> Result<RoundView, RoundError> {
        self.ensure_seat(perspective)?;
        let seats = self
            .players
            .iter()
            .enumerate()
            .map(|(idx, player)| SeatView {
                seat: idx,
                name: player.name.clone(),
                cards: player.hand_len(),
                called_uno: player.called_uno(),
                is_current: idx == self.current,
                is_host: player.is_host,
            })
            .collect();
        Ok(RoundView {
            mode: self.config.name.clone(),
            rules: self.config.rules,
            status: self.status,
            self_seat: perspective,
            current_seat: self.current,
            direction: self.direction,
            current_color: self.deck.current_color(),
            top_card: self.deck.top_discard().copied(),
            draw_stack: self.draw_stack,
            draw_pile_count: self.deck.draw_len(),
            discard_pile_count: self.deck.discard_len(),
            can_challenge: self.pending_challenge.is_some() && perspective == self.current,
            offered_card: self
                .pending_play
                .and_then(|(seat, id)| (seat == perspective).then_some(id)),
            turn_time_secs: self.config.turn_time_secs,
            seats,
            hand: self.players[perspective].hand().to_vec(),
        })
    }

    /// Everything `seat` may do right now, as concrete actions. An empty
    /// list means the round is over or the seat can only wait.
    pub fn legal_actions(&self, seat: Seat) -> Result<Vec<TurnAction>, RoundError> {
        if self.is_finished() {
            return Ok(Vec::new());
        }
        self.ensure_seat(seat)?;
        let mut actions = Vec::new();
        let player = &self.players[seat];
        let top = self.deck.top_discard().copied();
        let color = self.deck.current_color();

        // Declarations and callouts are not bound to the turn pointer.
        if player.hand_len() <= 2 && !player.called_uno() {
            actions.push(TurnAction::CallUno);
        }
        for (idx, other) in self.players.iter().enumerate() {
            if idx != seat
                && other.uno_window_open()
                && other.hand_len() == 1
                && !other.called_uno()
            {
                actions.push(TurnAction::CallOut { target: idx });
            }
        }

        if seat != self.current {
            if self.config.rules.jump_in {
                if let Some(top) = top {
                    for card in player.hand() {
                        if card.same_printed_card(&top) {
                            self.push_play_variants(&mut actions, seat, card);
                        }
                    }
                }
            }
            return Ok(actions);
        }

        if let Some((offer_seat, offered)) = self.pending_play {
            if offer_seat == seat {
                if let Some(card) = player.card(offered) {
                    self.push_play_variants(&mut actions, seat, card);
                }
                actions.push(TurnAction::PassAfterDraw);
                return Ok(actions);
            }
        }

        if self.pending_challenge.is_some() {
            actions.push(TurnAction::Challenge);
        }
        actions.push(TurnAction::Draw);
        for card in player.hand() {
            let legal = match top {
                Some(top) => is_playable(card, &top, color),
                None => true,
            };
            if !legal {
                continue;
            }
            if self.draw_stack > 0 && !self.answers_pending_draw(card) {
                continue;
            }
            self.push_play_variants(&mut actions, seat, card);
        }
        Ok(actions)
    }

    /// Dispatches a turn action to the matching operation.
    pub fn apply(&mut self, seat: Seat, action: TurnAction) -> Result<(), RoundError> {
        match action {
            TurnAction::Play { card, chosen_color, swap_with } => self
                .play_card(seat, card, chosen_color, swap_with)
                .map(|_| ()),
            TurnAction::Draw => self.draw_card(seat).map(|_| ()),
            TurnAction::PassAfterDraw => self.pass_after_draw(seat),
            TurnAction::CallUno => self.call_uno(seat).map(|_| ()),
            TurnAction::CallOut { target } => self.call_out(seat, target).map(|_| ()),
            TurnAction::Challenge => self.challenge_draw_four(seat).map(|_| ()),
        }
    }

    /// Plays a card from `seat`'s hand. Out-of-turn calls are accepted only
    /// as jump-ins of the identical printed card. Colorless cards need
    /// `chosen`, swap effects need `swap_with`.
    pub fn play_card(
        &mut self,
        seat: Seat,
        card_id: CardId,
        chosen: Option<Color>,
        swap_with: Option<Seat>,
    ) -> Result<PlayOutcome, RoundError> {
        self.ensure_ongoing()?;
        self.ensure_seat(seat)?;
        let jumped_in = seat != self.current;
        if jumped_in && !self.config.rules.jump_in {
            return Err(RoundError::NotPlayersTurn);
        }
        let card = *self
            .players[seat]
            .card(card_id)
            .ok_or(IllegalPlay::NotInHand)?;
        let top = self.deck.top_discard().copied();

        if matches!(card.face, Face::Legendary) {
            // Bypasses legality and effects outright.
            if let Some(card) = self.players[seat].take_card(card_id) {
                self.deck.play(card);
            }
            self.finish(seat);
            return Ok(PlayOutcome { winner: Some(seat), jumped_in });
        }

        if jumped_in {
            match top {
                Some(top) if card.same_printed_card(&top) => {}
                _ => return Err(IllegalPlay::JumpInMismatch.into()),
            }
        } else {
            if let Some((offer_seat, offered)) = self.pending_play {
                if offer_seat == seat && offered != card_id {
                    return Err(IllegalPlay::OnlyDrawnCard.into());
                }
            }
            if self.draw_stack > 0 && !self.answers_pending_draw(&card) {
                return Err(IllegalPlay::PendingDraw { pending: self.draw_stack }.into());
            }
            if let Some(top) = top {
                if !is_playable(&card, &top, self.deck.current_color()) {
                    return Err(IllegalPlay::NoMatch {
                        current: self.deck.current_color(),
                    }
                    .into());
                }
            }
        }

        if card.requires_color_choice() && chosen.is_none() {
            return Err(RoundError::MissingColorChoice);
        }
        if self.needs_swap_target(&card) {
            match swap_with {
                None => return Err(RoundError::MissingSwapTarget),
                Some(target) if target == seat || target >= self.players.len() => {
                    return Err(IllegalPlay::BadSwapTarget.into());
                }
                Some(_) => {}
            }
        }

        let mut played = self
            .players[seat]
            .take_card(card_id)
            .ok_or(IllegalPlay::NotInHand)?;
        if let Some(color) = chosen {
            played.set_chosen_color(color);
        }
        let prior_color = self.deck.current_color();
        self.deck.play(played);
        self.pending_play = None;
        self.pending_challenge = None;
        if jumped_in {
            self.current = seat;
        }
        self.generation += 1;

        // Win is checked before the effect resolves: an emptied hand ends
        // the round and any pending obligations die with it.
        if self.players[seat].has_empty_hand() {
            self.finish(seat);
            return Ok(PlayOutcome { winner: Some(seat), jumped_in });
        }
        if self.players[seat].hand_len() == 1 && !self.players[seat].called_uno() {
            self.players[seat].open_uno_window();
        }
        self.resolve_effect(seat, &played, prior_color, swap_with);
        Ok(PlayOutcome { winner: self.winner(), jumped_in })
    }

    /// Draws for the acting seat: the whole pending stack if one exists,
    /// otherwise one card. A dry deck yields an empty draw and the turn
    /// passes.
    pub fn draw_card(&mut self, seat: Seat) -> Result<DrawOutcome, RoundError> {
        self.ensure_ongoing()?;
        self.ensure_seat(seat)?;
        if seat != self.current {
            return Err(RoundError::NotPlayersTurn);
        }
        if self.pending_play.is_some() {
            return Err(IllegalPlay::OnlyDrawnCard.into());
        }
        self.generation += 1;

        if self.draw_stack > 0 {
            let amount = std::mem::take(&mut self.draw_stack);
            self.pending_challenge = None;
            let (cards_drawn, deck_exhausted) = self.forced_draw(seat, amount);
            self.advance(1);
            return Ok(DrawOutcome { cards_drawn, deck_exhausted, offered: None });
        }

        match self.deck.draw(&mut self.rng) {
            None => {
                self.advance(1);
                Ok(DrawOutcome { cards_drawn: 0, deck_exhausted: true, offered: None })
            }
            Some(card) => {
                let id = card.id;
                let playable = self.card_playable(&card);
                self.players[seat].give(card);
                if playable && self.config.rules.force_play {
                    self.pending_play = Some((seat, id));
                    Ok(DrawOutcome { cards_drawn: 1, deck_exhausted: false, offered: Some(id) })
                } else {
                    self.advance(1);
                    Ok(DrawOutcome { cards_drawn: 1, deck_exhausted: false, offered: None })
                }
            }
        }
    }

    /// Declines the force-play offer and ends the turn.
    pub fn pass_after_draw(&mut self, seat: Seat) -> Result<(), RoundError> {
        self.ensure_ongoing()?;
        self.ensure_seat(seat)?;
        match self.pending_play {
            Some((offer_seat, _)) if offer_seat == seat => {
                self.pending_play = None;
                self.generation += 1;
                self.advance(1);
                Ok(())
            }
            _ => Err(IllegalPlay::NoDrawnCardPending.into()),
        }
    }

    /// Registers an uno declaration. Returns whether it was accepted; a
    /// declaration only registers while the hand holds at most two cards.
    pub fn call_uno(&mut self, seat: Seat) -> Result<bool, RoundError> {
        self.ensure_ongoing()?;
        self.ensure_seat(seat)?;
        let player = &mut self.players[seat];
        if player.hand_len() <= 2 && !player.called_uno() {
            player.call_uno();
            self.generation += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Accuses `target` of a missed uno declaration. Works from any seat,
    /// at any point before the target's next turn.
    pub fn call_out(&mut self, accuser: Seat, target: Seat) -> Result<CallOutOutcome, RoundError> {
        self.ensure_ongoing()?;
        self.ensure_seat(accuser)?;
        self.ensure_seat(target)?;
        let exposed = accuser != target
            && self.players[target].uno_window_open()
            && self.players[target].hand_len() == 1
            && !self.players[target].called_uno();
        if !exposed {
            return Ok(CallOutOutcome::Unfounded);
        }
        let penalty = self.config.uno_penalty;
        let (cards_drawn, _) = self.forced_draw(target, penalty);
        self.players[target].close_uno_window();
        self.generation += 1;
        Ok(CallOutOutcome::Penalized { cards_drawn })
    }

    /// Challenges the wild-draw-four pending against the acting seat.
    pub fn challenge_draw_four(&mut self, seat: Seat) -> Result<ChallengeOutcome, RoundError> {
        self.ensure_ongoing()?;
        self.ensure_seat(seat)?;
        if seat != self.current {
            return Err(RoundError::NotPlayersTurn);
        }
        let pending = self
            .pending_challenge
            .take()
            .ok_or(IllegalPlay::NoChallengePending)?;
        self.generation += 1;
        let stake = std::mem::take(&mut self.draw_stack);
        if pending.bluff {
            let (cards_drawn, _) = self.forced_draw(pending.by, stake);
            self.on_turn_start();
            Ok(ChallengeOutcome::BluffExposed { cards_drawn })
        } else {
            let (cards_drawn, _) = self.forced_draw(seat, stake.saturating_add(2));
            self.advance(1);
            Ok(ChallengeOutcome::Honest { cards_drawn })
        }
    }

    fn ensure_ongoing(&self) -> Result<(), RoundError> {
        match self.status {
            RoundStatus::Ongoing => Ok(()),
            RoundStatus::Finished { .. } => Err(RoundError::RoundOver),
        }
    }

    fn ensure_seat(&self, seat: Seat) -> Result<(), RoundError> {
        if seat < self.players.len() {
            Ok(())
        } else {
            Err(RoundError::InvalidSeat(seat))
        }
    }

    fn finish(&mut self, winner: Seat) {
        self.status = RoundStatus::Finished { winner };
        self.draw_stack = 0;
        self.pending_challenge = None;
        self.pending_play = None;
        self.generation += 1;
        tracing::debug!(winner, "round finished");
    }

    fn seat_after(&self, seat: Seat, steps: usize) -> Seat {
        let n = self.players.len() as isize;
        let delta = self.direction.delta() as isize * steps as isize;
        (((seat as isize + delta) % n + n) % n) as usize
    }

    fn advance(&mut self, steps: usize) {
        self.current = self.seat_after(self.current, steps);
        self.on_turn_start();
    }

    /// Housekeeping when the turn pointer lands on a seat: their callout
    /// window closes, and under auto-draw a blocked seat draws (and may
    /// pass) without an explicit action.
    fn on_turn_start(&mut self) {
        if self.is_finished() {
            return;
        }
        self.players[self.current].close_uno_window();
        if !self.config.rules.auto_draw_card {
            return;
        }
        if self.draw_stack > 0 || self.pending_challenge.is_some() || self.pending_play.is_some() {
            return;
        }
        let mut idle_advances = 0;
        while idle_advances <= self.players.len() {
            let seat = self.current;
            if self.has_playable(seat) {
                return;
            }
            if let Some(card) = self.deck.draw(&mut self.rng) {
                idle_advances = 0;
                let id = card.id;
                let playable = self.card_playable(&card);
                self.players[seat].give(card);
                self.generation += 1;
                if playable {
                    if self.config.rules.force_play {
                        self.pending_play = Some((seat, id));
                    }
                    return;
                }
            }
            self.current = self.seat_after(self.current, 1);
            self.players[self.current].close_uno_window();
            idle_advances += 1;
        }
    }

    fn has_playable(&self, seat: Seat) -> bool {
        match self.deck.top_discard() {
            Some(top) => !playable_cards(
                self.players[seat].hand(),
                top,
                self.deck.current_color(),
            )
            .is_empty(),
            None => !self.players[seat].has_empty_hand(),
        }
    }

    fn card_playable(&self, card: &Card) -> bool {
        match self.deck.top_discard() {
            Some(top) => is_playable(card, top, self.deck.current_color()),
            None => true,
        }
    }

    fn needs_swap_target(&self, card: &Card) -> bool {
        match card.face {
            Face::Number { digit: 7, .. } => self.config.rules.seven_trade,
            Face::Special {
                effect: SpecialEffect::SwapHands | SpecialEffect::WildSwap,
                ..
            } => true,
            _ => false,
        }
    }

    // A pending chain only grows under stacking; without it a shield is
    // the sole card that answers, leaving drawing or challenging.
    fn answers_pending_draw(&self, card: &Card) -> bool {
        if matches!(card.face, Face::Special { effect: SpecialEffect::Shield, .. }) {
            return true;
        }
        self.config.rules.stacking && card.is_draw_answer()
    }

    fn push_play_variants(&self, actions: &mut Vec<TurnAction>, seat: Seat, card: &Card) {
        let id = card.id;
        let colors: &[Option<Color>] = if card.requires_color_choice() {
            &COLOR_CHOICES
        } else {
            &[None]
        };
        let targets: Vec<Option<Seat>> = if self.needs_swap_target(card) {
            (0..self.players.len())
                .filter(|&target| target != seat)
                .map(Some)
                .collect()
        } else {
            vec![None]
        };
        for &chosen_color in colors {
            for &swap_with in &targets {
                actions.push(TurnAction::Play { card: id, chosen_color, swap_with });
            }
        }
    }

    /// Gives `amount` cards to `seat`, stopping early on a dry deck.
    fn forced_draw(&mut self, seat: Seat, amount: u8) -> (u8, bool) {
        let mut drawn = 0;
        for _ in 0..amount {
            match self.deck.draw(&mut self.rng) {
                Some(card) => {
                    self.players[seat].give(card);
                    drawn += 1;
                }
                None => return (drawn, true),
            }
        }
        (drawn, false)
    }

    fn hand_has_color(&self, seat: Seat, color: Color) -> bool {
        self.players[seat]
            .hand()
            .iter()
            .any(|card| card.color() == Some(color))
    }

    fn swap_hands(&mut self, a: Seat, b: Seat) {
        let hand_a = self.players[a].take_hand();
        let hand_b = self.players[b].take_hand();
        self.players[a].give_all(hand_b);
        self.players[b].give_all(hand_a);
    }

    /// Every hand moves one seat along the current direction.
    fn rotate_hands(&mut self) {
        let hands: Vec<Vec<Card>> = self
            .players
            .iter_mut()
            .map(|player| player.take_hand())
            .collect();
        for (seat, hand) in hands.into_iter().enumerate() {
            let to = self.seat_after(seat, 1);
            self.players[to].give_all(hand);
        }
    }

    /// Draw2 or wild-draw-four resolution at play time: accumulate under
    /// stacking, otherwise the next player draws now and is skipped.
    fn chain_or_draw(&mut self, seat: Seat, amount: u8) {
        if self.config.rules.stacking {
            self.draw_stack = self.draw_stack.saturating_add(amount);
            self.advance(1);
        } else {
            let victim = self.seat_after(self.current, 1);
            self.forced_draw(victim, amount);
            if self.config.rules.mirror_effects {
                self.forced_draw(seat, amount);
            }
            self.advance(2);
        }
    }

    fn resolve_effect(
        &mut self,
        seat: Seat,
        card: &Card,
        prior_color: Color,
        swap_with: Option<Seat>,
    ) {
        match card.face {
            Face::Number { digit: 7, .. } if self.config.rules.seven_trade => {
                if let Some(target) = swap_with {
                    self.swap_hands(seat, target);
                }
                self.advance(1);
            }
            Face::Number { digit: 0, .. } if self.config.rules.zero_rotate => {
                self.rotate_hands();
                self.advance(1);
            }
            Face::Number { .. } => self.advance(1),
            Face::Action { effect: ActionEffect::Skip, .. } => self.advance(2),
            Face::Action { effect: ActionEffect::Reverse, .. } => {
                self.direction = self.direction.flipped();
                // Heads-up, reverse acts as a skip.
                if self.players.len() == 2 {
                    self.advance(2);
                } else {
                    self.advance(1);
                }
            }
            Face::Action { effect: ActionEffect::DrawTwo, .. } => self.chain_or_draw(seat, 2),
            Face::Wild { effect: WildEffect::Recolor, .. } => self.advance(1),
            Face::Wild { effect: WildEffect::DrawFour, .. } => {
                if self.config.rules.challenges {
                    let bluff = self.hand_has_color(seat, prior_color);
                    self.pending_challenge = Some(PendingChallenge { by: seat, bluff });
                    self.draw_stack = self.draw_stack.saturating_add(4);
                    self.advance(1);
                } else {
                    self.chain_or_draw(seat, 4);
                }
            }
            Face::Special { effect, .. } => self.resolve_special(seat, effect, swap_with),
            Face::Legendary => {}
        }
    }

    fn resolve_special(&mut self, seat: Seat, effect: SpecialEffect, swap_with: Option<Seat>) {
        match effect {
            SpecialEffect::SwapHands | SpecialEffect::WildSwap => {
                if let Some(target) = swap_with {
                    self.swap_hands(seat, target);
                }
                self.advance(1);
            }
            SpecialEffect::DrawUntil => {
                let victim = self.seat_after(self.current, 1);
                let want = self.deck.current_color();
                loop {
                    match self.deck.draw(&mut self.rng) {
                        Some(card) => {
                            let matched = card.color() == Some(want);
                            self.players[victim].give(card);
                            if matched {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                self.advance(2);
            }
            SpecialEffect::DoubleTurn | SpecialEffect::SkipAll => {
                // The actor goes again; skip-all only differs in flavor.
                self.on_turn_start();
            }
            SpecialEffect::Command => self.advance(2),
            SpecialEffect::Shield => {
                self.draw_stack = 0;
                self.pending_challenge = None;
                self.advance(1);
            }
            SpecialEffect::DrawSix => {
                let victim = self.seat_after(self.current, 1);
                self.forced_draw(victim, 6);
                if self.config.rules.mirror_effects {
                    self.forced_draw(seat, 6);
                }
                self.advance(2);
            }
            SpecialEffect::Challenge => {
                let victim = self.seat_after(self.current, 1);
                let amount = if self.draw_stack > 0 {
                    std::mem::take(&mut self.draw_stack)
                } else {
                    2
                };
                self.pending_challenge = None;
                self.forced_draw(victim, amount);
                self.advance(2);
            }
        }
    }
}

/// A wild-draw-four whose victim may still challenge. `bluff` records
/// whether the player still held a card of the prior color when playing it.
#[derive(Copy, Clone, Debug)]
struct PendingChallenge {
    by: Seat,
    bluff: bool,
}

