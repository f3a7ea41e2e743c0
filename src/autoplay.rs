use std::time::{Duration, Instant};

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::action::{Seat, TurnAction};
use crate::bot::Bot;
use crate::error::RoundError;
use crate::round::Round;

/// How long a bot pretends to think before its move becomes visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    fn base_delay(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(2_000),
            Difficulty::Normal => Duration::from_millis(1_400),
            Difficulty::Hard => Duration::from_millis(800),
        }
    }
}

/// A decision that has been made but is not yet due for presentation.
#[derive(Clone, Copy, Debug)]
pub struct PlannedAction {
    pub seat: Seat,
    pub action: TurnAction,
    pub due: Instant,
    generation: u64,
}

/// Plans bot moves ahead of time and releases them on a think delay.
///
/// The decision is computed synchronously at plan time; the delay is pure
/// presentation. A planned move carries the round generation it was based
/// on and goes stale the moment anything else mutates the round, so a
/// jump-in or callout landing during the "thinking" pause silently voids
/// the scheduled move. The planner never touches the clock itself; the
/// caller passes `Instant::now()` in.
pub struct Planner {
    difficulty: Difficulty,
    rng: StdRng,
    pending: Option<PlannedAction>,
}

impl Planner {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, StdRng::from_entropy())
    }

    /// Deterministic planner for tests and replays.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(difficulty, StdRng::seed_from_u64(seed))
    }

    fn with_rng(difficulty: Difficulty, rng: StdRng) -> Self {
        Self {
            difficulty,
            rng,
            pending: None,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn pending(&self) -> Option<&PlannedAction> {
        self.pending.as_ref()
    }

    /// Decides the current seat's move now and schedules it for later.
    /// Replaces any previous plan. Returns `None` when the round is over
    /// or the seat has nothing legal to schedule.
    pub fn plan(
        &mut self,
        round: &Round,
        bot: &mut dyn Bot,
        now: Instant,
    ) -> Result<Option<PlannedAction>, RoundError> {
        self.pending = None;
        if round.is_finished() {
            return Ok(None);
        }
        let seat = round.current_seat();
        let legal = round.legal_actions(seat)?;
        if legal.is_empty() {
            return Ok(None);
        }
        let view = round.view(seat)?;
        let action = bot.select_action(&view, &legal);
        let jitter = self.rng.gen_range(0.75..1.25);
        let planned = PlannedAction {
            seat,
            action,
            due: now + self.difficulty.base_delay().mul_f64(jitter),
            generation: round.generation(),
        };
        self.pending = Some(planned);
        Ok(Some(planned))
    }

    /// Releases the planned move once due, provided the round has not moved
    /// on underneath it. A stale plan is dropped instead of returned.
    pub fn poll(&mut self, round: &Round, now: Instant) -> Option<(Seat, TurnAction)> {
        let planned = self.pending?;
        if round.is_finished()
            || round.generation() != planned.generation
            || round.current_seat() != planned.seat
        {
            self.pending = None;
            return None;
        }
        if now < planned.due {
            return None;
        }
        self.pending = None;
        Some((planned.seat, planned.action))
    }

    /// Drops the planned move without releasing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::mode_config;
    use crate::round::Round;

    fn two_player_round() -> Round {
        Round::builder(
            mode_config("normal"),
            vec![String::from("a"), String::from("b")],
        )
        .with_seed(11)
        .build()
        .expect("round")
    }

    #[test]
    fn planned_move_waits_for_its_due_time() {
        let mut round = two_player_round();
        let mut bot = crate::GreedyBot::default();
        let mut planner = Planner::with_seed(Difficulty::Hard, 7);
        let start = Instant::now();
        let planned = planner
            .plan(&round, &mut bot, start)
            .expect("plan")
            .expect("ongoing round must yield a plan");
        assert_eq!(planned.seat, round.current_seat());
        assert!(planner.poll(&round, start).is_none());
        let (seat, action) = planner
            .poll(&round, planned.due)
            .expect("due plan must release");
        assert_eq!(seat, planned.seat);
        round.apply(seat, action).expect("planned action is legal");
    }

    #[test]
    fn plan_goes_stale_when_the_round_moves_on() {
        let mut round = two_player_round();
        let mut bot = crate::GreedyBot::default();
        let mut planner = Planner::with_seed(Difficulty::Hard, 7);
        let start = Instant::now();
        let planned = planner
            .plan(&round, &mut bot, start)
            .expect("plan")
            .expect("plan exists");
        // Apply some other legal action first; the plan must not fire.
        let seat = round.current_seat();
        let legal = round.legal_actions(seat).expect("legal actions");
        round.apply(seat, legal[0]).expect("apply");
        assert!(planner.poll(&round, planned.due).is_none());
        assert!(planner.pending().is_none());
    }

    #[test]
    fn cancel_discards_the_plan() {
        let round = two_player_round();
        let mut bot = crate::GreedyBot::default();
        let mut planner = Planner::with_seed(Difficulty::Easy, 7);
        let start = Instant::now();
        let planned = planner
            .plan(&round, &mut bot, start)
            .expect("plan")
            .expect("plan exists");
        planner.cancel();
        assert!(planner.poll(&round, planned.due).is_none());
    }
}
