use rand::Rng;
use serde::{Deserialize, Serialize};

/// Optional-rule switches. All default to off; named modes and per-session
/// overrides turn them on.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rules {
    /// Forced-draw cards may be answered with another forced-draw card,
    /// accumulating one larger obligation.
    pub stacking: bool,
    /// A player holding the identical printed card may play it out of turn.
    pub jump_in: bool,
    /// After a voluntary draw, a playable drawn card may be played at once.
    pub force_play: bool,
    /// Playing a 7 swaps hands with a chosen opponent.
    pub seven_trade: bool,
    /// Playing a 0 rotates all hands one seat along the current direction.
    pub zero_rotate: bool,
    /// Rule flags are re-randomized at the start of every round.
    pub chaos_mode: bool,
    /// Deck is built without number cards.
    pub no_number_cards: bool,
    /// A player with no legal play draws automatically.
    pub auto_draw_card: bool,
    /// Forced draws hit the player who caused them as well.
    pub mirror_effects: bool,
    /// A wild-draw-four may be challenged as a bluff before drawing.
    pub challenges: bool,
    /// Deck includes the mode's special cards.
    pub special_effects: bool,
}

/// Patch applied on top of a base mode's rules; absent fields keep the
/// base value.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RulesPatch {
    pub stacking: Option<bool>,
    pub jump_in: Option<bool>,
    pub force_play: Option<bool>,
    pub seven_trade: Option<bool>,
    pub zero_rotate: Option<bool>,
    pub chaos_mode: Option<bool>,
    pub no_number_cards: Option<bool>,
    pub auto_draw_card: Option<bool>,
    pub mirror_effects: Option<bool>,
    pub challenges: Option<bool>,
    pub special_effects: Option<bool>,
}

impl Rules {
    pub fn merged(self, patch: RulesPatch) -> Rules {
        Rules {
            stacking: patch.stacking.unwrap_or(self.stacking),
            jump_in: patch.jump_in.unwrap_or(self.jump_in),
            force_play: patch.force_play.unwrap_or(self.force_play),
            seven_trade: patch.seven_trade.unwrap_or(self.seven_trade),
            zero_rotate: patch.zero_rotate.unwrap_or(self.zero_rotate),
            chaos_mode: patch.chaos_mode.unwrap_or(self.chaos_mode),
            no_number_cards: patch.no_number_cards.unwrap_or(self.no_number_cards),
            auto_draw_card: patch.auto_draw_card.unwrap_or(self.auto_draw_card),
            mirror_effects: patch.mirror_effects.unwrap_or(self.mirror_effects),
            challenges: patch.challenges.unwrap_or(self.challenges),
            special_effects: patch.special_effects.unwrap_or(self.special_effects),
        }
    }
}

/// How many copies of each card kind go into a fresh deck.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardCounts {
    /// Copies of the 0 card per color.
    pub zeros_per_color: u8,
    /// Copies of each of 1 through 9 per color.
    pub numbers_per_color: u8,
    pub skips_per_color: u8,
    pub reverses_per_color: u8,
    pub draw_twos_per_color: u8,
    pub wilds: u8,
    pub wild_draw_fours: u8,
    /// Copies of each special effect card; 0 outside special modes.
    pub specials_each: u8,
}

impl CardCounts {
    /// The classic 108-card composition.
    pub fn classic() -> CardCounts {
        CardCounts {
            zeros_per_color: 1,
            numbers_per_color: 2,
            skips_per_color: 2,
            reverses_per_color: 2,
            draw_twos_per_color: 2,
            wilds: 4,
            wild_draw_fours: 4,
            specials_each: 0,
        }
    }
}

/// Fully resolved configuration for one session, selected by mode name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeConfig {
    pub name: String,
    pub rules: Rules,
    pub card_counts: CardCounts,
    /// Hand size at deal time.
    pub initial_cards: u8,
    /// Advisory per-turn timer; enforcement is a client concern.
    pub turn_time_secs: u16,
    /// Cards drawn on a successful uno callout.
    pub uno_penalty: u8,
    /// Probability of seeding the deck with the 99 card. Off by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legendary_odds: Option<f64>,
}

/// Overrides accepted when deriving a custom mode from a base mode.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModeOverrides {
    pub rules: RulesPatch,
    pub initial_cards: Option<u8>,
    pub turn_time_secs: Option<u16>,
    pub uno_penalty: Option<u8>,
    pub legendary_odds: Option<f64>,
}

pub const MODE_NAMES: [&str; 6] = ["normal", "quick", "sevenzero", "stacking", "special", "chaos"];

fn normal() -> ModeConfig {
    ModeConfig {
        name: "normal".to_string(),
        rules: Rules::default(),
        card_counts: CardCounts::classic(),
        initial_cards: 7,
        turn_time_secs: 30,
        uno_penalty: 2,
        legendary_odds: None,
    }
}

fn quick() -> ModeConfig {
    ModeConfig {
        name: "quick".to_string(),
        rules: Rules {
            force_play: true,
            auto_draw_card: true,
            ..Rules::default()
        },
        initial_cards: 5,
        turn_time_secs: 15,
        ..normal()
    }
}

fn sevenzero() -> ModeConfig {
    ModeConfig {
        name: "sevenzero".to_string(),
        rules: Rules {
            seven_trade: true,
            zero_rotate: true,
            ..Rules::default()
        },
        ..normal()
    }
}

fn stacking() -> ModeConfig {
    ModeConfig {
        name: "stacking".to_string(),
        rules: Rules {
            stacking: true,
            jump_in: true,
            ..Rules::default()
        },
        ..normal()
    }
}

fn special() -> ModeConfig {
    ModeConfig {
        name: "special".to_string(),
        rules: Rules {
            special_effects: true,
            challenges: true,
            ..Rules::default()
        },
        card_counts: CardCounts {
            specials_each: 1,
            ..CardCounts::classic()
        },
        turn_time_secs: 45,
        ..normal()
    }
}

fn chaos() -> ModeConfig {
    ModeConfig {
        name: "chaos".to_string(),
        rules: Rules {
            chaos_mode: true,
            special_effects: true,
            ..Rules::default()
        },
        card_counts: CardCounts {
            specials_each: 1,
            ..CardCounts::classic()
        },
        ..normal()
    }
}

/// Looks up a built-in mode. Unknown names fall back to `normal`.
pub fn mode_config(name: &str) -> ModeConfig {
    match name {
        "normal" => normal(),
        "quick" => quick(),
        "sevenzero" => sevenzero(),
        "stacking" => stacking(),
        "special" => special(),
        "chaos" => chaos(),
        _ => {
            tracing::warn!(mode = name, "unknown mode, using normal");
            normal()
        }
    }
}

/// Derives a custom config from a base mode plus overrides.
pub fn custom_mode(base: &str, overrides: &ModeOverrides) -> ModeConfig {
    let mut config = mode_config(base);
    config.rules = config.rules.merged(overrides.rules);
    if let Some(n) = overrides.initial_cards {
        config.initial_cards = n;
    }
    if let Some(secs) = overrides.turn_time_secs {
        config.turn_time_secs = secs;
    }
    if let Some(n) = overrides.uno_penalty {
        config.uno_penalty = n;
    }
    if let Some(odds) = overrides.legendary_odds {
        config.legendary_odds = Some(odds);
    }
    config
}

/// Re-randomizes every rule flag except `chaos_mode` itself. Called once
/// per round for chaos configs, never per turn.
pub fn reroll_chaos<R: Rng>(config: &mut ModeConfig, rng: &mut R) {
    if !config.rules.chaos_mode {
        return;
    }
    let rules = &mut config.rules;
    rules.stacking = rng.gen_bool(0.5);
    rules.jump_in = rng.gen_bool(0.5);
    rules.force_play = rng.gen_bool(0.5);
    rules.seven_trade = rng.gen_bool(0.5);
    rules.zero_rotate = rng.gen_bool(0.5);
    rules.no_number_cards = rng.gen_bool(0.1);
    rules.auto_draw_card = rng.gen_bool(0.5);
    rules.mirror_effects = rng.gen_bool(0.25);
    rules.challenges = rng.gen_bool(0.5);
    rules.special_effects = rng.gen_bool(0.5);
    config.card_counts.specials_each = if rules.special_effects { 1 } else { 0 };
    tracing::debug!(mode = config.name.as_str(), "chaos rules rerolled");
}
