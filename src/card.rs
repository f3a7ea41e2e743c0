use serde::{Deserialize, Serialize};

/// One of the four standard suit colors. Wild, special and legendary cards
/// carry no `Color` at all; "black" exists only on the wire.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

    #[inline]
    pub fn token(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
        }
    }

    pub fn from_token(token: &str) -> Option<Color> {
        match token {
            "red" => Some(Color::Red),
            "blue" => Some(Color::Blue),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            _ => None,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Effect of a colored action card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ActionEffect {
    Skip,
    Reverse,
    DrawTwo,
}

impl ActionEffect {
    #[inline]
    pub fn token(self) -> &'static str {
        match self {
            ActionEffect::Skip => "skip",
            ActionEffect::Reverse => "reverse",
            ActionEffect::DrawTwo => "draw2",
        }
    }

    pub fn from_token(token: &str) -> Option<ActionEffect> {
        match token {
            "skip" => Some(ActionEffect::Skip),
            "reverse" => Some(ActionEffect::Reverse),
            "draw2" => Some(ActionEffect::DrawTwo),
            _ => None,
        }
    }
}

/// Effect of a colorless wild card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum WildEffect {
    Recolor,
    DrawFour,
}

impl WildEffect {
    #[inline]
    pub fn token(self) -> &'static str {
        match self {
            WildEffect::Recolor => "wild",
            WildEffect::DrawFour => "wild-draw-four",
        }
    }

    pub fn from_token(token: &str) -> Option<WildEffect> {
        match token {
            "wild" => Some(WildEffect::Recolor),
            "wild-draw-four" => Some(WildEffect::DrawFour),
            _ => None,
        }
    }
}

/// Effect of a colorless special card. Only decks built from a mode with
/// special card counts contain these.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SpecialEffect {
    SwapHands,
    DrawUntil,
    DoubleTurn,
    Command,
    Shield,
    DrawSix,
    SkipAll,
    WildSwap,
    Challenge,
}

impl SpecialEffect {
    pub const ALL: [SpecialEffect; 9] = [
        SpecialEffect::SwapHands,
        SpecialEffect::DrawUntil,
        SpecialEffect::DoubleTurn,
        SpecialEffect::Command,
        SpecialEffect::Shield,
        SpecialEffect::DrawSix,
        SpecialEffect::SkipAll,
        SpecialEffect::WildSwap,
        SpecialEffect::Challenge,
    ];

    #[inline]
    pub fn token(self) -> &'static str {
        match self {
            SpecialEffect::SwapHands => "swap-hands",
            SpecialEffect::DrawUntil => "draw-until",
            SpecialEffect::DoubleTurn => "double-turn",
            SpecialEffect::Command => "command",
            SpecialEffect::Shield => "shield",
            SpecialEffect::DrawSix => "draw-six",
            SpecialEffect::SkipAll => "skip-all",
            SpecialEffect::WildSwap => "wild-swap",
            SpecialEffect::Challenge => "challenge",
        }
    }

    pub fn from_token(token: &str) -> Option<SpecialEffect> {
        SpecialEffect::ALL.into_iter().find(|e| e.token() == token)
    }
}

/// Identity of a card, unique within one session and never reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The printed face of a card. Colorless variants omit `Color` entirely,
/// which keeps "black iff wild/special/legendary" true by construction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    /// Digit card, 0 through 9.
    Number { color: Color, digit: u8 },
    /// Colored skip/reverse/draw2.
    Action { color: Color, effect: ActionEffect },
    /// Colorless wild; `chosen` is stamped when played.
    Wild { effect: WildEffect, chosen: Option<Color> },
    /// Colorless mode-specific card; `chosen` is stamped when played.
    Special { effect: SpecialEffect, chosen: Option<Color> },
    /// The `99` card. Playing it wins the round outright.
    Legendary,
}

const DIGIT_TOKENS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// One playing card: stable identity plus printed face.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Card {
    pub id: CardId,
    pub face: Face,
}

impl Card {
    pub fn number(id: CardId, color: Color, digit: u8) -> Card {
        debug_assert!(digit <= 9);
        Card { id, face: Face::Number { color, digit } }
    }

    pub fn action(id: CardId, color: Color, effect: ActionEffect) -> Card {
        Card { id, face: Face::Action { color, effect } }
    }

    pub fn wild(id: CardId, effect: WildEffect) -> Card {
        Card { id, face: Face::Wild { effect, chosen: None } }
    }

    pub fn special(id: CardId, effect: SpecialEffect) -> Card {
        Card { id, face: Face::Special { effect, chosen: None } }
    }

    pub fn legendary(id: CardId) -> Card {
        Card { id, face: Face::Legendary }
    }

    /// The card's own printed color; `None` for colorless cards.
    #[inline]
    pub fn color(&self) -> Option<Color> {
        match self.face {
            Face::Number { color, .. } | Face::Action { color, .. } => Some(color),
            Face::Wild { .. } | Face::Special { .. } | Face::Legendary => None,
        }
    }

    /// Color selected when a colorless card was played, if any.
    #[inline]
    pub fn chosen_color(&self) -> Option<Color> {
        match self.face {
            Face::Wild { chosen, .. } | Face::Special { chosen, .. } => chosen,
            _ => None,
        }
    }

    /// Digit of a number card.
    #[inline]
    pub fn digit(&self) -> Option<u8> {
        match self.face {
            Face::Number { digit, .. } => Some(digit),
            _ => None,
        }
    }

    #[inline]
    pub fn is_colorless(&self) -> bool {
        self.color().is_none()
    }

    /// True when playing this card demands a color choice from the player.
    #[inline]
    pub fn requires_color_choice(&self) -> bool {
        matches!(self.face, Face::Wild { .. } | Face::Special { .. })
    }

    /// True for cards that answer a pending draw chain under stacking.
    #[inline]
    pub fn is_draw_answer(&self) -> bool {
        matches!(
            self.face,
            Face::Action { effect: ActionEffect::DrawTwo, .. }
                | Face::Wild { effect: WildEffect::DrawFour, .. }
                | Face::Special { effect: SpecialEffect::Challenge, .. }
        )
    }

    /// Records the color choice made when this card was played. Colored
    /// cards are left untouched.
    pub fn set_chosen_color(&mut self, color: Color) {
        match &mut self.face {
            Face::Wild { chosen, .. } | Face::Special { chosen, .. } => *chosen = Some(color),
            _ => {}
        }
    }

    /// Forgets a previous color choice, used when a card re-enters the
    /// draw pile.
    pub fn clear_chosen_color(&mut self) {
        match &mut self.face {
            Face::Wild { chosen, .. } | Face::Special { chosen, .. } => *chosen = None,
            _ => {}
        }
    }

    /// Wire discriminant: `number`, `action`, `wild`, `special` or `legendary`.
    #[inline]
    pub fn kind_token(&self) -> &'static str {
        match self.face {
            Face::Number { .. } => "number",
            Face::Action { .. } => "action",
            Face::Wild { .. } => "wild",
            Face::Special { .. } => "special",
            Face::Legendary => "legendary",
        }
    }

    /// Wire value: `"0"`..`"9"`, an effect token, or `"99"`.
    pub fn value_token(&self) -> &'static str {
        match self.face {
            Face::Number { digit, .. } => DIGIT_TOKENS[digit as usize],
            Face::Action { effect, .. } => effect.token(),
            Face::Wild { effect, .. } => effect.token(),
            Face::Special { effect, .. } => effect.token(),
            Face::Legendary => "99",
        }
    }

    /// Rank equality across colors: skip matches skip, 7 matches 7.
    #[inline]
    pub fn same_value(&self, other: &Card) -> bool {
        self.value_token() == other.value_token()
    }

    /// Identical printed card (same color and value), the jump-in test.
    #[inline]
    pub fn same_printed_card(&self, other: &Card) -> bool {
        self.color() == other.color() && self.same_value(other)
    }
}
