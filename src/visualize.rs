use std::fmt::Write;

use crate::action::TurnAction;
use crate::card::{Card, Face};
use crate::round::{Direction, RoundStatus};
use crate::state::RoundView;

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    pub show_pile_sizes: bool,
    pub show_hand_indices: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_pile_sizes: true,
            show_hand_indices: true,
        }
    }
}

/// Fine tune textual action descriptions.
#[derive(Clone, Copy, Debug)]
pub struct DescribeOptions {
    pub include_card_details: bool,
    pub include_target_names: bool,
}

impl Default for DescribeOptions {
    fn default() -> Self {
        Self {
            include_card_details: true,
            include_target_names: true,
        }
    }
}

pub fn render_state(view: &RoundView) -> String {
    render_state_with_options(view, VisualOptions::default())
}

pub fn render_state_with_options(view: &RoundView, options: VisualOptions) -> String {
    let mut out = String::new();
    let status = match view.status {
        RoundStatus::Ongoing => String::from("Ongoing"),
        RoundStatus::Finished { winner } => {
            format!("Finished (winner: seat {winner})")
        }
    };
    let direction = match view.direction {
        Direction::Forward => "forward",
        Direction::Backward => "backward",
    };
    let _ = writeln!(out, "Round status: {status}");
    let _ = writeln!(out, "Mode: {}  |  Direction: {direction}", view.mode);
    let _ = writeln!(
        out,
        "Current seat: {}{}",
        view.current_seat,
        if view.is_own_turn() { " (You)" } else { "" }
    );
    let top = view
        .top_card
        .map(format_card)
        .unwrap_or_else(|| String::from("--"));
    let _ = writeln!(out, "Color: {}  |  Top card: {top}", view.current_color);
    if options.show_pile_sizes {
        let _ = writeln!(
            out,
            "Draw pile: {}  |  Discard pile: {}",
            view.draw_pile_count, view.discard_pile_count
        );
    }
    if view.draw_stack > 0 {
        let _ = writeln!(out, "Pending draw: {}", view.draw_stack);
    }
    if view.can_challenge {
        let _ = writeln!(out, "The wild-draw-four against you can be challenged.");
    }
    let _ = writeln!(out, "Players:");
    for seat in &view.seats {
        let label_you = if seat.seat == view.self_seat {
            " (You)"
        } else {
            ""
        };
        let current_tag = if seat.is_current { " <- current" } else { "" };
        let uno_tag = if seat.called_uno { " [uno]" } else { "" };
        let cards = if seat.cards == 1 { "card" } else { "cards" };
        let _ = writeln!(
            out,
            "  Seat {} {}{} - {} {}{}{}",
            seat.seat, seat.name, label_you, seat.cards, cards, uno_tag, current_tag
        );
    }
    if view.hand.is_empty() {
        let _ = writeln!(out, "Hand: (empty)");
    } else {
        let mut hand_entries = Vec::with_capacity(view.hand.len());
        for (idx, card) in view.hand.iter().enumerate() {
            if options.show_hand_indices {
                hand_entries.push(format!("{}:{}", idx, format_card(*card)));
            } else {
                hand_entries.push(format_card(*card));
            }
        }
        let _ = writeln!(out, "Hand: {}", hand_entries.join("  "));
    }
    out
}

pub fn describe_action(view: &RoundView, action: &TurnAction) -> String {
    describe_action_with_options(view, action, DescribeOptions::default())
}

pub fn describe_action_with_options(
    view: &RoundView,
    action: &TurnAction,
    options: DescribeOptions,
) -> String {
    match action {
        TurnAction::Play {
            card,
            chosen_color,
            swap_with,
        } => {
            let card_desc = if options.include_card_details {
                view.hand
                    .iter()
                    .find(|c| c.id == *card)
                    .map(|c| format_card(*c))
                    .unwrap_or_else(|| format!("card {card}"))
            } else {
                format!("card {card}")
            };
            let mut text = format!("Play {card_desc}");
            if let Some(color) = chosen_color {
                let _ = write!(text, ", calling {color}");
            }
            if let Some(target) = swap_with {
                let _ = write!(
                    text,
                    ", swapping hands with {}",
                    seat_label(view, *target, options)
                );
            }
            text
        }
        TurnAction::Draw => {
            if view.draw_stack > 0 {
                format!("Draw the {} pending penalty cards", view.draw_stack)
            } else {
                String::from("Draw a card")
            }
        }
        TurnAction::PassAfterDraw => String::from("Keep the drawn card and pass"),
        TurnAction::CallUno => String::from("Call uno"),
        TurnAction::CallOut { target } => {
            format!(
                "Call out {} for a missed uno",
                seat_label(view, *target, options)
            )
        }
        TurnAction::Challenge => String::from("Challenge the wild-draw-four"),
    }
}

fn seat_label(view: &RoundView, seat: usize, options: DescribeOptions) -> String {
    if options.include_target_names {
        if let Some(entry) = view.seat(seat) {
            return format!("seat {} ({})", seat, entry.name);
        }
    }
    format!("seat {seat}")
}

fn format_card(card: Card) -> String {
    match card.face {
        Face::Legendary => String::from("legendary 99"),
        _ => match (card.color(), card.chosen_color()) {
            (Some(color), _) => format!("{} {}", color, card.value_token()),
            (None, Some(chosen)) => format!("{} ({chosen})", card.value_token()),
            (None, None) => card.value_token().to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::mode_config;
    use crate::round::Round;

    #[test]
    fn render_and_describe_include_expected_phrases() {
        let round = Round::builder(
            mode_config("normal"),
            vec![String::from("Ada"), String::from("Bo")],
        )
        .with_seed(5)
        .build()
        .expect("round");
        let view = round.view(0).expect("view");
        let text = render_state(&view);
        assert!(text.contains("Seat 0 Ada (You)"));
        assert!(text.contains("Hand:"));
        assert!(text.contains("Top card:"));
        let actions = round.legal_actions(0).expect("actions available");
        if let Some(play) = actions
            .iter()
            .find(|action| matches!(action, TurnAction::Play { .. }))
        {
            let desc = describe_action(&view, play);
            assert!(desc.starts_with("Play "));
        }
        let draw_desc = describe_action(&view, &TurnAction::Draw);
        assert!(draw_desc.contains("Draw"));
    }

    #[test]
    fn cards_format_with_color_and_value() {
        use crate::card::{ActionEffect, CardId, Color, WildEffect};
        let number = Card::number(CardId(0), Color::Red, 7);
        assert_eq!(format_card(number), "red 7");
        let action = Card::action(CardId(1), Color::Blue, ActionEffect::Skip);
        assert_eq!(format_card(action), "blue skip");
        let mut wild = Card::wild(CardId(2), WildEffect::DrawFour);
        assert_eq!(format_card(wild), "wild-draw-four");
        wild.set_chosen_color(Color::Green);
        assert_eq!(format_card(wild), "wild-draw-four (green)");
    }
}
