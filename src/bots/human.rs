use std::io::{self, BufRead, BufReader, Write};

use crate::action::TurnAction;
use crate::bot::Bot;
use crate::state::RoundView;
use crate::visualize::{describe_action, render_state};

/// Interactive player driven by line input, stdin by default. Besides the
/// numbered action list it understands the calls made at a real table:
/// `draw`, `pass`, `uno`, `callout` and `challenge`.
pub struct HumanBot {
    name: String,
    input: Box<dyn BufRead>,
}

impl HumanBot {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_input(name, BufReader::new(io::stdin()))
    }

    /// Reads lines from `input` instead of stdin, for scripted sessions.
    pub fn with_input(name: impl Into<String>, input: impl BufRead + 'static) -> Self {
        Self { name: name.into(), input: Box::new(input) }
    }

    fn call_for(word: &str, legal_actions: &[TurnAction]) -> Option<TurnAction> {
        legal_actions
            .iter()
            .find(|action| match word {
                "d" | "draw" => matches!(action, TurnAction::Draw),
                "p" | "pass" => matches!(action, TurnAction::PassAfterDraw),
                "u" | "uno" => matches!(action, TurnAction::CallUno),
                "c" | "challenge" => matches!(action, TurnAction::Challenge),
                "o" | "callout" => matches!(action, TurnAction::CallOut { .. }),
                _ => false,
            })
            .copied()
    }

    fn print_prompt(&self, view: &RoundView, legal_actions: &[TurnAction]) {
        println!("\n=== {} (seat {}) ===", self.name, view.self_seat);
        print!("{}", render_state(view));
        if view.draw_stack > 0 && view.is_own_turn() {
            println!("A forced draw of {} cards is waiting on you.", view.draw_stack);
        }
        if view.offered_card.is_some() {
            println!("The card you just drew is playable: play it or pass.");
        }
        if view.hand.len() <= 2 && legal_actions.contains(&TurnAction::CallUno) {
            println!("Almost out: call uno before an opponent calls you out.");
        }
        println!("Actions:");
        for (index, action) in legal_actions.iter().enumerate() {
            println!("  [{index}] {}", describe_action(view, action));
        }
        println!("Pick an index or a call; '?' for help, 'q' to quit.");
    }

    fn print_help() {
        println!("Pick an action by the number in front of it.");
        println!("Wild and special cards are listed once per color choice,");
        println!("swap effects once per opponent.");
        println!("Calls: draw (d), pass (p), uno (u), callout (o), challenge (c).");
        println!("A callout punishes an opponent at one card who never said uno.");
        println!("'q' leaves the game.");
    }
}

impl Bot for HumanBot {
    fn select_action(&mut self, view: &RoundView, legal_actions: &[TurnAction]) -> TurnAction {
        assert!(
            !legal_actions.is_empty(),
            "at least one legal action must exist"
        );
        self.print_prompt(view, legal_actions);
        loop {
            print!("{}> ", self.name);
            if io::stdout().flush().is_err() {
                eprintln!("failed to flush stdout");
            }
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(n) if n > 0 => {}
                // Closed or broken input; settle on the first listed action.
                _ => {
                    let action = legal_actions[0];
                    println!("Input ended; taking {}.", describe_action(view, &action));
                    return action;
                }
            }
            let word = line.trim().to_ascii_lowercase();
            match word.as_str() {
                "q" | "quit" => {
                    println!("Leaving the table.");
                    std::process::exit(0);
                }
                "?" | "h" | "help" => {
                    Self::print_help();
                    continue;
                }
                _ => {}
            }
            if let Some(action) = Self::call_for(&word, legal_actions) {
                println!("You chose: {}", describe_action(view, &action));
                return action;
            }
            if let Ok(index) = word.parse::<usize>() {
                if let Some(action) = legal_actions.get(index) {
                    let action = *action;
                    println!("You chose: {}", describe_action(view, &action));
                    return action;
                }
                println!("No action number {index}; pick one from the list.");
                continue;
            }
            println!("'{word}' is neither an index nor a call; '?' lists them.");
        }
    }
}
