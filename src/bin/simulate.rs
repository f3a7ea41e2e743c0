use std::collections::HashMap;
use std::error::Error;
use std::process;

use clap::{ArgAction, Parser};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use onu::{
    Bot, MAX_PLAYERS, Round, RoundError, create_bot_from_spec, describe_action, label_for_spec,
    mode_config, render_state, winner_points,
};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

#[derive(Parser, Debug)]
#[command(
    name = "simulate",
    about = "Run seeded Onu rounds between bots, or sit in yourself."
)]
struct Args {
    /// Game mode: normal, quick, sevenzero, stacking, special or chaos
    #[arg(short = 'm', long = "mode", default_value = "normal")]
    mode: String,

    /// Base RNG seed (deck and bot RNGs are derived deterministically)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Number of rounds; above 1 prints an aggregate winner table
    #[arg(short = 'g', long = "games", default_value_t = 1)]
    games: usize,

    /// Safety cap on actions per round; rounds exceeding it are aborted
    #[arg(long = "max-turns", default_value_t = 2000)]
    max_turns: usize,

    /// Show the round state and chosen actions each turn
    #[arg(long = "visualize", action = ArgAction::SetTrue)]
    visualize: bool,

    /// Player bot specs: human[:name], random[:seed], greedy (2-10 total)
    bots: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut bot_specs = args.bots.clone();
    if bot_specs.is_empty() {
        bot_specs = vec![String::from("human"), String::from("random")];
    }
    if bot_specs.len() < 2 || bot_specs.len() > MAX_PLAYERS {
        return Err(format!(
            "expected between 2 and {MAX_PLAYERS} players, received {}",
            bot_specs.len()
        )
        .into());
    }

    // Batch runs never block on stdin.
    if args.games > 1
        && bot_specs
            .iter()
            .any(|s| s.to_ascii_lowercase().starts_with("human"))
    {
        return Err("human players are not supported in multi-game runs".into());
    }

    let players_per_game = bot_specs.len();
    let labels_for_spec: Vec<String> = bot_specs.iter().map(|s| label_for_spec(s)).collect();

    let mut wins_per_label: HashMap<String, usize> = HashMap::new();
    let mut seats_per_label: HashMap<String, usize> = HashMap::new();
    let mut points_per_label: HashMap<String, u64> = HashMap::new();
    let mut aborted_games = 0usize;

    for game_idx in 0..args.games {
        // Permute seating each game for fairness; a single game keeps the
        // order given on the command line.
        let mut indices: Vec<usize> = (0..players_per_game).collect();
        if args.games > 1 {
            let mut seat_rng = StdRng::seed_from_u64(args.seed ^ 0x9E37_79B9 ^ (game_idx as u64));
            indices.shuffle(&mut seat_rng);
        }

        let deck_seed = mix_seed(args.seed, game_idx as u64, 0x5EED_15);
        let mut labels: Vec<String> = Vec::with_capacity(players_per_game);
        let mut bots: Vec<Box<dyn Bot>> = Vec::with_capacity(players_per_game);
        for (seat, src_idx) in indices.iter().enumerate() {
            let spec = &bot_specs[*src_idx];
            let bot_seed = mix_seed(args.seed, game_idx as u64, seat as u64);
            bots.push(create_bot_from_spec(spec, seat, bot_seed)?);
            labels.push(labels_for_spec[*src_idx].clone());
        }
        let names: Vec<String> = labels
            .iter()
            .enumerate()
            .map(|(seat, label)| format!("{label}-{seat}"))
            .collect();

        let mut round = Round::builder(mode_config(&args.mode), names)
            .with_seed(deck_seed)
            .build()?;

        for label in &labels {
            *seats_per_label.entry(label.clone()).or_default() += 1;
        }

        if args.games == 1 {
            println!(
                "Starting an Onu round: {} players, {} mode.\n",
                players_per_game,
                round.config().name
            );
        }

        let mut turns = 0usize;
        loop {
            if round.is_finished() {
                break;
            }
            if turns >= args.max_turns {
                if args.games == 1 {
                    println!("Max turn limit {} reached. Stopping round.", args.max_turns);
                }
                break;
            }
            let current = round.current_seat();
            let view = round.view(current)?;
            let legal = round.legal_actions(current)?;
            if legal.is_empty() {
                return Err(
                    RoundError::InvalidConfiguration("no legal actions for current seat").into(),
                );
            }
            if args.visualize {
                println!("{}", render_state(&view));
            }
            let action = bots[current].select_action(&view, &legal);
            if args.visualize {
                println!("Chosen action: {}\n", describe_action(&view, &action));
            }
            round.apply(current, action)?;
            turns += 1;
        }

        match round.winner() {
            Some(winner) => {
                let label = labels[winner].clone();
                let points = winner_points(&round, winner) as u64;
                *wins_per_label.entry(label.clone()).or_default() += 1;
                *points_per_label.entry(label).or_default() += points;
                if args.games == 1 {
                    println!(
                        "Round finished. Winner: seat {winner} ({}), {points} points.",
                        labels[winner]
                    );
                }
            }
            None => {
                aborted_games += 1;
                if args.games == 1 {
                    println!("Round stopped before completion.");
                }
            }
        }
    }

    if args.games > 1 {
        print_summary(
            &wins_per_label,
            &seats_per_label,
            &points_per_label,
            aborted_games,
        );
    }
    Ok(())
}

fn print_summary(
    wins_per_label: &HashMap<String, usize>,
    seats_per_label: &HashMap<String, usize>,
    points_per_label: &HashMap<String, u64>,
    aborted_games: usize,
) {
    let mut results: Vec<(String, f64, usize, usize)> = Vec::new();
    for (label, &seats) in seats_per_label {
        let wins = wins_per_label.get(label).copied().unwrap_or(0);
        let rate = if seats > 0 {
            wins as f64 / seats as f64
        } else {
            0.0
        };
        results.push((label.clone(), rate, wins, seats));
    }
    results.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    println!("Win rates (per-seat) with scoring:");
    for (label, rate, wins, seats) in &results {
        let total_points = points_per_label.get(label).copied().unwrap_or(0);
        let avg_points = if *seats > 0 {
            total_points as f64 / (*seats as f64)
        } else {
            0.0
        };
        println!(
            "  {label:<12}  {wins}/{seats}  ({:.2}%)   avg pts: {avg_points:>7.2}   total pts: {total_points}",
            rate * 100.0
        );
    }
    if aborted_games > 0 {
        println!("\nNote: {aborted_games} round(s) ended without a winner (turn cap reached).");
    }
}

fn mix_seed(base: u64, a: u64, b: u64) -> u64 {
    // Simple reversible mixer (xorshift-like mix).
    let mut z =
        base ^ (a.wrapping_mul(0x9E37_79B97F4A7C15)) ^ (b.wrapping_mul(0xBF58_476D1CE4E5B9));
    z ^= z >> 12;
    z ^= z << 25;
    z ^= z >> 27;
    z
}
