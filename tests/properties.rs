use std::collections::HashSet;

use onu::{
    ActionEffect, Card, CardId, Color, Deck, MODE_NAMES, Round, RoundView, SpecialEffect,
    TurnAction, WildEffect, build_deck, is_playable, mode_config,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

fn arb_color() -> impl Strategy<Value = Color> {
    (0..Color::ALL.len()).prop_map(|i| Color::ALL[i])
}

fn arb_card() -> impl Strategy<Value = Card> {
    prop_oneof![
        (any::<u32>(), arb_color(), 0u8..=9)
            .prop_map(|(id, color, digit)| Card::number(CardId(id), color, digit)),
        (
            any::<u32>(),
            arb_color(),
            prop_oneof![
                Just(ActionEffect::Skip),
                Just(ActionEffect::Reverse),
                Just(ActionEffect::DrawTwo),
            ],
        )
            .prop_map(|(id, color, effect)| Card::action(CardId(id), color, effect)),
        (
            any::<u32>(),
            prop_oneof![Just(WildEffect::Recolor), Just(WildEffect::DrawFour)],
            proptest::option::of(arb_color()),
        )
            .prop_map(|(id, effect, chosen)| {
                let mut card = Card::wild(CardId(id), effect);
                if let Some(color) = chosen {
                    card.set_chosen_color(color);
                }
                card
            }),
        (
            any::<u32>(),
            (0..SpecialEffect::ALL.len()).prop_map(|i| SpecialEffect::ALL[i]),
            proptest::option::of(arb_color()),
        )
            .prop_map(|(id, effect, chosen)| {
                let mut card = Card::special(CardId(id), effect);
                if let Some(color) = chosen {
                    card.set_chosen_color(color);
                }
                card
            }),
        any::<u32>().prop_map(|id| Card::legendary(CardId(id))),
    ]
}

fn built_round(mode: &str, players: usize, seed: u64) -> Round {
    let names = (0..players).map(|seat| format!("p{seat}")).collect();
    Round::builder(mode_config(mode), names)
        .with_seed(seed)
        .build()
        .expect("round builds")
}

fn total_cards(round: &Round) -> usize {
    let hands: usize = round.players().iter().map(|player| player.hand_len()).sum();
    hands + round.deck().draw_len() + round.deck().discard_len()
}

/// Every seat's legal actions, tagged with the seat, so off-turn actions
/// (callouts, jump-ins) get exercised too.
fn all_legal(round: &Round) -> Vec<(usize, TurnAction)> {
    let mut actions = Vec::new();
    for seat in 0..round.players().len() {
        let list = round.legal_actions(seat).expect("valid seat");
        actions.extend(list.into_iter().map(|action| (seat, action)));
    }
    actions
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// No mutation creates or destroys cards, and every enumerated action
    /// is accepted by the engine.
    #[test]
    fn random_play_conserves_cards(
        seed in any::<u64>(),
        mode_idx in 0..MODE_NAMES.len(),
        players in 2usize..=5,
    ) {
        let mut round = built_round(MODE_NAMES[mode_idx], players, seed);
        let expected = total_cards(&round);
        let mut rng = StdRng::seed_from_u64(seed ^ 0xA5A5_5A5A_A5A5_5A5A);
        for _ in 0..200 {
            let actions = all_legal(&round);
            if actions.is_empty() {
                prop_assert!(round.is_finished());
                break;
            }
            let (seat, action) = *actions.choose(&mut rng).unwrap();
            let before = round.generation();
            round.apply(seat, action).expect("legal action applies");
            prop_assert!(round.generation() > before);
            prop_assert_eq!(total_cards(&round), expected);
        }
    }

    /// Shuffling reorders the draw pile without creating or losing cards.
    #[test]
    fn shuffling_permutes_the_draw_pile(
        seed in any::<u64>(),
        mode_idx in 0..MODE_NAMES.len(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let built = build_deck(&mode_config(MODE_NAMES[mode_idx]), &mut rng);
        let mut before: Vec<CardId> = built.iter().map(|card| card.id).collect();
        let mut deck = Deck::new(built);
        deck.shuffle(&mut rng);
        let mut after: Vec<CardId> =
            deck.draw_cards().iter().map(|card| card.id).collect();
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }

    /// In the base mode the enumerated plays are exactly the hand cards the
    /// pure legality predicate admits.
    #[test]
    fn enumerated_plays_match_the_legality_predicate(
        seed in any::<u64>(),
        players in 2usize..=4,
    ) {
        let mut round = built_round("normal", players, seed);
        let mut rng = StdRng::seed_from_u64(seed.rotate_left(17));
        for _ in 0..120 {
            if round.is_finished() {
                break;
            }
            let seat = round.current_seat();
            let actions = round.legal_actions(seat).expect("valid seat");
            let top = *round.deck().top_discard().expect("discard seeded");
            let color = round.deck().current_color();
            let enumerated: HashSet<CardId> =
                actions.iter().filter_map(|action| action.card()).collect();
            let admitted: HashSet<CardId> = round
                .player(seat)
                .expect("valid seat")
                .hand()
                .iter()
                .filter(|card| is_playable(card, &top, color))
                .map(|card| card.id)
                .collect();
            prop_assert_eq!(enumerated, admitted);

            let step = actions
                .choose(&mut rng)
                .copied()
                .expect("draw is always available");
            round.apply(seat, step).expect("legal action applies");
        }
    }

    /// The wire shape loses nothing: every card kind, with or without a
    /// stamped color choice, survives serialization.
    #[test]
    fn cards_survive_the_wire_format(card in arb_card()) {
        let json = serde_json::to_string(&card).expect("card serializes");
        let back: Card = serde_json::from_str(&json).expect("card parses");
        prop_assert_eq!(back, card);
    }
}

/// Planned actions and per-seat views carry card ids and must cross a wire
/// just like the session documents.
#[test]
fn actions_and_views_survive_the_wire_format() {
    let actions = vec![
        TurnAction::Play {
            card: CardId(7),
            chosen_color: Some(Color::Blue),
            swap_with: Some(2),
        },
        TurnAction::Draw,
        TurnAction::PassAfterDraw,
        TurnAction::CallUno,
        TurnAction::CallOut { target: 1 },
        TurnAction::Challenge,
    ];
    let json = serde_json::to_string(&actions).expect("actions serialize");
    let back: Vec<TurnAction> = serde_json::from_str(&json).expect("actions parse");
    assert_eq!(back, actions);

    let view = built_round("normal", 3, 11).view(1).expect("valid seat");
    let json = serde_json::to_string(&view).expect("view serializes");
    let back: RoundView = serde_json::from_str(&json).expect("view parses");
    assert_eq!(back, view);
}
