//! Walk through generated pot drills.
//!
//! Run with: `cargo run --example demo`
//!
//! 1. **One hand per difficulty**: fixed seeds, so the output is reproducible.
//!    Each ask-moment prints the table, the action so far, and the dealer's
//!    derivation of the pot.
//! 2. **Single-question drill**: a random flat preflop question, checked
//!    against a wrong and a right answer.
//! 3. **Custom policy**: a JSON config that makes everybody raise.

use plo_pot_drill::{
    generate_hand, generate_hand_with, generate_random_pot_request, validate_pot_answer,
    calculate_pot_amount, AskMoment, DifficultyLevel, HandRequest, SimulationConfig,
};
use rand::{rngs::StdRng, SeedableRng};

fn print_moment(moment: &AskMoment) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let board: Vec<String> = moment.board.iter().map(|c| c.to_string()).collect();
    println!("  [{}]  Board: {}  Center pot: ${}",
        moment.street,
        if board.is_empty() { "-".to_string() } else { board.join(" ") },
        moment.center_pot);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for seat in &moment.seats {
        let marker = if seat.is_requester { "?" } else if seat.folded { "x" } else { " " };
        let dealer = if seat.is_dealer { " (D)" } else { "" };
        println!("  {marker} {:<4}{dealer:<4} stack ${:<6} bet ${}",
            seat.position.to_string(), seat.stack, seat.current_bet);
    }
    println!();
    for action in &moment.actions {
        println!("    {action}");
    }
    println!();
    println!("  Q: {} asks: how much is the pot?", moment.requester);
    for line in moment.explanation.lines() {
        println!("       {line}");
    }
    println!();
}

fn main() {
    for (difficulty, seed) in [
        (DifficultyLevel::Easy, 1u64),
        (DifficultyLevel::Medium, 7),
        (DifficultyLevel::Advanced, 42),
    ] {
        println!();
        println!("══ {difficulty} (seed {seed}) ══");
        let hand = match generate_hand(HandRequest::new(difficulty, 2).with_seed(seed)) {
            Ok(hand) => hand,
            Err(e) => {
                eprintln!("error: {e}");
                return;
            }
        };
        for moment in &hand.moments {
            print_moment(moment);
        }
    }

    println!("══ Single-question drill ══");
    let mut rng = StdRng::seed_from_u64(3);
    let request = generate_random_pot_request(&mut rng);
    println!("  Blinds ${}/${}, {} asks after:", request.small_blind, request.big_blind, request.requester);
    for a in &request.prior_actions {
        println!("    {} {} ${}", a.position, a.action, a.amount);
    }
    let answer = calculate_pot_amount(&request);
    for guess in [answer.saturating_sub(3), answer] {
        let result = validate_pot_answer(&request, guess);
        let mark = if result.is_correct { "✓" } else { "✗" };
        println!("  guess ${guess}: {mark}");
    }
    println!("{}", validate_pot_answer(&request, answer).explanation);
    println!();

    println!("══ Custom policy: everyone raises ══");
    let config = SimulationConfig::from_json(
        r#"{ "preflop": { "opener": [ { "action": "raise", "weight": 1 } ],
                          "facing_raise": [ { "action": "raise", "weight": 1 } ] } }"#,
    );
    match config.and_then(|c| generate_hand_with(&mut rng, DifficultyLevel::Easy, 5, &c)) {
        Ok(hand) => hand.moments.iter().for_each(print_moment),
        Err(e) => eprintln!("error: {e}"),
    }
}
