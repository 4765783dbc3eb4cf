use serde_json::{json, Value};

use crate::training_engine::models::{AskMoment, Card, SeatView};

/// Client card string: rank 10 → "10s", everything else from Display ("As", "Kh").
fn to_client_card(c: &Card) -> String {
    if c.rank.0 == 10 {
        format!("10{}", c.suit)
    } else {
        c.to_string()
    }
}

/// Always five slots; unrevealed ones carry an empty card string.
fn community_cards(board: &[Card]) -> Value {
    let slots: Vec<Value> = (0..5usize)
        .map(|i| {
            let card = board.get(i).map(to_client_card).unwrap_or_default();
            json!({ "id": i, "card": card, "revealed": i < board.len() })
        })
        .collect();
    Value::Array(slots)
}

fn seat(s: &SeatView) -> Value {
    json!({
        "position": s.position.to_string(),
        "stack": s.stack,
        "bet": s.current_bet,
        "is_folded": s.folded,
        "is_requester": s.is_requester,
        "is_dealer": s.is_dealer,
    })
}

/// Flatten an ask-moment into the table-state object the drill screen renders.
///
/// The answer and its derivation are kept under `"answer"` so the client can
/// hide them until the user submits a guess.
pub fn to_table_state(moment: &AskMoment) -> Value {
    json!({
        "street": moment.street,
        "center_pot": moment.center_pot,
        "community_cards": community_cards(&moment.board),
        "seats": moment.seats.iter().map(seat).collect::<Vec<_>>(),
        "actions": moment.actions.iter().map(|a| a.to_string()).collect::<Vec<_>>(),
        "requester": moment.requester.to_string(),
        "answer": {
            "correct": moment.correct_answer,
            "dead_money": moment.dead_money,
            "last_action": moment.last_aggressor_amount,
            "last_aggressor": moment.last_aggressor.to_string(),
            "explanation": moment.explanation,
        }
    })
}
