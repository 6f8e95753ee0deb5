// Driving seated clients through picks until the game ends

use backend::state::AppState;
use backend_test_support::websocket_client::{BoxError, WebSocketClient};
use serde_json::Value;

use crate::support::server::start_test_server;
use crate::support::snapshot::{first_allowed_card, pending_answer, phase, to_act};
use crate::support::test_config;

const ACTION_CAP: usize = 500;

/// Read up to and including the next `game_state` on every client.
async fn next_states(clients: &mut [WebSocketClient; 2]) -> Result<[Value; 2], BoxError> {
    let first = clients[0].recv_type("game_state").await?;
    let second = clients[1].recv_type("game_state").await?;
    Ok([first, second])
}

#[tokio::test]
async fn pick_sends_outcome_to_actor_and_state_to_both() -> Result<(), BoxError> {
    let server = start_test_server(AppState::new(test_config())).await?;
    let (first, _) = server.seat(31).await?;
    let (second, _) = server.seat(31).await?;
    let mut clients = [first, second];
    let states = next_states(&mut clients).await?;

    let actor = to_act(&states[0]).ok_or("no seat to act")? as usize;
    let card = first_allowed_card(&states[actor]).ok_or("no card to pick")?;
    clients[actor].pick(card, None).await?;

    let outcome = clients[actor].recv_type("outcome").await?;
    assert_eq!(outcome["seat"], actor as u64);
    assert_eq!(outcome["result"]["outcome"], "placed");
    assert_eq!(outcome["result"]["faceUp"], true);

    let states = next_states(&mut clients).await?;
    for state in &states {
        assert_eq!(state["game"]["draft"]["completedPicks"], 1);
        assert_eq!(
            state["game"]["draft"]["revealedCards"].as_array().map(Vec::len),
            Some(3)
        );
        let slots = state["game"]["grids"][actor]["slots"]
            .as_array()
            .ok_or("grid without slots")?;
        assert_eq!(slots.iter().filter(|s| !s.is_null()).count(), 1);
    }

    for client in clients.iter_mut() {
        client.close().await?;
    }
    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn full_game_reaches_game_complete() -> Result<(), BoxError> {
    let server = start_test_server(AppState::new(test_config())).await?;
    let (first, _) = server.seat(41).await?;
    let (second, _) = server.seat(41).await?;
    let mut clients = [first, second];
    let mut states = next_states(&mut clients).await?;

    let mut actions = 0;
    while phase(&states[0]) == "draft" {
        assert!(actions < ACTION_CAP, "game did not finish");
        actions += 1;

        let seat = to_act(&states[0]).ok_or("no seat to act")?;
        let actor = seat as usize;
        if let Some((card, answer)) = pending_answer(&states[actor], seat) {
            clients[actor].resolve_choice(card, answer).await?;
        } else {
            let card = first_allowed_card(&states[actor]).ok_or("no card to pick")?;
            clients[actor].pick(card, None).await?;
        }
        clients[actor].recv_type("outcome").await?;
        states = next_states(&mut clients).await?;
    }

    assert_eq!(phase(&states[0]), "finished");
    assert_eq!(states[0]["game"]["round"], 3);
    assert_eq!(states[0]["game"]["totalScores"], states[1]["game"]["totalScores"]);

    let totals = &states[0]["game"]["totalScores"];
    let (a, b) = (totals[0].as_i64(), totals[1].as_i64());
    let expected_winner = match (a, b) {
        (Some(a), Some(b)) if a > b => Value::from(0),
        (Some(a), Some(b)) if b > a => Value::from(1),
        _ => Value::Null,
    };
    assert_eq!(states[0]["game"]["winner"], expected_winner);

    for client in clients.iter_mut() {
        client.close().await?;
    }
    server.stop().await;
    Ok(())
}
