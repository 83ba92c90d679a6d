use std::time::Duration;

use tokio::sync::mpsc;

use signalink_client::{LocalIntent, NegotiationState, Role};
use signalink_core::utils::default_ice_servers;
use signalink_core::{ClientMessage, ParticipantId, RoomId, ServerMessage};

use crate::integration::{create_test_client, init_tracing};

const WAIT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_run_loop_drives_a_call() {
    init_tracing();
    let harness = create_test_client();
    let (sink, factory) = (harness.sink.clone(), harness.factory.clone());
    let mut client = harness.client;
    let mut states = client.watch_state();

    let (relay_tx, relay_rx) = mpsc::unbounded_channel();
    let (intent_tx, intent_rx) = mpsc::channel(8);
    let runner = tokio::spawn(async move {
        client.run(relay_rx, intent_rx).await;
        client
    });

    let me = ParticipantId::new();
    let peer = ParticipantId::new();
    relay_tx
        .send(ServerMessage::Welcome {
            participant_id: me,
            ice_servers: default_ice_servers(),
        })
        .unwrap();
    intent_tx
        .send(LocalIntent::Join(RoomId::from("abc123")))
        .await
        .unwrap();
    tokio::time::timeout(WAIT, async {
        while sink.sent().is_empty() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();
    relay_tx
        .send(ServerMessage::OtherUser {
            participant_id: peer,
        })
        .unwrap();

    tokio::time::timeout(
        WAIT,
        states.wait_for(|s| {
            *s == NegotiationState::Negotiating {
                role: Role::Initiator,
                peer,
            }
        }),
    )
    .await
    .unwrap()
    .unwrap();

    // candidates raised by the transport flow out through the loop
    factory.last().emit_candidate("local-1");
    intent_tx.send(LocalIntent::Hangup).await.unwrap();
    tokio::time::timeout(WAIT, states.wait_for(|s| *s == NegotiationState::Idle))
        .await
        .unwrap()
        .unwrap();

    drop(relay_tx);
    let client = tokio::time::timeout(WAIT, runner).await.unwrap().unwrap();

    assert_eq!(client.participant_id(), Some(me));
    assert_eq!(client.ice_servers(), default_ice_servers().as_slice());
    assert!(factory.last().is_closed());

    let sent = sink.sent();
    assert_eq!(
        sent.first(),
        Some(&ClientMessage::JoinRoom {
            room_id: RoomId::from("abc123")
        })
    );
    assert!(sent.contains(&ClientMessage::Offer {
        sdp: "offer-1".into()
    }));
    assert_eq!(sent.last(), Some(&ClientMessage::Leave));
}

#[tokio::test]
async fn test_run_returns_when_relay_closes() {
    init_tracing();
    let mut harness = create_test_client();

    let (relay_tx, relay_rx) = mpsc::unbounded_channel::<ServerMessage>();
    let (_intent_tx, intent_rx) = mpsc::channel(1);
    drop(relay_tx);

    tokio::time::timeout(WAIT, harness.client.run(relay_rx, intent_rx))
        .await
        .unwrap();

    assert_eq!(harness.client.state(), NegotiationState::Idle);
    assert!(harness.sink.sent().is_empty());
}

#[tokio::test]
async fn test_run_returns_after_hangup_when_intents_close() {
    init_tracing();
    let harness = create_test_client();
    let sink = harness.sink.clone();
    let mut client = harness.client;

    let (_relay_tx, relay_rx) = mpsc::unbounded_channel::<ServerMessage>();
    let (intent_tx, intent_rx) = mpsc::channel(8);
    intent_tx
        .send(LocalIntent::Join(RoomId::from("abc123")))
        .await
        .unwrap();
    intent_tx.send(LocalIntent::Hangup).await.unwrap();
    drop(intent_tx);

    // relay still open: only the closed intent channel ends the loop
    tokio::time::timeout(WAIT, client.run(relay_rx, intent_rx))
        .await
        .unwrap();

    assert_eq!(
        sink.sent(),
        vec![
            ClientMessage::JoinRoom {
                room_id: RoomId::from("abc123")
            },
            ClientMessage::Leave,
        ]
    );
    assert!(client.room().is_none());
    assert_eq!(client.state(), NegotiationState::Idle);
}
