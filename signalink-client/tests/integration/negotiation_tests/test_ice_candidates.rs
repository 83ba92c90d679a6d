use signalink_client::NegotiationState;
use signalink_core::{ParticipantId, ServerMessage};

use crate::integration::{init_tracing, joined_client};

#[tokio::test]
async fn test_candidate_without_connection_dropped() {
    init_tracing();
    let mut harness = joined_client("abc123").await;

    harness
        .client
        .handle_signal(ServerMessage::IceCandidate {
            candidate: "early".into(),
            sender_id: ParticipantId::new(),
        })
        .await;

    assert!(harness.factory.created().is_empty());
    assert_eq!(harness.client.state(), NegotiationState::Idle);
    assert!(harness.sink.sent().is_empty());
}

#[tokio::test]
async fn test_candidates_from_peer_applied() {
    init_tracing();
    let mut harness = joined_client("abc123").await;
    let peer = ParticipantId::new();

    harness
        .client
        .handle_signal(ServerMessage::Offer {
            sdp: "remote-offer".into(),
            sender_id: peer,
        })
        .await;
    for candidate in ["c1", "c2"] {
        harness
            .client
            .handle_signal(ServerMessage::IceCandidate {
                candidate: candidate.into(),
                sender_id: peer,
            })
            .await;
    }
    harness
        .client
        .handle_signal(ServerMessage::IceCandidate {
            candidate: "foreign".into(),
            sender_id: ParticipantId::new(),
        })
        .await;

    assert_eq!(harness.factory.last().candidates(), vec!["c1", "c2"]);
}

#[tokio::test]
async fn test_rejected_candidate_is_not_fatal() {
    init_tracing();
    let mut harness = joined_client("abc123").await;
    let peer = ParticipantId::new();

    harness
        .client
        .handle_signal(ServerMessage::Offer {
            sdp: "remote-offer".into(),
            sender_id: peer,
        })
        .await;
    let before = harness.client.state();

    harness.factory.fail_add_ice(true);
    harness
        .client
        .handle_signal(ServerMessage::IceCandidate {
            candidate: "garbage".into(),
            sender_id: peer,
        })
        .await;

    assert_eq!(harness.client.state(), before);
    assert!(!harness.factory.last().is_closed());
    assert!(harness.client.last_failure().is_none());
}
