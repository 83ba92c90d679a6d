use signalink_core::ClientMessage;

use crate::integration::{create_test_relay, init_tracing};
use crate::utils::TestClient;

#[tokio::test]
async fn test_message_before_join_is_noop() {
    init_tracing();

    let relay = create_test_relay();
    let mut waiting = TestClient::connect(&relay);
    waiting.join("abc123");

    let mut early = TestClient::connect(&relay);
    early.send(ClientMessage::Offer { sdp: "sdp".into() });
    early.send(ClientMessage::Answer { sdp: "sdp".into() });
    early.send(ClientMessage::IceCandidate {
        candidate: "c".into(),
    });
    early.send(ClientMessage::Leave);

    assert!(early.drain().is_empty());
    assert!(waiting.drain().is_empty());
    assert_eq!(relay.registry().room_count(), 1);
    assert_eq!(relay.connection_count(), 2);
}
