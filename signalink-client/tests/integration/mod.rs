
use std::sync::Arc;

use tracing::Level;

use signalink_client::NegotiationClient;
use signalink_core::utils::default_ice_servers;
use signalink_core::{ParticipantId, RoomId, ServerMessage};

use crate::utils::{MockMediaSource, MockPeerConnectionFactory, MockSignalSink};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub struct TestHarness {
    pub client: NegotiationClient,
    pub sink: MockSignalSink,
    pub factory: MockPeerConnectionFactory,
}

pub fn create_test_client() -> TestHarness {
    create_test_client_with(MockMediaSource::default())
}

pub fn create_test_client_with(media: MockMediaSource) -> TestHarness {
    let sink = MockSignalSink::default();
    let factory = MockPeerConnectionFactory::default();
    let client = NegotiationClient::new(
        Arc::new(sink.clone()),
        Arc::new(factory.clone()),
        Arc::new(media),
    );

    TestHarness {
        client,
        sink,
        factory,
    }
}

/// Welcomed and joined to `room`, with the outbound log cleared.
pub async fn joined_client(room: &str) -> TestHarness {
    let mut harness = create_test_client();
    harness
        .client
        .handle_signal(ServerMessage::Welcome {
            participant_id: ParticipantId::new(),
            ice_servers: default_ice_servers(),
        })
        .await;
    harness.client.join(RoomId::from(room)).await.unwrap();
    harness.sink.take();
    harness
}
