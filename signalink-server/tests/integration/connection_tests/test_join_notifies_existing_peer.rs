use signalink_core::RoomId;

use crate::integration::{create_test_relay, init_tracing};
use crate::utils::{TestClient, members_of, other_user, user_connected};

#[tokio::test]
async fn test_first_joiner_gets_no_other_user() {
    init_tracing();

    let relay = create_test_relay();
    let mut a = TestClient::connect(&relay);

    a.join("abc123");

    assert!(a.drain().is_empty());
    assert_eq!(a.room(), Some(&RoomId::from("abc123")));
    assert_eq!(members_of(relay.registry(), "abc123"), vec![a.id()]);
}

#[tokio::test]
async fn test_second_joiner_gets_other_user() {
    init_tracing();

    let relay = create_test_relay();
    let mut a = TestClient::connect(&relay);
    let mut b = TestClient::connect(&relay);

    a.join("abc123");
    b.join("abc123");

    assert_eq!(b.drain(), vec![other_user(a.id())]);
    assert_eq!(a.drain(), vec![user_connected(b.id())]);
    assert_eq!(members_of(relay.registry(), "abc123"), vec![a.id(), b.id()]);
}

#[tokio::test]
async fn test_rooms_are_isolated() {
    init_tracing();

    let relay = create_test_relay();
    let mut a = TestClient::connect(&relay);
    let mut b = TestClient::connect(&relay);

    a.join("red");
    b.join("blue");

    assert!(a.drain().is_empty());
    assert!(b.drain().is_empty());
    assert_eq!(relay.registry().room_count(), 2);
}
