use signalink_core::utils::default_ice_servers;
use signalink_core::{ClientMessage, ServerMessage};

use crate::integration::init_tracing;
use crate::utils::{
    WsTestClient, members_of, other_user, spawn_relay, user_connected, user_disconnected,
    wait_until,
};

#[tokio::test]
async fn test_full_peer_cycle() {
    init_tracing();

    let (addr, relay) = spawn_relay().await.expect("Failed to start relay");
    let registry = relay.registry().clone();

    let mut a = WsTestClient::connect(addr).await.expect("A failed to connect");
    assert_eq!(a.ice_servers, default_ice_servers());

    a.join("abc123").await.expect("A join failed");
    let a_id = a.id;
    assert!(
        wait_until(|| {
            let registry = registry.clone();
            async move { members_of(&registry, "abc123") == vec![a_id] }
        })
        .await,
        "registry should be {{abc123: {{A}}}}"
    );

    let mut b = WsTestClient::connect(addr).await.expect("B failed to connect");
    b.join("abc123").await.expect("B join failed");

    assert_eq!(b.recv().await.unwrap(), other_user(a.id));
    assert_eq!(a.recv().await.unwrap(), user_connected(b.id));
    assert_eq!(members_of(&registry, "abc123"), vec![a.id, b.id]);

    b.send(&ClientMessage::Offer { sdp: "sdp1".into() })
        .await
        .unwrap();
    assert_eq!(
        a.recv().await.unwrap(),
        ServerMessage::Offer {
            sdp: "sdp1".into(),
            sender_id: b.id
        }
    );

    a.send(&ClientMessage::Answer { sdp: "sdp2".into() })
        .await
        .unwrap();
    assert_eq!(
        b.recv().await.unwrap(),
        ServerMessage::Answer {
            sdp: "sdp2".into(),
            sender_id: a.id
        }
    );

    a.close().await.unwrap();
    assert_eq!(b.recv().await.unwrap(), user_disconnected(a_id));
    assert_eq!(members_of(&registry, "abc123"), vec![b.id]);

    b.close().await.unwrap();
    assert!(
        wait_until(|| {
            let registry = registry.clone();
            async move { registry.room_count() == 0 }
        })
        .await,
        "registry should be empty once both left"
    );
}

#[tokio::test]
async fn test_each_disconnect_notifies_once() {
    init_tracing();

    let (addr, _relay) = spawn_relay().await.expect("Failed to start relay");

    let mut a = WsTestClient::connect(addr).await.unwrap();
    let mut b = WsTestClient::connect(addr).await.unwrap();
    a.join("room").await.unwrap();
    b.join("room").await.unwrap();
    assert_eq!(b.recv().await.unwrap(), other_user(a.id));
    assert_eq!(a.recv().await.unwrap(), user_connected(b.id));

    let b_id = b.id;
    drop(b);

    assert_eq!(a.recv().await.unwrap(), user_disconnected(b_id));
    a.expect_silence(300).await.unwrap();
}
