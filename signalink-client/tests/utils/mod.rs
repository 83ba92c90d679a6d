pub mod test_relay;

pub use mock_media_source::MockMediaSource;
pub use mock_peer_connection::{MockPcHandle, MockPeerConnectionFactory, PcCall};
pub use mock_signal_sink::MockSignalSink;
pub use test_relay::spawn_relay;
