mod peer_connection;
mod rtc_peer_connection;
mod transport_event;

pub use peer_connection::*;
pub use rtc_peer_connection::*;
pub use transport_event::*;
