pub use signalink_core::model::{ParticipantId, RoomId};

pub mod model {
    pub use signalink_core::model::*;
    pub use signalink_core::utils;
}

#[cfg(feature = "server")]
pub mod server {
    pub use signalink_server::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use signalink_client::*;
}
