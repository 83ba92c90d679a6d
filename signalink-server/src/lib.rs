mod config;
mod room;
mod router;
mod signaling;

pub use config::RelayConfig;
pub use room::*;
pub use router::{router, serve};
pub use signaling::*;
