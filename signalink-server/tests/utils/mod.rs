pub mod test_client;

pub use signal_helpers::*;
pub use test_client::*;
pub use ws_test_client::*;
