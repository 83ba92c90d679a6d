mod session;
mod signaling_service;
mod ws_handler;

pub use session::Session;
pub use signaling_service::SignalingService;
pub use ws_handler::ws_handler;
