mod signal_sink;
mod ws_signal_channel;

pub use signal_sink::SignalSink;
pub use ws_signal_channel::{WsSignalChannel, WsSignalSink};
