use crate::model::IceServerConfig;

pub const DEFAULT_STUN_ADDR: &str = "stun:stun.l.google.com:19302";
pub const DEFAULT_STUN_ADDR_2: &str = "stun:stun1.l.google.com:19302";

/// Maximum number of participants a room admits.
pub const DEFAULT_ROOM_CAPACITY: usize = 2;

pub fn default_ice_servers() -> Vec<IceServerConfig> {
    vec![
        IceServerConfig::stun(DEFAULT_STUN_ADDR),
        IceServerConfig::stun(DEFAULT_STUN_ADDR_2),
    ]
}
