use clap::Args;
use signalink_core::IceServerConfig;
use signalink_core::utils::{DEFAULT_ROOM_CAPACITY, DEFAULT_STUN_ADDR, DEFAULT_STUN_ADDR_2};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Relay settings, read from flags with environment fallbacks.
#[derive(Debug, Clone, Args)]
pub struct RelayConfig {
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Allowed browser origin; any origin when unset.
    #[arg(long, env = "CORS_ORIGIN")]
    pub cors_origin: Option<String>,

    #[arg(long, default_value_t = DEFAULT_ROOM_CAPACITY)]
    pub room_capacity: usize,

    /// STUN server advertised to clients (repeatable).
    #[arg(long = "stun", value_name = "URL", default_values = [DEFAULT_STUN_ADDR, DEFAULT_STUN_ADDR_2])]
    pub stun_servers: Vec<String>,

    #[arg(long, env = "TURN_URL")]
    pub turn_url: Option<String>,

    #[arg(long, env = "TURN_USERNAME", requires = "turn_url")]
    pub turn_username: Option<String>,

    #[arg(long, env = "TURN_CREDENTIAL", requires = "turn_url")]
    pub turn_credential: Option<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3001,
            cors_origin: None,
            room_capacity: DEFAULT_ROOM_CAPACITY,
            stun_servers: vec![DEFAULT_STUN_ADDR.to_owned(), DEFAULT_STUN_ADDR_2.to_owned()],
            turn_url: None,
            turn_username: None,
            turn_credential: None,
        }
    }
}

impl RelayConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// ICE servers handed to every participant in its `welcome` frame.
    pub fn ice_servers(&self) -> Vec<IceServerConfig> {
        let mut servers: Vec<IceServerConfig> = self
            .stun_servers
            .iter()
            .map(|url| IceServerConfig::stun(url.clone()))
            .collect();

        if let Some(turn_url) = &self.turn_url {
            servers.push(IceServerConfig {
                urls: vec![turn_url.clone()],
                username: self.turn_username.clone(),
                credential: self.turn_credential.clone(),
            });
        }

        servers
    }
}
