use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;
use tracing::Level;

/// Command line and environment configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "reachard", version, about = "Registry of monitored targets", long_about = None)]
pub struct Config {
    /// Port to listen on
    #[arg(short, long, env = "REACHARD_PORT", default_value_t = 7272)]
    pub port: u16,

    /// Address to bind to
    #[arg(long, env = "REACHARD_ADDRESS", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub address: IpAddr,

    /// PostgreSQL connection URL
    #[arg(long, env = "REACHARD_DB_URL", default_value = "postgresql://reachard@/reachard")]
    pub db_url: String,

    /// Maximum number of pooled database connections
    #[arg(long, env = "REACHARD_DB_POOL_SIZE", default_value_t = 8, value_parser = clap::value_parser!(u32).range(1..))]
    pub db_pool_size: u32,

    /// Maximum log level
    #[arg(long, env = "REACHARD_LOG", default_value_t = Level::INFO)]
    pub log_level: Level,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    use super::*;

    #[test]
    fn definition_is_valid() {
        Config::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["reachard"]).unwrap();

        assert_eq!(config.port, 7272);
        assert_eq!(config.db_pool_size, 8);
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.socket_addr(), "0.0.0.0:7272".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "reachard",
            "--port",
            "8080",
            "--address",
            "127.0.0.1",
            "--db-url",
            "postgresql://user@db/targets",
            "--db-pool-size",
            "2",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(config.socket_addr(), "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.db_url, "postgresql://user@db/targets");
        assert_eq!(config.db_pool_size, 2);
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn rejects_non_numeric_port() {
        let error = Config::try_parse_from(["reachard", "--port", "http"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn rejects_empty_pool() {
        assert!(Config::try_parse_from(["reachard", "--db-pool-size", "0"]).is_err());
    }
}
