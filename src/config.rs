use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::error::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Reads `HOST` and `PORT`, after loading a `.env` file if one exists.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Self::from_vars(lookup("HOST")?, lookup("PORT")?)
    }

    fn from_vars(host: Option<String>, port: Option<String>) -> Result<Self, Error> {
        let mut config = Self::default();

        if let Some(host) = host {
            config.host = host.trim().parse()?;
        }
        if let Some(port) = port {
            config.port = port.trim().parse()?;
        }

        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn lookup(key: &str) -> Result<Option<String>, Error> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[test]
fn defaults() {
    let config = Config::from_vars(None, None).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.addr(), SocketAddr::from(([0, 0, 0, 0], 3000)));
}

#[test]
fn explicit_values() {
    let config = Config::from_vars(Some("127.0.0.1".into()), Some(" 8080 ".into())).unwrap();

    assert_eq!(config.addr(), SocketAddr::from(([127, 0, 0, 1], 8080)));
}

#[test]
fn invalid_values() {
    let err = Config::from_vars(None, Some("eighty".into())).unwrap_err();
    assert_eq!(err.code, 6);

    let err = Config::from_vars(None, Some("70000".into())).unwrap_err();
    assert_eq!(err.code, 6);

    let err = Config::from_vars(Some("localhost:1".into()), None).unwrap_err();
    assert_eq!(err.code, 6);
}
