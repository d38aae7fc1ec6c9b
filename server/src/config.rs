use crate::Error;
use calc_core::expr;
use std::{
    net::{Ipv4Addr, SocketAddr},
    str::FromStr,
};

/// Address to listen on.
pub const ENV_ADDR: &str = "CALC_ADDR";
/// Maximum request body size in bytes.
pub const ENV_MAX_BODY_BYTES: &str = "CALC_MAX_BODY_BYTES";
/// Maximum bracket nesting of an expression.
pub const ENV_MAX_DEPTH: &str = "CALC_MAX_DEPTH";

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
    pub max_body_bytes: usize,
    pub expr: expr::Config,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            expr: expr::Config::default(),
        }
    }
}

impl Config {
    /// Load from the process environment.
    /// Unset variables take their default value.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load using `var` to look up each variable.
    pub fn from_vars<F>(var: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        Ok(Self {
            addr: parse_var(&var, ENV_ADDR, default.addr)?,
            max_body_bytes: parse_var(&var, ENV_MAX_BODY_BYTES, default.max_body_bytes)?,
            expr: expr::Config {
                max_depth: parse_var(&var, ENV_MAX_DEPTH, default.expr.max_depth)?,
            },
        })
    }
}

fn parse_var<F, T>(var: &F, key: &'static str, default: T) -> Result<T, Error>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(value) = var(key) else {
        return Ok(default);
    };

    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidVar { key, value })
}
