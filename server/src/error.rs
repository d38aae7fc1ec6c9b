use std::{io, net::SocketAddr};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An environment variable could not be parsed.
    #[error("invalid value `{value}` for `{key}`")]
    InvalidVar { key: &'static str, value: String },

    #[error("could not bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server failed: {0}")]
    Serve(#[from] io::Error),
}
