use std::io;

use thiserror::Error;

use crate::chain::ChainId;

/// Everything that can stop a deployment run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid deploy config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Node RPC error: {0}")]
    Rpc(String),

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Unknown chain: {0}")]
    UnknownChain(String),

    #[error("Network {network} has no named account {account}")]
    MissingAccount { network: String, account: String },

    #[error("Environment variable {0} is not set")]
    MissingEnvVar(String),

    /// The target chain is a production chain. Fatal.
    #[error("Chain {0} is not a testnet, refusing to deploy")]
    NotTestnet(ChainId),

    /// The node runs a different chain than the network entry claims. Fatal.
    #[error("Network is configured as {configured} but the node reports {reported}")]
    ChainMismatch { configured: ChainId, reported: ChainId },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("cargo contract instantiate failed: {0}")]
    Instantiate(String),

    #[error("Instantiate output carries no contract address")]
    MissingAddress,

    #[error("Unknown deploy tag: {0}")]
    UnknownTag(String),
}

pub type Result<T> = std::result::Result<T, Error>;
