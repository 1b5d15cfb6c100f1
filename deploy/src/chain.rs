//! Known contract chains and the testnet guard run before every deployment.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChainId {
    /// A local `substrate-contracts-node` or similar dev chain.
    Local,
    Shibuya,
    AlephZeroTestnet,
    PopTestnet,
    Astar,
    Shiden,
    AlephZero,
}

impl ChainId {
    pub const ALL: [ChainId; 7] = [
        ChainId::Local,
        ChainId::Shibuya,
        ChainId::AlephZeroTestnet,
        ChainId::PopTestnet,
        ChainId::Astar,
        ChainId::Shiden,
        ChainId::AlephZero,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChainId::Local => "local",
            ChainId::Shibuya => "shibuya",
            ChainId::AlephZeroTestnet => "aleph-zero-testnet",
            ChainId::PopTestnet => "pop-testnet",
            ChainId::Astar => "astar",
            ChainId::Shiden => "shiden",
            ChainId::AlephZero => "aleph-zero",
        }
    }

    /// Map the name a node reports from `system_chain` to a known chain.
    pub fn from_system_chain(name: &str) -> Option<ChainId> {
        let chain = match name {
            "Development" | "Local Testnet" => ChainId::Local,
            "Shibuya Testnet" | "Shibuya" => ChainId::Shibuya,
            "Aleph Zero Testnet" => ChainId::AlephZeroTestnet,
            "Pop Network Testnet" | "Pop Testnet" => ChainId::PopTestnet,
            "Astar" => ChainId::Astar,
            "Shiden" => ChainId::Shiden,
            "Aleph Zero" => ChainId::AlephZero,
            _ => return None,
        };
        Some(chain)
    }

    pub fn is_testnet(&self) -> bool {
        matches!(
            self,
            ChainId::Local | ChainId::Shibuya | ChainId::AlephZeroTestnet | ChainId::PopTestnet
        )
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ChainId::ALL
            .into_iter()
            .find(|chain| chain.as_str() == s)
            .ok_or_else(|| Error::UnknownChain(s.to_string()))
    }
}

/// Abort unless `chain` is a testnet.
///
/// Deploy scripts call this before touching the chain so a misconfigured
/// network can never produce a production deployment.
pub fn assert_is_testnet_chain(chain: ChainId) -> Result<()> {
    if !chain.is_testnet() {
        return Err(Error::NotTestnet(chain))
    }
    Ok(())
}

/// Check the chain a node reports against the configured one.
///
/// Unrecognised names are refused: a node we cannot classify is never
/// assumed to be a testnet.
pub fn resolve_reported_chain(configured: ChainId, reported: &str) -> Result<ChainId> {
    let actual =
        ChainId::from_system_chain(reported).ok_or_else(|| Error::UnknownChain(reported.to_string()))?;
    if actual != configured {
        return Err(Error::ChainMismatch { configured, reported: actual })
    }
    Ok(actual)
}
