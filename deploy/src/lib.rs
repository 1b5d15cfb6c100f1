//! Deployment tooling for the collateral contracts.
//!
//! Scripts refuse production chains and skip contracts that already have a
//! deployment record for the target network.

pub mod chain;
pub mod config;
pub mod deployer;
pub mod error;
pub mod registry;
pub mod rpc;
pub mod scripts;
pub mod units;

pub use error::{Error, Result};
