//! `deploy.toml` loading.
//!
//! ```toml
//! artifacts_dir = "target/ink"
//! deployments_dir = "deployments"
//!
//! [networks.local]
//! url = "ws://127.0.0.1:9944"
//! chain = "local"
//! accounts = { deployer = "//Alice" }
//!
//! [networks.shibuya]
//! url = "wss://rpc.shibuya.astar.network"
//! chain = "shibuya"
//! accounts = { deployer = "env:SHIBUYA_DEPLOYER_SURI" }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::chain::ChainId;
use crate::error::{Error, Result};

/// Prefix marking an account value as the name of an environment variable.
const ENV_PREFIX: &str = "env:";

#[derive(Debug, Deserialize)]
pub struct DeployConfig {
    /// Where `cargo contract build` leaves `<crate>/<crate>.contract` bundles.
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,

    /// Root of the per-network deployment records.
    #[serde(default = "default_deployments_dir")]
    pub deployments_dir: PathBuf,

    #[serde(default)]
    pub networks: BTreeMap<String, NetworkConfig>,
}

#[derive(Debug, Deserialize)]
pub struct NetworkConfig {
    pub url: String,
    pub chain: ChainId,
    /// Named accounts, values are SURIs or `env:VAR` references.
    #[serde(default)]
    pub accounts: BTreeMap<String, String>,
}

/// A resolved signing account.  Only the name is ever printed.
#[derive(Clone, PartialEq, Eq)]
pub struct NamedAccount {
    pub name: String,
    pub suri: String,
}

impl fmt::Display for NamedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for NamedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedAccount").field("name", &self.name).finish_non_exhaustive()
    }
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("target/ink")
}

fn default_deployments_dir() -> PathBuf {
    PathBuf::from("deployments")
}

impl DeployConfig {
    /// Load `path`.  Relative directories in the file are taken relative to
    /// the file's own directory, not the working directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&contents)?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    /// Prefix relative directories with `base`.  Absolute ones are kept.
    pub fn resolve_relative_to(&mut self, base: &Path) {
        self.artifacts_dir = base.join(&self.artifacts_dir);
        self.deployments_dir = base.join(&self.deployments_dir);
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn network(&self, name: &str) -> Result<&NetworkConfig> {
        self.networks.get(name).ok_or_else(|| Error::UnknownNetwork(name.to_string()))
    }
}

impl NetworkConfig {
    /// Resolve the named account `name`, reading `env:` references from the
    /// environment.
    pub fn named_account(&self, network: &str, name: &str) -> Result<NamedAccount> {
        let value = self.accounts.get(name).ok_or_else(|| Error::MissingAccount {
            network: network.to_string(),
            account: name.to_string(),
        })?;

        let suri = match value.strip_prefix(ENV_PREFIX) {
            Some(var) => std::env::var(var).map_err(|_| Error::MissingEnvVar(var.to_string()))?,
            None => value.clone(),
        };

        Ok(NamedAccount { name: name.to_string(), suri })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        deployments_dir = "out/deployments"

        [networks.local]
        url = "ws://127.0.0.1:9944"
        chain = "local"
        accounts = { deployer = "//Alice" }

        [networks.astar]
        url = "wss://rpc.astar.network"
        chain = "astar"
        accounts = { deployer = "env:DEPLOY_CONFIG_TEST_UNSET_SURI" }
    "#;

    #[test]
    fn parses_networks_and_defaults() {
        let config = DeployConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.artifacts_dir, PathBuf::from("target/ink"));
        assert_eq!(config.deployments_dir, PathBuf::from("out/deployments"));

        let local = config.network("local").unwrap();
        assert_eq!(local.chain, ChainId::Local);
        assert_eq!(local.url, "ws://127.0.0.1:9944");
        assert_eq!(config.network("astar").unwrap().chain, ChainId::Astar);
    }

    #[test]
    fn load_resolves_directories_next_to_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        let absolute = tmp.path().join("abs-artifacts");
        let path = tmp.path().join("deploy.toml");
        fs::write(&path, format!("artifacts_dir = {:?}\n{SAMPLE}", absolute.display().to_string()))
            .unwrap();

        let config = DeployConfig::load(&path).unwrap();
        assert_eq!(config.deployments_dir, tmp.path().join("out/deployments"));
        assert_eq!(config.artifacts_dir, absolute);
    }

    #[test]
    fn bare_file_name_keeps_relative_directories() {
        let mut config = DeployConfig::from_toml_str(SAMPLE).unwrap();
        config.resolve_relative_to(Path::new(""));
        assert_eq!(config.deployments_dir, PathBuf::from("out/deployments"));
        assert_eq!(config.artifacts_dir, PathBuf::from("target/ink"));
    }

    #[test]
    fn unknown_network_is_an_error() {
        let config = DeployConfig::from_toml_str(SAMPLE).unwrap();
        assert!(matches!(config.network("kusama"), Err(Error::UnknownNetwork(n)) if n == "kusama"));
    }

    #[test]
    fn unknown_chain_fails_to_parse() {
        let bad = "[networks.x]\nurl = \"ws://x\"\nchain = \"mainnet\"\n";
        assert!(matches!(DeployConfig::from_toml_str(bad), Err(Error::Config(_))));
    }

    #[test]
    fn literal_account_resolves() {
        let config = DeployConfig::from_toml_str(SAMPLE).unwrap();
        let deployer = config.network("local").unwrap().named_account("local", "deployer").unwrap();
        assert_eq!(deployer.suri, "//Alice");
        assert_eq!(deployer.to_string(), "deployer");
        assert!(!format!("{deployer:?}").contains("Alice"));
    }

    #[test]
    fn env_account_requires_variable() {
        let config = DeployConfig::from_toml_str(SAMPLE).unwrap();
        let astar = config.network("astar").unwrap();
        assert!(matches!(
            astar.named_account("astar", "deployer"),
            Err(Error::MissingEnvVar(var)) if var == "DEPLOY_CONFIG_TEST_UNSET_SURI"
        ));
        assert!(matches!(
            astar.named_account("astar", "treasury"),
            Err(Error::MissingAccount { .. })
        ));
    }
}
