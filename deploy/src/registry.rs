//! On-disk record of what has been deployed where.
//!
//! One JSON file per contract per network:
//! `<deployments_dir>/<network>/<ContractName>.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_hash: Option<String>,
    /// Artifact the instance was created from.
    pub contract: String,
    pub args: Vec<String>,
    /// Name of the named account that signed the instantiation.
    pub deployer: String,
}

pub struct DeploymentRegistry {
    dir: PathBuf,
}

impl DeploymentRegistry {
    pub fn open(deployments_dir: &Path, network: &str) -> Self {
        Self { dir: deployments_dir.join(network) }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    pub fn get(&self, name: &str) -> Result<Option<DeploymentRecord>> {
        let contents = match fs::read_to_string(self.path_of(name)) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }

    pub fn save(&self, name: &str, record: &DeploymentRecord) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_of(name);
        debug!("Writing deployment record {}", path.display());
        fs::write(path, serde_json::to_string_pretty(record)?)?;
        Ok(())
    }
}
