//! Contract instantiation with skip-if-already-deployed semantics.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};
use serde::Deserialize;

use crate::config::{NamedAccount, NetworkConfig};
use crate::error::{Error, Result};
use crate::registry::{DeploymentRecord, DeploymentRegistry};

/// Everything needed to create one contract instance.
pub struct InstantiateRequest<'a> {
    pub artifact: PathBuf,
    pub constructor: &'a str,
    pub args: &'a [String],
    pub url: &'a str,
    pub suri: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instantiated {
    pub address: String,
    pub code_hash: Option<String>,
}

/// Creates contract instances on a chain.
pub trait Instantiator {
    fn instantiate(&self, request: &InstantiateRequest<'_>) -> Result<Instantiated>;
}

/// [`Instantiator`] backed by the `cargo contract` CLI.
pub struct CargoContract {
    program: OsString,
}

impl Default for CargoContract {
    fn default() -> Self {
        Self { program: OsString::from("cargo") }
    }
}

/// The fields of `cargo contract instantiate --output-json` we read.
#[derive(Deserialize)]
struct InstantiateOutput {
    contract: Option<String>,
    code_hash: Option<String>,
}

impl CargoContract {
    /// `cargo contract instantiate` only takes the signer as `--suri`, so the
    /// secret is on the child's command line and readable by other local
    /// users through the process table.  Use throwaway testnet keys only.
    fn command(&self, request: &InstantiateRequest<'_>) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["contract", "instantiate"])
            .arg(&request.artifact)
            .args(["--constructor", request.constructor]);
        if !request.args.is_empty() {
            cmd.arg("--args").args(request.args);
        }
        cmd.args(["--suri", request.suri])
            .args(["--url", request.url])
            .args(["--execute", "--skip-confirm", "--output-json"]);
        cmd
    }
}

fn parse_instantiate_output(stdout: &[u8]) -> Result<Instantiated> {
    let output: InstantiateOutput = serde_json::from_slice(stdout)?;
    let address = output.contract.ok_or(Error::MissingAddress)?;
    Ok(Instantiated { address, code_hash: output.code_hash })
}

impl Instantiator for CargoContract {
    fn instantiate(&self, request: &InstantiateRequest<'_>) -> Result<Instantiated> {
        debug!(
            "cargo contract instantiate {} --constructor {} ({} args) --url {}",
            request.artifact.display(),
            request.constructor,
            request.args.len(),
            request.url
        );
        let output = self.command(request).output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Instantiate(stderr.trim().to_string()))
        }
        parse_instantiate_output(&output.stdout)
    }
}

pub struct DeployOptions<'a> {
    pub from: &'a NamedAccount,
    /// Artifact name, e.g. `CollateralDepositRecord`.
    pub contract: &'a str,
    pub constructor: &'a str,
    pub args: Vec<String>,
    pub skip_if_already_deployed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployResult {
    pub address: String,
    pub newly_deployed: bool,
}

/// Deployment helper bound to a single network.
pub struct Deployments<'a> {
    network: &'a NetworkConfig,
    registry: DeploymentRegistry,
    instantiator: &'a dyn Instantiator,
    artifacts_dir: PathBuf,
}

impl<'a> Deployments<'a> {
    pub fn new(
        network: &'a NetworkConfig,
        registry: DeploymentRegistry,
        instantiator: &'a dyn Instantiator,
        artifacts_dir: &Path,
    ) -> Self {
        Self { network, registry, instantiator, artifacts_dir: artifacts_dir.to_path_buf() }
    }

    pub fn get(&self, name: &str) -> Result<Option<DeploymentRecord>> {
        self.registry.get(name)
    }

    /// Deploy `name`, or return the recorded instance when
    /// `skip_if_already_deployed` is set and one exists.
    pub fn deploy(&self, name: &str, options: DeployOptions<'_>) -> Result<DeployResult> {
        if options.skip_if_already_deployed {
            if let Some(existing) = self.registry.get(name)? {
                debug!("{name} already recorded at {}", existing.address);
                return Ok(DeployResult { address: existing.address, newly_deployed: false })
            }
        }

        let request = InstantiateRequest {
            artifact: artifact_path(&self.artifacts_dir, options.contract),
            constructor: options.constructor,
            args: &options.args,
            url: &self.network.url,
            suri: &options.from.suri,
        };
        let instance = self.instantiator.instantiate(&request)?;
        info!("Instantiated {name} at {}", instance.address);

        self.registry.save(
            name,
            &DeploymentRecord {
                address: instance.address.clone(),
                code_hash: instance.code_hash,
                contract: options.contract.to_string(),
                args: options.args,
                deployer: options.from.name.clone(),
            },
        )?;

        Ok(DeployResult { address: instance.address, newly_deployed: true })
    }
}

/// `CollateralDepositRecord` -> `<dir>/collateral_deposit_record/collateral_deposit_record.contract`
pub fn artifact_path(artifacts_dir: &Path, contract: &str) -> PathBuf {
    let stem = to_snake_case(contract);
    artifacts_dir.join(&stem).join(format!("{stem}.contract"))
}

fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
