//! One deploy script per contract.
//!
//! Every script follows the same sequence: announce the deployer, ask the
//! node which chain it runs and refuse production chains, then deploy with `skip_if_already_deployed` so reruns
//! only report the existing instance.

mod account_access_controller;
mod collateral_deposit_record;
mod mock_base_token;

use log::{debug, info};

pub use account_access_controller::AccountAccessControllerScript;
pub use collateral_deposit_record::CollateralDepositRecordScript;
pub use mock_base_token::MockBaseTokenScript;

use crate::chain::{assert_is_testnet_chain, resolve_reported_chain, ChainId};
use crate::config::{NamedAccount, NetworkConfig};
use crate::deployer::{DeployOptions, DeployResult, Deployments};
use crate::error::{Error, Result};
use crate::rpc::NodeRpc;

/// Named account that signs every deployment.
pub const DEPLOYER: &str = "deployer";

/// What a script sees of the target network.
pub struct DeployEnv<'a> {
    pub network_name: &'a str,
    pub network: &'a NetworkConfig,
    pub node: &'a dyn NodeRpc,
    pub deployments: Deployments<'a>,
}

impl<'a> DeployEnv<'a> {
    pub fn new(
        network_name: &'a str,
        network: &'a NetworkConfig,
        node: &'a dyn NodeRpc,
        deployments: Deployments<'a>,
    ) -> Self {
        Self { network_name, network, node, deployments }
    }

    /// The chain the node reports, provided it matches the configured one.
    pub fn chain_id(&self) -> Result<ChainId> {
        let reported = self.node.system_chain(&self.network.url)?;
        debug!("{} reports chain {reported:?}", self.network.url);
        resolve_reported_chain(self.network.chain, &reported)
    }

    pub fn named_account(&self, name: &str) -> Result<NamedAccount> {
        self.network.named_account(self.network_name, name)
    }
}

pub trait DeployScript {
    /// Tags selecting this script from the command line.
    fn tags(&self) -> &'static [&'static str];

    fn run(&self, env: &DeployEnv<'_>) -> Result<()>;
}

pub fn all() -> Vec<Box<dyn DeployScript>> {
    vec![
        Box::new(AccountAccessControllerScript),
        Box::new(CollateralDepositRecordScript),
        Box::new(MockBaseTokenScript),
    ]
}

/// Run the scripts matching `tags` in declaration order, or every script
/// when `tags` is empty.  Unknown tags are rejected before anything runs.
pub fn run_tagged(env: &DeployEnv<'_>, tags: &[String]) -> Result<()> {
    let scripts = all();

    if let Some(unknown) =
        tags.iter().find(|tag| !scripts.iter().any(|s| s.tags().contains(&tag.as_str())))
    {
        return Err(Error::UnknownTag(unknown.clone()))
    }

    for script in scripts
        .iter()
        .filter(|s| tags.is_empty() || s.tags().iter().any(|t| tags.iter().any(|tag| tag == t)))
    {
        script.run(env)?;
    }
    Ok(())
}

/// Shared body of the per-contract scripts.
pub(crate) fn deploy_contract(
    env: &DeployEnv<'_>,
    contract: &str,
    args: Vec<String>,
) -> Result<DeployResult> {
    let deployer = env.named_account(DEPLOYER)?;
    info!("Running {contract} deploy script with {deployer} as the deployer");

    // Remove temporarily only for an intentional production deployment.
    assert_is_testnet_chain(env.chain_id()?)?;

    let result = env.deployments.deploy(
        contract,
        DeployOptions {
            from: &deployer,
            contract,
            constructor: "new",
            args,
            skip_if_already_deployed: true,
        },
    )?;

    if result.newly_deployed {
        info!("Deployed {contract} to {}", result.address);
    } else {
        info!("Existing {contract} at {}", result.address);
    }
    Ok(result)
}
