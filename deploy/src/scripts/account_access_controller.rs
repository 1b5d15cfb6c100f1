use super::{deploy_contract, DeployEnv, DeployScript};
use crate::error::Result;

pub struct AccountAccessControllerScript;

impl DeployScript for AccountAccessControllerScript {
    fn tags(&self) -> &'static [&'static str] {
        &["AccountAccessController"]
    }

    fn run(&self, env: &DeployEnv<'_>) -> Result<()> {
        deploy_contract(env, "AccountAccessController", vec![])?;
        Ok(())
    }
}
