use super::{deploy_contract, DeployEnv, DeployScript};
use crate::error::Result;

/// Test-network base token.  Mint rights are configured after deployment
/// with `set_mock_strategy`.
pub struct MockBaseTokenScript;

impl DeployScript for MockBaseTokenScript {
    fn tags(&self) -> &'static [&'static str] {
        &["MockBaseToken"]
    }

    fn run(&self, env: &DeployEnv<'_>) -> Result<()> {
        deploy_contract(env, "MockBaseToken", vec![])?;
        Ok(())
    }
}
