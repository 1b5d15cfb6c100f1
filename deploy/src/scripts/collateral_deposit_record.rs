use super::{deploy_contract, DeployEnv, DeployScript};
use crate::error::Result;
use crate::units::parse_ether;

pub const GLOBAL_DEPOSIT_CAP: &str = "100000";
pub const ACCOUNT_DEPOSIT_CAP: &str = "1000";

pub struct CollateralDepositRecordScript;

impl CollateralDepositRecordScript {
    /// Constructor arguments in base units: global cap, then account cap.
    pub fn constructor_args() -> Result<Vec<String>> {
        let global_deposit_cap = parse_ether(GLOBAL_DEPOSIT_CAP)?;
        let account_deposit_cap = parse_ether(ACCOUNT_DEPOSIT_CAP)?;
        Ok(vec![global_deposit_cap.to_string(), account_deposit_cap.to_string()])
    }
}

impl DeployScript for CollateralDepositRecordScript {
    fn tags(&self) -> &'static [&'static str] {
        &["CollateralDepositRecord"]
    }

    fn run(&self, env: &DeployEnv<'_>) -> Result<()> {
        deploy_contract(env, "CollateralDepositRecord", Self::constructor_args()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_are_passed_in_base_units() {
        assert_eq!(
            CollateralDepositRecordScript::constructor_args().unwrap(),
            vec!["100000000000000000000000".to_string(), "1000000000000000000000".to_string()]
        );
    }
}
