use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use log::{error, LevelFilter};
use simplelog::{ColorChoice, TermLogger, TerminalMode};

use deploy::{
    config::DeployConfig,
    deployer::{CargoContract, Deployments},
    registry::DeploymentRegistry,
    rpc::HttpNodeRpc,
    scripts::{self, DeployEnv},
};

#[derive(Parser)]
#[clap(version, about)]
struct Args {
    /// Deploy configuration file
    #[arg(short, long, default_value = "deploy.toml")]
    config: PathBuf,

    /// Network entry from the configuration file
    #[arg(short, long)]
    network: String,

    /// Only run scripts carrying one of these tags (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    tags: Vec<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(level, simplelog::Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;

    let config = DeployConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let network = config.network(&args.network)?;

    let registry = DeploymentRegistry::open(&config.deployments_dir, &args.network);
    let instantiator = CargoContract::default();
    let node = HttpNodeRpc::default();
    let deployments = Deployments::new(network, registry, &instantiator, &config.artifacts_dir);
    let env = DeployEnv::new(&args.network, network, &node, deployments);

    if let Err(e) = scripts::run_tagged(&env, &args.tags) {
        error!("Deployment to {} aborted: {e}", args.network);
        return Err(e.into())
    }
    Ok(())
}
