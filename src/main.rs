use std::{path::PathBuf, process::ExitCode, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use delegated_multicall::{connect, AppConfig, BatchPipeline, ContractInterfaces};

/// Send an EIP-7702 batch: one token transfer and two native transfers
/// executed atomically through a delegated multicall contract.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Network, contract, recipient and amount configuration
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// JSON ABI of the multicall contract
    #[arg(long, default_value = "abi/multicall.json")]
    multicall_abi: PathBuf,

    /// JSON ABI of the token contract
    #[arg(long, default_value = "abi/smpl_token.json")]
    token_abi: PathBuf,

    /// RPC endpoint, overrides network.rpcUrls[0]
    #[arg(long, env = "HOODI_RPC_URL")]
    rpc_url: Option<String>,

    /// Sender private key
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// Seconds to wait for the receipt, 0 waits indefinitely
    #[arg(long, default_value_t = 120)]
    receipt_timeout: u64,

    /// Do not compare eth_chainId with network.chainId
    #[arg(long)]
    skip_chain_check: bool,

    /// Build and sign, print the raw transaction, do not broadcast
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .format_timestamp(None)
        .init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = AppConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let interfaces = ContractInterfaces::load(&args.multicall_abi, &args.token_abi)
        .context("loading contract ABIs")?;
    log::info!(
        "Network: {} (chain id {})",
        config.network.chain_name,
        config.network.chain_id
    );

    let rpc_url = config.rpc_url(args.rpc_url.as_deref())?;
    let client = connect(&rpc_url).await?;
    let mut pipeline =
        BatchPipeline::new(&config, &interfaces, client).with_chain_check(!args.skip_chain_check);

    let prepared = pipeline.prepare(args.private_key.as_deref()).await?;
    if args.dry_run {
        log::info!("Dry run, transaction hash: {}", prepared.signed.hash);
        println!("{}", prepared.signed.raw);
        return Ok(());
    }

    let timeout = (args.receipt_timeout > 0).then(|| Duration::from_secs(args.receipt_timeout));
    pipeline
        .submit(&prepared, timeout)
        .await
        .context("Error sending transaction")?;
    Ok(())
}
