//! Standalone credential check: runs the connectivity probe and prints the findings.
//!
//! Usage: check_credentials --api_key KEY --api_secret SECRET [--config bot.toml]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;

use futures_testnet_bot::config_loader::AppConfig;
use futures_testnet_bot::logging::setup_logging;
use futures_testnet_bot::{BinanceFuturesClient, ConnectivityReport, CredentialProbe, Credentials};

#[derive(Parser, Debug)]
#[command(name = "check_credentials", about = "Verify futures testnet API credentials")]
struct Args {
    #[arg(long = "api_key")]
    api_key: String,

    #[arg(long = "api_secret")]
    api_secret: String,

    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    let args = Args::parse();

    println!("Testing exchange API credentials...");
    match check(args).await {
        Ok((report, asset)) => {
            print_report(&report, &asset);
            println!("\n[SUCCESS] All tests passed! Credentials are valid.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("\n[ERROR] Credential Test Failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn check(args: Args) -> Result<(ConnectivityReport, String)> {
    let mut config = AppConfig::load(args.config.as_deref())?;
    // Console output is this tool's report; keep only the log file
    config.logging.console = false;
    setup_logging(&config.logging)?;

    let credentials = Credentials::testnet(args.api_key, args.api_secret);
    let base_url = config.base_url(credentials.environment());
    let client =
        BinanceFuturesClient::with_base_url(credentials, &base_url, config.exchange.recv_window_ms)?;

    let asset = config.exchange.settlement_asset.clone();
    let report = CredentialProbe::new(asset.clone()).verify(&client).await?;
    Ok((report, asset))
}

fn print_report(report: &ConnectivityReport, asset: &str) {
    println!(
        "[SUCCESS] API Connectivity: Working (Ping: {:.2}ms)",
        report.round_trip_latency_ms
    );
    println!("[SUCCESS] Server Time: {} UTC", report.server_time_display());
    println!("[SUCCESS] Account Information Received");
    println!("    Can Trade: {}", report.trading_enabled);
    println!("    Can Withdraw: {}", report.withdraw_enabled);
    println!("    Can Deposit: {}", report.deposit_enabled);
    match report.quote_asset_balance {
        Some(balance) => println!("[SUCCESS] {} Balance: {}", asset, balance),
        None => println!("[WARNING] No {} balance found", asset),
    }
}
