// Standard library imports
use std::path::PathBuf;
use std::process::ExitCode;

// External crate imports
use clap::builder::PossibleValuesParser;
use clap::Parser;
use dotenv::dotenv;
use log::info;

// Internal crate imports
use futures_testnet_bot::config_loader::AppConfig;
use futures_testnet_bot::domain::constants::TESTNET_URL;
use futures_testnet_bot::logging::setup_logging;
use futures_testnet_bot::{Credentials, Error, OrderResult, TradingBot};

#[derive(Parser, Debug)]
#[command(
    name = "trading-bot",
    about = "Futures Testnet Trading Bot",
    after_help = "Examples:\n  \
        Market Buy: trading-bot BTCUSDT buy market 0.001 --api_key YOUR_KEY --api_secret YOUR_SECRET\n  \
        Limit Sell: trading-bot ETHUSDT sell limit 0.1 2500 --api_key YOUR_KEY --api_secret YOUR_SECRET"
)]
struct Args {
    /// Trading pair (e.g., BTCUSDT)
    symbol: String,

    /// Order side
    #[arg(value_parser = PossibleValuesParser::new(["buy", "sell"]), ignore_case = true)]
    side: String,

    /// Order type
    #[arg(value_parser = PossibleValuesParser::new(["market", "limit"]), ignore_case = true)]
    order_type: String,

    /// Order quantity
    #[arg(allow_hyphen_values = true)]
    quantity: String,

    /// Price for limit orders (required for limit type)
    #[arg(allow_hyphen_values = true)]
    price: Option<String>,

    /// Exchange API key
    #[arg(long = "api_key")]
    api_key: String,

    /// Exchange API secret
    #[arg(long = "api_secret")]
    api_secret: String,

    /// TOML config file (defaults to $TRADING_BOT_CONFIG, then built-in values)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    let args = Args::parse();

    match run(args).await {
        Ok(result) => {
            print_order(&result);
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<OrderResult> {
    let config = AppConfig::load(args.config.as_deref())?;
    setup_logging(&config.logging)?;
    info!("Logger initialized");

    println!("Initializing bot and testing API credentials...");
    let credentials = Credentials::testnet(args.api_key, args.api_secret);
    let bot = TradingBot::from_credentials(credentials, &config).await?;

    println!("Placing order...");
    let result = bot
        .place(
            &args.symbol,
            &args.side,
            &args.order_type,
            &args.quantity,
            args.price.as_deref(),
        )
        .await?;

    Ok(result)
}

fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<Error>() {
        Some(Error::Validation(e)) => {
            println!("\n[ERROR] Validation Error: {}", e);
            println!("Use -h for help with command usage");
        }
        Some(Error::Trading(e)) => println!("\n[ERROR] Trading Error: {}", e),
        _ => println!("\n[ERROR] Unexpected Error: {}", err),
    }
}

fn print_order(result: &OrderResult) {
    let rule = "=".repeat(50);
    println!("\n{}", rule);
    println!("[SUCCESS] Order Execution Details:");
    println!("{}", rule);
    println!("Order ID: {}", result.order_id);
    println!("Symbol: {}", result.symbol);
    println!("Status: {}", result.status);
    println!("Side: {}", result.side);
    println!("Type: {}", result.order_type);
    println!("Quantity: {}", result.requested_quantity);
    if let Some(price) = &result.price {
        println!("Price: {}", price);
    }
    println!("Executed Qty: {}", result.executed_quantity);
    if let Some(avg_price) = &result.average_price {
        println!("Avg Price: {}", avg_price);
    }
    println!("{}", rule);
    println!("Check the exchange testnet for full order details");
    println!("{}", TESTNET_URL);
}
