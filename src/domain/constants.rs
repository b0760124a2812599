// Exchange endpoints and defaults shared by the client and the bot.

/// Asset in which USDⓈ-M futures are margined and settled.
pub const SETTLEMENT_ASSET: &str = "USDT";

/// Serves both the REST API and the web UI.
pub const TESTNET_URL: &str = "https://testnet.binancefuture.com";

pub const PING_PATH: &str = "/fapi/v1/ping";
pub const TIME_PATH: &str = "/fapi/v1/time";
pub const ACCOUNT_PATH: &str = "/fapi/v2/account";
pub const BALANCE_PATH: &str = "/fapi/v2/balance";
pub const ORDER_PATH: &str = "/fapi/v1/order";

pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";
pub const DEFAULT_RECV_WINDOW_MS: u64 = 5000;
