//! Futures testnet bot
//!
//! Verifies credentials against the exchange once, then validates and
//! submits single orders.

mod credential_probe;
#[cfg(test)]
mod log_capture;
mod order_submitter;
mod trading_bot;

pub use credential_probe::CredentialProbe;
pub use order_submitter::OrderSubmitter;
pub use trading_bot::TradingBot;
