use async_trait::async_trait;

use crate::domain::model::account::{AccountInfo, AssetBalance, ServerTime};
use crate::domain::model::exchange::OrderRequest;
use crate::domain::model::order::OrderResult;
use crate::error::ExchangeError;

/// Remote futures API the bot depends on. Signing and transport live behind it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FuturesApi: Send + Sync {
    async fn ping(&self) -> Result<(), ExchangeError>;

    async fn server_time(&self) -> Result<ServerTime, ExchangeError>;

    async fn account(&self) -> Result<AccountInfo, ExchangeError>;

    async fn balances(&self) -> Result<Vec<AssetBalance>, ExchangeError>;

    async fn create_order(&self, request: &OrderRequest) -> Result<OrderResult, ExchangeError>;
}
