use std::time::Instant;

use chrono::{DateTime, Utc};
use log::{error, info, warn};

use crate::domain::model::report::ConnectivityReport;
use crate::domain::traits::FuturesApi;
use crate::error::{ExchangeError, ProbeStep, VerificationFailed};

/// Read-only sequence that proves the exchange is reachable and the
/// credentials are accepted. Runs once, no retries, first failure aborts.
pub struct CredentialProbe {
    settlement_asset: String,
}

impl CredentialProbe {
    pub fn new(settlement_asset: impl Into<String>) -> Self {
        Self {
            settlement_asset: settlement_asset.into(),
        }
    }

    pub async fn verify<A>(&self, api: &A) -> Result<ConnectivityReport, VerificationFailed>
    where
        A: FuturesApi + ?Sized,
    {
        // 1. Connectivity
        let started = Instant::now();
        api.ping().await.map_err(|e| fail(ProbeStep::Ping, e))?;
        let round_trip_latency_ms = started.elapsed().as_secs_f64() * 1000.0;
        info!("API Connection Successful | Ping: {:.2}ms", round_trip_latency_ms);

        // 2. Clock
        let time = api
            .server_time()
            .await
            .map_err(|e| fail(ProbeStep::ServerTime, e))?;
        let server_time = DateTime::<Utc>::from_timestamp_millis(time.server_time).ok_or_else(|| {
            fail(
                ProbeStep::ServerTime,
                ExchangeError::InvalidResponse(format!(
                    "server time {} is out of range",
                    time.server_time
                )),
            )
        })?;
        info!(
            "Exchange Server Time: {} UTC",
            server_time.format("%Y-%m-%d %H:%M:%S")
        );

        // 3. Authorization scope
        let account = api.account().await.map_err(|e| fail(ProbeStep::Account, e))?;
        info!(
            "Account Status: CanTrade={} CanWithdraw={} CanDeposit={}",
            account.can_trade, account.can_withdraw, account.can_deposit
        );

        // 4. Settlement asset balance, reporting only: absent or unreadable just warns
        let balances = api.balances().await.map_err(|e| fail(ProbeStep::Balance, e))?;
        let quote_asset_balance = match balances
            .iter()
            .find(|b| b.asset == self.settlement_asset)
        {
            Some(entry) => match entry.balance.trim().parse::<f64>() {
                Ok(amount) => {
                    info!("Available Balance: {} {}", entry.balance, self.settlement_asset);
                    Some(amount)
                }
                Err(e) => {
                    warn!(
                        "Unreadable {} balance '{}': {}",
                        self.settlement_asset, entry.balance, e
                    );
                    None
                }
            },
            None => {
                warn!("No {} balance found", self.settlement_asset);
                None
            }
        };

        Ok(ConnectivityReport {
            reachable: true,
            round_trip_latency_ms,
            server_time,
            trading_enabled: account.can_trade,
            withdraw_enabled: account.can_withdraw,
            deposit_enabled: account.can_deposit,
            quote_asset_balance,
        })
    }
}

fn fail(step: ProbeStep, err: ExchangeError) -> VerificationFailed {
    match &err {
        ExchangeError::Api {
            status, message, ..
        } => error!("API Error: {} - {}", status, message),
        other => error!("Connection test failed at {}: {}", step, other),
    }
    VerificationFailed::from_exchange(step, &err)
}
