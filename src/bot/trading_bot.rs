use log::{error, info};

use crate::config_loader::AppConfig;
use crate::domain::model::credentials::Credentials;
use crate::domain::model::order::OrderResult;
use crate::domain::model::report::ConnectivityReport;
use crate::domain::traits::FuturesApi;
use crate::error::{Error, Result};
use crate::infrastructure::exchange::binance::BinanceFuturesClient;

use super::credential_probe::CredentialProbe;
use super::order_submitter::OrderSubmitter;

/// Exchange handle that has passed the credential probe.
///
/// The probe runs inside `connect`, so a bot only exists for credentials
/// the exchange accepted.
pub struct TradingBot<A: FuturesApi = BinanceFuturesClient> {
    api: A,
    submitter: OrderSubmitter,
    report: ConnectivityReport,
}

impl TradingBot<BinanceFuturesClient> {
    /// Builds the REST client for `credentials` and verifies it.
    pub async fn from_credentials(credentials: Credentials, config: &AppConfig) -> Result<Self> {
        let base_url = config.base_url(credentials.environment());
        let api = BinanceFuturesClient::with_base_url(
            credentials,
            &base_url,
            config.exchange.recv_window_ms,
        )
        .map_err(|e| {
            error!("Initialization failed: {}", e);
            Error::Config(format!("invalid exchange base URL '{}': {}", base_url, e))
        })?;

        Self::connect(api, config).await
    }
}

impl<A: FuturesApi> TradingBot<A> {
    pub async fn connect(api: A, config: &AppConfig) -> Result<Self> {
        let settlement_asset = config.exchange.settlement_asset.clone();

        let report = match CredentialProbe::new(settlement_asset.clone()).verify(&api).await {
            Ok(report) => report,
            Err(e) => {
                error!("Initialization failed: {}", e);
                return Err(e.into());
            }
        };
        info!("Trading bot initialized successfully");

        Ok(Self {
            api,
            submitter: OrderSubmitter::new(settlement_asset),
            report,
        })
    }

    /// Probe results gathered at construction.
    pub fn report(&self) -> &ConnectivityReport {
        &self.report
    }

    pub async fn place(
        &self,
        symbol: &str,
        side: &str,
        order_type: &str,
        quantity: &str,
        price: Option<&str>,
    ) -> Result<OrderResult> {
        self.submitter
            .place(&self.api, symbol, side, order_type, quantity, price)
            .await
    }
}
