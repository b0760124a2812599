use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use log::debug;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::Sha256;
use url::Url;

use crate::domain::constants::*;
use crate::domain::model::account::{AccountInfo, AssetBalance, ServerTime};
use crate::domain::model::credentials::Credentials;
use crate::domain::model::exchange::OrderRequest;
use crate::domain::model::order::OrderResult;
use crate::domain::traits::FuturesApi;
use crate::error::ExchangeError;

use super::models::ApiErrorResponse;

type HmacSha256 = Hmac<Sha256>;

/// Hex-encoded HMAC-SHA256 of `payload` keyed by `secret`.
pub fn sign(secret: &str, payload: &str) -> String {
    // HMAC accepts keys of any length
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC can take key of any size"));
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// REST client for the USDⓈ-M futures API.
pub struct BinanceFuturesClient {
    client: Client,
    credentials: Credentials,
    base_url: Url,
    recv_window_ms: u64,
}

impl BinanceFuturesClient {
    /// Client for the credentials' own environment.
    pub fn new(credentials: Credentials) -> Result<Self, ExchangeError> {
        let base_url = credentials.environment().rest_url().to_string();
        Self::with_base_url(credentials, &base_url, DEFAULT_RECV_WINDOW_MS)
    }

    pub fn with_base_url(
        credentials: Credentials,
        base_url: &str,
        recv_window_ms: u64,
    ) -> Result<Self, ExchangeError> {
        Ok(Self {
            client: Client::new(),
            credentials,
            base_url: Url::parse(base_url)?,
            recv_window_ms,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn public_get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ExchangeError> {
        let url = self.base_url.join(path)?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        Self::decode(response).await
    }

    async fn signed<T, P>(&self, method: Method, path: &str, params: &P) -> Result<T, ExchangeError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let query = self.signed_query(params, Utc::now().timestamp_millis())?;

        let mut url = self.base_url.join(path)?;
        url.set_query(Some(&query));
        debug!("{} {}", method, path);

        let response = self
            .client
            .request(method, url)
            .header(API_KEY_HEADER, self.credentials.key())
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Appends `recvWindow`, `timestamp` and the signature over everything before it.
    fn signed_query<P>(&self, params: &P, timestamp: i64) -> Result<String, ExchangeError>
    where
        P: Serialize + ?Sized,
    {
        let mut query = serde_urlencoded::to_string(params)?;
        let window = serde_urlencoded::to_string(vec![
            ("recvWindow", self.recv_window_ms.to_string()),
            ("timestamp", timestamp.to_string()),
        ])?;
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(&window);

        let signature = sign(self.credentials.secret(), &query);
        Ok(format!("{}&signature={}", query, signature))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ExchangeError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(err) => ExchangeError::Api {
                    status: status.as_u16(),
                    code: err.code,
                    message: err.msg,
                },
                Err(_) => ExchangeError::InvalidResponse(format!(
                    "HTTP {} with unrecognised body: {}",
                    status, body
                )),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl FuturesApi for BinanceFuturesClient {
    async fn ping(&self) -> Result<(), ExchangeError> {
        let _: serde_json::Value = self.public_get(PING_PATH).await?;
        Ok(())
    }

    async fn server_time(&self) -> Result<ServerTime, ExchangeError> {
        self.public_get(TIME_PATH).await
    }

    async fn account(&self) -> Result<AccountInfo, ExchangeError> {
        self.signed(Method::GET, ACCOUNT_PATH, &()).await
    }

    async fn balances(&self) -> Result<Vec<AssetBalance>, ExchangeError> {
        self.signed(Method::GET, BALANCE_PATH, &()).await
    }

    async fn create_order(&self, request: &OrderRequest) -> Result<OrderResult, ExchangeError> {
        self.signed(Method::POST, ORDER_PATH, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::{OrderSide, OrderType, TimeInForce};

    #[test]
    fn test_sign_matches_documented_example() {
        // Example from the exchange's signed-endpoint documentation
        let secret = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
        let query = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";

        assert_eq!(
            sign(secret, query),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    fn local_client() -> BinanceFuturesClient {
        BinanceFuturesClient::with_base_url(
            Credentials::testnet("key", "secret"),
            "http://localhost:8080",
            5000,
        )
        .unwrap()
    }

    #[test]
    fn test_signed_query_appends_window_timestamp_and_signature() {
        let request = OrderRequest {
            symbol: "BTCUSDT".to_string(),
            side: OrderSide::Buy,
            order_type: OrderType::Limit,
            quantity: 0.5,
            price: Some(43000.5),
            time_in_force: Some(TimeInForce::Gtc),
        };

        let query = local_client().signed_query(&request, 1700000000000).unwrap();

        let unsigned = "symbol=BTCUSDT&side=BUY&type=LIMIT&quantity=0.5&price=43000.5\
                        &timeInForce=GTC&recvWindow=5000&timestamp=1700000000000";
        assert_eq!(query, format!("{}&signature={}", unsigned, sign("secret", unsigned)));
    }

    #[test]
    fn test_signed_query_without_params() {
        let query = local_client().signed_query(&(), 1700000000000).unwrap();

        let unsigned = "recvWindow=5000&timestamp=1700000000000";
        assert_eq!(query, format!("{}&signature={}", unsigned, sign("secret", unsigned)));
    }

    #[test]
    fn test_default_client_targets_testnet() {
        let client = BinanceFuturesClient::new(Credentials::testnet("key", "secret")).unwrap();
        assert_eq!(client.base_url().as_str(), "https://testnet.binancefuture.com/");
    }
}
