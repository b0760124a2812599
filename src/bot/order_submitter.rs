use log::{debug, error, info};

use crate::domain::enums::{OrderSide, OrderType, TimeInForce};
use crate::domain::model::exchange::OrderRequest;
use crate::domain::model::order::OrderResult;
use crate::domain::traits::FuturesApi;
use crate::error::{Error, TradingError, ValidationError};

/// Validates raw order input and sends it as a single order.
///
/// Validation is local and happens before any network call. Nothing is
/// retried and no client order id is attached, so repeating a call places
/// another order.
pub struct OrderSubmitter {
    settlement_asset: String,
}

impl OrderSubmitter {
    pub fn new(settlement_asset: impl Into<String>) -> Self {
        Self {
            settlement_asset: settlement_asset.into(),
        }
    }

    /// Turns raw user input into a normalized request, or names the first rule it breaks.
    ///
    /// Rules are checked in order: symbol, side, quantity, order type, then
    /// price for limit orders. A price given with a market order is dropped.
    pub fn validate(
        &self,
        symbol: &str,
        side: &str,
        order_type: &str,
        quantity: &str,
        price: Option<&str>,
    ) -> Result<OrderRequest, ValidationError> {
        let symbol = symbol.trim().to_uppercase();
        if !symbol.ends_with(&self.settlement_asset) {
            return Err(ValidationError::NotSettlementPair {
                symbol,
                asset: self.settlement_asset.clone(),
            });
        }

        let side: OrderSide = side.parse()?;

        let quantity = quantity
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::MalformedQuantity(quantity.to_string()))?;
        if !is_positive(quantity) {
            return Err(ValidationError::NonPositiveQuantity(quantity));
        }

        let order_type: OrderType = order_type.parse()?;

        let (price, time_in_force) = match order_type {
            OrderType::Limit => {
                let raw = price.ok_or(ValidationError::MissingPrice)?;
                let price = raw
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| ValidationError::MalformedPrice(raw.to_string()))?;
                if !is_positive(price) {
                    return Err(ValidationError::NonPositivePrice(price));
                }
                (Some(price), Some(TimeInForce::Gtc))
            }
            OrderType::Market => {
                if let Some(ignored) = price {
                    debug!("Ignoring price {} for market order", ignored);
                }
                (None, None)
            }
        };

        Ok(OrderRequest {
            symbol,
            side,
            order_type,
            quantity,
            price,
            time_in_force,
        })
    }

    /// Sends an already validated request, translating exchange failures.
    pub async fn submit<A>(&self, api: &A, request: &OrderRequest) -> Result<OrderResult, TradingError>
    where
        A: FuturesApi + ?Sized,
    {
        info!("Placing order: {:?}", request);

        match api.create_order(request).await {
            Ok(result) => {
                info!("Order successful: {}", result);
                Ok(result)
            }
            Err(e) => {
                let err = TradingError::from(e);
                error!("{}", err);
                Err(err)
            }
        }
    }

    /// Validate, then submit. A rejected input never reaches the exchange.
    pub async fn place<A>(
        &self,
        api: &A,
        symbol: &str,
        side: &str,
        order_type: &str,
        quantity: &str,
        price: Option<&str>,
    ) -> Result<OrderResult, Error>
    where
        A: FuturesApi + ?Sized,
    {
        let request = self
            .validate(symbol, side, order_type, quantity, price)
            .map_err(|e| {
                error!("Order rejected ({}): {}", e.rule(), e);
                e
            })?;

        Ok(self.submit(api, &request).await?)
    }
}

// NaN and infinities are rejected along with zero and negatives
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
