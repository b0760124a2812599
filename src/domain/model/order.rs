// Domain model for orders accepted by the exchange
use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Order as acknowledged by the exchange, surfaced verbatim.
///
/// Quantities and prices stay in the exchange's decimal-string form.
/// Fields not named here are kept in `extra`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct OrderResult {
    #[serde(rename = "orderId")]
    pub order_id: i64,

    pub symbol: String,

    pub status: String,

    pub side: String,

    #[serde(rename = "type")]
    pub order_type: String,

    #[serde(rename = "origQty")]
    pub requested_quantity: String,

    #[serde(rename = "executedQty")]
    pub executed_quantity: String,

    #[serde(default)]
    pub price: Option<String>,

    #[serde(rename = "avgPrice", default)]
    pub average_price: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl fmt::Display for OrderResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order {{ id: {}, symbol: {}, status: {}, side: {}, type: {}, qty: {}, executed: {} }}",
            self.order_id,
            self.symbol,
            self.status,
            self.side,
            self.order_type,
            self.requested_quantity,
            self.executed_quantity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_exchange_order_response() {
        let data = json!({
            "orderId": 4061787381_i64,
            "symbol": "ETHUSDT",
            "status": "NEW",
            "clientOrderId": "x-Cb7ytekJ1234",
            "price": "2500.00",
            "avgPrice": "0.00",
            "origQty": "0.100",
            "executedQty": "0.000",
            "timeInForce": "GTC",
            "type": "LIMIT",
            "side": "SELL",
            "updateTime": 1717171717171_i64
        });

        let result: OrderResult = serde_json::from_value(data).unwrap();
        assert_eq!(result.order_id, 4061787381);
        assert_eq!(result.order_type, "LIMIT");
        assert_eq!(result.requested_quantity, "0.100");
        assert_eq!(result.price.as_deref(), Some("2500.00"));
        assert_eq!(result.average_price.as_deref(), Some("0.00"));
        assert_eq!(result.extra["timeInForce"], json!("GTC"));
        assert_eq!(result.extra["clientOrderId"], json!("x-Cb7ytekJ1234"));
    }

    #[test]
    fn test_price_fields_are_optional() {
        let data = json!({
            "orderId": 1,
            "symbol": "BTCUSDT",
            "status": "FILLED",
            "origQty": "0.001",
            "executedQty": "0.001",
            "type": "MARKET",
            "side": "BUY"
        });

        let result: OrderResult = serde_json::from_value(data).unwrap();
        assert_eq!(result.price, None);
        assert_eq!(result.average_price, None);
        assert!(result.to_string().contains("status: FILLED"));
    }
}
