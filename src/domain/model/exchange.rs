use serde::{Serialize, Serializer};

use crate::domain::enums::*;

// OrderRequest is a send-side intent built only by validation,
// therefore separate from the OrderResult the exchange hands back.
// Field order is the order parameters go on the wire.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(serialize_with = "decimal")]
    pub quantity: f64,
    // Only limit orders carry a price and time in force
    #[serde(serialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "timeInForce", skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
}

// Plain decimal notation; the exchange rejects exponents such as `1e-7`
fn decimal<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(value)
}

fn optional_decimal<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => serializer.collect_str(v),
        None => serializer.serialize_none(),
    }
}
