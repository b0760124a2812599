// Models for Binance API responses
use serde::Deserialize;

/// Body of a non-2xx response, e.g. `{"code": -1121, "msg": "Invalid symbol."}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub code: i64,
    pub msg: String,
}
