use std::fmt;

use thiserror::Error;

/// Failures raised by the exchange transport before they are translated
/// into one of the bot-level kinds below.
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("API Error {status} (code {code}): {message}")]
    Api {
        status: u16,
        code: i64,
        message: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Query encoding error: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ExchangeError {
    /// Exchange-assigned error code, if the failure came from the exchange itself.
    pub fn code(&self) -> Option<i64> {
        match self {
            ExchangeError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// An order input rule that was violated. Detected locally; never reaches the network.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Symbol must be a {asset}-M pair (e.g., BTC{asset}), got '{symbol}'")]
    NotSettlementPair { symbol: String, asset: String },

    #[error("Side must be 'BUY' or 'SELL', got '{0}'")]
    InvalidSide(String),

    #[error("Quantity must be a number, got '{0}'")]
    MalformedQuantity(String),

    #[error("Quantity must be positive, got {0}")]
    NonPositiveQuantity(f64),

    #[error("Order type must be MARKET or LIMIT, got '{0}'")]
    InvalidOrderType(String),

    #[error("Price is required for limit orders")]
    MissingPrice,

    #[error("Price must be a number, got '{0}'")]
    MalformedPrice(String),

    #[error("Price must be positive, got {0}")]
    NonPositivePrice(f64),
}

impl ValidationError {
    /// Short name of the violated rule.
    pub fn rule(&self) -> &'static str {
        match self {
            ValidationError::NotSettlementPair { .. } => "must be a settlement-asset pair",
            ValidationError::InvalidSide(_) => "side must be BUY or SELL",
            ValidationError::MalformedQuantity(_) => "quantity must be numeric",
            ValidationError::NonPositiveQuantity(_) => "quantity must be positive",
            ValidationError::InvalidOrderType(_) => "order type must be MARKET or LIMIT",
            ValidationError::MissingPrice => "limit orders require a price",
            ValidationError::MalformedPrice(_) => "price must be numeric",
            ValidationError::NonPositivePrice(_) => "price must be positive",
        }
    }
}

/// Step of the credential probe that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStep {
    Ping,
    ServerTime,
    Account,
    Balance,
}

impl fmt::Display for ProbeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProbeStep::Ping => "ping",
            ProbeStep::ServerTime => "server time",
            ProbeStep::Account => "account status",
            ProbeStep::Balance => "account balance",
        };
        f.write_str(name)
    }
}

/// Connectivity or credential verification failed. Every probe failure maps here.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Credential verification failed at {step}: {message}")]
pub struct VerificationFailed {
    pub step: ProbeStep,
    pub code: Option<i64>,
    pub message: String,
}

impl VerificationFailed {
    pub fn from_exchange(step: ProbeStep, err: &ExchangeError) -> Self {
        Self {
            step,
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Order submission failed after validation passed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TradingError {
    #[error("API Error {status}: {message} (code {code})")]
    Rejected {
        status: u16,
        code: i64,
        message: String,
    },

    #[error("Order failed: {0}")]
    Failed(String),
}

impl From<ExchangeError> for TradingError {
    fn from(err: ExchangeError) -> Self {
        match err {
            ExchangeError::Api {
                status,
                code,
                message,
            } => TradingError::Rejected {
                status,
                code,
                message,
            },
            other => TradingError::Failed(other.to_string()),
        }
    }
}

/// Top-level error kinds callers can match on.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Verification(#[from] VerificationFailed),

    #[error(transparent)]
    Trading(#[from] TradingError),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_becomes_rejection() {
        let err = ExchangeError::Api {
            status: 400,
            code: -1121,
            message: "Invalid symbol.".to_string(),
        };
        assert_eq!(err.code(), Some(-1121));

        let trading: TradingError = err.into();
        assert_eq!(
            trading,
            TradingError::Rejected {
                status: 400,
                code: -1121,
                message: "Invalid symbol.".to_string()
            }
        );
        assert_eq!(trading.to_string(), "API Error 400: Invalid symbol. (code -1121)");
    }

    #[test]
    fn test_other_exchange_errors_become_generic_failures() {
        let err = ExchangeError::InvalidResponse("missing orderId".to_string());
        assert_eq!(err.code(), None);

        let trading: TradingError = err.into();
        match trading {
            TradingError::Failed(msg) => assert!(msg.contains("missing orderId")),
            other => panic!("Expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_verification_failure_keeps_upstream_context() {
        let err = ExchangeError::Api {
            status: 401,
            code: -2015,
            message: "Invalid API-key, IP, or permissions for action.".to_string(),
        };
        let failed = VerificationFailed::from_exchange(ProbeStep::Account, &err);
        assert_eq!(failed.step, ProbeStep::Account);
        assert_eq!(failed.code, Some(-2015));
        assert!(failed.to_string().contains("account status"));
        assert!(failed.message.contains("Invalid API-key"));
    }
}
