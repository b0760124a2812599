use chrono::{DateTime, Utc};

/// Outcome of a successful credential probe. Reporting only, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectivityReport {
    pub reachable: bool,
    pub round_trip_latency_ms: f64,
    pub server_time: DateTime<Utc>,
    pub trading_enabled: bool,
    pub withdraw_enabled: bool,
    pub deposit_enabled: bool,
    pub quote_asset_balance: Option<f64>,
}

impl ConnectivityReport {
    /// Server time as `YYYY-mm-dd HH:MM:SS`, in UTC.
    pub fn server_time_display(&self) -> String {
        self.server_time.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
