pub mod bot;
pub mod config_loader;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

pub use bot::*;
pub use domain::constants::*;
pub use domain::enums::*;
pub use domain::model::account::*;
pub use domain::model::credentials::*;
pub use domain::model::exchange::*;
pub use domain::model::order::*;
pub use domain::model::report::*;
pub use domain::traits::FuturesApi;
pub use error::*;
pub use infrastructure::exchange::binance::BinanceFuturesClient;
