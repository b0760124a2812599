pub mod account;
pub mod credentials;
pub mod exchange;
pub mod order;
pub mod report;
