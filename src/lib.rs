pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod service;
pub mod storage;

pub use config::AppConfig;
pub use error::BillingError;
pub use notify::create_notifier;
pub use service::{aggregate, render, LedgerLoader};
pub use storage::create_store;
