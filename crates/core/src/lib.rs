//! Daytimer Core Library
//!
//! Core models, permissions, configuration, storage, statistics and report
//! formatting for the Daytimer time-tracking service.

pub mod config;
pub mod credentials;
pub mod error;
pub mod invariants;
pub mod models;
pub mod permissions;
pub mod report;
pub mod stats;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
pub use models::*;
pub use permissions::*;
pub use report::render_report;
pub use stats::{
    AccountDataset, AccountSummary, AggregateBundle, DateRange, DetailBundle, SectionSelection,
};
pub use storage::{AccountRepository, Database, Storage, TimeTrackingRepository};
