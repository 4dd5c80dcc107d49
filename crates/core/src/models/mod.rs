//! Data models for Daytimer

mod account;
mod catalog;
mod time_entry;
mod work_session;

pub use account::*;
pub use catalog::*;
pub use time_entry::*;
pub use work_session::*;
