//! Client side of the Strava Roundup REST contract.
//!
//! The backend owns OAuth, activity storage and roundup aggregation. This crate
//! only knows the shapes it returns and how to ask for them.

pub mod client;
pub mod config;
pub mod error;
pub mod month;
pub mod types;

pub use client::{FetchedImage, RoundupClient};
pub use config::ApiConfig;
pub use error::ApiError;
pub use month::{MonthKey, MonthKeyError};
pub use types::{
    ActivitySplitEntry, AuthExchange, CalendarDay, ExchangedAthlete, MonthlyInsights, MonthlyRoundup, MostActiveDay,
    MostActiveTimeOfDay, ProxyImageResponse, SyncSummary,
};
