//! reviewgate - review-link router
//!
//! Sends customers who had a good experience to a public review platform,
//! rotating through a business's weighted platform list, and captures
//! neutral or negative experiences as private feedback for the owner.

pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod notify;
pub mod routing;
pub mod store;
