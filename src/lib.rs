//! Pluggable asset checking.
//!
//! An [`provider::AssetProvider`] enumerates assets, every configured
//! [`checker::AssetChecker`] inspects each of them, and the results are
//! aggregated, filtered and optionally repaired through a
//! [`session::CheckSession`].

pub mod asset;
pub mod checker;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod provider;
pub mod session;
pub mod state;
pub mod view;

pub use error::{AssetCheckError, CheckerError, Result};

/// `target` of every log event emitted by this crate.
pub const LOG_TARGET: &str = "asset_checker";

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
