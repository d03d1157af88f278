//! Service status polling for the launcher landing screen.
//!
//! The landing screen shows one overall indicator for the upstream game
//! services plus a per-service list split into essential and non-essential
//! groups. This crate provides everything behind that panel except the
//! drawing itself.
//!
//! # Modules
//!
//! ## Model (`model`) and aggregation (`aggregate`)
//!
//! ```rust
//! use launcher_status::{ServiceStatus, StatusColor, StatusSnapshot};
//!
//! let snapshot = StatusSnapshot::new(vec![
//!     ServiceStatus::new("authserver.mojang.com", "Authentication Service", true, StatusColor::Green),
//!     ServiceStatus::new("api.mojang.com", "Public API", false, StatusColor::Red),
//! ]);
//!
//! // A non-essential outage only degrades the overall color
//! assert_eq!(snapshot.overall_color(), StatusColor::Yellow);
//! ```
//!
//! ## Client (`client`)
//!
//! [`StatusClient`] is the fetch seam; [`HttpStatusClient`] implements it over
//! reqwest and understands both the report and legacy wire formats.
//!
//! ## Poller (`poller`)
//!
//! ```rust,ignore
//! use launcher_status::{StatusConfig, StatusPoller};
//!
//! let poller = StatusPoller::from_config(&StatusConfig::load(None)?)?;
//! poller.start().await?;
//! let mut updates = poller.subscribe();
//! while updates.changed().await.is_ok() {
//!     println!("overall: {}", updates.borrow().overall_color());
//! }
//! ```
//!
//! ## Config (`config`)
//!
//! Defaults, optional YAML/JSON file, then `LAUNCHER_STATUS_*` environment
//! overrides.

pub mod aggregate;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod poller;

pub use client::{HttpStatusClient, StatusClient};
pub use config::StatusConfig;
pub use error::{Result, StatusError};
pub use model::{ServiceStatus, SharedSnapshot, StatusColor, StatusSnapshot};
pub use poller::{FetchOutcome, StatusPoller};

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
