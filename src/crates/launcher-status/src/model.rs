//! Service status model
//!
//! Per-service status entries and the immutable snapshot the poller publishes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

use crate::aggregate;

/// Indicator color reported for a service
///
/// Green is best, Red is worst. Grey means the status is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    /// Service is operating normally
    Green,
    /// Service has some issues
    Yellow,
    /// Service is unavailable
    Red,
    /// Status unknown
    Grey,
}

impl StatusColor {
    /// Parse a wire color string. Anything unrecognised is Grey.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "green" => Self::Green,
            "yellow" => Self::Yellow,
            "red" => Self::Red,
            _ => Self::Grey,
        }
    }

    /// Launcher palette hex code for this color
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Green => "#a5c325",
            Self::Yellow => "#eac918",
            Self::Red => "#c32625",
            Self::Grey => "#848484",
        }
    }

    /// Launcher palette as an RGB triple
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Green => (0xa5, 0xc3, 0x25),
            Self::Yellow => (0xea, 0xc9, 0x18),
            Self::Red => (0xc3, 0x26, 0x25),
            Self::Grey => (0x84, 0x84, 0x84),
        }
    }
}

impl std::fmt::Display for StatusColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Green => write!(f, "green"),
            Self::Yellow => write!(f, "yellow"),
            Self::Red => write!(f, "red"),
            Self::Grey => write!(f, "grey"),
        }
    }
}

impl<'de> Deserialize<'de> for StatusColor {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&raw))
    }
}

/// Status of a single monitored service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    /// Stable identifier, unique within a snapshot (e.g. `api.mojang.com`)
    pub service_id: String,
    /// Human-readable label
    pub display_name: String,
    /// Essential services dominate the overall color
    pub essential: bool,
    /// Reported color
    pub color: StatusColor,
}

impl ServiceStatus {
    /// Create a service status entry
    pub fn new(
        service_id: impl Into<String>,
        display_name: impl Into<String>,
        essential: bool,
        color: StatusColor,
    ) -> Self {
        Self {
            service_id: service_id.into(),
            display_name: display_name.into(),
            essential,
            color,
        }
    }
}

/// The most recent full list of service statuses
///
/// Published as `Arc<StatusSnapshot>` and never mutated afterwards; a new
/// fetch replaces the whole snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    statuses: Vec<ServiceStatus>,
    fetched_at: Option<DateTime<Utc>>,
}

impl StatusSnapshot {
    /// Empty snapshot held before the first successful fetch
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot of a freshly fetched list, stamped with the current time
    pub fn new(statuses: Vec<ServiceStatus>) -> Self {
        Self {
            statuses,
            fetched_at: Some(Utc::now()),
        }
    }

    pub fn statuses(&self) -> &[ServiceStatus] {
        &self.statuses
    }

    /// When this snapshot was fetched, `None` for the initial empty snapshot
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Look up a service by identifier
    pub fn get(&self, service_id: &str) -> Option<&ServiceStatus> {
        self.statuses.iter().find(|s| s.service_id == service_id)
    }

    /// Overall indicator color for this snapshot
    pub fn overall_color(&self) -> StatusColor {
        aggregate::overall_color(&self.statuses)
    }

    /// Essential services, in snapshot order
    pub fn essential(&self) -> Vec<&ServiceStatus> {
        aggregate::essential(&self.statuses)
    }

    /// Non-essential services, in snapshot order
    pub fn non_essential(&self) -> Vec<&ServiceStatus> {
        aggregate::non_essential(&self.statuses)
    }

    /// `(essential, non_essential)` views, each in snapshot order
    pub fn partition(&self) -> (Vec<&ServiceStatus>, Vec<&ServiceStatus>) {
        aggregate::partition(&self.statuses)
    }
}

/// Shared handle to a snapshot
pub type SharedSnapshot = Arc<StatusSnapshot>;
