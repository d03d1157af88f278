//! Status document wire formats.
//!
//! Two JSON shapes are accepted:
//!
//! ```text
//! report: [{"service": "api.mojang.com", "status": "green", "essential": false, "name": "Public API"}]
//! legacy: [{"minecraft.net": "green"}, {"api.mojang.com": "yellow"}]
//! ```
//!
//! Legacy documents only carry colors, so they are merged onto the catalog's
//! default list.

use crate::catalog;
use crate::error::{Result, StatusError};
use crate::model::{ServiceStatus, StatusColor};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StatusDocument {
    Report(Vec<ReportEntry>),
    Legacy(Vec<HashMap<String, String>>),
}

#[derive(Debug, Deserialize)]
struct ReportEntry {
    #[serde(alias = "service_id")]
    service: String,
    status: StatusColor,
    #[serde(default)]
    essential: Option<bool>,
    #[serde(default)]
    name: Option<String>,
}

impl ReportEntry {
    fn into_status(self) -> ServiceStatus {
        let known = catalog::lookup(&self.service);
        let display_name = self
            .name
            .or_else(|| known.map(|k| k.display_name.to_string()))
            .unwrap_or_else(|| self.service.clone());
        let essential = self
            .essential
            .or_else(|| known.map(|k| k.essential))
            .unwrap_or(false);

        ServiceStatus::new(self.service, display_name, essential, self.status)
    }
}

/// Parse a status response body into service statuses
pub fn parse_status_document(body: &[u8]) -> Result<Vec<ServiceStatus>> {
    let document: StatusDocument = serde_json::from_slice(body)
        .map_err(|e| StatusError::Malformed(e.to_string()))?;

    Ok(match document {
        StatusDocument::Report(entries) => from_report(entries),
        StatusDocument::Legacy(entries) => from_legacy(entries),
    })
}

fn from_report(entries: Vec<ReportEntry>) -> Vec<ServiceStatus> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|e| seen.insert(e.service.clone()))
        .map(ReportEntry::into_status)
        .collect()
}

fn from_legacy(entries: Vec<HashMap<String, String>>) -> Vec<ServiceStatus> {
    let mut statuses = catalog::default_statuses();
    for (service, color) in entries.into_iter().flatten() {
        // Unknown services are ignored
        if let Some(status) = statuses.iter_mut().find(|s| s.service_id == service) {
            status.color = StatusColor::parse_lenient(&color);
        }
    }
    statuses
}
