//! Status aggregation
//!
//! Derives the single overall indicator color from a list of service
//! statuses, and the essential / non-essential views used for display.

use crate::model::{ServiceStatus, StatusColor};

/// Overall indicator color for a list of service statuses
///
/// Rules are evaluated in order and the first match wins:
///
/// 1. no services: Grey
/// 2. any essential service Red: Red
/// 3. any essential service Yellow: Yellow
/// 4. any service that is neither Green nor Grey: Yellow
/// 5. every service Grey: Grey
/// 6. otherwise Green
///
/// Rule 4 also covers non-essential Red, which downgrades to Yellow.
pub fn overall_color(statuses: &[ServiceStatus]) -> StatusColor {
    if statuses.is_empty() {
        return StatusColor::Grey;
    }

    let mut essentials = statuses.iter().filter(|s| s.essential);
    if essentials.clone().any(|s| s.color == StatusColor::Red) {
        return StatusColor::Red;
    }
    if essentials.any(|s| s.color == StatusColor::Yellow) {
        return StatusColor::Yellow;
    }

    if statuses
        .iter()
        .any(|s| s.color != StatusColor::Green && s.color != StatusColor::Grey)
    {
        return StatusColor::Yellow;
    }

    if statuses.iter().all(|s| s.color == StatusColor::Grey) {
        return StatusColor::Grey;
    }

    StatusColor::Green
}

/// Essential services, in input order
pub fn essential(statuses: &[ServiceStatus]) -> Vec<&ServiceStatus> {
    statuses.iter().filter(|s| s.essential).collect()
}

/// Non-essential services, in input order
pub fn non_essential(statuses: &[ServiceStatus]) -> Vec<&ServiceStatus> {
    statuses.iter().filter(|s| !s.essential).collect()
}

/// Split into `(essential, non_essential)`, each keeping input order
pub fn partition(statuses: &[ServiceStatus]) -> (Vec<&ServiceStatus>, Vec<&ServiceStatus>) {
    statuses.iter().partition(|s| s.essential)
}
