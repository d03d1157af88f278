//! Known upstream services and the fixed reporting override.

use crate::model::{ServiceStatus, StatusColor};

/// A service the launcher monitors by default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownService {
    pub service_id: &'static str,
    pub display_name: &'static str,
    pub essential: bool,
}

/// Monitored services, in display order.
pub const KNOWN_SERVICES: &[KnownService] = &[
    KnownService {
        service_id: "sessionserver.mojang.com",
        display_name: "Multiplayer Session Service",
        essential: true,
    },
    KnownService {
        service_id: "authserver.mojang.com",
        display_name: "Authentication Service",
        essential: true,
    },
    KnownService {
        service_id: "textures.minecraft.net",
        display_name: "Minecraft Skins",
        essential: false,
    },
    KnownService {
        service_id: "api.mojang.com",
        display_name: "Public API",
        essential: false,
    },
    KnownService {
        service_id: "minecraft.net",
        display_name: "Minecraft.net",
        essential: false,
    },
    KnownService {
        service_id: "account.mojang.com",
        display_name: "Mojang Accounts Website",
        essential: false,
    },
];

/// Services the upstream checker always reports as red even when they are up.
///
/// See https://bugs.mojang.com/browse/WEB-2303. Matched on identity only.
pub const FORCED_GREEN_SERVICES: &[&str] = &["sessionserver.mojang.com", "minecraft.net"];

/// Look up a known service by identifier
pub fn lookup(service_id: &str) -> Option<&'static KnownService> {
    KNOWN_SERVICES.iter().find(|k| k.service_id == service_id)
}

/// Every known service with an unknown (Grey) status
pub fn default_statuses() -> Vec<ServiceStatus> {
    KNOWN_SERVICES
        .iter()
        .map(|k| ServiceStatus::new(k.service_id, k.display_name, k.essential, StatusColor::Grey))
        .collect()
}

/// Force the services in [`FORCED_GREEN_SERVICES`] to Green
pub fn apply_upstream_overrides(statuses: &mut [ServiceStatus]) {
    for status in statuses
        .iter_mut()
        .filter(|s| FORCED_GREEN_SERVICES.contains(&s.service_id.as_str()))
    {
        status.color = StatusColor::Green;
    }
}
