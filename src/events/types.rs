// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::AppSettings;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! domain_event {
    ($name:ident) => {
        impl DomainEvent for $name {
            fn event_id(&self) -> Uuid {
                self.event_id
            }
            fn occurred_at(&self) -> DateTime<Utc> {
                self.occurred_at
            }
            fn event_type(&self) -> &'static str {
                stringify!($name)
            }
        }
    };
}

// ============================================================================
// GALLERY EVENTS
// ============================================================================

/// A record was durably added to the collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallpaperSaved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub wallpaper_id: String,
    pub collection_size: usize,
}

impl WallpaperSaved {
    pub fn new(wallpaper_id: String, collection_size: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            wallpaper_id,
            collection_size,
        }
    }
}

domain_event!(WallpaperSaved);

/// A record was durably removed from the collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallpaperDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub wallpaper_id: String,
    pub collection_size: usize,
}

impl WallpaperDeleted {
    pub fn new(wallpaper_id: String, collection_size: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            wallpaper_id,
            collection_size,
        }
    }
}

domain_event!(WallpaperDeleted);

// ============================================================================
// GENERATION EVENTS
// ============================================================================

/// A generate or edit request did not produce a saved record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub stage: String,
    pub reason: String,
}

impl GenerationFailed {
    pub fn new(stage: String, reason: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            stage,
            reason,
        }
    }
}

domain_event!(GenerationFailed);

// ============================================================================
// SETTINGS EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub settings: AppSettings,
}

impl SettingsChanged {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            settings,
        }
    }
}

domain_event!(SettingsChanged);

/// Pro entitlement was granted or revoked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitlementChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub is_pro: bool,
}

impl EntitlementChanged {
    pub fn new(is_pro: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            is_pro,
        }
    }
}

domain_event!(EntitlementChanged);
