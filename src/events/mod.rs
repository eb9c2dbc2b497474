// src/events/mod.rs
//
// Internal Event System - Public API

pub mod bus;
pub mod types;

pub use types::{
    DomainEvent,
    EntitlementChanged,
    // Generation
    GenerationFailed,
    // Settings
    SettingsChanged,
    WallpaperDeleted,
    // Gallery
    WallpaperSaved,
};

pub use bus::{EventBus, EventLogEntry};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
