// src/events/bus/event_bus.rs
//
// In-process event bus.
//
// Handlers run synchronously, in subscription order, on the emitting task.
// A panicking handler is logged and does not stop the others.
// Handlers may subscribe further handlers; those see the next emission.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::events::types::DomainEvent;

type EventHandler = Arc<dyn Fn(&dyn Any) + Send + Sync>;

/// Upper bound on retained log entries
const EVENT_LOG_CAPACITY: usize = 256;

/// Central point where services publish facts and the UI layer listens.
///
/// Cloning shares the same subscriptions and log.
#[derive(Clone, Default)]
pub struct EventBus {
    handlers: Arc<RwLock<HashMap<TypeId, Vec<EventHandler>>>>,
    event_log: Arc<RwLock<Vec<EventLogEntry>>>,
}

/// A logged emission, kept for diagnostics
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub event_type: String,
    pub event_id: String,
    pub occurred_at: String,
    pub handler_count: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every future event of type `E`.
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let wrapped: EventHandler = Arc::new(move |event: &dyn Any| {
            if let Some(event) = event.downcast_ref::<E>() {
                handler(event);
            }
        });

        match self.handlers.write() {
            Ok(mut handlers) => handlers.entry(TypeId::of::<E>()).or_default().push(wrapped),
            Err(_) => log::error!(
                "Event bus lock poisoned; dropping subscription for {}",
                std::any::type_name::<E>()
            ),
        }
    }

    /// Deliver `event` to its subscribers.
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let subscribers: Vec<EventHandler> = match self.handlers.read() {
            Ok(handlers) => handlers
                .get(&TypeId::of::<E>())
                .cloned()
                .unwrap_or_default(),
            Err(_) => {
                log::error!("Event bus lock poisoned; dropping {}", event.event_type());
                return;
            }
        };
        let handler_count = subscribers.len();

        log::debug!(
            "[EVENT] {} (id: {}) | {} handlers",
            event.event_type(),
            event.event_id(),
            handler_count
        );
        self.record(EventLogEntry {
            event_type: event.event_type().to_string(),
            event_id: event.event_id().to_string(),
            occurred_at: event.occurred_at().to_rfc3339(),
            handler_count,
        });

        for (idx, handler) in subscribers.iter().enumerate() {
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                handler(&event as &dyn Any);
            }));
            if outcome.is_err() {
                log::error!("Handler {} for {} panicked", idx, event.event_type());
            }
        }
    }

    fn record(&self, entry: EventLogEntry) {
        if let Ok(mut log) = self.event_log.write() {
            if log.len() == EVENT_LOG_CAPACITY {
                log.remove(0);
            }
            log.push(entry);
        }
    }

    /// Recent emissions, oldest first
    pub fn get_event_log(&self) -> Vec<EventLogEntry> {
        self.event_log
            .read()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    pub fn subscriber_count<E: 'static>(&self) -> usize {
        self.handlers
            .read()
            .map(|handlers| handlers.get(&TypeId::of::<E>()).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}
