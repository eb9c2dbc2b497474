// src/integrations/entitlement.rs
//
// Pro entitlement as reported by the identity provider.
//
// The hosted auth service owns sign-in; this side only needs the boolean
// "Pro" flag. The shipped provider keeps the flag in local storage, which is
// where the upgrade flow records it.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use crate::events::{EntitlementChanged, EventBus};
use crate::repositories::KeyValueStorage;

#[cfg(test)]
use mockall::automock;

/// Storage key for the locally recorded Pro flag
pub const PRO_STATUS_STORAGE_KEY: &str = "@pro_status";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait EntitlementProvider: Send + Sync {
    async fn is_pro(&self) -> AppResult<bool>;

    async fn grant_pro(&self) -> AppResult<()>;

    async fn revoke_pro(&self) -> AppResult<()>;
}

pub struct StoredEntitlement {
    storage: Arc<dyn KeyValueStorage>,
    event_bus: Arc<EventBus>,
}

impl StoredEntitlement {
    pub fn new(storage: Arc<dyn KeyValueStorage>, event_bus: Arc<EventBus>) -> Self {
        Self { storage, event_bus }
    }

}

#[async_trait]
impl EntitlementProvider for StoredEntitlement {
    async fn is_pro(&self) -> AppResult<bool> {
        let stored = self.storage.get(PRO_STATUS_STORAGE_KEY).await?;
        Ok(stored.as_deref() == Some("true"))
    }

    async fn grant_pro(&self) -> AppResult<()> {
        self.storage.set(PRO_STATUS_STORAGE_KEY, "true").await?;
        log::info!("Pro entitlement granted");
        self.event_bus.emit(EntitlementChanged::new(true));
        Ok(())
    }

    async fn revoke_pro(&self) -> AppResult<()> {
        // Absent means "not Pro", same as a fresh install
        self.storage.remove(PRO_STATUS_STORAGE_KEY).await?;
        log::info!("Pro entitlement revoked");
        self.event_bus.emit(EntitlementChanged::new(false));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryKeyValueStorage;

    fn provider() -> (StoredEntitlement, Arc<MemoryKeyValueStorage>, Arc<EventBus>) {
        let storage = Arc::new(MemoryKeyValueStorage::new());
        let bus = Arc::new(EventBus::new());
        (StoredEntitlement::new(storage.clone(), bus.clone()), storage, bus)
    }

    #[tokio::test]
    async fn test_not_pro_by_default() {
        let (entitlement, _, _) = provider();
        assert!(!entitlement.is_pro().await.unwrap());
    }

    #[tokio::test]
    async fn test_grant_and_revoke() {
        let (entitlement, storage, bus) = provider();

        entitlement.grant_pro().await.unwrap();
        assert!(entitlement.is_pro().await.unwrap());
        assert_eq!(
            storage.get(PRO_STATUS_STORAGE_KEY).await.unwrap().as_deref(),
            Some("true")
        );

        entitlement.revoke_pro().await.unwrap();
        assert!(!entitlement.is_pro().await.unwrap());
        assert_eq!(storage.get(PRO_STATUS_STORAGE_KEY).await.unwrap(), None);
        assert_eq!(bus.get_event_log().len(), 2);
    }

    #[tokio::test]
    async fn test_unexpected_value_is_not_pro() {
        let (entitlement, storage, _) = provider();
        storage.set(PRO_STATUS_STORAGE_KEY, "yes").await.unwrap();
        assert!(!entitlement.is_pro().await.unwrap());
    }
}
