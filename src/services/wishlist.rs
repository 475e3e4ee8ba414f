use std::sync::Arc;

use tracing::info;

use crate::api::format::{admin_wishlist_csv, wishlist_csv};
use crate::database::Store;

use super::ServiceError;

/// Read-only CSV snapshots across every owner
pub struct WishlistService {
    store: Arc<dyn Store>,
}

impl WishlistService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Family id (owner), names and wishes. No contact details.
    pub async fn export(&self) -> Result<Vec<u8>, ServiceError> {
        let members = self.store.all_family_members().await?;
        let body = wishlist_csv(&members).map_err(|e| ServiceError::Export(e.to_string()))?;

        info!("Exported wishlist with {} rows", members.len());
        Ok(body)
    }

    /// Same wishes, led by the owner's name, email, address and phone
    pub async fn export_with_contacts(&self) -> Result<Vec<u8>, ServiceError> {
        let rows = self.store.all_family_members_with_owner().await?;
        let body = admin_wishlist_csv(&rows).map_err(|e| ServiceError::Export(e.to_string()))?;

        info!("Exported admin wishlist with {} rows", rows.len());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestContext;

    #[tokio::test]
    async fn export_includes_every_owner() {
        let ctx = TestContext::new();
        let alice = ctx.user("alice@example.com", false).await;
        let bob = ctx.user("bob@example.com", false).await;
        ctx.member(&alice, "Ana").await;
        ctx.member(&bob, "Mia").await;
        ctx.member(&bob, "Leo").await;

        let service = WishlistService::new(ctx.store());
        let text = String::from_utf8(service.export().await.unwrap()).unwrap();

        assert_eq!(text.lines().count(), 4);
        assert!(!text.contains("alice@example.com"));
    }

    #[tokio::test]
    async fn contact_export_carries_owner_email() {
        let ctx = TestContext::new();
        let alice = ctx.user("alice@example.com", false).await;
        ctx.member(&alice, "Ana").await;

        let service = WishlistService::new(ctx.store());
        let text = String::from_utf8(service.export_with_contacts().await.unwrap()).unwrap();

        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("alice@example.com"));
        assert!(text.starts_with("Family Head Name,Family Email"));
    }
}
