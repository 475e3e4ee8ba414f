use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::database::models::{
    FamilyMember, FamilyMemberCreate, FamilyMemberPublic, FamilyMemberUpdate, FamilyMembersPublic, Message,
};
use crate::database::Store;

use super::access::{ensure_can_access, list_scope};
use super::{Pagination, ServiceError};

pub const NOT_FOUND: &str = "FamilyMember not found";

/// List, read, create, update and delete family members on behalf of a caller
pub struct FamilyMemberService {
    store: Arc<dyn Store>,
}

impl FamilyMemberService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Superusers see every record; other callers only their own. `count` uses the same scope.
    pub async fn list(&self, caller: &CurrentUser, page: Pagination) -> Result<FamilyMembersPublic, ServiceError> {
        let scope = list_scope(caller);

        let count = self.store.count_family_members(scope).await?;
        let members = self
            .store
            .list_family_members(scope, page.skip, page.limit)
            .await?;

        Ok(FamilyMembersPublic {
            data: members.into_iter().map(FamilyMemberPublic::from).collect(),
            count,
        })
    }

    pub async fn get(&self, caller: &CurrentUser, id: Uuid) -> Result<FamilyMemberPublic, ServiceError> {
        let member = self.fetch_accessible(caller, id).await?;
        Ok(member.into())
    }

    /// The caller always becomes the owner
    pub async fn create(
        &self,
        caller: &CurrentUser,
        payload: FamilyMemberCreate,
    ) -> Result<FamilyMemberPublic, ServiceError> {
        let member = payload.into_member(caller.id);
        let stored = self.store.insert_family_member(member).await?;

        info!("User {} created familymember {}", caller.id, stored.id);
        Ok(stored.into())
    }

    pub async fn update(
        &self,
        caller: &CurrentUser,
        id: Uuid,
        patch: FamilyMemberUpdate,
    ) -> Result<FamilyMemberPublic, ServiceError> {
        let current = self.fetch_accessible(caller, id).await?;
        if patch.is_empty() {
            return Ok(current.into());
        }

        // owner_id is not patchable, so the access decision above still holds
        let updated = self
            .store
            .update_family_member(id, &patch)
            .await?
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))?;

        info!("User {} updated familymember {}", caller.id, id);
        Ok(updated.into())
    }

    pub async fn delete(&self, caller: &CurrentUser, id: Uuid) -> Result<Message, ServiceError> {
        self.fetch_accessible(caller, id).await?;

        if !self.store.delete_family_member(id).await? {
            return Err(ServiceError::NotFound(NOT_FOUND.to_string()));
        }

        info!("User {} deleted familymember {}", caller.id, id);
        Ok(Message::new("FamilyMember deleted successfully"))
    }

    async fn fetch_accessible(&self, caller: &CurrentUser, id: Uuid) -> Result<FamilyMember, ServiceError> {
        let member = self
            .store
            .get_family_member(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))?;

        ensure_can_access(caller, &member)?;
        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::testing::{caller, TestContext};

    fn all() -> Pagination {
        Pagination::new(None, None, &AppConfig::development().api).unwrap()
    }

    #[tokio::test]
    async fn list_is_scoped_to_owner_for_regular_users() {
        let ctx = TestContext::new();
        let alice = ctx.user("alice@example.com", false).await;
        let bob = ctx.user("bob@example.com", false).await;
        ctx.member(&alice, "Ana").await;
        ctx.member(&alice, "Leo").await;
        ctx.member(&bob, "Mia").await;

        let service = FamilyMemberService::new(ctx.store());
        let page = service.list(&caller(&alice), all()).await.unwrap();

        assert_eq!(page.count, 2);
        assert_eq!(page.data.len(), 2);
        assert!(page.data.iter().all(|m| m.owner_id == alice.id));
    }

    #[tokio::test]
    async fn superuser_count_ignores_page_window() {
        let ctx = TestContext::new();
        let admin = ctx.user("admin@example.com", true).await;
        let alice = ctx.user("alice@example.com", false).await;
        for name in ["Ana", "Leo", "Mia"] {
            ctx.member(&alice, name).await;
        }
        ctx.member(&admin, "Sol").await;

        let service = FamilyMemberService::new(ctx.store());
        let page = service
            .list(&caller(&admin), Pagination { skip: 1, limit: 2 })
            .await
            .unwrap();

        assert_eq!(page.count, 4);
        assert_eq!(page.data.len(), 2);
    }

    #[tokio::test]
    async fn create_sets_owner_to_caller() {
        let ctx = TestContext::new();
        let user = ctx.user("u@example.com", false).await;
        let service = FamilyMemberService::new(ctx.store());

        let payload: FamilyMemberCreate = serde_json::from_value(serde_json::json!({
            "given_name": "Ana",
            "age": 7,
            "practical_wish": "bike",
            "owner_id": Uuid::new_v4(),
        }))
        .unwrap();

        let created = service.create(&caller(&user), payload).await.unwrap();
        assert_eq!(created.owner_id, user.id);
        assert_eq!(created.given_name.as_deref(), Some("Ana"));
        assert_eq!(created.practical_wish.as_deref(), Some("bike"));
        assert_eq!(created.fun_wish, None);
        assert_eq!(created.note, None);
    }

    #[tokio::test]
    async fn get_distinguishes_missing_from_forbidden() {
        let ctx = TestContext::new();
        let alice = ctx.user("alice@example.com", false).await;
        let bob = ctx.user("bob@example.com", false).await;
        let admin = ctx.user("admin@example.com", true).await;
        let mia = ctx.member(&bob, "Mia").await;

        let service = FamilyMemberService::new(ctx.store());

        assert!(matches!(
            service.get(&caller(&alice), Uuid::new_v4()).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.get(&caller(&alice), mia.id).await,
            Err(ServiceError::Forbidden(_))
        ));
        assert_eq!(service.get(&caller(&admin), mia.id).await.unwrap().id, mia.id);
    }

    #[tokio::test]
    async fn update_merges_only_supplied_fields() {
        let ctx = TestContext::new();
        let alice = ctx.user("alice@example.com", false).await;
        let ana = ctx.member(&alice, "Ana").await;
        let service = FamilyMemberService::new(ctx.store());

        let patch: FamilyMemberUpdate =
            serde_json::from_value(serde_json::json!({ "fun_wish": "kite" })).unwrap();
        let updated = service.update(&caller(&alice), ana.id, patch).await.unwrap();

        assert_eq!(updated.fun_wish.as_deref(), Some("kite"));
        assert_eq!(updated.given_name, ana.given_name);
        assert_eq!(updated.age, ana.age);

        let unchanged = service
            .update(&caller(&alice), ana.id, FamilyMemberUpdate::default())
            .await
            .unwrap();
        assert_eq!(unchanged, updated);
    }

    #[tokio::test]
    async fn delete_checks_access_then_removes() {
        let ctx = TestContext::new();
        let alice = ctx.user("alice@example.com", false).await;
        let bob = ctx.user("bob@example.com", false).await;
        let ana = ctx.member(&alice, "Ana").await;
        let service = FamilyMemberService::new(ctx.store());

        assert!(matches!(
            service.delete(&caller(&bob), ana.id).await,
            Err(ServiceError::Forbidden(_))
        ));

        let message = service.delete(&caller(&alice), ana.id).await.unwrap();
        assert_eq!(message.message, "FamilyMember deleted successfully");
        assert!(matches!(
            service.delete(&caller(&alice), ana.id).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
