use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::api::validate::Validate;
use crate::auth::CurrentUser;
use crate::database::models::{Message, UserCreate, UserPublic};
use crate::database::Store;

use super::ServiceError;

pub struct UserService {
    store: Arc<dyn Store>,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Fresh copy of the caller's own record
    pub async fn me(&self, caller: &CurrentUser) -> Result<UserPublic, ServiceError> {
        let user = self
            .store
            .get_user(caller.id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;
        Ok(user.into())
    }

    pub async fn create(&self, payload: UserCreate) -> Result<UserPublic, ServiceError> {
        payload.validate().map_err(|field_errors| ServiceError::Validation {
            message: "Invalid user".to_string(),
            field_errors,
        })?;

        if self.store.get_user_by_email(&payload.email).await?.is_some() {
            return Err(ServiceError::field(
                "email",
                "The user with this email already exists in the system.",
            ));
        }

        let stored = self.store.insert_user(payload.into_user()).await?;
        info!("Created user {} ({})", stored.id, stored.email);
        Ok(stored.into())
    }

    /// Deletes a user together with every family member it owns
    pub async fn delete(&self, caller: &CurrentUser, id: Uuid) -> Result<Message, ServiceError> {
        let user = self
            .store
            .get_user(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

        if user.id == caller.id {
            return Err(ServiceError::Forbidden(
                "Super users are not allowed to delete themselves".to_string(),
            ));
        }

        if !self.store.delete_user(id).await? {
            return Err(ServiceError::NotFound("User not found".to_string()));
        }

        info!("User {} deleted user {}", caller.id, id);
        Ok(Message::new("User deleted successfully"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::FamilyMemberStore;
    use crate::testing::{caller, TestContext};

    #[tokio::test]
    async fn delete_cascades_to_family_members() {
        let ctx = TestContext::new();
        let admin = ctx.user("admin@example.com", true).await;
        let alice = ctx.user("alice@example.com", false).await;
        ctx.member(&alice, "Ana").await;
        ctx.member(&alice, "Leo").await;
        ctx.member(&admin, "Sol").await;

        let service = UserService::new(ctx.store());
        service.delete(&caller(&admin), alice.id).await.unwrap();

        assert_eq!(ctx.store.count_family_members(Some(alice.id)).await.unwrap(), 0);
        assert_eq!(ctx.store.count_family_members(None).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn superuser_cannot_delete_self() {
        let ctx = TestContext::new();
        let admin = ctx.user("admin@example.com", true).await;
        let service = UserService::new(ctx.store());

        assert!(matches!(
            service.delete(&caller(&admin), admin.id).await,
            Err(ServiceError::Forbidden(_))
        ));
        assert!(matches!(
            service.delete(&caller(&admin), Uuid::new_v4()).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let ctx = TestContext::new();
        ctx.user("taken@example.com", false).await;
        let service = UserService::new(ctx.store());

        let payload: UserCreate = serde_json::from_value(serde_json::json!({
            "email": "taken@example.com",
            "hashed_password": "opaque"
        }))
        .unwrap();

        match service.create(payload).await {
            Err(ServiceError::Validation { field_errors, .. }) => assert!(field_errors.contains_key("email")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn me_returns_public_projection() {
        let ctx = TestContext::new();
        let alice = ctx.user("alice@example.com", false).await;
        let service = UserService::new(ctx.store());

        let me = service.me(&caller(&alice)).await.unwrap();
        assert_eq!(me.id, alice.id);
        assert!(!me.is_superuser);
    }
}
