use std::sync::Arc;

use crate::auth::CurrentUser;
use crate::database::models::{FamilyMember, FamilyMemberCreate, User, UserCreate};
use crate::database::{FamilyMemberStore, MemoryStore, Store, UserStore};

/// Seeded in-memory store for service-level tests
pub struct TestContext {
    pub store: Arc<MemoryStore>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
        }
    }

    pub fn store(&self) -> Arc<dyn Store> {
        self.store.clone()
    }

    pub async fn user(&self, email: &str, is_superuser: bool) -> User {
        let user = UserCreate {
            email: email.to_string(),
            is_active: true,
            is_superuser,
            full_name: Some(format!("Head of {}", email)),
            address: Some("1 Main St".to_string()),
            phone: Some("555-0100".to_string()),
            hashed_password: "opaque-hash".to_string(),
        }
        .into_user();

        self.store.insert_user(user).await.expect("failed to seed user")
    }

    pub async fn member(&self, owner: &User, given_name: &str) -> FamilyMember {
        let member = FamilyMemberCreate {
            given_name: Some(given_name.to_string()),
            age: 7,
            ..Default::default()
        }
        .into_member(owner.id);

        self.store
            .insert_family_member(member)
            .await
            .expect("failed to seed family member")
    }
}

pub fn caller(user: &User) -> CurrentUser {
    CurrentUser::from(user)
}
