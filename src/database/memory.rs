use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{FamilyMember, FamilyMemberUpdate, FamilyMemberWithOwner, User};
use super::store::{FamilyMemberStore, Store, UserStore};

/// In-process store with the same semantics as the Postgres tables: unique emails,
/// owner foreign keys, cascade on user delete, insertion order for full scans.
///
/// Locks are always taken users-first.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    family_members: RwLock<Vec<FamilyMember>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn page<T>(items: Vec<T>, skip: i64, limit: i64) -> Vec<T> {
    let skip = usize::try_from(skip).unwrap_or(0);
    let limit = usize::try_from(limit).unwrap_or(0);
    items.into_iter().skip(skip).take(limit).collect()
}

#[async_trait]
impl FamilyMemberStore for MemoryStore {
    async fn list_family_members(
        &self,
        owner_id: Option<Uuid>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<FamilyMember>, DatabaseError> {
        let members = self.family_members.read().await;
        let mut visible: Vec<FamilyMember> = members
            .iter()
            .filter(|m| owner_id.map_or(true, |owner| m.owner_id == owner))
            .cloned()
            .collect();
        visible.sort_by_key(|m| m.id);
        Ok(page(visible, skip, limit))
    }

    async fn count_family_members(&self, owner_id: Option<Uuid>) -> Result<i64, DatabaseError> {
        let members = self.family_members.read().await;
        let count = members
            .iter()
            .filter(|m| owner_id.map_or(true, |owner| m.owner_id == owner))
            .count();
        Ok(count as i64)
    }

    async fn get_family_member(&self, id: Uuid) -> Result<Option<FamilyMember>, DatabaseError> {
        let members = self.family_members.read().await;
        Ok(members.iter().find(|m| m.id == id).cloned())
    }

    async fn insert_family_member(&self, member: FamilyMember) -> Result<FamilyMember, DatabaseError> {
        let users = self.users.read().await;
        let mut members = self.family_members.write().await;

        if !users.iter().any(|u| u.id == member.owner_id) {
            return Err(DatabaseError::ConstraintViolation(format!(
                "owner {} does not exist",
                member.owner_id
            )));
        }
        if members.iter().any(|m| m.id == member.id) {
            return Err(DatabaseError::Conflict(format!("familymember {} already exists", member.id)));
        }

        members.push(member.clone());
        Ok(member)
    }

    async fn update_family_member(
        &self,
        id: Uuid,
        patch: &FamilyMemberUpdate,
    ) -> Result<Option<FamilyMember>, DatabaseError> {
        let mut members = self.family_members.write().await;
        let Some(member) = members.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        patch.apply_to(member);
        Ok(Some(member.clone()))
    }

    async fn delete_family_member(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut members = self.family_members.write().await;
        let before = members.len();
        members.retain(|m| m.id != id);
        Ok(members.len() < before)
    }

    async fn all_family_members(&self) -> Result<Vec<FamilyMember>, DatabaseError> {
        Ok(self.family_members.read().await.clone())
    }

    async fn all_family_members_with_owner(&self) -> Result<Vec<FamilyMemberWithOwner>, DatabaseError> {
        let users = self.users.read().await;
        let members = self.family_members.read().await;

        // Inner join: members whose owner is missing are skipped, as in SQL
        let rows = members
            .iter()
            .filter_map(|m| {
                users.iter().find(|u| u.id == m.owner_id).map(|owner| FamilyMemberWithOwner {
                    member: m.clone(),
                    owner_full_name: owner.full_name.clone(),
                    owner_email: owner.email.clone(),
                    owner_address: owner.address.clone(),
                    owner_phone: owner.phone.clone(),
                })
            })
            .collect();
        Ok(rows)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.read().await.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: User) -> Result<User, DatabaseError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(DatabaseError::Conflict(format!("email {} already registered", user.email)));
        }
        if users.iter().any(|u| u.id == user.id) {
            return Err(DatabaseError::Conflict(format!("user {} already exists", user.id)));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut users = self.users.write().await;
        let mut members = self.family_members.write().await;

        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Ok(false);
        }
        members.retain(|m| m.owner_id != id);
        Ok(true)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{FamilyMemberCreate, UserCreate};

    fn user(email: &str) -> User {
        UserCreate {
            email: email.to_string(),
            is_active: true,
            is_superuser: false,
            full_name: None,
            address: None,
            phone: None,
            hashed_password: "opaque".to_string(),
        }
        .into_user()
    }

    fn member(owner: Uuid, name: &str) -> FamilyMember {
        FamilyMemberCreate {
            given_name: Some(name.to_string()),
            ..Default::default()
        }
        .into_member(owner)
    }

    #[tokio::test]
    async fn deleting_user_cascades_to_family_members() {
        let store = MemoryStore::new();
        let alice = store.insert_user(user("alice@example.com")).await.unwrap();
        let bob = store.insert_user(user("bob@example.com")).await.unwrap();

        store.insert_family_member(member(alice.id, "Ana")).await.unwrap();
        store.insert_family_member(member(alice.id, "Leo")).await.unwrap();
        let kept = store.insert_family_member(member(bob.id, "Mia")).await.unwrap();

        assert!(store.delete_user(alice.id).await.unwrap());
        assert_eq!(store.count_family_members(Some(alice.id)).await.unwrap(), 0);
        assert_eq!(store.all_family_members().await.unwrap(), vec![kept]);
        assert!(!store.delete_user(alice.id).await.unwrap());
    }

    #[tokio::test]
    async fn insert_requires_existing_owner() {
        let store = MemoryStore::new();
        let err = store.insert_family_member(member(Uuid::new_v4(), "Ana")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn emails_are_unique() {
        let store = MemoryStore::new();
        store.insert_user(user("dup@example.com")).await.unwrap();
        let err = store.insert_user(user("dup@example.com")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)));
    }

    #[tokio::test]
    async fn pages_are_ordered_by_id() {
        let store = MemoryStore::new();
        let owner = store.insert_user(user("pager@example.com")).await.unwrap();
        for name in ["a", "b", "c", "d", "e"] {
            store.insert_family_member(member(owner.id, name)).await.unwrap();
        }

        let first = store.list_family_members(None, 0, 2).await.unwrap();
        let rest = store.list_family_members(None, 2, 10).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(rest.len(), 3);

        let mut ids: Vec<Uuid> = first.iter().chain(rest.iter()).map(|m| m.id).collect();
        let in_order = ids.clone();
        ids.sort();
        assert_eq!(ids, in_order);
    }

    #[tokio::test]
    async fn export_join_carries_owner_contact() {
        let store = MemoryStore::new();
        let mut owner = user("head@example.com");
        owner.full_name = Some("Family Head".into());
        owner.phone = Some("555-0100".into());
        let owner = store.insert_user(owner).await.unwrap();
        store.insert_family_member(member(owner.id, "Ana")).await.unwrap();

        let rows = store.all_family_members_with_owner().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].owner_email, "head@example.com");
        assert_eq!(rows[0].owner_phone.as_deref(), Some("555-0100"));
        assert_eq!(rows[0].member.given_name.as_deref(), Some("Ana"));
    }
}
