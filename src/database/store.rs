use async_trait::async_trait;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{FamilyMember, FamilyMemberUpdate, FamilyMemberWithOwner, User};

/// Persistence for family members.
///
/// `owner_id: None` on the list/count methods means "no owner filter".
#[async_trait]
pub trait FamilyMemberStore: Send + Sync {
    /// One page, ordered by primary key
    async fn list_family_members(
        &self,
        owner_id: Option<Uuid>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<FamilyMember>, DatabaseError>;

    async fn count_family_members(&self, owner_id: Option<Uuid>) -> Result<i64, DatabaseError>;

    async fn get_family_member(&self, id: Uuid) -> Result<Option<FamilyMember>, DatabaseError>;

    /// Persist a new record and return it as stored
    async fn insert_family_member(&self, member: FamilyMember) -> Result<FamilyMember, DatabaseError>;

    /// Merge the patch onto the stored row. `None` if the row no longer exists.
    async fn update_family_member(
        &self,
        id: Uuid,
        patch: &FamilyMemberUpdate,
    ) -> Result<Option<FamilyMember>, DatabaseError>;

    /// `false` if nothing was deleted
    async fn delete_family_member(&self, id: Uuid) -> Result<bool, DatabaseError>;

    /// Every record, in store iteration order
    async fn all_family_members(&self) -> Result<Vec<FamilyMember>, DatabaseError>;

    /// Every record joined with its owner, in store iteration order
    async fn all_family_members_with_owner(&self) -> Result<Vec<FamilyMemberWithOwner>, DatabaseError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    async fn insert_user(&self, user: User) -> Result<User, DatabaseError>;

    /// Removes the user and, with it, every family member it owns
    async fn delete_user(&self, id: Uuid) -> Result<bool, DatabaseError>;
}

/// Everything the HTTP layer needs from persistence
#[async_trait]
pub trait Store: FamilyMemberStore + UserStore {
    async fn health_check(&self) -> Result<(), DatabaseError>;
}
