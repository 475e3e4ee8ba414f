use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{FamilyMember, FamilyMemberUpdate, FamilyMemberWithOwner, User};
use super::store::{FamilyMemberStore, Store, UserStore};

const FAMILY_MEMBER_COLUMNS: &str =
    "id, given_name, family_role, age, practical_wish, fun_wish, note, owner_id";

const USER_COLUMNS: &str =
    "id, email, is_active, is_superuser, full_name, address, phone, hashed_password";

/// Store backed by the `user` and `familymember` tables
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FamilyMemberStore for PgStore {
    async fn list_family_members(
        &self,
        owner_id: Option<Uuid>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<FamilyMember>, DatabaseError> {
        let members = match owner_id {
            Some(owner_id) => {
                let sql = format!(
                    "SELECT {FAMILY_MEMBER_COLUMNS} FROM familymember WHERE owner_id = $1 ORDER BY id OFFSET $2 LIMIT $3"
                );
                sqlx::query_as::<_, FamilyMember>(&sql)
                    .bind(owner_id)
                    .bind(skip)
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("SELECT {FAMILY_MEMBER_COLUMNS} FROM familymember ORDER BY id OFFSET $1 LIMIT $2");
                sqlx::query_as::<_, FamilyMember>(&sql)
                    .bind(skip)
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(members)
    }

    async fn count_family_members(&self, owner_id: Option<Uuid>) -> Result<i64, DatabaseError> {
        let count = match owner_id {
            Some(owner_id) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM familymember WHERE owner_id = $1")
                    .bind(owner_id)
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM familymember")
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(count)
    }

    async fn get_family_member(&self, id: Uuid) -> Result<Option<FamilyMember>, DatabaseError> {
        let sql = format!("SELECT {FAMILY_MEMBER_COLUMNS} FROM familymember WHERE id = $1");
        let member = sqlx::query_as::<_, FamilyMember>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(member)
    }

    async fn insert_family_member(&self, member: FamilyMember) -> Result<FamilyMember, DatabaseError> {
        let sql = format!(
            "INSERT INTO familymember ({FAMILY_MEMBER_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {FAMILY_MEMBER_COLUMNS}"
        );

        let mut tx = self.pool.begin().await?;
        let stored = sqlx::query_as::<_, FamilyMember>(&sql)
            .bind(member.id)
            .bind(&member.given_name)
            .bind(&member.family_role)
            .bind(member.age)
            .bind(&member.practical_wish)
            .bind(&member.fun_wish)
            .bind(&member.note)
            .bind(member.owner_id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        debug!("Inserted familymember {}", stored.id);
        Ok(stored)
    }

    async fn update_family_member(
        &self,
        id: Uuid,
        patch: &FamilyMemberUpdate,
    ) -> Result<Option<FamilyMember>, DatabaseError> {
        let select = format!("SELECT {FAMILY_MEMBER_COLUMNS} FROM familymember WHERE id = $1 FOR UPDATE");
        let update = format!(
            "UPDATE familymember \
             SET given_name = $2, family_role = $3, age = $4, practical_wish = $5, fun_wish = $6, note = $7 \
             WHERE id = $1 RETURNING {FAMILY_MEMBER_COLUMNS}"
        );

        let mut tx = self.pool.begin().await?;

        let Some(mut member) = sqlx::query_as::<_, FamilyMember>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        patch.apply_to(&mut member);

        let stored = sqlx::query_as::<_, FamilyMember>(&update)
            .bind(member.id)
            .bind(&member.given_name)
            .bind(&member.family_role)
            .bind(member.age)
            .bind(&member.practical_wish)
            .bind(&member.fun_wish)
            .bind(&member.note)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(Some(stored))
    }

    async fn delete_family_member(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM familymember WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn all_family_members(&self) -> Result<Vec<FamilyMember>, DatabaseError> {
        let sql = format!("SELECT {FAMILY_MEMBER_COLUMNS} FROM familymember");
        let members = sqlx::query_as::<_, FamilyMember>(&sql).fetch_all(&self.pool).await?;
        Ok(members)
    }

    async fn all_family_members_with_owner(&self) -> Result<Vec<FamilyMemberWithOwner>, DatabaseError> {
        let sql = r#"
            SELECT
                fm.id, fm.given_name, fm.family_role, fm.age,
                fm.practical_wish, fm.fun_wish, fm.note, fm.owner_id,
                u.full_name AS owner_full_name,
                u.email AS owner_email,
                u.address AS owner_address,
                u.phone AS owner_phone
            FROM familymember fm
            JOIN "user" u ON u.id = fm.owner_id
        "#;
        let rows = sqlx::query_as::<_, FamilyMemberWithOwner>(sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let sql = format!(r#"SELECT {USER_COLUMNS} FROM "user" WHERE id = $1"#);
        let user = sqlx::query_as::<_, User>(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!(r#"SELECT {USER_COLUMNS} FROM "user" WHERE email = $1"#);
        let user = sqlx::query_as::<_, User>(&sql).bind(email).fetch_optional(&self.pool).await?;
        Ok(user)
    }

    async fn insert_user(&self, user: User) -> Result<User, DatabaseError> {
        let sql = format!(
            r#"INSERT INTO "user" ({USER_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {USER_COLUMNS}"#
        );

        let mut tx = self.pool.begin().await?;
        let stored = sqlx::query_as::<_, User>(&sql)
            .bind(user.id)
            .bind(&user.email)
            .bind(user.is_active)
            .bind(user.is_superuser)
            .bind(&user.full_name)
            .bind(&user.address)
            .bind(&user.phone)
            .bind(&user.hashed_password)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(stored)
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        // The FK cascades as well; deleting children here keeps older schemas consistent
        let children = sqlx::query("DELETE FROM familymember WHERE owner_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query(r#"DELETE FROM "user" WHERE id = $1"#)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        debug!("Deleted user {} and {} family members", id, children.rows_affected());
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
