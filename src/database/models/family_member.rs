use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::api::validate::{check_length, into_result, FieldErrors, Validate};

/// Age stored when the caller does not supply one
pub const DEFAULT_AGE: i32 = -1;

const GIVEN_NAME_MAX: usize = 30;
const FAMILY_ROLE_MAX: usize = 255;
const WISH_MAX: usize = 255;
const NOTE_MAX: usize = 1000;

/// A wish-list entry, always owned by exactly one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FamilyMember {
    pub id: Uuid,
    pub given_name: Option<String>,
    pub family_role: Option<String>,
    pub age: i32,
    pub practical_wish: Option<String>,
    pub fun_wish: Option<String>,
    pub note: Option<String>,
    pub owner_id: Uuid,
}

/// Family member joined with the contact details of its owner
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct FamilyMemberWithOwner {
    #[sqlx(flatten)]
    pub member: FamilyMember,
    pub owner_full_name: Option<String>,
    pub owner_email: String,
    pub owner_address: Option<String>,
    pub owner_phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMemberPublic {
    pub id: Uuid,
    pub given_name: Option<String>,
    pub family_role: Option<String>,
    pub age: i32,
    pub practical_wish: Option<String>,
    pub fun_wish: Option<String>,
    pub note: Option<String>,
    pub owner_id: Uuid,
}

impl From<FamilyMember> for FamilyMemberPublic {
    fn from(member: FamilyMember) -> Self {
        Self {
            id: member.id,
            given_name: member.given_name,
            family_role: member.family_role,
            age: member.age,
            practical_wish: member.practical_wish,
            fun_wish: member.fun_wish,
            note: member.note,
            owner_id: member.owner_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMembersPublic {
    pub data: Vec<FamilyMemberPublic>,
    pub count: i64,
}

/// Payload accepted on creation. Unknown keys (including `owner_id`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FamilyMemberCreate {
    /// Required key; `null` is accepted
    #[serde(deserialize_with = "Option::deserialize")]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_role: Option<String>,
    #[serde(default = "default_age")]
    pub age: i32,
    #[serde(default)]
    pub practical_wish: Option<String>,
    #[serde(default)]
    pub fun_wish: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

fn default_age() -> i32 {
    DEFAULT_AGE
}

impl FamilyMemberCreate {
    /// Build the stored record with a fresh id and the given owner
    pub fn into_member(self, owner_id: Uuid) -> FamilyMember {
        FamilyMember {
            id: Uuid::new_v4(),
            given_name: self.given_name,
            family_role: self.family_role,
            age: self.age,
            practical_wish: self.practical_wish,
            fun_wish: self.fun_wish,
            note: self.note,
            owner_id,
        }
    }
}

impl Validate for FamilyMemberCreate {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_length(&mut errors, "given_name", self.given_name.as_deref(), 1, GIVEN_NAME_MAX);
        check_length(&mut errors, "family_role", self.family_role.as_deref(), 0, FAMILY_ROLE_MAX);
        check_length(&mut errors, "practical_wish", self.practical_wish.as_deref(), 0, WISH_MAX);
        check_length(&mut errors, "fun_wish", self.fun_wish.as_deref(), 0, WISH_MAX);
        check_length(&mut errors, "note", self.note.as_deref(), 0, NOTE_MAX);
        into_result(errors)
    }
}

/// Partial update. Outer `None` means the key was absent and the stored value is kept;
/// `Some(None)` means an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FamilyMemberUpdate {
    #[serde(default, deserialize_with = "present")]
    pub given_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub family_role: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub age: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    pub practical_wish: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub fun_wish: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub note: Option<Option<String>>,
}

/// Marks a key as present, keeping `null` distinguishable from a missing key
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl FamilyMemberUpdate {
    pub fn is_empty(&self) -> bool {
        self.given_name.is_none()
            && self.family_role.is_none()
            && self.age.is_none()
            && self.practical_wish.is_none()
            && self.fun_wish.is_none()
            && self.note.is_none()
    }

    /// Overwrite only the fields present in the patch
    pub fn apply_to(&self, member: &mut FamilyMember) {
        if let Some(given_name) = &self.given_name {
            member.given_name = given_name.clone();
        }
        if let Some(family_role) = &self.family_role {
            member.family_role = family_role.clone();
        }
        if let Some(Some(age)) = self.age {
            member.age = age;
        }
        if let Some(practical_wish) = &self.practical_wish {
            member.practical_wish = practical_wish.clone();
        }
        if let Some(fun_wish) = &self.fun_wish {
            member.fun_wish = fun_wish.clone();
        }
        if let Some(note) = &self.note {
            member.note = note.clone();
        }
    }
}

impl Validate for FamilyMemberUpdate {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_length(&mut errors, "given_name", self.given_name.as_ref().and_then(|v| v.as_deref()), 1, GIVEN_NAME_MAX);
        check_length(&mut errors, "family_role", self.family_role.as_ref().and_then(|v| v.as_deref()), 0, FAMILY_ROLE_MAX);
        check_length(&mut errors, "practical_wish", self.practical_wish.as_ref().and_then(|v| v.as_deref()), 0, WISH_MAX);
        check_length(&mut errors, "fun_wish", self.fun_wish.as_ref().and_then(|v| v.as_deref()), 0, WISH_MAX);
        check_length(&mut errors, "note", self.note.as_ref().and_then(|v| v.as_deref()), 0, NOTE_MAX);
        // age is not nullable in storage
        if let Some(None) = self.age {
            errors.insert("age".to_string(), "Input should be a valid integer".to_string());
        }
        into_result(errors)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
