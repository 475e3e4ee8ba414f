pub mod family_member;
pub mod user;

pub use family_member::{
    FamilyMember, FamilyMemberCreate, FamilyMemberPublic, FamilyMemberUpdate, FamilyMemberWithOwner,
    FamilyMembersPublic, Message, DEFAULT_AGE,
};
pub use user::{User, UserCreate, UserPublic};
