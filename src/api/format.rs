use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use uuid::Uuid;

use crate::database::models::{FamilyMember, FamilyMemberWithOwner};

pub const WISHLIST_FILENAME: &str = "wishlist.csv";
pub const ADMIN_WISHLIST_FILENAME: &str = "wishlist_admin.csv";

pub const WISHLIST_HEADERS: [&str; 7] = [
    "Family ID",
    "Given Name",
    "Family Role",
    "Age",
    "Practical Wish",
    "Fun Wish",
    "Note",
];

pub const ADMIN_WISHLIST_HEADERS: [&str; 10] = [
    "Family Head Name",
    "Family Email",
    "Family Address",
    "Family Phone",
    "Given Name",
    "Family Role",
    "Age",
    "Practical Wish",
    "Fun Wish",
    "Note",
];

/// One line of the basic export. Field order matches `WISHLIST_HEADERS`.
#[derive(Debug, Serialize)]
struct WishlistRow<'a> {
    family_id: Uuid,
    given_name: Option<&'a str>,
    family_role: Option<&'a str>,
    age: i32,
    practical_wish: Option<&'a str>,
    fun_wish: Option<&'a str>,
    note: Option<&'a str>,
}

impl<'a> From<&'a FamilyMember> for WishlistRow<'a> {
    fn from(m: &'a FamilyMember) -> Self {
        Self {
            family_id: m.owner_id,
            given_name: m.given_name.as_deref(),
            family_role: m.family_role.as_deref(),
            age: m.age,
            practical_wish: m.practical_wish.as_deref(),
            fun_wish: m.fun_wish.as_deref(),
            note: m.note.as_deref(),
        }
    }
}

/// One line of the admin export. Field order matches `ADMIN_WISHLIST_HEADERS`.
#[derive(Debug, Serialize)]
struct AdminWishlistRow<'a> {
    head_name: Option<&'a str>,
    email: &'a str,
    address: Option<&'a str>,
    phone: Option<&'a str>,
    given_name: Option<&'a str>,
    family_role: Option<&'a str>,
    age: i32,
    practical_wish: Option<&'a str>,
    fun_wish: Option<&'a str>,
    note: Option<&'a str>,
}

impl<'a> From<&'a FamilyMemberWithOwner> for AdminWishlistRow<'a> {
    fn from(row: &'a FamilyMemberWithOwner) -> Self {
        let m = &row.member;
        Self {
            head_name: row.owner_full_name.as_deref(),
            email: &row.owner_email,
            address: row.owner_address.as_deref(),
            phone: row.owner_phone.as_deref(),
            given_name: m.given_name.as_deref(),
            family_role: m.family_role.as_deref(),
            age: m.age,
            practical_wish: m.practical_wish.as_deref(),
            fun_wish: m.fun_wish.as_deref(),
            note: m.note.as_deref(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("failed to flush csv buffer: {0}")]
    Flush(String),
}

/// Header row followed by one row per item. Empty input still yields the header.
fn write_csv<R: Serialize>(headers: &[&str], rows: impl IntoIterator<Item = R>) -> Result<Vec<u8>, CsvError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(Vec::new());

    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer.into_inner().map_err(|e| CsvError::Flush(e.error().to_string()))
}

pub fn wishlist_csv(members: &[FamilyMember]) -> Result<Vec<u8>, CsvError> {
    write_csv(&WISHLIST_HEADERS, members.iter().map(WishlistRow::from))
}

pub fn admin_wishlist_csv(rows: &[FamilyMemberWithOwner]) -> Result<Vec<u8>, CsvError> {
    write_csv(&ADMIN_WISHLIST_HEADERS, rows.iter().map(AdminWishlistRow::from))
}

/// `text/csv` download with a fixed filename
pub fn csv_attachment(filename: &str, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename={}", filename)),
        ],
        body,
    )
        .into_response()
}
