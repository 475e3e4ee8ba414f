pub mod extract;
pub mod format;
pub mod validate;

pub use extract::{ListParams, ValidJson};
