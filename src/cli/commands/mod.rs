pub mod serve;
pub mod token;
pub mod user;
