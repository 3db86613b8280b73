pub mod auth;
pub mod note;
pub mod pdf;
pub mod sub;
pub mod unit;
