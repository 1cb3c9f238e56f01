//! Domain types and models

pub mod batch;
pub mod field;
pub mod user;

pub use batch::{
    BatchCursor, BatchRequest, BatchResponse, BatchResult, ProgressSnapshot, UserCount,
};
pub use field::{DisplayField, FieldSelection, TokenFilter};
pub use user::{NewUser, ProfileUpdate, UserId, UserRecord};
