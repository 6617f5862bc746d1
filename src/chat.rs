//! Canned-response chat.
//!
//! Replies to free-text messages by keyword containment against an
//! immutable [`ResponseTable`], with built-in answers for the current time
//! and date.
mod matcher;
mod responses;

pub use matcher::{FALLBACK_REPLY, ResponseMatcher};
pub use responses::{ResponseTable, ResponseTableError};
