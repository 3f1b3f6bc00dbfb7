//! User comments with profanity screening and staff moderation.

pub mod domain;
pub mod moderation;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Comment, CommentId, CommentSort, CommentView};
pub use moderation::{ModerationError, ProfanityFilter};
pub use repository::CommentStore;
pub use router::comment_router;
pub use service::{CommentError, CommentService};
