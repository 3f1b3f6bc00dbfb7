use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommentId(pub String);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub body: String,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const COMMENT_MAX_LENGTH: usize = 300;

pub fn normalize_body(raw: &str) -> Result<String, CommentBodyError> {
    let body = raw.trim();
    if body.is_empty() {
        return Err(CommentBodyError::Empty);
    }
    if body.chars().count() > COMMENT_MAX_LENGTH {
        return Err(CommentBodyError::TooLong);
    }
    Ok(body.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommentBodyError {
    #[error("comment must not be empty")]
    Empty,
    #[error("comment must be at most {max} characters", max = COMMENT_MAX_LENGTH)]
    TooLong,
}

/// Listing order by creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentSort {
    #[default]
    Newest,
    Oldest,
}

impl CommentSort {
    pub fn apply(self, comments: &mut [Comment]) {
        match self {
            CommentSort::Newest => comments.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            CommentSort::Oldest => comments.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        }
    }
}

/// Public projection: the comment text plus the author's user name when known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentView {
    pub id: CommentId,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn body_is_trimmed_and_bounded() {
        assert_eq!(normalize_body("  hello  "), Ok("hello".to_string()));
        assert_eq!(normalize_body("   "), Err(CommentBodyError::Empty));
        assert_eq!(
            normalize_body(&"a".repeat(COMMENT_MAX_LENGTH + 1)),
            Err(CommentBodyError::TooLong)
        );
        assert!(normalize_body(&"a".repeat(COMMENT_MAX_LENGTH)).is_ok());
    }

    #[test]
    fn sort_orders_by_creation_time() {
        let at = |hour| Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap();
        let comment = |id: &str, hour| Comment {
            id: CommentId(id.to_string()),
            body: id.to_string(),
            created_by: UserId("u-1".to_string()),
            created_at: at(hour),
            updated_at: at(hour),
        };
        let mut comments = vec![comment("b", 9), comment("a", 8), comment("c", 10)];

        CommentSort::Newest.apply(&mut comments);
        let ids: Vec<_> = comments.iter().map(|c| c.id.0.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);

        CommentSort::Oldest.apply(&mut comments);
        let ids: Vec<_> = comments.iter().map(|c| c.id.0.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
