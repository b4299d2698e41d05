//! Post entity.

use chrono::{DateTime, Utc};

/// A published blog post.
///
/// `author_name` is joined from the `users` table for display.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Returns at most `max_chars` characters of the content, suffixed with
    /// an ellipsis when truncated.
    pub fn excerpt(&self, max_chars: usize) -> String {
        let mut chars = self.content.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{}…", head.trim_end())
        } else {
            head
        }
    }

    /// Returns true if the post was edited after creation.
    pub fn is_edited(&self) -> bool {
        self.updated_at > self.created_at
    }
}

/// Input data for creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: i64,
    pub title: String,
    pub content: String,
}

/// Replacement values for an existing post.
#[derive(Debug, Clone)]
pub struct PostPatch {
    pub title: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn post(content: &str) -> Post {
        let now = Utc::now();
        Post {
            id: 1,
            author_id: 7,
            author_name: "Ada".to_string(),
            title: "Hello".to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_excerpt_short_content_unchanged() {
        assert_eq!(post("short").excerpt(10), "short");
    }

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        let p = post("héllo wörld and more");
        assert_eq!(p.excerpt(11), "héllo wörld…");
    }

    #[test]
    fn test_is_edited() {
        let mut p = post("x");
        assert!(!p.is_edited());
        p.updated_at = p.created_at + Duration::seconds(5);
        assert!(p.is_edited());
    }
}
