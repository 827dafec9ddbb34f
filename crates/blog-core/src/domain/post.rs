use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Structured author name as it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Display form used by the public view: "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Post entity - a blog post as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author: Author,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

/// A validated post that has not been stored yet.
///
/// The store assigns the id and fills `created` with the insertion time when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author: Author,
    pub title: String,
    pub content: String,
    pub created: Option<DateTime<Utc>>,
}

impl NewPost {
    pub fn new(author: Author, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author,
            title: title.into(),
            content: content.into(),
            created: None,
        }
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// Turn the candidate into a stored post under the given id.
    pub fn into_post(self, id: Uuid) -> Post {
        Post {
            id,
            author: self.author,
            title: self.title,
            content: self.content,
            created: self.created.unwrap_or_else(Utc::now),
        }
    }
}

/// Partial update: only the fields that are `Some` change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub author: Option<Author>,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.title.is_none() && self.content.is_none()
    }

    /// Overwrite the patched fields of `post`, leaving the rest untouched.
    pub fn apply(self, post: &mut Post) {
        if let Some(author) = self.author {
            post.author = author;
        }
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
    }
}

/// Exact-match filter for `find_one`. An empty filter matches every post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub title: Option<String>,
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
}

impl PostFilter {
    pub fn by_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.title.as_ref().is_none_or(|t| *t == post.title)
            && self
                .author_first_name
                .as_ref()
                .is_none_or(|n| *n == post.author.first_name)
            && self
                .author_last_name
                .as_ref()
                .is_none_or(|n| *n == post.author.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Post {
        NewPost::new(Author::new("Ada", "Lovelace"), "Engines", "Notes on engines")
            .into_post(Uuid::new_v4())
    }

    #[test]
    fn full_name_joins_parts() {
        assert_eq!(Author::new("Ada", "Lovelace").full_name(), "Ada Lovelace");
    }

    #[test]
    fn full_name_contains_parts_verbatim() {
        let author = Author::new(" Ada", "Lovelace ");
        assert!(author.full_name().contains(&author.first_name));
        assert!(author.full_name().contains(&author.last_name));
    }

    #[test]
    fn new_post_keeps_explicit_created() {
        let created = DateTime::parse_from_rfc3339("2020-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let post = NewPost::new(Author::new("A", "B"), "t", "c")
            .with_created(created)
            .into_post(Uuid::new_v4());
        assert_eq!(post.created, created);
    }

    #[test]
    fn patch_only_touches_supplied_fields() {
        let mut post = sample();
        let before = post.clone();

        PostPatch {
            title: Some("New Post".to_string()),
            content: Some("Blah blah".to_string()),
            ..PostPatch::default()
        }
        .apply(&mut post);

        assert_eq!(post.title, "New Post");
        assert_eq!(post.content, "Blah blah");
        assert_eq!(post.author, before.author);
        assert_eq!(post.id, before.id);
        assert_eq!(post.created, before.created);
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(PostFilter::default().matches(&sample()));
        assert!(PostFilter::by_title("Engines").matches(&sample()));
        assert!(!PostFilter::by_title("Other").matches(&sample()));
    }
}
