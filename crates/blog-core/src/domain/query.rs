//! Listing vocabulary: which posts to return and in which order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::Post;
use crate::error::DomainError;

/// Constraints on a post listing, combined with logical AND.
///
/// An empty filter matches every post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Exact match on `Post::author`.
    pub author: Option<String>,
    /// Containment match: the value must appear in `Post::tags`.
    pub tag: Option<String>,
}

impl PostFilter {
    pub fn by_author(author: impl Into<String>) -> Self {
        Self {
            author: Some(author.into()),
            ..Self::default()
        }
    }

    pub fn by_tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::default()
        }
    }

    /// Whether `post` satisfies every populated constraint.
    pub fn matches(&self, post: &Post) -> bool {
        let author_ok = match &self.author {
            Some(author) => post.author.as_deref() == Some(author.as_str()),
            None => true,
        };
        let tag_ok = match &self.tag {
            Some(tag) => post.tags.iter().any(|t| t == tag),
            None => true,
        };
        author_ok && tag_ok
    }
}

/// Post fields a listing can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
    Author,
    Contents,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
            SortField::Title => "title",
            SortField::Author => "author",
            SortField::Contents => "contents",
        }
    }

    /// Ascending comparison on this field. Missing values sort lowest.
    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        match self {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortField::Title => a.title.cmp(&b.title),
            SortField::Author => a.author.cmp(&b.author),
            SortField::Contents => a.contents.cmp(&b.contents),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" | "created_at" => Ok(SortField::CreatedAt),
            "updatedAt" | "updated_at" => Ok(SortField::UpdatedAt),
            "title" => Ok(SortField::Title),
            "author" => Ok(SortField::Author),
            "contents" => Ok(SortField::Contents),
            other => Err(DomainError::Validation(format!(
                "unknown sort field '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascending" | "asc" => Ok(SortOrder::Ascending),
            "descending" | "desc" => Ok(SortOrder::Descending),
            _ => Err(DomainError::Validation(format!(
                "unknown sort order '{}'",
                s
            ))),
        }
    }
}

/// Ordering of a post listing. Defaults to newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortOptions {
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl SortOptions {
    pub fn new(sort_by: SortField, sort_order: SortOrder) -> Self {
        Self {
            sort_by,
            sort_order,
        }
    }

    /// Build from optional raw names, falling back to the defaults.
    pub fn parse(sort_by: Option<&str>, sort_order: Option<&str>) -> Result<Self, DomainError> {
        Ok(Self {
            sort_by: sort_by.map(str::parse::<SortField>).transpose()?.unwrap_or_default(),
            sort_order: sort_order.map(str::parse::<SortOrder>).transpose()?.unwrap_or_default(),
        })
    }

    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        let ord = self.sort_by.compare(a, b);
        match self.sort_order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewPost;

    #[test]
    fn test_defaults_are_created_at_descending() {
        let sort = SortOptions::default();
        assert_eq!(sort.sort_by, SortField::CreatedAt);
        assert_eq!(sort.sort_order, SortOrder::Descending);
        assert_eq!(SortOptions::parse(None, None).unwrap(), sort);
    }

    #[test]
    fn test_parse_accepts_known_names() {
        let sort = SortOptions::parse(Some("updatedAt"), Some("ascending")).unwrap();
        assert_eq!(sort, SortOptions::new(SortField::UpdatedAt, SortOrder::Ascending));

        let sort = SortOptions::parse(Some("title"), Some("DESC")).unwrap();
        assert_eq!(sort, SortOptions::new(SortField::Title, SortOrder::Descending));
    }

    #[test]
    fn test_unknown_sort_field_is_a_caller_error() {
        let err = SortOptions::parse(Some("likes"), None).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = SortOptions::parse(None, Some("sideways")).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_tag_filter_is_containment() {
        let post = Post::create(NewPost::new("p").with_tags(["react", "nodejs"]));

        assert!(PostFilter::by_tag("react").matches(&post));
        assert!(PostFilter::by_tag("nodejs").matches(&post));
        assert!(!PostFilter::by_tag("redux").matches(&post));
    }

    #[test]
    fn test_filter_keys_combine_with_and() {
        let post = Post::create(
            NewPost::new("p")
                .with_author("Daniel Bugl")
                .with_tags(["react"]),
        );
        let both = PostFilter {
            author: Some("Daniel Bugl".to_string()),
            tag: Some("react".to_string()),
        };
        let mismatch = PostFilter {
            author: Some("Daniel Bugl".to_string()),
            tag: Some("redux".to_string()),
        };

        assert!(PostFilter::default().matches(&post));
        assert!(both.matches(&post));
        assert!(!mismatch.matches(&post));
    }

    #[test]
    fn test_author_filter_skips_anonymous_posts() {
        let post = Post::create(NewPost::new("anonymous"));
        assert!(!PostFilter::by_author("Daniel Bugl").matches(&post));
    }

    #[test]
    fn test_missing_values_sort_lowest() {
        let anonymous = Post::create(NewPost::new("a"));
        let named = Post::create(NewPost::new("b").with_author("Ada"));

        let asc = SortOptions::new(SortField::Author, SortOrder::Ascending);
        let desc = SortOptions::new(SortField::Author, SortOrder::Descending);

        assert_eq!(asc.compare(&anonymous, &named), Ordering::Less);
        assert_eq!(desc.compare(&anonymous, &named), Ordering::Greater);
    }
}
