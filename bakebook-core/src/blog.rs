//! Read-only client for published blog posts on a Directus-style content API.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BlogError;

const POST_FIELDS: &str = "id,title,slug,description,published_at,status";
const PUBLISHED: &str = "published";

/// Directus item ids are integers or strings depending on the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Number(i64),
    Text(String),
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostId::Number(n) => write!(f, "{}", n),
            PostId::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Post {
    /// Publication time. Timestamps without an offset are read as UTC.
    pub fn published_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.published_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }

    fn is_published(&self) -> bool {
        self.status.as_deref().map_or(true, |s| s == PUBLISHED)
    }
}

/// Source of published posts.
#[async_trait]
pub trait BlogClient: Send + Sync {
    async fn published_posts(&self) -> Result<Vec<Post>, BlogError>;
}

#[derive(Deserialize)]
struct ItemsResponse {
    data: Vec<Post>,
}

/// Client for the `/items/posts` endpoint of a Directus instance.
pub struct DirectusClient {
    inner: reqwest::Client,
    base_url: reqwest::Url,
}

impl DirectusClient {
    pub fn new(base_url: &str) -> Result<Self, BlogError> {
        let base_url = reqwest::Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| BlogError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { inner, base_url })
    }

    fn posts_url(&self) -> String {
        format!("{}/items/posts", self.base_url.as_str().trim_end_matches('/'))
    }
}

#[async_trait]
impl BlogClient for DirectusClient {
    async fn published_posts(&self) -> Result<Vec<Post>, BlogError> {
        let url = self.posts_url();
        tracing::debug!(url, "fetching published posts");

        let response = self
            .inner
            .get(&url)
            .query(&[
                ("fields", POST_FIELDS),
                ("filter[status][_eq]", PUBLISHED),
                ("sort", "-published_at"),
                ("limit", "-1"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let items: ItemsResponse = response.json().await?;
        tracing::debug!(count = items.data.len(), "fetched posts");
        Ok(items.data)
    }
}

/// Canned posts or a canned failure, for tests.
#[derive(Debug, Default)]
pub struct MockBlogClient {
    posts: Vec<Post>,
    error: Option<String>,
}

impl MockBlogClient {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self { posts, error: None }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            posts: Vec::new(),
            error: Some(message.to_string()),
        }
    }
}

#[async_trait]
impl BlogClient for MockBlogClient {
    async fn published_posts(&self) -> Result<Vec<Post>, BlogError> {
        match &self.error {
            Some(message) => Err(BlogError::Unavailable(message.clone())),
            None => Ok(self.posts.clone()),
        }
    }
}

/// What the blog page shows.
#[derive(Debug, Clone, PartialEq)]
pub enum BlogListing {
    Posts(Vec<Post>),
    Empty,
    /// The content API could not be reached or answered badly.
    Unavailable(String),
}

/// Published posts, newest first. Never fails: errors become [`BlogListing::Unavailable`].
pub async fn load_blog_listing(client: &dyn BlogClient) -> BlogListing {
    match client.published_posts().await {
        Ok(posts) => {
            let mut posts: Vec<Post> = posts.into_iter().filter(Post::is_published).collect();
            // Newest first; undated posts last.
            posts.sort_by(|a, b| b.published_at_utc().cmp(&a.published_at_utc()));
            if posts.is_empty() {
                BlogListing::Empty
            } else {
                BlogListing::Posts(posts)
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch blog posts");
            BlogListing::Unavailable(e.to_string())
        }
    }
}
