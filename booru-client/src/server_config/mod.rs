//! Per-server descriptors for every supported imageboard.
//!
//! Imageboards differ in their pagination key, whether the post list comes
//! wrapped under a key or as a bare array, how the human-viewable post page
//! is addressed, and how tags are reported. All of those quirks are plain
//! data on [`ServerConfig`], so one generic client serves every site.
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;

use booru_common::ImageBoards;

use crate::server_config;

pub(crate) const DEFAULT_UA: &str =
    concat!("Rust Booru Search Client/", env!("CARGO_PKG_VERSION"));

pub mod macros;

/// Wire name of the pagination parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageParam {
    /// `page=N`, used by e621-style APIs.
    Page,
    /// `pid=N`, used by gelbooru-style APIs.
    Pid,
}

impl PageParam {
    #[inline]
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Pid => "pid",
        }
    }
}

/// Shape of the human-viewable post page URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostPage {
    /// `{base_url}/posts/{id}`
    Path,
    /// `{base_url}/index.php?page=post&s=view&id={id}`
    ViewQuery,
}

/// How the server reports a post's tag list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagStyle {
    /// Tags come as a map of category name to tag array (e621). The
    /// normalizer flattens these into one list.
    Categorized,
    /// Tags are already a single flat value.
    Flat,
}

pub static DEFAULT_SERVERS: Lazy<HashMap<String, ServerConfig>> = Lazy::new(|| {
    let mut hmap = HashMap::with_capacity(2);
    hmap.insert(
        "e621".to_string(),
        server_config!(
            "e621",
            "e621",
            ImageBoards::E621,
            DEFAULT_UA,
            "https://e621.net",
            "https://e621.net/posts.json",
            PageParam::Page,
            Some(String::from("posts")),
            false,
            PostPage::Path,
            TagStyle::Categorized,
            vec![String::from("file"), String::from("url")],
            100
        ),
    );
    hmap.insert(
        "hypnohub".to_string(),
        server_config!(
            "hypnohub",
            "Hypnohub",
            ImageBoards::Hypnohub,
            DEFAULT_UA,
            "https://hypnohub.net",
            "https://hypnohub.net/index.php?page=dapi&s=post&q=index",
            PageParam::Pid,
            None,
            true,
            PostPage::ViewQuery,
            TagStyle::Flat,
            vec![String::from("file_url")],
            100
        ),
    );
    hmap
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub name: String,
    pub pretty_name: String,
    pub server: ImageBoards,
    pub client_user_agent: String,
    /// Hostname part used when synthesizing post page URLs.
    pub base_url: String,
    /// Endpoint queried for the post list.
    pub post_list_url: String,
    pub page_param: PageParam,
    /// Key the post list is wrapped under, or `None` for a bare array.
    pub posts_key: Option<String>,
    /// Whether the server wants an explicit `json=1` flag.
    pub json_flag: bool,
    pub post_page: PostPage,
    pub tag_style: TagStyle,
    /// Path of the direct image URL inside a normalized post.
    pub file_url_path: Vec<String>,
    /// Query keys credentials are merged under.
    pub auth_key_param: String,
    pub auth_user_param: String,
    pub max_post_limit: u16,
}

impl ServerConfig {
    /// Synthesizes the human-viewable post page URL for `id`.
    #[must_use]
    pub fn post_page_url(&self, id: u64) -> String {
        match self.post_page {
            PostPage::Path => format!("{}/posts/{}", self.base_url, id),
            PostPage::ViewQuery => {
                format!("{}/index.php?page=post&s=view&id={}", self.base_url, id)
            }
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        DEFAULT_SERVERS.get("e621").unwrap().clone()
    }
}

impl Display for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
