//! Main representation of a imageboard post
//!
//! # Post
//! A [`Post` struct](Post) is a generic representation of an imageboard post.
//!
//! Imageboard APIs agree on very little beyond the numeric post id, so every
//! field the client does not interpret itself is carried through unchanged in
//! the post's extra map, exactly as the server sent it (after key
//! normalization).
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use std::fmt::Debug;

use crate::ImageBoards;

/// Catchall model for the parts of an imageboard post the client understands.
#[derive(Clone, Serialize, PartialEq)]
pub struct Post {
    /// ID number of the post given by the imageboard
    pub id: Option<u64>,
    /// The imageboard where this post was extracted from
    pub website: ImageBoards,
    /// Human-viewable post page, synthesized by `search` from the post id.
    ///
    /// Never set for posts missing an id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_url: Option<String>,
    /// Every other field of the post, passed through from the server.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Debug for Post {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Post")
            .field("Post ID", &self.id)
            .field("Website", &self.website)
            .field("Post URL", &self.post_url)
            .field("Extra fields", &self.extra.len())
            .finish()
    }
}

impl Post {
    /// Builds a post from a normalized JSON object.
    ///
    /// The id is lifted out of the object when it is numeric; everything else
    /// stays in `extra`.
    pub fn from_object(website: ImageBoards, mut obj: Map<String, Value>) -> Self {
        let id = obj.get("id").and_then(Value::as_u64);
        if id.is_some() {
            obj.remove("id");
        }

        Self {
            id,
            website,
            post_url: None,
            extra: obj,
        }
    }

    /// Reads a passthrough field by the path the server nested it under.
    #[inline]
    pub fn lookup(&self, path: &[String]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.extra.get(first)?;
        for key in rest {
            current = current.get(key)?;
        }
        Some(current)
    }
}

/// Reduced form of a [`Post`] carrying only what is needed to fetch the image
/// file itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// ID number of the post given by the imageboard
    pub id: Option<u64>,
    /// Direct URL of the original image file inside the imageboard's server
    pub file_url: String,
}

/// What a `search` call hands back, depending on the selection flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SearchResult {
    /// The full post collection.
    Posts(Vec<Post>),
    /// A single randomly drawn post (gacha mode).
    Single(Box<Post>),
}

impl SearchResult {
    /// Flattens the result into a plain post list.
    #[must_use]
    pub fn into_posts(self) -> Vec<Post> {
        match self {
            Self::Posts(posts) => posts,
            Self::Single(post) => vec![*post],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Posts(posts) => posts.len(),
            Self::Single(_) => 1,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
