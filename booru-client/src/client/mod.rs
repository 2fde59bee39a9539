//! Generic search client over a [`ServerConfig`].
//!
//! One client type serves every supported imageboard. Everything that
//! differs between sites (endpoint, pagination key, response wrapping, post
//! page shape, tag reporting) lives in the [`ServerConfig`] the client was
//! built with, so adding a server means adding data, not code.
use booru_common::client;
use booru_common::post::{ImageRecord, Post, SearchResult};
use log::debug;
use rand::seq::SliceRandom;
use reqwest::Client;
use serde_json::Value;

use crate::auth::Credentials;
use crate::error::ClientError;
use crate::normalize::normalize;
use crate::query::{build_params, SearchSpec};
use crate::server_config::{ServerConfig, DEFAULT_SERVERS};

/// Main object to search posts from an imageboard.
///
/// Holds nothing but the immutable server descriptor, the resolved
/// credentials and the HTTP client; every call builds its own parameters and
/// result list, so concurrent calls share no state.
#[derive(Debug, Clone)]
pub struct BooruClient {
    client: Client,
    config: ServerConfig,
    credentials: Option<Credentials>,
}

impl BooruClient {
    /// Sets up a client for `config`.
    ///
    /// Credentials follow the all-or-nothing rule described in
    /// [`Credentials::resolve`]: a partial pair is treated as absent.
    #[must_use]
    pub fn new(config: ServerConfig, api_key: &str, user_id: &str) -> Self {
        let client = client!(config);
        let credentials = Credentials::resolve(api_key, user_id);

        Self {
            client,
            config,
            credentials,
        }
    }

    /// Client for ```https://e621.net```.
    #[must_use]
    pub fn e621(api_key: &str, user_id: &str) -> Self {
        Self::new(DEFAULT_SERVERS.get("e621").unwrap().clone(), api_key, user_id)
    }

    /// Client for ```https://hypnohub.net```.
    #[must_use]
    pub fn hypnohub(api_key: &str, user_id: &str) -> Self {
        Self::new(
            DEFAULT_SERVERS.get("hypnohub").unwrap().clone(),
            api_key,
            user_id,
        )
    }

    /// Returns the server descriptor this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the used client for external use.
    #[must_use]
    pub fn client(&self) -> Client {
        self.client.clone()
    }

    /// Searches posts matching `spec` and hands back either the full
    /// collection or, in gacha mode, one random post.
    ///
    /// The collection is shuffled unless `spec.random` is false, in which
    /// case the server's own ordering is kept. Every returned post that has
    /// an id also carries its human-viewable `post_url`.
    pub async fn search(&self, spec: &SearchSpec) -> Result<SearchResult, ClientError> {
        let params = build_params(spec, self.credentials.as_ref(), &self.config)?;
        let raw = self.dispatch(params).await?;
        self.process_search(spec, &raw)
    }

    /// Gets only the direct image URLs of the posts matching `spec`.
    ///
    /// `random` and `gacha` are ignored here; the reduced list is always
    /// shuffled once. Transport, parse and extraction failures all collapse
    /// into [`ClientError::FetchFailed`].
    pub async fn get_image(&self, spec: &SearchSpec) -> Result<Vec<ImageRecord>, ClientError> {
        let params = build_params(spec, self.credentials.as_ref(), &self.config)?;
        let raw = self.dispatch(params).await.map_err(|err| {
            debug!("Image fetch failed: {}", err);
            ClientError::FetchFailed
        })?;

        self.process_image_list(&raw)
    }

    /// Lower level mapping seam: parses a raw JSON body obtained through
    /// other means into the canonical post list.
    pub fn map_posts(&self, raw_json: &str) -> Result<Vec<Post>, ClientError> {
        let parsed: Value = serde_json::from_str(raw_json)?;
        let normalized = normalize(parsed, self.config.tag_style);

        let list = match &self.config.posts_key {
            Some(key) => match normalized {
                Value::Object(mut obj) => match obj.remove(key) {
                    Some(Value::Array(list)) => list,
                    _ => return Err(ClientError::InvalidServerResponse),
                },
                _ => return Err(ClientError::InvalidServerResponse),
            },
            None => match normalized {
                Value::Array(list) => list,
                _ => return Err(ClientError::InvalidServerResponse),
            },
        };

        let mut posts = Vec::with_capacity(list.len());
        for item in list {
            match item {
                Value::Object(obj) => posts.push(Post::from_object(self.config.server, obj)),
                _ => return Err(ClientError::InvalidServerResponse),
            }
        }

        debug!("List size: {}", posts.len());
        Ok(posts)
    }

    async fn dispatch(&self, params: Vec<(String, String)>) -> Result<String, ClientError> {
        debug!("Fetching posts from {}", self.config.post_list_url);
        let body = self
            .client
            .get(&self.config.post_list_url)
            .query(&params)
            .send()
            .await?
            .text()
            .await?;

        Ok(body)
    }

    fn process_search(
        &self,
        spec: &SearchSpec,
        raw_json: &str,
    ) -> Result<SearchResult, ClientError> {
        let posts = self.map_posts(raw_json)?;
        if posts.is_empty() {
            return Err(ClientError::EmptyResult);
        }

        self.select(spec, posts)
            .map_err(|err| ClientError::SelectionFailed {
                source: Box::new(err),
            })
    }

    fn select(&self, spec: &SearchSpec, posts: Vec<Post>) -> Result<SearchResult, ClientError> {
        let mut shuffled = self.annotate(posts.clone());
        shuffled.shuffle(&mut rand::thread_rng());

        if spec.gacha {
            let post = shuffled
                .choose(&mut rand::thread_rng())
                .ok_or(ClientError::EmptyResult)?;
            return Ok(SearchResult::Single(Box::new(post.clone())));
        }

        if spec.random {
            return Ok(SearchResult::Posts(shuffled));
        }

        // Caller wants the server's own ordering, annotated fresh.
        Ok(SearchResult::Posts(self.annotate(posts)))
    }

    /// Attaches the human-viewable post page to every post carrying an id.
    ///
    /// Posts without an id pass through untouched.
    fn annotate(&self, mut posts: Vec<Post>) -> Vec<Post> {
        for post in &mut posts {
            if let Some(id) = post.id {
                post.post_url = Some(self.config.post_page_url(id));
            }
        }

        posts
    }

    fn process_image_list(&self, raw_json: &str) -> Result<Vec<ImageRecord>, ClientError> {
        let posts = self.map_posts(raw_json).map_err(|err| {
            debug!("Image mapping failed: {}", err);
            ClientError::FetchFailed
        })?;

        if posts.is_empty() {
            return Err(ClientError::EmptyResult);
        }

        let mut images = Vec::with_capacity(posts.len());
        for post in &posts {
            let Some(url) = post
                .lookup(&self.config.file_url_path)
                .and_then(Value::as_str)
            else {
                debug!("Post {:?} is missing its image URL", post.id);
                return Err(ClientError::FetchFailed);
            };

            images.push(ImageRecord {
                id: post.id,
                file_url: url.to_string(),
            });
        }

        images.shuffle(&mut rand::thread_rng());
        Ok(images)
    }
}

#[cfg(test)]
mod test {
    use super::BooruClient;
    use crate::error::ClientError;
    use crate::query::SearchSpec;
    use booru_common::post::SearchResult;
    use serde_json::{json, Value};

    fn e621_body(ids: &[u64]) -> String {
        let posts: Vec<Value> = ids
            .iter()
            .map(|id| {
                json!({
                    "id": id,
                    "file": {
                        "ext": "png",
                        "md5": format!("{:032x}", id),
                        "url": format!("https://static1.e621.net/data/{}.png", id)
                    },
                    "tags": {
                        "general": ["wolf"],
                        "species": ["canine"],
                        "character": [],
                        "copyright": [],
                        "artist": [],
                        "lore": [],
                        "meta": []
                    },
                    "rating": "s"
                })
            })
            .collect();

        json!({ "posts": posts }).to_string()
    }

    fn hypnohub_body(ids: &[u64]) -> String {
        let posts: Vec<Value> = ids
            .iter()
            .map(|id| {
                json!({
                    "id": id,
                    "file_url": format!("https://hypnohub.net//images/{}.jpg", id),
                    "tags": "spiral_eyes wolf",
                    "rating": "q"
                })
            })
            .collect();

        Value::Array(posts).to_string()
    }

    fn ids_of(result: &SearchResult) -> Vec<u64> {
        match result {
            SearchResult::Posts(posts) => posts.iter().filter_map(|p| p.id).collect(),
            SearchResult::Single(post) => post.id.into_iter().collect(),
        }
    }

    #[test]
    fn map_posts_unwraps_the_posts_key() {
        let client = BooruClient::e621("", "");
        let posts = client.map_posts(&e621_body(&[1, 2, 3])).unwrap();

        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].id, Some(1));
        // The categorized tag map was flattened during normalization.
        let tags = posts[0].extra.get("tags").unwrap().as_array().unwrap();
        assert!(tags.iter().any(|t| t == "wolf"));
        assert!(tags.iter().any(|t| t == "canine"));
    }

    #[test]
    fn map_posts_reads_a_bare_array() {
        let client = BooruClient::hypnohub("", "");
        let posts = client.map_posts(&hypnohub_body(&[11, 12])).unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].id, Some(12));
    }

    #[test]
    fn wrong_response_shape_is_an_error() {
        let client = BooruClient::e621("", "");
        // e621 wraps its list; a bare array is not a valid response for it.
        let err = client.map_posts(&hypnohub_body(&[1])).unwrap_err();
        assert!(matches!(err, ClientError::InvalidServerResponse));
    }

    #[test]
    fn empty_post_list_is_an_error() {
        let client = BooruClient::e621("", "");
        let spec = SearchSpec::new("wolf");
        let err = client
            .process_search(&spec, &e621_body(&[]))
            .unwrap_err();
        assert!(matches!(err, ClientError::EmptyResult));

        let client = BooruClient::hypnohub("", "");
        let err = client.process_search(&spec, "[]").unwrap_err();
        assert!(matches!(err, ClientError::EmptyResult));
    }

    #[test]
    fn ordered_search_preserves_server_order() {
        let client = BooruClient::e621("", "");
        let spec = SearchSpec::new("wolf").with_limit(5).with_random(false);

        let result = client
            .process_search(&spec, &e621_body(&[1, 2, 3, 4, 5]))
            .unwrap();

        let SearchResult::Posts(posts) = result else {
            panic!("expected the full collection");
        };
        assert_eq!(posts.len(), 5);
        for (post, expected) in posts.iter().zip(1..=5u64) {
            assert_eq!(post.id, Some(expected));
            let url = post.post_url.as_deref().unwrap();
            assert!(url.ends_with(&format!("/posts/{}", expected)), "{}", url);
        }
    }

    #[test]
    fn shuffled_search_returns_the_whole_collection() {
        let client = BooruClient::hypnohub("", "");
        let spec = SearchSpec::new("wolf");

        let result = client
            .process_search(&spec, &hypnohub_body(&[11, 12, 13]))
            .unwrap();

        assert_eq!(result.len(), 3);
        let mut ids = ids_of(&result);
        ids.sort_unstable();
        assert_eq!(ids, vec![11, 12, 13]);
    }

    #[test]
    fn gacha_returns_a_single_annotated_post() {
        let client = BooruClient::hypnohub("", "");
        let spec = SearchSpec::new("wolf").with_gacha(true);

        let result = client
            .process_search(&spec, &hypnohub_body(&[11, 12, 13]))
            .unwrap();

        let SearchResult::Single(post) = result else {
            panic!("expected a single post");
        };
        assert!([11, 12, 13].contains(&post.id.unwrap()));
        let url = post.post_url.as_deref().unwrap();
        assert!(url.contains("page=post&s=view&id="), "{}", url);
    }

    #[test]
    fn posts_without_id_pass_through_unannotated() {
        let client = BooruClient::hypnohub("", "");
        let spec = SearchSpec::new("wolf").with_random(false);
        let body = r#"[{"id": 11, "file_url": "a"}, {"file_url": "b"}]"#;

        let result = client.process_search(&spec, body).unwrap();
        let posts = result.into_posts();

        assert_eq!(posts.len(), 2);
        assert!(posts[0].post_url.is_some());
        assert!(posts[1].post_url.is_none());
        assert_eq!(posts[1].id, None);
    }

    #[test]
    fn annotation_is_idempotent() {
        let client = BooruClient::e621("", "");
        let posts = client.map_posts(&e621_body(&[1, 2])).unwrap();

        let once = client.annotate(posts);
        let twice = client.annotate(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn get_image_reduces_posts_to_image_records() {
        let client = BooruClient::e621("", "");
        let images = client
            .process_image_list(&e621_body(&[1, 2, 3]))
            .unwrap();

        assert_eq!(images.len(), 3);
        for image in &images {
            assert!(image.file_url.starts_with("https://static1.e621.net/"));
            assert!(image.id.is_some());
        }
    }

    #[test]
    fn missing_image_url_collapses_to_fetch_failed() {
        let client = BooruClient::hypnohub("", "");
        let body = r#"[{"id": 11, "tags": "no_image_here"}]"#;

        let err = client.process_image_list(body).unwrap_err();
        assert!(matches!(err, ClientError::FetchFailed));
    }

    #[test]
    fn image_extraction_follows_nested_paths() {
        let client = BooruClient::e621("", "");
        let images = client.process_image_list(&e621_body(&[7])).unwrap();
        assert_eq!(
            images[0].file_url,
            "https://static1.e621.net/data/7.png"
        );
    }

    #[tokio::test]
    async fn search_rejects_invalid_specs_before_dispatch() {
        let client = BooruClient::e621("", "");

        let spec = SearchSpec::new("wolf").with_limit(101);
        let err = client.search(&spec).await.unwrap_err();
        assert!(matches!(err, ClientError::LimitExceeded { .. }));

        let spec = SearchSpec::new("cat").with_block("cat").with_limit(10);
        let err = client.search(&spec).await.unwrap_err();
        assert!(matches!(err, ClientError::ConflictingQuery { .. }));
    }

    #[tokio::test]
    async fn get_image_rejects_invalid_specs_before_dispatch() {
        let client = BooruClient::hypnohub("", "");

        let spec = SearchSpec::new("wolf").with_limit(101);
        let err = client.get_image(&spec).await.unwrap_err();
        assert!(matches!(err, ClientError::LimitExceeded { .. }));

        let spec = SearchSpec::new("fox").with_block("fox");
        let err = client.get_image(&spec).await.unwrap_err();
        assert!(matches!(err, ClientError::ConflictingQuery { .. }));
    }
}
