//! Search parameter validation and query assembly.
//!
//! Everything here runs before any request is dispatched: a spec that fails
//! validation never touches the network.
use log::debug;

use crate::auth::Credentials;
use crate::error::ClientError;
use crate::server_config::ServerConfig;

/// Per-call search parameters.
///
/// Constructed fresh for every call and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpec {
    /// The tag string to search for.
    pub query: String,
    /// A tag term to exclude from results. Empty means no exclusion.
    pub block: String,
    /// Number of posts to return, capped by the server's per-page maximum.
    pub limit: u16,
    /// 1-indexed page number.
    pub page: u16,
    /// Shuffle the whole collection before returning it. Defaults to true.
    pub random: bool,
    /// Return one random post instead of the collection. When set, the
    /// caller-supplied limit is ignored and the pool is maximized.
    pub gacha: bool,
}

impl SearchSpec {
    #[must_use]
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            block: String::new(),
            limit: 100,
            page: 1,
            random: true,
            gacha: false,
        }
    }

    #[must_use]
    pub fn with_block(mut self, block: &str) -> Self {
        self.block = block.to_string();
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u16) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: u16) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub fn with_random(mut self, random: bool) -> Self {
        self.random = random;
        self
    }

    #[must_use]
    pub fn with_gacha(mut self, gacha: bool) -> Self {
        self.gacha = gacha;
        self
    }
}

impl Default for SearchSpec {
    fn default() -> Self {
        Self::new("")
    }
}

/// Assembles the outgoing query parameters for `spec` against `config`.
///
/// The gacha override is applied before the limit check, so a gacha call
/// ignores whatever limit the caller supplied.
pub fn build_params(
    spec: &SearchSpec,
    creds: Option<&Credentials>,
    config: &ServerConfig,
) -> Result<Vec<(String, String)>, ClientError> {
    let limit = if spec.gacha {
        debug!("Gacha mode, maximizing pool to {} posts", config.max_post_limit);
        config.max_post_limit
    } else {
        spec.limit
    };

    if limit > config.max_post_limit {
        return Err(ClientError::LimitExceeded {
            requested: limit,
            max: config.max_post_limit,
        });
    }

    if spec.page == 0 {
        return Err(ClientError::ZeroPage);
    }

    if !spec.block.is_empty() && spec.query.contains(&spec.block) {
        return Err(ClientError::ConflictingQuery {
            block: spec.block.clone(),
        });
    }

    let tags = if spec.block.is_empty() {
        spec.query.clone()
    } else {
        format!("{} -{}*", spec.query, spec.block)
    };
    debug!("Tag list: {}", tags);

    let mut params = vec![
        (String::from("tags"), tags),
        (String::from("limit"), limit.to_string()),
        (config.page_param.key().to_string(), spec.page.to_string()),
    ];

    if config.json_flag {
        params.push((String::from("json"), String::from("1")));
    }

    if let Some(creds) = creds {
        params.push((config.auth_key_param.clone(), creds.api_key.clone()));
        params.push((config.auth_user_param.clone(), creds.user_id.clone()));
    }

    Ok(params)
}
