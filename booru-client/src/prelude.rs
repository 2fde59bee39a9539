pub use crate::auth::Credentials;
pub use crate::client::BooruClient;
pub use crate::error::ClientError;
pub use crate::query::SearchSpec;
pub use crate::server_config::{PageParam, PostPage, ServerConfig, TagStyle, DEFAULT_SERVERS};

pub use booru_common::post::{ImageRecord, Post, SearchResult};
pub use booru_common::ImageBoards;
