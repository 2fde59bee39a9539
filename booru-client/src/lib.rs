//! All internal logic for searching posts on imageboard websites.
//!
//! # Booru client
//!
//! Every supported imageboard is served by the same [`BooruClient`](client::BooruClient);
//! the differences between sites (endpoint, pagination key, response
//! wrapping, post page shape, tag reporting) are data on the
//! [`ServerConfig`](server_config::ServerConfig) the client is built with.
//!
//! ## General example
//! ```rust
//! use booru_client::prelude::*;
//!
//! async fn example() {
//!     let client = BooruClient::e621("", ""); // Anonymous client, no credentials
//!
//!     let spec = SearchSpec::new("wolf") // The tags to search
//!         .with_block("feral") // Exclude a term from the results
//!         .with_limit(5); // Max number of posts to return
//!
//!     let posts = client.search(&spec).await.unwrap();
//!
//!     println!("{:#?}", posts.into_posts());
//! }
//! ```
extern crate booru_common;

pub mod auth;
pub mod client;
pub mod error;
pub mod normalize;
pub mod prelude;
pub mod query;
pub mod server_config;
