use serde::{Deserialize, Serialize};
use std::fmt::Display;

// Public Exports
pub use log;
pub use reqwest;
pub use serde;
pub use serde_json;
pub use tokio;

pub mod macros;
pub mod post;

/// All currently supported imageboards and their underlying attributes
#[derive(Debug, Copy, Clone, Ord, PartialOrd, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageBoards {
    /// Represents the website ```https://e621.net```.
    E621,
    /// Represents the website ```https://hypnohub.net```.
    Hypnohub,
}

impl Display for ImageBoards {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::E621 => write!(f, "e621"),
            Self::Hypnohub => write!(f, "hypnohub"),
        }
    }
}
