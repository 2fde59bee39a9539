use thiserror::Error;

/// Enumerates the possible errors that can arise while querying an
/// imageboard.
///
/// Validation failures are reported before any request is dispatched, so a
/// caller that receives [`LimitExceeded`](ClientError::LimitExceeded),
/// [`ZeroPage`](ClientError::ZeroPage) or
/// [`ConflictingQuery`](ClientError::ConflictingQuery) can correct its input
/// and retry without having touched the network.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The requested post limit is above what the imageboard accepts per page.
    #[error("Post limit cannot exceed {max}, got {requested}")]
    LimitExceeded { requested: u16, max: u16 },

    /// An attempt was made to fetch posts from page zero, which is invalid for most imageboard APIs.
    #[error("Page number cannot be zero.")]
    ZeroPage,

    /// The blocked tag is a substring of the search query itself. Blocking a
    /// term that is also being searched for is self-contradictory.
    #[error("Blocked tag \"{block}\" is already part of the search query")]
    ConflictingQuery { block: String },

    /// The imageboard API returned no posts for the given search tags or query.
    #[error("No posts found for tag selection")]
    EmptyResult,

    /// Post-processing of a `search` result (annotation, shuffling or
    /// selection) failed. The underlying cause is preserved.
    #[error("Failed to select posts from the search result")]
    SelectionFailed {
        #[source]
        source: Box<ClientError>,
    },

    /// Any failure in the request, parse or extraction path of `get_image`.
    /// The underlying cause is discarded.
    #[error("Failed to get image list")]
    FetchFailed,

    /// An error occurred during a network request (e.g., connection timeout, DNS resolution failure).
    /// Wraps an underlying `reqwest::Error`.
    #[error("Connection Error")]
    ConnectionError(#[from] reqwest::Error),

    /// An error occurred while deserializing a JSON response from the imageboard API.
    /// Wraps an underlying `serde_json::Error`.
    #[error("Error while deserializing JSON")]
    JsonDeserializeFail(#[from] serde_json::Error),

    /// The imageboard server returned a response that could not be understood or was not in the expected format.
    #[error("Imageboard returned an invalid response")]
    InvalidServerResponse,
}
