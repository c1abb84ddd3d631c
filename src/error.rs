//! Error types for the object-graph library.
//!
//! Errors fall into four groups: type errors (wrong object kind, values that
//! cannot be marshalled), range/lookup errors (missing keys, bad indices),
//! consistency errors (foreign pages, malformed content records) and resource
//! errors (recursion limits, undecodable streams). Recoverable content-stream
//! problems are not errors; they travel in `GroupedContent::warning`.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while working with a PDF object graph.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    /// Object has wrong type
    #[error("Invalid object type: expected {expected}, found {found}")]
    InvalidObjectType {
        /// Expected object type
        expected: String,
        /// Actual object type found
        found: String,
    },

    /// Name objects must be non-empty and start with '/'
    #[error("Invalid name {0:?}: names must begin with '/' and be non-empty")]
    InvalidName(String),

    /// NaN and infinities have no PDF representation
    #[error("Cannot represent non-finite number {0} in PDF")]
    NonFiniteNumber(f64),

    /// Dictionary keys cannot be null
    #[error("Dictionary keys cannot be null")]
    NullKey,

    /// A value offered to the page list is not a page
    #[error("Only pages can be inserted into a page list: {0}")]
    NotAPage(String),

    /// Missing dictionary key during path resolution
    #[error("key /{key} not found; traversed path {traversed} (requested {requested})")]
    KeyNotFound {
        /// The key that was missing
        key: String,
        /// The full path that was requested
        requested: String,
        /// The prefix of the path that resolved successfully
        traversed: String,
    },

    /// Array index out of range during path resolution or array access
    #[error(
        "index {index} out of range for array of length {len}; traversed path {traversed} (requested {requested})"
    )]
    IndexOutOfRange {
        /// Requested index (may be negative)
        index: isize,
        /// Array length
        len: usize,
        /// The full path that was requested
        requested: String,
        /// The prefix of the path that resolved successfully
        traversed: String,
    },

    /// Page index out of range
    #[error("Page index {index} out of range (document has {len} pages)")]
    PageIndexOutOfRange {
        /// Requested index (may be negative)
        index: isize,
        /// Number of pages
        len: usize,
    },

    /// 1-based page access with a zero page number
    #[error("page access out of range in 1-based indexing (page numbers start at 1)")]
    ZeroPageNumber,

    /// Extended slice assignment with a sequence of the wrong length
    #[error("attempt to assign sequence of length {found} to extended slice of size {expected}")]
    SliceArity {
        /// Length of the extended slice
        expected: usize,
        /// Number of pages supplied
        found: usize,
    },

    /// Slice step of zero
    #[error("slice step cannot be zero")]
    ZeroSliceStep,

    /// Referenced object not found in the document arena
    #[error("Object not found: {0} {1} R")]
    ObjectNotFound(u32, u16),

    /// Page is not part of this document's page list
    #[error("Page {0} is not in this document's page list")]
    PageNotInDocument(String),

    /// Object is owned by another document
    #[error("Object belongs to a different document: {0}")]
    ForeignObject(String),

    /// The page tree already lists this page object
    #[error("Page {0} already appears in the page list")]
    DuplicatePage(String),

    /// The stream dictionary's /Length is derived from the payload
    #[error("/Length of a stream is derived from its data and cannot be set")]
    ReadOnlyLength,

    /// A content-stream record that cannot be serialized
    #[error("At content stream instruction {index}: {reason}")]
    Unparse {
        /// Ordinal position of the offending record
        index: usize,
        /// What is wrong with it
        reason: String,
    },

    /// Parse error at specific byte offset
    #[error("Failed to parse content at byte {offset}: {reason}")]
    ParseError {
        /// Byte offset where error occurred
        offset: usize,
        /// Reason for parse failure
        reason: String,
    },

    /// Path expression text is malformed
    #[error("Invalid object path {path:?}: {reason}")]
    InvalidPath {
        /// Path text
        path: String,
        /// Reason
        reason: String,
    },

    /// Stream decoding error
    #[error("Stream decoding error: {0}")]
    Decode(String),

    /// Unsupported stream filter
    #[error("Unsupported filter: {0}")]
    UnsupportedFilter(String),

    /// Recursion depth limit exceeded
    #[error("Recursion depth limit exceeded (max: {0})")]
    RecursionLimitExceeded(u32),

    /// JSON bridge error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for [`Error::InvalidObjectType`].
    pub(crate) fn type_error(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Error::InvalidObjectType {
            expected: expected.into(),
            found: found.into(),
        }
    }
}
