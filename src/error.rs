use smallvec::CollectionAllocErr;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Reasons an insert can be rejected.
///
/// Whenever one of these is returned the tree is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A prefix buffer or child map could not be reserved.
    ///
    /// Only those `SmallVec` reservations are fallible. Node boxes, and the
    /// joined prefix built when removal merges a node into its child, use the
    /// global allocator directly, which aborts the process when it runs out.
    #[error("out of memory while allocating a trie node")]
    OutOfMemory,

    /// The insert would grow the tree past its configured node budget.
    #[error("node budget of {limit} exhausted")]
    NodeLimit { limit: usize },

    /// The key is longer than the configured maximum.
    #[error("key of {len} bytes exceeds the maximum of {max}")]
    KeyTooLong { len: usize, max: usize },
}

impl From<CollectionAllocErr> for Error {
    fn from(_: CollectionAllocErr) -> Self {
        Error::OutOfMemory
    }
}
