/// Limits applied by a [`RadixTree`](crate::RadixTree).
///
/// The default configuration imposes no limits; inserts then only fail when
/// the allocator itself refuses a reservation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of live nodes. Inserts that would need more fail with
    /// [`Error::NodeLimit`](crate::Error::NodeLimit).
    pub max_nodes: Option<usize>,
    /// Maximum key length in bytes accepted by insert.
    pub max_key_len: Option<usize>,
}

impl Config {
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    pub fn with_max_key_len(mut self, max_key_len: usize) -> Self {
        self.max_key_len = Some(max_key_len);
        self
    }
}
