//! Sort-key capability.

/// Multi-level sort key. Keys compare lexicographically, so primary
/// differences dominate secondary ones, which dominate tertiary ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey(pub Vec<u32>);

/// Produces sort keys for strings.
///
/// ICU collation is provided by the host application. The crate ships
/// [`SimpleRulesCollator`](crate::SimpleRulesCollator) only.
pub trait Collator {
    /// Returns the sort key for `text`.
    fn sort_key(&self, text: &str) -> SortKey;

    /// Compares two strings by their sort keys.
    fn compare(&self, a: &str, b: &str) -> std::cmp::Ordering {
        self.sort_key(a).cmp(&self.sort_key(b))
    }
}
