//! Merging per-source result lists

use crate::types::{MergedResultSet, NormalizedResult};

/// Concatenates source lists in order, each capped, without interleaving
#[derive(Debug, Clone, Copy)]
pub struct MergeDeduplicator {
    per_source_cap: usize,
}

impl MergeDeduplicator {
    pub fn new(per_source_cap: usize) -> Self {
        Self { per_source_cap }
    }

    pub fn per_source_cap(&self) -> usize {
        self.per_source_cap
    }

    /// `a` (capped) followed by `b` (capped)
    pub fn merge(&self, a: Vec<NormalizedResult>, b: Vec<NormalizedResult>) -> MergedResultSet {
        self.merge_all([a, b])
    }

    /// Every list capped and concatenated in the given order.
    ///
    /// Results reported by more than one source are kept once per source.
    pub fn merge_all<I>(&self, lists: I) -> MergedResultSet
    where
        I: IntoIterator<Item = Vec<NormalizedResult>>,
    {
        let merged = lists
            .into_iter()
            .flat_map(|list| list.into_iter().take(self.per_source_cap))
            .collect();
        MergedResultSet::from_vec(merged)
    }
}

impl Default for MergeDeduplicator {
    fn default() -> Self {
        Self::new(5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(source: &str, n: usize) -> Vec<NormalizedResult> {
        (0..n)
            .map(|i| NormalizedResult {
                title: format!("{source} result {i}"),
                url: format!("https://{}.example/{i}", source.to_lowercase()),
                summary: String::new(),
                source: source.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_merge_length_is_sum_of_capped_lengths() {
        let merger = MergeDeduplicator::default();
        for a in [0, 1, 5, 8] {
            for b in [0, 3, 5, 12] {
                let merged = merger.merge(results("Baidu", a), results("Bilibili", b));
                assert_eq!(merged.len(), a.min(5) + b.min(5), "a={a} b={b}");
            }
        }
    }

    #[test]
    fn test_merge_is_order_stable() {
        let merger = MergeDeduplicator::default();
        let a = results("Baidu", 7);
        let b = results("Bilibili", 2);
        let merged = merger.merge(a.clone(), b.clone());

        let expected: Vec<_> = a.into_iter().take(5).chain(b).collect();
        assert_eq!(merged.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_cross_source_duplicates_kept() {
        let merger = MergeDeduplicator::default();
        let shared = results("Baidu", 1);
        let merged = merger.merge(shared.clone(), shared);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_custom_cap() {
        let merger = MergeDeduplicator::new(2);
        let merged = merger.merge_all([results("Baidu", 4), results("Bilibili", 4), results("Other", 1)]);
        assert_eq!(merged.len(), 5);
        assert_eq!(merged.as_slice()[2].source, "Bilibili");
    }
}
