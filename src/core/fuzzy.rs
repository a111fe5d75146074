//! Fuzzy matching for filtering change paths.

use nucleo_matcher::{
    pattern::{AtomKind, CaseMatching, Normalization, Pattern},
    Config, Matcher, Utf32Str,
};

use crate::core::Change;

/// Fuzzy matcher wrapping nucleo-matcher.
///
/// Reuses internal buffers across calls for efficiency.
pub struct FuzzyMatcher {
    matcher: Matcher,
    buf: Vec<char>,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyMatcher {
    /// Create a matcher configured for path matching.
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
            buf: Vec::with_capacity(256),
        }
    }

    /// Filter and sort candidates by match score.
    ///
    /// Returns indices of matching candidates, sorted by score (highest first).
    pub fn filter_sorted<I, S>(&mut self, pattern: &str, candidates: I) -> Vec<usize>
    where
        I: Iterator<Item = (usize, S)>,
        S: AsRef<str>,
    {
        if pattern.is_empty() {
            return Vec::new();
        }

        let pat = Pattern::new(
            pattern,
            CaseMatching::Smart,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );

        let mut results: Vec<(usize, u32)> = candidates
            .filter_map(|(idx, s)| {
                self.buf.clear();
                let haystack = Utf32Str::new(s.as_ref(), &mut self.buf);
                pat.score(haystack, &mut self.matcher).map(|sc| (idx, sc))
            })
            .collect();

        // Sort by score descending
        results.sort_by(|a, b| b.1.cmp(&a.1));

        results.into_iter().map(|(i, _)| i).collect()
    }

    /// Indices of changes whose path matches `pattern`, best match first.
    pub fn filter_changes(&mut self, pattern: &str, changes: &[Change]) -> Vec<usize> {
        self.filter_sorted(pattern, changes.iter().enumerate().map(|(i, c)| (i, c.path())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> Vec<Change> {
        ["src/api/compare.ts", "README.md", "src/components/CompareCommits.tsx"]
            .iter()
            .map(|p| Change::Added {
                path: p.to_string(),
            })
            .collect()
    }

    #[test]
    fn empty_pattern_returns_empty() {
        let mut m = FuzzyMatcher::new();
        let results = m.filter_changes("", &paths());
        assert!(results.is_empty());
    }

    #[test]
    fn filters_by_path() {
        let mut m = FuzzyMatcher::new();
        let results = m.filter_changes("readme", &paths());
        assert_eq!(results, vec![1]);
    }

    #[test]
    fn no_match_is_empty() {
        let mut m = FuzzyMatcher::new();
        assert!(m.filter_changes("zzz", &paths()).is_empty());
    }

    #[test]
    fn fuzzy_subsequence_matches() {
        let mut m = FuzzyMatcher::new();
        let results = m.filter_changes("cmpcmt", &paths());
        assert_eq!(results, vec![2]);
    }

    #[test]
    fn tighter_match_ranks_first() {
        let mut m = FuzzyMatcher::new();
        let candidates = ["something_app.rs", "app.rs", "zapp.rs"];
        let results = m.filter_sorted("app", candidates.iter().enumerate().map(|(i, s)| (i, *s)));
        assert!(!results.is_empty());
        assert_eq!(results[0], 1);
    }
}
