//! Word-frequency counting over a token stream.
//!
//! Ordering contract: descending by count, ties broken by first occurrence
//! in the stream. The tie-break matters for determinism — re-running over
//! the same stream must yield an identical table.

use kwic_types::FreqEntry;
use rustc_hash::FxHashMap;

/// Aggregates a token stream into an ordered frequency table.
///
/// Empty input yields an empty table.
///
/// # Examples
///
/// ```
/// use kwic_core::frequency::count;
///
/// let table = count(&["the", "cat", "the"]);
/// assert_eq!(table[0].word, "the");
/// assert_eq!(table[0].count, 2);
/// ```
pub fn count<S: AsRef<str>>(tokens: &[S]) -> Vec<FreqEntry> {
    // Slot index per distinct word; the table itself stays in
    // first-occurrence order until the final sort.
    let mut slots: FxHashMap<&str, usize> = FxHashMap::default();
    let mut table: Vec<FreqEntry> = Vec::new();

    for token in tokens {
        let text = token.as_ref();
        match slots.get(text) {
            Some(&slot) => table[slot].count += 1,
            None => {
                slots.insert(text, table.len());
                table.push(FreqEntry::new(text, 1));
            }
        }
    }

    // Stable sort: equal counts keep first-occurrence order.
    table.sort_by(|a, b| b.count.cmp(&a.count));
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stream_empty_table() {
        let tokens: Vec<String> = Vec::new();
        assert!(count(&tokens).is_empty());
    }

    #[test]
    fn counts_occurrences() {
        let table = count(&["the", "cat", "sat", "on", "the", "mat"]);
        assert_eq!(table[0], FreqEntry::new("the", 2));
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn descending_by_count() {
        let table = count(&["a", "b", "b", "c", "c", "c"]);
        let counts: Vec<u32> = table.iter().map(|e| e.count).collect();
        assert_eq!(counts, vec![3, 2, 1]);
    }

    #[test]
    fn ties_keep_first_occurrence_order() {
        let table = count(&["zebra", "apple", "mango"]);
        let words: Vec<&str> = table.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn ties_mixed_with_higher_counts() {
        let table = count(&["x", "b", "a", "x"]);
        let words: Vec<&str> = table.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["x", "b", "a"]);
    }

    #[test]
    fn rerun_is_identical() {
        let tokens = ["one", "two", "two", "three", "one", "four"];
        assert_eq!(count(&tokens), count(&tokens));
    }

    #[test]
    fn keys_are_unique() {
        let table = count(&["dup", "dup", "dup"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].count, 3);
    }

    #[test]
    fn works_over_owned_strings() {
        let tokens: Vec<String> = vec!["a".into(), "a".into(), "b".into()];
        let table = count(&tokens);
        assert_eq!(table[0], FreqEntry::new("a", 2));
    }
}
