//! Word-level diff between two versions of a text, used to show what an edit added.
//!
//! Alignment is a longest-common-subsequence over whitespace-separated words, computed
//! on index arrays after trimming the common prefix and suffix. Only insertions are
//! marked in the highlighted output; deleted words are dropped and unchanged words
//! pass through with the modified text's own spacing.
//!
//! The LCS table is bounded by `MAX_ALIGN_CELLS`. A changed middle too large for it
//! is reported as one block of deletions followed by one block of insertions.

use serde::{Deserialize, Serialize};

pub mod handlers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffOp {
    Equal,
    Insert,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffToken {
    pub op: DiffOp,
    pub word: String,
}

/// Markers wrapped around inserted words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightStyle {
    pub prefix: String,
    pub suffix: String,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            prefix: "**".to_string(),
            suffix: "**".to_string(),
        }
    }
}

/// Upper bound on LCS table cells (4 bytes each) for one alignment.
pub const MAX_ALIGN_CELLS: usize = 1 << 22;

/// One step of an alignment, by token index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Equal(usize, usize),
    Delete(usize),
    Insert(usize),
}

/// Byte ranges of whitespace-separated words.
fn word_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                spans.push((s, i));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, text.len()));
    }
    spans
}

/// LCS alignment of `a` against `b`. Deterministic: on ties a deletion is emitted
/// before an insertion.
fn align(a: &[&str], b: &[&str]) -> Vec<Step> {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();

    let a_mid = &a[prefix..a.len() - suffix];
    let b_mid = &b[prefix..b.len() - suffix];
    let (n, m) = (a_mid.len(), b_mid.len());

    let mut steps = Vec::with_capacity(a.len() + b.len());
    steps.extend((0..prefix).map(|k| Step::Equal(k, k)));

    let cells = (n + 1).checked_mul(m + 1).unwrap_or(usize::MAX);
    if cells > MAX_ALIGN_CELLS {
        steps.extend((0..n).map(|k| Step::Delete(prefix + k)));
        steps.extend((0..m).map(|k| Step::Insert(prefix + k)));
    } else {
        lcs_steps(a_mid, b_mid, prefix, &mut steps);
    }

    let a_tail = a.len() - suffix;
    let b_tail = b.len() - suffix;
    steps.extend((0..suffix).map(|k| Step::Equal(a_tail + k, b_tail + k)));
    steps
}

/// Appends the LCS alignment of `a_mid` against `b_mid`, offsetting indices by `offset`.
fn lcs_steps(a_mid: &[&str], b_mid: &[&str], offset: usize, steps: &mut Vec<Step>) {
    let (n, m) = (a_mid.len(), b_mid.len());

    // table[i * (m + 1) + j] = LCS length of a_mid[i..] and b_mid[j..]
    let width = m + 1;
    let mut table = vec![0_u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i * width + j] = if a_mid[i] == b_mid[j] {
                table[(i + 1) * width + j + 1] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a_mid[i] == b_mid[j] {
            steps.push(Step::Equal(offset + i, offset + j));
            i += 1;
            j += 1;
        } else if table[(i + 1) * width + j] >= table[i * width + j + 1] {
            steps.push(Step::Delete(offset + i));
            i += 1;
        } else {
            steps.push(Step::Insert(offset + j));
            j += 1;
        }
    }
    steps.extend((i..n).map(|k| Step::Delete(offset + k)));
    steps.extend((j..m).map(|k| Step::Insert(offset + k)));
}

/// Full word diff, including deletions, in alignment order.
pub fn diff_words(original: &str, modified: &str) -> Vec<DiffToken> {
    let a: Vec<&str> = original.split_whitespace().collect();
    let b: Vec<&str> = modified.split_whitespace().collect();

    align(&a, &b)
        .into_iter()
        .map(|step| match step {
            Step::Equal(_, j) => DiffToken {
                op: DiffOp::Equal,
                word: b[j].to_string(),
            },
            Step::Delete(i) => DiffToken {
                op: DiffOp::Delete,
                word: a[i].to_string(),
            },
            Step::Insert(j) => DiffToken {
                op: DiffOp::Insert,
                word: b[j].to_string(),
            },
        })
        .collect()
}

/// `modified` with every inserted word wrapped in `**`.
pub fn highlight(original: &str, modified: &str) -> String {
    highlight_with(original, modified, &HighlightStyle::default())
}

pub fn highlight_with(original: &str, modified: &str, style: &HighlightStyle) -> String {
    let a: Vec<&str> = original.split_whitespace().collect();
    let spans = word_spans(modified);
    let b: Vec<&str> = spans.iter().map(|&(s, e)| &modified[s..e]).collect();

    let mut inserted = vec![false; b.len()];
    for step in align(&a, &b) {
        if let Step::Insert(j) = step {
            inserted[j] = true;
        }
    }

    let mut out = String::with_capacity(modified.len() + 8 * inserted.iter().filter(|x| **x).count());
    let mut cursor = 0;
    for (k, &(start, end)) in spans.iter().enumerate() {
        out.push_str(&modified[cursor..start]);
        if inserted[k] {
            out.push_str(&style.prefix);
            out.push_str(&modified[start..end]);
            out.push_str(&style.suffix);
        } else {
            out.push_str(&modified[start..end]);
        }
        cursor = end;
    }
    out.push_str(&modified[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identical_text_is_returned_unchanged() {
        let text = "Senior engineer\n\n  built  Rust services.\t";
        assert_eq!(highlight(text, text), text);
    }

    #[test]
    fn test_inserted_words_are_marked() {
        assert_eq!(
            highlight("built services", "built scalable Rust services"),
            "built **scalable** **Rust** services"
        );
    }

    #[test]
    fn test_deleted_words_are_dropped() {
        assert_eq!(
            highlight("built many legacy services", "built services"),
            "built services"
        );
    }

    #[test]
    fn test_replaced_word_shows_only_the_new_one() {
        assert_eq!(
            highlight("led a small team", "led a large team"),
            "led a **large** team"
        );
    }

    #[test]
    fn test_reordered_word_counts_as_insertion() {
        // Ties delete before inserting, so the earlier original word is the one dropped.
        assert_eq!(highlight("python rust", "rust python"), "rust **python**");
    }

    #[test]
    fn test_empty_original_marks_everything() {
        assert_eq!(highlight("", "new text"), "**new** **text**");
        assert_eq!(highlight("old text", ""), "");
    }

    #[test]
    fn test_custom_style() {
        let style = HighlightStyle {
            prefix: "<ins>".to_string(),
            suffix: "</ins>".to_string(),
        };
        assert_eq!(
            highlight_with("a c", "a b c", &style),
            "a <ins>b</ins> c"
        );
    }

    #[test]
    fn test_diff_words_reports_all_operations() {
        let tokens = diff_words("led a small team", "led a large team");
        let ops: Vec<(DiffOp, &str)> = tokens.iter().map(|t| (t.op, t.word.as_str())).collect();
        assert_eq!(
            ops,
            vec![
                (DiffOp::Equal, "led"),
                (DiffOp::Equal, "a"),
                (DiffOp::Delete, "small"),
                (DiffOp::Insert, "large"),
                (DiffOp::Equal, "team"),
            ]
        );
    }

    #[test]
    fn test_word_spans_handle_unicode_whitespace() {
        let text = "naïve\u{00A0}café  ok";
        let words: Vec<&str> = word_spans(text).iter().map(|&(s, e)| &text[s..e]).collect();
        assert_eq!(words, vec!["naïve", "café", "ok"]);
    }

    #[test]
    fn test_large_unrelated_texts_stay_within_table_bound() {
        let original = "a ".repeat(99_999);
        let modified = "b ".repeat(99_999);

        let out = highlight(&original, &modified);
        assert_eq!(out.matches("**b**").count(), 99_999);

        let tokens = diff_words(&original, &modified);
        assert_eq!(tokens.len(), 2 * 99_999);
        assert!(tokens[..99_999].iter().all(|t| t.op == DiffOp::Delete));
        assert!(tokens[99_999..].iter().all(|t| t.op == DiffOp::Insert));
    }

    #[test]
    fn test_large_texts_keep_shared_prefix_and_suffix() {
        let original = format!("intro {}outro", "a ".repeat(5_000));
        let modified = format!("intro {}outro", "b ".repeat(5_000));

        let tokens = diff_words(&original, &modified);
        assert_eq!(tokens.first().map(|t| (t.op, t.word.as_str())), Some((DiffOp::Equal, "intro")));
        assert_eq!(tokens.last().map(|t| (t.op, t.word.as_str())), Some((DiffOp::Equal, "outro")));

        let out = highlight(&original, &modified);
        assert!(out.starts_with("intro **b**"));
        assert!(out.ends_with("**b** outro"));
    }

    proptest! {
        #[test]
        fn prop_highlight_is_identity_on_equal_input(text in "[a-c \n]{0,40}") {
            prop_assert_eq!(highlight(&text, &text), text);
        }

        #[test]
        fn prop_unmarked_output_equals_modified(a in "[a-c ]{0,30}", b in "[a-c ]{0,30}") {
            let style = HighlightStyle { prefix: String::new(), suffix: String::new() };
            prop_assert_eq!(highlight_with(&a, &b, &style), b);
        }

        #[test]
        fn prop_equal_and_delete_rebuild_original(a in "[a-c ]{0,30}", b in "[a-c ]{0,30}") {
            let kept: Vec<String> = diff_words(&a, &b)
                .into_iter()
                .filter(|t| t.op != DiffOp::Insert)
                .map(|t| t.word)
                .collect();
            let original: Vec<&str> = a.split_whitespace().collect();
            prop_assert_eq!(kept, original);
        }
    }
}
