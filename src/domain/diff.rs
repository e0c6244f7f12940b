//! Word-level diff between two revisions of a draft.
//! No I/O - all functions are data in, data out.
//!
//! This is a greedy two-cursor walk with a bounded lookahead, not an
//! LCS/Myers diff. The 5-token window keeps it effectively O(n) on prose
//! edits and avoids single-word zig-zagging around small insertions, at
//! the cost of reporting block moves larger than the window as a plain
//! remove+add. That tradeoff is load-bearing: the rendered output and the
//! golden tests below depend on it.

use super::types::{DiffSegment, DiffSummary, SegmentKind};

/// How many tokens ahead to search for a realignment point.
const LOOKAHEAD: usize = 5;

/// Compute the word-level diff from `old_text` to `new_text`.
///
/// Tokens alternate between whitespace and non-whitespace runs, and the
/// whitespace is kept, so concatenating the removed+unchanged segments
/// yields `old_text` exactly and added+unchanged yields `new_text`.
/// Adjacent segments never share a kind.
pub fn compute_diff(old_text: &str, new_text: &str) -> Vec<DiffSegment> {
    let old_tokens = tokenize(old_text);
    let new_tokens = tokenize(new_text);

    let mut segments: Vec<DiffSegment> = Vec::new();
    let mut old_idx = 0;
    let mut new_idx = 0;

    while old_idx < old_tokens.len() || new_idx < new_tokens.len() {
        // One side exhausted: the rest of the other is wholly added/removed.
        if old_idx >= old_tokens.len() {
            push(&mut segments, SegmentKind::Added, &new_tokens[new_idx..].concat());
            break;
        }
        if new_idx >= new_tokens.len() {
            push(&mut segments, SegmentKind::Removed, &old_tokens[old_idx..].concat());
            break;
        }

        if old_tokens[old_idx] == new_tokens[new_idx] {
            push(&mut segments, SegmentKind::Unchanged, old_tokens[old_idx]);
            old_idx += 1;
            new_idx += 1;
            continue;
        }

        // The current new token reappears shortly in the old stream: the
        // skipped old tokens were deleted.
        if let Some(k) = find_ahead(&old_tokens, old_idx, new_tokens[new_idx]) {
            push(&mut segments, SegmentKind::Removed, &old_tokens[old_idx..old_idx + k].concat());
            old_idx += k;
            continue;
        }

        // The current old token reappears shortly in the new stream: the
        // skipped new tokens were inserted.
        if let Some(k) = find_ahead(&new_tokens, new_idx, old_tokens[old_idx]) {
            push(&mut segments, SegmentKind::Added, &new_tokens[new_idx..new_idx + k].concat());
            new_idx += k;
            continue;
        }

        // No realignment within the window: direct substitution.
        push(&mut segments, SegmentKind::Removed, old_tokens[old_idx]);
        push(&mut segments, SegmentKind::Added, new_tokens[new_idx]);
        old_idx += 1;
        new_idx += 1;
    }

    segments
}

/// Reduce a diff to word counts per segment kind.
pub fn summarize(segments: &[DiffSegment]) -> DiffSummary {
    segments.iter().fold(DiffSummary::default(), |mut acc, seg| {
        let words = seg.word_count();
        match seg.kind {
            SegmentKind::Added => acc.words_added += words,
            SegmentKind::Removed => acc.words_removed += words,
            SegmentKind::Unchanged => acc.words_unchanged += words,
        }
        acc
    })
}

/// Split text into alternating runs of non-whitespace and whitespace.
/// Every byte of the input lands in exactly one token.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_whitespace = None;

    for (i, c) in text.char_indices() {
        let ws = c.is_whitespace();
        match in_whitespace {
            Some(prev) if prev != ws => {
                tokens.push(&text[start..i]);
                start = i;
                in_whitespace = Some(ws);
            }
            None => in_whitespace = Some(ws),
            _ => {}
        }
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Search the next `LOOKAHEAD` tokens after `from` for `needle`.
/// Returns the relative offset k > 0 of the first match.
fn find_ahead(tokens: &[&str], from: usize, needle: &str) -> Option<usize> {
    (1..=LOOKAHEAD).find(|&k| tokens.get(from + k).copied() == Some(needle))
}

/// Append text under `kind`, merging into the previous segment when the
/// kind matches so adjacent segments never share a kind.
fn push(segments: &mut Vec<DiffSegment>, kind: SegmentKind, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = segments.last_mut() {
        if last.kind == kind {
            last.text.push_str(text);
            return;
        }
    }
    segments.push(DiffSegment::new(kind, text));
}
