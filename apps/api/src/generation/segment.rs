//! Turns generated prose into bullet rows.
//!
//! Structured bullets from the endpoint win. Otherwise the text is split by
//! the first rule that yields anything: bullet or number markers, blank-line
//! paragraphs, single lines, then sentence pairs for long prose. When nothing
//! segments, the whole text becomes one truncated row.

use std::sync::LazyLock;

use regex::Regex;

use crate::generation::client::Generated;

pub const MAX_RESPONSIBILITY_BULLETS: usize = 5;
pub const MAX_HIGHLIGHT_BULLETS: usize = 4;
pub const MAX_INTERVIEW_QUESTIONS: usize = 15;

/// Rows longer than this are truncated when used as a fallback.
pub const BULLET_CHAR_LIMIT: usize = 150;
/// Enhanced rows longer than this are shortened to whole sentences.
pub const ENHANCE_SHORTEN_THRESHOLD: usize = 180;
/// Unsegmented prose longer than this is split into sentence pairs.
const SENTENCE_SPLIT_THRESHOLD: usize = 200;

static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:•\s*|[*\-–]\s+|\d{1,2}[.)]\s+)").expect("valid marker regex"));
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid paragraph regex"));

/// Bullet rows for a generation result, at most `max` of them.
pub fn bullets_from(generated: &Generated, max: usize) -> Vec<String> {
    if !generated.bullets.is_empty() {
        let cleaned: Vec<String> = generated
            .bullets
            .iter()
            .map(|b| strip_marker(b))
            .filter(|b| !b.is_empty())
            .take(max)
            .collect();
        if !cleaned.is_empty() {
            return cleaned;
        }
    }
    segment(&generated.text, max)
}

/// Splits free text into at most `max` non-blank rows.
pub fn segment(text: &str, max: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() || max == 0 {
        return Vec::new();
    }

    let rows = by_markers(text)
        .or_else(|| by_paragraphs(text))
        .or_else(|| by_lines(text))
        .or_else(|| by_sentence_pairs(text))
        .unwrap_or_else(|| vec![truncate(text, BULLET_CHAR_LIMIT)]);

    rows.into_iter().take(max).collect()
}

fn non_empty(rows: Vec<String>) -> Option<Vec<String>> {
    let rows: Vec<String> = rows.into_iter().filter(|r| !r.is_empty()).collect();
    (!rows.is_empty()).then_some(rows)
}

fn by_markers(text: &str) -> Option<Vec<String>> {
    if !text.contains('•') && !text.lines().any(|l| MARKER.is_match(l.trim())) {
        return None;
    }

    let mut rows: Vec<String> = Vec::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let normalized = MARKER.replace(line, "• ");
        let mut segments = normalized.split('•');

        // Text before the first marker continues the previous row; before
        // any row it is a preamble and is dropped.
        let head = segments.next().map(str::trim).unwrap_or_default();
        if !head.is_empty() {
            if let Some(last) = rows.last_mut() {
                last.push(' ');
                last.push_str(head);
            }
        }
        rows.extend(segments.map(|s| s.trim().to_string()));
    }
    non_empty(rows)
}

fn by_paragraphs(text: &str) -> Option<Vec<String>> {
    let rows: Vec<String> = PARAGRAPH_BREAK
        .split(text)
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();
    if rows.iter().filter(|r| !r.is_empty()).count() < 2 {
        return None;
    }
    non_empty(rows)
}

fn by_lines(text: &str) -> Option<Vec<String>> {
    let rows: Vec<String> = text.lines().map(|l| l.trim().to_string()).collect();
    if rows.iter().filter(|r| !r.is_empty()).count() < 2 {
        return None;
    }
    non_empty(rows)
}

fn by_sentence_pairs(text: &str) -> Option<Vec<String>> {
    if text.chars().count() <= SENTENCE_SPLIT_THRESHOLD {
        return None;
    }
    let sentences = sentences(text);
    if sentences.len() < 2 {
        return None;
    }
    non_empty(sentences.chunks(2).map(|pair| pair.join(" ")).collect())
}

/// Splits on a period followed by whitespace. Every sentence ends with '.'.
pub fn sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut chars = text.trim().chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if c == '.' && chars.peek().is_some_and(|n| n.is_whitespace()) {
            out.push(current.trim().to_string());
            current.clear();
        }
    }
    let tail = current.trim();
    if !tail.is_empty() {
        if tail.ends_with('.') {
            out.push(tail.to_string());
        } else {
            out.push(format!("{tail}."));
        }
    }
    out
}

/// Cuts `text` to `limit` characters, marking the cut with "...".
pub fn truncate(text: &str, limit: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let prefix: String = text.chars().take(limit).collect();
    format!("{}...", prefix.trim_end())
}

/// Keeps an enhanced row readable: text over the threshold is cut back to
/// the whole sentences that fit in [`BULLET_CHAR_LIMIT`].
pub fn shorten_to_sentences(text: &str) -> String {
    let text = strip_marker(text);
    if text.chars().count() <= ENHANCE_SHORTEN_THRESHOLD {
        return text;
    }

    let mut kept = String::new();
    for sentence in sentences(&text) {
        let candidate = if kept.is_empty() {
            sentence.clone()
        } else {
            format!("{kept} {sentence}")
        };
        if candidate.chars().count() > BULLET_CHAR_LIMIT {
            break;
        }
        kept = candidate;
    }

    if kept.is_empty() {
        truncate(&text, BULLET_CHAR_LIMIT)
    } else {
        kept
    }
}

/// Removes a leading bullet or number marker.
pub fn strip_marker(row: &str) -> String {
    MARKER.replace(row.trim(), "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_markers() {
        assert_eq!(segment("• Led A\n• Built B", 5), vec!["Led A", "Built B"]);
    }

    #[test]
    fn test_short_bullets_are_kept() {
        let rows = segment("• A\n• B\n• C", 5);
        assert_eq!(rows, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_inline_bullets_and_preamble() {
        let rows = segment("Here are your bullets:\n• Led A • Built B", 5);
        assert_eq!(rows, vec!["Led A", "Built B"]);
    }

    #[test]
    fn test_dash_and_numbered_markers() {
        assert_eq!(segment("- one\n- two", 5), vec!["one", "two"]);
        assert_eq!(segment("1. one\n2) two", 5), vec!["one", "two"]);
    }

    #[test]
    fn test_continuation_lines_join_previous_bullet() {
        let rows = segment("• Led a team\n  of five\n• Shipped", 5);
        assert_eq!(rows, vec!["Led a team of five", "Shipped"]);
    }

    #[test]
    fn test_paragraphs_then_lines() {
        assert_eq!(segment("First para\nstill first\n\nSecond", 5), vec![
            "First para still first",
            "Second"
        ]);
        assert_eq!(segment("one\ntwo\nthree", 5), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_cap_is_applied() {
        let text = (1..=8).map(|i| format!("• item {i}")).collect::<Vec<_>>().join("\n");
        assert_eq!(segment(&text, MAX_RESPONSIBILITY_BULLETS).len(), 5);
        assert_eq!(segment(&text, MAX_HIGHLIGHT_BULLETS).len(), 4);
    }

    #[test]
    fn test_long_prose_becomes_sentence_pairs() {
        let sentence = "Built a distributed cache serving millions of requests per day";
        let text = format!("{sentence}. {sentence}. {sentence}. {sentence}.");
        let rows = segment(&text, 5);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.ends_with('.')));
    }

    #[test]
    fn test_unsegmentable_text_is_truncated() {
        let text = "x".repeat(190);
        let rows = segment(&text, 5);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].ends_with("..."));
        assert_eq!(rows[0].chars().count(), BULLET_CHAR_LIMIT + 3);
    }

    #[test]
    fn test_structured_bullets_win() {
        let generated = Generated {
            text: "ignored\nprose".to_string(),
            bullets: vec!["• Led A".to_string(), " ".to_string(), "Built B".to_string()],
        };
        assert_eq!(bullets_from(&generated, 5), vec!["Led A", "Built B"]);
    }

    #[test]
    fn test_blank_text_yields_nothing() {
        assert!(segment("   \n  ", 5).is_empty());
    }

    #[test]
    fn test_shorten_keeps_whole_sentences() {
        let a = "Reduced deploy times by forty percent through pipeline caching";
        let b = "Introduced contract tests for every public endpoint in the service";
        let c = "Mentored three junior engineers through their first production on-call rotations";
        let text = format!("{a}. {b}. {c}.");
        assert!(text.chars().count() > ENHANCE_SHORTEN_THRESHOLD);

        let shortened = shorten_to_sentences(&text);
        assert_eq!(shortened, format!("{a}. {b}."));
    }

    #[test]
    fn test_shorten_leaves_short_text_alone() {
        assert_eq!(shorten_to_sentences("• Led the team"), "Led the team");
    }

    #[test]
    fn test_shorten_falls_back_to_truncation() {
        let text = "word ".repeat(60);
        let shortened = shorten_to_sentences(&text);
        assert!(shortened.ends_with("..."));
    }
}
