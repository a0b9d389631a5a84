//! Heuristic quality scoring for generated and translated text (QualityScorer).
//!
//! The score is a deterministic function of the source text, the produced
//! text, and whatever self-assessment the language model returned alongside
//! it. No model or network is involved, so the result can be recomputed at
//! any time from stored values.
//!
//! Composition:
//! - four structural components combined with fixed weights (see [`WEIGHTS`])
//! - blended 70/30 with the model's own confidence when one was reported
//! - small bonuses for a stated translation strategy and cultural notes
//! - a penalty for output much shorter than the source
//! - clamped to `[0.0, 1.0]`

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Weights for length ratio, structure, completeness, coherence (sum to 1.0).
pub const WEIGHTS: [f64; 4] = [0.25, 0.30, 0.25, 0.20];

/// Share of the blended score taken from the computed base score.
pub const BASE_BLEND: f64 = 0.7;

/// Share of the blended score taken from the model-reported confidence.
pub const CONFIDENCE_BLEND: f64 = 0.3;

/// Bonus for a translation strategy note longer than [`STRATEGY_MIN_CHARS`].
pub const STRATEGY_BONUS: f64 = 0.05;
pub const STRATEGY_MIN_CHARS: usize = 10;

/// Bonus for cultural notes longer than [`CULTURAL_NOTES_MIN_CHARS`].
pub const CULTURAL_NOTES_BONUS: f64 = 0.05;
pub const CULTURAL_NOTES_MIN_CHARS: usize = 20;

/// Output shorter than this fraction of the source is penalised.
pub const SHORT_OUTPUT_RATIO: f64 = 0.4;
pub const SHORT_OUTPUT_PENALTY: f64 = 0.1;

const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?', '…', '。', '！', '？'];

static PARAGRAPH_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));

static LIST_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(?:[-*•]|\d+[.)])[ \t]+").expect("valid regex"));

static SENTENCE_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?…。！？]+").expect("valid regex"));

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Self-assessment extracted from a language model's structured response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiMetadata {
    /// Model-reported confidence in `[0.0, 1.0]`.
    pub confidence_score: Option<f64>,
    /// Free-text explanation of how the text was translated.
    pub translation_strategy: Option<String>,
    /// Notes on cultural adaptations made.
    pub cultural_notes: Option<String>,
}

/// The four structural components of a quality score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityBreakdown {
    pub length_ratio: f64,
    pub structure_preservation: f64,
    pub completeness: f64,
    pub content_coherence: f64,
}

impl QualityBreakdown {
    /// Compute the breakdown for a source/output pair.
    pub fn compute(original: &str, translated: &str) -> Self {
        Self {
            length_ratio: length_ratio_score(original, translated),
            structure_preservation: structure_preservation(original, translated),
            completeness: completeness(original, translated),
            content_coherence: content_coherence(original, translated),
        }
    }

    /// Weighted base score, before any metadata adjustment.
    pub fn weighted(&self) -> f64 {
        let [w_len, w_struct, w_complete, w_coherence] = WEIGHTS;
        w_len * self.length_ratio
            + w_struct * self.structure_preservation
            + w_complete * self.completeness
            + w_coherence * self.content_coherence
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Score `translated` against `original`. Always returns a value in `[0.0, 1.0]`.
///
/// Empty output scores `0.0`.
pub fn score(original: &str, translated: &str, ai_metadata: Option<&AiMetadata>) -> f64 {
    if translated.trim().is_empty() {
        return 0.0;
    }

    let mut result = QualityBreakdown::compute(original, translated).weighted();

    if let Some(meta) = ai_metadata {
        if let Some(confidence) = meta.confidence_score.filter(|c| c.is_finite()) {
            result = result * BASE_BLEND + confidence.clamp(0.0, 1.0) * CONFIDENCE_BLEND;
        }
        if longer_than(meta.translation_strategy.as_deref(), STRATEGY_MIN_CHARS) {
            result += STRATEGY_BONUS;
        }
        if longer_than(meta.cultural_notes.as_deref(), CULTURAL_NOTES_MIN_CHARS) {
            result += CULTURAL_NOTES_BONUS;
        }
    }

    let original_len = char_len(original);
    if original_len > 0 && (char_len(translated) as f64) < original_len as f64 * SHORT_OUTPUT_RATIO
    {
        result -= SHORT_OUTPUT_PENALTY;
    }

    result.clamp(0.0, 1.0)
}

/// 1.0 inside `[0.8, 1.5]`, 0.7 inside `[0.6, 2.0]`, 0.3 otherwise.
pub fn length_ratio_score(original: &str, translated: &str) -> f64 {
    let ratio = length_ratio(original, translated);
    if (0.8..=1.5).contains(&ratio) {
        1.0
    } else if (0.6..=2.0).contains(&ratio) {
        0.7
    } else {
        0.3
    }
}

/// Starts at 1.0; loses 0.3 when paragraph counts differ by more than one
/// and 0.2 when list-marker counts differ at all.
pub fn structure_preservation(original: &str, translated: &str) -> f64 {
    let mut result: f64 = 1.0;
    if paragraph_count(original).abs_diff(paragraph_count(translated)) > 1 {
        result -= 0.3;
    }
    if list_marker_count(original) != list_marker_count(translated) {
        result -= 0.2;
    }
    result.max(0.0)
}

/// 0.0 for empty output, 0.5 for output under half the source length, else 1.0.
pub fn completeness(original: &str, translated: &str) -> f64 {
    if translated.trim().is_empty() {
        0.0
    } else if length_ratio(original, translated) < 0.5 {
        0.5
    } else {
        1.0
    }
}

/// Sentence-count agreement plus bonuses for a capitalised start, terminal
/// punctuation, and no double spaces. Capped at 1.0.
pub fn content_coherence(original: &str, translated: &str) -> f64 {
    let a = sentence_count(original);
    let b = sentence_count(translated);
    let mut result = match (a, b) {
        (0, 0) => 1.0,
        (0, _) | (_, 0) => 0.0,
        _ => a.min(b) as f64 / a.max(b) as f64,
    };

    let text = translated.trim();
    if text.chars().next().is_some_and(char::is_uppercase) {
        result += 0.1;
    }
    if text.ends_with(SENTENCE_TERMINATORS) {
        result += 0.1;
    }
    if !translated.contains("  ") {
        result += 0.1;
    }
    result.min(1.0)
}

// ---------------------------------------------------------------------------
// Text measurements
// ---------------------------------------------------------------------------

/// Raw character count. Surrounding whitespace counts toward the length.
fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Output length over source length, in characters. 0.0 for an empty source.
fn length_ratio(original: &str, translated: &str) -> f64 {
    let original_len = char_len(original);
    if original_len == 0 {
        return 0.0;
    }
    char_len(translated) as f64 / original_len as f64
}

fn paragraph_count(text: &str) -> usize {
    PARAGRAPH_BREAK_RE
        .split(text)
        .filter(|p| !p.trim().is_empty())
        .count()
}

fn list_marker_count(text: &str) -> usize {
    LIST_MARKER_RE.find_iter(text).count()
}

fn sentence_count(text: &str) -> usize {
    SENTENCE_SPLIT_RE
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count()
}

fn longer_than(text: Option<&str>, min_chars: usize) -> bool {
    text.is_some_and(|t| t.trim().chars().count() > min_chars)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    const SOURCE: &str = "Meet the new trail shoe. Built for wet rock and long days.";
    const RENDERED: &str = "Conoce la nueva zapatilla de trail. Hecha para roca mojada y días largos.";

    #[test]
    fn weights_sum_to_one() {
        assert!(approx(WEIGHTS.iter().sum::<f64>(), 1.0));
    }

    #[test]
    fn empty_output_scores_zero() {
        assert_eq!(score("Hello world.", "", None), 0.0);
        assert_eq!(score("Hello world.", "", Some(&AiMetadata::default())), 0.0);
        assert_eq!(score("Hello world.", "   ", None), 0.0);
    }

    #[test]
    fn faithful_translation_scores_full_marks() {
        let result = score(SOURCE, RENDERED, None);
        assert!(approx(result, 1.0), "got {result}");
    }

    #[test]
    fn confidence_is_blended() {
        let meta = AiMetadata {
            confidence_score: Some(0.5),
            ..Default::default()
        };
        let result = score(SOURCE, RENDERED, Some(&meta));
        assert!(approx(result, 0.85), "got {result}");
    }

    #[test]
    fn notes_add_bonuses() {
        let meta = AiMetadata {
            confidence_score: Some(0.5),
            translation_strategy: Some("Kept the imperative voice".to_string()),
            cultural_notes: Some("Used 'zapatilla' rather than 'tenis' for Spain".to_string()),
        };
        let result = score(SOURCE, RENDERED, Some(&meta));
        assert!(approx(result, 0.95), "got {result}");
    }

    #[test]
    fn short_notes_earn_nothing() {
        let meta = AiMetadata {
            confidence_score: None,
            translation_strategy: Some("literal".to_string()),
            cultural_notes: Some("none needed".to_string()),
        };
        assert!(approx(score(SOURCE, RENDERED, Some(&meta)), 1.0));
    }

    #[test]
    fn very_short_output_is_penalised() {
        let original = vec!["Hello world."; 10].join(" ");
        let result = score(&original, "Hi.", None);
        // length 0.3, structure 1.0, completeness 0.5, coherence 0.1 + 0.3,
        // minus the short-output penalty.
        let expected = 0.25 * 0.3 + 0.30 * 1.0 + 0.25 * 0.5 + 0.20 * 0.4 - 0.1;
        assert!(approx(result, expected), "got {result}, expected {expected}");
    }

    #[test]
    fn length_ratio_bands() {
        let original = "a".repeat(100);
        assert_eq!(length_ratio_score(&original, &"b".repeat(100)), 1.0);
        assert_eq!(length_ratio_score(&original, &"b".repeat(150)), 1.0);
        assert_eq!(length_ratio_score(&original, &"b".repeat(70)), 0.7);
        assert_eq!(length_ratio_score(&original, &"b".repeat(200)), 0.7);
        assert_eq!(length_ratio_score(&original, &"b".repeat(59)), 0.3);
        assert_eq!(length_ratio_score(&original, &"b".repeat(201)), 0.3);
        assert_eq!(length_ratio_score("", "anything"), 0.3);
    }

    #[test]
    fn lengths_include_surrounding_whitespace() {
        let original = "a".repeat(100);
        let padded = format!("{}{}", "b".repeat(50), " ".repeat(60));
        assert_eq!(length_ratio_score(&original, &padded), 1.0);
        assert_eq!(completeness("abcdefghij", "ab   "), 1.0);
        assert_eq!(completeness("  abcdefghij  ", "abcdef"), 0.5);
    }

    #[test]
    fn structure_loses_paragraphs_and_lists() {
        let original = "Intro.\n\n- one\n- two\n\nOutro.";
        assert!(approx(structure_preservation(original, original), 1.0));
        assert!(approx(structure_preservation(original, "All in one line."), 0.5));
        assert!(approx(
            structure_preservation(original, "Intro.\n\n* uno\n* dos\n\nFin."),
            1.0
        ));
    }

    #[test]
    fn one_paragraph_difference_is_tolerated() {
        let original = "First.\n\nSecond.";
        assert!(approx(structure_preservation(original, "First. Second."), 1.0));
    }

    #[test]
    fn numbered_lists_count_as_markers() {
        assert_eq!(list_marker_count("1. a\n2) b\n- c\nplain"), 3);
    }

    #[test]
    fn completeness_bands() {
        assert_eq!(completeness("abcdefghij", ""), 0.0);
        assert_eq!(completeness("abcdefghij", "abcd"), 0.5);
        assert_eq!(completeness("abcdefghij", "abcde"), 1.0);
    }

    #[test]
    fn coherence_rewards_clean_text() {
        assert!(approx(content_coherence("One. Two.", "Uno. Dos."), 1.0));
        // Half the sentences, lower-case start, no terminal punctuation, double space.
        assert!(approx(content_coherence("One. Two.", "uno  dos"), 0.5));
    }

    #[test]
    fn score_is_deterministic_and_bounded() {
        let meta = AiMetadata {
            confidence_score: Some(3.0),
            translation_strategy: Some("x".repeat(50)),
            cultural_notes: Some("y".repeat(50)),
        };
        let first = score(SOURCE, RENDERED, Some(&meta));
        let second = score(SOURCE, RENDERED, Some(&meta));
        assert_eq!(first, second);
        assert!((0.0..=1.0).contains(&first));

        let long = "y".repeat(1000);
        for (a, b) in [("", "x"), ("x", long.as_str()), ("a.b.c.", "?")] {
            let s = score(a, b, None);
            assert!((0.0..=1.0).contains(&s), "score({a:?}, ..) = {s}");
        }
    }
}
