use std::sync::LazyLock;

use regex::Regex;

use crate::models::{CategoryScores, ScoreCategory, MAX_TOTAL_POINTS};

/// Substrings that mark a reply as carrying a score block.
pub const SCORE_MARKERS: &[&str] = &["📊 **SCORE:", "📊 SCORE:"];

/// Glyph that opens the score line; the total is read from the rest of that line.
const SCORE_LINE_GLYPH: char = '📊';

/// Breakdown lines separate categories with this character.
const BREAKDOWN_SEPARATOR: char = '|';

// Digits are ASCII only: `\d` would also match other scripts' digits, which
// `i64::from_str` cannot parse.
static TOTAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"([0-9]+)/{MAX_TOTAL_POINTS}")).expect("total pattern is valid")
});

static CATEGORY_PATTERNS: LazyLock<Vec<(ScoreCategory, Regex)>> = LazyLock::new(|| {
    ScoreCategory::ALL
        .iter()
        .map(|category| {
            let pattern = format!(r"{}:\s*([0-9]+)", regex::escape(category.label()));
            (
                *category,
                Regex::new(&pattern).expect("category pattern is valid"),
            )
        })
        .collect()
});

/// Scores recovered from one reply body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractedScore {
    /// Points from the `N/70` figure on the score line, 0 if absent.
    pub total: i64,
    /// Points from the breakdown lines; not reconciled against `total`.
    pub categories: CategoryScores,
}

/// Parser for the score blocks the bot appends to its replies.
pub struct ScoreExtractor;

impl ScoreExtractor {
    pub fn is_scored(body: &str) -> bool {
        SCORE_MARKERS.iter().any(|marker| body.contains(marker))
    }

    /// Extract the total and per-category points from a reply.
    ///
    /// Returns `None` when the body has no score marker. A scored body never
    /// fails: unreadable figures contribute zero.
    pub fn extract(body: &str) -> Option<ExtractedScore> {
        if !Self::is_scored(body) {
            return None;
        }

        let mut score = ExtractedScore {
            total: extract_total(body),
            ..Default::default()
        };

        for line in body.lines().filter(|line| is_breakdown_line(line)) {
            for (category, pattern) in CATEGORY_PATTERNS.iter() {
                if !mentions_category(line, *category) {
                    continue;
                }
                if let Some(points) = first_number(pattern, line) {
                    score.categories.add(*category, points);
                }
            }
        }

        Some(score)
    }
}

fn extract_total(body: &str) -> i64 {
    let score_line = body
        .split_once(SCORE_LINE_GLYPH)
        .and_then(|(_, rest)| rest.lines().next())
        .unwrap_or("");

    first_number(&TOTAL_PATTERN, score_line).unwrap_or(0)
}

fn is_breakdown_line(line: &str) -> bool {
    line.contains(BREAKDOWN_SEPARATOR)
        && ScoreCategory::ALL
            .iter()
            .any(|category| line.contains(category.label()))
}

fn mentions_category(line: &str, category: ScoreCategory) -> bool {
    line.contains(&format!("{}:", category.label())) || line.contains(category.emoji())
}

fn first_number(pattern: &Regex, haystack: &str) -> Option<i64> {
    pattern
        .captures(haystack)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
