//! Dictionary-driven theme extraction over free text.
//!
//! The extractor lower-cases the input once, runs every entry of the
//! static theme table against it, and reports per-theme match counts with a
//! handful of distinct matched substrings. A word-frequency table and a
//! segment count (blank-line separated entries) give extra context.

mod patterns;

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::rigor::{RigorCheck, evaluate};
use crate::types::{
    AnalysisDetails, AnalysisKind, AnalysisResult, ThemeDetails, ThemeRecord, WordFrequency,
};
use std::collections::HashMap;
use tracing::debug;

pub use patterns::{STOP_WORDS, THEME_PATTERNS, ThemePattern, WORD_PATTERN};

/// Extracts recurring themes from qualitative text.
pub struct ThemeExtractor;

impl ThemeExtractor {
    /// Decode `bytes` as UTF-8 and run [`ThemeExtractor::analyze`].
    pub fn analyze_bytes(bytes: &[u8], config: &AnalysisConfig) -> Result<AnalysisResult> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            AnalysisError::Decoding(format!("invalid byte at offset {}", e.valid_up_to()))
        })?;
        Ok(Self::analyze(text, config))
    }

    /// Run theme extraction. Deterministic for a given text and config.
    pub fn analyze(text: &str, config: &AnalysisConfig) -> AnalysisResult {
        let lower = text.to_lowercase();

        let themes = Self::match_themes(&lower, config.max_theme_examples);
        let common_words = Self::word_frequencies(&lower, config.top_word_count);
        let segment_count = Self::count_segments(text);

        let mut warnings = Vec::new();
        warnings.extend(evaluate(RigorCheck::PatternMatching, &config.rigor));
        warnings.extend(evaluate(
            RigorCheck::TextSegments {
                segments: segment_count,
            },
            &config.rigor,
        ));

        let summary = if themes.is_empty() {
            "No common themes detected. The text may not contain organizational \
             research-related content."
                .to_string()
        } else {
            let top: Vec<&str> = themes.iter().take(3).map(|t| t.theme.as_str()).collect();
            format!(
                "Identified {} recurring themes across {} text segments. Top themes: {}.",
                themes.len(),
                segment_count,
                top.join(", ")
            )
        };

        debug!(
            "Matched {} themes over {} segments ({} bytes)",
            themes.len(),
            segment_count,
            text.len()
        );

        AnalysisResult::new(
            AnalysisKind::Theme,
            summary,
            AnalysisDetails::Theme(ThemeDetails {
                themes,
                common_words,
                segment_count,
            }),
            warnings,
        )
    }

    /// Match every theme against already lower-cased text.
    ///
    /// Themes without matches are dropped. The rest are ordered by match
    /// count, descending, keeping table order among equals.
    pub fn match_themes(lower: &str, max_examples: usize) -> Vec<ThemeRecord> {
        let mut themes: Vec<ThemeRecord> = THEME_PATTERNS
            .iter()
            .filter_map(|pattern| {
                let mut frequency = 0;
                let mut examples: Vec<String> = Vec::new();
                for m in pattern.regex.find_iter(lower) {
                    frequency += 1;
                    if examples.len() < max_examples && !examples.iter().any(|e| e == m.as_str()) {
                        examples.push(m.as_str().to_string());
                    }
                }
                (frequency > 0).then(|| ThemeRecord {
                    theme: pattern.label.to_string(),
                    frequency,
                    examples,
                })
            })
            .collect();

        themes.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        themes
    }

    /// Most frequent non-stop-word tokens of four or more letters.
    ///
    /// Ties keep the order of first occurrence.
    pub fn word_frequencies(lower: &str, top: usize) -> Vec<WordFrequency> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<WordFrequency> = Vec::new();

        for m in WORD_PATTERN.find_iter(lower) {
            let word = m.as_str();
            if STOP_WORDS.contains(word) {
                continue;
            }
            match index.get(word) {
                Some(&slot) => counts[slot].count += 1,
                None => {
                    index.insert(word, counts.len());
                    counts.push(WordFrequency {
                        word: word.to_string(),
                        count: 1,
                    });
                }
            }
        }

        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(top);
        counts
    }

    /// Number of blank-line separated segments that contain more than
    /// whitespace.
    pub fn count_segments(text: &str) -> usize {
        text.split("\n\n").filter(|s| !s.trim().is_empty()).count()
    }
}
