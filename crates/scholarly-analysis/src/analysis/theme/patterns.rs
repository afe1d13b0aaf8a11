//! Static pattern tables for theme extraction.
//!
//! Patterns are written against lower-cased text.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// One entry of the theme table.
pub struct ThemePattern {
    pub label: &'static str,
    pub regex: Regex,
}

fn theme(label: &'static str, pattern: &str) -> ThemePattern {
    ThemePattern {
        label,
        regex: Regex::new(pattern).expect("Invalid theme regex"),
    }
}

/// Organizational research themes, in reporting order.
pub static THEME_PATTERNS: Lazy<Vec<ThemePattern>> = Lazy::new(|| {
    vec![
        theme(
            "communication",
            r"\b(communication|communicat\w*|messag\w*|email\w*|meeting\w*|inform\w*)\b",
        ),
        theme(
            "leadership",
            r"\b(leader\w*|management|manager\w*|director\w*|executive\w*|decision\w*)\b",
        ),
        theme(
            "trust",
            r"\b(trust\w*|distrust\w*|psycholog\w*\s*safety|safe\w*|vulnerab\w*)\b",
        ),
        theme(
            "conflict",
            r"\b(conflict\w*|friction|tension\w*|disagree\w*|dispute\w*)\b",
        ),
        theme(
            "teamwork",
            r"\b(team\w*|collaborat\w*|cooperat\w*|together\w*|group\w*)\b",
        ),
        theme(
            "deadlines",
            r"\b(deadline\w*|timeline\w*|schedule\w*|deliver\w*|due\s*date\w*|miss\w*)\b",
        ),
        theme(
            "roles",
            r"\b(role\w*|responsib\w*|accountab\w*|clarif\w*|unclear\w*)\b",
        ),
        theme(
            "silos",
            r"\b(silo\w*|department\w*|cross.?functional\w*|coordinat\w*)\b",
        ),
        theme(
            "culture",
            r"\b(cultur\w*|norm\w*|value\w*|climate\w*|environment\w*)\b",
        ),
        theme(
            "performance",
            r"\b(perform\w*|productiv\w*|efficien\w*|effectiv\w*|outcome\w*)\b",
        ),
    ]
});

/// Candidate tokens for word frequency.
pub static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-z]{4,}\b").expect("Invalid regex: word"));

pub static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "that", "this", "with", "from", "have", "were", "been", "they", "their", "about", "would",
        "could", "should", "which", "there", "being", "because", "didn", "wasn", "doesn", "people",
    ]
    .into_iter()
    .collect()
});
