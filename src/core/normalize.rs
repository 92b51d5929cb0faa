//! Strips YouTube-specific noise from scraped titles before they are parsed.

use once_cell::sync::Lazy;
use regex::Regex;

/// Noise markers, removed in this order.
static NOISE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)[\(\[]\s*official\s+video\s*[\)\]]",
        r"(?i)[\(\[]\s*official\s+music\s+video\s*[\)\]]",
        r"(?i)[\(\[]\s*official\s+lyrics?\s+video\s*[\)\]]",
        r"(?i)[\(\[]\s*official\s+audio\s*[\)\]]",
        r"(?i)[\(\[]\s*audio\s*[\)\]]",
        r"(?i)[\(\[]\s*lyrics\s*[\)\]]",
        r"(?i)[\(\[]\s*lyric\s+video\s*[\)\]]",
        r"(?i)[\(\[]\s*visuali[sz]er\s*[\)\]]",
        r"(?i)[\(\[]\s*(?:hd|hq|4k)\s*[\)\]]",
        r"(?i)\d{4}\s+remaster(?:ed)?",
        r"(?i)\bft\.|\bfeat\.",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("noise pattern must compile"))
    .collect()
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

#[derive(Debug, Clone, Copy, Default)]
pub struct TitleNormalizer;

impl TitleNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, raw: &str) -> String {
        normalize(raw)
    }

    pub fn search_text(&self, raw: &str) -> String {
        search_text(raw)
    }
}

fn normalize_once(raw: &str) -> String {
    let mut text = raw.to_string();
    for pattern in NOISE_PATTERNS.iter() {
        text = pattern.replace_all(&text, "").into_owned();
    }
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Removes noise markers, collapses whitespace and trims.
///
/// Removing one marker can expose another (`"(Offi(HD)cial Video)"`), so the
/// rules run until the text stops changing. Every pass only deletes
/// characters, which bounds the loop.
pub fn normalize(raw: &str) -> String {
    let mut current = normalize_once(raw);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Search text for a scraped title: normalized, or the trimmed raw text when
/// normalization leaves nothing.
pub fn search_text(raw: &str) -> String {
    match normalize(raw) {
        cleaned if cleaned.is_empty() => raw.trim().to_string(),
        cleaned => cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_official_video() {
        assert_eq!(normalize("Song (Official Video)  "), "Song");
        assert_eq!(normalize("Song [OFFICIAL VIDEO]"), "Song");
    }

    #[test]
    fn test_strips_quality_and_lyric_tags() {
        assert_eq!(
            normalize("Queen - Bohemian Rhapsody (Official Music Video) (HD)"),
            "Queen - Bohemian Rhapsody"
        );
        assert_eq!(normalize("Adele - Hello (Lyrics)"), "Adele - Hello");
        assert_eq!(normalize("Adele - Hello [lyrics] (HQ)"), "Adele - Hello");
        assert_eq!(normalize("Adele - Hello (Lyric Video)"), "Adele - Hello");
        assert_eq!(normalize("Muse - Uprising (Official Audio)"), "Muse - Uprising");
        assert_eq!(normalize("Muse - Uprising (Audio)"), "Muse - Uprising");
    }

    #[test]
    fn test_strips_remaster_year() {
        assert_eq!(
            normalize("The Beatles - Something 2019 Remaster"),
            "The Beatles - Something"
        );
        assert_eq!(
            normalize("Pink Floyd - Time 2011 remastered"),
            "Pink Floyd - Time"
        );
    }

    #[test]
    fn test_featuring_marker_keeps_featured_artist() {
        assert_eq!(
            normalize("Calvin Harris - Summer feat. Rihanna"),
            "Calvin Harris - Summer Rihanna"
        );
        assert_eq!(normalize("A ft. B - C"), "A B - C");
        // "ft." inside a word is not a featuring marker
        assert_eq!(normalize("Daft Punk - Lift."), "Daft Punk - Lift.");
    }

    #[test]
    fn test_search_text_never_empties_a_title() {
        assert_eq!(search_text(" (Official Video) "), "(Official Video)");
        assert_eq!(search_text("Song (HD)"), "Song");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  a \t b\n c  "), "a b c");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_idempotent_on_nested_markers() {
        let inputs = [
            "Song (Offi(HD)cial Video)",
            "Song (Official  Video)",
            "Song [Ly(HQ)rics] feat. X",
            "Artist - Title (Official Video) (Lyrics) 1999 Remaster",
            "   ",
            "plain title",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", input);
        }
        assert_eq!(normalize("Song (Offi(HD)cial Video)"), "Song");
    }
}
