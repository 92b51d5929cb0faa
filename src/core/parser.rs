//! Splits a cleaned title into an artist/title hypothesis.

use crate::domain::model::ParsedQuery;
use once_cell::sync::Lazy;
use regex::Regex;

/// One splitting rule. The pattern must capture the artist in group 1 and the
/// title in group 2.
#[derive(Debug, Clone)]
pub struct ParserRule {
    pub name: &'static str,
    pattern: Regex,
}

impl ParserRule {
    pub fn new(name: &'static str, pattern: Regex) -> Self {
        Self { name, pattern }
    }

    /// Both captures trimmed; `None` when the pattern misses or either side is blank.
    pub fn apply(&self, title: &str) -> Option<ParsedQuery> {
        let caps = self.pattern.captures(title)?;
        let artist = caps.get(1)?.as_str().trim();
        let track = caps.get(2)?.as_str().trim();
        if artist.is_empty() || track.is_empty() {
            return None;
        }
        Some(ParsedQuery {
            artist: Some(artist.to_string()),
            title: track.to_string(),
        })
    }
}

static DEFAULT_RULES: Lazy<Vec<ParserRule>> = Lazy::new(|| {
    vec![
        // Artist - Title
        ParserRule::new("dash", Regex::new(r"^(.*?)\s-\s(.*)$").expect("dash rule")),
        // Artist: Title
        ParserRule::new("colon", Regex::new(r"^(.*?):\s(.*)$").expect("colon rule")),
        // Artist "Title"
        ParserRule::new("quoted", Regex::new(r#"^(.*?)\s"(.*)"$"#).expect("quoted rule")),
    ]
});

/// Ordered rule list, first match wins.
#[derive(Debug, Clone)]
pub struct TitleParser {
    rules: Vec<ParserRule>,
}

impl Default for TitleParser {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES.clone(),
        }
    }
}

impl TitleParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule after the existing ones.
    pub fn with_rule(mut self, rule: ParserRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[ParserRule] {
        &self.rules
    }

    pub fn parse(&self, title: &str) -> ParsedQuery {
        for rule in &self.rules {
            if let Some(parsed) = rule.apply(title) {
                tracing::trace!("rule '{}' matched {:?}", rule.name, title);
                return parsed;
            }
        }
        ParsedQuery::without_artist(title)
    }
}

/// Parses with the default rules.
pub fn parse(title: &str) -> ParsedQuery {
    TitleParser::default().parse(title)
}
