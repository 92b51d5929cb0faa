//! Dry run of the title pipeline: what each title would be searched as,
//! without a token or any catalog request.

use crate::core::assembler::dedupe_titles;
use crate::core::matcher::structured_query;
use crate::core::normalize::TitleNormalizer;
use crate::core::parser::TitleParser;
use crate::domain::model::ParsedQuery;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitlePreview {
    pub raw: String,
    /// Output of the normalizer alone, possibly empty.
    pub normalized: String,
    /// Text actually searched and used as the fallback query.
    pub search_text: String,
    pub query: ParsedQuery,
    /// `track:… artist:…` query tried first, when an artist was found.
    pub structured: Option<String>,
}

impl TitlePreview {
    /// Queries in the order the matcher would send them.
    pub fn planned_queries(&self) -> Vec<&str> {
        match &self.structured {
            Some(structured) => vec![structured.as_str(), self.search_text.as_str()],
            None => vec![self.search_text.as_str()],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TitlePreviewer {
    normalizer: TitleNormalizer,
    parser: TitleParser,
}

impl TitlePreviewer {
    pub fn new(parser: TitleParser) -> Self {
        Self {
            normalizer: TitleNormalizer::new(),
            parser,
        }
    }

    pub fn preview_one(&self, raw: &str) -> TitlePreview {
        let normalized = self.normalizer.normalize(raw);
        let search_text = self.normalizer.search_text(raw);
        let query = self.parser.parse(&search_text);
        let structured = structured_query(&query);
        TitlePreview {
            raw: raw.to_string(),
            normalized,
            search_text,
            query,
            structured,
        }
    }

    /// Previews unique non-blank titles in first-seen order, like a build would.
    pub fn preview<S: AsRef<str>>(&self, raw_titles: &[S]) -> Vec<TitlePreview> {
        dedupe_titles(raw_titles)
            .iter()
            .map(|title| self.preview_one(title))
            .collect()
    }
}
