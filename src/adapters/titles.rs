//! Title source: reads scraped titles exported from the page, one per line or
//! as a JSON string array.

use crate::core::assembler::dedupe_titles;
use crate::domain::model::RawTitle;
use crate::utils::error::{AppError, Result};
use std::io::Read;
use std::path::Path;

/// `-` reads standard input.
pub const STDIN_MARKER: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleFormat {
    /// One title per line.
    Lines,
    /// A JSON array of strings.
    Json,
}

impl TitleFormat {
    /// JSON when asked for or when the file ends in `.json`. Anything else,
    /// stdin included, is read as lines.
    pub fn for_source(source: &str, json_input: bool) -> Self {
        let has_json_extension = source != STDIN_MARKER
            && Path::new(source)
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if json_input || has_json_extension {
            TitleFormat::Json
        } else {
            TitleFormat::Lines
        }
    }
}

pub fn parse_titles(content: &str, json: bool) -> Result<Vec<RawTitle>> {
    let titles: Vec<String> = if json {
        serde_json::from_str(content)?
    } else {
        content.lines().map(str::to_string).collect()
    };
    let trimmed: Vec<&str> = titles.iter().map(|t| t.trim()).collect();
    Ok(dedupe_titles(&trimmed))
}

pub fn read_titles_from<R: Read>(mut reader: R, format: TitleFormat) -> Result<Vec<RawTitle>> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    parse_titles(&content, format == TitleFormat::Json)
}

pub fn read_titles(source: &str, json_input: bool) -> Result<Vec<RawTitle>> {
    let format = TitleFormat::for_source(source, json_input);
    if source == STDIN_MARKER {
        return read_titles_from(std::io::stdin().lock(), format);
    }

    let file = std::fs::File::open(source).map_err(|e| AppError::ConfigError {
        message: format!("cannot read titles from '{}': {}", source, e),
    })?;
    let titles = read_titles_from(file, format)?;
    tracing::debug!("Read {} titles from {} as {:?}", titles.len(), source, format);
    Ok(titles)
}
