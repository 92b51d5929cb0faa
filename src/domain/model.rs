use serde::{Deserialize, Serialize};

/// Text scraped from a video or queue item, before any cleanup.
pub type RawTitle = String;

/// Artist/title hypothesis for one scraped title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub artist: Option<String>,
    pub title: String,
}

impl ParsedQuery {
    pub fn without_artist(title: impl Into<String>) -> Self {
        Self {
            artist: None,
            title: title.into(),
        }
    }

    /// Artist, or `""` when no splitting rule matched.
    pub fn artist_or_empty(&self) -> &str {
        self.artist.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Matched(String),
    NotFound,
}

impl MatchResult {
    pub fn uri(&self) -> Option<&str> {
        match self {
            MatchResult::Matched(uri) => Some(uri),
            MatchResult::NotFound => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistReport {
    pub playlist_id: String,
    pub playlist_url: String,
    pub requested_count: usize,
    pub matched_count: usize,
    pub unmatched_titles: Vec<String>,
}

impl PlaylistReport {
    pub fn is_complete(&self) -> bool {
        self.matched_count == self.requested_count
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub expires_at_epoch_ms: i64,
}

impl Credential {
    pub fn is_valid_at(&self, now_epoch_ms: i64) -> bool {
        now_epoch_ms < self.expires_at_epoch_ms
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPlaylist {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackHit {
    pub uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_expiry_is_exclusive() {
        let credential = Credential {
            token: "tok".to_string(),
            expires_at_epoch_ms: 1_000,
        };
        assert!(credential.is_valid_at(999));
        assert!(!credential.is_valid_at(1_000));
    }

    #[test]
    fn test_report_completeness() {
        let report = PlaylistReport {
            playlist_id: "p".to_string(),
            playlist_url: "u".to_string(),
            requested_count: 3,
            matched_count: 2,
            unmatched_titles: vec!["Some Unknown Local Recording".to_string()],
        };
        assert!(!report.is_complete());
    }
}
