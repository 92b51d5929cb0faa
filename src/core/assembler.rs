use crate::core::auth::AuthSession;
use crate::core::matcher::{AuthorizedSearch, TrackMatcher};
use crate::core::normalize::TitleNormalizer;
use crate::core::parser::TitleParser;
use crate::domain::model::{MatchResult, PlaylistReport};
use crate::domain::ports::{CatalogClient, MAX_TRACKS_PER_REQUEST};
use crate::utils::error::{AssemblyError, RemoteOperation};
use std::collections::HashSet;

pub const DEFAULT_DESCRIPTION: &str = "Created from YouTube playlist/mix";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyStage {
    Unauthenticated,
    CredentialChecked,
    PlaylistCreated,
    Resolving,
    Populating,
    Done,
}

fn enter(stage: AssemblyStage) {
    tracing::debug!("assembly stage: {:?}", stage);
}

/// Drops blank titles and exact repeats, keeping first-seen order.
pub fn dedupe_titles<S: AsRef<str>>(raw_titles: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    raw_titles
        .iter()
        .map(|title| title.as_ref())
        .filter(|title| !title.trim().is_empty())
        .filter(|title| seen.insert(*title))
        .map(str::to_string)
        .collect()
}

fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub struct PlaylistAssembler<C: CatalogClient> {
    catalog: C,
    normalizer: TitleNormalizer,
    parser: TitleParser,
    description: String,
    clock: fn() -> i64,
}

impl<C: CatalogClient> PlaylistAssembler<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            normalizer: TitleNormalizer::new(),
            parser: TitleParser::default(),
            description: DEFAULT_DESCRIPTION.to_string(),
            clock: now_epoch_ms,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_parser(mut self, parser: TitleParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// Builds a private playlist named `desired_name` from scraped titles.
    ///
    /// Unmatched titles and failed searches lower `matched_count` but never
    /// fail the build. Only a missing/expired credential or a refused
    /// profile, create or append call is an error.
    pub async fn assemble<S: AsRef<str>>(
        &self,
        raw_titles: &[S],
        desired_name: &str,
        auth: &AuthSession,
    ) -> Result<PlaylistReport, AssemblyError> {
        enter(AssemblyStage::Unauthenticated);

        let credential = auth.valid_credential((self.clock)())?;
        let token = credential.token.as_str();
        enter(AssemblyStage::CredentialChecked);

        let titles = dedupe_titles(raw_titles);
        tracing::info!(
            "Building playlist '{}' from {} titles ({} after de-duplication)",
            desired_name,
            raw_titles.len(),
            titles.len()
        );

        let owner_id = self
            .catalog
            .current_user_id(token)
            .await
            .map_err(|source| AssemblyError::Remote {
                operation: RemoteOperation::FetchProfile,
                source,
            })?;

        let playlist = self
            .catalog
            .create_playlist(token, &owner_id, desired_name, &self.description, false)
            .await
            .map_err(|source| AssemblyError::Remote {
                operation: RemoteOperation::CreatePlaylist,
                source,
            })?;
        enter(AssemblyStage::PlaylistCreated);
        tracing::info!("Created playlist {} ({})", playlist.id, playlist.url);

        enter(AssemblyStage::Resolving);
        let search = AuthorizedSearch::new(&self.catalog, token);
        let matcher = TrackMatcher::new(&search);
        let mut track_uris = Vec::new();
        let mut unmatched_titles = Vec::new();

        for title in &titles {
            let normalized = self.normalizer.search_text(title);
            let query = self.parser.parse(&normalized);

            match matcher.match_track(&query, &normalized).await {
                MatchResult::Matched(uri) => track_uris.push(uri),
                MatchResult::NotFound => {
                    tracing::info!("No match for '{}'", title);
                    unmatched_titles.push(title.clone());
                }
            }
        }

        enter(AssemblyStage::Populating);
        let mut appended = 0;
        for batch in track_uris.chunks(MAX_TRACKS_PER_REQUEST) {
            self.catalog
                .append_tracks(token, &playlist.id, batch)
                .await
                .map_err(|source| {
                    tracing::error!(
                        "Append failed after {} of {} tracks",
                        appended,
                        track_uris.len()
                    );
                    AssemblyError::Remote {
                        operation: RemoteOperation::AppendTracks {
                            playlist_url: playlist.url.clone(),
                            appended,
                        },
                        source,
                    }
                })?;
            appended += batch.len();
        }

        enter(AssemblyStage::Done);
        let report = PlaylistReport {
            playlist_id: playlist.id,
            playlist_url: playlist.url,
            requested_count: titles.len(),
            matched_count: track_uris.len(),
            unmatched_titles,
        };
        tracing::info!(
            "Added {} of {} songs",
            report.matched_count,
            report.requested_count
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CreatedPlaylist, Credential, TrackHit};
    use crate::domain::ports::CatalogResult;
    use crate::utils::error::{CatalogError, CredentialProblem};
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct CatalogState {
        searches: Vec<String>,
        created: Vec<(String, String, bool)>,
        appends: Vec<Vec<String>>,
        profile_calls: usize,
    }

    /// In-memory catalog: every query containing "missing" has no hits,
    /// everything else resolves to `spotify:track:<query>`.
    #[derive(Clone, Default)]
    struct MockCatalog {
        state: Arc<Mutex<CatalogState>>,
        fail_create: bool,
        fail_append_after: Option<usize>,
    }

    impl MockCatalog {
        async fn state(&self) -> tokio::sync::MutexGuard<'_, CatalogState> {
            self.state.lock().await
        }
    }

    #[async_trait]
    impl CatalogClient for MockCatalog {
        async fn current_user_id(&self, token: &str) -> CatalogResult<String> {
            assert_eq!(token, "tok");
            self.state.lock().await.profile_calls += 1;
            Ok("user1".to_string())
        }

        async fn create_playlist(
            &self,
            _token: &str,
            owner_id: &str,
            name: &str,
            description: &str,
            public: bool,
        ) -> CatalogResult<CreatedPlaylist> {
            if self.fail_create {
                return Err(CatalogError::Status {
                    operation: "create playlist",
                    status: 403,
                    body: "forbidden".to_string(),
                });
            }
            assert_eq!(owner_id, "user1");
            self.state.lock().await.created.push((
                name.to_string(),
                description.to_string(),
                public,
            ));
            Ok(CreatedPlaylist {
                id: "pl1".to_string(),
                url: "https://open.spotify.com/playlist/pl1".to_string(),
            })
        }

        async fn search(&self, _token: &str, query: &str, _limit: u32) -> CatalogResult<Vec<TrackHit>> {
            self.state.lock().await.searches.push(query.to_string());
            if query.contains("missing") {
                return Ok(vec![]);
            }
            Ok(vec![TrackHit {
                uri: format!("spotify:track:{}", query),
            }])
        }

        async fn append_tracks(
            &self,
            _token: &str,
            playlist_id: &str,
            uris: &[String],
        ) -> CatalogResult<()> {
            assert_eq!(playlist_id, "pl1");
            assert!(uris.len() <= MAX_TRACKS_PER_REQUEST);
            let mut state = self.state.lock().await;
            if let Some(limit) = self.fail_append_after {
                if state.appends.len() >= limit {
                    return Err(CatalogError::Status {
                        operation: "append tracks",
                        status: 500,
                        body: String::new(),
                    });
                }
            }
            state.appends.push(uris.to_vec());
            Ok(())
        }
    }

    fn valid_session() -> AuthSession {
        AuthSession::new(Some(Credential {
            token: "tok".to_string(),
            expires_at_epoch_ms: 10_000,
        }))
    }

    fn fixed_clock() -> i64 {
        5_000
    }

    fn assembler(catalog: MockCatalog) -> PlaylistAssembler<MockCatalog> {
        PlaylistAssembler::new(catalog).with_clock(fixed_clock)
    }

    #[test]
    fn test_dedupe_preserves_first_seen_order() {
        assert_eq!(dedupe_titles(&["A", "B", "A"]), vec!["A", "B"]);
        assert_eq!(dedupe_titles(&["A", " ", "", "a"]), vec!["A", "a"]);
    }

    #[tokio::test]
    async fn test_expired_credential_makes_no_calls() {
        let catalog = MockCatalog::default();
        let auth = AuthSession::new(Some(Credential {
            token: "tok".to_string(),
            expires_at_epoch_ms: 5_000,
        }));

        let err = assembler(catalog.clone())
            .assemble(&["Queen - Innuendo"], "Mix", &auth)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AssemblyError::Credential(CredentialProblem::Expired { .. })
        ));
        let state = catalog.state().await;
        assert_eq!(state.profile_calls, 0);
        assert!(state.searches.is_empty());
    }

    #[tokio::test]
    async fn test_creates_private_playlist_with_description() {
        let catalog = MockCatalog::default();

        assembler(catalog.clone())
            .with_description("from the mix")
            .assemble(&["Queen - Innuendo"], "Road Trip", &valid_session())
            .await
            .unwrap();

        let state = catalog.state().await;
        assert_eq!(
            state.created,
            vec![("Road Trip".to_string(), "from the mix".to_string(), false)]
        );
    }

    #[tokio::test]
    async fn test_report_counts_unmatched_titles() {
        let catalog = MockCatalog::default();
        let titles = [
            "Queen - Innuendo (Official Video)",
            "missing track",
            "Queen - Innuendo (Official Video)",
        ];

        let report = assembler(catalog.clone())
            .assemble(&titles, "Mix", &valid_session())
            .await
            .unwrap();

        assert_eq!(report.requested_count, 2);
        assert_eq!(report.matched_count, 1);
        assert_eq!(report.unmatched_titles, vec!["missing track"]);
        let state = catalog.state().await;
        assert_eq!(
            state.appends,
            vec![vec!["spotify:track:track:Innuendo artist:Queen".to_string()]]
        );
    }

    #[tokio::test]
    async fn test_zero_matches_still_succeeds() {
        let catalog = MockCatalog::default();

        let report = assembler(catalog.clone())
            .assemble(&["missing one", "missing two"], "Mix", &valid_session())
            .await
            .unwrap();

        assert_eq!(report.matched_count, 0);
        assert_eq!(report.requested_count, 2);
        assert!(catalog.state().await.appends.is_empty());
    }

    #[tokio::test]
    async fn test_batches_of_one_hundred() {
        let catalog = MockCatalog::default();
        let titles: Vec<String> = (0..150).map(|i| format!("Track {}", i)).collect();

        let report = assembler(catalog.clone())
            .assemble(&titles, "Big", &valid_session())
            .await
            .unwrap();

        assert_eq!(report.matched_count, 150);
        let state = catalog.state().await;
        assert_eq!(state.appends.len(), 2);
        assert_eq!(state.appends[0].len(), 100);
        assert_eq!(state.appends[1].len(), 50);
        assert_eq!(state.appends[0][0], "spotify:track:Track 0");
        assert_eq!(state.appends[1][49], "spotify:track:Track 149");
    }

    #[tokio::test]
    async fn test_failed_batch_stops_and_reports_progress() {
        let catalog = MockCatalog {
            fail_append_after: Some(1),
            ..MockCatalog::default()
        };
        let titles: Vec<String> = (0..250).map(|i| format!("Track {}", i)).collect();

        let err = assembler(catalog.clone())
            .assemble(&titles, "Big", &valid_session())
            .await
            .unwrap_err();

        match err {
            AssemblyError::Remote {
                operation: RemoteOperation::AppendTracks { appended, .. },
                ..
            } => assert_eq!(appended, 100),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(catalog.state().await.appends.len(), 1);
    }

    #[tokio::test]
    async fn test_create_failure_aborts_before_search() {
        let catalog = MockCatalog {
            fail_create: true,
            ..MockCatalog::default()
        };

        let err = assembler(catalog.clone())
            .assemble(&["Queen - Innuendo"], "Mix", &valid_session())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AssemblyError::Remote {
                operation: RemoteOperation::CreatePlaylist,
                ..
            }
        ));
        assert!(catalog.state().await.searches.is_empty());
    }

    #[tokio::test]
    async fn test_title_that_normalizes_to_nothing_uses_raw_text() {
        let catalog = MockCatalog::default();

        let report = assembler(catalog.clone())
            .assemble(&["(Official Video)"], "Mix", &valid_session())
            .await
            .unwrap();

        assert_eq!(report.matched_count, 1);
        assert_eq!(catalog.state().await.searches, vec!["(Official Video)"]);
    }
}
