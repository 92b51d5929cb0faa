use crate::domain::model::{MatchResult, ParsedQuery, TrackHit};
use crate::domain::ports::{CatalogClient, CatalogResult, SearchCapability};
use crate::utils::error::CatalogError;
use async_trait::async_trait;

/// Result of one search call. A failed call is recovered here and never
/// leaves the matcher.
#[derive(Debug)]
pub enum SearchOutcome {
    Hit(String),
    Empty,
    Failed(CatalogError),
}

impl SearchOutcome {
    fn from_response(response: CatalogResult<Vec<TrackHit>>) -> Self {
        match response {
            Ok(hits) => match hits.into_iter().next() {
                Some(hit) => SearchOutcome::Hit(hit.uri),
                None => SearchOutcome::Empty,
            },
            Err(e) => SearchOutcome::Failed(e),
        }
    }
}

/// Catalog search bound to one access token.
pub struct AuthorizedSearch<'a, C: CatalogClient + ?Sized> {
    catalog: &'a C,
    token: &'a str,
}

impl<'a, C: CatalogClient + ?Sized> AuthorizedSearch<'a, C> {
    pub fn new(catalog: &'a C, token: &'a str) -> Self {
        Self { catalog, token }
    }
}

#[async_trait]
impl<'a, C: CatalogClient + ?Sized> SearchCapability for AuthorizedSearch<'a, C> {
    async fn search(&self, query: &str, limit: u32) -> CatalogResult<Vec<TrackHit>> {
        self.catalog.search(self.token, query, limit).await
    }
}

/// `track:<title> artist:<artist>`, the catalog's field-filter syntax.
pub fn structured_query(query: &ParsedQuery) -> Option<String> {
    query
        .artist
        .as_deref()
        .filter(|artist| !artist.trim().is_empty())
        .map(|artist| format!("track:{} artist:{}", query.title, artist))
}

pub struct TrackMatcher<'a, S: SearchCapability + ?Sized> {
    search: &'a S,
}

impl<'a, S: SearchCapability + ?Sized> TrackMatcher<'a, S> {
    pub fn new(search: &'a S) -> Self {
        Self { search }
    }

    async fn attempt(&self, query: &str) -> SearchOutcome {
        let outcome = SearchOutcome::from_response(self.search.search(query, 1).await);
        match &outcome {
            SearchOutcome::Hit(uri) => tracing::debug!("'{}' -> {}", query, uri),
            SearchOutcome::Empty => tracing::debug!("'{}' -> no results", query),
            SearchOutcome::Failed(e) => {
                tracing::warn!("Search for '{}' failed, treating as no results: {}", query, e)
            }
        }
        outcome
    }

    /// Structured search first, then one unstructured retry with `fallback_text`.
    pub async fn match_track(&self, query: &ParsedQuery, fallback_text: &str) -> MatchResult {
        let structured = structured_query(query);
        let first = structured.as_deref().unwrap_or(fallback_text);

        if let SearchOutcome::Hit(uri) = self.attempt(first).await {
            return MatchResult::Matched(uri);
        }

        if structured.is_some() {
            if let SearchOutcome::Hit(uri) = self.attempt(fallback_text).await {
                return MatchResult::Matched(uri);
            }
        }

        MatchResult::NotFound
    }
}
