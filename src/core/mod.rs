pub mod assembler;
pub mod auth;
pub mod matcher;
pub mod normalize;
pub mod parser;
pub mod preview;

pub use crate::domain::model::{
    Credential, MatchResult, ParsedQuery, PlaylistReport, RawTitle, TrackHit,
};
pub use crate::domain::ports::{CatalogClient, ConfigProvider, CredentialStore, SearchCapability};
pub use crate::utils::error::Result;
