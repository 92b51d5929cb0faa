pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::{spotify::SpotifyCatalog, storage::FileCredentialStore};
pub use crate::core::{assembler::PlaylistAssembler, auth::AuthSession};
pub use crate::domain::model::{Credential, MatchResult, ParsedQuery, PlaylistReport};
pub use crate::utils::error::{AppError, AssemblyError, CatalogError, Result};
