use crate::domain::model::Credential;
use crate::utils::error::{AppError, AssemblyError, CredentialProblem, Result};
use url::Url;

pub const OAUTH_SCOPES: &str = "playlist-modify-public playlist-modify-private user-read-private";

#[derive(Debug, Clone)]
pub struct OAuthSettings {
    pub accounts_base_url: String,
    pub client_id: String,
    pub redirect_uri: String,
}

/// Holder of the one stored access token.
#[derive(Debug, Clone, Default)]
pub struct AuthSession {
    credential: Option<Credential>,
}

impl AuthSession {
    pub fn new(credential: Option<Credential>) -> Self {
        Self { credential }
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// Credential usable at `now_epoch_ms`.
    pub fn valid_credential(
        &self,
        now_epoch_ms: i64,
    ) -> std::result::Result<&Credential, AssemblyError> {
        let credential = self
            .credential
            .as_ref()
            .ok_or(AssemblyError::Credential(CredentialProblem::Missing))?;

        if !credential.is_valid_at(now_epoch_ms) {
            return Err(AssemblyError::Credential(CredentialProblem::Expired {
                expired_at_epoch_ms: credential.expires_at_epoch_ms,
            }));
        }
        Ok(credential)
    }

    /// Implicit-grant authorize URL the user opens in a browser.
    pub fn authorize_url(settings: &OAuthSettings) -> Result<Url> {
        let base = format!("{}/authorize", settings.accounts_base_url.trim_end_matches('/'));
        Url::parse_with_params(
            &base,
            &[
                ("client_id", settings.client_id.as_str()),
                ("response_type", "token"),
                ("redirect_uri", settings.redirect_uri.as_str()),
                ("scope", OAUTH_SCOPES),
            ],
        )
        .map_err(|e| AppError::ConfigError {
            message: format!("invalid accounts URL '{}': {}", base, e),
        })
    }

    /// Reads `access_token` and `expires_in` from the redirect URL fragment.
    pub fn complete_login(redirect_url: &str, now_epoch_ms: i64) -> Result<Self> {
        let url = Url::parse(redirect_url.trim()).map_err(|e| AppError::Login {
            message: format!("not a URL: {}", e),
        })?;

        let fragment = url.fragment().unwrap_or_default();
        let mut access_token = None;
        let mut expires_in = None;
        let mut error = None;
        for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
            match key.as_ref() {
                "access_token" => access_token = Some(value.into_owned()),
                "expires_in" => expires_in = Some(value.into_owned()),
                "error" => error = Some(value.into_owned()),
                _ => {}
            }
        }
        // denied logins come back as ?error=access_denied
        if error.is_none() {
            error = url
                .query_pairs()
                .find(|(key, _)| key == "error")
                .map(|(_, value)| value.into_owned());
        }

        let token = match (access_token, error) {
            (Some(token), _) if !token.is_empty() => token,
            (_, Some(error)) => {
                return Err(AppError::Login {
                    message: format!("authorization server returned '{}'", error),
                })
            }
            _ => {
                return Err(AppError::Login {
                    message: "No access token received".to_string(),
                })
            }
        };

        let raw_expiry = expires_in.unwrap_or_default();
        let invalid_expiry = || AppError::Login {
            message: format!("invalid expires_in '{}'", raw_expiry),
        };
        let expires_in: i64 = raw_expiry.parse().map_err(|_| invalid_expiry())?;
        if expires_in <= 0 {
            return Err(invalid_expiry());
        }
        let expires_at_epoch_ms = expires_in
            .checked_mul(1000)
            .and_then(|lifetime_ms| now_epoch_ms.checked_add(lifetime_ms))
            .ok_or_else(invalid_expiry)?;

        Ok(Self::new(Some(Credential {
            token,
            expires_at_epoch_ms,
        })))
    }
}
