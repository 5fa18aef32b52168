use adzuna_env::EnvLayer;
use std::fmt;

pub const APP_ID_ENV: &str = "ADZUNA_APP_ID";
pub const APP_KEY_ENV: &str = "ADZUNA_APP_KEY";

/// Adzuna application credentials.
///
/// Loaded once at startup and handed to [`crate::JobToolSource::new`]; empty values are a valid
/// state that every upstream-backed operation rejects per request.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    app_id: String,
    app_key: String,
}

impl Credentials {
    #[must_use]
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: app_key.into(),
        }
    }

    /// Read `ADZUNA_APP_ID` / `ADZUNA_APP_KEY`, process environment first, env file second.
    #[must_use]
    pub fn from_env(env: &EnvLayer) -> Self {
        Self::new(env.get_or_empty(APP_ID_ENV), env.get_or_empty(APP_KEY_ENV))
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.app_id.is_empty() && !self.app_key.is_empty()
    }

    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    #[must_use]
    pub fn app_key(&self) -> &str {
        &self.app_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.app_key.is_empty() { "" } else { "***" };
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("app_key", &key)
            .finish()
    }
}
