//! Secure credential handling for the model and search APIs.
//!
//! Credentials are loaded once at process start into [`Credentials`] and
//! handed to the components that need them. Components never read the
//! environment on their own.
//!
//! ## Usage
//!
//! ```ignore
//! let credentials = Credentials::from_env();
//!
//! // Explicit exposure at the point of use
//! if let Some(key) = credentials.search() {
//!     request.header("Ocp-Apim-Subscription-Key", key.expose());
//! }
//! ```

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Environment variable holding the model API key.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable holding the search API key.
pub const SEARCH_API_KEY_ENV: &str = "BING_API_KEY";

/// Where a credential was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Loaded from environment variable
    Environment,
    /// Provided programmatically
    Programmatic,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Environment => write!(f, "environment"),
            CredentialSource::Programmatic => write!(f, "programmatic"),
        }
    }
}

/// A securely-stored API credential.
///
/// `Debug` and `Display` show `[REDACTED]`; the value is only reachable
/// through [`ApiCredential::expose`].
pub struct ApiCredential {
    value: SecretString,
    source: CredentialSource,
    name: &'static str,
}

impl ApiCredential {
    /// Create a new credential from a string value.
    pub fn new(value: impl Into<String>, source: CredentialSource, name: &'static str) -> Self {
        Self {
            value: SecretString::from(value.into()),
            source,
            name,
        }
    }

    /// Load a credential from an environment variable.
    ///
    /// The value is trimmed; an unset or blank variable means "not
    /// configured" and yields `None`.
    pub fn from_env(env_var: &str, name: &'static str) -> Option<Self> {
        let value = std::env::var(env_var).ok()?;
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        Some(Self::new(value, CredentialSource::Environment, name))
    }

    /// Expose the credential value for use in API calls.
    ///
    /// Only call this where the value is actually sent (e.g. setting an
    /// HTTP header). Never store the exposed value.
    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.value.expose_secret().is_empty()
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredential")
            .field("value", &"[REDACTED]")
            .field("source", &self.source)
            .field("name", &self.name)
            .finish()
    }
}

impl fmt::Display for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {} [REDACTED]", self.name, self.source)
    }
}

/// The process-wide set of optional credentials.
///
/// Either credential may be absent: a missing model key routes evaluation
/// to the keyword fallback, a missing search key disables auto-search.
#[derive(Debug, Default)]
pub struct Credentials {
    model: Option<ApiCredential>,
    search: Option<ApiCredential>,
}

impl Credentials {
    pub fn new(model: Option<ApiCredential>, search: Option<ApiCredential>) -> Self {
        Self { model, search }
    }

    /// Read `OPENAI_API_KEY` and `BING_API_KEY`.
    pub fn from_env() -> Self {
        Self {
            model: ApiCredential::from_env(OPENAI_API_KEY_ENV, "OpenAI API key"),
            search: ApiCredential::from_env(SEARCH_API_KEY_ENV, "Bing Search API key"),
        }
    }

    pub fn model(&self) -> Option<&ApiCredential> {
        self.model.as_ref()
    }

    pub fn search(&self) -> Option<&ApiCredential> {
        self.search.as_ref()
    }

    /// Split into the model and search credentials.
    pub fn into_parts(self) -> (Option<ApiCredential>, Option<ApiCredential>) {
        (self.model, self.search)
    }
}
