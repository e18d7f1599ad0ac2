//! Login flow: form submit to stored session and catalog navigation.

use std::sync::Arc;

use tracing::{info, warn};

use super::in_flight::InFlight;
use crate::domain::ports::{Navigator, Notifier};
use crate::domain::{Credentials, RequestError, RequestGateway, SessionStore, flatten_outcome};

/// Alert shown when no usable response arrived.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";
/// Alert shown when the session could not be persisted.
pub const SESSION_SAVE_ERROR_MESSAGE: &str = "Could not save your session. Please try again.";
/// Default catalog page path navigated to after login.
pub const DEFAULT_CATALOG_PAGE: &str = "/models.html";

/// Raw values read from the login form fields.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Email field value.
    pub email: String,
    /// Password field value.
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// What one submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Session saved and navigation triggered.
    SignedIn,
    /// Form values failed validation; no request was sent.
    InvalidInput {
        /// Validation message shown to the user.
        message: String,
    },
    /// The registry refused the login.
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server message shown to the user.
        message: String,
    },
    /// No usable response, or the session could not be saved.
    Failed,
    /// A previous submit is still pending; nothing was done.
    Busy,
}

/// Orchestrates the login submit.
pub struct LoginFlow {
    gateway: RequestGateway,
    store: SessionStore,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    catalog_page: String,
    in_flight: InFlight,
}

impl LoginFlow {
    /// Create a flow navigating to [`DEFAULT_CATALOG_PAGE`] on success.
    pub fn new(
        gateway: RequestGateway,
        store: SessionStore,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            gateway,
            store,
            notifier,
            navigator,
            catalog_page: DEFAULT_CATALOG_PAGE.to_owned(),
            in_flight: InFlight::default(),
        }
    }

    /// Navigate to `path` instead of the default catalog page.
    #[must_use]
    pub fn with_catalog_page(mut self, path: impl Into<String>) -> Self {
        self.catalog_page = path.into();
        self
    }

    /// Whether a submit is pending, i.e. the submit control should be disabled.
    pub fn is_pending(&self) -> bool {
        self.in_flight.is_pending()
    }

    /// Handle one submit of `form`.
    pub async fn submit(&self, form: &LoginForm) -> LoginOutcome {
        let Some(_guard) = self.in_flight.try_begin() else {
            info!("login submit ignored while a previous one is pending");
            return LoginOutcome::Busy;
        };

        let credentials = match Credentials::from_form(&form.email, &form.password) {
            Ok(credentials) => credentials,
            Err(error) => {
                let message = error.to_string();
                self.notifier.alert(&message);
                return LoginOutcome::InvalidInput { message };
            }
        };

        let result = self.gateway.login(&credentials).await;
        drop(credentials);

        let session = match flatten_outcome(result) {
            Ok(session) => session,
            Err(RequestError::Application { status, message }) => {
                info!(status, "login rejected by registry");
                self.notifier.alert(&message);
                return LoginOutcome::Rejected { status, message };
            }
            Err(error) => {
                warn!(error = %error, "login failed");
                self.notifier.alert(NETWORK_ERROR_MESSAGE);
                return LoginOutcome::Failed;
            }
        };

        if let Err(error) = self.store.save(&session) {
            warn!(error = %error, "could not persist session");
            self.notifier.alert(SESSION_SAVE_ERROR_MESSAGE);
            return LoginOutcome::Failed;
        }

        info!(page = %self.catalog_page, "login succeeded");
        self.navigator.navigate(&self.catalog_page);
        LoginOutcome::SignedIn
    }
}
