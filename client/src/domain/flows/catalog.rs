//! Catalog flow: page load to rendered grid.

use tracing::info;

use super::in_flight::InFlight;
use crate::domain::{
    CatalogRenderer, RequestGateway, SessionContext, SessionStore, flatten_outcome,
};

/// Build the session context for a freshly loaded page.
///
/// This is the only read path for the stored session; the resulting context
/// is passed explicitly to whatever needs authenticated state.
pub fn bootstrap_session(store: &SessionStore) -> SessionContext {
    SessionContext::from_loaded(store.load())
}

/// What one page load did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOutcome {
    /// Cards were drawn, one per entry.
    Rendered {
        /// Number of cards drawn.
        cards: usize,
    },
    /// The catalog was empty; the "no results" placeholder was drawn.
    Empty,
    /// The catalog could not be loaded; the error placeholder was drawn.
    Failed,
    /// A previous load is still pending; nothing was done.
    Busy,
}

/// Orchestrates the catalog load.
pub struct CatalogFlow {
    gateway: RequestGateway,
    renderer: CatalogRenderer,
    in_flight: InFlight,
}

impl CatalogFlow {
    /// Create a flow fetching through `gateway` and drawing with `renderer`.
    pub fn new(gateway: RequestGateway, renderer: CatalogRenderer) -> Self {
        Self {
            gateway,
            renderer,
            in_flight: InFlight::default(),
        }
    }

    /// Whether a load is pending.
    pub fn is_pending(&self) -> bool {
        self.in_flight.is_pending()
    }

    /// Fetch the catalog for `context` and render the result.
    pub async fn load(&self, context: &SessionContext) -> CatalogOutcome {
        let Some(_guard) = self.in_flight.try_begin() else {
            info!("catalog load ignored while a previous one is pending");
            return CatalogOutcome::Busy;
        };

        match flatten_outcome(self.gateway.fetch_models(context).await) {
            Ok(entries) => {
                self.renderer.render(&entries);
                if entries.is_empty() {
                    CatalogOutcome::Empty
                } else {
                    CatalogOutcome::Rendered {
                        cards: entries.len(),
                    }
                }
            }
            Err(error) => {
                self.renderer.render_error(&error);
                CatalogOutcome::Failed
            }
        }
    }
}
