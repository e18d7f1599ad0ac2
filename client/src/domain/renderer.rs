//! Catalog renderer.
//!
//! Every render starts by clearing the surface, so what is shown always equals
//! the most recent input.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::RequestError;
use crate::domain::display::{CatalogCard, DisplayElement, Placeholder, SafeText};
use crate::domain::ports::CatalogSurface;
use crate::domain::CatalogEntry;

/// Draws catalog entries, or a placeholder, into a [`CatalogSurface`].
#[derive(Clone)]
pub struct CatalogRenderer {
    surface: Arc<dyn CatalogSurface>,
}

impl CatalogRenderer {
    /// Create a renderer drawing into `surface`.
    pub fn new(surface: Arc<dyn CatalogSurface>) -> Self {
        Self { surface }
    }

    /// Replace the surface content with one card per entry, in order.
    ///
    /// An empty slice shows the "no results" placeholder instead.
    pub fn render(&self, entries: &[CatalogEntry]) {
        self.surface.clear();

        if entries.is_empty() {
            self.surface
                .append(DisplayElement::Placeholder(Placeholder::NoResults));
            return;
        }

        for entry in entries {
            self.surface.append(DisplayElement::Card(card_for(entry)));
        }
        debug!(cards = entries.len(), "catalog rendered");
    }

    /// Replace the surface content with the generic error placeholder.
    ///
    /// The reason is logged and never displayed.
    pub fn render_error(&self, reason: &RequestError) {
        warn!(error = %reason, "catalog failed to load");
        self.surface.clear();
        self.surface
            .append(DisplayElement::Placeholder(Placeholder::LoadError));
    }
}

fn card_for(entry: &CatalogEntry) -> CatalogCard {
    CatalogCard {
        name: SafeText::escape(&entry.name),
        category: SafeText::escape(&entry.category),
        description: SafeText::escape(&entry.description),
        rating: SafeText::escape(&entry.avg_rating.to_string()),
    }
}
