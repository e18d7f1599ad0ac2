//! Driven ports for the user-facing side of a page: alerts, navigation, and
//! the catalog display surface.

use crate::domain::DisplayElement;

/// Shows a short message to the user.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Present `message` verbatim.
    fn alert(&self, message: &str);
}

/// Moves the user to another page.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Navigate to `path`.
    fn navigate(&self, path: &str);
}

/// Display target for catalog content.
///
/// Surfaces only accept [`DisplayElement`] values, whose text has already
/// been escaped.
#[cfg_attr(test, mockall::automock)]
pub trait CatalogSurface: Send + Sync {
    /// Remove every element currently shown.
    fn clear(&self);

    /// Append `element` after the elements already shown.
    fn append(&self, element: DisplayElement);
}
