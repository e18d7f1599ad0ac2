//! Display elements produced by the catalog renderer.
//!
//! Text that originates from the registry enters the display tree only as
//! [`SafeText`], which can only be built by escaping raw input.

use std::fmt;

/// Placeholder text shown when the catalog is empty.
pub const NO_RESULTS_TEXT: &str = "No models found.";
/// Placeholder text shown when the catalog could not be loaded.
pub const LOAD_ERROR_TEXT: &str = "Failed to load models.";
/// Prefix drawn before the average rating.
pub const RATING_PREFIX: &str = "\u{2b50}";

/// HTML-escaped text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeText(String);

impl SafeText {
    /// Escape `raw` for insertion into HTML text or quoted attribute values.
    ///
    /// # Examples
    /// ```
    /// use registry_client::domain::SafeText;
    ///
    /// let text = SafeText::escape("<b>\"bold\" & 'brave'</b>");
    /// assert_eq!(
    ///     text.as_str(),
    ///     "&lt;b&gt;&quot;bold&quot; &amp; &#39;brave&#39;&lt;/b&gt;"
    /// );
    /// ```
    pub fn escape(raw: &str) -> Self {
        let mut escaped = String::with_capacity(raw.len());
        for ch in raw.chars() {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#39;"),
                other => escaped.push(other),
            }
        }
        Self(escaped)
    }

    /// Escaped text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SafeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Summary card for one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCard {
    /// Entry name.
    pub name: SafeText,
    /// Entry category.
    pub category: SafeText,
    /// Entry description.
    pub description: SafeText,
    /// Average rating, interpolated as received.
    pub rating: SafeText,
}

impl CatalogCard {
    /// Rating line as displayed, star prefix included.
    pub fn rating_label(&self) -> String {
        format!("{RATING_PREFIX} {}", self.rating)
    }

    /// Markup for this card.
    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"model-card\">\n  <h3>{name}</h3>\n  \
             <p class=\"category\">{category}</p>\n  \
             <p class=\"description\">{description}</p>\n  \
             <p class=\"rating\">{rating}</p>\n</div>",
            name = self.name,
            category = self.category,
            description = self.description,
            rating = self.rating_label(),
        )
    }
}

/// Single-message placeholders replacing the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// The registry returned an empty catalog.
    NoResults,
    /// The catalog could not be loaded.
    LoadError,
}

impl Placeholder {
    /// Text shown to the user.
    pub const fn text(self) -> &'static str {
        match self {
            Self::NoResults => NO_RESULTS_TEXT,
            Self::LoadError => LOAD_ERROR_TEXT,
        }
    }

    /// Markup for this placeholder.
    pub fn to_html(self) -> String {
        let class = match self {
            Self::NoResults => "no-results",
            Self::LoadError => "load-error",
        };
        format!("<p class=\"{class}\">{}</p>", self.text())
    }
}

/// One element of the catalog surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayElement {
    /// Entry card.
    Card(CatalogCard),
    /// Empty or error placeholder.
    Placeholder(Placeholder),
}

impl DisplayElement {
    /// Markup for this element.
    pub fn to_html(&self) -> String {
        match self {
            Self::Card(card) => card.to_html(),
            Self::Placeholder(placeholder) => placeholder.to_html(),
        }
    }

    /// The card, when this element is one.
    pub const fn as_card(&self) -> Option<&CatalogCard> {
        match self {
            Self::Card(card) => Some(card),
            Self::Placeholder(_) => None,
        }
    }
}
