//! In-memory catalog surface rendered to an HTML document.

use std::sync::{Mutex, PoisonError};

use crate::domain::ports::CatalogSurface;
use crate::domain::{CatalogCard, DisplayElement};

const DOCUMENT_HEAD: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
<meta charset=\"utf-8\">\n<title>Model Catalog</title>\n</head>\n<body>\n\
<h1>Model Catalog</h1>\n<div id=\"models-grid\" class=\"models-grid\">\n";
const DOCUMENT_TAIL: &str = "</div>\n</body>\n</html>\n";

/// Catalog surface holding the current elements of the models grid.
#[derive(Debug, Default)]
pub struct HtmlDocumentSurface {
    elements: Mutex<Vec<DisplayElement>>,
}

impl HtmlDocumentSurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the elements currently shown.
    pub fn elements(&self) -> Vec<DisplayElement> {
        self.lock().clone()
    }

    /// Cards currently shown, in display order.
    pub fn cards(&self) -> Vec<CatalogCard> {
        self.lock()
            .iter()
            .filter_map(DisplayElement::as_card)
            .cloned()
            .collect()
    }

    /// Complete HTML page with the grid content.
    pub fn to_html_document(&self) -> String {
        let mut document = String::from(DOCUMENT_HEAD);
        for element in self.lock().iter() {
            document.push_str(&element.to_html());
            document.push('\n');
        }
        document.push_str(DOCUMENT_TAIL);
        document
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DisplayElement>> {
        self.elements.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CatalogSurface for HtmlDocumentSurface {
    fn clear(&self) {
        self.lock().clear();
    }

    fn append(&self, element: DisplayElement) {
        self.lock().push(element);
    }
}
