//! Display adapters: the HTML catalog surface and terminal alerts and
//! navigation.

mod html_surface;
mod terminal;

pub use html_surface::HtmlDocumentSurface;
pub use terminal::{RecordingNavigator, StderrNotifier};
