//! Top-level page rendering.
//!
//! ```text
//! MapSession → compute_page → PageViewModel → render_page → HTML document
//! ```

use askama::Template;

use crate::app::MapSession;
use crate::ui::components;
use crate::ui::helpers::render_template;
use crate::ui::theme::{Theme, ThemeColors};
use crate::ui::viewmodel::PageViewModel;

const PAGE_TITLE: &str = "Ijara e'lonlari xaritasi";

/// Document shell; the stylesheet partial reads `colors`.
#[derive(Template)]
#[template(path = "page.html", escape = "none")]
struct PageTemplate<'a> {
    title: &'a str,
    colors: &'a ThemeColors,
    status_bar: String,
    map: String,
    modal: Option<String>,
}

/// Renders the session's current state as a complete HTML document.
#[must_use]
pub fn render(session: &MapSession, theme: &Theme) -> String {
    render_page(&session.compute_page(), theme)
}

/// Renders a page view model as a complete HTML document.
///
/// Text is inserted as given; listing content is not escaped.
#[must_use]
pub fn render_page(vm: &PageViewModel, theme: &Theme) -> String {
    render_template(&PageTemplate {
        title: PAGE_TITLE,
        colors: &theme.colors,
        status_bar: components::render_status_bar(&vm.stats, vm.loading_visible, vm.error_visible),
        map: components::render_map(vm),
        modal: vm.deep_link_modal.as_ref().map(components::render_deep_link_modal),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{HostCapabilities, MapSession};
    use crate::Config;

    #[test]
    fn fresh_session_shows_loading_and_zero_stats() {
        let session = MapSession::new(&Config::default(), HostCapabilities::default());
        let html = render(&session, &Theme::default());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Jami 0 ta e'lon"));
        assert!(html.contains("class=\"loading\""));
        assert!(html.contains("class=\"error hidden\""));
        assert!(html.contains("data-cluster-radius=\"50\""));
        assert!(!html.contains("telegram-modal\""));
    }

    #[test]
    fn theme_colours_reach_stylesheet() {
        let mut theme = Theme::default();
        theme.colors.marker_bg = "#123456".to_string();
        let session = MapSession::new(&Config::default(), HostCapabilities::default());
        assert!(render(&session, &theme).contains("background:#123456"));
    }

    #[test]
    fn deep_link_modal_rendered_only_when_shown() {
        let mut session = MapSession::new(&Config::default(), HostCapabilities::default());
        session.show_deep_link(5);
        let html = render(&session, &Theme::default());
        assert!(html.contains("class=\"telegram-modal\""));
        assert!(html.contains("listing_5"));
        assert!(html.trim_end().ends_with("</html>"));
    }
}
