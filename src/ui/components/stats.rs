//! Listing counter and the loading/error indicators.

use askama::Template;

use crate::ui::helpers::render_template;
use crate::ui::viewmodel::StatsView;

/// Hidden indicators stay in the markup with the `hidden` class so the host
/// can toggle them without re-rendering.
#[derive(Template)]
#[template(path = "partials/status_bar.html", escape = "none")]
struct StatusBarTemplate<'a> {
    stats: &'a StatsView,
    loading: bool,
    error: bool,
}

#[must_use]
pub fn render_status_bar(stats: &StatsView, loading: bool, error: bool) -> String {
    render_template(&StatusBarTemplate {
        stats,
        loading,
        error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_visible_indicators_lose_hidden_class() {
        let stats = StatsView {
            count: 3,
            text: "Jami 3 ta e'lon".to_string(),
        };
        let html = render_status_bar(&stats, false, true);
        assert!(html.contains("data-count=\"3\">Jami 3 ta e'lon</div>"));
        assert!(html.contains("class=\"loading hidden\""));
        assert!(html.contains("class=\"error\""));
    }
}
