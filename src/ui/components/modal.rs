//! Deep-link modal shown after a confirmed details request.

use askama::Template;

use crate::ui::helpers::render_template;
use crate::ui::viewmodel::DeepLinkModalView;

#[derive(Template)]
#[template(path = "partials/deep_link_modal.html", escape = "none")]
struct DeepLinkModalTemplate<'a> {
    modal: &'a DeepLinkModalView,
}

#[must_use]
pub fn render_deep_link_modal(modal: &DeepLinkModalView) -> String {
    render_template(&DeepLinkModalTemplate { modal })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_link_and_start_command() {
        let html = render_deep_link_modal(&DeepLinkModalView {
            url: "https://t.me/bot?start=listing_4".to_string(),
            command: "/start listing_4".to_string(),
        });
        assert!(html.contains("<code>/start listing_4</code>"));
        assert!(html.contains("href=\"https://t.me/bot?start=listing_4\""));
        assert!(html.contains("data-action=\"close-deep-link\""));
    }
}
