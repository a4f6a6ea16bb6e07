//! Listing popup: title, price, collapsible description, photo strip and the
//! call/save/details buttons.
//!
//! Controls carry `data-action` and `data-listing-id` attributes; the host
//! turns clicks on them into [`Event`](crate::app::Event)s. The photo strip is
//! marked with `data-strip-id` so the host knows where to attach a slider.

use askama::Template;

use crate::infrastructure::api::PHOTO_LOAD_FALLBACK;
use crate::ui::helpers::render_template;
use crate::ui::viewmodel::PopupView;

/// Popup size limits in pixels, `(min, max)` width.
pub const POPUP_WIDTH: (u32, u32) = (300, 400);

#[derive(Template)]
#[template(path = "partials/popup.html", escape = "none")]
struct PopupTemplate<'a> {
    popup: &'a PopupView,
    is_open: bool,
    min_width: u32,
    max_width: u32,
    fallback_src: &'static str,
    /// One entry per indicator dot; the first is lit.
    indicator_indices: Vec<usize>,
    show_meta: bool,
    distance_text: Option<String>,
}

/// Renders one popup to a string.
#[must_use]
pub fn render_popup(popup: &PopupView, is_open: bool) -> String {
    let photos = popup.gallery.as_ref().map_or(0, |g| g.photo_urls.len());

    render_template(&PopupTemplate {
        popup,
        is_open,
        min_width: POPUP_WIDTH.0,
        max_width: POPUP_WIDTH.1,
        fallback_src: PHOTO_LOAD_FALLBACK,
        indicator_indices: (0..photos).collect(),
        show_meta: popup.owner_name.is_some() || popup.distance_km.is_some(),
        distance_text: popup.distance_km.map(|km| format!("{km:.1}")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::GalleryView;

    fn popup() -> PopupView {
        PopupView {
            listing_id: 8,
            title: "Flat".to_string(),
            price_text: "1\u{a0}000 so'm/oy".to_string(),
            description: "Near metro".to_string(),
            description_expanded: false,
            toggle_label: "Batafsil…",
            gallery: Some(GalleryView {
                photo_urls: vec!["u1".to_string(), "u2".to_string()],
                count_text: "2 ta rasm".to_string(),
            }),
            phone_display: "No'malum".to_string(),
            call_uri: None,
            owner_name: None,
            distance_km: Some(1.26),
        }
    }

    #[test]
    fn gallery_has_one_indicator_per_photo() {
        let html = render_popup(&popup(), false);
        assert_eq!(html.matches("<img ").count(), 2);
        assert_eq!(html.matches("class=\"indicator").count(), 2);
        assert_eq!(html.matches("indicator active").count(), 1);
        assert!(html.contains("data-index=\"1\""));
        assert!(html.contains("data-strip-id=\"8\""));
        assert!(html.contains("2 ta rasm"));
    }

    #[test]
    fn call_button_only_with_phone() {
        let without = render_popup(&popup(), false);
        assert!(!without.contains("call-btn"));
        assert!(!without.contains(" data-open"));

        let mut with_phone = popup();
        with_phone.call_uri = Some("tel:+998901112233".to_string());
        let html = render_popup(&with_phone, true);
        assert!(html.contains("href=\"tel:+998901112233\""));
        assert!(html.contains(" data-open"));
    }

    #[test]
    fn no_gallery_without_photos() {
        let mut bare = popup();
        bare.gallery = None;
        let html = render_popup(&bare, false);
        assert!(!html.contains("photos-gallery"));
        assert!(!html.contains("class=\"indicator"));
        assert!(html.contains("<span class=\"distance\">📍 1.3 km</span>"));
        assert!(!html.contains("class=\"owner\""));
    }

    #[test]
    fn expanded_description_gets_class() {
        let mut open = popup();
        open.description_expanded = true;
        open.toggle_label = "Yopish";
        let html = render_popup(&open, true);
        assert!(html.contains("class=\"listing-description expanded\" id=\"desc-8\""));
        assert!(html.contains(">Yopish</span>"));
    }
}
