//! Price pin markers.

use askama::Template;

use crate::ui::helpers::{css_number, render_template};
use crate::ui::viewmodel::MarkerView;

/// Pin icon size in pixels, `(width, height)`.
pub const ICON_SIZE: (u32, u32) = (100, 40);

/// Pixel offset of the pin tip from the icon's top-left corner.
pub const ICON_ANCHOR: (u32, u32) = (50, 40);

#[derive(Template)]
#[template(path = "partials/marker.html", escape = "none")]
struct MarkerTemplate<'a> {
    listing_id: i64,
    lat: String,
    lng: String,
    icon_size: String,
    icon_anchor: String,
    price_label: &'a str,
    popup: &'a str,
}

/// One marker element with its popup markup nested inside.
#[must_use]
pub fn render_marker(marker: &MarkerView, popup_html: &str) -> String {
    render_template(&MarkerTemplate {
        listing_id: marker.listing_id,
        lat: css_number(marker.position.lat),
        lng: css_number(marker.position.lng),
        icon_size: format!("{},{}", ICON_SIZE.0, ICON_SIZE.1),
        icon_anchor: format!("{},{}", ICON_ANCHOR.0, ICON_ANCHOR.1),
        price_label: &marker.price_label,
        popup: popup_html,
    })
}
