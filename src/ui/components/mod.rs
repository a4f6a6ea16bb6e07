//! Markup components.
//!
//! Each component is an askama template under `templates/partials/` rendered
//! to a fragment; the page template stitches the fragments together in page
//! order:
//!
//! ```text
//! [Status bar: stats, loading, error]
//! [Map container]
//!   [Marker]
//!     [Popup: title, price, description, gallery, buttons]
//!   ...
//! [Deep-link modal, when showing]
//! ```
//!
//! # Components
//!
//! - [`stats`]: listing counter and loading/error indicators
//! - [`marker`]: price pins
//! - [`popup`]: listing popups with the photo strip
//! - [`modal`]: deep-link modal

pub mod marker;
pub mod modal;
pub mod popup;
pub mod stats;

use askama::Template;

use crate::ui::helpers::{css_number, render_template};
use crate::ui::viewmodel::{ClusterView, PageViewModel};

pub use marker::render_marker;
pub use modal::render_deep_link_modal;
pub use popup::render_popup;
pub use stats::render_status_bar;

#[derive(Template)]
#[template(path = "partials/map.html", escape = "none")]
struct MapTemplate {
    center_lat: String,
    center_lng: String,
    zoom: String,
    cluster: ClusterView,
    /// `south,west,north,east` when the view should fit the markers.
    fit_bounds: Option<String>,
    fit_padding: u32,
    markers: Vec<String>,
}

/// The map container with its viewport, cluster options and markers.
#[must_use]
pub fn render_map(vm: &PageViewModel) -> String {
    let viewport = &vm.viewport;
    let fit_bounds = viewport.fit.as_ref().map(|fit| {
        format!(
            "{},{},{},{}",
            css_number(fit.bounds.south_west.lat),
            css_number(fit.bounds.south_west.lng),
            css_number(fit.bounds.north_east.lat),
            css_number(fit.bounds.north_east.lng),
        )
    });

    let markers = vm
        .markers
        .iter()
        .map(|marker| {
            let is_open = vm.open_popup == Some(marker.listing_id);
            render_marker(marker, &render_popup(&marker.popup, is_open))
        })
        .collect();

    render_template(&MapTemplate {
        center_lat: css_number(viewport.center.lat),
        center_lng: css_number(viewport.center.lng),
        zoom: css_number(viewport.zoom),
        cluster: vm.cluster,
        fit_bounds,
        fit_padding: viewport.fit.as_ref().map_or(0, |fit| fit.padding_px),
        markers,
    })
}
