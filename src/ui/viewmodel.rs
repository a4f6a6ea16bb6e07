//! View models computed from the map session.
//!
//! View models are display-ready: prices are formatted, photo URLs resolved and
//! labels chosen. The renderer only lays them out.

use crate::domain::{LatLng, Viewport};

/// Everything needed to render the page once.
#[derive(Debug, Clone, PartialEq)]
pub struct PageViewModel {
    pub viewport: Viewport,
    pub cluster: ClusterView,
    pub markers: Vec<MarkerView>,
    pub stats: StatsView,
    pub loading_visible: bool,
    pub error_visible: bool,
    /// Listing whose popup is open, if any.
    pub open_popup: Option<i64>,
    pub deep_link_modal: Option<DeepLinkModalView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterView {
    pub max_cluster_radius_px: u32,
    pub chunked_loading: bool,
}

/// One marker and the popup bound to it.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub listing_id: i64,
    pub position: LatLng,
    /// Price as shown on the marker pin, without the currency suffix.
    pub price_label: String,
    pub popup: PopupView,
}

/// Popup body for one listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    pub listing_id: i64,
    pub title: String,
    /// e.g. `3 500 000 so'm/oy`.
    pub price_text: String,
    pub description: String,
    pub description_expanded: bool,
    pub toggle_label: &'static str,
    pub gallery: Option<GalleryView>,
    pub phone_display: String,
    /// `tel:` URI; `None` hides the call button.
    pub call_uri: Option<String>,
    pub owner_name: Option<String>,
    pub distance_km: Option<f64>,
}

/// Photo strip with its indicator row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    pub photo_urls: Vec<String>,
    /// e.g. `4 ta rasm`.
    pub count_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub count: usize,
    /// e.g. `Jami 12 ta e'lon`.
    pub text: String,
}

/// Modal pointing the user at the bot after a confirmed details request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLinkModalView {
    pub url: String,
    /// The `/start …` command the user can type instead.
    pub command: String,
}
