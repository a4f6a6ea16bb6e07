//! Page session state and view model computation.
//!
//! [`MapSession`] owns everything the page used to keep in globals: the map
//! viewport, the cluster group and its markers, the load status, the open
//! popup, the messaging identity and every attached photo slider. It is the
//! single source of truth for rendering; [`MapSession::compute_page`] turns it
//! into a [`PageViewModel`].
//!
//! # Example
//!
//! ```
//! use listing_map::app::{HostCapabilities, LoadStatus, MapSession};
//! use listing_map::Config;
//!
//! let session = MapSession::new(&Config::default(), HostCapabilities::default());
//! assert_eq!(session.status(), LoadStatus::Loading);
//! assert_eq!(session.compute_page().stats.text, "Jami 0 ta e'lon");
//! ```

use crate::app::actions::Action;
use crate::app::map::{ClusterOptions, Marker, MarkerCluster};
use crate::domain::contact::{display_phone, start_command, tel_uri, telegram_deep_link};
use crate::domain::geo::NEARBY_ZOOM;
use crate::domain::{LatLng, ListingRecord, Viewport};
use crate::infrastructure::api::{photo_url, ListingQuery};
use crate::slider::{AttachOutcome, IndicatorSet, SliderRegistry, StripId, StripSurface};
use crate::ui::helpers::format_price;
use crate::ui::viewmodel::{
    ClusterView, DeepLinkModalView, GalleryView, MarkerView, PageViewModel, PopupView, StatsView,
};
use crate::Config;

/// Shown when a listing has no description.
pub const NO_DESCRIPTION: &str = "Tavsif mavjud emas";

/// Description toggle label while collapsed.
pub const EXPAND_LABEL: &str = "Batafsil…";

/// Description toggle label while expanded.
pub const COLLAPSE_LABEL: &str = "Yopish";

/// Progress of the listings request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    /// The request failed. The error indicator stays up until a new request.
    Failed,
}

/// What the embedding host can do beyond a plain browser page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostCapabilities {
    /// The page runs inside a messaging client that exposes a link opener.
    pub messaging_link_opener: bool,
}

/// The popup currently open on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenPopup {
    pub listing_id: i64,
    pub description_expanded: bool,
}

/// State of one rendered listing map page.
#[derive(Debug)]
pub struct MapSession {
    api_base: String,
    bot_username: String,
    capabilities: HostCapabilities,

    /// Query the page was opened with.
    pub query: ListingQuery,
    pub viewport: Viewport,
    cluster: MarkerCluster,
    status: LoadStatus,
    stats_count: usize,

    open_popup: Option<OpenPopup>,
    /// Listing whose deep-link modal is showing.
    deep_link_listing: Option<i64>,

    /// Messaging user identity, read from client storage at start-up.
    identity: Option<String>,

    sliders: SliderRegistry,
}

impl MapSession {
    #[must_use]
    pub fn new(config: &Config, capabilities: HostCapabilities) -> Self {
        Self {
            api_base: config.api_base.clone(),
            bot_username: config.bot_username.clone(),
            capabilities,
            query: ListingQuery::All,
            viewport: Viewport::default(),
            cluster: MarkerCluster::new(ClusterOptions::default()),
            status: LoadStatus::Loading,
            stats_count: 0,
            open_popup: None,
            deep_link_listing: None,
            identity: None,
            sliders: SliderRegistry::new(config.slider),
        }
    }

    /// Sets the listings query; a nearby query also centres the map on its point.
    pub fn set_query(&mut self, query: ListingQuery) {
        if let ListingQuery::Nearby { lat, lon, .. } = query {
            self.viewport.set_view(LatLng::new(lat, lon), NEARBY_ZOOM);
        }
        self.query = query;
    }

    pub fn set_identity(&mut self, identity: Option<String>) {
        self.identity = identity.filter(|id| !id.is_empty());
    }

    #[must_use]
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    #[must_use]
    pub const fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn set_status(&mut self, status: LoadStatus) {
        self.status = status;
    }

    #[must_use]
    pub const fn capabilities(&self) -> HostCapabilities {
        self.capabilities
    }

    #[must_use]
    pub fn bot_username(&self) -> &str {
        &self.bot_username
    }

    #[must_use]
    pub const fn cluster(&self) -> &MarkerCluster {
        &self.cluster
    }

    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        self.cluster.markers()
    }

    #[must_use]
    pub const fn stats_count(&self) -> usize {
        self.stats_count
    }

    #[must_use]
    pub fn listing(&self, listing_id: i64) -> Option<&ListingRecord> {
        self.cluster.find(listing_id).map(|m| &m.listing)
    }

    #[must_use]
    pub const fn open_popup(&self) -> Option<OpenPopup> {
        self.open_popup
    }

    #[must_use]
    pub const fn deep_link_listing(&self) -> Option<i64> {
        self.deep_link_listing
    }

    #[must_use]
    pub const fn sliders(&self) -> &SliderRegistry {
        &self.sliders
    }

    pub fn sliders_mut(&mut self) -> &mut SliderRegistry {
        &mut self.sliders
    }

    /// Replaces the markers with one per listing and fits the map to them.
    ///
    /// Popups, the deep-link modal and sliders bound to listings missing from
    /// the new set are torn down; the returned actions cancel frames those
    /// sliders still had pending.
    pub fn apply_listings(&mut self, listings: Vec<ListingRecord>) -> Vec<Action> {
        let _span = tracing::debug_span!("apply_listings", count = listings.len()).entered();

        self.cluster.clear_layers();
        for listing in listings {
            self.cluster.add_layer(Marker::new(listing));
        }

        if let Some(bounds) = self.cluster.bounds() {
            self.viewport.fit_bounds(bounds);
        }

        self.stats_count = self.cluster.len();
        self.status = LoadStatus::Ready;

        let actions = self.drop_stale_bindings();
        self.log_photo_report();
        actions
    }

    fn drop_stale_bindings(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();

        if self
            .open_popup
            .is_some_and(|p| self.listing(p.listing_id).is_none())
        {
            actions.extend(self.close_popup());
        }
        if self
            .deep_link_listing
            .is_some_and(|id| self.listing(id).is_none())
        {
            self.deep_link_listing = None;
        }

        let stale: Vec<StripId> = self
            .sliders
            .strip_ids()
            .filter(|strip| self.listing(strip.0).is_none())
            .collect();
        actions.extend(stale.into_iter().filter_map(|strip| self.detach_slider(strip)));

        if !actions.is_empty() {
            tracing::debug!(cancelled = actions.len(), "dropped bindings for removed listings");
        }
        actions
    }

    /// Logs every resolved photo URL, one event per listing.
    fn log_photo_report(&self) {
        if !tracing::enabled!(tracing::Level::DEBUG) {
            return;
        }
        for (position, marker) in self.cluster.markers().iter().enumerate() {
            let urls: Vec<String> = marker
                .listing
                .photos
                .iter()
                .map(|p| photo_url(&self.api_base, p.as_deref()))
                .collect();
            tracing::debug!(
                position = position + 1,
                listing_id = marker.listing_id(),
                title = %marker.listing.title,
                photos = ?urls,
                "listing photos"
            );
        }
    }

    /// Opens a listing's popup, closing any other one.
    ///
    /// Returns the frame cancellation needed if the replaced popup's slider was
    /// still animating.
    pub fn show_popup(&mut self, listing_id: i64) -> Vec<Action> {
        if self.open_popup.is_some_and(|p| p.listing_id == listing_id) {
            return Vec::new();
        }
        let actions = self.close_popup();
        self.open_popup = Some(OpenPopup {
            listing_id,
            description_expanded: false,
        });
        actions
    }

    /// Closes the open popup and detaches its slider.
    pub fn close_popup(&mut self) -> Vec<Action> {
        self.open_popup
            .take()
            .and_then(|popup| self.detach_slider(StripId(popup.listing_id)))
            .into_iter()
            .collect()
    }

    /// Flips the description of the open popup. Returns whether anything changed.
    pub fn toggle_description(&mut self, listing_id: i64) -> bool {
        match self.open_popup.as_mut() {
            Some(popup) if popup.listing_id == listing_id => {
                popup.description_expanded = !popup.description_expanded;
                true
            }
            _ => false,
        }
    }

    pub fn show_deep_link(&mut self, listing_id: i64) {
        self.deep_link_listing = Some(listing_id);
    }

    /// Hides the deep-link modal. Returns whether it was showing.
    pub fn close_deep_link(&mut self) -> bool {
        self.deep_link_listing.take().is_some()
    }

    /// Binds a slider to the photo strip of a rendered popup.
    pub fn attach_slider(
        &mut self,
        strip: StripId,
        surface: Box<dyn StripSurface>,
        indicators: Box<dyn IndicatorSet>,
    ) -> AttachOutcome {
        self.sliders.attach(strip, surface, indicators)
    }

    /// Unbinds a strip's slider, returning the frame cancellation it needs.
    pub fn detach_slider(&mut self, strip: StripId) -> Option<Action> {
        self.sliders
            .detach(strip)
            .then_some(Action::CancelAnimationFrame { strip })
    }

    /// Computes the renderable page from the current state.
    #[must_use]
    pub fn compute_page(&self) -> PageViewModel {
        let options = self.cluster.options();

        PageViewModel {
            viewport: self.viewport,
            cluster: ClusterView {
                max_cluster_radius_px: options.max_cluster_radius_px,
                chunked_loading: options.chunked_loading,
            },
            markers: self.cluster.markers().iter().map(|m| self.marker_view(m)).collect(),
            stats: StatsView {
                count: self.stats_count,
                text: format!("Jami {} ta e'lon", self.stats_count),
            },
            loading_visible: self.status == LoadStatus::Loading,
            error_visible: self.status == LoadStatus::Failed,
            open_popup: self.open_popup.map(|p| p.listing_id),
            deep_link_modal: self.deep_link_listing.map(|id| DeepLinkModalView {
                url: telegram_deep_link(&self.bot_username, id),
                command: start_command(id),
            }),
        }
    }

    fn marker_view(&self, marker: &Marker) -> MarkerView {
        let listing = &marker.listing;
        let price_label = format_price(listing.price);
        let description_expanded = self
            .open_popup
            .is_some_and(|p| p.listing_id == listing.id && p.description_expanded);

        let gallery = (!listing.photos.is_empty()).then(|| GalleryView {
            photo_urls: listing
                .photos
                .iter()
                .map(|p| photo_url(&self.api_base, p.as_deref()))
                .collect(),
            count_text: format!("{} ta rasm", listing.photo_count()),
        });

        let description = listing
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(NO_DESCRIPTION)
            .to_string();

        MarkerView {
            listing_id: listing.id,
            position: marker.position,
            popup: PopupView {
                listing_id: listing.id,
                title: listing.title.clone(),
                price_text: format!("{price_label} so'm/oy"),
                description,
                description_expanded,
                toggle_label: if description_expanded { COLLAPSE_LABEL } else { EXPAND_LABEL },
                gallery,
                phone_display: display_phone(listing.phone.as_deref()),
                call_uri: tel_uri(listing.phone.as_deref()),
                owner_name: listing.owner_name.clone(),
                distance_km: listing.distance_km,
            },
            price_label,
        }
    }
}
