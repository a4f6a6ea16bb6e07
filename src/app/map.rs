//! Map-side bookkeeping: markers and the cluster group holding them.
//!
//! Tile rendering and cluster visuals belong to the host map widget; this
//! module only tracks which listings are on the map and with which options.

use crate::domain::{Bounds, LatLng, ListingRecord};

/// Pixel radius within which the host widget merges markers into one cluster.
pub const MAX_CLUSTER_RADIUS_PX: u32 = 50;

/// Options handed to the host cluster widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterOptions {
    pub max_cluster_radius_px: u32,
    /// Add markers in batches so large result sets do not freeze the page.
    pub chunked_loading: bool,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            max_cluster_radius_px: MAX_CLUSTER_RADIUS_PX,
            chunked_loading: true,
        }
    }
}

/// One listing placed on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LatLng,
    pub listing: ListingRecord,
}

impl Marker {
    #[must_use]
    pub fn new(listing: ListingRecord) -> Self {
        Self {
            position: LatLng::new(listing.latitude, listing.longitude),
            listing,
        }
    }

    #[must_use]
    pub const fn listing_id(&self) -> i64 {
        self.listing.id
    }
}

/// Cluster group owning every marker currently on the map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerCluster {
    options: ClusterOptions,
    markers: Vec<Marker>,
}

impl MarkerCluster {
    #[must_use]
    pub fn new(options: ClusterOptions) -> Self {
        Self {
            options,
            markers: Vec::new(),
        }
    }

    #[must_use]
    pub const fn options(&self) -> ClusterOptions {
        self.options
    }

    /// Removes every marker.
    pub fn clear_layers(&mut self) {
        self.markers.clear();
    }

    pub fn add_layer(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    #[must_use]
    pub fn find(&self, listing_id: i64) -> Option<&Marker> {
        self.markers.iter().find(|m| m.listing_id() == listing_id)
    }

    /// Bounds enclosing every marker, `None` when the cluster is empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::enclosing(self.markers.iter().map(|m| m.position))
    }
}
