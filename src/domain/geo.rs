//! Coordinates, bounds and the map viewport.

use serde::{Deserialize, Serialize};

/// Centre of Tashkent, used until listings or a nearby query say otherwise.
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 41.2995,
    lng: 69.2401,
};

/// Zoom level for the city-wide default view.
pub const DEFAULT_ZOOM: f64 = 12.0;

/// Zoom level used when the page is opened around a point.
pub const NEARBY_ZOOM: f64 = 13.0;

/// Pixel padding kept around markers when fitting the view to them.
pub const FIT_PADDING_PX: u32 = 20;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned box enclosing a set of coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    /// Smallest bounds containing every point, or `None` for an empty set.
    ///
    /// # Examples
    ///
    /// ```
    /// use listing_map::domain::{Bounds, LatLng};
    ///
    /// let bounds = Bounds::enclosing([LatLng::new(41.0, 69.0), LatLng::new(41.5, 69.4)]).unwrap();
    /// assert_eq!(bounds.south_west, LatLng::new(41.0, 69.0));
    /// assert_eq!(bounds.north_east, LatLng::new(41.5, 69.4));
    /// ```
    pub fn enclosing(points: impl IntoIterator<Item = LatLng>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self {
                    south_west: p,
                    north_east: p,
                },
                Some(b) => Self {
                    south_west: LatLng::new(b.south_west.lat.min(p.lat), b.south_west.lng.min(p.lng)),
                    north_east: LatLng::new(b.north_east.lat.max(p.lat), b.north_east.lng.max(p.lng)),
                },
            })
        })
    }

    #[must_use]
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }
}

/// What the map should show.
///
/// `fit` takes precedence over `center`/`zoom` once markers are known; the
/// host map widget computes the final zoom from its own pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
    pub fit: Option<FitBounds>,
}

/// Request to fit the map to a bounding box with pixel padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitBounds {
    pub bounds: Bounds,
    pub padding_px: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            fit: None,
        }
    }
}

impl Viewport {
    /// Centres the view on a point at nearby zoom, dropping any fit request.
    pub fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.center = center;
        self.zoom = zoom;
        self.fit = None;
    }

    /// Fits the view to the given bounds with the standard padding.
    pub fn fit_bounds(&mut self, bounds: Bounds) {
        self.center = bounds.center();
        self.fit = Some(FitBounds {
            bounds,
            padding_px: FIT_PADDING_PX,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enclosing_empty_is_none() {
        assert!(Bounds::enclosing(std::iter::empty()).is_none());
    }

    #[test]
    fn single_point_bounds_is_degenerate() {
        let p = LatLng::new(41.3, 69.2);
        let bounds = Bounds::enclosing([p]).unwrap();
        assert_eq!(bounds.south_west, p);
        assert_eq!(bounds.north_east, p);
        assert_eq!(bounds.center(), p);
    }

    #[test]
    fn set_view_clears_fit() {
        let mut viewport = Viewport::default();
        viewport.fit_bounds(Bounds::enclosing([LatLng::new(0.0, 0.0), LatLng::new(2.0, 4.0)]).unwrap());
        assert_eq!(viewport.center, LatLng::new(1.0, 2.0));
        assert!(viewport.fit.is_some());

        viewport.set_view(LatLng::new(41.0, 69.0), NEARBY_ZOOM);
        assert!(viewport.fit.is_none());
        assert!((viewport.zoom - NEARBY_ZOOM).abs() < f64::EPSILON);
    }
}
