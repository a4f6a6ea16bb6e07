//! Infrastructure layer: the listings backend client and filesystem locations.
//!
//! - [`api`]: [`ListingSource`] trait, its HTTP implementation and URL helpers
//! - [`paths`]: per-user data directory and the files kept in it

pub mod api;
pub mod paths;

pub use api::{photo_url, HttpListingSource, ListingQuery, ListingSource};
pub use paths::get_data_dir;
