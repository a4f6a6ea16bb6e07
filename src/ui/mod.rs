//! Page rendering.
//!
//! Turns the session's [`PageViewModel`] into a self-contained HTML document:
//! markers with their popups inside a map container the host map widget
//! enhances, plus the status bar and the deep-link modal.
//!
//! ```text
//! MapSession → compute_page → PageViewModel → render_page → HTML
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready view model types
//! - [`renderer`]: document assembly from the templates under `templates/`
//! - [`components`]: markup for each page element
//! - [`helpers`]: price formatting and template rendering
//! - [`theme`]: colour scheme

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use helpers::format_price;
pub use renderer::{render, render_page};
pub use theme::Theme;
pub use viewmodel::{
    ClusterView, DeepLinkModalView, GalleryView, MarkerView, PageViewModel, PopupView, StatsView,
};
