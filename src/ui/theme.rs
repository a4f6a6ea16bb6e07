//! Page colour scheme.
//!
//! The built-in theme reproduces the page's stock look (red price pins with a
//! white border, blue action buttons). A custom theme can be loaded from a TOML
//! file named by `theme_file` in the configuration.
//!
//! # TOML Format
//!
//! ```toml
//! name = "night"
//!
//! [colors]
//! marker_bg = "#c0392b"
//! marker_fg = "#ffffff"
//! marker_border = "#ffffff"
//! price_fg = "#e67e22"
//! text_dim = "#95a5a6"
//! accent = "#2980b9"
//! accent_hover = "#1f6391"
//! danger = "#c0392b"
//! danger_hover = "#962d22"
//! indicator_active = "#ffffff"
//! indicator_inactive = "#7f8c8d"
//! modal_backdrop = "rgba(0,0,0,0.7)"
//! modal_bg = "#2c3e50"
//! link_box_bg = "#34495e"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::error::{ListingMapError, Result};

/// Named colour scheme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    #[serde(default)]
    pub colors: ThemeColors,
}

/// CSS colour values for every themed element.
///
/// Any CSS colour syntax is accepted; values are written into the page
/// stylesheet verbatim. Missing fields fall back to the built-in theme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeColors {
    /// Price pin background.
    pub marker_bg: String,
    pub marker_fg: String,
    pub marker_border: String,

    /// Price line inside the popup.
    pub price_fg: String,
    /// Secondary text (photo count, owner, distance).
    pub text_dim: String,

    /// Save/copy buttons and links.
    pub accent: String,
    pub accent_hover: String,
    /// Call and close buttons.
    pub danger: String,
    pub danger_hover: String,

    pub indicator_active: String,
    pub indicator_inactive: String,

    pub modal_backdrop: String,
    pub modal_bg: String,
    pub link_box_bg: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            marker_bg: "#e74c3c".to_string(),
            marker_fg: "white".to_string(),
            marker_border: "white".to_string(),
            price_fg: "#e74c3c".to_string(),
            text_dim: "#7f8c8d".to_string(),
            accent: "#3498db".to_string(),
            accent_hover: "#2980b9".to_string(),
            danger: "#e74c3c".to_string(),
            danger_hover: "#c0392b".to_string(),
            indicator_active: "#3498db".to_string(),
            indicator_inactive: "#d0d7de".to_string(),
            modal_backdrop: "rgba(0,0,0,0.5)".to_string(),
            modal_bg: "white".to_string(),
            link_box_bg: "#f8f9fa".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "classic".to_string(),
            colors: ThemeColors::default(),
        }
    }
}

impl Theme {
    /// Parses a theme from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ListingMapError::Config`] if the text is not a valid theme.
    ///
    /// # Examples
    ///
    /// ```
    /// use listing_map::ui::Theme;
    ///
    /// let theme = Theme::from_toml_str("name = \"mono\"\n[colors]\nmarker_bg = \"#000\"")?;
    /// assert_eq!(theme.colors.marker_bg, "#000");
    /// assert_eq!(theme.colors.accent, Theme::default().colors.accent);
    /// # Ok::<(), listing_map::domain::ListingMapError>(())
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ListingMapError::Config(format!("invalid theme: {e}")))
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }
}
