//! Filesystem locations used by the listing map.
//!
//! Everything the binary writes (client storage and trace files) lives under
//! one per-user data directory, resolved through the `dirs` crate so the
//! platform convention is followed:
//!
//! | Platform | Location                                         |
//! |----------|--------------------------------------------------|
//! | Linux    | `$XDG_DATA_HOME/listing-map` or `~/.local/share/listing-map` |
//! | macOS    | `~/Library/Application Support/listing-map`     |
//! | Windows  | `%APPDATA%\listing-map`                          |

use std::path::{Path, PathBuf};

const APP_DIR: &str = "listing-map";

/// File name of the persisted client storage.
pub const STORAGE_FILE: &str = "client_storage.json";

/// File name of the OTLP trace log.
pub const TRACE_FILE: &str = "otlp.json";

/// Returns the per-user data directory.
///
/// Falls back to `./listing-map` when the platform reports no data directory
/// (e.g. a stripped-down container without `HOME`).
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(APP_DIR), |dir| dir.join(APP_DIR))
}

/// Default location of the client storage file inside `data_dir`.
#[must_use]
pub fn storage_path(data_dir: &Path) -> PathBuf {
    data_dir.join(STORAGE_FILE)
}

/// Default location of the trace file inside `data_dir`.
#[must_use]
pub fn trace_path(data_dir: &Path) -> PathBuf {
    data_dir.join(TRACE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_ends_with_app_name() {
        assert!(get_data_dir().ends_with(APP_DIR));
    }

    #[test]
    fn files_live_inside_data_dir() {
        let dir = Path::new("/tmp/lm");
        assert_eq!(storage_path(dir), PathBuf::from("/tmp/lm/client_storage.json"));
        assert_eq!(trace_path(dir), PathBuf::from("/tmp/lm/otlp.json"));
    }
}
