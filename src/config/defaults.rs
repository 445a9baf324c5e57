//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn title() -> String {
        "My Blog".into()
    }

    pub fn description() -> String {
        "Notes, essays and projects.".into()
    }

    pub fn url() -> String {
        "https://example.com".into()
    }

    pub fn author() -> String {
        "<YOUR_NAME>".into()
    }

    pub fn email() -> String {
        "user@noreply.folio".into()
    }

    pub fn language() -> String {
        "en".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn base_path() -> String {
        "".into()
    }

    pub fn content() -> PathBuf {
        "posts".into()
    }

    pub fn output() -> PathBuf {
        "dist".into()
    }

    pub fn assets() -> PathBuf {
        "assets".into()
    }

    pub fn templates() -> PathBuf {
        "templates".into()
    }

    pub fn projects() -> PathBuf {
        "projects.toml".into()
    }

    pub fn ads() -> PathBuf {
        "ads.txt".into()
    }

    pub fn recent_posts() -> usize {
        6
    }

    pub mod rss {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "rss.xml".into()
        }

        pub fn limit() -> usize {
            20
        }
    }

    pub mod sitemap {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "sitemap.xml".into()
        }
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }
}
