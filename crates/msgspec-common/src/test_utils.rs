//! Test utilities and shared test helpers for msgspec.
//!
//! Fixtures here write `.properties` bundles into temporary resource roots so
//! that loader, validator and generator tests share one vocabulary.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_resource(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create resource directory");
    }
    fs::write(&path, content).expect("Failed to write resource file");
    path
}

/// Renders `key=value` lines into a properties document.
pub fn properties(entries: &[(&str, &str)]) -> String {
    entries
        .iter()
        .map(|(key, value)| format!("{key}={value}\n"))
        .collect()
}

/// Resource bundle fixtures.
pub mod bundle_fixtures {
    /// English templates of the canonical fixture bundle.
    pub const EN_GB: &str = "\
# Sample bundle, main locale
app.msg.greeting=Hi {0}, you are {1,number} years old
app.msg.single_number=Value: {0,number}
app.msg.no_args=Nothing to see here
other.key=Out of scope
";

    /// French templates of the canonical fixture bundle.
    pub const FR_FR: &str = "\
! Bundle d'exemple
app.msg.greeting=Bonjour {0}, vous avez {1,number} ans
app.msg.single_number=Valeur : {0,number}
app.msg.no_args=Rien \u{e0} voir
";
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use proptest::prelude::*;

    /// Strategy for literal template text without any grammar characters.
    pub fn literal_text_strategy() -> impl Strategy<Value = String> {
        r"[a-zA-Z0-9 ,.!?:;-]{0,24}".prop_map(|s| s)
    }

    /// Strategy for placeholder type keywords, including the untyped form.
    pub fn type_keyword_strategy() -> impl Strategy<Value = Option<&'static str>> {
        prop_oneof![
            Just(None),
            Just(Some("number")),
            Just(Some("date")),
            Just(Some("time")),
            Just(Some("choice")),
        ]
    }

    /// Strategy for placeholder indices kept small enough to stay readable.
    pub fn index_strategy() -> impl Strategy<Value = usize> {
        0usize..8
    }
}
