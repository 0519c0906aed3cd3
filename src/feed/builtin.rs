//! Built-in feed definitions embedded in the binary
//!
//! Embeds the supported feed YAML files directly, so deployments can use
//! `--feed pressure` instead of shipping a definition file alongside the
//! binary.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Built-in feed YAML definitions
pub static BUILTIN_FEEDS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // OWHL pressure/temperature loggers
    m.insert("pressure", include_str!("../../feeds/pressure.yaml"));

    // Weathercloud station exports
    m.insert(
        "weather-station",
        include_str!("../../feeds/weather-station.yaml"),
    );

    m
});

/// Get a built-in feed by name
pub fn get_builtin(name: &str) -> Option<&'static str> {
    BUILTIN_FEEDS.get(name).copied()
}

/// Check if a feed name is built in
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_FEEDS.contains_key(name)
}

/// List all built-in feed names
pub fn list_builtin() -> Vec<&'static str> {
    let mut names: Vec<_> = BUILTIN_FEEDS.keys().copied().collect();
    names.sort_unstable();
    names
}
