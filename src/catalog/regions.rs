//! Region display settings.

use serde::Serialize;

/// Region used when none is given or the given one is unknown
pub const DEFAULT_REGION: &str = "Global";

/// Locale metadata for a region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionSettings {
    pub language: &'static str,
    pub genre: &'static str,
    /// Serialized as `popular` for compatibility with existing clients
    #[serde(rename = "popular")]
    pub representative_artist: &'static str,
}

const fn region(
    language: &'static str,
    genre: &'static str,
    representative_artist: &'static str,
) -> RegionSettings {
    RegionSettings {
        language,
        genre,
        representative_artist,
    }
}

/// All regions in display order. `Global` must stay present.
pub const REGION_SETTINGS: &[(&str, RegionSettings)] = &[
    ("India", region("Hindi", "Bollywood", "AR Rahman")),
    ("USA", region("English", "Hip-Hop", "Drake")),
    ("UK", region("English", "Pop", "Ed Sheeran")),
    ("Japan", region("Japanese", "J-Pop", "AKB48")),
    ("Korea", region("Korean", "K-Pop", "BTS")),
    ("Germany", region("German", "Techno", "Kraftwerk")),
    ("Brazil", region("Portuguese", "Samba", "Tom Jobim")),
    (DEFAULT_REGION, region("English", "Pop", "Universal")),
];

const GLOBAL: RegionSettings = region("English", "Pop", "Universal");

/// Settings for a region, falling back to `Global` for unknown names.
///
/// Names are matched exactly.
pub fn lookup_region(name: &str) -> &'static RegionSettings {
    REGION_SETTINGS
        .iter()
        .find(|(n, _)| *n == name)
        .or_else(|| REGION_SETTINGS.iter().find(|(n, _)| *n == DEFAULT_REGION))
        .map(|(_, settings)| settings)
        .unwrap_or(&GLOBAL)
}

/// Names of all known regions, in display order
pub fn region_names() -> Vec<&'static str> {
    REGION_SETTINGS.iter().map(|(n, _)| *n).collect()
}
