//! Static music and region catalogs.
//!
//! Maps an emotion label to a short playlist and a region name to display
//! metadata. Both lookups are total: unknown keys fall back to a default
//! entry.

pub mod regions;

pub use regions::{lookup_region, region_names, RegionSettings, DEFAULT_REGION, REGION_SETTINGS};

use serde::{Deserialize, Serialize};

use crate::emotion::Emotion;

/// Songs recommended for each emotion
pub const MOOD_MUSIC: &[(Emotion, &[&str])] = &[
    (
        Emotion::Happy,
        &[
            "Don't Stop Me Now - Queen",
            "Walking on Sunshine",
            "Good as Hell - Lizzo",
        ],
    ),
    (
        Emotion::Sad,
        &[
            "Someone Like You - Adele",
            "Tears in Heaven - Clapton",
            "The Scientist - Coldplay",
        ],
    ),
    (
        Emotion::Angry,
        &[
            "Blinding Lights - The Weeknd",
            "We Will Rock You - Queen",
            "Monster - Eminem",
        ],
    ),
    (
        Emotion::Fear,
        &[
            "Midnight City - M83",
            "Haunted - Evanescence",
            "In the Dark - Billy Talent",
        ],
    ),
    (
        Emotion::Surprise,
        &[
            "Wake Me Up - Avicii",
            "Dancing Queen - ABBA",
            "All of the Stars",
        ],
    ),
    (
        Emotion::Neutral,
        &[
            "Weightless - Marconi Union",
            "Clair de Lune",
            "Bach - Air on G String",
        ],
    ),
    (
        Emotion::Disgust,
        &[
            "Heavy - Kiiara",
            "Break My Soul - Beyonce",
            "Stronger - Kanye West",
        ],
    ),
];

/// A playlist chosen for an emotion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicRecommendation {
    /// Lower-cased label as requested
    pub emotion: String,
    pub recommended_songs: Vec<String>,
    /// Region echoed from the request
    pub region: String,
}

/// Songs for an emotion
pub fn songs_for(emotion: Emotion) -> &'static [&'static str] {
    MOOD_MUSIC
        .iter()
        .find(|(e, _)| *e == emotion)
        .map(|(_, songs)| *songs)
        .unwrap_or(&[])
}

/// Recommend songs for an emotion label.
///
/// The label is matched case-insensitively; unknown labels get the
/// `neutral` playlist but are still echoed back lower-cased.
pub fn recommend(label: &str, region: &str) -> MusicRecommendation {
    let emotion = label.to_lowercase();
    let songs = emotion
        .parse::<Emotion>()
        .map(songs_for)
        .unwrap_or_else(|_| songs_for(Emotion::Neutral));

    MusicRecommendation {
        emotion,
        recommended_songs: songs.iter().map(|s| s.to_string()).collect(),
        region: region.to_string(),
    }
}
