use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Display length in `MM:SS` form, stored as given.
    pub duration: Option<String>,
    pub order: u64,
    pub is_played: bool,
}

/// Fields accepted when creating a track.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NewTrack {
    #[schema(required = true)]
    pub title: Option<String>,
    #[schema(required = true)]
    pub artist: Option<String>,
    /// Duration in MM:SS format
    pub duration: Option<String>,
}

impl NewTrack {
    pub fn new(title: &str, artist: &str, duration: Option<&str>) -> Self {
        Self {
            title: Some(title.to_string()),
            artist: Some(artist.to_string()),
            duration: duration.map(str::to_string),
        }
    }

    /// Both title and artist present and non-empty.
    pub fn is_complete(&self) -> bool {
        let filled = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());
        filled(&self.title) && filled(&self.artist)
    }
}

/// Partial update. Empty strings and `false` count as not supplied.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackPatch {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub duration: Option<String>,
    pub is_played: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct TrackFilter {
    pub played: Option<bool>,
    pub q: Option<String>,
}

impl TrackFilter {
    pub fn matches(&self, track: &Track) -> bool {
        if let Some(played) = self.played {
            if track.is_played != played {
                return false;
            }
        }

        match self.q.as_deref() {
            Some(q) if !q.is_empty() => {
                let needle = q.to_lowercase();
                track.title.to_lowercase().contains(&needle)
                    || track.artist.to_lowercase().contains(&needle)
            }
            _ => true,
        }
    }
}
