use serde::{Deserialize, Serialize};

use crate::domain::{ArtistList, DEFAULT_USERNAME};

/// Initial page data embedded by the server before the component mounts.
///
/// Fields missing from the embedded object take the values of
/// [`BootstrapPayload::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapPayload {
    #[serde(alias = "artistIds")]
    pub artist_ids: ArtistList,
    pub username: String,
    #[serde(alias = "hasArtistsSaved")]
    pub has_artists_saved: bool,
    #[serde(alias = "songName")]
    pub song_name: Option<String>,
    #[serde(alias = "songArtist")]
    pub song_artist: Option<String>,
    #[serde(alias = "songImageUrl")]
    pub song_image_url: Option<String>,
    #[serde(alias = "previewUrl")]
    pub preview_url: Option<String>,
    #[serde(alias = "geniusUrl")]
    pub genius_url: Option<String>,
}

impl Default for BootstrapPayload {
    fn default() -> Self {
        Self {
            artist_ids: Vec::new(),
            username: DEFAULT_USERNAME.to_string(),
            has_artists_saved: false,
            song_name: None,
            song_artist: None,
            song_image_url: None,
            preview_url: None,
            genius_url: None,
        }
    }
}

impl BootstrapPayload {
    /// The song block shown above the list. Only present when the user had
    /// artists saved at page load.
    pub fn song_preview(&self) -> Option<SongPreview> {
        if !self.has_artists_saved {
            return None;
        }
        Some(SongPreview {
            name: self.song_name.clone(),
            artist: self.song_artist.clone(),
            image_url: self.song_image_url.clone(),
            preview_url: self.preview_url.clone(),
            genius_url: self.genius_url.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongPreview {
    pub name: Option<String>,
    pub artist: Option<String>,
    pub image_url: Option<String>,
    pub preview_url: Option<String>,
    pub genius_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRequest {
    #[serde(alias = "artistIds")]
    pub artist_ids: ArtistList,
}

/// The server's authoritative list after a save. Replaces the local list
/// wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    #[serde(alias = "artistIds")]
    pub artist_ids: ArtistList,
}
