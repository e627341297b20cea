//! JSON playlist library and JSON ordering sink
//!
//! Library document layout:
//!
//! ```json
//! {
//!   "playlists": [
//!     {
//!       "name": "Road trip",
//!       "uri": "playlist:1",
//!       "tracks": [
//!         {"uri": "track:1", "name": "Song", "artists": ["A", "B"],
//!          "features": {"energy": 0.8, "tempo": 0.6}}
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! A track whose `features` is `null` cannot be ordered and is rejected when
//! the playlist's items are loaded.

use std::collections::BTreeMap;
use std::io::Write;

use serde::{Deserialize, Serialize};

use super::{ItemSource, OrderSink};
use crate::errors::{MixError, Result};
use crate::features::FeatureSchema;
use crate::types::{Item, Track};

/// Track entry in a library document
#[derive(Debug, Clone, Deserialize)]
pub struct JsonTrack {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<String>,
    #[serde(default)]
    pub features: Option<BTreeMap<String, f64>>,
}

/// Playlist entry in a library document
#[derive(Debug, Clone, Deserialize)]
pub struct JsonPlaylist {
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub tracks: Vec<JsonTrack>,
}

#[derive(Debug, Clone, Deserialize)]
struct JsonLibrary {
    playlists: Vec<JsonPlaylist>,
}

// ============================================================================
// PlaylistLibrary
// ============================================================================

/// A user's playlists, loaded from a JSON document.
#[derive(Debug, Clone)]
pub struct PlaylistLibrary {
    playlists: Vec<JsonPlaylist>,
    schema: FeatureSchema,
}

impl PlaylistLibrary {
    /// Parse a library document. Tracks are read with the audio-feature schema.
    pub fn from_json(input: &str) -> Result<Self> {
        let doc: JsonLibrary = serde_json::from_str(input)?;
        Ok(Self {
            playlists: doc.playlists,
            schema: FeatureSchema::audio_features(),
        })
    }

    /// Read tracks with a different feature schema
    pub fn with_schema(mut self, schema: FeatureSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    /// Numbered listing, one `"{number}: {name}"` line per playlist, starting at 1
    pub fn list(&self) -> Vec<String> {
        self.playlists
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{}: {}", i + 1, p.name))
            .collect()
    }

    /// Pick a playlist by its 1-based listing number.
    pub fn select(&self, number: usize) -> Result<PlaylistSource> {
        let playlist = number
            .checked_sub(1)
            .and_then(|i| self.playlists.get(i))
            .ok_or_else(|| {
                MixError::invalid_input(format!(
                    "playlist number {} is not between 1 and {}",
                    number,
                    self.playlists.len()
                ))
            })?;

        Ok(PlaylistSource {
            playlist: playlist.clone(),
            schema: self.schema.clone(),
        })
    }
}

/// One selected playlist, usable as an [`ItemSource`].
#[derive(Debug, Clone)]
pub struct PlaylistSource {
    playlist: JsonPlaylist,
    schema: FeatureSchema,
}

impl PlaylistSource {
    /// URI of the playlist in its catalogue
    pub fn uri(&self) -> &str {
        &self.playlist.uri
    }
}

impl ItemSource for PlaylistSource {
    fn collection_name(&self) -> &str {
        &self.playlist.name
    }

    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn items(&self) -> Result<Vec<Item>> {
        self.playlist
            .tracks
            .iter()
            .map(|track| {
                let values = track.features.as_ref().ok_or_else(|| {
                    MixError::invalid_input(format!(
                        "track '{}' has no audio features",
                        track.uri
                    ))
                })?;
                let features = self.schema.extract(values, &track.uri)?;
                let payload = Track::new(&track.uri, &track.name, track.artists.clone());
                Ok(Item::new(&track.uri, payload, features))
            })
            .collect()
    }
}

// ============================================================================
// JsonOrderSink
// ============================================================================

#[derive(Serialize)]
struct JsonOrdering<'a> {
    name: &'a str,
    uris: Vec<&'a str>,
}

/// Writes each submitted ordering as one `{"name", "uris"}` JSON line.
#[derive(Debug)]
pub struct JsonOrderSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonOrderSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OrderSink for JsonOrderSink<W> {
    fn submit(&mut self, name: &str, ordered: &[&Item]) -> Result<()> {
        let doc = JsonOrdering {
            name,
            uris: ordered
                .iter()
                .map(|item| {
                    if item.payload.uri.is_empty() {
                        item.id.as_str()
                    } else {
                        item.payload.uri.as_str()
                    }
                })
                .collect(),
        };

        serde_json::to_writer(&mut self.writer, &doc)?;
        writeln!(self.writer)
            .and_then(|_| self.writer.flush())
            .map_err(|e| MixError::serialization(format!("failed to write ordering: {}", e)))
    }
}
