//! Collaborator interfaces the engine calls into.
//!
//! A [`TrackSource`] answers the four lookups acquisition needs (top tracks,
//! genres, durations, recommendations); a [`PlaylistSink`] receives the final
//! playlist. Both are passed explicitly as handles, never held globally.
//!
//! Lookups that find nothing are not errors: `duration` returns `None` and
//! `genres` an empty list, and the track is skipped. `Err` is reserved for
//! transport failures, which abort the build.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of top tracks requested per page.
pub const TOP_TRACKS_PAGE_SIZE: usize = 50;

/// Most track ids a sink accepts per `add_tracks` call.
pub const ADD_TRACKS_BATCH: usize = 100;

/// Recency range of the user's listening history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    /// Roughly the last four weeks
    ShortTerm,
    /// Roughly the last six months
    MediumTerm,
}

impl Term {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShortTerm => "short_term",
            Self::MediumTerm => "medium_term",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A track as returned by listings, before its duration is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRef {
    pub id: String,
    pub album: Option<String>,
    #[serde(default)]
    pub artists: Vec<String>,
}

/// One page of top tracks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopTracksPage {
    pub items: Vec<TrackRef>,
    pub has_next: bool,
}

/// What to look genres up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreRef<'a> {
    Album(&'a str),
    Artist(&'a str),
}

/// Seeds for a recommendation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seeds {
    Genre(String),
    Tracks(Vec<String>),
}

pub trait TrackSource {
    /// Page of the user's top tracks for `term`, starting at `offset`.
    ///
    /// # Errors
    ///
    /// Transport or backend failure.
    fn top_tracks(&self, term: Term, offset: usize) -> Result<TopTracksPage>;

    /// Genres attached to an album or artist. Unknown references yield an empty list.
    ///
    /// # Errors
    ///
    /// Transport or backend failure.
    fn genres(&self, reference: GenreRef<'_>) -> Result<Vec<String>>;

    /// Track length in deciseconds, `None` when unknown.
    ///
    /// # Errors
    ///
    /// Transport or backend failure.
    fn duration(&self, track_id: &str) -> Result<Option<u32>>;

    /// Up to `limit` tracks recommended from `seeds`.
    ///
    /// # Errors
    ///
    /// Transport or backend failure.
    fn recommendations(&self, seeds: &Seeds, limit: usize) -> Result<Vec<TrackRef>>;

    /// Genres of a track: its album's, or the union of every artist's genres
    /// when the album has none.
    ///
    /// # Errors
    ///
    /// Propagates failures of [`TrackSource::genres`].
    fn track_genres(&self, track: &TrackRef) -> Result<Vec<String>> {
        let mut genres = match &track.album {
            Some(album) => self.genres(GenreRef::Album(album))?,
            None => Vec::new(),
        };

        if genres.is_empty() {
            for artist in &track.artists {
                genres.extend(self.genres(GenreRef::Artist(artist))?);
            }
        }

        Ok(genres)
    }
}

pub trait PlaylistSink {
    /// Create an empty playlist and return its id.
    ///
    /// # Errors
    ///
    /// Transport or backend failure.
    fn create_playlist(&self, name: &str, description: &str) -> Result<String>;

    /// Append tracks to a playlist. Callers send at most [`ADD_TRACKS_BATCH`] ids.
    ///
    /// # Errors
    ///
    /// Transport or backend failure, or unknown playlist.
    fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<()>;
}
