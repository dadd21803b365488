pub mod dispatcher;
pub mod limits;
pub mod shape;

pub use dispatcher::{QueryDispatcher, Response};
pub use shape::{shape, Listing, RankedEntry, SongEntry};

use serde::Serialize;

use crate::spotify::TimeRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    GlobalSearch,
    LikedSongs,
    TopArtists,
    ArtistTopTracks,
}

/// One user request. Built fresh from input on every interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    pub mode: Mode,
    pub term: String,
    pub limit: u32,
    pub time_range: Option<TimeRange>,
}

impl Query {
    pub fn global_search(term: impl Into<String>, limit: u32) -> Self {
        Self {
            mode: Mode::GlobalSearch,
            term: term.into(),
            limit,
            time_range: None,
        }
    }

    pub fn liked_songs(term: impl Into<String>, limit: u32) -> Self {
        Self {
            mode: Mode::LikedSongs,
            term: term.into(),
            limit,
            time_range: None,
        }
    }

    pub fn top_artists(limit: u32, time_range: TimeRange) -> Self {
        Self {
            mode: Mode::TopArtists,
            term: String::new(),
            limit,
            time_range: Some(time_range),
        }
    }

    pub fn artist_top_tracks(artist: impl Into<String>, limit: u32) -> Self {
        Self {
            mode: Mode::ArtistTopTracks,
            term: artist.into(),
            limit,
            time_range: None,
        }
    }

    /// Number of entries to keep after shaping.
    pub fn keep(&self) -> usize {
        self.limit as usize
    }
}
