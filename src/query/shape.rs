use serde::Serialize;

use crate::query::dispatcher::Response;
use crate::query::Query;
use crate::spotify::{Artist, Track};

/// A track reduced to what the song lists show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongEntry {
    pub name: String,
    pub artist: String,
}

/// A name with the popularity score shown next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub name: String,
    pub popularity: u8,
}

/// A query result ready for presentation.
///
/// The two "nothing to show" cases are variants rather than errors: they are
/// rendered as informational notices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Listing {
    Songs { songs: Vec<SongEntry> },
    TopArtists { artists: Vec<RankedEntry> },
    ArtistTopTracks { tracks: Vec<RankedEntry> },
    NoLikedMatches { term: String },
    ArtistNotFound,
}

impl Listing {
    pub fn len(&self) -> usize {
        match self {
            Listing::Songs { songs } => songs.len(),
            Listing::TopArtists { artists } => artists.len(),
            Listing::ArtistTopTracks { tracks } => tracks.len(),
            Listing::NoLikedMatches { .. } | Listing::ArtistNotFound => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Filters, truncates and projects a raw response for `query`.
pub fn shape(query: &Query, response: Response) -> Listing {
    let keep = query.keep();

    match response {
        Response::SearchTracks(tracks) => Listing::Songs {
            songs: tracks.iter().take(keep).map(song_entry).collect(),
        },
        Response::SavedTracks(saved) => {
            let songs: Vec<SongEntry> = filter_liked(&saved, &query.term)
                .take(keep)
                .map(song_entry)
                .collect();

            if songs.is_empty() {
                Listing::NoLikedMatches {
                    term: query.term.clone(),
                }
            } else {
                Listing::Songs { songs }
            }
        }
        Response::TopArtists(artists) => Listing::TopArtists {
            artists: artists.iter().take(keep).map(ranked_artist).collect(),
        },
        Response::ArtistTopTracks(tracks) => Listing::ArtistTopTracks {
            tracks: tracks.iter().take(keep).map(ranked_track).collect(),
        },
        Response::ArtistNotFound => Listing::ArtistNotFound,
    }
}

/// Saved tracks whose name or primary artist contains `term`, ignoring case.
/// Keeps the listing order.
pub fn filter_liked<'a>(saved: &'a [Track], term: &str) -> impl Iterator<Item = &'a Track> {
    let needle = term.to_lowercase();
    saved.iter().filter(move |track| {
        track.name.to_lowercase().contains(&needle) || track.artist.to_lowercase().contains(&needle)
    })
}

fn song_entry(track: &Track) -> SongEntry {
    SongEntry {
        name: track.name.clone(),
        artist: track.artist.clone(),
    }
}

fn ranked_artist(artist: &Artist) -> RankedEntry {
    RankedEntry {
        name: artist.name.clone(),
        popularity: artist.popularity,
    }
}

fn ranked_track(track: &Track) -> RankedEntry {
    RankedEntry {
        name: track.name.clone(),
        popularity: track.popularity,
    }
}
