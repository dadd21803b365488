//! Bounds for the user-facing count inputs.
//!
//! The query pipeline itself accepts any `u32`; these ranges are enforced
//! where users type numbers (CLI flags and dashboard commands).

use std::ops::RangeInclusive;

pub const DEFAULT_LIMIT: u32 = 10;

/// Saved tracks fetched for the liked-songs filter, whatever the display limit.
pub const SAVED_TRACKS_PAGE_SIZE: u32 = 50;

pub const SONGS: RangeInclusive<u32> = 1..=50;
pub const TOP_ARTISTS: RangeInclusive<u32> = 1..=50;
pub const GLOBAL_ARTISTS: RangeInclusive<u32> = 1..=50;
pub const ARTIST_TOP_TRACKS: RangeInclusive<u32> = 1..=20;

pub fn parse_in(s: &str, range: RangeInclusive<u32>) -> Result<u32, String> {
    let value: u32 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a whole number", s.trim()))?;

    if range.contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "{} is out of range ({}-{})",
            value,
            range.start(),
            range.end()
        ))
    }
}

pub fn parse_songs(s: &str) -> Result<u32, String> {
    parse_in(s, SONGS)
}

pub fn parse_top_artists(s: &str) -> Result<u32, String> {
    parse_in(s, TOP_ARTISTS)
}

pub fn parse_global_artists(s: &str) -> Result<u32, String> {
    parse_in(s, GLOBAL_ARTISTS)
}

pub fn parse_artist_top_tracks(s: &str) -> Result<u32, String> {
    parse_in(s, ARTIST_TOP_TRACKS)
}
