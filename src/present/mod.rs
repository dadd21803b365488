//! Turns shaped listings into terminal output.

pub mod chart;
pub mod global;

pub use chart::{render_popularity_chart, ChartSize};
pub use global::{global_top_artists, GLOBAL_TOP_ARTISTS};

use colored::Colorize;

use crate::query::{Listing, Query, RankedEntry, SongEntry};

pub const NO_ARTIST_MESSAGE: &str = "Artist not found. Please try a different name.";

/// One printable piece of a rendered result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Heading(String),
    Line(String),
    /// Informational message for an empty result; not an error.
    Notice(String),
    Chart(Vec<String>),
}

/// Renders `listing` for `query`. A chart is attached to non-empty top-artist
/// listings when `chart` is given.
pub fn render(query: &Query, listing: &Listing, chart: Option<ChartSize>) -> Vec<Element> {
    let mut out = Vec::new();

    match listing {
        Listing::Songs { songs } => {
            out.push(Element::Heading("Here are some songs:".to_string()));
            out.extend(numbered(songs.iter().map(song_line)));
        }
        Listing::NoLikedMatches { term } => {
            out.push(Element::Notice(no_liked_matches_message(term)));
        }
        Listing::TopArtists { artists } => {
            out.push(Element::Heading(format!("Your Top {} Artists:", query.limit)));
            out.extend(numbered(artists.iter().map(ranked_line)));
            if let Some(size) = chart {
                if !artists.is_empty() {
                    out.push(Element::Chart(render_popularity_chart(artists, size)));
                }
            }
        }
        Listing::ArtistTopTracks { tracks } => {
            out.push(Element::Heading(format!(
                "Top {} Songs by {}:",
                query.limit, query.term
            )));
            out.extend(numbered(tracks.iter().map(ranked_line)));
        }
        Listing::ArtistNotFound => {
            out.push(Element::Notice(NO_ARTIST_MESSAGE.to_string()));
        }
    }

    out
}

/// Renders the first `limit` names of the fixed global list.
pub fn render_global_artists(limit: usize) -> Vec<Element> {
    let mut out = vec![Element::Heading("Top Global Artists".to_string())];
    out.extend(numbered(
        global_top_artists(limit).iter().map(|name| name.to_string()),
    ));
    out
}

pub fn no_liked_matches_message(term: &str) -> String {
    format!(
        "No liked songs found with the mood/word '{}'. Try a different word.",
        term
    )
}

pub fn print_elements(elements: &[Element]) {
    for element in elements {
        match element {
            Element::Heading(text) => println!("{}", text.cyan().bold()),
            Element::Line(text) => println!("{}", text),
            Element::Notice(text) => println!("{}", text.yellow()),
            Element::Chart(lines) => {
                println!();
                for line in lines {
                    println!("{}", line);
                }
            }
        }
    }
}

fn numbered(lines: impl Iterator<Item = String>) -> impl Iterator<Item = Element> {
    lines
        .enumerate()
        .map(|(i, line)| Element::Line(format!("{}. {}", i + 1, line)))
}

fn song_line(song: &SongEntry) -> String {
    format!("{} by {}", song.name, song.artist)
}

fn ranked_line(entry: &RankedEntry) -> String {
    format!("{} (Popularity: {})", entry.name, entry.popularity)
}
