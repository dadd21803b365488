/// Fixed stand-in for a global chart; no API call backs this list.
pub const GLOBAL_TOP_ARTISTS: [&str; 10] = [
    "Drake",
    "Taylor Swift",
    "Ariana Grande",
    "Ed Sheeran",
    "The Weeknd",
    "Billie Eilish",
    "Justin Bieber",
    "Post Malone",
    "Dua Lipa",
    "Kanye West",
];

/// First `limit` names, or all ten when `limit` is larger.
pub fn global_top_artists(limit: usize) -> &'static [&'static str] {
    &GLOBAL_TOP_ARTISTS[..limit.min(GLOBAL_TOP_ARTISTS.len())]
}
