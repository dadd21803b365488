pub mod api;
pub mod client;
pub mod models;

pub use api::SpotifyApi;
pub use client::SpotifyClient;
pub use models::{Artist, TimeRange, Track};
