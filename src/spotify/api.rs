use async_trait::async_trait;

use crate::error::Result;
use crate::spotify::models::{Artist, TimeRange, Track};

/// The slice of the Spotify Web API the dashboard consumes.
///
/// Every call returns records in the order Spotify sent them. Implementations
/// must not re-sort or filter; that is the shaper's job.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Keyword track search (`type=track`).
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>>;

    /// Artist search (`type=artist`) with Spotify's default page size.
    async fn search_artists(&self, query: &str) -> Result<Vec<Artist>>;

    /// First page of the current user's saved tracks.
    async fn saved_tracks(&self, limit: u32) -> Result<Vec<Track>>;

    async fn top_artists(&self, limit: u32, time_range: TimeRange) -> Result<Vec<Artist>>;

    async fn artist_top_tracks(&self, artist_id: &str) -> Result<Vec<Track>>;
}
