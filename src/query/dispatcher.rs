use tracing::{debug, info};

use crate::error::Result;
use crate::query::limits::SAVED_TRACKS_PAGE_SIZE;
use crate::query::shape::{shape, Listing};
use crate::query::{Mode, Query};
use crate::spotify::{Artist, SpotifyApi, Track};

/// Raw result of the external call(s) behind one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    SearchTracks(Vec<Track>),
    SavedTracks(Vec<Track>),
    TopArtists(Vec<Artist>),
    ArtistTopTracks(Vec<Track>),
    ArtistNotFound,
}

/// Turns a [`Query`] into Spotify calls against one authenticated handle.
pub struct QueryDispatcher<'a, A: SpotifyApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: SpotifyApi + ?Sized> QueryDispatcher<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Issues the calls for `query` without post-processing.
    ///
    /// Any failure (expired token, network, rate limit) comes back as the
    /// same `SpotifyApi` error; nothing is retried.
    pub async fn dispatch(&self, query: &Query) -> Result<Response> {
        debug!(mode = ?query.mode, term = %query.term, limit = query.limit, "Dispatching query");

        let response = match query.mode {
            Mode::GlobalSearch => {
                Response::SearchTracks(self.api.search_tracks(&query.term, query.limit).await?)
            }
            Mode::LikedSongs => {
                Response::SavedTracks(self.api.saved_tracks(SAVED_TRACKS_PAGE_SIZE).await?)
            }
            Mode::TopArtists => {
                let time_range = query.time_range.unwrap_or_default();
                Response::TopArtists(self.api.top_artists(query.limit, time_range).await?)
            }
            Mode::ArtistTopTracks => self.artist_top_tracks(&query.term).await?,
        };

        Ok(response)
    }

    /// Dispatches `query` and shapes the response for presentation.
    pub async fn run(&self, query: &Query) -> Result<Listing> {
        let response = self.dispatch(query).await?;
        let listing = shape(query, response);
        info!("{:?} query produced {} entries", query.mode, listing.len());
        Ok(listing)
    }

    /// Picks the first artist matching `name` and fetches its top tracks.
    /// Further matches are ignored.
    async fn artist_top_tracks(&self, name: &str) -> Result<Response> {
        let artists = self.api.search_artists(&format!("artist:{}", name)).await?;

        let Some(artist) = artists.first() else {
            info!("No artist found for '{}'", name);
            return Ok(Response::ArtistNotFound);
        };

        debug!("Resolved '{}' to {} ({})", name, artist.name, artist.id);
        let tracks = self.api.artist_top_tracks(&artist.id).await?;
        Ok(Response::ArtistTopTracks(tracks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::query::shape::SongEntry;
    use crate::spotify::TimeRange;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        SearchTracks(String, u32),
        SearchArtists(String),
        SavedTracks(u32),
        TopArtists(u32, TimeRange),
        ArtistTopTracks(String),
    }

    #[derive(Default)]
    struct MockApi {
        tracks: Vec<Track>,
        artists: Vec<Artist>,
        fail: bool,
        calls: Mutex<Vec<Call>>,
    }

    impl MockApi {
        fn record(&self, call: Call) -> Result<()> {
            self.calls.lock().unwrap().push(call);
            if self.fail {
                Err(AppError::Auth("token expired".into()))
            } else {
                Ok(())
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SpotifyApi for MockApi {
        async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>> {
            self.record(Call::SearchTracks(query.to_string(), limit))?;
            Ok(self.tracks.clone())
        }

        async fn search_artists(&self, query: &str) -> Result<Vec<Artist>> {
            self.record(Call::SearchArtists(query.to_string()))?;
            Ok(self.artists.clone())
        }

        async fn saved_tracks(&self, limit: u32) -> Result<Vec<Track>> {
            self.record(Call::SavedTracks(limit))?;
            Ok(self.tracks.clone())
        }

        async fn top_artists(&self, limit: u32, time_range: TimeRange) -> Result<Vec<Artist>> {
            self.record(Call::TopArtists(limit, time_range))?;
            Ok(self.artists.clone())
        }

        async fn artist_top_tracks(&self, artist_id: &str) -> Result<Vec<Track>> {
            self.record(Call::ArtistTopTracks(artist_id.to_string()))?;
            Ok(self.tracks.clone())
        }
    }

    fn numbered_tracks(count: usize) -> Vec<Track> {
        (1..=count)
            .map(|i| Track::mock(&format!("Love Song {}", i), &format!("Artist {}", i)))
            .collect()
    }

    #[tokio::test]
    async fn test_global_search_keeps_service_order_and_limit() {
        let api = MockApi {
            tracks: numbered_tracks(15),
            ..Default::default()
        };
        let listing = QueryDispatcher::new(&api)
            .run(&Query::global_search("love", 10))
            .await
            .unwrap();

        assert_eq!(api.calls(), vec![Call::SearchTracks("love".to_string(), 10)]);
        match listing {
            Listing::Songs { songs } => {
                assert_eq!(songs.len(), 10);
                assert_eq!(
                    songs[0],
                    SongEntry {
                        name: "Love Song 1".to_string(),
                        artist: "Artist 1".to_string(),
                    }
                );
                assert_eq!(songs[9].name, "Love Song 10");
            }
            other => panic!("expected songs, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_liked_songs_always_fetch_one_page_of_fifty() {
        let api = MockApi {
            tracks: numbered_tracks(3),
            ..Default::default()
        };
        QueryDispatcher::new(&api)
            .run(&Query::liked_songs("love", 2))
            .await
            .unwrap();

        assert_eq!(api.calls(), vec![Call::SavedTracks(50)]);
    }

    #[tokio::test]
    async fn test_top_artists_pass_limit_and_time_range() {
        let api = MockApi {
            artists: vec![Artist::mock("Queen", 83)],
            ..Default::default()
        };
        let listing = QueryDispatcher::new(&api)
            .run(&Query::top_artists(5, TimeRange::Long))
            .await
            .unwrap();

        assert_eq!(api.calls(), vec![Call::TopArtists(5, TimeRange::Long)]);
        assert_eq!(listing.len(), 1);
    }

    #[tokio::test]
    async fn test_artist_top_tracks_use_first_search_hit() {
        let api = MockApi {
            artists: vec![Artist::mock("Adele", 90), Artist::mock("Adele Tribute", 10)],
            tracks: numbered_tracks(12),
            ..Default::default()
        };
        let listing = QueryDispatcher::new(&api)
            .run(&Query::artist_top_tracks("Adele", 5))
            .await
            .unwrap();

        assert_eq!(
            api.calls(),
            vec![
                Call::SearchArtists("artist:Adele".to_string()),
                Call::ArtistTopTracks("adele_id".to_string()),
            ]
        );
        assert_eq!(listing.len(), 5);
    }

    #[tokio::test]
    async fn test_unknown_artist_stops_after_search() {
        let api = MockApi::default();
        let listing = QueryDispatcher::new(&api)
            .run(&Query::artist_top_tracks("Adele", 10))
            .await
            .unwrap();

        assert_eq!(listing, Listing::ArtistNotFound);
        assert_eq!(api.calls(), vec![Call::SearchArtists("artist:Adele".to_string())]);
    }

    #[tokio::test]
    async fn test_repeated_query_is_idempotent() {
        let api = MockApi {
            tracks: numbered_tracks(8),
            ..Default::default()
        };
        let dispatcher = QueryDispatcher::new(&api);
        let query = Query::liked_songs("song", 4);

        let first = dispatcher.run(&query).await.unwrap();
        let second = dispatcher.run(&query).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_external_failure_propagates() {
        let api = MockApi {
            fail: true,
            ..Default::default()
        };
        let result = QueryDispatcher::new(&api)
            .run(&Query::global_search("love", 10))
            .await;

        assert!(matches!(result, Err(AppError::Auth(_))));
    }
}
