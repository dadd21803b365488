use async_trait::async_trait;
use rspotify::{
    model::{ArtistId, Country, FullArtist, FullTrack, Market, SearchResult, SearchType},
    prelude::*,
    scopes, AuthCodeSpotify, Config as ClientConfig, Credentials, OAuth,
};
use std::io::{self, Write};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::spotify::api::SpotifyApi;
use crate::spotify::models::{clamp_popularity, Artist, TimeRange, Track};

/// Market used for artist top tracks; the endpoint refuses requests without one.
const TOP_TRACKS_MARKET: Market = Market::Country(Country::UnitedStates);

pub struct SpotifyClient {
    client: AuthCodeSpotify,
}

impl SpotifyClient {
    pub async fn new(config: &Config) -> Result<Self> {
        let creds = Credentials::new(&config.spotify_client_id, &config.spotify_client_secret);

        let oauth = OAuth {
            redirect_uri: config.spotify_redirect_uri.clone(),
            scopes: scopes!("user-library-read", "user-top-read"),
            ..Default::default()
        };

        let client_config = ClientConfig {
            token_cached: true,
            token_refreshing: true,
            cache_path: config.token_cache_path.clone(),
            ..Default::default()
        };

        let client = AuthCodeSpotify::with_config(creds, oauth, client_config);

        if Self::restore_cached_token(&client).await? {
            info!(
                "Reusing cached Spotify token from {}",
                config.token_cache_path.display()
            );
        } else {
            Self::authorize_interactively(&client).await?;
        }

        let user = client.current_user().await?;
        let display_name = user.display_name.unwrap_or_else(|| user.id.to_string());
        info!("Successfully authenticated as Spotify user: {}", display_name);

        Ok(Self { client })
    }

    /// Loads a token from the cache file, refreshing it when it has expired.
    /// Returns `false` when there is nothing usable cached.
    async fn restore_cached_token(client: &AuthCodeSpotify) -> Result<bool> {
        let token = match client.read_token_cache(true).await {
            Ok(Some(token)) => token,
            Ok(None) => return Ok(false),
            Err(e) => {
                debug!("Ignoring unreadable token cache: {}", e);
                return Ok(false);
            }
        };

        let expired = token.is_expired();
        {
            // Released before refreshing, which locks the same token.
            let store = client.get_token();
            let mut guard = store
                .lock()
                .await
                .map_err(|_| AppError::Auth("Token store is unavailable".into()))?;
            *guard = Some(token);
        }

        if expired {
            debug!("Cached token expired, refreshing");
            if let Err(e) = client.refresh_token().await {
                warn!("Failed to refresh cached token: {}", e);
                return Ok(false);
            }
        }

        Ok(true)
    }

    async fn authorize_interactively(client: &AuthCodeSpotify) -> Result<()> {
        let auth_url = client.get_authorize_url(false)?;
        println!("\nOpen this URL in your browser to authorize Spotify:");
        println!("{}\n", auth_url);

        print!("Enter the URL you were redirected to: ");
        io::stdout().flush()?;

        let mut redirect_url = String::new();
        io::stdin().read_line(&mut redirect_url)?;

        let code = client
            .parse_response_code(redirect_url.trim())
            .ok_or_else(|| AppError::Auth("Failed to parse authorization code".into()))?;

        // Also writes the token cache because `token_cached` is set.
        client.request_token(&code).await?;
        Ok(())
    }
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>> {
        debug!(query, limit, "API: search tracks");
        let result = self
            .client
            .search(query, SearchType::Track, None, None, Some(limit), None)
            .await?;

        match result {
            SearchResult::Tracks(page) => Ok(page.items.iter().map(track_from_full).collect()),
            _ => {
                warn!("Track search returned a non-track page");
                Ok(Vec::new())
            }
        }
    }

    async fn search_artists(&self, query: &str) -> Result<Vec<Artist>> {
        debug!(query, "API: search artists");
        let result = self
            .client
            .search(query, SearchType::Artist, None, None, None, None)
            .await?;

        match result {
            SearchResult::Artists(page) => Ok(page.items.iter().map(artist_from_full).collect()),
            _ => {
                warn!("Artist search returned a non-artist page");
                Ok(Vec::new())
            }
        }
    }

    async fn saved_tracks(&self, limit: u32) -> Result<Vec<Track>> {
        debug!(limit, "API: current user saved tracks");
        let page = self
            .client
            .current_user_saved_tracks_manual(None, Some(limit), None)
            .await?;

        info!(
            "Fetched {} of {} saved tracks",
            page.items.len(),
            page.total
        );
        Ok(page
            .items
            .iter()
            .map(|saved| track_from_full(&saved.track))
            .collect())
    }

    async fn top_artists(&self, limit: u32, time_range: TimeRange) -> Result<Vec<Artist>> {
        debug!(limit, time_range = time_range.api_value(), "API: current user top artists");
        let page = self
            .client
            .current_user_top_artists_manual(Some(time_range.into()), Some(limit), None)
            .await?;

        Ok(page.items.iter().map(artist_from_full).collect())
    }

    async fn artist_top_tracks(&self, artist_id: &str) -> Result<Vec<Track>> {
        debug!(artist_id, "API: artist top tracks");
        let id = ArtistId::from_id(artist_id.to_owned())?;
        let tracks = self
            .client
            .artist_top_tracks(id, Some(TOP_TRACKS_MARKET))
            .await?;

        Ok(tracks.iter().map(track_from_full).collect())
    }
}

fn track_from_full(track: &FullTrack) -> Track {
    Track {
        name: track.name.clone(),
        artist: track
            .artists
            .first()
            .map(|a| a.name.clone())
            .unwrap_or_default(),
        popularity: clamp_popularity(track.popularity),
    }
}

fn artist_from_full(artist: &FullArtist) -> Artist {
    Artist {
        id: artist.id.id().to_string(),
        name: artist.name.clone(),
        popularity: clamp_popularity(artist.popularity),
    }
}
