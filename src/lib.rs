pub mod config;
pub mod dashboard;
pub mod error;
pub mod present;
pub mod query;
pub mod spotify;

pub use config::Config;
pub use error::{AppError, Result};
pub use query::{Listing, Query, QueryDispatcher};
pub use spotify::{Artist, SpotifyApi, SpotifyClient, TimeRange, Track};
