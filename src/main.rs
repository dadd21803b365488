use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::ProgressBar;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use spotify_insights::present::{self, ChartSize};
use spotify_insights::query::limits::{self, DEFAULT_LIMIT};
use spotify_insights::{dashboard, Config, Query, QueryDispatcher, SpotifyClient, TimeRange};

#[derive(Parser)]
#[command(name = "spotify-insights")]
#[command(about = "Search tracks, filter liked songs and chart your top Spotify artists")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find songs whose title or artist contains a word
    Songs {
        /// Word to look for (empty matches every liked song)
        #[arg(default_value = "")]
        term: String,

        /// Search all of Spotify or only your liked songs
        #[arg(long, value_enum, default_value_t = Source::All)]
        source: Source,

        /// How many songs to show (1-50)
        #[arg(long, default_value_t = DEFAULT_LIMIT, value_parser = limits::parse_songs)]
        limit: u32,
    },

    /// Show your top artists with a popularity chart
    TopArtists {
        /// short, medium or long
        #[arg(long, default_value_t = TimeRange::Short)]
        time_range: TimeRange,

        /// How many artists to show (1-50)
        #[arg(long, default_value_t = DEFAULT_LIMIT, value_parser = limits::parse_top_artists)]
        limit: u32,

        /// Skip the popularity chart
        #[arg(long)]
        no_chart: bool,
    },

    /// Show the top global artists (no Spotify login needed)
    GlobalArtists {
        /// How many artists to show (1-50)
        #[arg(long, default_value_t = DEFAULT_LIMIT, value_parser = limits::parse_global_artists)]
        limit: u32,
    },

    /// Show the top songs of an artist
    ArtistTopTracks {
        /// Artist to look up; the first search hit is used
        name: String,

        /// How many songs to show (1-20)
        #[arg(long, default_value_t = DEFAULT_LIMIT, value_parser = limits::parse_artist_top_tracks)]
        limit: u32,
    },

    /// Run queries interactively with a single login
    Dashboard,

    /// Show setup guide
    Setup,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Source {
    /// All of Spotify
    All,
    /// Only your liked songs
    Liked,
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    match cli.command {
        Commands::Songs {
            term,
            source,
            limit,
        } => {
            let query = match source {
                Source::All => Query::global_search(term, limit),
                Source::Liked => Query::liked_songs(term, limit),
            };
            run_query(&query, cli.json, None).await?;
        }
        Commands::TopArtists {
            time_range,
            limit,
            no_chart,
        } => {
            let chart = (!no_chart).then(ChartSize::default);
            run_query(&Query::top_artists(limit, time_range), cli.json, chart).await?;
        }
        Commands::GlobalArtists { limit } => {
            show_global_artists(limit as usize, cli.json)?;
        }
        Commands::ArtistTopTracks { name, limit } => {
            run_query(&Query::artist_top_tracks(name, limit), cli.json, None).await?;
        }
        Commands::Dashboard => {
            let client = connect().await?;
            dashboard::run(&client, ChartSize::default())
                .await
                .context("Dashboard stopped")?;
        }
        Commands::Setup => {
            show_setup_guide();
        }
    }

    Ok(())
}

async fn connect() -> Result<SpotifyClient> {
    let config = Config::from_env().context("Failed to load configuration")?;

    let missing = config.get_missing_config();
    if !missing.is_empty() {
        println!("{}", "Missing configuration:".red());
        for item in &missing {
            println!("   - {}", item);
        }
        println!(
            "\n{}",
            "Put your credentials in cred.env or .env (see `spotify-insights setup`).".yellow()
        );
        std::process::exit(1);
    }

    SpotifyClient::new(&config)
        .await
        .context("Failed to connect to Spotify")
}

async fn run_query(query: &Query, json: bool, chart: Option<ChartSize>) -> Result<()> {
    let client = connect().await?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Asking Spotify...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let listing = QueryDispatcher::new(&client).run(query).await;
    spinner.finish_and_clear();
    let listing = listing.context("Spotify request failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        present::print_elements(&present::render(query, &listing, chart));
    }

    Ok(())
}

fn show_global_artists(limit: usize, json: bool) -> Result<()> {
    if json {
        let names = present::global_top_artists(limit);
        println!("{}", serde_json::to_string_pretty(names)?);
    } else {
        present::print_elements(&present::render_global_artists(limit));
    }
    Ok(())
}

fn show_setup_guide() {
    println!("{}", "Spotify Insights Setup Guide".cyan().bold());
    println!("{}", "=".repeat(50));

    println!("\n{}", "1. Spotify API Setup".yellow());
    println!("   - Go to https://developer.spotify.com/dashboard/");
    println!("   - Create a new app");
    println!("   - Copy your Client ID and Client Secret");
    println!("   - Add 'http://localhost:8888/callback' as a redirect URI");

    println!("\n{}", "2. Configuration".yellow());
    println!("   - Create a cred.env or .env file with:");
    println!("     SPOTIFY_CLIENT_ID=your_spotify_client_id");
    println!("     SPOTIFY_CLIENT_SECRET=your_spotify_client_secret");
    println!("   - Optional:");
    println!("     SPOTIFY_REDIRECT_URI=http://localhost:8888/callback");
    println!("     SPOTIFY_TOKEN_CACHE=.spotify_token_cache.json");

    println!("\n{}", "3. Usage".yellow());
    println!("   - spotify-insights songs love                      (search all of Spotify)");
    println!("   - spotify-insights songs love --source liked       (filter your liked songs)");
    println!("   - spotify-insights top-artists --time-range long   (your top artists + chart)");
    println!("   - spotify-insights artist-top-tracks Adele         (an artist's top songs)");
    println!("   - spotify-insights global-artists --limit 5        (top global artists)");
    println!("   - spotify-insights dashboard                       (interactive mode)");

    println!("\n{}", "You're ready to explore!".green());
}
