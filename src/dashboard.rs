//! Interactive loop that keeps one authenticated client for the whole session.

use colored::Colorize;
use std::io::{self, BufRead, Write};
use tracing::warn;

use crate::error::{AppError, Result};
use crate::present::{self, ChartSize, Element};
use crate::query::{limits, Query, QueryDispatcher};
use crate::spotify::{SpotifyApi, TimeRange};

pub const HELP: &str = "\
Commands:
  search <term>                search all of Spotify for tracks
  liked <term>                 filter your liked songs by title or artist
  top [short|medium|long] [N]  your top N artists (1-50) with a popularity chart
  global [N]                   the top N global artists (1-50)
  artist <name>                top songs of an artist
  songs <N>                    how many songs `search` and `liked` show (1-50)
  tracks <N>                   how many top songs `artist` shows (1-20)
  help                         show this help
  quit                         leave the dashboard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Query),
    GlobalArtists(u32),
    SetSongLimit(u32),
    SetArtistTrackLimit(u32),
    Help,
    Quit,
    /// Blank input, or an artist command without a name.
    Nothing,
}

/// Per-session settings that later commands read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub song_limit: u32,
    pub artist_track_limit: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            song_limit: limits::DEFAULT_LIMIT,
            artist_track_limit: limits::DEFAULT_LIMIT,
        }
    }
}

pub fn parse_command(line: &str, session: &Session) -> Result<Command> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "" => Ok(Command::Nothing),
        "search" => Ok(Command::Run(Query::global_search(rest, session.song_limit))),
        "liked" => Ok(Command::Run(Query::liked_songs(rest, session.song_limit))),
        "top" => parse_top(rest),
        "global" => {
            let limit = optional_limit(rest, limits::parse_global_artists)?;
            Ok(Command::GlobalArtists(limit))
        }
        "artist" if rest.is_empty() => Ok(Command::Nothing),
        "artist" => Ok(Command::Run(Query::artist_top_tracks(
            rest,
            session.artist_track_limit,
        ))),
        "songs" => limits::parse_songs(rest)
            .map(Command::SetSongLimit)
            .map_err(AppError::InvalidCommand),
        "tracks" => limits::parse_artist_top_tracks(rest)
            .map(Command::SetArtistTrackLimit)
            .map_err(AppError::InvalidCommand),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(AppError::InvalidCommand(format!(
            "unknown command '{}' (type `help`)",
            other
        ))),
    }
}

/// `top`, `top long`, `top 5`, `top medium 20`
fn parse_top(args: &str) -> Result<Command> {
    let mut time_range = TimeRange::default();
    let mut limit = limits::DEFAULT_LIMIT;

    for arg in args.split_whitespace() {
        if let Ok(range) = arg.parse::<TimeRange>() {
            time_range = range;
        } else if arg.chars().all(|c| c.is_ascii_digit()) {
            limit = limits::parse_top_artists(arg).map_err(AppError::InvalidCommand)?;
        } else {
            return Err(AppError::InvalidCommand(format!(
                "'{}' is neither a time range (short, medium, long) nor a count (1-50)",
                arg
            )));
        }
    }

    Ok(Command::Run(Query::top_artists(limit, time_range)))
}

fn optional_limit(arg: &str, parse: fn(&str) -> std::result::Result<u32, String>) -> Result<u32> {
    if arg.is_empty() {
        Ok(limits::DEFAULT_LIMIT)
    } else {
        parse(arg).map_err(AppError::InvalidCommand)
    }
}

/// Reads commands from stdin until `quit` or end of input.
///
/// Failed API calls are reported and the loop carries on.
pub async fn run<A: SpotifyApi + ?Sized>(api: &A, chart: ChartSize) -> Result<()> {
    let dispatcher = QueryDispatcher::new(api);
    let mut session = Session::default();
    let stdin = io::stdin();

    println!("{}", "Spotify Insights dashboard".cyan().bold());
    println!("{}", HELP);

    loop {
        print!("\n{} ", ">".green().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match parse_command(&line, &session) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e.to_string().red());
                continue;
            }
        };

        match command {
            Command::Run(query) => match dispatcher.run(&query).await {
                Ok(listing) => {
                    present::print_elements(&present::render(&query, &listing, Some(chart)))
                }
                Err(e) => {
                    warn!("Query failed: {}", e);
                    println!("{}", e.to_string().red());
                }
            },
            Command::GlobalArtists(limit) => {
                present::print_elements(&present::render_global_artists(limit as usize))
            }
            Command::SetSongLimit(limit) => {
                session.song_limit = limit;
                present::print_elements(&[Element::Notice(format!(
                    "Song searches now show {} songs",
                    limit
                ))]);
            }
            Command::SetArtistTrackLimit(limit) => {
                session.artist_track_limit = limit;
                present::print_elements(&[Element::Notice(format!(
                    "Artist searches now show {} songs",
                    limit
                ))]);
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
            Command::Nothing => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command> {
        parse_command(line, &Session::default())
    }

    #[test]
    fn test_search_and_liked_keep_whole_term() {
        assert_eq!(
            parse("search  hey jude ").unwrap(),
            Command::Run(Query::global_search("hey jude", 10))
        );
        assert_eq!(
            parse("liked").unwrap(),
            Command::Run(Query::liked_songs("", 10))
        );
    }

    #[test]
    fn test_top_accepts_range_and_limit_in_any_order() {
        assert_eq!(
            parse("top").unwrap(),
            Command::Run(Query::top_artists(10, TimeRange::Short))
        );
        assert_eq!(
            parse("top 5 long").unwrap(),
            Command::Run(Query::top_artists(5, TimeRange::Long))
        );
        assert_eq!(
            parse("TOP medium 50").unwrap(),
            Command::Run(Query::top_artists(50, TimeRange::Medium))
        );
        assert!(parse("top 51").is_err());
    }

    #[test]
    fn test_top_rejects_words_that_are_not_ranges() {
        match parse("top forever") {
            Err(AppError::InvalidCommand(msg)) => {
                assert!(msg.contains("neither a time range"), "{}", msg);
                assert!(!msg.contains("whole number"), "{}", msg);
            }
            other => panic!("expected invalid command, got {:?}", other),
        }

        match parse("top 51") {
            Err(AppError::InvalidCommand(msg)) => assert!(msg.contains("out of range"), "{}", msg),
            other => panic!("expected invalid command, got {:?}", other),
        }
    }

    #[test]
    fn test_songs_sets_limit_used_by_search_and_liked() {
        assert_eq!(parse("songs 25").unwrap(), Command::SetSongLimit(25));
        assert!(matches!(parse("songs 0"), Err(AppError::InvalidCommand(_))));
        assert!(matches!(parse("songs 51"), Err(AppError::InvalidCommand(_))));

        let session = Session {
            song_limit: 25,
            ..Session::default()
        };
        assert_eq!(
            parse_command("search love", &session).unwrap(),
            Command::Run(Query::global_search("love", 25))
        );
        assert_eq!(
            parse_command("liked love", &session).unwrap(),
            Command::Run(Query::liked_songs("love", 25))
        );
    }

    #[test]
    fn test_artist_without_name_does_nothing() {
        assert_eq!(parse("artist").unwrap(), Command::Nothing);
        assert_eq!(parse("artist   ").unwrap(), Command::Nothing);
        assert_eq!(parse("").unwrap(), Command::Nothing);
    }

    #[test]
    fn test_artist_uses_session_track_limit() {
        let session = Session {
            artist_track_limit: 3,
            ..Session::default()
        };
        assert_eq!(
            parse_command("artist Daft Punk", &session).unwrap(),
            Command::Run(Query::artist_top_tracks("Daft Punk", 3))
        );
    }

    #[test]
    fn test_limits_are_validated() {
        assert_eq!(parse("global").unwrap(), Command::GlobalArtists(10));
        assert_eq!(parse("global 3").unwrap(), Command::GlobalArtists(3));
        assert!(parse("global 0").is_err());
        assert_eq!(parse("tracks 20").unwrap(), Command::SetArtistTrackLimit(20));
        assert!(matches!(parse("tracks 21"), Err(AppError::InvalidCommand(_))));
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(matches!(parse("play"), Err(AppError::InvalidCommand(_))));
        assert_eq!(parse("exit").unwrap(), Command::Quit);
        assert_eq!(parse("help").unwrap(), Command::Help);
    }
}
