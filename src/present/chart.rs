use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

use crate::query::RankedEntry;

pub const CHART_TITLE: &str = "Top Artists and Their (Global) Popularity Scores";

const SPOTIFY_GREEN: Color = Color::Rgb(0x1D, 0xB9, 0x54);
const POPULARITY_BOUNDS: [f64; 2] = [0.0, 100.0];
/// Above this many artists only the first and last rank get a tick label.
const MAX_TICK_LABELS: usize = 20;
/// Up to this many artists the ticks carry (possibly shortened) names.
const MAX_NAME_TICKS: usize = 8;
/// Shortest name tick worth showing; below this ranks are used.
const MIN_NAME_TICK: usize = 4;
/// Columns taken by the borders and the y-axis labels.
const AXIS_GUTTER: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    pub width: u16,
    pub height: u16,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self {
            width: 80,
            height: 20,
        }
    }
}

/// Draws popularity (y, fixed 0-100) against artist (x, in list order) as a
/// connected line chart and returns it as text rows, followed by a legend
/// mapping each rank to its artist name.
pub fn render_popularity_chart(artists: &[RankedEntry], size: ChartSize) -> Vec<String> {
    let width = size.width.max(30);
    let height = size.height.max(8);

    let points: Vec<(f64, f64)> = artists
        .iter()
        .enumerate()
        .map(|(i, artist)| (i as f64, f64::from(artist.popularity)))
        .collect();

    let style = Style::default().fg(SPOTIFY_GREEN);
    let datasets = vec![
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(style)
            .data(&points),
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(style)
            .data(&points),
    ];

    let last_index = artists.len().saturating_sub(1).max(1) as f64;
    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(CHART_TITLE))
        .x_axis(
            Axis::default()
                .title("Artists")
                .bounds([0.0, last_index])
                .labels(tick_labels(artists, usize::from(width))),
        )
        .y_axis(
            Axis::default()
                .title("Popularity Score")
                .bounds(POPULARITY_BOUNDS)
                .labels(["0", "50", "100"]),
        );

    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    chart.render(area, &mut buffer);

    let mut rows: Vec<String> = (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect();

    rows.extend(legend(artists, usize::from(width)));
    rows
}

/// Artist names when a few of them fit side by side, ranks otherwise.
fn tick_labels(artists: &[RankedEntry], width: usize) -> Vec<String> {
    let count = artists.len();
    if count == 0 || count > MAX_NAME_TICKS {
        return rank_labels(count);
    }

    let budget = (width.saturating_sub(AXIS_GUTTER) / count).saturating_sub(1);
    if budget < MIN_NAME_TICK {
        return rank_labels(count);
    }

    artists
        .iter()
        .map(|artist| shorten(&artist.name, budget))
        .collect()
}

fn shorten(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let mut short: String = name.chars().take(max - 1).collect();
        short.push('…');
        short
    }
}

fn rank_labels(count: usize) -> Vec<String> {
    if count <= MAX_TICK_LABELS {
        (1..=count).map(|rank| rank.to_string()).collect()
    } else {
        vec!["1".to_string(), count.to_string()]
    }
}

/// `1. Name  2. Name ...` wrapped to `width` columns.
fn legend(artists: &[RankedEntry], width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();

    for (i, artist) in artists.iter().enumerate() {
        let entry = format!("{}. {}", i + 1, artist.name);
        let needed = if current.is_empty() {
            entry.chars().count()
        } else {
            current.chars().count() + 2 + entry.chars().count()
        };

        if !current.is_empty() && needed > width {
            rows.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push_str("  ");
        }
        current.push_str(&entry);
    }

    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artists(names: &[(&str, u8)]) -> Vec<RankedEntry> {
        names
            .iter()
            .map(|(name, popularity)| RankedEntry {
                name: name.to_string(),
                popularity: *popularity,
            })
            .collect()
    }

    #[test]
    fn test_chart_has_title_axis_and_markers() {
        let entries = artists(&[("Drake", 95), ("Queen", 83), ("Dua Lipa", 88)]);
        let size = ChartSize::default();
        let rows = render_popularity_chart(&entries, size);

        assert!(rows[0].contains(CHART_TITLE), "{}", rows[0]);
        let body = &rows[..size.height as usize];
        assert!(body.iter().any(|row| row.contains("100")));
        assert!(
            body.iter()
                .any(|row| row.chars().any(|c| ('\u{2800}'..='\u{28FF}').contains(&c) || c == '•'))
        );
    }

    #[test]
    fn test_legend_follows_chart_in_order() {
        let entries = artists(&[("Drake", 95), ("Queen", 83)]);
        let size = ChartSize::default();
        let rows = render_popularity_chart(&entries, size);

        assert_eq!(rows.len(), size.height as usize + 1);
        assert_eq!(rows.last().unwrap(), "1. Drake  2. Queen");
    }

    #[test]
    fn test_legend_wraps_to_width() {
        let entries = artists(&[
            ("Ariana Grande", 90),
            ("Billie Eilish", 89),
            ("Justin Bieber", 88),
        ]);
        let rows = legend(&entries, 34);

        assert_eq!(rows, vec!["1. Ariana Grande  2. Billie Eilish", "3. Justin Bieber"]);
    }

    #[test]
    fn test_few_artists_use_names_as_ticks() {
        let entries = artists(&[("Drake", 95), ("Queen", 83), ("Dua Lipa", 88)]);

        assert_eq!(tick_labels(&entries, 80), vec!["Drake", "Queen", "Dua Lipa"]);
    }

    #[test]
    fn test_name_ticks_are_shortened_to_fit() {
        let entries = artists(&[
            ("Ariana Grande", 90),
            ("Billie Eilish", 89),
            ("Justin Bieber", 88),
        ]);

        // (30 - 8) / 3 - 1 = 6 columns per name
        assert_eq!(tick_labels(&entries, 30), vec!["Arian…", "Billi…", "Justi…"]);
    }

    #[test]
    fn test_crowded_ticks_fall_back_to_ranks() {
        let entries = artists(&[("Drake", 95), ("Queen", 83), ("Dua Lipa", 88)]);
        assert_eq!(tick_labels(&entries, 20), vec!["1", "2", "3"]);

        let many: Vec<RankedEntry> = (0..9)
            .map(|i| RankedEntry {
                name: format!("Artist {}", i),
                popularity: 50,
            })
            .collect();
        assert_eq!(tick_labels(&many, 200).len(), 9);
        assert_eq!(tick_labels(&many, 200)[0], "1");
    }

    #[test]
    fn test_many_artists_get_end_labels_only() {
        assert_eq!(rank_labels(3), vec!["1", "2", "3"]);
        assert_eq!(rank_labels(50), vec!["1", "50"]);
    }
}
