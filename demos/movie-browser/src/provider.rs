use marquee_core::{Signal, signal};

use crate::feed::{FeedKind, FeedSource, Movie};

const POSTER_BASE_HIGH: &str = "https://image.tmdb.org/t/p/w500";
const POSTER_BASE_LOW: &str = "https://image.tmdb.org/t/p/w200";

/// Row model for the list. Identity is the feed id, so a re-fetched record
/// diffs as the same row even when its fields changed.
#[derive(Clone, Debug)]
pub struct MovieViewModel {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub release_date: String,
    pub poster_url_high: String,
    pub poster_url_low: String,
    pub backdrop_url: Option<String>,
}

impl MovieViewModel {
    pub fn new(movie: &Movie) -> Self {
        let poster = movie.poster_path.clone().unwrap_or_default();
        Self {
            id: movie.id,
            title: movie.title.clone(),
            overview: movie
                .overview
                .clone()
                .unwrap_or_else(|| "Not available overview".into()),
            release_date: movie
                .release_date
                .clone()
                .unwrap_or_else(|| "Not available date".into()),
            poster_url_high: format!("{POSTER_BASE_HIGH}{poster}"),
            poster_url_low: format!("{POSTER_BASE_LOW}{poster}"),
            backdrop_url: movie
                .backdrop_path
                .as_ref()
                .map(|path| format!("{POSTER_BASE_HIGH}{path}")),
        }
    }
}

impl PartialEq for MovieViewModel {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MovieViewModel {}

impl std::hash::Hash for MovieViewModel {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Publishes mapped view models whenever a feed load completes.
pub struct MoviesProvider {
    pub movies: Signal<Vec<MovieViewModel>>,
}

impl MoviesProvider {
    pub fn new() -> Self {
        Self {
            movies: signal(Vec::new()),
        }
    }

    pub fn load(&self, source: &dyn FeedSource, kind: FeedKind) -> anyhow::Result<()> {
        let records = source.fetch_feed(kind)?;
        log::info!("loaded {} movies from {kind:?}", records.len());
        self.movies
            .set(records.iter().map(MovieViewModel::new).collect());
        Ok(())
    }
}

impl Default for MoviesProvider {
    fn default() -> Self {
        Self::new()
    }
}
