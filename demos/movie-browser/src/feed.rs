use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeedKind {
    NowPlaying,
    TopRated,
}

impl FeedKind {
    pub fn path(&self) -> &'static str {
        match self {
            FeedKind::NowPlaying => "/3/movie/now_playing",
            FeedKind::TopRated => "/3/movie/top_rated",
        }
    }
}

/// Raw feed record. Absent fields decode as `None` instead of failing the
/// whole page.
#[derive(Clone, Debug, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MovieFeedPage {
    pub results: Vec<Movie>,
}

/// The external feed collaborator. The list only ever consumes the resulting
/// records, never the fetch mechanism.
pub trait FeedSource {
    fn fetch_feed(&self, kind: FeedKind) -> anyhow::Result<Vec<Movie>>;
}

/// Feed pages bundled with the demo, standing in for the remote API.
pub struct BundledFeed;

impl FeedSource for BundledFeed {
    fn fetch_feed(&self, kind: FeedKind) -> anyhow::Result<Vec<Movie>> {
        let raw = match kind {
            FeedKind::NowPlaying => include_str!("../assets/now_playing.json"),
            FeedKind::TopRated => include_str!("../assets/top_rated.json"),
        };
        let page: MovieFeedPage = serde_json::from_str(raw)?;
        log::debug!("decoded {} records from {}", page.results.len(), kind.path());
        Ok(page.results)
    }
}
