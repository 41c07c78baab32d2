use image::RgbaImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Series,
    Other,
}

/// Ratings of one season, in episode order. `None` marks an episode nobody rated yet.
pub type SeasonRatings = Vec<Option<f32>>;

#[derive(Debug, Clone)]
pub struct SeriesRecord {
    pub title: String,
    pub cover: Option<RgbaImage>,
    pub overall_rating: Option<f32>,
    pub kind: Kind,
    pub episodes: Vec<SeasonRatings>,
}

impl SeriesRecord {
    pub fn is_series(&self) -> bool {
        self.kind == Kind::Series
    }

    pub fn max_episodes(&self) -> usize {
        self.episodes.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Rows padded to the longest season with unrated placeholders.
    pub fn padded_episodes(&self) -> Vec<SeasonRatings> {
        pad_seasons(&self.episodes)
    }
}

pub fn pad_seasons(seasons: &[SeasonRatings]) -> Vec<SeasonRatings> {
    let width = seasons.iter().map(Vec::len).max().unwrap_or(0);
    seasons
        .iter()
        .map(|s| {
            let mut row = s.clone();
            row.resize(width, None);
            row
        })
        .collect()
}
