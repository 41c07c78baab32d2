//! Turns a free-text title into a [`SeriesRecord`] using TMDB.

use anyhow::{anyhow, Context, Result};
use image::imageops::FilterType;
use image::RgbaImage;
use tracing::{debug, info, warn};

use crate::models::{Kind, SeasonRatings, SeriesRecord};
use crate::tmdb::{extract_year, EpisodeDetails, MediaType, ShowDetails, TmdbApi};

/// Cover thumbnail size in pixels (2:3, like a poster).
pub const COVER_WIDTH: u32 = 64;
pub const COVER_HEIGHT: u32 = 96;

#[derive(Debug, Clone, Copy, Default)]
pub struct LookupOptions {
    pub include_specials: bool,
}

pub async fn lookup_series(
    api: &dyn TmdbApi,
    query: &str,
    options: LookupOptions,
) -> Result<SeriesRecord> {
    let hit = api
        .search_multi(query)
        .await?
        .ok_or_else(|| anyhow!("No TMDB result for '{}'", query))?;
    info!(
        "Matched '{}' -> '{}' ({:?} {})",
        query,
        hit.display_name(),
        hit.media_type,
        hit.id
    );

    match hit.media_type {
        MediaType::Tv => lookup_show(api, hit.id, options).await,
        _ => lookup_other(api, hit.id).await,
    }
}

async fn lookup_show(api: &dyn TmdbApi, id: i32, options: LookupOptions) -> Result<SeriesRecord> {
    let show = api
        .fetch_show(id)
        .await
        .with_context(|| format!("Failed to fetch TMDB show {}", id))?;

    let mut season_numbers: Vec<i32> = show
        .seasons
        .iter()
        .map(|s| s.season_number)
        .filter(|n| options.include_specials || *n > 0)
        .collect();
    season_numbers.sort_unstable();
    season_numbers.dedup();

    let mut episodes = Vec::with_capacity(season_numbers.len());
    for number in season_numbers {
        let season = api
            .fetch_season(id, number)
            .await
            .with_context(|| format!("Failed to fetch season {} of show {}", number, id))?;
        debug!(
            "Season {} of '{}': {} episodes",
            number,
            show.name,
            season.episodes.len()
        );
        episodes.push(season_ratings(season.episodes));
    }

    let cover = load_cover(api, show.poster_path.as_deref()).await;
    Ok(SeriesRecord {
        title: show_title(&show),
        cover,
        overall_rating: rating(show.vote_average, show.vote_count),
        kind: Kind::Series,
        episodes,
    })
}

async fn lookup_other(api: &dyn TmdbApi, id: i32) -> Result<SeriesRecord> {
    let movie = api
        .fetch_movie(id)
        .await
        .with_context(|| format!("Failed to fetch TMDB movie {}", id))?;
    let title = match movie.release_date.as_deref().and_then(extract_year) {
        Some(year) => format!("{} ({})", movie.title, year),
        None => movie.title.clone(),
    };
    let cover = load_cover(api, movie.poster_path.as_deref()).await;
    Ok(SeriesRecord {
        title,
        cover,
        overall_rating: rating(movie.vote_average, movie.vote_count),
        kind: Kind::Other,
        episodes: Vec::new(),
    })
}

fn season_ratings(mut episodes: Vec<EpisodeDetails>) -> SeasonRatings {
    episodes.sort_by_key(|e| e.episode_number);
    episodes.iter().map(episode_rating).collect()
}

/// An episode without votes counts as 0. `None` is left for grid padding.
fn episode_rating(episode: &EpisodeDetails) -> Option<f32> {
    Some(rating(episode.vote_average, episode.vote_count).unwrap_or(0.0))
}

/// TMDB reports 0.0 for titles without votes; the overall rating is then omitted.
fn rating(vote_average: f32, vote_count: u32) -> Option<f32> {
    (vote_count > 0).then_some(vote_average)
}

fn show_title(show: &ShowDetails) -> String {
    let first = show.first_air_date.as_deref().and_then(extract_year);
    let last = show.last_air_date.as_deref().and_then(extract_year);
    match (first, last) {
        (None, _) => show.name.clone(),
        (Some(first), _) if show.in_production => format!("{} ({}– )", show.name, first),
        (Some(first), Some(last)) if last != first => {
            format!("{} ({}–{})", show.name, first, last)
        }
        (Some(first), _) => format!("{} ({})", show.name, first),
    }
}

async fn load_cover(api: &dyn TmdbApi, poster_path: Option<&str>) -> Option<RgbaImage> {
    let path = poster_path?;
    let bytes = match api.fetch_poster(path).await {
        Ok(b) => b,
        Err(e) => {
            warn!("Failed to download cover {}: {:#}", path, e);
            return None;
        }
    };
    match decode_cover(&bytes) {
        Ok(img) => Some(img),
        Err(e) => {
            warn!("Failed to decode cover {}: {:#}", path, e);
            None
        }
    }
}

pub fn decode_cover(bytes: &[u8]) -> Result<RgbaImage> {
    let img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(img
        .resize_exact(COVER_WIDTH, COVER_HEIGHT, FilterType::Triangle)
        .to_rgba8())
}
