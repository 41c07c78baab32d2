use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;

const TMDB_BASE: &str = "https://api.themoviedb.org/3";
const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w342";

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    language: String,
}

#[async_trait]
pub trait TmdbApi: Send + Sync {
    async fn search_multi(&self, query: &str) -> Result<Option<SearchHit>>;
    async fn fetch_show(&self, id: i32) -> Result<ShowDetails>;
    async fn fetch_season(&self, id: i32, season: i32) -> Result<SeasonDetails>;
    async fn fetch_movie(&self, id: i32) -> Result<MovieDetails>;
    async fn fetch_poster(&self, poster_path: &str) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Tv,
    Movie,
    Person,
    #[serde(other)]
    Unknown,
}

/// A single entry of `search/multi`. TV hits carry `name`, movie hits `title`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub id: i32,
    pub media_type: MediaType,
    pub name: Option<String>,
    pub title: Option<String>,
}

impl SearchHit {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShowDetails {
    pub id: i32,
    pub name: String,
    pub first_air_date: Option<String>,
    pub last_air_date: Option<String>,
    #[serde(default)]
    pub in_production: bool,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u32,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub seasons: Vec<SeasonSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonSummary {
    pub season_number: i32,
    #[serde(default)]
    pub episode_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonDetails {
    pub season_number: i32,
    #[serde(default)]
    pub episodes: Vec<EpisodeDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EpisodeDetails {
    pub episode_number: i32,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetails {
    pub id: i32,
    pub title: String,
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u32,
    pub poster_path: Option<String>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

impl TmdbClient {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, TMDB_BASE)
    }

    pub fn with_base_url(config: &Config, base_url: &str) -> Result<Self> {
        let user_agent = format!("tvheat/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()
            .context("Failed to build TMDB HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
        })
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T> {
        debug!("GET {}", redact_key(url));
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("request to {} failed", redact_key(url)))?;
        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("reading body of {} failed", redact_key(url)))?;
        if !status.is_success() {
            return Err(anyhow!("{} ({}) -> {}", redact_key(url), status, text));
        }
        let parsed: T = serde_json::from_str(&text).context("JSON parse failed")?;
        Ok(parsed)
    }
}

#[async_trait]
impl TmdbApi for TmdbClient {
    async fn search_multi(&self, query: &str) -> Result<Option<SearchHit>> {
        let url = format!(
            "{}/search/multi?api_key={}&query={}&language={}&include_adult=false",
            self.base_url,
            self.api_key,
            urlencoding::encode(query),
            self.language
        );
        let data: SearchResponse = self.get_json(&url).await?;
        Ok(first_title_hit(data.results))
    }

    async fn fetch_show(&self, id: i32) -> Result<ShowDetails> {
        let url = format!(
            "{}/tv/{id}?language={}&api_key={}",
            self.base_url, self.language, self.api_key
        );
        self.get_json(&url).await
    }

    async fn fetch_season(&self, id: i32, season: i32) -> Result<SeasonDetails> {
        let url = format!(
            "{}/tv/{id}/season/{season}?language={}&api_key={}",
            self.base_url, self.language, self.api_key
        );
        self.get_json(&url).await
    }

    async fn fetch_movie(&self, id: i32) -> Result<MovieDetails> {
        let url = format!(
            "{}/movie/{id}?language={}&api_key={}",
            self.base_url, self.language, self.api_key
        );
        self.get_json(&url).await
    }

    async fn fetch_poster(&self, poster_path: &str) -> Result<Vec<u8>> {
        let url = poster_url(poster_path);
        debug!("GET {}", url);
        let res = self
            .client
            .get(&url)
            .send()
            .await
            .context("poster request failed")?;
        let status = res.status();
        if !status.is_success() {
            return Err(anyhow!("{} -> {}", url, status));
        }
        let bytes = res.bytes().await.context("reading poster failed")?;
        Ok(bytes.to_vec())
    }
}

/// People are never a lookup target; the first show or movie wins.
fn first_title_hit(results: Vec<SearchHit>) -> Option<SearchHit> {
    results
        .into_iter()
        .find(|hit| matches!(hit.media_type, MediaType::Tv | MediaType::Movie))
}

pub fn poster_url(poster_path: &str) -> String {
    format!("{POSTER_BASE}{poster_path}")
}

fn redact_key(url: &str) -> String {
    match url.find("api_key=") {
        Some(start) => {
            let value_start = start + "api_key=".len();
            let end = url[value_start..]
                .find('&')
                .map(|i| value_start + i)
                .unwrap_or(url.len());
            format!("{}***{}", &url[..value_start], &url[end..])
        }
        None => url.to_string(),
    }
}

pub fn extract_year(date: &str) -> Option<&str> {
    date.split('-')
        .next()
        .filter(|y| y.len() == 4 && y.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_skips_people() {
        let body = r#"{
            "page": 1,
            "results": [
                {"id": 17419, "media_type": "person", "name": "Bryan Cranston"},
                {"id": 1396, "media_type": "tv", "name": "Breaking Bad"},
                {"id": 559969, "media_type": "movie", "title": "El Camino"}
            ]
        }"#;
        let data: SearchResponse = serde_json::from_str(body).unwrap();
        let hit = first_title_hit(data.results).unwrap();
        assert_eq!(hit.id, 1396);
        assert_eq!(hit.media_type, MediaType::Tv);
        assert_eq!(hit.display_name(), "Breaking Bad");
    }

    #[test]
    fn unknown_media_type_is_tolerated() {
        let body = r#"{"results": [{"id": 1, "media_type": "collection", "name": "X"}]}"#;
        let data: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(data.results[0].media_type, MediaType::Unknown);
        assert!(first_title_hit(data.results).is_none());
    }

    #[test]
    fn season_details_parse_with_missing_votes() {
        let body = r#"{
            "season_number": 1,
            "episodes": [
                {"episode_number": 1, "vote_average": 8.2, "vote_count": 120},
                {"episode_number": 2}
            ]
        }"#;
        let season: SeasonDetails = serde_json::from_str(body).unwrap();
        assert_eq!(season.episodes.len(), 2);
        assert_eq!(season.episodes[1].vote_count, 0);
        assert_eq!(season.episodes[1].vote_average, 0.0);
    }

    #[test]
    fn api_key_is_redacted() {
        let url = format!("{TMDB_BASE}/tv/1?api_key=secret&language=en-US");
        let redacted = redact_key(&url);
        assert!(!redacted.contains("secret"));
        assert!(redacted.ends_with("api_key=***&language=en-US"));
        assert_eq!(
            redact_key("https://example.com/?api_key=abc"),
            "https://example.com/?api_key=***"
        );
    }

    #[tokio::test]
    async fn transport_errors_do_not_leak_the_api_key() {
        let config = Config {
            api_key: "SECRETKEY123".to_string(),
            language: "en-US".to_string(),
            fps: 60,
            include_specials: false,
            log_file: std::path::PathBuf::from("logs/tvheat.log"),
        };
        // Nothing listens on the discard port.
        let client = TmdbClient::with_base_url(&config, "http://127.0.0.1:9/3").unwrap();

        let err = client.search_multi("Breaking Bad").await.unwrap_err();
        let msg = format!("{:#}", err);
        assert!(!msg.contains("SECRETKEY123"), "{}", msg);
        assert!(msg.contains("api_key=***"), "{}", msg);

        let err = client.fetch_season(1396, 1).await.unwrap_err();
        assert!(!format!("{:#}", err).contains("SECRETKEY123"));
    }

    #[test]
    fn year_is_taken_from_iso_dates() {
        assert_eq!(extract_year("2008-01-20"), Some("2008"));
        assert_eq!(extract_year(""), None);
        assert_eq!(extract_year("soon"), None);
    }
}
