use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
const YOUTUBE_EMBED: &str = "https://www.youtube.com/embed";
const YOUTUBE_WATCH: &str = "https://www.youtube.com/watch";

/// A catalog entry as returned by TMDB list endpoints. Movies carry `title` and
/// `release_date`; TV entries carry `name`/`original_name` and `first_air_date`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Movie {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaKind>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
    #[serde(other)]
    Other,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct MovieResponse {
    #[serde(default)]
    pub results: Vec<Movie>,
}

impl MovieResponse {
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Video {
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub site: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub video_type: String,
}

/// TMDB sends `null` for missing text and numbers; treat it like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoResponse {
    #[serde(default)]
    pub results: Vec<Video>,
}

/// TMDB image widths used by the different views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    W92,
    W500,
    W780,
    Original,
}

impl ImageSize {
    fn segment(self) -> &'static str {
        match self {
            ImageSize::W92 => "w92",
            ImageSize::W500 => "w500",
            ImageSize::W780 => "w780",
            ImageSize::Original => "original",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTier {
    High,
    Mid,
    Low,
}

impl Movie {
    pub fn display_title(&self) -> &str {
        [&self.title, &self.name, &self.original_name]
            .into_iter()
            .filter_map(|t| t.as_deref())
            .find(|t| !t.is_empty())
            .unwrap_or("")
    }

    /// Release date for movies, first air date for TV.
    pub fn air_date(&self) -> Option<NaiveDate> {
        self.release_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .or(self.first_air_date.as_deref())
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    pub fn release_year(&self) -> Option<i32> {
        self.air_date().map(|d| d.year())
    }

    pub fn backdrop_url(&self, size: ImageSize) -> Option<String> {
        image_url(self.backdrop_path.as_deref(), size)
    }

    pub fn poster_url(&self, size: ImageSize) -> Option<String> {
        image_url(self.poster_path.as_deref(), size)
    }

    /// Grid thumbnails prefer the wide backdrop and fall back to the poster.
    pub fn thumbnail_url(&self) -> Option<String> {
        self.backdrop_url(ImageSize::W500)
            .or_else(|| self.poster_url(ImageSize::W500))
    }

    /// Number of filled stars out of five.
    pub fn star_count(&self) -> u8 {
        ((self.vote_average.clamp(0.0, 10.0) / 10.0) * 5.0).round() as u8
    }

    pub fn rating_percent(&self) -> u8 {
        (self.vote_average.clamp(0.0, 10.0) * 10.0).round() as u8
    }

    pub fn rating_tier(&self) -> RatingTier {
        match self.rating_percent() {
            p if p >= 75 => RatingTier::High,
            p if p >= 50 => RatingTier::Mid,
            _ => RatingTier::Low,
        }
    }
}

fn image_url(path: Option<&str>, size: ImageSize) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{IMAGE_BASE}/{}{p}", size.segment()))
}

/// First YouTube trailer with a usable key, in upstream order.
pub fn select_trailer(videos: &[Video]) -> Option<String> {
    videos
        .iter()
        .find(|v| v.site == "YouTube" && v.video_type == "Trailer" && !v.key.is_empty())
        .map(|v| v.key.clone())
}

pub fn trailer_embed_url(key: &str) -> String {
    format!("{YOUTUBE_EMBED}/{key}?autoplay=1")
}

pub fn trailer_watch_url(key: &str) -> String {
    format!("{YOUTUBE_WATCH}?v={key}")
}
