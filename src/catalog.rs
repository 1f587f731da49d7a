//! Browse categories and the TMDB query each one maps to.

/// A browse category. Keys are the identifiers navigation links and stored
/// state use; unknown keys resolve to [`Category::Trending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Trending,
    TopRated,
    Action,
    Comedy,
    Horror,
    Romance,
    Mystery,
    SciFi,
    Western,
    Animation,
    Tv,
    Popular,
}

impl Category {
    /// Categories offered in navigation, in display order.
    pub const NAV: [Category; 11] = [
        Category::Trending,
        Category::TopRated,
        Category::Action,
        Category::Comedy,
        Category::Horror,
        Category::Romance,
        Category::Mystery,
        Category::SciFi,
        Category::Western,
        Category::Animation,
        Category::Tv,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Trending => "fetchTrending",
            Category::TopRated => "fetchTopRated",
            Category::Action => "fetchActionMovies",
            Category::Comedy => "fetchComedyMovies",
            Category::Horror => "fetchHorrorMovies",
            Category::Romance => "fetchRomanceMovies",
            Category::Mystery => "fetchMystery",
            Category::SciFi => "fetchSciFi",
            Category::Western => "fetchWestern",
            Category::Animation => "fetchAnimation",
            Category::Tv => "fetchTV",
            Category::Popular => "fetchPopular",
        }
    }

    /// Path and query for the category, without credential or page.
    pub fn query_template(self) -> &'static str {
        match self {
            Category::Trending => "/trending/all/week?language=en-US",
            Category::TopRated => "/movie/top_rated?language=en-US",
            Category::Popular => "/movie/popular?language=en-US",
            Category::Action => "/discover/movie?with_genres=28",
            Category::Comedy => "/discover/movie?with_genres=35",
            Category::Horror => "/discover/movie?with_genres=27",
            Category::Romance => "/discover/movie?with_genres=10749",
            Category::Mystery => "/discover/movie?with_genres=9648",
            Category::SciFi => "/discover/movie?with_genres=878",
            Category::Western => "/discover/movie?with_genres=37",
            Category::Animation => "/discover/movie?with_genres=16",
            Category::Tv => "/discover/movie?with_genres=10770",
        }
    }

    /// Strict lookup over the navigation categories. Accepts the canonical
    /// key or a short alias such as `trending`, `top-rated` or `sci-fi`,
    /// case-insensitively. The popular feed has no key here.
    pub fn from_key(key: &str) -> Option<Category> {
        let normalized: String = key
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        let bare = normalized.strip_prefix("fetch").unwrap_or(&normalized);
        let bare = bare.strip_suffix("movies").unwrap_or(bare);
        let category = match bare {
            "trending" => Category::Trending,
            "toprated" => Category::TopRated,
            "action" => Category::Action,
            "comedy" => Category::Comedy,
            "horror" => Category::Horror,
            "romance" => Category::Romance,
            "mystery" => Category::Mystery,
            "scifi" => Category::SciFi,
            "western" => Category::Western,
            "animation" => Category::Animation,
            "tv" => Category::Tv,
            _ => return None,
        };
        Some(category)
    }

    /// Lookup with fallback: absent or unknown keys mean trending.
    pub fn resolve(key: Option<&str>) -> Category {
        key.and_then(Category::from_key)
            .unwrap_or(Category::Trending)
    }

    /// Categories shown as carousels on the home page.
    pub fn genre_rows() -> impl Iterator<Item = Category> {
        Self::NAV
            .into_iter()
            .filter(|c| !matches!(c, Category::Trending | Category::TopRated))
    }

    /// Navigation label, e.g. "Action Movies" or "Sci Fi".
    pub fn label(self) -> String {
        let bare = self.key().strip_prefix("fetch").unwrap_or(self.key());
        split_camel_case(bare)
    }

    /// Carousel heading, the label without "Movies", e.g. "Action".
    pub fn row_title(self) -> String {
        let bare = self.key().strip_prefix("fetch").unwrap_or(self.key());
        split_camel_case(&bare.replacen("Movies", "", 1))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

fn split_camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev_lower = false;
    for c in input.chars() {
        if c.is_ascii_uppercase() && prev_lower {
            out.push(' ');
        }
        prev_lower = c.is_ascii_lowercase();
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_and_absent_keys_fall_back_to_trending() {
        assert_eq!(Category::resolve(None), Category::Trending);
        assert_eq!(Category::resolve(Some("nonexistent-key")), Category::Trending);
        assert_eq!(Category::resolve(Some("")), Category::Trending);
        assert_eq!(
            Category::resolve(Some("nonexistent-key")).query_template(),
            Category::resolve(Some("trending")).query_template()
        );
    }

    #[test]
    fn canonical_keys_round_trip() {
        for category in Category::NAV {
            assert_eq!(Category::from_key(category.key()), Some(category));
        }
    }

    #[test]
    fn popular_feed_is_not_browsable_by_key() {
        assert_eq!(Category::from_key("fetchPopular"), None);
        assert_eq!(Category::from_key("popular"), None);
        assert_eq!(Category::resolve(Some("fetchPopular")), Category::Trending);
    }

    #[test]
    fn accepts_short_aliases() {
        assert_eq!(Category::from_key("top-rated"), Some(Category::TopRated));
        assert_eq!(Category::from_key("Sci-Fi"), Some(Category::SciFi));
        assert_eq!(Category::from_key("action"), Some(Category::Action));
        assert_eq!(Category::from_key("TV"), Some(Category::Tv));
        assert_eq!(Category::from_key("documentary"), None);
    }

    #[test]
    fn templates_never_carry_page_or_credential() {
        for category in Category::NAV {
            let template = category.query_template();
            assert!(template.starts_with('/'));
            assert!(template.contains('?'));
            assert!(!template.contains("page="));
            assert!(!template.contains("api_key"));
        }
        assert_eq!(
            Category::Horror.query_template(),
            "/discover/movie?with_genres=27"
        );
    }

    #[test]
    fn labels_are_derived_from_keys() {
        assert_eq!(Category::Action.label(), "Action Movies");
        assert_eq!(Category::TopRated.label(), "Top Rated");
        assert_eq!(Category::SciFi.label(), "Sci Fi");
        assert_eq!(Category::Tv.label(), "TV");
        assert_eq!(Category::Action.row_title(), "Action");
        assert_eq!(Category::Mystery.row_title(), "Mystery");
    }

    #[test]
    fn genre_rows_skip_trending_and_top_rated() {
        let rows: Vec<_> = Category::genre_rows().collect();
        assert_eq!(rows.len(), 9);
        assert!(!rows.contains(&Category::Trending));
        assert!(!rows.contains(&Category::TopRated));
        assert!(!rows.contains(&Category::Popular));
    }
}
