use catalog_models::ContentRecord;
use rand::Rng;
use serde::Serialize;

use crate::repository::ContentRepository;

pub const HERO_PICKS: usize = 5;
pub const CONTINUE_WATCHING_LIMIT: usize = 6;
pub const TOP_RATED_LIMIT: usize = 10;
pub const TRENDING_LIMIT: usize = 10;

/// Rails shown on the home screen
#[derive(Debug, Clone, Serialize)]
pub struct HomepageCategories<'a> {
    pub hero: Vec<&'a ContentRecord>,
    pub continue_watching: Vec<&'a ContentRecord>,
    pub top_rated: Vec<&'a ContentRecord>,
    pub popular: Vec<&'a ContentRecord>,
    pub series: Vec<&'a ContentRecord>,
    pub action: Vec<&'a ContentRecord>,
    pub drama: Vec<&'a ContentRecord>,
    pub sci_fi: Vec<&'a ContentRecord>,
    pub coming_soon: Vec<&'a ContentRecord>,
    pub award_winners: Vec<&'a ContentRecord>,
    pub trending: Vec<&'a ContentRecord>,
}

impl<'a> HomepageCategories<'a> {
    /// Rails in display order with their titles
    pub fn rails(&self) -> Vec<(&'static str, &[&'a ContentRecord])> {
        vec![
            ("Featured", self.hero.as_slice()),
            ("Continue Watching", self.continue_watching.as_slice()),
            ("Top Rated", self.top_rated.as_slice()),
            ("Trending Now", self.trending.as_slice()),
            ("Popular Movies", self.popular.as_slice()),
            ("TV Shows", self.series.as_slice()),
            ("Action & Adventure", self.action.as_slice()),
            ("Drama", self.drama.as_slice()),
            ("Sci-Fi & Fantasy", self.sci_fi.as_slice()),
            ("Coming Soon", self.coming_soon.as_slice()),
            ("Award Winners", self.award_winners.as_slice()),
        ]
    }
}

impl ContentRepository {
    pub fn homepage_categories<R>(&self, rng: &mut R) -> HomepageCategories<'_>
    where
        R: Rng + ?Sized,
    {
        let movies = self.movies();

        HomepageCategories {
            hero: self.random_pick(rng, HERO_PICKS),
            continue_watching: movies.iter().take(CONTINUE_WATCHING_LIMIT).copied().collect(),
            top_rated: self.top_rated(TOP_RATED_LIMIT),
            popular: movies,
            series: self.series(),
            action: self.by_genre("Action"),
            drama: self.by_genre("Drama"),
            sci_fi: self.by_any_genre(&["Sci-Fi", "Fantasy"]),
            coming_soon: self.coming_soon(),
            award_winners: self.award_winners(),
            trending: self.trending(TRENDING_LIMIT),
        }
    }
}
