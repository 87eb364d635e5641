pub mod catalog;
pub mod loader;

pub use catalog::Catalog;

use std::path::Path;

use crate::{error::AppResult, models::Rating};

pub const RATINGS_FILE: &str = "u.data";
pub const MOVIES_FILE: &str = "u.item";
pub const GENRES_FILE: &str = "u.genre";

/// Catalog plus the full rating table, as loaded from a dataset directory
#[derive(Debug, Clone)]
pub struct Dataset {
    pub catalog: Catalog,
    pub ratings: Vec<Rating>,
}

impl Dataset {
    /// Loads `u.genre`, `u.item` and `u.data` from `dir`
    pub fn load(dir: &Path, rating_scale: (f64, f64)) -> AppResult<Self> {
        let genres = loader::load_genres(&dir.join(GENRES_FILE))?;
        let movies = loader::load_movies(&dir.join(MOVIES_FILE), &genres)?;
        let ratings = loader::load_ratings(&dir.join(RATINGS_FILE), rating_scale)?;

        let catalog = Catalog::new(genres, movies);

        tracing::info!(
            dir = %dir.display(),
            movies = catalog.len(),
            genres = catalog.genres().len(),
            ratings = ratings.len(),
            "Dataset loaded"
        );

        Ok(Self { catalog, ratings })
    }
}
