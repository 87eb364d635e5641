mod movie;
mod rating;

pub use movie::{Genre, Movie};
pub use rating::Rating;

use serde::{Deserialize, Serialize};

/// A ranked candidate returned by either recommendation lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub movie_id: u32,
    pub title: String,
    /// Comma-joined genre label
    pub genres: String,
    /// Genre similarity for content lookups, estimated rating for user lookups
    pub score: f64,
}

impl Recommendation {
    pub fn new(movie: &Movie, score: f64) -> Self {
        Self {
            movie_id: movie.id,
            title: movie.title.clone(),
            genres: movie.genre_label(),
            score,
        }
    }
}
