use std::collections::{HashMap, HashSet};

use crate::models::{Genre, Movie, Rating};

/// The movie catalog shared by both recommendation pipelines.
///
/// Catalog positions index the rows of the similarity matrix, so the
/// movie order is fixed once built.
#[derive(Debug, Clone)]
pub struct Catalog {
    genres: Vec<Genre>,
    movies: Vec<Movie>,
    title_index: HashMap<String, usize>,
    id_index: HashMap<u32, usize>,
}

impl Catalog {
    /// Builds the catalog, normalizing titles to lowercase.
    ///
    /// When a title occurs more than once the first position is indexed.
    pub fn new(genres: Vec<Genre>, mut movies: Vec<Movie>) -> Self {
        let mut title_index = HashMap::with_capacity(movies.len());
        let mut id_index = HashMap::with_capacity(movies.len());

        for (pos, movie) in movies.iter_mut().enumerate() {
            movie.title = movie.title.to_lowercase();
            title_index.entry(movie.title.clone()).or_insert(pos);
            id_index.entry(movie.id).or_insert(pos);
        }

        if title_index.len() < movies.len() {
            tracing::debug!(
                movies = movies.len(),
                distinct_titles = title_index.len(),
                "Duplicate titles in catalog, first occurrence wins"
            );
        }

        Self {
            genres,
            movies,
            title_index,
            id_index,
        }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn get(&self, position: usize) -> Option<&Movie> {
        self.movies.get(position)
    }

    /// Catalog position for a title, matched case-insensitively
    pub fn position_by_title(&self, title: &str) -> Option<usize> {
        self.title_index.get(&title.to_lowercase()).copied()
    }

    pub fn position_by_id(&self, movie_id: u32) -> Option<usize> {
        self.id_index.get(&movie_id).copied()
    }

    pub fn movie_by_id(&self, movie_id: u32) -> Option<&Movie> {
        self.position_by_id(movie_id).map(|pos| &self.movies[pos])
    }

    /// Per-movie genre names in catalog order
    pub fn genre_documents(&self) -> Vec<Vec<String>> {
        self.movies.iter().map(|m| m.genres.clone()).collect()
    }
}

/// Distinct rated movie ids in order of first appearance
pub fn rated_movie_ids(ratings: &[Rating]) -> Vec<u32> {
    let mut seen = HashSet::new();
    ratings
        .iter()
        .filter(|r| seen.insert(r.movie_id))
        .map(|r| r.movie_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u32, title: &str, genres: &[&str]) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            release_year: None,
            genres: genres.iter().map(|g| g.to_string()).collect(),
        }
    }

    fn sample() -> Catalog {
        Catalog::new(
            vec![],
            vec![
                movie(1, "Toy Story (1995)", &["Animation", "Comedy"]),
                movie(2, "GoldenEye (1995)", &["Action"]),
                movie(3, "Toy Story (1995)", &["Comedy"]),
            ],
        )
    }

    #[test]
    fn test_titles_lowercased() {
        let catalog = sample();
        assert_eq!(catalog.movies()[1].title, "goldeneye (1995)");
    }

    #[test]
    fn test_title_lookup_case_insensitive() {
        let catalog = sample();
        assert_eq!(catalog.position_by_title("goldeneye (1995)"), Some(1));
        assert_eq!(catalog.position_by_title("GoldenEye (1995)"), Some(1));
        assert_eq!(catalog.position_by_title("heat (1995)"), None);
    }

    #[test]
    fn test_duplicate_title_first_wins() {
        let catalog = sample();
        assert_eq!(catalog.position_by_title("toy story (1995)"), Some(0));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = sample();
        assert_eq!(catalog.position_by_id(3), Some(2));
        assert_eq!(catalog.movie_by_id(2).unwrap().title, "goldeneye (1995)");
        assert!(catalog.movie_by_id(99).is_none());
    }

    #[test]
    fn test_genre_documents_in_catalog_order() {
        let docs = sample().genre_documents();
        assert_eq!(docs[0], vec!["Animation", "Comedy"]);
        assert_eq!(docs[2], vec!["Comedy"]);
    }

    #[test]
    fn test_rated_movie_ids_distinct_in_first_seen_order() {
        let r = |user_id, movie_id| Rating {
            user_id,
            movie_id,
            score: 4.0,
            timestamp: 0,
        };
        let ids = rated_movie_ids(&[r(1, 5), r(2, 3), r(3, 5), r(1, 9)]);
        assert_eq!(ids, vec![5, 3, 9]);
    }
}
