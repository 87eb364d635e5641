use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// One entry of the genre taxonomy (`u.genre`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    /// Offset of the genre flag among the movie record's genre columns
    pub code: usize,
    /// Display name, e.g. "Sci-Fi"
    pub name: String,
}

/// A movie from the catalog. Titles are stored lowercased.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u32,
    pub title: String,
    pub release_year: Option<i32>,
    /// Genre names in taxonomy column order
    pub genres: Vec<String>,
}

impl Movie {
    /// Genres joined with `,` in column order; empty when the movie has none
    pub fn genre_label(&self) -> String {
        self.genres.join(",")
    }
}

impl Display for Movie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.title, self.genre_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_story() -> Movie {
        Movie {
            id: 1,
            title: "toy story (1995)".to_string(),
            release_year: Some(1995),
            genres: vec![
                "Animation".to_string(),
                "Children's".to_string(),
                "Comedy".to_string(),
            ],
        }
    }

    #[test]
    fn test_genre_label_keeps_column_order() {
        assert_eq!(toy_story().genre_label(), "Animation,Children's,Comedy");
    }

    #[test]
    fn test_genre_label_empty() {
        let movie = Movie {
            genres: vec![],
            ..toy_story()
        };
        assert_eq!(movie.genre_label(), "");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", toy_story()),
            "toy story (1995) [Animation,Children's,Comedy]"
        );
    }
}
