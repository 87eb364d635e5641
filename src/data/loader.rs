//! Readers for the MovieLens 100k flat files.
//!
//! `u.item` and `u.genre` are pipe-delimited latin-1, `u.data` is tab-delimited.
//! None of them carry a header row or quoting.

use chrono::{Datelike, NaiveDate};
use csv::{ByteRecord, ReaderBuilder};
use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::{Genre, Movie, Rating},
};

/// Column offset of the first genre flag in `u.item`
const GENRE_FLAG_OFFSET: usize = 5;

fn reader_for(path: &Path, delimiter: u8) -> AppResult<csv::Reader<std::fs::File>> {
    let reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_path(path)?;
    Ok(reader)
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Latin-1 maps every byte to the code point of the same value
fn latin1_field(record: &ByteRecord, idx: usize) -> String {
    record
        .get(idx)
        .map(|bytes| bytes.iter().map(|&b| b as char).collect())
        .unwrap_or_default()
}

fn line_of(record: &ByteRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn parse_field<T: std::str::FromStr>(
    record: &ByteRecord,
    idx: usize,
    file: &str,
    what: &str,
) -> AppResult<T> {
    let raw = latin1_field(record, idx);
    raw.trim().parse::<T>().map_err(|_| AppError::Parse {
        file: file.to_string(),
        line: line_of(record),
        message: format!("invalid {} '{}'", what, raw),
    })
}

/// Extracts the year from a `dd-Mon-yyyy` release date
pub fn parse_release_year(date: &str) -> Option<i32> {
    NaiveDate::parse_from_str(date.trim(), "%d-%b-%Y")
        .ok()
        .map(|d| d.year())
}

/// Loads the genre taxonomy, ordered by genre code
pub fn load_genres(path: &Path) -> AppResult<Vec<Genre>> {
    let file = file_label(path);
    let mut reader = reader_for(path, b'|')?;
    let mut genres = Vec::new();

    for record in reader.byte_records() {
        let record = record?;
        if record.len() < 2 {
            continue;
        }
        let name = latin1_field(&record, 0);
        let code = parse_field::<usize>(&record, 1, &file, "genre code")?;
        genres.push(Genre { code, name });
    }

    genres.sort_by_key(|g| g.code);
    tracing::debug!(file = %file, genres = genres.len(), "Loaded genre taxonomy");
    Ok(genres)
}

/// Loads movie records and resolves their genre flags against `genres`.
///
/// A flag counts only when it is exactly `1`; missing or garbled flag
/// columns simply leave the movie out of that genre. Rows without a numeric
/// id cannot be keyed and are skipped with a warning.
pub fn load_movies(path: &Path, genres: &[Genre]) -> AppResult<Vec<Movie>> {
    let file = file_label(path);
    let mut reader = reader_for(path, b'|')?;
    let mut movies = Vec::new();

    for record in reader.byte_records() {
        let record = record?;
        let id = match parse_field::<u32>(&record, 0, &file, "movie id") {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(
                    file = %file,
                    line = line_of(&record),
                    error = %e,
                    "Skipping movie row"
                );
                continue;
            }
        };
        let title = latin1_field(&record, 1).to_lowercase();
        let release_year = parse_release_year(&latin1_field(&record, 2));

        let movie_genres = genres
            .iter()
            .filter(|g| latin1_field(&record, GENRE_FLAG_OFFSET + g.code).trim() == "1")
            .map(|g| g.name.clone())
            .collect();

        movies.push(Movie {
            id,
            title,
            release_year,
            genres: movie_genres,
        });
    }

    tracing::debug!(file = %file, movies = movies.len(), "Loaded movies");
    Ok(movies)
}

/// Loads ratings, rejecting fractional scores and scores outside the
/// inclusive `scale`
pub fn load_ratings(path: &Path, scale: (f64, f64)) -> AppResult<Vec<Rating>> {
    let file = file_label(path);
    let mut reader = reader_for(path, b'\t')?;
    let mut ratings = Vec::new();

    for record in reader.byte_records() {
        let record = record?;
        let user_id = parse_field::<u32>(&record, 0, &file, "user id")?;
        let movie_id = parse_field::<u32>(&record, 1, &file, "movie id")?;
        let score = parse_field::<f64>(&record, 2, &file, "rating")?;
        let timestamp = parse_field::<i64>(&record, 3, &file, "timestamp")?;

        if !(scale.0..=scale.1).contains(&score) {
            return Err(AppError::Parse {
                file,
                line: line_of(&record),
                message: format!("rating {} outside scale {}..={}", score, scale.0, scale.1),
            });
        }
        if score.fract() != 0.0 {
            return Err(AppError::Parse {
                file,
                line: line_of(&record),
                message: format!("rating {} is not a whole star", score),
            });
        }

        ratings.push(Rating {
            user_id,
            movie_id,
            score,
            timestamp,
        });
    }

    tracing::debug!(file = %file, ratings = ratings.len(), "Loaded ratings");
    Ok(ratings)
}
