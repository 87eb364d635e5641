use std::collections::HashSet;

use crate::{
    data::Catalog,
    error::{AppError, AppResult},
    models::Recommendation,
    services::{prediction::RatingPredictor, similarity::SimilarityMatrix},
};

/// Content-based lookup: the `top_n` movies whose genres are most similar
/// to `title`.
///
/// Candidates are ranked by similarity descending with ties kept in catalog
/// order. The queried movie is never returned, including catalog entries
/// that duplicate its title.
pub fn recommend_by_title(
    catalog: &Catalog,
    similarity: &SimilarityMatrix,
    title: &str,
    top_n: usize,
) -> AppResult<Vec<Recommendation>> {
    let idx = catalog
        .position_by_title(title)
        .ok_or_else(|| AppError::title_not_found(title))?;
    let query_title = &catalog.movies()[idx].title;

    let mut scored: Vec<(usize, f64)> = similarity
        .row(idx)
        .iter()
        .copied()
        .enumerate()
        .filter(|&(pos, _)| {
            pos != idx && catalog.get(pos).is_some_and(|m| &m.title != query_title)
        })
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(top_n);

    tracing::debug!(title = %title, results = scored.len(), "Content recommendations ranked");

    Ok(scored
        .into_iter()
        .filter_map(|(pos, score)| catalog.get(pos).map(|m| Recommendation::new(m, score)))
        .collect())
}

/// Collaborative lookup: the `top_n` candidate movies with the highest
/// predicted rating for `user_id`, skipping everything in `rated`.
///
/// Users unknown to the predictor are not rejected; they get the
/// predictor's fallback estimates.
pub fn recommend_by_user<P: RatingPredictor>(
    catalog: &Catalog,
    candidates: &[u32],
    rated: &HashSet<u32>,
    predictor: &P,
    user_id: u32,
    top_n: usize,
) -> Vec<Recommendation> {
    if !predictor.knows_user(user_id) {
        tracing::warn!(user_id, "User has no training ratings, using fallback estimates");
    }

    let mut predictions: Vec<(u32, f64)> = candidates
        .iter()
        .copied()
        .filter(|movie_id| !rated.contains(movie_id))
        .filter(|&movie_id| catalog.position_by_id(movie_id).is_some())
        .map(|movie_id| (movie_id, predictor.predict(user_id, movie_id).estimate))
        .collect();
    predictions.sort_by(|a, b| b.1.total_cmp(&a.1));
    predictions.truncate(top_n);

    tracing::debug!(
        user_id,
        rated = rated.len(),
        results = predictions.len(),
        "Collaborative recommendations ranked"
    );

    predictions
        .into_iter()
        .filter_map(|(movie_id, estimate)| {
            catalog
                .movie_by_id(movie_id)
                .map(|m| Recommendation::new(m, estimate))
        })
        .collect()
}
