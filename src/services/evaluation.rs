use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::Rating,
    services::prediction::RatingPredictor,
};

/// Accuracy of a predictor on held-out ratings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EvaluationReport {
    pub rmse: f64,
    pub mae: f64,
    pub test_count: usize,
}

/// Shuffles `ratings` with a seeded RNG and holds out `ceil(test_size * n)`
/// of them. Returns `(train, test)`.
pub fn train_test_split(
    ratings: &[Rating],
    test_size: f64,
    seed: u64,
) -> AppResult<(Vec<Rating>, Vec<Rating>)> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(AppError::InvalidInput(format!(
            "test_size must be in (0, 1), got {}",
            test_size
        )));
    }

    let mut shuffled = ratings.to_vec();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);

    let n_test = ((test_size * shuffled.len() as f64).ceil() as usize).min(shuffled.len());
    let train = shuffled.split_off(n_test);

    tracing::info!(
        train = train.len(),
        test = shuffled.len(),
        seed,
        "Split ratings into train/test"
    );

    Ok((train, shuffled))
}

/// Root-mean-squared error of `predictor` over `test`
pub fn rmse<P: RatingPredictor>(predictor: &P, test: &[Rating]) -> AppResult<f64> {
    Ok(evaluate(predictor, test)?.rmse)
}

/// RMSE and MAE of `predictor` over `test`
pub fn evaluate<P: RatingPredictor>(predictor: &P, test: &[Rating]) -> AppResult<EvaluationReport> {
    if test.is_empty() {
        return Err(AppError::InvalidInput(
            "Cannot evaluate on an empty test set".to_string(),
        ));
    }

    let (squared, absolute) = test.iter().fold((0.0, 0.0), |(sq, abs), r| {
        let err = r.score - predictor.predict(r.user_id, r.movie_id).estimate;
        (sq + err * err, abs + err.abs())
    });

    let n = test.len() as f64;
    let report = EvaluationReport {
        rmse: (squared / n).sqrt(),
        mae: absolute / n,
        test_count: test.len(),
    };

    tracing::info!(
        rmse = report.rmse,
        mae = report.mae,
        test_count = report.test_count,
        "Evaluated rating predictions"
    );

    Ok(report)
}
