//! Latent-factor rating prediction.
//!
//! A biased matrix factorization ("Funk SVD") fitted by stochastic gradient
//! descent over the observed ratings:
//!
//! ```text
//! r̂(u, i) = μ + b_u + b_i + q_i · p_u
//! ```
//!
//! Terms belonging to a user or movie absent from the training set are
//! dropped, so a completely unknown pair estimates the global mean μ.

use ndarray::{Array1, Array2};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::Rating,
};

/// Estimates a rating for a (user, movie) pair
pub trait RatingPredictor {
    fn predict(&self, user_id: u32, movie_id: u32) -> Prediction;

    /// Whether the user contributed to training
    fn knows_user(&self, user_id: u32) -> bool;
}

/// SGD hyperparameters
#[derive(Debug, Clone, PartialEq)]
pub struct SvdParams {
    pub n_factors: usize,
    pub n_epochs: usize,
    pub learning_rate: f64,
    pub regularization: f64,
    pub init_mean: f64,
    pub init_std_dev: f64,
    /// Inclusive bounds estimates are clipped to
    pub rating_scale: (f64, f64),
    pub seed: u64,
}

impl SvdParams {
    /// Rejects hyperparameters SGD cannot run with
    pub fn validate(&self) -> AppResult<()> {
        if self.n_factors == 0 {
            return Err(AppError::InvalidInput(
                "n_factors must be at least 1".to_string(),
            ));
        }
        if !(self.learning_rate > 0.0) {
            return Err(AppError::InvalidInput(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !(self.regularization >= 0.0) {
            return Err(AppError::InvalidInput(format!(
                "regularization must be non-negative, got {}",
                self.regularization
            )));
        }
        if !(self.init_std_dev >= 0.0) || !self.init_mean.is_finite() {
            return Err(AppError::InvalidInput(format!(
                "Invalid factor initialisation: mean {}, std-dev {}",
                self.init_mean, self.init_std_dev
            )));
        }
        let (lo, hi) = self.rating_scale;
        if !(lo < hi) {
            return Err(AppError::InvalidInput(format!(
                "Invalid rating scale {}..={}",
                lo, hi
            )));
        }
        Ok(())
    }
}

impl Default for SvdParams {
    fn default() -> Self {
        Self {
            n_factors: 100,
            n_epochs: 20,
            learning_rate: 0.005,
            regularization: 0.02,
            init_mean: 0.0,
            init_std_dev: 0.1,
            rating_scale: (1.0, 5.0),
            seed: 42,
        }
    }
}

/// A single estimate, with which sides of the pair the model had seen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub user_id: u32,
    pub movie_id: u32,
    pub estimate: f64,
    pub user_known: bool,
    pub movie_known: bool,
}

/// Fitted biased latent-factor model
#[derive(Debug, Clone)]
pub struct SvdModel {
    params: SvdParams,
    global_mean: f64,
    user_index: HashMap<u32, usize>,
    movie_index: HashMap<u32, usize>,
    user_bias: Array1<f64>,
    movie_bias: Array1<f64>,
    user_factors: Array2<f64>,
    movie_factors: Array2<f64>,
}

impl SvdModel {
    /// Fits the model on `train`, visiting ratings in the given order each epoch
    pub fn fit(train: &[Rating], params: SvdParams) -> AppResult<Self> {
        params.validate()?;
        if train.is_empty() {
            return Err(AppError::InvalidInput(
                "Cannot fit a rating model on an empty training set".to_string(),
            ));
        }

        let normal = Normal::new(params.init_mean, params.init_std_dev).map_err(|e| {
            AppError::InvalidInput(format!("Invalid factor initialisation: {}", e))
        })?;
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);

        let mut user_index = HashMap::new();
        let mut movie_index = HashMap::new();
        let mut samples = Vec::with_capacity(train.len());
        for rating in train {
            let next_user = user_index.len();
            let u = *user_index.entry(rating.user_id).or_insert(next_user);
            let next_movie = movie_index.len();
            let i = *movie_index.entry(rating.movie_id).or_insert(next_movie);
            samples.push((u, i, rating.score));
        }

        let global_mean = train.iter().map(|r| r.score).sum::<f64>() / train.len() as f64;
        let k = params.n_factors;

        let mut user_bias = Array1::<f64>::zeros(user_index.len());
        let mut movie_bias = Array1::<f64>::zeros(movie_index.len());
        let mut user_factors =
            Array2::from_shape_simple_fn((user_index.len(), k), || normal.sample(&mut rng));
        let mut movie_factors =
            Array2::from_shape_simple_fn((movie_index.len(), k), || normal.sample(&mut rng));

        tracing::info!(
            ratings = train.len(),
            users = user_index.len(),
            movies = movie_index.len(),
            factors = k,
            epochs = params.n_epochs,
            "Fitting SVD model"
        );

        let lr = params.learning_rate;
        let reg = params.regularization;

        for epoch in 0..params.n_epochs {
            let mut squared_error = 0.0;

            for &(u, i, score) in &samples {
                let dot = user_factors.row(u).dot(&movie_factors.row(i));
                let err = score - (global_mean + user_bias[u] + movie_bias[i] + dot);
                squared_error += err * err;

                user_bias[u] += lr * (err - reg * user_bias[u]);
                movie_bias[i] += lr * (err - reg * movie_bias[i]);

                for f in 0..k {
                    let puf = user_factors[[u, f]];
                    let qif = movie_factors[[i, f]];
                    user_factors[[u, f]] += lr * (err * qif - reg * puf);
                    movie_factors[[i, f]] += lr * (err * puf - reg * qif);
                }
            }

            tracing::debug!(
                epoch,
                train_rmse = (squared_error / samples.len() as f64).sqrt(),
                "SGD epoch complete"
            );
        }

        Ok(Self {
            params,
            global_mean,
            user_index,
            movie_index,
            user_bias,
            movie_bias,
            user_factors,
            movie_factors,
        })
    }

    pub fn global_mean(&self) -> f64 {
        self.global_mean
    }

    pub fn n_users(&self) -> usize {
        self.user_index.len()
    }

    pub fn n_movies(&self) -> usize {
        self.movie_index.len()
    }
}

impl RatingPredictor for SvdModel {
    fn predict(&self, user_id: u32, movie_id: u32) -> Prediction {
        let u = self.user_index.get(&user_id).copied();
        let i = self.movie_index.get(&movie_id).copied();

        let mut estimate = self.global_mean;
        if let Some(u) = u {
            estimate += self.user_bias[u];
        }
        if let Some(i) = i {
            estimate += self.movie_bias[i];
        }
        if let (Some(u), Some(i)) = (u, i) {
            estimate += self.user_factors.row(u).dot(&self.movie_factors.row(i));
        }

        let (lo, hi) = self.params.rating_scale;
        Prediction {
            user_id,
            movie_id,
            estimate: estimate.clamp(lo, hi),
            user_known: u.is_some(),
            movie_known: i.is_some(),
        }
    }

    fn knows_user(&self, user_id: u32) -> bool {
        self.user_index.contains_key(&user_id)
    }
}
