use std::collections::{HashMap, HashSet};

use crate::{
    config::Config,
    data::{catalog::rated_movie_ids, Dataset},
    error::AppResult,
    models::Recommendation,
    services::{
        evaluation::{self, EvaluationReport},
        prediction::{RatingPredictor, SvdModel},
        recommendations,
        similarity::SimilarityMatrix,
    },
};

/// Both recommendation pipelines, built once over a shared catalog
pub struct Recommender {
    dataset: Dataset,
    similarity: SimilarityMatrix,
    model: SvdModel,
    evaluation: EvaluationReport,
    rated_by_user: HashMap<u32, HashSet<u32>>,
    candidates: Vec<u32>,
}

impl Recommender {
    /// Loads the dataset from `config.data_dir` and builds both engines
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let dataset = Dataset::load(&config.data_dir, config.rating_scale())?;
        Self::build(dataset, config)
    }

    /// Builds the similarity matrix, splits the ratings, fits and evaluates
    /// the rating model
    pub fn build(dataset: Dataset, config: &Config) -> AppResult<Self> {
        let similarity = SimilarityMatrix::from_genres(&dataset.catalog.genre_documents());

        let (train, test) =
            evaluation::train_test_split(&dataset.ratings, config.test_size, config.seed)?;
        let model = SvdModel::fit(&train, config.svd_params())?;
        let evaluation = evaluation::evaluate(&model, &test)?;

        let mut rated_by_user: HashMap<u32, HashSet<u32>> = HashMap::new();
        for rating in &dataset.ratings {
            rated_by_user
                .entry(rating.user_id)
                .or_default()
                .insert(rating.movie_id);
        }
        let candidates = rated_movie_ids(&dataset.ratings);

        tracing::info!(
            movies = dataset.catalog.len(),
            users = rated_by_user.len(),
            rmse = evaluation.rmse,
            "Recommender ready"
        );

        Ok(Self {
            dataset,
            similarity,
            model,
            evaluation,
            rated_by_user,
            candidates,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Held-out accuracy of the fitted model
    pub fn evaluation(&self) -> EvaluationReport {
        self.evaluation
    }

    /// Whether the user appears in the rating table
    pub fn is_known_user(&self, user_id: u32) -> bool {
        self.rated_by_user.contains_key(&user_id)
    }

    /// Movies the user has rated, empty for unknown users
    pub fn rated_movies(&self, user_id: u32) -> HashSet<u32> {
        self.rated_by_user.get(&user_id).cloned().unwrap_or_default()
    }

    pub fn predict(&self, user_id: u32, movie_id: u32) -> f64 {
        self.model.predict(user_id, movie_id).estimate
    }

    pub fn recommend_by_title(&self, title: &str, top_n: usize) -> AppResult<Vec<Recommendation>> {
        recommendations::recommend_by_title(&self.dataset.catalog, &self.similarity, title, top_n)
    }

    pub fn recommend_by_user(&self, user_id: u32, top_n: usize) -> Vec<Recommendation> {
        let empty = HashSet::new();
        let rated = self.rated_by_user.get(&user_id).unwrap_or(&empty);
        recommendations::recommend_by_user(
            &self.dataset.catalog,
            &self.candidates,
            rated,
            &self.model,
            user_id,
            top_n,
        )
    }
}
