use serde::Deserialize;
use std::path::PathBuf;

use crate::services::prediction::SvdParams;

/// Application configuration loaded from `MOVIEREC_*` environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Directory holding `u.data`, `u.item` and `u.genre`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Fraction of ratings held out for evaluation
    #[serde(default = "default_test_size")]
    pub test_size: f64,

    /// Seed shared by the train/test split and factor initialisation
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_n_factors")]
    pub n_factors: usize,

    #[serde(default = "default_n_epochs")]
    pub n_epochs: usize,

    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,

    #[serde(default = "default_regularization")]
    pub regularization: f64,

    #[serde(default = "default_init_std_dev")]
    pub init_std_dev: f64,

    /// Lowest valid rating score
    #[serde(default = "default_rating_min")]
    pub rating_min: f64,

    /// Highest valid rating score
    #[serde(default = "default_rating_max")]
    pub rating_max: f64,

    /// Default result count for the demo lookups
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data/ml-100k")
}

fn default_test_size() -> f64 {
    0.2
}

fn default_seed() -> u64 {
    42
}

fn default_n_factors() -> usize {
    100
}

fn default_n_epochs() -> usize {
    20
}

fn default_learning_rate() -> f64 {
    0.005
}

fn default_regularization() -> f64 {
    0.02
}

fn default_init_std_dev() -> f64 {
    0.1
}

fn default_rating_min() -> f64 {
    1.0
}

fn default_rating_max() -> f64 {
    5.0
}

fn default_top_n() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            test_size: default_test_size(),
            seed: default_seed(),
            n_factors: default_n_factors(),
            n_epochs: default_n_epochs(),
            learning_rate: default_learning_rate(),
            regularization: default_regularization(),
            init_std_dev: default_init_std_dev(),
            rating_min: default_rating_min(),
            rating_max: default_rating_max(),
            top_n: default_top_n(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::prefixed("MOVIEREC_")
            .from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the pipeline cannot work with
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            anyhow::bail!("test_size must be in (0, 1), got {}", self.test_size);
        }
        if self.rating_min >= self.rating_max {
            anyhow::bail!(
                "rating_min ({}) must be below rating_max ({})",
                self.rating_min,
                self.rating_max
            );
        }
        if self.n_factors == 0 {
            anyhow::bail!("n_factors must be at least 1");
        }
        if self.learning_rate <= 0.0 || self.regularization < 0.0 || self.init_std_dev < 0.0 {
            anyhow::bail!("learning_rate must be positive, regularization and init_std_dev non-negative");
        }
        Ok(())
    }

    /// Inclusive rating scale
    pub fn rating_scale(&self) -> (f64, f64) {
        (self.rating_min, self.rating_max)
    }

    /// SGD hyperparameters for the rating prediction model
    pub fn svd_params(&self) -> SvdParams {
        SvdParams {
            n_factors: self.n_factors,
            n_epochs: self.n_epochs,
            learning_rate: self.learning_rate,
            regularization: self.regularization,
            init_mean: 0.0,
            init_std_dev: self.init_std_dev,
            rating_scale: self.rating_scale(),
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rating_scale(), (1.0, 5.0));
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_invalid_test_size_rejected() {
        let config = Config {
            test_size: 1.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_rating_scale_rejected() {
        let config = Config {
            rating_min: 5.0,
            rating_max: 1.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_svd_params_follow_config() {
        let config = Config {
            n_factors: 8,
            seed: 7,
            ..Config::default()
        };
        let params = config.svd_params();
        assert_eq!(params.n_factors, 8);
        assert_eq!(params.seed, 7);
        assert_eq!(params.rating_scale, (1.0, 5.0));
    }
}
