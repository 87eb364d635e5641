//! Baseline movie recommendations over the MovieLens 100k dataset.
//!
//! Two pipelines share one [`data::Catalog`]:
//!
//! - content-based: TF-IDF over genre labels, cosine similarity between
//!   movies ([`services::similarity`]);
//! - collaborative: a biased latent-factor model fitted with SGD on an
//!   80/20 seeded split ([`services::prediction`], [`services::evaluation`]).
//!
//! [`Recommender`] wires both together behind `recommend_by_title` and
//! `recommend_by_user`.

pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod recommender;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use recommender::Recommender;
