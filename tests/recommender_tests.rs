use std::path::PathBuf;

use movierec::{
    data::Dataset,
    services::{evaluation, prediction::SvdModel},
    AppError, Config, Recommender,
};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/ml-mini")
}

fn test_config() -> Config {
    Config {
        data_dir: fixture_dir(),
        n_factors: 5,
        n_epochs: 30,
        ..Config::default()
    }
}

fn build() -> Recommender {
    Recommender::from_config(&test_config()).unwrap()
}

#[test]
fn test_dataset_load() {
    let dataset = Dataset::load(&fixture_dir(), (1.0, 5.0)).unwrap();
    assert_eq!(dataset.catalog.len(), 16);
    assert_eq!(dataset.catalog.genres().len(), 19);
    assert_eq!(dataset.ratings.len(), 83);

    let toy_story = dataset.catalog.movie_by_id(1).unwrap();
    assert_eq!(toy_story.title, "toy story (1995)");
    assert_eq!(toy_story.release_year, Some(1995));
    assert_eq!(toy_story.genre_label(), "Animation,Children's,Comedy");

    let richard = dataset.catalog.movie_by_id(10).unwrap();
    assert_eq!(richard.release_year, Some(1996));

    let unknown = dataset.catalog.movie_by_id(267).unwrap();
    assert_eq!(unknown.release_year, None);
    assert_eq!(unknown.genres, vec!["unknown"]);
}

#[test]
fn test_similarity_matrix_matches_catalog() {
    let recommender = build();
    let sims = recommender.similarity();
    assert_eq!(sims.len(), recommender.dataset().catalog.len());
    for a in 0..sims.len() {
        assert_eq!(sims.get(a, a), 1.0);
        for b in 0..sims.len() {
            assert_eq!(sims.get(a, b), sims.get(b, a));
        }
    }
}

#[test]
fn test_recommend_by_title_toy_story() {
    let recommender = build();
    let recs = recommender.recommend_by_title("toy story (1995)", 10).unwrap();

    assert_eq!(recs.len(), 10);
    assert!(recs.iter().all(|r| r.title != "toy story (1995)"));
    assert!(recs.windows(2).all(|w| w[0].score >= w[1].score));
    assert_eq!(recs[0].title, "aladdin (1992)");
}

#[test]
fn test_recommend_by_title_fewer_than_top_n_available() {
    let recommender = build();
    let recs = recommender.recommend_by_title("star wars (1977)", 100).unwrap();
    assert_eq!(recs.len(), 15);
    assert!(recs.iter().all(|r| r.movie_id != 50));
}

#[test]
fn test_recommend_by_title_not_found() {
    let recommender = build();
    match recommender.recommend_by_title("plan 9 from outer space (1959)", 10) {
        Err(AppError::NotFound(message)) => assert_eq!(
            message,
            "Film 'plan 9 from outer space (1959)' not found in the database"
        ),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn test_recommend_by_user_excludes_rated_movies() {
    let recommender = build();
    let rated = recommender.rated_movies(10);
    assert_eq!(rated.len(), 9);

    let recs = recommender.recommend_by_user(10, 10);
    assert_eq!(recs.len(), 6);
    assert!(recs.iter().all(|r| !rated.contains(&r.movie_id)));
    assert!(recs.windows(2).all(|w| w[0].score >= w[1].score));
    assert!(recs.iter().all(|r| (1.0..=5.0).contains(&r.score)));
}

#[test]
fn test_recommend_by_user_top_n() {
    let recommender = build();
    assert_eq!(recommender.recommend_by_user(10, 3).len(), 3);
}

#[test]
fn test_recommend_by_unknown_user_falls_back() {
    let recommender = build();
    assert!(!recommender.is_known_user(999));

    let recs = recommender.recommend_by_user(999, 5);
    assert_eq!(recs.len(), 5);
    for rec in &recs {
        let expected = recommender.predict(999, rec.movie_id);
        assert_eq!(rec.score, expected);
    }
}

#[test]
fn test_evaluation_reproducible_with_seed() {
    let a = build().evaluation();
    let b = build().evaluation();
    assert_eq!(a, b);
    assert_eq!(a.test_count, 17);
    assert!(a.rmse.is_finite() && a.rmse > 0.0);
    assert!(a.mae <= a.rmse);
}

#[test]
fn test_split_then_fit_by_hand_matches_recommender() {
    let config = test_config();
    let dataset = Dataset::load(&config.data_dir, config.rating_scale()).unwrap();
    let (train, test) =
        evaluation::train_test_split(&dataset.ratings, config.test_size, config.seed).unwrap();
    let model = SvdModel::fit(&train, config.svd_params()).unwrap();
    let rmse = evaluation::rmse(&model, &test).unwrap();

    assert_eq!(rmse, build().evaluation().rmse);
}

#[test]
fn test_missing_data_dir() {
    let config = Config {
        data_dir: PathBuf::from("/definitely/not/here"),
        ..test_config()
    };
    assert!(Recommender::from_config(&config).is_err());
}
