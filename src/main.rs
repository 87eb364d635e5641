use movierec::{models::Recommendation, AppError, Config, Recommender};
use tracing_subscriber::EnvFilter;

const SAMPLE_TITLES: [&str; 2] = ["toy story (1995)", "star wars (1977)"];
const SAMPLE_USER: u32 = 10;

fn print_table(heading: &str, recs: &[Recommendation]) {
    println!("{}", heading);
    for (rank, rec) in recs.iter().enumerate() {
        println!(
            "{:>3}. {:<50} {:<40} {:.3}",
            rank + 1,
            rec.title,
            rec.genres,
            rec.score
        );
    }
    println!();
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(data_dir = %config.data_dir.display(), "Starting movierec");

    let recommender = Recommender::from_config(&config)?;
    let report = recommender.evaluation();
    println!(
        "SVD evaluation on {} held-out ratings: RMSE {:.4}, MAE {:.4}\n",
        report.test_count, report.rmse, report.mae
    );

    for title in SAMPLE_TITLES {
        match recommender.recommend_by_title(title, config.top_n) {
            Ok(recs) => print_table(&format!("Content-based recommendations for '{}':", title), &recs),
            Err(AppError::NotFound(message)) => println!("{}\n", message),
            Err(e) => return Err(e.into()),
        }
    }

    let recs = recommender.recommend_by_user(SAMPLE_USER, config.top_n);
    print_table(
        &format!("Collaborative recommendations for user {}:", SAMPLE_USER),
        &recs,
    );

    Ok(())
}
