use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clustering::{BookGraphBuilder, ClusterEngine, MergeStrategy};
use colored::Colorize;
use data_loader::{load_weighted_review_graph, parser};
use predictors::{
    evaluate_predictor, BookAverageScorePredictor, FiveStarPredictor, ScorePredictor,
    SimilarUserPredictor,
};
use review_graph::{ScoreType, WeightedGraph};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// ShelfRecs - Book Review Network Engine
#[derive(Parser)]
#[command(name = "shelf-recs")]
#[command(about = "Book recommendations, clustering and rating prediction over a review graph", long_about = None)]
struct Cli {
    /// Path to the review records CSV (user_id,book_id,score)
    #[arg(long, default_value = "data/reviews.csv")]
    reviews: PathBuf,

    /// Path to the book names CSV (book_id,title)
    #[arg(long, default_value = "data/book_names.csv")]
    book_names: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend books similar to a given book
    Recommend {
        /// Book title to find recommendations for
        #[arg(long)]
        book: String,

        /// Number of recommendations to return
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Similarity variant: "unweighted" or "strict"
        #[arg(long, default_value = "unweighted")]
        score_type: ScoreType,
    },

    /// Predict the score a user would give a book
    Predict {
        /// User id to predict for
        #[arg(long)]
        user: String,

        /// Book title to predict for
        #[arg(long)]
        book: String,

        /// Prediction strategy to use
        #[arg(long, value_enum, default_value_t = PredictorKind::SimilarUser)]
        predictor: PredictorKind,
    },

    /// Cluster books by similarity
    Cluster {
        /// Number of clusters to end up with
        #[arg(long)]
        num_clusters: usize,

        /// Merge strategy to use
        #[arg(long, value_enum, default_value_t = StrategyKind::Greedy)]
        strategy: StrategyKind,

        /// Similarity threshold for book graph edges
        #[arg(long, default_value = "0.05")]
        threshold: f64,

        /// Similarity variant: "unweighted" or "strict"
        #[arg(long, default_value = "unweighted")]
        score_type: ScoreType,

        /// Random seed for the randomized strategy
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Evaluate a predictor against a held-out test file
    Evaluate {
        /// Path to the test reviews CSV (user_id,book_id,score)
        #[arg(long)]
        test_file: PathBuf,

        /// Prediction strategy to evaluate
        #[arg(long, value_enum, default_value_t = PredictorKind::SimilarUser)]
        predictor: PredictorKind,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PredictorKind {
    FiveStar,
    BookAverage,
    SimilarUser,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyKind {
    Greedy,
    Random,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load the weighted review graph (this may take a moment)
    println!("Loading review graph from {}...", cli.reviews.display());
    let start = Instant::now();
    let graph = Arc::new(
        load_weighted_review_graph(&cli.reviews, &cli.book_names)
            .context("Failed to load review graph")?,
    );
    println!("{} Loaded graph in {:?}", "✓".green(), start.elapsed());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            book,
            limit,
            score_type,
        } => handle_recommend(graph, &book, limit, score_type)?,
        Commands::Predict {
            user,
            book,
            predictor,
        } => handle_predict(graph, &user, &book, predictor)?,
        Commands::Cluster {
            num_clusters,
            strategy,
            threshold,
            score_type,
            seed,
        } => handle_cluster(graph, num_clusters, strategy, threshold, score_type, seed)?,
        Commands::Evaluate {
            test_file,
            predictor,
        } => handle_evaluate(graph, &cli.book_names, &test_file, predictor)?,
    }

    Ok(())
}

fn build_predictor(kind: PredictorKind, graph: Arc<WeightedGraph>) -> Box<dyn ScorePredictor> {
    match kind {
        PredictorKind::FiveStar => Box::new(FiveStarPredictor::new(graph)),
        PredictorKind::BookAverage => Box::new(BookAverageScorePredictor::new(graph)),
        PredictorKind::SimilarUser => Box::new(SimilarUserPredictor::new(graph)),
    }
}

/// Handle the 'recommend' command
fn handle_recommend(
    graph: Arc<WeightedGraph>,
    book: &str,
    limit: usize,
    score_type: ScoreType,
) -> Result<()> {
    let recommendations = graph
        .recommend_books(book, limit, score_type)
        .with_context(|| format!("Failed to recommend books for '{book}'"))?;

    println!("{}", format!("Books similar to '{book}':").bold().blue());
    for (rank, title) in recommendations.iter().enumerate() {
        let score = graph.get_similarity_score(book, title, score_type)?;
        println!(
            "{}. {} (similarity {:.3})",
            (rank + 1).to_string().green(),
            title,
            score
        );
    }
    Ok(())
}

/// Handle the 'predict' command
fn handle_predict(
    graph: Arc<WeightedGraph>,
    user: &str,
    book: &str,
    kind: PredictorKind,
) -> Result<()> {
    let predictor = build_predictor(kind, graph);
    let score = predictor
        .predict_review_score(user, book)
        .with_context(|| format!("Failed to predict score for ({user}, {book})"))?;

    println!(
        "{} {} would give '{}' a {}",
        predictor.name().bold().blue(),
        user,
        book,
        score.to_string().green()
    );
    Ok(())
}

/// Handle the 'cluster' command
fn handle_cluster(
    graph: Arc<WeightedGraph>,
    num_clusters: usize,
    strategy: StrategyKind,
    threshold: f64,
    score_type: ScoreType,
    seed: Option<u64>,
) -> Result<()> {
    let start = Instant::now();
    let book_graph = Arc::new(
        BookGraphBuilder::new(graph)
            .with_threshold(threshold)
            .with_score_type(score_type)
            .build()
            .context("Failed to build book graph")?,
    );
    println!("{} Built book graph in {:?}", "✓".green(), start.elapsed());

    let mut engine = ClusterEngine::new(book_graph);
    if let Some(seed) = seed {
        engine = engine.with_seed(seed);
    }
    let strategy = match strategy {
        StrategyKind::Greedy => MergeStrategy::Greedy,
        StrategyKind::Random => MergeStrategy::Randomized,
    };
    let clusters = engine
        .find_clusters(num_clusters, strategy)
        .context("Clustering failed")?;

    println!("{}", format!("{} clusters:", clusters.len()).bold().blue());
    for (idx, cluster) in clusters.iter().enumerate() {
        let mut books: Vec<&str> = cluster.iter().map(String::as_str).collect();
        books.sort_unstable();
        println!(
            "{}. ({} books) {}",
            (idx + 1).to_string().green(),
            cluster.len(),
            books.join(", ")
        );
    }
    Ok(())
}

/// Handle the 'evaluate' command
fn handle_evaluate(
    graph: Arc<WeightedGraph>,
    book_names_file: &PathBuf,
    test_file: &PathBuf,
    kind: PredictorKind,
) -> Result<()> {
    let test_reviews =
        parser::parse_reviews(test_file).context("Failed to parse test reviews")?;
    let names =
        parser::parse_book_names(book_names_file).context("Failed to parse book names")?;

    let predictor = build_predictor(kind, graph);
    let start = Instant::now();
    let report = evaluate_predictor(predictor.as_ref(), &test_reviews, &names)
        .context("Evaluation failed")?;

    println!(
        "{}",
        format!("Evaluation of {}:", predictor.name()).bold().blue()
    );
    println!("{}Reviews evaluated: {}", "• ".cyan(), report.num_reviews);
    println!(
        "{}Exact matches: {} ({:.1}%)",
        "• ".cyan(),
        report.num_correct,
        if report.num_reviews > 0 {
            100.0 * report.num_correct as f64 / report.num_reviews as f64
        } else {
            0.0
        }
    );
    println!(
        "{}Mean absolute error: {:.3}",
        "• ".cyan(),
        report.average_error
    );
    println!("{} Evaluated in {:?}", "✓".green(), start.elapsed());
    Ok(())
}
