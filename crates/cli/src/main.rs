use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::Rng;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

use catalog::{CatalogIndex, Sake};
use engine::{ExperienceLevel, PreferenceProfile, ScoredCandidate};
use server::{RecommendRequest, RecommendationService};

/// SakeRecs - Sake Recommendation Engine
#[derive(Parser)]
#[command(name = "sake-recs")]
#[command(about = "Sake recommendation engine using taste profile matching", long_about = None)]
struct Cli {
    /// Path to the catalog data directory
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get sake recommendations for a user
    Recommend {
        /// User ID to get recommendations for
        #[arg(long)]
        user_id: String,

        /// Preferred sweetness, 1 (dry) to 5 (sweet)
        #[arg(long, default_value = "3")]
        sweetness: u8,

        /// Preferred acidity, 1 (soft) to 5 (crisp)
        #[arg(long, default_value = "3")]
        acidity: u8,

        /// Preferred richness, 1 (light) to 5 (full-bodied)
        #[arg(long, default_value = "3")]
        richness: u8,

        /// Maximum price in yen
        #[arg(long)]
        budget: Option<u32>,

        /// Comma-separated category tags to restrict to (e.g. junmai,daiginjo)
        #[arg(long)]
        categories: Option<String>,

        /// Drinking experience: beginner, intermediate or advanced
        #[arg(long)]
        experience: Option<ExperienceLevel>,

        /// Number of recommendations to return
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Show the factor breakdown for each recommendation
        #[arg(long)]
        explain: bool,
    },

    /// Show a sake's master data and its brewery
    Sake {
        /// Sake ID to display
        #[arg(long)]
        sake_id: String,
    },

    /// Search the catalog by name
    Search {
        /// Name to search for (case-insensitive substring match)
        #[arg(long)]
        name: String,

        /// Only match sake in this category
        #[arg(long)]
        category: Option<String>,

        /// Only match sake at or below this price in yen
        #[arg(long)]
        max_price: Option<u32>,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load the catalog (this may take a moment)
    println!("Loading sake catalog from {}...", cli.data_dir.display());
    let start = Instant::now();
    let index = Arc::new(
        CatalogIndex::load_from_files(&cli.data_dir).context("Failed to load sake catalog")?,
    );
    println!("{} Loaded catalog in {:?}", "✓".green(), start.elapsed());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            user_id,
            sweetness,
            acidity,
            richness,
            budget,
            categories,
            experience,
            limit,
            explain,
        } => {
            let preferences = PreferenceProfile {
                sweetness,
                acidity,
                richness,
                budget,
                categories: parse_categories(categories.as_deref()),
                experience_level: experience,
            };
            handle_recommend(index, user_id, preferences, limit, explain).await?
        }
        Commands::Sake { sake_id } => handle_sake(index, sake_id)?,
        Commands::Search {
            name,
            category,
            max_price,
        } => handle_search(index, name, category, max_price)?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(index, requests, concurrent).await?,
    }

    Ok(())
}

/// Split a comma-separated category list into the profile's set
fn parse_categories(raw: Option<&str>) -> HashSet<String> {
    raw.map(|list| {
        list.split(',')
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Handle the 'recommend' command
async fn handle_recommend(
    index: Arc<CatalogIndex>,
    user_id: String,
    preferences: PreferenceProfile,
    limit: usize,
    explain: bool,
) -> Result<()> {
    let service = RecommendationService::new(index.clone());

    let response = service
        .recommend(RecommendRequest {
            user_id,
            preferences,
            limit,
        })
        .await?;

    if response.count == 0 {
        println!("{}", "No sake matched the given preferences.".yellow());
        return Ok(());
    }

    print_recommendations(&index, &response.recommendations, explain);
    Ok(())
}

/// Handle the 'sake' command
fn handle_sake(index: Arc<CatalogIndex>, sake_id: String) -> Result<()> {
    let sake = index
        .get_sake(&sake_id)
        .ok_or_else(|| anyhow!("Sake {} not found", sake_id))?;

    println!(
        "{}",
        format!("{} ({})", sake.name, sake.sake_id).bold().blue()
    );
    println!("{}Category: {}", "• ".green(), sake.category);
    println!("{}Price: ¥{}", "• ".green(), sake.price);
    println!(
        "{}Taste: sweetness {} / acidity {} / richness {}",
        "• ".green(),
        sake.sweetness,
        sake.acidity,
        sake.richness
    );
    println!("{}Rating: {:.1}", "• ".green(), sake.rating);
    if let Some(alcohol) = sake.alcohol_content {
        println!("{}Alcohol: {:.1}%", "• ".green(), alcohol);
    }
    if let Some(polish) = sake.rice_polishing_ratio {
        println!("{}Rice polishing ratio: {}%", "• ".green(), polish);
    }
    if !sake.food_pairings.is_empty() {
        println!(
            "{}Food pairings: {}",
            "• ".green(),
            sake.food_pairings.join(", ")
        );
    }
    if let Some(description) = &sake.description {
        println!("{}{}", "• ".green(), description);
    }

    match index.get_brewery(&sake.brewery_id) {
        Some(brewery) => {
            println!();
            println!("{}", format!("Brewery: {}", brewery.name).bold());
            println!(
                "{}Location: {} {}",
                "• ".cyan(),
                brewery.prefecture,
                brewery.city
            );
            if let Some(year) = brewery.established_year {
                println!("{}Established: {}", "• ".cyan(), year);
            }
            if let Some(stats) = index.get_brewery_stats(&sake.brewery_id) {
                println!(
                    "{}Catalog: {} sake, average rating {:.2}",
                    "• ".cyan(),
                    stats.sake_count,
                    stats.avg_rating
                );
            }
        }
        None => println!("Brewery {} not in catalog", sake.brewery_id),
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(
    index: Arc<CatalogIndex>,
    name: String,
    category: Option<String>,
    max_price: Option<u32>,
) -> Result<()> {
    let name_lower = name.to_lowercase();
    let mut matches: Vec<(&Sake, usize)> = Vec::new();

    for sake in index.all_sake() {
        if let Some(category) = &category {
            if &sake.category != category {
                continue;
            }
        }
        if let Some(max_price) = max_price {
            if sake.price > max_price {
                continue;
            }
        }

        let sake_name_lower = sake.name.to_lowercase();
        if sake_name_lower == name_lower {
            // Exact match
            matches.push((sake, 0));
        } else if sake_name_lower.contains(&name_lower) {
            // Substring match
            matches.push((sake, 1));
        }
    }

    // Sort by relevance (exact match first, then rating)
    matches.sort_by(|a, b| {
        a.1.cmp(&b.1).then_with(|| {
            b.0.rating
                .partial_cmp(&a.0.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });

    println!("{}", format!("Search results for '{}':", name).bold().blue());
    for (sake, _) in matches.iter().take(20) {
        println!(
            "{}: {} [{}] ¥{} rating {:.1}",
            sake.sake_id, sake.name, sake.category, sake.price, sake.rating
        );
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    index: Arc<CatalogIndex>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 {
        println!("Nothing to benchmark");
        return Ok(());
    }

    let service = RecommendationService::new(index);

    // Pre-generate random requests so request building stays out of the timings
    let test_requests: Vec<RecommendRequest> = (0..requests).map(|_| random_request()).collect();

    // Use tokio::spawn to make concurrent requests, capped by a semaphore
    let semaphore = Arc::new(Semaphore::new(concurrent.max(1)));
    let start = Instant::now();
    let mut handles = vec![];
    for request in test_requests {
        let service = service.clone();
        let semaphore = Arc::clone(&semaphore);
        let handle = tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let start = Instant::now();
            service.recommend(request).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }

    // Calculate and display statistics:
    //    - Total time
    //    - Average latency
    //    - P50, P95, P99 latencies
    //    - Throughput (requests/second)
    let wall_time = start.elapsed();
    let total_latency: Duration = timings.iter().sum();
    let avg_latency = total_latency / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = requests as f32 / wall_time.as_secs_f32();

    println!("Benchmark results:");
    println!("Total time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Build a random but plausible request for load testing
fn random_request() -> RecommendRequest {
    let mut rng = rand::rng();
    let experience = match rng.random_range(0..4) {
        0 => Some(ExperienceLevel::Beginner),
        1 => Some(ExperienceLevel::Intermediate),
        2 => Some(ExperienceLevel::Advanced),
        _ => None,
    };
    let budget = if rng.random_bool(0.5) {
        Some(rng.random_range(800..8000))
    } else {
        None
    };

    RecommendRequest {
        user_id: format!("user-{:03}", rng.random_range(1..=500)),
        preferences: PreferenceProfile {
            sweetness: rng.random_range(1..=5),
            acidity: rng.random_range(1..=5),
            richness: rng.random_range(1..=5),
            budget,
            categories: HashSet::new(),
            experience_level: experience,
        },
        limit: 10,
    }
}

/// Helper function to format and print recommendations
fn print_recommendations(index: &CatalogIndex, recommendations: &[ScoredCandidate], explain: bool) {
    println!("{}", "Sake Recommendations:".bold().blue());
    for (i, rec) in recommendations.iter().enumerate() {
        let brewery = index
            .get_brewery(&rec.brewery_id)
            .map(|b| b.name.as_str())
            .unwrap_or("不明");
        println!(
            "{}. {} / {} [{}] - Score: {:.2} (¥{})",
            (i + 1).to_string().green(),
            rec.name.bold(),
            brewery,
            rec.category,
            rec.score,
            rec.price
        );
        println!("   {}", rec.match_reason.cyan());
        if explain {
            println!(
                "   taste {:.1} | experience {:.1} | diversity {:.1} | popularity {:.1}",
                rec.factors.taste_match,
                rec.factors.experience_match,
                rec.factors.diversity,
                rec.factors.popularity
            );
        }
    }
}
