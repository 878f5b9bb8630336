use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;
use clap::{Args, Parser, Subcommand};

mod error;
mod feed;
mod fonts;
mod models;
mod report;
mod stats;
mod telemetry;
mod template;

use models::Post;

#[derive(Parser)]
#[command(name = "halloffame")]
#[command(about = "Engagement leaderboards for social-network groups", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, global = true)]
    verbose: bool,
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FeedArgs {
    /// Scraped posts as a JSON array
    #[arg(long, env = "HALLOFFAME_POSTS")]
    posts: PathBuf,
    /// Only count posts from the last N days
    #[arg(long)]
    since_days: Option<i64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write per-user engagement counters as JSON
    Stats {
        #[command(flatten)]
        feed: FeedArgs,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print ranked leaderboards
    Top {
        #[command(flatten)]
        feed: FeedArgs,
        /// Limit output to one metric, e.g. BEST-POST-REACTION
        #[arg(long)]
        metric: Option<String>,
        #[arg(long, default_value_t = 3)]
        limit: usize,
    },
    /// Fill a template with leaderboard winners, the date and styled text
    Render {
        #[command(flatten)]
        feed: FeedArgs,
        #[arg(long, env = "HALLOFFAME_TEMPLATE")]
        template: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Restyle text with a glyph font such as bold or italic-serif
    Font {
        #[arg(long, default_value = "bold")]
        style: String,
        text: String,
    },
    /// Generate a markdown report
    Report {
        #[command(flatten)]
        feed: FeedArgs,
        #[arg(long, default_value_t = 3)]
        limit: usize,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Export leaderboards as CSV rows
    Export {
        #[command(flatten)]
        feed: FeedArgs,
        #[arg(long)]
        csv: PathBuf,
    },
}

fn load_feed(args: &FeedArgs) -> anyhow::Result<Vec<Post>> {
    let posts = feed::load_posts(&args.posts)
        .with_context(|| format!("failed to load posts from {}", args.posts.display()))?;

    match args.since_days {
        Some(days) => {
            let cutoff = feed::cutoff_datetime(days)?;
            Ok(feed::filter_since(posts, cutoff)?)
        }
        None => Ok(posts),
    }
}

fn emit(out: Option<&Path>, contents: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            feed::write_text(path, contents)?;
            println!("Written to {}.", path.display());
        }
        None => println!("{contents}"),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init(telemetry::LogConfig::from_flags(cli.verbose, cli.json_logs))
        .context("failed to initialise logging")?;

    match cli.command {
        Commands::Stats { feed: args, out } => {
            let posts = load_feed(&args)?;
            let user_stats = stats::aggregate(&posts);
            emit(out.as_deref(), &feed::stats_to_json(&user_stats)?)?;
        }
        Commands::Top {
            feed: args,
            metric,
            limit,
        } => {
            let posts = load_feed(&args)?;
            let leaderboard = stats::rank(&stats::aggregate(&posts));

            if let Some(metric) = metric.as_deref() {
                if !leaderboard.contains_key(metric) {
                    anyhow::bail!(
                        "unknown metric {metric}; expected one of {}",
                        stats::METRICS.join(", ")
                    );
                }
            }

            for (name, entries) in &leaderboard {
                if metric.as_deref().is_some_and(|wanted| wanted != name.as_str()) {
                    continue;
                }
                println!("{name}:");
                if entries.is_empty() {
                    println!("  (no entries)");
                }
                for (index, entry) in entries.iter().take(limit).enumerate() {
                    println!("  {}. {} ({})", index + 1, entry.user, entry.count);
                }
            }
        }
        Commands::Render {
            feed: args,
            template: template_path,
            out,
        } => {
            let posts = load_feed(&args)?;
            let source = feed::read_text(&template_path).with_context(|| {
                format!("failed to read template {}", template_path.display())
            })?;
            let leaderboard = stats::rank(&stats::aggregate(&posts));
            emit(out.as_deref(), &template::render(&source, &leaderboard))?;
        }
        Commands::Font { style, text } => {
            println!("{}", fonts::apply_font(&text, &style));
        }
        Commands::Report {
            feed: args,
            limit,
            out,
        } => {
            let posts = load_feed(&args)?;
            let leaderboard = stats::rank(&stats::aggregate(&posts));
            let window = args
                .since_days
                .map(feed::cutoff_datetime)
                .transpose()?;
            let report = report::build_report(
                window,
                Local::now().naive_local(),
                &stats::feed_totals(&posts),
                &leaderboard,
                limit,
            );
            feed::write_text(&out, &report)?;
            println!("Report written to {}.", out.display());
        }
        Commands::Export { feed: args, csv } => {
            let posts = load_feed(&args)?;
            let leaderboard = stats::rank(&stats::aggregate(&posts));
            let written = feed::write_leaderboard_csv(&csv, &leaderboard)?;
            println!("Exported {written} leaderboard rows to {}.", csv.display());
        }
    }

    Ok(())
}
