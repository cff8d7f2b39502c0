//! CLI entry point for vibe-blog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vibe_blog::generator::BuildSummary;
use vibe_blog::{commands, Blog};

#[derive(Parser)]
#[command(name = "vibe-blog")]
#[command(version)]
#[command(about = "A small static blog generator: markdown posts in, static HTML out", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site into the public directory
    #[command(visible_alias = "generate", alias = "g")]
    Build {
        /// Keep running and rebuild when posts or templates change
        #[arg(short, long)]
        watch: bool,
    },

    /// Delete the public directory
    Clean,

    /// List posts, newest first
    List,

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Comma separated tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "vibe_blog=debug,info"
    } else {
        "vibe_blog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let blog = Blog::new(&base_dir)?;

    match cli.command {
        Commands::Build { watch: false } => {
            tracing::info!("Building site...");
            let summary = blog.build()?;
            print_summary(&blog, &summary);
        }

        Commands::Build { watch: true } => {
            tracing::info!("Building site...");
            if let Some(summary) = commands::generate::run_reporting(&blog) {
                print_summary(&blog, &summary);
            }
            commands::generate::watch(&blog).await?;
        }

        Commands::Clean => {
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List => {
            commands::list::run(&blog)?;
        }

        Commands::New { title, tags } => {
            let tags: Vec<String> = tags
                .iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
            let path = blog.new_post(&title, &tags)?;
            println!("Created: {}", path.display());
        }
    }

    Ok(())
}

fn print_summary(blog: &Blog, summary: &BuildSummary) {
    println!(
        "Built {} posts ({} static files) into {:?}",
        summary.posts, summary.assets, blog.public_dir
    );
}
