//! CLI entry point for retrofit-press

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use retrofit_press::{commands, server, Site};

#[derive(Parser)]
#[command(name = "retrofit-press")]
#[command(version)]
#[command(about = "Content repository and SEO generator for the RetrofitAge blog", long_about = None)]
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
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Category slug (defaults to the configured default category)
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Tags, repeatable
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// Generate the search index, sitemap and per-post payloads
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Search posts by title, description and category
    Search {
        /// Search terms; all must match
        query: Vec<String>,
    },

    /// Clean the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, category, tag, route)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "retrofit_press=debug,info"
    } else {
        "retrofit_press=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New {
            title,
            category,
            tags,
        } => {
            let site = Site::new(&base_dir)?;
            commands::new::run(&site, &title, category.as_deref(), &tags)?;
        }

        Commands::Generate { watch } => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Generating static outputs...");
            site.generate()?;
            println!("Generated successfully!");

            if watch {
                commands::generate::watch(&site).await?;
            }
        }

        Commands::Server { port, ip, r#static } => {
            let site = Site::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static outputs...");
            site.generate()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            server::start(&site, &ip, port, !r#static).await?;
        }

        Commands::Search { query } => {
            let site = Site::new(&base_dir)?;
            commands::search::run(&site, &query.join(" "))?;
        }

        Commands::Clean => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = Site::new(&base_dir)?;
            commands::list::run(&site, &r#type)?;
        }

        Commands::Version => {
            println!("retrofit-press version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
