mod matrix_commands;
mod project_commands;
mod vertical_commands;

use std::path::PathBuf;

use {
    clap::{Parser, Subcommand},
    hivemind_registry::{FsMatrixStore, paths},
    tracing::debug,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "hivemind", about = "Hivemind — shared brain for multi-project matrices")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Custom data directory (overrides the platform default).
    #[arg(long, global = true, env = "HIVEMIND_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new matrix.
    Init {
        /// Matrix name.
        matrix: String,
    },
    /// Register a project directory as a member of a matrix.
    Register {
        matrix: String,
        /// Project name, unique within the matrix.
        project: String,
        /// Project directory (defaults to the current directory).
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Remove a project from a matrix and delete its marker.
    Unregister {
        matrix: String,
        project: String,
    },
    /// Show a matrix summary; with no argument, use the detected
    /// project or list all matrices.
    Status {
        matrix: Option<String>,
    },
    /// List all matrices.
    List,
    /// List the projects registered in a matrix.
    Projects {
        matrix: String,
    },
    /// Add a vertical to a matrix and seed its document.
    AddVertical {
        matrix: String,
        /// Vertical name (e.g. branding, env-vars).
        vertical: String,
    },
    /// Remove a vertical and delete its document.
    RemoveVertical {
        matrix: String,
        vertical: String,
    },
    /// List the verticals of a matrix with content summaries.
    ListVerticals {
        matrix: String,
    },
    /// Print vertical content (all verticals when none is given).
    Read {
        matrix: String,
        vertical: Option<String>,
    },
    /// Append a changelog entry.
    Log {
        matrix: String,
        /// Entry text; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Print the marker for the current directory as JSON.
    Detect,
    /// Print the directory holding a matrix' files.
    Path {
        matrix: String,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    let base = cli
        .data_dir
        .clone()
        .unwrap_or_else(paths::default_data_dir);
    debug!(data_dir = %base.display(), "using data directory");
    let store = FsMatrixStore::new(base);

    match cli.command {
        Commands::Init { matrix } => matrix_commands::init(&store, &matrix).await,
        Commands::Register {
            matrix,
            project,
            path,
        } => project_commands::register(&store, &matrix, &project, path).await,
        Commands::Unregister { matrix, project } => {
            project_commands::unregister(&store, &matrix, &project).await
        },
        Commands::Status { matrix } => matrix_commands::status(&store, matrix.as_deref()).await,
        Commands::List => matrix_commands::list(&store).await,
        Commands::Projects { matrix } => project_commands::list(&store, &matrix).await,
        Commands::AddVertical { matrix, vertical } => {
            vertical_commands::add(&store, &matrix, &vertical).await
        },
        Commands::RemoveVertical { matrix, vertical } => {
            vertical_commands::remove(&store, &matrix, &vertical).await
        },
        Commands::ListVerticals { matrix } => vertical_commands::list(&store, &matrix).await,
        Commands::Read { matrix, vertical } => {
            vertical_commands::read(&store, &matrix, vertical.as_deref()).await
        },
        Commands::Log { matrix, message } => {
            matrix_commands::log_change(&store, &matrix, &message.join(" ")).await
        },
        Commands::Detect => project_commands::detect(&store).await,
        Commands::Path { matrix } => matrix_commands::path(&store, &matrix).await,
    }
}
