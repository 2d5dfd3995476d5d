use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use roomplan::access::{AccessBoundary, IdentitySlot, VisibilityFilter};
use roomplan::config::Config;
use roomplan::document::DesignDocument;
use roomplan::persistence::{DesignSession, SaveIntent};
use roomplan::store::{DesignStore, MemoryDesignStore, PgDesignStore};
use roomplan::{DesignError, ErrorCode, db};
use scene::catalog::Catalog;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid design document: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("database init failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{} ({})", .0, .0.error_code())]
    Design(#[from] DesignError),
    #[error("{0} asset(s) not on the sprite allow-list")]
    RejectedAssets(usize),
}

#[derive(Parser, Debug)]
#[command(name = "roomplan", about = "Room planner design store CLI")]
struct Cli {
    /// Act as this user. Overrides `ROOMPLAN_USER_ID`.
    #[arg(long)]
    user: Option<Uuid>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a design document file, report repairs and asset problems.
    Check { file: PathBuf },
    /// Store a design document file as a new design owned by the current user.
    Import { file: PathBuf },
    /// List designs. Defaults to the current user's.
    List {
        #[arg(long, conflicts_with_all = ["private", "mine"])]
        public: bool,
        #[arg(long, conflicts_with = "mine")]
        private: bool,
        #[arg(long)]
        mine: bool,
    },
    Show { design_id: Uuid },
    Toggle { design_id: Uuid },
    Delete { design_id: Uuid },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Command::Check { file } => run_check(&file, &config),
        command => {
            let boundary = connect(&config, cli.user.or(config.user_id)).await?;
            run_store(&boundary, &config, command).await
        }
    }
}

async fn connect(config: &Config, user: Option<Uuid>) -> Result<AccessBoundary, CliError> {
    let identity = Arc::new(user.map_or_else(IdentitySlot::new, IdentitySlot::signed_in));
    let store: Arc<dyn DesignStore> = match &config.database_url {
        Some(url) => Arc::new(PgDesignStore::new(db::init_pool(url, config.db_max_connections).await?)),
        None => {
            warn!("DATABASE_URL not set; using an empty in-memory store");
            Arc::new(MemoryDesignStore::new())
        }
    };
    Ok(AccessBoundary::new(identity, store))
}

fn read_document(file: &Path) -> Result<DesignDocument, CliError> {
    let raw = std::fs::read_to_string(file).map_err(|source| CliError::Read { path: file.to_path_buf(), source })?;
    Ok(serde_json::from_str(&raw)?)
}

fn run_check(file: &Path, config: &Config) -> Result<(), CliError> {
    let doc = read_document(file)?;
    let (session, recovered) = DesignSession::import(&doc, config);
    let scene = session.engine().scene();

    println!("{} [{}] {} object(s)", doc.name, doc.kind, scene.len());
    for r in &recovered {
        println!("  repaired {r}");
    }

    let catalog = Catalog::furniture();
    let rejected: Vec<&str> = scene
        .objects()
        .iter()
        .filter(|o| catalog.check_asset(o).is_err())
        .map(|o| o.asset_file_name())
        .collect();
    for name in &rejected {
        println!("  rejected asset {name}");
    }

    if rejected.is_empty() {
        println!("ok");
        Ok(())
    } else {
        Err(CliError::RejectedAssets(rejected.len()))
    }
}

async fn run_store(boundary: &AccessBoundary, config: &Config, command: Command) -> Result<(), CliError> {
    match command {
        Command::Check { file } => run_check(&file, config),
        Command::Import { file } => {
            let doc = read_document(&file)?;
            let (mut session, recovered) = DesignSession::import(&doc, config);
            if !recovered.is_empty() {
                info!(count = recovered.len(), "imported design had repaired fields");
            }
            let saved = session.save(SaveIntent::Create, boundary).await?;
            println!("{}", saved.id);
            Ok(())
        }
        Command::List { public, private, .. } => {
            let filter = if public {
                VisibilityFilter::Public
            } else if private {
                VisibilityFilter::Private
            } else {
                VisibilityFilter::Owner
            };
            for doc in boundary.list_visible(filter).await? {
                let visibility = if doc.is_public { "public" } else { "private" };
                println!("{}\t{}\t{}\t{}", doc.id, doc.kind, visibility, doc.name);
            }
            Ok(())
        }
        Command::Show { design_id } => {
            let doc = boundary.fetch(design_id).await?;
            println!("{}", serde_json::to_string_pretty(&doc)?);
            Ok(())
        }
        Command::Toggle { design_id } => {
            let doc = boundary.toggle_visibility(design_id).await?;
            println!("{}\t{}", doc.id, if doc.is_public { "public" } else { "private" });
            Ok(())
        }
        Command::Delete { design_id } => {
            boundary.delete(design_id).await?;
            println!("deleted {design_id}");
            Ok(())
        }
    }
}
