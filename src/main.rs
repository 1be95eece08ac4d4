use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use spacetree::{CompilerConfig, ContentKind, ProjectCompiler, SandboxBuilder};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "spacetree")]
#[command(about = "Compile text, JSON and link-notation projects into block trees")]
#[command(long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML file overriding the default thresholds
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment, build and analyze a single file
    Compile {
        file: PathBuf,

        /// Content kind; inferred from the extension when omitted
        #[arg(long, value_enum)]
        kind: Option<KindArg>,

        /// Resource id; defaults to the file path
        #[arg(long)]
        id: Option<String>,
    },
    /// Parse a link-notation file into a project graph
    Links { file: PathBuf },
    /// Compile a project from a ZIP archive or a directory
    Project { path: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Text,
    Json,
}

impl From<KindArg> for ContentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Text => ContentKind::Text,
            KindArg::Json => ContentKind::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = match &cli.config {
        Some(path) => CompilerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CompilerConfig::default(),
    };

    match cli.command {
        Commands::Compile { file, kind, id } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let display = file.display().to_string();
            let kind = kind
                .map(ContentKind::from)
                .unwrap_or_else(|| ContentKind::from_path(&display));
            let resource_id = id.unwrap_or(display);

            log::info!("Compiling {} as {}", resource_id, kind.as_str());
            let resource = spacetree::compile(&content, kind, &resource_id, &config);
            log::info!(
                "Built {} blocks from {} fragments",
                resource.blocks.len(),
                resource.fragment_count()
            );
            print_json(&resource, cli.pretty)
        }
        Commands::Links { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let graph = spacetree::parse_links(&content);
            log::info!("Parsed {} nodes, {} roots", graph.len(), graph.roots.len());
            print_json(&graph, cli.pretty)
        }
        Commands::Project { path } => {
            let sandbox = load_sandbox(&path)?;
            log::info!(
                "Loaded {} files ({} bytes) from {}",
                sandbox.file_count(),
                sandbox.total_size(),
                path.display()
            );

            let graph = ProjectCompiler::new(config)
                .compile(&sandbox)
                .with_context(|| format!("Failed to compile project {}", path.display()))?;
            log::info!("Compiled project graph with {} nodes", graph.len());
            print_json(&graph, cli.pretty)
        }
    }
}

fn load_sandbox(path: &Path) -> Result<spacetree::Sandbox> {
    let builder = SandboxBuilder::new();
    let builder = if path.is_dir() {
        builder.ingest_directory(path)?
    } else {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read archive {}", path.display()))?;
        builder.ingest_zip(&bytes)?
    };
    Ok(builder.build())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
