use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use sdc_engine::{parse_script, InstalledPlugins};
use sdc_files::{classify, FileKind, OutputFile};
use sdc_pipeline::{Pipeline, PipelineConfig};
use tracing::{info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const BOM: char = '\u{feff}';

#[derive(Parser)]
#[command(name = "sdc", about = "Transform compiled scripts and keep their source maps in step")]
struct Cli {
    /// More logging (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a batch of compiled files and their source maps.
    Run {
        /// Compiled files: scripts, `.map` files and anything else.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Directory to write results to (summary only if omitted).
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        /// Pipeline config (JSON).
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Dump every input and output file under this directory.
        #[arg(long)]
        debug_dir: Option<PathBuf>,
    },
    /// Parse each script and report any syntax errors.
    Check {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            inputs,
            out_dir,
            config,
            debug_dir,
        } => {
            let config = match &config {
                Some(path) => PipelineConfig::load(path)?,
                None => PipelineConfig::default(),
            };
            let root = std::env::current_dir()?;
            let pipeline = Pipeline::from_config(&config, &InstalledPlugins::new(), &root)?;

            let batch = inputs
                .iter()
                .map(|path| read_output_file(path))
                .collect::<Result<Vec<_>>>()?;

            let result = match &debug_dir {
                Some(dir) => {
                    let input_dir = dir.join("input");
                    let output_dir = dir.join("output");
                    pipeline
                        .run_debug(
                            &batch,
                            |file| dump(input_dir.clone(), file.clone()),
                            |file| dump(output_dir.clone(), file.clone()),
                        )
                        .await?
                }
                None => pipeline.run(&batch).await?,
            };

            match &out_dir {
                Some(dir) => {
                    for file in &result {
                        write_output_file(dir, file)?;
                    }
                    info!(files = result.len(), out_dir = %dir.display(), "wrote batch");
                }
                None => {
                    for file in &result {
                        println!("{}\t{} bytes", file.name, file.text.len());
                    }
                }
            }
        }
        Commands::Check { inputs } => {
            let mut failed = 0;
            for path in &inputs {
                let file = read_output_file(path)?;
                if classify(&file.name) != FileKind::Script {
                    continue;
                }
                match parse_script(&file.text, &file.name, &file.name) {
                    Ok(_) => eprintln!("OK: {}", file.name),
                    Err(e) => {
                        eprintln!("error: {e}");
                        failed += 1;
                    }
                }
            }
            if failed > 0 {
                anyhow::bail!("{failed} file(s) failed to parse");
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let mut filter = EnvFilter::from_default_env();
    if std::env::var("RUST_LOG").is_err() {
        for krate in ["sdc_cli", "sdc_engine", "sdc_pipeline"] {
            if let Ok(directive) = format!("{krate}={level}").parse() {
                filter = filter.add_directive(directive);
            }
        }
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

/// Read a file from disk into a batch element named by its path.
fn read_output_file(path: &Path) -> Result<OutputFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let name = path.display().to_string();
    Ok(match text.strip_prefix(BOM) {
        Some(rest) => OutputFile::new(name, rest).with_byte_order_mark(true),
        None => OutputFile::new(name, text),
    })
}

fn encode(file: &OutputFile) -> String {
    if file.write_byte_order_mark {
        format!("{BOM}{}", file.text)
    } else {
        file.text.clone()
    }
}

/// Where `name` lands under `dir`; root and `..` components are dropped so
/// nothing is written outside it.
fn destination(dir: &Path, name: &str) -> PathBuf {
    let relative: PathBuf = Path::new(name)
        .components()
        .filter(|component| matches!(component, Component::Normal(_)))
        .collect();
    dir.join(relative)
}

fn write_output_file(dir: &Path, file: &OutputFile) -> Result<()> {
    let path = destination(dir, &file.name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, encode(file))
        .with_context(|| format!("failed to write {}", path.display()))
}

async fn dump(dir: PathBuf, file: OutputFile) -> Result<()> {
    let path = destination(&dir, &file.name);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, encode(&file))
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}
