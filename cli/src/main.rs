mod error_formatter;
mod formatter;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use formatter::Formatter;
use std::fs;
use std::path::{Path, PathBuf};
use tessera::{Engine, FileStore, ResourceLimits, RootNode, Session, StoreConfig};

#[derive(Parser)]
#[command(name = "tessera")]
#[command(about = "Editor blocks and program text from typed fact signatures.")]
#[command(
    long_about = "Tessera reads a signature catalogue (the library parser's JSON output), derives editor block definitions from it, and compiles block trees into (facts ...) (goal ...) program text.\nThe current tree can be saved to, loaded from and cleared in a local store."
)]
#[command(version)]
struct Cli {
    /// Signature catalogue JSON produced by the library parser
    #[arg(short = 'c', long, global = true, default_value = "signatures.json")]
    catalogue: PathBuf,
    /// Directory holding the stored program tree
    #[arg(short = 's', long, global = true, default_value = ".tessera")]
    store: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print block definitions for the editor (JSON)
    ///
    /// The fixed root block comes first, then one block per signature in
    /// catalogue order.
    Blocks,
    /// Print the editor toolbox with its Facts and Goals categories (JSON)
    Toolbox,
    /// List all signatures with their kind and parameters
    List,
    /// Compile a tree into program text
    ///
    /// Without a file the stored tree is compiled.
    Compile {
        /// Tree JSON: {"statements": [...], "goal": {...}}
        tree: Option<PathBuf>,
    },
    /// Store a tree so it can be loaded later
    Save {
        /// Tree JSON: {"statements": [...], "goal": {...}}
        tree: PathBuf,
    },
    /// Print the stored tree (JSON)
    Load {
        /// Show a table instead of JSON
        #[arg(short = 'p', long)]
        pretty: bool,
    },
    /// Remove the stored tree
    Clear,
    /// Parse program text back into a tree (JSON)
    Decompile {
        /// File containing program text
        program: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tessera=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Blocks => blocks_command(&cli.catalogue),
        Commands::Toolbox => toolbox_command(&cli.catalogue),
        Commands::List => list_command(&cli.catalogue),
        Commands::Compile { tree } => compile_command(&cli.catalogue, &cli.store, tree.as_deref()),
        Commands::Save { tree } => save_command(&cli.store, tree),
        Commands::Load { pretty } => load_command(&cli.catalogue, &cli.store, *pretty),
        Commands::Clear => clear_command(&cli.store),
        Commands::Decompile { program } => decompile_command(&cli.catalogue, program),
    };

    if let Err(e) = result {
        // Check if it's a TesseraError and format it nicely, otherwise use default
        if let Some(tessera_err) = e.downcast_ref::<tessera::TesseraError>() {
            eprintln!("{}", error_formatter::format_error(tessera_err));
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn blocks_command(catalogue: &Path) -> Result<()> {
    let engine = load_engine(catalogue)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&engine.block_definitions_json())?
    );
    Ok(())
}

fn toolbox_command(catalogue: &Path) -> Result<()> {
    let engine = load_engine(catalogue)?;
    println!("{}", serde_json::to_string_pretty(&engine.toolbox_json())?);
    Ok(())
}

fn list_command(catalogue: &Path) -> Result<()> {
    let engine = load_engine(catalogue)?;
    let formatter = Formatter::default();
    print!("{}", formatter.format_catalogue(engine.catalogue()));
    Ok(())
}

fn compile_command(catalogue: &Path, store: &Path, tree: Option<&Path>) -> Result<()> {
    let engine = load_engine(catalogue)?;
    let mut session = open_session(store);

    match tree {
        Some(path) => {
            session.replace_tree(read_tree(path)?);
        }
        None => {
            if !session.load(&engine)? {
                anyhow::bail!(
                    "No stored tree in {}. Pass a tree file or run `tessera save` first",
                    store.display()
                );
            }
        }
    }

    println!("{}", session.compile(&engine)?);
    Ok(())
}

fn save_command(store: &Path, tree: &Path) -> Result<()> {
    let mut session = open_session(store);
    session.replace_tree(read_tree(tree)?);
    session.save()?;
    println!("Saved tree to {}", store.display());
    Ok(())
}

fn load_command(catalogue: &Path, store: &Path, pretty: bool) -> Result<()> {
    let engine = load_engine(catalogue)?;
    let mut session = open_session(store);

    if !session.load(&engine)? {
        eprintln!("Nothing stored in {}", store.display());
        return Ok(());
    }

    if pretty {
        print!("{}", Formatter::default().format_tree_summary(session.tree()));
    } else {
        println!("{}", serde_json::to_string_pretty(session.tree())?);
    }
    Ok(())
}

fn clear_command(store: &Path) -> Result<()> {
    let mut session = open_session(store);
    session.clear()?;
    println!("Cleared {}", store.display());
    Ok(())
}

fn decompile_command(catalogue: &Path, program: &Path) -> Result<()> {
    let engine = load_engine(catalogue)?;
    let text = fs::read_to_string(program)
        .with_context(|| format!("Failed to read {}", program.display()))?;
    let tree = engine.decompile(&text, Some(program.to_string_lossy().to_string()))?;
    println!("{}", serde_json::to_string_pretty(&tree)?);
    Ok(())
}

/// Load the signature catalogue and derive everything from it
fn load_engine(catalogue: &Path) -> Result<Engine> {
    let json = fs::read_to_string(catalogue)
        .with_context(|| format!("Failed to read catalogue {}", catalogue.display()))?;
    Ok(Engine::from_json_with_limits(&json, &ResourceLimits::default())?)
}

fn open_session(store: &Path) -> Session<FileStore> {
    Session::with_config(
        FileStore::new(store),
        StoreConfig::default(),
        ResourceLimits::default(),
    )
}

fn read_tree(path: &Path) -> Result<RootNode> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read tree {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid tree JSON in {}", path.display()))
}
