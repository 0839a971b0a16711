//! HomePlanet volume assembler CLI
//!
//! Builds the volume PDFs from the source PDFs in a folder.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use homeplanet_volumes::{Assembler, VolumeManifest};

/// Assemble HomePlanet volume PDFs: cover + body + footer
#[derive(Parser)]
#[command(name = "homeplanet-volumes")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Build every volume from the PDFs in the current folder into ./out
    homeplanet-volumes

    # Build from another folder, writing somewhere else
    homeplanet-volumes --root ~/homeplanet --out-dir /tmp/volumes

    # Use a different job table
    homeplanet-volumes --manifest volumes.toml")]
struct Cli {
    /// Folder containing the source PDFs
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Output folder (default: <root>/out)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Job table to use instead of the built-in one
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Delete Cover/Body/Merged intermediates once each volume is done
    #[arg(long)]
    clean_intermediates: bool,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // RUST_LOG, when set, overrides -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let manifest = match &cli.manifest {
        Some(path) => VolumeManifest::from_file(path)
            .with_context(|| format!("Failed to load manifest {}", path.display()))?,
        None => VolumeManifest::builtin()?,
    };

    let root = cli
        .root
        .canonicalize()
        .with_context(|| format!("Cannot open folder {}", cli.root.display()))?;

    let mut assembler = Assembler::new(&root).keep_intermediates(!cli.clean_intermediates);
    if let Some(out_dir) = cli.out_dir {
        assembler = assembler.with_out_dir(out_dir);
    }

    // Fail on a missing source before printing anything or creating out/
    assembler.validate(&manifest)?;

    println!("== HomePlanet Mechanical Merge ==");
    println!("Folder: {}", assembler.root().display());

    assembler.assemble_all(&manifest, |volume| {
        let name = volume
            .output
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!(volume = volume.number, pages = volume.page_count, "wrote {}", name);
        println!("✔ Volume {} -> {}", volume.number, name);
    })?;

    println!("DONE. Final PDFs are in {}", assembler.out_dir().display());

    Ok(())
}
