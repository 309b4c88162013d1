mod session;

use api_shared::Notice;
use clap::{Parser, Subcommand};
use safekeep_vault::{FileName, FileVault, VaultConfig, IMAGE_EXTENSIONS};
use std::error::Error;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "safekeep")]
#[command(about = "Back up images and restore them with a recovery code")]
struct Cli {
    /// Directory holding uploads/ and backup/
    #[arg(long, global = true, env = "SAFEKEEP_DATA_DIR")]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Store an image and print its recovery code
    Ingest {
        /// Path of the image to store (png, jpg or jpeg)
        path: PathBuf,
    },
    /// Delete a file from uploads/ (its backup is kept)
    Delete {
        /// File name as listed
        filename: String,
    },
    /// Restore a deleted file from its backup
    Recover {
        /// Recovery code printed by ingest
        code: String,
    },
    /// List files in uploads/
    List,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("safekeep_vault=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = VaultConfig::from_env_value(cli.data_dir);
    let session_path = session::session_path(cfg.data_dir());

    match cli.command {
        Some(Commands::Ingest { path }) => {
            let filename = image_name(&path)?;
            let content = std::fs::read(&path)?;

            let vault = FileVault::open(&cfg)?;
            let mut map = session::load(&session_path)?;
            let code = vault.ingest(&mut map, &filename, &content)?;
            session::save(&session_path, &map)?;

            for notice in Notice::ingested(&code) {
                println!("{}", notice);
            }
        }
        Some(Commands::Delete { filename }) => {
            let filename = FileName::new(filename)?;
            let vault = FileVault::open(&cfg)?;
            let outcome = vault.delete(&filename)?;
            println!("{}", Notice::delete(&filename, outcome));
        }
        Some(Commands::Recover { code }) => {
            let vault = FileVault::open(&cfg)?;
            let map = session::load(&session_path)?;
            let outcome = vault.recover(&map, &code)?;
            println!("{}", Notice::recover(&outcome));
        }
        Some(Commands::List) => {
            let vault = FileVault::open(&cfg)?;
            let mut empty = true;
            for file in vault.list_active()? {
                let file = file?;
                empty = false;
                println!(
                    "{}  {} bytes  {}",
                    file.name,
                    file.size_bytes,
                    file.media_type.as_deref().unwrap_or("unknown")
                );
            }
            if empty {
                println!("{}", Notice::no_files());
            }
        }
        None => {
            println!("Use 'safekeep --help' for commands");
        }
    }

    Ok(())
}

/// File name an image at `path` is stored under; only png, jpg and jpeg are accepted.
fn image_name(path: &Path) -> Result<FileName, Box<dyn Error>> {
    let raw_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or("path has no usable file name")?;
    let filename = FileName::new(raw_name)?;
    if !filename
        .extension()
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
    {
        return Err("Only png, jpg and jpeg images are accepted.".into());
    }
    Ok(filename)
}
