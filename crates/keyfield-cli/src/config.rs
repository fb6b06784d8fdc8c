//! Command-line configuration.

use clap::Parser;
use keyfield_core::StorageConfig;
use std::path::PathBuf;

/// Default database directory.
pub const DEFAULT_DATA_PATH: &str = "./keyfield_data";

/// Default page cache size in MB.
pub const DEFAULT_CACHE_MB: u64 = 64;

/// Default flush interval in milliseconds.
pub const DEFAULT_FLUSH_MS: u64 = 500;

/// keyfield - interactive schema and record browser
#[derive(Parser, Debug)]
#[command(name = "keyfield")]
#[command(version, about = "Interactive schema and record browser for keyfield databases")]
pub struct Args {
    /// Path to the database directory
    #[arg(default_value = DEFAULT_DATA_PATH)]
    pub path: PathBuf,

    /// Use a temporary database that is discarded on exit
    #[arg(long)]
    pub temporary: bool,

    /// Open the dialog for this key field instead of the database menu
    #[arg(short, long)]
    pub key: Option<String>,

    /// Read dialog input from a file instead of the terminal
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Page cache size in MB
    #[arg(long, default_value_t = DEFAULT_CACHE_MB)]
    pub cache_mb: u64,

    /// Flush interval in milliseconds (0 flushes only on exit)
    #[arg(long, default_value_t = DEFAULT_FLUSH_MS)]
    pub flush_ms: u64,

    /// Disable zstd compression
    #[arg(long)]
    pub no_compression: bool,
}

impl Args {
    /// Build the storage configuration these arguments describe.
    pub fn storage_config(&self) -> StorageConfig {
        let config = if self.temporary {
            StorageConfig::temporary()
        } else {
            StorageConfig::new(&self.path)
        };

        let flush = if self.flush_ms == 0 {
            None
        } else {
            Some(self.flush_ms)
        };

        config
            .with_cache_capacity(self.cache_mb * 1024 * 1024)
            .with_flush_every_ms(flush)
            .with_compression(!self.no_compression)
    }
}
