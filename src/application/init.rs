//! Initialize star cache use case

use crate::error::Result;
use crate::infrastructure::{Config, FileStore};
use std::fs;
use std::path::Path;

/// Initialize a new star cache at the specified path.
pub fn init(path: &Path, account: Option<String>) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let store = FileStore::new(path.to_path_buf());
    store.initialize()?;

    let config = Config::new(account.clone());
    store.save_config(&config)?;

    println!("Initialized starmark cache at {}", path.display());
    match account {
        Some(account) => println!("Account: {}", account),
        None => println!("Account: shared namespace"),
    }

    Ok(())
}
