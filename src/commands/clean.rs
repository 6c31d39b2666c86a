//! The `clean` command: drop the scoreboard disk cache (and optionally the
//! rendered outputs).

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::core::cache_root;
use crate::Result;

pub struct CleanParams {
    pub outputs: bool,
    pub out_dir: PathBuf,
}

pub fn handle_clean(params: CleanParams) -> Result<()> {
    let cache_dir = cache_root();
    if cache_dir.is_dir() {
        fs::remove_dir_all(&cache_dir)?;
        println!("removed cache: {}", cache_dir.display());
    } else {
        info!("no cache directory at {}", cache_dir.display());
    }

    if params.outputs {
        if params.out_dir.is_dir() {
            fs::remove_dir_all(&params.out_dir)?;
            println!("removed outputs: {}", params.out_dir.display());
        } else {
            info!("no output directory at {}", params.out_dir.display());
        }
    }
    Ok(())
}
