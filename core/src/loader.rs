use std::fs;
use std::path::Path;

use crate::pool::{Category, ContentPool};

/// Load every category from `<dir>/<stem>.txt`, one candidate per line.
///
/// A missing or unreadable file is not fatal: the category stays empty and
/// `pick` serves its fallback string from then on. Load failure and
/// selection fallback are deliberately decoupled.
pub fn load_pools(dir: &Path) -> ContentPool {
    let mut pool = ContentPool::default();
    for category in Category::ALL {
        let path = dir.join(format!("{}.txt", category.file_stem()));
        match fs::read_to_string(&path) {
            Ok(raw) => {
                let entries: Vec<String> = raw
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from)
                    .collect();
                tracing::info!(
                    category = category.file_stem(),
                    count = entries.len(),
                    "loaded content pool"
                );
                pool.set(category, entries);
            }
            Err(error) => {
                tracing::warn!(
                    category = category.file_stem(),
                    path = %path.display(),
                    %error,
                    "content file unavailable; category will serve its fallback"
                );
            }
        }
    }
    pool
}
