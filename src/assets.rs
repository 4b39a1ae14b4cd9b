use std::collections::HashMap;
use std::fs::read_to_string;
use std::io;
use std::path::{Path, PathBuf};

/// Owned cache of text assets, read from disk at most once per path.
///
/// Construct one per session and hand it to whatever needs to load files.
#[derive(Debug, Default)]
pub struct Assets {
    prefix: PathBuf,
    text_cache: HashMap<PathBuf, String>,
}

impl Assets {
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            text_cache: HashMap::new(),
        }
    }

    /// path an asset name resolves to; absolute names are used as they are
    pub fn resolve(&self, name: impl AsRef<Path>) -> PathBuf {
        self.prefix.join(name)
    }

    pub fn text(&mut self, name: impl AsRef<Path>) -> io::Result<&str> {
        let path = self.resolve(name);
        if !self.text_cache.contains_key(&path) {
            log::debug!("reading asset {}", path.display());
            let contents = read_to_string(&path)?;
            self.text_cache.insert(path.clone(), contents);
        }

        Ok(&self.text_cache[&path])
    }

    /// seed the cache with in-memory contents, e.g. a generated world
    pub fn insert(&mut self, name: impl AsRef<Path>, contents: impl Into<String>) {
        let path = self.resolve(name);
        self.text_cache.insert(path, contents.into());
    }

    pub fn is_cached(&self, name: impl AsRef<Path>) -> bool {
        self.text_cache.contains_key(&self.resolve(name))
    }
}
