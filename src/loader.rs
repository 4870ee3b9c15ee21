use crate::error::LoadError;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use walkdir::WalkDir;

/// A raw fixture, not yet validated.
#[derive(Debug, Clone)]
pub struct LoadedFixture {
    pub path: PathBuf,
    pub data: Value,
}

impl LoadedFixture {
    /// Path for display, relative to `root` when possible.
    pub fn display_name(&self, root: &Path) -> String {
        self.path
            .strip_prefix(root)
            .ok()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(self.path.as_path())
            .display()
            .to_string()
    }
}

pub struct FixtureLoader {
    root: PathBuf,
    max_depth: usize,
}

impl FixtureLoader {
    /// `path` may start with `~`; it is expanded against the home directory.
    pub fn new(path: &str) -> Self {
        let expanded = shellexpand::tilde(path).into_owned();
        Self {
            root: PathBuf::from(expanded),
            max_depth: 3,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads a single file, or every `*.json` under a directory. Inside a
    /// directory, files that fail to parse are logged and skipped.
    pub fn load(&self) -> Result<Vec<LoadedFixture>, LoadError> {
        if !self.root.exists() {
            return Err(LoadError::NotFound(self.root.clone()));
        }

        if self.root.is_file() {
            return Ok(vec![self.load_file(&self.root)?]);
        }

        let files = self.find_json_files()?;
        debug!(count = files.len(), root = %self.root.display(), "Found fixture files");

        let mut fixtures = Vec::with_capacity(files.len());
        for path in files {
            match self.load_file(&path) {
                Ok(fixture) => fixtures.push(fixture),
                Err(e) => error!("{}", e),
            }
        }
        Ok(fixtures)
    }

    pub(crate) fn find_json_files(&self) -> Result<Vec<PathBuf>, LoadError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root).max_depth(self.max_depth) {
            let entry = entry.map_err(|source| LoadError::Walk {
                path: self.root.clone(),
                source,
            })?;
            if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "json") {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }

    pub(crate) fn load_file(&self, path: &Path) -> Result<LoadedFixture, LoadError> {
        let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data = serde_json::from_str(&contents).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(LoadedFixture {
            path: path.to_path_buf(),
            data,
        })
    }
}
