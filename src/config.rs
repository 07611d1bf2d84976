use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "directory.toml";
pub const DEFAULT_THRESHOLD: f32 = 12.25;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("column region #{index} is empty or inverted: ({x0}, {top}, {x1}, {bottom})")]
    InvalidRegion {
        index: usize,
        x0: f32,
        top: f32,
        x1: f32,
        bottom: f32,
    },
    #[error("specialty threshold must be a positive number, got {0}")]
    InvalidThreshold(f32),
    #[error("{file}: category '{category}' has no pages")]
    EmptyPages { file: PathBuf, category: String },
    #[error("{file}: category '{category}' references page 0 (pages are 1-based)")]
    ZeroPage { file: PathBuf, category: String },
}

/// Page rectangle `(x0, top, x1, bottom)` in top-left-origin points.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ColumnRegion {
    pub x0: f32,
    pub top: f32,
    pub x1: f32,
    pub bottom: f32,
}

impl ColumnRegion {
    pub const fn new(x0: f32, top: f32, x1: f32, bottom: f32) -> Self {
        Self { x0, top, x1, bottom }
    }

    pub fn is_valid(&self) -> bool {
        self.x1 > self.x0 && self.bottom > self.top
    }

    /// Half-open containment: the right and bottom edges belong to the next region.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.top && y < self.bottom
    }
}

/// Left, middle and right columns of a US-letter directory page.
pub const DEFAULT_COLUMNS: [ColumnRegion; 3] = [
    ColumnRegion::new(0.0, 80.0, 222.0, 677.0),
    ColumnRegion::new(222.0, 80.0, 404.0, 677.0),
    ColumnRegion::new(404.0, 80.0, 612.0, 677.0),
];

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryConfig {
    pub pages: Vec<usize>,
    pub provider_category: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    pub path: PathBuf,
    pub categories: Vec<CategoryConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub specialty_threshold: f32,
    pub default_state: String,
    pub output_dir: PathBuf,
    pub columns: Vec<ColumnRegion>,
    pub files: Vec<FileConfig>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            specialty_threshold: DEFAULT_THRESHOLD,
            default_state: "NY".to_string(),
            output_dir: PathBuf::from("output"),
            columns: DEFAULT_COLUMNS.to_vec(),
            files: Vec::new(),
        }
    }
}

impl DirectoryConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&raw).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        tracing::info!(
            path = %path.display(),
            files = config.files.len(),
            jobs = config.jobs().count(),
            "Loaded directory config"
        );
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        if config.columns.is_empty() {
            config.columns = DEFAULT_COLUMNS.to_vec();
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_threshold(self.specialty_threshold)?;
        validate_regions(&self.columns)?;

        for file in &self.files {
            for cat in &file.categories {
                if cat.pages.is_empty() {
                    return Err(ConfigError::EmptyPages {
                        file: file.path.clone(),
                        category: cat.provider_category.clone(),
                    });
                }
                if cat.pages.contains(&0) {
                    return Err(ConfigError::ZeroPage {
                        file: file.path.clone(),
                        category: cat.provider_category.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Flattened (file, pages, category) jobs in declaration order.
    pub fn jobs(&self) -> impl Iterator<Item = Job<'_>> {
        self.files.iter().flat_map(|f| {
            f.categories.iter().map(move |c| Job {
                file: &f.path,
                pages: &c.pages,
                category: &c.provider_category,
            })
        })
    }
}

pub fn validate_threshold(threshold: f32) -> Result<(), ConfigError> {
    if threshold.is_finite() && threshold > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold(threshold))
    }
}

pub fn validate_regions(regions: &[ColumnRegion]) -> Result<(), ConfigError> {
    match regions.iter().enumerate().find(|(_, r)| !r.is_valid()) {
        Some((index, r)) => Err(ConfigError::InvalidRegion {
            index,
            x0: r.x0,
            top: r.top,
            x1: r.x1,
            bottom: r.bottom,
        }),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Job<'a> {
    pub file: &'a Path,
    pub pages: &'a [usize],
    pub category: &'a str,
}
