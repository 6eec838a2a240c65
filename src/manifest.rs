use crate::context::Context;
use crate::error::Error;
use crate::result::Result;
use crate::utils;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_NAME: &str = "lurti";
pub const DEFAULT_PREFIX: &str = "$NAME/";
pub const DEFAULT_OUTPUT: &str = "$NAME.zip";
pub const DEFAULT_FILES: &[&str] = &["LICENSE", "README.md", "init.lua"];
pub const DEFAULT_DIRS: &[&str] = &["core", "collections", "static", "dynamic"];

/// On-disk manifest; every key is optional and falls back to the defaults
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct LayoutToml {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub prefix: Option<String>,

    #[serde(default)]
    pub output: Option<String>,

    #[serde(default)]
    pub files: Option<Vec<String>>,

    #[serde(default)]
    pub dirs: Option<Vec<String>>,
}

/// What goes into the archive and where the archive goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub name: String,
    /// Prepended to every entry name; empty or ending in `/`
    pub prefix: String,
    /// Target archive, relative to the source root unless absolute
    pub output: PathBuf,
    /// Top-level files, included when present
    pub files: Vec<PathBuf>,
    /// Directories walked recursively
    pub dirs: Vec<PathBuf>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            prefix: expand(DEFAULT_PREFIX, DEFAULT_NAME),
            output: PathBuf::from(expand(DEFAULT_OUTPUT, DEFAULT_NAME)),
            files: DEFAULT_FILES.iter().map(PathBuf::from).collect(),
            dirs: DEFAULT_DIRS.iter().map(PathBuf::from).collect(),
        }
    }
}

impl Layout {
    /// Load a manifest file, resolving a relative path against the source root
    pub fn load(ctx: &Context, path: &Path) -> Result<Self> {
        let path = ctx.root.join(path);
        if !path.is_file() {
            return Err(Error::ManifestNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(&path).map_err(|e| Error::read(&path, e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let toml: LayoutToml = toml::from_str(content)?;
        Self::from_toml(toml)
    }

    pub fn from_toml(toml: LayoutToml) -> Result<Self> {
        let name = toml.name.unwrap_or_else(|| DEFAULT_NAME.to_string());
        if name.is_empty() {
            return Err(Error::InvalidManifest("`name` must not be empty".into()));
        }

        let mut prefix = expand(toml.prefix.as_deref().unwrap_or(DEFAULT_PREFIX), &name);
        if !prefix.is_empty() {
            if !utils::is_contained(Path::new(&prefix)) {
                return Err(Error::InvalidManifest(format!(
                    "prefix `{prefix}` must be a relative path without `..`"
                )));
            }
            if !prefix.ends_with('/') {
                prefix.push('/');
            }
        }

        let output = expand(toml.output.as_deref().unwrap_or(DEFAULT_OUTPUT), &name);
        if output.is_empty() {
            return Err(Error::InvalidManifest("`output` must not be empty".into()));
        }

        let files = contained_paths(
            "files",
            toml.files
                .unwrap_or_else(|| DEFAULT_FILES.iter().map(|s| s.to_string()).collect()),
        )?;
        let dirs = contained_paths(
            "dirs",
            toml.dirs
                .unwrap_or_else(|| DEFAULT_DIRS.iter().map(|s| s.to_string()).collect()),
        )?;

        Ok(Layout {
            name,
            prefix,
            output: PathBuf::from(output),
            files,
            dirs,
        })
    }

    /// Absolute location of the target archive
    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output)
    }
}

/// Replace `$NAME` references with the package name
fn expand(input: &str, name: &str) -> String {
    input.replace("$NAME", name)
}

fn contained_paths(key: &str, entries: Vec<String>) -> Result<Vec<PathBuf>> {
    entries
        .into_iter()
        .map(|entry| {
            let path = PathBuf::from(&entry);
            if utils::is_contained(&path) {
                Ok(path)
            } else {
                Err(Error::InvalidManifest(format!(
                    "`{key}` entry `{entry}` must be a relative path inside the source root"
                )))
            }
        })
        .collect()
}
