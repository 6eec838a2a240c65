use crate::error::Error;
use crate::result::Result;
use std::path::{Component, Path, PathBuf};

/// Resolve the source root: the given directory, or the current directory
pub fn resolve_root(path: Option<&Path>) -> Result<PathBuf> {
    let root = match path {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };

    if !root.is_dir() {
        return Err(Error::RootNotFound(root));
    }

    Ok(root)
}

/// Build the in-archive name for a root-relative path.
///
/// Components are joined with `/` whatever the host separator is.
pub fn archive_name(prefix: &str, relative: &Path) -> Result<String> {
    let mut name = String::from(prefix);
    let mut first = true;
    for component in relative.components() {
        let Component::Normal(part) = component else {
            continue;
        };
        let part = part
            .to_str()
            .ok_or_else(|| Error::NonUtf8Path(relative.to_path_buf()))?;
        if !first {
            name.push('/');
        }
        name.push_str(part);
        first = false;
    }
    Ok(name)
}

/// True when the path stays below whatever directory it is joined onto
pub fn is_contained(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
