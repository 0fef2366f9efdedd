//! Template package lookup
//!
//! A template package for identifier `vue-ts` is the directory
//! `template-vue-ts` inside one of the template roots. Roots are searched in
//! priority order:
//!
//! 1. Explicit override (`--templates-dir` or `CREATE_STARTER_TEMPLATES_DIR`)
//! 2. Workspace `templates/` directory (development builds)
//! 3. `$XDG_DATA_HOME/create-starter/templates` (installed packages)

use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{Result, ScaffoldError};

/// Directory prefix of every template package
pub const PACKAGE_PREFIX: &str = "template-";

/// Locates template package directories on disk
#[derive(Debug, Clone)]
pub struct TemplateStore {
    roots: Vec<PathBuf>,
}

impl TemplateStore {
    /// Build the default search chain, with an optional override in front
    #[must_use]
    pub fn new(override_dir: Option<PathBuf>) -> Self {
        let roots = override_dir
            .into_iter()
            .chain(Self::find_repo_templates_dir())
            .chain(Self::data_dir())
            .collect();
        Self { roots }
    }

    /// Search only the given roots
    #[must_use]
    pub const fn with_roots(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Roots in priority order
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Directory of the template package for `identifier`
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::TemplateNotFound`] if no root contains the package.
    pub fn locate(&self, identifier: &str) -> Result<PathBuf> {
        let package = format!("{PACKAGE_PREFIX}{identifier}");
        self.roots
            .iter()
            .map(|root| root.join(&package))
            .find(|candidate| candidate.is_dir())
            .inspect(|found| debug!(template = identifier, path = %found.display(), "template located"))
            .ok_or_else(|| ScaffoldError::TemplateNotFound {
                identifier: identifier.to_string(),
                searched: self.roots.clone(),
            })
    }

    /// Catalog identifiers with no package in any root
    #[must_use]
    pub fn missing(&self, catalog: &Catalog) -> Vec<String> {
        catalog
            .flat_identifiers()
            .iter()
            .filter(|id| self.locate(id).is_err())
            .cloned()
            .collect()
    }

    /// Find the templates directory in the local workspace (for development)
    fn find_repo_templates_dir() -> Option<PathBuf> {
        // Running from target/{debug,release}
        if let Ok(exe_path) = env::current_exe() {
            let workspace_root = exe_path
                .parent() // debug
                .and_then(Path::parent) // target
                .and_then(Path::parent);

            if let Some(root) = workspace_root {
                let templates_dir = root.join("templates");
                if templates_dir.is_dir() {
                    return Some(templates_dir);
                }
            }
        }

        let templates_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .map(|root| root.join("templates"))?;
        templates_dir.is_dir().then_some(templates_dir)
    }

    /// XDG data directory for installed template packages
    fn data_dir() -> Option<PathBuf> {
        let base = env::var_os("XDG_DATA_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("share")))?;
        Some(base.join("create-starter").join("templates"))
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_locate_prefers_first_root() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::create_dir(first.path().join("template-vue")).unwrap();
        fs::create_dir(second.path().join("template-vue")).unwrap();
        fs::create_dir(second.path().join("template-nest")).unwrap();

        let store = TemplateStore::with_roots(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);

        assert_eq!(store.locate("vue").unwrap(), first.path().join("template-vue"));
        assert_eq!(store.locate("nest").unwrap(), second.path().join("template-nest"));
    }

    #[test]
    fn test_locate_missing_reports_roots() {
        let root = TempDir::new().unwrap();
        let store = TemplateStore::with_roots(vec![root.path().to_path_buf()]);

        match store.locate("svelte") {
            Err(ScaffoldError::TemplateNotFound { identifier, searched }) => {
                assert_eq!(identifier, "svelte");
                assert_eq!(searched, vec![root.path().to_path_buf()]);
            }
            other => panic!("expected TemplateNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_file_is_not_a_package() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("template-vue"), "not a dir").unwrap();
        let store = TemplateStore::with_roots(vec![root.path().to_path_buf()]);
        assert!(store.locate("vue").is_err());
    }

    #[test]
    fn test_override_comes_first() {
        let store = TemplateStore::new(Some(PathBuf::from("/custom/templates")));
        assert_eq!(store.roots()[0], PathBuf::from("/custom/templates"));
    }

    #[test]
    fn test_missing_lists_unshipped_identifiers() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("template-nest")).unwrap();
        fs::create_dir(root.path().join("template-react-ts")).unwrap();
        let store = TemplateStore::with_roots(vec![root.path().to_path_buf()]);

        assert_eq!(store.missing(&Catalog::default()), vec!["vue", "vue-ts"]);
    }
}
