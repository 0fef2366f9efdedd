//! Template package materialization
//!
//! Copies a template package into the target directory:
//! 1. Clear the target (overwrite) or create it
//! 2. Copy every top-level entry except the manifest, remapping reserved names
//! 3. Rewrite the manifest `name` field and write it out
//!
//! There is no rollback. The first failing filesystem operation aborts the
//! run and leaves already written files in place.

use serde_json::Value;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{Result, ScaffoldError};

/// Version-control metadata directory tolerated in an "empty" target
pub const VCS_DIR: &str = ".git";

/// Default manifest file name inside a template package
pub const MANIFEST_FILE: &str = "package.json";

/// Source names that cannot ship literally, mapped to their real names
pub const RENAMED_FILES: &[(&str, &str)] = &[("_gitignore", ".gitignore"), ("_eslintrc", ".eslintrc")];

/// Destination name for a top-level template entry
#[must_use]
pub fn destination_name(file: &str) -> &str {
    RENAMED_FILES
        .iter()
        .find(|(source, _)| *source == file)
        .map_or(file, |&(_, renamed)| renamed)
}

/// [`destination_name`] for names that may not be UTF-8
fn destination_os_name(file: &OsStr) -> &OsStr {
    file.to_str().map_or(file, |name| OsStr::new(destination_name(name)))
}

/// Whether a directory counts as empty
///
/// A directory holding nothing but [`VCS_DIR`] is empty.
///
/// # Errors
///
/// Returns the underlying error if the directory cannot be read.
pub fn is_empty_dir(path: &Path) -> io::Result<bool> {
    let mut names = Vec::new();
    for entry in fs::read_dir(path)? {
        names.push(entry?.file_name());
        if names.len() > 1 {
            return Ok(false);
        }
    }
    Ok(names.first().is_none_or(|name| name == VCS_DIR))
}

/// Whether the prompt flow has to ask before reusing `path`
///
/// An unreadable directory is reported and treated as non-empty.
#[must_use]
pub fn needs_overwrite_confirmation(path: &Path) -> bool {
    path.is_dir() && overwrite_needed(path, is_empty_dir(path))
}

fn overwrite_needed(path: &Path, empty: io::Result<bool>) -> bool {
    match empty {
        Ok(empty) => !empty,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read target, asking before overwrite");
            true
        }
    }
}

/// Remove every entry under `dir`
///
/// A missing directory is treated as already empty.
///
/// # Errors
///
/// Returns [`ScaffoldError::Io`] for the first entry that cannot be removed.
pub fn empty_dir(dir: &Path) -> Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(ScaffoldError::io(dir, e)),
    };

    for entry in entries {
        let entry = entry.map_err(|e| ScaffoldError::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| ScaffoldError::io(&path, e))?;
        let removed = if file_type.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        match removed {
            Ok(()) => debug!(path = %path.display(), "removed"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(ScaffoldError::io(&path, e)),
        }
    }
    Ok(())
}

/// Join `target` onto `cwd`, folding `.` and `..` components
#[must_use]
pub fn resolve_root(cwd: &Path, target: &str) -> PathBuf {
    let mut root = cwd.to_path_buf();
    for component in Path::new(target).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                root.pop();
            }
            other => root.push(other),
        }
    }
    root
}

/// Summary of a completed materialization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Regular files copied, manifest included
    pub files: usize,
    /// Directories created inside the target
    pub directories: usize,
}

/// Copies one template package into a target directory
#[derive(Debug, Clone)]
pub struct Materializer<'a> {
    template_dir: &'a Path,
    manifest_file: &'a str,
}

impl<'a> Materializer<'a> {
    /// Create a materializer for the package rooted at `template_dir`
    #[must_use]
    pub const fn new(template_dir: &'a Path, manifest_file: &'a str) -> Self {
        Self {
            template_dir,
            manifest_file,
        }
    }

    /// Materialize the package into `root`
    ///
    /// # Arguments
    ///
    /// * `root` - Target directory
    /// * `overwrite` - Clear existing entries first
    /// * `package_name` - Value written to the manifest `name` field
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The target cannot be cleared or created
    /// - Any entry cannot be copied
    /// - The manifest is missing, malformed or cannot be written
    pub fn materialize(
        &self,
        root: &Path,
        overwrite: bool,
        package_name: &str,
    ) -> Result<MaterializeReport> {
        if overwrite {
            info!(root = %root.display(), "clearing target directory");
            empty_dir(root)?;
        }
        fs::create_dir_all(root).map_err(|e| ScaffoldError::io(root, e))?;

        let mut report = MaterializeReport::default();
        for name in self.top_level_entries()? {
            if name.as_os_str() == OsStr::new(self.manifest_file) {
                continue;
            }
            let src = self.template_dir.join(&name);
            let dest = root.join(destination_os_name(&name));
            copy(&src, &dest, &mut report)?;
        }

        self.write_manifest(root, package_name)?;
        report.files += 1;

        info!(
            files = report.files,
            directories = report.directories,
            "template materialized"
        );
        Ok(report)
    }

    /// Immediate children of the package, sorted by name
    fn top_level_entries(&self) -> Result<Vec<OsString>> {
        let dir = self.template_dir;
        let mut names = fs::read_dir(dir)
            .map_err(|e| ScaffoldError::io(dir, e))?
            .map(|entry| {
                entry
                    .map(|e| e.file_name())
                    .map_err(|e| ScaffoldError::io(dir, e))
            })
            .collect::<Result<Vec<_>>>()?;
        names.sort();
        Ok(names)
    }

    fn write_manifest(&self, root: &Path, package_name: &str) -> Result<()> {
        let src = self.template_dir.join(self.manifest_file);
        let content = fs::read_to_string(&src).map_err(|e| ScaffoldError::io(&src, e))?;
        let manifest = patch_manifest(&content, package_name).map_err(|e| match e {
            ManifestPatchError::Json(source) => ScaffoldError::Manifest {
                path: src.clone(),
                source,
            },
            ManifestPatchError::NotAnObject => ScaffoldError::InvalidManifest { path: src.clone() },
        })?;

        let dest = root.join(destination_name(self.manifest_file));
        fs::write(&dest, manifest).map_err(|e| ScaffoldError::io(&dest, e))?;
        debug!(path = %dest.display(), name = package_name, "wrote manifest");
        Ok(())
    }
}

enum ManifestPatchError {
    Json(serde_json::Error),
    NotAnObject,
}

/// Set the manifest `name` field, keeping key order and two-space indentation
fn patch_manifest(content: &str, package_name: &str) -> std::result::Result<String, ManifestPatchError> {
    let mut manifest: Value = serde_json::from_str(content).map_err(ManifestPatchError::Json)?;
    let object = manifest.as_object_mut().ok_or(ManifestPatchError::NotAnObject)?;
    object.insert("name".to_string(), Value::String(package_name.to_string()));
    let mut out = serde_json::to_string_pretty(&manifest).map_err(ManifestPatchError::Json)?;
    out.push('\n');
    Ok(out)
}

/// Copy a file, or a directory depth-first
fn copy(src: &Path, dest: &Path, report: &mut MaterializeReport) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().map_or_else(|| src.to_path_buf(), Path::to_path_buf);
            ScaffoldError::io(&path, io::Error::from(e))
        })?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .unwrap_or_else(|_| Path::new(""));
        let target = if relative.as_os_str().is_empty() {
            dest.to_path_buf()
        } else {
            dest.join(relative)
        };

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| ScaffoldError::io(&target, e))?;
            report.directories += 1;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| ScaffoldError::io(&target, e))?;
            report.files += 1;
            debug!(from = %entry.path().display(), to = %target.display(), "copied");
        }
    }
    Ok(())
}
