//! Package manager detection and next-step instructions
//!
//! Package-manager wrappers (`npm init`, `yarn create`, `pnpm create`)
//! export a user agent such as `pnpm/8.6.0 npm/? node/v18.16.0 linux x64`.
//! Only the first token is read.

use std::path::{Component, Path, PathBuf};

/// Environment variable set by package-manager wrappers
pub const USER_AGENT_VAR: &str = "npm_config_user_agent";

/// Package manager used when none is detected
pub const DEFAULT_PACKAGE_MANAGER: &str = "npm";

/// The package manager that launched the tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoker {
    /// Package manager name, e.g. `yarn`
    pub name: String,
    /// Version string, when the agent carried one
    pub version: Option<String>,
}

impl Invoker {
    /// Parse a `<name>/<version> ...` user agent
    #[must_use]
    pub fn from_user_agent(user_agent: &str) -> Option<Self> {
        let token = user_agent.split(' ').next()?;
        let mut parts = token.split('/');
        let name = parts.next().filter(|n| !n.is_empty())?;
        Some(Self {
            name: name.to_string(),
            version: parts.next().map(ToString::to_string),
        })
    }
}

/// Source of invoker information
pub trait InvokerSource {
    /// Detect the package manager, if any
    fn detect(&self) -> Option<Invoker>;
}

/// Reads [`USER_AGENT_VAR`] from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvInvokerSource;

impl InvokerSource for EnvInvokerSource {
    fn detect(&self) -> Option<Invoker> {
        std::env::var(USER_AGENT_VAR)
            .ok()
            .and_then(|agent| Invoker::from_user_agent(&agent))
    }
}

impl<F> InvokerSource for F
where
    F: Fn() -> Option<Invoker>,
{
    fn detect(&self) -> Option<Invoker> {
        self()
    }
}

/// Shell commands to run after scaffolding
///
/// Starts with `cd <dir>` unless the project was created in `cwd`.
#[must_use]
pub fn next_steps(root: &Path, cwd: &Path, invoker: Option<&Invoker>) -> Vec<String> {
    let mut steps = Vec::with_capacity(3);
    if root != cwd {
        steps.push(format!("cd {}", relative_to(root, cwd).display()));
    }

    let manager = invoker.map_or(DEFAULT_PACKAGE_MANAGER, |i| i.name.as_str());
    if manager == "yarn" {
        steps.push("yarn".to_string());
        steps.push("yarn dev".to_string());
    } else {
        steps.push(format!("{manager} install"));
        steps.push(format!("{manager} run dev"));
    }
    steps
}

/// Path of `path` as seen from `base`, climbing with `..` where needed
///
/// Falls back to `path` itself when the two share no root.
fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let mut path_parts = path.components().peekable();
    let mut base_parts = base.components().peekable();

    let mut shared = false;
    while let (Some(a), Some(b)) = (path_parts.peek(), base_parts.peek()) {
        if a != b {
            break;
        }
        shared = true;
        path_parts.next();
        base_parts.next();
    }
    if !shared {
        return path.to_path_buf();
    }

    base_parts
        .map(|_| Component::ParentDir)
        .chain(path_parts)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_agent() {
        let invoker = Invoker::from_user_agent("pnpm/8.6.0 npm/? node/v18.16.0 linux x64").unwrap();
        assert_eq!(invoker.name, "pnpm");
        assert_eq!(invoker.version.as_deref(), Some("8.6.0"));
    }

    #[test]
    fn test_parse_user_agent_without_version() {
        let invoker = Invoker::from_user_agent("yarn").unwrap();
        assert_eq!(invoker.name, "yarn");
        assert!(invoker.version.is_none());
    }

    #[test]
    fn test_parse_empty_user_agent() {
        assert!(Invoker::from_user_agent("").is_none());
    }

    #[test]
    fn test_closure_source() {
        let source = || Invoker::from_user_agent("bun/1.0.0");
        assert_eq!(source.detect().map(|i| i.name), Some("bun".to_string()));
    }

    #[test]
    fn test_next_steps_default_manager() {
        let cwd = PathBuf::from("/work");
        let steps = next_steps(&cwd.join("my-app"), &cwd, None);
        assert_eq!(steps, vec!["cd my-app", "npm install", "npm run dev"]);
    }

    #[test]
    fn test_next_steps_yarn() {
        let cwd = PathBuf::from("/work");
        let yarn = Invoker::from_user_agent("yarn/1.22.19 npm/? node/v18").unwrap();
        let steps = next_steps(&cwd.join("a/b"), &cwd, Some(&yarn));
        assert_eq!(steps, vec!["cd a/b", "yarn", "yarn dev"]);
    }

    #[test]
    fn test_next_steps_in_place() {
        let cwd = PathBuf::from("/work");
        let pnpm = Invoker::from_user_agent("pnpm/8.0.0").unwrap();
        let steps = next_steps(&cwd, &cwd, Some(&pnpm));
        assert_eq!(steps, vec!["pnpm install", "pnpm run dev"]);
    }

    #[test]
    fn test_next_steps_outside_cwd() {
        let steps = next_steps(Path::new("/elsewhere/app"), Path::new("/work"), None);
        assert_eq!(steps[0], "cd ../elsewhere/app");
    }

    #[test]
    fn test_next_steps_sibling_directory() {
        let steps = next_steps(Path::new("/tmp/sibling"), Path::new("/tmp/work"), None);
        assert_eq!(steps, vec!["cd ../sibling", "npm install", "npm run dev"]);
    }

    #[test]
    fn test_relative_to() {
        assert_eq!(relative_to(Path::new("/a/b/c"), Path::new("/a")), PathBuf::from("b/c"));
        assert_eq!(relative_to(Path::new("/a"), Path::new("/a/b/c")), PathBuf::from("../.."));
        assert_eq!(relative_to(Path::new("app"), Path::new("/work")), PathBuf::from("app"));
    }
}
