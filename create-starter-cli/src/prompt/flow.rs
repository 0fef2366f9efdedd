//! Prompt flow engine
//!
//! The flow is all-or-nothing: it either returns a complete
//! [`ResolvedConfig`] or [`FlowOutcome::Cancelled`], and it never touches the
//! filesystem beyond reading whether the target directory is empty.

use std::path::PathBuf;
use tracing::debug;

use super::{Prompter, TextPrompt};
use crate::catalog::{Catalog, Framework};
use crate::error::{Result, ScaffoldError};
use crate::materialize::{needs_overwrite_confirmation, resolve_root};
use crate::naming::{
    is_valid_package_name, normalize_dir_name, to_valid_package_name, validate_package_name,
};

/// One question of the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Ask for the target directory
    TargetDir,
    /// Ask whether a non-empty target may be cleared
    Overwrite,
    /// Abort when overwriting was declined
    OverwriteCheck,
    /// Ask for a package name when the directory name is not one
    PackageName,
    /// Ask for a framework
    Framework,
    /// Ask for a variant of the chosen framework
    Variant,
}

impl Step {
    /// Steps in the order they run
    pub const ORDER: [Self; 6] = [
        Self::TargetDir,
        Self::Overwrite,
        Self::OverwriteCheck,
        Self::PackageName,
        Self::Framework,
        Self::Variant,
    ];

    /// Whether this step runs, given the answers collected so far
    #[must_use]
    pub fn is_active(self, flow: &PromptFlow<'_>, partial: &PartialConfig<'_>) -> bool {
        match self {
            Self::TargetDir => flow.target_dir.is_none(),
            Self::Overwrite => {
                needs_overwrite_confirmation(&resolve_root(&flow.cwd, &partial.target_dir))
            }
            Self::OverwriteCheck => partial.overwrite == Some(false),
            Self::PackageName => !is_valid_package_name(&partial.target_dir),
            Self::Framework => !flow.template_is_valid(),
            Self::Variant => {
                partial.framework.is_some_and(Framework::has_variants) && partial.variant.is_none()
            }
        }
    }
}

/// Answers collected while the flow runs
#[derive(Debug, Clone)]
pub struct PartialConfig<'c> {
    /// Target directory, normalized
    pub target_dir: String,
    /// Overwrite answer, unset when the target was empty or missing
    pub overwrite: Option<bool>,
    /// Package name, unset when the directory name is already valid
    pub package_name: Option<String>,
    /// Chosen or externally resolved framework
    pub framework: Option<&'c Framework>,
    /// Chosen or externally resolved variant
    pub variant: Option<String>,
}

/// Final answers of a completed flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig<'c> {
    /// Target directory, relative to the working directory unless absolute
    pub target_dir: String,
    /// Clear the target before copying
    pub overwrite: bool,
    /// Package name typed by the user
    pub package_name: Option<String>,
    /// Chosen framework
    pub framework: Option<&'c Framework>,
    /// Chosen variant
    pub variant: Option<String>,
    template: String,
}

impl ResolvedConfig<'_> {
    /// Effective template identifier
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Value for the manifest `name` field
    #[must_use]
    pub fn manifest_name(&self) -> &str {
        self.package_name.as_deref().unwrap_or(&self.target_dir)
    }
}

/// Result of running the flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome<'c> {
    /// Every active step was answered
    Resolved(ResolvedConfig<'c>),
    /// The user declined to overwrite or interrupted a prompt
    Cancelled,
}

impl<'c> FlowOutcome<'c> {
    /// Convert cancellation into [`ScaffoldError::Cancelled`]
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Cancelled`] for a cancelled flow.
    pub fn into_result(self) -> Result<ResolvedConfig<'c>> {
        match self {
            Self::Resolved(config) => Ok(config),
            Self::Cancelled => Err(ScaffoldError::Cancelled),
        }
    }
}

enum StepResult {
    Answered,
    Cancelled,
}

/// Ordered, conditionally skipped sequence of scaffolding questions
#[derive(Debug, Clone)]
pub struct PromptFlow<'c> {
    catalog: &'c Catalog,
    cwd: PathBuf,
    default_project_name: String,
    target_dir: Option<String>,
    template: Option<String>,
}

impl<'c> PromptFlow<'c> {
    /// Create a flow resolving paths against `cwd`
    #[must_use]
    pub fn new(
        catalog: &'c Catalog,
        cwd: impl Into<PathBuf>,
        default_project_name: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            cwd: cwd.into(),
            default_project_name: default_project_name.into(),
            target_dir: None,
            template: None,
        }
    }

    /// Target directory supplied on the command line
    ///
    /// A value that normalizes to nothing (such as `/`) counts as not supplied.
    #[must_use]
    pub fn with_target_dir(mut self, target_dir: Option<&str>) -> Self {
        self.target_dir = target_dir
            .map(normalize_dir_name)
            .filter(|dir| !dir.is_empty());
        self
    }

    /// Template identifier supplied on the command line
    #[must_use]
    pub fn with_template(mut self, template: Option<&str>) -> Self {
        self.template = template.map(ToString::to_string);
        self
    }

    fn template_is_valid(&self) -> bool {
        self.template
            .as_deref()
            .is_some_and(|t| self.catalog.contains(t))
    }

    /// Answers known before any question is asked
    #[must_use]
    pub fn initial_config(&self) -> PartialConfig<'c> {
        let target_dir = self
            .target_dir
            .clone()
            .unwrap_or_else(|| self.default_project_name.clone());

        let resolution = self
            .template
            .as_deref()
            .filter(|t| self.catalog.contains(t))
            .and_then(|t| self.catalog.resolve(t));

        PartialConfig {
            target_dir,
            overwrite: None,
            package_name: None,
            framework: resolution.map(|r| r.framework),
            variant: resolution.and_then(|r| r.variant).map(|v| v.name.clone()),
        }
    }

    /// Run every active step in order
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal fails. Cancellation is reported as
    /// [`FlowOutcome::Cancelled`], not as an error.
    pub fn run(&self, prompter: &mut dyn Prompter) -> Result<FlowOutcome<'c>> {
        let mut partial = self.initial_config();

        for step in Step::ORDER {
            if !step.is_active(self, &partial) {
                debug!(?step, "step skipped");
                continue;
            }
            debug!(?step, "step active");
            if let StepResult::Cancelled = self.ask(step, prompter, &mut partial)? {
                debug!(?step, "flow cancelled");
                return Ok(FlowOutcome::Cancelled);
            }
        }

        self.finish(partial).map(FlowOutcome::Resolved)
    }

    fn ask(
        &self,
        step: Step,
        prompter: &mut dyn Prompter,
        partial: &mut PartialConfig<'c>,
    ) -> Result<StepResult> {
        match step {
            Step::TargetDir => {
                let prompt = TextPrompt::new("Project name").with_default(&self.default_project_name);
                let Some(raw) = prompter.input(prompt)? else {
                    return Ok(StepResult::Cancelled);
                };
                let normalized = normalize_dir_name(&raw);
                partial.target_dir = if normalized.is_empty() {
                    self.default_project_name.clone()
                } else {
                    normalized
                };
            }
            Step::Overwrite => {
                let message = overwrite_message(&partial.target_dir);
                let Some(answer) = prompter.confirm(&message, false)? else {
                    return Ok(StepResult::Cancelled);
                };
                partial.overwrite = Some(answer);
            }
            Step::OverwriteCheck => return Ok(StepResult::Cancelled),
            Step::PackageName => {
                let initial = to_valid_package_name(&partial.target_dir);
                let prompt = TextPrompt::new("Package name")
                    .with_initial(&initial)
                    .with_validator(validate_package_name);
                let Some(name) = prompter.input(prompt)? else {
                    return Ok(StepResult::Cancelled);
                };
                partial.package_name = Some(name);
            }
            Step::Framework => {
                let message = self.template.as_deref().map_or_else(
                    || "Select a framework".to_string(),
                    |t| format!("\"{t}\" isn't a valid template. Please choose from below"),
                );
                let (labels, frameworks): (Vec<_>, Vec<_>) =
                    self.catalog.display_choices().into_iter().unzip();
                let Some(index) = prompter.select(&message, &labels, 0)? else {
                    return Ok(StepResult::Cancelled);
                };
                let framework = frameworks
                    .get(index)
                    .copied()
                    .ok_or(ScaffoldError::NoTemplateSelected)?;
                partial.framework = Some(framework);
                partial.variant = None;
            }
            Step::Variant => {
                let variants = partial.framework.map(Framework::variants).unwrap_or_default();
                let labels: Vec<_> = variants.iter().map(crate::catalog::Variant::label).collect();
                let Some(index) = prompter.select("Select a variant", &labels, 0)? else {
                    return Ok(StepResult::Cancelled);
                };
                let variant = variants.get(index).ok_or(ScaffoldError::NoTemplateSelected)?;
                partial.variant = Some(variant.name.clone());
            }
        }
        Ok(StepResult::Answered)
    }

    fn finish(&self, partial: PartialConfig<'c>) -> Result<ResolvedConfig<'c>> {
        let template = partial
            .variant
            .clone()
            .or_else(|| {
                partial
                    .framework
                    .filter(|f| !f.has_variants())
                    .map(|f| f.name.clone())
            })
            .or_else(|| self.template.clone().filter(|t| self.catalog.contains(t)))
            .ok_or(ScaffoldError::NoTemplateSelected)?;

        Ok(ResolvedConfig {
            target_dir: partial.target_dir,
            overwrite: partial.overwrite.unwrap_or(false),
            package_name: partial.package_name,
            framework: partial.framework,
            variant: partial.variant,
            template,
        })
    }
}

fn overwrite_message(target_dir: &str) -> String {
    let subject = if target_dir == "." {
        "Current directory".to_string()
    } else {
        format!("Target directory \"{target_dir}\"")
    };
    format!("{subject} is not empty. Remove existing files and continue?")
}
