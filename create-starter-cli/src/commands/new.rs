//! Project scaffolding command

use anyhow::{Context, Result};
use console::{style, Color, Emoji};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::config::ScaffoldConfig;
use crate::invoker::{next_steps, EnvInvokerSource, InvokerSource};
use crate::materialize::{resolve_root, Materializer};
use crate::prompt::{FlowOutcome, PromptFlow, Prompter, ResolvedConfig, TerminalPrompter};
use crate::templates::TemplateStore;

static CROSS: Emoji<'_, '_> = Emoji("✖ ", "x ");
static CHECK: Emoji<'_, '_> = Emoji("✔ ", "");

/// Everything a scaffolding run reads besides user input
#[derive(Debug, Clone, Copy)]
pub struct ScaffoldContext<'a> {
    /// Frameworks offered to the user
    pub catalog: &'a Catalog,
    /// Where template packages are looked up
    pub store: &'a TemplateStore,
    /// Loaded configuration
    pub config: &'a ScaffoldConfig,
    /// Directory the target is resolved against
    pub cwd: &'a Path,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewOutcome {
    /// The project was written to `root`
    Created {
        /// Absolute project directory
        root: PathBuf,
        /// Template identifier that was materialized
        template: String,
        /// Commands printed for the user
        next_steps: Vec<String>,
    },
    /// The user cancelled; nothing was written
    Cancelled,
}

/// Create a new starter project
#[derive(Debug, Clone, Default)]
pub struct NewCommand {
    target_dir: Option<String>,
    template: Option<String>,
}

impl NewCommand {
    /// Create a new command instance
    ///
    /// # Arguments
    ///
    /// * `target_dir` - Target directory from the command line, prompted when `None`
    /// * `template` - Template identifier from `--template`
    #[must_use]
    pub const fn new(target_dir: Option<String>, template: Option<String>) -> Self {
        Self {
            target_dir,
            template,
        }
    }

    /// Execute the command against the real terminal and environment
    ///
    /// # Errors
    ///
    /// Returns an error if prompting, template lookup or any file operation fails.
    pub fn execute(&self, config: &ScaffoldConfig) -> Result<NewOutcome> {
        let catalog = Catalog::default();
        let store = TemplateStore::new(config.templates_dir.clone());
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let ctx = ScaffoldContext {
            catalog: &catalog,
            store: &store,
            config,
            cwd: &cwd,
        };
        self.run(&ctx, &mut TerminalPrompter::new(), &EnvInvokerSource)
    }

    /// Run the prompt flow, then materialize the chosen template
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The terminal fails while prompting
    /// - The chosen template package cannot be found
    /// - Clearing, copying or writing files fails
    pub fn run(
        &self,
        ctx: &ScaffoldContext<'_>,
        prompter: &mut dyn Prompter,
        invoker: &dyn InvokerSource,
    ) -> Result<NewOutcome> {
        let flow = PromptFlow::new(ctx.catalog, ctx.cwd, ctx.config.default_project_name.as_str())
            .with_target_dir(self.target_dir.as_deref())
            .with_template(self.template.as_deref());

        let resolved = match flow.run(prompter)? {
            FlowOutcome::Resolved(resolved) => resolved,
            FlowOutcome::Cancelled => {
                println!("{}", style(format!("{CROSS}Operation cancelled")).red());
                return Ok(NewOutcome::Cancelled);
            }
        };

        let root = resolve_root(ctx.cwd, &resolved.target_dir);
        debug!(roots = ?ctx.store.roots(), "looking up template package");
        let template_dir = ctx
            .store
            .locate(resolved.template())
            .context("Template catalog and shipped template packages disagree")?;

        println!();
        println!(
            "{} {}...",
            style("Scaffolding project in").bold(),
            style(root.display()).cyan()
        );
        info!(template = resolved.template(), root = %root.display(), "scaffolding");

        Self::materialize(&template_dir, &root, &resolved, ctx)?;

        let steps = next_steps(&root, ctx.cwd, invoker.detect().as_ref());
        Self::print_success(&steps);

        Ok(NewOutcome::Created {
            root,
            template: resolved.template().to_string(),
            next_steps: steps,
        })
    }

    /// Copy the template package with a spinner
    fn materialize(
        template_dir: &Path,
        root: &Path,
        resolved: &ResolvedConfig<'_>,
        ctx: &ScaffoldContext<'_>,
    ) -> Result<()> {
        let template = resolved.template();
        let color = ctx
            .catalog
            .find_framework(template)
            .map_or(Color::White, |f| f.color);

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("Failed to set progress style")?,
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner.set_message(format!("Copying {} template...", style(template).fg(color)));

        let result = Materializer::new(template_dir, &ctx.config.manifest_file).materialize(
            root,
            resolved.overwrite,
            resolved.manifest_name(),
        );
        spinner.finish_and_clear();

        result.with_context(|| format!("Failed to scaffold project in {}", root.display()))?;
        Ok(())
    }

    /// Print success message with next steps
    fn print_success(steps: &[String]) {
        println!();
        println!("{}", style(format!("{CHECK}Done. Now run:")).green().bold());
        println!();
        for step in steps {
            println!("  {}", style(step).cyan());
        }
        println!();
    }
}
