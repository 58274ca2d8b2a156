//! Tag reconciliation workflow
//!
//! Both commands run in two strictly separated phases. The preview phase
//! reads the tags, computes a [Plan] and reports it; it never mutates. The
//! mutating phase runs only when not in dry-run mode and either `force` is
//! set or the confirmation gate answers yes.
//!
//! ```text
//! Idle -> PlanComputed -> Confirmed -> Applied
//!                      \-> Cancelled
//! ```

use crate::config::Config;
use crate::domain::{current_of_with_prefix, next, BumpStrategy, Plan};
use crate::error::{Result, SemtagError};
use crate::git::TagRepository;
use crate::ui::{Confirm, Logger};

/// Per-invocation flags shared by `apply` and `purge`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkflowOptions {
    /// Report the plan and stop
    pub dry_run: bool,

    /// Skip the confirmation prompt
    pub force: bool,
}

/// Settings fixed for the lifetime of a workflow
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowSettings {
    /// Prefix for created tags, also stripped when parsing existing ones
    pub tag_prefix: String,

    pub strategy: BumpStrategy,

    /// Where the repository lives, for display only
    pub location: String,
}

impl WorkflowSettings {
    pub fn from_config(config: &Config, location: impl Into<String>) -> Self {
        WorkflowSettings {
            tag_prefix: config.tags.prefix.clone(),
            strategy: config.bump.strategy,
            location: location.into(),
        }
    }
}

/// How a workflow run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Purge found no tags; no plan was computed
    NothingToDo,
    /// Plan reported, nothing mutated
    DryRun(Plan),
    /// Confirmation declined, nothing mutated
    Cancelled(Plan),
    /// Plan carried out
    Applied(Plan),
}

impl Outcome {
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            Outcome::NothingToDo => None,
            Outcome::DryRun(plan) | Outcome::Cancelled(plan) | Outcome::Applied(plan) => {
                Some(plan)
            }
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }
}

/// Reconciles repository tags with the computed next state
pub struct Workflow<'a, R: ?Sized, L: ?Sized, C: ?Sized> {
    repo: &'a R,
    logger: &'a L,
    confirm: &'a C,
    settings: WorkflowSettings,
}

impl<'a, R, L, C> Workflow<'a, R, L, C>
where
    R: TagRepository + ?Sized,
    L: Logger + ?Sized,
    C: Confirm + ?Sized,
{
    pub fn new(repo: &'a R, logger: &'a L, confirm: &'a C, settings: WorkflowSettings) -> Self {
        Workflow {
            repo,
            logger,
            confirm,
            settings,
        }
    }

    /// Propose the next version tag and create it.
    ///
    /// A failure to list tags aborts before anything is reported.
    pub fn apply(&self, options: WorkflowOptions) -> Result<Outcome> {
        let tags = self.repo.list_tags()?;
        let plan = self.plan_apply(&tags);

        self.announce(options);
        self.logger.log("🥾 Bumping version...");
        self.logger.info(&plan.summary());

        self.execute(plan, options)
    }

    /// Delete every tag in the repository.
    ///
    /// With no tags at all this reports so and stops without a plan.
    pub fn purge(&self, options: WorkflowOptions) -> Result<Outcome> {
        let tags = self.repo.list_tags()?;

        self.announce(options);

        if tags.is_empty() {
            self.logger.warn("No tags available to purge");
            return Ok(Outcome::NothingToDo);
        }

        let plan = Plan::Purge { tags };
        tracing::debug!(%plan, "computed purge plan");

        self.logger.log("🥾 Deleting tags...");
        self.logger.info(&plan.summary());

        self.execute(plan, options)
    }

    fn plan_apply(&self, tags: &[String]) -> Plan {
        let current = current_of_with_prefix(tags, &self.settings.tag_prefix);
        let proposed = next(current.as_ref(), self.settings.strategy);
        let label = format!("{}{}", self.settings.tag_prefix, proposed);

        let plan = Plan::Apply {
            from: current,
            to: proposed,
            label,
        };
        tracing::debug!(tags = tags.len(), strategy = %self.settings.strategy, %plan, "computed apply plan");
        plan
    }

    fn announce(&self, options: WorkflowOptions) {
        if options.dry_run {
            self.logger.warn("Dry-run enabled...");
        }
        self.logger.log("✅ Versioning this directory...");
        self.logger.info(&self.settings.location);
    }

    fn execute(&self, plan: Plan, options: WorkflowOptions) -> Result<Outcome> {
        if options.dry_run {
            return Ok(Outcome::DryRun(plan));
        }

        if !options.force && !self.confirm.confirm(&plan.confirmation_prompt())? {
            self.logger.warn("Operation cancelled by user.");
            return Ok(Outcome::Cancelled(plan));
        }

        match &plan {
            Plan::Apply { label, .. } => {
                self.repo.create_tag(label)?;
                self.logger.info(&format!("Created tag {}", label));
            }
            Plan::Purge { tags } => self.delete_all(tags)?,
        }

        Ok(Outcome::Applied(plan))
    }

    fn delete_all(&self, tags: &[String]) -> Result<()> {
        match self.repo.delete_tags(tags) {
            Ok(()) => {
                self.logger.info(&format!("Deleted {} tag(s)", tags.len()));
                Ok(())
            }
            Err(SemtagError::PurgeFailure { failed, reasons }) => {
                let deleted = tags.len() - failed.len();
                if deleted > 0 {
                    self.logger
                        .info(&format!("Deleted {} of {} tag(s)", deleted, tags.len()));
                }
                for (label, reason) in failed.iter().zip(&reasons) {
                    self.logger.debug(&format!("{}: {}", label, reason));
                }
                Err(SemtagError::PurgeFailure { failed, reasons })
            }
            Err(e) => Err(e),
        }
    }
}
