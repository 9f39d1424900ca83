use dl_core::MemberRoster;
use dl_workflow::WorkflowModel;
use tracing::{debug, info};

use crate::rules::{
    AuditInput, AuditRule, ControlBlockAudit, DriverRosterAudit, LateArrivalAudit, MealOptionsAudit,
    SplitRestaurantAudit,
};
use crate::{AuditReport, AuditResult};

/// Runs audit rules in order; the first failing rule stops the audit.
///
/// ```ignore
/// let report = Auditor::standard().audit(&model, &roster)?;
/// for warning in &report.warnings {
///     eprintln!("warning: {warning}");
/// }
/// ```
pub struct Auditor {
    rules: Vec<Box<dyn AuditRule>>,
}

impl Auditor {
    /// No rules.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Control block, driver roster, split restaurants, meal options and
    /// late arrivals, in that order.
    pub fn standard() -> Self {
        Self::empty()
            .with_rule(ControlBlockAudit)
            .with_rule(DriverRosterAudit)
            .with_rule(SplitRestaurantAudit)
            .with_rule(MealOptionsAudit)
            .with_rule(LateArrivalAudit)
    }

    pub fn with_rule(mut self, rule: impl AuditRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name())
    }

    /// Audit a scheduled run.  Pure: the same run and roster always give the
    /// same report.
    pub fn audit(&self, model: &WorkflowModel, roster: &MemberRoster) -> AuditResult<AuditReport> {
        let input = AuditInput { model, roster };
        let mut report = AuditReport::default();
        for rule in &self.rules {
            rule.check(&input, &mut report)?;
            debug!(rule = rule.name(), warnings = report.warnings.len(), "audit rule passed");
        }
        info!(warnings = report.warnings.len(), "audit complete");
        Ok(report)
    }
}

impl Default for Auditor {
    fn default() -> Self {
        Self::standard()
    }
}

/// [`Auditor::standard`] in one call.
pub fn audit_run(model: &WorkflowModel, roster: &MemberRoster) -> AuditResult<AuditReport> {
    Auditor::standard().audit(model, roster)
}
