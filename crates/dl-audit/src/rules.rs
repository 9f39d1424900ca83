//! The individual audits.
//!
//! Each rule reads the realized run and either fails or appends warnings to
//! the report.  Rules never mutate the run.

use dl_control::AuditContext;
use dl_control::directive::{ALT_GROCERY_OPTIONS, ALT_MEAL_OPTIONS};
use dl_core::MemberRoster;
use dl_workflow::columns::{TYPE_GROCERY, TYPE_MEAL};
use dl_workflow::{Rations, WorkflowModel};

use crate::{AuditError, AuditReport, AuditResult};

/// Everything an audit may look at.
#[derive(Copy, Clone, Debug)]
pub struct AuditInput<'a> {
    pub model:  &'a WorkflowModel,
    pub roster: &'a MemberRoster,
}

/// One audit over a realized run.
pub trait AuditRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn check(&self, input: &AuditInput<'_>, report: &mut AuditReport) -> AuditResult<()>;
}

// ── Control block ─────────────────────────────────────────────────────────────

/// [`ControlBlock::audit`](dl_control::ControlBlock::audit) against the
/// run's drivers and restaurants.  Parse warnings are reported first.
pub struct ControlBlockAudit;

impl AuditRule for ControlBlockAudit {
    fn name(&self) -> &'static str {
        "control block"
    }

    fn check(&self, input: &AuditInput<'_>, report: &mut AuditReport) -> AuditResult<()> {
        let block = &input.model.control_block;
        let restaurant_drivers = input.model.restaurant_drivers();
        let ctx = AuditContext {
            roster:             input.roster,
            restaurant_drivers: &restaurant_drivers,
            driver_count:       input.model.drivers.len(),
        };
        let audit_warnings = block.audit(&ctx)?;

        report.extend(block.warnings.iter().cloned());
        report.extend(audit_warnings);
        Ok(())
    }
}

// ── Drivers ───────────────────────────────────────────────────────────────────

/// Every driver must be a member; a member outside the drivers group is a
/// warning.
pub struct DriverRosterAudit;

impl AuditRule for DriverRosterAudit {
    fn name(&self) -> &'static str {
        "driver roster"
    }

    fn check(&self, input: &AuditInput<'_>, report: &mut AuditReport) -> AuditResult<()> {
        for driver in &input.model.drivers {
            if !input.roster.contains(&driver.user_name) {
                return Err(AuditError::UnknownDriver {
                    user: driver.user_name.clone(),
                    line: driver.line,
                });
            }
            if !input.roster.is_driver(&driver.user_name) {
                report.push(format!(
                    "line {}: {} is not in the drivers group",
                    driver.line, driver.user_name
                ));
            }
        }
        Ok(())
    }
}

// ── Split restaurants ─────────────────────────────────────────────────────────

/// A restaurant with more than one driver needs a `SplitRestaurant` entry;
/// an entry for a single-driver restaurant is a warning.
pub struct SplitRestaurantAudit;

impl AuditRule for SplitRestaurantAudit {
    fn name(&self) -> &'static str {
        "split restaurants"
    }

    fn check(&self, input: &AuditInput<'_>, report: &mut AuditReport) -> AuditResult<()> {
        let block = &input.model.control_block;
        if !block.is_split_restaurant_audit_enabled() {
            return Ok(());
        }

        for restaurant in input.model.restaurants.values() {
            let entry = block.split_restaurant(&restaurant.name);
            match (restaurant.is_split(), entry) {
                (true, None) => {
                    return Err(AuditError::MissingSplitRestaurant { restaurant: restaurant.name.clone() });
                }
                (false, Some(entry)) => report.push(format!(
                    "SplitRestaurant \"{}\" at line {} has only one driver",
                    entry.name, entry.line
                )),
                _ => {}
            }
        }
        Ok(())
    }
}

// ── Meal options ──────────────────────────────────────────────────────────────

/// 3-0-0 deliveries: `type meal` / `type grocery` must be one of the control
/// block's `AltMealOptions` / `AltGroceryOptions`.
pub struct MealOptionsAudit;

impl AuditRule for MealOptionsAudit {
    fn name(&self) -> &'static str {
        "meal options"
    }

    fn check(&self, input: &AuditInput<'_>, _report: &mut AuditReport) -> AuditResult<()> {
        let block = &input.model.control_block;
        if block.v300.is_none() {
            return Ok(());
        }

        for delivery in input.model.drivers.iter().flat_map(|d| &d.deliveries) {
            let Rations::V300 { type_meal, type_grocery, .. } = &delivery.rations else {
                continue;
            };
            check_option(type_meal, block.alt_meal_options(), TYPE_MEAL, ALT_MEAL_OPTIONS, delivery.line)?;
            check_option(
                type_grocery,
                block.alt_grocery_options(),
                TYPE_GROCERY,
                ALT_GROCERY_OPTIONS,
                delivery.line,
            )?;
        }
        Ok(())
    }
}

fn check_option(
    value: &str,
    options: &[String],
    column: &'static str,
    directive: &'static str,
    line: usize,
) -> AuditResult<()> {
    if value.is_empty() || options.iter().any(|o| o == value) {
        return Ok(());
    }
    Err(AuditError::UnknownOption {
        column,
        directive,
        value: value.to_owned(),
        options: options.join(", "),
        line,
    })
}

// ── Late arrivals ─────────────────────────────────────────────────────────────

/// Surfaces every driver's scheduling warnings, unless `LateArrivalAudit`
/// is disabled.
pub struct LateArrivalAudit;

impl AuditRule for LateArrivalAudit {
    fn name(&self) -> &'static str {
        "late arrivals"
    }

    fn check(&self, input: &AuditInput<'_>, report: &mut AuditReport) -> AuditResult<()> {
        if !input.model.control_block.is_late_arrival_audit_enabled() {
            return Ok(());
        }
        for driver in &input.model.drivers {
            report.extend(driver.warnings.iter().map(|w| format!("{}: {w}", driver.user_name)));
        }
        Ok(())
    }
}
