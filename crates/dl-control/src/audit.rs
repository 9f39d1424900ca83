//! Whole-block audit against the member roster and the run.
//!
//! Parsing only checks syntax.  [`ControlBlock::audit`] checks meaning: the
//! version is supported, no placeholder is left, required variables are
//! present, and every named user exists and has the right role for this
//! run.  The rules run in a fixed order and the first fatal one wins.

use std::collections::{BTreeMap, BTreeSet};

use dl_core::MemberRoster;
use tracing::warn;

use crate::directive::{self, short_name};
use crate::{ControlBlock, ControlBlockError, ControlResult};

/// What the audit needs to know about the run.
#[derive(Copy, Clone, Debug)]
pub struct AuditContext<'a> {
    pub roster:             &'a MemberRoster,
    /// Every restaurant visited this run → user names of its drivers.
    pub restaurant_drivers: &'a BTreeMap<String, BTreeSet<String>>,
    pub driver_count:       usize,
}

impl ControlBlock {
    /// Audit the block.  Returns the audit warnings; parse warnings stay in
    /// [`ControlBlock::warnings`].
    ///
    /// Pure: calling it twice with the same context gives the same result.
    pub fn audit(&self, ctx: &AuditContext<'_>) -> ControlResult<Vec<String>> {
        let mut warnings = Vec::new();

        if !self.version.is_supported() {
            return Err(ControlBlockError::UnsupportedVersion { version: self.version.number() });
        }

        if let Some(p) = self.placeholders.first() {
            return Err(ControlBlockError::Placeholder {
                directive:   p.directive.clone(),
                placeholder: p.placeholder.clone(),
                expected:    p.expected.clone(),
                line:        p.line,
            });
        }

        let Some(ops) = self.ops_manager() else {
            return Err(ControlBlockError::NoOpsManager);
        };

        self.audit_v300_variables()?;

        // OpsManager
        let Some(member) = ctx.roster.get(&ops.user_name) else {
            return Err(ControlBlockError::UnknownUser {
                directive: short_name(directive::OPS_MANAGER),
                user:      ops.user_name.clone(),
                line:      ops.line,
            });
        };
        if digits(&member.phone) != digits(&ops.phone) {
            warnings.push(format!(
                "OpsManager phone \"{}\" at line {} does not match member {} phone \"{}\"",
                ops.phone, ops.line, ops.user_name, member.phone
            ));
        }

        // Backup drivers
        if self.backup_drivers.is_empty() {
            warnings.push(format!("No {} specified", directive::BACKUP_DRIVER));
        }
        for backup in &self.backup_drivers {
            if !ctx.roster.contains(&backup.user_name) {
                return Err(ControlBlockError::UnknownUser {
                    directive: directive::BACKUP_DRIVER,
                    user:      backup.user_name.clone(),
                    line:      backup.line,
                });
            }
            if !ctx.roster.is_driver(&backup.user_name) {
                warnings.push(format!(
                    "{} {} at line {} is not a driver",
                    directive::BACKUP_DRIVER,
                    backup.user_name,
                    backup.line
                ));
            }
        }

        if let Some(v300) = &self.v300 {
            for manager in &v300.pickup_managers {
                if !ctx.roster.contains(&manager.user_name) {
                    return Err(ControlBlockError::UnknownUser {
                        directive: directive::PICKUP_MANAGER,
                        user:      manager.user_name.clone(),
                        line:      manager.line,
                    });
                }
            }
        }

        if self.is_split_restaurant_audit_enabled() {
            for split in &self.split_restaurants {
                let Some(drivers) = ctx.restaurant_drivers.get(&split.name) else {
                    return Err(ControlBlockError::UnknownSplitRestaurant {
                        restaurant: split.name.clone(),
                        line:       split.line,
                    });
                };
                if !ctx.roster.contains(&split.cleanup_driver) {
                    return Err(ControlBlockError::UnknownCleanupDriver {
                        user:       split.cleanup_driver.clone(),
                        restaurant: split.name.clone(),
                        line:       split.line,
                    });
                }
                if !drivers.contains(&split.cleanup_driver) {
                    return Err(ControlBlockError::WrongCleanupDriver {
                        user:       split.cleanup_driver.clone(),
                        restaurant: split.name.clone(),
                        line:       split.line,
                    });
                }
            }
        }

        if self.version.has_audit_directives() && self.is_restaurants_audit_enabled() {
            for restaurant in ctx.restaurant_drivers.keys() {
                if self.emoji_for(restaurant).is_none() {
                    warnings.push(format!(
                        "No {} entry for restaurant \"{}\"",
                        directive::RESTAURANT_EMOJI,
                        restaurant
                    ));
                }
            }
        }

        let start_times = self.start_times().len();
        if self.v300.is_some() && start_times > ctx.driver_count {
            warnings.push(format!(
                "{} lists {} start times for {} drivers",
                directive::START_TIMES,
                start_times,
                ctx.driver_count
            ));
        }

        for w in &warnings {
            warn!("{w}");
        }
        Ok(warnings)
    }

    fn audit_v300_variables(&self) -> ControlResult<()> {
        let Some(v300) = &self.v300 else {
            return Ok(());
        };
        let version = self.version.to_string();

        let exactly_once = [
            (short_name(directive::FOOD_SOURCES), v300.food_sources.len()),
            (directive::START_TIMES, v300.start_times.len()),
            (directive::ALT_MEAL_OPTIONS, v300.alt_meal_options.len()),
            (directive::ALT_GROCERY_OPTIONS, v300.alt_grocery_options.len()),
        ];
        for (variable, count) in exactly_once {
            match count {
                0 => return Err(ControlBlockError::MissingVariable { variable, version }),
                1 => {}
                _ => return Err(ControlBlockError::TooManyVariables { variable, count }),
            }
        }

        if v300.pickup_managers.is_empty() {
            return Err(ControlBlockError::MissingVariable {
                variable: directive::PICKUP_MANAGER,
                version,
            });
        }
        Ok(())
    }
}

/// Phone numbers are compared on their digits only.
fn digits(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}
