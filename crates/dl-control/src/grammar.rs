//! Version-specific directive grammars.
//!
//! Each grammar handles the keys its version introduced and delegates
//! everything else to the grammar of the previous version:
//!
//! ```text
//! V300Grammar ──► V200Grammar ──► LegacyGrammar ──► Applied::Unknown
//! ```
//!
//! The grammar is chosen once per block from its `Version` directive (see
//! [`grammar_for`]).

use dl_core::ClockTime;

use crate::block::{
    AuditToggle, BackupDriver, ControlBlock, FoodSources, OpsManager, OptionList, PickupManager,
    RestaurantEmoji, SplitRestaurant, StartTimes,
};
use crate::directive::{self, FieldRules, RawDirective, short_name};
use crate::{ControlBlockError, ControlBlockVersion, ControlResult};

/// Outcome of offering a directive to a grammar.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Applied {
    Handled,
    /// The key is not part of this grammar; the caller records a warning.
    Unknown,
}

/// One version's directive grammar.
pub trait DirectiveGrammar: Send + Sync {
    fn version(&self) -> ControlBlockVersion;

    /// Validate `directive` and fold it into `block`.
    fn apply(&self, block: &mut ControlBlock, directive: &RawDirective<'_>) -> ControlResult<Applied>;
}

/// The grammar for `version`.  Unsupported versions are read with the
/// newest grammar so their syntax is still checked.
pub fn grammar_for(version: ControlBlockVersion) -> &'static dyn DirectiveGrammar {
    match version {
        ControlBlockVersion::Legacy => &LegacyGrammar,
        ControlBlockVersion::V200 => &V200Grammar,
        ControlBlockVersion::V300 | ControlBlockVersion::Unsupported(_) => &V300Grammar,
    }
}

// ── Legacy ────────────────────────────────────────────────────────────────────

pub struct LegacyGrammar;

impl DirectiveGrammar for LegacyGrammar {
    fn version(&self) -> ControlBlockVersion {
        ControlBlockVersion::Legacy
    }

    fn apply(&self, block: &mut ControlBlock, d: &RawDirective<'_>) -> ControlResult<Applied> {
        match d.key {
            directive::OPS_MANAGER => ops_manager(block, d)?,
            directive::SPLIT_RESTAURANT => split_restaurant(block, d)?,
            directive::BACKUP_DRIVER => backup_driver(block, d)?,
            _ => return Ok(Applied::Unknown),
        }
        Ok(Applied::Handled)
    }
}

fn ops_manager(block: &mut ControlBlock, d: &RawDirective<'_>) -> ControlResult<()> {
    let mut rules = FieldRules::new(short_name(directive::OPS_MANAGER), d.line, &mut block.placeholders);
    let fields = rules.split_exact(d.value, 2, "username | phone")?;
    let user_name = rules.user_name(fields[0])?;
    let phone = rules.required(fields[1], "phone number")?;

    if let Some(first) = block.ops_managers.first() {
        return Err(ControlBlockError::TooManyOpsManagers { line: d.line, first_line: first.line });
    }
    block.ops_managers.push(OpsManager { user_name, phone, line: d.line });
    Ok(())
}

fn split_restaurant(block: &mut ControlBlock, d: &RawDirective<'_>) -> ControlResult<()> {
    let mut rules = FieldRules::new(short_name(directive::SPLIT_RESTAURANT), d.line, &mut block.placeholders);
    let fields = rules.split_exact(d.value, 2, "restaurant name | cleanup driver user name")?;
    let name = rules.required(fields[0], "restaurant name")?;
    let cleanup_driver = rules.user_name(fields[1])?;

    block.split_restaurants.push(SplitRestaurant { name, cleanup_driver, line: d.line });
    Ok(())
}

fn backup_driver(block: &mut ControlBlock, d: &RawDirective<'_>) -> ControlResult<()> {
    let mut rules = FieldRules::new(directive::BACKUP_DRIVER, d.line, &mut block.placeholders);
    let fields = rules.split_exact(d.value, 1, "username")?;
    let user_name = rules.user_name(fields[0])?;

    block.backup_drivers.push(BackupDriver { user_name, line: d.line });
    Ok(())
}

// ── V200 ──────────────────────────────────────────────────────────────────────

pub struct V200Grammar;

impl DirectiveGrammar for V200Grammar {
    fn version(&self) -> ControlBlockVersion {
        ControlBlockVersion::V200
    }

    fn apply(&self, block: &mut ControlBlock, d: &RawDirective<'_>) -> ControlResult<Applied> {
        match d.key {
            directive::RESTAURANT_EMOJI => restaurant_emoji(block, d)?,
            directive::LATE_ARRIVAL_AUDIT => {
                block.late_arrival_audit = toggle(directive::LATE_ARRIVAL_AUDIT, d)?;
            }
            directive::SPLIT_RESTAURANT_AUDITS => {
                block.split_restaurant_audits = toggle(directive::SPLIT_RESTAURANT_AUDITS, d)?;
            }
            directive::RESTAURANTS_AUDIT => {
                block.restaurants_audit = toggle(directive::RESTAURANTS_AUDIT, d)?;
            }
            _ => return LegacyGrammar.apply(block, d),
        }
        Ok(Applied::Handled)
    }
}

fn restaurant_emoji(block: &mut ControlBlock, d: &RawDirective<'_>) -> ControlResult<()> {
    let mut rules = FieldRules::new(short_name(directive::RESTAURANT_EMOJI), d.line, &mut block.placeholders);
    let fields = rules.split_exact(d.value, 2, "restaurant name | emoji")?;
    let name = rules.required(fields[0], "restaurant name")?;
    let emoji = rules.required(fields[1], "emoji")?;

    block.restaurant_emoji.insert(name, RestaurantEmoji { emoji, line: d.line });
    Ok(())
}

fn toggle(key: &'static str, d: &RawDirective<'_>) -> ControlResult<AuditToggle> {
    if d.value.eq_ignore_ascii_case("enable") {
        Ok(AuditToggle::Enabled)
    } else if d.value.eq_ignore_ascii_case("disable") {
        Ok(AuditToggle::Disabled)
    } else {
        Err(ControlBlockError::InvalidSetting {
            directive: key,
            value:     d.value.to_owned(),
            line:      d.line,
        })
    }
}

// ── V300 ──────────────────────────────────────────────────────────────────────

pub struct V300Grammar;

impl DirectiveGrammar for V300Grammar {
    fn version(&self) -> ControlBlockVersion {
        ControlBlockVersion::V300
    }

    fn apply(&self, block: &mut ControlBlock, d: &RawDirective<'_>) -> ControlResult<Applied> {
        match d.key {
            directive::FOOD_SOURCES => food_sources(block, d)?,
            directive::START_TIMES => start_times(block, d)?,
            directive::ALT_MEAL_OPTIONS => {
                let list = option_list(block, directive::ALT_MEAL_OPTIONS, "alt meal option", d)?;
                block.v300_mut().alt_meal_options.push(list);
            }
            directive::ALT_GROCERY_OPTIONS => {
                let list = option_list(block, directive::ALT_GROCERY_OPTIONS, "alt grocery option", d)?;
                block.v300_mut().alt_grocery_options.push(list);
            }
            directive::PICKUP_MANAGER => pickup_manager(block, d)?,
            _ => return V200Grammar.apply(block, d),
        }
        Ok(Applied::Handled)
    }
}

fn food_sources(block: &mut ControlBlock, d: &RawDirective<'_>) -> ControlResult<()> {
    let mut rules = FieldRules::new(short_name(directive::FOOD_SOURCES), d.line, &mut block.placeholders);
    let fields = rules.split_exact(d.value, 2, "meal source | grocery source")?;
    let meal = rules.required(fields[0], "meal source")?;
    let grocery = rules.required(fields[1], "grocery source")?;

    block.v300_mut().food_sources.push(FoodSources { meal, grocery, line: d.line });
    Ok(())
}

fn start_times(block: &mut ControlBlock, d: &RawDirective<'_>) -> ControlResult<()> {
    let mut rules = FieldRules::new(directive::START_TIMES, d.line, &mut block.placeholders);
    let mut times = Vec::new();
    for field in rules.split_list(d.value, "start time")? {
        if rules.placeholder(field, "start time") {
            continue;
        }
        let time: ClockTime = field.parse().map_err(|_| ControlBlockError::InvalidStartTime {
            value: field.to_owned(),
            line:  d.line,
        })?;
        times.push(time);
    }

    block.v300_mut().start_times.push(StartTimes { times, line: d.line });
    Ok(())
}

fn option_list(
    block: &mut ControlBlock,
    key: &'static str,
    field: &'static str,
    d: &RawDirective<'_>,
) -> ControlResult<OptionList> {
    let mut rules = FieldRules::new(key, d.line, &mut block.placeholders);
    let mut options = Vec::new();
    for value in rules.split_list(d.value, field)? {
        options.push(rules.required(value, field)?);
    }
    Ok(OptionList { options, line: d.line })
}

fn pickup_manager(block: &mut ControlBlock, d: &RawDirective<'_>) -> ControlResult<()> {
    let mut rules = FieldRules::new(directive::PICKUP_MANAGER, d.line, &mut block.placeholders);
    let fields = rules.split_exact(d.value, 1, "username")?;
    let user_name = rules.user_name(fields[0])?;

    block.v300_mut().pickup_managers.push(PickupManager { user_name, line: d.line });
    Ok(())
}
