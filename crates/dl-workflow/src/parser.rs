//! Workflow sheet parsing.
//!
//! # Routed layout
//!
//! ```text
//! header
//! ControlBegin … ControlEnd        (anywhere; skipped here)
//! driver row                       Driver = TRUE
//!   pickup row …                   both FALSE, Restaurants set
//!   <blank>                        separator
//!   delivery row …                 Consumer = TRUE
//! <blank> | next driver row | end
//! ```
//!
//! [`WorkflowSheet::driver_blocks`] walks the rows with a three-state machine
//! (`Outside`, `Pickups`, `Deliveries`).  It checks structure and per-row
//! fields only; catalog membership and order reconciliation happen in
//! [`WorkflowSheet::assemble`] once the catalog and control block are known,
//! so the three parsers can run independently over the same rows.

use dl_control::{ControlBlock, ControlBlockSpan, find_control_block, parse_span};
use dl_core::{CoreError, HeaderMap, Row};
use dl_restaurants::RestaurantCatalog;
use tracing::debug;

use crate::columns::*;
use crate::reconcile::{build_restaurants, reconcile};
use crate::{
    Delivery, Driver, Pickup, RationLayout, Rations, RouteRequest, RowErrors, WorkflowError,
    WorkflowModel, WorkflowResult,
};

// ── WorkflowSheet ─────────────────────────────────────────────────────────────

/// A tokenized workflow sheet with its header and control block located.
#[derive(Debug)]
pub struct WorkflowSheet<'r> {
    header:  HeaderMap,
    /// Rows after the header.
    body:    &'r [Row],
    layout:  RationLayout,
    control: Option<ControlBlockSpan>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum RowKind {
    Blank,
    Driver,
    Delivery,
    /// Both flags FALSE: a pickup row, if it is where one is allowed.
    Other,
}

enum Section {
    Outside,
    Pickups(Driver),
    Deliveries(Driver),
}

impl<'r> WorkflowSheet<'r> {
    /// Locate the header (the first non-empty row), validate its columns and
    /// find the control block.
    pub fn new(rows: &'r [Row]) -> WorkflowResult<Self> {
        let Some(pos) = rows.iter().position(|r| !r.is_empty()) else {
            return Err(CoreError::EmptyDocument.into());
        };
        let header = HeaderMap::from_row(&rows[pos]);

        let layout = if header.contains(STD_MEALS) {
            RationLayout::V300
        } else {
            RationLayout::Legacy
        };
        let mut required: Vec<&str> = BASE_COLUMNS.to_vec();
        match layout {
            RationLayout::Legacy => required.extend(LEGACY_RATION_COLUMNS),
            RationLayout::V300 => required.extend(V300_RATION_COLUMNS),
        }
        header.require(&required)?;

        let body = &rows[pos + 1..];
        let control = find_control_block(body, &header)?;
        debug!(header = header.line, rows = body.len(), %layout, "workflow sheet");

        Ok(Self { header, body, layout, control })
    }

    pub fn header(&self) -> &HeaderMap {
        &self.header
    }

    pub fn layout(&self) -> RationLayout {
        self.layout
    }

    /// Parse the control block, if the sheet has one.
    pub fn control_block(&self) -> WorkflowResult<Option<ControlBlock>> {
        match self.control {
            Some(span) => Ok(Some(parse_span(self.body, &self.header, span)?)),
            None => Ok(None),
        }
    }

    /// Parse every driver block of a routed sheet.
    pub fn driver_blocks(&self) -> WorkflowResult<Vec<Driver>> {
        let mut drivers = Vec::new();
        let mut section = Section::Outside;

        for row in self.data_rows() {
            let kind = self.classify(row)?;
            section = match (section, kind) {
                (Section::Outside, RowKind::Blank) => Section::Outside,
                (Section::Outside, RowKind::Driver) => Section::Pickups(self.driver_row(row)?),
                (Section::Outside, RowKind::Delivery) => {
                    return Err(misplaced("delivery", "outside any driver block", row));
                }
                (Section::Outside, RowKind::Other) => {
                    return Err(misplaced("pickup", "outside any driver block", row));
                }

                (Section::Pickups(mut driver), RowKind::Other) => {
                    let pickup = self.pickup_row(row, &driver)?;
                    driver.pickups.push(pickup);
                    Section::Pickups(driver)
                }
                (Section::Pickups(driver), RowKind::Blank) => Section::Deliveries(driver),
                (Section::Pickups(driver), RowKind::Driver | RowKind::Delivery) => {
                    return Err(WorkflowError::UnclosedDriverBlock {
                        user: driver.user_name,
                        line: row.line,
                    });
                }

                (Section::Deliveries(mut driver), RowKind::Delivery) => {
                    let delivery = self.delivery_row(row, Some(&driver))?;
                    driver.deliveries.push(delivery);
                    Section::Deliveries(driver)
                }
                (Section::Deliveries(driver), RowKind::Blank) => {
                    drivers.push(driver);
                    Section::Outside
                }
                (Section::Deliveries(driver), RowKind::Driver) => {
                    drivers.push(driver);
                    Section::Pickups(self.driver_row(row)?)
                }
                (Section::Deliveries(_), RowKind::Other) => {
                    return Err(misplaced("pickup", "among the driver block's deliveries", row));
                }
            };
        }

        match section {
            Section::Outside => {}
            Section::Deliveries(driver) => drivers.push(driver),
            Section::Pickups(driver) => {
                let line = self.body.last().map_or(driver.line, |r| r.line);
                return Err(WorkflowError::UnclosedDriverBlock { user: driver.user_name, line });
            }
        }

        debug!(drivers = drivers.len(), "parsed driver blocks");
        Ok(drivers)
    }

    /// Pool the consumer and driver rows of an unrouted sheet.
    pub fn route_request_rows(&self) -> WorkflowResult<(Vec<Delivery>, Vec<Driver>)> {
        let mut deliveries = Vec::new();
        let mut drivers = Vec::new();

        for row in self.data_rows() {
            match self.classify(row)? {
                RowKind::Blank => {}
                RowKind::Driver => drivers.push(self.driver_row(row)?),
                RowKind::Delivery => deliveries.push(self.delivery_row(row, None)?),
                RowKind::Other => return Err(misplaced("pickup", "in a route request", row)),
            }
        }

        debug!(deliveries = deliveries.len(), drivers = drivers.len(), "parsed route request");
        Ok((deliveries, drivers))
    }

    // ── Assembly ──────────────────────────────────────────────────────────

    /// Combine the parsed pieces of a routed sheet into a [`WorkflowModel`].
    ///
    /// Requires the control block, checks the ration columns against its
    /// version and every pickup against `catalog`, reconciles pickup orders
    /// with delivery rows, and builds the restaurant arena.
    pub fn assemble(
        &self,
        control_block: Option<ControlBlock>,
        mut drivers: Vec<Driver>,
        catalog: &RestaurantCatalog,
    ) -> WorkflowResult<WorkflowModel> {
        let control_block = control_block.ok_or(WorkflowError::MissingControlBlock)?;
        self.check_layout(&control_block)?;

        for driver in &drivers {
            for pickup in &driver.pickups {
                if !catalog.contains(&pickup.restaurant) {
                    return Err(WorkflowError::UnknownRestaurant {
                        restaurant: pickup.restaurant.clone(),
                        driver:     driver.user_name.clone(),
                        line:       pickup.line,
                    });
                }
            }
        }

        reconcile(&drivers)?;

        for driver in &mut drivers {
            driver.has_condo = driver.deliveries.iter().any(|d| d.is_condo);
        }
        let restaurants = build_restaurants(&drivers);

        debug!(drivers = drivers.len(), restaurants = restaurants.len(), "assembled workflow");
        Ok(WorkflowModel { control_block, layout: self.layout, drivers, restaurants })
    }

    /// Combine the parsed pieces of an unrouted sheet.
    pub fn assemble_route_request(
        &self,
        control_block: Option<ControlBlock>,
        deliveries: Vec<Delivery>,
        drivers: Vec<Driver>,
    ) -> WorkflowResult<RouteRequest> {
        if let Some(block) = &control_block {
            self.check_layout(block)?;
        }
        Ok(RouteRequest { control_block, layout: self.layout, deliveries, drivers })
    }

    fn check_layout(&self, block: &ControlBlock) -> WorkflowResult<()> {
        let expected = RationLayout::for_version(block.version);
        if expected != self.layout {
            return Err(WorkflowError::RationColumns {
                version: block.version.to_string(),
                found: self.layout,
                expected,
                line: self.header.line,
            });
        }
        Ok(())
    }

    // ── Rows ──────────────────────────────────────────────────────────────

    /// Body rows outside the control block.
    fn data_rows(&self) -> impl Iterator<Item = &'r Row> {
        let control = self.control;
        self.body
            .iter()
            .enumerate()
            .filter(move |(i, _)| !control.is_some_and(|span| span.contains(*i)))
            .map(|(_, row)| row)
    }

    fn classify(&self, row: &Row) -> WorkflowResult<RowKind> {
        if row.is_empty() {
            return Ok(RowKind::Blank);
        }
        let consumer = self.header.get_bool(row, CONSUMER)?;
        let driver = self.header.get_bool(row, DRIVER)?;
        match (consumer, driver) {
            (true, true) => Err(WorkflowError::ConflictingFlags { line: row.line }),
            (false, true) => Ok(RowKind::Driver),
            (true, false) => Ok(RowKind::Delivery),
            (false, false) => Ok(RowKind::Other),
        }
    }

    fn cell<'a>(&self, row: &'a Row, column: &str) -> &'a str {
        self.header.get(row, column)
    }

    fn driver_row(&self, row: &Row) -> WorkflowResult<Driver> {
        let mut errors = RowErrors::new(row.line);
        let user_name = self.cell(row, USER_NAME);
        check_user_name(user_name, &mut errors);
        let phone = self.cell(row, PHONE);
        if phone.is_empty() {
            errors.push("missing phone");
        }
        errors.into_result()?;

        Ok(Driver {
            user_name:  user_name.to_owned(),
            name:       self.cell(row, NAME).to_owned(),
            phone:      phone.to_owned(),
            gmap_url:   self.cell(row, DETAILS).to_owned(),
            has_condo:  false,
            pickups:    Vec::new(),
            deliveries: Vec::new(),
            start_time: None,
            warnings:   Vec::new(),
            line:       row.line,
        })
    }

    fn pickup_row(&self, row: &Row, driver: &Driver) -> WorkflowResult<Pickup> {
        let mut errors = RowErrors::new(row.line);
        let restaurant = self.cell(row, RESTAURANTS);
        if restaurant.is_empty() {
            errors.push("missing restaurant name");
        } else if let Some(first) = driver.pickup(restaurant) {
            errors.push(format!(
                "duplicate pickup of restaurant \"{restaurant}\" (first at line {})",
                first.line
            ));
        }
        let orders = self.count(row, ORDERS, &mut errors);
        errors.into_result()?;

        Ok(Pickup {
            restaurant: restaurant.to_owned(),
            orders,
            address: self.cell(row, ADDRESS).to_owned(),
            details: self.cell(row, DETAILS).to_owned(),
            line: row.line,
        })
    }

    /// `driver` is the enclosing driver block; `None` in a route request,
    /// where the restaurant is optional.
    fn delivery_row(&self, row: &Row, driver: Option<&Driver>) -> WorkflowResult<Delivery> {
        let mut errors = RowErrors::new(row.line);

        let mut required = |column: &str, what: &str| {
            let value = self.cell(row, column);
            if value.is_empty() {
                errors.push(format!("missing {what}"));
            }
            value.to_owned()
        };
        let name = required(NAME, "consumer name");
        let user_name = required(USER_NAME, "user name");
        let phone = required(PHONE, "phone");
        let city = required(CITY, "city");
        let address = required(ADDRESS, "address");

        let restaurant = self.cell(row, RESTAURANTS);
        if let Some(driver) = driver {
            if restaurant.is_empty() {
                errors.push("missing restaurant");
            } else if driver.pickup(restaurant).is_none() {
                errors.push(format!(
                    "restaurant \"{restaurant}\" is not a pickup of driver {}",
                    driver.user_name
                ));
            }
        }

        let is_condo = self.header.get_bool(row, CONDO).unwrap_or_else(|_| {
            errors.push(format!("invalid {CONDO} value \"{}\"", self.cell(row, CONDO)));
            false
        });

        let rations = self.rations(row, &mut errors);
        errors.into_result()?;

        Ok(Delivery {
            name,
            user_name,
            phone,
            alt_phone: self.cell(row, ALT_PHONE).to_owned(),
            neighborhood: self.cell(row, NEIGHBORHOOD).to_owned(),
            city,
            address,
            is_condo,
            details: self.cell(row, DETAILS).to_owned(),
            restaurant: (!restaurant.is_empty()).then(|| restaurant.to_owned()),
            rations,
            line: row.line,
        })
    }

    fn rations(&self, row: &Row, errors: &mut RowErrors) -> Rations {
        match self.layout {
            RationLayout::Legacy => Rations::Legacy {
                normal: self.count(row, NORMAL, errors),
                veggie: self.count(row, VEGGIE, errors),
            },
            RationLayout::V300 => {
                let alt_meals = self.count(row, ALT_MEALS, errors);
                let type_meal = self.cell(row, TYPE_MEAL);
                if alt_meals > 0 && type_meal.is_empty() {
                    errors.push(format!("missing {TYPE_MEAL} for {alt_meals} {ALT_MEALS}"));
                }
                let alt_grocery = self.count(row, ALT_GROCERY, errors);
                let type_grocery = self.cell(row, TYPE_GROCERY);
                if alt_grocery > 0 && type_grocery.is_empty() {
                    errors.push(format!("missing {TYPE_GROCERY} for {alt_grocery} {ALT_GROCERY}"));
                }
                Rations::V300 {
                    std_meals: self.count(row, STD_MEALS, errors),
                    alt_meals,
                    type_meal: type_meal.to_owned(),
                    std_grocery: self.count(row, STD_GROCERY, errors),
                    alt_grocery,
                    type_grocery: type_grocery.to_owned(),
                }
            }
        }
    }

    /// A count cell.  Blank is zero.
    fn count(&self, row: &Row, column: &str, errors: &mut RowErrors) -> u32 {
        let value = self.cell(row, column);
        if value.is_empty() {
            return 0;
        }
        value.parse().unwrap_or_else(|_| {
            errors.push(format!("invalid {column} \"{value}\""));
            0
        })
    }
}

fn check_user_name(user_name: &str, errors: &mut RowErrors) {
    if user_name.is_empty() {
        errors.push("missing user name");
    } else if user_name.starts_with('@') {
        errors.push(format!("user name \"{user_name}\" cannot start with @"));
    } else if user_name.chars().any(char::is_whitespace) {
        errors.push(format!("user name \"{user_name}\" cannot contain spaces"));
    }
}

fn misplaced(kind: &'static str, context: &'static str, row: &Row) -> WorkflowError {
    WorkflowError::MisplacedRow { kind, context, line: row.line }
}
