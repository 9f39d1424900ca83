//! Fluent builder that runs the whole pipeline for one document pair.

use dl_audit::Auditor;
use dl_core::{MemberRoster, parse_rows};
use dl_restaurants::{RestaurantCatalog, parse_catalog_rows};
use dl_schedule::{ScheduleConfig, ScheduleEngine, Stop};
use dl_workflow::{Driver, RequestMode, WorkflowModel, WorkflowSheet};
use tracing::{debug, info};

use crate::{DeliveryRun, RunConfig, RunError, RunOutput, RunResult};

/// Fluent builder for a [`RunOutput`].
///
/// # Required inputs
///
/// - the restaurant template CSV
/// - the workflow CSV
/// - the [`MemberRoster`] the audits check user names against
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                               |
/// |-----------------|---------------------------------------|
/// | `.mode(m)`      | `RequestMode::MessageRequest`         |
/// | `.schedule(c)`  | `ScheduleConfig::default()`           |
/// | `.config(c)`    | `RunConfig::default()`                |
/// | `.auditor(a)`   | `Auditor::standard()`                 |
///
/// # Example
///
/// ```rust,ignore
/// let output = RunBuilder::new(template_csv, workflow_csv, &roster)
///     .mode(RequestMode::MessageRequest)
///     .build()?;
/// for driver in &output.delivery().unwrap().drivers {
///     println!("{} starts at {:?}", driver.user_name, driver.start_time);
/// }
/// ```
pub struct RunBuilder<'a> {
    restaurant_csv: &'a str,
    workflow_csv:   &'a str,
    roster:         &'a MemberRoster,
    config:         RunConfig,
    auditor:        Option<Auditor>,
}

impl<'a> RunBuilder<'a> {
    pub fn new(restaurant_csv: &'a str, workflow_csv: &'a str, roster: &'a MemberRoster) -> Self {
        Self {
            restaurant_csv,
            workflow_csv,
            roster,
            config: RunConfig::default(),
            auditor: None,
        }
    }

    pub fn mode(mut self, mode: RequestMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn schedule(mut self, schedule: ScheduleConfig) -> Self {
        self.config.schedule = schedule;
        self
    }

    /// Replace mode and schedule settings at once.
    pub fn config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom rule set instead of [`Auditor::standard`].
    pub fn auditor(mut self, auditor: Auditor) -> Self {
        self.auditor = Some(auditor);
        self
    }

    /// Tokenize, parse, schedule and audit.
    ///
    /// Route requests stop after parsing: they have no pickups to schedule
    /// and no realized run to audit.
    pub fn build(self) -> RunResult<RunOutput> {
        let catalog_rows = parse_rows(self.restaurant_csv)?;
        let workflow_rows = parse_rows(self.workflow_csv)?;
        debug!(
            catalog_rows = catalog_rows.len(),
            workflow_rows = workflow_rows.len(),
            "tokenized documents"
        );

        let sheet = WorkflowSheet::new(&workflow_rows)?;

        match self.config.mode {
            RequestMode::RouteRequest => {
                let (catalog, control_block, pooled) = join3(
                    || parse_catalog_rows(&catalog_rows),
                    || sheet.control_block(),
                    || sheet.route_request_rows(),
                );
                // The template is still validated.
                catalog?;
                let (deliveries, drivers) = pooled?;
                let request = sheet.assemble_route_request(control_block?, deliveries, drivers)?;
                info!(
                    consumers = request.deliveries.len(),
                    drivers = request.drivers.len(),
                    "route request parsed"
                );
                Ok(RunOutput::RouteRequest(request))
            }
            RequestMode::MessageRequest => {
                let (catalog, control_block, drivers) = join3(
                    || parse_catalog_rows(&catalog_rows),
                    || sheet.control_block(),
                    || sheet.driver_blocks(),
                );
                let catalog = catalog?;
                let mut model = sheet.assemble(control_block?, drivers?, &catalog)?;

                let late_arrivals = model.control_block.is_late_arrival_audit_enabled();
                schedule_drivers(&mut model.drivers, &catalog, &self.config.schedule, late_arrivals)?;

                let auditor = self.auditor.unwrap_or_default();
                let report = auditor.audit(&model, self.roster)?;

                let run = into_run(model, catalog, report.warnings);
                info!(
                    drivers = run.drivers.len(),
                    restaurants = run.restaurants.len(),
                    warnings = run.warnings.len(),
                    "delivery run complete"
                );
                Ok(RunOutput::Delivery(run))
            }
        }
    }
}

/// Set every driver's start time and append its scheduling warnings.
fn schedule_drivers(
    drivers: &mut [Driver],
    catalog: &RestaurantCatalog,
    config: &ScheduleConfig,
    late_arrivals: bool,
) -> RunResult<()> {
    let engine = ScheduleEngine::new(catalog, config.clone()).late_arrival_warnings(late_arrivals);

    for driver in drivers.iter_mut() {
        let stops: Vec<Stop<'_>> = driver
            .pickups
            .iter()
            .map(|p| Stop::new(&p.restaurant, p.orders))
            .collect();
        let schedule = engine.schedule(&stops).map_err(|source| RunError::Schedule {
            driver: driver.user_name.clone(),
            source,
        })?;

        driver.start_time = schedule.start_time;
        driver.warnings.extend(schedule.warnings);
        debug!(driver = %driver.user_name, start = ?driver.start_time, "scheduled driver");
    }
    Ok(())
}

fn into_run(model: WorkflowModel, catalog: RestaurantCatalog, warnings: Vec<String>) -> DeliveryRun {
    let WorkflowModel { control_block, drivers, restaurants, .. } = model;
    DeliveryRun { control_block, drivers, restaurants, catalog, warnings }
}

/// Run three independent parses over the same rows.  With the `parallel`
/// feature they run on Rayon's thread pool; results are returned in
/// argument order either way, so the first error reported does not depend
/// on scheduling.
fn join3<A, B, C>(
    a: impl FnOnce() -> A + Send,
    b: impl FnOnce() -> B + Send,
    c: impl FnOnce() -> C + Send,
) -> (A, B, C)
where
    A: Send,
    B: Send,
    C: Send,
{
    #[cfg(not(feature = "parallel"))]
    {
        (a(), b(), c())
    }

    #[cfg(feature = "parallel")]
    {
        let (a, (b, c)) = rayon::join(a, || rayon::join(b, c));
        (a, b, c)
    }
}

