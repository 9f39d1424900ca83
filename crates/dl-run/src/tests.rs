//! Unit tests for dl-run.

#[cfg(test)]
mod helpers {
    use dl_core::{DRIVERS_GROUP, Member, MemberRoster};

    pub const TEMPLATE: &str = "\
Version,3-0-0,,,
Route,Name,Start Time,Emoji,No Pics
TRUE,Solano Route,,,
FALSE,Cafe Raj,5:00 PM,:curry:,FALSE
FALSE,V&A Cafe,4:50 PM,:coffee:,FALSE
TRUE,Shattuck Route,,,
FALSE,Bopshop,5:10 PM,:taco:,FALSE
";

    pub const HEADER: &str = "Consumer,Driver,Name,User Name,Phone #,Phone2 #,Neighborhood,City,Address,Condo,Details,Restaurants,#orders,normal,veggie\n";

    /// Control block rows between the markers, one `key,value` per line.
    pub const CONTROL: &str = "\
FALSE,FALSE,Version,2-0-0,,,,,,,,,,,
FALSE,FALSE,OpsManager (UserName|Phone),jbOpsMgr | 510-555-1212,,,,,,,,,,,
FALSE,FALSE,BackupDriverUserName,kdDriver,,,,,,,,,,,
FALSE,FALSE,SplitRestaurant (Name|CleanupDriverUserName),Cafe Raj | kdDriver,,,,,,,,,,,
FALSE,FALSE,Restaurant (Name|Emoji),Cafe Raj | :curry:,,,,,,,,,,,
FALSE,FALSE,Restaurant (Name|Emoji),V&A Cafe | :coffee:,,,,,,,,,,,
FALSE,FALSE,Restaurant (Name|Emoji),Bopshop | :taco:,,,,,,,,,,,
";

    /// jsDriver: Cafe Raj then V&A Cafe, both on Solano Route.
    /// kdDriver: Cafe Raj then Bopshop, crossing to Shattuck Route.
    pub const DRIVERS: &str = "\
,,,,,,,,,,,,,,
FALSE,TRUE,Jay Driver,jsDriver,510-555-0001,,,,,,https://maps.example/js,,,,
FALSE,FALSE,,,,,,,1500 Solano Ave,,,Cafe Raj,1,,
FALSE,FALSE,,,,,,,1628 Solano Ave,,,V&A Cafe,1,,
,,,,,,,,,,,,,,
TRUE,FALSE,Ann Consumer,annc,510-555-1001,,North,Berkeley,1 Elm St,FALSE,,Cafe Raj,,1,
TRUE,FALSE,Bob Consumer,bobc,510-555-1002,,North,Albany,2 Elm St,TRUE,,V&A Cafe,,,1
,,,,,,,,,,,,,,
FALSE,TRUE,Kay Driver,kdDriver,510-555-0002,,,,,,https://maps.example/kd,,,,
FALSE,FALSE,,,,,,,1500 Solano Ave,,,Cafe Raj,1,,
FALSE,FALSE,,,,,,,2900 Shattuck Ave,,,Bopshop,1,,
,,,,,,,,,,,,,,
TRUE,FALSE,Cy Consumer,cyc,510-555-1003,,South,Berkeley,3 Oak St,FALSE,,Cafe Raj,,1,
TRUE,FALSE,Di Consumer,dic,510-555-1004,,South,Berkeley,4 Oak St,FALSE,,Bopshop,,1,
";

    /// A routed workflow with `extra` control rows appended inside the block.
    pub fn workflow_with(extra: &str, drivers: &str) -> String {
        format!(
            "{HEADER}FALSE,FALSE,ControlBegin,,,,,,,,,,,,\n{CONTROL}{extra}FALSE,FALSE,ControlEnd,,,,,,,,,,,,\n{drivers}"
        )
    }

    pub fn workflow() -> String {
        workflow_with("", DRIVERS)
    }

    pub fn roster() -> MemberRoster {
        MemberRoster::new()
            .with_member(Member::new("jbOpsMgr", "510-555-1212"))
            .with_member(Member::new("jsDriver", "510-555-0001").in_group(DRIVERS_GROUP))
            .with_member(Member::new("kdDriver", "510-555-0002").in_group(DRIVERS_GROUP))
    }
}

// ── Message requests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod delivery {
    use dl_core::ClockTime;
    use dl_schedule::ScheduleConfig;

    use super::helpers::*;
    use crate::{RunBuilder, RunOutput};

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn schedules_and_audits_every_driver() {
        let workflow = workflow();
        let roster = roster();
        let output = RunBuilder::new(TEMPLATE, &workflow, &roster).build().unwrap();
        let run = output.delivery().unwrap();

        assert_eq!(run.drivers.len(), 2);
        assert_eq!(run.catalog.len(), 3);
        assert_eq!(run.restaurants.len(), 3);
        assert!(run.restaurants["Cafe Raj"].is_split());

        // V&A Cafe opens at 4:50 PM but comes second: start stays 5:00 PM.
        let js = run.driver("jsDriver").unwrap();
        assert_eq!(js.start_time, Some(t("5:00 PM")));
        assert_eq!(
            js.warnings,
            [
                "V&A Cafe may be reached after closing (arrival 5:00 PM, closing 5:00 PM)",
                "V&A Cafe may be reached after expected time (arrival 5:00 PM, expected 4:50 PM)",
            ]
        );

        // Route change to Shattuck costs 10 minutes.
        let kd = run.driver("kdDriver").unwrap();
        assert_eq!(kd.start_time, Some(t("4:50 PM")));
        assert!(kd.warnings.is_empty());

        assert_eq!(
            run.warnings,
            [
                "jsDriver: V&A Cafe may be reached after closing (arrival 5:00 PM, closing 5:00 PM)",
                "jsDriver: V&A Cafe may be reached after expected time (arrival 5:00 PM, expected 4:50 PM)",
            ]
        );
        assert!(matches!(output, RunOutput::Delivery(_)));
    }

    #[test]
    fn disabled_late_arrival_audit_drops_warnings_only() {
        let workflow = workflow_with("FALSE,FALSE,LateArrivalAudit,disable,,,,,,,,,,,\n", DRIVERS);
        let roster = roster();
        let output = RunBuilder::new(TEMPLATE, &workflow, &roster).build().unwrap();
        let run = output.delivery().unwrap();

        let js = run.driver("jsDriver").unwrap();
        assert_eq!(js.start_time, Some(t("5:00 PM")));
        assert!(js.warnings.is_empty());
        assert!(run.warnings.is_empty());
    }

    #[test]
    fn schedule_config_is_applied() {
        let workflow = workflow();
        let roster = roster();
        let schedule = ScheduleConfig { route_change_minutes: 20, ..ScheduleConfig::default() };
        let output = RunBuilder::new(TEMPLATE, &workflow, &roster)
            .schedule(schedule)
            .build()
            .unwrap();
        let kd = output.delivery().unwrap().driver("kdDriver").unwrap().clone();
        assert_eq!(kd.start_time, Some(t("4:40 PM")));
    }

    #[test]
    fn repeated_runs_agree() {
        let workflow = workflow();
        let roster = roster();
        let first = RunBuilder::new(TEMPLATE, &workflow, &roster).build().unwrap();
        let second = RunBuilder::new(TEMPLATE, &workflow, &roster).build().unwrap();
        let (a, b) = (first.delivery().unwrap(), second.delivery().unwrap());
        assert_eq!(a.drivers, b.drivers);
        assert_eq!(a.warnings, b.warnings);
    }
}

// ── Failures ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod failures {
    use dl_audit::AuditError;
    use dl_workflow::WorkflowError;

    use super::helpers::*;
    use crate::{RunBuilder, RunError};

    #[test]
    fn missing_split_entry_fails_the_audit() {
        let control_without_split: String = CONTROL
            .lines()
            .filter(|l| !l.contains("SplitRestaurant"))
            .map(|l| format!("{l}\n"))
            .collect();
        let workflow = format!(
            "{HEADER}FALSE,FALSE,ControlBegin,,,,,,,,,,,,\n{control_without_split}FALSE,FALSE,ControlEnd,,,,,,,,,,,,\n{DRIVERS}"
        );
        let roster = roster();
        let err = RunBuilder::new(TEMPLATE, &workflow, &roster).build().unwrap_err();
        assert!(matches!(
            err,
            RunError::Audit(AuditError::MissingSplitRestaurant { ref restaurant }) if restaurant == "Cafe Raj"
        ));
    }

    #[test]
    fn unknown_driver_fails_the_audit() {
        let workflow = workflow();
        let roster = dl_core::MemberRoster::new()
            .with_member(dl_core::Member::new("jbOpsMgr", "510-555-1212"))
            .with_member(dl_core::Member::new("kdDriver", "510-555-0002").in_group(dl_core::DRIVERS_GROUP));
        let err = RunBuilder::new(TEMPLATE, &workflow, &roster).build().unwrap_err();
        assert!(matches!(err, RunError::Audit(AuditError::UnknownDriver { ref user, .. }) if user == "jsDriver"));
    }

    #[test]
    fn pickup_missing_from_template_is_fatal() {
        let drivers = DRIVERS.replace("Bopshop", "Jot Mahal");
        let workflow = workflow_with("", &drivers);
        let roster = roster();
        let err = RunBuilder::new(TEMPLATE, &workflow, &roster).build().unwrap_err();
        assert!(matches!(
            err,
            RunError::Workflow(WorkflowError::UnknownRestaurant { ref restaurant, .. }) if restaurant == "Jot Mahal"
        ));
    }

    #[test]
    fn bad_template_is_reported_as_template_error() {
        let workflow = workflow();
        let roster = roster();
        let err = RunBuilder::new("Route,Name\n", &workflow, &roster).build().unwrap_err();
        assert!(matches!(err, RunError::Catalog(_)));
        assert!(err.to_string().starts_with("restaurant template: "));
    }

    #[test]
    fn missing_control_block_is_fatal_for_message_requests() {
        let workflow = format!("{HEADER}{DRIVERS}");
        let roster = roster();
        let err = RunBuilder::new(TEMPLATE, &workflow, &roster).build().unwrap_err();
        assert!(matches!(err, RunError::Workflow(WorkflowError::MissingControlBlock)));
    }
}

// ── Route requests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod route_request {
    use dl_workflow::RequestMode;

    use super::helpers::*;
    use crate::{RunBuilder, RunConfig};

    const UNROUTED: &str = "\
TRUE,FALSE,Ann Consumer,annc,510-555-1001,,North,Berkeley,1 Elm St,FALSE,,,,1,
TRUE,FALSE,Bob Consumer,bobc,510-555-1002,,North,Albany,2 Elm St,TRUE,,,,,1
,,,,,,,,,,,,,,
FALSE,TRUE,Jay Driver,jsDriver,510-555-0001,,,,,,,,,,
";

    #[test]
    fn returns_the_pooled_request() {
        let workflow = format!("{HEADER}{UNROUTED}");
        let roster = roster();
        let output = RunBuilder::new(TEMPLATE, &workflow, &roster)
            .mode(RequestMode::RouteRequest)
            .build()
            .unwrap();
        assert!(output.delivery().is_none());
        let request = output.route_request().unwrap();
        assert!(request.control_block.is_none());
        assert_eq!(request.deliveries.len(), 2);
        assert_eq!(request.drivers.len(), 1);
    }

    #[test]
    fn mode_can_come_from_config() {
        let workflow = format!("{HEADER}{UNROUTED}");
        let roster = roster();
        let config = RunConfig { mode: RequestMode::RouteRequest, ..RunConfig::default() };
        let output = RunBuilder::new(TEMPLATE, &workflow, &roster).config(config).build().unwrap();
        assert!(output.route_request().is_some());
    }
}
