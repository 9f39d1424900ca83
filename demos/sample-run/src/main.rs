//! sample-run — one delivery run from a restaurant template and a routed
//! workflow sheet.
//!
//! ```text
//! sample-run                                   # embedded sample documents
//! sample-run TEMPLATE.csv WORKFLOW.csv         # your own documents
//! sample-run ... --config run.json --json      # JSON settings / JSON output
//! ```
//!
//! Logging goes through `RUST_LOG` (default `info`).

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dl_core::{DRIVERS_GROUP, Member, MemberRoster};
use dl_run::{DeliveryRun, RunBuilder, RunConfig, RunOutput};

// ── Embedded documents ────────────────────────────────────────────────────────

const TEMPLATE_CSV: &str = "\
Version,3-0-0,,,
Route,Name,Start Time,Emoji,No Pics
TRUE,Solano Route,,,
FALSE,Cafe Raj,5:00 PM,:curry:,FALSE
FALSE,Kim's Cafe,5:00 PM,:bento:,TRUE
FALSE,V&A Cafe,4:50 PM,:coffee:,FALSE
TRUE,Shattuck Route,,,
FALSE,Jot Mahal,5:00 PM,:naan:,FALSE
FALSE,Bopshop,5:10 PM,:taco:,FALSE
";

const WORKFLOW_CSV: &str = "\
Consumer,Driver,Name,User Name,Phone #,Phone2 #,Neighborhood,City,Address,Condo,Details,Restaurants,#orders,normal,veggie
FALSE,FALSE,ControlBegin,,,,,,,,,,,,
FALSE,FALSE,Version,2-0-0,,,,,,,,,,,
FALSE,FALSE,OpsManager (UserName|Phone),jbOpsMgr | 510-555-1212,,,,,,,,,,,
FALSE,FALSE,BackupDriverUserName,kdDriver,,,,,,,,,,,
FALSE,FALSE,SplitRestaurant (Name|CleanupDriverUserName),Cafe Raj | kdDriver,,,,,,,,,,,
FALSE,FALSE,Restaurant (Name|Emoji),Cafe Raj | :curry:,,,,,,,,,,,
FALSE,FALSE,Restaurant (Name|Emoji),V&A Cafe | :coffee:,,,,,,,,,,,
FALSE,FALSE,Note,Bopshop has no emoji entry,,,,,,,,,,,
FALSE,FALSE,ControlEnd,,,,,,,,,,,,
,,,,,,,,,,,,,,
FALSE,TRUE,Jay Driver,jsDriver,510-555-0001,,,,,,https://maps.example/js,,,,
FALSE,FALSE,,,,,,,1500 Solano Ave,,,Cafe Raj,2,,
FALSE,FALSE,,,,,,,1628 Solano Ave,,,V&A Cafe,1,,
,,,,,,,,,,,,,,
TRUE,FALSE,Ann Consumer,annc,510-555-1001,,North,Berkeley,1 Elm St,FALSE,,Cafe Raj,,1,
TRUE,FALSE,Bob Consumer,bobc,510-555-1002,,North,Albany,2 Elm St,TRUE,,Cafe Raj,,,1
TRUE,FALSE,Cy Consumer,cyc,510-555-1003,,North,Albany,3 Elm St,FALSE,,V&A Cafe,,1,
,,,,,,,,,,,,,,
FALSE,TRUE,Kay Driver,kdDriver,510-555-0002,,,,,,https://maps.example/kd,,,,
FALSE,FALSE,,,,,,,1500 Solano Ave,,,Cafe Raj,1,,
FALSE,FALSE,,,,,,,2900 Shattuck Ave,,,Bopshop,1,,
,,,,,,,,,,,,,,
TRUE,FALSE,Di Consumer,dic,510-555-1004,,South,Berkeley,4 Oak St,FALSE,,Cafe Raj,,1,
TRUE,FALSE,Ed Consumer,edc,510-555-1005,,South,Berkeley,5 Oak St,FALSE,,Bopshop,,,1
";

fn sample_roster() -> MemberRoster {
    MemberRoster::new()
        .with_member(Member::new("jbOpsMgr", "(510) 555-1212"))
        .with_member(Member::new("jsDriver", "510-555-0001").in_group(DRIVERS_GROUP))
        .with_member(Member::new("kdDriver", "510-555-0002").in_group(DRIVERS_GROUP))
}

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "sample-run")]
#[command(about = "Schedule and audit one delivery run")]
struct Args {
    /// Restaurant template CSV (the embedded sample is used when omitted)
    #[arg(value_name = "TEMPLATE", requires = "workflow")]
    template: Option<PathBuf>,

    /// Routed workflow CSV
    #[arg(value_name = "WORKFLOW", requires = "template")]
    workflow: Option<PathBuf>,

    /// JSON run settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the whole run as JSON
    #[arg(long)]
    json: bool,
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<RunConfig>(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => RunConfig::default(),
    };

    let (template, workflow) = match (&args.template, &args.workflow) {
        (Some(t), Some(w)) => (
            fs::read_to_string(t).with_context(|| format!("reading {}", t.display()))?,
            fs::read_to_string(w).with_context(|| format!("reading {}", w.display()))?,
        ),
        _ => {
            info!("no documents given, using the embedded sample");
            (TEMPLATE_CSV.to_owned(), WORKFLOW_CSV.to_owned())
        }
    };

    let roster = sample_roster();
    let output = RunBuilder::new(&template, &workflow, &roster).config(config).build()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match &output {
        RunOutput::Delivery(run) => print_run(run),
        RunOutput::RouteRequest(request) => {
            println!(
                "route request: {} consumers, {} drivers",
                request.deliveries.len(),
                request.drivers.len()
            );
        }
    }
    Ok(())
}

fn print_run(run: &DeliveryRun) {
    println!("control block version {}", run.control_block.version);
    for driver in &run.drivers {
        let start = driver
            .start_time
            .map_or_else(|| "-".to_owned(), |t| t.to_string());
        let stops: Vec<&str> = driver.pickups.iter().map(|p| p.restaurant.as_str()).collect();
        println!(
            "{:<10} start {:>8}  {} deliveries  pickups: {}",
            driver.user_name,
            start,
            driver.deliveries.len(),
            stops.join(" → ")
        );
    }
    for restaurant in run.restaurants.values() {
        let split = if restaurant.is_split() { " (split)" } else { "" };
        println!("{:<10} {} orders{split}", restaurant.name, restaurant.orders);
    }
    if !run.warnings.is_empty() {
        println!("warnings:");
        for w in &run.warnings {
            println!("  {w}");
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Args;

    #[test]
    fn no_arguments_uses_the_embedded_sample() {
        let args = Args::try_parse_from(["sample-run"]).unwrap();
        assert!(args.template.is_none() && args.workflow.is_none());
        assert!(args.config.is_none());
        assert!(!args.json);
    }

    #[test]
    fn documents_and_options() {
        let args =
            Args::try_parse_from(["sample-run", "t.csv", "w.csv", "--config", "run.json", "--json"]).unwrap();
        assert_eq!(args.template.unwrap().to_str(), Some("t.csv"));
        assert_eq!(args.workflow.unwrap().to_str(), Some("w.csv"));
        assert_eq!(args.config.unwrap().to_str(), Some("run.json"));
        assert!(args.json);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(Args::try_parse_from(["sample-run", "t.csv"]).is_err());
        assert!(Args::try_parse_from(["sample-run", "a", "b", "c"]).is_err());
        assert!(Args::try_parse_from(["sample-run", "--config"]).is_err());
        assert!(Args::try_parse_from(["sample-run", "--verbose"]).is_err());
    }
}
