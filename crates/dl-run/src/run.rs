use std::collections::BTreeMap;

use dl_control::ControlBlock;
use dl_restaurants::RestaurantCatalog;
use dl_workflow::{Driver, Restaurant, RouteRequest};

/// A routed, scheduled and audited delivery run.
///
/// Every driver carries its final `start_time` and scheduling warnings;
/// `warnings` is the audit report in rule order.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryRun {
    pub control_block: ControlBlock,
    pub drivers:       Vec<Driver>,
    /// Restaurants visited this run, keyed by name.
    pub restaurants:   BTreeMap<String, Restaurant>,
    pub catalog:       RestaurantCatalog,
    pub warnings:      Vec<String>,
}

impl DeliveryRun {
    pub fn driver(&self, user_name: &str) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.user_name == user_name)
    }
}

/// What a run produced, depending on [`RequestMode`](dl_workflow::RequestMode).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunOutput {
    Delivery(DeliveryRun),
    RouteRequest(RouteRequest),
}

impl RunOutput {
    pub fn delivery(&self) -> Option<&DeliveryRun> {
        match self {
            RunOutput::Delivery(run) => Some(run),
            RunOutput::RouteRequest(_) => None,
        }
    }

    pub fn route_request(&self) -> Option<&RouteRequest> {
        match self {
            RunOutput::Delivery(_) => None,
            RunOutput::RouteRequest(request) => Some(request),
        }
    }
}
