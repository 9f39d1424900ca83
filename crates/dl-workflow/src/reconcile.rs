//! Cross-row checks that need every driver block.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{Driver, OrderMismatch, Restaurant, WorkflowError, WorkflowResult};

/// Every pickup's `orders` must equal the number of the same driver's
/// deliveries naming that restaurant.  All mismatches in the sheet are
/// reported in one error.
pub fn reconcile(drivers: &[Driver]) -> WorkflowResult<()> {
    let mut mismatches = Vec::new();

    for driver in drivers {
        for pickup in &driver.pickups {
            let deliveries = driver.deliveries_from(&pickup.restaurant).count() as u32;
            if deliveries != pickup.orders {
                mismatches.push(OrderMismatch {
                    restaurant: pickup.restaurant.clone(),
                    driver: driver.user_name.clone(),
                    orders: pickup.orders,
                    deliveries,
                    line: pickup.line,
                });
            }
        }
    }

    if mismatches.is_empty() {
        Ok(())
    } else {
        debug!(count = mismatches.len(), "order reconciliation failed");
        Err(WorkflowError::Reconciliation(mismatches))
    }
}

/// Build the run's restaurant arena from the drivers' pickups.  Address and
/// details come from the first pickup row of each restaurant.
pub fn build_restaurants(drivers: &[Driver]) -> BTreeMap<String, Restaurant> {
    let mut restaurants: BTreeMap<String, Restaurant> = BTreeMap::new();
    for driver in drivers {
        for pickup in &driver.pickups {
            let entry = restaurants
                .entry(pickup.restaurant.clone())
                .or_insert_with(|| Restaurant {
                    name:    pickup.restaurant.clone(),
                    address: pickup.address.clone(),
                    details: pickup.details.clone(),
                    orders:  0,
                    drivers: Default::default(),
                });
            entry.orders += pickup.orders;
            entry.drivers.insert(driver.user_name.clone());
        }
    }
    restaurants
}
