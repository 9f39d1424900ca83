//! Unit tests for dl-schedule.

#[cfg(test)]
mod helpers {
    use dl_core::ClockTime;
    use dl_restaurants::{RestaurantCatalog, parse_catalog};

    pub fn catalog() -> RestaurantCatalog {
        parse_catalog(
            "\
Version,3-0-0
Route,Name,Start Time,Emoji,No Pics
TRUE,Solano Route,,,
FALSE,Cafe Raj,5:00 PM,:curry:,FALSE
FALSE,Kim's Cafe,5:00 PM,:bento:,TRUE
FALSE,V&A Cafe,4:50 PM,:coffee:,FALSE
TRUE,Shattuck Route,,,
FALSE,Jot Mahal,5:00 PM,:naan:,FALSE
FALSE,Bopshop,5:10 PM,:taco:,FALSE
",
        )
        .unwrap()
    }

    pub fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }
}

#[cfg(test)]
mod config {
    use crate::ScheduleConfig;

    #[test]
    fn defaults() {
        let c = ScheduleConfig::default();
        assert_eq!(c.hop("Solano Route", "Solano Route"), 0);
        assert_eq!(c.hop("Solano Route", "Shattuck Route"), 10);
        assert_eq!(c.backoff(4), 0);
        assert_eq!(c.backoff(5), 5);
        assert_eq!(c.backoff(12), 10);
    }

    #[test]
    fn zero_orders_per_step_disables_backoff() {
        let c = ScheduleConfig { orders_per_step: 0, ..ScheduleConfig::default() };
        assert_eq!(c.backoff(100), 0);
    }
}

#[cfg(test)]
mod engine {
    use super::helpers::*;
    use crate::{ScheduleConfig, ScheduleEngine, ScheduleError, Stop};

    fn schedule(stops: &[Stop<'_>]) -> crate::DriverSchedule {
        let catalog = catalog();
        ScheduleEngine::new(&catalog, ScheduleConfig::default())
            .schedule(stops)
            .unwrap()
    }

    #[test]
    fn lone_stop_starts_at_baseline() {
        let s = schedule(&[Stop::new("Cafe Raj", 0)]);
        assert_eq!(s.start_time, Some(t("5:00 PM")));
        assert_eq!(s.start_time.unwrap().to_string(), "5:00 PM");
        assert!(s.warnings.is_empty());
    }

    #[test]
    fn two_same_route_stops() {
        let s = schedule(&[Stop::new("Cafe Raj", 0), Stop::new("Kim's Cafe", 0)]);
        assert_eq!(s.start_time, Some(t("5:00 PM")));
        assert!(s.warnings.is_empty());
    }

    #[test]
    fn early_restaurant_out_of_position_warns() {
        let s = schedule(&[Stop::new("Cafe Raj", 0), Stop::new("V&A Cafe", 0)]);
        assert_eq!(s.start_time, Some(t("5:00 PM")));
        assert_eq!(s.warnings, [
            "V&A Cafe may be reached after closing (arrival 5:00 PM, closing 5:00 PM)",
            "V&A Cafe may be reached after expected time (arrival 5:00 PM, expected 4:50 PM)",
        ]);
    }

    #[test]
    fn early_restaurant_first_is_safe() {
        let s = schedule(&[Stop::new("V&A Cafe", 0), Stop::new("Cafe Raj", 0)]);
        assert_eq!(s.start_time, Some(t("4:50 PM")));
        assert!(s.warnings.is_empty());
    }

    #[test]
    fn route_change_adds_travel() {
        let s = schedule(&[Stop::new("Cafe Raj", 0), Stop::new("Bopshop", 0)]);
        assert_eq!(s.start_time, Some(t("4:50 PM")));
        assert_eq!(s.stops[1].offset, 10);
        assert_eq!(s.stops[1].arrival, t("5:00 PM"));
        assert!(s.warnings.is_empty());
    }

    #[test]
    fn crossing_routes_keeps_stricter_bound() {
        // Bopshop's 5:10 bound does not loosen the 5:00 bound set on Solano.
        let s = schedule(&[Stop::new("Cafe Raj", 0), Stop::new("Bopshop", 0), Stop::new("Jot Mahal", 0)]);
        assert_eq!(s.stops[2].offset, 10);
        assert_eq!(s.start_time, Some(t("4:50 PM")));
    }

    #[test]
    fn orders_back_off_later_stops() {
        let s = schedule(&[Stop::new("Cafe Raj", 6), Stop::new("Kim's Cafe", 4)]);
        assert_eq!(s.stops[1].offset, 5);
        assert_eq!(s.start_time, Some(t("4:55 PM")));
        assert!(s.warnings.is_empty());
    }

    #[test]
    fn start_time_is_floored_to_grid() {
        let catalog = catalog();
        let config = ScheduleConfig { route_change_minutes: 7, ..ScheduleConfig::default() };
        let s = ScheduleEngine::new(&catalog, config)
            .schedule(&[Stop::new("Cafe Raj", 0), Stop::new("Bopshop", 0)])
            .unwrap();
        // 5:00 PM − 7 = 4:53 PM, floored.
        assert_eq!(s.start_time, Some(t("4:50 PM")));
    }

    #[test]
    fn no_pickups_no_start_time() {
        let s = schedule(&[]);
        assert_eq!(s.start_time, None);
        assert!(s.warnings.is_empty() && s.stops.is_empty());
    }

    #[test]
    fn unknown_restaurant_is_fatal() {
        let catalog = catalog();
        let e = ScheduleEngine::new(&catalog, ScheduleConfig::default())
            .schedule(&[Stop::new("Nowhere Diner", 1)])
            .unwrap_err();
        assert!(matches!(e, ScheduleError::UnknownRestaurant { .. }));
        assert!(e.to_string().contains("\"Nowhere Diner\""));
    }

    #[test]
    fn disabled_late_arrivals_keep_start_time() {
        let catalog = catalog();
        let s = ScheduleEngine::new(&catalog, ScheduleConfig::default())
            .late_arrival_warnings(false)
            .schedule(&[Stop::new("Cafe Raj", 0), Stop::new("V&A Cafe", 0)])
            .unwrap();
        assert_eq!(s.start_time, Some(t("5:00 PM")));
        assert!(s.warnings.is_empty());
    }
}
