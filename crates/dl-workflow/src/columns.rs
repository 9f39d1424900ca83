//! Workflow sheet column names.
//!
//! Column order in the sheet does not matter; every lookup goes through the
//! header.  Which ration columns are required depends on the sheet layout
//! (see [`RationLayout`](crate::RationLayout)).

pub use dl_control::columns::{CONSUMER, DRIVER, NAME, USER_NAME};

pub const PHONE: &str = "Phone #";
pub const ALT_PHONE: &str = "Phone2 #";
pub const NEIGHBORHOOD: &str = "Neighborhood";
pub const CITY: &str = "City";
pub const ADDRESS: &str = "Address";
pub const CONDO: &str = "Condo";
/// Free text.  On a driver row it holds the gMap route URL.
pub const DETAILS: &str = "Details";
pub const RESTAURANTS: &str = "Restaurants";
pub const ORDERS: &str = "#orders";

// Legacy and 2-0-0 rations
pub const NORMAL: &str = "normal";
pub const VEGGIE: &str = "veggie";

// 3-0-0 rations
pub const STD_MEALS: &str = "std meals";
pub const ALT_MEALS: &str = "alt meals";
pub const TYPE_MEAL: &str = "type meal";
pub const STD_GROCERY: &str = "std grocery";
pub const ALT_GROCERY: &str = "alt grocery";
pub const TYPE_GROCERY: &str = "type grocery";

/// Required in every layout.
pub const BASE_COLUMNS: [&str; 13] = [
    CONSUMER,
    DRIVER,
    NAME,
    USER_NAME,
    PHONE,
    ALT_PHONE,
    NEIGHBORHOOD,
    CITY,
    ADDRESS,
    CONDO,
    DETAILS,
    RESTAURANTS,
    ORDERS,
];

pub const LEGACY_RATION_COLUMNS: [&str; 2] = [NORMAL, VEGGIE];

pub const V300_RATION_COLUMNS: [&str; 6] =
    [STD_MEALS, ALT_MEALS, TYPE_MEAL, STD_GROCERY, ALT_GROCERY, TYPE_GROCERY];
