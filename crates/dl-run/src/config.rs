use dl_schedule::ScheduleConfig;
use dl_workflow::RequestMode;

/// Settings for one pipeline run.
///
/// With the `serde` feature every field is optional in the serialized form:
///
/// ```json
/// { "mode": "MessageRequest", "schedule": { "closing_window_minutes": 15 } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    pub mode:     RequestMode,
    pub schedule: ScheduleConfig,
}
