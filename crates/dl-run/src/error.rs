use dl_audit::AuditError;
use dl_core::CoreError;
use dl_restaurants::CatalogError;
use dl_schedule::ScheduleError;
use dl_workflow::WorkflowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("restaurant template: {0}")]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("driver {driver}: {source}")]
    Schedule {
        driver: String,
        #[source]
        source: ScheduleError,
    },

    #[error(transparent)]
    Audit(#[from] AuditError),
}

pub type RunResult<T> = Result<T, RunError>;
