use dl_control::ControlBlockError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error(transparent)]
    Control(#[from] ControlBlockError),

    #[error("Control block does not contain a SplitRestaurant(Name|CleanupDriverUserName) entry for {restaurant}")]
    MissingSplitRestaurant { restaurant: String },

    #[error("line {line}: driver {user} is not a member")]
    UnknownDriver { user: String, line: usize },

    #[error("line {line}: {column} \"{value}\" is not one of the {directive} ({options})")]
    UnknownOption {
        column:    &'static str,
        directive: &'static str,
        value:     String,
        options:   String,
        line:      usize,
    },
}

pub type AuditResult<T> = Result<T, AuditError>;
