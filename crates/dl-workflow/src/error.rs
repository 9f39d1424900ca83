use std::fmt;

use dl_control::ControlBlockError;
use dl_core::CoreError;
use thiserror::Error;

use crate::RationLayout;

/// Every problem found on one sheet row, reported together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {}", .problems.join("; "))]
pub struct RowErrors {
    pub line:     usize,
    pub problems: Vec<String>,
}

impl RowErrors {
    pub fn new(line: usize) -> Self {
        Self { line, problems: Vec::new() }
    }

    pub fn push(&mut self, problem: impl Into<String>) {
        self.problems.push(problem.into());
    }

    /// `Err(self)` if any problem was recorded.
    pub fn into_result(self) -> Result<(), RowErrors> {
        if self.problems.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// A pickup whose order count disagrees with its delivery rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderMismatch {
    pub restaurant: String,
    pub driver:     String,
    pub orders:     u32,
    pub deliveries: u32,
    /// Line of the pickup row.
    pub line:       usize,
}

impl fmt::Display for OrderMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: restaurant \"{}\" for driver {} has ",
            self.line, self.restaurant, self.driver
        )?;
        match (self.orders, self.deliveries) {
            (0, m) => write!(f, "no orders but {m} deliveries"),
            (n, 0) => write!(f, "{n} orders but no deliveries"),
            (n, m) => write!(f, "{n} orders but {m} deliveries"),
        }
    }
}

fn join_lines(mismatches: &[OrderMismatch]) -> String {
    mismatches
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Control(#[from] ControlBlockError),

    #[error(transparent)]
    Row(#[from] RowErrors),

    #[error("line {line}: row has both Consumer and Driver set to TRUE")]
    ConflictingFlags { line: usize },

    #[error("line {line}: driver block for {user} missing closing driver row")]
    UnclosedDriverBlock { user: String, line: usize },

    #[error("line {line}: {kind} row {context}")]
    MisplacedRow {
        kind:    &'static str,
        context: &'static str,
        line:    usize,
    },

    #[error("workflow has no control block")]
    MissingControlBlock,

    #[error("line {line}: header has {found} ration columns but control block version {version} needs {expected}")]
    RationColumns {
        version:  String,
        found:    RationLayout,
        expected: RationLayout,
        line:     usize,
    },

    #[error("line {line}: pickup restaurant \"{restaurant}\" for driver {driver} is not in the restaurant template")]
    UnknownRestaurant {
        restaurant: String,
        driver:     String,
        line:       usize,
    },

    #[error("{}", join_lines(.0))]
    Reconciliation(Vec<OrderMismatch>),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
