use tracing::warn;

/// Advisory findings of a successful audit, in rule order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuditReport {
    pub warnings: Vec<String>,
}

impl AuditReport {
    pub fn push(&mut self, warning: String) {
        warn!("{warning}");
        self.warnings.push(warning);
    }

    pub fn extend(&mut self, warnings: impl IntoIterator<Item = String>) {
        for w in warnings {
            self.push(w);
        }
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
