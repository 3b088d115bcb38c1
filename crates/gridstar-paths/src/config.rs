//! Search configuration.

/// Tunables for [`AstarSearch`](crate::AstarSearch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Maximum number of cell expansions per run. `None` means unlimited.
    pub max_expansions: Option<usize>,

    /// Emit [`SearchEvent::PathCell`](crate::SearchEvent::PathCell)
    /// notifications while reconstructing the path.
    pub report_path_cells: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_expansions: None,
            report_path_cells: true,
        }
    }
}

impl SearchConfig {
    /// Limit the number of expansions per run.
    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// Enable or disable path-cell notifications.
    pub fn with_path_cells(mut self, report: bool) -> Self {
        self.report_path_cells = report;
        self
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let c: SearchConfig = serde_json::from_str(r#"{"max_expansions": 50}"#).unwrap();
        assert_eq!(c.max_expansions, Some(50));
        assert!(c.report_path_cells);
    }
}
