//! Table view over already-computed monthly variations: search + sort.

use std::cmp::Ordering;

use crate::domain::{MonthlyVariation, SortColumn, SortDirection};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableView {
    pub search: String,
    pub sort: Option<(SortColumn, SortDirection)>,
}

impl TableView {
    /// Rows matching the search term, in the chosen order.
    pub fn apply(&self, rows: &[MonthlyVariation]) -> Vec<MonthlyVariation> {
        let needle = self.search.trim().to_lowercase();
        let mut out: Vec<MonthlyVariation> = rows
            .iter()
            .filter(|v| needle.is_empty() || v.month.to_string().to_lowercase().contains(&needle))
            .cloned()
            .collect();

        if let Some((column, direction)) = self.sort {
            out.sort_by(|a, b| {
                let ord = match column {
                    SortColumn::Month => a.month.cmp(&b.month),
                    SortColumn::Variation => a
                        .variation_percent
                        .partial_cmp(&b.variation_percent)
                        .unwrap_or(Ordering::Equal),
                };
                match direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }
        out
    }

    /// Same column flips the direction; a new column starts ascending.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.sort = match self.sort {
            Some((cur, dir)) if cur == column => Some((column, dir.flip())),
            _ => Some((column, SortDirection::Asc)),
        };
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }
}
