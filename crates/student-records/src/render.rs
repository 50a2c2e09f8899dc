//! Rendering of the record list.
//!
//! Every render rebuilds the whole row set from the list. The result is a
//! plain data model that the CLI prints as text, a table, or JSON.

use serde::Serialize;
use tracing::trace;

use crate::config::DisplayConfig;
use crate::error::Result;
use crate::record::{RecordKey, RecordList};

/// Text of the row shown when there are no records.
pub const EMPTY_PLACEHOLDER: &str = "No student records found.";

/// Per-row control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowAction {
    /// Load the row into the form for editing.
    Edit,
    /// Remove the row after confirmation.
    Delete,
}

impl RowAction {
    /// Button label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Edit => "Edit",
            Self::Delete => "Delete",
        }
    }
}

/// One displayed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderedRow {
    /// A stored record.
    Record {
        /// Zero-based position in the list.
        position: usize,
        /// Key the row's actions operate on.
        key: RecordKey,
        /// Student name.
        name: String,
        /// Student ID.
        id: String,
        /// Email address.
        email: String,
        /// Contact number.
        contact: String,
        /// Controls offered on the row.
        actions: [RowAction; 2],
    },
    /// Shown alone when the list is empty.
    Placeholder {
        /// Placeholder text.
        message: &'static str,
    },
}

/// The full display produced by one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedList {
    /// Rows in display order.
    pub rows: Vec<RenderedRow>,
    /// Whether the rows overflow the viewport.
    pub scrollable: bool,
}

impl RenderedList {
    /// Number of record rows (the placeholder does not count).
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, RenderedRow::Record { .. }))
            .count()
    }

    /// Whether the only row is the placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self.rows.as_slice(), [RenderedRow::Placeholder { .. }])
    }

    /// One line per record: `1. name | id | email | contact`.
    #[must_use]
    pub fn to_plain(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            match row {
                RenderedRow::Record {
                    position,
                    name,
                    id,
                    email,
                    contact,
                    ..
                } => {
                    out.push_str(&format!(
                        "{}. {name} | {id} | {email} | {contact}\n",
                        position + 1
                    ));
                }
                RenderedRow::Placeholder { message } => {
                    out.push_str(message);
                    out.push('\n');
                }
            }
        }
        out
    }

    /// Aligned table with a header and an actions column.
    #[must_use]
    pub fn to_table(&self) -> String {
        const HEADERS: [&str; 6] = ["#", "Name", "ID", "Email", "Contact", "Actions"];

        let cells: Vec<[String; 6]> = self
            .rows
            .iter()
            .filter_map(|row| match row {
                RenderedRow::Record {
                    position,
                    name,
                    id,
                    email,
                    contact,
                    actions,
                    ..
                } => Some([
                    (position + 1).to_string(),
                    name.clone(),
                    id.clone(),
                    email.clone(),
                    contact.clone(),
                    actions
                        .iter()
                        .map(RowAction::label)
                        .collect::<Vec<_>>()
                        .join(" "),
                ]),
                RenderedRow::Placeholder { .. } => None,
            })
            .collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_table_line(&mut out, &HEADERS.map(String::from), &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_table_line(&mut out, &rule, &widths);

        if cells.is_empty() {
            out.push_str(EMPTY_PLACEHOLDER);
            out.push('\n');
        }
        for row in &cells {
            push_table_line(&mut out, row, &widths);
        }
        out
    }

    /// Pretty-printed JSON of the row model.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn push_table_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Builds a [`RenderedList`] from a [`RecordList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    viewport_height: u32,
    row_height: u32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(&DisplayConfig::default())
    }
}

impl Renderer {
    /// Renderer sized by the display configuration.
    #[must_use]
    pub fn new(display: &DisplayConfig) -> Self {
        Self {
            viewport_height: display.viewport_height,
            row_height: display.row_height,
        }
    }

    /// Rebuild every row from the list.
    #[must_use]
    pub fn render(&self, list: &RecordList) -> RenderedList {
        let rows: Vec<RenderedRow> = if list.is_empty() {
            vec![RenderedRow::Placeholder {
                message: EMPTY_PLACEHOLDER,
            }]
        } else {
            list.entries()
                .iter()
                .enumerate()
                .map(|(position, entry)| RenderedRow::Record {
                    position,
                    key: entry.key,
                    name: entry.record.name.clone(),
                    id: entry.record.id.clone(),
                    email: entry.record.email.clone(),
                    contact: entry.record.contact.clone(),
                    actions: [RowAction::Edit, RowAction::Delete],
                })
                .collect()
        };

        let scrollable = self.content_height(rows.len()) > u64::from(self.viewport_height);
        trace!(rows = rows.len(), scrollable, "Rendered record list");

        RenderedList { rows, scrollable }
    }

    fn content_height(&self, rows: usize) -> u64 {
        u64::try_from(rows)
            .unwrap_or(u64::MAX)
            .saturating_mul(u64::from(self.row_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn two_records() -> RecordList {
        RecordList::from_records([
            Record::new("Jane Doe", "101", "jane@x.com", "1234567890"),
            Record::new("John Roe", "102", "john@x.com", "5555555555"),
        ])
    }

    fn renderer(viewport_height: u32, row_height: u32) -> Renderer {
        Renderer::new(&DisplayConfig {
            viewport_height,
            row_height,
        })
    }

    #[test]
    fn test_empty_list_renders_placeholder() {
        let rendered = Renderer::default().render(&RecordList::new());
        assert!(rendered.is_placeholder());
        assert_eq!(rendered.record_count(), 0);
        assert_eq!(
            rendered.rows,
            vec![RenderedRow::Placeholder {
                message: "No student records found."
            }]
        );
    }

    #[test]
    fn test_rows_follow_list_order_with_both_actions() {
        let list = two_records();
        let rendered = Renderer::default().render(&list);

        assert_eq!(rendered.record_count(), 2);
        match &rendered.rows[1] {
            RenderedRow::Record {
                position,
                key,
                name,
                actions,
                ..
            } => {
                assert_eq!(*position, 1);
                assert_eq!(Some(*key), list.key_at(1));
                assert_eq!(name, "John Roe");
                assert_eq!(actions, &[RowAction::Edit, RowAction::Delete]);
            }
            RenderedRow::Placeholder { .. } => panic!("expected a record row"),
        }
    }

    #[test]
    fn test_render_is_idempotent() {
        let list = two_records();
        let renderer = Renderer::default();
        assert_eq!(renderer.render(&list), renderer.render(&list));
    }

    #[test]
    fn test_scrollable_toggle() {
        let list = two_records();

        // 2 rows * 40 = 80
        assert!(!renderer(80, 40).render(&list).scrollable);
        assert!(renderer(79, 40).render(&list).scrollable);
        // Placeholder is one row
        assert!(renderer(39, 40).render(&RecordList::new()).scrollable);
    }

    #[test]
    fn test_to_plain() {
        let plain = Renderer::default().render(&two_records()).to_plain();
        assert_eq!(
            plain,
            "1. Jane Doe | 101 | jane@x.com | 1234567890\n\
             2. John Roe | 102 | john@x.com | 5555555555\n"
        );
    }

    #[test]
    fn test_to_plain_placeholder() {
        let plain = Renderer::default().render(&RecordList::new()).to_plain();
        assert_eq!(plain, "No student records found.\n");
    }

    #[test]
    fn test_to_table_aligns_columns() {
        let table = Renderer::default().render(&two_records()).to_table();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("#  Name"));
        assert!(lines[1].starts_with("-  ----"));
        assert!(lines[2].contains("Jane Doe"));
        assert!(lines[2].ends_with("Edit Delete"));
        let email_col = lines[0].find("Email").unwrap();
        assert_eq!(lines[2].find("jane@x.com"), Some(email_col));
        assert_eq!(lines[3].find("john@x.com"), Some(email_col));
    }

    #[test]
    fn test_to_table_empty() {
        let table = Renderer::default().render(&RecordList::new()).to_table();
        assert!(table.ends_with("No student records found.\n"));
    }

    #[test]
    fn test_to_json() {
        let json = Renderer::default().render(&two_records()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["scrollable"], false);
        assert_eq!(value["rows"][0]["kind"], "record");
        assert_eq!(value["rows"][0]["email"], "jane@x.com");
        assert_eq!(value["rows"][0]["actions"][1], "delete");
    }

    #[test]
    fn test_row_action_labels() {
        assert_eq!(RowAction::Edit.label(), "Edit");
        assert_eq!(RowAction::Delete.label(), "Delete");
    }
}
