use crate::api::models::ConnectorRecord;
use comfy_table::{Cell, Color, Table, presets};
use crossterm::terminal;
use unicode_width::UnicodeWidthChar;

/// Formatter for the console connector table
pub struct TableDisplay {
    max_width: Option<usize>,
    use_colors: bool,
}

impl TableDisplay {
    pub fn new() -> Self {
        Self {
            max_width: Self::detect_terminal_width(),
            use_colors: true,
        }
    }

    /// Detect terminal width
    fn detect_terminal_width() -> Option<usize> {
        match terminal::size() {
            Ok((cols, _rows)) => {
                let width = cols as usize;
                // Clamp for stability on tiny or very wide terminals
                Some(width.clamp(40, 200))
            }
            Err(_) => Some(80), // Default width
        }
    }

    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Render the collected connectors as a table.
    pub fn render_connector_table(&self, records: &[ConnectorRecord]) -> String {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL_CONDENSED);
        table.set_header(vec![
            "FQDN",
            "Type",
            "Location",
            "Version",
            "Expected",
            "Status",
            "Maint",
            "Last contact",
        ]);

        // Cap the widest column so the table survives narrow terminals.
        let fqdn_width = self.max_width.map(|w| (w / 3).max(16)).unwrap_or(48);

        for record in records {
            let status_cell = self.status_cell(&record.status);
            table.add_row(vec![
                Cell::new(truncate_to_width(&record.fqdn, fqdn_width)),
                Cell::new(record.connector_type),
                Cell::new(truncate_to_width(&record.location, 24)),
                Cell::new(record.current_version.as_deref().unwrap_or("-")),
                Cell::new(record.expected_version.as_deref().unwrap_or("-")),
                status_cell,
                Cell::new(if record.in_maintenance { "yes" } else { "no" }),
                Cell::new(record.last_contact_date.as_deref().unwrap_or("-")),
            ]);
        }

        table.to_string()
    }

    fn status_cell(&self, status: &str) -> Cell {
        if !self.use_colors {
            return Cell::new(status);
        }
        match status {
            "Connected" => Cell::new(status).fg(Color::Green),
            "Disconnected" => Cell::new(status).fg(Color::Red),
            _ => Cell::new(status).fg(Color::Yellow),
        }
    }
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncate a string to a display width, appending an ellipsis when cut.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut result = String::new();

    for c in text.chars() {
        let char_width = c.width().unwrap_or(0);
        if width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        width += char_width;
        result.push(c);
    }

    result
}
