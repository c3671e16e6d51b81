//! Rendering primitives for CLI output.

use comfy_table::presets::NOTHING;
use comfy_table::{Attribute, Cell, ContentArrangement, Table as ComfyTable};
use owo_colors::OwoColorize;

use super::context::UiContext;

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let label = format!("{}:", key);
        if ctx.color {
            format!("{} {}", label.dimmed(), value)
        } else {
            format!("{} {}", label, value)
        }
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a status value, coloured by how far along the delivery is.
pub fn status(ctx: &UiContext, value: &str) -> String {
    if !ctx.color {
        return value.to_string();
    }
    match value.to_ascii_lowercase().as_str() {
        "delivered" => value.green().to_string(),
        "lost" | "returned" | "failed" | "cancelled" => value.red().to_string(),
        _ => value.yellow().to_string(),
    }
}

/// Render a borderless table with a dim header.
///
/// Pretty mode: aligned columns with header
/// Plain mode: tab-separated values, no header
pub fn table(ctx: &UiContext, headers: &[&str], rows: &[Vec<String>]) -> String {
    if ctx.mode.is_pretty() {
        let mut table = ComfyTable::new();
        table.load_preset(NOTHING);
        table.set_content_arrangement(ContentArrangement::Dynamic);

        let header_cells: Vec<Cell> = headers
            .iter()
            .map(|h| {
                let cell = Cell::new(h);
                if ctx.color {
                    cell.add_attribute(Attribute::Dim)
                } else {
                    cell
                }
            })
            .collect();
        table.set_header(header_cells);

        for i in 0..headers.len() {
            if let Some(column) = table.column_mut(i) {
                column.set_padding((0, 2));
            }
        }
        for row in rows {
            table.add_row(row);
        }
        table.to_string()
    } else {
        rows.iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kv_plain_uses_snake_case_keys() {
        assert_eq!(
            kv(&UiContext::plain(), "Delivery Time", "0"),
            "delivery_time=0"
        );
    }

    #[test]
    fn test_kv_pretty() {
        assert_eq!(kv(&UiContext::pretty(), "Status", "delivered"), "Status: delivered");
    }

    #[test]
    fn test_status_without_color_is_unchanged() {
        assert_eq!(status(&UiContext::plain(), "delivered"), "delivered");
    }

    #[test]
    fn test_plain_table_has_no_header() {
        let rows = vec![
            vec!["1".to_string(), "dispatched".to_string()],
            vec!["2".to_string(), "delivered".to_string()],
        ];
        let out = table(&UiContext::plain(), &["ID", "STATUS"], &rows);
        assert_eq!(out, "1\tdispatched\n2\tdelivered");
    }

    #[test]
    fn test_plain_table_keeps_spaces_inside_cells() {
        let rows = vec![vec!["1".to_string(), "Charlie Brown".to_string(), "in transit".to_string()]];
        let out = table(&UiContext::plain(), &["ID", "SENDER", "STATUS"], &rows);
        let cells: Vec<&str> = out.split('\t').collect();
        assert_eq!(cells, ["1", "Charlie Brown", "in transit"]);
    }

    #[test]
    fn test_pretty_table_includes_header() {
        let rows = vec![vec!["1".to_string(), "dispatched".to_string()]];
        let out = table(&UiContext::pretty(), &["ID", "STATUS"], &rows);
        assert!(out.contains("STATUS"));
        assert!(out.contains("dispatched"));
    }
}
