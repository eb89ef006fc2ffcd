//! Plain-text catalog preview.

use std::fmt::Write;

use ccnews_core::Catalog;

/// Render the first `limit` catalog entries as an aligned table.
///
/// ```text
/// First 2 WARC filepaths:
/// Date     Timestamp          ID
/// 2025/07  20250701004326  02814
/// 2025/07  20250701010000  02815
/// ...3 more
/// ```
pub fn render_catalog_table(catalog: &Catalog, limit: usize) -> String {
    if catalog.is_empty() {
        return "No WARC filepaths.".to_string();
    }

    let header = ["Date", "Timestamp", "ID"];
    let rows: Vec<[String; 3]> = catalog
        .files
        .iter()
        .take(limit)
        .map(|f| {
            [
                format!("{}/{}", f.year, f.month),
                f.timestamp.clone(),
                f.id.clone(),
            ]
        })
        .collect();

    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }
    let [w0, w1, w2] = widths;

    let mut out = format!("First {} WARC filepaths:", rows.len());
    let _ = write!(out, "\n{:<w0$}  {:<w1$}  {:>w2$}", header[0], header[1], header[2]);
    for [date, timestamp, id] in &rows {
        let _ = write!(out, "\n{date:<w0$}  {timestamp:<w1$}  {id:>w2$}");
    }

    let remaining = catalog.len().saturating_sub(rows.len());
    if remaining > 0 {
        let _ = write!(out, "\n...{remaining} more");
    }
    out
}
