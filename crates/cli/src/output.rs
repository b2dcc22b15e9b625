/// Lay out items in columns fitting the given display width.
///
/// Items are ordered down the columns, then across, like classic
/// `ls`-style listings. Always emits at least one column.
pub fn columnize(items: &[String], width: usize) -> String {
    if items.is_empty() {
        return String::new();
    }

    let col_width = items.iter().map(String::len).max().unwrap_or(0) + 2;
    let columns = (width / col_width).max(1);
    let rows = items.len().div_ceil(columns);

    let mut out = String::new();
    for row in 0..rows {
        let mut line = String::new();
        for col in 0..columns {
            if let Some(item) = items.get(col * rows + row) {
                line.push_str(&format!("{item:<col_width$}"));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
