#[cfg(test)]
#[path = "./utils.tests.rs"]
mod utils_tests;

/// Truncates a string slice to the new length.
pub fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncates a string slice to the new length, marking the cut with `…`.
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }

    match s.char_indices().nth(max_chars) {
        Some(_) => format!("{}…", truncate(s, max_chars - 1)),
        None => s.to_owned(),
    }
}

/// Adds padding to the string slice.
pub fn add_padding(s: &str, width: usize) -> String {
    let name_width = s.chars().count();

    let mut text = String::with_capacity(width);
    text.push_str(truncate(s, width));

    let padding_len = width.saturating_sub(name_width);
    text.extend(std::iter::repeat_n(' ', padding_len));

    text
}

/// Returns the widest cell (in chars) for each column, header included.
pub fn column_widths<S: AsRef<str>>(header: &[&str], rows: &[Vec<S>]) -> Vec<usize> {
    let mut widths = header.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.as_ref().chars().count());
        }
    }

    widths
}

/// Renders rows as a plain text table with columns separated by `gap` spaces.\
/// **Note** that trailing whitespace of every line is trimmed.
pub fn render_table<S: AsRef<str>>(header: &[&str], rows: &[Vec<S>], gap: usize) -> String {
    let widths = column_widths(header, rows);
    let separator = " ".repeat(gap);

    let mut result = render_line(header.iter().copied(), &widths, &separator);
    for row in rows {
        result.push_str(&render_line(row.iter().map(AsRef::as_ref), &widths, &separator));
    }

    result
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize], separator: &str) -> String {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| add_padding(cell, *width))
        .collect::<Vec<_>>()
        .join(separator);

    let mut line = line.trim_end().to_owned();
    line.push('\n');
    line
}
