//! Plain-text rendering of the form and the records table.

use book_core::{view, EditBuffer, Mode, Outcome, TableBody, TABLE_HEADERS};

pub fn form(mode: Mode, buffer: &EditBuffer) -> String {
    let mut out = String::new();
    let tabs: Vec<String> = Mode::ALL
        .iter()
        .map(|m| {
            if *m == mode {
                format!("[{m}]")
            } else {
                format!(" {m} ")
            }
        })
        .collect();
    out.push_str(&format!("{}\n", tabs.join(" ")));
    out.push_str(&format!("-- {} --\n", mode.title()));
    for field in view::editable_fields(mode) {
        let label = format!("{}:", field.label());
        out.push_str(&format!("  {label:<7} {}\n", buffer.get(*field)));
    }
    out
}

pub fn table(body: &TableBody) -> String {
    let rows: &[[String; 6]] = match body {
        TableBody::Rows(rows) => rows,
        TableBody::Placeholder(_) => &[],
    };
    let mut widths = TABLE_HEADERS.map(str::len);
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    line(&mut out, &TABLE_HEADERS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    line(&mut out, &rule, &widths);
    match body {
        TableBody::Rows(_) => {
            for row in rows {
                line(&mut out, row, &widths);
            }
        }
        TableBody::Placeholder(text) => {
            out.push_str(text);
            out.push('\n');
        }
    }
    out
}

fn line<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize; 6]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<w$}", c.as_ref(), w = *w))
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}

/// One-line banner for an action's outcome, if there is anything to say.
pub fn outcome(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Refreshed => None,
        Outcome::RefreshFailed(e) => Some(format!("! could not load books ({e}); showing last known list")),
        Outcome::Done(notice) => Some(format!("ok: {notice}")),
        Outcome::Rejected(notice) => Some(format!("! {notice}")),
        Outcome::Busy => Some("! a previous submit is still running".to_string()),
        Outcome::Failed(e) => Some(format!("! request failed: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use book_core::{ApiError, Book, FieldValue, Notice};

    #[test]
    fn form_lists_fields_of_the_active_mode() {
        let buffer = EditBuffer {
            id: "4".to_string(),
            title: "Dune".to_string(),
            ..EditBuffer::default()
        };
        let add = form(Mode::Add, &buffer);
        assert!(add.starts_with("[add]"));
        assert!(add.contains("Title:  Dune"));
        assert!(!add.contains("ID:"));

        let delete = form(Mode::Delete, &buffer);
        assert!(delete.contains("[delete]"));
        assert!(delete.contains("ID:     4"));
        assert!(!delete.contains("Title:"));
    }

    #[test]
    fn form_text_has_one_line_per_field() {
        let buffer = EditBuffer {
            id: "1".to_string(),
            ..EditBuffer::default()
        };
        assert_eq!(
            form(Mode::Delete, &buffer),
            " add   update  [delete]\n-- Delete Book --\n  ID:     1\n"
        );
    }

    #[test]
    fn empty_table_shows_placeholder_row() {
        let text = table(&TableBody::Placeholder("No books available"));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID | Title"));
        assert_eq!(lines[2], "No books available");
    }

    #[test]
    fn table_pads_columns() {
        let book = Book {
            id: FieldValue::from(12_u64),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            genre: String::new(),
            year: FieldValue::from(1965_u64),
            rating: FieldValue::from("5"),
        };
        let text = table(&book_core::view::table_rows(&[book]));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ID | Title | Author        | Genre | Year | Rating");
        assert_eq!(lines[2], "12 | Dune  | Frank Herbert |       | 1965 | 5");
    }

    #[test]
    fn outcome_banners() {
        assert_eq!(outcome(&Outcome::Refreshed), None);
        assert_eq!(
            outcome(&Outcome::Done(Notice::Added)).as_deref(),
            Some("ok: Book added successfully!")
        );
        assert_eq!(
            outcome(&Outcome::Failed(ApiError::NotFound)).as_deref(),
            Some("! request failed: resource not found")
        );
    }
}
