use booklist_core::{AppViewModel, Book};

use super::constants::*;

/// Renders the whole screen as text.
///
/// An error takes precedence over the loading indicator and the rows.
pub fn render(view: &AppViewModel) -> String {
    let mut lines = vec![
        HEADING.to_string(),
        String::new(),
        format!("{SEARCH_LABEL}{}", view.search_term),
        RULE.to_string(),
    ];

    if view.error {
        match &view.error_message {
            Some(message) => lines.push(format!("{ERROR_TEXT} ({message})")),
            None => lines.push(ERROR_TEXT.to_string()),
        }
    } else if view.loading {
        lines.push(LOADING_TEXT.to_string());
    }

    if !view.error {
        if view.books.is_empty() && !view.loading {
            lines.push(EMPTY_TEXT.to_string());
        }
        lines.extend(view.books.iter().map(render_item));
        if view.total_count > 0 {
            lines.push(format!(
                "Showing {} of {}",
                view.books.len(),
                view.total_count
            ));
        }
    }

    lines.push(RULE.to_string());
    lines.push(HELP_TEXT.to_string());
    lines.join("\n")
}

fn render_item(book: &Book) -> String {
    format!(
        "[{}] {} <{}> | {} | {} comments | {} points",
        book.id, book.title, book.url, book.author, book.num_comments, book.points
    )
}
