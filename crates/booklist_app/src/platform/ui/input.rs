use booklist_core::BookId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Search(String),
    Remove(BookId),
    Reload,
    Quit,
    Invalid(String),
}

/// Interprets one line typed by the user. Anything that is not a slash command
/// becomes the new search term, verbatim.
pub fn parse_line(line: &str) -> ShellCommand {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.strip_prefix('/') else {
        return ShellCommand::Search(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("quit" | "q"), None, None) => ShellCommand::Quit,
        (Some("reload"), None, None) => ShellCommand::Reload,
        (Some("remove" | "rm"), Some(id), None) => match id.parse() {
            Ok(id) => ShellCommand::Remove(id),
            Err(_) => ShellCommand::Invalid(format!("not a book id: {id}")),
        },
        _ => ShellCommand::Invalid(format!("unknown command: /{command}")),
    }
}
