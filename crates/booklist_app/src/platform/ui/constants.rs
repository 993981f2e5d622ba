pub const HEADING: &str = "Hacker Stories";
pub const SEARCH_LABEL: &str = "Search: ";
pub const LOADING_TEXT: &str = "Loading ...";
pub const ERROR_TEXT: &str = "Something went wrong ...";
pub const EMPTY_TEXT: &str = "No stories match the search.";
pub const HELP_TEXT: &str = "Type to search, /remove <id>, /reload, /quit";
pub const RULE: &str = "----------------------------------------";
