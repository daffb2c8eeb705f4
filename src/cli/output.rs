//! Terminal output for genreguide commands
//!
//! Parse results go to stdout uncolored so they can be piped. Status lines
//! are colored; NO_COLOR, CLICOLOR and CLICOLOR_FORCE are honored, and
//! `--no-color` turns color off entirely.

use colored::Colorize;

/// Report a failed command on stderr.
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Note a record the catalog skipped, on stderr.
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Summary line when every record of a file parsed.
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// One rejected record with its line number and parse error.
pub fn failure(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {} {}", "✗".red(), msg);
}

/// A labelled value, e.g. a config file location.
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Heading above a list of rejected records.
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Indented expression text under a rejected record.
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Command data: trees, wire JSON, flat tokens, catalog lines, names.
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}
