//! Terminal output.
//!
//! Results go to stdout, errors and hints to stderr. Colors come from
//! `colored`, which already turns itself off when stdout is not a terminal or
//! `NO_COLOR` is set.

use colored::*;
use contactsapp::commands::{CmdMessage, MessageLevel};
use contactsapp::error::ContactsError;
use contactsapp::model::{Contact, ContactsResponse};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const DEFAULT_LINE_WIDTH: usize = 100;
const FAVOURITE_MARKER: &str = "★";
const EMAIL_WIDTH: usize = 28;
const PHONE_WIDTH: usize = 12;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn line_width() -> usize {
    console::Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols as usize)
        .unwrap_or(DEFAULT_LINE_WIDTH)
}

pub fn print_contacts(contacts: &[Contact], search: &str, favourites_only: bool, dark_mode: bool) {
    if contacts.is_empty() {
        println!("{}", empty_list_message(search, favourites_only).dimmed());
        return;
    }

    let width = line_width();
    for contact in contacts {
        let (marker, id, name, rest) = contact_row(contact, width);
        let marker = if contact.favourite {
            marker.yellow()
        } else {
            marker.normal()
        };
        let name = if dark_mode { name.bright_white() } else { name.normal() };
        println!("{}{}{}{}", marker, id.dimmed(), name.bold(), rest.dimmed());
    }
}

/// What to say when a list comes back empty, matching the active filters.
pub fn empty_list_message(search: &str, favourites_only: bool) -> String {
    match (search.is_empty(), favourites_only) {
        (true, false) => "No contacts yet. Add one with `contacts add`.".to_string(),
        (true, true) => "No favourite contacts.".to_string(),
        (false, false) => format!("No contacts match \"{}\".", search),
        (false, true) => format!("No favourite contacts match \"{}\".", search),
    }
}

/// Splits a row into marker, id, name and trailing columns, without colors.
/// The name column absorbs whatever width the fixed columns leave.
pub fn contact_row(contact: &Contact, line_width: usize) -> (String, String, String, String) {
    let marker = if contact.favourite {
        format!("  {} ", FAVOURITE_MARKER)
    } else {
        "    ".to_string()
    };
    let id = format!("{}. ", contact.id);
    let rest = format!(
        "  {:<email$}  {:<phone$}",
        truncate_to_width(&contact.email, EMAIL_WIDTH),
        contact.phone,
        email = EMAIL_WIDTH,
        phone = PHONE_WIDTH
    );

    let fixed = marker.width() + id.width() + rest.width();
    let available = line_width.saturating_sub(fixed).max(8);
    let name = truncate_to_width(&contact.name, available);
    let padding = available.saturating_sub(name.width());

    (marker, id, format!("{}{}", name, " ".repeat(padding)), rest)
}

pub fn print_contact_detail(contact: &Contact) {
    let star = if contact.favourite {
        format!(" {}", FAVOURITE_MARKER).yellow()
    } else {
        "".normal()
    };
    println!("{} {}{}", contact.id.to_string().yellow(), contact.name.bold(), star);
    println!("--------------------------------");
    for (label, value) in [
        ("Email", &contact.email),
        ("Phone", &contact.phone),
        ("Address", &contact.address),
    ] {
        println!("{}{}", format!("{:<10}", label).dimmed(), value);
    }
}

/// Only shown when there is more than one page.
pub fn pagination_line(page: &ContactsResponse) -> Option<String> {
    if !page.has_pagination() {
        return None;
    }
    let mut hints = Vec::new();
    if page.page > 1 {
        hints.push("prev");
    }
    if page.page < page.total_pages {
        hints.push("next");
    }
    let hints = if hints.is_empty() {
        String::new()
    } else {
        format!("  ({})", hints.join(" | "))
    };
    Some(format!(
        "Page {} of {}, {} contacts{}",
        page.page, page.total_pages, page.total, hints
    ))
}

pub fn print_pagination(page: &ContactsResponse) {
    if let Some(line) = pagination_line(page) {
        println!();
        println!("{}", line.dimmed());
    }
}

pub fn print_retry_hint() {
    eprintln!("{}", "Could not load contacts. Run the command again to retry.".yellow());
}

/// Prints `Error: <message>` to stderr. Validation failures list every field
/// first.
pub fn report_error(err: &anyhow::Error) {
    if let Some(ContactsError::Validation(errors)) = err.downcast_ref::<ContactsError>() {
        for field_error in &errors.errors {
            eprintln!(
                "  {} {}",
                format!("{}:", field_error.field).red(),
                field_error.message
            );
        }
    }
    eprintln!("Error: {}", err);
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
