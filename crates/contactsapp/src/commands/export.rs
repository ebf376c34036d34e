//! CSV and vCard export.
//!
//! Encoders are pure: they turn a contact list into text in input order.
//! [`run`] writes the text to `contacts.csv` or `contacts.vcf` in a target
//! directory, and does nothing when there are no contacts.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ContactsError, Result};
use crate::model::Contact;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

const CSV_HEADER: [&str; 5] = ["Name", "Email", "Phone", "Address", "Favourite"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Vcf,
}

impl ExportFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "contacts.csv",
            ExportFormat::Vcf => "contacts.vcf",
        }
    }

    pub fn encode(&self, contacts: &[Contact]) -> Result<String> {
        match self {
            ExportFormat::Csv => encode_csv(contacts),
            ExportFormat::Vcf => Ok(encode_vcf(contacts)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Vcf => write!(f, "vcf"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ContactsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "vcf" | "vcard" => Ok(ExportFormat::Vcf),
            other => Err(ContactsError::Api(format!(
                "Unknown export format '{}', expected csv or vcf",
                other
            ))),
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Every field, header included, is quoted with embedded quotes doubled.
/// Records are separated by `\n`; the last one has no terminator.
pub fn encode_csv(contacts: &[Contact]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for contact in contacts {
        writer.write_record([
            contact.name.as_str(),
            contact.email.as_str(),
            contact.phone.as_str(),
            contact.address.as_str(),
            yes_no(contact.favourite),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ContactsError::Api(format!("CSV encoding failed: {}", e)))?;
    let mut out = String::from_utf8(bytes)
        .map_err(|e| ContactsError::Api(format!("CSV encoding failed: {}", e)))?;
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}

pub fn encode_vcf(contacts: &[Contact]) -> String {
    contacts
        .iter()
        .map(vcard)
        .collect::<Vec<_>>()
        .join("\n")
}

fn vcard(contact: &Contact) -> String {
    format!(
        "BEGIN:VCARD\nVERSION:3.0\nFN:{}\nEMAIL:{}\nTEL:{}\nADR:{}\nNOTE:Favourite: {}\nEND:VCARD",
        contact.name,
        contact.email,
        contact.phone,
        contact.address,
        yes_no(contact.favourite)
    )
}

pub fn run(contacts: &[Contact], format: ExportFormat, dir: &Path) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if contacts.is_empty() {
        result.add_message(CmdMessage::info("No contacts to export."));
        return Ok(result);
    }

    let payload = format.encode(contacts)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(format.file_name());
    fs::write(&path, payload)?;
    info!(
        "[export] wrote {} contacts to {}",
        contacts.len(),
        path.display()
    );

    result.add_message(CmdMessage::success(format!(
        "Exported {} contacts to {}",
        contacts.len(),
        path.display()
    )));
    result.exported_path = Some(path);
    Ok(result.with_affected_contacts(contacts.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContactFormData, ContactId};
    use tempfile::tempdir;

    fn jo() -> Contact {
        Contact::from_form(
            ContactId::from(1),
            ContactFormData::new("Jo \"JJ\" Doe", "j@x.com", "111-222-3333", "1 Main St")
                .with_favourite(true),
        )
    }

    fn bob() -> Contact {
        Contact::from_form(
            ContactId::from(2),
            ContactFormData::new("Bob", "b@x.com", "111-222-4444", "2, High St"),
        )
    }

    #[test]
    fn csv_quotes_every_field() {
        let csv = encode_csv(&[jo()]).unwrap();
        assert_eq!(
            csv,
            "\"Name\",\"Email\",\"Phone\",\"Address\",\"Favourite\"\n\
             \"Jo \"\"JJ\"\" Doe\",\"j@x.com\",\"111-222-3333\",\"1 Main St\",\"Yes\""
        );
    }

    #[test]
    fn csv_keeps_input_order() {
        let csv = encode_csv(&[bob(), jo()]).unwrap();
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], r#""Bob","b@x.com","111-222-4444","2, High St","No""#);
        assert!(lines[2].starts_with(r#""Jo "#));
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn vcf_block_layout() {
        let vcf = encode_vcf(&[jo(), bob()]);
        let expected_first = "BEGIN:VCARD\nVERSION:3.0\nFN:Jo \"JJ\" Doe\nEMAIL:j@x.com\n\
                              TEL:111-222-3333\nADR:1 Main St\nNOTE:Favourite: Yes\nEND:VCARD";
        assert!(vcf.starts_with(expected_first));
        assert_eq!(vcf.matches("BEGIN:VCARD").count(), 2);
        assert!(vcf.contains("END:VCARD\nBEGIN:VCARD"));
        assert!(vcf.ends_with("NOTE:Favourite: No\nEND:VCARD"));
    }

    #[test]
    fn empty_export_writes_nothing() {
        let dir = tempdir().unwrap();
        for format in [ExportFormat::Csv, ExportFormat::Vcf] {
            let result = run(&[], format, dir.path()).unwrap();
            assert!(result.exported_path.is_none());
            assert_eq!(result.messages[0].content, "No contacts to export.");
            assert!(!dir.path().join(format.file_name()).exists());
        }
    }

    #[test]
    fn export_writes_fixed_file_name() {
        let dir = tempdir().unwrap();
        let result = run(&[jo()], ExportFormat::Vcf, dir.path()).unwrap();
        let path = result.exported_path.unwrap();
        assert_eq!(path, dir.path().join("contacts.vcf"));
        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(written, encode_vcf(&[jo()]));
    }

    #[test]
    fn format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("vcard".parse::<ExportFormat>().unwrap(), ExportFormat::Vcf);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
