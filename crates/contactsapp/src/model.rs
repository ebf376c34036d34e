//! # Core Data Types
//!
//! - [`Contact`]: a persisted person record, owned by the backend.
//! - [`ContactFormData`]: the edit buffer for create/edit forms (no `id`).
//! - [`ContactPatch`]: a partial update; every field optional.
//! - [`ContactsResponse`]: one page of query results plus counts.
//!
//! ## Identifiers
//!
//! Backends disagree on the type of `id`: json-server style backends assign
//! numbers, others assign strings. [`ContactId`] accepts both on the wire and
//! holds the value as a string. Numeric ids are written back as numbers so a
//! full-replace `PUT` does not change the record's id type.
//!
//! Display order is descending by id using a numeric-aware comparison, so
//! `"10"` sorts above `"9"`. See [`natural_cmp`] and [`sort_for_display`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(String);

impl ContactId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn as_number(&self) -> Option<u64> {
        let n: u64 = self.0.parse().ok()?;
        (n.to_string() == self.0).then_some(n)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContactId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for ContactId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl Serialize for ContactId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_number() {
            Some(n) => serializer.serialize_u64(n),
            None => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for ContactId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => ContactId::from(n),
            RawId::Text(s) => ContactId(s),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub favourite: bool,
}

impl Contact {
    pub fn from_form(id: ContactId, form: ContactFormData) -> Self {
        Self {
            id,
            name: form.name,
            email: form.email,
            phone: form.phone,
            address: form.address,
            favourite: form.favourite,
        }
    }

    pub fn form(&self) -> ContactFormData {
        ContactFormData {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            favourite: self.favourite,
        }
    }

    /// Overwrites the fields present in `patch`, keeping everything else.
    pub fn apply(&mut self, patch: &ContactPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(phone) = &patch.phone {
            self.phone = phone.clone();
        }
        if let Some(address) = &patch.address {
            self.address = address.clone();
        }
        if let Some(favourite) = patch.favourite {
            self.favourite = favourite;
        }
    }

    pub fn merged(&self, patch: &ContactPatch) -> Self {
        let mut merged = self.clone();
        merged.apply(patch);
        merged
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub favourite: bool,
}

impl ContactFormData {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            address: address.into(),
            favourite: false,
        }
    }

    pub fn with_favourite(mut self, favourite: bool) -> Self {
        self.favourite = favourite;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favourite: Option<bool>,
}

impl ContactPatch {
    pub fn favourite(favourite: bool) -> Self {
        Self {
            favourite: Some(favourite),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.favourite.is_none()
    }
}

impl From<ContactFormData> for ContactPatch {
    fn from(form: ContactFormData) -> Self {
        Self {
            name: Some(form.name),
            email: Some(form.email),
            phone: Some(form.phone),
            address: Some(form.address),
            favourite: Some(form.favourite),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactsResponse {
    pub data: Vec<Contact>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
}

impl ContactsResponse {
    pub fn new(data: Vec<Contact>, total: usize, page: usize, limit: usize) -> Self {
        Self {
            data,
            total,
            page,
            limit,
            total_pages: total.div_ceil(limit.max(1)),
        }
    }

    /// Pagination controls are only shown when there is more than one page.
    pub fn has_pagination(&self) -> bool {
        self.total_pages > 1
    }
}

/// Parameters of one list query. Also the identity of its cached result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContactQuery {
    pub page: usize,
    pub limit: usize,
    pub search: String,
    pub favourite_only: bool,
}

impl ContactQuery {
    /// Builds a query, clamping `page` and `limit` to at least 1.
    pub fn new(page: usize, limit: usize, search: impl Into<String>, favourite_only: bool) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            search: search.into(),
            favourite_only,
        }
    }

    /// Start of the index range `[(page-1)*limit, page*limit)`. Saturates, so
    /// an absurd page lands past the end instead of overflowing.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Fields that must be unique across all live contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    Phone,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueField::Email => write!(f, "email"),
            UniqueField::Phone => write!(f, "phone"),
        }
    }
}

/// Compares two strings treating runs of ASCII digits as numbers.
///
/// `"10"` > `"9"`, `"a2"` < `"a10"`. Non-digit runs compare case-insensitively,
/// falling back to a byte comparison to keep the order total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let ln = take_digits(&mut left);
                let rn = take_digits(&mut right);
                let ord = compare_digit_runs(&ln, &rn);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                let ord = l.to_lowercase().cmp(r.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Sorts contacts newest-first: descending id, numeric-aware.
pub fn sort_for_display(contacts: &mut [Contact]) {
    contacts.sort_by(|a, b| natural_cmp(b.id.as_str(), a.id.as_str()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: &str) -> Contact {
        Contact::from_form(
            ContactId::from(id),
            ContactFormData::new("A", "a@x.com", "111-111-1111", "X"),
        )
    }

    #[test]
    fn test_descending_numeric_aware_sort() {
        let mut contacts = vec![contact("2"), contact("10"), contact("1")];
        sort_for_display(&mut contacts);
        let ids: Vec<&str> = contacts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["10", "2", "1"]);
    }

    #[test]
    fn test_natural_cmp_mixed() {
        assert_eq!(natural_cmp("a2", "a10"), Ordering::Less);
        assert_eq!(natural_cmp("9", "10"), Ordering::Less);
        assert_eq!(natural_cmp("abc", "abd"), Ordering::Less);
        assert_eq!(natural_cmp("7", "7"), Ordering::Equal);
    }

    #[test]
    fn test_patch_preserves_missing_fields() {
        let existing = contact("1");
        let merged = existing.merged(&ContactPatch::favourite(true));
        assert_eq!(merged.name, "A");
        assert_eq!(merged.email, "a@x.com");
        assert_eq!(merged.phone, "111-111-1111");
        assert_eq!(merged.address, "X");
        assert!(merged.favourite);
    }

    #[test]
    fn test_id_accepts_number_and_string() {
        let numeric: Contact = serde_json::from_str(
            r#"{"id":7,"name":"A","email":"a@x.com","phone":"111-111-1111","address":"X","favourite":false}"#,
        )
        .unwrap();
        assert_eq!(numeric.id.as_str(), "7");

        let text: Contact = serde_json::from_str(
            r#"{"id":"3f2a","name":"A","email":"a@x.com","phone":"111-111-1111","address":"X"}"#,
        )
        .unwrap();
        assert_eq!(text.id.as_str(), "3f2a");
        assert!(!text.favourite);
    }

    #[test]
    fn test_numeric_id_serializes_as_number() {
        let json = serde_json::to_value(contact("12")).unwrap();
        assert_eq!(json["id"], serde_json::json!(12));

        let json = serde_json::to_value(contact("007")).unwrap();
        assert_eq!(json["id"], serde_json::json!("007"));
    }

    #[test]
    fn test_offset_saturates() {
        assert_eq!(ContactQuery::new(3, 10, "", false).offset(), 20);
        assert_eq!(ContactQuery::new(usize::MAX, 10, "", false).offset(), usize::MAX);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(ContactsResponse::new(vec![], 0, 1, 10).total_pages, 0);
        assert_eq!(ContactsResponse::new(vec![], 10, 1, 10).total_pages, 1);
        assert_eq!(ContactsResponse::new(vec![], 11, 1, 10).total_pages, 2);
        assert!(!ContactsResponse::new(vec![], 10, 1, 10).has_pagination());
    }

    #[test]
    fn test_patch_serialization_skips_absent_fields() {
        let json = serde_json::to_string(&ContactPatch::favourite(true)).unwrap();
        assert_eq!(json, r#"{"favourite":true}"#);
    }
}
