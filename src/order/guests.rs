//! Guest lists and the fixed guest slots booking requests carry.

use crate::error::{Error, Result};
use crate::transport::Query;
use serde::{Deserialize, Serialize};

/// Guest slots per kind in a booking request.
pub const MAX_GUESTS_PER_KIND: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestKind {
    Adult,
    Child,
}

/// A traveller named on a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub kind: GuestKind,
    pub first_name: String,
    pub last_name: String,
    /// Age at check-in; only sent for children
    pub age: Option<u32>,
}

impl Guest {
    pub fn adult(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self { kind: GuestKind::Adult, first_name: first_name.into(), last_name: last_name.into(), age: None }
    }

    pub fn child(first_name: impl Into<String>, last_name: impl Into<String>, age: u32) -> Self {
        Self { kind: GuestKind::Child, first_name: first_name.into(), last_name: last_name.into(), age: Some(age) }
    }
}

/// Replaces accented Latin vowels and cedillas with their ASCII base letter.
///
/// Other characters pass through untouched, so the result of a second pass is
/// always identical to the first.
pub fn format_name(name: &str) -> String {
    name.chars().map(fold).collect()
}

fn fold(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ä' => 'a',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'À' | 'Á' | 'Â' | 'Ä' => 'A',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'Ò' | 'Ó' | 'Ô' | 'Ö' => 'O',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'Ç' => 'C',
        other => other,
    }
}

/// Writes all adult and child slots, filling the first ones from `guests`.
///
/// Unused slots go out as empty strings whatever the query's empty-field
/// policy; the service reads them positionally.
pub(crate) fn write_slots(query: &mut Query, guests: &[Guest]) -> Result<()> {
    let (adults, children): (Vec<&Guest>, Vec<&Guest>) =
        guests.iter().partition(|g| g.kind == GuestKind::Adult);

    for (kind, count) in [("adult", adults.len()), ("child", children.len())] {
        if count > MAX_GUESTS_PER_KIND {
            return Err(Error::invalid(format!(
                "{} {} guests given, at most {} allowed",
                count, kind, MAX_GUESTS_PER_KIND
            )));
        }
    }

    for n in 1..=MAX_GUESTS_PER_KIND {
        let adult = adults.get(n - 1);
        query
            .set_or_empty(&format!("adultGuest{n}FirstName"), adult.map(|g| format_name(&g.first_name)))
            .set_or_empty(&format!("adultGuest{n}LastName"), adult.map(|g| format_name(&g.last_name)));
    }

    for n in 1..=MAX_GUESTS_PER_KIND {
        let child = children.get(n - 1);
        query
            .set_or_empty(&format!("childrenGuest{n}FirstName"), child.map(|g| format_name(&g.first_name)))
            .set_or_empty(&format!("childrenGuest{n}LastName"), child.map(|g| format_name(&g.last_name)))
            .set_or_empty(&format!("childrenGuestAge{n}"), child.and_then(|g| g.age));
    }

    Ok(())
}
