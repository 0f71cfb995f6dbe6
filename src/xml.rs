//! Response envelope handling shared by every parser.
//!
//! Every reply is either the service's top-level error document (root
//! `SearchResponse`) or an endpoint-specific result document. Booking
//! endpoints can additionally embed an `<Error>` element inside a result
//! document. Raw XML types stay private to the parsers; these helpers turn
//! text fields into typed values and report anything unexpected as
//! [`Error::Shape`].

use crate::error::{Error, Result, TransportError};
use crate::models::{CancellationPolicy, Note, Price};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use quick_xml::de::DeError;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt::Display;
use std::str::FromStr;
use tracing::warn;

/// Root element of the top-level error envelope.
pub(crate) const ERROR_ROOT: &str = "SearchResponse";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlErrorEnvelope {
    #[serde(rename = "ReturnStatus")]
    return_status: XmlReturnStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlReturnStatus {
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Exception")]
    exception: String,
}

/// `<Error>` element embedded in booking results.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct XmlInnerError {
    #[serde(rename = "ErrorType")]
    pub error_type: String,
    #[serde(rename = "Message")]
    pub message: String,
}

/// Returns the local name of the document's root element.
pub(crate) fn root_name(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return Ok(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Ok(Event::Eof) => {
                return Err(TransportError::Xml("document has no root element".into()).into());
            }
            Err(e) => {
                return Err(TransportError::Xml(format!(
                    "at position {}: {}",
                    reader.error_position(),
                    e
                ))
                .into());
            }
            _ => (),
        }
    }
}

/// Decodes a result document whose root element must be `expected_root`.
///
/// The error envelope fails with [`Error::Protocol`]; any other root (an HTML
/// error page, another operation's result) fails with [`Error::Shape`].
pub(crate) fn decode<T: DeserializeOwned>(xml: &str, expected_root: &str) -> Result<T> {
    let root = root_name(xml)?;
    if root == ERROR_ROOT {
        let envelope: XmlErrorEnvelope = quick_xml::de::from_str(xml).map_err(from_de)?;
        let status = envelope.return_status;
        let message = first_non_empty([status.exception, status.status])
            .unwrap_or_else(|| "unspecified remote error".to_string());
        warn!("Remote service rejected request: {}", message);
        return Err(Error::Protocol(message));
    }
    if root != expected_root {
        warn!("Expected <{}> response, got <{}>", expected_root, root);
        return Err(Error::shape(format!("expected <{}> document, got <{}>", expected_root, root)));
    }

    quick_xml::de::from_str(xml).map_err(from_de)
}

/// Fails with [`Error::Business`] if a result carries a non-empty `<Error>`.
pub(crate) fn check_inner(error: Option<XmlInnerError>) -> Result<()> {
    let Some(error) = error else {
        return Ok(());
    };

    match first_non_empty([error.message, error.error_type]) {
        Some(message) => {
            warn!("Booking operation rejected: {}", message);
            Err(Error::Business(message))
        }
        None => Ok(()),
    }
}

fn from_de(err: DeError) -> Error {
    match err {
        DeError::InvalidXml(e) => TransportError::Xml(e.to_string()).into(),
        other => Error::shape(format!("cannot decode response: {}", other)),
    }
}

fn first_non_empty<const N: usize>(candidates: [String; N]) -> Option<String> {
    candidates.into_iter().map(|s| s.trim().to_string()).find(|s| !s.is_empty())
}

/// Returns the trimmed text, treating empty elements as absent.
pub(crate) fn text(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}

/// Parses a field that must be present and well-formed.
pub(crate) fn required<T>(field: &str, value: &Option<String>) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    optional(field, value)?.ok_or_else(|| Error::shape(format!("missing `{}`", field)))
}

/// Parses a field that may be absent or empty.
pub(crate) fn optional<T>(field: &str, value: &Option<String>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match text(value) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| Error::shape(format!("invalid `{}` value {:?}: {}", field, raw, e))),
        None => Ok(None),
    }
}

/// Parses a boolean flag; the service uses both `true`/`false` and `1`/`0`.
pub(crate) fn flag(field: &str, value: &Option<String>) -> Result<bool> {
    match text(value).as_deref() {
        None => Ok(false),
        Some(raw) if raw.eq_ignore_ascii_case("true") || raw == "1" => Ok(true),
        Some(raw) if raw.eq_ignore_ascii_case("false") || raw == "0" => Ok(false),
        Some(raw) => Err(Error::shape(format!("invalid `{}` flag {:?}", field, raw))),
    }
}

/// Parses a date, ignoring any time part (`2024-06-01T00:00:00`).
pub(crate) fn date(field: &str, value: &Option<String>) -> Result<Option<NaiveDate>> {
    let Some(raw) = text(value) else {
        return Ok(None);
    };
    let day = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| Error::shape(format!("invalid `{}` date {:?}: {}", field, raw, e)))
}

/// Parses a timestamp with or without a UTC offset; the offset is dropped.
pub(crate) fn datetime(field: &str, value: &Option<String>) -> Result<Option<NaiveDateTime>> {
    let Some(raw) = text(value) else {
        return Ok(None);
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(dt.naive_local()));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&raw, fmt).ok())
        .or_else(|| date(field, value).ok().flatten().and_then(|d| d.and_hms_opt(0, 0, 0)))
        .map(Some)
        .ok_or_else(|| Error::shape(format!("invalid `{}` timestamp {:?}", field, raw)))
}

/// `<price currency="EUR">38.50</price>`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct XmlPrice {
    #[serde(rename = "@currency")]
    pub currency: Option<String>,
    #[serde(rename = "$text")]
    pub amount: Option<String>,
}

impl XmlPrice {
    pub(crate) fn to_price(&self, field: &str) -> Result<Price> {
        Ok(Price {
            currency: text(&self.currency).unwrap_or_default(),
            amount: required(field, &self.amount)?,
        })
    }
}

/// `<deadline>48</deadline><percentage>100</percentage>`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct XmlCancellationPolicy {
    pub deadline: Option<String>,
    pub percentage: Option<String>,
}

impl XmlCancellationPolicy {
    pub(crate) fn to_policy(&self) -> Result<CancellationPolicy> {
        Ok(CancellationPolicy {
            deadline: optional("deadline", &self.deadline)?,
            percentage: required("percentage", &self.percentage)?,
        })
    }
}

/// `<note start_date=".." end_date=".."><text>..</text></note>`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct XmlNote {
    #[serde(rename = "@start_date")]
    pub start_date: Option<String>,
    #[serde(rename = "@end_date")]
    pub end_date: Option<String>,
    pub text: Option<String>,
}

impl XmlNote {
    pub(crate) fn to_note(&self) -> Result<Note> {
        Ok(Note {
            start_date: date("start_date", &self.start_date)?,
            end_date: date("end_date", &self.end_date)?,
            text: text(&self.text).unwrap_or_default(),
        })
    }
}

/// Converts every element with `f`, stopping at the first failure.
pub(crate) fn convert<X, T>(items: &[X], f: impl Fn(&X) -> Result<T>) -> Result<Vec<T>> {
    items.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct XmlThing {
        #[serde(rename = "name")]
        name: String,
    }

    const ERROR_DOC: &str = r#"<?xml version="1.0" encoding="utf-8"?>
        <SearchResponse xmlns="http://xml.sunhotels.net/15/">
          <ReturnStatus>
            <Status>Error</Status>
            <Exception>Invalid username or password</Exception>
          </ReturnStatus>
        </SearchResponse>"#;

    #[test]
    fn test_root_name_skips_declaration() {
        assert_eq!(root_name(ERROR_DOC).unwrap(), "SearchResponse");
        assert_eq!(root_name("<getThemesResult/>").unwrap(), "getThemesResult");
    }

    #[test]
    fn test_root_name_empty_document() {
        let err = root_name("   ").unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Xml(_))));
    }

    #[test]
    fn test_root_name_not_xml() {
        let err = root_name("<<<not xml").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_decode_error_envelope() {
        let err = decode::<XmlThing>(ERROR_DOC, "result").unwrap_err();
        match err {
            Error::Protocol(message) => assert_eq!(message, "Invalid username or password"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_error_envelope_without_exception() {
        let xml = "<SearchResponse><ReturnStatus><Status>Error</Status></ReturnStatus></SearchResponse>";
        let err = decode::<XmlThing>(xml, "result").unwrap_err();
        assert!(matches!(err, Error::Protocol(m) if m == "Error"));
    }

    #[test]
    fn test_decode_success() {
        let thing: XmlThing = decode("<result><name>Beach</name></result>", "result").unwrap();
        assert_eq!(thing.name, "Beach");
    }

    #[test]
    fn test_decode_wrong_root_is_shape_error() {
        let err = decode::<XmlThing>("<html><body><h1>Service temporarily unavailable</h1></body></html>", "result")
            .unwrap_err();
        assert!(matches!(err, Error::Shape(m) if m.contains("<html>")));

        let err = decode::<XmlThing>("<getThemesResult><themes/></getThemesResult>", "result").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[test]
    fn test_check_inner() {
        assert!(check_inner(None).is_ok());
        assert!(check_inner(Some(XmlInnerError::default())).is_ok());

        let err = check_inner(Some(XmlInnerError {
            error_type: "Booking".into(),
            message: "Room is sold out".into(),
        }))
        .unwrap_err();
        assert!(matches!(err, Error::Business(m) if m == "Room is sold out"));

        let err = check_inner(Some(XmlInnerError {
            error_type: "InvalidPreBookCode".into(),
            message: String::new(),
        }))
        .unwrap_err();
        assert!(matches!(err, Error::Business(m) if m == "InvalidPreBookCode"));
    }

    #[test]
    fn test_field_helpers() {
        assert_eq!(text(&Some("  EUR ".into())), Some("EUR".into()));
        assert_eq!(text(&Some("".into())), None);

        assert_eq!(required::<u64>("hotel.id", &Some("427666".into())).unwrap(), 427666);
        let err = required::<u64>("hotel.id", &None).unwrap_err();
        assert!(matches!(err, Error::Shape(m) if m.contains("hotel.id")));

        assert_eq!(optional::<f64>("price", &Some("".into())).unwrap(), None);
        assert_eq!(optional::<f64>("price", &Some("38.50".into())).unwrap(), Some(38.5));
        assert_eq!(optional::<f64>("price", &Some("abc".into())).unwrap_err().kind(), ErrorKind::Shape);
    }

    #[test]
    fn test_flag() {
        assert!(flag("isSuperDeal", &Some("true".into())).unwrap());
        assert!(flag("isSuperDeal", &Some("1".into())).unwrap());
        assert!(!flag("isSuperDeal", &Some("False".into())).unwrap());
        assert!(!flag("isSuperDeal", &None).unwrap());
        assert!(flag("isSuperDeal", &Some("maybe".into())).is_err());
    }

    #[test]
    fn test_dates() {
        let d = date("checkindate", &Some("2024-06-01T00:00:00".into())).unwrap().unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(date("checkindate", &Some("".into())).unwrap(), None);
        assert_eq!(date("checkindate", &Some("June".into())).unwrap_err().kind(), ErrorKind::Shape);

        let dt = datetime("bookingdate", &Some("2024-05-20T14:31:07.55".into())).unwrap().unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 5, 20).unwrap());
        let dt = datetime("bookingdate", &Some("2024-05-20T14:31:07+02:00".into())).unwrap().unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "14:31");
        let dt = datetime("bookingdate", &Some("2024-05-20".into())).unwrap().unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "00:00");
        assert!(datetime("bookingdate", &Some("yesterday".into())).is_err());
    }

    #[test]
    fn test_price_and_policy() {
        #[derive(Debug, Default, Deserialize)]
        #[serde(default)]
        struct XmlRoom {
            price: Vec<XmlPrice>,
            cancellation_policy: Option<XmlCancellationPolicy>,
        }

        let room: XmlRoom = decode(
            r#"<room><price currency="EUR">38.50</price><price currency="USD">41</price>
               <cancellation_policy><deadline/><percentage>100</percentage></cancellation_policy></room>"#,
            "room",
        )
        .unwrap();

        let prices = convert(&room.price, |p| p.to_price("price")).unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].currency, "EUR");
        assert_eq!(prices[0].amount, 38.5);

        let policy = room.cancellation_policy.unwrap().to_policy().unwrap();
        assert_eq!(policy.deadline, None);
        assert_eq!(policy.percentage, 100.0);
    }
}
