//! Query-string assembly for outgoing requests.

use super::Credentials;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub(crate) const USER_NAME: &str = "userName";
pub(crate) const PASSWORD: &str = "password";

/// Parameters masked in [`Query::redacted`] and `Debug` output.
const SENSITIVE: [&str; 3] = [PASSWORD, "creditCardNumber", "creditCardCVV2"];

/// How absent optional fields are serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyFieldPolicy {
    /// Leave the parameter out of the query string.
    #[default]
    Omit,
    /// Send the parameter with an empty value.
    SendEmpty,
}

impl FromStr for EmptyFieldPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "omit" => Ok(EmptyFieldPolicy::Omit),
            "send-empty" | "empty" => Ok(EmptyFieldPolicy::SendEmpty),
            _ => Err(format!("Unknown empty-field policy: {}. Use: omit, send-empty", s)),
        }
    }
}

/// Ordered parameter list for a single request.
///
/// A `Query` is built per call and dropped with it; credentials are written
/// in at construction and nothing else is shared between calls.
#[derive(Clone, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
    policy: EmptyFieldPolicy,
}

impl Query {
    /// Creates a query pre-filled with the credential parameters.
    pub fn new(credentials: &Credentials, policy: EmptyFieldPolicy) -> Self {
        let mut query = Self { pairs: Vec::with_capacity(16), policy };
        query.set(USER_NAME, credentials.username());
        query.set(PASSWORD, credentials.password());
        query
    }

    /// Sets a parameter, replacing any earlier value under the same name.
    pub fn set(&mut self, key: &str, value: impl ToString) -> &mut Self {
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((key.to_string(), value)),
        }
        self
    }

    /// Sets a parameter that is always present, empty when `value` is `None`.
    pub fn set_or_empty<V: ToString>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        match value {
            Some(v) => self.set(key, v),
            None => self.set(key, ""),
        }
    }

    /// Sets an optional parameter according to the query's [`EmptyFieldPolicy`].
    pub fn optional<V: ToString>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        match (value, self.policy) {
            (Some(v), _) => self.set(key, v),
            (None, EmptyFieldPolicy::SendEmpty) => self.set(key, ""),
            (None, EmptyFieldPolicy::Omit) => self,
        }
    }

    /// Sets an optional comma-separated list; an empty list counts as absent.
    pub fn optional_list<V: ToString>(&mut self, key: &str, values: &[V]) -> &mut Self {
        let joined = join(values);
        self.optional(key, (!joined.is_empty()).then_some(joined))
    }

    /// Returns the value of a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Returns true if the parameter is present (even if empty).
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over parameter names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Percent-encodes the parameters as `k=v&k=v`.
    pub fn encode(&self) -> String {
        self.render(false)
    }

    /// Like [`Query::encode`] but with the password and card secrets masked, for logging.
    pub fn redacted(&self) -> String {
        self.render(true)
    }

    fn render(&self, redact: bool) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| {
                let masked = redact && SENSITIVE.contains(&k.as_str());
                let value = if masked { "***".into() } else { urlencoding::encode(v) };
                format!("{}={}", urlencoding::encode(k), value)
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query").field("pairs", &self.redacted()).field("policy", &self.policy).finish()
    }
}

/// Joins values with commas, the list format the service expects.
fn join<V: ToString>(values: &[V]) -> String {
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(policy: EmptyFieldPolicy) -> Query {
        Query::new(&Credentials::new("API_USERNAME", "s3cr&t"), policy)
    }

    #[test]
    fn test_credentials_injected() {
        let q = query(EmptyFieldPolicy::Omit);
        assert_eq!(q.get("userName"), Some("API_USERNAME"));
        assert_eq!(q.get("password"), Some("s3cr&t"));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_set_replaces() {
        let mut q = query(EmptyFieldPolicy::Omit);
        q.set("destinationID", 244);
        q.set("destinationID", "");
        assert_eq!(q.get("destinationID"), Some(""));
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn test_optional_omit() {
        let mut q = query(EmptyFieldPolicy::Omit);
        q.optional("infant", None::<u32>).optional("minPrice", Some(10.5));
        assert!(!q.contains("infant"));
        assert_eq!(q.get("minPrice"), Some("10.5"));
    }

    #[test]
    fn test_optional_send_empty() {
        let mut q = query(EmptyFieldPolicy::SendEmpty);
        q.optional("infant", None::<u32>);
        assert_eq!(q.get("infant"), Some(""));
    }

    #[test]
    fn test_set_or_empty_ignores_policy() {
        let mut q = query(EmptyFieldPolicy::Omit);
        q.set_or_empty("childrenGuestAge1", None::<u8>);
        assert_eq!(q.get("childrenGuestAge1"), Some(""));
    }

    #[test]
    fn test_optional_list() {
        let mut q = query(EmptyFieldPolicy::Omit);
        q.optional_list("hotelIDs", &[1u64, 2, 3]).optional_list::<u32>("mealIds", &[]);
        assert_eq!(q.get("hotelIDs"), Some("1,2,3"));
        assert!(!q.contains("mealIds"));
    }

    #[test]
    fn test_encode_and_redact() {
        let mut q = query(EmptyFieldPolicy::Omit);
        q.set("language", "en");
        assert_eq!(q.encode(), "userName=API_USERNAME&password=s3cr%26t&language=en");
        assert_eq!(q.redacted(), "userName=API_USERNAME&password=***&language=en");
        assert!(!format!("{:?}", q).contains("s3cr"));
    }

    #[test]
    fn test_redact_masks_card_secrets() {
        let mut q = query(EmptyFieldPolicy::Omit);
        q.set("creditCardNumber", "4111111111111111")
            .set("creditCardCVV2", "737")
            .set("creditCardHolder", "Mehdi Ait Mouh")
            .set("creditCardExpMonth", 4);

        let redacted = q.redacted();
        assert!(!redacted.contains("4111111111111111"));
        assert!(!redacted.contains("737"));
        assert!(redacted.contains("creditCardNumber=***&creditCardCVV2=***"));
        assert!(redacted.contains("creditCardHolder=Mehdi%20Ait%20Mouh"));

        let debug = format!("{:?}", q);
        assert!(!debug.contains("4111111111111111"));
        assert!(q.encode().contains("creditCardNumber=4111111111111111"));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("omit".parse::<EmptyFieldPolicy>().unwrap(), EmptyFieldPolicy::Omit);
        assert_eq!("SEND-EMPTY".parse::<EmptyFieldPolicy>().unwrap(), EmptyFieldPolicy::SendEmpty);
        assert!("never".parse::<EmptyFieldPolicy>().unwrap_err().contains("Unknown"));
    }
}
