//! Request parameters for reference-data lookups.

use crate::transport::Query;

/// Filters for [`Helper::destinations`](super::Helper::destinations).
///
/// The remote endpoint expects the filter fields all-or-none: as soon as one
/// is set, all four are sent, unset ones as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationQuery {
    pub language: String,
    pub destination_code: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub exact_match: Option<bool>,
}

impl DestinationQuery {
    pub fn new(language: impl Into<String>) -> Self {
        Self { language: language.into(), ..Self::default() }
    }

    pub fn destination_code(mut self, code: impl Into<String>) -> Self {
        self.destination_code = Some(code.into());
        self
    }

    pub fn sort(mut self, by: impl Into<String>, order: impl Into<String>) -> Self {
        self.sort_by = Some(by.into());
        self.sort_order = Some(order.into());
        self
    }

    pub fn exact_match(mut self, exact: bool) -> Self {
        self.exact_match = Some(exact);
        self
    }

    fn has_filters(&self) -> bool {
        self.destination_code.is_some()
            || self.sort_by.is_some()
            || self.sort_order.is_some()
            || self.exact_match.is_some()
    }

    pub(crate) fn write(&self, query: &mut Query) {
        query.set("language", &self.language);

        if self.has_filters() {
            query
                .set_or_empty("destinationCode", self.destination_code.as_deref())
                .set_or_empty("sortBy", self.sort_by.as_deref())
                .set_or_empty("sortOrder", self.sort_order.as_deref())
                .set_or_empty("exactDestinationMatch", self.exact_match);
        }
    }
}

/// Selection for [`Helper::hotels`](super::Helper::hotels).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotelQuery {
    pub language: String,
    pub hotel_ids: Vec<u64>,
    pub destination: Option<String>,
    pub resort_ids: Vec<u64>,
    pub accommodation_types: Option<String>,
}

impl HotelQuery {
    pub fn new(language: impl Into<String>) -> Self {
        Self { language: language.into(), ..Self::default() }
    }

    pub fn hotel_ids(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.hotel_ids = ids.into_iter().collect();
        self
    }

    pub fn destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub(crate) fn write(&self, query: &mut Query) {
        query
            .set("language", &self.language)
            .optional_list("hotelIDs", &self.hotel_ids)
            .optional("destination", self.destination.as_deref())
            .optional_list("resortIDs", &self.resort_ids)
            .optional("accommodationTypes", self.accommodation_types.as_deref());
    }
}
