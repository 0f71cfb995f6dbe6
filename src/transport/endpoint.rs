//! Fixed remote operations and their path segments.

use std::fmt;

/// One remote operation on the NonStaticXMLAPI service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Search,
    Languages,
    Features,
    Meals,
    Destinations,
    Themes,
    StaticHotels,
    PreBook,
    Book,
    BookingInformation,
    Cancel,
}

impl Endpoint {
    /// Returns the path segment appended to the base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Search => "SearchV2",
            Endpoint::Languages => "GetLanguages",
            Endpoint::Features => "GetFeatures",
            Endpoint::Meals => "GetMeals",
            Endpoint::Destinations => "GetDestinations",
            Endpoint::Themes => "GetThemes",
            Endpoint::StaticHotels => "GetStaticHotelsAndRooms",
            Endpoint::PreBook => "PreBookV2",
            Endpoint::Book => "BookV2",
            Endpoint::BookingInformation => "GetBookingInformation",
            Endpoint::Cancel => "CancelBooking",
        }
    }

    /// Returns all endpoints.
    pub fn all() -> &'static [Endpoint] {
        &[
            Endpoint::Search,
            Endpoint::Languages,
            Endpoint::Features,
            Endpoint::Meals,
            Endpoint::Destinations,
            Endpoint::Themes,
            Endpoint::StaticHotels,
            Endpoint::PreBook,
            Endpoint::Book,
            Endpoint::BookingInformation,
            Endpoint::Cancel,
        ]
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_are_unique() {
        let paths: HashSet<_> = Endpoint::all().iter().map(|e| e.path()).collect();
        assert_eq!(paths.len(), Endpoint::all().len());
    }

    #[test]
    fn test_display_is_path() {
        assert_eq!(Endpoint::Search.to_string(), "SearchV2");
        assert_eq!(Endpoint::Cancel.to_string(), "CancelBooking");
        assert_eq!(Endpoint::PreBook.to_string(), "PreBookV2");
    }
}
