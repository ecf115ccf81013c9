//! Region name resolution and local-time rendering.
//!
//! Resolution is deterministic: the fixed alias table wins, then an exact
//! case-insensitive IANA name match, then a match on the final path segment
//! of the IANA name (spaces compare equal to underscores throughout).

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::{errors::Error, Result};

/// Day-of-week, day-month-year, 12-hour clock with AM/PM.
pub const ZONE_TIME_FORMAT: &str = "%A, %d-%b-%y, %I:%M %p";

/// Fixed alias table consulted before the IANA tables. Abbreviations map to
/// DST-aware region zones rather than the fixed-offset legacy zones, so
/// `est` tracks New York wall time instead of a flat UTC-5.
static ALIASES: &[(&str, Tz)] = &[
    ("eastern", Tz::America__New_York),
    ("est", Tz::America__New_York),
    ("edt", Tz::America__New_York),
    ("central", Tz::America__Chicago),
    ("cst", Tz::America__Chicago),
    ("cdt", Tz::America__Chicago),
    ("mountain", Tz::America__Denver),
    ("mst", Tz::America__Denver),
    ("mdt", Tz::America__Denver),
    ("pacific", Tz::America__Los_Angeles),
    ("pst", Tz::America__Los_Angeles),
    ("pdt", Tz::America__Los_Angeles),
    ("bst", Tz::Europe__London),
    ("cet", Tz::Europe__Berlin),
    ("cest", Tz::Europe__Berlin),
    ("ist", Tz::Asia__Kolkata),
    ("jst", Tz::Asia__Tokyo),
    ("kst", Tz::Asia__Seoul),
    ("aest", Tz::Australia__Sydney),
    ("aedt", Tz::Australia__Sydney),
    ("mumbai", Tz::Asia__Kolkata),
    ("delhi", Tz::Asia__Kolkata),
    ("bengaluru", Tz::Asia__Kolkata),
    ("beijing", Tz::Asia__Shanghai),
    ("seattle", Tz::America__Los_Angeles),
    ("san_francisco", Tz::America__Los_Angeles),
    ("boston", Tz::America__New_York),
    ("washington", Tz::America__New_York),
];

/// Maps human-supplied region text to a canonical time zone.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZoneResolver;

impl ZoneResolver {
    pub fn resolve(&self, region: &str) -> Result<Tz> {
        let needle = region.trim().to_lowercase().replace(' ', "_");
        if needle.is_empty() {
            return Err(Error::UnknownRegion(region.trim().to_string()));
        }

        if let Some((_, tz)) = ALIASES.iter().find(|(alias, _)| *alias == needle) {
            return Ok(*tz);
        }

        for tz in chrono_tz::TZ_VARIANTS {
            if tz.name().to_lowercase() == needle {
                return Ok(tz);
            }
        }

        // "tokyo" resolves to Asia/Tokyo, "new york" to America/New_York.
        for tz in chrono_tz::TZ_VARIANTS {
            let segment = tz.name().rsplit('/').next().unwrap_or("");
            if segment.to_lowercase() == needle {
                return Ok(tz);
            }
        }

        Err(Error::UnknownRegion(region.trim().to_string()))
    }
}

/// Format an instant as wall-clock time in `zone`.
pub fn zone_time(zone: Tz, at: DateTime<Utc>) -> String {
    at.with_timezone(&zone).format(ZONE_TIME_FORMAT).to_string()
}

/// Local time right now in `zone`.
pub fn current_time(zone: Tz) -> String {
    zone_time(zone, Utc::now())
}

/// Validate both regions and return the conversion guidance message.
///
/// The datetime arithmetic itself is not performed: the command only checks
/// that both zones resolve, then reminds the user of the accepted input
/// formats.
pub fn describe_conversion(
    resolver: &ZoneResolver,
    prefix: char,
    from_region: &str,
    to_region: &str,
    _raw_datetime: &str,
) -> Result<String> {
    resolver.resolve(from_region)?;
    resolver.resolve(to_region)?;

    Ok(format!(
        "Please ensure that datetime is entered in this format: \
         week_day day-month-year hour:minute AM/PM. \
         Type {prefix}help convert_time for more examples."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_case_insensitive() {
        let resolver = ZoneResolver;
        assert_eq!(resolver.resolve("UTC").unwrap(), resolver.resolve("utc").unwrap());
        assert_eq!(resolver.resolve("utc").unwrap(), Tz::UTC);
    }

    #[test]
    fn resolve_full_iana_names() {
        let resolver = ZoneResolver;
        assert_eq!(resolver.resolve("Europe/London").unwrap(), Tz::Europe__London);
        assert_eq!(resolver.resolve("asia/kolkata").unwrap(), Tz::Asia__Kolkata);
    }

    #[test]
    fn resolve_city_segment() {
        let resolver = ZoneResolver;
        assert_eq!(resolver.resolve("tokyo").unwrap(), Tz::Asia__Tokyo);
        assert_eq!(resolver.resolve("New York").unwrap(), Tz::America__New_York);
    }

    #[test]
    fn resolve_aliases_prefer_region_zones() {
        let resolver = ZoneResolver;
        assert_eq!(resolver.resolve("EST").unwrap(), Tz::America__New_York);
        assert_eq!(resolver.resolve("ist").unwrap(), Tz::Asia__Kolkata);
        assert_eq!(resolver.resolve("Mumbai").unwrap(), Tz::Asia__Kolkata);
    }

    #[test]
    fn resolve_unknown_region_names_the_input() {
        let resolver = ZoneResolver;
        let err = resolver.resolve("Nowhere").unwrap_err();
        match err {
            Error::UnknownRegion(region) => assert_eq!(region, "Nowhere"),
            other => panic!("expected UnknownRegion, got {other:?}"),
        }
    }

    #[test]
    fn zone_time_is_deterministic_for_a_fixed_clock() {
        let at = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let first = zone_time(Tz::UTC, at);
        let second = zone_time(Tz::UTC, at);
        assert_eq!(first, second);
        assert_eq!(first, "Tuesday, 14-Nov-23, 10:13 PM");
    }

    #[test]
    fn zone_time_applies_the_zone_offset() {
        let at = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        // Asia/Kolkata is UTC+5:30 year-round.
        assert_eq!(zone_time(Tz::Asia__Kolkata, at), "Wednesday, 15-Nov-23, 03:43 AM");
    }

    #[test]
    fn describe_conversion_checks_both_regions() {
        let resolver = ZoneResolver;

        let guidance =
            describe_conversion(&resolver, '?', "UTC", "Tokyo", "11:32 PM").unwrap();
        assert!(guidance.contains("day-month-year"));
        assert!(guidance.contains("?help convert_time"));

        let err = describe_conversion(&resolver, '?', "UTC", "Atlantis", "11:32 PM").unwrap_err();
        assert!(matches!(err, Error::UnknownRegion(region) if region == "Atlantis"));
    }
}
