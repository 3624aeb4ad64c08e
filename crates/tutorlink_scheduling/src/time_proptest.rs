#[cfg(test)]
mod tests {
    use crate::time::{combine, format_utc, parse_utc, ClientZone, TimeError};
    use chrono::{FixedOffset, NaiveDate, NaiveTime};
    use chrono_tz::Tz;
    use proptest::prelude::*;

    fn local_inputs() -> impl Strategy<Value = (NaiveDate, NaiveTime)> {
        (2000i32..2100, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60).prop_map(|(y, mo, d, h, mi)| {
            (
                NaiveDate::from_ymd_opt(y, mo, d).unwrap(),
                NaiveTime::from_hms_opt(h, mi, 0).unwrap(),
            )
        })
    }

    proptest! {
        // Converting back into the same fixed offset reproduces the input
        #[test]
        fn test_fixed_offset_round_trip(
            (date, time) in local_inputs(),
            offset_minutes in -720i32..=840,
        ) {
            let zone = FixedOffset::east_opt(offset_minutes * 60).unwrap();
            let instant = combine(date, time, &zone).unwrap();
            let local = instant.with_timezone(&zone).naive_local();
            prop_assert_eq!(local, date.and_time(time));
        }

        // Same for a zone with daylight saving, skipping local times that do not exist
        #[test]
        fn test_named_zone_round_trip((date, time) in local_inputs()) {
            let zone = ClientZone::Named(Tz::Europe__Zurich);
            match zone.combine(date, time) {
                Ok(instant) => prop_assert_eq!(zone.to_local(&instant), date.and_time(time)),
                Err(err) => prop_assert!(matches!(err, TimeError::NonexistentLocalTime(_))),
            }
        }

        // The canonical text parses back to the same instant
        #[test]
        fn test_canonical_text_round_trip((date, time) in local_inputs()) {
            let instant = combine(date, time, &chrono::Utc).unwrap();
            let text = format_utc(&instant);
            prop_assert_eq!(text.len(), 24);
            prop_assert!(text.ends_with(".000Z"));
            prop_assert_eq!(parse_utc(&text).unwrap(), instant);
        }
    }
}
