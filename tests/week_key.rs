#[cfg(test)]
mod tests {
    use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
    use donelog::libs::week::WeekKey;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn days(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
        from.iter_days().take_while(move |day| *day <= to)
    }

    fn is_well_formed(key: &str) -> bool {
        let bytes = key.as_bytes();
        bytes.len() == 8
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && &bytes[4..6] == b"-W"
            && bytes[6..].iter().all(u8::is_ascii_digit)
    }

    #[test]
    fn test_mid_march_2024_is_week_11() {
        assert_eq!(WeekKey::of(&at(2024, 3, 15, 10)).unwrap().as_str(), "2024-W11");
    }

    #[test]
    fn test_keys_are_well_formed_and_deterministic() {
        let from = NaiveDate::from_ymd_opt(2019, 12, 20).unwrap();
        let to = NaiveDate::from_ymd_opt(2031, 1, 10).unwrap();
        for day in days(from, to) {
            let timestamp = day.and_hms_opt(23, 59, 59).unwrap();
            let key = WeekKey::of(&timestamp).unwrap();
            assert!(is_well_formed(key.as_str()), "{key} is malformed");
            assert_eq!(key, WeekKey::of(&timestamp).unwrap());
            assert_eq!(key.year(), day.year());
        }
    }

    #[test]
    fn test_only_four_digit_years_have_a_key() {
        for day in [NaiveDate::MIN, NaiveDate::from_ymd_opt(-1, 12, 31).unwrap(), NaiveDate::from_ymd_opt(10000, 1, 1).unwrap(), NaiveDate::MAX] {
            assert!(WeekKey::of(&day.and_hms_opt(0, 0, 0).unwrap()).is_err(), "{day} got a key");
        }
        let last = WeekKey::of(&at(9999, 12, 31, 23)).unwrap();
        assert!(is_well_formed(last.as_str()));
        assert_eq!((last.year(), last.week()), (9999, 52));
    }

    #[test]
    fn test_time_of_day_does_not_change_the_bucket() {
        assert_eq!(WeekKey::of(&at(2024, 3, 17, 0)).unwrap(), WeekKey::of(&at(2024, 3, 17, 23)).unwrap());
    }

    #[test]
    fn test_weeks_start_on_monday() {
        // 2024-03-17 is a Sunday, 2024-03-18 a Monday
        assert_eq!(WeekKey::of(&at(2024, 3, 17, 12)).unwrap().as_str(), "2024-W11");
        assert_eq!(WeekKey::of(&at(2024, 3, 18, 12)).unwrap().as_str(), "2024-W12");
    }

    #[test]
    fn test_lexical_order_follows_time() {
        let from = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let mut previous: Option<WeekKey> = None;
        for day in days(from, to) {
            let key = WeekKey::of(&day.and_hms_opt(0, 0, 0).unwrap()).unwrap();
            if let Some(previous) = &previous {
                assert!(previous.as_str() <= key.as_str(), "{previous} sorts after {key}");
            }
            previous = Some(key);
        }
    }

    #[test]
    fn test_every_day_falls_inside_its_week_bounds() {
        let from = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        for day in days(from, to) {
            let key = WeekKey::of(&day.and_hms_opt(8, 0, 0).unwrap()).unwrap();
            let (start, end) = key.bounds().unwrap();
            assert!(start <= day && day <= end, "{day} outside {key} ({start}..{end})");
            assert!(end - start <= Duration::days(6));
        }
    }

    #[test]
    fn test_parse_round_trips_through_display() {
        let key: WeekKey = "2024-W11".parse().unwrap();
        assert_eq!(key.to_string(), "2024-W11");
        assert_eq!(key.year(), 2024);
        assert_eq!(key.week(), 11);
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-W11\"");
        assert!(serde_json::from_str::<WeekKey>("\"2024-11\"").is_err());
    }
}
