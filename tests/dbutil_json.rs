use serde_json::json;

use supports::dbutil::{Date, Datetime, SliceInt, SliceString, Temporal, WithTimestamps};

fn datetime(text: &str) -> Datetime {
    Datetime::from_input(text.as_bytes()).expect("datetime ok")
}

fn date(text: &str) -> Date {
    Date::from_input(text.as_bytes()).expect("date ok")
}

#[test]
fn datetime_serializes_as_its_string() {
    let d = datetime("2022-08-09 10:11:12");
    assert_eq!(serde_json::to_string(&d).expect("serialize"), "\"2022-08-09 10:11:12\"");
    assert_eq!(d.to_string(), "2022-08-09 10:11:12");
    let back: Datetime = serde_json::from_str("\"2022-08-09 10:11:12\"").expect("deserialize");
    assert_eq!(back, d);
}

#[test]
fn quoted_input_is_accepted() {
    assert_eq!(datetime("\"2022-08-09 10:11:12\""), datetime("2022-08-09 10:11:12"));
    assert_eq!(date("\"2022-08-09\""), date("2022-08-09"));
}

#[test]
fn zero_sentinels_give_the_zero_value() {
    for text in ["", "\"\"", "0000-00-00 00:00:00", "0001-01-01 00:00:00"] {
        assert!(!datetime(text).is_valid(), "{text:?}");
    }
    for text in ["", "0000-00-00", "0001-01-01"] {
        assert!(!date(text).is_valid(), "{text:?}");
    }
    let zero: Datetime = serde_json::from_str("\"\"").expect("deserialize");
    assert_eq!(zero, Datetime::default());
}

#[test]
fn bad_text_is_a_deserialization_error() {
    assert!(serde_json::from_str::<Datetime>("\"someday\"").is_err());
    assert!(serde_json::from_str::<Date>("\"2022-13-40\"").is_err());
    // dates only accept the date layout
    assert!(serde_json::from_str::<Date>("\"2022-08-09 10:11:12\"").is_err());
}

#[test]
fn date_serializes_as_its_day() {
    let d = date("2022-08-09");
    assert!(d.is_valid());
    assert_eq!(serde_json::to_value(&d).expect("serialize"), json!("2022-08-09"));
    assert_eq!(d.to_string(), "2022-08-09");
}

#[test]
fn of_date_drops_the_time_of_day() {
    let moment = datetime("2022-08-09 10:11:12");
    let day = moment.of_date();
    assert_eq!(day, date("2022-08-09"));
    assert_eq!(day.carbon().hour(), 0);
    assert_eq!(day.carbon().to_date_time_string(), "2022-08-09 00:00:00");
    assert_eq!(moment.to_date_time_string(), "2022-08-09 10:11:12");
}

#[test]
fn shared_calendar_operations() {
    let day = date("2024-01-31");
    assert_eq!(day.add_months(1).to_date_string(), "2024-02-29");
    assert_eq!(day.add_days(1).to_date_string(), "2024-02-01");
    assert_eq!(day.add_weeks(-1).to_date_string(), "2024-01-24");
    assert_eq!(day.add_years(1).to_date_string(), "2025-01-31");
    assert_eq!(day.start_of_month().to_date_string(), "2024-01-01");
    assert_eq!(day.end_of_month(), day);
    assert_eq!(day.end_of_year().to_date_string(), "2024-12-31");
    assert_eq!(day.end_of_year().carbon().hour(), 0);

    let moment = datetime("2024-01-31 18:30:00");
    assert_eq!(moment.add_months(1).to_date_time_string(), "2024-02-29 18:30:00");
    assert_eq!(moment.start_of_year().to_date_time_string(), "2024-01-01 00:00:00");
    assert_eq!(moment.end_of_month().to_date_time_string(), "2024-01-31 23:59:59");
}

#[test]
fn datetime_only_operations() {
    let moment = datetime("2024-01-31 18:30:00");
    assert_eq!(moment.add_minutes(45).to_date_time_string(), "2024-01-31 19:15:00");
    assert_eq!(moment.add_hours(6).to_date_time_string(), "2024-02-01 00:30:00");
    assert_eq!(moment.start_of_hour().to_date_time_string(), "2024-01-31 18:00:00");
    assert_eq!(moment.end_of_minute().to_date_time_string(), "2024-01-31 18:30:59");
    assert_eq!(moment.start_of_day().to_date_time_string(), "2024-01-31 00:00:00");
    assert_eq!(moment.end_of_day().to_date_time_string(), "2024-01-31 23:59:59");
}

#[test]
fn timestamps_on_records() {
    let stamps = WithTimestamps {
        created_at: datetime("2022-08-09 10:11:12"),
        updated_at: datetime("2022-08-10 07:00:00"),
    };
    let value = serde_json::to_value(&stamps).expect("serialize");
    assert_eq!(
        value,
        json!({"created_at": "2022-08-09 10:11:12", "updated_at": "2022-08-10 07:00:00"})
    );
    let back: WithTimestamps = serde_json::from_value(value).expect("deserialize");
    assert_eq!(back, stamps);

    let touched = stamps.touch();
    assert_eq!(touched.created_at, stamps.created_at);
    assert!(touched.updated_at > stamps.updated_at);

    let fresh = WithTimestamps::now();
    assert_eq!(fresh.created_at, fresh.updated_at);
    assert!(fresh.created_at.is_valid());
}

#[test]
fn lists_serialize_as_arrays() {
    let tags = SliceString::parse("a,b");
    assert_eq!(serde_json::to_value(&tags).expect("serialize"), json!(["a", "b"]));
    let numbers: SliceInt = serde_json::from_value(json!([4, 5])).expect("deserialize");
    assert_eq!(numbers.value(), "4,5");
}

#[test]
fn zero_values_serialize_as_empty_text() {
    assert_eq!(serde_json::to_string(&Datetime::default()).expect("serialize"), "\"\"");
    assert_eq!(serde_json::to_string(&Date::default()).expect("serialize"), "\"\"");
    let stamps = WithTimestamps::default();
    let back: WithTimestamps =
        serde_json::from_value(serde_json::to_value(&stamps).expect("serialize")).expect("deserialize");
    assert!(!back.created_at.is_valid());
    assert_eq!(back, stamps);
}
