use chrono::{FixedOffset, TimeDelta};
use supports::carbon::{Calendar, Carbon, Settings, Zone};

fn setup() -> Calendar {
    Calendar::new(Settings::default().with_timezone(Zone::Utc))
}

fn at(calendar: &Calendar, text: &str) -> Carbon {
    calendar.parse(text, None, None).expect("parse ok")
}

#[test]
fn exact_shifts() {
    let calendar = setup();
    let c = at(&calendar, "2019-01-01 00:02:00");
    assert_eq!(c.add_minutes(2).to_date_time_string(), "2019-01-01 00:04:00");
    assert_eq!(c.add_minute().to_date_time_string(), "2019-01-01 00:03:00");
    assert_eq!(c.add_minutes(-3).to_date_time_string(), "2018-12-31 23:59:00");
    assert_eq!(c.add_hours(25).to_date_time_string(), "2019-01-02 01:02:00");
    assert_eq!(c.add_hour().to_date_time_string(), "2019-01-01 01:02:00");
    assert_eq!(c.add_days(31).to_date_time_string(), "2019-02-01 00:02:00");
    assert_eq!(c.add_day().to_date_time_string(), "2019-01-02 00:02:00");
    assert_eq!(c.sub_days(1).to_date_time_string(), "2018-12-31 00:02:00");
    assert_eq!(c.add_weeks(2).to_date_time_string(), "2019-01-15 00:02:00");
    assert_eq!(c.add_week(), c.add_days(7));
    assert_eq!(c.add(TimeDelta::seconds(90)).to_date_time_string(), "2019-01-01 00:03:30");
}

#[test]
fn day_shift_is_a_whole_number_of_seconds() {
    let calendar = setup();
    let c = at(&calendar, "2019-03-30 12:00:00");
    assert_eq!(c.add_days(3).timestamp() - c.timestamp(), 3 * 86_400);
    assert_eq!(c.add_weeks(-1).timestamp() - c.timestamp(), -7 * 86_400);
}

#[test]
fn month_overflow_clamps_to_end_of_month() {
    let calendar = setup();
    let jan31 = at(&calendar, "2019-01-31 10:30:00");
    assert_eq!(jan31.add_month().to_date_time_string(), "2019-02-28 10:30:00");
    assert_eq!(jan31.add_months(2).to_date_time_string(), "2019-03-31 10:30:00");
    assert_eq!(jan31.add_months(3).to_date_time_string(), "2019-04-30 10:30:00");
    assert_eq!(jan31.add_months(13).to_date_time_string(), "2020-02-29 10:30:00");

    let mar31 = at(&calendar, "2020-03-31");
    assert_eq!(mar31.add_months(-1).to_date_string(), "2020-02-29");
    assert_eq!(mar31.add_months(-12).to_date_string(), "2019-03-31");
    assert_eq!(mar31.add_months(-25).to_date_string(), "2018-02-28");
}

#[test]
fn year_shift_keeps_month_and_day_where_valid() {
    let calendar = setup();
    let leap = at(&calendar, "2020-02-29 08:00:00");
    assert_eq!(leap.add_year().to_date_time_string(), "2021-02-28 08:00:00");
    assert_eq!(leap.add_years(4).to_date_time_string(), "2024-02-29 08:00:00");
    assert_eq!(leap.add_years(-1).to_date_time_string(), "2019-02-28 08:00:00");

    let plain = at(&calendar, "2019-07-14");
    assert_eq!(plain.add_years(10).to_date_string(), "2029-07-14");
}

#[test]
fn derived_values_leave_the_original_alone() {
    let calendar = setup();
    let original = at(&calendar, "2019-05-05 05:05:05");
    let shared = original.clone();
    let _ = shared.add_days(3).start_of_month().add_years(2);
    assert_eq!(original.to_date_time_string(), "2019-05-05 05:05:05");
    assert_eq!(shared, original);
}

#[test]
fn fixed_zone_shifts_preserve_wall_clock() {
    let calendar = setup();
    let india = Zone::Fixed(FixedOffset::east_opt(5 * 3600 + 1800).expect("valid offset"));
    let c = calendar
        .parse("2021-10-31 23:15:00", Some(india), None)
        .expect("parse ok");
    assert_eq!(c.add_day().to_date_time_string(), "2021-11-01 23:15:00");
    assert_eq!(c.add_month().to_date_time_string(), "2021-11-30 23:15:00");
    assert_eq!(c.add_month().zone(), india);
}

#[test]
fn derived_values_carry_the_validity_flag() {
    let calendar = setup();
    let zero = calendar.zero();
    assert!(!zero.is_valid());
    assert!(!zero.add_day().is_valid());
    assert!(at(&calendar, "2019-01-01").add_day().is_valid());
}

#[test]
fn out_of_range_shifts_leave_the_value_unchanged() {
    let calendar = setup();
    let c = at(&calendar, "2019-01-01");
    assert_eq!(c.add_days(i64::MAX), c);
    assert_eq!(c.add_years(i64::MAX), c);
    assert_eq!(c.add_months(i64::from(u32::MAX) + 1), c);
    assert_eq!(c.add_months(i64::MIN), c);
}

#[test]
fn every_shift_counts_in_the_same_unit() {
    let calendar = setup();
    let c = at(&calendar, "2019-01-31 10:30:00");
    let n: i64 = 2;
    assert_eq!(c.add_minutes(n).to_date_time_string(), "2019-01-31 10:32:00");
    assert_eq!(c.add_weeks(n).to_date_time_string(), "2019-02-14 10:30:00");
    assert_eq!(c.add_months(n).to_date_time_string(), "2019-03-31 10:30:00");
    assert_eq!(c.add_years(n).to_date_time_string(), "2021-01-31 10:30:00");
}

#[test]
fn edge_of_the_calendar_leaves_values_unchanged() {
    let calendar = setup();
    let last = at(&calendar, "+262142-12-31 23:59:59");
    assert!(last.is_valid());
    assert_eq!(last.add_day(), last);
    assert_eq!(last.add_month(), last);
    assert_eq!(last.end_of_day(), last);
    assert_eq!(last.end_of_month(), last);
    assert_eq!(last.end_of_year(), last);
    assert_eq!(last.start_of_day().to_date_time_string(), "+262142-12-31 00:00:00");
}

#[test]
fn today_and_tomorrow_are_one_day_apart() {
    let calendar = setup();
    let today = calendar.today();
    let tomorrow = calendar.tomorrow();
    assert_eq!(today.start_of_day(), today);
    assert_eq!(tomorrow.start_of_day(), tomorrow);
    // a day boundary may pass between the two calls
    let gap = tomorrow.timestamp() - today.timestamp();
    assert!(gap == 86_400 || gap == 2 * 86_400, "unexpected gap {gap}");
}
