//! RFC 3339 `date`, `time`, `date-time` and `duration`.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("valid date regex"));

static TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([0-9]{2}):([0-9]{2}):([0-9]{2})(?:\.[0-9]+)?(?:[Zz]|([+-])([0-9]{2}):([0-9]{2}))$",
    )
    .expect("valid time regex")
});

// RFC 3339 Appendix A: P (date [T time] | T time | week)
static DURATION: Lazy<Regex> = Lazy::new(|| {
    let time = r"T(?:[0-9]+H(?:[0-9]+M(?:[0-9]+S)?)?|[0-9]+M(?:[0-9]+S)?|[0-9]+S)";
    let date = r"(?:[0-9]+D|[0-9]+M(?:[0-9]+D)?|[0-9]+Y(?:[0-9]+M(?:[0-9]+D)?)?)";
    Regex::new(&format!(r"^P(?:{date}(?:{time})?|{time}|[0-9]+W)$")).expect("valid duration regex")
});

pub(super) fn is_date(value: &str) -> bool {
    let Some(caps) = DATE.captures(value) else {
        return false;
    };
    let field = |i: usize| caps[i].parse::<u32>().ok();
    match (caps[1].parse::<i32>().ok(), field(2), field(3)) {
        (Some(year), Some(month), Some(day)) => NaiveDate::from_ymd_opt(year, month, day).is_some(),
        _ => false,
    }
}

/// A leap second (`:60`) is only accepted when the instant is 23:59 UTC.
pub(super) fn is_time(value: &str) -> bool {
    let Some(caps) = TIME.captures(value) else {
        return false;
    };
    let number = |i: usize| -> i64 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };
    let (hour, minute, second) = (number(1), number(2), number(3));
    let (offset_hour, offset_minute) = (number(5), number(6));
    if hour > 23 || minute > 59 || second > 60 || offset_hour > 23 || offset_minute > 59 {
        return false;
    }
    if second < 60 {
        return true;
    }
    let sign = match caps.get(4).map(|m| m.as_str()) {
        Some("-") => -1,
        _ => 1,
    };
    let utc = (hour * 60 + minute - sign * (offset_hour * 60 + offset_minute)).rem_euclid(24 * 60);
    utc == 23 * 60 + 59
}

pub(super) fn is_date_time(value: &str) -> bool {
    match value.split_once(|c| c == 'T' || c == 't') {
        Some((date, time)) => is_date(date) && is_time(time),
        None => false,
    }
}

pub(super) fn is_duration(value: &str) -> bool {
    DURATION.is_match(value)
}
