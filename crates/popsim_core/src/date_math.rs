//! Fractional-year calendar arithmetic.
//!
//! Sampled quantities (ages at death, delivery ages) are fractional years,
//! but the simulation runs on a month-granular calendar. The helpers here map
//! a fractional year count onto a whole-month offset: the integer part
//! contributes full years and the fractional part is rounded onto the eleven
//! month steps of a year. Day-of-month is preserved, so an offset that lands
//! on a day the target month does not have (Jan 31 + 1 month) surfaces as a
//! `jiff::Error` instead of being silently adjusted.

use jiff::civil::Date;

/// Month offset encoding a fractional year count.
///
/// Monotonically non-decreasing in `years`, so date arithmetic built on it
/// is monotonic too.
#[inline]
fn month_span(years: f64) -> i32 {
    let full_years = years.floor();
    let months = ((years - full_years) * 11.0).round() as i32;
    full_years as i32 * 12 + months
}

/// Shift a date by a whole number of months, keeping the day-of-month.
#[inline]
fn shift_months(d: Date, months: i32) -> Result<Date, jiff::Error> {
    let total = i32::from(d.year()) * 12 + i32::from(d.month()) - 1 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) + 1;
    Date::new(year as i16, month as i8, d.day())
}

/// The date a fractional number of years after `from`.
///
/// Negative spans are clamped to zero, so `years_after(y, d) >= d` always
/// holds and `years_after(0.0, d) == d`.
#[inline]
pub fn years_after(years: f64, from: Date) -> Result<Date, jiff::Error> {
    shift_months(from, month_span(years.max(0.0)))
}

/// The date a fractional number of years before `from`.
#[inline]
pub fn years_ago(years: f64, from: Date) -> Result<Date, jiff::Error> {
    shift_months(from, -month_span(years.max(0.0)))
}

/// The date at which a person born on `birth_date` turns `age`.
#[inline]
pub fn at_age(age: i16, birth_date: Date) -> Result<Date, jiff::Error> {
    Date::new(birth_date.year() + age, birth_date.month(), birth_date.day())
}
