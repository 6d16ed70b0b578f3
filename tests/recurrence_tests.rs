mod common;

use common::{date, rule};
use recur_budget::{
    ledger::{DateInterval, RecurringTransaction, TimeInterval, TimeUnit},
    BudgetError,
};

#[test]
fn unbounded_rule_is_strictly_increasing_from_initial() {
    for interval in [
        TimeInterval::days(1),
        TimeInterval::weeks(2),
        TimeInterval::months(1),
        TimeInterval::months(5),
        TimeInterval::years(1),
    ] {
        let start = date(2016, 1, 31);
        let dates: Vec<_> = rule(1, "x", start, interval)
            .occurrences()
            .take(40)
            .map(|occurrence| occurrence.date)
            .collect();
        assert_eq!(dates.len(), 40);
        assert_eq!(dates[0], start);
        assert!(dates.windows(2).all(|pair| pair[0] < pair[1]), "{interval}");
    }
}

#[test]
fn monthly_from_january_31_tracks_month_ends() {
    let dates: Vec<_> = rule(999, "Monthly", date(2016, 1, 31), TimeInterval::months(1))
        .occurrences()
        .take(3)
        .map(|occurrence| occurrence.date)
        .collect();
    assert_eq!(dates, vec![date(2016, 1, 31), date(2016, 2, 29), date(2016, 3, 31)]);
}

#[test]
fn quarterly_from_march_31() {
    let dates: Vec<_> = rule(75_000, "Quarterly", date(2016, 3, 31), TimeInterval::months(3))
        .occurrences()
        .take(5)
        .map(|occurrence| occurrence.date)
        .collect();
    assert_eq!(
        dates,
        vec![
            date(2016, 3, 31),
            date(2016, 6, 30),
            date(2016, 9, 30),
            date(2016, 12, 31),
            date(2017, 3, 31)
        ]
    );
}

#[test]
fn unbounded_window_expansion_terminates() {
    let daily = rule(1, "Coffee", date(2000, 1, 1), TimeInterval::days(1));
    let window = DateInterval::new(date(2016, 1, 1), date(2017, 1, 1)).unwrap();
    assert_eq!(daily.occurrences_within(&window).count(), 366);
}

#[test]
fn window_respects_final_occurrence() {
    let weekly = rule(1, "Lessons", date(2016, 11, 1), TimeInterval::weeks(1))
        .ends_on(Some(date(2016, 11, 29)))
        .unwrap();
    let window = DateInterval::new(date(2016, 1, 1), date(2017, 1, 1)).unwrap();
    let dates: Vec<_> = weekly.occurrences_within(&window).map(|o| o.date).collect();
    assert_eq!(dates.len(), 5);
    assert_eq!(dates.last(), Some(&date(2016, 11, 29)));
}

#[test]
fn rule_after_window_yields_nothing() {
    let later = rule(1, "Later", date(2017, 1, 1), TimeInterval::days(1));
    let window = DateInterval::new(date(2016, 1, 1), date(2017, 1, 1)).unwrap();
    assert_eq!(later.occurrences_within(&window).count(), 0);
}

#[test]
fn unsupported_unit_fails_at_construction() {
    let err = TimeInterval::parse(1, "fortnight").unwrap_err();
    assert!(matches!(err, BudgetError::UnsupportedUnit(_)));
    assert_eq!(TimeInterval::parse(2, "Weeks").unwrap().unit, TimeUnit::Week);
}

#[test]
fn occurrences_carry_rule_fields() {
    let netflix =
        RecurringTransaction::new(999, "Streaming", date(2016, 1, 15), TimeInterval::months(1))
            .unwrap()
            .with_description(Some("Netflix".into()));
    let second = netflix.occurrences().nth(1).unwrap();
    assert_eq!(second.date, date(2016, 2, 15));
    assert_eq!(second.amount, 999);
    assert_eq!(second.category, "Streaming");
    assert_eq!(second.description.as_deref(), Some("Netflix"));
}
