#![allow(dead_code)]

use chrono::NaiveDate;
use recur_budget::ledger::{RecurringTransaction, TimeInterval};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// An open-ended rule with no description.
pub fn rule(
    amount: i64,
    category: &str,
    start: NaiveDate,
    interval: TimeInterval,
) -> RecurringTransaction {
    RecurringTransaction::new(amount, category, start, interval).expect("valid rule")
}

pub const SAMPLE_RULES: &str = "\
description,amount,category,start,end,every,unit,enabled
Netflix,9.99,Monthly,2016-01-15,,1,month,true
Car insurance,750,Quarterly,2016-03-31,,3,months,true
Old gym,30,Monthly,2014-01-01,2015-12-31,1,month,true
Paused,100,Monthly,2016-01-01,,1,month,false
";
