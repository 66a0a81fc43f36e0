//! Membership window and the period calculator applied on payment.
//!
//! A member's window is the `(start, end)` pair during which their plan is
//! active. Either bound may be unset: a member who has never paid has no start,
//! and an edited record may have a start but no end.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// The dates during which a member's plan is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipWindow {
    #[serde(rename = "membership_start_date")]
    pub start: Option<NaiveDate>,
    #[serde(rename = "membership_end_date")]
    pub end: Option<NaiveDate>,
}

impl MembershipWindow {
    /// A window with neither bound set.
    pub const EMPTY: MembershipWindow = MembershipWindow {
        start: None,
        end: None,
    };

    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// A window running `duration_days` from `from`.
    pub fn starting(from: NaiveDate, duration_days: u32) -> Self {
        Self {
            start: Some(from),
            end: Some(add_days(from, duration_days)),
        }
    }

    /// Returns the window after a payment for a plan of `duration_days`
    /// made on `payment_date`.
    ///
    /// - no start date: the window starts on the payment date;
    /// - end date on or after the payment date: the end moves out by the
    ///   plan duration and the start is kept;
    /// - otherwise (no end, or already lapsed): the window restarts on the
    ///   payment date.
    pub fn extend(&self, duration_days: u32, payment_date: NaiveDate) -> Self {
        match (self.start, self.end) {
            (None, _) => Self::starting(payment_date, duration_days),
            (Some(start), Some(end)) if end >= payment_date => Self {
                start: Some(start),
                end: Some(add_days(end, duration_days)),
            },
            (Some(_), _) => Self::starting(payment_date, duration_days),
        }
    }

    /// The plan is active on `date`: an end date exists and has not passed.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.end.is_some_and(|end| end >= date)
    }

    /// The window ended strictly before `date`.
    pub fn is_lapsed_on(&self, date: NaiveDate) -> bool {
        self.end.is_some_and(|end| end < date)
    }

    /// The window ends between `date` and `date + days`, inclusive.
    pub fn expires_within(&self, date: NaiveDate, days: u32) -> bool {
        self.end
            .is_some_and(|end| end >= date && end <= add_days(date, days))
    }

    /// Both bounds are set and the end precedes the start.
    pub fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(s), Some(e)) if e < s)
    }
}

fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}
