//! Strongly-typed identifier value objects.
//!
//! Every record is keyed by a database-assigned numeric identifier. The
//! newtypes keep a `MemberId` from being passed where a `PlanId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database identifier.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw database identifier.
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

numeric_id!(
    /// Identifier of a gym member record.
    MemberId
);
numeric_id!(
    /// Identifier of a membership plan.
    PlanId
);
numeric_id!(
    /// Identifier of a trainer.
    TrainerId
);
numeric_id!(
    /// Identifier of a workout plan.
    WorkoutPlanId
);
numeric_id!(
    /// Identifier of a recorded payment.
    PaymentId
);
numeric_id!(
    /// Identifier of an attendance (check-in) record.
    AttendanceId
);
numeric_id!(
    /// Identifier of a fitness goal.
    GoalId
);
numeric_id!(
    /// Identifier of a public inquiry.
    InquiryId
);
numeric_id!(
    /// Identifier of a login account.
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_raw_value() {
        assert_eq!(MemberId::new(42).to_string(), "42");
        assert_eq!(GoalId::new(7).value(), 7);
    }

    #[test]
    fn ids_parse_from_path_segments() {
        let id: PlanId = " 12 ".parse().unwrap();
        assert_eq!(id, PlanId::new(12));
        assert!("abc".parse::<PlanId>().is_err());
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&UserId::new(3)).unwrap();
        assert_eq!(json, "3");
    }
}
