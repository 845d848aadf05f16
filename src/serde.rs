#![cfg(any(feature = "serde", test))]

use ::serde::ser::SerializeStruct;
use ::serde::{Serialize, Serializer};

use crate::experiment::ExperimentRow;

// Durations are written as whole microseconds, which is what the timing exports and plots use.
impl Serialize for ExperimentRow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("ExperimentRow", 5)?;
        s.serialize_field("num_symbols", &self.num_symbols)?;
        s.serialize_field("total_permutations", &self.total_permutations)?;
        s.serialize_field("all_permutations_us", &micros(self.all_permutations))?;
        s.serialize_field("by_traversal_us", &micros(self.by_traversal))?;
        s.serialize_field("by_factorial_us", &micros(self.by_factorial))?;
        s.end()
    }
}

fn micros(duration: std::time::Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use crate::experiment::ExperimentRow;
    use std::time::Duration;

    #[test]
    fn test_serialize_experiment_row() {
        let row = ExperimentRow {
            num_symbols: 3,
            total_permutations: 6,
            all_permutations: Duration::from_micros(12),
            by_traversal: Duration::from_nanos(3_900),
            by_factorial: Duration::from_micros(1),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "num_symbols": 3,
                "total_permutations": 6,
                "all_permutations_us": 12,
                "by_traversal_us": 3,
                "by_factorial_us": 1,
            })
        );
    }
}
