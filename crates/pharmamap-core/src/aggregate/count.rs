//! Abbreviated count labels ("+4.5k", "+250").

use super::{AggregateError, AggregateResult};

/// Counts at or above this value are abbreviated with a `k` suffix.
const THOUSAND: i64 = 1000;

/// Format a usage/search count for display.
///
/// `None` means the element should not be rendered at all.
pub fn format_count(value: Option<i64>) -> AggregateResult<Option<String>> {
    let Some(value) = value else {
        return Ok(None);
    };

    if value < 0 {
        return Err(AggregateError::InvalidCount(value));
    }

    if value < THOUSAND {
        return Ok(Some(format!("+{}", value)));
    }

    if value % THOUSAND == 0 {
        return Ok(Some(format!("+{}k", value / THOUSAND)));
    }

    // Tenths of a thousand, rounded half-up.
    let tenths = value / 100 + i64::from(value % 100 >= 50);
    Ok(Some(format!("+{}.{}k", tenths / 10, tenths % 10)))
}
