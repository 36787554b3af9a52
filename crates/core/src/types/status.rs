//! Order status values.
//!
//! The set of statuses stored in `orders.status` is data-driven: the loader
//! accepts whatever the CSV contains. [`OrderStatus`] names the values the
//! statistics queries count separately. Matching is case-sensitive equality
//! on [`OrderStatus::as_str`].

/// Order status counted in order statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Shipped,
    Complete,
    Cancelled,
}

impl OrderStatus {
    /// The literal value stored in the `orders.status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shipped => "Shipped",
            Self::Complete => "Complete",
            Self::Cancelled => "Cancelled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_column_values_are_capitalized() {
        assert_eq!(OrderStatus::Complete.as_str(), "Complete");
        assert_eq!(OrderStatus::Shipped.as_str(), "Shipped");
        assert_eq!(OrderStatus::Cancelled.as_str(), "Cancelled");
    }
}
