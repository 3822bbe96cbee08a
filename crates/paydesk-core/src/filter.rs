//! Client-side filtering and search over the payment list
//!
//! The filtered view is a pure function of the full list and a
//! [`FilterState`]; it is recomputed on every render and preserves order.

use serde::{Deserialize, Serialize};

use crate::models::Payment;
use crate::types::{CourseFilter, FilterOption, MethodFilter, StatusFilter, YearFilter};

/// Search string plus the four selector dimensions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub search: String,
    pub course: CourseFilter,
    pub year: YearFilter,
    pub status: StatusFilter,
    pub method: MethodFilter,
}

impl FilterState {
    /// Build from raw request parameters; unknown selector values mean "All"
    pub fn from_params(
        search: Option<&str>,
        course: Option<&str>,
        year: Option<&str>,
        status: Option<&str>,
        method: Option<&str>,
    ) -> Self {
        Self {
            search: search.unwrap_or_default().to_string(),
            course: CourseFilter::from_param(course),
            year: YearFilter::from_param(year),
            status: StatusFilter::from_param(status),
            method: MethodFilter::from_param(method),
        }
    }

    /// True when no dimension narrows the list
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty()
            && self.course == CourseFilter::All
            && self.year == YearFilter::All
            && self.status == StatusFilter::All
            && self.method == MethodFilter::All
    }

    /// Whether a single payment passes every dimension
    pub fn matches(&self, payment: &Payment) -> bool {
        matches_search(payment, &self.search)
            && self.matches_course(payment)
            && self.matches_year(payment)
            && self.matches_status(payment)
            && self.matches_method(payment)
    }

    fn matches_course(&self, payment: &Payment) -> bool {
        match self.course.code() {
            None => true,
            Some(code) => payment.user_course() == Some(code),
        }
    }

    fn matches_year(&self, payment: &Payment) -> bool {
        match self.year {
            YearFilter::All => true,
            YearFilter::Year(year) => payment.user_year() == Some(year.to_string()),
        }
    }

    fn matches_status(&self, payment: &Payment) -> bool {
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => payment.status == Some(status),
        }
    }

    fn matches_method(&self, payment: &Payment) -> bool {
        match self.method.raw() {
            None => true,
            Some(raw) => payment.payment_method.as_deref() == Some(raw),
        }
    }
}

/// Case-insensitive substring search over the searchable fields
///
/// Searched: user id, name, email, course, year, payment method,
/// reference code and status. The record id is not searched.
pub fn matches_search(payment: &Payment, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    let status = payment.status.map(|s| s.as_str());
    let year = payment.user_year();

    [
        payment.user_id(),
        payment.user_name(),
        payment.user_email(),
        payment.user_course(),
        year.as_deref(),
        payment.payment_method.as_deref(),
        payment.transaction_id.as_deref(),
        status,
    ]
    .iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Order-preserving subset of `payments` that passes `filter`
pub fn filter_payments<'a>(payments: &'a [Payment], filter: &FilterState) -> Vec<&'a Payment> {
    payments.iter().filter(|p| filter.matches(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{UserSummary, YearValue};
    use crate::types::PaymentStatus;

    fn student(id: &str, name: &str, course: &str, year: i64) -> UserSummary {
        UserSummary {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            email: Some(format!("{}@school.edu", name.to_lowercase())),
            course: Some(course.to_string()),
            year: Some(YearValue::Number(year.into())),
        }
    }

    fn sample() -> Vec<Payment> {
        vec![
            Payment::new("a1", PaymentStatus::Unpaid)
                .with_user(student("2021-001", "Ana", "BSCS", 1))
                .with_method("Cash"),
            Payment::new("a2", PaymentStatus::Pending)
                .with_user(student("2021-002", "Ben", "BSIT", 2))
                .with_method("GCash")
                .with_transaction_id("GC-7781"),
            Payment::new("a3", PaymentStatus::Paid)
                .with_user(student("2022-003", "Cara", "BSCS", 3))
                .with_method("digital")
                .with_transaction_id("DG-0042"),
            Payment::new("a4", PaymentStatus::Paid),
        ]
    }

    fn ids(list: &[&Payment]) -> Vec<String> {
        list.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_default_filter_returns_everything_in_order() {
        let payments = sample();
        let filter = FilterState::default();
        assert!(filter.is_unfiltered());
        assert_eq!(ids(&filter_payments(&payments, &filter)), vec!["a1", "a2", "a3", "a4"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let payments = sample();
        let filter = FilterState { search: "ANA".to_string(), ..Default::default() };
        assert_eq!(ids(&filter_payments(&payments, &filter)), vec!["a1"]);
    }

    #[test]
    fn test_search_covers_each_field() {
        let payments = sample();
        for (needle, expected) in [
            ("2021-002", vec!["a2"]),
            ("cara@", vec!["a3"]),
            ("bsit", vec!["a2"]),
            ("gc-77", vec!["a2"]),
            ("digital", vec!["a3"]),
            ("pending", vec!["a2"]),
        ] {
            let filter = FilterState { search: needle.to_string(), ..Default::default() };
            assert_eq!(ids(&filter_payments(&payments, &filter)), expected, "needle {}", needle);
        }
    }

    #[test]
    fn test_search_on_year() {
        let payments = sample();
        let filter = FilterState { search: "3".to_string(), ..Default::default() };
        // year 3 for Cara, and "2022-003" id
        assert_eq!(ids(&filter_payments(&payments, &filter)), vec!["a3"]);
    }

    #[test]
    fn test_search_ignores_record_id() {
        let payments = sample();
        let filter = FilterState { search: "a4".to_string(), ..Default::default() };
        assert!(filter_payments(&payments, &filter).is_empty());
    }

    #[test]
    fn test_paid_search_also_matches_unpaid() {
        let payments = sample();
        let filter = FilterState { search: "paid".to_string(), ..Default::default() };
        assert_eq!(ids(&filter_payments(&payments, &filter)), vec!["a1", "a3", "a4"]);
    }

    #[test]
    fn test_selectors_combine_with_and() {
        let payments = sample();
        let filter = FilterState {
            course: CourseFilter::Bscs,
            status: StatusFilter::Only(PaymentStatus::Paid),
            ..Default::default()
        };
        assert_eq!(ids(&filter_payments(&payments, &filter)), vec!["a3"]);

        let filter = FilterState {
            course: CourseFilter::Bscs,
            year: YearFilter::Year(2),
            ..Default::default()
        };
        assert!(filter_payments(&payments, &filter).is_empty());
    }

    #[test]
    fn test_year_filter_matches_string_years() {
        let payments = vec![Payment::new("s1", PaymentStatus::Unpaid).with_user(UserSummary {
            year: Some(YearValue::Text("4".to_string())),
            ..Default::default()
        })];
        let filter = FilterState { year: YearFilter::Year(4), ..Default::default() };
        assert_eq!(filter_payments(&payments, &filter).len(), 1);
    }

    #[test]
    fn test_method_filter_is_exact_on_raw_value() {
        let payments = sample();
        let filter = FilterState { method: MethodFilter::GCash, ..Default::default() };
        assert_eq!(ids(&filter_payments(&payments, &filter)), vec!["a2"]);

        // "digital" is displayed as Digital but is not the GCash option
        let filter = FilterState { method: MethodFilter::Cash, ..Default::default() };
        assert_eq!(ids(&filter_payments(&payments, &filter)), vec!["a1"]);
    }

    #[test]
    fn test_from_params() {
        let filter = FilterState::from_params(Some("ben"), Some("BSIT"), Some("2"), Some("Pending"), Some("bogus"));
        assert_eq!(filter.search, "ben");
        assert_eq!(filter.course, CourseFilter::Bsit);
        assert_eq!(filter.year, YearFilter::Year(2));
        assert_eq!(filter.status, StatusFilter::Only(PaymentStatus::Pending));
        assert_eq!(filter.method, MethodFilter::All);
    }
}
