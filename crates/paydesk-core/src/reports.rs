//! Report structures for API responses

use serde::Serialize;

use super::models::Payment;
use super::types::{CourseFilter, FilterOption, PaymentStatus};

/// Payment counts per status, for the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub total: usize,
    pub unpaid: usize,
    pub pending: usize,
    pub paid: usize,
    /// Records whose status is absent or unrecognised
    pub unset: usize,
}

impl StatusSummary {
    pub fn from_payments<'a>(payments: impl IntoIterator<Item = &'a Payment>) -> Self {
        let mut summary = Self::default();
        for payment in payments {
            summary.total += 1;
            match payment.status {
                Some(PaymentStatus::Unpaid) => summary.unpaid += 1,
                Some(PaymentStatus::Pending) => summary.pending += 1,
                Some(PaymentStatus::Paid) => summary.paid += 1,
                None => summary.unset += 1,
            }
        }
        summary
    }

    pub fn count(&self, status: PaymentStatus) -> usize {
        match status {
            PaymentStatus::Unpaid => self.unpaid,
            PaymentStatus::Pending => self.pending,
            PaymentStatus::Paid => self.paid,
        }
    }

    /// Share of records marked Paid, in percent (0 when empty)
    pub fn paid_percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            ((self.paid * 100) / self.total) as u32
        }
    }
}

/// Per-course status breakdown row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseBreakdown {
    pub course: String,
    pub summary: StatusSummary,
}

/// Status summary for each selectable course
pub fn course_breakdown(payments: &[Payment]) -> Vec<CourseBreakdown> {
    CourseFilter::options()
        .into_iter()
        .filter_map(|course| course.code())
        .map(|code| CourseBreakdown {
            course: code.to_string(),
            summary: StatusSummary::from_payments(
                payments.iter().filter(|p| p.user_course() == Some(code)),
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserSummary;

    fn enrolled(id: &str, course: &str, status: PaymentStatus) -> Payment {
        Payment::new(id, status).with_user(UserSummary {
            course: Some(course.to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_summary_counts() {
        let mut unknown = Payment::new("x", PaymentStatus::Paid);
        unknown.status = None;
        let payments = vec![
            enrolled("1", "BSCS", PaymentStatus::Paid),
            enrolled("2", "BSCS", PaymentStatus::Unpaid),
            enrolled("3", "BSIT", PaymentStatus::Pending),
            enrolled("4", "BSIT", PaymentStatus::Paid),
            unknown,
        ];
        let summary = StatusSummary::from_payments(&payments);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.count(PaymentStatus::Paid), 2);
        assert_eq!(summary.unpaid, 1);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.unset, 1);
        assert_eq!(summary.paid_percent(), 40);
    }

    #[test]
    fn test_empty_summary() {
        let summary = StatusSummary::from_payments(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.paid_percent(), 0);
    }

    #[test]
    fn test_course_breakdown() {
        let payments = vec![
            enrolled("1", "BSCS", PaymentStatus::Paid),
            enrolled("2", "BSIT", PaymentStatus::Unpaid),
            enrolled("3", "BSN", PaymentStatus::Unpaid),
        ];
        let rows = course_breakdown(&payments);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].course, "BSCS");
        assert_eq!(rows[0].summary.paid, 1);
        assert_eq!(rows[1].course, "BSIT");
        assert_eq!(rows[1].summary.unpaid, 1);
    }
}
