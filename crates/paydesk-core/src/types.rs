//! Basic types for payment review: status, presentation tone, filter selectors

use serde::{Deserialize, Serialize};

/// Payment status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Nothing received yet
    Unpaid,
    /// Submitted, awaiting verification
    Pending,
    /// Settled
    Paid,
}

impl PaymentStatus {
    /// All statuses in the order the status selector offers them
    pub const ALL: [PaymentStatus; 3] = [
        PaymentStatus::Unpaid,
        PaymentStatus::Pending,
        PaymentStatus::Paid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "Unpaid",
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            _ => Err(format!("Invalid payment status: {}", s)),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Presentation emphasis for a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    /// Warning/alert emphasis
    Alert,
    /// Caution emphasis
    Caution,
    /// Success emphasis
    Success,
    /// Unset or unrecognised status
    Neutral,
}

impl StatusTone {
    /// Tone for a (possibly unset) status
    pub fn for_status(status: Option<PaymentStatus>) -> Self {
        match status {
            Some(PaymentStatus::Unpaid) => StatusTone::Alert,
            Some(PaymentStatus::Pending) => StatusTone::Caution,
            Some(PaymentStatus::Paid) => StatusTone::Success,
            None => StatusTone::Neutral,
        }
    }

    /// Tailwind classes for the badge border and text
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusTone::Alert => "border-red-600 text-red-600",
            StatusTone::Caution => "border-yellow-600 text-yellow-600",
            StatusTone::Success => "border-green-600 text-green-600",
            StatusTone::Neutral => "border-gray-500 text-gray-500",
        }
    }
}

// ==================== Filter Selectors ====================

/// A fixed-choice filter dimension rendered as a `<select>`
pub trait FilterOption: Sized + Copy + PartialEq + Default {
    /// Every option, "All" first
    fn options() -> Vec<Self>;
    /// Form value submitted for this option
    fn value(&self) -> String;
    /// Text shown to the operator
    fn label(&self) -> String;

    /// Parse a submitted value; unknown values fall back to "All"
    fn from_param(param: Option<&str>) -> Self {
        match param {
            Some(raw) => Self::options()
                .into_iter()
                .find(|option| option.value() == raw)
                .unwrap_or_default(),
            None => Self::default(),
        }
    }
}

/// Course selector (All | BSCS | BSIT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CourseFilter {
    #[default]
    All,
    #[serde(rename = "BSCS")]
    Bscs,
    #[serde(rename = "BSIT")]
    Bsit,
}

impl CourseFilter {
    /// Course code to match exactly, or `None` for "All"
    pub fn code(&self) -> Option<&'static str> {
        match self {
            CourseFilter::All => None,
            CourseFilter::Bscs => Some("BSCS"),
            CourseFilter::Bsit => Some("BSIT"),
        }
    }
}

impl FilterOption for CourseFilter {
    fn options() -> Vec<Self> {
        vec![CourseFilter::All, CourseFilter::Bscs, CourseFilter::Bsit]
    }

    fn value(&self) -> String {
        self.code().unwrap_or("All").to_string()
    }

    fn label(&self) -> String {
        self.value()
    }
}

/// Year selector (All | 1 | 2 | 3 | 4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum YearFilter {
    #[default]
    All,
    Year(u8),
}

impl FilterOption for YearFilter {
    fn options() -> Vec<Self> {
        let mut options = vec![YearFilter::All];
        options.extend((1..=4).map(YearFilter::Year));
        options
    }

    fn value(&self) -> String {
        match self {
            YearFilter::All => "All".to_string(),
            YearFilter::Year(year) => year.to_string(),
        }
    }

    fn label(&self) -> String {
        match self {
            YearFilter::All => "All".to_string(),
            YearFilter::Year(year) => paydesk_utils::ordinal(u32::from(*year)),
        }
    }
}

/// Status selector (All | Pending | Paid | Unpaid)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Only(PaymentStatus),
}

impl FilterOption for StatusFilter {
    fn options() -> Vec<Self> {
        vec![
            StatusFilter::All,
            StatusFilter::Only(PaymentStatus::Pending),
            StatusFilter::Only(PaymentStatus::Paid),
            StatusFilter::Only(PaymentStatus::Unpaid),
        ]
    }

    fn value(&self) -> String {
        match self {
            StatusFilter::All => "All".to_string(),
            StatusFilter::Only(status) => status.to_string(),
        }
    }

    fn label(&self) -> String {
        self.value()
    }
}

/// Payment-method selector (All | Cash | GCash)
///
/// Matching is exact on the raw wire value; "GCash" is labelled "Digital".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MethodFilter {
    #[default]
    All,
    Cash,
    #[serde(rename = "GCash")]
    GCash,
}

impl MethodFilter {
    /// Raw payment method to match exactly, or `None` for "All"
    pub fn raw(&self) -> Option<&'static str> {
        match self {
            MethodFilter::All => None,
            MethodFilter::Cash => Some("Cash"),
            MethodFilter::GCash => Some("GCash"),
        }
    }
}

impl FilterOption for MethodFilter {
    fn options() -> Vec<Self> {
        vec![MethodFilter::All, MethodFilter::Cash, MethodFilter::GCash]
    }

    fn value(&self) -> String {
        self.raw().unwrap_or("All").to_string()
    }

    fn label(&self) -> String {
        match self {
            MethodFilter::GCash => "Digital".to_string(),
            other => other.value(),
        }
    }
}
