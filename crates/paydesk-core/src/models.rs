//! Core data models for payment review

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::borrow::Cow;

use super::types::{PaymentStatus, StatusTone};

/// Placeholder rendered for absent identifiers, methods and reference codes
pub const NOT_AVAILABLE: &str = "N/A";

/// Year level as sent by the backend: either a number or a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearValue {
    Number(serde_json::Number),
    Text(String),
}

impl std::fmt::Display for YearValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YearValue::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
                (Some(i), _, _) => write!(f, "{}", i),
                (_, Some(u), _) => write!(f, "{}", u),
                // 2.0 reads as year "2"
                (_, _, Some(x)) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.0}", x),
                _ => write!(f, "{}", n),
            },
            YearValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// User summary embedded in a payment record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Student/user identifier
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Course code (e.g., "BSCS")
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    /// Year level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<YearValue>,
}

/// Payment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique payment identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Paying user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
    /// Raw payment method (e.g., "cash", "digital", "GCash")
    #[serde(
        rename = "paymentMethod",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_method: Option<String>,
    /// Transaction/reference code
    #[serde(
        rename = "transactionId",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_id: Option<String>,
    /// Current status; `None` when absent or unrecognised
    #[serde(default, deserialize_with = "lenient_status", skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
}

/// Deserialize a status, treating unknown values and non-strings as unset
fn lenient_status<'de, D>(deserializer: D) -> Result<Option<PaymentStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match &raw {
        Value::Null => None,
        Value::String(value) => match value.parse() {
            Ok(status) => Some(status),
            Err(_) => {
                log::warn!("Ignoring unrecognised payment status {:?}", value);
                None
            }
        },
        other => {
            log::warn!("Ignoring non-string payment status {}", other);
            None
        }
    })
}

/// Deserialize a text field, stringifying numbers and booleans
///
/// Arrays and objects are dropped so one odd record cannot fail the list.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::Null => None,
        Value::String(value) => Some(value),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => {
            log::warn!("Ignoring non-scalar text field {}", other);
            None
        }
    })
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

impl Payment {
    /// Create a payment with only an id and status set
    pub fn new(id: impl Into<String>, status: PaymentStatus) -> Self {
        Self {
            id: id.into(),
            user: None,
            payment_method: None,
            transaction_id: None,
            status: Some(status),
        }
    }

    /// Attach a user summary
    pub fn with_user(mut self, user: UserSummary) -> Self {
        self.user = Some(user);
        self
    }

    /// Set the raw payment method
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = Some(method.into());
        self
    }

    /// Set the transaction/reference code
    pub fn with_transaction_id(mut self, code: impl Into<String>) -> Self {
        self.transaction_id = Some(code.into());
        self
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| non_empty(u.id.as_ref()))
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| non_empty(u.name.as_ref()))
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| non_empty(u.email.as_ref()))
    }

    pub fn user_course(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| non_empty(u.course.as_ref()))
    }

    /// Year level stringified the way the year selector compares it
    pub fn user_year(&self) -> Option<String> {
        self.user
            .as_ref()
            .and_then(|u| u.year.as_ref())
            .map(|y| y.to_string())
    }

    /// User identifier for display, "N/A" when absent
    pub fn user_id_label(&self) -> &str {
        self.user_id().unwrap_or(NOT_AVAILABLE)
    }

    /// Reference code for display, "N/A" when absent
    pub fn reference_label(&self) -> &str {
        non_empty(self.transaction_id.as_ref()).unwrap_or(NOT_AVAILABLE)
    }

    /// Payment method for display
    pub fn method_label(&self) -> Cow<'_, str> {
        payment_method_label(self.payment_method.as_deref())
    }

    /// Badge tone for the current status
    pub fn status_tone(&self) -> StatusTone {
        StatusTone::for_status(self.status)
    }
}

/// Display form of a raw payment method
///
/// "cash" and "digital" are normalised case-insensitively; anything else is
/// shown verbatim, and an absent or empty method shows as "N/A".
pub fn payment_method_label(raw: Option<&str>) -> Cow<'_, str> {
    match raw {
        None | Some("") => Cow::Borrowed(NOT_AVAILABLE),
        Some(method) if method.eq_ignore_ascii_case("cash") => Cow::Borrowed("Cash"),
        Some(method) if method.eq_ignore_ascii_case("digital") => Cow::Borrowed("Digital"),
        Some(method) => Cow::Borrowed(method),
    }
}
