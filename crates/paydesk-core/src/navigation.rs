//! Navigation shell: static sidebar entries and the signed-in user block

use serde::Serialize;

use crate::session::Session;

/// Organisation shown at the top of the sidebar
pub const ORGANIZATION: &str = "Integrated Confederacy";

/// Fallback display name when the session has none
pub const FALLBACK_NAME: &str = "Admin User";

/// Fallback email when the session has none
pub const FALLBACK_EMAIL: &str = "admin@example.com";

/// Sidebar icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavIcon {
    LayoutDashboard,
    CreditCard,
    UserPlus,
}

impl NavIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            NavIcon::LayoutDashboard => "📊",
            NavIcon::CreditCard => "💳",
            NavIcon::UserPlus => "👤",
        }
    }
}

/// Static navigation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: NavIcon,
}

pub const DASHBOARD: &str = "Dashboard";
pub const MANAGE_PAYMENTS: &str = "Manage Payments";
pub const ACCOUNT_CREATION: &str = "Manual Account Creation";

/// Sidebar entries, in display order
pub const NAV_ENTRIES: [NavEntry; 3] = [
    NavEntry { label: DASHBOARD, path: "/dashboard", icon: NavIcon::LayoutDashboard },
    NavEntry { label: MANAGE_PAYMENTS, path: "/manage-payments", icon: NavIcon::CreditCard },
    NavEntry { label: ACCOUNT_CREATION, path: "/account-creation", icon: NavIcon::UserPlus },
];

/// Navigation entry with its derived active flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: NavIcon,
    pub active: bool,
}

/// Entries with `active` set by exact label match on `current_section`
///
/// An unmatched section leaves every entry inactive.
pub fn navigation(current_section: &str) -> Vec<NavItem> {
    NAV_ENTRIES
        .iter()
        .map(|entry| NavItem {
            label: entry.label,
            path: entry.path,
            icon: entry.icon,
            active: entry.label == current_section,
        })
        .collect()
}

/// Identity shown at the bottom of the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarUser {
    pub name: String,
    pub email: String,
}

impl SidebarUser {
    /// Name and email from the session, with fixed fallbacks
    pub fn from_session(session: &Session) -> Self {
        let pick = |value: &Option<String>, fallback: &str| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };
        Self {
            name: pick(&session.name, FALLBACK_NAME),
            email: pick(&session.email, FALLBACK_EMAIL),
        }
    }

    /// Up to two initials for the avatar bubble
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}
