use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ParseEnumError;

/// Staff roles known to the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserRole {
    Admin,
    Manager,
    Foreman,
    CallAttendant,
    Technician,
}

impl UserRole {
    /// Every role, in display order
    pub const ALL: [UserRole; 5] = [
        UserRole::Admin,
        UserRole::Manager,
        UserRole::Foreman,
        UserRole::CallAttendant,
        UserRole::Technician,
    ];

    /// Wire name used by the backend and the session
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::Foreman => "foreman",
            UserRole::CallAttendant => "call-attendant",
            UserRole::Technician => "technician",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            UserRole::Admin => "Administrator",
            UserRole::Manager => "Manager",
            UserRole::Foreman => "Foreman",
            UserRole::CallAttendant => "Call Attendant",
            UserRole::Technician => "Technician",
        }
    }

    /// Title of the landing dashboard shown to this role
    pub fn dashboard_title(&self) -> &'static str {
        match self {
            UserRole::Admin => "System Administration Dashboard",
            UserRole::Manager => "Regional Management Dashboard",
            UserRole::Foreman => "Field Operations Dashboard",
            UserRole::CallAttendant => "Customer Service Dashboard",
            UserRole::Technician => "Technician Dashboard",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("role", s))
    }
}

/// Administrative regions served by the utility.
///
/// Names are matched exactly; no case folding or trimming is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "Addis Ababa")]
    AddisAbaba,
    Amhara,
    Oromia,
    Tigray,
    #[serde(rename = "SNNPR")]
    Snnpr,
    #[serde(rename = "Benishangul-Gumuz")]
    BenishangulGumuz,
    Afar,
    Somali,
    Gambela,
    Harari,
    #[serde(rename = "Dire Dawa")]
    DireDawa,
    Sidama,
}

impl Region {
    pub const ALL: [Region; 12] = [
        Region::AddisAbaba,
        Region::Amhara,
        Region::Oromia,
        Region::Tigray,
        Region::Snnpr,
        Region::BenishangulGumuz,
        Region::Afar,
        Region::Somali,
        Region::Gambela,
        Region::Harari,
        Region::DireDawa,
        Region::Sidama,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::AddisAbaba => "Addis Ababa",
            Region::Amhara => "Amhara",
            Region::Oromia => "Oromia",
            Region::Tigray => "Tigray",
            Region::Snnpr => "SNNPR",
            Region::BenishangulGumuz => "Benishangul-Gumuz",
            Region::Afar => "Afar",
            Region::Somali => "Somali",
            Region::Gambela => "Gambela",
            Region::Harari => "Harari",
            Region::DireDawa => "Dire Dawa",
            Region::Sidama => "Sidama",
        }
    }

    /// Exact, case-sensitive lookup. Returns `None` for anything else.
    pub fn lookup(name: &str) -> Option<Region> {
        Region::ALL.into_iter().find(|region| region.as_str() == name)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::lookup(s).ok_or_else(|| ParseEnumError::new("region", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplaintStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
    Cancelled,
}

impl ComplaintStatus {
    pub const ALL: [ComplaintStatus; 5] = [
        ComplaintStatus::Open,
        ComplaintStatus::InProgress,
        ComplaintStatus::Resolved,
        ComplaintStatus::Closed,
        ComplaintStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Open => "open",
            ComplaintStatus::InProgress => "in-progress",
            ComplaintStatus::Resolved => "resolved",
            ComplaintStatus::Closed => "closed",
            ComplaintStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComplaintStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("status", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl ComplaintPriority {
    pub const ALL: [ComplaintPriority; 4] = [
        ComplaintPriority::Low,
        ComplaintPriority::Medium,
        ComplaintPriority::High,
        ComplaintPriority::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintPriority::Low => "low",
            ComplaintPriority::Medium => "medium",
            ComplaintPriority::High => "high",
            ComplaintPriority::Critical => "critical",
        }
    }

    /// High and critical complaints need an elevated role to be filed
    pub fn is_elevated(&self) -> bool {
        matches!(self, ComplaintPriority::High | ComplaintPriority::Critical)
    }
}

impl fmt::Display for ComplaintPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintPriority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComplaintPriority::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("priority", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names_round_trip() {
        for role in UserRole::ALL {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
        let json = serde_json::to_string(&UserRole::CallAttendant).unwrap();
        assert_eq!(json, "\"call-attendant\"");
    }

    #[test]
    fn test_role_parse_is_strict() {
        assert!("Admin".parse::<UserRole>().is_err());
        assert!("call_attendant".parse::<UserRole>().is_err());
        assert!("".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_region_lookup_is_case_sensitive() {
        assert_eq!(Region::lookup("Addis Ababa"), Some(Region::AddisAbaba));
        assert_eq!(Region::lookup("addis ababa"), None);
        assert_eq!(Region::lookup(" Addis Ababa"), None);
        assert_eq!(Region::lookup("Nowhereland"), None);
    }

    #[test]
    fn test_twelve_distinct_regions() {
        let names: std::collections::HashSet<_> =
            Region::ALL.iter().map(|region| region.as_str()).collect();
        assert_eq!(names.len(), 12);

        for region in Region::ALL {
            let json = serde_json::to_string(&region).unwrap();
            assert_eq!(json, format!("\"{}\"", region.as_str()));
        }
    }

    #[test]
    fn test_priority_elevation() {
        assert!(!ComplaintPriority::Low.is_elevated());
        assert!(!ComplaintPriority::Medium.is_elevated());
        assert!(ComplaintPriority::High.is_elevated());
        assert!(ComplaintPriority::Critical.is_elevated());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "in-progress".parse::<ComplaintStatus>().unwrap(),
            ComplaintStatus::InProgress
        );
        assert!("pending".parse::<ComplaintStatus>().is_err());
    }
}
