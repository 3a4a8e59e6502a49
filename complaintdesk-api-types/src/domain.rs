use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::conversions::{active_flag, lenient_string, parse_timestamp, region_field};
use crate::enums::{ComplaintPriority, ComplaintStatus, Region, UserRole};
use crate::errors::{MalformedRecord, ParseEnumError};

/// Anything tagged with a region that access filtering can scope.
///
/// `None` means the record carried no string region at all.
pub trait RegionScoped {
    fn region(&self) -> Option<&str>;
}

impl<T: RegionScoped + ?Sized> RegionScoped for &T {
    fn region(&self) -> Option<&str> {
        (**self).region()
    }
}

impl<T: RegionScoped + ?Sized> RegionScoped for Box<T> {
    fn region(&self) -> Option<&str> {
        (**self).region()
    }
}

/// Untyped JSON rows: the `region` key (or the backend's `Region` column) if
/// it holds a string.
impl RegionScoped for Value {
    fn region(&self) -> Option<&str> {
        self.get("region")
            .or_else(|| self.get("Region"))
            .and_then(Value::as_str)
    }
}

fn region_or_error(record_id: &str, region: Option<&str>) -> Result<Region, MalformedRecord> {
    match region {
        None => Err(MalformedRecord::MissingRegion {
            record_id: record_id.to_string(),
        }),
        Some(name) => Region::lookup(name).ok_or_else(|| MalformedRecord::UnknownRegion {
            record_id: record_id.to_string(),
            region: name.to_string(),
        }),
    }
}

/// Complaint row as returned by `getComplaints`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    #[serde(rename = "ID", alias = "id", default, deserialize_with = "lenient_string")]
    pub id: Option<String>,

    #[serde(rename = "Customer ID", alias = "customerId", default, deserialize_with = "lenient_string")]
    pub customer_id: Option<String>,

    #[serde(rename = "Customer Name", alias = "customerName", default, deserialize_with = "lenient_string")]
    pub customer_name: Option<String>,

    #[serde(rename = "Title", alias = "title", default, deserialize_with = "lenient_string")]
    pub title: Option<String>,

    #[serde(rename = "Category", alias = "category", default, deserialize_with = "lenient_string")]
    pub category: Option<String>,

    #[serde(rename = "Priority", alias = "priority", default, deserialize_with = "lenient_string")]
    pub priority: Option<String>,

    #[serde(rename = "Status", alias = "status", default, deserialize_with = "lenient_string")]
    pub status: Option<String>,

    #[serde(rename = "Region", alias = "region", default, deserialize_with = "region_field")]
    pub region: Option<String>,

    #[serde(rename = "Assigned To", alias = "assignedTo", default, deserialize_with = "lenient_string")]
    pub assigned_to: Option<String>,

    #[serde(rename = "Assigned By", alias = "assignedBy", default, deserialize_with = "lenient_string")]
    pub assigned_by: Option<String>,

    #[serde(rename = "Created By", alias = "createdBy", default, deserialize_with = "lenient_string")]
    pub created_by: Option<String>,

    #[serde(rename = "Created At", alias = "createdAt", default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,

    #[serde(rename = "Updated At", alias = "updatedAt", default, deserialize_with = "lenient_string")]
    pub updated_at: Option<String>,

    #[serde(rename = "Resolved At", alias = "resolvedAt", default, deserialize_with = "lenient_string")]
    pub resolved_at: Option<String>,
}

impl Complaint {
    pub fn id_or_unknown(&self) -> &str {
        self.id.as_deref().unwrap_or("<unknown>")
    }

    /// Region checked against the fixed enumeration
    pub fn validated_region(&self) -> Result<Region, MalformedRecord> {
        region_or_error(self.id_or_unknown(), self.region.as_deref())
    }

    pub fn parsed_status(&self) -> Option<ComplaintStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn parsed_priority(&self) -> Option<ComplaintPriority> {
        self.priority.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }
}

impl RegionScoped for Complaint {
    fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

/// Staff row as returned by `getUsers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffUser {
    #[serde(rename = "ID", alias = "id", default, deserialize_with = "lenient_string")]
    pub id: Option<String>,

    #[serde(rename = "Name", alias = "name", default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(rename = "Email", alias = "email", default, deserialize_with = "lenient_string")]
    pub email: Option<String>,

    #[serde(rename = "Role", alias = "role", default, deserialize_with = "lenient_string")]
    pub role: Option<String>,

    #[serde(rename = "Region", alias = "region", default, deserialize_with = "region_field")]
    pub region: Option<String>,

    #[serde(rename = "Department", alias = "department", default, deserialize_with = "lenient_string")]
    pub department: Option<String>,

    #[serde(rename = "Phone", alias = "phone", default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,

    /// Anything other than an explicit `false` counts as active
    #[serde(rename = "Is Active", alias = "isActive", default = "default_active", deserialize_with = "active_flag")]
    pub is_active: bool,

    #[serde(rename = "Created At", alias = "createdAt", default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
}

fn default_active() -> bool {
    true
}

impl StaffUser {
    pub fn id_or_unknown(&self) -> &str {
        self.id.as_deref().unwrap_or("<unknown>")
    }

    pub fn parsed_role(&self) -> Result<UserRole, ParseEnumError> {
        match self.role.as_deref() {
            Some(role) => role.parse(),
            None => Err(ParseEnumError::new("role", "")),
        }
    }

    pub fn validated_region(&self) -> Result<Region, MalformedRecord> {
        region_or_error(self.id_or_unknown(), self.region.as_deref())
    }
}

impl RegionScoped for StaffUser {
    fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_complaint_from_spreadsheet_row() {
        let row = json!({
            "ID": "CMP-001",
            "Customer Name": "Abebe Kebede",
            "Title": "Power outage",
            "Priority": "high",
            "Status": "open",
            "Region": "Addis Ababa",
            "Created At": "2024-03-01T08:30:00Z"
        });

        let complaint: Complaint = serde_json::from_value(row).unwrap();
        assert_eq!(complaint.id.as_deref(), Some("CMP-001"));
        assert_eq!(complaint.region(), Some("Addis Ababa"));
        assert_eq!(complaint.validated_region().unwrap(), Region::AddisAbaba);
        assert_eq!(complaint.parsed_status(), Some(ComplaintStatus::Open));
        assert_eq!(complaint.parsed_priority(), Some(ComplaintPriority::High));
        assert!(complaint.created_at_utc().is_some());
    }

    #[test]
    fn test_complaint_lowercase_keys_and_numeric_id() {
        let row = json!({ "id": 42, "region": "Oromia", "status": "resolved" });
        let complaint: Complaint = serde_json::from_value(row).unwrap();
        assert_eq!(complaint.id.as_deref(), Some("42"));
        assert_eq!(complaint.region(), Some("Oromia"));
    }

    #[test]
    fn test_malformed_regions_become_markers() {
        for row in [
            json!({ "ID": "a" }),
            json!({ "ID": "b", "Region": null }),
            json!({ "ID": "c", "Region": 123 }),
            json!({ "ID": "d", "Region": ["Amhara"] }),
        ] {
            let complaint: Complaint = serde_json::from_value(row).unwrap();
            assert_eq!(complaint.region(), None);
            assert!(matches!(
                complaint.validated_region(),
                Err(MalformedRecord::MissingRegion { .. })
            ));
        }
    }

    #[test]
    fn test_unknown_region_string_is_kept_verbatim() {
        let complaint: Complaint =
            serde_json::from_value(json!({ "ID": "x", "Region": "addis ababa" })).unwrap();
        assert_eq!(complaint.region(), Some("addis ababa"));
        assert_eq!(
            complaint.validated_region(),
            Err(MalformedRecord::UnknownRegion {
                record_id: "x".to_string(),
                region: "addis ababa".to_string(),
            })
        );
    }

    #[test]
    fn test_json_value_region_scoped() {
        assert_eq!(json!({ "region": "Afar" }).region(), Some("Afar"));
        assert_eq!(json!({ "Region": "Afar" }).region(), Some("Afar"));
        assert_eq!(json!({ "region": 123 }).region(), None);
        assert_eq!(json!({}).region(), None);
        assert_eq!(json!("Afar").region(), None);
    }

    #[test]
    fn test_staff_user_active_flag() {
        let active: StaffUser = serde_json::from_value(json!({ "ID": "u1", "Role": "foreman" })).unwrap();
        assert!(active.is_active);
        assert_eq!(active.parsed_role().unwrap(), UserRole::Foreman);

        let inactive: StaffUser =
            serde_json::from_value(json!({ "ID": "u2", "Is Active": false })).unwrap();
        assert!(!inactive.is_active);
        assert!(inactive.parsed_role().is_err());

        let string_false: StaffUser =
            serde_json::from_value(json!({ "ID": "u3", "Is Active": "FALSE" })).unwrap();
        assert!(string_false.is_active);
    }
}
