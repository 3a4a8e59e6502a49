//! Custom role tables loaded through the access configuration domain

use anyhow::Result;
use complaintdesk_api_types::UserRole;
use complaintdesk_config::{AccessConfig, ConfigLoader};
use complaintdesk_rbac::{AccessEnforcer, RbacConfig, RbacError};
use std::io::Write;
use tempfile::NamedTempFile;

const FULL_TABLE: &str = r#"
roles:
  admin:
    permissions:
      - create:complaints
      - read:complaints
      - update:complaints
      - delete:complaints
      - read:users
      - read:reports
      - read:settings
    can_assign_complaint: true
    can_set_high_priority: true
    accessible_regions: all
  manager:
    permissions: ["read:complaints", "read:reports"]
    can_assign_complaint: true
    accessible_regions: all
  foreman:
    permissions: ["read:complaints", "update:complaints"]
    accessible_regions: ["Oromia", "Sidama", "Oromia"]
  call-attendant:
    permissions: ["create:complaints", "read:complaints"]
    accessible_regions: ["Dire Dawa"]
  technician:
    permissions: ["read:complaints"]
    accessible_regions: ["Harari"]
"#;

fn roles_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn enforcer_for(contents: &str) -> Result<AccessEnforcer, RbacError> {
    let file = roles_file(contents);
    let access = AccessConfig {
        enable_audit_logging: false,
        roles_file: Some(file.path().to_path_buf()),
    };
    let rbac = RbacConfig::from_access_config(&access)?;
    AccessEnforcer::from_config(&rbac)
}

#[test]
fn test_custom_table_replaces_builtin() -> Result<()> {
    let file = roles_file(FULL_TABLE);
    let yaml = format!(
        "access:\n  enable_audit_logging: true\n  roles_file: \"{}\"\n",
        file.path().display()
    );
    let config = ConfigLoader::new().from_yaml_str(&yaml)?;
    let enforcer = AccessEnforcer::from_config(&RbacConfig::from_access_config(&config.access)?)?;

    assert!(!enforcer.has_permission_str("admin", "users", "delete")?);
    assert!(enforcer.has_permission_str("admin", "settings", "read")?);
    assert!(!enforcer.has_permission_str("manager", "users", "read")?);

    let foreman = enforcer.accessible_regions(UserRole::Foreman);
    assert_eq!(foreman.describe(), "Oromia, Sidama");
    assert!(enforcer.can_access_region(UserRole::Foreman, Some("Sidama")));
    assert!(!enforcer.can_access_region(UserRole::Foreman, Some("Addis Ababa")));
    assert!(enforcer.can_access_region(UserRole::CallAttendant, Some("Dire Dawa")));
    assert!(!enforcer.can_access_region(UserRole::CallAttendant, Some("Nowhereland")));
    assert!(!enforcer.can_set_high_priority(UserRole::Manager));
    Ok(())
}

#[test]
fn test_missing_role_is_invalid_config() {
    let table = FULL_TABLE.replace("  technician:", "  retired-technician:");
    let err = enforcer_for(&table).unwrap_err();
    assert!(matches!(err, RbacError::InvalidConfig { .. }), "{err}");
}

#[test]
fn test_unknown_permission_string_is_invalid_config() {
    let table = FULL_TABLE.replace("read:reports\"]", "read:notifications\"]");
    let err = enforcer_for(&table).unwrap_err();
    assert!(matches!(err, RbacError::InvalidConfig { .. }), "{err}");
}

#[test]
fn test_unknown_region_is_rejected() {
    let table = FULL_TABLE.replace("[\"Harari\"]", "[\"Atlantis\"]");
    assert!(enforcer_for(&table).is_err());
}

#[test]
fn test_empty_region_list_is_rejected() {
    let table = FULL_TABLE.replace("[\"Harari\"]", "[]");
    assert!(enforcer_for(&table).is_err());
}

#[test]
fn test_region_keyword_other_than_all_is_rejected() {
    let table = FULL_TABLE.replacen("accessible_regions: all", "accessible_regions: everywhere", 1);
    let err = enforcer_for(&table).unwrap_err();
    assert!(matches!(err, RbacError::InvalidConfig { .. }), "{err}");
}

#[test]
fn test_builtin_table_round_trips_through_yaml() -> Result<()> {
    let yaml = RbacConfig::default().to_yaml()?;
    let enforcer = enforcer_for(&yaml)?;
    let builtin = AccessEnforcer::builtin();

    for role in UserRole::ALL {
        assert_eq!(enforcer.role_permissions(role), builtin.role_permissions(role));
    }
    Ok(())
}
