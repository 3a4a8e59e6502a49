//! Commands that inspect the permission matrix

use anyhow::Result;
use colored::*;
use complaintdesk_api_types::UserRole;
use complaintdesk_rbac::{roles, AccessEnforcer, ActionType, ResourceType};
use tracing::info;

use crate::output::{print_error, print_heading, print_success, print_table, yes_no};

/// Overview of every role, as on the role management page
pub fn roles_command(enforcer: &AccessEnforcer) -> Result<()> {
    let rows: Vec<Vec<String>> = enforcer
        .matrix()
        .iter()
        .map(|row| {
            vec![
                row.role.as_str().to_string(),
                row.role.dashboard_title().to_string(),
                row.accessible_regions.describe(),
                yes_no(row.can_assign_complaint).to_string(),
                yes_no(row.can_set_high_priority).to_string(),
            ]
        })
        .collect();

    print_table(
        &["Role", "Dashboard", "Regions", "Assign", "High priority"],
        &rows,
    );
    Ok(())
}

pub fn permissions_command(enforcer: &AccessEnforcer, role: UserRole) -> Result<()> {
    let permissions = enforcer.role_permissions(role);

    print_heading(&format!("{} ({})", role.display_name(), role.dashboard_title()));

    let rows: Vec<Vec<String>> = ResourceType::ALL
        .into_iter()
        .map(|resource| {
            std::iter::once(resource.as_str().to_string())
                .chain(
                    ActionType::ALL
                        .into_iter()
                        .map(|action| yes_no(permissions.allows(resource, action)).to_string()),
                )
                .collect()
        })
        .collect();
    print_table(&["Resource", "Create", "Read", "Update", "Delete"], &rows);

    println!("  Regions:           {}", permissions.accessible_regions.describe());
    println!("  Assign complaints: {}", yes_no(permissions.can_assign_complaint));
    println!(
        "  Priorities:        {}",
        enforcer
            .available_priorities(role)
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    if roles::can_edit_roles(role) {
        println!(
            "  May grant roles:   {}",
            roles::assignable_roles(role)
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    Ok(())
}

/// Untrusted names go through the string entry point so unknown values are
/// reported as invalid rather than silently denied
pub fn check_command(enforcer: &AccessEnforcer, role: &str, resource: &str, action: &str) -> Result<bool> {
    let allowed = enforcer.has_permission_str(role, resource, action)?;
    info!(role, resource, action, allowed, "Permission check");

    if allowed {
        print_success(&format!("{} may {} {}", role, action, resource));
    } else {
        print_error(&format!("{} may not {} {}", role, action, resource));
    }
    Ok(allowed)
}

pub fn regions_command(enforcer: &AccessEnforcer, role: &str) -> Result<()> {
    let access = enforcer.accessible_regions_str(role)?;

    if access.is_all() {
        println!("{} {}", role.bold(), "sees every region".bright_green());
    }
    for region in access.expand() {
        println!("  {}", region);
    }
    Ok(())
}

pub fn grant_command(enforcer: &AccessEnforcer, actor: UserRole, target: UserRole) -> Result<bool> {
    match enforcer.check_role_change(actor, target) {
        Ok(()) => {
            print_success(&format!("{} may grant the {} role", actor, target));
            Ok(true)
        }
        Err(e) if e.is_permission_denied() => {
            print_error(&e.to_string());
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}
