//! Region-scoped record listings

use anyhow::Result;
use chrono::Utc;
use colored::*;
use complaintdesk_api_types::{Complaint, StaffUser, UserRole};
use complaintdesk_rbac::{require_permission, AccessEnforcer, ActionType, ResourceType};
use tracing::info;

use crate::analytics::ComplaintAnalytics;
use crate::output::{print_heading, print_info, print_json, print_table};
use crate::queries::ComplaintQuery;
use crate::source::RowSource;

/// Complaints the role may see, after region scoping and query filters
pub fn visible_complaints(
    enforcer: &AccessEnforcer,
    role: UserRole,
    complaints: Vec<Complaint>,
    query: &ComplaintQuery,
) -> Result<Vec<Complaint>> {
    require_permission!(enforcer, role, ResourceType::Complaints, ActionType::Read);

    let scoped = enforcer.filter_by_region_access(role, &complaints);
    info!(
        role = role.as_str(),
        fetched = complaints.len(),
        visible = scoped.len(),
        "Complaints scoped to role"
    );
    Ok(query.apply(scoped))
}

pub async fn complaints_command(
    enforcer: &AccessEnforcer,
    role: UserRole,
    source: &RowSource,
    query: &ComplaintQuery,
    json: bool,
) -> Result<()> {
    let complaints = visible_complaints(enforcer, role, source.complaints().await?, query)?;

    if json {
        return print_json(&complaints);
    }

    print_heading(&format!(
        "{} complaint(s) from {}",
        complaints.len(),
        source.describe()
    ));
    let rows: Vec<Vec<String>> = complaints
        .iter()
        .map(|c| {
            vec![
                c.id_or_unknown().to_string(),
                c.title.clone().unwrap_or_default(),
                c.region.clone().unwrap_or_default(),
                c.status.clone().unwrap_or_default(),
                c.priority.clone().unwrap_or_default(),
                c.created_at.clone().unwrap_or_default(),
            ]
        })
        .collect();
    print_table(&["ID", "Title", "Region", "Status", "Priority", "Created"], &rows);
    Ok(())
}

pub fn visible_users(enforcer: &AccessEnforcer, role: UserRole, users: Vec<StaffUser>) -> Result<Vec<StaffUser>> {
    require_permission!(enforcer, role, ResourceType::Users, ActionType::Read);
    Ok(enforcer.filter_by_region_access(role, &users))
}

pub async fn users_command(enforcer: &AccessEnforcer, role: UserRole, source: &RowSource) -> Result<()> {
    let users = visible_users(enforcer, role, source.users().await?)?;

    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|u| {
            vec![
                u.id_or_unknown().to_string(),
                u.name.clone().unwrap_or_default(),
                u.role.clone().unwrap_or_default(),
                u.region.clone().unwrap_or_default(),
                if u.is_active { "active" } else { "inactive" }.to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "Name", "Role", "Region", "Status"], &rows);
    Ok(())
}

pub fn analytics_for(
    enforcer: &AccessEnforcer,
    role: UserRole,
    complaints: Vec<Complaint>,
) -> Result<ComplaintAnalytics> {
    require_permission!(enforcer, role, ResourceType::Reports, ActionType::Read);

    let scoped = enforcer.filter_by_region_access(role, &complaints);
    Ok(ComplaintAnalytics::compute(
        &scoped,
        enforcer.accessible_regions(role),
        Utc::now(),
    ))
}

pub async fn analytics_command(enforcer: &AccessEnforcer, role: UserRole, source: &RowSource) -> Result<()> {
    let stats = analytics_for(enforcer, role, source.complaints().await?)?;

    print_heading("Analytics Dashboard");
    println!("  Total complaints: {}", stats.total.to_string().bold());
    println!("  Open:             {}", stats.open);
    println!("  In progress:      {}", stats.in_progress);
    println!(
        "  Resolved:         {} ({:.1}%)",
        stats.resolved, stats.resolution_rate
    );
    println!(
        "  Critical:         {} ({:.1}%)",
        stats.critical.to_string().bright_red(),
        stats.critical_rate
    );
    println!("  Filed this week:  {}", stats.created_this_week);

    if stats.by_region.is_empty() {
        print_info("No complaints in accessible regions");
        return Ok(());
    }

    let regions: Vec<Vec<String>> = stats
        .by_region
        .iter()
        .map(|r| {
            vec![
                r.region.to_string(),
                r.total.to_string(),
                r.open.to_string(),
                r.resolved.to_string(),
            ]
        })
        .collect();
    print_table(&["Region", "Total", "Open", "Resolved"], &regions);

    let categories: Vec<Vec<String>> = stats
        .by_category
        .iter()
        .map(|c| {
            vec![
                c.category.clone(),
                c.count.to_string(),
                format!("{:.1}%", c.percentage),
            ]
        })
        .collect();
    print_table(&["Category", "Count", "Share"], &categories);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use complaintdesk_rbac::RbacError;
    use serde_json::json;

    fn complaints() -> Vec<Complaint> {
        serde_json::from_value(json!([
            { "ID": "CMP-1", "Region": "Addis Ababa", "Status": "open", "Created At": "2024-01-01" },
            { "ID": "CMP-2", "Region": "Amhara", "Status": "open", "Created At": "2024-01-03" },
            { "ID": "CMP-3", "Region": "Addis Ababa", "Status": "resolved", "Created At": "2024-01-02" },
            { "ID": "CMP-4", "Region": null, "Status": "open" }
        ]))
        .unwrap()
    }

    fn ids(complaints: &[Complaint]) -> Vec<&str> {
        complaints.iter().map(|c| c.id_or_unknown()).collect()
    }

    #[test]
    fn test_technician_sees_home_region_newest_first() {
        let enforcer = AccessEnforcer::builtin();
        let visible =
            visible_complaints(&enforcer, UserRole::Technician, complaints(), &ComplaintQuery::default()).unwrap();
        assert_eq!(ids(&visible), vec!["CMP-3", "CMP-1"]);
    }

    #[test]
    fn test_call_attendant_sees_every_region_but_not_malformed() {
        let enforcer = AccessEnforcer::builtin();
        let visible =
            visible_complaints(&enforcer, UserRole::CallAttendant, complaints(), &ComplaintQuery::default()).unwrap();
        assert_eq!(ids(&visible), vec!["CMP-2", "CMP-3", "CMP-1"]);
    }

    #[test]
    fn test_users_listing_requires_read() {
        let enforcer = AccessEnforcer::builtin();
        let err = visible_users(&enforcer, UserRole::Technician, Vec::new()).unwrap_err();
        assert!(err.downcast_ref::<RbacError>().unwrap().is_permission_denied());
        assert!(visible_users(&enforcer, UserRole::Foreman, Vec::new()).is_ok());
    }

    #[test]
    fn test_analytics_requires_reports_read() {
        let enforcer = AccessEnforcer::builtin();
        assert!(analytics_for(&enforcer, UserRole::CallAttendant, complaints()).is_err());

        let stats = analytics_for(&enforcer, UserRole::Foreman, complaints()).unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.by_region.len(), 1);

        let stats = analytics_for(&enforcer, UserRole::Manager, complaints()).unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_region.len(), 2);
    }
}
