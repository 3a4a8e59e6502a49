//! Complaint statistics for the analytics view

use chrono::{DateTime, Duration, Utc};
use complaintdesk_api_types::{Complaint, ComplaintPriority, ComplaintStatus, Region};
use complaintdesk_rbac::RegionAccess;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionCounts {
    pub region: Region,
    pub total: usize,
    pub open: usize,
    pub resolved: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplaintAnalytics {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub critical: usize,
    pub created_this_week: usize,
    pub resolution_rate: f64,
    pub critical_rate: f64,

    /// Regions in the caller's scope that have at least one complaint
    pub by_region: Vec<RegionCounts>,

    /// Largest first
    pub by_category: Vec<CategoryCount>,
}

impl ComplaintAnalytics {
    /// `complaints` must already be region scoped
    pub fn compute(complaints: &[Complaint], access: &RegionAccess, now: DateTime<Utc>) -> Self {
        let total = complaints.len();
        let with_status =
            |status| complaints.iter().filter(|c| c.parsed_status() == Some(status)).count();

        let resolved = with_status(ComplaintStatus::Resolved);
        let critical = complaints
            .iter()
            .filter(|c| c.parsed_priority() == Some(ComplaintPriority::Critical))
            .count();
        let week_ago = now - Duration::days(7);
        let created_this_week = complaints
            .iter()
            .filter(|c| c.created_at_utc().is_some_and(|at| at > week_ago))
            .count();

        let by_region = access
            .expand()
            .into_iter()
            .map(|region| {
                let in_region: Vec<_> = complaints
                    .iter()
                    .filter(|c| c.region.as_deref() == Some(region.as_str()))
                    .collect();
                RegionCounts {
                    region,
                    total: in_region.len(),
                    open: in_region
                        .iter()
                        .filter(|c| c.parsed_status() == Some(ComplaintStatus::Open))
                        .count(),
                    resolved: in_region
                        .iter()
                        .filter(|c| c.parsed_status() == Some(ComplaintStatus::Resolved))
                        .count(),
                }
            })
            .filter(|counts| counts.total > 0)
            .collect();

        let mut categories: BTreeMap<&str, usize> = BTreeMap::new();
        for category in complaints.iter().filter_map(|c| c.category.as_deref()) {
            *categories.entry(category).or_default() += 1;
        }
        let mut by_category: Vec<_> = categories
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category: category.to_string(),
                count,
                percentage: percentage(count, total),
            })
            .collect();
        by_category.sort_by(|a, b| b.count.cmp(&a.count));

        Self {
            total,
            open: with_status(ComplaintStatus::Open),
            in_progress: with_status(ComplaintStatus::InProgress),
            resolved,
            critical,
            created_this_week,
            resolution_rate: percentage(resolved, total),
            critical_rate: percentage(critical, total),
            by_region,
            by_category,
        }
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn complaint(region: &str, status: &str, priority: &str, category: &str, created: &str) -> Complaint {
        serde_json::from_value(json!({
            "Region": region,
            "Status": status,
            "Priority": priority,
            "Category": category,
            "Created At": created,
        }))
        .unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_counts_and_rates() {
        let complaints = vec![
            complaint("Addis Ababa", "open", "critical", "power-outage", "2024-03-09"),
            complaint("Addis Ababa", "resolved", "low", "billing", "2024-02-01"),
            complaint("Oromia", "in-progress", "medium", "power-outage", "2024-03-08 09:00:00"),
            complaint("Oromia", "resolved", "critical", "power-outage", "bad date"),
        ];

        let stats = ComplaintAnalytics::compute(&complaints, &RegionAccess::All, now());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.open, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.resolved, 2);
        assert_eq!(stats.critical, 2);
        assert_eq!(stats.created_this_week, 2);
        assert_eq!(stats.resolution_rate, 50.0);
        assert_eq!(stats.critical_rate, 50.0);

        let regions: Vec<_> = stats.by_region.iter().map(|r| (r.region, r.total, r.open, r.resolved)).collect();
        assert_eq!(
            regions,
            vec![(Region::AddisAbaba, 2, 1, 1), (Region::Oromia, 2, 0, 1)]
        );

        assert_eq!(stats.by_category[0].category, "power-outage");
        assert_eq!(stats.by_category[0].count, 3);
        assert_eq!(stats.by_category[0].percentage, 75.0);
    }

    #[test]
    fn test_breakdown_limited_to_accessible_regions() {
        let complaints = vec![complaint("Addis Ababa", "open", "low", "billing", "2024-03-09")];
        let access = RegionAccess::only([Region::AddisAbaba]).unwrap();

        let stats = ComplaintAnalytics::compute(&complaints, &access, now());
        assert_eq!(stats.by_region.len(), 1);
        assert_eq!(stats.by_region[0].region, Region::AddisAbaba);
    }

    #[test]
    fn test_empty_input() {
        let stats = ComplaintAnalytics::compute(&[], &RegionAccess::All, now());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.resolution_rate, 0.0);
        assert!(stats.by_region.is_empty());
        assert!(stats.by_category.is_empty());
    }
}
