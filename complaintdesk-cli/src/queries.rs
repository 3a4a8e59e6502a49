//! Complaint list filtering and ordering

use complaintdesk_api_types::{Complaint, ComplaintPriority, ComplaintStatus};
use std::cmp::Ordering;

/// Filters applied after region scoping
#[derive(Debug, Clone, Default)]
pub struct ComplaintQuery {
    pub search: Option<String>,
    pub status: Option<ComplaintStatus>,
    pub priority: Option<ComplaintPriority>,
}

impl ComplaintQuery {
    pub fn matches(&self, complaint: &Complaint) -> bool {
        if let Some(status) = self.status {
            if complaint.parsed_status() != Some(status) {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if complaint.parsed_priority() != Some(priority) {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                [&complaint.title, &complaint.customer_name, &complaint.id]
                    .into_iter()
                    .flatten()
                    .any(|field| field.to_lowercase().contains(&term))
            }
            _ => true,
        }
    }

    /// Matching complaints, newest first. Rows without a usable date keep
    /// their relative order at the end.
    pub fn apply(&self, complaints: Vec<Complaint>) -> Vec<Complaint> {
        let mut matching: Vec<_> = complaints
            .into_iter()
            .filter(|complaint| self.matches(complaint))
            .map(|complaint| (complaint.created_at_utc(), complaint))
            .collect();

        matching.sort_by(|(a, _), (b, _)| match (a, b) {
            (Some(a), Some(b)) => b.cmp(a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        matching.into_iter().map(|(_, complaint)| complaint).collect()
    }
}
