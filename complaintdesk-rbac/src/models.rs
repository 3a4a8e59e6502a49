//! Resources, actions and per-resource permission rows

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RbacError;

/// Resource types for permission checking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Complaints,
    Users,
    Reports,
    Settings,
}

impl ResourceType {
    pub const ALL: [ResourceType; 4] = [
        ResourceType::Complaints,
        ResourceType::Users,
        ResourceType::Reports,
        ResourceType::Settings,
    ];

    /// Convert to string for use in permissions
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Complaints => "complaints",
            ResourceType::Users => "users",
            ResourceType::Reports => "reports",
            ResourceType::Settings => "settings",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceType::ALL
            .into_iter()
            .find(|resource| resource.as_str() == s)
            .ok_or_else(|| RbacError::invalid_argument("resource", s))
    }
}

/// Action types for permission checking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Create,
    Read,
    Update,
    Delete,
}

impl ActionType {
    pub const ALL: [ActionType; 4] = [
        ActionType::Create,
        ActionType::Read,
        ActionType::Update,
        ActionType::Delete,
    ];

    /// Convert to string for use in permissions
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Create => "create",
            ActionType::Read => "read",
            ActionType::Update => "update",
            ActionType::Delete => "delete",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionType::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| RbacError::invalid_argument("action", s))
    }
}

/// Explicit yes/no for each of the four actions on one resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionSet {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
}

impl ActionSet {
    pub const NONE: ActionSet = ActionSet::new(false, false, false, false);
    pub const ALL: ActionSet = ActionSet::new(true, true, true, true);
    pub const READ_ONLY: ActionSet = ActionSet::new(false, true, false, false);

    pub const fn new(create: bool, read: bool, update: bool, delete: bool) -> Self {
        Self {
            create,
            read,
            update,
            delete,
        }
    }

    pub fn allows(&self, action: ActionType) -> bool {
        match action {
            ActionType::Create => self.create,
            ActionType::Read => self.read,
            ActionType::Update => self.update,
            ActionType::Delete => self.delete,
        }
    }

    pub fn set(&mut self, action: ActionType, allowed: bool) {
        match action {
            ActionType::Create => self.create = allowed,
            ActionType::Read => self.read = allowed,
            ActionType::Update => self.update = allowed,
            ActionType::Delete => self.delete = allowed,
        }
    }

    /// Granted actions in canonical order
    pub fn granted(&self) -> impl Iterator<Item = ActionType> + '_ {
        ActionType::ALL.into_iter().filter(|action| self.allows(*action))
    }
}

/// One `ActionSet` for every resource; no resource can be left out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourcePermissions {
    pub complaints: ActionSet,
    pub users: ActionSet,
    pub reports: ActionSet,
    pub settings: ActionSet,
}

impl ResourcePermissions {
    pub fn get(&self, resource: ResourceType) -> &ActionSet {
        match resource {
            ResourceType::Complaints => &self.complaints,
            ResourceType::Users => &self.users,
            ResourceType::Reports => &self.reports,
            ResourceType::Settings => &self.settings,
        }
    }

    pub fn get_mut(&mut self, resource: ResourceType) -> &mut ActionSet {
        match resource {
            ResourceType::Complaints => &mut self.complaints,
            ResourceType::Users => &mut self.users,
            ResourceType::Reports => &mut self.reports,
            ResourceType::Settings => &mut self.settings,
        }
    }

    pub fn allows(&self, resource: ResourceType, action: ActionType) -> bool {
        self.get(resource).allows(action)
    }

    /// Every granted pair, as `action:resource` strings
    pub fn to_permission_strings(&self) -> Vec<String> {
        ResourceType::ALL
            .into_iter()
            .flat_map(|resource| {
                self.get(resource)
                    .granted()
                    .map(move |action| format!("{}:{}", action.as_str(), resource.as_str()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
