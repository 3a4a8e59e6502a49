//! Region visibility per role

use complaintdesk_api_types::Region;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::error::{RbacError, RbacResult};

/// Non-empty, duplicate-free set of known regions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionSet(BTreeSet<Region>);

impl RegionSet {
    /// Build a set, rejecting an empty input. Duplicates collapse.
    pub fn new(regions: impl IntoIterator<Item = Region>) -> RbacResult<Self> {
        let set: BTreeSet<Region> = regions.into_iter().collect();
        if set.is_empty() {
            return Err(RbacError::invalid_config(
                "an explicit region list must name at least one region",
            ));
        }
        Ok(Self(set))
    }

    /// Set holding exactly one region
    pub fn single(region: Region) -> Self {
        Self(BTreeSet::from([region]))
    }

    /// Build from untrusted names, each of which must be a known region
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> RbacResult<Self> {
        let regions = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                Region::lookup(name).ok_or_else(|| RbacError::invalid_argument("region", name))
            })
            .collect::<RbacResult<Vec<_>>>()?;
        Self::new(regions)
    }

    pub fn contains(&self, region: Region) -> bool {
        self.0.contains(&region)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Region> + '_ {
        self.0.iter().copied()
    }
}

/// Either every region, or an explicit set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionAccess {
    All,
    Only(RegionSet),
}

impl RegionAccess {
    pub fn only(regions: impl IntoIterator<Item = Region>) -> RbacResult<Self> {
        Ok(Self::Only(RegionSet::new(regions)?))
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Explicit region set, or `None` for unrestricted access
    pub fn regions(&self) -> Option<&RegionSet> {
        match self {
            Self::All => None,
            Self::Only(set) => Some(set),
        }
    }

    /// Decide visibility of a record's raw region value.
    ///
    /// `None` (missing or non-string region) is never visible. Any string is
    /// visible under `All`; otherwise it must equal a member name exactly.
    pub fn allows(&self, region: Option<&str>) -> bool {
        let Some(name) = region else {
            return false;
        };
        match self {
            Self::All => true,
            Self::Only(set) => Region::lookup(name).is_some_and(|region| set.contains(region)),
        }
    }

    /// Regions this access covers, expanding `All` to the full enumeration
    pub fn expand(&self) -> Vec<Region> {
        match self {
            Self::All => Region::ALL.to_vec(),
            Self::Only(set) => set.iter().collect(),
        }
    }

    /// Human-readable summary, as shown on the role overview
    pub fn describe(&self) -> String {
        match self {
            Self::All => "All Regions".to_string(),
            Self::Only(set) => set
                .iter()
                .map(|region| region.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_region_set_rejected() {
        let err = RegionSet::new(Vec::new()).unwrap_err();
        assert!(matches!(err, RbacError::InvalidConfig { .. }));
    }

    #[test]
    fn test_duplicates_collapse() {
        let set = RegionSet::new([Region::Afar, Region::Afar, Region::Amhara]).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_from_names_rejects_unknown() {
        let err = RegionSet::from_names(&["Addis Ababa", "Atlantis"]).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(RegionSet::from_names(&["addis ababa"]).is_err());
    }

    #[test]
    fn test_all_allows_any_string_but_not_missing() {
        let access = RegionAccess::All;
        assert!(access.allows(Some("Nowhereland")));
        assert!(access.allows(Some("")));
        assert!(!access.allows(None));
    }

    #[test]
    fn test_only_is_exact_match() {
        let access = RegionAccess::only([Region::AddisAbaba]).unwrap();
        assert!(access.allows(Some("Addis Ababa")));
        assert!(!access.allows(Some("addis ababa")));
        assert!(!access.allows(Some("Addis Ababa ")));
        assert!(!access.allows(Some("Amhara")));
        assert!(!access.allows(Some("")));
        assert!(!access.allows(None));
    }

    #[test]
    fn test_describe() {
        assert_eq!(RegionAccess::All.describe(), "All Regions");
        let access = RegionAccess::only([Region::Oromia, Region::AddisAbaba]).unwrap();
        assert_eq!(access.describe(), "Addis Ababa, Oromia");
        assert_eq!(access.expand(), vec![Region::AddisAbaba, Region::Oromia]);
    }
}
