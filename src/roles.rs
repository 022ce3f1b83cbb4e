use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::types::{CleaningOptions, Role};

/// Columns assigned to each role, in table column order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RoleMap {
    roles: BTreeMap<Role, Vec<String>>,
}

impl RoleMap {
    /// Detect roles for `columns` from name patterns, then apply manual assignments
    pub fn detect(columns: &[String], options: &CleaningOptions) -> Self {
        let mut roles = BTreeMap::new();

        for role in Role::ALL {
            let matched = match options.role_columns.get(role) {
                Some(assigned) => {
                    for name in assigned {
                        if !columns.contains(name) {
                            warn!(?role, column = %name, "assigned column not present in table");
                        }
                    }
                    columns
                        .iter()
                        .filter(|c| assigned.contains(c))
                        .cloned()
                        .collect()
                }
                None => match_columns(columns, options.role_patterns.get(role)),
            };

            debug!(?role, columns = ?matched, "detected role columns");
            roles.insert(role, matched);
        }

        Self { roles }
    }

    pub fn columns(&self, role: Role) -> &[String] {
        self.roles.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_role(&self, column: &str, role: Role) -> bool {
        self.columns(role).iter().any(|c| c == column)
    }
}

/// Columns whose name contains any of the patterns (case-insensitive)
pub fn match_columns(columns: &[String], patterns: &[String]) -> Vec<String> {
    columns
        .iter()
        .filter(|c| matches_any(c, patterns))
        .cloned()
        .collect()
}

fn matches_any(column: &str, patterns: &[String]) -> bool {
    let lower = column.to_lowercase();
    patterns
        .iter()
        .filter(|p| !p.is_empty())
        .any(|p| lower.contains(&p.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_detect_hospital_columns() {
        let columns = names(&[
            "patient_id",
            "patient_name",
            "gender",
            "age",
            "admission_date",
            "phone",
            "bill_amount",
        ]);
        let map = RoleMap::detect(&columns, &CleaningOptions::default());

        assert_eq!(map.columns(Role::Identifier), names(&["patient_id"]));
        assert_eq!(
            map.columns(Role::Name),
            names(&["patient_id", "patient_name"])
        );
        assert_eq!(map.columns(Role::Gender), names(&["gender"]));
        assert_eq!(map.columns(Role::Age), names(&["age"]));
        assert_eq!(map.columns(Role::Date), names(&["admission_date"]));
        assert_eq!(map.columns(Role::Phone), names(&["phone"]));
        assert_eq!(map.columns(Role::Monetary), names(&["bill_amount"]));
    }

    #[test]
    fn test_case_insensitive_match() {
        let columns = names(&["Sex", "Mobile_No"]);
        let map = RoleMap::detect(&columns, &CleaningOptions::default());

        assert!(map.has_role("Sex", Role::Gender));
        assert!(map.has_role("Mobile_No", Role::Phone));
    }

    #[test]
    fn test_column_in_several_roles() {
        let columns = names(&["emergency_contact_id"]);
        let map = RoleMap::detect(&columns, &CleaningOptions::default());

        let assigned: Vec<Role> = Role::ALL
            .into_iter()
            .filter(|r| map.has_role("emergency_contact_id", *r))
            .collect();
        assert_eq!(assigned, vec![Role::Identifier, Role::Phone]);
    }

    #[test]
    fn test_no_match_leaves_role_empty() {
        let columns = names(&["ward", "diagnosis"]);
        let map = RoleMap::detect(&columns, &CleaningOptions::default());

        for role in Role::ALL {
            assert!(map.columns(role).is_empty());
        }
    }

    #[test]
    fn test_manual_assignment_replaces_detection() {
        let columns = names(&["age", "average_cost", "years"]);
        let mut options = CleaningOptions::default();
        assert_eq!(
            RoleMap::detect(&columns, &options).columns(Role::Age),
            names(&["age", "average_cost"])
        );

        options.role_columns.age = Some(names(&["years", "missing_col"]));
        let map = RoleMap::detect(&columns, &options);
        assert_eq!(map.columns(Role::Age), names(&["years"]));
        // Other roles still detected from patterns
        assert_eq!(map.columns(Role::Monetary), names(&["average_cost"]));
    }

    #[test]
    fn test_serializes_by_role_name() {
        let columns = names(&["gender"]);
        let map = RoleMap::detect(&columns, &CleaningOptions::default());
        let json = serde_json::to_string(&map).unwrap();

        assert!(json.contains("\"gender\":[\"gender\"]"));
        assert!(json.contains("\"identifier\":[]"));
    }
}
