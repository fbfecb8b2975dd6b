//! Deterministic grouping of roles by certification area and owner.
//!
//! Pure functions, no I/O: identical input sequences yield identical output,
//! group order included.

use crate::governance::models::Role;
use std::collections::HashMap;

/// Grouping key: certification area plus the owning identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleGroupKey {
    pub area: String,
    pub owner_id: String,
    pub owner_name: String,
}

/// Role id/name pair retained for the campaign payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRef {
    pub id: String,
    pub name: String,
}

/// One group of roles sharing an area and owner.
#[derive(Debug, Clone)]
pub struct RoleGroup {
    pub key: RoleGroupKey,
    pub roles: Vec<RoleRef>,
}

/// Derive the certification area from a role's display name.
///
/// Splits on `"- "`, then `'|'`, then `'-'`, keeping the left-hand segment
/// each time, and trims surrounding whitespace. The splits compose
/// left-to-right, so the precedence matters when a name contains several
/// delimiters.
pub fn derive_area(name: &str) -> String {
    let segment = name.split("- ").next().unwrap_or_default();
    let segment = segment.split('|').next().unwrap_or_default();
    let segment = segment.split('-').next().unwrap_or_default();
    segment.trim().to_string()
}

/// Partition roles into per-(area, owner) groups.
///
/// Roles without a well-formed owner reference (missing id or name) are
/// silently dropped. Groups appear in first-encounter order of their key,
/// and members keep the order they were fetched in.
pub fn group_roles(roles: &[Role]) -> Vec<RoleGroup> {
    let mut index: HashMap<RoleGroupKey, usize> = HashMap::new();
    let mut groups: Vec<RoleGroup> = Vec::new();

    for role in roles {
        let Some(owner) = role.owner.as_ref() else {
            continue;
        };
        let (Some(owner_id), Some(owner_name)) = (owner.id.as_deref(), owner.name.as_deref())
        else {
            continue;
        };
        if owner_id.is_empty() || owner_name.is_empty() {
            continue;
        }

        let key = RoleGroupKey {
            area: derive_area(&role.name),
            owner_id: owner_id.to_string(),
            owner_name: owner_name.to_string(),
        };
        let member = RoleRef {
            id: role.id.clone(),
            name: role.name.clone(),
        };

        match index.get(&key) {
            Some(&slot) => groups[slot].roles.push(member),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(RoleGroup {
                    key,
                    roles: vec![member],
                });
            }
        }
    }

    groups
}
