//! Department Model
//!
//! Departments come off the wire tree-embedded (children inline), unlike
//! permissions which arrive flat.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Status;

/// Department entity with inline children
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: i64,
    #[serde(default)]
    pub parent_id: Option<i64>,
    pub name: String,
    pub code: String,
    pub sort: i32,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub create_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Department>,
}

/// Create department payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCreate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub sort: i32,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Update department payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentUpdate {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Flatten a department tree into a list, children stripped
pub fn flatten_departments(departments: &[Department]) -> Vec<Department> {
    let mut list = Vec::new();
    collect(departments, &mut list);
    list
}

fn collect(departments: &[Department], out: &mut Vec<Department>) {
    for dept in departments {
        let mut flat = dept.clone();
        let children = std::mem::take(&mut flat.children);
        out.push(flat);
        collect(&children, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dept(id: i64, parent_id: Option<i64>, children: Vec<Department>) -> Department {
        Department {
            id,
            parent_id,
            name: format!("dept-{id}"),
            code: format!("D{id}"),
            sort: 1,
            status: Status::Active,
            leader: None,
            phone: None,
            email: None,
            create_time: Utc::now(),
            children,
        }
    }

    #[test]
    fn flatten_walks_depth_first() {
        let tree = vec![dept(
            1,
            None,
            vec![dept(2, Some(1), vec![dept(4, Some(2), vec![])]), dept(3, Some(1), vec![])],
        )];

        let flat = flatten_departments(&tree);
        let ids: Vec<i64> = flat.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2, 4, 3]);
        assert!(flat.iter().all(|d| d.children.is_empty()));
    }
}
