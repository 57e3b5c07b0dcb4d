use serde::Serialize;

/// A project mirrored from the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: i64,
    pub remote_id: i64,
    pub name: String,
}

/// Project data as it arrives from a sync, before it has a local id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub remote_id: i64,
    pub name: String,
}

impl NewProject {
    pub fn new(remote_id: i64, name: &str) -> Self {
        Self {
            remote_id,
            name: name.to_string(),
        }
    }
}
