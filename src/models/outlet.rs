use serde::{Deserialize, Serialize};

/// Outlet that foods are sold from. Only referenced by key from `Food`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlet {
    pub id: String,
    #[serde(default)]
    pub name: String,
}
