use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    /// Branch manager, limited to the branch's own records
    Branch,
    /// Ticket agent: bookings only
    Agent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub branch_id: Option<i64>,
}

/// CRUD verbs gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    ViewStations,
    EditStations,
    ViewRoutes,
    EditRoutes,
    CreateBookings,
}

impl UserRole {
    pub fn allows(&self, permission: Permission) -> bool {
        match self {
            UserRole::Admin => true,
            UserRole::Branch => !matches!(permission, Permission::EditStations),
            UserRole::Agent => matches!(
                permission,
                Permission::ViewStations | Permission::ViewRoutes | Permission::CreateBookings
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_cannot_edit_routes() {
        assert!(!UserRole::Agent.allows(Permission::EditRoutes));
        assert!(UserRole::Agent.allows(Permission::CreateBookings));
        assert!(UserRole::Branch.allows(Permission::EditRoutes));
        assert!(!UserRole::Branch.allows(Permission::EditStations));
    }

    #[test]
    fn test_user_info_equality_tracks_role() {
        let agent = UserInfo {
            id: "u1".into(),
            username: "agent".into(),
            full_name: None,
            role: UserRole::Agent,
            branch_id: Some(3),
        };
        let mut promoted = agent.clone();
        assert_eq!(Some(agent.clone()), Some(promoted.clone()));
        promoted.role = UserRole::Admin;
        assert_ne!(agent, promoted);
    }
}
