pub mod people;
pub mod summary;

/// What the requesting account is allowed to see, resolved once from its
/// permission set and threaded through the read-side services.
#[derive(Clone, Copy, Debug, Default)]
pub struct Capabilities {
    /// May see workshops that are not publicly visible.
    pub see_all_workshops: bool,
    /// May see other users' registration data.
    pub see_all_users: bool,
}

impl Capabilities {
    pub fn from_permissions(permissions: &[String]) -> Self {
        Self {
            see_all_workshops: permissions.iter().any(|p| p == "workshop:see_all"),
            see_all_users: permissions.iter().any(|p| p == "user:see_all"),
        }
    }
}
