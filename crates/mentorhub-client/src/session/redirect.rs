//! Where a torn-down session sends the user.

use mentorhub_core::config::RoutesConfig;
use mentorhub_core::types::UserType;

/// Decides the login surface to navigate to after a session ends.
#[derive(Debug, Clone)]
pub struct RedirectPolicy {
    home: String,
    admin_login: String,
    admin_prefix: String,
    public_paths: Vec<String>,
}

impl RedirectPolicy {
    /// Build the policy from route configuration.
    pub fn from_config(routes: &RoutesConfig) -> Self {
        Self {
            home: routes.home.clone(),
            admin_login: routes.admin_login.clone(),
            admin_prefix: routes.admin_prefix.clone(),
            public_paths: routes.public_paths.clone(),
        }
    }

    /// Whether `path` is exempt from forced redirects.
    ///
    /// Only exact matches count; any query string or fragment is ignored.
    pub fn is_public(&self, path: &str) -> bool {
        let path = strip_suffixes(path);
        self.public_paths.iter().any(|p| p == path)
    }

    /// The route to hard-redirect to, or `None` to stay put.
    ///
    /// Admins, and anyone currently inside the admin portal, go to the admin
    /// login; everyone else goes home.
    pub fn target(&self, current_path: &str, user_type: Option<UserType>) -> Option<&str> {
        if self.is_public(current_path) {
            return None;
        }

        let in_admin = strip_suffixes(current_path).starts_with(&self.admin_prefix);
        if in_admin || user_type.is_some_and(|t| t.is_admin()) {
            Some(self.admin_login.as_str())
        } else {
            Some(self.home.as_str())
        }
    }
}

impl Default for RedirectPolicy {
    fn default() -> Self {
        Self::from_config(&RoutesConfig::default())
    }
}

fn strip_suffixes(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths_never_redirect() {
        let policy = RedirectPolicy::default();
        for path in ["/", "/admin", "/login", "/login?next=/events"] {
            assert_eq!(policy.target(path, Some(UserType::Admin)), None, "{path}");
            assert_eq!(policy.target(path, None), None, "{path}");
        }
    }

    #[test]
    fn test_public_match_is_exact() {
        let policy = RedirectPolicy::default();
        assert!(!policy.is_public("/login/"));
        assert!(!policy.is_public("/admin/users"));
        assert_eq!(policy.target("/admin/users", None), Some("/admin"));
    }

    #[test]
    fn test_admin_user_goes_to_admin_login() {
        let policy = RedirectPolicy::default();
        assert_eq!(policy.target("/dashboard", Some(UserType::Admin)), Some("/admin"));
    }

    #[test]
    fn test_admin_path_goes_to_admin_login() {
        let policy = RedirectPolicy::default();
        assert_eq!(
            policy.target("/admin/communities", Some(UserType::Mentor)),
            Some("/admin")
        );
    }

    #[test]
    fn test_everyone_else_goes_home() {
        let policy = RedirectPolicy::default();
        assert_eq!(policy.target("/mentor/events", Some(UserType::Mentor)), Some("/"));
        assert_eq!(policy.target("/chat", None), Some("/"));
    }
}
