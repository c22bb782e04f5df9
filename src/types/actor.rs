use std::collections::BTreeSet;

/// Snapshot of the acting user at resolution time: the roles they hold and
/// their preferred language.
///
/// An actor with no roles is anonymous; rules with an empty role filter
/// still match it.
///
/// # Example
///
/// ```
/// use waypost::Actor;
///
/// let actor = Actor::new().with_role("editor").with_language("en");
/// assert!(actor.has_role("editor"));
/// assert_eq!(actor.language(), Some("en"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actor {
    roles: BTreeSet<String>,
    language: Option<String>,
}

impl Actor {
    /// Create an actor with no roles and no language (anonymous).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    /// Add several roles at once.
    #[must_use]
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Set the preferred language code.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Add a role (mutable reference version).
    pub fn add_role(&mut self, role: impl Into<String>) {
        self.roles.insert(role.into());
    }

    /// Whether the actor holds the given role.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Whether the actor holds no roles at all.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.roles.is_empty()
    }

    /// The actor's roles in sorted order.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(String::as_str)
    }

    /// The actor's preferred language, if known.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_actor_is_anonymous() {
        let actor = Actor::new();
        assert!(actor.is_anonymous());
        assert_eq!(actor.language(), None);
        assert_eq!(actor.roles().count(), 0);
    }

    #[test]
    fn with_role_adds_role() {
        let actor = Actor::new().with_role("editor");
        assert!(actor.has_role("editor"));
        assert!(!actor.has_role("admin"));
        assert!(!actor.is_anonymous());
    }

    #[test]
    fn with_roles_adds_all() {
        let actor = Actor::new().with_roles(["editor", "admin"]);
        assert!(actor.has_role("editor"));
        assert!(actor.has_role("admin"));
    }

    #[test]
    fn duplicate_roles_collapse() {
        let actor = Actor::new().with_role("editor").with_role("editor");
        assert_eq!(actor.roles().count(), 1);
    }

    #[test]
    fn roles_iterate_sorted() {
        let actor = Actor::new().with_roles(["zebra", "alpha"]);
        let roles: Vec<&str> = actor.roles().collect();
        assert_eq!(roles, ["alpha", "zebra"]);
    }

    #[test]
    fn with_language_sets_language() {
        let actor = Actor::new().with_language("de");
        assert_eq!(actor.language(), Some("de"));
    }

    #[test]
    fn add_role_mutable_ref() {
        let mut actor = Actor::new();
        actor.add_role("authenticated");
        assert!(actor.has_role("authenticated"));
    }
}
