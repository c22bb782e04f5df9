use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The kind of authentication event a rule responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// A regular login through the login form.
    Login,
    /// Login immediately following account registration.
    Registration,
    /// Login via a one-time link (password reset).
    OneTimeLogin,
    /// Logout.
    Logout,
}

impl Trigger {
    /// All trigger kinds, in declaration order.
    pub const ALL: [Trigger; 4] = [
        Trigger::Login,
        Trigger::Registration,
        Trigger::OneTimeLogin,
        Trigger::Logout,
    ];
}

/// Error returned when parsing an unrecognized trigger name.
#[derive(Debug, Error)]
#[error("unknown trigger '{0}'")]
pub struct UnknownTrigger(pub String);

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Login => write!(f, "login"),
            Trigger::Registration => write!(f, "registration"),
            Trigger::OneTimeLogin => write!(f, "one_time_login"),
            Trigger::Logout => write!(f, "logout"),
        }
    }
}

impl FromStr for Trigger {
    type Err = UnknownTrigger;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(Trigger::Login),
            "registration" => Ok(Trigger::Registration),
            "one_time_login" => Ok(Trigger::OneTimeLogin),
            "logout" => Ok(Trigger::Logout),
            other => Err(UnknownTrigger(other.to_owned())),
        }
    }
}
