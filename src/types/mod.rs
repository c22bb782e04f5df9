mod actor;
mod destination;
mod error;
mod pattern;
mod redirect;
mod report;
mod rule;
mod ruleset;
mod trigger;

pub use actor::Actor;
pub use destination::{Destination, DestinationError};
pub use error::CompileError;
pub use pattern::normalize_path;
pub(crate) use pattern::PageMatcher;
pub use redirect::Redirect;
pub use report::{ResolutionReport, RuleOutcome};
pub(crate) use rule::CompiledRule;
pub use rule::Rule;
pub use ruleset::{RuleBuilder, RuleSet, RuleSetBuilder};
pub use trigger::{Trigger, UnknownTrigger};
