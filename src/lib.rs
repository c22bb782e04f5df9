mod compile;
mod error;
mod parse;
mod resolve;
#[cfg(feature = "binary-cache")]
mod serial;
mod source;
mod types;

pub use error::WaypostError;
pub use parse::ParseError;
#[cfg(feature = "binary-cache")]
pub use serial::{DeserializeError, SerializeError};
pub use source::{DslFile, RuleSource, StaticRules};
pub use types::{
    normalize_path, Actor, CompileError, Destination, DestinationError, Redirect, ResolutionReport,
    Rule, RuleBuilder, RuleOutcome, RuleSet, RuleSetBuilder, Trigger, UnknownTrigger,
};
