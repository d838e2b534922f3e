//! # payload-validate
//!
//! Declarative payload validation. A rule specification maps field
//! identifiers to string rule directives (or predicates); a [`Validator`]
//! compiles it once and checks payloads against it, returning a
//! [`DataAccessor`] over the data on success or failing fast with a single
//! human-readable diagnostic.
//!
//! ## Example
//!
//! ```
//! use payload_validate::{RuleSpec, Validator};
//! use serde_json::json;
//!
//! let validator = Validator::new(
//!     RuleSpec::new()
//!         .field("email", ["required", "email"])
//!         .field("Age", ["nullable", "integer", "min:18"]),
//! ).unwrap();
//!
//! let data = json!({"email": "ada@example.com", "Age": 30});
//! let validated = validator.validate(&data).unwrap();
//! assert_eq!(validated.get_field("Age").unwrap(), &json!(30));
//! ```
//!
//! ## Rule directives
//!
//! - `required` - field must be present
//! - `nullable` - a null value skips the remaining rules
//! - `requiredWithout:<field>` - mutual-exclusion/"exactly one of"
//!   constraints across fields, reported as one message per group
//! - `string`, `integer[:strict]`, `numeric`, `boolean`, `array`
//! - `min:<n>` / `max:<n>` - numeric bounds
//! - `minLength:<n>` / `maxLength:<n>` - string length in characters
//! - `email`, `datetime[:<format>]`, `enum:<name>`
//!
//! Rule names match case-insensitively; a parameter may contain further
//! colons verbatim. Validation stops at the first violation; the error
//! carries its full sentence, e.g. `Field 'Age' must have a minimum value
//! of 18.`

pub mod access;
pub mod error;
pub mod parser;
pub mod predicates;
pub mod registry;
pub mod rules;
pub mod ruleset;
pub mod validator;

pub use access::DataAccessor;
pub use error::{Translator, ValidationError};
pub use predicates::Predicates;
pub use registry::RuleRegistry;
pub use rules::Rule;
pub use ruleset::{CompiledRules, Descriptor, MetaRule, RuleSpec};
pub use validator::Validator;

/// Prelude module for payload validation
pub mod prelude {
    pub use crate::access::DataAccessor;
    pub use crate::error::{Translator, ValidationError};
    pub use crate::registry::RuleRegistry;
    pub use crate::ruleset::{Descriptor, RuleSpec};
    pub use crate::validator::Validator;
}
