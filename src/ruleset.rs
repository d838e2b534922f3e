//! Rule specifications and their compiled form.
//!
//! A [`RuleSpec`] maps field identifiers to rule descriptors in declaration
//! order. [`CompiledRules::compile`] turns it into dispatch-ready
//! [`MetaRule`]s; compilation happens once per validator and the result is
//! immutable afterwards.

use crate::error::ValidationError;
use crate::parser::parse_directive;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A caller-supplied validation predicate over a raw value.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A single rule descriptor: a directive string or a predicate.
#[derive(Clone)]
pub enum Descriptor {
    /// A directive string, e.g. `"min:18"`.
    Directive(String),
    /// An opaque caller-supplied predicate.
    Predicate(Predicate),
}

impl Descriptor {
    /// Create a directive descriptor.
    pub fn directive(directive: impl Into<String>) -> Self {
        Self::Directive(directive.into())
    }

    /// Create a predicate descriptor from a closure.
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(predicate))
    }
}

impl From<&str> for Descriptor {
    fn from(directive: &str) -> Self {
        Self::Directive(directive.to_string())
    }
}

impl From<String> for Descriptor {
    fn from(directive: String) -> Self {
        Self::Directive(directive)
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directive(d) => f.debug_tuple("Directive").field(d).finish(),
            Self::Predicate(_) => f.debug_tuple("Predicate").field(&"<fn>").finish(),
        }
    }
}

/// Conversion into a descriptor list.
///
/// Models the accepted wire forms for a field entry: a bare directive, a
/// list of directives, a predicate, or a mixed list.
pub trait IntoDescriptors {
    /// Convert into a list of descriptors.
    fn into_descriptors(self) -> Vec<Descriptor>;
}

impl IntoDescriptors for &str {
    fn into_descriptors(self) -> Vec<Descriptor> {
        vec![Descriptor::from(self)]
    }
}

impl IntoDescriptors for String {
    fn into_descriptors(self) -> Vec<Descriptor> {
        vec![Descriptor::from(self)]
    }
}

impl IntoDescriptors for Descriptor {
    fn into_descriptors(self) -> Vec<Descriptor> {
        vec![self]
    }
}

impl IntoDescriptors for Vec<Descriptor> {
    fn into_descriptors(self) -> Vec<Descriptor> {
        self
    }
}

impl<const N: usize> IntoDescriptors for [Descriptor; N] {
    fn into_descriptors(self) -> Vec<Descriptor> {
        self.into()
    }
}

impl<const N: usize> IntoDescriptors for [&str; N] {
    fn into_descriptors(self) -> Vec<Descriptor> {
        self.iter().map(|d| Descriptor::from(*d)).collect()
    }
}

/// A rule specification: field identifiers mapped to descriptors, in
/// declaration order.
///
/// Field identifiers are strings; a numeric identifier (e.g. `"0"`) addresses
/// an index when the wrapped data is list-like.
///
/// ## Example
///
/// ```
/// use payload_validate::ruleset::{Descriptor, RuleSpec};
///
/// let spec = RuleSpec::new()
///     .field("Age", ["nullable", "integer", "min:18"])
///     .field("email", ["required", "email"])
///     .field("flag", Descriptor::predicate(|v| v.is_boolean()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSpec {
    fields: IndexMap<String, Vec<Descriptor>>,
}

impl RuleSpec {
    /// Create an empty specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field with its descriptors. Re-adding a field appends to its
    /// existing descriptors without changing its declaration position.
    pub fn field(mut self, name: impl Into<String>, rules: impl IntoDescriptors) -> Self {
        self.fields
            .entry(name.into())
            .or_default()
            .extend(rules.into_descriptors());
        self
    }

    /// Whether the specification declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn into_fields(self) -> IndexMap<String, Vec<Descriptor>> {
        self.fields
    }
}

/// A compiled, dispatch-ready rule: a named standard rule or an opaque
/// predicate.
#[derive(Clone)]
pub enum MetaRule {
    /// A named rule resolved through the registry at validation time.
    ///
    /// The name keeps its declared case for display and custom-message
    /// lookup; matching against known rules is case-insensitive.
    Standard {
        /// Declared rule name
        name: String,
        /// Raw parameter; interpretation is deferred to the concrete rule
        param: Option<String>,
    },
    /// A caller-supplied predicate; failure text is generic.
    Custom {
        /// The predicate to invoke
        predicate: Predicate,
    },
}

impl MetaRule {
    /// Whether this is a standard rule whose name matches `want`
    /// case-insensitively after trimming.
    pub fn is_named(&self, want: &str) -> bool {
        match self {
            Self::Standard { name, .. } => name.trim().eq_ignore_ascii_case(want),
            Self::Custom { .. } => false,
        }
    }
}

impl fmt::Debug for MetaRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard { name, param } => f
                .debug_struct("Standard")
                .field("name", name)
                .field("param", param)
                .finish(),
            Self::Custom { .. } => f.debug_struct("Custom").finish_non_exhaustive(),
        }
    }
}

/// Compiled rules: each field's descriptors parsed into [`MetaRule`]s,
/// declaration order preserved.
#[derive(Debug, Clone, Default)]
pub struct CompiledRules {
    fields: IndexMap<String, Vec<MetaRule>>,
}

impl CompiledRules {
    /// Compile a specification.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty or malformed directive string.
    /// Parameter values are not validated here; a concrete rule rejects an
    /// unusable parameter when it runs.
    pub fn compile(spec: RuleSpec) -> Result<Self, ValidationError> {
        let mut fields = IndexMap::new();

        for (field, descriptors) in spec.into_fields() {
            let mut metas = Vec::with_capacity(descriptors.len());
            for descriptor in descriptors {
                match descriptor {
                    Descriptor::Directive(directive) => {
                        let (name, param) = parse_directive(&directive)?;
                        metas.push(MetaRule::Standard { name, param });
                    }
                    Descriptor::Predicate(predicate) => {
                        metas.push(MetaRule::Custom { predicate });
                    }
                }
            }
            fields.insert(field, metas);
        }

        tracing::trace!(fields = fields.len(), "compiled rule specification");
        Ok(Self { fields })
    }

    /// Iterate fields and their rules in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &[MetaRule])> {
        self.fields.iter().map(|(f, m)| (f.as_str(), m.as_slice()))
    }

    /// Rules for one field.
    pub fn get(&self, field: &str) -> Option<&[MetaRule]> {
        self.fields.get(field).map(|m| m.as_slice())
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
