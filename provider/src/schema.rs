//! Declared attribute schemas for the provider, resources and data sources.
//!
//! All Gotify attributes are strings; a schema only records how each one
//! is supplied (required, optional, computed) and any static default.

/// How an attribute's value is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeMode {
    Required,
    Optional,
    /// Set by the provider only.
    Computed,
    /// Set by configuration, or by the provider when absent.
    OptionalComputed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub description: &'static str,
    pub mode: AttributeMode,
    pub default: Option<&'static str>,
    /// Keep the prior state value while a plan does not know it yet.
    pub use_state_for_unknown: bool,
}

impl Attribute {
    fn string(description: &'static str, mode: AttributeMode) -> Self {
        Self {
            description,
            mode,
            default: None,
            use_state_for_unknown: false,
        }
    }

    pub fn required_string(description: &'static str) -> Self {
        Self::string(description, AttributeMode::Required)
    }

    pub fn optional_string(description: &'static str) -> Self {
        Self::string(description, AttributeMode::Optional)
    }

    pub fn computed_string(description: &'static str) -> Self {
        Self::string(description, AttributeMode::Computed)
    }

    /// Optional attribute that falls back to `default`.
    pub fn defaulted_string(description: &'static str, default: &'static str) -> Self {
        Self {
            default: Some(default),
            ..Self::string(description, AttributeMode::OptionalComputed)
        }
    }

    pub fn use_state_for_unknown(mut self) -> Self {
        self.use_state_for_unknown = true;
        self
    }

    pub fn is_required(&self) -> bool {
        self.mode == AttributeMode::Required
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub description: &'static str,
    attributes: Vec<(&'static str, Attribute)>,
}

impl Schema {
    pub fn new(description: &'static str) -> Self {
        Self {
            description,
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: &'static str, attribute: Attribute) -> Self {
        self.attributes.push((name, attribute));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|(n, _)| *n == name).map(|(_, a)| a)
    }

    /// Attributes in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &Attribute)> {
        self.attributes.iter().map(|(n, a)| (*n, a))
    }

    pub fn default_for(&self, name: &str) -> Option<&'static str> {
        self.attribute(name).and_then(|a| a.default)
    }

    pub fn required(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attributes
            .iter()
            .filter(|(_, a)| a.is_required())
            .map(|(n, _)| *n)
    }
}
