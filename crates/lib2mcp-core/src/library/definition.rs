//! Library contents

use std::collections::BTreeMap;

use serde_json::Value;

use crate::types::Callable;

/// An attribute of a library
#[derive(Debug, Clone)]
pub enum Member {
    /// A function, builtin or method-like callable
    Routine(Callable),
    /// A plain value (numbers, tables, ...)
    Constant(Value),
    /// A type exported by the library; carries the type name
    Class(String),
    /// A nested library; carries its identifier
    Module(String),
}

impl Member {
    pub fn is_routine(&self) -> bool {
        matches!(self, Member::Routine(_))
    }

    /// Short label used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Member::Routine(_) => "routine",
            Member::Constant(_) => "constant",
            Member::Class(_) => "class",
            Member::Module(_) => "module",
        }
    }
}

/// A loaded library: a name, optional documentation and its members
///
/// Members are kept sorted by attribute name so enumeration is stable.
#[derive(Debug, Clone, Default)]
pub struct Library {
    name: String,
    doc: Option<String>,
    members: BTreeMap<String, Member>,
}

impl Library {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            members: BTreeMap::new(),
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Add a routine under its own name
    ///
    /// Anonymous callables have no name to store them under; use
    /// [`Library::with_member`] with an explicit attribute instead.
    pub fn with_routine(self, callable: Callable) -> Self {
        match callable.name().map(str::to_string) {
            Some(name) => self.with_member(name, Member::Routine(callable)),
            None => self,
        }
    }

    pub fn with_constant(self, attribute: impl Into<String>, value: Value) -> Self {
        self.with_member(attribute, Member::Constant(value))
    }

    /// Add any member under an explicit attribute name
    pub fn with_member(mut self, attribute: impl Into<String>, member: Member) -> Self {
        self.members.insert(attribute.into(), member);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn get(&self, attribute: &str) -> Option<&Member> {
        self.members.get(attribute)
    }

    /// All members in attribute order
    pub fn members(&self) -> impl Iterator<Item = (&str, &Member)> {
        self.members.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Attribute names of routine members, in lexicographic order
    pub fn routine_names(&self) -> Vec<String> {
        self.members
            .iter()
            .filter(|(_, m)| m.is_routine())
            .map(|(k, _)| k.clone())
            .collect()
    }
}
