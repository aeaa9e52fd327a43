//! Library specification: which functions of which libraries to expose

use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Errors in the shape of a library specification
#[derive(Error, Debug)]
pub enum SpecError {
    #[error("Invalid selector for library '{library}': expected null, a function name or a list of function names, found {found}")]
    InvalidSelector { library: String, found: String },

    #[error("Library specification must be a mapping of library names to selectors, found {0}")]
    NotAMapping(String),

    #[error("Invalid library entry '{entry}': {reason}")]
    InvalidEntry { entry: String, reason: String },

    #[error("Failed to parse library specification: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type SpecResult<T> = Result<T, SpecError>;

/// Which functions of a library to expose
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Every routine the library exposes
    All,
    /// A single function
    One(String),
    /// An ordered list of functions
    Many(Vec<String>),
}

impl Selector {
    /// Validate an untyped selector value
    pub fn from_value(library: &str, value: &Value) -> SpecResult<Self> {
        let invalid = || SpecError::InvalidSelector {
            library: library.to_string(),
            found: describe(value),
        };

        match value {
            Value::Null => Ok(Selector::All),
            Value::String(name) => Ok(Selector::One(name.clone())),
            Value::Sequence(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
                .collect::<SpecResult<Vec<_>>>()
                .map(Selector::Many),
            _ => Err(invalid()),
        }
    }

    /// Back to the untyped form
    pub fn to_value(&self) -> Value {
        match self {
            Selector::All => Value::Null,
            Selector::One(name) => Value::String(name.clone()),
            Selector::Many(names) => {
                Value::Sequence(names.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

/// Ordered mapping from library identifier to [`Selector`]
///
/// Iteration follows insertion order. Inserting an existing library replaces
/// its selector in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibrarySpec {
    entries: Vec<(String, Selector)>,
}

impl LibrarySpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`LibrarySpec::insert`]
    pub fn with(mut self, library: impl Into<String>, selector: Selector) -> Self {
        self.insert(library, selector);
        self
    }

    pub fn insert(&mut self, library: impl Into<String>, selector: Selector) {
        let library = library.into();
        match self.entries.iter_mut().find(|(name, _)| *name == library) {
            Some(entry) => entry.1 = selector,
            None => self.entries.push((library, selector)),
        }
    }

    /// Append every entry of `other`, replacing selectors for libraries
    /// already present
    pub fn merge(&mut self, other: LibrarySpec) {
        for (library, selector) in other.entries {
            self.insert(library, selector);
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Selector)> {
        self.entries.iter().map(|(name, selector)| (name.as_str(), selector))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse and validate a YAML (or JSON) document
    ///
    /// ```
    /// use lib2mcp_core::config::{LibrarySpec, Selector};
    ///
    /// let spec = LibrarySpec::from_yaml_str("math: [sqrt, exp]\ntoken: null").unwrap();
    /// let entries: Vec<_> = spec.entries().collect();
    /// assert_eq!(entries[0].0, "math");
    /// assert_eq!(entries[1].1, &Selector::All);
    /// ```
    pub fn from_yaml_str(source: &str) -> SpecResult<Self> {
        let value: Value = serde_yaml::from_str(source)?;
        Self::from_value(&value)
    }

    /// Validate an untyped mapping; every entry is checked before returning
    pub fn from_value(value: &Value) -> SpecResult<Self> {
        let mapping = match value {
            Value::Null => return Ok(Self::new()),
            Value::Mapping(mapping) => mapping,
            other => return Err(SpecError::NotAMapping(describe(other))),
        };

        let mut spec = Self::new();
        for (key, selector) in mapping {
            let library = key.as_str().ok_or_else(|| SpecError::InvalidEntry {
                entry: describe(key),
                reason: "library names must be strings".to_string(),
            })?;
            spec.insert(library, Selector::from_value(library, selector)?);
        }
        Ok(spec)
    }

    pub fn to_value(&self) -> Value {
        let mut mapping = Mapping::new();
        for (library, selector) in &self.entries {
            mapping.insert(Value::String(library.clone()), selector.to_value());
        }
        Value::Mapping(mapping)
    }
}

/// Parse command line entries of the form `lib`, `lib:func` or `lib:f1,f2`
///
/// A bare library selects all of its functions.
pub fn parse_library_functions<S: AsRef<str>>(values: &[S]) -> SpecResult<LibrarySpec> {
    let mut spec = LibrarySpec::new();

    for item in values {
        let item = item.as_ref().trim();
        let invalid = |reason: &str| SpecError::InvalidEntry {
            entry: item.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = item.split(':');
        let library = parts.next().unwrap_or_default();
        let functions = parts.next();
        if parts.next().is_some() {
            return Err(invalid("expected at most one ':'"));
        }
        if library.is_empty() {
            return Err(invalid("library name is empty"));
        }

        let selector = match functions {
            None => Selector::All,
            Some(list) => {
                let names: Vec<String> = list.split(',').map(|f| f.trim().to_string()).collect();
                if names.iter().any(String::is_empty) {
                    return Err(invalid("function names must not be empty"));
                }
                Selector::Many(names)
            }
        };
        spec.insert(library, selector);
    }

    Ok(spec)
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string '{}'", s),
        Value::Sequence(_) => "a list containing non-string items".to_string(),
        Value::Mapping(_) => "a mapping".to_string(),
        Value::Tagged(tagged) => format!("tagged value {}", tagged.tag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn many(names: &[&str]) -> Selector {
        Selector::Many(names.iter().map(|n| n.to_string()).collect())
    }

    #[test]
    fn test_1_lib_1_func() {
        let spec = parse_library_functions(&["lib1:func1"]).unwrap();
        assert_eq!(spec, LibrarySpec::new().with("lib1", many(&["func1"])));
    }

    #[test]
    fn test_1_lib_2_func() {
        let spec = parse_library_functions(&["lib1:func1,func2"]).unwrap();
        assert_eq!(spec, LibrarySpec::new().with("lib1", many(&["func1", "func2"])));
    }

    #[test]
    fn test_1_lib_no_func() {
        let spec = parse_library_functions(&["lib1"]).unwrap();
        assert_eq!(spec, LibrarySpec::new().with("lib1", Selector::All));
    }

    #[test]
    fn test_3_lib_one_of_each_type() {
        let spec = parse_library_functions(&["lib1:func1", "lib2:func2,func3", "lib3"]).unwrap();
        let expected = LibrarySpec::new()
            .with("lib1", many(&["func1"]))
            .with("lib2", many(&["func2", "func3"]))
            .with("lib3", Selector::All);
        assert_eq!(spec, expected);
    }

    #[test]
    fn test_parse_rejects_malformed_entries() {
        for entry in ["a:b:c", ":sqrt", "math:", "math:sqrt,,exp"] {
            let err = parse_library_functions(&[entry]).unwrap_err();
            assert!(matches!(err, SpecError::InvalidEntry { .. }), "{}", entry);
        }
    }

    #[test]
    fn test_from_yaml_all_shapes() {
        let spec = LibrarySpec::from_yaml_str("math: sqrt\ntext: [upper, lower]\ntoken: ~\n").unwrap();
        let entries: Vec<_> = spec.entries().map(|(l, s)| (l.to_string(), s.clone())).collect();
        assert_eq!(
            entries,
            vec![
                ("math".to_string(), Selector::One("sqrt".to_string())),
                ("text".to_string(), many(&["upper", "lower"])),
                ("token".to_string(), Selector::All),
            ]
        );
    }

    #[test]
    fn test_from_json_document() {
        let spec = LibrarySpec::from_yaml_str(r#"{"math": ["sqrt", "exp"]}"#).unwrap();
        assert_eq!(spec, LibrarySpec::new().with("math", many(&["sqrt", "exp"])));
    }

    #[test]
    fn test_invalid_selector_shapes() {
        for doc in ["math: 3", "math: {sqrt: true}", "math: [sqrt, 1]", "math: true"] {
            let err = LibrarySpec::from_yaml_str(doc).unwrap_err();
            assert!(
                matches!(err, SpecError::InvalidSelector { ref library, .. } if library == "math"),
                "{}",
                doc
            );
        }
    }

    #[test]
    fn test_not_a_mapping() {
        let err = LibrarySpec::from_yaml_str("- math\n- token\n").unwrap_err();
        assert!(matches!(err, SpecError::NotAMapping(_)));

        assert!(LibrarySpec::from_value(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut spec = LibrarySpec::new()
            .with("math", Selector::All)
            .with("token", Selector::All);
        spec.merge(LibrarySpec::new().with("math", Selector::One("sqrt".into())).with("text", Selector::All));

        let names: Vec<_> = spec.entries().map(|(l, _)| l).collect();
        assert_eq!(names, vec!["math", "token", "text"]);
        assert_eq!(spec.entries().next().unwrap().1, &Selector::One("sqrt".into()));
    }

    #[test]
    fn test_value_roundtrip_preserves_order() {
        let spec = LibrarySpec::new()
            .with("token", Selector::All)
            .with("math", many(&["sqrt"]));
        assert_eq!(LibrarySpec::from_value(&spec.to_value()).unwrap(), spec);
    }
}
