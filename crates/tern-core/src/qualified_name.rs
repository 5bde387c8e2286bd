use std::fmt;

/// Dotted name identifying a package or class.
///
/// Used as the cache key for class and namespace descriptors. A
/// [`DeclHash`](crate::DeclHash) is derived from it for member and
/// type-parameter identities.
///
/// # Examples
///
/// ```
/// use tern_core::QualifiedName;
///
/// let top = QualifiedName::global("Any");
/// assert_eq!(top.to_string(), "Any");
///
/// let list = QualifiedName::new("ArrayList", vec!["java".into(), "util".into()]);
/// assert_eq!(list.to_string(), "java.util.ArrayList");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    /// Simple name (e.g., "ArrayList")
    pub name: String,
    /// Enclosing package path (e.g., ["java", "util"])
    /// Empty for the root package
    pub namespace: Vec<String>,
}

impl QualifiedName {
    /// Create a new qualified name with an enclosing path.
    pub fn new(name: impl Into<String>, namespace: Vec<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
        }
    }

    /// Create a qualified name in the root package.
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Vec::new(),
        }
    }

    /// Create from a dotted string (e.g., "java.util.List").
    ///
    /// Empty segments are dropped, so ".java.util" == "java.util".
    pub fn from_dotted(s: &str) -> Self {
        let mut parts: Vec<String> = s
            .split('.')
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        match parts.pop() {
            Some(name) => Self {
                name,
                namespace: parts,
            },
            None => Self::global(""),
        }
    }

    /// The root package, printed as the empty string.
    pub fn root() -> Self {
        Self::global("")
    }

    /// Whether this names the root package.
    pub fn is_root(&self) -> bool {
        self.name.is_empty() && self.namespace.is_empty()
    }

    /// Check if this lives directly in the root package.
    pub fn is_global(&self) -> bool {
        self.namespace.is_empty()
    }

    /// Get the simple (unqualified) name.
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// Get the enclosing path.
    pub fn namespace_path(&self) -> &[String] {
        &self.namespace
    }

    /// Compute the declaration hash of the class this name denotes.
    pub fn to_decl_hash(&self) -> crate::DeclHash {
        crate::DeclHash::from_class(self)
    }

    /// Create a child name nested in this one.
    ///
    /// Example: `java.util` + `List` = `java.util.List`
    pub fn child(&self, name: impl Into<String>) -> Self {
        if self.is_root() {
            return Self::global(name);
        }
        let mut child_ns = self.namespace.clone();
        child_ns.push(self.name.clone());
        Self {
            name: name.into(),
            namespace: child_ns,
        }
    }

    /// Get the enclosing name (if any).
    ///
    /// Example: `java.util.List` -> Some(`java.util`)
    pub fn parent(&self) -> Option<Self> {
        let (name, rest) = self.namespace.split_last()?;
        Some(Self {
            name: name.clone(),
            namespace: rest.to_vec(),
        })
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.namespace.join("."), self.name)
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::from_dotted(s)
    }
}

impl From<String> for QualifiedName {
    fn from(s: String) -> Self {
        Self::from_dotted(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_name() {
        let name = QualifiedName::global("Any");
        assert_eq!(name.name, "Any");
        assert!(name.is_global());
        assert_eq!(name.to_string(), "Any");
    }

    #[test]
    fn from_dotted() {
        let name = QualifiedName::from_dotted("java.util.List");
        assert_eq!(name.name, "List");
        assert_eq!(name.namespace, vec!["java", "util"]);

        let global = QualifiedName::from_dotted("Any");
        assert!(global.is_global());
    }

    #[test]
    fn from_dotted_drops_empty_segments() {
        assert_eq!(
            QualifiedName::from_dotted(".java.util"),
            QualifiedName::from_dotted("java.util")
        );
        assert!(QualifiedName::from_dotted("").is_root());
    }

    #[test]
    fn child_and_parent() {
        let util = QualifiedName::from_dotted("java.util");
        let list = util.child("List");
        assert_eq!(list.to_string(), "java.util.List");
        assert_eq!(list.parent(), Some(util));

        assert_eq!(QualifiedName::root().child("java").to_string(), "java");
        assert!(QualifiedName::global("java").parent().is_none());
    }
}
