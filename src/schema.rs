//! Stream schema: ordered, named, typed attributes.

use std::fmt;

/// Kind of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// Values are real numbers and support arithmetic.
    Numeric,
    /// Anything else (nominal, string, date). Values are carried as numbers
    /// but arithmetic on them is meaningless.
    Other,
}

/// A named attribute descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
}

impl Attribute {
    /// Create an attribute of the given kind.
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Create a numeric attribute.
    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, AttributeKind::Numeric)
    }

    /// Create a non-numeric attribute.
    pub fn other(name: impl Into<String>) -> Self {
        Self::new(name, AttributeKind::Other)
    }

    /// Attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute kind.
    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    /// Check if the attribute is numeric.
    pub fn is_numeric(&self) -> bool {
        self.kind == AttributeKind::Numeric
    }

    /// Copy of this attribute under a new name, same kind.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self::new(name, self.kind)
    }
}

/// Ordered attribute list shared by every record of a stream.
///
/// Positions are stable: attribute `i` describes value `i` of each record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    attributes: Vec<Attribute>,
}

impl Schema {
    /// Create a schema from attributes in order.
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self { attributes }
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Check if the schema has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Get the attribute at `index`.
    pub fn attribute(&self, index: usize) -> Option<&Attribute> {
        self.attributes.get(index)
    }

    /// Position of the first attribute called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name == name)
    }

    /// Iterate over attributes in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    /// All attributes in order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}

impl FromIterator<Attribute> for Schema {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, attr) in self.attributes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match attr.kind {
                AttributeKind::Numeric => write!(f, "{}: numeric", attr.name)?,
                AttributeKind::Other => write!(f, "{}: other", attr.name)?,
            }
        }
        Ok(())
    }
}
