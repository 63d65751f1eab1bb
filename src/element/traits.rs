//! Core element traits.

use crate::error::Result;
use crate::record::Record;
use crate::schema::Schema;

// ============================================================================
// Output Type
// ============================================================================

/// Output of element processing.
///
/// Represents the result of processing one input:
/// - `None`: No output (suppressed, or held back in a buffer)
/// - `Single`: One output item
/// - `Multiple`: Multiple output items, in emission order
///
/// # Examples
///
/// ```rust
/// use tsdelta::element::Output;
///
/// let out: Output<u32> = Output::none();
/// assert!(out.is_empty());
///
/// let out = Output::from(vec![1, 2, 3]);
/// assert_eq!(out.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Output<T = Record> {
    /// No output.
    None,
    /// Single output item.
    Single(T),
    /// Multiple output items.
    Multiple(Vec<T>),
}

impl<T> Output<T> {
    /// Create a single item output.
    #[inline]
    pub fn single(item: T) -> Self {
        Self::Single(item)
    }

    /// Create an empty output.
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Check if there is no output.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Check if there is exactly one output.
    #[inline]
    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }

    /// Check if there are multiple outputs.
    #[inline]
    pub fn is_multiple(&self) -> bool {
        matches!(self, Self::Multiple(_))
    }

    /// Get the number of output items.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Single(_) => 1,
            Self::Multiple(v) => v.len(),
        }
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert to a Vec of items.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::None => vec![],
            Self::Single(item) => vec![item],
            Self::Multiple(v) => v,
        }
    }

    /// Take the single item, returning None for other variants.
    pub fn into_single(self) -> Option<T> {
        match self {
            Self::Single(item) => Some(item),
            _ => None,
        }
    }

    /// Map every item, keeping the shape.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Output<U> {
        match self {
            Self::None => Output::None,
            Self::Single(item) => Output::Single(f(item)),
            Self::Multiple(v) => Output::Multiple(v.into_iter().map(f).collect()),
        }
    }
}

impl<T> Default for Output<T> {
    fn default() -> Self {
        Self::None
    }
}

impl<T> From<Option<T>> for Output<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(item) => Self::Single(item),
            None => Self::None,
        }
    }
}

impl<T> From<Vec<T>> for Output<T> {
    fn from(mut v: Vec<T>) -> Self {
        match v.len() {
            0 => Self::None,
            1 => v.pop().map_or(Self::None, Self::Single),
            _ => Self::Multiple(v),
        }
    }
}

impl<T> FromIterator<T> for Output<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

impl<T> IntoIterator for Output<T> {
    type Item = T;
    type IntoIter = OutputIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        OutputIter(match self {
            Output::None => OutputIterInner::None,
            Output::Single(item) => OutputIterInner::Single(Some(item)),
            Output::Multiple(v) => OutputIterInner::Multiple(v.into_iter()),
        })
    }
}

/// Iterator over Output items.
pub struct OutputIter<T>(OutputIterInner<T>);

enum OutputIterInner<T> {
    None,
    Single(Option<T>),
    Multiple(std::vec::IntoIter<T>),
}

impl<T> Iterator for OutputIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.0 {
            OutputIterInner::None => None,
            OutputIterInner::Single(opt) => opt.take(),
            OutputIterInner::Multiple(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.0 {
            OutputIterInner::None => (0, Some(0)),
            OutputIterInner::Single(opt) => {
                let n = usize::from(opt.is_some());
                (n, Some(n))
            }
            OutputIterInner::Multiple(iter) => iter.size_hint(),
        }
    }
}

impl<T> ExactSizeIterator for OutputIter<T> {}

// ============================================================================
// Source Trait
// ============================================================================

/// A source element that produces records.
///
/// # Lifecycle
///
/// - `schema()` is read once, before the first `produce()`
/// - `produce()` is called repeatedly by the pipeline
/// - Return `Ok(Some(record))` to emit a record
/// - Return `Ok(None)` to signal end-of-stream (EOS)
/// - Return `Err(...)` to signal an error
///
/// # Example
///
/// ```rust,ignore
/// struct CounterSource {
///     schema: Schema,
///     count: u64,
///     max: u64,
/// }
///
/// impl Source for CounterSource {
///     fn schema(&self) -> &Schema {
///         &self.schema
///     }
///
///     fn produce(&mut self) -> Result<Option<Record>> {
///         if self.count >= self.max {
///             return Ok(None); // EOS
///         }
///         self.count += 1;
///         Ok(Some(Record::from_numbers(&[self.count as f64])))
///     }
/// }
/// ```
pub trait Source: Send {
    /// Schema of every record this source produces.
    fn schema(&self) -> &Schema;

    /// Produce the next record.
    ///
    /// Returns `Ok(None)` when the source is exhausted (end of stream).
    fn produce(&mut self) -> Result<Option<Record>>;

    /// Get the name of this source (for debugging/logging).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

// ============================================================================
// Sink Trait
// ============================================================================

/// A sink element that consumes records.
pub trait Sink: Send {
    /// Called once with the final schema, before the first record.
    fn start(&mut self, _schema: &Schema) -> Result<()> {
        Ok(())
    }

    /// Consume a record.
    fn consume(&mut self, record: Record) -> Result<()>;

    /// Called once after the last record.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }

    /// Get the name of this sink (for debugging/logging).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

// ============================================================================
// Transform Trait
// ============================================================================

/// A transform element that may hold records back and release them later.
///
/// Transforms are not strictly one-in/one-out: a call to `transform` may
/// produce zero, one or several records, and `flush` releases whatever is
/// still buffered at end of stream.
///
/// # Example
///
/// ```rust,ignore
/// struct Identity;
///
/// impl Transform for Identity {
///     fn negotiate(&mut self, input: &Schema) -> Result<Schema> {
///         Ok(input.clone())
///     }
///
///     fn transform(&mut self, record: Record) -> Result<Output> {
///         Ok(Output::single(record))
///     }
/// }
/// ```
pub trait Transform: Send {
    /// Fix the output schema from the input schema. Called once.
    fn negotiate(&mut self, input: &Schema) -> Result<Schema>;

    /// Transform an input record into output(s).
    fn transform(&mut self, record: Record) -> Result<Output>;

    /// Release buffered records at end of stream.
    fn flush(&mut self) -> Result<Output> {
        Ok(Output::None)
    }

    /// Get the name of this transform (for debugging/logging).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
