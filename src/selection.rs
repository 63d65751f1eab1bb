//! Attribute selection.
//!
//! A [`Selection`] names the attributes a filter rewrites. It is built either
//! from zero-based indices or parsed from range text using winnow:
//!
//! ```text
//! first-3,5,last
//! 2-last
//! ```
//!
//! # Syntax
//!
//! - Items are separated by `,`
//! - An item is a 1-based index, `first`, `last`, or a range `a-b`
//! - Whitespace is optional around `,` and `-`
//! - The empty string selects nothing
//!
//! Selections are resolved against the final schema exactly once, with
//! [`Selection::resolve`], yielding a per-attribute mask.

use crate::error::{Error, Result};
use std::fmt;
use winnow::Parser;
use winnow::ascii::{digit1, multispace0};
use winnow::combinator::{alt, opt, separated};
use winnow::error::ContextError;

type WResult<T> = std::result::Result<T, ContextError>;

/// One end of a selection item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    First,
    Last,
    /// Zero-based index.
    Index(usize),
}

impl Bound {
    /// Zero-based position, or `None` for `first`/`last` of an empty schema.
    fn resolve(self, arity: usize) -> Result<Option<usize>> {
        match self {
            Bound::First | Bound::Last if arity == 0 => Ok(None),
            Bound::First => Ok(Some(0)),
            Bound::Last => Ok(Some(arity - 1)),
            Bound::Index(i) if i < arity => Ok(Some(i)),
            Bound::Index(i) => Err(Error::InvalidSelection(format!(
                "index {} is past the last attribute ({arity})",
                i + 1
            ))),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::First => f.write_str("first"),
            Bound::Last => f.write_str("last"),
            Bound::Index(i) => write!(f, "{}", i + 1),
        }
    }
}

/// A single index or an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Item {
    start: Bound,
    end: Bound,
}

/// A set of attribute positions plus an invert flag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    items: Vec<Item>,
    invert: bool,
}

impl Selection {
    /// Select nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Select every attribute.
    pub fn all() -> Self {
        Self {
            items: vec![Item {
                start: Bound::First,
                end: Bound::Last,
            }],
            invert: false,
        }
    }

    /// Select the given zero-based attribute indices.
    pub fn indices(indices: impl IntoIterator<Item = usize>) -> Self {
        let items = indices
            .into_iter()
            .map(|i| Item {
                start: Bound::Index(i),
                end: Bound::Index(i),
            })
            .collect();
        Self {
            items,
            invert: false,
        }
    }

    /// Parse range text such as `"first-3,5,last"` (1-based).
    ///
    /// # Example
    ///
    /// ```rust
    /// use tsdelta::selection::Selection;
    ///
    /// let selection = Selection::parse("1,3-4").unwrap();
    /// assert_eq!(selection.resolve(5).unwrap(), vec![true, false, true, true, false]);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let items = selection
            .parse(text.trim())
            .map_err(|e| Error::InvalidSelection(format!("cannot parse '{text}': {e}")))?;
        Ok(Self {
            items,
            invert: false,
        })
    }

    /// Set the invert flag.
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Flip the matching sense.
    pub fn inverted(self) -> Self {
        let invert = !self.invert;
        self.with_invert(invert)
    }

    /// Whether the matching sense is inverted.
    pub fn is_inverted(&self) -> bool {
        self.invert
    }

    /// Check if no item was given.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolve against a schema of `arity` attributes.
    ///
    /// Returns one flag per attribute, `true` where the attribute is selected
    /// after applying the invert flag.
    pub fn resolve(&self, arity: usize) -> Result<Vec<bool>> {
        let mut mask = vec![false; arity];
        for item in &self.items {
            let (Some(start), Some(end)) = (item.start.resolve(arity)?, item.end.resolve(arity)?)
            else {
                continue;
            };
            if start > end {
                return Err(Error::InvalidSelection(format!(
                    "range {}-{} is reversed",
                    item.start, item.end
                )));
            }
            for flag in &mut mask[start..=end] {
                *flag = true;
            }
        }
        if self.invert {
            for flag in &mut mask {
                *flag = !*flag;
            }
        }
        Ok(mask)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.invert {
            f.write_str("!")?;
        }
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if item.start == item.end {
                write!(f, "{}", item.start)?;
            } else {
                write!(f, "{}-{}", item.start, item.end)?;
            }
        }
        Ok(())
    }
}

/// Parse a complete selection.
fn selection(input: &mut &str) -> WResult<Vec<Item>> {
    let items = separated(0.., item, item_separator).parse_next(input)?;

    multispace0.parse_next(input)?;
    if !input.is_empty() {
        return Err(ContextError::new());
    }

    Ok(items)
}

/// Parse the item separator `,`.
fn item_separator(input: &mut &str) -> WResult<()> {
    let _ = multispace0.parse_next(input)?;
    let _ = ','.parse_next(input)?;
    let _ = multispace0.parse_next(input)?;
    Ok(())
}

/// Parse an index or a range.
fn item(input: &mut &str) -> WResult<Item> {
    let start = bound.parse_next(input)?;
    let end = opt(range_tail).parse_next(input)?;
    Ok(Item {
        start,
        end: end.unwrap_or(start),
    })
}

/// Parse `- bound`.
fn range_tail(input: &mut &str) -> WResult<Bound> {
    let _ = multispace0.parse_next(input)?;
    let _ = '-'.parse_next(input)?;
    let _ = multispace0.parse_next(input)?;
    bound.parse_next(input)
}

/// Parse `first`, `last`, or a 1-based index.
fn bound(input: &mut &str) -> WResult<Bound> {
    alt((
        "first".map(|_| Bound::First),
        "last".map(|_| Bound::Last),
        index,
    ))
    .parse_next(input)
}

/// Parse a 1-based index into a zero-based bound.
fn index(input: &mut &str) -> WResult<Bound> {
    let digits: &str = digit1.parse_next(input)?;
    let value: usize = digits.parse().map_err(|_| ContextError::new())?;
    match value.checked_sub(1) {
        Some(i) => Ok(Bound::Index(i)),
        None => Err(ContextError::new()),
    }
}
