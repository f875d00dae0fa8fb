//! Object Identifier (OID) type.
//!
//! The router renders its MIB tables as JSON keyed by dotted OID paths. OIDs
//! are stored as `SmallVec<[u32; 16]>` so the 16-arc client table columns
//! never allocate.

use crate::error::{Error, Result};
use smallvec::SmallVec;
use std::fmt;

/// Object Identifier.
///
/// Stored as a sequence of arc values (u32).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Oid {
    arcs: SmallVec<[u32; 16]>,
}

impl Oid {
    /// Create an empty OID.
    pub fn empty() -> Self {
        Self {
            arcs: SmallVec::new(),
        }
    }

    /// Create an OID from arc values.
    ///
    /// # Examples
    ///
    /// ```
    /// use arris_connectbox::oid::Oid;
    ///
    /// let oid = Oid::new([1, 3, 6, 1]);
    /// assert_eq!(oid.len(), 4);
    /// ```
    pub fn new(arcs: impl IntoIterator<Item = u32>) -> Self {
        Self {
            arcs: arcs.into_iter().collect(),
        }
    }

    /// Create an OID from a slice of arcs.
    pub fn from_slice(arcs: &[u32]) -> Self {
        Self {
            arcs: SmallVec::from_slice(arcs),
        }
    }

    /// Parse an OID from dotted string notation (e.g., "1.3.6.1.2.1.1.1.0").
    ///
    /// Empty segments are rejected, so `"1..3"` and `"1.3."` fail.
    ///
    /// # Examples
    ///
    /// ```
    /// use arris_connectbox::oid::Oid;
    ///
    /// let oid = Oid::parse("1.3.6.1.4.1.4115").unwrap();
    /// assert_eq!(oid.arcs(), &[1, 3, 6, 1, 4, 1, 4115]);
    ///
    /// assert!(Oid::parse("1.3.x").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(Self::empty());
        }

        Self::from_segments(s.split('.'))
            .ok_or_else(|| Error::InvalidOid(s.into()).boxed())
    }

    /// Build an OID from already split dotted segments.
    ///
    /// Returns `None` if any segment is not a decimal `u32`.
    pub(crate) fn from_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let mut arcs = SmallVec::new();
        for part in segments {
            arcs.push(part.parse::<u32>().ok()?);
        }
        Some(Self { arcs })
    }

    /// Get the arc values.
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Get the number of arcs.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Check if the OID is empty.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Check if this OID starts with another OID.
    ///
    /// An OID always starts with itself, and any OID starts with an empty OID.
    pub fn starts_with(&self, other: &Oid) -> bool {
        self.arcs.len() >= other.arcs.len() && self.arcs[..other.arcs.len()] == other.arcs[..]
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.arcs {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", arc)?;
            first = false;
        }
        Ok(())
    }
}

/// Macro to create an OID at compile time.
///
/// # Examples
///
/// ```
/// use arris_connectbox::oid;
///
/// let host_name = oid!(1, 3, 6, 1, 4, 1, 4115, 1, 20, 1, 1, 2, 4, 2, 1, 3);
/// assert_eq!(host_name.len(), 16);
/// ```
#[macro_export]
macro_rules! oid {
    ($($arc:expr),* $(,)?) => {
        $crate::oid::Oid::from_slice(&[$($arc),*])
    };
}
