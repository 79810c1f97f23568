//! Land-cover class registry
//!
//! Every matrix is indexed by a [`ClassSet`]: an ordered, closed set of
//! class names. [`ClassRegistry`] pairs the full class names with optional
//! abbreviations; when abbreviations are present, the abbreviated names
//! become the effective class set used by matrices.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};

/// Ordered set of unique class names.
#[derive(Debug, Clone, Default)]
pub struct ClassSet {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl ClassSet {
    /// Build a class set, preserving the given order.
    ///
    /// Fails with [`Error::DuplicateClass`] if a name appears twice.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for name in names {
            let name = name.into();
            if set.index.contains_key(&name) {
                return Err(Error::DuplicateClass(name));
            }
            set.index.insert(name.clone(), set.names.len());
            set.names.push(name);
        }
        Ok(set)
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Class names in registry order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Class name at position `i`
    pub fn get(&self, i: usize) -> Option<&str> {
        self.names.get(i).map(String::as_str)
    }

    /// Position of a class in registry order
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Position of a class, or [`Error::UnknownClass`] naming `context`.
    pub fn require(&self, name: &str, context: &str) -> Result<usize> {
        self.index_of(name)
            .ok_or_else(|| Error::unknown_class(name, context))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl PartialEq for ClassSet {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

impl Eq for ClassSet {}

impl fmt::Display for ClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names.join(", "))
    }
}

/// The class registry for one run: full class names plus optional
/// abbreviations.
///
/// Built once from configuration and shared read-only by every region.
#[derive(Debug, Clone)]
pub struct ClassRegistry {
    full: ClassSet,
    abbreviated: Option<ClassSet>,
}

impl ClassRegistry {
    /// Create a registry without abbreviations.
    pub fn new<I, S>(classes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            full: ClassSet::new(classes)?,
            abbreviated: None,
        })
    }

    /// Attach an abbreviation for every class.
    ///
    /// Each pair is `(full name, abbreviation)`. Every registry class must
    /// receive exactly one abbreviation, and abbreviations must be unique.
    pub fn with_abbreviations<I, A, B>(mut self, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: Into<String>,
    {
        let mut slots: Vec<Option<String>> = vec![None; self.full.len()];
        for (name, abbrev) in pairs {
            let i = self.full.require(name.as_ref(), "abbreviation table")?;
            if slots[i].is_some() {
                return Err(Error::DuplicateClass(name.as_ref().to_string()));
            }
            slots[i] = Some(abbrev.into());
        }

        let mut abbrevs = Vec::with_capacity(slots.len());
        for (i, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(a) => abbrevs.push(a),
                None => {
                    let name = self.full.get(i).unwrap_or_default();
                    return Err(Error::unknown_class(name, "missing from abbreviation table"));
                }
            }
        }

        self.abbreviated = Some(ClassSet::new(abbrevs)?);
        Ok(self)
    }

    /// The class set matrices are indexed by: abbreviations when present,
    /// full names otherwise.
    pub fn classes(&self) -> &ClassSet {
        self.abbreviated.as_ref().unwrap_or(&self.full)
    }

    /// Full class names in registry order
    pub fn full_classes(&self) -> &ClassSet {
        &self.full
    }

    /// Resolve a class name to its position in [`classes`](Self::classes).
    ///
    /// Accepts either a full name or, when abbreviations are present, an
    /// abbreviation. Fails with [`Error::UnknownClass`] otherwise.
    pub fn resolve(&self, name: &str, context: &str) -> Result<usize> {
        if let Some(i) = self.full.index_of(name) {
            return Ok(i);
        }
        match &self.abbreviated {
            Some(abbrevs) => abbrevs.require(name, context),
            None => Err(Error::unknown_class(name, context)),
        }
    }

    /// Effective (possibly abbreviated) name for a class.
    pub fn effective_name(&self, name: &str) -> Option<&str> {
        let i = self.resolve(name, "").ok()?;
        self.classes().get(i)
    }
}
