use std::fmt;

use crate::types::SituationAttribute;

/// Activation state of every situation attribute for one detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AttributeSet {
    active: [bool; SituationAttribute::COUNT],
}

impl AttributeSet {
    /// Set with no active attributes.
    #[inline] pub fn empty() -> Self { Self::default() }

    #[inline] pub fn insert(&mut self, attr: SituationAttribute) { self.active[attr.ordinal()] = true }

    #[inline] pub fn contains(&self, attr: SituationAttribute) -> bool { self.active[attr.ordinal()] }

    #[inline] pub fn is_empty(&self) -> bool { !self.active.iter().any(|&a| a) }

    #[inline] pub fn len(&self) -> usize { self.active.iter().filter(|&&a| a).count() }

    /// Get an iterator over the active attributes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = SituationAttribute> + '_ {
        SituationAttribute::ALL.into_iter().filter(|attr| self.contains(*attr))
    }
}

impl FromIterator<SituationAttribute> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = SituationAttribute>>(iter: I) -> Self {
        let mut set = Self::empty();
        iter.into_iter().for_each(|attr| set.insert(attr));
        set
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.iter().map(|attr| attr.to_str()).collect::<Vec<_>>();
        write!(f, "[{}]", names.join(", "))
    }
}
