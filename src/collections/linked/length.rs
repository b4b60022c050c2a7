use std::num::NonZero;

/// The length of a list which contains at least one element. Lists store this inside of their
/// non-empty state, so that an empty list can never report a non-zero length or vice versa.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub(crate) struct Length(pub NonZero<usize>);

impl Length {
    pub const ONE: Length = Length(NonZero::<usize>::MIN);

    pub const fn checked_add(self, other: usize) -> Option<Length> {
        match self.0.checked_add(other) {
            Some(res) => Some(Length(res)),
            None => None,
        }
    }

    /// Subtracts `other`, returning [`None`] if the result would be zero (or less).
    pub const fn checked_sub(self, other: usize) -> Option<Length> {
        match self.0.get().checked_sub(other) {
            Some(res) => match NonZero::new(res) {
                Some(non_zero) => Some(Length(non_zero)),
                None => None,
            },
            None => None,
        }
    }

    pub const fn get(self) -> usize {
        self.0.get()
    }
}
