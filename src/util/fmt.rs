use std::fmt::{self, Debug, Formatter};

/// Formats the items produced by a cloneable iterator as a list. Used in place of a `Debug` impl
/// for the contents of collections that aren't stored as a single slice.
pub struct DebugList<I>(pub I);

impl<I> Debug for DebugList<I>
where
    I: Iterator + Clone,
    I::Item: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.clone()).finish()
    }
}
