use std::hint;

pub(crate) trait OptionExtension<T> {
    /// Acts similarly to [`Option::unwrap`] but with [`unreachable!`] in the none branch for debug
    /// builds and [`unreachable_unchecked`](hint::unreachable_unchecked) for release builds.
    ///
    /// # Safety
    /// The caller must guarantee that self is [`Some`].
    unsafe fn unreachable(self) -> T;
}

impl<T> OptionExtension<T> for Option<T> {
    unsafe fn unreachable(self) -> T {
        match self {
            Some(val) => val,
            None if cfg!(debug_assertions) => unreachable!(),
            // SAFETY: It is the responsibility of the caller to ensure that None is impossible when
            // invoking this method.
            None => unsafe { hint::unreachable_unchecked() },
        }
    }
}
