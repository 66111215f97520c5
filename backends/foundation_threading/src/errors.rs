// region -- DispatchError

/// Returned by [`FallibleMulticast::try_dispatch`](crate::FallibleMulticast::try_dispatch)
/// when a subscriber fails.
///
/// Delivery stops at the failing subscriber; subscribers after `index` in the
/// snapshot were not invoked.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("subscriber at position {index} failed: {source}")]
pub struct DispatchError<E> {
    /// Position of the failing subscriber within the dispatch snapshot.
    pub index: usize,

    /// The error the subscriber returned.
    pub source: E,
}

// --- region: Custom methods

impl<E> DispatchError<E> {
    pub fn new(index: usize, source: E) -> Self {
        Self { index, source }
    }

    /// Discards the position and returns the subscriber's error.
    pub fn into_source(self) -> E {
        self.source
    }
}

// --- end region: Custom methods

// --- region: Error boilerplate

impl<E> core::error::Error for DispatchError<E>
where
    E: core::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.source)
    }
}

// --- end region: Error boilerplate

// --- end region: DispatchError
