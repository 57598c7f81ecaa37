use crate::Transport;

/// Settings shared by every call of a [`Serializer`](crate::Serializer).
///
/// # Examples
///
/// ```
/// use rg_serial::{SerializerConfig, Transport};
///
/// let config = SerializerConfig::default()
///     .with_transport(Transport::Raw)
///     .with_max_depth(64);
///
/// assert_eq!(config.transport, Transport::Raw);
/// assert_eq!(config.max_depth, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializerConfig {
    /// Transport applied to the text form, [`Transport::Base64`] by default.
    pub transport: Transport,
    /// Maximum nesting of containers and objects, in both directions.
    ///
    /// Deep nesting recurses on the native stack, so this bounds stack usage
    /// for hostile input as well as for long linked structures.
    ///
    /// Every shared object, list, map and inline value on the path from the
    /// root counts as one level. A linked list of `Shared` nodes therefore
    /// fails with `DepthLimitExceeded` once it is longer than the limit
    /// ([`DEFAULT_MAX_DEPTH`](Self::DEFAULT_MAX_DEPTH) by default). Raise it
    /// with [`with_max_depth`](Self::with_max_depth), and make sure the
    /// calling thread has stack for that many levels.
    pub max_depth: usize,
}

impl SerializerConfig {
    /// The default nesting limit, which also caps linked chains at 512 nodes.
    pub const DEFAULT_MAX_DEPTH: usize = 512;

    /// Creates the default configuration.
    #[inline]
    pub const fn new() -> Self {
        Self {
            transport: Transport::Base64,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Replaces the transport.
    #[inline]
    pub const fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    /// Replaces the nesting limit.
    #[inline]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for SerializerConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
