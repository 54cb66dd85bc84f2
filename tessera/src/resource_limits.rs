/// Resource limits applied at the boundaries where outside data enters
///
/// Catalogues, program text and stored blobs are all small in practice;
/// the limits only exist so a corrupt or hostile input fails fast.
#[derive(Debug, Clone)]
pub struct ResourceLimits {
    /// Maximum size of catalogue JSON in bytes
    /// Real usage: ~10KB, Limit: 1MB
    pub max_catalogue_bytes: usize,

    /// Maximum size of program text handed to the parser
    pub max_program_bytes: usize,

    /// Maximum size of a persisted tree blob
    pub max_blob_bytes: usize,

    /// Maximum size of a single text value set through the node builder
    pub max_text_value_bytes: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_catalogue_bytes: 1024 * 1024, // 1 MB
            max_program_bytes: 1024 * 1024,   // 1 MB
            max_blob_bytes: 4 * 1024 * 1024,  // 4 MB
            max_text_value_bytes: 4 * 1024,   // 4 KB
        }
    }
}

impl ResourceLimits {
    /// Create a new ResourceLimits with default values
    pub fn new() -> Self {
        Self::default()
    }
}
