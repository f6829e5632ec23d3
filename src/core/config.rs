#[derive(Debug, Clone)]
pub struct ParseConfig {
    /// Deepest entity nesting accepted before decoding is aborted.
    pub max_depth: u32,
    pub max_children: u32,
    pub max_array_elements: u32,
    pub max_metadata_entries: u32,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_depth: 256,
            max_children: 1_000_000,
            max_array_elements: 500_000_000,
            max_metadata_entries: 65_536,
        }
    }
}
