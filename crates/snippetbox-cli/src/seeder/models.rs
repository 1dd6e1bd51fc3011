/// Expiry choices offered by the create form, in days.
pub const EXPIRY_CHOICES: [i32; 3] = [1, 7, 365];

/// Seed data for creating a snippet.
#[derive(Debug, Clone)]
pub struct SnippetSeed {
    pub title: String,
    pub content: String,
    pub expires_days: i32,
}

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub count: usize,
    /// Title length bound, matching the `snippets.title` column.
    pub max_title_len: usize,
}

impl SeedConfig {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            max_title_len: 100,
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self::new(25)
    }
}
