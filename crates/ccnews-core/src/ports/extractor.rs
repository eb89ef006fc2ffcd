//! Content extraction port.

use crate::domain::ExtractedContent;

/// Turns a captured HTML payload into article fields.
///
/// Implementations must not panic on malformed input; returning `None`
/// means "nothing worth keeping".
pub trait ContentExtractor: Send + Sync {
    fn extract(&self, payload: &[u8]) -> Option<ExtractedContent>;
}

/// Extractor that never produces content.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopExtractor;

impl ContentExtractor for NoopExtractor {
    fn extract(&self, _payload: &[u8]) -> Option<ExtractedContent> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_noop_extractor_returns_none() {
        let extractor: Arc<dyn ContentExtractor> = Arc::new(NoopExtractor);
        assert!(extractor.extract(b"<html></html>").is_none());
        assert!(extractor.extract(b"").is_none());
    }
}
