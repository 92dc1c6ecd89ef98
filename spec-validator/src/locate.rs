use std::path::PathBuf;

use crate::config::SearchConfig;
use crate::error::SpecError;

/// Return the first candidate path that exists.
///
/// # Errors
///
/// Returns [`SpecError::NotFound`] listing every candidate, in search order,
/// if none exists.
pub fn locate_spec(search: &SearchConfig) -> Result<PathBuf, SpecError> {
    for candidate in &search.candidates {
        if candidate.exists() {
            tracing::debug!(path = %candidate.display(), "found OpenAPI document");
            return Ok(candidate.clone());
        }
        tracing::debug!(path = %candidate.display(), "candidate does not exist");
    }
    Err(SpecError::NotFound {
        tried: search.candidates.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_first_existing_candidate_wins() {
        let tmp = TempDir::new().unwrap();
        let first = tmp.path().join("a.yaml");
        let second = tmp.path().join("b.yaml");
        let third = tmp.path().join("c.yaml");
        fs::write(&second, "openapi: 3.0.3").unwrap();
        fs::write(&third, "openapi: 3.0.3").unwrap();

        let search = SearchConfig::with_candidates(vec![first, second.clone(), third]);
        assert_eq!(locate_spec(&search).unwrap(), second);
    }

    #[test]
    fn test_not_found_lists_all_candidates() {
        let tmp = TempDir::new().unwrap();
        let candidates = vec![tmp.path().join("x.yaml"), tmp.path().join("y.yaml")];
        let search = SearchConfig::with_candidates(candidates.clone());

        match locate_spec(&search) {
            Err(SpecError::NotFound { tried }) => assert_eq!(tried, candidates),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
