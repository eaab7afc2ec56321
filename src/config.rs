//! Configuration for index construction
//!
//! All structs deserialize from JSON with every field optional; missing
//! fields fall back to their `Default` values.

use crate::error::{Result, SeqError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default terminal symbol for suffix trees and BWT inversion
pub const DEFAULT_SENTINEL: u8 = b'$';

/// Configuration for suffix tree building
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuffixTreeConfig {
    /// Symbol appended to the text; must not occur in it (default: `$`)
    pub sentinel: u8,
}

impl Default for SuffixTreeConfig {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL,
        }
    }
}

/// Configuration for Burrows-Wheeler transform building
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BwtConfig {
    /// Record the rotation start offsets so matches map to text positions
    /// (default: false)
    pub build_suffix_array: bool,
    /// Symbol that marks the end of the text, used by inversion (default: `$`)
    pub terminator: u8,
    /// Texts longer than this are sorted in parallel (default: 100_000)
    pub parallel_sort_threshold: usize,
}

impl Default for BwtConfig {
    fn default() -> Self {
        Self {
            build_suffix_array: false,
            terminator: DEFAULT_SENTINEL,
            parallel_sort_threshold: 100_000,
        }
    }
}

/// Top-level configuration, as loaded by the command line tool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeqScanConfig {
    pub suffix_tree: SuffixTreeConfig,
    pub bwt: BwtConfig,
}

impl SeqScanConfig {
    /// Parse a configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SeqError::config(e.to_string()))
    }

    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SeqScanConfig::default();
        assert_eq!(config.suffix_tree.sentinel, b'$');
        assert!(!config.bwt.build_suffix_array);
        assert_eq!(config.bwt.terminator, b'$');
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SeqScanConfig::from_json(r#"{"bwt": {"build_suffix_array": true}}"#).unwrap();
        assert!(config.bwt.build_suffix_array);
        assert_eq!(config.bwt.parallel_sort_threshold, 100_000);
        assert_eq!(config.suffix_tree, SuffixTreeConfig::default());
    }

    #[test]
    fn test_custom_sentinel() {
        let config = SeqScanConfig::from_json(r#"{"suffix_tree": {"sentinel": 35}}"#).unwrap();
        assert_eq!(config.suffix_tree.sentinel, b'#');
    }

    #[test]
    fn test_invalid_json() {
        let err = SeqScanConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, SeqError::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SeqScanConfig::load(Path::new("/nonexistent/seqscan.json")).unwrap_err();
        assert!(matches!(err, SeqError::Io(_)));
    }
}
