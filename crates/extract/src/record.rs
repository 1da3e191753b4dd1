//! Raw ManySStuBs4J records

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One entry of the raw dataset's JSON array
///
/// The dataset carries many more fields (project, commit, line numbers);
/// only the patch and its label are needed for conversion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SstubRecord {
    /// Unified diff of the single-statement fix
    #[serde(rename = "fixPatch")]
    pub fix_patch: String,

    /// Bug template name, e.g. `CHANGE_IDENTIFIER`
    #[serde(rename = "bugType")]
    pub bug_type: String,
}

impl SstubRecord {
    pub fn new(fix_patch: impl Into<String>, bug_type: impl Into<String>) -> Self {
        Self {
            fix_patch: fix_patch.into(),
            bug_type: bug_type.into(),
        }
    }

    /// Parse a JSON array of records
    pub fn from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a raw dataset file
    pub fn load_all(path: impl AsRef<Path>) -> Result<Vec<Self>> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_extra_fields() {
        let json = r#"[
            {
                "bugType": "CHANGE_IDENTIFIER",
                "fixCommitSHA1": "abc123",
                "projectName": "demo.demo",
                "fixPatch": "@@ -1 +1 @@\n-a\n+b\n",
                "bugLineNum": 10
            }
        ]"#;

        let records = SstubRecord::from_json(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].bug_type, "CHANGE_IDENTIFIER");
        assert!(records[0].fix_patch.starts_with("@@"));
    }

    #[test]
    fn test_missing_patch_is_an_error() {
        let json = r#"[{"bugType": "CHANGE_IDENTIFIER"}]"#;

        assert!(SstubRecord::from_json(json).is_err());
    }
}
