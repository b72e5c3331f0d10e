use anyhow::Result;
use std::path::PathBuf;

use crate::io::{catalog_json, read_catalog, write_output};

/// Parse a catalogue and write it back out in canonical form.
pub fn run(input: Option<PathBuf>, output: Option<PathBuf>, pretty: bool) -> Result<()> {
    let catalog = read_catalog(input.as_ref())?;
    write_output(output.as_ref(), &catalog_json(&catalog, pretty)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPACED: &str = r#"{
  "items": [],
  "item-metadata": [
    {"val": "application/vnd.tsbiot.catalogue+json", "rel": "urn:X-tsbiot:rels:isContentType"},
    {"val": "Spaced", "rel": "urn:X-tsbiot:rels:hasDescription:en"}
  ]
}"#;

    #[test]
    fn test_render_canonicalises() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.json");
        std::fs::write(&input, SPACED).unwrap();

        run(Some(input), Some(output.clone()), false).unwrap();
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            r#"{"item-metadata":[{"rel":"urn:X-tsbiot:rels:isContentType","val":"application/vnd.tsbiot.catalogue+json"},{"rel":"urn:X-tsbiot:rels:hasDescription:en","val":"Spaced"}],"items":[]}"#
        );
    }

    #[test]
    fn test_render_pretty_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let first = dir.path().join("first.json");
        let second = dir.path().join("second.json");
        std::fs::write(&input, SPACED).unwrap();

        run(Some(input), Some(first.clone()), true).unwrap();
        run(Some(first.clone()), Some(second.clone()), true).unwrap();
        assert_eq!(
            std::fs::read_to_string(&first).unwrap(),
            std::fs::read_to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_render_rejects_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        std::fs::write(&input, r#"{"items":[]}"#).unwrap();
        assert!(run(Some(input), None, false).is_err());
    }
}
