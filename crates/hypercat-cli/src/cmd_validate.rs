use anyhow::{Context, Result};
use hypercat::v1::parse;
use std::path::PathBuf;

pub fn run(input: PathBuf) -> Result<()> {
    let content =
        std::fs::read_to_string(&input).with_context(|| format!("Failed to read {:?}", input))?;
    validate_content(&content)
}

fn validate_content(content: &str) -> Result<()> {
    let catalog = parse(content)
        .and_then(|cat| cat.validate().map(|()| cat))
        .map_err(|e| anyhow::anyhow!("Invalid: {}", e))?;
    println!(
        "Valid: catalogue {:?} ({} items)",
        catalog.description().unwrap_or_default(),
        catalog.items().len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"{"item-metadata":[{"rel":"urn:X-tsbiot:rels:isContentType","val":"application/vnd.tsbiot.catalogue+json"},{"rel":"urn:X-tsbiot:rels:hasDescription:en","val":""}],"items":[]}"#;

    #[test]
    fn test_validate_minimal() {
        assert!(validate_content(MINIMAL).is_ok());
    }

    #[test]
    fn test_validate_with_items() {
        let json = r#"{"item-metadata":[{"rel":"urn:X-tsbiot:rels:isContentType","val":"application/vnd.tsbiot.catalogue+json"},{"rel":"urn:X-tsbiot:rels:hasDescription:en","val":"root"}],"items":[{"href":"http://a","i-object-metadata":[{"rel":"urn:X-tsbiot:rels:isContentType","val":"text/plain"},{"rel":"urn:X-tsbiot:rels:hasDescription:en","val":"a"}]}]}"#;
        assert!(validate_content(json).is_ok());
    }

    #[test]
    fn test_validate_invalid_json() {
        assert!(validate_content("not json").is_err());
    }

    #[test]
    fn test_validate_missing_description() {
        let json = r#"{"item-metadata":[{"rel":"urn:X-tsbiot:rels:isContentType","val":"application/vnd.tsbiot.catalogue+json"}],"items":[]}"#;
        assert!(validate_content(json).is_err());
    }

    #[test]
    fn test_validate_not_a_catalogue() {
        let json = r#"{"item-metadata":[{"rel":"urn:X-tsbiot:rels:isContentType","val":"text/plain"},{"rel":"urn:X-tsbiot:rels:hasDescription:en","val":""}],"items":[]}"#;
        assert!(validate_content(json).is_err());
    }

    #[test]
    fn test_validate_duplicate_content_type() {
        let json = r#"{"item-metadata":[{"rel":"urn:X-tsbiot:rels:isContentType","val":"application/vnd.tsbiot.catalogue+json"},{"rel":"urn:X-tsbiot:rels:hasDescription:en","val":"root"}],"items":[{"href":"http://a","i-object-metadata":[{"rel":"urn:X-tsbiot:rels:isContentType","val":"text/plain"},{"rel":"urn:X-tsbiot:rels:isContentType","val":"image/png"},{"rel":"urn:X-tsbiot:rels:hasDescription:en","val":"a"}]}]}"#;
        let err = validate_content(json).unwrap_err();
        assert!(err.to_string().contains("exactly once"));
    }

    #[test]
    fn test_run_with_temp_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{}", MINIMAL).unwrap();
        f.flush().unwrap();
        assert!(run(f.path().to_path_buf()).is_ok());
    }

    #[test]
    fn test_run_nonexistent_file() {
        assert!(run(PathBuf::from("/nonexistent/file.json")).is_err());
    }
}
