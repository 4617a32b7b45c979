use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::{decode, Grammar, GrammarError, DEFAULT_GRAMMAR_JSON};

/// Somewhere grammar bytes can be read from.
pub trait GrammarSource {
    fn load_bytes(&self) -> Result<Vec<u8>, GrammarError>;

    /// Human-readable origin, used in logs and CLI output.
    fn describe(&self) -> String;
}

/// The grammar compiled into the binary.
pub struct EmbeddedSource;

impl GrammarSource for EmbeddedSource {
    fn load_bytes(&self) -> Result<Vec<u8>, GrammarError> {
        Ok(DEFAULT_GRAMMAR_JSON.as_bytes().to_vec())
    }

    fn describe(&self) -> String {
        "embedded".to_string()
    }
}

pub struct FileSource(pub PathBuf);

impl GrammarSource for FileSource {
    fn load_bytes(&self) -> Result<Vec<u8>, GrammarError> {
        Ok(fs::read(&self.0)?)
    }

    fn describe(&self) -> String {
        self.0.display().to_string()
    }
}

pub struct BytesSource(pub Vec<u8>);

impl GrammarSource for BytesSource {
    fn load_bytes(&self) -> Result<Vec<u8>, GrammarError> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        format!("<{} bytes>", self.0.len())
    }
}

/// Read and decode a grammar.
pub fn load_grammar(source: &dyn GrammarSource) -> Result<Grammar, GrammarError> {
    let bytes = source.load_bytes()?;
    let grammar = decode(&bytes)?;
    debug!(
        source = %source.describe(),
        patterns = grammar.patterns().len(),
        "grammar loaded"
    );
    Ok(grammar)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_embedded_source() {
        let g = load_grammar(&EmbeddedSource).unwrap();
        assert!(!g.patterns().is_empty());
        assert_eq!(EmbeddedSource.describe(), "embedded");
    }

    #[test]
    fn test_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"vowel":"a","consonant":"k","casesensitive":"","patterns":[{{"find":"k","replace":"ক"}}]}}"#
        )
        .unwrap();
        let g = load_grammar(&FileSource(file.path().to_path_buf())).unwrap();
        assert_eq!(g.patterns().len(), 1);
    }

    #[test]
    fn test_file_source_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_grammar(&FileSource(dir.path().join("missing.json"))).unwrap_err();
        assert!(matches!(err, GrammarError::Io(_)));
    }

    #[test]
    fn test_bytes_source_decode_error() {
        let err = load_grammar(&BytesSource(b"[]".to_vec())).unwrap_err();
        assert!(matches!(err, GrammarError::Json(_)));
        assert_eq!(BytesSource(b"[]".to_vec()).describe(), "<2 bytes>");
    }
}
