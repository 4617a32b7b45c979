//! Subcommand implementations for `avrotool`.

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod accuracy;
pub mod config_ops;
pub mod convert_ops;

use std::path::PathBuf;

use avro_core::grammar::{EmbeddedSource, FileSource, GrammarSource};
use avro_core::{TransliterationError, Transliterator};

/// Build an engine from `--grammar FILE`, or the embedded grammar.
pub fn open_engine(grammar: Option<&str>) -> Result<Transliterator, TransliterationError> {
    let source: Box<dyn GrammarSource> = match grammar {
        Some(path) => Box::new(FileSource(PathBuf::from(path))),
        None => Box::new(EmbeddedSource),
    };
    Transliterator::from_source(source.as_ref())
}
