use std::io::{self, BufRead, BufWriter, Write};
use std::process;

use avro_core::engine::surface;
use avro_core::trie::TrieLookup;
use avro_core::Mode;

use super::accuracy;
use super::open_engine;

pub fn convert_cmd(text: Option<&str>, mode: Mode, grammar: Option<&str>) {
    let engine = die!(open_engine(grammar), "Error loading grammar: {}");

    if let Some(text) = text {
        let out = die!(engine.transliterate(text, mode), "Error: {}");
        println!("{out}");
        return;
    }

    let stdin = io::stdin();
    let mut out = BufWriter::new(io::stdout().lock());
    for line in stdin.lock().lines() {
        let line = die!(line, "Error reading stdin: {}");
        let converted = die!(engine.transliterate(&line, mode), "Error: {}");
        die!(writeln!(out, "{converted}"), "Error writing output: {}");
    }
    die!(out.flush(), "Error writing output: {}");
}

pub fn explain_cmd(text: &str, grammar: Option<&str>, json: bool) {
    let engine = die!(open_engine(grammar), "Error loading grammar: {}");
    let segments = engine.explain(text);

    if json {
        println!(
            "{}",
            die!(
                serde_json::to_string_pretty(&segments),
                "JSON serialization failed: {}"
            )
        );
        return;
    }

    for seg in &segments {
        let origin = match (&seg.pattern, seg.rule) {
            (None, _) => "literal".to_string(),
            (Some(p), None) => format!("pattern {p:?} default"),
            (Some(p), Some(r)) => format!("pattern {p:?} rule #{r}"),
        };
        println!(
            "{:>3}..{:<3} {:<6} -> {:<8} {}",
            seg.start, seg.end, seg.source, seg.output, origin
        );
    }
    println!("= {}", surface(&segments));
}

pub fn lookup_cmd(seq: &str, grammar: Option<&str>) {
    let engine = die!(open_engine(grammar), "Error loading grammar: {}");
    let patterns = engine.grammar().patterns();
    match engine.trie().lookup(seq) {
        TrieLookup::None => println!("{seq}: no match"),
        TrieLookup::Prefix => println!("{seq}: prefix only"),
        TrieLookup::Exact(i) => {
            let p = &patterns[i];
            println!("{seq}: exact -> {} ({} rules)", p.replace, rule_count(p));
        }
        TrieLookup::ExactAndPrefix(i) => {
            let p = &patterns[i];
            println!(
                "{seq}: exact and prefix -> {} ({} rules)",
                p.replace,
                rule_count(p)
            );
        }
    }
}

fn rule_count(p: &avro_core::grammar::Pattern) -> usize {
    p.rules.as_ref().map_or(0, Vec::len)
}

pub fn accuracy_cmd(
    corpus_file: &str,
    grammar: Option<&str>,
    category: Option<&str>,
    verbose: bool,
) {
    let engine = die!(open_engine(grammar), "Error loading grammar: {}");
    let corpus = die!(
        accuracy::load_corpus(corpus_file),
        "Error reading corpus: {}"
    );
    let report = accuracy::run(&engine, &corpus, category);

    for f in &report.failures {
        println!(
            "FAIL {:?}: expected {:?}, got {:?}",
            f.input, f.expected, f.actual
        );
    }
    if verbose {
        println!("skipped: {}", report.skipped);
    }
    println!("{}/{} passed", report.passed, report.total());

    if !report.is_success() {
        process::exit(1);
    }
}
