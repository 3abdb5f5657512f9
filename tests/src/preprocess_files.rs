// Preprocessing real files, then feeding the result to the expression engine.
use std::fs;

use cinfix_eval::{evaluate_source, ExprError};
use cinfix_pp::{PreprocessErrorKind, Preprocessor, PreprocessorConfig};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[test]
fn include_guard_keeps_second_include_empty() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("guard.h"),
        "#ifndef GUARD_H\n#define GUARD_H\n#define WIDTH 80\n#endif\n",
    )
    .unwrap();
    let main = dir.path().join("main.in");
    fs::write(
        &main,
        "#include \"guard.h\"\n#include \"guard.h\"\n#if WIDTH >= 80\nwide\n#endif\n",
    )
    .unwrap();

    let mut pp = Preprocessor::new(PreprocessorConfig::default());
    let out = pp.process_file(&main).unwrap();
    assert_eq!(out, format!("{}wide\n\n", "\n".repeat(11)));
    assert!(pp.is_defined("GUARD_H"));
    assert_eq!(pp.macros().len(), 2);
}

#[test]
fn errors_name_the_included_file() {
    let dir = tempdir().unwrap();
    let header = dir.path().join("bad.h");
    fs::write(&header, "\n#if 1 +\n#endif\n").unwrap();
    let main = dir.path().join("main.in");
    fs::write(&main, "first\n#include \"bad.h\"\n").unwrap();

    let err = Preprocessor::new(PreprocessorConfig::default())
        .process_file(&main)
        .unwrap_err();
    assert_eq!(err.file, header.display().to_string());
    assert_eq!(err.line, 2);
    assert!(matches!(
        err.kind,
        PreprocessErrorKind::Expression(ExprError::Parse(_))
    ));
}

#[test]
fn expanded_text_evaluates() {
    let mut pp = Preprocessor::new(PreprocessorConfig::default());
    let out = pp
        .process_str(
            "calc.in",
            "#define BASE 10\n#define SCALE (BASE * 2)\nSCALE + 1\nBASE << 2\n",
        )
        .unwrap();
    assert_eq!(out, "\n\n(10 * 2) + 1\n10 << 2\n");

    let values: Vec<i32> = out
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| evaluate_source(line).unwrap())
        .collect();
    assert_eq!(values, vec![21, 40]);
}

#[test]
fn command_line_defines_drive_conditionals() {
    let mut pp = Preprocessor::new(PreprocessorConfig::default());
    pp.define("LEVEL", "3").unwrap();
    let source = "#if LEVEL > 2 && defined(LEVEL)\nhigh\n#elif LEVEL\nlow\n#endif\n";
    assert_eq!(pp.process_str("a.in", source).unwrap(), "\nhigh\n\n\n\n");

    pp.reset();
    pp.define("LEVEL", "1").unwrap();
    assert_eq!(pp.process_str("a.in", source).unwrap(), "\n\n\nlow\n\n");
}
