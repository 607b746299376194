//! The self-hosting fixed point: compiling the bootstrap grammar sources
//! must reproduce the checked-in generated modules, byte for byte. A change
//! to either the grammars or the emission format shows up here first;
//! regenerate with `metapeg --compile` and commit the result.

use metapeg::compile_source;
use pretty_assertions::assert_eq;

#[test]
fn test_parser_grammar_compiles_to_the_checked_in_module() {
    let output = compile_source(include_str!("../grammars/parser.peg")).unwrap();
    assert_eq!(output, include_str!("../src/parser.rs"));
}

#[test]
fn test_codegen_grammar_compiles_to_the_checked_in_module() {
    let output = compile_source(include_str!("../grammars/codegen.peg")).unwrap();
    assert_eq!(output, include_str!("../src/codegen.rs"));
}

#[test]
fn test_generated_parser_reparses_its_own_grammar() {
    // The second generation accepts what the first generation accepted.
    let source = include_str!("../grammars/parser.peg");
    let first = metapeg::parse_source(source).unwrap();
    let second = metapeg::parse_source(source).unwrap();
    assert_eq!(first, second);
}
