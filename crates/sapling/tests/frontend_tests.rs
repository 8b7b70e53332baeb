// Trees built from Rust expression syntax
use pretty_assertions::assert_eq;
use sapling::frontend::parse_expr;
use sapling::*;

fn dump(src: &str) -> String {
    print(&parse_expr(src).expect("parse failed"))
}

fn dump_short(src: &str) -> String {
    let options = PrintOptions::new().with_type_names(TypeNames::Short);
    print_with(&parse_expr(src).expect("parse failed"), &options)
}

// ═══════════════════════════════════════════════════════════════════════
// Literals
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_integer_literals() {
    assert_eq!(dump("42"), "term<i64>[=42]\n");
    assert_eq!(dump("42i8"), "term<i8>[=42]\n");
    assert_eq!(dump("42u32"), "term<u32>[=42]\n");
    assert_eq!(dump("42usize"), "term<usize>[=42]\n");
}

#[test]
fn test_float_literals() {
    assert_eq!(dump("2.5"), "term<f64>[=2.5]\n");
    assert_eq!(dump("2.5f32"), "term<f32>[=2.5]\n");
    assert_eq!(dump("1f32"), "term<f32>[=1]\n");
    assert_eq!(dump("2f64"), "term<f64>[=2]\n");
}

#[test]
fn test_negation_stays_an_operator() {
    assert_eq!(dump("-5i8"), "expr<->\n    term<i8>[=5]\n");
    assert_eq!(dump("-2.5"), "expr<->\n    term<f64>[=2.5]\n");
}

#[test]
fn test_most_negative_literals_fold() {
    assert_eq!(dump("-128i8"), "term<i8>[=-128]\n");
    assert_eq!(
        dump("-9223372036854775808"),
        "term<i64>[=-9223372036854775808]\n"
    );
    assert_eq!(
        dump("_1 - -32768i16"),
        "expr<->\n    placeholder<1>\n    term<i16>[=-32768]\n"
    );
}

#[test]
fn test_negative_literal_still_out_of_range() {
    for src in ["-129i8", "-256u8"] {
        let err = parse_expr(src).unwrap_err();
        assert!(
            matches!(err, FrontendError::InvalidLiteral { .. }),
            "{} should be rejected, got {:?}",
            src,
            err
        );
    }
}

#[test]
fn test_other_literals() {
    assert_eq!(dump("true"), "term<bool>[=true]\n");
    assert_eq!(dump("'z'"), "term<char>[=z]\n");
    assert_eq!(dump("b'a'"), "term<u8>[=97]\n");
    assert_eq!(dump_short("\"hi\""), "term<String>[=hi]\n");
}

#[test]
fn test_byte_string_is_unprintable() {
    assert_eq!(
        dump_short("b\"raw\""),
        "term<Vec<u8>>[=<<unprintable-value>>]\n"
    );
}

#[test]
fn test_unit_is_unprintable() {
    assert_eq!(dump("()"), "term<()>[=<<unprintable-value>>]\n");
}

// ═══════════════════════════════════════════════════════════════════════
// Operators
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_precedence_shapes_tree() {
    assert_eq!(
        dump_short("x + _1 * 3"),
        concat!(
            "expr<+>\n",
            "    term<Name>[=x]\n",
            "    expr<*>\n",
            "        placeholder<1>\n",
            "        term<i64>[=3]\n",
        )
    );
}

#[test]
fn test_compound_assignment() {
    assert_eq!(
        dump_short("total <<= -shift"),
        concat!(
            "expr<<<=>\n",
            "    term<Name>[=total]\n",
            "    expr<->\n",
            "        term<Name>[=shift]\n",
        )
    );
}

#[test]
fn test_call_and_subscript() {
    assert_eq!(
        dump_short("std::cmp::max(v[_2], 0)"),
        concat!(
            "expr<()>\n",
            "    term<Name>[=std::cmp::max]\n",
            "    expr<[]>\n",
            "        term<Name>[=v]\n",
            "        placeholder<2>\n",
            "    term<i64>[=0]\n",
        )
    );
}

#[test]
fn test_method_call() {
    assert_eq!(
        dump_short("s.push(*c)"),
        concat!(
            "expr<()>\n",
            "    term<Name>[=push]\n",
            "    term<Name>[=s]\n",
            "    expr<*>\n",
            "        term<Name>[=c]\n",
        )
    );
}

#[test]
fn test_tuple_becomes_comma_chain() {
    assert_eq!(
        dump("(_1, _2, _3)"),
        concat!(
            "expr<,>\n",
            "    expr<,>\n",
            "        placeholder<1>\n",
            "        placeholder<2>\n",
            "    placeholder<3>\n",
        )
    );
}

#[test]
fn test_address_of_and_not() {
    assert_eq!(
        dump("!&_1"),
        "expr<!>\n    expr<&>\n        placeholder<1>\n"
    );
}

#[test]
fn test_parentheses_are_transparent() {
    assert_eq!(dump("(((_1)))"), dump("_1"));
}

// ═══════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_unsupported_constructs() {
    for src in ["|x| x", "a.b", "[1, 2]", "a as u8", "{ 1 }", "1..2"] {
        let err = parse_expr(src).unwrap_err();
        assert!(
            matches!(err, FrontendError::Unsupported { .. }),
            "{} should be unsupported, got {:?}",
            src,
            err
        );
    }
}

#[test]
fn test_error_messages() {
    let err = parse_expr("a.b").unwrap_err();
    assert_eq!(err.to_string(), "Unsupported expression: field access");

    let err = parse_expr("256u8").unwrap_err();
    assert!(err.to_string().starts_with("Invalid literal `256u8`: "));
}
