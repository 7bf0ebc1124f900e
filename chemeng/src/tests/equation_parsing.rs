use crate::equation::{parse_template, EquationFamily, EquationSpec, Parameter, Span};
use crate::ChemEngError;
use std::collections::BTreeMap;

fn eval(template: &str) -> f64 {
    parse_template(template)
        .unwrap()
        .evaluate(&BTreeMap::new(), &BTreeMap::new(), 0.0)
        .unwrap()
}

#[test]
fn test_operator_precedence() {
    assert_eq!(eval("1 + 2 * 3"), 7.0);
    assert_eq!(eval("(1 + 2) * 3"), 9.0);
    assert_eq!(eval("10 - 4 - 3"), 3.0);
    assert_eq!(eval("8 / 4 / 2"), 1.0);
}

#[test]
fn test_power_is_right_associative_and_binds_tighter_than_negation() {
    assert_eq!(eval("2 ** 3 ** 2"), 512.0);
    assert_eq!(eval("2 ^ 3"), 8.0);
    assert_eq!(eval("-2 ** 2"), -4.0);
    assert_eq!(eval("2 ** -1"), 0.5);
    assert_eq!(eval("2 * -3"), -6.0);
}

#[test]
fn test_number_literals() {
    assert_eq!(eval("0.5"), 0.5);
    assert_eq!(eval(".25"), 0.25);
    assert_eq!(eval("1.5e3"), 1500.0);
    assert_eq!(eval("2E-2"), 0.02);
}

#[test]
fn test_placeholders_and_constants() {
    let expression = parse_template("0.5 * {rho} * {v} ** 2 + {rho} * G * {h} + {P}").unwrap();
    assert_eq!(expression.parameters(), vec!["rho", "v", "h", "P"]);
    assert_eq!(expression.constants(), vec!["G"]);

    let parameters = BTreeMap::from([
        ("rho".to_string(), Parameter::Known(1000.0)),
        ("v".to_string(), Parameter::Unknown),
        ("h".to_string(), Parameter::Known(2.0)),
        ("P".to_string(), Parameter::Known(100.0)),
    ]);
    let constants = BTreeMap::from([("G".to_string(), 10.0)]);

    let value = expression.evaluate(&parameters, &constants, 3.0).unwrap();
    assert_eq!(value, 0.5 * 1000.0 * 9.0 + 1000.0 * 10.0 * 2.0 + 100.0);
}

#[test]
fn test_missing_parameter() {
    let expression = parse_template("{a} + {b}").unwrap();
    let parameters = BTreeMap::from([("a".to_string(), Parameter::Known(1.0))]);
    let err = expression
        .evaluate(&parameters, &BTreeMap::new(), 0.0)
        .unwrap_err();
    assert_eq!(
        err,
        ChemEngError::MissingParameter {
            parameter: "b".to_string()
        }
    );
}

#[test]
fn test_malformed_templates() {
    for template in ["", "1 +", "{}", "{rho", "2 ** ", "(1 + 2", "1 2", "2 * * 3"] {
        let result = parse_template(template);
        assert!(
            matches!(result, Err(ChemEngError::MalformedInput { .. })),
            "expected MalformedInput for '{}', got {:?}",
            template,
            result
        );
    }
}

#[test]
fn test_display_shows_grouping() {
    let expression = parse_template("1 + {x} * 3 ** 2").unwrap();
    assert_eq!(expression.to_string(), "(1 + ({x} * (3 ** 2)))");
}

struct TestFamily {
    template: &'static str,
    term_units: &'static [(&'static str, &'static str)],
}

impl EquationFamily for TestFamily {
    fn name(&self) -> &str {
        "test"
    }

    fn template(&self) -> &str {
        self.template
    }

    fn term_units(&self) -> &[(&str, &str)] {
        self.term_units
    }

    fn constants(&self) -> &[(&str, f64)] {
        &[("k", 2.0)]
    }
}

fn compile_error(
    template: &'static str,
    term_units: &'static [(&'static str, &'static str)],
) -> String {
    match EquationSpec::compile(&TestFamily {
        template,
        term_units,
    }) {
        Err(ChemEngError::ContractViolation { equation, message }) => {
            assert_eq!(equation, "test");
            message
        }
        other => panic!("expected ContractViolation, got {:?}", other),
    }
}

#[test]
fn test_compile_valid_family() {
    let spec = EquationSpec::compile(&TestFamily {
        template: "k * {x} - {y}",
        term_units: &[("x", "m"), ("y", "m")],
    })
    .unwrap();
    assert_eq!(spec.parameters(), vec!["x", "y"]);
    assert_eq!(spec.unit_of("x").unwrap().symbol, "m");
    assert!(spec.unit_of("z").is_none());
}

#[test]
fn test_compile_requires_unit_table() {
    let message = compile_error("{x}", &[]);
    assert!(message.contains("unit for each term"));
}

#[test]
fn test_compile_rejects_term_without_unit() {
    let message = compile_error("{x} + {y}", &[("x", "m")]);
    assert!(message.contains("'{y}' at 6..9"), "message was {}", message);
}

#[test]
fn test_compile_rejects_undefined_constant() {
    let message = compile_error("c * {x}", &[("x", "m")]);
    assert!(message.contains("'c' at 0..1"), "message was {}", message);
}

#[test]
fn test_references_keep_first_span() {
    let expression = parse_template("{v} ** 2 + k * {v} - k").unwrap();
    assert_eq!(
        expression.parameter_spans(),
        vec![("v".to_string(), Span { start: 0, end: 3 })]
    );
    assert_eq!(
        expression.constant_spans(),
        vec![("k".to_string(), Span { start: 11, end: 12 })]
    );
    assert_eq!(expression.parameters(), vec!["v"]);
}

#[test]
fn test_compile_rejects_bad_unit_and_bad_template() {
    let message = compile_error("{x}", &[("x", "furlong")]);
    assert!(message.contains("furlong"));

    let message = compile_error("{x} +", &[("x", "m")]);
    assert!(message.contains("does not parse"));
}
