use crate::config::SolverConfig;
use crate::stoichiometry::{expand_groups, strip_coefficient, Composition};
use crate::ChemEngError;

fn expand(input: &str) -> Result<String, ChemEngError> {
    expand_groups(input, &SolverConfig::default())
}

#[test]
fn test_expand_simple_group() {
    assert_eq!(expand("CH3(CH2)2OH").unwrap(), "CH3CH2CH2OH");
    assert_eq!(expand("Ca(OH)2").unwrap(), "CaOHOH");
    assert_eq!(expand("(OH)").unwrap(), "OH");
}

#[test]
fn test_expand_nested_groups() {
    assert_eq!(expand("CH3(C(H2))4OH").unwrap(), "CH3CH2CH2CH2CH2OH");
    assert_eq!(expand("((H)2O)2").unwrap(), "HHOHHO");
}

#[test]
fn test_expand_whole_equation() {
    assert_eq!(
        expand("CH3(C(H2))4OH + O2 --> CO2 + H2O").unwrap(),
        "CH3CH2CH2CH2CH2OH + O2 --> CO2 + H2O"
    );
}

#[test]
fn test_expand_is_idempotent() {
    let once = expand("Al2(SO4)3 + Ca(OH)2").unwrap();
    assert_eq!(expand(&once).unwrap(), once);
}

#[test]
fn test_expand_unbalanced_parentheses() {
    for input in ["CH3)2", "CH3(CH2", "(", ")", "Ca(OH))2"] {
        let result = expand(input);
        assert!(
            matches!(result, Err(ChemEngError::MalformedInput { .. })),
            "expected MalformedInput for '{}', got {:?}",
            input,
            result
        );
    }
}

#[test]
fn test_expand_depth_limit() {
    let input = format!("{}H{}", "(".repeat(40), ")".repeat(40));
    let err = expand(&input).unwrap_err();
    assert!(matches!(
        err,
        ChemEngError::ResourceLimitExceeded { ref limit_name, .. } if limit_name == "max_group_depth"
    ));

    let config = SolverConfig {
        max_group_depth: 64,
        ..SolverConfig::default()
    };
    assert_eq!(expand_groups(&input, &config).unwrap(), "H");
}

#[test]
fn test_expand_size_limit() {
    let err = expand("(H999999)999999").unwrap_err();
    assert!(matches!(
        err,
        ChemEngError::ResourceLimitExceeded { ref limit_name, .. } if limit_name == "max_expanded_bytes"
    ));
}

#[test]
fn test_composition_sums_repeated_elements() {
    let composition = Composition::parse("CH3CH2OH").unwrap();
    assert_eq!(
        composition.counts,
        vec![
            ("C".to_string(), 2.0),
            ("H".to_string(), 6.0),
            ("O".to_string(), 1.0)
        ]
    );
    assert_eq!(composition.get("H"), 6.0);
    assert_eq!(composition.get("N"), 0.0);
}

#[test]
fn test_composition_two_letter_symbols() {
    let composition = Composition::parse("NaCl").unwrap();
    assert_eq!(composition.elements().collect::<Vec<_>>(), vec!["Na", "Cl"]);

    let composition = Composition::parse("C12H22O11").unwrap();
    assert_eq!(composition.get("C"), 12.0);
    assert_eq!(composition.get("O"), 11.0);
}

#[test]
fn test_composition_rejects_uncovered_characters() {
    for formula in ["", "h2o", "H2O!", "2H2O", "H2 O", "(OH)"] {
        let result = Composition::parse(formula);
        assert!(
            matches!(result, Err(ChemEngError::MalformedInput { .. })),
            "expected MalformedInput for '{}', got {:?}",
            formula,
            result
        );
    }
}

#[test]
fn test_strip_coefficient() {
    assert_eq!(strip_coefficient(" 2 H2O "), "H2O");
    assert_eq!(strip_coefficient("2H2O"), "H2O");
    assert_eq!(strip_coefficient("1.5O2"), "O2");
    assert_eq!(strip_coefficient("CH4"), "CH4");
}
