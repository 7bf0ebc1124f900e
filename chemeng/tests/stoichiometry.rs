use chemeng::{ChemEngError, SolverConfig, Stoichiometry};

fn row(values: &[f64]) -> Vec<f64> {
    values.to_vec()
}

#[test]
fn test_methane_combustion() {
    let st = Stoichiometry::new("CH4 + O2 --> CO2 + H2O").unwrap();
    assert_eq!(st.input_eq, "CH4 + O2 --> CO2 + H2O");
    assert_eq!(st.molecules.reactants, vec!["CH4", "O2"]);
    assert_eq!(st.molecules.products, vec!["CO2", "H2O"]);
    assert_eq!(
        st.element_balance,
        vec![
            ("C".to_string(), row(&[1.0, 0.0, -1.0, 0.0])),
            ("H".to_string(), row(&[4.0, 0.0, 0.0, -2.0])),
            ("O".to_string(), row(&[0.0, 2.0, -2.0, -1.0])),
        ]
    );
    assert_eq!(st.balance, vec![1.0, 2.0, 1.0, 2.0]);
    assert_eq!(st.result, "CH4 + 2.0 O2 --> CO2 + 2.0 H2O");
    assert!(st.cost <= 1e-16);
}

#[test]
fn test_sodium_chloride() {
    let st = Stoichiometry::new("Na + Cl2 --> NaCl").unwrap();
    assert_eq!(
        st.element_balance,
        vec![
            ("Na".to_string(), row(&[1.0, 0.0, -1.0])),
            ("Cl".to_string(), row(&[0.0, 2.0, -1.0])),
        ]
    );
    assert_eq!(st.balance, vec![2.0, 1.0, 2.0]);
    assert_eq!(st.result, "2.0 Na + Cl2 --> 2.0 NaCl");
}

#[test]
fn test_ethanol_combustion() {
    let st = Stoichiometry::new("CH3CH2OH + O2 --> CO2 + H2O").unwrap();
    assert_eq!(st.element_row("C"), Some(&[2.0, 0.0, -1.0, 0.0][..]));
    assert_eq!(st.element_row("H"), Some(&[6.0, 0.0, 0.0, -2.0][..]));
    assert_eq!(st.element_row("O"), Some(&[1.0, 2.0, -2.0, -1.0][..]));
    assert_eq!(st.balance, vec![1.0, 3.0, 2.0, 3.0]);
    assert_eq!(st.result, "CH3CH2OH + 3.0 O2 --> 2.0 CO2 + 3.0 H2O");
}

#[test]
fn test_nested_groups() {
    let st = Stoichiometry::new("CH3(C(H2))4OH + O2 --> CO2 + H2O").unwrap();
    assert_eq!(st.input_eq, "CH3(C(H2))4OH + O2 --> CO2 + H2O");
    assert_eq!(st.molecules.reactants, vec!["CH3CH2CH2CH2CH2OH", "O2"]);
    assert_eq!(st.element_row("C"), Some(&[5.0, 0.0, -1.0, 0.0][..]));
    assert_eq!(st.element_row("H"), Some(&[12.0, 0.0, 0.0, -2.0][..]));
    assert_eq!(st.balance, vec![1.0, 7.5, 5.0, 6.0]);
    assert_eq!(
        st.result,
        "CH3CH2CH2CH2CH2OH + 7.5 O2 --> 5.0 CO2 + 6.0 H2O"
    );
}

#[test]
fn test_arrow_styles_and_input_coefficients() {
    for input in [
        "CH4 + O2 -> CO2 + H2O",
        "CH4 + O2 => CO2 + H2O",
        "CH4 + O2 <--> CO2 + H2O",
        "CH4+O2>CO2+H2O",
        "CH4 + 3 O2 --> 7CO2 + H2O",
    ] {
        let st = Stoichiometry::new(input).unwrap();
        assert_eq!(st.result, "CH4 + 2.0 O2 --> CO2 + 2.0 H2O", "input '{}'", input);
    }
}

#[test]
fn test_missing_direction_marker() {
    let err = Stoichiometry::new("CH4 + O2").unwrap_err();
    assert!(matches!(err, ChemEngError::MissingDirectionMarker { .. }));
    assert!(err.to_string().ends_with("does not contain a '>' character"));
}

#[test]
fn test_more_than_one_direction_marker() {
    let err = Stoichiometry::new("A --> B --> C").unwrap_err();
    assert!(matches!(err, ChemEngError::MalformedInput { .. }));
}

#[test]
fn test_element_missing_from_one_side() {
    let err = Stoichiometry::new("CaF2 --> Ca").unwrap_err();
    match &err {
        ChemEngError::UnbalanceableElement { element, counts } => {
            assert_eq!(element, "F");
            assert_eq!(counts, &vec![2.0, 0.0]);
        }
        other => panic!("expected UnbalanceableElement, got {:?}", other),
    }
    assert!(err
        .to_string()
        .contains("is not present on both sides of chemical equation"));
}

#[test]
fn test_no_balanced_solution() {
    let err = Stoichiometry::new("CaCO3 --> Ca + CO2").unwrap_err();
    assert!(matches!(err, ChemEngError::NoBalancedSolution { .. }));
    assert!(err.to_string().starts_with("Could not find balanced equation"));

    // The correct form balances
    let st = Stoichiometry::new("CaCO3 --> Ca + CO + O2").unwrap();
    assert_eq!(st.balance, vec![1.0, 1.0, 1.0, 1.0]);
    assert_eq!(st.result, "CaCO3 --> Ca + CO + O2");
}

#[test]
fn test_malformed_molecules() {
    for input in ["CH4 + --> CO2", "--> CO2", "ch4 --> CO2", "CH4 --> CO2 + H2O!"] {
        let err = Stoichiometry::new(input).unwrap_err();
        assert!(
            matches!(err, ChemEngError::MalformedInput { .. }),
            "expected MalformedInput for '{}', got {:?}",
            input,
            err
        );
    }
}

#[test]
fn test_matrix_matches_element_balance() {
    let st = Stoichiometry::new("Na + Cl2 --> NaCl").unwrap();
    let matrix = st.matrix();
    assert_eq!(matrix.shape(), (2, 3));
    assert_eq!(matrix[(1, 1)], 2.0);
    assert_eq!(matrix[(0, 2)], -1.0);
}

#[test]
fn test_input_size_limit() {
    let config = SolverConfig {
        max_input_bytes: 16,
        ..SolverConfig::default()
    };
    let err = Stoichiometry::with_config("CH4 + O2 --> CO2 + H2O", &config).unwrap_err();
    assert!(matches!(err, ChemEngError::ResourceLimitExceeded { .. }));
}

#[test]
fn test_serializes_to_json() {
    let st = Stoichiometry::new("Na + Cl2 --> NaCl").unwrap();
    let json = serde_json::to_value(&st).unwrap();
    assert_eq!(json["result"], "2.0 Na + Cl2 --> 2.0 NaCl");
    assert_eq!(json["molecules"]["products"][0], "NaCl");
    assert_eq!(json["balance"][0], 2.0);
}
