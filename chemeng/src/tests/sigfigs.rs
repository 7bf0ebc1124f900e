use crate::units::{count_sigfigs, round_to_decimals, round_to_sigfigs, Units};

#[test]
fn test_count_sigfigs_nonzero_literals() {
    let cases = vec![
        ("100", 1),
        ("001.00", 3),
        ("1001", 4),
        ("-0.0001079", 4),
        ("14.6959", 6),
        ("101325", 6),
        ("62.423", 5),
        ("1.5e3", 2),
        ("+2.50E-4", 3),
        ("100.", 3),
    ];

    for (literal, expected) in cases {
        assert_eq!(
            count_sigfigs(literal),
            expected,
            "wrong significant figures for '{}'",
            literal
        );
    }
}

#[test]
fn test_count_sigfigs_zero_literals() {
    assert_eq!(count_sigfigs("0.0000"), 4);
    assert_eq!(count_sigfigs(".00000"), 5);
    assert_eq!(count_sigfigs("0"), 1);
    assert_eq!(count_sigfigs("-0.0"), 1);
}

#[test]
fn test_round_to_sigfigs() {
    assert_eq!(round_to_sigfigs(1.23456789, 6), 1.23457);
    assert_eq!(round_to_sigfigs(1.23456789, 3), 1.23);
    assert_eq!(round_to_sigfigs(-10.9723, 4), -10.97);
    assert_eq!(round_to_sigfigs(101325.0, 2), 100000.0);
    assert_eq!(round_to_sigfigs(0.000123456, 2), 0.00012);
}

#[test]
fn test_round_to_sigfigs_passes_through_degenerate_values() {
    assert_eq!(round_to_sigfigs(0.0, 3), 0.0);
    assert_eq!(round_to_sigfigs(1.234, 0), 1.234);
    assert!(round_to_sigfigs(f64::NAN, 3).is_nan());
    assert_eq!(round_to_sigfigs(f64::INFINITY, 3), f64::INFINITY);
}

#[test]
fn test_round_to_sigfigs_outside_decimal_range() {
    let rounded = round_to_sigfigs(6.02214076e23, 3);
    assert!((rounded - 6.02e23).abs() / 6.02e23 < 1e-12);

    let rounded = round_to_sigfigs(1.602176634e-19, 4);
    assert!((rounded - 1.602e-19).abs() / 1.602e-19 < 1e-12);
}

#[test]
fn test_round_to_decimals() {
    assert_eq!(round_to_decimals(7.499999999, 2), 7.5);
    assert_eq!(round_to_decimals(2.0000000001, 2), 2.0);
    assert_eq!(round_to_decimals(1.005, 1), 1.0);
}

#[test]
fn test_tracker_starts_at_ceiling() {
    let units = Units::new();
    assert_eq!(units.sigfigs(), 6);
    assert_eq!(Units::with_max_sigfigs(3).sigfigs(), 3);
}

#[test]
fn test_tracker_keeps_running_minimum() {
    let mut units = Units::new();
    assert_eq!(units.count_sigfigs("14.6959"), 6);
    assert_eq!(units.sigfigs(), 6);

    units.count_sigfigs("10.000");
    assert_eq!(units.sigfigs(), 5);

    units.count_sigfigs("0.0000");
    assert_eq!(units.sigfigs(), 4);

    // A more precise literal never raises the minimum
    units.count_sigfigs("3.00123");
    assert_eq!(units.sigfigs(), 4);
}

#[test]
fn test_tracker_never_exceeds_ceiling() {
    let mut units = Units::with_max_sigfigs(3);
    units.count_sigfigs("3.00123");
    assert_eq!(units.sigfigs(), 3);
}
