//! Cliff's Delta through the public API.

use loanrisk::{cliffs_delta, dominance_counts, effect_size, InvalidInput, Method};
use loanrisk_core::Operand;

#[test]
fn every_x_below_every_y() {
    assert_eq!(effect_size(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap(), -1.0);
}

#[test]
fn every_x_above_every_y() {
    assert_eq!(effect_size(&[4.0, 5.0, 6.0], &[1.0, 2.0, 3.0]).unwrap(), 1.0);
}

#[test]
fn balanced_ties_give_zero() {
    let counts = dominance_counts(&[1.0, 2.0, 3.0], &[2.0, 2.0, 2.0], Method::Auto).unwrap();
    assert_eq!(counts.greater, 3);
    assert_eq!(counts.less, 3);
    assert_eq!(counts.delta(), 0.0);
}

#[test]
fn all_ties_give_zero() {
    assert_eq!(effect_size(&[5.0, 5.0], &[5.0, 5.0]).unwrap(), 0.0);
}

#[test]
fn self_comparison_is_zero() {
    let x = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
    assert_eq!(effect_size(&x, &x).unwrap(), 0.0);
}

#[test]
fn antisymmetry() {
    let x = [0.5, 2.0, 2.0, 7.5];
    let y = [1.0, 2.0, 3.0];
    assert_eq!(effect_size(&x, &y).unwrap(), -effect_size(&y, &x).unwrap());
}

#[test]
fn empty_sample_is_invalid_input() {
    assert_eq!(
        effect_size(&[], &[1.0, 2.0]),
        Err(InvalidInput::EmptySample { sample: Operand::X })
    );
    assert_eq!(
        effect_size(&[1.0, 2.0], &[]),
        Err(InvalidInput::EmptySample { sample: Operand::Y })
    );
}

#[test]
fn methods_agree_on_large_samples() {
    // Large enough that Auto switches to the sorted counter
    let x: Vec<f64> = (0..500).map(|i| ((i * 7919) % 1000) as f64 / 10.0).collect();
    let y: Vec<f64> = (0..400).map(|i| ((i * 104_729) % 900) as f64 / 10.0 + 5.0).collect();

    let pairwise = cliffs_delta(&x, &y, Method::Pairwise).unwrap();
    let sorted = cliffs_delta(&x, &y, Method::Sorted).unwrap();
    assert_eq!(pairwise.to_bits(), sorted.to_bits());
    assert_eq!(effect_size(&x, &y).unwrap().to_bits(), sorted.to_bits());
}
