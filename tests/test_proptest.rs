//! Property-based tests for the quantity containers.

use bomd::quantities::{
    DistanceUnit, Energies, EnergyUnit, ForceUnit, Forces, Positions, Velocities, VelocityUnit,
};
use nalgebra::Vector3;
use proptest::prelude::*;

/// Coordinates big enough to matter, small enough to stay well-conditioned.
fn coordinate() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1.0e3..1.0e3_f64,
        -1.0e-6..1.0e-6_f64,
        Just(0.0),
    ]
}

fn triple() -> impl Strategy<Value = (f64, f64, f64)> {
    (coordinate(), coordinate(), coordinate())
}

proptest! {
    #[test]
    fn prop_position_bohr_round_trip((x, y, z) in triple()) {
        let mut positions = Positions::new();
        positions.append(Vector3::new(x, y, z), DistanceUnit::Angstrom);

        let mut back = Positions::new();
        back.append(positions.as_bohr(0), DistanceUnit::Bohr);

        for axis in 0..3 {
            let original = positions.as_angstrom(0)[axis];
            let restored = back.as_angstrom(0)[axis];
            prop_assert!((original - restored).abs() <= original.abs() * 1e-12 + 1e-18);
        }
    }

    #[test]
    fn prop_position_meter_round_trip((x, y, z) in triple()) {
        let mut positions = Positions::new();
        positions.append(Vector3::new(x, y, z), DistanceUnit::Angstrom);

        let mut back = Positions::new();
        back.append(positions.as_meter(0), DistanceUnit::Meter);

        for axis in 0..3 {
            let original = positions.as_angstrom(0)[axis];
            let restored = back.as_angstrom(0)[axis];
            prop_assert!((original - restored).abs() <= original.abs() * 1e-12 + 1e-18);
        }
    }

    #[test]
    fn prop_velocity_round_trip((x, y, z) in triple()) {
        let mut velocities = Velocities::new();
        velocities.append(Vector3::new(x, y, z), VelocityUnit::MeterPerSec);

        let mut back = Velocities::new();
        back.append(velocities.as_angstrom_per_fs(0), VelocityUnit::AngstromPerFs);

        for axis in 0..3 {
            let original = velocities.as_meter_per_sec(0)[axis];
            let restored = back.as_meter_per_sec(0)[axis];
            prop_assert!((original - restored).abs() <= original.abs() * 1e-12 + 1e-18);
        }
    }

    #[test]
    fn prop_force_hartree_bohr_round_trip((x, y, z) in triple()) {
        let mut forces = Forces::new();
        forces.append(Vector3::new(x, y, z), ForceUnit::HartreePerBohr);

        let mut back = Forces::new();
        back.append(forces.as_hartree_per_bohr(0), ForceUnit::HartreePerBohr);

        for axis in 0..3 {
            let original = forces.as_newton(0)[axis];
            let restored = back.as_newton(0)[axis];
            prop_assert!((original - restored).abs() <= original.abs() * 1e-12 + 1e-30);
        }
    }

    #[test]
    fn prop_energy_kcal_round_trip(value in -1.0e6..1.0e6_f64) {
        let mut energies = Energies::new();
        energies.append(value, EnergyUnit::Joule);

        let mut back = Energies::new();
        back.append(energies.as_kcal_per_mole(0), EnergyUnit::KcalPerMole);

        let restored = back.as_joules(0);
        prop_assert!((value - restored).abs() <= value.abs() * 1e-12 + 1e-18);
    }

    #[test]
    fn prop_add_sub_restores(values in proptest::collection::vec(triple(), 1..12)) {
        let mut a = Positions::new();
        let mut b = Positions::new();
        for (index, (x, y, z)) in values.iter().enumerate() {
            a.append(Vector3::new(*x, *y, *z), DistanceUnit::Angstrom);
            let offset = index as f64 * 0.37 - 1.0;
            b.append(Vector3::new(*z + offset, *x - offset, *y), DistanceUnit::Angstrom);
        }

        let restored = a.clone() + b.clone() - b;
        for index in 0..a.len() {
            for axis in 0..3 {
                let original = a.as_angstrom(index)[axis];
                let roundtrip = restored.as_angstrom(index)[axis];
                prop_assert!((original - roundtrip).abs() <= original.abs() * 1e-9 + 1e-9);
            }
        }
    }

    #[test]
    fn prop_scalar_multiply_preserves_length(
        values in proptest::collection::vec(triple(), 0..12),
        scalar in -100.0..100.0_f64,
    ) {
        let mut positions = Positions::new();
        for (x, y, z) in &values {
            positions.append(Vector3::new(*x, *y, *z), DistanceUnit::Angstrom);
        }
        let scaled = positions.clone() * scalar;
        prop_assert_eq!(scaled.len(), positions.len());
        for index in 0..positions.len() {
            for axis in 0..3 {
                let expected = positions.as_angstrom(index)[axis] * scalar;
                prop_assert_eq!(scaled.as_angstrom(index)[axis], expected);
            }
        }
    }
}
