//! Integration tests for the initial energy sampler.
//!
//! Covers the trivial H2 zero-point case, seed reproducibility, the
//! energy-boost resampling loop, the phase sign convention for an imaginary
//! first mode, and the random-stream preservation rule for fixed mode
//! directions.

use approx::assert_relative_eq;
use bomd::constants as cn;
use bomd::quantities::{DistanceUnit, ForceConstantUnit, FrequencyUnit, MassUnit, Positions};
use bomd::sampler::generate;
use bomd::state::{EnergyBoost, PhaseDirection, ProgramState};
use bomd::{atom::Atom, input::parse_input};
use nalgebra::Vector3;
use std::io::Cursor;

/// A diatomic state with one normal mode, built directly.
fn diatomic_state(
    frequency: f64,
    reduced_mass: f64,
    force_constant: f64,
    mode: [Vector3<f64>; 2],
) -> ProgramState {
    let mut state = ProgramState::new();
    state.atoms = vec![
        Atom::from_symbol("H").unwrap(),
        Atom::from_symbol("H").unwrap(),
    ];
    let mut structure = Positions::new();
    structure.append(Vector3::new(0.0, 0.0, 0.0), DistanceUnit::Angstrom);
    structure.append(Vector3::new(0.0, 0.0, 0.74), DistanceUnit::Angstrom);
    state.input_structure = structure.clone();
    state.structures.push(structure);

    state.frequencies.append(frequency, FrequencyUnit::RecipCm);
    state.reduced_masses.append(reduced_mass, MassUnit::Amu);
    state
        .force_constants
        .append_scalar(force_constant, ForceConstantUnit::MillidynePerAngstrom);
    let mut displacements = Positions::new();
    displacements.append(mode[0], DistanceUnit::Angstrom);
    displacements.append(mode[1], DistanceUnit::Angstrom);
    state.mode_displacements.push(displacements);
    state
}

fn h2_state() -> ProgramState {
    diatomic_state(
        4401.0,
        0.504,
        5.756,
        [Vector3::new(0.0, 0.0, 0.707), Vector3::new(0.0, 0.0, -0.707)],
    )
}

#[test]
fn test_h2_zero_point_sampling_through_the_parser() {
    // Full path: input text -> parser -> sampler. At T = 0 the single mode
    // carries exactly its ZPE and the atomic speeds follow the mass-weighted
    // mode vector.
    let input = "\
$job
    gaussian_header m062x/6-31g(d)
    temperature 0
    random_seed 1
$end
$molecule
    0 1
    H 0.0 0.0 0.0
    H 0.0 0.0 0.74
$end
$frequency_data
4401.0 0.504 5.756 0.0 0.0 0.707 0.0 0.0 -0.707
$end
";
    let mut state = ProgramState::new();
    parse_input(Cursor::new(input), &mut state).unwrap();
    assert!(state.velocities.is_empty());
    generate(&mut state).unwrap();

    let zpe_joule = 0.5 * cn::PLANCK_CONSTANT * cn::SPEED_OF_LIGHT_CM_PER_S * 4401.0;
    let kinetic = zpe_joule
        * cn::JOULE_TO_MILLIDYNE_ANGSTROM
        * cn::MILLIDYNE_ANGSTROM_TO_GRAM_ANGSTROM2_PER_S2;
    let mode_speed = (2.0 * kinetic / (0.504 / cn::AVOGADRO)).sqrt();

    let velocities = &state.velocities[0];
    let v1 = velocities.as_angstrom_per_sec(0);
    let v2 = velocities.as_angstrom_per_sec(1);
    assert_relative_eq!(v1.z.abs(), mode_speed * 0.707, max_relative = 1e-6);
    assert_relative_eq!(v2.z.abs(), mode_speed * 0.707, max_relative = 1e-6);
    // Mass-weighted mode: equal magnitude, opposite sign.
    assert_relative_eq!(v1.z, -v2.z, max_relative = 1e-12);
}

#[test]
fn test_same_seed_reproduces_velocities_exactly() {
    let sample = |seed| {
        let mut state = h2_state();
        state.temperature = 300.0;
        state.random.reset_seed(Some(seed));
        generate(&mut state).unwrap();
        let v0 = state.velocities[0].as_meter_per_sec(0);
        let v1 = state.velocities[0].as_meter_per_sec(1);
        (v0.x, v0.y, v0.z, v1.x, v1.y, v1.z)
    };
    assert_eq!(sample(42), sample(42));
}

#[test]
fn test_energy_boost_resamples_into_window() {
    // One mode whose ZPE is exactly 5 kcal/mol: quasiclassical energies take
    // the values 5, 15, 25, ... kcal/mol. Starting cold, the first sample is
    // 5 < 10, so the loop must heat the system until a sample lands in
    // [10, 20].
    let frequency =
        5.0 * cn::KCAL_PER_MOLE_TO_JOULE / (0.5 * cn::PLANCK_CONSTANT * cn::SPEED_OF_LIGHT_CM_PER_S);
    let mut state = diatomic_state(
        frequency,
        1.0,
        5.0,
        [Vector3::new(0.0, 0.0, 0.5), Vector3::new(0.0, 0.0, -0.5)],
    );
    state.temperature = 10.0;
    state.energy_boost = EnergyBoost::On {
        min: 10.0,
        max: 20.0,
    };
    state.random.reset_seed(Some(7));
    generate(&mut state).unwrap();

    // The loop ran at least once (the first sample was below the window).
    assert!(state.temperature > 10.0, "temperature never boosted");

    // Final kinetic energy equals the accepted vibrational energy (no shift,
    // displacement off), which must lie inside the window.
    let velocities = &state.velocities[0];
    let ke_sum: f64 = (0..2)
        .map(|idx| {
            let v = velocities.as_angstrom_per_sec(idx);
            state.atoms[idx].mass() * v.norm_squared()
        })
        .sum();
    let kinetic_kcal = 0.5 * ke_sum * cn::KINETIC_ENERGY_TO_KCAL_PER_MOLE;
    assert!(
        (10.0..=20.0).contains(&kinetic_kcal),
        "final vibrational energy {kinetic_kcal} outside boost window"
    );
}

#[test]
fn test_energy_boost_max_below_zpe_is_input_error() {
    let mut state = h2_state();
    // H2 ZPE is about 6.29 kcal/mol.
    state.energy_boost = EnergyBoost::On { min: 1.0, max: 2.0 };
    assert!(generate(&mut state).is_err());
}

/// Imaginary first mode pointing the two atoms away from each other.
fn transition_state() -> ProgramState {
    let mut state = diatomic_state(
        -500.0,
        1.0,
        5.0,
        [Vector3::new(0.0, 0.0, -0.707), Vector3::new(0.0, 0.0, 0.707)],
    );
    state.temperature = 0.0;
    // Give the imaginary mode kinetic energy without any randomness.
    state.fixed_vibrational_quanta.insert(0, 1);
    state
}

#[test]
fn test_phase_push_apart_increases_distance() {
    let mut state = transition_state();
    state.phase_direction = PhaseDirection::PushApart;
    state.phase = Some((0, 1));
    generate(&mut state).unwrap();

    let velocities = &state.velocities[0];
    let before = (state.structures[0].as_angstrom(1) - state.structures[0].as_angstrom(0))
        .norm_squared();
    let epsilon = 1.0e-16; // s
    let after_0 = state.structures[0].as_angstrom(0)
        + velocities.as_angstrom_per_sec(0) * epsilon;
    let after_1 = state.structures[0].as_angstrom(1)
        + velocities.as_angstrom_per_sec(1) * epsilon;
    let after = (after_1 - after_0).norm_squared();
    assert!(
        after > before,
        "push_apart should grow the pair distance ({after} <= {before})"
    );
}

#[test]
fn test_phase_bring_together_decreases_distance() {
    let mut state = transition_state();
    state.phase_direction = PhaseDirection::BringTogether;
    state.phase = Some((0, 1));
    generate(&mut state).unwrap();

    let velocities = &state.velocities[0];
    let before = (state.structures[0].as_angstrom(1) - state.structures[0].as_angstrom(0))
        .norm_squared();
    let epsilon = 1.0e-16;
    let after_0 = state.structures[0].as_angstrom(0)
        + velocities.as_angstrom_per_sec(0) * epsilon;
    let after_1 = state.structures[0].as_angstrom(1)
        + velocities.as_angstrom_per_sec(1) * epsilon;
    let after = (after_1 - after_0).norm_squared();
    assert!(
        after < before,
        "bring_together should shrink the pair distance ({after} >= {before})"
    );
}

/// Two decoupled modes: mode 0 moves only atom 0, mode 1 moves only atom 1.
fn decoupled_two_mode_state() -> ProgramState {
    let mut state = ProgramState::new();
    state.atoms = vec![
        Atom::from_symbol("H").unwrap(),
        Atom::from_symbol("H").unwrap(),
    ];
    let mut structure = Positions::new();
    structure.append(Vector3::new(0.0, 0.0, 0.0), DistanceUnit::Angstrom);
    structure.append(Vector3::new(0.0, 0.0, 2.0), DistanceUnit::Angstrom);
    state.input_structure = structure.clone();
    state.structures.push(structure);

    for _ in 0..2 {
        state.reduced_masses.append(1.0, MassUnit::Amu);
        state
            .force_constants
            .append_scalar(5.0, ForceConstantUnit::MillidynePerAngstrom);
    }
    state.frequencies.append(1500.0, FrequencyUnit::RecipCm);
    state.frequencies.append(2500.0, FrequencyUnit::RecipCm);

    let mut mode0 = Positions::new();
    mode0.append(Vector3::new(1.0, 0.0, 0.0), DistanceUnit::Angstrom);
    mode0.append(Vector3::zeros(), DistanceUnit::Angstrom);
    state.mode_displacements.push(mode0);

    let mut mode1 = Positions::new();
    mode1.append(Vector3::zeros(), DistanceUnit::Angstrom);
    mode1.append(Vector3::new(1.0, 0.0, 0.0), DistanceUnit::Angstrom);
    state.mode_displacements.push(mode1);

    state.temperature = 300.0;
    state
}

#[test]
fn test_fixed_mode_direction_preserves_random_stream() {
    // Fixing mode 0's direction must not change mode 1's sample: the sign
    // draw is consumed either way.
    let atom1_velocity = |fixed: Option<i32>| {
        let mut state = decoupled_two_mode_state();
        if let Some(direction) = fixed {
            state.fixed_mode_directions.insert(0, direction);
        }
        state.random.reset_seed(Some(1234));
        generate(&mut state).unwrap();
        state.velocities[0].as_meter_per_sec(1)
    };

    let free = atom1_velocity(None);
    let fixed_plus = atom1_velocity(Some(1));
    let fixed_minus = atom1_velocity(Some(-1));

    assert_eq!(free, fixed_plus);
    assert_eq!(free, fixed_minus);
}

#[test]
fn test_fixed_mode_direction_controls_sign() {
    let atom0_velocity = |direction: i32| {
        let mut state = decoupled_two_mode_state();
        state.fixed_mode_directions.insert(0, direction);
        state.random.reset_seed(Some(1234));
        generate(&mut state).unwrap();
        state.velocities[0].as_meter_per_sec(0)
    };

    let plus = atom0_velocity(1);
    let minus = atom0_velocity(-1);
    assert_relative_eq!(plus.x, -minus.x, max_relative = 1e-12);
    assert!(plus.x != 0.0);
}

#[test]
fn test_rotational_energy_changes_velocities() {
    let run = |rotation: bool| {
        let mut state = h2_state();
        state.temperature = 300.0;
        state.add_rotational_energy = rotation;
        state.random.reset_seed(Some(99));
        generate(&mut state).unwrap();
        // Atom 1 sits off the origin, so the rigid-rotation fields about x
        // and y are nonzero there; the stretch mode itself lies along z.
        state.velocities[0].as_meter_per_sec(1)
    };

    let without = run(false);
    let with = run(true);
    assert_eq!(without.x, 0.0);
    assert_eq!(without.y, 0.0);
    assert!(
        with.x != 0.0 || with.y != 0.0,
        "rotational kick did not perturb the velocities"
    );
}
