//! Initial energy sampling: generate starting velocities (and optionally a
//! displaced starting geometry) from normal-mode frequency data.
//!
//! The sampling pipeline per mode: zero-point energy, thermal vibrational
//! quanta from a Boltzmann geometric distribution, a random geometry shift
//! within the classical turning points, a signed mode velocity carrying the
//! remaining kinetic energy, and finally projection onto the atoms through
//! the mode displacement vectors. An optional rotational kick and an optional
//! energy-boost resampling loop sit on top.
//!
//! Random draws are consumed in a fixed order; fixed-direction overrides
//! replace the drawn value without skipping the draw, so overriding one mode
//! never changes any other mode's sample.

use crate::constants as cn;
use crate::driver::banner;
use crate::error::{BomdError, Result};
use crate::quantities::{DistanceUnit, Energies, EnergyUnit, Velocities, VelocityUnit};
use crate::state::{
    EnergyBoost, GeometryDisplacement, OscillatorType, PhaseDirection, ProgramState,
};
use itertools::izip;
use nalgebra::Vector3;

/// Sample initial kinetic (and potential) energy into the program state.
///
/// Appends one [`Velocities`] entry and possibly displaces `structures[0]`.
///
/// # Errors
/// Returns [`BomdError::Input`] when no frequencies are set, the temperature
/// is negative, or the energy-boost maximum lies below the total zero-point
/// energy.
pub fn generate(state: &mut ProgramState) -> Result<()> {
    if state.frequencies.is_empty() {
        return Err(BomdError::input("No frequencies set in program state"));
    }
    if state.temperature < 0.0 {
        return Err(BomdError::input("Temperature cannot be negative"));
    }

    let (zero_point_energies, total_zpe) = zero_point_energies(state);
    let mut quanta = sample_quanta(&zero_point_energies, state);
    let (mut total_mode_energy, mut shifts, mut mode_energies) =
        displacements(&zero_point_energies, &quanta, state);

    println!("{}", banner("Energy Boost"));
    if let EnergyBoost::On { min, max } = state.energy_boost {
        println!("  Energy boost on");
        println!("  Changing temperature and resampling until the vibrational ");
        println!("  energy is between {min} and {max} kcal/mol.");
        println!();

        if max < total_zpe * cn::JOULE_TO_KCAL_PER_MOLE {
            return Err(BomdError::input("Energy boost max energy is less than ZPE."));
        }

        println!("  Attempt   Vibrational Energy (kcal/mol)   Temperature (K)");
        println!("  ---------------------------------------------------------");

        let mut attempt = 1u64;
        println!(
            "  {attempt:>7}   {:18.6}              {:11.2}",
            total_mode_energy * cn::JOULE_TO_KCAL_PER_MOLE,
            state.temperature
        );
        while boost_temperature(total_mode_energy, state) {
            attempt += 1;
            quanta = sample_quanta(&zero_point_energies, state);
            (total_mode_energy, shifts, mode_energies) =
                displacements(&zero_point_energies, &quanta, state);
            println!(
                "  {attempt:>7}   {:18.6}              {:11.2}",
                total_mode_energy * cn::JOULE_TO_KCAL_PER_MOLE,
                state.temperature
            );
        }
        println!("  Energy boost criteria met");
    } else {
        println!("  Energy boost off");
    }
    println!();

    println!("{}", banner("Initial Geometry Displacement"));
    if state.geometry_displacement_type != GeometryDisplacement::None {
        apply_geometry_displacement(&shifts, state);
        println!("  Modified initial structure");
        for (atom, position) in state.atoms.iter().zip(state.structures[0].iter_angstrom()) {
            println!(
                "    {:<2} {:10.6} {:10.6} {:10.6}",
                atom.symbol(),
                position.x,
                position.y,
                position.z
            );
        }
    } else {
        println!("  Geometry displacement turned off. Using input structure for");
        println!("  starting geometry.");
    }
    println!();

    let (mode_velocities, mode_directions) = mode_velocities(&mode_energies, &shifts, state)?;

    println!("{}", banner("Vibrational Quantum Numbers"));
    println!("  Mode  Wavenumber  Quantum No.  Energy (kcal/mol)  Mode Direction");
    println!("  ----------------------------------------------------------------");
    for (mode, energy, quantum_n, frequency, direction) in izip!(
        1..,
        mode_energies.iter_kcal_per_mole(),
        &quanta,
        state.frequencies.all_recip_cm(),
        &mode_directions,
    ) {
        println!("  {mode:>4}  {frequency:10.3}  {quantum_n:>11}  {energy:17.6}  {direction:>14}");
    }
    println!();

    println!("{}", banner("Mode Velocities (meters/second)"));
    for velocity in &mode_velocities {
        println!("  {:15.6e}", velocity * cn::ANGSTROM_TO_METER);
    }
    println!();

    let mut atomic_velocities = atomic_velocities(&mode_velocities, state);
    let vibrational_kinetic_energy = kinetic_energy(&atomic_velocities, state);

    println!("{}", banner("Rotational Energy"));
    let (rotational_kinetic_energy, total_kinetic_energy) = if state.add_rotational_energy {
        let added = add_rotational_energy(&mut atomic_velocities, state);
        println!("  {added:.6} kcal/mol rotational energy added.");
        (added, kinetic_energy(&atomic_velocities, state))
    } else {
        println!("  Rotational energy turned off.");
        (0.0, vibrational_kinetic_energy)
    };
    println!();

    let mut velocities = Velocities::new();
    for velocity in &atomic_velocities {
        velocities.append(*velocity, VelocityUnit::AngstromPerSec);
    }
    state.velocities.push(velocities);

    println!("{}", banner("Initial Velocities (meters/second)"));
    let published = &state.velocities[state.velocities.len() - 1];
    for (index, atom) in state.atoms.iter().enumerate() {
        let velocity = published.as_meter_per_sec(index);
        println!(
            "  {:<2} {:15.6e} {:15.6e} {:15.6e}",
            atom.symbol(),
            velocity.x,
            velocity.y,
            velocity.z
        );
    }
    println!();

    let total_zpe_kcal = total_zpe * cn::JOULE_TO_KCAL_PER_MOLE;
    let total_mode_kcal = total_mode_energy * cn::JOULE_TO_KCAL_PER_MOLE;
    println!("{}", banner("Initial Energy Sampling Summary (kcal/mol)"));
    println!("  Zero point energy:");
    println!("  {total_zpe_kcal:11.6}");
    println!("  Excitation energy:");
    println!("  {:11.6}", total_mode_kcal - total_zpe_kcal);
    println!("  Quantum vibrational energy (zpe + excitation):");
    println!("  {total_mode_kcal:11.6}");
    println!("  Vibrational component of kinetic energy:");
    println!("  {vibrational_kinetic_energy:11.6}");
    println!("  Rotation component of kinetic energy:");
    println!("  {rotational_kinetic_energy:11.6}");
    println!("  Total kinetic energy:");
    println!("  {total_kinetic_energy:11.6}");
    println!();

    Ok(())
}

/// Zero-point (or classical baseline) energy per mode.
///
/// Frequencies below 2 cm^-1 (including imaginary modes) are clamped to
/// 2 cm^-1. For classical oscillators every mode gets the same fixed level
/// spacing; it is not technically a ZPE but is treated the same.
///
/// Returns the per-mode energies plus their sum in joules.
fn zero_point_energies(state: &ProgramState) -> (Energies, f64) {
    let classical_energy = 0.5
        * cn::PLANCK_CONSTANT
        * cn::SPEED_OF_LIGHT_CM_PER_S
        * cn::CLASSICAL_SPACING_RECIP_CM;

    let mut energies = Energies::new();
    let mut total = 0.0;
    for &frequency in state.frequencies.all_recip_cm() {
        let frequency = frequency.max(2.0);
        let energy = match state.oscillator_type {
            OscillatorType::Classical => classical_energy,
            OscillatorType::Quasiclassical => {
                0.5 * cn::PLANCK_CONSTANT * cn::SPEED_OF_LIGHT_CM_PER_S * frequency
            }
        };
        energies.append(energy, EnergyUnit::Joule);
        total += energy;
    }
    (energies, total)
}

/// Sample vibrational excitation quanta for each mode.
///
/// At T = 0 every mode gets zero quanta (and no random numbers are drawn).
/// Otherwise each mode consumes exactly one uniform draw, inverted through
/// the cumulative geometric (Boltzmann factor) distribution. Fixed-quanta
/// overrides are applied afterwards.
fn sample_quanta(zero_point_energies: &Energies, state: &mut ProgramState) -> Vec<u32> {
    let mode_count = state.frequencies.len();

    let mut quanta = if state.temperature == 0.0 {
        vec![0u32; mode_count]
    } else {
        let rt = cn::GAS_CONSTANT_KCAL * state.temperature;
        (0..mode_count)
            .map(|mode| {
                let ratio = (-2.0 * zero_point_energies.as_kcal_per_mole(mode) / rt)
                    .exp()
                    .min(0.999_999_999_99);
                let target = state.random.uniform();
                let mut cumulative = 1.0 - ratio;
                let max_iter = (4000.0 * ratio + 2.0) as u32;
                let mut level: u32 = 1;
                while level <= max_iter && target > cumulative {
                    cumulative += ratio.powi(level as i32) * (1.0 - ratio);
                    level += 1;
                }
                level - 1
            })
            .collect()
    };

    for (&mode, &quantum_n) in &state.fixed_vibrational_quanta {
        if let Some(entry) = quanta.get_mut(mode) {
            *entry = quantum_n;
        } else {
            tracing::warn!(mode = mode + 1, "fixed_vibrational_quanta mode out of range");
        }
    }
    quanta
}

/// Mode energies and geometry shifts.
///
/// Quasiclassical modes above 10 cm^-1 carry E = ZPE*(2n + 1); all others
/// E = ZPE*2n. The shift magnitude is the classical turning point
/// sqrt(2E/k), weighted by a random number from the configured distribution
/// (zero for low-frequency modes and for displacement type off).
///
/// Returns the total mode energy in joules, the per-mode shifts in angstrom,
/// and the per-mode energies.
fn displacements(
    zero_point_energies: &Energies,
    quanta: &[u32],
    state: &mut ProgramState,
) -> (f64, Vec<f64>, Energies) {
    let mut mode_energies = Energies::new();
    let mut total = 0.0;
    let mut shifts = Vec::with_capacity(quanta.len());

    for (mode, &quantum_n) in quanta.iter().enumerate() {
        let frequency = state.frequencies.as_recip_cm(mode);
        let level_factor =
            if state.oscillator_type == OscillatorType::Quasiclassical && frequency > 10.0 {
                2 * quantum_n + 1
            } else {
                2 * quantum_n
            };
        let energy = zero_point_energies.as_joules(mode) * level_factor as f64;
        mode_energies.append(energy, EnergyUnit::Joule);
        total += energy;

        let force_constant = state.force_constants.as_millidyne_per_angstrom(mode).x;
        let max_shift =
            (2.0 * mode_energies.as_millidyne_angstrom(mode) / force_constant).sqrt();

        let mut weight = 0.0;
        if frequency > 10.0 {
            weight = match state.geometry_displacement_type {
                GeometryDisplacement::EdgeWeighted => state.random.edge_weighted(),
                GeometryDisplacement::Gaussian => state.random.gaussian(),
                GeometryDisplacement::Uniform => 2.0 * (state.random.uniform() - 0.5),
                GeometryDisplacement::None => 0.0,
            };
        }
        shifts.push(max_shift * weight);
    }
    (total, shifts, mode_energies)
}

/// Energy-boost predicate: nudge the temperature when the total vibrational
/// energy falls outside the configured window.
///
/// Returns true when the temperature changed and sampling must be repeated.
fn boost_temperature(total_mode_energy: f64, state: &mut ProgramState) -> bool {
    let EnergyBoost::On { min, max } = state.energy_boost else {
        return false;
    };
    let energy = total_mode_energy * cn::JOULE_TO_KCAL_PER_MOLE;
    if energy <= min {
        state.temperature += 5.0;
        true
    } else if energy >= max {
        state.temperature -= 2.0;
        true
    } else {
        false
    }
}

/// Displace `structures[0]` along each mode by its sampled shift.
fn apply_geometry_displacement(shifts: &[f64], state: &mut ProgramState) {
    for (mode, &shift) in shifts.iter().enumerate() {
        for atom_idx in 0..state.number_atoms() {
            let current = state.structures[0].as_angstrom(atom_idx);
            let mode_vector = state.mode_displacements[mode].as_angstrom(atom_idx);
            state.structures[0].set(
                atom_idx,
                current + mode_vector * shift,
                DistanceUnit::Angstrom,
            );
        }
    }
}

/// Whether the first mode's displacement increases the squared distance
/// between the two phase atoms.
fn mode_pushes_apart(state: &ProgramState) -> Result<bool> {
    let (atom1, atom2) = state
        .phase
        .ok_or_else(|| BomdError::input("phase direction requires an atom pair"))?;

    let pos1 = state.structures[0].as_angstrom(atom1);
    let pos2 = state.structures[0].as_angstrom(atom2);
    let mode1 = state.mode_displacements[0].as_angstrom(atom1);
    let mode2 = state.mode_displacements[0].as_angstrom(atom2);

    let before = (pos1 - pos2).norm_squared();
    let after = ((pos1 + mode1) - (pos2 + mode2)).norm_squared();
    Ok(after > before)
}

/// Signed velocity along each mode, in angstrom/second.
///
/// The kinetic energy left in a mode is its sampled energy minus the
/// potential energy stored by the geometry shift. The sign comes from the
/// phase configuration for an imaginary first mode and from a coin flip for
/// everything else; `bring_together` then flips every mode. A fixed
/// direction replaces the drawn value after the draw so the random stream is
/// identical with and without overrides.
fn mode_velocities(
    mode_energies: &Energies,
    shifts: &[f64],
    state: &mut ProgramState,
) -> Result<(Vec<f64>, Vec<i32>)> {
    let mut velocities = Vec::with_capacity(shifts.len());
    let mut directions = Vec::with_capacity(shifts.len());

    for (mode, &shift) in shifts.iter().enumerate() {
        // Kinetic energy in gram*angstrom^2/s^2.
        let force_constant = state.force_constants.as_millidyne_per_angstrom(mode).x;
        let kinetic_energy = cn::MILLIDYNE_ANGSTROM_TO_GRAM_ANGSTROM2_PER_S2
            * (mode_energies.as_millidyne_angstrom(mode) - 0.5 * force_constant * shift * shift);

        let mut direction = if mode == 0 && state.frequencies.as_recip_cm(0) < 0.0 {
            if state.phase_direction == PhaseDirection::Random {
                state.random.one_or_neg_one()
            } else if mode_pushes_apart(state)? {
                1
            } else {
                -1
            }
        } else {
            state.random.one_or_neg_one()
        };
        if state.phase_direction == PhaseDirection::BringTogether {
            direction = -direction;
        }
        if let Some(&fixed) = state.fixed_mode_directions.get(&mode) {
            // Overwrites the drawn value; the draw itself must still have
            // happened so later modes see an unchanged random stream.
            direction = fixed;
        }
        directions.push(direction);

        let mass_gram = state.reduced_masses.as_amu(mode) / cn::AVOGADRO;
        velocities.push(f64::from(direction) * (2.0 * kinetic_energy / mass_gram).sqrt());
    }
    Ok((velocities, directions))
}

/// Project mode velocities onto atoms through the displacement vectors.
/// Result in angstrom/second.
fn atomic_velocities(mode_velocities: &[f64], state: &ProgramState) -> Vec<Vector3<f64>> {
    let mut atomic = vec![Vector3::zeros(); state.number_atoms()];
    for (mode, &velocity) in mode_velocities.iter().enumerate() {
        for (atom_idx, atomic_velocity) in atomic.iter_mut().enumerate() {
            *atomic_velocity += state.mode_displacements[mode].as_angstrom(atom_idx) * velocity;
        }
    }
    atomic
}

/// Total kinetic energy of the atomic velocities in kcal/mol. Diagnostic only.
fn kinetic_energy(atomic_velocities: &[Vector3<f64>], state: &ProgramState) -> f64 {
    let sum: f64 = atomic_velocities
        .iter()
        .zip(&state.atoms)
        .map(|(velocity, atom)| atom.mass() * velocity.norm_squared())
        .sum();
    0.5 * sum * cn::KINETIC_ENERGY_TO_KCAL_PER_MOLE
}

/// Draw a thermal rotational energy about each Cartesian axis and fold the
/// corresponding rigid-rotation velocity field into the atomic velocities.
///
/// Returns the added rotational energy in kcal/mol.
fn add_rotational_energy(
    atomic_velocities: &mut [Vector3<f64>],
    state: &mut ProgramState,
) -> f64 {
    let atom_count = state.number_atoms();
    let positions: Vec<Vector3<f64>> = (0..atom_count)
        .map(|idx| state.structures[0].as_angstrom(idx))
        .collect();

    // Rotation-generator displacement fields about x, y, z.
    let rotations: [Vec<Vector3<f64>>; 3] = [
        positions
            .iter()
            .map(|p| Vector3::new(0.0, -p.z, p.y))
            .collect(),
        positions
            .iter()
            .map(|p| Vector3::new(p.z, 0.0, -p.x))
            .collect(),
        positions
            .iter()
            .map(|p| Vector3::new(-p.y, p.x, 0.0))
            .collect(),
    ];

    let dt = state.step_size.as_second();
    let mut rotational_energy = [0.0f64; 3];
    for (axis, rotation) in rotations.iter().enumerate() {
        let sum: f64 = rotation
            .iter()
            .zip(&state.atoms)
            .map(|(displacement, atom)| 0.5 * atom.mass() * displacement.norm_squared())
            .sum();
        rotational_energy[axis] = sum / (dt * dt) * cn::KINETIC_ENERGY_TO_KCAL_PER_MOLE;
    }

    let mut kinetic_rotational = [0.0f64; 3];
    for (axis, &energy) in rotational_energy.iter().enumerate() {
        if energy >= 1.0 {
            kinetic_rotational[axis] = (1.0 - state.random.uniform()).ln()
                * -0.5
                * cn::GAS_CONSTANT_KCAL
                * state.temperature;
        }
    }

    let signs = [
        state.random.one_or_neg_one(),
        state.random.one_or_neg_one(),
        state.random.one_or_neg_one(),
    ];
    let mut scales = [0.0f64; 3];
    for axis in 0..3 {
        let denominator = if rotational_energy[axis] == 0.0 {
            1.0
        } else {
            rotational_energy[axis]
        };
        scales[axis] = (kinetic_rotational[axis] / denominator).sqrt();
    }

    for (atom_idx, velocity) in atomic_velocities.iter_mut().enumerate() {
        for axis in 0..3 {
            if rotational_energy[axis] > 0.0 {
                *velocity +=
                    rotations[axis][atom_idx] * scales[axis] * f64::from(signs[axis]) / dt;
            }
        }
    }

    kinetic_rotational.iter().sum()
}
