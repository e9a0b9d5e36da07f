//! Trajectory orchestration and the streamed stdout report.
//!
//! The main loop is plainly synchronous: parse input, sample initial
//! velocities if none were supplied, then repeat force-oracle call and
//! integrator step until the step limit is reached. One trajectory is one
//! process; ensembles are launched externally.

use crate::error::Result;
use crate::state::ProgramState;
use crate::{esp, input, propagation, sampler};
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};

/// Format a `### Section` banner padded with dashes to 66 columns.
pub(crate) fn banner(title: &str) -> String {
    format!("{:-<66}", format!("### {title} "))
}

/// Round to 10 decimal places, matching the report's time stamps.
fn round10(value: f64) -> f64 {
    (value * 1.0e10).round() / 1.0e10
}

/// Run a complete trajectory from an input file.
///
/// Reads the input from `reader`, writes the report to stdout, and
/// optionally dumps the trajectory to `<job_name>.xyz` at the end.
pub fn run<R: BufRead>(reader: R) -> Result<()> {
    print_header();

    let mut state = ProgramState::new();
    input::parse_input(reader, &mut state)?;

    if state.velocities.is_empty() {
        sampler::generate(&mut state)?;
    }

    print_trajectory_units_header();
    print_step_banner(&state);
    print_structure(&state);

    while !end_conditions_met(&state) {
        esp::generate_forces(&mut state)?;
        propagation::run_next_step(&mut state)?;

        print_state_info(&state);

        println!();
        state.current_step += 1;
        print_step_banner(&state);
        print_structure(&state);
    }

    println!("\n\nNormal termination.");

    if state.output_xyz_file {
        write_xyz_file(&state)?;
    }
    Ok(())
}

/// Whether the trajectory has reached its step limit.
fn end_conditions_met(state: &ProgramState) -> bool {
    state
        .max_steps
        .is_some_and(|max_steps| state.current_step >= max_steps)
}

fn print_header() {
    println!("bomd {} - Born-Oppenheimer molecular dynamics", env!("CARGO_PKG_VERSION"));
    println!();
}

fn print_trajectory_units_header() {
    println!("{}", banner("Starting Trajectory"));
    println!("  Units for trajectory output:");
    println!("    Coordinates    angstrom");
    println!("    SCF Energy     hartree");
    println!("    Forces         newton");
    println!("    Accelerations  meter/second^2");
    println!("    Velocities     meter/second");
    println!();
}

fn print_step_banner(state: &ProgramState) {
    let time = round10(state.current_step as f64 * state.step_size.as_femtosecond());
    let label = format!("### Step {}: {time:?} fs ", state.current_step);
    println!("{label:-<66}");
}

/// Print the newest structure.
fn print_structure(state: &ProgramState) {
    println!("  Coordinates:");
    let structure = &state.structures[state.structures.len() - 1];
    for (atom, position) in state.atoms.iter().zip(structure.iter_angstrom()) {
        println!(
            "    {:<2} {:15.6} {:15.6} {:15.6}",
            atom.symbol(),
            position.x,
            position.y,
            position.z
        );
    }
}

/// Print energy, forces, accelerations, and velocities for the step just
/// computed.
fn print_state_info(state: &ProgramState) {
    println!("  SCF Energy:");
    println!("    {:.8}", state.energies.as_hartree(state.energies.len() - 1));

    println!("  Forces:");
    let forces = &state.forces[state.forces.len() - 1];
    for (index, atom) in state.atoms.iter().enumerate() {
        let force = forces.as_newton(index);
        println!(
            "    {:<2} {:15.6e} {:15.6e} {:15.6e}",
            atom.symbol(),
            force.x,
            force.y,
            force.z
        );
    }

    println!("  Accelerations:");
    let accelerations = &state.accelerations[state.accelerations.len() - 1];
    for (index, atom) in state.atoms.iter().enumerate() {
        let acceleration = accelerations.as_meter_per_sec_sqrd(index);
        println!(
            "    {:<2} {:15.6e} {:15.6e} {:15.6e}",
            atom.symbol(),
            acceleration.x,
            acceleration.y,
            acceleration.z
        );
    }

    println!("  Velocities:");
    let velocities = &state.velocities[state.velocities.len() - 1];
    for (index, atom) in state.atoms.iter().enumerate() {
        let velocity = velocities.as_meter_per_sec(index);
        println!(
            "    {:<2} {:15.6e} {:15.6e} {:15.6e}",
            atom.symbol(),
            velocity.x,
            velocity.y,
            velocity.z
        );
    }
}

/// Write the stored structures as a multi-block XYZ trajectory file.
///
/// Step labels account for restarts: the first stored structure may belong
/// to a step greater than zero.
fn write_xyz_file(state: &ProgramState) -> Result<()> {
    let file = File::create(format!("{}.xyz", state.job_name))?;
    let mut writer = BufWriter::new(file);

    let starting_step = state.current_step as i64 - state.structures.len() as i64 + 1;
    for (offset, structure) in state.structures.iter().enumerate() {
        let step = starting_step + offset as i64;
        let time = round10(step as f64 * state.step_size.as_femtosecond());
        writeln!(writer, "{}", state.number_atoms())?;
        writeln!(writer, "  Step {step}: {time:?} fs")?;
        for (atom, position) in state.atoms.iter().zip(structure.iter_angstrom()) {
            writeln!(
                writer,
                "{} {:15.6} {:15.6} {:15.6}",
                atom.symbol(),
                position.x,
                position.y,
                position.z
            )?;
        }
    }
    Ok(())
}
