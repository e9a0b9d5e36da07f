//! Integration tests for Gaussian input generation and log parsing.

use approx::assert_relative_eq;
use bomd::atom::Atom;
use bomd::esp::{EspProgram, format_com_file, parse_forces_from_log};
use bomd::error::BomdError;
use bomd::quantities::{DistanceUnit, Positions};
use bomd::state::ProgramState;
use nalgebra::Vector3;
use std::io::Write;

fn h2_state() -> ProgramState {
    let mut state = ProgramState::new();
    state.atoms = vec![
        Atom::from_symbol("H").unwrap(),
        Atom::from_symbol("H").unwrap(),
    ];
    state.gaussian_header = "m062x/6-31g(d)".to_string();
    let mut structure = Positions::new();
    structure.append(Vector3::new(0.0, 0.0, 0.0), DistanceUnit::Angstrom);
    structure.append(Vector3::new(0.0, 0.0, 0.74), DistanceUnit::Angstrom);
    state.structures.push(structure);
    state
}

/// A minimal but structurally faithful Gaussian force log.
fn synthetic_log(scf_lines: &[f64], forces: &[(f64, f64, f64)]) -> String {
    let mut log = String::from(" Entering Gaussian System, Link 0\n");
    for energy in scf_lines {
        log.push_str(&format!(
            " SCF Done:  E(RM062X) =  {energy:.8}     A.U. after   11 cycles\n"
        ));
    }
    log.push_str(
        " -------------------------------------------------------------------\n \
         Center     Atomic                   Forces (Hartrees/Bohr)\n \
         Number     Number              X              Y              Z\n \
         -------------------------------------------------------------------\n",
    );
    for (index, (x, y, z)) in forces.iter().enumerate() {
        log.push_str(&format!(
            "      {}        1        {x:14.9} {y:14.9} {z:14.9}\n",
            index + 1
        ));
    }
    log.push_str(
        " -------------------------------------------------------------------\n \
         Cartesian Forces:  Max     0.010000000 RMS     0.005773503\n \
         Normal termination of Gaussian 16 at Thu Jul 30 12:00:00 2026.\n",
    );
    log
}

#[test]
fn test_parse_forces_and_energy() {
    let mut state = h2_state();
    let log = synthetic_log(&[-1.17], &[(0.01, 0.0, 0.0), (-0.01, 0.0, 0.0)]);
    parse_forces_from_log(&log, "g16_0.log", &mut state).unwrap();

    assert_eq!(state.energies.len(), 1);
    assert_relative_eq!(state.energies.as_hartree(0), -1.17, max_relative = 1e-10);

    let forces = &state.forces[0];
    assert_eq!(forces.len(), 2);
    assert_relative_eq!(
        forces.as_newton(0).x,
        0.01 * 8.2387234983e-8,
        max_relative = 1e-10
    );
    assert_relative_eq!(
        forces.as_newton(1).x,
        -0.01 * 8.2387234983e-8,
        max_relative = 1e-10
    );
    // Round trip back to hartree/bohr.
    assert_relative_eq!(forces.as_hartree_per_bohr(0).x, 0.01, max_relative = 1e-12);
}

#[test]
fn test_multiple_scf_lines_last_one_pairs_with_forces() {
    let mut state = h2_state();
    let log = synthetic_log(&[-0.5, -0.9, -1.17], &[(0.01, 0.0, 0.0), (-0.01, 0.0, 0.0)]);
    parse_forces_from_log(&log, "g16_0.log", &mut state).unwrap();

    // Exactly one energy is recorded per step: the last SCF before the block.
    assert_eq!(state.energies.len(), 1);
    assert_relative_eq!(state.energies.as_hartree(0), -1.17, max_relative = 1e-10);
}

#[test]
fn test_missing_normal_termination_is_esp_failure() {
    let mut state = h2_state();
    let log = synthetic_log(&[-1.17], &[(0.01, 0.0, 0.0), (-0.01, 0.0, 0.0)])
        .replace("Normal termination", "Error termination via Lnk1e");
    let err = parse_forces_from_log(&log, "g16_0.log", &mut state).unwrap_err();
    assert!(matches!(err, BomdError::EspFailure { .. }));
    assert!(state.forces.is_empty());
    assert!(state.energies.is_empty());
}

#[test]
fn test_truncated_forces_block_is_esp_failure() {
    let mut state = h2_state();
    let log = synthetic_log(&[-1.17], &[(0.01, 0.0, 0.0)]);
    let err = parse_forces_from_log(&log, "g16_0.log", &mut state).unwrap_err();
    assert!(matches!(err, BomdError::EspFailure { .. }));
}

#[test]
fn test_parse_from_disk() {
    // Same path the driver takes: the log is read back from a file.
    let mut state = h2_state();
    let log = synthetic_log(&[-1.17], &[(0.0, 0.02, 0.0), (0.0, -0.02, 0.0)]);

    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("g16_0.log");
    let mut file = std::fs::File::create(&log_path).unwrap();
    file.write_all(log.as_bytes()).unwrap();

    let contents = std::fs::read_to_string(&log_path).unwrap();
    parse_forces_from_log(&contents, log_path.to_str().unwrap(), &mut state).unwrap();
    assert_relative_eq!(
        state.forces[0].as_hartree_per_bohr(0).y,
        0.02,
        max_relative = 1e-12
    );
}

#[test]
fn test_com_file_round_and_footer() {
    let mut state = h2_state();
    state.current_step = 7;
    state.processor_count = Some(16);
    state.memory_amount = Some(32);
    state.gaussian_footer = Some("@basis.gbs\n".to_string());

    let com = format_com_file("# force m062x/6-31g(d)", &state);
    assert!(com.starts_with("%nprocshared=16\n%mem=32gb\n# force m062x/6-31g(d)\n"));
    assert!(com.contains("Calculation for time step: 7\n"));
    assert!(com.contains(" 0 1\n"));
    assert!(com.contains("  H "));
    assert!(com.contains("@basis.gbs"));
    assert!(com.ends_with("\n\n"));
}

#[test]
fn test_program_commands() {
    assert_eq!(EspProgram::Gaussian16.command(), "g16");
    assert_eq!(EspProgram::Gaussian09.command(), "g09");
}
