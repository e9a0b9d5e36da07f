//! Electronic structure program handling: input generation, invocation, and
//! log parsing.
//!
//! One force evaluation writes `<cmd>_<step>.com`, runs the Gaussian binary
//! with stdin/stdout redirected, checks the log for `Normal termination`, and
//! parses the SCF energy (hartree) and per-atom forces (hartree/bohr) into
//! the program state in canonical units. Step files are left on disk.

use crate::error::{BomdError, Result};
use crate::quantities::{EnergyUnit, ForceUnit, Forces};
use crate::state::ProgramState;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs::File;
use std::process::Command;

/// Supported electronic structure programs.
///
/// The program id selects only the binary name; route and log formats are
/// identical across the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EspProgram {
    /// Gaussian 16 (`g16`).
    Gaussian16,
    /// Gaussian 09 (`g09`).
    Gaussian09,
}

impl EspProgram {
    /// Name of the binary to invoke.
    pub fn command(&self) -> &'static str {
        match self {
            EspProgram::Gaussian16 => "g16",
            EspProgram::Gaussian09 => "g09",
        }
    }
}

/// Run one force calculation and append its results to the state.
///
/// # Errors
/// Returns [`BomdError::EspFailure`] when the program cannot be invoked, the
/// log does not terminate normally, or the log cannot be parsed.
pub fn generate_forces(state: &mut ProgramState) -> Result<()> {
    let route_section = format!("# force {}", state.gaussian_header);
    let job_name = format!("{}_{}", state.program_id.command(), state.current_step);
    let log_path = call_gaussian(&route_section, &job_name, state)?;
    let contents = std::fs::read_to_string(&log_path)?;
    parse_forces_from_log(&contents, &log_path, state)
}

/// Write the input file, invoke the binary, and return the log path.
fn call_gaussian(route_section: &str, job_name: &str, state: &ProgramState) -> Result<String> {
    let com_path = format!("{job_name}.com");
    let log_path = format!("{job_name}.log");

    std::fs::write(&com_path, format_com_file(route_section, state))?;

    let status = Command::new(state.program_id.command())
        .stdin(File::open(&com_path)?)
        .stdout(File::create(&log_path)?)
        .status()
        .map_err(|err| BomdError::EspFailure {
            log_path: log_path.clone(),
            reason: format!("could not invoke {}: {err}", state.program_id.command()),
        })?;
    if !status.success() {
        // Gaussian exits non-zero on convergence failures; the log check
        // below is authoritative, so only note it here.
        tracing::warn!(%status, "{} exited abnormally", state.program_id.command());
    }
    Ok(log_path)
}

/// Serialize the current structure into Gaussian input format.
pub fn format_com_file(route_section: &str, state: &ProgramState) -> String {
    let mut out = String::new();
    if let Some(processors) = state.processor_count {
        let _ = writeln!(out, "%nprocshared={processors}");
    }
    if let Some(memory) = state.memory_amount {
        let _ = writeln!(out, "%mem={memory}gb");
    }
    let _ = writeln!(out, "{route_section}\n");
    let _ = writeln!(out, "Calculation for time step: {}\n", state.current_step);
    let _ = writeln!(out, " {} {}", state.charge, state.spin);

    let structure = state
        .structures
        .last()
        .expect("structures must be non-empty when writing an input file");
    for (atom, position) in state.atoms.iter().zip(structure.iter_angstrom()) {
        let _ = writeln!(
            out,
            "  {} {:10.6} {:10.6} {:10.6}",
            atom.symbol(),
            position.x,
            position.y,
            position.z
        );
    }
    out.push('\n');

    if let Some(footer) = &state.gaussian_footer {
        out.push_str(footer);
    }
    out.push_str("\n\n");
    out
}

/// Parse SCF energy and forces out of a Gaussian log.
///
/// The scalar after `SCF Done` (5th whitespace token) is the energy in
/// hartree; the block between `Forces (Hartrees/Bohr)` and `Cartesian Forces`
/// holds one numbered line per atom with the force triple in tokens 3-5.
/// When several `SCF Done` lines precede the forces block, the last one wins.
pub fn parse_forces_from_log(
    contents: &str,
    log_path: &str,
    state: &mut ProgramState,
) -> Result<()> {
    let esp_failure = |reason: &str| BomdError::EspFailure {
        log_path: log_path.to_string(),
        reason: reason.to_string(),
    };

    if !contents.contains("Normal termination") {
        return Err(esp_failure(
            "force calculation log was not valid; the program returned an \
             error or could not be called correctly",
        ));
    }

    let mut scf_energy: Option<f64> = None;
    let mut lines = contents.lines();
    while let Some(line) = lines.next() {
        if line.contains("SCF Done") {
            let value = line
                .split_whitespace()
                .nth(4)
                .and_then(|token| token.parse::<f64>().ok())
                .ok_or_else(|| esp_failure("could not parse SCF energy"))?;
            scf_energy = Some(value);
        }

        if line.contains("Forces (Hartrees/Bohr)") {
            let mut forces = Forces::new();
            for data_line in lines.by_ref() {
                if data_line.contains("Cartesian Forces") {
                    if forces.len() != state.number_atoms() {
                        return Err(esp_failure(&format!(
                            "expected {} force entries, found {}",
                            state.number_atoms(),
                            forces.len()
                        )));
                    }
                    let energy =
                        scf_energy.ok_or_else(|| esp_failure("no SCF energy before forces"))?;
                    state.energies.append(energy, EnergyUnit::Hartree);
                    state.forces.push(forces);
                    return Ok(());
                }

                let tokens: Vec<&str> = data_line.split_whitespace().collect();
                // Skip header/separator lines that don't start with an atom index.
                if tokens.first().is_none_or(|t| t.parse::<i64>().is_err()) {
                    continue;
                }
                let parsed: Option<Vec<f64>> = tokens
                    .get(2..5)
                    .map(|xyz| xyz.iter().filter_map(|t| t.parse().ok()).collect());
                match parsed.as_deref() {
                    Some([x, y, z]) => {
                        forces.append(Vector3::new(*x, *y, *z), ForceUnit::HartreePerBohr);
                    }
                    _ => return Err(esp_failure("malformed force line")),
                }
            }
            return Err(esp_failure("forces block was not terminated"));
        }
    }

    Err(esp_failure("no forces block in log"))
}
