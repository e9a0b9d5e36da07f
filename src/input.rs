//! Input file parsing.
//!
//! The input is block-structured: `$section ... $end`, with `#` starting a
//! comment that runs to end-of-line. `$job` and `$molecule` are required;
//! `$isotope`, `$gaussian_footer`, and exactly one of `$velocities` or
//! `$frequency_data` are optional. Keys inside `$job` are case-insensitive.

use crate::driver::banner;
use crate::error::{BomdError, Result};
use crate::esp::EspProgram;
use crate::propagation::PropagationAlgorithm;
use crate::quantities::{
    DistanceUnit, ForceConstantUnit, FrequencyUnit, MassUnit, Time, TimeUnit, VelocityUnit,
};
use crate::state::{
    EnergyBoost, GeometryDisplacement, OscillatorType, PhaseDirection, ProgramState,
};
use nalgebra::Vector3;
use std::io::BufRead;

const REQUIRED_SECTIONS: [&str; 2] = ["$job", "$molecule"];

const NO_DUPLICATE_SECTIONS: [&str; 5] = [
    "$molecule",
    "$isotope",
    "$velocities",
    "$frequency_data",
    "$gaussian_footer",
];

/// `$job` parameters that may appear more than once.
const REPEATABLE_PARAMETERS: [&str; 2] = ["fixed_mode_direction", "fixed_vibrational_quanta"];

/// Defaults echoed in the report for parameters the input leaves unset.
const PARAMETER_DEFAULTS: [(&str, &str); 10] = [
    ("max_steps", "no_limit"),
    ("phase", "random"),
    ("program", "gaussian16"),
    ("integration_algorithm", "verlet"),
    ("step_size", "1.00 fs"),
    ("temperature", "298.15 K"),
    ("energy_boost", "off"),
    ("oscillator_type", "quasiclassical"),
    ("geometry_displacement", "off"),
    ("rotational_energy", "off"),
];

/// Parse an input file and populate the program state.
///
/// # Errors
/// Returns [`BomdError::Input`] on malformed sections, unknown parameters,
/// or cross-field violations (for example a `$velocities` section whose
/// length does not match the atom count).
pub fn parse_input<R: BufRead>(reader: R, state: &mut ProgramState) -> Result<()> {
    let input_lines: Vec<String> = reader.lines().collect::<std::io::Result<_>>()?;

    println!("{}", banner("Input File"));
    for line in &input_lines {
        println!("{line}");
    }
    println!();

    let tokenized = tokenize(&input_lines);
    let section_keys: Vec<String> = tokenized.iter().map(|(key, _)| key.to_lowercase()).collect();
    validate_sections(&section_keys)?;

    let job_tokens = section_tokens(&tokenized, "$job");
    let molecule_tokens = section_tokens(&tokenized, "$molecule");
    let isotope_tokens = section_tokens(&tokenized, "$isotope");
    let velocities_tokens = section_tokens(&tokenized, "$velocities");
    let frequency_tokens = section_tokens(&tokenized, "$frequency_data");

    let job_parameters: Vec<String> =
        job_tokens.iter().map(|(key, _)| key.to_lowercase()).collect();
    validate_job_parameters(&job_parameters)?;

    parse_molecule(&molecule_tokens, state)?;

    for (index_token, mass_token) in &isotope_tokens {
        let index: usize = index_token.parse().map_err(|_| {
            BomdError::input(format!(
                "Could not interpret '{index_token}  {mass_token}' in the $isotope section."
            ))
        })?;
        if index == 0 || index > state.atoms.len() {
            return Err(BomdError::input(format!(
                "Atom index {index} in the $isotope section is out of range."
            )));
        }
        state.atoms[index - 1].change_mass(mass_token)?;
    }

    state.structures.push(state.input_structure.clone());

    for (key, options) in &job_tokens {
        apply_job_parameter(&key.to_lowercase(), options.trim(), state)?;
    }

    if section_keys.iter().any(|key| key == "$gaussian_footer") {
        state.gaussian_footer = Some(extract_raw_footer(&input_lines));
    }

    parse_frequency_data(&frequency_tokens, state)?;

    if section_keys.iter().any(|key| key == "$velocities") {
        parse_velocities(&velocities_tokens, state)?;
    }

    if let Some(name) = job_name_from_stdout() {
        state.job_name = name;
    }

    println!("{}", banner("Default Parameters Being Used"));
    let mut any_default = false;
    for (parameter, default) in PARAMETER_DEFAULTS {
        if !job_parameters.iter().any(|key| key == parameter) {
            println!("  {parameter}: {default}");
            any_default = true;
        }
    }
    if !any_default {
        println!("  (No defaults used.)");
    }
    println!();
    println!("{}", banner("Random Seed"));
    println!("  {}", state.random.seed());
    println!();
    println!("{}", banner("Atomic Mass Data"));
    for (index, atom) in state.atoms.iter().enumerate() {
        println!("  {:<3}  {atom}", index + 1);
    }
    println!();

    Ok(())
}

/// Strip comments, drop blank lines, and split each line into
/// (first token, remainder).
fn tokenize(lines: &[String]) -> Vec<(String, String)> {
    lines
        .iter()
        .filter_map(|line| {
            let stripped = line.split('#').next().unwrap_or("").trim();
            if stripped.is_empty() {
                return None;
            }
            match stripped.split_once(char::is_whitespace) {
                Some((key, rest)) => Some((key.to_string(), rest.trim().to_string())),
                None => Some((stripped.to_string(), String::new())),
            }
        })
        .collect()
}

fn validate_sections(section_keys: &[String]) -> Result<()> {
    for required in REQUIRED_SECTIONS {
        if !section_keys.iter().any(|key| key == required) {
            return Err(BomdError::input(format!(
                "Could not find {required} section."
            )));
        }
    }
    for section in NO_DUPLICATE_SECTIONS {
        if section_keys.iter().filter(|key| *key == section).count() > 1 {
            return Err(BomdError::input(format!("Multiple {section} sections.")));
        }
    }
    let has_velocities = section_keys.iter().any(|key| key == "$velocities");
    let has_frequencies = section_keys.iter().any(|key| key == "$frequency_data");
    if has_velocities && has_frequencies {
        return Err(BomdError::input(
            "'$velocities', '$frequency_data' are mutually exclusive.",
        ));
    }
    Ok(())
}

fn validate_job_parameters(job_parameters: &[String]) -> Result<()> {
    if !job_parameters.iter().any(|key| key == "gaussian_header") {
        return Err(BomdError::input(
            "Could not find the required gaussian_header parameter in the $job section.",
        ));
    }
    for parameter in job_parameters {
        if REPEATABLE_PARAMETERS.contains(&parameter.as_str()) {
            continue;
        }
        if job_parameters.iter().filter(|key| *key == parameter).count() > 1 {
            return Err(BomdError::input(format!(
                "The '{parameter}' parameter can only be listed once."
            )));
        }
    }
    Ok(())
}

/// Tokens of one section, in input order.
fn section_tokens(tokenized: &[(String, String)], section: &str) -> Vec<(String, String)> {
    let mut tokens = Vec::new();
    let mut in_section = false;
    for (key, rest) in tokenized {
        let lowered = key.to_lowercase();
        if lowered == section {
            in_section = true;
        } else if lowered == "$end" {
            in_section = false;
        } else if in_section {
            tokens.push((key.clone(), rest.clone()));
        }
    }
    tokens
}

fn parse_molecule(molecule_tokens: &[(String, String)], state: &mut ProgramState) -> Result<()> {
    let Some(((charge_token, spin_token), atom_tokens)) = molecule_tokens.split_first() else {
        return Err(BomdError::input(
            "Could not find charge and/or spin multiplicity in the $molecule section.",
        ));
    };
    state.charge = charge_token.parse().map_err(|_| {
        BomdError::input("Could not find charge and/or spin multiplicity in the $molecule section.")
    })?;
    state.spin = spin_token.trim().parse().map_err(|_| {
        BomdError::input("Could not find charge and/or spin multiplicity in the $molecule section.")
    })?;

    for (symbol, coords) in atom_tokens {
        let parse_error = || {
            BomdError::input(format!(
                "Could not interpret '{symbol}  {coords}' in the $molecule section."
            ))
        };
        let xyz: Vec<f64> = coords
            .split_whitespace()
            .map(str::parse)
            .collect::<std::result::Result<_, _>>()
            .map_err(|_| parse_error())?;
        let [x, y, z] = xyz.as_slice() else {
            return Err(parse_error());
        };
        state.atoms.push(crate::atom::Atom::from_symbol(symbol)?);
        state
            .input_structure
            .append(Vector3::new(*x, *y, *z), DistanceUnit::Angstrom);
    }
    Ok(())
}

fn apply_job_parameter(parameter: &str, options: &str, state: &mut ProgramState) -> Result<()> {
    match parameter {
        "current_step" => {
            state.current_step = options.parse().map_err(|_| {
                BomdError::input(format!(
                    "Could not interpret 'current_step {options}'. Expected 'current_step int'."
                ))
            })?;
        }
        "energy_boost" => parse_energy_boost(options, state)?,
        "fixed_mode_direction" => {
            let err = || {
                BomdError::input(format!(
                    "Could not interpret parameter 'fixed_mode_direction {options}'. Expected \
                     'fixed_mode_direction n 1', or 'fixed_mode_direction n -1', where n is the \
                     mode index."
                ))
            };
            let (mode, direction) = parse_index_pair(options).ok_or_else(err)?;
            if mode < 1 || (direction != 1 && direction != -1) {
                return Err(err());
            }
            state
                .fixed_mode_directions
                .insert(mode as usize - 1, direction as i32);
        }
        "fixed_vibrational_quanta" => {
            let err = || {
                BomdError::input(format!(
                    "Could not interpret parameter 'fixed_vibrational_quanta {options}'. Expected \
                     'fixed_vibrational_quanta n m', where n is the mode index and m is the \
                     vibrational quantum number (integer >= 0)."
                ))
            };
            let (mode, quanta) = parse_index_pair(options).ok_or_else(err)?;
            if mode < 1 || quanta < 0 {
                return Err(err());
            }
            state
                .fixed_vibrational_quanta
                .insert(mode as usize - 1, quanta as u32);
        }
        "gaussian_header" => state.gaussian_header = options.to_string(),
        "gaussian_footer" => state.gaussian_footer = Some(options.replace("\\n", "\n")),
        "geometry_displacement" => {
            state.geometry_displacement_type = match options.to_lowercase().as_str() {
                "edge_weighted" => GeometryDisplacement::EdgeWeighted,
                "gaussian" => GeometryDisplacement::Gaussian,
                "uniform" => GeometryDisplacement::Uniform,
                "off" => GeometryDisplacement::None,
                _ => {
                    return Err(BomdError::input(format!(
                        "Could not interpret parameter 'geometry_displacement {options}'. Expected \
                         'geometry_displacement edge_weighted', 'geometry_displacement gaussian', \
                         'geometry_displacement uniform' or 'geometry_displacement off'."
                    )));
                }
            };
        }
        "integration_algorithm" => {
            state.propagation_algorithm = match options.to_lowercase().as_str() {
                "verlet" => PropagationAlgorithm::Verlet,
                "velocity_verlet" => PropagationAlgorithm::VelocityVerlet,
                _ => {
                    return Err(BomdError::input(format!(
                        "Could not interpret parameter 'integration_algorithm {options}'. Expected \
                         'verlet' or 'velocity_verlet'."
                    )));
                }
            };
        }
        "max_steps" => {
            if options.eq_ignore_ascii_case("no_limit") {
                state.max_steps = None;
            } else {
                state.max_steps = Some(options.parse().map_err(|_| {
                    BomdError::input(format!(
                        "Could not interpret parameter 'max_steps {options}'. Expected 'max_steps \
                         integer' or 'no_limit'."
                    ))
                })?);
            }
        }
        "memory" => {
            state.memory_amount = Some(options.parse().map_err(|_| {
                BomdError::input(format!(
                    "Could not interpret parameter 'memory {options}'. Expected 'memory integer'."
                ))
            })?);
        }
        "oscillator_type" => {
            state.oscillator_type = match options.to_lowercase().as_str() {
                "classical" => OscillatorType::Classical,
                "quasiclassical" => OscillatorType::Quasiclassical,
                _ => {
                    return Err(BomdError::input(format!(
                        "Could not interpret parameter 'oscillator_type {options}'. Expected \
                         'oscillator_type classical' or 'oscillator_type quasiclassical'."
                    )));
                }
            };
        }
        "phase" => parse_phase(options, state)?,
        "processors" => {
            state.processor_count = Some(options.parse().map_err(|_| {
                BomdError::input(format!(
                    "Could not interpret parameter 'processors {options}'. Expected 'processors \
                     integer'."
                ))
            })?);
        }
        "program" => {
            state.program_id = match options.to_lowercase().as_str() {
                "gaussian16" => EspProgram::Gaussian16,
                "gaussian09" => EspProgram::Gaussian09,
                _ => {
                    return Err(BomdError::input(format!(
                        "Could not interpret parameter 'program {options}'. Expected 'program \
                         gaussian16' or 'program gaussian09'."
                    )));
                }
            };
        }
        "random_seed" => {
            if options.eq_ignore_ascii_case("generate") {
                state.random.reset_seed(None);
            } else {
                let seed = options.parse().map_err(|_| {
                    BomdError::input(format!(
                        "Could not interpret parameter 'random_seed {options}'. Expected \
                         'random_seed integer' or 'random_seed generate'."
                    ))
                })?;
                state.random.reset_seed(Some(seed));
            }
        }
        "rotational_energy" => {
            state.add_rotational_energy = match options.to_lowercase().as_str() {
                "on" => true,
                "off" => false,
                _ => {
                    return Err(BomdError::input(format!(
                        "Could not interpret parameter 'rotational_energy {options}'. Expected \
                         'rotational_energy on' or 'rotational_energy off'."
                    )));
                }
            };
        }
        "step_size" => {
            let femtoseconds: f64 = options.parse().map_err(|_| {
                BomdError::input(format!(
                    "Could not interpret parameter 'step_size {options}'. Expected 'step_size \
                     floating-point'."
                ))
            })?;
            state.step_size = Time::new(femtoseconds, TimeUnit::Femtosecond);
        }
        "temperature" => {
            state.temperature = options.parse().map_err(|_| {
                BomdError::input(format!(
                    "Could not interpret parameter 'temperature {options}'. Expected 'temperature \
                     floating-point'."
                ))
            })?;
        }
        _ => {
            return Err(BomdError::input(format!(
                "Invalid parameter '{parameter}' in $job section."
            )));
        }
    }
    Ok(())
}

fn parse_index_pair(options: &str) -> Option<(i64, i64)> {
    let mut tokens = options.split_whitespace();
    let first = tokens.next()?.parse().ok()?;
    let second = tokens.next()?.parse().ok()?;
    if tokens.next().is_some() {
        return None;
    }
    Some((first, second))
}

fn parse_energy_boost(options: &str, state: &mut ProgramState) -> Result<()> {
    let err = || {
        BomdError::input(format!(
            "Could not interpret parameter 'energy_boost {options}'. Expected 'energy_boost on \
             min max' or 'energy_boost off'."
        ))
    };
    let tokens: Vec<&str> = options.split_whitespace().collect();
    match tokens.first().map(|t| t.to_lowercase()).as_deref() {
        Some("off") => state.energy_boost = EnergyBoost::Off,
        Some("on") => {
            let (min_token, max_token) = match (tokens.get(1), tokens.get(2)) {
                (Some(min), Some(max)) => (*min, *max),
                _ => return Err(err()),
            };
            let mut min: f64 = min_token.parse().map_err(|_| err())?;
            let mut max: f64 = max_token.parse().map_err(|_| err())?;
            if min > max {
                std::mem::swap(&mut min, &mut max);
            }
            state.energy_boost = EnergyBoost::On { min, max };
        }
        _ => return Err(err()),
    }
    Ok(())
}

fn parse_phase(options: &str, state: &mut ProgramState) -> Result<()> {
    let err = || {
        BomdError::input(format!(
            "Could not interpret parameter 'phase {options}'. Expected 'phase bring_together \
             index1 index2', 'phase push_apart index1 index2' or 'phase random'."
        ))
    };
    let tokens: Vec<&str> = options.split_whitespace().collect();
    let direction = match tokens.first().map(|t| t.to_lowercase()).as_deref() {
        Some("random") => {
            state.phase_direction = PhaseDirection::Random;
            return Ok(());
        }
        Some("bring_together") => PhaseDirection::BringTogether,
        Some("push_apart") => PhaseDirection::PushApart,
        _ => return Err(err()),
    };

    let (atom1, atom2) = match (tokens.get(1), tokens.get(2)) {
        (Some(a), Some(b)) => (
            a.parse::<usize>().map_err(|_| err())?,
            b.parse::<usize>().map_err(|_| err())?,
        ),
        _ => return Err(err()),
    };
    if atom1 == 0 || atom2 == 0 || atom1 > state.atoms.len() || atom2 > state.atoms.len() {
        return Err(BomdError::input(format!(
            "Atom index in 'phase {options}' is out of range."
        )));
    }
    state.phase_direction = direction;
    state.phase = Some((atom1 - 1, atom2 - 1));
    Ok(())
}

/// Collect the raw lines of the `$gaussian_footer` block, preserving
/// whitespace and comments.
fn extract_raw_footer(input_lines: &[String]) -> String {
    let mut in_section = false;
    let mut footer_lines = Vec::new();
    for line in input_lines {
        if line.contains("$gaussian_footer") {
            in_section = true;
        } else if in_section && line.contains("$end") {
            break;
        } else if in_section {
            footer_lines.push(line.as_str());
        }
    }
    let mut footer = footer_lines.join("\n");
    if !footer.is_empty() {
        footer.push('\n');
    }
    footer
}

/// Parse `$frequency_data`: per mode a wavenumber (cm^-1), reduced mass
/// (amu), force constant (mdyne/A), then 3N displacement components (A).
///
/// The tokens are consumed as one stream, so a mode may be written on one
/// line or split across several.
fn parse_frequency_data(
    frequency_tokens: &[(String, String)],
    state: &mut ProgramState,
) -> Result<()> {
    let section_error = || BomdError::input("Could not interpret $frequency_data section.");

    let mut stream = Vec::new();
    for (key, rest) in frequency_tokens {
        stream.push(key.as_str());
        stream.extend(rest.split_whitespace());
    }

    let mut values = stream.iter().map(|token| token.parse::<f64>());
    let mut next_value = || values.next().transpose().map_err(|_| section_error());

    while let Some(frequency) = next_value()? {
        state.frequencies.append(frequency, FrequencyUnit::RecipCm);

        let reduced_mass = next_value()?.ok_or_else(section_error)?;
        state.reduced_masses.append(reduced_mass, MassUnit::Amu);

        let force_constant = next_value()?.ok_or_else(section_error)?;
        state
            .force_constants
            .append_scalar(force_constant, ForceConstantUnit::MillidynePerAngstrom);

        let mut displacements = crate::quantities::Positions::new();
        for _ in 0..state.number_atoms() {
            let x = next_value()?.ok_or_else(section_error)?;
            let y = next_value()?.ok_or_else(section_error)?;
            let z = next_value()?.ok_or_else(section_error)?;
            displacements.append(Vector3::new(x, y, z), DistanceUnit::Angstrom);
        }
        state.mode_displacements.push(displacements);
    }
    Ok(())
}

/// Parse `$velocities`: N lines of `vx vy vz` in meter/second.
fn parse_velocities(
    velocities_tokens: &[(String, String)],
    state: &mut ProgramState,
) -> Result<()> {
    let section_error = || BomdError::input("Could not interpret $velocities section.");

    let mut velocities = crate::quantities::Velocities::new();
    for (first, rest) in velocities_tokens {
        let x: f64 = first.parse().map_err(|_| section_error())?;
        let yz: Vec<f64> = rest
            .split_whitespace()
            .map(str::parse)
            .collect::<std::result::Result<_, _>>()
            .map_err(|_| section_error())?;
        let [y, z] = yz.as_slice() else {
            return Err(section_error());
        };
        velocities.append(Vector3::new(x, *y, *z), VelocityUnit::MeterPerSec);
    }
    if velocities.len() != state.number_atoms() {
        return Err(BomdError::input(
            "Number of atoms in $velocities and $molecule sections does not match.",
        ));
    }
    state.velocities.push(velocities);
    Ok(())
}

/// Derive the job name from the file stdout points at, when resolvable.
///
/// Only a real file counts; a terminal or pipe keeps the default name.
fn job_name_from_stdout() -> Option<String> {
    let target = std::fs::read_link("/proc/self/fd/1").ok()?;
    if !target.is_file() {
        return None;
    }
    let stem = target.file_stem()?.to_str()?;
    Some(stem.to_string())
}
