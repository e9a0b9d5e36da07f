//! Aggregate simulation state: configuration plus the growing trajectory.

use crate::atom::Atom;
use crate::esp::EspProgram;
use crate::propagation::PropagationAlgorithm;
use crate::quantities::{
    Accelerations, Energies, ForceConstants, Forces, Frequencies, Masses, Positions, Time,
    TimeUnit, Velocities,
};
use crate::random::RandomSource;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How the harmonic oscillators are treated during sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OscillatorType {
    /// Quantum energy levels including zero-point energy.
    Quasiclassical,
    /// Classical baseline with a fixed small level spacing.
    Classical,
}

/// Random-weight distribution for the initial geometry displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryDisplacement {
    /// No displacement; the input structure is used as-is.
    None,
    /// sin(2*pi*u) weighting, bimodal near the classical turning points.
    EdgeWeighted,
    /// Truncated normal weighting.
    Gaussian,
    /// Uniform weighting in [-1, 1].
    Uniform,
}

/// Sign convention for the reaction-coordinate mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseDirection {
    /// Random sign for every mode.
    Random,
    /// Bias the imaginary mode toward decreasing the phase-pair distance.
    BringTogether,
    /// Bias the imaginary mode toward increasing the phase-pair distance.
    PushApart,
}

/// Energy-boost resampling configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnergyBoost {
    /// No resampling.
    Off,
    /// Resample (adjusting temperature) until the total vibrational energy
    /// lands in `[min, max]` kcal/mol.
    On {
        /// Lower bound in kcal/mol.
        min: f64,
        /// Upper bound in kcal/mol.
        max: f64,
    },
}

/// All data used throughout one trajectory.
///
/// Built incrementally by the input parser, then mutated only by the sampler
/// and the integrator. Trajectory vectors are append-only and indexed by
/// step: when the integrator runs step `n`, `structures[n-1]` exists, the
/// force oracle has produced `forces[n-1]` and `energies[n-1]`, and the
/// integrator appends `accelerations[n-1]`, `velocities[n-1]` (except
/// possibly at `n == 1`), and `structures[n]`.
#[derive(Debug)]
pub struct ProgramState {
    /// Name used for output files.
    pub job_name: String,
    /// Total molecular charge.
    pub charge: i32,
    /// Spin multiplicity.
    pub spin: i32,
    /// Atoms in input order.
    pub atoms: Vec<Atom>,
    /// Target temperature in kelvin.
    pub temperature: f64,

    /// Current step index; 0 for the first step.
    pub current_step: u64,
    /// Integration time step.
    pub step_size: Time,
    /// Step limit; `None` means no limit.
    pub max_steps: Option<u64>,

    /// Geometry as given in the input file.
    pub input_structure: Positions,
    /// Trajectory geometries, one per step.
    pub structures: Vec<Positions>,
    /// Trajectory velocities, one per step.
    pub velocities: Vec<Velocities>,
    /// Trajectory forces, one per step.
    pub forces: Vec<Forces>,
    /// Trajectory accelerations, one per step.
    pub accelerations: Vec<Accelerations>,
    /// SCF energies, one per step.
    pub energies: Energies,

    /// Integration algorithm.
    pub propagation_algorithm: PropagationAlgorithm,
    /// Oscillator treatment for sampling.
    pub oscillator_type: OscillatorType,
    /// Whether to add a rotational kick to the sampled velocities.
    pub add_rotational_energy: bool,
    /// Initial geometry displacement distribution.
    pub geometry_displacement_type: GeometryDisplacement,
    /// Sign convention for the reaction-coordinate mode.
    pub phase_direction: PhaseDirection,
    /// Atom pair (0-based) whose distance defines the phase direction.
    pub phase: Option<(usize, usize)>,

    /// Fixed mode directions, 0-based mode index to +/-1.
    pub fixed_mode_directions: IndexMap<usize, i32>,
    /// Fixed vibrational quanta, 0-based mode index to quantum number.
    pub fixed_vibrational_quanta: IndexMap<usize, u32>,

    /// Normal-mode wavenumbers.
    pub frequencies: Frequencies,
    /// Per-mode, per-atom displacement vectors in angstrom.
    pub mode_displacements: Vec<Positions>,
    /// Per-mode force constants.
    pub force_constants: ForceConstants,
    /// Per-mode reduced masses.
    pub reduced_masses: Masses,

    /// Energy-boost resampling configuration.
    pub energy_boost: EnergyBoost,

    /// The trajectory's single random source.
    pub random: RandomSource,

    /// Which electronic structure program to call.
    pub program_id: EspProgram,
    /// Route-section tail appended after `# force`.
    pub gaussian_header: String,
    /// Raw text appended after the geometry block, if any.
    pub gaussian_footer: Option<String>,
    /// `%nprocshared` value, if any.
    pub processor_count: Option<u32>,
    /// `%mem` value in GB, if any.
    pub memory_amount: Option<u32>,
    /// Whether to write a `.xyz` trajectory file at the end.
    pub output_xyz_file: bool,
}

impl ProgramState {
    /// Create a state with default configuration.
    pub fn new() -> Self {
        Self {
            job_name: "BomdJob".to_string(),
            charge: 0,
            spin: 1,
            atoms: Vec::new(),
            temperature: 298.15,
            current_step: 0,
            step_size: Time::new(1.0, TimeUnit::Femtosecond),
            max_steps: None,
            input_structure: Positions::new(),
            structures: Vec::new(),
            velocities: Vec::new(),
            forces: Vec::new(),
            accelerations: Vec::new(),
            energies: Energies::new(),
            propagation_algorithm: PropagationAlgorithm::Verlet,
            oscillator_type: OscillatorType::Quasiclassical,
            add_rotational_energy: false,
            geometry_displacement_type: GeometryDisplacement::None,
            phase_direction: PhaseDirection::Random,
            phase: None,
            fixed_mode_directions: IndexMap::new(),
            fixed_vibrational_quanta: IndexMap::new(),
            frequencies: Frequencies::new(),
            mode_displacements: Vec::new(),
            force_constants: ForceConstants::new(),
            reduced_masses: Masses::new(),
            energy_boost: EnergyBoost::Off,
            random: RandomSource::new(None),
            program_id: EspProgram::Gaussian16,
            gaussian_header: String::new(),
            gaussian_footer: None,
            processor_count: None,
            memory_amount: None,
            output_xyz_file: true,
        }
    }

    /// Number of atoms in the molecule.
    pub fn number_atoms(&self) -> usize {
        self.atoms.len()
    }
}

impl Default for ProgramState {
    fn default() -> Self {
        Self::new()
    }
}
