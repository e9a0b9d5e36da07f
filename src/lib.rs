//! # bomd
//!
//! Born-Oppenheimer molecular dynamics driver.
//!
//! Starting from an equilibrium geometry and its harmonic normal-mode
//! analysis, `bomd` samples an initial microstate (positions + velocities)
//! consistent with quantum or classical harmonic-oscillator statistics at a
//! target temperature, then propagates classical nuclear motion by repeatedly
//! calling an external electronic structure program (Gaussian) for forces.
//!
//! ## Features
//!
//! - **Unit-safe quantities**: positions, velocities, accelerations, forces,
//!   energies, force constants, masses, and time each live in one canonical
//!   unit with explicit conversions at every boundary
//! - **Quasiclassical sampling**: zero-point energies, thermal vibrational
//!   quanta, geometry displacement, mode-to-atom velocity projection,
//!   optional rotational kick, optional energy-boost resampling
//! - **Verlet / Velocity Verlet**: symplectic propagation against an external
//!   force oracle
//! - **Reproducibility**: every random draw flows through one seeded source,
//!   and the seed is echoed in the report
//!
//! ## Example
//!
//! ```rust,ignore
//! use bomd::state::ProgramState;
//! use bomd::{input, sampler};
//!
//! let mut state = ProgramState::new();
//! input::parse_input(reader, &mut state)?;
//! if state.velocities.is_empty() {
//!     sampler::generate(&mut state)?;
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

// Core types
pub mod atom;
pub mod constants;
pub mod element;
pub mod isotope_data;
pub mod quantities;
pub mod random;
pub mod state;

// Simulation
pub mod esp;
pub mod propagation;
pub mod sampler;

// I/O and orchestration
pub mod driver;
pub mod input;

// Re-exports for convenience
pub use error::{BomdError, Result};
