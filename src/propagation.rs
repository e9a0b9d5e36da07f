//! Verlet and Velocity Verlet propagation against the force oracle.
//!
//! Each call to [`run_next_step`] consumes the newest force entry and
//! appends one acceleration, (usually) one velocity, and one structure to
//! the trajectory.

use crate::error::{BomdError, Result, check_positive};
use crate::quantities::{Accelerations, Positions, Velocities};
use crate::state::ProgramState;
use serde::{Deserialize, Serialize};

/// Algorithms for force propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropagationAlgorithm {
    /// Position Verlet; velocities are computed for output only.
    Verlet,
    /// Velocity Verlet; output velocities lag the positions by one step.
    VelocityVerlet,
}

/// Advance the trajectory by one step.
///
/// # Errors
/// Returns [`BomdError::InvalidState`] when the force history is empty, no
/// atoms are defined, or the step size is not positive.
pub fn run_next_step(state: &mut ProgramState) -> Result<()> {
    validate(state)?;
    match state.propagation_algorithm {
        PropagationAlgorithm::Verlet => verlet_step(state),
        PropagationAlgorithm::VelocityVerlet => velocity_verlet_step(state),
    }
}

fn validate(state: &ProgramState) -> Result<()> {
    if state.forces.is_empty() {
        return Err(BomdError::invalid_state("no forces available"));
    }
    if state.atoms.is_empty() {
        return Err(BomdError::invalid_state("no atoms defined"));
    }
    check_positive(state.step_size.as_second(), "step size")
}

/// a(n-1) = F(n-1)/m, appended to the acceleration history.
fn append_acceleration(state: &mut ProgramState) -> Result<()> {
    let forces = state
        .forces
        .last()
        .ok_or_else(|| BomdError::invalid_state("no forces available"))?;
    let acceleration = Accelerations::from_forces(forces, &state.atoms)?;
    state.accelerations.push(acceleration);
    Ok(())
}

/// v(n-1) = v(n-2) + 1/2*(a(n-2) + a(n-1))*dt, appended to the history.
fn append_velocity(state: &mut ProgramState) -> Result<()> {
    let count = state.accelerations.len();
    if count < 2 || state.velocities.is_empty() {
        return Err(BomdError::invalid_state(
            "velocity update requires two accelerations and a prior velocity",
        ));
    }
    let accel_sum = state.accelerations[count - 1].clone() + state.accelerations[count - 2].clone();
    let previous = state.velocities[state.velocities.len() - 1].clone();
    let velocity =
        previous + Velocities::from_acceleration(&accel_sum, state.step_size) * 0.5;
    state.velocities.push(velocity);
    Ok(())
}

/// Position Verlet.
///
/// ```text
/// a(n-1) = F/m
/// x(n) = x(n-1) + v(n-1)*dt + 1/2*a(n-1)*dt^2    when n == 1
///      = 2*x(n-1) - x(n-2) + a(n-1)*dt^2         when n >= 2
/// v(n-1) = v(n-2) + 1/2*(a(n-2) + a(n-1))*dt     output only
/// ```
fn verlet_step(state: &mut ProgramState) -> Result<()> {
    append_acceleration(state)?;

    if state.structures.len() > 1 {
        append_velocity(state)?;
    }

    let latest = state.structures.len() - 1;
    let acceleration = &state.accelerations[state.accelerations.len() - 1];
    let structure = if state.structures.len() == 1 {
        let velocity = state
            .velocities
            .last()
            .ok_or_else(|| BomdError::invalid_state("no velocities for the first step"))?;
        state.structures[latest].clone()
            + Positions::from_velocity(velocity, state.step_size)
            + Positions::from_acceleration(acceleration, state.step_size) * 0.5
    } else {
        state.structures[latest].clone() * 2.0 - state.structures[latest - 1].clone()
            + Positions::from_acceleration(acceleration, state.step_size)
    };
    state.structures.push(structure);
    Ok(())
}

/// Velocity Verlet.
///
/// ```text
/// a(n-1) = F/m
/// v(n-1) = v(n-2) + 1/2*(a(n-2) + a(n-1))*dt
/// x(n) = x(n-1) + v(n-1)*dt + 1/2*a(n-1)*dt^2
/// ```
///
/// On the first pass the velocity comes from the sampler or the input file;
/// the velocity of the new step is computed retroactively on the next call,
/// which is why output velocities lag the positions by one step.
fn velocity_verlet_step(state: &mut ProgramState) -> Result<()> {
    append_acceleration(state)?;

    if state.structures.len() > 1 {
        append_velocity(state)?;
    }

    let latest = state.structures.len() - 1;
    let acceleration = &state.accelerations[state.accelerations.len() - 1];
    let velocity = state
        .velocities
        .last()
        .ok_or_else(|| BomdError::invalid_state("no velocities available"))?;
    let structure = state.structures[latest].clone()
        + Positions::from_velocity(velocity, state.step_size)
        + Positions::from_acceleration(acceleration, state.step_size) * 0.5;
    state.structures.push(structure);
    Ok(())
}
