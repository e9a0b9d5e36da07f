//! Unit-typed containers for physical quantities.
//!
//! Every container stores its data in exactly one canonical unit and converts
//! on the way in (`append`) and on the way out (`as_*`). Arithmetic is only
//! defined between containers of the same kind and is elementwise in the
//! canonical unit.
//!
//! | Container | Canonical unit |
//! |---|---|
//! | [`Positions`] | angstrom |
//! | [`Velocities`] | meter/second |
//! | [`Accelerations`] | meter/second^2 |
//! | [`Forces`] | newton |
//! | [`Energies`] | joule |
//! | [`Frequencies`] | cm^-1 |
//! | [`ForceConstants`] | newton/meter |
//! | [`Masses`] | amu |
//! | [`Time`] | second |

use crate::atom::Atom;
use crate::constants as cn;
use crate::error::{BomdError, Result};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

// === Unit enums ===

/// Units for measuring distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnit {
    /// Angstrom (canonical).
    Angstrom,
    /// Bohr radius.
    Bohr,
    /// Meter.
    Meter,
}

impl DistanceUnit {
    fn to_angstrom(self) -> f64 {
        match self {
            DistanceUnit::Angstrom => 1.0,
            DistanceUnit::Bohr => cn::BOHR_TO_ANGSTROM,
            DistanceUnit::Meter => cn::METER_TO_ANGSTROM,
        }
    }
}

/// Units for measuring velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VelocityUnit {
    /// Meter/second (canonical).
    MeterPerSec,
    /// Angstrom/femtosecond.
    AngstromPerFs,
    /// Angstrom/second.
    AngstromPerSec,
}

impl VelocityUnit {
    fn to_meter_per_sec(self) -> f64 {
        match self {
            VelocityUnit::MeterPerSec => 1.0,
            VelocityUnit::AngstromPerFs => cn::ANGSTROM_TO_METER / cn::FEMTOSECOND_TO_SECOND,
            VelocityUnit::AngstromPerSec => cn::ANGSTROM_TO_METER,
        }
    }
}

/// Units for measuring acceleration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccelerationUnit {
    /// Meter/second^2 (canonical).
    MeterPerSecSqrd,
}

/// Units for measuring frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrequencyUnit {
    /// Wavenumber, cm^-1 (canonical).
    RecipCm,
}

/// Units for measuring force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForceUnit {
    /// Newton (canonical).
    Newton,
    /// Dyne.
    Dyne,
    /// Millidyne.
    Millidyne,
    /// Hartree/bohr.
    HartreePerBohr,
}

impl ForceUnit {
    fn to_newton(self) -> f64 {
        match self {
            ForceUnit::Newton => 1.0,
            ForceUnit::Dyne => cn::DYNE_TO_NEWTON,
            ForceUnit::Millidyne => cn::MILLIDYNE_TO_NEWTON,
            ForceUnit::HartreePerBohr => cn::HARTREE_PER_BOHR_TO_NEWTON,
        }
    }
}

/// Units for measuring energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyUnit {
    /// Joule (canonical).
    Joule,
    /// Kilocalorie per mole.
    KcalPerMole,
    /// Millidyne*angstrom.
    MillidyneAngstrom,
    /// Hartree.
    Hartree,
}

impl EnergyUnit {
    fn to_joule(self) -> f64 {
        match self {
            EnergyUnit::Joule => 1.0,
            EnergyUnit::KcalPerMole => cn::KCAL_PER_MOLE_TO_JOULE,
            EnergyUnit::MillidyneAngstrom => cn::MILLIDYNE_ANGSTROM_TO_JOULE,
            EnergyUnit::Hartree => cn::HARTREE_TO_JOULE,
        }
    }
}

/// Units for measuring force constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForceConstantUnit {
    /// Newton/meter (canonical).
    NewtonPerMeter,
    /// Millidyne/angstrom.
    MillidynePerAngstrom,
}

impl ForceConstantUnit {
    fn to_newton_per_meter(self) -> f64 {
        match self {
            ForceConstantUnit::NewtonPerMeter => 1.0,
            ForceConstantUnit::MillidynePerAngstrom => cn::MDYNE_PER_ANGSTROM_TO_NEWTON_PER_METER,
        }
    }
}

/// Units for measuring mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MassUnit {
    /// Atomic mass unit (canonical).
    Amu,
    /// Kilogram.
    Kilogram,
    /// Gram.
    Gram,
}

impl MassUnit {
    fn to_amu(self) -> f64 {
        match self {
            MassUnit::Amu => 1.0,
            MassUnit::Kilogram => cn::KG_TO_AMU,
            MassUnit::Gram => 1.0e-3 * cn::KG_TO_AMU,
        }
    }
}

/// Units for measuring time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Second (canonical).
    Second,
    /// Femtosecond.
    Femtosecond,
}

// === Positions ===

/// Per-atom coordinate triples, stored in angstrom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Positions {
    coords: Vec<Vector3<f64>>,
}

impl Positions {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored triples.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Whether the container is empty.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Append a coordinate triple in the given unit.
    pub fn append(&mut self, xyz: Vector3<f64>, unit: DistanceUnit) {
        self.coords.push(xyz * unit.to_angstrom());
    }

    /// Overwrite the triple at `index` with a value in the given unit.
    pub fn set(&mut self, index: usize, xyz: Vector3<f64>, unit: DistanceUnit) {
        self.coords[index] = xyz * unit.to_angstrom();
    }

    /// Coordinate triple at `index` in angstrom.
    pub fn as_angstrom(&self, index: usize) -> Vector3<f64> {
        self.coords[index]
    }

    /// Coordinate triple at `index` in bohr.
    pub fn as_bohr(&self, index: usize) -> Vector3<f64> {
        self.coords[index] * cn::ANGSTROM_TO_BOHR
    }

    /// Coordinate triple at `index` in meter.
    pub fn as_meter(&self, index: usize) -> Vector3<f64> {
        self.coords[index] * cn::ANGSTROM_TO_METER
    }

    /// Iterate over all triples in angstrom.
    pub fn iter_angstrom(&self) -> impl Iterator<Item = Vector3<f64>> + '_ {
        self.coords.iter().copied()
    }

    /// Displacement from a velocity over a time step: dx = v*dt.
    pub fn from_velocity(velocities: &Velocities, dt: Time) -> Self {
        let dt = dt.as_second();
        let mut displacement = Self::new();
        for vel in velocities.iter_meter_per_sec() {
            displacement.append(vel * dt, DistanceUnit::Meter);
        }
        displacement
    }

    /// Displacement from an acceleration over a time step: dx = a*dt^2.
    ///
    /// Callers scale by 1/2 where the kinematics require it.
    pub fn from_acceleration(accelerations: &Accelerations, dt: Time) -> Self {
        let dt2 = dt.as_second() * dt.as_second();
        let mut displacement = Self::new();
        for acc in accelerations.iter_meter_per_sec_sqrd() {
            displacement.append(acc * dt2, DistanceUnit::Meter);
        }
        displacement
    }
}

impl Add for Positions {
    type Output = Positions;

    fn add(mut self, rhs: Positions) -> Positions {
        assert_eq!(self.len(), rhs.len(), "Positions length mismatch in +");
        for (a, b) in self.coords.iter_mut().zip(&rhs.coords) {
            *a += *b;
        }
        self
    }
}

impl Sub for Positions {
    type Output = Positions;

    fn sub(mut self, rhs: Positions) -> Positions {
        assert_eq!(self.len(), rhs.len(), "Positions length mismatch in -");
        for (a, b) in self.coords.iter_mut().zip(&rhs.coords) {
            *a -= *b;
        }
        self
    }
}

impl Mul<f64> for Positions {
    type Output = Positions;

    fn mul(mut self, scalar: f64) -> Positions {
        for a in &mut self.coords {
            *a *= scalar;
        }
        self
    }
}

// === Velocities ===

/// Per-atom velocity triples, stored in meter/second.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Velocities {
    velocities: Vec<Vector3<f64>>,
}

impl Velocities {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored triples.
    pub fn len(&self) -> usize {
        self.velocities.len()
    }

    /// Whether the container is empty.
    pub fn is_empty(&self) -> bool {
        self.velocities.is_empty()
    }

    /// Append a velocity triple in the given unit.
    pub fn append(&mut self, xyz: Vector3<f64>, unit: VelocityUnit) {
        self.velocities.push(xyz * unit.to_meter_per_sec());
    }

    /// Velocity triple at `index` in meter/second.
    pub fn as_meter_per_sec(&self, index: usize) -> Vector3<f64> {
        self.velocities[index]
    }

    /// Velocity triple at `index` in angstrom/femtosecond.
    pub fn as_angstrom_per_fs(&self, index: usize) -> Vector3<f64> {
        self.velocities[index] * (cn::METER_TO_ANGSTROM * cn::FEMTOSECOND_TO_SECOND)
    }

    /// Velocity triple at `index` in angstrom/second.
    pub fn as_angstrom_per_sec(&self, index: usize) -> Vector3<f64> {
        self.velocities[index] * cn::METER_TO_ANGSTROM
    }

    /// Iterate over all triples in meter/second.
    pub fn iter_meter_per_sec(&self) -> impl Iterator<Item = Vector3<f64>> + '_ {
        self.velocities.iter().copied()
    }

    /// Velocity change from an acceleration over a time step: dv = a*dt.
    pub fn from_acceleration(accelerations: &Accelerations, dt: Time) -> Self {
        let dt = dt.as_second();
        let mut delta = Self::new();
        for acc in accelerations.iter_meter_per_sec_sqrd() {
            delta.append(acc * dt, VelocityUnit::MeterPerSec);
        }
        delta
    }
}

impl Add for Velocities {
    type Output = Velocities;

    fn add(mut self, rhs: Velocities) -> Velocities {
        assert_eq!(self.len(), rhs.len(), "Velocities length mismatch in +");
        for (a, b) in self.velocities.iter_mut().zip(&rhs.velocities) {
            *a += *b;
        }
        self
    }
}

impl Sub for Velocities {
    type Output = Velocities;

    fn sub(mut self, rhs: Velocities) -> Velocities {
        assert_eq!(self.len(), rhs.len(), "Velocities length mismatch in -");
        for (a, b) in self.velocities.iter_mut().zip(&rhs.velocities) {
            *a -= *b;
        }
        self
    }
}

impl Mul<f64> for Velocities {
    type Output = Velocities;

    fn mul(mut self, scalar: f64) -> Velocities {
        for a in &mut self.velocities {
            *a *= scalar;
        }
        self
    }
}

// === Accelerations ===

/// Per-atom acceleration triples, stored in meter/second^2.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accelerations {
    accelerations: Vec<Vector3<f64>>,
}

impl Accelerations {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored triples.
    pub fn len(&self) -> usize {
        self.accelerations.len()
    }

    /// Whether the container is empty.
    pub fn is_empty(&self) -> bool {
        self.accelerations.is_empty()
    }

    /// Append an acceleration triple in the given unit.
    pub fn append(&mut self, xyz: Vector3<f64>, unit: AccelerationUnit) {
        let AccelerationUnit::MeterPerSecSqrd = unit;
        self.accelerations.push(xyz);
    }

    /// Acceleration triple at `index` in meter/second^2.
    pub fn as_meter_per_sec_sqrd(&self, index: usize) -> Vector3<f64> {
        self.accelerations[index]
    }

    /// Iterate over all triples in meter/second^2.
    pub fn iter_meter_per_sec_sqrd(&self) -> impl Iterator<Item = Vector3<f64>> + '_ {
        self.accelerations.iter().copied()
    }

    /// Newton's second law: a = F/m per atom.
    ///
    /// # Errors
    /// Returns [`BomdError::InvalidState`] when the force and atom counts
    /// disagree.
    pub fn from_forces(forces: &Forces, atoms: &[Atom]) -> Result<Self> {
        if forces.len() != atoms.len() {
            return Err(BomdError::invalid_state(format!(
                "force count {} does not match atom count {}",
                forces.len(),
                atoms.len()
            )));
        }
        let mut accelerations = Self::new();
        for (atom, force) in atoms.iter().zip(forces.iter_newton()) {
            let mass_kg = atom.mass() * cn::AMU_TO_KG;
            accelerations.append(force / mass_kg, AccelerationUnit::MeterPerSecSqrd);
        }
        Ok(accelerations)
    }
}

impl Add for Accelerations {
    type Output = Accelerations;

    fn add(mut self, rhs: Accelerations) -> Accelerations {
        assert_eq!(self.len(), rhs.len(), "Accelerations length mismatch in +");
        for (a, b) in self.accelerations.iter_mut().zip(&rhs.accelerations) {
            *a += *b;
        }
        self
    }
}

impl Sub for Accelerations {
    type Output = Accelerations;

    fn sub(mut self, rhs: Accelerations) -> Accelerations {
        assert_eq!(self.len(), rhs.len(), "Accelerations length mismatch in -");
        for (a, b) in self.accelerations.iter_mut().zip(&rhs.accelerations) {
            *a -= *b;
        }
        self
    }
}

impl Mul<f64> for Accelerations {
    type Output = Accelerations;

    fn mul(mut self, scalar: f64) -> Accelerations {
        for a in &mut self.accelerations {
            *a *= scalar;
        }
        self
    }
}

// === Forces ===

/// Per-atom force triples, stored in newton.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forces {
    forces: Vec<Vector3<f64>>,
}

impl Forces {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored triples.
    pub fn len(&self) -> usize {
        self.forces.len()
    }

    /// Whether the container is empty.
    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    /// Append a force triple in the given unit.
    pub fn append(&mut self, xyz: Vector3<f64>, unit: ForceUnit) {
        self.forces.push(xyz * unit.to_newton());
    }

    /// Force triple at `index` in newton.
    pub fn as_newton(&self, index: usize) -> Vector3<f64> {
        self.forces[index]
    }

    /// Force triple at `index` in dyne.
    pub fn as_dyne(&self, index: usize) -> Vector3<f64> {
        self.forces[index] * cn::NEWTON_TO_DYNE
    }

    /// Force triple at `index` in millidyne.
    pub fn as_millidyne(&self, index: usize) -> Vector3<f64> {
        self.forces[index] * cn::NEWTON_TO_MILLIDYNE
    }

    /// Force triple at `index` in hartree/bohr.
    pub fn as_hartree_per_bohr(&self, index: usize) -> Vector3<f64> {
        self.forces[index] * cn::NEWTON_TO_HARTREE_PER_BOHR
    }

    /// Iterate over all triples in newton.
    pub fn iter_newton(&self) -> impl Iterator<Item = Vector3<f64>> + '_ {
        self.forces.iter().copied()
    }
}

impl Add for Forces {
    type Output = Forces;

    fn add(mut self, rhs: Forces) -> Forces {
        assert_eq!(self.len(), rhs.len(), "Forces length mismatch in +");
        for (a, b) in self.forces.iter_mut().zip(&rhs.forces) {
            *a += *b;
        }
        self
    }
}

impl Sub for Forces {
    type Output = Forces;

    fn sub(mut self, rhs: Forces) -> Forces {
        assert_eq!(self.len(), rhs.len(), "Forces length mismatch in -");
        for (a, b) in self.forces.iter_mut().zip(&rhs.forces) {
            *a -= *b;
        }
        self
    }
}

impl Mul<f64> for Forces {
    type Output = Forces;

    fn mul(mut self, scalar: f64) -> Forces {
        for a in &mut self.forces {
            *a *= scalar;
        }
        self
    }
}

// === Energies ===

/// Scalar energies, stored in joule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Energies {
    energies: Vec<f64>,
}

impl Energies {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.energies.len()
    }

    /// Whether the container is empty.
    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    /// Append an energy in the given unit.
    pub fn append(&mut self, energy: f64, unit: EnergyUnit) {
        self.energies.push(energy * unit.to_joule());
    }

    /// Energy at `index` in joule.
    pub fn as_joules(&self, index: usize) -> f64 {
        self.energies[index]
    }

    /// Energy at `index` in kcal/mol.
    pub fn as_kcal_per_mole(&self, index: usize) -> f64 {
        self.energies[index] * cn::JOULE_TO_KCAL_PER_MOLE
    }

    /// Energy at `index` in millidyne*angstrom.
    pub fn as_millidyne_angstrom(&self, index: usize) -> f64 {
        self.energies[index] * cn::JOULE_TO_MILLIDYNE_ANGSTROM
    }

    /// Energy at `index` in hartree.
    pub fn as_hartree(&self, index: usize) -> f64 {
        self.energies[index] * cn::JOULE_TO_HARTREE
    }

    /// Iterate over all values in kcal/mol.
    pub fn iter_kcal_per_mole(&self) -> impl Iterator<Item = f64> + '_ {
        self.energies.iter().map(|e| e * cn::JOULE_TO_KCAL_PER_MOLE)
    }
}

impl Add for Energies {
    type Output = Energies;

    fn add(mut self, rhs: Energies) -> Energies {
        assert_eq!(self.len(), rhs.len(), "Energies length mismatch in +");
        for (a, b) in self.energies.iter_mut().zip(&rhs.energies) {
            *a += *b;
        }
        self
    }
}

impl Sub for Energies {
    type Output = Energies;

    fn sub(mut self, rhs: Energies) -> Energies {
        assert_eq!(self.len(), rhs.len(), "Energies length mismatch in -");
        for (a, b) in self.energies.iter_mut().zip(&rhs.energies) {
            *a -= *b;
        }
        self
    }
}

impl Mul<f64> for Energies {
    type Output = Energies;

    fn mul(mut self, scalar: f64) -> Energies {
        for a in &mut self.energies {
            *a *= scalar;
        }
        self
    }
}

// === Frequencies ===

/// Normal-mode wavenumbers, stored in cm^-1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frequencies {
    frequencies: Vec<f64>,
}

impl Frequencies {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of modes.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Whether the container is empty.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Append a wavenumber in the given unit.
    pub fn append(&mut self, frequency: f64, unit: FrequencyUnit) {
        let FrequencyUnit::RecipCm = unit;
        self.frequencies.push(frequency);
    }

    /// Wavenumber at `index` in cm^-1.
    pub fn as_recip_cm(&self, index: usize) -> f64 {
        self.frequencies[index]
    }

    /// All wavenumbers in cm^-1.
    pub fn all_recip_cm(&self) -> &[f64] {
        &self.frequencies
    }
}

// === ForceConstants ===

/// Per-mode force-constant triples, stored in newton/meter.
///
/// Appending a scalar broadcasts it to (k, k, k).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForceConstants {
    force_constants: Vec<Vector3<f64>>,
}

impl ForceConstants {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored triples.
    pub fn len(&self) -> usize {
        self.force_constants.len()
    }

    /// Whether the container is empty.
    pub fn is_empty(&self) -> bool {
        self.force_constants.is_empty()
    }

    /// Append a force-constant triple in the given unit.
    pub fn append(&mut self, xyz: Vector3<f64>, unit: ForceConstantUnit) {
        self.force_constants.push(xyz * unit.to_newton_per_meter());
    }

    /// Append a scalar force constant, broadcast to all three components.
    pub fn append_scalar(&mut self, force_constant: f64, unit: ForceConstantUnit) {
        self.append(Vector3::repeat(force_constant), unit);
    }

    /// Force-constant triple at `index` in newton/meter.
    pub fn as_newton_per_meter(&self, index: usize) -> Vector3<f64> {
        self.force_constants[index]
    }

    /// Force-constant triple at `index` in millidyne/angstrom.
    pub fn as_millidyne_per_angstrom(&self, index: usize) -> Vector3<f64> {
        self.force_constants[index] * cn::NEWTON_PER_METER_TO_MDYNE_PER_ANGSTROM
    }
}

// === Masses ===

/// Scalar masses, stored in amu.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Masses {
    masses: Vec<f64>,
}

impl Masses {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    /// Whether the container is empty.
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Append a mass in the given unit.
    pub fn append(&mut self, mass: f64, unit: MassUnit) {
        self.masses.push(mass * unit.to_amu());
    }

    /// Mass at `index` in amu.
    pub fn as_amu(&self, index: usize) -> f64 {
        self.masses[index]
    }

    /// Mass at `index` in kilogram.
    pub fn as_kilogram(&self, index: usize) -> f64 {
        self.masses[index] * cn::AMU_TO_KG
    }

    /// Mass at `index` in gram.
    pub fn as_gram(&self, index: usize) -> f64 {
        self.masses[index] * cn::AMU_TO_KG * 1.0e3
    }
}

// === Time ===

/// A scalar time value, stored in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Time {
    seconds: f64,
}

impl Time {
    /// Create a time value in the given unit.
    pub fn new(value: f64, unit: TimeUnit) -> Self {
        let seconds = match unit {
            TimeUnit::Second => value,
            TimeUnit::Femtosecond => value * cn::FEMTOSECOND_TO_SECOND,
        };
        Self { seconds }
    }

    /// Value in seconds.
    pub fn as_second(&self) -> f64 {
        self.seconds
    }

    /// Value in femtoseconds.
    pub fn as_femtosecond(&self) -> f64 {
        self.seconds * cn::SECOND_TO_FEMTOSECOND
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_positions_round_trip() {
        let mut pos = Positions::new();
        pos.append(Vector3::new(1.0, -2.0, 0.5), DistanceUnit::Angstrom);
        pos.append(Vector3::new(1.0, 1.0, 1.0), DistanceUnit::Bohr);
        pos.append(Vector3::new(1.0e-10, 0.0, 0.0), DistanceUnit::Meter);

        assert_relative_eq!(pos.as_angstrom(1).x, 0.52917721090380, max_relative = 1e-12);
        assert_relative_eq!(pos.as_angstrom(2).x, 1.0, max_relative = 1e-12);

        // Bohr round trip
        let mut back = Positions::new();
        back.append(pos.as_bohr(0), DistanceUnit::Bohr);
        assert_relative_eq!(back.as_angstrom(0).y, -2.0, max_relative = 1e-14);
        // Meter round trip
        let mut back = Positions::new();
        back.append(pos.as_meter(0), DistanceUnit::Meter);
        assert_relative_eq!(back.as_angstrom(0).z, 0.5, max_relative = 1e-14);
    }

    #[test]
    fn test_positions_arithmetic() {
        let mut a = Positions::new();
        let mut b = Positions::new();
        a.append(Vector3::new(1.0, 2.0, 3.0), DistanceUnit::Angstrom);
        b.append(Vector3::new(0.5, -1.0, 2.0), DistanceUnit::Angstrom);

        let sum = a.clone() + b.clone();
        assert_relative_eq!(sum.as_angstrom(0).y, 1.0, max_relative = 1e-14);

        let restored = sum - b;
        assert_relative_eq!(restored.as_angstrom(0).x, a.as_angstrom(0).x);
        assert_relative_eq!(restored.as_angstrom(0).y, a.as_angstrom(0).y);
        assert_relative_eq!(restored.as_angstrom(0).z, a.as_angstrom(0).z);

        let doubled = a * 2.0;
        assert_relative_eq!(doubled.as_angstrom(0).z, 6.0);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn test_positions_length_mismatch_panics() {
        let mut a = Positions::new();
        a.append(Vector3::zeros(), DistanceUnit::Angstrom);
        let b = Positions::new();
        let _ = a + b;
    }

    #[test]
    fn test_displacement_constructors() {
        let mut vel = Velocities::new();
        vel.append(Vector3::new(100.0, 0.0, 0.0), VelocityUnit::MeterPerSec);
        let dt = Time::new(1.0, TimeUnit::Femtosecond);

        // dx = v*dt = 100 m/s * 1e-15 s = 1e-13 m = 1e-3 A
        let dx = Positions::from_velocity(&vel, dt);
        assert_relative_eq!(dx.as_angstrom(0).x, 1.0e-3, max_relative = 1e-12);

        let mut acc = Accelerations::new();
        acc.append(Vector3::new(2.0e15, 0.0, 0.0), AccelerationUnit::MeterPerSecSqrd);
        // dx = a*dt^2 = 2e15 * 1e-30 = 2e-15 m = 2e-5 A
        let dx = Positions::from_acceleration(&acc, dt);
        assert_relative_eq!(dx.as_angstrom(0).x, 2.0e-5, max_relative = 1e-12);

        // dv = a*dt = 2e15 * 1e-15 = 2 m/s
        let dv = Velocities::from_acceleration(&acc, dt);
        assert_relative_eq!(dv.as_meter_per_sec(0).x, 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_velocity_units() {
        let mut vel = Velocities::new();
        vel.append(Vector3::new(1.0, 0.0, 0.0), VelocityUnit::AngstromPerFs);
        // 1 A/fs = 1e5 m/s
        assert_relative_eq!(vel.as_meter_per_sec(0).x, 1.0e5, max_relative = 1e-12);
        assert_relative_eq!(vel.as_angstrom_per_fs(0).x, 1.0, max_relative = 1e-12);

        let mut vel = Velocities::new();
        vel.append(Vector3::new(1.0e10, 0.0, 0.0), VelocityUnit::AngstromPerSec);
        assert_relative_eq!(vel.as_meter_per_sec(0).x, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_forces_units() {
        let mut forces = Forces::new();
        forces.append(Vector3::new(0.01, 0.0, 0.0), ForceUnit::HartreePerBohr);
        assert_relative_eq!(
            forces.as_newton(0).x,
            0.01 * 8.2387234983e-8,
            max_relative = 1e-10
        );
        assert_relative_eq!(forces.as_hartree_per_bohr(0).x, 0.01, max_relative = 1e-12);

        let mut forces = Forces::new();
        forces.append(Vector3::new(1.0, 0.0, 0.0), ForceUnit::Dyne);
        assert_relative_eq!(forces.as_newton(0).x, 1.0e-5, max_relative = 1e-12);
        let mut forces = Forces::new();
        forces.append(Vector3::new(1.0, 0.0, 0.0), ForceUnit::Millidyne);
        assert_relative_eq!(forces.as_newton(0).x, 1.0e-8, max_relative = 1e-12);
    }

    #[test]
    fn test_accelerations_from_forces() {
        let atoms = vec![crate::atom::Atom::from_symbol("C").unwrap()];
        let mut forces = Forces::new();
        forces.append(Vector3::new(1.0e-8, 0.0, 0.0), ForceUnit::Newton);

        let acc = Accelerations::from_forces(&forces, &atoms).unwrap();
        let expected = 1.0e-8 / (12.0 * cn::AMU_TO_KG);
        assert_relative_eq!(
            acc.as_meter_per_sec_sqrd(0).x,
            expected,
            max_relative = 1e-10
        );

        // Length mismatch is an error, not a panic.
        let empty = Forces::new();
        assert!(Accelerations::from_forces(&empty, &atoms).is_err());
    }

    #[test]
    fn test_energies_units() {
        let mut energies = Energies::new();
        energies.append(1.0, EnergyUnit::Hartree);
        assert_relative_eq!(energies.as_joules(0), 4.359744722207185e-18);
        assert_relative_eq!(energies.as_hartree(0), 1.0, max_relative = 1e-14);
        assert_relative_eq!(energies.as_kcal_per_mole(0), 627.5095, max_relative = 1e-6);

        let mut energies = Energies::new();
        energies.append(1.0, EnergyUnit::MillidyneAngstrom);
        assert_relative_eq!(energies.as_joules(0), 1.0e-18, max_relative = 1e-14);
    }

    #[test]
    fn test_force_constants_broadcast_and_units() {
        let mut constants = ForceConstants::new();
        constants.append_scalar(5.756, ForceConstantUnit::MillidynePerAngstrom);

        let triple = constants.as_millidyne_per_angstrom(0);
        assert_relative_eq!(triple.x, 5.756, max_relative = 1e-12);
        assert_relative_eq!(triple.y, 5.756, max_relative = 1e-12);
        assert_relative_eq!(triple.z, 5.756, max_relative = 1e-12);

        // 1 mdyne/A = 100 N/m
        assert_relative_eq!(
            constants.as_newton_per_meter(0).x,
            575.6,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_masses_units() {
        let mut masses = Masses::new();
        masses.append(1.0, MassUnit::Amu);
        assert_relative_eq!(masses.as_kilogram(0), cn::AMU_TO_KG);
        assert_relative_eq!(masses.as_gram(0), cn::AMU_TO_KG * 1.0e3);

        let mut masses = Masses::new();
        masses.append(cn::AMU_TO_KG, MassUnit::Kilogram);
        assert_relative_eq!(masses.as_amu(0), 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_time_units() {
        let dt = Time::new(1.5, TimeUnit::Femtosecond);
        assert_relative_eq!(dt.as_second(), 1.5e-15);
        assert_relative_eq!(dt.as_femtosecond(), 1.5, max_relative = 1e-14);
    }
}
