//! Physical constants and unit conversion factors.
//!
//! All conversion factors are named `FROM_TO` style: multiplying a value in
//! the `FROM` unit by the constant yields the value in the `TO` unit.

// === Fundamental constants ===

/// Speed of light in m/s (exact per SI definition).
pub const SPEED_OF_LIGHT_M_PER_S: f64 = 299_792_458.0;

/// Speed of light in cm/s.
///
/// Wavenumbers carry units of cm^-1, so the oscillator energy h*c*nu uses
/// this variant to land in joules.
pub const SPEED_OF_LIGHT_CM_PER_S: f64 = SPEED_OF_LIGHT_M_PER_S * 100.0;

/// Planck constant in J*s (exact per SI definition).
pub const PLANCK_CONSTANT: f64 = 6.626_070_15e-34;

/// Avogadro constant in 1/mol (exact per SI definition).
pub const AVOGADRO: f64 = 6.022_140_76e23;

/// Molar gas constant in kcal/(mol*K).
pub const GAS_CONSTANT_KCAL: f64 = 0.001_987_204_258_640_83;

/// Energy level spacing used for classical-oscillator baselines, in cm^-1.
pub const CLASSICAL_SPACING_RECIP_CM: f64 = 2.0;

// === Distance ===

/// Angstrom to meter.
pub const ANGSTROM_TO_METER: f64 = 1.0e-10;
/// Meter to angstrom.
pub const METER_TO_ANGSTROM: f64 = 1.0e10;

/// Bohr radius to angstrom (CODATA 2018).
pub const BOHR_TO_ANGSTROM: f64 = 0.529_177_210_903_8;
/// Angstrom to bohr.
pub const ANGSTROM_TO_BOHR: f64 = 1.0 / BOHR_TO_ANGSTROM;

// === Mass ===

/// Atomic mass unit to kilogram.
pub const AMU_TO_KG: f64 = 1.660_538_78e-27;
/// Kilogram to atomic mass unit.
pub const KG_TO_AMU: f64 = 1.0 / AMU_TO_KG;

// === Force ===

/// Hartree/bohr to newton.
pub const HARTREE_PER_BOHR_TO_NEWTON: f64 = 8.238_723_498_3e-8;
/// Newton to hartree/bohr.
pub const NEWTON_TO_HARTREE_PER_BOHR: f64 = 1.0 / HARTREE_PER_BOHR_TO_NEWTON;

/// Newton to dyne.
pub const NEWTON_TO_DYNE: f64 = 1.0e5;
/// Dyne to newton.
pub const DYNE_TO_NEWTON: f64 = 1.0 / NEWTON_TO_DYNE;

/// Millidyne to newton.
pub const MILLIDYNE_TO_NEWTON: f64 = 1.0e-3 * DYNE_TO_NEWTON;
/// Newton to millidyne.
pub const NEWTON_TO_MILLIDYNE: f64 = 1.0 / MILLIDYNE_TO_NEWTON;

// === Force constants ===

/// Millidyne/angstrom to newton/meter: 1e-8 N per 1e-10 m.
pub const MDYNE_PER_ANGSTROM_TO_NEWTON_PER_METER: f64 = 100.0;
/// Newton/meter to millidyne/angstrom.
pub const NEWTON_PER_METER_TO_MDYNE_PER_ANGSTROM: f64 =
    1.0 / MDYNE_PER_ANGSTROM_TO_NEWTON_PER_METER;

// === Time ===

/// Second to femtosecond.
pub const SECOND_TO_FEMTOSECOND: f64 = 1.0e15;
/// Femtosecond to second.
pub const FEMTOSECOND_TO_SECOND: f64 = 1.0 / SECOND_TO_FEMTOSECOND;

// === Energy ===

/// Thermochemical calorie to joule.
pub const CALORIE_TO_JOULE: f64 = 4.184;

/// Joule (per particle) to kcal/mol.
pub const JOULE_TO_KCAL_PER_MOLE: f64 = 1.0e-3 / CALORIE_TO_JOULE * AVOGADRO;
/// kcal/mol to joule (per particle).
pub const KCAL_PER_MOLE_TO_JOULE: f64 = 1.0 / JOULE_TO_KCAL_PER_MOLE;

/// Joule to millidyne*angstrom: 1e3 mdyne/N * 1e5 dyne/N * 1e10 A/m.
pub const JOULE_TO_MILLIDYNE_ANGSTROM: f64 = 1.0e18;
/// Millidyne*angstrom to joule.
pub const MILLIDYNE_ANGSTROM_TO_JOULE: f64 = 1.0 / JOULE_TO_MILLIDYNE_ANGSTROM;

/// Hartree to joule (CODATA 2018).
pub const HARTREE_TO_JOULE: f64 = 4.359_744_722_207_185e-18;
/// Joule to hartree.
pub const JOULE_TO_HARTREE: f64 = 1.0 / HARTREE_TO_JOULE;

// === Sampler working units ===

/// Millidyne*angstrom to gram*angstrom^2/s^2 (the sampler's kinetic-energy
/// working unit): 1e-3 (milli) * 1e-2 (centi) * 1e10 (meter to angstrom).
pub const MILLIDYNE_ANGSTROM_TO_GRAM_ANGSTROM2_PER_S2: f64 = 1.0e5;

/// Converts 1/2 * m[amu] * v^2[(A/s)^2] into kcal/mol.
pub const KINETIC_ENERGY_TO_KCAL_PER_MOLE: f64 =
    AMU_TO_KG * ANGSTROM_TO_METER * ANGSTROM_TO_METER * JOULE_TO_KCAL_PER_MOLE;
