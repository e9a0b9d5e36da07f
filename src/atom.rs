//! Atomic data: element identity plus isotope mass.
//!
//! An [`Atom`] pairs an element with a concrete isotopic mass. The special
//! symbols `D` and `T` (deuterium, tritium) are accepted and preserved for
//! output, but resolve to hydrogen for all table lookups.

use crate::element::Element;
use crate::error::{BomdError, Result};
use crate::isotope_data::isotope_mass;

/// A single atom in the simulated molecule.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    symbol: String,
    atomic_number: u8,
    mass_number: i32,
    mass: f64,
}

/// Canonicalize an element symbol: first letter uppercase, rest lowercase.
fn title_case(symbol: &str) -> String {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Resolve a canonicalized symbol, treating D and T as hydrogen isotopes.
///
/// Returns the element plus an override (mass number, mass) for D/T.
fn resolve_symbol(symbol: &str) -> Option<(Element, Option<(i32, f64)>)> {
    match symbol {
        "D" => Some((Element::H, Some((2, 2.01410177812)))),
        "T" => Some((Element::H, Some((3, 3.0160492779)))),
        _ => Element::from_symbol(symbol).map(|elem| (elem, None)),
    }
}

impl Atom {
    /// Construct an atom from its symbol using the most abundant isotope.
    ///
    /// Symbols are case-insensitive on input and stored title-cased.
    pub fn from_symbol(symbol: &str) -> Result<Self> {
        let titled = title_case(symbol);
        let (element, isotope) = resolve_symbol(&titled)
            .ok_or_else(|| BomdError::UnknownElement(symbol.to_string()))?;
        let (mass_number, mass) = isotope
            .unwrap_or_else(|| (element.default_mass_number(), element.default_mass()));
        Ok(Self {
            symbol: titled,
            atomic_number: element.atomic_number(),
            mass_number,
            mass,
        })
    }

    /// Construct an atom from its atomic number using the most abundant isotope.
    pub fn from_atomic_number(atomic_number: u8) -> Result<Self> {
        let element = Element::from_atomic_number(atomic_number)
            .ok_or_else(|| BomdError::UnknownElement(format!("Z = {atomic_number}")))?;
        Ok(Self {
            symbol: element.symbol().to_string(),
            atomic_number,
            mass_number: element.default_mass_number(),
            mass: element.default_mass(),
        })
    }

    /// Construct an atom from a symbol and a mass number.
    ///
    /// If the requested isotope is not tabulated, the element's default
    /// isotope is used instead (including its mass number, not the requested
    /// one). This fallback is a success, not an error.
    pub fn from_symbol_and_mass_number(symbol: &str, mass_number: i32) -> Result<Self> {
        let mut atom = Self::from_symbol(symbol)?;
        if let Some(mass) = atom.lookup_isotope(mass_number) {
            atom.mass_number = mass_number;
            atom.mass = mass;
        }
        Ok(atom)
    }

    /// Change the atom's mass from a textual specification.
    ///
    /// A value containing a decimal point sets the mass directly and derives
    /// the mass number by rounding. A value without a decimal point is
    /// interpreted as a mass number: the tabulated isotope mass is used if
    /// known, otherwise the mass number itself becomes the mass.
    pub fn change_mass(&mut self, spec: &str) -> Result<()> {
        let spec = spec.trim();
        if spec.contains('.') {
            let mass: f64 = spec.parse().map_err(|_| {
                BomdError::input(format!("Could not interpret mass '{spec}'."))
            })?;
            self.mass = mass;
            self.mass_number = mass.round() as i32;
        } else {
            let mass_number: i32 = spec.parse().map_err(|_| {
                BomdError::input(format!("Could not interpret mass number '{spec}'."))
            })?;
            self.mass_number = mass_number;
            self.mass = self
                .lookup_isotope(mass_number)
                .unwrap_or(mass_number as f64);
        }
        Ok(())
    }

    /// Isotope table lookup, resolving D/T to hydrogen.
    fn lookup_isotope(&self, mass_number: i32) -> Option<f64> {
        Element::from_atomic_number(self.atomic_number)
            .and_then(|elem| isotope_mass(elem, mass_number))
    }

    /// Chemical symbol, title-cased (`D` and `T` preserved as written).
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Number of protons in the nucleus.
    pub fn atomic_number(&self) -> u8 {
        self.atomic_number
    }

    /// Mass number of the isotope (-1 when unspecified).
    pub fn mass_number(&self) -> i32 {
        self.mass_number
    }

    /// Isotopic mass in amu.
    pub fn mass(&self) -> f64 {
        self.mass
    }
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<2} {:11.7} amu", self.symbol, self.mass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_symbol_case_insensitive() {
        let a = Atom::from_symbol("he").unwrap();
        let b = Atom::from_symbol("HE").unwrap();
        let c = Atom::from_symbol("He").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.symbol(), "He");
        assert_eq!(a.atomic_number(), 2);
        assert_eq!(a.mass_number(), 4);
    }

    #[test]
    fn test_unknown_symbol() {
        assert!(matches!(
            Atom::from_symbol("Xx"),
            Err(BomdError::UnknownElement(_))
        ));
        assert!(Atom::from_atomic_number(0).is_err());
        assert!(Atom::from_atomic_number(119).is_err());
    }

    #[test]
    fn test_deuterium_and_tritium() {
        let d = Atom::from_symbol("D").unwrap();
        assert_eq!(d.symbol(), "D");
        assert_eq!(d.atomic_number(), 1);
        assert_eq!(d.mass_number(), 2);
        assert!((d.mass() - 2.01410177812).abs() < 1e-10);

        let t = Atom::from_symbol("t").unwrap();
        assert_eq!(t.symbol(), "T");
        assert_eq!(t.mass_number(), 3);
    }

    #[test]
    fn test_from_symbol_and_mass_number() {
        let c13 = Atom::from_symbol_and_mass_number("C", 13).unwrap();
        assert_eq!(c13.mass_number(), 13);
        assert!((c13.mass() - 13.00335483507).abs() < 1e-10);

        // Unknown isotope falls back to the default isotope wholesale.
        let c99 = Atom::from_symbol_and_mass_number("C", 99).unwrap();
        assert_eq!(c99.mass_number(), 12);
        assert!((c99.mass() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_change_mass_decimal_sets_mass_directly() {
        let mut atom = Atom::from_symbol("H").unwrap();
        atom.change_mass("2.014").unwrap();
        assert!((atom.mass() - 2.014).abs() < 1e-12);
        assert_eq!(atom.mass_number(), 2);
    }

    #[test]
    fn test_change_mass_integer_looks_up_isotope() {
        let mut atom = Atom::from_symbol("C").unwrap();
        atom.change_mass("13").unwrap();
        assert_eq!(atom.mass_number(), 13);
        assert!((atom.mass() - 13.00335483507).abs() < 1e-10);

        // Unknown mass number falls back to the number itself as the mass.
        atom.change_mass("99").unwrap();
        assert_eq!(atom.mass_number(), 99);
        assert!((atom.mass() - 99.0).abs() < 1e-12);
    }

    #[test]
    fn test_change_mass_rejects_garbage() {
        let mut atom = Atom::from_symbol("C").unwrap();
        assert!(atom.change_mass("heavy").is_err());
        assert!(atom.change_mass("12.x").is_err());
    }
}
