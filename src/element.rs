//! Chemical element definitions.
//!
//! This module provides the `Element` enum representing all 118 chemical
//! elements, along with the default-isotope data (mass number and isotopic
//! mass) used when no isotope is specified.

use serde::{Deserialize, Serialize};

/// All 118 chemical elements.
///
/// Elements are represented as an enum with the atomic number as the
/// discriminant. This allows for efficient storage and comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[allow(missing_docs)] // Variant names are the element symbols
#[rustfmt::skip]
pub enum Element {
    H = 1, He, Li, Be, B, C, N, O, F, Ne,
    Na, Mg, Al, Si, P, S, Cl, Ar, K, Ca,
    Sc, Ti, V, Cr, Mn, Fe, Co, Ni, Cu, Zn,
    Ga, Ge, As, Se, Br, Kr, Rb, Sr, Y, Zr,
    Nb, Mo, Tc, Ru, Rh, Pd, Ag, Cd, In, Sn,
    Sb, Te, I, Xe, Cs, Ba, La, Ce, Pr, Nd,
    Pm, Sm, Eu, Gd, Tb, Dy, Ho, Er, Tm, Yb,
    Lu, Hf, Ta, W, Re, Os, Ir, Pt, Au, Hg,
    Tl, Pb, Bi, Po, At, Rn, Fr, Ra, Ac, Th,
    Pa, U, Np, Pu, Am, Cm, Bk, Cf, Es, Fm,
    Md, No, Lr, Rf, Db, Sg, Bh, Hs, Mt, Ds,
    Rg, Cn, Nh, Fl, Mc, Lv, Ts, Og,
}

impl Element {
    /// All element symbols in atomic number order.
    const SYMBOLS: [&'static str; 118] = [
        "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S",
        "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga",
        "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd",
        "Ag", "Cd", "In", "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm",
        "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os",
        "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa",
        "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg",
        "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
    ];

    /// Mass number of the default isotope for each element.
    ///
    /// The default is the isotope with the largest natural abundance. For
    /// fully radioactive elements the listed isotope with the smallest mass
    /// was chosen; users should not rely on these defaults for such elements.
    ///
    /// Reference: Coursey, Schwab, Tsai, Dragoset, Atomic Weights and
    /// Isotopic Compositions (version 4.1), NIST, 2015.
    #[rustfmt::skip]
    const DEFAULT_MASS_NUMBERS: [u16; 118] = [
        1, 4, 7, 9, 11, 12, 14, 16, 19, 20, // H-Ne
        23, 24, 27, 28, 31, 32, 35, 40, 39, 40, // Na-Ca
        45, 48, 51, 52, 55, 56, 59, 58, 63, 64, // Sc-Zn
        69, 74, 75, 80, 79, 84, 85, 88, 89, 90, // Ga-Zr
        93, 98, 98, 101, 103, 106, 107, 114, 115, 120, // Nb-Sn
        121, 130, 127, 132, 133, 138, 139, 140, 141, 142, // Sb-Nd
        145, 152, 153, 158, 159, 164, 165, 166, 169, 174, // Pm-Yb
        175, 180, 181, 184, 187, 192, 193, 195, 197, 202, // Lu-Hg
        205, 208, 209, 209, 210, 222, 223, 226, 227, 232, // Tl-Th
        231, 238, 237, 244, 243, 247, 247, 251, 252, 257, // Pa-Fm
        258, 259, 262, 267, 268, 271, 272, 270, 276, 281, // Md-Ds
        280, 285, 284, 289, 288, 293, 292, 294, // Rg-Og
    ];

    /// Isotopic mass of the default isotope in amu, same ordering as above.
    #[rustfmt::skip]
    const DEFAULT_MASSES: [f64; 118] = [
        1.00782503223, 4.00260325413, 7.0160034366, 9.012183065, 11.00930536,
        12.0000000, 14.00307400443, 15.99491461957, 18.99840316273, 19.9924401762,
        22.9897692820, 23.985041697, 26.98153853, 27.97692653465, 30.97376199842,
        31.9720711744, 34.968852682, 39.9623831237, 38.9637064864, 39.9625906,
        44.9559083, 47.9479409, 50.9439570, 51.9405062, 54.9380439,
        55.9349363, 58.9331943, 57.9353424, 62.9295977, 63.9291420,
        68.9255735, 73.9211774, 74.9215945, 79.9165196, 78.9183361,
        83.911507, 84.911789, 87.905612, 88.905848, 89.904704,
        92.906378, 97.905408, 97.907216, 100.905582, 102.905504,
        105.903486, 106.905097, 113.903358, 114.903879, 119.902202,
        120.903816, 129.906224, 126.904473, 131.904155, 132.905452,
        137.905247, 138.906353, 139.905439, 140.907653, 141.907723,
        144.912749, 151.919732, 152.921230, 157.924104, 158.925347,
        163.929175, 164.930322, 165.930293, 168.934213, 173.938862,
        174.940771, 179.946550, 180.947996, 183.950933, 186.955751,
        191.961479, 192.962924, 194.964774, 196.966569, 201.970643,
        204.974428, 207.976652, 208.980399, 208.982430, 209.987148,
        222.017578, 223.019736, 226.025410, 227.027747, 232.038055,
        231.035882, 238.050786, 237.048173, 244.064204, 243.061381,
        247.070353, 247.070307, 251.079587, 252.082980, 257.095105,
        258.098431, 259.101030, 262.109610, 267.121790, 268.125670,
        271.133930, 272.138260, 270.134290, 276.151590, 281.164510,
        280.165140, 285.177120, 284.178730, 289.190420, 288.192740,
        293.204490, 292.207460, 294.213920,
    ];

    /// Create an element from its symbol string (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use bomd::element::Element;
    ///
    /// assert_eq!(Element::from_symbol("Fe"), Some(Element::Fe));
    /// assert_eq!(Element::from_symbol("fe"), Some(Element::Fe));
    /// assert_eq!(Element::from_symbol("Xx"), None);
    /// ```
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let symbol_lower = symbol.to_lowercase();
        Self::SYMBOLS
            .iter()
            .position(|s| s.to_lowercase() == symbol_lower)
            .and_then(|idx| Self::from_atomic_number((idx + 1) as u8))
    }

    /// Create an element from its atomic number (1-118).
    pub fn from_atomic_number(z: u8) -> Option<Self> {
        if z == 0 || z > 118 {
            return None;
        }
        // SAFETY: z is in range 1-118 which matches our enum discriminants
        Some(unsafe { std::mem::transmute::<u8, Element>(z) })
    }

    /// Get the element symbol.
    pub fn symbol(&self) -> &'static str {
        Self::SYMBOLS[self.atomic_number() as usize - 1]
    }

    /// Get the atomic number (1-118).
    pub fn atomic_number(&self) -> u8 {
        *self as u8
    }

    /// Mass number of the most abundant isotope.
    pub fn default_mass_number(&self) -> i32 {
        Self::DEFAULT_MASS_NUMBERS[self.atomic_number() as usize - 1] as i32
    }

    /// Isotopic mass of the most abundant isotope in amu.
    pub fn default_mass(&self) -> f64 {
        Self::DEFAULT_MASSES[self.atomic_number() as usize - 1]
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
