//! Atomic identity types for emission lines.

use serde::{Deserialize, Serialize};

/// A chemical element or isotope.
///
/// Only the properties the line-shape models consume are carried: the symbol
/// (used as a lookup key for fitted parameter tables), the atomic number and
/// the atomic weight in amu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Symbol, e.g. "H", "D", "He"
    pub symbol: String,
    /// Atomic number
    pub atomic_number: u32,
    /// Atomic weight (amu)
    pub atomic_weight: f64,
}

impl Element {
    /// Create an element from its symbol, atomic number and weight.
    pub fn new(symbol: impl Into<String>, atomic_number: u32, atomic_weight: f64) -> Self {
        Self {
            symbol: symbol.into(),
            atomic_number,
            atomic_weight,
        }
    }

    /// Protium.
    pub fn hydrogen() -> Self {
        Self::new("H", 1, 1.00794)
    }

    /// Deuterium.
    pub fn deuterium() -> Self {
        Self::new("D", 1, 2.014_101_778_1)
    }

    /// Tritium.
    pub fn tritium() -> Self {
        Self::new("T", 1, 3.016_049_281)
    }

    /// Helium-3.
    pub fn helium3() -> Self {
        Self::new("He3", 2, 3.016_029_322)
    }

    /// Helium-4.
    pub fn helium() -> Self {
        Self::new("He", 2, 4.002_602)
    }

    /// Carbon.
    pub fn carbon() -> Self {
        Self::new("C", 6, 12.0107)
    }

    /// True for hydrogen and its isotopes.
    pub fn is_hydrogenic(&self) -> bool {
        self.atomic_number == 1
    }
}

/// An atomic/ionic emission transition.
///
/// Identifies the emitting species (element plus ionisation charge) and the
/// transition by its (upper, lower) principal quantum numbers. Immutable;
/// the rest wavelength is supplied separately to the model constructors by
/// the atomic-data layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Emitting element or isotope
    pub element: Element,
    /// Ionisation charge of the emitter
    pub charge: i32,
    /// (upper, lower) principal quantum numbers
    pub transition: (u32, u32),
}

impl Line {
    /// Create a new line descriptor.
    pub fn new(element: Element, charge: i32, transition: (u32, u32)) -> Self {
        Self {
            element,
            charge,
            transition,
        }
    }
}
