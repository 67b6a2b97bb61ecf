use std::collections::HashMap;
use std::fmt;

use approx;
use nalgebra::Point3;
use num_traits::ToPrimitive;
use periodic_table;

/// A struct storing a look-up of element symbols to give atomic numbers
/// and atomic masses.
pub struct ElementMap<'a> {
    /// A [`HashMap`] from a symbol string to a tuple of atomic number and atomic
    /// mass.
    pub map: HashMap<&'a str, (u32, f64)>,
}

impl Default for ElementMap<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementMap<'static> {
    /// Creates a new [`ElementMap`] for all elements in the periodic table.
    #[must_use]
    pub fn new() -> ElementMap<'static> {
        let mut map = HashMap::new();
        let elements = periodic_table::periodic_table();
        for element in elements {
            let mass = parse_atomic_mass(element.atomic_mass);
            map.insert(element.symbol, (element.atomic_number, mass));
        }
        ElementMap { map }
    }
}

/// An auxiliary function that parses the atomic mass string in the format of
/// [`periodic_table`] to a single float value.
///
/// # Arguments
///
/// * `mass_str` - A string of mass value that is either `x.y(z)` where the
///     uncertain digit `z` is enclosed in parentheses, or `[x]` where `x`
///     is the mass number in place of precise experimental values.
///
/// # Returns
///
/// The numeric mass value.
fn parse_atomic_mass(mass_str: &str) -> f64 {
    let mass = mass_str.replace(&['(', ')', '[', ']'][..], "");
    mass.parse::<f64>()
        .unwrap_or_else(|_| panic!("Unable to parse atomic mass string {mass}."))
}

/// A struct representing an atom.
#[derive(Clone)]
pub struct Atom {
    /// The atomic number of the atom.
    pub atomic_number: u32,

    /// The atomic symbol of the atom.
    pub atomic_symbol: String,

    /// The weighted-average atomic mass for all naturally occurring isotopes.
    pub atomic_mass: f64,

    /// The fractional site occupancy. Fully occupied sites have occupancy one.
    pub occupancy: f64,

    /// The position of the atom.
    pub coordinates: Point3<f64>,

    /// A threshold for approximate equality comparisons.
    pub threshold: f64,
}

impl Atom {
    /// Parses an atom line in an `xyz` file to construct an [`Atom`].
    ///
    /// # Arguments
    ///
    /// * `line` - A line in an `xyz` file containing an atomic symbol and
    ///     three Cartesian coordinates.
    /// * `emap` - A hash map between atomic symbols and atomic numbers and
    ///     masses.
    /// * `thresh` - A threshold for approximate equality comparisons.
    ///
    /// # Returns
    ///
    /// The parsed [`Atom`] struct if the line has the correct format,
    /// otherwise [`None`].
    #[must_use]
    pub fn from_xyz(line: &str, emap: &ElementMap, thresh: f64) -> Option<Atom> {
        let split: Vec<&str> = line.split_whitespace().collect();
        if split.len() != 4 {
            return None;
        }
        let atomic_symbol = *split.first()?;
        let (atomic_number, atomic_mass) = emap.map.get(atomic_symbol)?;
        let x = split.get(1)?.parse::<f64>().ok()?;
        let y = split.get(2)?.parse::<f64>().ok()?;
        let z = split.get(3)?.parse::<f64>().ok()?;
        Some(Atom {
            atomic_number: *atomic_number,
            atomic_symbol: atomic_symbol.to_string(),
            atomic_mass: *atomic_mass,
            occupancy: 1.0,
            coordinates: Point3::new(x, y, z),
            threshold: thresh,
        })
    }

    /// Creates an atom of element `atomic_symbol` at `coordinates` with full
    /// occupancy.
    ///
    /// # Panics
    ///
    /// Panics when `atomic_symbol` is not a valid element symbol.
    #[must_use]
    pub fn new(
        atomic_symbol: &str,
        coordinates: Point3<f64>,
        emap: &ElementMap,
        thresh: f64,
    ) -> Atom {
        let (atomic_number, atomic_mass) = emap
            .map
            .get(atomic_symbol)
            .expect("Invalid atomic symbol encountered.");
        Atom {
            atomic_number: *atomic_number,
            atomic_symbol: atomic_symbol.to_string(),
            atomic_mass: *atomic_mass,
            occupancy: 1.0,
            coordinates,
            threshold: thresh,
        }
    }

    /// Returns this atom with the specified fractional occupancy.
    #[must_use]
    pub fn with_occupancy(mut self, occupancy: f64) -> Atom {
        self.occupancy = occupancy;
        self
    }

    /// Checks whether `other` is of the same species as this atom: same
    /// element and same fractional occupancy.
    #[must_use]
    pub fn same_species(&self, other: &Atom) -> bool {
        self.atomic_number == other.atomic_number
            && approx::relative_eq!(self.occupancy, other.occupancy)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self
            .threshold
            .log10()
            .abs()
            .round()
            .to_usize()
            .ok_or(fmt::Error)?
            + 1;
        let length = (precision + precision.div_euclid(2)).max(6);
        write!(
            f,
            "{:>9} {:>3} {:+length$.precision$} {:+length$.precision$} {:+length$.precision$}",
            "Atom",
            self.atomic_symbol,
            self.coordinates[0],
            self.coordinates[1],
            self.coordinates[2],
        )
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
