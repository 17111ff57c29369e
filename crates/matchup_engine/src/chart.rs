//! Per-generation type effectiveness matrix.
//!
//! One immutable square matrix per generation,
//! `cells[attacker][defender] -> Mult`. Defense reads are the transpose
//! traversal of the same matrix; there is no second table.

use serde::Deserialize;

use crate::loader::LoadError;
use crate::mult::Mult;
use crate::types::{Generation, Type};

/// Raw chart document as shipped in `data/`.
#[derive(Debug, Deserialize)]
pub struct ChartDoc {
    pub generation: String,
    pub multipliers: Vec<Vec<Mult>>,
}

/// An immutable effectiveness matrix for one generation.
#[derive(Debug, Clone)]
pub struct TypeChart {
    generation: Generation,
    cells: Vec<Vec<Mult>>,
}

impl TypeChart {
    /// Validate and build a chart from a raw document.
    ///
    /// The matrix must be exactly `type_count x type_count` for the
    /// document's generation; anything else is a configuration error.
    pub fn from_doc(doc: ChartDoc) -> Result<TypeChart, LoadError> {
        let generation = Generation::from_label(&doc.generation)
            .ok_or_else(|| LoadError::Shape(format!("unknown generation label {:?}", doc.generation)))?;
        let n = generation.type_count();
        if doc.multipliers.len() != n {
            return Err(LoadError::Shape(format!(
                "generation {generation} chart has {} rows, expected {n}",
                doc.multipliers.len()
            )));
        }
        for (i, row) in doc.multipliers.iter().enumerate() {
            if row.len() != n {
                return Err(LoadError::Shape(format!(
                    "generation {generation} chart row {i} has {} columns, expected {n}",
                    row.len()
                )));
            }
        }
        Ok(TypeChart {
            generation,
            cells: doc.multipliers,
        })
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Base multiplier for `attacker` hitting `defender`.
    ///
    /// Panics if either index is outside this generation's range; callers
    /// are responsible for generation gating.
    pub fn offense(&self, attacker: Type, defender: Type) -> Mult {
        self.cells[attacker.index()][defender.index()]
    }

    /// Base multiplier for `defender` being hit by `attacker`.
    /// Transpose read of [`TypeChart::offense`].
    pub fn defense(&self, defender: Type, attacker: Type) -> Mult {
        self.cells[attacker.index()][defender.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_doc(generation: &str, n: usize) -> ChartDoc {
        ChartDoc {
            generation: generation.to_string(),
            multipliers: vec![vec![Mult::ONE; n]; n],
        }
    }

    #[test]
    fn rejects_unknown_generation() {
        let err = TypeChart::from_doc(tiny_doc("3-4", 15)).unwrap_err();
        assert!(matches!(err, LoadError::Shape(_)));
    }

    #[test]
    fn rejects_wrong_dimensions() {
        assert!(TypeChart::from_doc(tiny_doc("1", 14)).is_err());
        let mut doc = tiny_doc("1", 15);
        doc.multipliers[3].pop();
        assert!(TypeChart::from_doc(doc).is_err());
    }

    #[test]
    fn defense_is_transpose_of_offense() {
        let mut doc = tiny_doc("1", 15);
        doc.multipliers[Type::Fire.index()][Type::Grass.index()] = Mult::DOUBLE;
        let chart = TypeChart::from_doc(doc).unwrap();
        assert_eq!(chart.offense(Type::Fire, Type::Grass), Mult::DOUBLE);
        assert_eq!(chart.defense(Type::Grass, Type::Fire), Mult::DOUBLE);
        assert_eq!(chart.defense(Type::Fire, Type::Grass), Mult::ONE);
    }
}
