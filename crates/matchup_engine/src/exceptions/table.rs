//! Exception table: raw records and their typed application strategies.
//!
//! The document is an ordered array; array position is the record's id.
//! Raw records carry the loosely-typed flags of the data layer
//! (`after`/`group`/`replace`); loading resolves them into a closed
//! [`Strategy`] set so the engine can match exhaustively instead of
//! branching on flag combinations.

use std::collections::HashMap;

use serde::Deserialize;

use crate::loader::LoadError;
use crate::mult::Mult;
use crate::types::{Type, TYPE_COUNT};

use super::{ExceptionId, EXCEPTION_COUNT};

/// Raw exceptions document as shipped in `data/`.
#[derive(Debug, Deserialize)]
pub struct ExceptionsDoc {
    pub entries: Vec<RawException>,
}

/// One raw record. Field meanings follow the data layer's schema:
/// `move_type` marks move-derived records and names the move's source type,
/// `aux_type` the extra type granted by a dual-type move, and
/// `after`/`group`/`replace`/`mult` select the application strategy.
#[derive(Debug, Deserialize)]
pub struct RawException {
    pub name: String,
    #[serde(default)]
    pub move_type: Option<String>,
    #[serde(default)]
    pub aux_type: Option<String>,
    #[serde(default)]
    pub after: bool,
    #[serde(default)]
    pub group: bool,
    #[serde(default)]
    pub replace: bool,
    #[serde(default = "default_mult")]
    pub mult: Mult,
    #[serde(default)]
    pub targets: Option<RawTargets>,
}

fn default_mult() -> Mult {
    Mult::ONE
}

/// Raw target spec. `pairs` maps an input type name to the opposing type
/// names it affects (`"*"` expands to every type); `any` is keyed by
/// opposing type only and carries a per-target effect.
#[derive(Debug, Default, Deserialize)]
pub struct RawTargets {
    #[serde(default)]
    pub pairs: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub any: HashMap<String, RawEffect>,
}

#[derive(Debug, Deserialize)]
pub struct RawEffect {
    pub mult: Mult,
    #[serde(default)]
    pub replace: bool,
}

/// How a matched multiplier combines with the running row total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairEffect {
    pub mult: Mult,
    pub replace: bool,
}

impl PairEffect {
    /// Apply this effect to a running total.
    pub fn apply(self, total: Mult) -> Mult {
        if self.replace {
            self.mult
        } else {
            total.chain(self.mult)
        }
    }
}

/// Closed set of exception application strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// No multiplier effect (placeholder records and type-granting moves).
    Inert,
    /// Applied during per-input accumulation.
    Immediate {
        /// Specific `(input, opposing)` pairs, all sharing `effect`.
        pairs: Vec<(Type, Type)>,
        /// Entry-level effect for the specific pairs.
        effect: PairEffect,
        /// Opposing-type-only targets (defense mode), each with its own effect.
        any: Vec<(Type, PairEffect)>,
    },
    /// Applied once per output row after accumulation; multiplies into the
    /// total, or replaces it outright when `replace` (Filter, Tinted Lens,
    /// Wonder Guard).
    DeferredScale { mult: Mult, replace: bool },
    /// Applied once per output row after accumulation; replaces the total
    /// only when it is nonzero; an immunity is never overridden
    /// (Tera Shell).
    DeferredNonzeroReplace { mult: Mult },
}

/// A typed exception record.
#[derive(Debug, Clone)]
pub struct ExceptionEntry {
    pub id: ExceptionId,
    pub strategy: Strategy,
    /// Source type for move-derived records.
    pub move_type: Option<Type>,
    /// Extra type granted by a dual-type move (flying-press only).
    pub aux_type: Option<Type>,
}

impl ExceptionEntry {
    pub fn is_move(&self) -> bool {
        self.move_type.is_some()
    }
}

/// The full, immutable exception rule set.
#[derive(Debug)]
pub struct ExceptionTable {
    entries: Vec<ExceptionEntry>,
    /// Reverse lookup: a move-derived record's source type -> its id.
    move_by_type: HashMap<Type, ExceptionId>,
}

impl ExceptionTable {
    /// Validate and build the table from a raw document.
    ///
    /// Record order must match the id registry exactly, and every type name
    /// must resolve; silent substitution would mean silently wrong
    /// multipliers downstream.
    pub fn from_doc(doc: ExceptionsDoc) -> Result<ExceptionTable, LoadError> {
        if doc.entries.len() != EXCEPTION_COUNT {
            return Err(LoadError::Shape(format!(
                "exception table has {} records, expected {EXCEPTION_COUNT}",
                doc.entries.len()
            )));
        }
        let mut entries = Vec::with_capacity(EXCEPTION_COUNT);
        let mut move_by_type = HashMap::new();
        for (index, raw) in doc.entries.into_iter().enumerate() {
            let id = ExceptionId::from_index(index)
                .expect("index bounded by EXCEPTION_COUNT");
            if id.name() != raw.name {
                return Err(LoadError::Shape(format!(
                    "exception record {index} is named {:?}, expected {:?}",
                    raw.name,
                    id.name()
                )));
            }
            let entry = typed_entry(id, raw)?;
            if let Some(ty) = entry.move_type {
                move_by_type.insert(ty, id);
            }
            entries.push(entry);
        }
        Ok(ExceptionTable {
            entries,
            move_by_type,
        })
    }

    pub fn entry(&self, id: ExceptionId) -> &ExceptionEntry {
        &self.entries[id.index()]
    }

    /// Source type of a move-derived record.
    pub fn move_type(&self, id: ExceptionId) -> Option<Type> {
        self.entry(id).move_type
    }

    /// Extra type granted by a dual-type move record.
    pub fn aux_type(&self, id: ExceptionId) -> Option<Type> {
        self.entry(id).aux_type
    }

    /// The move-derived record associated with a type, if any.
    pub fn move_for_type(&self, ty: Type) -> Option<ExceptionId> {
        self.move_by_type.get(&ty).copied()
    }
}

fn resolve_type(name: &str) -> Result<Type, LoadError> {
    Type::from_name(name)
        .ok_or_else(|| LoadError::Shape(format!("unknown type name {name:?} in exception table")))
}

fn typed_entry(id: ExceptionId, raw: RawException) -> Result<ExceptionEntry, LoadError> {
    let move_type = raw.move_type.as_deref().map(resolve_type).transpose()?;
    let aux_type = raw.aux_type.as_deref().map(resolve_type).transpose()?;

    let strategy = if raw.after {
        if raw.group {
            Strategy::DeferredScale {
                mult: raw.mult,
                replace: raw.replace,
            }
        } else {
            Strategy::DeferredNonzeroReplace { mult: raw.mult }
        }
    } else {
        match raw.targets {
            None => Strategy::Inert,
            Some(targets) if targets.pairs.is_empty() && targets.any.is_empty() => Strategy::Inert,
            Some(targets) => {
                let mut pairs = Vec::new();
                for (input, opposing) in &targets.pairs {
                    let input = resolve_type(input)?;
                    for out in opposing {
                        if out == "*" {
                            for index in 0..TYPE_COUNT {
                                let out = Type::from_index(index)
                                    .expect("index bounded by TYPE_COUNT");
                                pairs.push((input, out));
                            }
                        } else {
                            pairs.push((input, resolve_type(out)?));
                        }
                    }
                }
                let mut any = Vec::new();
                for (out, effect) in &targets.any {
                    any.push((
                        resolve_type(out)?,
                        PairEffect {
                            mult: effect.mult,
                            replace: effect.replace,
                        },
                    ));
                }
                // Deterministic iteration regardless of HashMap order.
                pairs.sort();
                any.sort_by_key(|(ty, _)| *ty);
                Strategy::Immediate {
                    pairs,
                    effect: PairEffect {
                        mult: raw.mult,
                        replace: raw.replace,
                    },
                    any,
                }
            }
        }
    };

    Ok(ExceptionEntry {
        id,
        strategy,
        move_type,
        aux_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{BundledSource, DataSource};

    fn bundled_table() -> ExceptionTable {
        let json = BundledSource.fetch_exceptions().unwrap();
        let doc: ExceptionsDoc = serde_json::from_str(&json).unwrap();
        ExceptionTable::from_doc(doc).unwrap()
    }

    #[test]
    fn bundled_table_loads_and_orders_match() {
        let table = bundled_table();
        assert_eq!(table.entry(ExceptionId::FreezeDry).id, ExceptionId::FreezeDry);
        assert_eq!(table.move_type(ExceptionId::FreezeDry), Some(Type::Ice));
        assert_eq!(table.move_type(ExceptionId::FlyingPress), Some(Type::Fighting));
        assert_eq!(table.aux_type(ExceptionId::FlyingPress), Some(Type::Flying));
        assert_eq!(table.move_for_type(Type::Grass), Some(ExceptionId::ForestsCurse));
        assert_eq!(table.move_for_type(Type::Ghost), Some(ExceptionId::TrickOrTreat));
        assert_eq!(table.move_for_type(Type::Water), None);
    }

    #[test]
    fn strategies_resolve_from_flags() {
        let table = bundled_table();
        assert!(matches!(
            table.entry(ExceptionId::Filter).strategy,
            Strategy::DeferredScale { replace: false, .. }
        ));
        assert!(matches!(
            table.entry(ExceptionId::WonderGuard).strategy,
            Strategy::DeferredScale { replace: true, .. }
        ));
        assert!(matches!(
            table.entry(ExceptionId::TeraShell).strategy,
            Strategy::DeferredNonzeroReplace { .. }
        ));
        assert!(matches!(
            table.entry(ExceptionId::ForestsCurse).strategy,
            Strategy::Inert
        ));
        match &table.entry(ExceptionId::FreezeDry).strategy {
            Strategy::Immediate { pairs, effect, any } => {
                assert_eq!(pairs.as_slice(), &[(Type::Ice, Type::Water)]);
                assert_eq!(effect.mult, Mult::DOUBLE);
                assert!(effect.replace);
                assert!(any.is_empty());
            }
            other => panic!("freeze-dry should be immediate, got {other:?}"),
        }
        match &table.entry(ExceptionId::DrySkin).strategy {
            Strategy::Immediate { pairs, any, .. } => {
                assert!(pairs.is_empty());
                assert_eq!(any.len(), 2);
                let fire = any.iter().find(|(ty, _)| *ty == Type::Fire).unwrap();
                assert!(!fire.1.replace);
                let water = any.iter().find(|(ty, _)| *ty == Type::Water).unwrap();
                assert!(water.1.replace);
                assert_eq!(water.1.mult, Mult::ZERO);
            }
            other => panic!("dry-skin should be immediate, got {other:?}"),
        }
    }

    #[test]
    fn wildcard_pairs_expand_to_every_type() {
        let table = bundled_table();
        match &table.entry(ExceptionId::FlashFireAtk).strategy {
            Strategy::Immediate { pairs, effect, .. } => {
                assert_eq!(pairs.len(), TYPE_COUNT);
                assert!(pairs.iter().all(|(input, _)| *input == Type::Fire));
                assert_eq!(effect.mult, Mult::from_f64(1.5));
                assert!(!effect.replace);
            }
            other => panic!("flash-fire-atk should be immediate, got {other:?}"),
        }
    }

    #[test]
    fn record_order_mismatch_is_rejected() {
        let json = BundledSource.fetch_exceptions().unwrap();
        let mut doc: ExceptionsDoc = serde_json::from_str(&json).unwrap();
        doc.entries.swap(0, 1);
        assert!(matches!(
            ExceptionTable::from_doc(doc),
            Err(LoadError::Shape(_))
        ));
    }
}
