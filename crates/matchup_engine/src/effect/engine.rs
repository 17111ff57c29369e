//! The effectiveness engine.
//!
//! For a set of input types, a mode, a generation, and the active
//! exceptions, computes the multiplier against every opposing type in the
//! generation and groups the results by value. Deterministic, no I/O;
//! precondition violations are programming errors and panic.

use std::collections::HashMap;

use crate::chart::TypeChart;
use crate::exceptions::{ExceptionSet, ExceptionTable, PairEffect, Strategy};
use crate::mult::Mult;
use crate::types::{Generation, Mode, Type, TypeSet};

use super::groups::{EffectGroups, Label};
use super::order_index::MultOrderIndex;

/// Lookup built from the active, non-deferred exception entries.
struct ActiveRules<'a> {
    /// Specific `(input, opposing)` pair overrides.
    pair: HashMap<(Type, Type), PairEffect>,
    /// Opposing-type-only overrides (defense mode).
    any: HashMap<Type, PairEffect>,
    /// Deferred entries, applied once per output row after accumulation.
    deferred: Vec<&'a Strategy>,
}

impl<'a> ActiveRules<'a> {
    fn build(active: &ExceptionSet, table: &'a ExceptionTable) -> Self {
        let mut rules = ActiveRules {
            pair: HashMap::new(),
            any: HashMap::new(),
            deferred: Vec::new(),
        };
        for id in active.iter() {
            let strategy = &table.entry(id).strategy;
            match strategy {
                Strategy::Inert => {}
                Strategy::Immediate { pairs, effect, any } => {
                    for (input, opposing) in pairs {
                        rules.pair.insert((*input, *opposing), *effect);
                    }
                    for (opposing, effect) in any {
                        rules.any.insert(*opposing, *effect);
                    }
                }
                Strategy::DeferredScale { .. } | Strategy::DeferredNonzeroReplace { .. } => {
                    rules.deferred.push(strategy);
                }
            }
        }
        rules
    }
}

/// Compute the full effectiveness grouping for the current selection.
///
/// Offense reads `chart[input][opposing]`; defense reads the transpose.
/// Newly seen multiplier values are registered in `order` as groups are
/// created.
///
/// # Panics
///
/// Panics if `active` is empty, if the chart was loaded for a different
/// generation, or if an active input type does not exist in `generation`;
/// all of these are caller bugs, per the fail-fast contract.
pub fn compute_effectiveness(
    active: TypeSet,
    mode: Mode,
    generation: Generation,
    exceptions: &ExceptionSet,
    chart: &TypeChart,
    table: &ExceptionTable,
    order: &mut MultOrderIndex,
) -> EffectGroups {
    assert!(!active.is_empty(), "no active input types");
    assert_eq!(
        chart.generation(),
        generation,
        "chart generation does not match the requested generation"
    );
    let count = generation.type_count();
    for input in active.types() {
        assert!(
            input.index() < count,
            "input type {input} is not valid in generation {generation}"
        );
    }

    let rules = ActiveRules::build(exceptions, table);
    let stellar_input = active.contains_type(Type::Stellar);
    let mut groups = EffectGroups::new();

    for out_index in 0..count {
        let opposing = Type::from_index(out_index).expect("index bounded by type_count");
        let mut total = Mult::ONE;

        for input in active.types() {
            let base = match mode {
                Mode::Offense => chart.offense(input, opposing),
                Mode::Defense => chart.defense(input, opposing),
            };
            total = total.chain(base);

            // Specific pair override first, then the opposing-type-only
            // override layered on top (defense only). The ordering is
            // load-bearing observed behavior.
            if let Some(effect) = rules.pair.get(&(input, opposing)) {
                total = effect.apply(total);
            }
            if mode == Mode::Defense {
                if let Some(effect) = rules.any.get(&opposing) {
                    total = effect.apply(total);
                }
            }
        }

        for strategy in &rules.deferred {
            total = match strategy {
                Strategy::DeferredScale { mult, replace } => {
                    if *replace {
                        *mult
                    } else {
                        total.chain(*mult)
                    }
                }
                Strategy::DeferredNonzeroReplace { mult } => {
                    // An immunity stays an immunity.
                    if total.is_zero() {
                        total
                    } else {
                        *mult
                    }
                }
                Strategy::Inert | Strategy::Immediate { .. } => {
                    unreachable!("only deferred strategies are collected")
                }
            };
        }

        let label = if opposing == Type::Stellar {
            match (mode, stellar_input) {
                // The stellar row renders as the "Tera Pokémon" slot when
                // a stellar input is attacking.
                (Mode::Offense, true) => Some(Label::TeraPokemon),
                // Without a stellar input the row has no offensive meaning.
                (Mode::Offense, false) => None,
                // On defense the row is the Tera Pokémon defensive slot and
                // keeps its ordinary label.
                (Mode::Defense, _) => Some(Label::Type(opposing)),
            }
        } else {
            Some(Label::Type(opposing))
        };

        if let Some(label) = label {
            groups.insert(total, label, order);
        }
    }

    groups
}
