//! Selection state machine for one offense/defense browsing session.
//!
//! All session state lives in an explicit [`SelectionSession`] context:
//! active types with their primary/secondary roles, active exceptions, the
//! move/ability/Tera locks, and the enable/disable bookkeeping for every
//! control. The enable/disable state is the only guard against invalid
//! transitions (disabled controls are not clickable), so it is first-class
//! state here and tested as such.
//!
//! A session is scoped to one mode/generation pair; switching either
//! discards the session along with its order index and render cache.

use std::collections::HashSet;

use tracing::debug;

use crate::chart::TypeChart;
use crate::effect::{compute_effectiveness, EffectGroups, Label, MultOrderIndex, RenderCache};
use crate::exceptions::{ExceptionId, ExceptionSet, ExceptionTable};
use crate::mult::Mult;
use crate::types::{Generation, Mode, Type, TypeSet};


/// One user interaction, tagged by its source control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// A primary type button.
    Primary(Type),
    /// A secondary type button (defense only).
    Secondary(Type),
    /// A special damaging move button (offense only).
    OffenseMove(ExceptionId),
    /// A special defensive move button (defense only).
    DefenseMove(ExceptionId),
    /// The Tera type dropdown; `None` is the empty option (defense only).
    Tera(Option<Type>),
    /// The ability dropdown; `None` is the empty option.
    Ability(Option<ExceptionId>),
    /// A move picked from search (offense), resolved to its type.
    SearchMove(Type),
    /// A Pokémon picked from search (defense), resolved to its types.
    SearchPokemon {
        primary: Type,
        secondary: Option<Type>,
    },
}

/// Enabled/disabled bookkeeping for the session's controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlState {
    /// The primary's type, disabled in the secondary grid (defense).
    mirror_disabled: Option<Type>,
    /// A defensive move's type, disabled in both grids while the move is
    /// active.
    move_disabled: Option<Type>,
    /// Offense move lock: every primary type button disabled.
    move_locked: bool,
    /// Tera lock: every type button in both grids disabled.
    tera_locked: bool,
    /// The Tera option matching the active defensive move's type.
    tera_option_disabled: Option<Type>,
}

impl ControlState {
    fn initial(mode: Mode) -> ControlState {
        ControlState {
            mirror_disabled: (mode == Mode::Defense).then_some(Type::Normal),
            ..ControlState::default()
        }
    }

    /// Whether a primary type button is clickable.
    pub fn primary_enabled(&self, ty: Type, generation: Generation) -> bool {
        ty.in_generation(generation)
            && !self.move_locked
            && !self.tera_locked
            && self.move_disabled != Some(ty)
    }

    /// Whether a secondary type button is clickable.
    pub fn secondary_enabled(&self, ty: Type, generation: Generation) -> bool {
        ty.in_generation(generation)
            && !self.tera_locked
            && self.mirror_disabled != Some(ty)
            && self.move_disabled != Some(ty)
    }

    /// Whether a Tera dropdown option is selectable.
    pub fn tera_option_enabled(&self, ty: Type, generation: Generation) -> bool {
        generation.supports_tera()
            && ty.in_generation(generation)
            && self.tera_option_disabled != Some(ty)
    }

    pub fn tera_locked(&self) -> bool {
        self.tera_locked
    }

    pub fn move_locked(&self) -> bool {
        self.move_locked
    }
}

/// Session state for one offense/defense browsing session.
pub struct SelectionSession {
    mode: Mode,
    generation: Generation,
    active: TypeSet,
    exceptions: ExceptionSet,
    primary: Type,
    secondary: Option<Type>,
    active_move: Option<ExceptionId>,
    ability: Option<ExceptionId>,
    tera: Option<Type>,
    /// Primary/secondary as they were when Tera was first engaged.
    saved_before_tera: Option<(Type, Option<Type>)>,
    controls: ControlState,
    order: MultOrderIndex,
    cache: RenderCache,
}

impl SelectionSession {
    /// A fresh session: single "normal" type, no exceptions.
    pub fn new(mode: Mode, generation: Generation) -> SelectionSession {
        SelectionSession {
            mode,
            generation,
            active: TypeSet::only(Type::Normal),
            exceptions: ExceptionSet::empty(),
            primary: Type::Normal,
            secondary: None,
            active_move: None,
            ability: None,
            tera: None,
            saved_before_tera: None,
            controls: ControlState::initial(mode),
            order: MultOrderIndex::new(),
            cache: RenderCache::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The currently active input types.
    pub fn active_types(&self) -> TypeSet {
        self.active
    }

    /// The currently active exception ids.
    pub fn active_exceptions(&self) -> ExceptionSet {
        self.exceptions
    }

    pub fn primary(&self) -> Type {
        self.primary
    }

    pub fn secondary(&self) -> Option<Type> {
        self.secondary
    }

    pub fn active_move(&self) -> Option<ExceptionId> {
        self.active_move
    }

    pub fn ability(&self) -> Option<ExceptionId> {
        self.ability
    }

    pub fn tera(&self) -> Option<Type> {
        self.tera
    }

    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    /// Route one interaction to its handler. Interactions whose
    /// preconditions do not hold (a control the UI keeps disabled) are
    /// no-ops; the enable/disable state in [`ControlState`] is the guard.
    pub fn apply(&mut self, selection: Selection, rules: &ExceptionTable) {
        debug!(?selection, "applying selection");
        match selection {
            Selection::Primary(ty) => self.select_primary(ty),
            Selection::Secondary(ty) => self.select_secondary(ty),
            Selection::OffenseMove(id) => self.select_offense_move(id, rules),
            Selection::DefenseMove(id) => self.select_defense_move(id, rules),
            Selection::Tera(choice) => self.select_tera(choice, rules),
            Selection::Ability(choice) => self.select_ability(choice),
            Selection::SearchMove(ty) => self.select_primary(ty),
            Selection::SearchPokemon { primary, secondary } => {
                self.search_pokemon(primary, secondary, rules)
            }
        }
    }

    /// Recompute the grouping for the current selection and diff it against
    /// the previous render. Returns the changed groups, descending by
    /// multiplier.
    pub fn refresh(
        &mut self,
        chart: &TypeChart,
        rules: &ExceptionTable,
        force_all: bool,
    ) -> Vec<(Mult, HashSet<Label>)> {
        let groups = self.compute(chart, rules);
        self.cache.reconcile(&groups, force_all)
    }

    /// Recompute the grouping without touching the render cache.
    pub fn compute(&mut self, chart: &TypeChart, rules: &ExceptionTable) -> EffectGroups {
        compute_effectiveness(
            self.active,
            self.mode,
            self.generation,
            &self.exceptions,
            chart,
            rules,
            &mut self.order,
        )
    }

    /// Session-scoped order index (descending multiplier placement).
    pub fn order_index(&self) -> &MultOrderIndex {
        &self.order
    }

    /// Back to `Idle(normal)`: clears every exception and re-enables every
    /// control.
    pub fn reset(&mut self) {
        self.active = TypeSet::only(Type::Normal);
        self.exceptions.clear();
        self.primary = Type::Normal;
        self.secondary = None;
        self.active_move = None;
        self.ability = None;
        self.tera = None;
        self.saved_before_tera = None;
        self.controls = ControlState::initial(self.mode);
    }

    fn select_primary(&mut self, ty: Type) {
        if self.active.contains_type(ty) {
            if self.secondary == Some(ty) {
                // Re-selecting the secondary's type as primary swaps roles
                // and collapses the pair to that single type.
                self.active = TypeSet::only(ty);
                self.secondary = None;
                self.primary = ty;
                self.controls.mirror_disabled = Some(ty);
            }
            // Already the primary (or a move-implied type): nothing to do.
            return;
        }
        match self.mode {
            Mode::Defense => {
                // Only the existing primary leaves the set; a secondary or
                // move-implied type stays.
                self.active.remove_type(self.primary);
                self.controls.mirror_disabled = Some(ty);
            }
            Mode::Offense => {
                self.active = TypeSet::empty();
            }
        }
        self.active.insert_type(ty);
        self.primary = ty;
    }

    fn select_secondary(&mut self, ty: Type) {
        if self.mode != Mode::Defense {
            return;
        }
        if self.primary == ty {
            // Duplicate of the primary: rejected.
            return;
        }
        if self.secondary == Some(ty) {
            // Toggling the current secondary off.
            self.active.remove_type(ty);
            self.secondary = None;
        } else {
            if let Some(prev) = self.secondary {
                self.active.remove_type(prev);
            }
            self.active.insert_type(ty);
            self.secondary = Some(ty);
        }
    }

    fn select_offense_move(&mut self, id: ExceptionId, rules: &ExceptionTable) {
        if self.mode != Mode::Offense {
            return;
        }
        let move_type = rules
            .move_type(id)
            .expect("offense move selection requires a move-derived exception");
        if self.active_move == Some(id) {
            // Deselect: ordinary type selection comes back. The move's
            // source type stays highlighted as the primary.
            self.exceptions.remove(id);
            self.active_move = None;
            if let Some(aux) = rules.aux_type(id) {
                self.active.remove_type(aux);
            }
            self.controls.move_locked = false;
            return;
        }
        if let Some(prev) = self.active_move {
            self.exceptions.remove(prev);
        }
        self.exceptions.insert(id);
        self.active_move = Some(id);
        // The move dictates the input types outright.
        self.active = TypeSet::only(move_type);
        if let Some(aux) = rules.aux_type(id) {
            self.active.insert_type(aux);
        }
        self.primary = move_type;
        self.controls.move_locked = true;
    }

    fn select_defense_move(&mut self, id: ExceptionId, rules: &ExceptionTable) {
        if self.mode != Mode::Defense {
            return;
        }
        let move_type = rules
            .move_type(id)
            .expect("defense move selection requires a move-derived exception");
        if self.exceptions.contains(id) {
            // Deselect.
            self.exceptions.remove(id);
            self.active_move = None;
            self.controls.tera_option_disabled = None;
            if self.primary != move_type && self.secondary != Some(move_type) {
                self.active.remove_type(move_type);
            }
            self.controls.move_disabled = None;
            return;
        }
        if let Some(prev) = self.active_move {
            // Switching moves deactivates the previous one first.
            let prev_type = rules
                .move_type(prev)
                .expect("active move is move-derived");
            self.exceptions.remove(prev);
            if self.active.contains_type(prev_type)
                && self.primary != prev_type
                && self.secondary != Some(prev_type)
            {
                self.active.remove_type(prev_type);
            }
        }
        self.exceptions.insert(id);
        self.active_move = Some(id);
        self.controls.tera_option_disabled = Some(move_type);
        if self.primary != move_type && self.secondary != Some(move_type) {
            self.active.insert_type(move_type);
        }
        self.controls.move_disabled = Some(move_type);
    }

    fn select_tera(&mut self, choice: Option<Type>, rules: &ExceptionTable) {
        if self.mode != Mode::Defense || !self.generation.supports_tera() {
            return;
        }
        match choice {
            Some(tera_type) => {
                if let Some(active_move) = self.active_move {
                    if rules.move_type(active_move) == Some(tera_type) {
                        // The dropdown option is disabled for this type.
                        return;
                    }
                }
                if self.tera.is_none() {
                    self.saved_before_tera = Some((self.primary, self.secondary));
                }
                if let Some(secondary) = self.secondary.take() {
                    self.active.remove_type(secondary);
                }
                if tera_type != self.primary {
                    self.active.remove_type(self.primary);
                    self.active.insert_type(tera_type);
                    self.primary = tera_type;
                }
                // Stellar's only interaction is super-effectiveness against
                // the Tera Pokémon row.
                self.active.insert_type(Type::Stellar);
                self.controls.tera_locked = true;
                self.tera = Some(tera_type);
            }
            None => {
                if self.tera.take().is_none() {
                    return;
                }
                self.active.remove_type(Type::Stellar);
                self.controls.tera_locked = false;
                if let Some((primary, secondary)) = self.saved_before_tera.take() {
                    // Restore the pre-Tera selection exactly, keeping a
                    // still-active defensive move's type layered on.
                    let mut active = TypeSet::only(primary);
                    if let Some(secondary) = secondary {
                        active.insert_type(secondary);
                    }
                    if let Some(active_move) = self.active_move {
                        if let Some(move_type) = rules.move_type(active_move) {
                            active.insert_type(move_type);
                        }
                    }
                    self.active = active;
                    self.primary = primary;
                    self.secondary = secondary;
                    self.controls.mirror_disabled = Some(primary);
                }
            }
        }
    }

    fn select_ability(&mut self, choice: Option<ExceptionId>) {
        if choice == self.ability {
            return;
        }
        if let Some(prev) = self.ability.take() {
            self.exceptions.remove(prev);
        }
        if let Some(next) = choice {
            self.exceptions.insert(next);
        }
        self.ability = choice;
    }

    fn search_pokemon(
        &mut self,
        primary: Type,
        secondary: Option<Type>,
        rules: &ExceptionTable,
    ) {
        if self.mode != Mode::Defense {
            return;
        }
        // A concrete Pokémon supersedes Terastallization.
        if self.tera.is_some() {
            self.select_tera(None, rules);
        }
        // A type the Pokémon already has cancels the matching special move.
        if self.move_conflicts_with(primary, rules) {
            let active_move = self.active_move.expect("conflict implies an active move");
            self.select_defense_move(active_move, rules);
        }
        self.select_primary(primary);
        match secondary {
            Some(secondary) => {
                if self.move_conflicts_with(secondary, rules) {
                    let active_move =
                        self.active_move.expect("conflict implies an active move");
                    self.select_defense_move(active_move, rules);
                }
                self.select_secondary(secondary);
            }
            None => {
                // A monotype Pokémon clears any lingering secondary.
                if let Some(current) = self.secondary {
                    self.select_secondary(current);
                }
            }
        }
    }

    fn move_conflicts_with(&self, ty: Type, rules: &ExceptionTable) -> bool {
        match self.active_move {
            Some(active_move) => rules.move_for_type(ty) == Some(active_move),
            None => false,
        }
    }
}
