//! Type registry: type identifiers, generations, and type sets.
//!
//! Types carry a stable index matching the column/row order of every
//! generation chart. Each generation only exposes a prefix of the full
//! list (`Generation::type_count`), so an index is valid for a generation
//! iff it is below that count.

use bitflags::bitflags;

/// A Pokémon elemental type.
///
/// Discriminants are the chart indices. `Stellar` is an offense-only input
/// pseudo-type; its chart row doubles as the defensive "Tera Pokémon" slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Type {
    Normal = 0,
    Fire = 1,
    Water = 2,
    Electric = 3,
    Grass = 4,
    Ice = 5,
    Fighting = 6,
    Poison = 7,
    Ground = 8,
    Flying = 9,
    Psychic = 10,
    Bug = 11,
    Rock = 12,
    Ghost = 13,
    Dragon = 14,
    Dark = 15,
    Steel = 16,
    Fairy = 17,
    Stellar = 18,
}

/// Total number of type indices across all generations.
pub const TYPE_COUNT: usize = 19;

/// All types in chart-index order.
pub const ALL_TYPES: [Type; TYPE_COUNT] = [
    Type::Normal,
    Type::Fire,
    Type::Water,
    Type::Electric,
    Type::Grass,
    Type::Ice,
    Type::Fighting,
    Type::Poison,
    Type::Ground,
    Type::Flying,
    Type::Psychic,
    Type::Bug,
    Type::Rock,
    Type::Ghost,
    Type::Dragon,
    Type::Dark,
    Type::Steel,
    Type::Fairy,
    Type::Stellar,
];

static TYPE_NAMES: phf::Map<&'static str, Type> = phf::phf_map! {
    "normal" => Type::Normal,
    "fire" => Type::Fire,
    "water" => Type::Water,
    "electric" => Type::Electric,
    "grass" => Type::Grass,
    "ice" => Type::Ice,
    "fighting" => Type::Fighting,
    "poison" => Type::Poison,
    "ground" => Type::Ground,
    "flying" => Type::Flying,
    "psychic" => Type::Psychic,
    "bug" => Type::Bug,
    "rock" => Type::Rock,
    "ghost" => Type::Ghost,
    "dragon" => Type::Dragon,
    "dark" => Type::Dark,
    "steel" => Type::Steel,
    "fairy" => Type::Fairy,
    "stellar" => Type::Stellar,
};

impl Type {
    /// Chart index of this type.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a type by chart index.
    pub fn from_index(index: usize) -> Option<Type> {
        ALL_TYPES.get(index).copied()
    }

    /// Look up a type by its lowercase name.
    pub fn from_name(name: &str) -> Option<Type> {
        TYPE_NAMES.get(name).copied()
    }

    /// Lowercase name of this type.
    pub const fn name(self) -> &'static str {
        match self {
            Type::Normal => "normal",
            Type::Fire => "fire",
            Type::Water => "water",
            Type::Electric => "electric",
            Type::Grass => "grass",
            Type::Ice => "ice",
            Type::Fighting => "fighting",
            Type::Poison => "poison",
            Type::Ground => "ground",
            Type::Flying => "flying",
            Type::Psychic => "psychic",
            Type::Bug => "bug",
            Type::Rock => "rock",
            Type::Ghost => "ghost",
            Type::Dragon => "dragon",
            Type::Dark => "dark",
            Type::Steel => "steel",
            Type::Fairy => "fairy",
            Type::Stellar => "stellar",
        }
    }

    /// Whether this type's buttons exist at all in the given generation.
    pub fn in_generation(self, gen: Generation) -> bool {
        self.index() < gen.type_count()
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the three supported rule-set eras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generation {
    /// "1": 15 types, pre-Dark/Steel, with the era's chart quirks.
    Gen1,
    /// "2-5": 17 types, Steel still resists Ghost and Dark.
    Gen2To5,
    /// "6+": 19 types including Fairy and the Stellar/Tera row.
    Gen6Plus,
}

impl Generation {
    /// Number of chart rows/columns in play for this generation.
    pub const fn type_count(self) -> usize {
        match self {
            Generation::Gen1 => 15,
            Generation::Gen2To5 => 17,
            Generation::Gen6Plus => 19,
        }
    }

    /// Display label, matching the data documents.
    pub const fn label(self) -> &'static str {
        match self {
            Generation::Gen1 => "1",
            Generation::Gen2To5 => "2-5",
            Generation::Gen6Plus => "6+",
        }
    }

    /// Parse a generation label.
    pub fn from_label(label: &str) -> Option<Generation> {
        match label {
            "1" => Some(Generation::Gen1),
            "2-5" => Some(Generation::Gen2To5),
            "6+" => Some(Generation::Gen6Plus),
            _ => None,
        }
    }

    /// Whether Terastallization is part of this rule set.
    pub const fn supports_tera(self) -> bool {
        matches!(self, Generation::Gen6Plus)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which side of the matchup the selected types are on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Selected types are attacking; opposing types defend.
    Offense,
    /// Selected types are defending; opposing types attack.
    Defense,
}

bitflags! {
    /// A set of types, one bit per chart index.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TypeSet: u32 {
        const NORMAL = 1 << 0;
        const FIRE = 1 << 1;
        const WATER = 1 << 2;
        const ELECTRIC = 1 << 3;
        const GRASS = 1 << 4;
        const ICE = 1 << 5;
        const FIGHTING = 1 << 6;
        const POISON = 1 << 7;
        const GROUND = 1 << 8;
        const FLYING = 1 << 9;
        const PSYCHIC = 1 << 10;
        const BUG = 1 << 11;
        const ROCK = 1 << 12;
        const GHOST = 1 << 13;
        const DRAGON = 1 << 14;
        const DARK = 1 << 15;
        const STEEL = 1 << 16;
        const FAIRY = 1 << 17;
        const STELLAR = 1 << 18;
    }
}

impl TypeSet {
    /// The single-bit set for one type.
    pub fn only(ty: Type) -> TypeSet {
        TypeSet::from_bits_truncate(1 << ty.index())
    }

    /// Every type visible in the given generation.
    pub fn all_in(gen: Generation) -> TypeSet {
        TypeSet::from_bits_truncate((1u32 << gen.type_count()) - 1)
    }

    pub fn insert_type(&mut self, ty: Type) {
        self.insert(TypeSet::only(ty));
    }

    pub fn remove_type(&mut self, ty: Type) {
        self.remove(TypeSet::only(ty));
    }

    pub fn contains_type(&self, ty: Type) -> bool {
        self.contains(TypeSet::only(ty))
    }

    /// Number of types in the set.
    pub fn len(&self) -> usize {
        self.bits().count_ones() as usize
    }

    /// Iterate member types in chart-index order.
    pub fn types(&self) -> impl Iterator<Item = Type> + '_ {
        let bits = self.bits();
        ALL_TYPES
            .iter()
            .copied()
            .filter(move |ty| bits & (1 << ty.index()) != 0)
    }
}

impl FromIterator<Type> for TypeSet {
    fn from_iter<I: IntoIterator<Item = Type>>(iter: I) -> Self {
        let mut set = TypeSet::empty();
        for ty in iter {
            set.insert_type(ty);
        }
        set
    }
}
