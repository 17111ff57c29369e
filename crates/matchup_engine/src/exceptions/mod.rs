//! Exception registry: identifiers and sets for the situational modifiers
//! (abilities, special moves, field effects) that overlay the base charts.
//!
//! Identifiers are positional: `ExceptionId` discriminants are the record
//! indices of the exception table document, and the loader verifies the
//! document order against this registry.

mod table;

pub use table::{ExceptionEntry, ExceptionTable, ExceptionsDoc, PairEffect, Strategy};

/// A named exception record, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ExceptionId {
    // Offense exceptions (generation-ascending)
    FlashFireAtk = 0,
    Scrappy = 1,
    TintedLens = 2,
    FlyingPress = 3,
    FreezeDry = 4,
    ThousandArrows = 5,
    WaterBubbleAtk = 6,
    // Defense exceptions (generation-ascending)
    FlashFireDef = 7,
    Levitate = 8,
    LightningRod = 9,
    ThickFat = 10,
    VoltAbsorb = 11,
    WaterAbsorb = 12,
    WonderGuard = 13,
    DrySkin = 14,
    Filter = 15,
    Heatproof = 16,
    MotorDrive = 17,
    StormDrain = 18,
    SapSipper = 19,
    DeltaStream = 20,
    Fluffy = 21,
    WaterBubbleDef = 22,
    EarthEater = 23,
    PurifyingSalt = 24,
    TeraShell = 25,
    WellBakedBody = 26,
    ForestsCurse = 27,
    TrickOrTreat = 28,
}

/// Number of exception records.
pub const EXCEPTION_COUNT: usize = 29;

/// All exception ids in table order.
pub const ALL_EXCEPTIONS: [ExceptionId; EXCEPTION_COUNT] = [
    ExceptionId::FlashFireAtk,
    ExceptionId::Scrappy,
    ExceptionId::TintedLens,
    ExceptionId::FlyingPress,
    ExceptionId::FreezeDry,
    ExceptionId::ThousandArrows,
    ExceptionId::WaterBubbleAtk,
    ExceptionId::FlashFireDef,
    ExceptionId::Levitate,
    ExceptionId::LightningRod,
    ExceptionId::ThickFat,
    ExceptionId::VoltAbsorb,
    ExceptionId::WaterAbsorb,
    ExceptionId::WonderGuard,
    ExceptionId::DrySkin,
    ExceptionId::Filter,
    ExceptionId::Heatproof,
    ExceptionId::MotorDrive,
    ExceptionId::StormDrain,
    ExceptionId::SapSipper,
    ExceptionId::DeltaStream,
    ExceptionId::Fluffy,
    ExceptionId::WaterBubbleDef,
    ExceptionId::EarthEater,
    ExceptionId::PurifyingSalt,
    ExceptionId::TeraShell,
    ExceptionId::WellBakedBody,
    ExceptionId::ForestsCurse,
    ExceptionId::TrickOrTreat,
];

static EXCEPTION_NAMES: phf::Map<&'static str, ExceptionId> = phf::phf_map! {
    "flash-fire-atk" => ExceptionId::FlashFireAtk,
    "scrappy" => ExceptionId::Scrappy,
    "tinted-lens" => ExceptionId::TintedLens,
    "flying-press" => ExceptionId::FlyingPress,
    "freeze-dry" => ExceptionId::FreezeDry,
    "thousand-arrows" => ExceptionId::ThousandArrows,
    "water-bubble-atk" => ExceptionId::WaterBubbleAtk,
    "flash-fire-def" => ExceptionId::FlashFireDef,
    "levitate" => ExceptionId::Levitate,
    "lightning-rod" => ExceptionId::LightningRod,
    "thick-fat" => ExceptionId::ThickFat,
    "volt-absorb" => ExceptionId::VoltAbsorb,
    "water-absorb" => ExceptionId::WaterAbsorb,
    "wonder-guard" => ExceptionId::WonderGuard,
    "dry-skin" => ExceptionId::DrySkin,
    "filter" => ExceptionId::Filter,
    "heatproof" => ExceptionId::Heatproof,
    "motor-drive" => ExceptionId::MotorDrive,
    "storm-drain" => ExceptionId::StormDrain,
    "sap-sipper" => ExceptionId::SapSipper,
    "delta-stream" => ExceptionId::DeltaStream,
    "fluffy" => ExceptionId::Fluffy,
    "water-bubble-def" => ExceptionId::WaterBubbleDef,
    "earth-eater" => ExceptionId::EarthEater,
    "purifying-salt" => ExceptionId::PurifyingSalt,
    "tera-shell" => ExceptionId::TeraShell,
    "well-baked-body" => ExceptionId::WellBakedBody,
    "forests-curse" => ExceptionId::ForestsCurse,
    "trick-or-treat" => ExceptionId::TrickOrTreat,
};

impl ExceptionId {
    /// Record index in the exception table.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up an id by record index.
    pub fn from_index(index: usize) -> Option<ExceptionId> {
        ALL_EXCEPTIONS.get(index).copied()
    }

    /// Look up an id by its kebab-case name.
    pub fn from_name(name: &str) -> Option<ExceptionId> {
        EXCEPTION_NAMES.get(name).copied()
    }

    /// Kebab-case name of this exception.
    pub const fn name(self) -> &'static str {
        match self {
            ExceptionId::FlashFireAtk => "flash-fire-atk",
            ExceptionId::Scrappy => "scrappy",
            ExceptionId::TintedLens => "tinted-lens",
            ExceptionId::FlyingPress => "flying-press",
            ExceptionId::FreezeDry => "freeze-dry",
            ExceptionId::ThousandArrows => "thousand-arrows",
            ExceptionId::WaterBubbleAtk => "water-bubble-atk",
            ExceptionId::FlashFireDef => "flash-fire-def",
            ExceptionId::Levitate => "levitate",
            ExceptionId::LightningRod => "lightning-rod",
            ExceptionId::ThickFat => "thick-fat",
            ExceptionId::VoltAbsorb => "volt-absorb",
            ExceptionId::WaterAbsorb => "water-absorb",
            ExceptionId::WonderGuard => "wonder-guard",
            ExceptionId::DrySkin => "dry-skin",
            ExceptionId::Filter => "filter",
            ExceptionId::Heatproof => "heatproof",
            ExceptionId::MotorDrive => "motor-drive",
            ExceptionId::StormDrain => "storm-drain",
            ExceptionId::SapSipper => "sap-sipper",
            ExceptionId::DeltaStream => "delta-stream",
            ExceptionId::Fluffy => "fluffy",
            ExceptionId::WaterBubbleDef => "water-bubble-def",
            ExceptionId::EarthEater => "earth-eater",
            ExceptionId::PurifyingSalt => "purifying-salt",
            ExceptionId::TeraShell => "tera-shell",
            ExceptionId::WellBakedBody => "well-baked-body",
            ExceptionId::ForestsCurse => "forests-curse",
            ExceptionId::TrickOrTreat => "trick-or-treat",
        }
    }
}

impl std::fmt::Display for ExceptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A small bitset over exception ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExceptionSet(u32);

impl ExceptionSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn only(id: ExceptionId) -> Self {
        Self(1 << id.index())
    }

    pub fn insert(&mut self, id: ExceptionId) {
        self.0 |= 1 << id.index();
    }

    pub fn remove(&mut self, id: ExceptionId) {
        self.0 &= !(1 << id.index());
    }

    pub fn contains(&self, id: ExceptionId) -> bool {
        self.0 & (1 << id.index()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Iterate member ids in table order.
    pub fn iter(&self) -> impl Iterator<Item = ExceptionId> + '_ {
        let bits = self.0;
        ALL_EXCEPTIONS
            .iter()
            .copied()
            .filter(move |id| bits & (1 << id.index()) != 0)
    }
}

impl FromIterator<ExceptionId> for ExceptionSet {
    fn from_iter<I: IntoIterator<Item = ExceptionId>>(iter: I) -> Self {
        let mut set = ExceptionSet::empty();
        for id in iter {
            set.insert(id);
        }
        set
    }
}
