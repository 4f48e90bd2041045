use serde::{Deserialize, Serialize};

use crate::life::Combatant;
use crate::tiles::{SpawnBias, TileType};

/// Every equippable modifier the formula and hazard engines read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveEffects {
    pub holy_vowel: bool,
    pub fireproof: bool,
    pub healing_staff: bool,
    pub red_enhanced: bool,
    pub gray_goggles: bool,
    pub fire_war_axe: bool,
    pub frozen_armor: bool,
    pub jqzx_expert: bool,
    pub scrabbler: bool,
    pub doubling_doubloon: bool,
    pub palindromer: bool,
    pub mirror_edge: bool,
    pub vowel_suite: bool,
    pub suffix_specialist: bool,
    pub grayscale_gambit: bool,
    pub crimson_echo: bool,
    pub herbal_surge: bool,
    pub ignore_frozen_penalty: bool,
}

/// Labels for modifiers that fired while resolving one word. Statistics and UI only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTag {
    Cursed,
    CursedOdd,
    CursedEven,
    FireWarAxe,
    LongWordScaling,
    Scrabbler,
    DoublingDoubloon,
    Palindromer,
    MirrorEdge,
    VowelSuite,
    SuffixSpecialist,
    GrayscaleGambit,
    CrimsonEcho,
    Frozen,
    HerbalSurge,
    Red,
    RedEnhanced,
    Gray,
    GrayGoggles,
    Fire,
    Poison,
    HolyVowel,
}

impl EffectTag {
    pub fn as_str(self) -> &'static str {
        use EffectTag::*;
        match self {
            Cursed => "cursed",
            CursedOdd => "cursed_odd",
            CursedEven => "cursed_even",
            FireWarAxe => "fire_war_axe",
            LongWordScaling => "long_word_scaling",
            Scrabbler => "scrabbler",
            DoublingDoubloon => "doubling_doubloon",
            Palindromer => "palindromer",
            MirrorEdge => "mirror_edge",
            VowelSuite => "vowel_suite",
            SuffixSpecialist => "suffix_specialist",
            GrayscaleGambit => "grayscale_gambit",
            CrimsonEcho => "crimson_echo",
            Frozen => "frozen",
            HerbalSurge => "herbal_surge",
            Red => "red",
            RedEnhanced => "red_enhanced",
            Gray => "gray",
            GrayGoggles => "gray_goggles",
            Fire => "fire",
            Poison => "poison",
            HolyVowel => "holy_vowel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKey {
    HolyVowel,
    Fireproof,
    HealingStaff,
    RedEnhanced,
    GrayGoggles,
    FireWarAxe,
    FrozenArmor,
    JqzxExpert,
    Scrabbler,
    DoublingDoubloon,
    Palindromer,
    MirrorEdge,
    VowelSuite,
    SuffixSpecialist,
    GrayscaleGambit,
    CrimsonEcho,
    HerbalSurge,
    ThermalGloves,
    BlessRed,
    BlessGreen,
    BlessGray,
    BlessFire,
    BlessPoison,
    BlessCursed,
    BlessIce,
    MetaphorMail,
    SimileShield,
    PersonificationPlate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Item {
    pub key: ItemKey,
    pub name: &'static str,
    pub desc: &'static str,
}

impl ItemKey {
    pub const ALL: [ItemKey; 28] = [
        ItemKey::HolyVowel,
        ItemKey::Fireproof,
        ItemKey::HealingStaff,
        ItemKey::RedEnhanced,
        ItemKey::GrayGoggles,
        ItemKey::FireWarAxe,
        ItemKey::FrozenArmor,
        ItemKey::JqzxExpert,
        ItemKey::Scrabbler,
        ItemKey::DoublingDoubloon,
        ItemKey::Palindromer,
        ItemKey::MirrorEdge,
        ItemKey::VowelSuite,
        ItemKey::SuffixSpecialist,
        ItemKey::GrayscaleGambit,
        ItemKey::CrimsonEcho,
        ItemKey::HerbalSurge,
        ItemKey::ThermalGloves,
        ItemKey::BlessRed,
        ItemKey::BlessGreen,
        ItemKey::BlessGray,
        ItemKey::BlessFire,
        ItemKey::BlessPoison,
        ItemKey::BlessCursed,
        ItemKey::BlessIce,
        ItemKey::MetaphorMail,
        ItemKey::SimileShield,
        ItemKey::PersonificationPlate,
    ];

    pub fn item(self) -> Item {
        use ItemKey::*;
        let (name, desc) = match self {
            HolyVowel => ("Holy Vowel", "Double attack for vowels (A, E, I, O, U)."),
            Fireproof => ("Fireproof", "Fire tiles deal half damage (rounded down)."),
            HealingStaff => ("Healing Staff", "Green tiles heal a full heart."),
            RedEnhanced => ("Reddy For Action", "Red tiles deal an additional double damage."),
            GrayGoggles => ("Gray Goggles", "Gray tiles deal half damage."),
            FireWarAxe => ("Firey War Axe", "Adds ½ heart damage per fire tile on the field to each attack."),
            FrozenArmor => ("Frozen Armor", "Prevent ½ heart of damage for each Frozen tile on the grid."),
            JqzxExpert => ("JQZX Expert", "J, Q, Z and X deal triple damage."),
            Scrabbler => ("Scrabbler", "Words of 7+ letters deal double damage."),
            DoublingDoubloon => ("Doubling Doubloon", "+½ heart when a word has a doubled letter."),
            Palindromer => ("Palindromer", "Palindromes deal 1.5× damage."),
            MirrorEdge => ("Mirror Edge", "+½ heart when a word starts and ends with the same letter."),
            VowelSuite => ("Vowel Suite", "Words with 4+ different vowels deal 1.5× damage."),
            SuffixSpecialist => ("Suffix Specialist", "Words ending in -ING, -ED or -ER deal 1.25× damage."),
            GrayscaleGambit => ("Grayscale Gambit", "+½ heart when a word uses any Gray tile."),
            CrimsonEcho => ("Crimson Echo", "Consecutive red words add their streak to the attack."),
            HerbalSurge => ("Herbal Surge", "Using 2+ Green tiles heals an extra heart."),
            ThermalGloves => ("Thermal Gloves", "Frozen tiles no longer halve your attack."),
            BlessRed => ("Blessing of Red", "Red tiles appear three times as often."),
            BlessGreen => ("Blessing of Green", "Green tiles appear three times as often."),
            BlessGray => ("Blessing of Gray", "Gray tiles appear three times as often."),
            BlessFire => ("Blessing of Fire", "Fire tiles appear three times as often."),
            BlessPoison => ("Blessing of Poison", "Poison tiles appear three times as often."),
            BlessCursed => ("Blessing of Cursed", "Cursed tiles appear three times as often."),
            BlessIce => ("Blessing of Ice", "Frozen tiles appear three times as often."),
            MetaphorMail => ("Metaphor Mail", "+3 max hearts (permanent)."),
            SimileShield => ("Simile Shield", "+2 max hearts (permanent)."),
            PersonificationPlate => ("Personification Plate", "+2 max hearts (permanent)."),
        };
        Item { key: self, name, desc }
    }
}

/// Everything equipment has changed for the current run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Loadout {
    pub effects: ActiveEffects,
    pub bias: SpawnBias,
    pub equipped: Vec<ItemKey>,
}

impl Loadout {
    pub fn owns(&self, key: ItemKey) -> bool {
        self.equipped.contains(&key)
    }

    /// Applies the item's effect and records it once in `equipped`.
    pub fn equip(&mut self, key: ItemKey, player: &mut Combatant) {
        use ItemKey::*;
        let fx = &mut self.effects;
        match key {
            HolyVowel => fx.holy_vowel = true,
            Fireproof => fx.fireproof = true,
            HealingStaff => fx.healing_staff = true,
            RedEnhanced => fx.red_enhanced = true,
            GrayGoggles => fx.gray_goggles = true,
            FireWarAxe => fx.fire_war_axe = true,
            FrozenArmor => fx.frozen_armor = true,
            JqzxExpert => fx.jqzx_expert = true,
            Scrabbler => fx.scrabbler = true,
            DoublingDoubloon => fx.doubling_doubloon = true,
            Palindromer => fx.palindromer = true,
            MirrorEdge => fx.mirror_edge = true,
            VowelSuite => fx.vowel_suite = true,
            SuffixSpecialist => fx.suffix_specialist = true,
            GrayscaleGambit => fx.grayscale_gambit = true,
            CrimsonEcho => fx.crimson_echo = true,
            HerbalSurge => fx.herbal_surge = true,
            ThermalGloves => fx.ignore_frozen_penalty = true,
            BlessRed => self.bias.set(TileType::Red, 3.0),
            BlessGreen => self.bias.set(TileType::Green, 3.0),
            BlessGray => self.bias.set(TileType::Gray, 3.0),
            BlessFire => self.bias.set(TileType::Fire, 3.0),
            BlessPoison => self.bias.set(TileType::Poison, 3.0),
            BlessCursed => self.bias.set(TileType::Cursed, 3.0),
            BlessIce => self.bias.set(TileType::Frozen, 3.0),
            MetaphorMail => player.add_max_hearts(3),
            SimileShield => player.add_max_hearts(2),
            PersonificationPlate => player.add_max_hearts(2),
        }
        if !self.owns(key) {
            self.equipped.push(key);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
