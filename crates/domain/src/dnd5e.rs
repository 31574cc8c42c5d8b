//! D&D 5th Edition vocabulary used by the actor templates.
//!
//! Codes match the target system's data keys (`data.abilities.str`,
//! `data.skills.acr`, ...). No rules are computed here.

/// Ability score codes in sheet order.
pub const ABILITIES: [&str; 6] = ["str", "dex", "con", "int", "wis", "cha"];

/// A skill as the target system keys it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    /// Data key, e.g. `"acr"`
    pub code: &'static str,
    /// Governing ability code, e.g. `"dex"`
    pub ability: &'static str,
}

const fn skill(code: &'static str, ability: &'static str) -> Skill {
    Skill { code, ability }
}

/// All eighteen skills, in the target system's key order.
pub const SKILLS: [Skill; 18] = [
    skill("acr", "dex"),
    skill("ani", "wis"),
    skill("arc", "int"),
    skill("ath", "str"),
    skill("dec", "cha"),
    skill("his", "int"),
    skill("ins", "wis"),
    skill("itm", "cha"),
    skill("inv", "int"),
    skill("med", "wis"),
    skill("nat", "int"),
    skill("prc", "wis"),
    skill("prf", "cha"),
    skill("per", "cha"),
    skill("rel", "int"),
    skill("slt", "dex"),
    skill("ste", "dex"),
    skill("sur", "wis"),
];

/// Spell slot levels tracked on the actor (`spell1` ..= `spell9`).
pub const SPELL_SLOT_LEVELS: std::ops::RangeInclusive<u8> = 1..=9;
