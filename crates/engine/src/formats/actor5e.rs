//! Sections of the dnd5e actor record shared by every source format.
//!
//! Formats differ in which fields they read; the record shape around them
//! is the same, so the constant parts live here.

use pcimport_domain::dnd5e::{Skill, ABILITIES, SKILLS, SPELL_SLOT_LEVELS};

use crate::template::Template;

/// Target game system id.
pub const SYSTEM_ID: &str = "dnd5e";

/// Host core version the record shape was taken from.
pub const CORE_VERSION: &str = "0.6.6";

/// Game system version the record shape was taken from.
pub const SYSTEM_VERSION: &str = "0.96";

/// Flag key the importer stamps its own version under.
pub const IMPORTER_FLAG: &str = "PC Importer";

const DEFAULT_TOKEN_IMG: &str = "icons/svg/mystery-man.svg";

/// Top-level actor record around a format's `data` section.
pub fn actor(name: Template, data: Template) -> Template {
    Template::subtree([
        ("name", name),
        ("type", Template::literal("character")),
        ("flags", flags()),
        ("data", data),
        ("sort", Template::null()),
        ("token", token()),
        ("_id", Template::null()),
        ("img", Template::null()),
    ])
}

fn flags() -> Template {
    Template::subtree([
        (
            "exportSource",
            Template::subtree([
                ("world", Template::null()),
                ("system", Template::literal(SYSTEM_ID)),
                ("coreVersion", Template::literal(CORE_VERSION)),
                ("systemVersion", Template::literal(SYSTEM_VERSION)),
            ]),
        ),
        (SYSTEM_ID, Template::subtree::<_, String>([])),
        ("core", Template::subtree([("sheetClass", Template::null())])),
        (IMPORTER_FLAG, Template::literal(env!("CARGO_PKG_VERSION"))),
    ])
}

/// One ability block. Bonuses are left for the host to recompute.
pub fn ability(value: &str, proficient: Template, modifier: &str, save: &str) -> Template {
    Template::subtree([
        ("value", Template::field(value)),
        ("proficient", proficient),
        ("mod", Template::field(modifier)),
        ("prof", Template::literal(0)),
        ("saveBonus", Template::literal(0)),
        ("checkBonus", Template::literal(0)),
        ("save", Template::field(save)),
    ])
}

/// All six abilities keyed by code, built by `block`.
pub fn abilities(block: impl Fn(&'static str) -> Template) -> Template {
    Template::subtree(ABILITIES.iter().map(|&code| (code, block(code))))
}

/// A `{ value, custom }` trait list.
pub fn trait_list(value: Template) -> Template {
    Template::subtree([("value", value), ("custom", Template::null())])
}

pub fn hit_points(value: &str, max: &str, temp: &str) -> Template {
    Template::subtree([
        ("value", Template::field(value)),
        ("min", Template::literal(0)),
        ("max", Template::field(max)),
        ("temp", Template::field(temp)),
        ("tempmax", Template::literal(0)),
    ])
}

pub fn initiative(total: &str) -> Template {
    Template::subtree([
        ("value", Template::literal(0)),
        ("bonus", Template::literal(0)),
        ("mod", Template::literal(0)),
        ("prof", Template::literal(0)),
        ("total", Template::field(total)),
    ])
}

pub fn encumbrance(max: Template) -> Template {
    Template::subtree([
        ("value", Template::literal(0)),
        ("max", max),
        ("pct", Template::literal(0)),
        ("encumbered", Template::literal(false)),
    ])
}

pub fn death_saves() -> Template {
    Template::subtree([("success", Template::null()), ("failure", Template::null())])
}

pub fn experience(value: &str) -> Template {
    Template::subtree([
        ("value", Template::field(value)),
        ("min", Template::null()),
        ("max", Template::null()),
        ("pct", Template::null()),
    ])
}

/// Skill block. Totals and modifiers are derived by the host.
pub fn skill(skill: &Skill, rank: Template, bonus: Template, passive: Template) -> Template {
    Template::subtree([
        ("value", rank),
        ("ability", Template::literal(skill.ability)),
        ("bonus", bonus),
        ("mod", Template::null()),
        ("prof", Template::null()),
        ("total", Template::null()),
        ("passive", passive),
    ])
}

/// All eighteen skills keyed by code, built by `block`.
pub fn skills(block: impl Fn(&Skill) -> Template) -> Template {
    Template::subtree(SKILLS.iter().map(|s| (s.code, block(s))))
}

/// Spell slots `spell1..=spell9` plus an empty pact block.
pub fn spell_slots(max: impl Fn(u8) -> Template) -> Template {
    let mut slots: Vec<(String, Template)> = SPELL_SLOT_LEVELS
        .map(|level| {
            (
                format!("spell{level}"),
                Template::subtree([
                    ("value", Template::null()),
                    ("max", max(level)),
                    ("override", Template::null()),
                ]),
            )
        })
        .collect();
    slots.push((
        "pact".to_string(),
        Template::subtree([
            ("value", Template::null()),
            ("max", Template::null()),
            ("override", Template::null()),
            ("level", Template::null()),
        ]),
    ));
    Template::subtree(slots)
}

pub fn bonuses() -> Template {
    let attack_damage = || {
        Template::subtree([("attack", Template::null()), ("damage", Template::null())])
    };
    Template::subtree([
        ("mwak", attack_damage()),
        ("rwak", attack_damage()),
        ("msak", attack_damage()),
        ("rsak", attack_damage()),
        (
            "abilities",
            Template::subtree([
                ("check", Template::null()),
                ("save", Template::null()),
                ("skill", Template::null()),
            ]),
        ),
        ("spell", Template::subtree([("dc", Template::null())])),
    ])
}

pub fn resources() -> Template {
    let resource = || {
        Template::subtree([
            ("value", Template::null()),
            ("max", Template::null()),
            ("sr", Template::literal(false)),
            ("lr", Template::literal(false)),
            ("label", Template::null()),
        ])
    };
    Template::subtree([
        ("primary", resource()),
        ("secondary", resource()),
        ("tertiary", resource()),
    ])
}

fn token() -> Template {
    Template::subtree([
        ("flags", Template::subtree::<_, String>([])),
        ("name", Template::null()),
        ("displayName", Template::null()),
        ("img", Template::literal(DEFAULT_TOKEN_IMG)),
        ("tint", Template::null()),
        ("width", Template::literal(1)),
        ("height", Template::literal(1)),
        ("scale", Template::literal(1)),
        ("lockRotation", Template::literal(false)),
        ("rotation", Template::null()),
        ("vision", Template::literal(true)),
        ("dimSight", Template::literal(60)),
        ("brightSight", Template::null()),
        ("dimLight", Template::null()),
        ("brightLight", Template::null()),
        ("sightAngle", Template::literal(360)),
        ("lightAngle", Template::literal(360)),
        ("lightAlpha", Template::literal(1)),
        ("actorId", Template::null()),
        ("actorLink", Template::literal(true)),
        ("actorData", Template::null()),
        ("disposition", Template::literal(1)),
        ("displayBars", Template::null()),
        (
            "bar1",
            Template::subtree([("attribute", Template::literal("attributes.hp"))]),
        ),
        ("bar2", Template::subtree([("attribute", Template::null())])),
        ("randomImg", Template::literal(false)),
    ])
}
