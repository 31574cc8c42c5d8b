//! MPMB character sheet (PDF form export).
//!
//! Field names are the form's own. Checkboxes export as `"True"`/`"Off"`,
//! blank text boxes as `""` or a single space.

use pcimport_domain::dnd5e::Skill;

use super::actor5e;
use super::ImportFormat;
use crate::extract::{FREE_TEXT_CLASS, SPELL_LIST};
use crate::template::Template;

pub const ID: &str = "mpmb";
pub const DISPLAY_NAME: &str = "MPMB Character Record Sheet";

const RESISTANCE_FIELDS: [&str; 5] = [
    "Resistance Damage Type 1",
    "Resistance Damage Type 2",
    "Resistance Damage Type 3",
    "Resistance Damage Type 4",
    "Resistance Damage Type 5",
];

const LANGUAGE_FIELDS: [&str; 5] = [
    "Language 1",
    "Language 2",
    "Language 3",
    "Language 4",
    "Language 5",
];

pub fn format() -> ImportFormat {
    ImportFormat {
        id: ID,
        display_name: DISPLAY_NAME,
        template: template(),
        extractors: vec![FREE_TEXT_CLASS, SPELL_LIST],
    }
}

/// Field-name prefix the form uses for a skill's checkboxes.
fn skill_prefix(skill: &Skill) -> &'static str {
    match skill.code {
        "acr" => "Acr",
        "ani" => "Ani",
        "arc" => "Arc",
        "ath" => "Ath",
        "dec" => "Dec",
        "his" => "His",
        "ins" => "Ins",
        "itm" => "Inti",
        "inv" => "Inv",
        "med" => "Med",
        "nat" => "Nat",
        "prc" => "Perc",
        "prf" => "Perf",
        "per" => "Pers",
        "rel" => "Rel",
        "slt" => "Sle",
        "ste" => "Ste",
        "sur" => "Sur",
        _ => "",
    }
}

/// Form prefix of an ability (`"str"` -> `"Str"`).
fn ability_prefix(code: &str) -> String {
    let mut chars = code.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn skill(skill: &Skill) -> Template {
    let prefix = skill_prefix(skill);
    let bonus = match skill.code {
        "inv" => Template::field("Inv Bonus"),
        _ => Template::null(),
    };
    let passive = match skill.code {
        "prc" => Template::field("Passive Perception"),
        _ => Template::null(),
    };
    actor5e::skill(
        skill,
        Template::proficiency_rank(format!("{prefix} Exp"), format!("{prefix} Prof")),
        bonus,
        passive,
    )
}

pub fn template() -> Template {
    let abilities = actor5e::abilities(|code| {
        let prefix = ability_prefix(code);
        actor5e::ability(
            &prefix,
            Template::boolean_to_int(format!("{prefix} ST Prof")),
            &format!("{prefix} Mod"),
            &format!("{prefix} ST Mod"),
        )
    });

    let attributes = Template::subtree([
        ("ac", Template::subtree([("value", Template::field("AC"))])),
        ("hp", actor5e::hit_points("HP Current", "HP Max", "HP Temp")),
        ("init", actor5e::initiative("Initiative bonus")),
        ("spellcasting", Template::literal("int")),
        (
            "speed",
            Template::subtree([("value", Template::field("Speed")), ("special", Template::null())]),
        ),
        ("death", actor5e::death_saves()),
        ("encumbrance", actor5e::encumbrance(Template::literal(150))),
        ("exhaustion", Template::null()),
        ("inspiration", Template::field("Inspiration")),
        ("hd", Template::field("HD1 Level")),
        ("prof", Template::field("Proficiency Bonus")),
        ("spelldc", Template::field("Spell save DC 1")),
    ]);

    let details = Template::subtree([
        (
            "biography",
            Template::subtree([
                ("value", Template::null()),
                ("public", Template::field("Background History")),
            ]),
        ),
        ("alignment", Template::field("Alignment")),
        ("race", Template::field("Race")),
        ("background", Template::field("Background")),
        ("xp", actor5e::experience("Total Experience")),
        ("trait", Template::field("Personality Trait")),
        ("ideal", Template::field("Ideal")),
        ("bond", Template::field("Bond")),
        ("flaw", Template::field("Flaw")),
        ("level", Template::field("Character Level")),
    ]);

    let traits = Template::subtree([
        ("size", Template::field("Size Category")),
        ("di", actor5e::trait_list(Template::empty_list())),
        ("dr", actor5e::trait_list(Template::map_array(RESISTANCE_FIELDS))),
        ("dv", actor5e::trait_list(Template::empty_list())),
        ("ci", actor5e::trait_list(Template::empty_list())),
        ("senses", Template::field("Vision")),
        (
            "languages",
            actor5e::trait_list(Template::lowercase_map_array(LANGUAGE_FIELDS)),
        ),
        ("weaponProf", actor5e::trait_list(Template::empty_list())),
        ("armorProf", actor5e::trait_list(Template::empty_list())),
        ("toolProf", actor5e::trait_list(Template::empty_list())),
    ]);

    let currency = Template::subtree([
        ("pp", Template::field("Platinum Pieces")),
        ("gp", Template::field("Gold Pieces")),
        ("ep", Template::field("Electrum Pieces")),
        ("sp", Template::field("Silver Pieces")),
        ("cp", Template::field("Copper Pieces")),
    ]);

    let data = Template::subtree([
        ("abilities", abilities),
        ("attributes", attributes),
        ("details", details),
        ("traits", traits),
        ("currency", currency),
        ("skills", actor5e::skills(skill)),
        (
            "spells",
            actor5e::spell_slots(|level| {
                Template::field(format!("SpellSlots.CheckboxesSet.lvl{level}"))
            }),
        ),
        ("bonuses", actor5e::bonuses()),
        ("resources", actor5e::resources()),
    ]);

    actor5e::actor(Template::field("AdvLog.PC Name"), data)
}
