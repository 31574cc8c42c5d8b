//! Fantasy Grounds character export (structured).
//!
//! The export is nested; after flattening, fields are addressed by dotted
//! paths such as `abilities.strength.score`. Repeated lists are keyed
//! `id-00001`, `id-00002`, ...

use super::actor5e;
use super::ImportFormat;
use crate::extract::STRUCTURED_CLASS;
use crate::template::Template;

pub const ID: &str = "fantasy_grounds";
pub const DISPLAY_NAME: &str = "Fantasy Grounds Character";

/// Entries read from each repeated list.
const LIST_ENTRIES: usize = 6;

pub fn format() -> ImportFormat {
    ImportFormat {
        id: ID,
        display_name: DISPLAY_NAME,
        template: template(),
        extractors: vec![STRUCTURED_CLASS],
    }
}

/// Export name of an ability code.
fn ability_name(code: &str) -> &'static str {
    match code {
        "str" => "strength",
        "dex" => "dexterity",
        "con" => "constitution",
        "int" => "intelligence",
        "wis" => "wisdom",
        "cha" => "charisma",
        _ => "",
    }
}

/// `<list>.id-0000N.name` for the first `count` entries.
fn list_name_fields(list: &str, count: usize) -> Vec<String> {
    (1..=count)
        .map(|index| format!("{list}.id-{index:05}.name"))
        .collect()
}

pub fn template() -> Template {
    let abilities = actor5e::abilities(|code| {
        let name = ability_name(code);
        actor5e::ability(
            &format!("abilities.{name}.score"),
            Template::field(format!("abilities.{name}.saveprof")),
            &format!("abilities.{name}.bonus"),
            &format!("abilities.{name}.save"),
        )
    });

    let attributes = Template::subtree([
        (
            "ac",
            Template::subtree([("value", Template::field("defenses.ac.total"))]),
        ),
        ("hp", actor5e::hit_points("hp.total", "hp.total", "hp.temporary")),
        ("init", actor5e::initiative("initiative.total")),
        ("spellcasting", Template::literal("int")),
        (
            "speed",
            Template::subtree([
                ("value", Template::field("speed.total")),
                ("special", Template::null()),
            ]),
        ),
        ("death", actor5e::death_saves()),
        (
            "encumbrance",
            actor5e::encumbrance(Template::field("encumbrance.max")),
        ),
        ("exhaustion", Template::null()),
        ("inspiration", Template::field("inspiration")),
        ("hd", Template::null()),
        ("prof", Template::field("profbonus")),
        ("spelldc", Template::null()),
    ]);

    let details = Template::subtree([
        (
            "biography",
            Template::subtree([("value", Template::null()), ("public", Template::null())]),
        ),
        ("alignment", Template::field("alignment")),
        ("race", Template::field("race")),
        ("background", Template::field("background")),
        ("xp", actor5e::experience("exp")),
        ("trait", Template::field("personalitytraits")),
        ("ideal", Template::field("ideals")),
        ("bond", Template::field("bonds")),
        ("flaw", Template::field("flaws")),
        ("level", Template::field("level")),
    ]);

    let traits = Template::subtree([
        ("size", Template::field("size")),
        ("di", actor5e::trait_list(Template::empty_list())),
        ("dr", actor5e::trait_list(Template::empty_list())),
        ("dv", actor5e::trait_list(Template::empty_list())),
        ("ci", actor5e::trait_list(Template::empty_list())),
        ("senses", Template::field("senses")),
        (
            "languages",
            actor5e::trait_list(Template::lowercase_map_array(list_name_fields(
                "languagelist",
                LIST_ENTRIES,
            ))),
        ),
        (
            "weaponProf",
            actor5e::trait_list(Template::map_array(list_name_fields(
                "proficiencylist",
                LIST_ENTRIES,
            ))),
        ),
        ("armorProf", actor5e::trait_list(Template::empty_list())),
        ("toolProf", actor5e::trait_list(Template::empty_list())),
    ]);

    // Coin slots run from platinum (5) down to copper (1)
    let currency = Template::subtree([
        ("pp", Template::field("coins.slot5.amount")),
        ("gp", Template::field("coins.slot4.amount")),
        ("ep", Template::field("coins.slot3.amount")),
        ("sp", Template::field("coins.slot2.amount")),
        ("cp", Template::field("coins.slot1.amount")),
    ]);

    // Skill proficiency lives in a repeated list keyed by position, so ranks
    // are left for the host to fill in.
    let skills = actor5e::skills(|skill| {
        let passive = match skill.code {
            "prc" => Template::field("perception"),
            _ => Template::null(),
        };
        actor5e::skill(skill, Template::literal(0), Template::null(), passive)
    });

    let data = Template::subtree([
        ("abilities", abilities),
        ("attributes", attributes),
        ("details", details),
        ("traits", traits),
        ("currency", currency),
        ("skills", skills),
        (
            "spells",
            actor5e::spell_slots(|level| {
                Template::field(format!("powermeta.spellslots{level}.max"))
            }),
        ),
        ("bonuses", actor5e::bonuses()),
        ("resources", actor5e::resources()),
    ]);

    actor5e::actor(Template::field("name"), data)
}
