//! End-to-end playthrough tests for the engine.

use serde_json::{Value, json};
use tw_core::{LoadError, SchemaError};
use tw_engine::{Adventure, EngineConfig, EngineError, Notice, Session};

const BURG: &str = include_str!("fixtures/burg.json");

/// The smallest interesting world: a start room with a key and a locked
/// vault to the north whose entry event greets the player.
fn kammer() -> Value {
    json!({
        "metadata": {"title": "Die Kammer"},
        "gameState": {"currentRoom": "start", "inventory": []},
        "rooms": {
            "start": {
                "name": "Vorraum",
                "description": "Ein enger Vorraum.",
                "longDescription": "Ein enger, staubiger Vorraum.",
                "exits": {
                    "norden": {"targetRoom": "vault", "isLocked": true, "requiredItems": ["key"]}
                },
                "items": ["key"],
                "npcs": ["pfoertner"]
            },
            "vault": {
                "name": "Tresor",
                "longDescription": "Goldbarren stapeln sich bis zur Decke.",
                "exits": {"süden": {"targetRoom": "start"}},
                "events": ["welcome", "echo"]
            }
        },
        "items": {
            "key": {"name": "key", "description": "Ein kleiner Schlüssel.", "location": "start", "isTakeable": true}
        },
        "npcs": {
            "pfoertner": {"name": "Pförtner", "location": "start"}
        },
        "puzzles": {},
        "events": {
            "welcome": {
                "trigger": {"type": "enter_room", "target": "vault"},
                "actions": [{"type": "message", "message": "Willkommen im Tresor!"}]
            },
            "echo": {
                "trigger": {"type": "enter_room", "target": "vault"},
                "actions": [{"type": "message", "message": "Deine Schritte hallen."}],
                "isOneTime": false
            }
        },
        "commands": {
            "verbs": {
                "gehe": {"description": "Bewege dich"},
                "schaue": {"description": "Schau dich um"},
                "nimm": {"description": "Nimm etwas"}
            },
            "aliases": {"n": "gehe norden", "s": "gehe süden"},
            "defaultResponses": {
                "unknown_command": "Wie bitte?",
                "cant_go": "Dort geht es nicht weiter.",
                "item_not_found": "Das siehst du hier nicht.",
                "item_not_takeable": "Das kannst du nicht nehmen.",
                "item_not_usable": "Damit kannst du nichts anfangen.",
                "npc_not_found": "Niemand dieses Namens ist hier.",
                "puzzle_not_found": "Hier gibt es kein solches Rätsel."
            }
        }
    })
}

fn start(doc: &Value) -> Session {
    Adventure::from_json(&doc.to_string())
        .unwrap()
        .start(EngineConfig::default())
}

fn run(session: &mut Session, input: &str) -> String {
    session.execute(input).unwrap().text
}

// ---------------------------------------------------------------------------
// The key and the vault
// ---------------------------------------------------------------------------

#[test]
fn key_opens_the_vault() {
    let mut session = start(&kammer());

    let look = run(&mut session, "schaue");
    assert!(look.contains("Du siehst: key"));
    assert!(look.contains("Hier ist: Pförtner"));

    assert_eq!(run(&mut session, "nimm key"), "Du hast key aufgehoben.");

    let outcome = session.execute("gehe norden").unwrap();
    assert_eq!(session.current_room(), "vault");
    assert_eq!(
        outcome.text,
        "Goldbarren stapeln sich bis zur Decke.\n\nWillkommen im Tresor!\nDeine Schritte hallen."
    );
    assert!(outcome.has(|n| matches!(n, Notice::EventFired { event } if event == "welcome")));
}

#[test]
fn one_time_event_never_repeats_but_repeating_one_does() {
    let mut session = start(&kammer());
    run(&mut session, "nimm key");
    run(&mut session, "n");
    run(&mut session, "s");
    let second = run(&mut session, "n");
    assert!(!second.contains("Willkommen im Tresor!"));
    assert!(second.ends_with("Deine Schritte hallen."));
}

#[test]
fn locked_exit_without_key_lists_it() {
    let mut session = start(&kammer());
    let text = run(&mut session, "gehe norden");
    assert_eq!(text, "Der Weg ist versperrt. Du brauchst: key.");
    assert_eq!(session.current_room(), "start");
    assert!(!session.state().has_visited("vault"));
}

#[test]
fn second_take_says_already() {
    let mut session = start(&kammer());
    run(&mut session, "nimm key");
    let before = session.inventory().to_vec();
    assert_eq!(run(&mut session, "nimm key"), "Du hast das bereits.");
    assert_eq!(session.inventory(), before.as_slice());
}

#[test]
fn look_omits_taken_items() {
    let mut session = start(&kammer());
    run(&mut session, "nimm key");
    let look = run(&mut session, "schaue");
    assert!(!look.contains("Du siehst"));
    assert!(look.contains("Hier ist: Pförtner"));
}

#[test]
fn alias_is_the_same_as_its_expansion() {
    let doc = kammer();
    let mut a = start(&doc);
    let mut b = start(&doc);
    for session in [&mut a, &mut b] {
        run(session, "nimm key");
    }
    let by_alias = a.execute("n").unwrap();
    let expanded = b.execute("gehe norden").unwrap();
    assert_eq!(by_alias, expanded);
    assert_eq!(a.state(), b.state());
}

#[test]
fn unlisted_verbs_are_unknown() {
    let mut session = start(&kammer());
    // `hilfe` is a well-known verb, but this world does not list it.
    assert_eq!(run(&mut session, "hilfe"), "Wie bitte?");
    assert_eq!(session.state().time_elapsed, 0);
}

#[test]
fn both_missing_requirements_are_listed() {
    let mut doc = kammer();
    doc["puzzles"] = json!({
        "zahlenschloss": {
            "name": "Zahlenschloss",
            "type": "combination",
            "location": "start",
            "solution": {"type": "combination", "value": [1, 2, 3]}
        }
    });
    doc["rooms"]["start"]["puzzles"] = json!(["zahlenschloss"]);
    doc["rooms"]["start"]["exits"]["norden"]["requiredPuzzles"] = json!(["zahlenschloss"]);

    let mut session = start(&doc);
    let text = run(&mut session, "gehe norden");
    assert_eq!(
        text,
        "Der Weg ist versperrt. Du brauchst: key. Du musst zuerst lösen: Zahlenschloss."
    );
    assert_eq!(session.current_room(), "start");
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn dangling_exit_fails_to_load() {
    let mut doc = kammer();
    doc["rooms"]["vault"]["exits"]["süden"]["targetRoom"] = json!("keller");
    let err = Adventure::from_json(&doc.to_string()).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Load(LoadError::Schema(SchemaError::DanglingReference { .. }))
    ));
}

#[test]
fn every_exit_of_a_loaded_world_resolves() {
    let adventure = Adventure::from_json(BURG).unwrap();
    let world = adventure.world();
    for (_, room) in world.rooms() {
        for (_, exit) in room.exits.iter() {
            assert!(world.room(&exit.target_room).is_some());
        }
    }
    assert_eq!(world.exit_count(), 8);
}

// ---------------------------------------------------------------------------
// Full playthrough
// ---------------------------------------------------------------------------

#[test]
fn castle_walkthrough() {
    let adventure = Adventure::from_json(BURG).unwrap();
    let mut session = adventure.start(EngineConfig::default());

    let script = [
        ("sprich mit gerold", "Halt!"),
        ("tipp inschrift", "Tipp: Sie vergeht"),
        ("löse inschrift mit die zeit", "Du hast Verwitterte Inschrift gelöst!"),
        ("gehe osten", "In der alten Schmiede"),
        ("nimm schlüssel", "Du hast Rostiger Schlüssel aufgehoben."),
        ("nimm seil", "Du hast Seil aufgehoben."),
        ("nimm haken", "Du hast Eiserner Haken aufgehoben."),
        ("kombiniere seil mit haken", "Du knotest das Seil an den Haken."),
        ("gehe westen", "Du stehst im verwilderten Burghof."),
        ("gehe norden", "Staub wirbelt auf"),
        ("löse schalter mit rot grün blau", "Darin liegt ein Amulett."),
        ("inventar", "Du hast dabei: Rostiger Schlüssel, Enterhaken, Amulett"),
        ("gehe hoch", "Du hast die Burg bezwungen!"),
    ];
    for (input, expected) in script {
        let text = run(&mut session, input);
        assert!(text.contains(expected), "{input:?} gave {text:?}");
    }

    assert!(session.is_victory());
    assert!(!session.is_game_over());
    assert_eq!(session.state().time_elapsed, 13);
    assert_eq!(session.current_room(), "turm");
    assert_eq!(run(&mut session, "gehe runter"), "Das Spiel ist vorbei.");
}
