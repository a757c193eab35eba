//! Rendered views of the shared fixture map.

use kg_core::Document;
use kg_core::palette::strip_directives;
use kg_render::{describe_doors, render_floor, render_room};

fn fixture() -> Document {
    Document::load(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../kg-core/tests/fixtures/test.tmx"
    ))
    .unwrap()
}

#[test]
fn room_of_player_without_group() {
    let doc = fixture();
    let player = doc.locate_player("test_player9", "9").unwrap();
    let out = strip_directives(&render_room(&doc, &player).unwrap());
    let expected = [
        "........",
        ".С......",
        "..T.....",
        "........",
        "....К...",
        "........",
        "........",
        "........",
        "",
        "T: test_player9",
        "К: Крыса",
        "С: Сундук",
    ]
    .join("\n");
    assert_eq!(out, expected);
}

#[test]
fn doors_on_the_basement() {
    let doc = fixture();
    let player = doc.locate_player("test_player9", "9").unwrap();
    assert_eq!(
        describe_doors(&doc, &player).unwrap(),
        "Двери ведут на юг, запад и восток."
    );
}

#[test]
fn blind_corpse_away_from_walls_finds_no_doors() {
    let doc = fixture();
    let player = doc.locate_player("test_player12", "12").unwrap();
    assert_eq!(
        describe_doors(&doc, &player).unwrap(),
        "В этой комнате нет дверей?"
    );
}

#[test]
fn tower_map_marks_player() {
    let doc = fixture();
    let player = doc.locate_player("test_player11", "11").unwrap();
    let out = render_floor(&doc, &player, 1).unwrap().unwrap();
    assert_eq!(
        strip_directives(&out),
        "T#\n #\n\nT: test_player11\n#: ???"
    );
}
