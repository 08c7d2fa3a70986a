use std::path::Path;

use game_content::{ContentFactory, DialogueData, ItemData, LocalizationData, MonsterData};
use game_tables::{DiagnosticKind, KeyType, TableError};

fn write(dir: &Path, name: &str, text: &str) {
    std::fs::write(dir.join(name), text).unwrap();
}

#[test]
fn bundled_tables_load_cleanly() {
    let (registry, report) = ContentFactory::bundled().load_tables().unwrap();

    assert!(report.is_clean(), "unexpected issues: {:?}", report);
    assert_eq!(
        report.loaded,
        ["Dialogue", "Item", "Localization", "Monster"]
    );

    let monsters = registry.table::<i64, MonsterData>().unwrap();
    assert_eq!(monsters.len(), 5);
    let ogre = monsters.get(&4).unwrap();
    assert_eq!(ogre.name, "Ogre Chieftain");
    assert_eq!(ogre.hp, 420);
    assert!(ogre.is_boss);
    assert_eq!(ogre.element, 1);
    assert!(!monsters.contains_key(&0), "example row must be skipped");

    let shield = registry.get::<i64, ItemData>(&201).unwrap();
    assert_eq!(shield.name, "Shield, Wooden");
    assert!(!shield.stackable);
    assert!(registry.get::<i64, ItemData>(&300).unwrap().stackable);
}

#[test]
fn key_columns_follow_shape_and_config() {
    let (registry, _) = ContentFactory::bundled().load_tables().unwrap();

    let dialogue = registry.table::<String, DialogueData>().unwrap();
    assert_eq!(dialogue.key_column(), "dialogue_id");
    let intro = dialogue.get("intro_01").unwrap();
    assert_eq!(intro.text, "Welcome, traveler.");
    assert_eq!(intro.next_id, "intro_02");
    assert_eq!(dialogue.get("intro_03").unwrap().next_id, "");

    let strings = registry.table::<String, LocalizationData>().unwrap();
    assert_eq!(strings.key_column(), "key");
    assert_eq!(strings.get("ui.quit").unwrap().en, "Quit");

    let mut keys = registry.all_keys::<String, LocalizationData>();
    keys.sort();
    assert_eq!(keys, ["item.potion.health", "ui.quit", "ui.start"]);

    let key_types: Vec<_> = registry
        .tables()
        .iter()
        .map(|info| (info.table_name.as_str(), info.key_type))
        .collect();
    assert_eq!(
        key_types,
        [
            ("Dialogue", KeyType::String),
            ("Item", KeyType::Int),
            ("Localization", KeyType::String),
            ("Monster", KeyType::Int),
        ]
    );
}

#[test]
fn defects_are_reported_without_stopping_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let tables = dir.path().join("tables");
    std::fs::create_dir(&tables).unwrap();

    write(
        &tables,
        "Monster.csv",
        "\
Monster
id,name,hp,speed,is_boss,element
int,string,int,float,bool,enum
0,example,0,0,0,0
1,Slime,10,0.5,0,0
2,Bat,many,2.0,0,0
2,Duplicate Bat,5,2.0,0,0
x,Broken,1,1,0,0
,Blank,1,1,0,0
",
    );
    write(&tables, "Item.csv", "Item only\n");
    write(&tables, "Weather.csv", "a\nb\nc\nd\n");

    let (registry, report) = ContentFactory::new(dir.path()).load_tables().unwrap();

    let monsters = registry.table::<i64, MonsterData>().unwrap();
    assert_eq!(monsters.len(), 2);
    assert_eq!(monsters.get(&2).unwrap().name, "Bat");
    assert_eq!(monsters.get(&2).unwrap().hp, 0);

    assert!(registry.table::<i64, ItemData>().is_none());
    assert!(matches!(
        report.failure("Item"),
        Some(TableError::MissingHeader { .. })
    ));

    let kinds: Vec<_> = report.diagnostics.iter().map(|d| &d.kind).collect();
    assert!(kinds.iter().any(|k| matches!(k, DiagnosticKind::InvalidCell { column: "hp", .. })));
    assert!(kinds.iter().any(|k| matches!(k, DiagnosticKind::DuplicateKey { key } if key == "2")));
    assert!(kinds.iter().any(|k| matches!(k, DiagnosticKind::InvalidKey { value, .. } if value == "x")));
    assert!(kinds.contains(&&DiagnosticKind::UnmatchedSource));
    assert_eq!(report.diagnostics.len(), 4);
}

#[test]
fn custom_config_is_honoured() {
    let dir = tempfile::tempdir().unwrap();
    let sheets = dir.path().join("sheets");
    std::fs::create_dir(&sheets).unwrap();

    write(
        dir.path(),
        "tables.toml",
        "directory = \"sheets\"\nextension = \"tsv\"\n\n[layout]\ndelimiter = \"\\t\"\n",
    );
    write(
        &sheets,
        "Item.tsv",
        "Item\nid\tname\tprice\tstackable\tweight\nint\tstring\tint\tbool\tfloat\n0\tex\t0\t0\t0\n7\tRope\t12\t1\t1.5\n",
    );

    let (registry, report) = ContentFactory::new(dir.path()).load_tables().unwrap();
    assert!(report.is_clean());
    let rope = registry.get::<i64, ItemData>(&7).unwrap();
    assert_eq!(rope.price, 12);
    assert_eq!(rope.weight, 1.5);
}
