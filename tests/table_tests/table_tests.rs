//! Tests for the field table
//!
//! These tests verify:
//! - Descriptor helpers (width, mask, bit range, overlap)
//! - Load-time validation
//! - Lookups by id and by (opcode, class)
//! - JSON table files
//! - Atomic table replacement

use std::fs;
use std::sync::Arc;
use std::thread;

use sqetrace::table::{CommandClass, CommandDescriptor, FieldDescriptor, FieldTable, SharedTable};
use sqetrace::SqeError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn read_command() -> CommandDescriptor {
    CommandDescriptor::new("io-read", "Read", 0x02, CommandClass::Io, "Read blocks").with_fields([
        FieldDescriptor::new("startBlock", 10, 0, 31, "Starting block"),
        FieldDescriptor::new("blockCount", 12, 0, 15, "Blocks, 0's based"),
        FieldDescriptor::new("fua", 12, 30, 30, "Force unit access"),
    ])
}

fn identify_command() -> CommandDescriptor {
    CommandDescriptor::new("admin-identify", "Identify", 0x06, CommandClass::Admin, "")
        .with_field(FieldDescriptor::new("cns", 10, 0, 7, "").with_meanings([(1, "Controller")]))
}

fn invalid_table_message(result: sqetrace::Result<FieldTable>) -> String {
    match result {
        Err(SqeError::InvalidTable(message)) => message,
        Err(other) => panic!("expected InvalidTable, got {:?}", other),
        Ok(_) => panic!("expected InvalidTable, table was accepted"),
    }
}

// =============================================================================
// Descriptor Tests
// =============================================================================

#[test]
fn test_field_width_and_max_value() {
    let single = FieldDescriptor::new("bit", 10, 5, 5, "");
    let byte = FieldDescriptor::new("byte", 10, 8, 15, "");
    let full = FieldDescriptor::new("word", 10, 0, 31, "");

    assert_eq!(single.width(), 1);
    assert_eq!(single.max_value(), 1);
    assert_eq!(byte.width(), 8);
    assert_eq!(byte.max_value(), 0xff);
    assert_eq!(full.width(), 32);
    assert_eq!(full.max_value(), u32::MAX);
}

#[test]
fn test_field_mask_is_in_position() {
    assert_eq!(FieldDescriptor::new("a", 10, 8, 15, "").mask(), 0x0000_ff00);
    assert_eq!(FieldDescriptor::new("b", 10, 31, 31, "").mask(), 0x8000_0000);
    assert_eq!(FieldDescriptor::new("c", 10, 0, 31, "").mask(), u32::MAX);
}

#[test]
fn test_field_bit_range_rendering() {
    assert_eq!(FieldDescriptor::new("a", 10, 16, 31, "").bit_range(), "[31:16]");
    assert_eq!(FieldDescriptor::new("b", 10, 3, 3, "").bit_range(), "[3]");
}

#[test]
fn test_field_overlap_requires_same_word() {
    let low = FieldDescriptor::new("low", 10, 0, 7, "");
    let mid = FieldDescriptor::new("mid", 10, 7, 8, "");
    let other_word = FieldDescriptor::new("other", 11, 0, 7, "");

    assert!(low.overlaps(&mid));
    assert!(mid.overlaps(&low));
    assert!(!low.overlaps(&other_word));
}

#[test]
fn test_field_meaning_lookup() {
    let command = identify_command();
    let cns = command.field("cns").unwrap();

    assert_eq!(cns.meaning(1), Some("Controller"));
    assert_eq!(cns.meaning(2), None);
}

#[test]
fn test_command_fields_in_word() {
    let command = read_command();
    let names: Vec<&str> = command.fields_in_word(12).map(|f| f.name.as_str()).collect();

    assert_eq!(names, vec!["blockCount", "fua"]);
    assert_eq!(command.fields_in_word(13).count(), 0);
}

#[test]
fn test_command_class_parsing() {
    assert_eq!("admin".parse::<CommandClass>().unwrap(), CommandClass::Admin);
    assert_eq!("IO".parse::<CommandClass>().unwrap(), CommandClass::Io);
    assert_eq!("i/o".parse::<CommandClass>().unwrap(), CommandClass::Io);
    assert!("vendor".parse::<CommandClass>().is_err());

    assert_eq!(CommandClass::from_queue_id(0), CommandClass::Admin);
    assert_eq!(CommandClass::from_queue_id(7), CommandClass::Io);
    assert_eq!(CommandClass::Admin.other(), CommandClass::Io);
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_table_accepts_valid_commands() {
    let table = FieldTable::new(vec![read_command(), identify_command()]).unwrap();

    assert_eq!(table.len(), 2);
    assert!(!table.is_empty());
}

#[test]
fn test_table_rejects_overlapping_fields() {
    let command = CommandDescriptor::new("io-bad", "Bad", 0x01, CommandClass::Io, "").with_fields([
        FieldDescriptor::new("a", 10, 0, 7, ""),
        FieldDescriptor::new("b", 10, 4, 11, ""),
    ]);

    let message = invalid_table_message(FieldTable::new(vec![command]));
    assert!(message.contains("overlaps"), "{}", message);
    assert!(message.contains("'b'"), "{}", message);
}

#[test]
fn test_table_allows_adjacent_fields() {
    let command = CommandDescriptor::new("io-ok", "Ok", 0x01, CommandClass::Io, "").with_fields([
        FieldDescriptor::new("a", 10, 0, 7, ""),
        FieldDescriptor::new("b", 10, 8, 15, ""),
        FieldDescriptor::new("c", 11, 0, 7, ""),
    ]);

    assert!(FieldTable::new(vec![command]).is_ok());
}

#[test]
fn test_table_rejects_word_outside_command_words() {
    for word in [0u8, 9, 16, 255] {
        let command = CommandDescriptor::new("io-bad", "Bad", 0x01, CommandClass::Io, "")
            .with_field(FieldDescriptor::new("a", word, 0, 7, ""));

        let message = invalid_table_message(FieldTable::new(vec![command]));
        assert!(message.contains("uses word"), "{}", message);
    }
}

#[test]
fn test_table_rejects_bad_bit_ranges() {
    let reversed = CommandDescriptor::new("io-rev", "Rev", 0x01, CommandClass::Io, "")
        .with_field(FieldDescriptor::new("a", 10, 8, 7, ""));
    let too_high = CommandDescriptor::new("io-high", "High", 0x02, CommandClass::Io, "")
        .with_field(FieldDescriptor::new("a", 10, 0, 32, ""));

    assert!(invalid_table_message(FieldTable::new(vec![reversed])).contains("bit range"));
    assert!(invalid_table_message(FieldTable::new(vec![too_high])).contains("bit range"));
}

#[test]
fn test_table_rejects_duplicate_field_names() {
    let command = CommandDescriptor::new("io-dup", "Dup", 0x01, CommandClass::Io, "").with_fields([
        FieldDescriptor::new("a", 10, 0, 7, ""),
        FieldDescriptor::new("a", 11, 0, 7, ""),
    ]);

    assert!(invalid_table_message(FieldTable::new(vec![command])).contains("declared twice"));
}

#[test]
fn test_table_rejects_duplicate_ids() {
    let first = CommandDescriptor::new("io-x", "X", 0x01, CommandClass::Io, "");
    let second = CommandDescriptor::new("io-x", "X again", 0x02, CommandClass::Io, "");

    assert!(invalid_table_message(FieldTable::new(vec![first, second])).contains("duplicate command id"));
}

#[test]
fn test_table_rejects_duplicate_opcode_within_class() {
    let first = CommandDescriptor::new("io-a", "A", 0x01, CommandClass::Io, "");
    let second = CommandDescriptor::new("io-b", "B", 0x01, CommandClass::Io, "");

    let message = invalid_table_message(FieldTable::new(vec![first, second]));
    assert!(message.contains("0x01"), "{}", message);
}

#[test]
fn test_table_allows_same_opcode_across_classes() {
    let admin = CommandDescriptor::new("admin-a", "A", 0x02, CommandClass::Admin, "");
    let io = CommandDescriptor::new("io-a", "A", 0x02, CommandClass::Io, "");

    let table = FieldTable::new(vec![admin, io]).unwrap();
    assert_eq!(table.lookup(0x02, CommandClass::Admin).unwrap().id, "admin-a");
    assert_eq!(table.lookup(0x02, CommandClass::Io).unwrap().id, "io-a");
}

#[test]
fn test_table_rejects_empty_id() {
    let command = CommandDescriptor::new("  ", "Blank", 0x01, CommandClass::Io, "");
    assert!(invalid_table_message(FieldTable::new(vec![command])).contains("empty id"));
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[test]
fn test_table_get_and_require() {
    let table = FieldTable::new(vec![read_command(), identify_command()]).unwrap();

    assert_eq!(table.get("io-read").unwrap().opcode, 0x02);
    assert!(table.get("io-write").is_none());

    match table.require("io-write") {
        Err(SqeError::UnknownCommand(id)) => assert_eq!(id, "io-write"),
        other => panic!("expected UnknownCommand, got {:?}", other),
    }
}

#[test]
fn test_table_lookup_by_opcode_and_class() {
    let table = FieldTable::new(vec![read_command(), identify_command()]).unwrap();

    assert_eq!(table.lookup(0x06, CommandClass::Admin).unwrap().id, "admin-identify");
    assert!(table.lookup(0x06, CommandClass::Io).is_none());
    assert!(table.lookup(0x99, CommandClass::Admin).is_none());
}

#[test]
fn test_table_listing_by_class_keeps_order() {
    let table = FieldTable::new(vec![read_command(), identify_command()]).unwrap();

    let all: Vec<&str> = table.commands().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(all, vec!["io-read", "admin-identify"]);

    assert_eq!(table.admin_commands().count(), 1);
    assert_eq!(table.io_commands().next().unwrap().id, "io-read");
}

// =============================================================================
// JSON Tests
// =============================================================================

#[test]
fn test_table_from_json() {
    let json = r#"{
        "commands": [
            {
                "id": "io-read",
                "name": "Read",
                "opcode": 2,
                "class": "io",
                "fields": [
                    { "name": "startBlock", "wordIndex": 10, "bitStart": 0, "bitEnd": 31 },
                    { "name": "blockCount", "wordIndex": 12, "bitStart": 0, "bitEnd": 15,
                      "description": "Blocks", "valueMeanings": { "0": "One block" } }
                ]
            }
        ]
    }"#;

    let table = FieldTable::from_json(json).unwrap();
    let read = table.require("io-read").unwrap();

    assert_eq!(read.class, CommandClass::Io);
    assert_eq!(read.fields.len(), 2);
    assert_eq!(read.field("startBlock").unwrap().description, "");
    assert_eq!(read.field("blockCount").unwrap().meaning(0), Some("One block"));
}

#[test]
fn test_table_from_json_is_validated() {
    let json = r#"{ "commands": [ { "id": "io-x", "name": "X", "opcode": 1, "class": "io",
        "fields": [ { "name": "a", "wordIndex": 3, "bitStart": 0, "bitEnd": 7 } ] } ] }"#;

    assert!(matches!(FieldTable::from_json(json), Err(SqeError::InvalidTable(_))));
}

#[test]
fn test_table_from_malformed_json() {
    assert!(matches!(
        FieldTable::from_json("{ not json"),
        Err(SqeError::Serialization(_))
    ));
}

#[test]
fn test_table_json_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("table.json");

    let original = FieldTable::new(vec![read_command(), identify_command()]).unwrap();
    fs::write(&path, original.to_json_pretty().unwrap()).unwrap();

    let loaded = FieldTable::from_path(&path).unwrap();
    assert_eq!(loaded.commands(), original.commands());
}

#[test]
fn test_table_from_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = FieldTable::from_path(temp_dir.path().join("missing.json"));

    assert!(matches!(result, Err(SqeError::Io(_))));
}

// =============================================================================
// Shared Table Tests
// =============================================================================

#[test]
fn test_shared_table_replace_returns_previous() {
    let shared = SharedTable::new(FieldTable::new(vec![read_command()]).unwrap());
    let before = shared.snapshot();

    let previous = shared.replace(FieldTable::new(vec![read_command(), identify_command()]).unwrap());

    assert!(Arc::ptr_eq(&before, &previous));
    assert_eq!(before.len(), 1);
    assert_eq!(shared.snapshot().len(), 2);
}

#[test]
fn test_shared_table_snapshot_survives_replace() {
    let shared = SharedTable::new(FieldTable::new(vec![read_command()]).unwrap());
    let snapshot = shared.snapshot();

    shared.replace(FieldTable::default());

    assert!(snapshot.get("io-read").is_some());
    assert!(shared.snapshot().is_empty());
}

#[test]
fn test_shared_table_concurrent_readers_see_whole_tables() {
    let small = FieldTable::new(vec![read_command()]).unwrap();
    let large = FieldTable::new(vec![read_command(), identify_command()]).unwrap();
    let shared = Arc::new(SharedTable::new(small.clone()));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for _ in 0..1000 {
                    let snapshot = shared.snapshot();
                    assert!(snapshot.len() == 1 || snapshot.len() == 2);
                    assert!(snapshot.get("io-read").is_some());
                }
            })
        })
        .collect();

    for i in 0..100 {
        let next = if i % 2 == 0 { large.clone() } else { small.clone() };
        shared.replace(next);
    }

    for reader in readers {
        reader.join().unwrap();
    }
}
