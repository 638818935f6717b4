//! Tests for the built-in command catalog
//!
//! These tests verify:
//! - The catalog passes table validation
//! - Id conventions and class split
//! - Layouts of frequently used commands
//! - Value meanings are attached as table data

use sqetrace::catalog;
use sqetrace::table::{CommandClass, FieldTable};

// =============================================================================
// Helper Functions
// =============================================================================

fn builtin() -> FieldTable {
    catalog::builtin().unwrap()
}

fn assert_field(table: &FieldTable, id: &str, name: &str, word: u8, start: u8, end: u8) {
    let command = table.require(id).unwrap();
    let field = command
        .field(name)
        .unwrap_or_else(|| panic!("{} has no field {}", id, name));

    assert_eq!(
        (field.word_index, field.bit_start, field.bit_end),
        (word, start, end),
        "{}.{}",
        id,
        name
    );
}

// =============================================================================
// Structure Tests
// =============================================================================

#[test]
fn test_catalog_is_a_valid_table() {
    let table = builtin();

    assert_eq!(table.len(), catalog::commands().len());
    assert!(table.admin_commands().count() >= 20);
    assert!(table.io_commands().count() >= 10);
}

#[test]
fn test_catalog_ids_carry_class_prefix() {
    for command in builtin().commands() {
        let prefix = match command.class {
            CommandClass::Admin => "admin-",
            CommandClass::Io => "io-",
        };
        assert!(command.id.starts_with(prefix), "{}", command.id);
    }
}

#[test]
fn test_catalog_lists_admin_before_io() {
    let table = builtin();
    let first_io = table
        .commands()
        .iter()
        .position(|c| c.class == CommandClass::Io)
        .unwrap();

    assert!(table.commands()[first_io..]
        .iter()
        .all(|c| c.class == CommandClass::Io));
}

#[test]
fn test_catalog_shares_opcodes_across_classes() {
    let table = builtin();

    // 0x02 is Get Log Page on the admin queue and Read on I/O queues
    assert_eq!(table.lookup(0x02, CommandClass::Admin).unwrap().id, "admin-get-log-page");
    assert_eq!(table.lookup(0x02, CommandClass::Io).unwrap().id, "io-read");
    assert_eq!(table.lookup(0x00, CommandClass::Io).unwrap().id, "io-flush");
}

#[test]
fn test_catalog_commands_without_fields() {
    let table = builtin();

    for id in ["admin-async-event", "admin-keep-alive", "admin-doorbell-buf", "io-flush"] {
        assert!(table.require(id).unwrap().fields.is_empty(), "{}", id);
    }
}

// =============================================================================
// Layout Tests
// =============================================================================

#[test]
fn test_catalog_read_write_layout() {
    let table = builtin();

    for id in ["io-read", "io-write"] {
        assert_field(&table, id, "SLBA_L", 10, 0, 31);
        assert_field(&table, id, "SLBA_U", 11, 0, 31);
        assert_field(&table, id, "NLB", 12, 0, 15);
        assert_field(&table, id, "PRINFO", 12, 26, 29);
        assert_field(&table, id, "FUA", 12, 30, 30);
        assert_field(&table, id, "LR", 12, 31, 31);
        assert_field(&table, id, "DSM", 13, 0, 7);
        assert_field(&table, id, "ELBATM", 15, 16, 31);
    }

    assert_field(&table, "io-write", "DTYPE", 12, 20, 23);
    assert_field(&table, "io-write", "DSPEC", 13, 16, 31);
    assert!(table.require("io-read").unwrap().field("DTYPE").is_none());
}

#[test]
fn test_catalog_identify_layout() {
    let table = builtin();

    assert_field(&table, "admin-identify", "CNS", 10, 0, 7);
    assert_field(&table, "admin-identify", "CNTID", 10, 16, 31);
    assert_field(&table, "admin-identify", "CSI", 11, 24, 31);
    assert_field(&table, "admin-identify", "UUID", 14, 0, 6);
}

#[test]
fn test_catalog_get_log_page_layout() {
    let table = builtin();

    assert_field(&table, "admin-get-log-page", "LID", 10, 0, 7);
    assert_field(&table, "admin-get-log-page", "RAE", 10, 15, 15);
    assert_field(&table, "admin-get-log-page", "NUMDL", 10, 16, 31);
    assert_field(&table, "admin-get-log-page", "NUMDU", 11, 0, 15);
    assert_field(&table, "admin-get-log-page", "LPOU", 13, 0, 31);
}

#[test]
fn test_catalog_format_and_sanitize_layout() {
    let table = builtin();

    assert_field(&table, "admin-format-nvm", "LBAF", 10, 0, 3);
    assert_field(&table, "admin-format-nvm", "SES", 10, 9, 11);
    assert_field(&table, "admin-sanitize", "SANACT", 10, 0, 2);
    assert_field(&table, "admin-sanitize", "OVRPAT", 11, 0, 31);
}

// =============================================================================
// Value Meaning Tests
// =============================================================================

#[test]
fn test_catalog_feature_ids() {
    let table = builtin();

    for id in ["admin-set-features", "admin-get-features"] {
        let fid = table.require(id).unwrap().field("FID").unwrap();
        assert_eq!(fid.meaning(0x06), Some("Volatile Write Cache"));
        assert_eq!(fid.meaning(0x07), Some("Number of Queues"));
    }
}

#[test]
fn test_catalog_log_page_ids() {
    let table = builtin();
    let lid = table.require("admin-get-log-page").unwrap().field("LID").unwrap();

    assert_eq!(lid.meaning(0x02), Some("SMART / Health Information"));
    assert_eq!(lid.meaning(0x81), Some("Sanitize Status"));
    assert_eq!(lid.meaning(0xee), None);
}

#[test]
fn test_catalog_sanitize_and_format_meanings() {
    let table = builtin();

    let sanact = table.require("admin-sanitize").unwrap().field("SANACT").unwrap();
    assert_eq!(sanact.meaning(4), Some("Start Crypto Erase"));

    let ses = table.require("admin-format-nvm").unwrap().field("SES").unwrap();
    assert_eq!(ses.meaning(1), Some("User Data Erase"));

    let cns = table.require("admin-identify").unwrap().field("CNS").unwrap();
    assert_eq!(cns.meaning(1), Some("Identify Controller"));
}

#[test]
fn test_catalog_meanings_fit_their_fields() {
    for command in builtin().commands() {
        for field in &command.fields {
            for value in field.value_meanings.keys() {
                assert!(
                    *value <= field.max_value(),
                    "{}.{} meaning for {} exceeds field width",
                    command.id,
                    field.name,
                    value
                );
            }
        }
    }
}

#[test]
fn test_catalog_exports_as_json() {
    let table = builtin();
    let json = table.to_json_pretty().unwrap();
    let reloaded = FieldTable::from_json(&json).unwrap();

    assert_eq!(reloaded.commands(), table.commands());
}
