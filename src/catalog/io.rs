//! NVM I/O command set (issued on queues 1 and up)

use super::field;
use super::meanings::*;
use crate::table::{CommandClass, CommandDescriptor, FieldDescriptor};

fn io(id: &str, name: &str, opcode: u8, description: &str) -> CommandDescriptor {
    CommandDescriptor::new(format!("io-{}", id), name, opcode, CommandClass::Io, description)
}

/// SLBA split across CDW10/11 plus the 0's based block count
fn lba_range() -> [FieldDescriptor; 3] {
    [
        field("SLBA_L", 10, 0, 31, "Starting LBA (lower)"),
        field("SLBA_U", 11, 0, 31, "Starting LBA (upper)"),
        field("NLB", 12, 0, 15, "Number of Logical Blocks (0's based)"),
    ]
}

fn protection() -> [FieldDescriptor; 3] {
    [
        field("PRINFO", 12, 26, 29, "Protection Information Field"),
        field("FUA", 12, 30, 30, "Force Unit Access"),
        field("LR", 12, 31, 31, "Limited Retry"),
    ]
}

fn end_to_end() -> [FieldDescriptor; 3] {
    [
        field("EILBRT", 14, 0, 31, "Expected Initial Logical Block Reference Tag"),
        field("ELBAT", 15, 0, 15, "Expected Logical Block Application Tag"),
        field("ELBATM", 15, 16, 31, "Expected Logical Block Application Tag Mask"),
    ]
}

fn dataset_management() -> FieldDescriptor {
    field("DSM", 13, 0, 7, "Dataset Management")
}

fn ignore_existing_key() -> FieldDescriptor {
    field("IEKEY", 10, 3, 3, "Ignore Existing Key")
}

fn reservation_type() -> FieldDescriptor {
    field("RTYPE", 10, 8, 15, "Reservation Type").with_meanings(RESERVATION_TYPES.iter().copied())
}

pub(super) fn commands() -> Vec<CommandDescriptor> {
    vec![
        io("flush", "Flush", 0x00, "Commit volatile data to non-volatile media"),
        io("write", "Write", 0x01, "Write logical blocks")
            .with_fields(lba_range())
            .with_field(field("DTYPE", 12, 20, 23, "Directive Type").with_meanings(DIRECTIVE_TYPES.iter().copied()))
            .with_fields(protection())
            .with_fields([dataset_management(), field("DSPEC", 13, 16, 31, "Directive Specific")])
            .with_fields(end_to_end()),
        io("read", "Read", 0x02, "Read logical blocks")
            .with_fields(lba_range())
            .with_fields(protection())
            .with_field(dataset_management())
            .with_fields(end_to_end()),
        io("write-uncorrectable", "Write Uncorrectable", 0x04, "Mark logical blocks invalid")
            .with_fields(lba_range()),
        io("compare", "Compare", 0x05, "Compare logical blocks with host data")
            .with_fields(lba_range())
            .with_fields(protection())
            .with_fields(end_to_end()),
        io("write-zeroes", "Write Zeroes", 0x08, "Set logical blocks to zero")
            .with_fields(lba_range())
            .with_field(field("DEAC", 12, 25, 25, "Deallocate"))
            .with_fields(protection())
            .with_fields(end_to_end()),
        io("dsm", "Dataset Management", 0x09, "Describe attributes of LBA ranges")
            .with_fields([
                field("NR", 10, 0, 7, "Number of Ranges (0's based)"),
                field("IDR", 11, 0, 0, "Integral Dataset for Read"),
                field("IDW", 11, 1, 1, "Integral Dataset for Write"),
                field("AD", 11, 2, 2, "Deallocate"),
            ]),
        io("verify", "Verify", 0x0C, "Verify integrity of stored data")
            .with_fields(lba_range())
            .with_fields(protection())
            .with_fields(end_to_end()),
        io("resv-register", "Reservation Register", 0x0D, "Register or unregister a reservation key")
            .with_fields([
                field("RREGA", 10, 0, 2, "Reservation Register Action")
                    .with_meanings(REGISTER_ACTIONS.iter().copied()),
                ignore_existing_key(),
                field("CPTPL", 10, 30, 31, "Change Persist Through Power Loss")
                    .with_meanings(PTPL_CHANGES.iter().copied()),
            ]),
        io("resv-report", "Reservation Report", 0x0E, "Report reservation status")
            .with_fields([
                field("NUMD", 10, 0, 31, "Number of Dwords (0's based)"),
                field("EDS", 11, 0, 0, "Extended Data Structure"),
            ]),
        io("resv-acquire", "Reservation Acquire", 0x11, "Acquire or preempt a reservation")
            .with_fields([
                field("RACQA", 10, 0, 2, "Reservation Acquire Action")
                    .with_meanings(ACQUIRE_ACTIONS.iter().copied()),
                ignore_existing_key(),
                reservation_type(),
            ]),
        io("resv-release", "Reservation Release", 0x15, "Release or clear a reservation")
            .with_fields([
                field("RRELA", 10, 0, 2, "Reservation Release Action")
                    .with_meanings(RELEASE_ACTIONS.iter().copied()),
                ignore_existing_key(),
                reservation_type(),
            ]),
    ]
}
