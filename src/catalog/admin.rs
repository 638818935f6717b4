//! Admin command set (issued on queue 0)

use super::field;
use super::meanings::*;
use crate::table::{CommandClass, CommandDescriptor, FieldDescriptor};

fn admin(id: &str, name: &str, opcode: u8, description: &str) -> CommandDescriptor {
    CommandDescriptor::new(format!("admin-{}", id), name, opcode, CommandClass::Admin, description)
}

fn queue_id() -> FieldDescriptor {
    field("QID", 10, 0, 15, "Queue Identifier")
}

fn queue_size() -> FieldDescriptor {
    field("QSIZE", 10, 16, 31, "Queue Size (0's based)")
}

fn uuid_index() -> FieldDescriptor {
    field("UUID", 14, 0, 6, "UUID Index")
}

fn security_protocol(tail: FieldDescriptor) -> Vec<FieldDescriptor> {
    vec![
        field("NSSF", 10, 0, 7, "NVMe Security Specific Field"),
        field("SPSP0", 10, 8, 15, "SP Specific 0"),
        field("SPSP1", 10, 16, 23, "SP Specific 1"),
        field("SECP", 10, 24, 31, "Security Protocol"),
        tail,
    ]
}

fn directive() -> Vec<FieldDescriptor> {
    vec![
        field("NUMD", 10, 0, 31, "Number of Dwords (0's based)"),
        field("DOPER", 11, 0, 7, "Directive Operation"),
        field("DTYPE", 11, 8, 15, "Directive Type").with_meanings(DIRECTIVE_TYPES.iter().copied()),
        field("DSPEC", 11, 16, 31, "Directive Specific"),
    ]
}

pub(super) fn commands() -> Vec<CommandDescriptor> {
    vec![
        admin("delete-sq", "Delete I/O Submission Queue", 0x00, "Delete an I/O submission queue")
            .with_field(queue_id()),
        admin("create-sq", "Create I/O Submission Queue", 0x01, "Create an I/O submission queue")
            .with_fields([
                queue_id(),
                queue_size(),
                field("PC", 11, 0, 0, "Physically Contiguous"),
                field("QPRIO", 11, 1, 2, "Queue Priority").with_meanings(QUEUE_PRIORITY.iter().copied()),
                field("CQID", 11, 16, 31, "Completion Queue Identifier"),
                field("NVMSETID", 12, 0, 15, "NVM Set Identifier"),
            ]),
        admin("get-log-page", "Get Log Page", 0x02, "Read a log page")
            .with_fields([
                field("LID", 10, 0, 7, "Log Page Identifier").with_meanings(LOG_PAGE_IDS.iter().copied()),
                field("LSP", 10, 8, 14, "Log Specific Field"),
                field("RAE", 10, 15, 15, "Retain Asynchronous Event"),
                field("NUMDL", 10, 16, 31, "Number of Dwords Lower"),
                field("NUMDU", 11, 0, 15, "Number of Dwords Upper"),
                field("LSI", 11, 16, 31, "Log Specific Identifier"),
                field("LPOL", 12, 0, 31, "Log Page Offset Lower"),
                field("LPOU", 13, 0, 31, "Log Page Offset Upper"),
                uuid_index(),
                field("OT", 14, 23, 23, "Offset Type"),
                field("CSI", 14, 24, 31, "Command Set Identifier"),
            ]),
        admin("delete-cq", "Delete I/O Completion Queue", 0x04, "Delete an I/O completion queue")
            .with_field(queue_id()),
        admin("create-cq", "Create I/O Completion Queue", 0x05, "Create an I/O completion queue")
            .with_fields([
                queue_id(),
                queue_size(),
                field("PC", 11, 0, 0, "Physically Contiguous"),
                field("IEN", 11, 1, 1, "Interrupts Enabled"),
                field("IV", 11, 16, 31, "Interrupt Vector"),
            ]),
        admin("identify", "Identify", 0x06, "Return a controller or namespace data structure")
            .with_fields([
                field("CNS", 10, 0, 7, "Controller or Namespace Structure")
                    .with_meanings(IDENTIFY_CNS.iter().copied()),
                field("CNTID", 10, 16, 31, "Controller Identifier"),
                field("CNSSID", 11, 0, 15, "CNS Specific Identifier"),
                field("CSI", 11, 24, 31, "Command Set Identifier"),
                uuid_index(),
            ]),
        admin("abort", "Abort", 0x08, "Abort a previously submitted command")
            .with_fields([
                field("SQID", 10, 0, 15, "Submission Queue Identifier"),
                field("CID", 10, 16, 31, "Command Identifier"),
            ]),
        admin("set-features", "Set Features", 0x09, "Set a controller feature")
            .with_fields([
                field("FID", 10, 0, 7, "Feature Identifier").with_meanings(FEATURE_IDS.iter().copied()),
                field("SV", 10, 31, 31, "Save"),
                field("CDW11_VAL", 11, 0, 31, "Feature specific value"),
                uuid_index(),
            ]),
        admin("get-features", "Get Features", 0x0A, "Read a controller feature")
            .with_fields([
                field("FID", 10, 0, 7, "Feature Identifier").with_meanings(FEATURE_IDS.iter().copied()),
                field("SEL", 10, 8, 10, "Select").with_meanings(FEATURE_SELECT.iter().copied()),
                uuid_index(),
            ]),
        admin("async-event", "Asynchronous Event Request", 0x0C, "Wait for an asynchronous event"),
        admin("ns-mgmt", "Namespace Management", 0x0D, "Create or delete a namespace")
            .with_fields([
                field("SEL", 10, 0, 3, "Select").with_meanings(NS_MGMT_SELECT.iter().copied()),
                field("CSI", 11, 24, 31, "Command Set Identifier"),
            ]),
        admin("fw-commit", "Firmware Commit", 0x10, "Commit a firmware image to a slot")
            .with_fields([
                field("FS", 10, 0, 2, "Firmware Slot"),
                field("CA", 10, 3, 5, "Commit Action").with_meanings(COMMIT_ACTIONS.iter().copied()),
                field("BPID", 10, 31, 31, "Boot Partition ID"),
            ]),
        admin("fw-download", "Firmware Image Download", 0x11, "Download part of a firmware image")
            .with_fields([
                field("NUMD", 10, 0, 31, "Number of Dwords (0's based)"),
                field("OFST", 11, 0, 31, "Offset in dwords"),
            ]),
        admin("self-test", "Device Self-test", 0x14, "Start or abort a device self-test")
            .with_field(
                field("STC", 10, 0, 3, "Self-test Code").with_meanings(SELF_TEST_CODES.iter().copied()),
            ),
        admin("ns-attach", "Namespace Attachment", 0x15, "Attach or detach a namespace")
            .with_field(field("SEL", 10, 0, 3, "Select").with_meanings(NS_ATTACH_SELECT.iter().copied())),
        admin("keep-alive", "Keep Alive", 0x18, "Restart the keep alive timer"),
        admin("directive-send", "Directive Send", 0x19, "Send directive data").with_fields(directive()),
        admin("directive-recv", "Directive Receive", 0x1A, "Receive directive data").with_fields(directive()),
        admin("virt-mgmt", "Virtualization Management", 0x1C, "Manage controller resources")
            .with_fields([
                field("ACT", 10, 0, 3, "Action").with_meanings(VIRT_ACTIONS.iter().copied()),
                field("RT", 10, 8, 10, "Resource Type").with_meanings(VIRT_RESOURCE_TYPES.iter().copied()),
                field("CNTLID", 10, 16, 31, "Controller Identifier"),
                field("NR", 11, 0, 15, "Number of Controller Resources"),
            ]),
        admin("doorbell-buf", "Doorbell Buffer Config", 0x7C, "Configure shadow doorbell buffers"),
        admin("format-nvm", "Format NVM", 0x80, "Low level format of a namespace")
            .with_fields([
                field("LBAF", 10, 0, 3, "LBA Format (lower)"),
                field("MSET", 10, 4, 4, "Metadata Settings"),
                field("PI", 10, 5, 7, "Protection Information").with_meanings(PROTECTION_TYPES.iter().copied()),
                field("PIL", 10, 8, 8, "Protection Information Location"),
                field("SES", 10, 9, 11, "Secure Erase Settings").with_meanings(FORMAT_SES.iter().copied()),
                field("LBAFU", 10, 12, 13, "LBA Format (upper)"),
            ]),
        admin("security-send", "Security Send", 0x81, "Transfer security protocol data to the controller")
            .with_fields(security_protocol(field("TL", 11, 0, 31, "Transfer Length"))),
        admin("security-recv", "Security Receive", 0x82, "Transfer security protocol data from the controller")
            .with_fields(security_protocol(field("AL", 11, 0, 31, "Allocation Length"))),
        admin("sanitize", "Sanitize", 0x84, "Start a sanitize operation")
            .with_fields([
                field("SANACT", 10, 0, 2, "Sanitize Action").with_meanings(SANITIZE_ACTIONS.iter().copied()),
                field("AUSE", 10, 3, 3, "Allow Unrestricted Sanitize Exit"),
                field("OWPASS", 10, 4, 7, "Overwrite Pass Count"),
                field("OIPBP", 10, 8, 8, "Overwrite Invert Pattern Between Passes"),
                field("NDAS", 10, 9, 9, "No Deallocate After Sanitize"),
                field("OVRPAT", 11, 0, 31, "Overwrite Pattern"),
            ]),
        admin("get-lba-status", "Get LBA Status", 0x86, "Report potentially unrecoverable LBAs")
            .with_fields([
                field("SLBA_L", 10, 0, 31, "Starting LBA (lower)"),
                field("SLBA_U", 11, 0, 31, "Starting LBA (upper)"),
                field("MNDW", 12, 0, 31, "Maximum Number of Dwords"),
                field("RL", 13, 0, 15, "Range Length"),
                field("ATYPE", 13, 24, 31, "Action Type").with_meanings(LBA_STATUS_ACTIONS.iter().copied()),
            ]),
    ]
}
