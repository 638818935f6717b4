//! Named values for enumerated fields

/// Feature identifiers (Set/Get Features FID)
pub const FEATURE_IDS: &[(u32, &str)] = &[
    (0x01, "Arbitration"),
    (0x02, "Power Management"),
    (0x03, "LBA Range Type"),
    (0x04, "Temperature Threshold"),
    (0x05, "Error Recovery"),
    (0x06, "Volatile Write Cache"),
    (0x07, "Number of Queues"),
    (0x08, "Interrupt Coalescing"),
    (0x09, "Interrupt Vector Configuration"),
    (0x0A, "Write Atomicity Normal"),
    (0x0B, "Asynchronous Event Configuration"),
    (0x0C, "Autonomous Power State Transition"),
    (0x0D, "Host Memory Buffer"),
    (0x0E, "Timestamp"),
    (0x0F, "Keep Alive Timer"),
    (0x10, "Host Controlled Thermal Management"),
    (0x11, "Non-Operational Power State Config"),
    (0x12, "Read Recovery Level Config"),
    (0x13, "Predictable Latency Mode Config"),
    (0x14, "Predictable Latency Mode Window"),
    (0x16, "Host Behavior Support"),
    (0x17, "Sanitize Config"),
    (0x18, "Endurance Group Event Configuration"),
    (0x19, "I/O Command Set Profile"),
    (0x80, "Software Progress Marker"),
    (0x81, "Host Identifier"),
    (0x82, "Reservation Notification Mask"),
    (0x83, "Reservation Persistence"),
    (0x84, "Namespace Write Protection Config"),
];

/// Log page identifiers (Get Log Page LID)
pub const LOG_PAGE_IDS: &[(u32, &str)] = &[
    (0x00, "Supported Log Pages"),
    (0x01, "Error Information"),
    (0x02, "SMART / Health Information"),
    (0x03, "Firmware Slot Information"),
    (0x04, "Changed Namespace List"),
    (0x05, "Commands Supported and Effects"),
    (0x06, "Device Self-test"),
    (0x07, "Telemetry Host-Initiated"),
    (0x08, "Telemetry Controller-Initiated"),
    (0x09, "Endurance Group Information"),
    (0x0A, "Predictable Latency Per NVM Set"),
    (0x0B, "Predictable Latency Event Aggregate"),
    (0x0C, "Asymmetric Namespace Access"),
    (0x0D, "Persistent Event Log"),
    (0x0F, "Endurance Group Event Aggregate"),
    (0x10, "Media Unit Status"),
    (0x11, "Supported Capacity Configuration List"),
    (0x12, "Feature Identifiers Supported and Effects"),
    (0x13, "NVMe-MI Commands Supported and Effects"),
    (0x14, "Command and Feature Lockdown"),
    (0x15, "Boot Partition"),
    (0x16, "Rotational Media Information"),
    (0x70, "Discovery"),
    (0x80, "Reservation Notification"),
    (0x81, "Sanitize Status"),
];

/// Sanitize actions (SANACT)
pub const SANITIZE_ACTIONS: &[(u32, &str)] = &[
    (1, "Exit Failure Mode"),
    (2, "Start Block Erase"),
    (3, "Start Overwrite"),
    (4, "Start Crypto Erase"),
];

/// Secure erase settings for Format NVM (SES)
pub const FORMAT_SES: &[(u32, &str)] = &[
    (0, "No secure erase"),
    (1, "User Data Erase"),
    (2, "Cryptographic Erase"),
];

/// Identify controller or namespace structure (CNS)
pub const IDENTIFY_CNS: &[(u32, &str)] = &[
    (0x00, "Identify Namespace"),
    (0x01, "Identify Controller"),
    (0x02, "Active Namespace ID List"),
    (0x03, "Namespace Identification Descriptor List"),
    (0x04, "NVM Set List"),
    (0x05, "I/O Command Set Specific Identify Namespace"),
    (0x06, "I/O Command Set Specific Identify Controller"),
    (0x07, "I/O Command Set Specific Active Namespace ID List"),
    (0x10, "Allocated Namespace ID List"),
    (0x11, "Identify Allocated Namespace"),
    (0x12, "Namespace Attached Controller List"),
    (0x13, "Controller List"),
    (0x14, "Primary Controller Capabilities"),
    (0x15, "Secondary Controller List"),
    (0x1C, "I/O Command Set Data Structure"),
];

/// Get Features select (SEL)
pub const FEATURE_SELECT: &[(u32, &str)] = &[
    (0, "Current"),
    (1, "Default"),
    (2, "Saved"),
    (3, "Supported Capabilities"),
];

/// Submission queue priority (QPRIO)
pub const QUEUE_PRIORITY: &[(u32, &str)] = &[
    (0, "Urgent"),
    (1, "High"),
    (2, "Medium"),
    (3, "Low"),
];

/// Firmware commit action (CA)
pub const COMMIT_ACTIONS: &[(u32, &str)] = &[
    (0, "Replace image, do not activate"),
    (1, "Replace image, activate at next reset"),
    (2, "Activate slot at next reset"),
    (3, "Replace and activate immediately"),
    (6, "Replace boot partition"),
    (7, "Mark boot partition active"),
];

/// Device self-test code (STC)
pub const SELF_TEST_CODES: &[(u32, &str)] = &[
    (0x1, "Short device self-test"),
    (0x2, "Extended device self-test"),
    (0xE, "Vendor specific"),
    (0xF, "Abort device self-test"),
];

pub const NS_MGMT_SELECT: &[(u32, &str)] = &[(0, "Create"), (1, "Delete")];

pub const NS_ATTACH_SELECT: &[(u32, &str)] = &[(0, "Controller Attach"), (1, "Controller Detach")];

pub const DIRECTIVE_TYPES: &[(u32, &str)] = &[(0x00, "Identify"), (0x01, "Streams")];

/// Virtualization management action (ACT)
pub const VIRT_ACTIONS: &[(u32, &str)] = &[
    (0x1, "Primary Controller Flexible Allocation"),
    (0x7, "Secondary Controller Offline"),
    (0x8, "Secondary Controller Assign"),
    (0x9, "Secondary Controller Online"),
];

pub const VIRT_RESOURCE_TYPES: &[(u32, &str)] = &[(0, "VQ Resources"), (1, "VI Resources")];

/// End-to-end protection type for Format NVM (PI)
pub const PROTECTION_TYPES: &[(u32, &str)] = &[
    (0, "Protection disabled"),
    (1, "Type 1"),
    (2, "Type 2"),
    (3, "Type 3"),
];

pub const LBA_STATUS_ACTIONS: &[(u32, &str)] = &[(0x10, "Tracked LBAs"), (0x11, "Untracked LBAs")];

pub const RESERVATION_TYPES: &[(u32, &str)] = &[
    (1, "Write Exclusive"),
    (2, "Exclusive Access"),
    (3, "Write Exclusive - Registrants Only"),
    (4, "Exclusive Access - Registrants Only"),
    (5, "Write Exclusive - All Registrants"),
    (6, "Exclusive Access - All Registrants"),
];

pub const REGISTER_ACTIONS: &[(u32, &str)] = &[(0, "Register"), (1, "Unregister"), (2, "Replace")];

/// Change persist through power loss state (CPTPL)
pub const PTPL_CHANGES: &[(u32, &str)] = &[(0, "No change"), (2, "Clear PTPL"), (3, "Set PTPL")];

pub const ACQUIRE_ACTIONS: &[(u32, &str)] = &[(0, "Acquire"), (1, "Preempt"), (2, "Preempt and Abort")];

pub const RELEASE_ACTIONS: &[(u32, &str)] = &[(0, "Release"), (1, "Clear")];
