//! MapTool grid size identifiers keyed by the catalog's `Space` value.

/// `Space` values (in feet) and the size GUID fragment MapTool stores for them, from tiny to
/// colossal.
pub const SIZE_CODES: [(&str, &str); 7] = [
    ("1", "c5lFSoDAAAAKgABAA"),
    ("2.5", "c5lFSoEAAAAKgABAA"),
    ("5", "c9lFSoFAAAAKgABAQ"),
    ("10", "dBlFSoGAAAAKgABAA"),
    ("15", "dBlFSoHAAAAKgABAA"),
    ("20", "dFlFSoIAAAAKgABAQ"),
    ("30", "eF1FSoJAAAAKgABAQ"),
];

/// Look up the size code for a `Space` value.
pub fn size_code(space: &str) -> Option<&'static str> {
    SIZE_CODES
        .iter()
        .find(|(key, _)| *key == space)
        .map(|(_, code)| *code)
}

/// Full `baGUID` value for a `Space` value.
pub fn size_guid(space: &str) -> Option<String> {
    size_code(space).map(|code| format!("fwABA{code}=="))
}
