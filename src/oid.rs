//! Numeric OID syntax validation.
//!
//! Several registry operations (`get_schema_name`, `unregister`) accept only
//! dotted-numeric OIDs and must reject alias names before touching any map.
//! This module provides that gate.

/// Check whether a string is a well-formed dotted-numeric OID.
///
/// Validates the ITU-T/ISO arc rules:
/// - at least two arcs, separated by single dots,
/// - every arc is a non-empty run of decimal digits,
/// - no leading zeros (the arc `0` itself is fine),
/// - the first arc is 0, 1 or 2,
/// - when the first arc is 0 or 1, the second arc is below 40.
///
/// This is a syntax check only: it says nothing about whether the OID is
/// registered anywhere.
pub fn is_numeric_oid(value: &str) -> bool {
    let mut arcs = value.split('.');

    let first = match arcs.next().and_then(parse_arc) {
        Some(arc @ 0..=2) => arc,
        _ => return false,
    };

    let second = match arcs.next().and_then(parse_arc) {
        Some(arc) => arc,
        None => return false,
    };

    if first < 2 && second >= 40 {
        return false;
    }

    arcs.all(|arc| parse_arc(arc).is_some())
}

/// Parse a single OID arc, rejecting empty arcs and leading zeros.
fn parse_arc(arc: &str) -> Option<u64> {
    if arc.is_empty() || (arc.len() > 1 && arc.starts_with('0')) {
        return None;
    }

    if !arc.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Arcs longer than u64 are not seen in practice; reject rather than wrap.
    arc.parse().ok()
}
