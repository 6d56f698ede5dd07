//! ASCCONV framing markers and line grammar.

pub const BEGIN_MARKER: &str = "### ASCCONV BEGIN";
pub const END_MARKER: &str = "### ASCCONV END";
/// Closing token of both marker lines.
pub const MARKER_SUFFIX: &str = "###";

pub const COMMENT_PREFIX: char = '#';
pub const PATH_SEPARATOR: char = '.';

/// `<path> = <value>`, surrounding whitespace ignored.
pub const ASSIGNMENT_PATTERN: &str = r"^(?P<path>[^\s=]+)\s*=\s*(?P<value>.*?)\s*$";
/// Identifier with an optional non-negative integer subscript.
pub const SEGMENT_PATTERN: &str = r"^(?P<name>[A-Za-z_][A-Za-z0-9_]*)(?:\[(?P<index>[0-9]+)\])?$";
/// Plain decimal literal (integer or float, optional exponent).
pub const NUMBER_PATTERN: &str = r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$";

pub const HEX_PREFIXES: [&str; 2] = ["0x", "0X"];

/// Largest accepted list subscript; lists are materialized densely.
pub const MAX_LIST_INDEX: usize = 65_535;
