use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::error::AscconvError;
use super::layout;
use crate::value::{OrderedMap, Value};

static ASSIGNMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(layout::ASSIGNMENT_PATTERN).expect("assignment pattern"));
static SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(layout::SEGMENT_PATTERN).expect("segment pattern"));
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(layout::NUMBER_PATTERN).expect("number pattern"));

/// A parsed ASCCONV block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ascconv {
    /// Parameter tree in first-assignment order.
    pub protocol: OrderedMap<Value>,
    /// Text skipped before the block (or before the first assignment when
    /// the text carries no `### ASCCONV BEGIN` marker).
    pub preamble: String,
    /// `key=value` tokens from the BEGIN marker line.
    pub attributes: Vec<(String, String)>,
}

/// One step along a parameter path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step<'t> {
    Key(&'t str),
    Index(usize),
}

/// Parse an ASCCONV protocol dump.
///
/// `delimiter` is the string quote used by the dump; Siemens protocol tags
/// use a doubled double-quote (`""`).
///
/// # Examples
/// ```
/// use csa_header::ascconv::parse_ascconv;
///
/// let text = "### ASCCONV BEGIN version=1 ###\n\
///             sSliceArray.asSlice[1].dThickness = 2.5\n\
///             tProtocolName = \"\"t1_mprage\"\"\n\
///             ### ASCCONV END ###";
/// let parsed = parse_ascconv(text, "\"\"").unwrap();
/// let slices = parsed.protocol.get("sSliceArray").unwrap().get("asSlice").unwrap();
/// assert!(slices.at(0).unwrap().is_null());
/// assert_eq!(slices.at(1).unwrap().get("dThickness").unwrap().as_f64(), Some(2.5));
/// assert_eq!(parsed.protocol.get("tProtocolName").unwrap().as_str(), Some("t1_mprage"));
/// assert_eq!(parsed.attributes, [("version".to_string(), "1".to_string())]);
/// ```
///
/// # Errors
/// Once the first assignment has been recognized, a malformed path, an
/// unparseable value or an assignment that contradicts an earlier one is an
/// error. Lines without `=`, comments and blank lines are skipped.
pub fn parse_ascconv(text: &str, delimiter: &str) -> Result<Ascconv, AscconvError> {
    let mut ascconv = Ascconv::default();
    let mut framed = false;
    let mut started = false;
    let mut offset = 0;

    for (line_index, raw_line) in text.split('\n').enumerate() {
        let line_start = offset;
        offset += raw_line.len() + 1;
        let line_no = line_index + 1;
        let line = raw_line.trim();

        if !framed {
            if let Some(rest) = line.strip_prefix(layout::BEGIN_MARKER) {
                framed = true;
                started = false;
                ascconv.protocol = OrderedMap::new();
                ascconv.preamble = preamble(text, line_start);
                ascconv.attributes = parse_attributes(rest);
                continue;
            }
        } else if line.starts_with(layout::END_MARKER) {
            break;
        }

        if line.is_empty() || line.starts_with(layout::COMMENT_PREFIX) {
            continue;
        }
        let Some(captures) = ASSIGNMENT.captures(line) else {
            debug!(line = line_no, "skipping non-assignment ASCCONV line");
            continue;
        };
        let path = &captures["path"];
        let raw_value = &captures["value"];

        let assignment = parse_path(path, line_no).and_then(|steps| {
            let value = parse_value(raw_value, delimiter).ok_or_else(|| {
                AscconvError::InvalidValue {
                    line: line_no,
                    value: raw_value.to_string(),
                }
            })?;
            Ok((steps, value))
        });
        let (steps, value) = match assignment {
            Ok(assignment) => assignment,
            Err(err) if started => return Err(err),
            Err(_) => {
                debug!(line = line_no, "skipping ASCCONV preamble line");
                continue;
            }
        };

        if !started {
            started = true;
            if !framed {
                ascconv.preamble = preamble(text, line_start);
            }
        }
        assign(&mut ascconv.protocol, &steps, value).map_err(|()| {
            AscconvError::PathConflict {
                line: line_no,
                path: path.to_string(),
            }
        })?;
    }

    if !started && !framed {
        ascconv.preamble = text.trim_end_matches(['\r', '\n']).to_string();
    }
    Ok(ascconv)
}

/// Parse an ASCCONV fragment with the Siemens `""` string delimiter and
/// return only the parameter tree.
///
/// # Examples
/// ```
/// use csa_header::ascconv::parse_ascconv_text;
///
/// let tree = parse_ascconv_text("PtabAbsStartPosZValid\t = \t0x1\n").unwrap();
/// assert_eq!(tree.get("PtabAbsStartPosZValid").unwrap().as_i64(), Some(1));
/// ```
pub fn parse_ascconv_text(text: &str) -> Result<OrderedMap<Value>, AscconvError> {
    parse_ascconv(text, "\"\"").map(|ascconv| ascconv.protocol)
}

fn preamble(text: &str, end: usize) -> String {
    text[..end.min(text.len())]
        .trim_end_matches(['\r', '\n'])
        .to_string()
}

fn parse_attributes(marker_rest: &str) -> Vec<(String, String)> {
    let body = marker_rest.trim();
    let body = body.strip_suffix(layout::MARKER_SUFFIX).unwrap_or(body);
    body.split_whitespace()
        .filter_map(|token| token.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn parse_path(path: &str, line: usize) -> Result<Vec<Step<'_>>, AscconvError> {
    let invalid = || AscconvError::InvalidPath {
        line,
        path: path.to_string(),
    };

    let mut steps = Vec::new();
    for segment in path.split(layout::PATH_SEPARATOR) {
        let captures = SEGMENT.captures(segment).ok_or_else(invalid)?;
        let name = captures.name("name").ok_or_else(invalid)?;
        steps.push(Step::Key(name.as_str()));
        if let Some(index) = captures.name("index") {
            let index = index
                .as_str()
                .parse::<usize>()
                .ok()
                .filter(|&index| index <= layout::MAX_LIST_INDEX)
                .ok_or_else(invalid)?;
            steps.push(Step::Index(index));
        }
    }
    Ok(steps)
}

/// Infer a scalar from its lexical form: quoted string, hex integer,
/// decimal integer or float.
fn parse_value(raw: &str, delimiter: &str) -> Option<Value> {
    if !delimiter.is_empty() {
        if let Some(rest) = raw.strip_prefix(delimiter) {
            let end = rest.find(delimiter)?;
            return Some(Value::Text(rest[..end].to_string()));
        }
    }

    let token = match raw.find(layout::COMMENT_PREFIX) {
        Some(comment) => raw[..comment].trim_end(),
        None => raw,
    };
    let (negative, unsigned) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    if let Some(digits) = layout::HEX_PREFIXES
        .iter()
        .find_map(|prefix| unsigned.strip_prefix(prefix))
    {
        let value = i64::from_str_radix(digits, 16).ok()?;
        return Some(Value::Int(if negative { -value } else { value }));
    }

    if !NUMBER.is_match(token) {
        return None;
    }
    if let Ok(value) = token.parse::<i64>() {
        return Some(Value::Int(value));
    }
    token.parse::<f64>().ok().map(Value::Float)
}

/// Create or extend exactly the path named by `steps` and store `value` at
/// its end. Fails when the path runs through a value of the wrong shape.
fn assign(root: &mut OrderedMap<Value>, steps: &[Step<'_>], value: Value) -> Result<(), ()> {
    let Some((Step::Key(first), rest)) = steps.split_first() else {
        return Err(());
    };
    let mut slot = root.get_or_insert_with(first, || Value::Null);
    for step in rest {
        slot = descend(slot, step)?;
    }
    *slot = value;
    Ok(())
}

fn descend<'v>(slot: &'v mut Value, step: &Step<'_>) -> Result<&'v mut Value, ()> {
    if slot.is_null() {
        *slot = match step {
            Step::Key(_) => Value::Map(OrderedMap::new()),
            Step::Index(_) => Value::List(Vec::new()),
        };
    }
    match (slot, step) {
        (Value::Map(map), Step::Key(key)) => Ok(map.get_or_insert_with(key, || Value::Null)),
        (Value::List(items), &Step::Index(index)) => {
            if items.len() <= index {
                items.resize(index + 1, Value::Null);
            }
            Ok(&mut items[index])
        }
        _ => Err(()),
    }
}
