//! Value-representation driven item conversion.
//!
//! CSA stores every item as text; the VR only tells how that text should be
//! read. VRs missing from the table pass through as text without validation.

use crate::value::Value;

/// Parses one item's text; `None` means the text is not a valid number.
pub type Converter = fn(&str) -> Option<Value>;

static VR_CONVERTERS: [(&str, Converter); 8] = [
    ("FL", parse_float),
    ("FD", parse_float),
    ("DS", parse_float),
    ("SS", parse_int),
    ("US", parse_int),
    ("SL", parse_int),
    ("UL", parse_int),
    ("IS", parse_int),
];

/// Look up the converter for `vr`, if the VR is numeric.
///
/// # Examples
/// ```
/// use csa_header::csa::vr::converter_for;
/// use csa_header::Value;
///
/// let convert = converter_for("IS").unwrap();
/// assert_eq!(convert(" 42 "), Some(Value::Int(42)));
/// assert!(converter_for("LO").is_none());
/// ```
pub fn converter_for(vr: &str) -> Option<Converter> {
    VR_CONVERTERS
        .iter()
        .find(|(code, _)| *code == vr)
        .map(|&(_, converter)| converter)
}

fn parse_float(text: &str) -> Option<Value> {
    text.trim().parse::<f64>().ok().map(Value::Float)
}

fn parse_int(text: &str) -> Option<Value> {
    text.trim().parse::<i64>().ok().map(Value::Int)
}
