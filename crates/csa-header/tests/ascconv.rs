use csa_header::{
    AscconvError, CsaAsciiHeader, OrderedMap, Value, parse_ascconv, parse_ascconv_text,
};

const RAW_ELEMENTS: &str = "\
GRADSPEC.asGPAData[0].sEddyCompensationY.aflTimeConstant[1]\t = \t0.917683601379
TXSPEC.asNucleusInfo[0].CompProtectionValues.MaxOfflineTxAmpl\t = \t534.113952637
SliceArray.asSlice[2].sNormal.dSag\t = \t-0.01623302609
PtabAbsStartPosZValid\t = \t0x1
";

fn path<'a>(root: &'a OrderedMap<Value>, key: &str) -> &'a Value {
    root.get(key).unwrap_or_else(|| panic!("missing key {key}"))
}

#[test]
fn nested_paths_build_sparse_lists() {
    let protocol = parse_ascconv_text(RAW_ELEMENTS).unwrap();
    assert_eq!(
        protocol.keys().collect::<Vec<_>>(),
        ["GRADSPEC", "TXSPEC", "SliceArray", "PtabAbsStartPosZValid"]
    );

    let time_constant = path(&protocol, "GRADSPEC")
        .get("asGPAData")
        .and_then(|list| list.at(0))
        .and_then(|gpa| gpa.get("sEddyCompensationY"))
        .and_then(|eddy| eddy.get("aflTimeConstant"))
        .unwrap();
    assert_eq!(
        time_constant,
        &Value::List(vec![Value::Null, Value::Float(0.917683601379)])
    );

    let amplitude = path(&protocol, "TXSPEC")
        .get("asNucleusInfo")
        .and_then(|list| list.at(0))
        .and_then(|info| info.get("CompProtectionValues"))
        .and_then(|values| values.get("MaxOfflineTxAmpl"));
    assert_eq!(amplitude, Some(&Value::Float(534.113952637)));

    let slices = path(&protocol, "SliceArray").get("asSlice").unwrap();
    let expected_slice: OrderedMap<Value> = [(
        "sNormal",
        Value::Map([("dSag", Value::Float(-0.01623302609))].into_iter().collect()),
    )]
    .into_iter()
    .collect();
    assert_eq!(
        slices,
        &Value::List(vec![Value::Null, Value::Null, Value::Map(expected_slice)])
    );

    assert_eq!(path(&protocol, "PtabAbsStartPosZValid"), &Value::Int(1));
}

#[test]
fn parsed_protocol_serializes_with_nulls_in_order() {
    let protocol = parse_ascconv_text(RAW_ELEMENTS).unwrap();
    let json = serde_json::to_string(&protocol).expect("json");
    let gradspec = concat!(
        r#"{"GRADSPEC":{"asGPAData":[{"sEddyCompensationY":"#,
        r#"{"aflTimeConstant":[null,0.917683601379]}}]}"#
    );
    assert!(json.starts_with(gradspec));
    assert!(json.ends_with(r#""PtabAbsStartPosZValid":1}"#));
}

#[test]
fn xprotocol_document_with_framed_block() {
    let text = "<XProtocol>\n{\n  <Name> \"PhoenixMetaProtocol\"\n}\n\
### ASCCONV BEGIN object=MrProtDataImpl@MrProtocolData version=51130001 converter=%MEASCONST%/ConverterList/Prot_Converter.txt ###\n\
ulVersion                                = 0x30d4a01\n\
tSequenceFileName                        = \"\"%SiemensSeq%\\ep2d_bold\"\"\n\
sKSpace.lBaseResolution                  = 64\n\
sKSpace.dPhaseResolution                 = 1\n\
# sKSpace.lPhaseEncodingLines = 64\n\
sSliceArray.asSlice[0].sPosition.dTra    = -17.5 # slice 1\n\
sSliceArray.lSize                        = 1\n\
### ASCCONV END ###\n\
</XProtocol>\n";
    let header = CsaAsciiHeader::from_text(text);
    let ascconv = header.parse_ascconv().unwrap();

    assert_eq!(ascconv.preamble, "<XProtocol>\n{\n  <Name> \"PhoenixMetaProtocol\"\n}");
    assert_eq!(ascconv.attributes.len(), 3);
    assert_eq!(ascconv.attributes[1], ("version".to_string(), "51130001".to_string()));

    let protocol = &ascconv.protocol;
    assert_eq!(protocol.get("ulVersion"), Some(&Value::Int(0x30d4a01)));
    assert_eq!(
        protocol.get("tSequenceFileName").and_then(Value::as_str),
        Some("%SiemensSeq%\\ep2d_bold")
    );
    let k_space = protocol.get("sKSpace").unwrap().as_map().unwrap();
    assert_eq!(k_space.keys().collect::<Vec<_>>(), ["lBaseResolution", "dPhaseResolution"]);
    let tra = protocol
        .get("sSliceArray")
        .and_then(|array| array.get("asSlice"))
        .and_then(|slices| slices.at(0))
        .and_then(|slice| slice.get("sPosition"))
        .and_then(|position| position.get("dTra"));
    assert_eq!(tra, Some(&Value::Float(-17.5)));
    assert_eq!(header.n_slices().unwrap(), Some(1));
}

#[test]
fn missing_end_marker_parses_to_end_of_text() {
    let text = "### ASCCONV BEGIN ###\nlA = 1\nlB = 2\n";
    let ascconv = parse_ascconv(text, "\"\"").unwrap();
    assert_eq!(ascconv.protocol.len(), 2);
    assert!(ascconv.attributes.is_empty());
    assert_eq!(ascconv.preamble, "");
}

#[test]
fn windows_line_endings_are_accepted() {
    let protocol = parse_ascconv_text("lA = 1\r\nsB.lC = 0x10\r\n").unwrap();
    assert_eq!(protocol.get("lA"), Some(&Value::Int(1)));
    assert_eq!(protocol.get("sB").and_then(|b| b.get("lC")), Some(&Value::Int(16)));
}

#[test]
fn errors_report_line_numbers() {
    let err = parse_ascconv_text("lA = 1\n\nsB[x] = 2\n").unwrap_err();
    assert_eq!(
        err,
        AscconvError::InvalidPath {
            line: 3,
            path: "sB[x]".to_string(),
        }
    );

    let err = parse_ascconv_text("sA.lB = 1\nsA.lB.lC = 2\n").unwrap_err();
    assert!(matches!(err, AscconvError::PathConflict { line: 2, .. }));
}

#[test]
fn ascii_header_from_bytes_counts_slices() {
    let header = CsaAsciiHeader::new(
        b"sSliceArray.lSize = 0x24\nsSliceArray.asSlice[35].dThickness = 2\n",
    );
    assert_eq!(header.n_slices().unwrap(), Some(36));
}
