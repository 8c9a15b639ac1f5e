use std::io::Cursor;

use nbib_endnote::host::run_once;
use nbib_endnote::transport::{self, INVALID_MESSAGE, PROCESSING_FAILED, Request, Response};
use nbib_endnote::{ConvertOptions, Diagnostic, DirectorySink, MemorySink, TransportError};
use pretty_assertions::assert_eq;

const RECORD: &str = r#"PMID- 38012345
OWN - NLM
STAT- MEDLINE
DCOM- 20240612
IS  - 1549-1676 (Electronic)
IS  - 1549-1277 (Linking)
VI  - 21
IP  - 6
DP  - 2024 Jun
TI  - Effects of things on other things: a randomized {pilot} trial.
PG  - e1004321
LID - e1004321 [pii]
LID - 10.1371/journal.pmed.1004321 [doi]
AB  - BACKGROUND: Things matter. METHODS: We measured
      things & other things.
FAU - Doe, Jane
AU  - Doe J
AD  - Department of Things, University of Somewhere, Somewhere, UK.
FAU - O'Brien, Sean-Paul
AU  - O'Brien SP
FAU - Wałęsa, Lech
AU  - Walesa L
LA  - eng
PT  - Journal Article
PT  - Randomized Controlled Trial
PL  - United States
TA  - PLoS Med
JT  - PLoS medicine
MH  - Humans
MH  - Things/*metabolism
OT  - things
EDAT- 2024/06/03 18:42
SO  - PLoS Med. 2024 Jun 3;21(6):e1004321. doi: 10.1371/journal.pmed.1004321.
"#;

fn framed_request(request: &Request) -> Cursor<Vec<u8>> {
    let mut input = Vec::new();
    transport::write_frame(&mut input, &serde_json::to_vec(request).unwrap()).unwrap();
    Cursor::new(input)
}

fn read_response(output: Vec<u8>) -> Response {
    let body = transport::read_frame(&mut Cursor::new(output), 1024)
        .unwrap()
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[test]
fn test_successful_exchange() {
    let mut input = framed_request(&Request::new(RECORD));
    let mut output = Vec::new();
    let mut sink = MemorySink::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    let sent = run_once(
        &mut input,
        &mut output,
        &mut sink,
        &ConvertOptions::new(),
        &mut diagnostics,
    )
    .unwrap();

    assert_eq!(sent, Some(Response::Success));
    assert_eq!(read_response(output), Response::Success);
    assert!(sink.is_released());

    let payload = sink.last().unwrap();
    let rtf = String::from_utf8(payload.rtf.clone()).unwrap();
    assert!(rtf.starts_with(r"{\rtf1\ansi\deff0{\fonttbl{\f0 Arial;}}\pard\fs24 {\field{\*\fldinst { ADDIN EN.CITE <EndNote><Cite><Author>Doe</Author><Year>2024</Year><RecNum>38012345</RecNum>"));
    assert!(rtf.ends_with(r" }}{\fldrslt (Doe, 2024)}}}"));
    assert!(rtf.contains("<author>Doe, Jane</author><author>O&apos;Brien, Sean-Paul</author><author>Wa??sa, Lech</author>"));
    assert!(rtf.contains("<title>Effects of things on other things: a randomized {pilot} trial</title>"));
    assert!(rtf.contains("<secondary-title>Plos Medicine</secondary-title>"));
    assert!(rtf.contains("<isbn>1549-1277</isbn>"));
    assert!(rtf.contains("<electronic-resource-num>10.1371/journal.pmed.1004321</electronic-resource-num>"));
    assert!(rtf.contains("We measured things &amp; other things."));
    assert!(rtf.contains("<keywords><keyword>Humans</keyword><keyword>Things/*metabolism</keyword><keyword>things</keyword></keywords>"));
    assert!(rtf.contains("<custom4>2024/06/03</custom4>"));

    let text: Vec<u16> = payload
        .text
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    assert_eq!(String::from_utf16(&text).unwrap(), "(Doe, 2024)");

    assert!(
        diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::EncodingFallback { substituted: 4, .. }))
    );
}

#[test]
fn test_closed_pipe_sends_nothing() {
    let mut output = Vec::new();
    let mut sink = MemorySink::new();
    let sent = run_once(
        &mut Cursor::new(Vec::new()),
        &mut output,
        &mut sink,
        &ConvertOptions::new(),
        &mut Vec::<Diagnostic>::new(),
    )
    .unwrap();

    assert_eq!(sent, None);
    assert!(output.is_empty());
    assert_eq!(sink.opened(), 0);
}

#[test]
fn test_missing_nbib_data() {
    let mut input = framed_request(&Request { nbib_data: None });
    let mut output = Vec::new();
    let mut sink = MemorySink::new();
    run_once(
        &mut input,
        &mut output,
        &mut sink,
        &ConvertOptions::new(),
        &mut Vec::<Diagnostic>::new(),
    )
    .unwrap();

    assert_eq!(read_response(output), Response::error(INVALID_MESSAGE));
    assert!(sink.delivered().is_empty());
}

#[test]
fn test_undecodable_message() {
    let mut input = Vec::new();
    transport::write_frame(&mut input, b"{not json").unwrap();
    let mut output = Vec::new();
    run_once(
        &mut Cursor::new(input),
        &mut output,
        &mut MemorySink::new(),
        &ConvertOptions::new(),
        &mut Vec::<Diagnostic>::new(),
    )
    .unwrap();

    assert_eq!(read_response(output), Response::error(INVALID_MESSAGE));
}

#[test]
fn test_record_without_authors() {
    let mut input = framed_request(&Request::new("PMID- 1\nTI  - Orphan\nAU  - Doe J\n"));
    let mut output = Vec::new();
    let mut sink = MemorySink::new();
    run_once(
        &mut input,
        &mut output,
        &mut sink,
        &ConvertOptions::new(),
        &mut Vec::<Diagnostic>::new(),
    )
    .unwrap();

    assert_eq!(read_response(output), Response::error(PROCESSING_FAILED));
    assert_eq!(sink.opened(), 0);
}

#[test]
fn test_oversized_message_is_a_pipe_error() {
    let mut input = framed_request(&Request::new(RECORD));
    let mut options = ConvertOptions::new();
    options.set_max_message_size(16);
    let mut output = Vec::new();
    let err = run_once(
        &mut input,
        &mut output,
        &mut MemorySink::new(),
        &options,
        &mut Vec::<Diagnostic>::new(),
    )
    .unwrap_err();

    assert!(matches!(err, TransportError::MessageTooLarge { max: 16, .. }));
    assert!(output.is_empty());
}

#[test]
fn test_directory_sink_exchange() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(dir.path());
    let mut input = framed_request(&Request::new(RECORD));
    let mut output = Vec::new();
    run_once(
        &mut input,
        &mut output,
        &mut sink,
        &ConvertOptions::new(),
        &mut Vec::<Diagnostic>::new(),
    )
    .unwrap();

    assert_eq!(read_response(output), Response::Success);
    let rtf = std::fs::read(sink.rtf_path()).unwrap();
    assert!(rtf.starts_with(br"{\rtf1\ansi"));
    let text = std::fs::read(sink.text_path()).unwrap();
    assert_eq!(text, b"(\0D\0o\0e\0,\0 \x002\x000\x002\x004\0)\0");
}
