//! One native-messaging exchange: read a request, convert, deliver, respond.

use crate::config::ConvertOptions;
use crate::diagnostics::Diagnostics;
use crate::error::{CitationError, TransportError};
use crate::sink::PayloadSink;
use crate::transport::{self, INVALID_MESSAGE, PROCESSING_FAILED, Request, Response};
use std::io::{Read, Write};
use tracing::{error, info, instrument, warn};

/// Handle one request from `reader`, answering on `writer`.
///
/// Returns the response sent, or `None` when the pipe was closed before a request
/// arrived (nothing is written then). Conversion and sink failures become an error
/// response; only failures of the pipe itself are returned as errors.
#[instrument(skip_all)]
pub fn run_once<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    sink: &mut dyn PayloadSink,
    options: &ConvertOptions,
    diagnostics: &mut dyn Diagnostics,
) -> Result<Option<Response>, TransportError> {
    let response = match transport::read_request(reader, options.max_message_size()) {
        Ok(None) => {
            info!("Input pipe closed before a message arrived");
            return Ok(None);
        }
        Ok(Some(request)) => handle(request, sink, options, diagnostics),
        Err(TransportError::Json(e)) => {
            error!("Undecodable message: {e}");
            Response::error(INVALID_MESSAGE)
        }
        Err(e) => return Err(e),
    };

    transport::write_response(writer, &response)?;
    info!("Sent response: {response:?}");
    Ok(Some(response))
}

/// Turn one decoded request into the response to send.
pub fn handle(
    request: Request,
    sink: &mut dyn PayloadSink,
    options: &ConvertOptions,
    diagnostics: &mut dyn Diagnostics,
) -> Response {
    let Some(nbib_data) = request.nbib_data else {
        warn!("Message has no nbib_data field");
        return Response::error(INVALID_MESSAGE);
    };

    match process(&nbib_data, sink, options, diagnostics) {
        Ok(()) => Response::Success,
        Err(e) => {
            error!("Processing failed: {e}");
            Response::error(PROCESSING_FAILED)
        }
    }
}

/// Convert `nbib_data` and deliver the payload. The sink session is released when
/// this returns, whichever way.
fn process(
    nbib_data: &str,
    sink: &mut dyn PayloadSink,
    options: &ConvertOptions,
    diagnostics: &mut dyn Diagnostics,
) -> Result<(), CitationError> {
    info!("Converting {} bytes of NBIB data", nbib_data.len());
    let payload = crate::convert(nbib_data, options, diagnostics)?;

    let mut session = sink.open()?;
    session.deliver(&payload)?;
    info!(
        "Delivered {} RTF bytes and {} text bytes",
        payload.rtf.len(),
        payload.text.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostic;
    use crate::sink::MemorySink;
    use pretty_assertions::assert_eq;

    const RECORD: &str = "PMID- 1\nFAU - Doe, Jane\nDP  - 2024 Jun\nTI  - A Study\n";

    #[test]
    fn test_handle_success() {
        let mut sink = MemorySink::new();
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let response = handle(
            Request::new(RECORD),
            &mut sink,
            &ConvertOptions::new(),
            &mut diagnostics,
        );
        assert_eq!(response, Response::Success);
        assert_eq!(sink.delivered().len(), 1);
        assert!(sink.is_released());
    }

    #[test]
    fn test_handle_missing_data() {
        let mut sink = MemorySink::new();
        let response = handle(
            Request { nbib_data: None },
            &mut sink,
            &ConvertOptions::new(),
            &mut Vec::<Diagnostic>::new(),
        );
        assert_eq!(response, Response::error(INVALID_MESSAGE));
        assert_eq!(sink.opened(), 0);
    }

    #[test]
    fn test_handle_no_authors_never_opens_sink() {
        let mut sink = MemorySink::new();
        let response = handle(
            Request::new("PMID- 1\nTI  - Orphan\n"),
            &mut sink,
            &ConvertOptions::new(),
            &mut Vec::<Diagnostic>::new(),
        );
        assert_eq!(response, Response::error(PROCESSING_FAILED));
        assert_eq!(sink.opened(), 0);
    }

    #[test]
    fn test_handle_sink_failures() {
        let mut sink = MemorySink::unavailable("no clipboard");
        let response = handle(
            Request::new(RECORD),
            &mut sink,
            &ConvertOptions::new(),
            &mut Vec::<Diagnostic>::new(),
        );
        assert_eq!(response, Response::error(PROCESSING_FAILED));

        let mut sink = MemorySink::rejecting();
        let response = handle(
            Request::new(RECORD),
            &mut sink,
            &ConvertOptions::new(),
            &mut Vec::<Diagnostic>::new(),
        );
        assert_eq!(response, Response::error(PROCESSING_FAILED));
        assert_eq!(sink.opened(), 1);
        assert!(sink.is_released());
    }
}
