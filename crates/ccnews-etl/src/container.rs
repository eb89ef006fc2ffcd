//! WARC container decoding.
//!
//! Containers are decoded strictly in order. Gzip compression (one member
//! per record, as Common Crawl publishes them) is detected from the magic
//! bytes, so plain `.warc` buffers work too.
//!
//! Records are read raw: header values are kept as captured (decoded
//! lossily) and no WARC header is required beyond what framing needs.

use std::collections::HashMap;
use std::io::{self, BufRead, BufReader, Read};

use flate2::read::MultiGzDecoder;
use warc::{WarcHeader, WarcReader};

use crate::error::{EtlError, EtlResult};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const HEADER_END: &[u8] = b"\r\n\r\n";

// ============================================================================
// HTTP headers
// ============================================================================

/// HTTP status line and headers captured inside a `response` record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpHeaders {
    pub status_line: String,
    pub headers: Vec<(String, String)>,
}

impl HttpHeaders {
    /// Parse a raw header block (without the terminating blank line).
    pub fn parse(block: &[u8]) -> Self {
        let text = String::from_utf8_lossy(block);
        let mut lines = text.lines();
        let status_line = lines.next().unwrap_or_default().trim().to_string();
        let headers = lines
            .filter_map(|line| line.split_once(':'))
            .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
            .collect();
        Self {
            status_line,
            headers,
        }
    }

    /// First value of `name`, compared case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.get("Content-Type")
    }
}

/// Split an HTTP message into headers and payload.
///
/// Without a blank line separating the two, the whole block is payload.
fn split_http_message(block: &[u8]) -> (Option<HttpHeaders>, Vec<u8>) {
    match block
        .windows(HEADER_END.len())
        .position(|window| window == HEADER_END)
    {
        Some(pos) => (
            Some(HttpHeaders::parse(&block[..pos])),
            block[pos + HEADER_END.len()..].to_vec(),
        ),
        None => (None, block.to_vec()),
    }
}

// ============================================================================
// Records
// ============================================================================

/// One decoded WARC record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// `WARC-Type`, e.g. `response` or `warcinfo`.
    pub warc_type: String,
    pub record_id: String,
    pub date: String,
    pub content_length: String,
    pub target_uri: Option<String>,
    /// Present for `response` records with a parseable HTTP header block.
    pub http_headers: Option<HttpHeaders>,
    /// HTTP payload for responses, otherwise the whole record block.
    pub payload: Vec<u8>,
}

/// Wrap `reader` in a buffered reader, inflating it if it is gzip.
pub fn open_container<R>(reader: R) -> io::Result<Box<dyn BufRead + Send>>
where
    R: Read + Send + 'static,
{
    let mut buffered = BufReader::new(reader);
    let is_gzip = buffered.fill_buf()?.starts_with(&GZIP_MAGIC);
    if is_gzip {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(buffered))))
    } else {
        Ok(Box::new(buffered))
    }
}

/// Decode every record in `reader`, handing each to `visit` in order.
///
/// Returns the number of records decoded. Missing or malformed headers are
/// tolerated; only a record that cannot be framed stops decoding, and records
/// visited before it stay visited.
pub fn decode_container<R, F>(reader: R, mut visit: F) -> EtlResult<usize>
where
    R: BufRead,
    F: FnMut(RawRecord),
{
    let mut count = 0;

    for item in WarcReader::new(reader).iter_raw_records() {
        let (header, body) = item.map_err(|e| EtlError::Container {
            message: e.to_string(),
        })?;
        let headers = header.headers;

        let warc_type = header_value(&headers, WarcHeader::WarcType).unwrap_or_default();
        let (http_headers, payload) = if warc_type == "response" {
            split_http_message(&body)
        } else {
            (None, body)
        };

        visit(RawRecord {
            record_id: header_value(&headers, WarcHeader::RecordID).unwrap_or_default(),
            date: header_value(&headers, WarcHeader::Date).unwrap_or_default(),
            content_length: header_value(&headers, WarcHeader::ContentLength).unwrap_or_default(),
            target_uri: header_value(&headers, WarcHeader::TargetURI),
            warc_type,
            http_headers,
            payload,
        });
        count += 1;
    }

    Ok(count)
}

fn header_value(headers: &HashMap<WarcHeader, Vec<u8>>, name: WarcHeader) -> Option<String> {
    headers
        .get(&name)
        .map(|value| String::from_utf8_lossy(value).trim().to_string())
}
