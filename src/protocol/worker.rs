//! Line-oriented JSON protocol for computing fields in a separate process.
//!
//! Each request line is a serialised [`ViewportParams`]. Each response line
//! is a JSON array with one entry per pixel in row-major order: the
//! progression as a number, or `null` for points that never escaped.

use std::error::Error;
use std::fmt;
use std::io::{self, BufRead, Write};

use log::debug;

use crate::core::actions::compute_field::compute_field_parallel_rayon::compute_field_parallel_rayon;
use crate::core::data::progression_field::{Progression, ProgressionField, ProgressionFieldError};
use crate::core::data::viewport_params::{ViewportParams, ViewportParamsError};

#[derive(Debug)]
pub enum ProtocolError {
    Io(io::Error),
    Malformed(serde_json::Error),
    InvalidRequest(ViewportParamsError),
    LengthMismatch(ProgressionFieldError),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "worker stream error: {}", err),
            Self::Malformed(err) => write!(f, "malformed worker message: {}", err),
            Self::InvalidRequest(err) => write!(f, "invalid worker request: {}", err),
            Self::LengthMismatch(err) => write!(f, "worker response does not fit the request: {}", err),
        }
    }
}

impl Error for ProtocolError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Malformed(err) => Some(err),
            Self::InvalidRequest(err) => Some(err),
            Self::LengthMismatch(err) => Some(err),
        }
    }
}

impl From<io::Error> for ProtocolError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err)
    }
}

/// Parses and validates one request line.
pub fn decode_request(line: &str) -> Result<ViewportParams, ProtocolError> {
    let params: ViewportParams = serde_json::from_str(line.trim())?;
    params.validate().map_err(ProtocolError::InvalidRequest)?;

    Ok(params)
}

pub(crate) fn encode_request(params: &ViewportParams) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(params)?)
}

pub fn encode_response(field: &ProgressionField) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(field.values())?)
}

/// Parses a response line, checking it holds one value per pixel of `params`.
pub(crate) fn decode_response(
    line: &str,
    params: &ViewportParams,
) -> Result<ProgressionField, ProtocolError> {
    let values: Vec<Progression> = serde_json::from_str(line.trim())?;

    ProgressionField::from_values(params.width, params.height, values)
        .map_err(ProtocolError::LengthMismatch)
}

/// Client side of the protocol: one request line out, one response line back.
///
/// `writer` usually feeds a worker's stdin and `reader` drains its stdout.
pub struct WorkerClient<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> WorkerClient<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Sends `params` and waits for the field computed from them.
    pub fn compute(&mut self, params: &ViewportParams) -> Result<ProgressionField, ProtocolError> {
        params.validate().map_err(ProtocolError::InvalidRequest)?;

        writeln!(self.writer, "{}", encode_request(params)?)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(ProtocolError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "worker closed its output before responding",
            )));
        }

        decode_response(&line, params)
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

/// Answers every request on `reader` until EOF and returns how many were served.
///
/// Blank lines are ignored. The first malformed or invalid request ends the
/// session with an error; responses already written stay written.
pub fn serve<R, W>(reader: R, writer: &mut W) -> Result<usize, ProtocolError>
where
    R: BufRead,
    W: Write,
{
    let mut served = 0;

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let params = decode_request(&line)?;
        debug!(
            "worker request {}: {}x{}, {} iterations",
            served + 1,
            params.width,
            params.height,
            params.max_iterations
        );

        let field = compute_field_parallel_rayon(&params);
        writeln!(writer, "{}", encode_response(&field)?)?;
        writer.flush()?;

        served += 1;
    }

    Ok(served)
}
