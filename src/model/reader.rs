//! Model Reader
//!
//! Streaming decoder for the word2vec binary format: a header line
//! `"<word_count> <dimensions>"`, then `word_count` records of
//! `<utf8 word><space><dimensions * 4 bytes of little-endian f32>`.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::DecodeError;

/// Header line of a word2vec binary model.
///
/// `word_count` is taken on faith; the decoder never checks it against the
/// number of records actually present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelHeader {
    pub word_count: u64,
    pub dimensions: usize,
}

/// One decoded (word, raw vector) record. The vector is not normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub word: String,
    pub vector: Vec<f32>,
}

/// Lazy record decoder over any buffered byte stream.
///
/// Yields `Result<RawRecord, DecodeError>` in stream order and fuses after
/// the first error or clean end of stream.
pub struct ModelReader<R> {
    input: R,
    header: ModelHeader,
    binary_len: usize,
    rank: u64,
    done: bool,
}

impl ModelReader<BufReader<File>> {
    /// Open a model file and decode its header.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DecodeError> {
        Self::new(BufReader::new(File::open(path)?))
    }
}

impl<R: BufRead> ModelReader<R> {
    /// Read and parse the header line, leaving the stream positioned at the
    /// first record.
    pub fn new(mut input: R) -> Result<Self, DecodeError> {
        let mut line = String::new();
        input.read_line(&mut line)?;
        let header = parse_header(&line)?;
        Ok(Self {
            input,
            header,
            binary_len: 4 * header.dimensions,
            rank: 0,
            done: false,
        })
    }

    pub fn header(&self) -> ModelHeader {
        self.header
    }

    fn read_record(&mut self) -> Result<Option<RawRecord>, DecodeError> {
        let rank = self.rank + 1;

        // Byte-at-a-time word scan up to the separating space. Newline bytes
        // are dropped; some encoders emit them in front of words.
        let mut word = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            if self.input.read(&mut byte)? == 0 {
                if word.is_empty() {
                    // Clean end of stream at a record boundary.
                    return Ok(None);
                }
                return Err(DecodeError::UnexpectedEndOfStream { rank });
            }
            match byte[0] {
                b' ' => break,
                b'\n' => {}
                b => word.push(b),
            }
        }

        let word = String::from_utf8(word)
            .map_err(|_| DecodeError::InvalidEncoding { rank })?;

        let mut buf = vec![0u8; self.binary_len];
        self.input.read_exact(&mut buf).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                DecodeError::UnexpectedEndOfStream { rank }
            } else {
                DecodeError::Io(e)
            }
        })?;

        let vector = buf
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();

        self.rank = rank;
        Ok(Some(RawRecord { word, vector }))
    }
}

impl<R: BufRead> Iterator for ModelReader<R> {
    type Item = Result<RawRecord, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

fn parse_header(line: &str) -> Result<ModelHeader, DecodeError> {
    let mut parts = line.split_whitespace();
    let word_count = parts
        .next()
        .and_then(|p| p.parse::<u64>().ok())
        .ok_or_else(|| DecodeError::MalformedHeader(line.trim_end().to_string()))?;
    let dimensions = parts
        .next()
        .and_then(|p| p.parse::<usize>().ok())
        .ok_or_else(|| DecodeError::MalformedHeader(line.trim_end().to_string()))?;
    if parts.next().is_some() {
        return Err(DecodeError::MalformedHeader(line.trim_end().to_string()));
    }
    Ok(ModelHeader {
        word_count,
        dimensions,
    })
}
