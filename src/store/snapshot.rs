//! Store Snapshot
//!
//! On-disk format for a committed store, written once per import run.
//!
//! Layout:
//! - Magic: 4 bytes "WVEC"
//! - Version: 1 byte
//! - Dimensions: 4 bytes LE
//! - Entry count: 4 bytes LE
//! - Entries: [word_len (4 LE) + word bytes + rank (8 LE) + dimensions * f32 LE]*

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use super::StoredEntry;

const SNAPSHOT_MAGIC: &[u8] = b"WVEC";
const SNAPSHOT_VERSION: u8 = 1;

/// Write a snapshot. The data goes to a temporary file in the target
/// directory first and is renamed into place, so the snapshot at `path` is
/// either the old one or the complete new one.
pub(crate) fn save(path: &Path, dimensions: usize, entries: &[StoredEntry]) -> io::Result<()> {
    let tmp = path.with_extension("tmp");
    {
        let file = File::create(&tmp)?;
        let mut writer = BufWriter::new(file);

        writer.write_all(SNAPSHOT_MAGIC)?;
        writer.write_all(&[SNAPSHOT_VERSION])?;
        writer.write_all(&(dimensions as u32).to_le_bytes())?;
        writer.write_all(&(entries.len() as u32).to_le_bytes())?;

        for entry in entries {
            writer.write_all(&(entry.word.len() as u32).to_le_bytes())?;
            writer.write_all(entry.word.as_bytes())?;
            writer.write_all(&entry.rank.to_le_bytes())?;
            for x in &entry.vector {
                writer.write_all(&x.to_le_bytes())?;
            }
        }

        writer.flush()?;
    }
    fs::rename(&tmp, path)
}

/// Load a snapshot, returning the vector dimension and the entries in their
/// stored order.
pub(crate) fn load(path: &Path) -> io::Result<(usize, Vec<StoredEntry>)> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if magic != SNAPSHOT_MAGIC {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "invalid snapshot magic",
        ));
    }

    let mut version = [0u8; 1];
    reader.read_exact(&mut version)?;
    if version[0] != SNAPSHOT_VERSION {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("unsupported snapshot version: {}", version[0]),
        ));
    }

    let mut dim_buf = [0u8; 4];
    reader.read_exact(&mut dim_buf)?;
    let dimensions = u32::from_le_bytes(dim_buf) as usize;

    let mut count_buf = [0u8; 4];
    reader.read_exact(&mut count_buf)?;
    let count = u32::from_le_bytes(count_buf) as usize;

    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        let mut word_len_buf = [0u8; 4];
        reader.read_exact(&mut word_len_buf)?;
        let word_len = u32::from_le_bytes(word_len_buf) as usize;
        let mut word_buf = vec![0u8; word_len];
        reader.read_exact(&mut word_buf)?;
        let word = String::from_utf8(word_buf)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "snapshot word is not UTF-8"))?;

        let mut rank_buf = [0u8; 8];
        reader.read_exact(&mut rank_buf)?;
        let rank = u64::from_le_bytes(rank_buf);

        let mut vec_buf = vec![0u8; 4 * dimensions];
        reader.read_exact(&mut vec_buf)?;
        let vector = vec_buf
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();

        entries.push(StoredEntry { word, rank, vector });
    }

    Ok((dimensions, entries))
}
