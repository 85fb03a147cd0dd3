//! Binary weight file codec
//!
//! Layout (all little-endian):
//!
//! ```text
//! u64            N, number of tables (1-17)
//! N times:
//!   u64          L, entries in the table (>= 50625)
//!   L times f32  entry values
//! ```
//!
//! Any deviation is fatal; there is no partial load.

use std::io::{self, Read, Write};

use crate::{
    Error, Result,
    ntuple::{FEATURE_SPACE, FULL_PATTERNS},
    td_learning::WeightTable,
};

/// Upper bound on entries per table accepted from a file
pub const MAX_TABLE_ENTRIES: usize = 1 << 20;

fn malformed(reason: impl Into<String>) -> Error {
    Error::MalformedWeights {
        reason: reason.into(),
    }
}

fn read_exact_or_malformed<R: Read>(reader: &mut R, buf: &mut [u8], what: &str) -> Result<()> {
    reader.read_exact(buf).map_err(|source| {
        if source.kind() == io::ErrorKind::UnexpectedEof {
            malformed(format!("truncated while reading {what}"))
        } else {
            Error::Io {
                operation: format!("read {what}"),
                source,
            }
        }
    })
}

fn read_u64_le<R: Read>(reader: &mut R, what: &str) -> Result<u64> {
    let mut buf = [0u8; 8];
    read_exact_or_malformed(reader, &mut buf, what)?;
    Ok(u64::from_le_bytes(buf))
}

/// Write every table of `weights`
pub fn write_weights<W: Write>(writer: &mut W, weights: &WeightTable) -> Result<()> {
    writer.write_all(&(weights.len() as u64).to_le_bytes())?;
    for table in weights.tables() {
        writer.write_all(&(table.len() as u64).to_le_bytes())?;
        for value in table {
            writer.write_all(&value.to_bits().to_le_bytes())?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Read a complete weight file; the reader must end right after the last table
pub fn read_weights<R: Read>(reader: &mut R) -> Result<WeightTable> {
    let count = read_u64_le(reader, "table count")?;
    if count == 0 || count > FULL_PATTERNS.len() as u64 {
        return Err(malformed(format!(
            "table count {count} outside 1-{}",
            FULL_PATTERNS.len()
        )));
    }

    let mut tables = Vec::with_capacity(count as usize);
    for index in 0..count {
        let entries = read_u64_le(reader, "table length")?;
        if entries < FEATURE_SPACE as u64 || entries > MAX_TABLE_ENTRIES as u64 {
            return Err(malformed(format!(
                "table {index} has {entries} entries (expected {FEATURE_SPACE}-{MAX_TABLE_ENTRIES})"
            )));
        }

        let mut bytes = vec![0u8; entries as usize * 4];
        read_exact_or_malformed(reader, &mut bytes, "table entries")?;
        let table = bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_bits(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])))
            .collect();
        tables.push(table);
    }

    let mut probe = [0u8; 1];
    if reader.read(&mut probe)? != 0 {
        return Err(malformed(format!("trailing data after {count} tables")));
    }

    Ok(WeightTable::from_tables(tables))
}

/// Encode weights into an in-memory buffer
pub fn encode_weights(weights: &WeightTable) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    write_weights(&mut bytes, weights)?;
    Ok(bytes)
}

/// Decode weights from an in-memory buffer
pub fn decode_weights(mut bytes: &[u8]) -> Result<WeightTable> {
    read_weights(&mut bytes)
}
