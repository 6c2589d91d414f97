//! Row stores for pair-level cache fields.
//!
//! A pair field keeps one row of `row_len` `f64` values per node. Row `r`
//! occupies bytes `r * row_len * 8 ..` of the store, little-endian.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

use crate::{errors::GraphError, graph::NodeId};

const VALUE_SIZE: usize = std::mem::size_of::<f64>();

pub trait PairStore: Send {
    fn row_len(&self) -> usize;

    fn write_row(&mut self, row: NodeId, values: &[f64]) -> Result<(), GraphError>;

    /// Fills `values` with row `row`. Reading a row that was never written
    /// is a caller error; the owning cache guards it with a written-mask.
    fn read_row(&mut self, row: NodeId, values: &mut [f64]) -> Result<(), GraphError>;
}

/// Rows spilled to an anonymous temporary file, removed when dropped.
pub struct TempFileStore {
    file: File,
    row_len: usize,
}

impl TempFileStore {
    pub fn new(row_len: usize) -> Result<Self, GraphError> {
        let file = tempfile::tempfile()?;
        Ok(Self { file, row_len })
    }

    fn offset(&self, row: NodeId) -> u64 {
        row as u64 * (self.row_len * VALUE_SIZE) as u64
    }
}

impl PairStore for TempFileStore {
    fn row_len(&self) -> usize {
        self.row_len
    }

    fn write_row(&mut self, row: NodeId, values: &[f64]) -> Result<(), GraphError> {
        check_len(self.row_len, values.len())?;
        let mut bytes = Vec::with_capacity(values.len() * VALUE_SIZE);
        for value in values {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        let offset = self.offset(row);
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(&bytes)?;
        Ok(())
    }

    fn read_row(&mut self, row: NodeId, values: &mut [f64]) -> Result<(), GraphError> {
        check_len(self.row_len, values.len())?;
        let mut bytes = vec![0u8; values.len() * VALUE_SIZE];
        let offset = self.offset(row);
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.read_exact(&mut bytes)?;
        for (value, chunk) in values.iter_mut().zip(bytes.chunks_exact(VALUE_SIZE)) {
            let mut raw = [0u8; VALUE_SIZE];
            raw.copy_from_slice(chunk);
            *value = f64::from_le_bytes(raw);
        }
        Ok(())
    }
}

/// Rows kept resident, allocated on first write.
pub struct MemoryStore {
    values: Vec<f64>,
    row_len: usize,
}

impl MemoryStore {
    pub fn new(row_len: usize) -> Self {
        Self {
            values: Vec::new(),
            row_len,
        }
    }

    fn range(&self, row: NodeId) -> std::ops::Range<usize> {
        let start = row as usize * self.row_len;
        start..start + self.row_len
    }
}

impl PairStore for MemoryStore {
    fn row_len(&self) -> usize {
        self.row_len
    }

    fn write_row(&mut self, row: NodeId, values: &[f64]) -> Result<(), GraphError> {
        check_len(self.row_len, values.len())?;
        let range = self.range(row);
        if self.values.len() < range.end {
            self.values.resize(range.end, 0.0);
        }
        self.values[range].copy_from_slice(values);
        Ok(())
    }

    fn read_row(&mut self, row: NodeId, values: &mut [f64]) -> Result<(), GraphError> {
        check_len(self.row_len, values.len())?;
        let range = self.range(row);
        let stored = self
            .values
            .get(range)
            .ok_or_else(|| GraphError::cache(format!("pair row {row} was never written")))?;
        values.copy_from_slice(stored);
        Ok(())
    }
}

fn check_len(expected: usize, actual: usize) -> Result<(), GraphError> {
    if expected != actual {
        return Err(GraphError::invalid_input(format!(
            "pair row expects {expected} values, got {actual}"
        )));
    }
    Ok(())
}
