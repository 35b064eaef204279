use crate::error::ModelError;
use crate::scorer::{FeatureTable, NUM_COLUMNS};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read, Write};
use std::path::Path;

/// A trained model that scores candidate positions, one score per table row
pub trait Predictor {
    fn predict(&mut self, table: &FeatureTable) -> Result<Vec<f32>, ModelError>;
}

const LINEAR_ARCH: &str = "linear-385";

/// Single linear layer over the feature columns: `score = w · row + b`.
///
/// File layout: the null-terminated tag `linear-385`, then 385 weights
/// and the bias as little-endian f32.
pub struct LinearModel {
    weights: Vec<f32>,
    bias: f32,
}

impl LinearModel {
    pub fn new(weights: Vec<f32>, bias: f32) -> Result<Self, ModelError> {
        if weights.len() != NUM_COLUMNS {
            return Err(ModelError::Columns {
                expected: NUM_COLUMNS,
                got: weights.len(),
            });
        }
        Ok(LinearModel { weights, bias })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let mut buffer = Vec::new();
        BufReader::new(File::open(path)?).read_to_end(&mut buffer)?;
        Self::from_memory(&buffer)
    }

    pub fn from_memory(buffer: &[u8]) -> Result<Self, ModelError> {
        let mut cursor = Cursor::new(buffer);

        let mut arch = Vec::new();
        cursor.read_until(0, &mut arch)?;
        arch.pop(); // remove null byte
        let arch = String::from_utf8_lossy(&arch).to_string();
        if arch != LINEAR_ARCH {
            return Err(ModelError::Architecture(arch));
        }

        let mut weights = vec![0f32; NUM_COLUMNS];
        cursor.read_f32_into::<LittleEndian>(&mut weights)?;
        let bias = cursor.read_f32::<LittleEndian>()?;

        info!("loaded {} model, bias {}", arch, bias);

        Self::new(weights, bias)
    }

    pub fn write_to(&self, write: &mut dyn Write) -> Result<(), ModelError> {
        write.write_all(LINEAR_ARCH.as_bytes())?;
        write.write_u8(0)?;
        for &w in &self.weights {
            write.write_f32::<LittleEndian>(w)?;
        }
        write.write_f32::<LittleEndian>(self.bias)?;
        Ok(())
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

impl Predictor for LinearModel {
    fn predict(&mut self, table: &FeatureTable) -> Result<Vec<f32>, ModelError> {
        Ok(table
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .zip(self.weights.iter())
                    .map(|(x, w)| x * w)
                    .sum::<f32>()
                    + self.bias
            })
            .collect())
    }
}
