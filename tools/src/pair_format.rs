use byteorder::{ReadBytesExt, WriteBytesExt};
use planes::encoding::{Planes, NUM_PLANE_CELLS};
use planes::text::ResultLabel;
use planes::traversal::{PairPolicy, PlanePair};
use std::io::{self, ErrorKind, Read, Write};

const MAGIC: &[u8; 4] = b"PLNS";
const VERSION: u8 = 1;

/// One training sample: a before/after pair and the game it came from
#[derive(Debug, Clone, PartialEq)]
pub struct PairRecord {
    pub result: ResultLabel,
    pub policy: PairPolicy,
    pub pair: PlanePair,
}

fn result_code(result: &ResultLabel) -> io::Result<u8> {
    match result {
        ResultLabel::Win => Ok(0),
        ResultLabel::Lose => Ok(1),
        ResultLabel::Draw => Ok(2),
        ResultLabel::Unknown(text) => Err(io::Error::new(
            ErrorKind::InvalidInput,
            format!("can not store unknown result {:?}", text),
        )),
    }
}

fn policy_code(policy: PairPolicy) -> u8 {
    match policy {
        PairPolicy::WhiteMoved => 0,
        PairPolicy::BlackMoved => 1,
        PairPolicy::All => 2,
    }
}

fn invalid_data(msg: String) -> io::Error {
    io::Error::new(ErrorKind::InvalidData, msg)
}

/// Writes `.planes` files: the `PLNS` magic and a version byte, then one
/// record per pair (result, policy, 384 before cells, 384 after cells)
pub struct PairWriter<W: Write> {
    writer: W,
    records: u64,
}

impl<W: Write> PairWriter<W> {
    pub fn new(mut writer: W) -> io::Result<PairWriter<W>> {
        writer.write_all(MAGIC)?;
        writer.write_u8(VERSION)?;

        Ok(PairWriter { writer, records: 0 })
    }

    pub fn write_record(&mut self, record: &PairRecord) -> io::Result<()> {
        self.writer.write_u8(result_code(&record.result)?)?;
        self.writer.write_u8(policy_code(record.policy))?;

        for planes in [&record.pair.before, &record.pair.after] {
            for value in planes.flatten() {
                self.writer.write_i8(value)?;
            }
        }

        self.records += 1;
        Ok(())
    }

    pub fn records_written(&self) -> u64 {
        self.records
    }

    pub fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

pub struct PairReader<R: Read> {
    reader: R,
}

impl<R: Read> PairReader<R> {
    pub fn new(mut reader: R) -> io::Result<PairReader<R>> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(invalid_data("not a .planes file".to_string()));
        }

        let version = reader.read_u8()?;
        if version != VERSION {
            return Err(invalid_data(format!("unsupported version {}", version)));
        }

        Ok(PairReader { reader })
    }

    fn read_planes(&mut self) -> io::Result<Planes> {
        let mut cells = [0i8; NUM_PLANE_CELLS];
        self.reader.read_i8_into(&mut cells)?;
        Planes::from_flat(&cells).map_err(|e| invalid_data(e.to_string()))
    }

    /// Next record, or `None` at the end of the file.
    /// A record cut off by the end of the file is ignored.
    pub fn read_record(&mut self) -> io::Result<Option<PairRecord>> {
        let result = match self.reader.read_u8() {
            Ok(code) => code,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e),
        };

        match self.read_body(result) {
            Ok(record) => Ok(Some(record)),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn read_body(&mut self, result: u8) -> io::Result<PairRecord> {
        let result = match result {
            0 => ResultLabel::Win,
            1 => ResultLabel::Lose,
            2 => ResultLabel::Draw,
            code => return Err(invalid_data(format!("bad result code {}", code))),
        };

        let policy = match self.reader.read_u8()? {
            0 => PairPolicy::WhiteMoved,
            1 => PairPolicy::BlackMoved,
            2 => PairPolicy::All,
            code => return Err(invalid_data(format!("bad policy code {}", code))),
        };

        let before = self.read_planes()?;
        let after = self.read_planes()?;

        Ok(PairRecord {
            result,
            policy,
            pair: PlanePair { before, after },
        })
    }
}
