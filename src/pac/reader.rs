//! PAC archive reading

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use super::{DIRECTORY_END_POS, DIRECTORY_START, ENTRY_SIZE, NAME_SIZE, PacEntry};
use crate::error::{Error, Result};

/// PAC archive reader over any `Read + Seek` source.
///
/// The whole directory is read and validated up front; file data is read
/// lazily through [`PacArchive::read_at`].
pub struct PacArchive<R: Read + Seek> {
    reader: BufReader<R>,
    entries: Vec<PacEntry>,
    name_index: HashMap<String, usize>,
}

impl PacArchive<File> {
    /// Open a PAC archive from disk and read its directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(File::open(path)?)
    }
}

impl<R: Read + Seek> PacArchive<R> {
    /// Read and validate the directory from a `Read + Seek` source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPacDirectory`] if the directory bounds are
    /// inconsistent with the source length, and
    /// [`Error::PacEntryOutOfBounds`] if any entry points past the end of
    /// the source. Nothing is extracted in either case.
    pub fn new(source: R) -> Result<Self> {
        let mut reader = BufReader::new(source);
        let file_size = reader.seek(SeekFrom::End(0))?;

        let min_size = DIRECTORY_START + ENTRY_SIZE as u64;
        if file_size < min_size {
            return Err(Error::MalformedPacDirectory {
                reason: format!("file size {file_size} cannot hold a directory"),
            });
        }

        reader.seek(SeekFrom::Start(DIRECTORY_END_POS))?;
        let directory_end = u64::from(reader.read_u32::<LittleEndian>()?);

        if directory_end < min_size || directory_end > file_size {
            return Err(Error::MalformedPacDirectory {
                reason: format!("directory end {directory_end} outside [{min_size}, {file_size}]"),
            });
        }
        let table_len = directory_end - DIRECTORY_START;
        if table_len % ENTRY_SIZE as u64 != 0 {
            return Err(Error::MalformedPacDirectory {
                reason: format!("directory span {table_len} is not a multiple of {ENTRY_SIZE}"),
            });
        }

        reader.seek(SeekFrom::Start(DIRECTORY_START))?;
        let mut table = vec![0u8; table_len as usize];
        reader.read_exact(&mut table)?;

        let count = table_len as usize / ENTRY_SIZE;
        let mut entries = Vec::with_capacity(count);
        let mut name_index = HashMap::with_capacity(count);
        for (i, record) in table.chunks_exact(ENTRY_SIZE).enumerate() {
            let entry = parse_entry(record);
            if u64::from(entry.offset) + u64::from(entry.size) > file_size {
                return Err(Error::PacEntryOutOfBounds {
                    name: entry.name,
                    offset: entry.offset,
                    size: entry.size,
                    file_size,
                });
            }
            name_index.insert(entry.name.clone(), i);
            entries.push(entry);
        }
        tracing::debug!("read PAC directory: {} entries", entries.len());

        Ok(Self {
            reader,
            entries,
            name_index,
        })
    }

    /// Directory entries in archive order.
    pub fn entries(&self) -> &[PacEntry] {
        &self.entries
    }

    /// Number of files in the archive.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the archive directory is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read raw bytes at an absolute offset.
    pub fn read_at(&mut self, offset: u32, size: u32) -> Result<Vec<u8>> {
        self.reader.seek(SeekFrom::Start(u64::from(offset)))?;
        let mut data = vec![0u8; size as usize];
        self.reader.read_exact(&mut data)?;
        Ok(data)
    }

    /// Read one file's bytes by name.
    ///
    /// # Errors
    /// Returns [`Error::FileNotFoundInPac`] for a name missing from the
    /// directory.
    pub fn read_file(&mut self, name: &str) -> Result<Vec<u8>> {
        let index = *self
            .name_index
            .get(name)
            .ok_or_else(|| Error::FileNotFoundInPac(name.to_string()))?;
        let entry = self.entries[index].clone();
        self.read_at(entry.offset, entry.size)
    }

    /// Extract the named files into a directory.
    pub fn extract_to<P: AsRef<Path>>(&mut self, dir: P, names: &[String]) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        for name in names {
            let data = self.read_file(name)?;
            fs::write(dir.join(name), data)?;
            tracing::info!("extracted {name}");
        }
        Ok(())
    }

    /// Extract every file in the archive into a directory.
    pub fn extract_all<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let entries = self.entries.clone();
        for entry in &entries {
            let data = self.read_at(entry.offset, entry.size)?;
            fs::write(dir.join(&entry.name), data)?;
            tracing::info!("extracted {}", entry.name);
        }
        Ok(())
    }
}

/// Parse a single 40-byte directory record.
fn parse_entry(record: &[u8]) -> PacEntry {
    let name_end = record[..NAME_SIZE]
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(NAME_SIZE);
    let name = String::from_utf8_lossy(&record[..name_end]).into_owned();
    let size = u32::from_le_bytes(record[NAME_SIZE..NAME_SIZE + 4].try_into().unwrap());
    let offset = u32::from_le_bytes(record[NAME_SIZE + 4..NAME_SIZE + 8].try_into().unwrap());
    PacEntry { name, size, offset }
}
