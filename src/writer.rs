use indicatif::ProgressBar;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::codec::{pack_column_into, packed_len};
use crate::error::{CustomError, Result};
use crate::source::ColumnSource;

pub const BED_MAGIC: [u8; 2] = [0x6c, 0x1b];
pub const BED_SNP_MAJOR: u8 = 0x01;
pub const BED_HEADER_LEN: usize = 3;

/// Exact size in bytes of a SNP-major .bed file.
pub fn bed_file_size(n_individuals: usize, n_markers: usize, header: bool) -> Result<u64> {
    let header_len = if header { BED_HEADER_LEN as u64 } else { 0 };
    (packed_len(n_individuals) as u64)
        .checked_mul(n_markers as u64)
        .and_then(|body| body.checked_add(header_len))
        .ok_or(CustomError::InvalidDimension {
            n_individuals,
            n_markers,
        })
}

/// Validates a write of `n_markers` markers from a source holding `available`
/// markers (`None` = unbounded) and returns the resulting file size.
pub fn check_request(
    n_individuals: usize,
    n_markers: usize,
    header: bool,
    available: Option<usize>,
) -> Result<u64> {
    if let Some(available) = available
        && n_markers > available
    {
        return Err(CustomError::MarkerCount {
            requested: n_markers,
            available,
        });
    }
    bed_file_size(n_individuals, n_markers, header)
}

/// Writes SNP-major (marker after marker) .bed data to a byte sink.
pub struct BedWriter<'a, W: Write> {
    sink: W,
    path: Option<PathBuf>,
    header: bool,
    abort: Option<&'a AtomicBool>,
    progress: Option<ProgressBar>,
}

impl<'a> BedWriter<'a, BufWriter<File>> {
    pub fn create(path: &impl AsRef<Path>) -> Result<Self> {
        let f = File::create(path).map_err(|e| CustomError::Write {
            source: e,
            path: path.as_ref().to_path_buf(),
        })?;
        let mut writer = Self::new(BufWriter::new(f));
        writer.path = Some(path.as_ref().to_path_buf());
        Ok(writer)
    }
}

impl<'a, W: Write> BedWriter<'a, W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            path: None,
            header: true,
            abort: None,
            progress: None,
        }
    }

    /// Whether to emit the 3-byte magic header (on by default).
    pub fn header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Flag checked between markers; once set the write stops with `Aborted`.
    pub fn abort_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.abort = Some(flag);
        self
    }

    pub fn progress(mut self, pb: ProgressBar) -> Self {
        self.progress = Some(pb);
        self
    }

    /// Packs and appends `n_markers` columns pulled from `source`, returning
    /// the number of bytes written. Dimensions are checked before anything is
    /// written; later failures leave a truncated file behind.
    pub fn write(&mut self, n_markers: usize, source: &mut dyn ColumnSource) -> Result<u64> {
        let n_individuals = source.n_individuals();
        let total = check_request(n_individuals, n_markers, self.header, source.n_markers())?;

        if self.header {
            self.write_bytes(&[BED_MAGIC[0], BED_MAGIC[1], BED_SNP_MAJOR])?;
        }

        // Buffers are scoped to this call and reused from one marker to the next
        let mut column = Vec::with_capacity(n_individuals);
        let mut packed = Vec::with_capacity(packed_len(n_individuals));
        for marker_idx in 0..n_markers {
            if let Some(flag) = self.abort
                && flag.load(Ordering::Relaxed)
            {
                self.flush()?;
                return Err(CustomError::Aborted {
                    columns_written: marker_idx,
                });
            }

            source.next_column(&mut column)?;
            if column.len() != n_individuals {
                return Err(CustomError::ColumnLength {
                    expected: n_individuals,
                    found: column.len(),
                });
            }
            pack_column_into(&column, &mut packed);
            self.write_bytes(&packed)?;
            if let Some(pb) = &self.progress {
                pb.inc(1);
            }
        }
        self.flush()?;

        if let Some(pb) = &self.progress {
            pb.abandon();
        }
        Ok(total)
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.sink.write_all(bytes).map_err(|e| self.io_error(e))
    }

    fn flush(&mut self) -> Result<()> {
        self.sink.flush().map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: std::io::Error) -> CustomError {
        match &self.path {
            Some(path) => CustomError::Write {
                source,
                path: path.clone(),
            },
            None => CustomError::WriteWithoutPath { source },
        }
    }
}

/// Creates `path` and writes `n_markers` columns from `source` into it.
/// An existing file is left untouched if the request is rejected.
pub fn write_bed(
    path: &impl AsRef<Path>,
    n_markers: usize,
    header: bool,
    source: &mut dyn ColumnSource,
) -> Result<u64> {
    check_request(source.n_individuals(), n_markers, header, source.n_markers())?;
    BedWriter::create(path)?.header(header).write(n_markers, source)
}
