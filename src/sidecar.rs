use std::path::Path;

use crate::error::{CustomError, Result};

fn tab_writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    Ok(csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(path)?)
}

/// Writes a placeholder .fam with one line per individual.
pub fn write_fam(path: &impl AsRef<Path>, n_individuals: usize) -> Result<()> {
    let mut wtr = tab_writer(path.as_ref())?;
    for idx in 0..n_individuals {
        let id = format!("ind{}", idx + 1);
        // FID IID father mother sex phenotype
        wtr.write_record([id.as_str(), id.as_str(), "0", "0", "0", "-9"])?;
    }
    wtr.flush().map_err(|e| CustomError::Write {
        source: e,
        path: path.as_ref().to_path_buf(),
    })?;
    Ok(())
}

/// Writes a placeholder .bim with one biallelic marker per line on chromosome 1.
pub fn write_bim(path: &impl AsRef<Path>, n_markers: usize) -> Result<()> {
    let mut wtr = tab_writer(path.as_ref())?;
    for idx in 0..n_markers {
        let pos = idx + 1;
        wtr.serialize((1u8, format!("snp{pos}"), 0u8, pos, "A", "G"))?;
    }
    wtr.flush().map_err(|e| CustomError::Write {
        source: e,
        path: path.as_ref().to_path_buf(),
    })?;
    Ok(())
}
