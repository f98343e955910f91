use crate::error::Result;
use crate::model::Genotype;

pub const GENOTYPES_PER_BYTE: usize = 4;

// Trailing slots of a column's last byte are filled with the homozygous
// reference code; readers that know the individual count ignore them.
const PADDING: Genotype = Genotype::HomRef;

impl Genotype {
    /// Two-bit PLINK .bed code for this call.
    pub const fn code(self) -> u8 {
        match self {
            Genotype::HomAlt => 0b00,
            Genotype::Missing => 0b01,
            Genotype::Het => 0b10,
            Genotype::HomRef => 0b11,
        }
    }
}

/// Number of packed bytes holding one marker's calls for `n_individuals`.
pub fn packed_len(n_individuals: usize) -> usize {
    n_individuals.div_ceil(GENOTYPES_PER_BYTE)
}

/// Packs up to four consecutive calls into one byte.
///
/// The first call lands in the lowest two bits, the fourth in the highest two.
/// Positions past the end of `group` are padded with `HomRef`. Calls after the
/// fourth are ignored, so callers hand in `chunks(GENOTYPES_PER_BYTE)` windows.
pub fn encode_group(group: &[Genotype]) -> u8 {
    (0..GENOTYPES_PER_BYTE).fold(0u8, |byte, within| {
        let genotype = group.get(within).copied().unwrap_or(PADDING);
        byte | (genotype.code() << (2 * within))
    })
}

/// Like [`encode_group`], but starting from numeric dosages (NaN = missing).
/// Fails on the first value that is not 0, 1, 2 or NaN. As with
/// [`encode_group`], values after the fourth are neither checked nor encoded.
pub fn encode_dosage_group(group: &[f64]) -> Result<u8> {
    let mut genotypes = [PADDING; GENOTYPES_PER_BYTE];
    for (slot, &value) in genotypes.iter_mut().zip(group) {
        *slot = Genotype::try_from(value)?;
    }
    Ok(encode_group(&genotypes[..group.len().min(GENOTYPES_PER_BYTE)]))
}

pub fn pack_column(column: &[Genotype]) -> Vec<u8> {
    let mut packed = Vec::with_capacity(packed_len(column.len()));
    pack_column_into(column, &mut packed);
    packed
}

/// Packs a whole column into `packed`, replacing its previous contents.
pub fn pack_column_into(column: &[Genotype], packed: &mut Vec<u8>) {
    packed.clear();
    packed.extend(column.chunks(GENOTYPES_PER_BYTE).map(encode_group));
}
