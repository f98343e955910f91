use ndarray::Array2;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

pub const BED_HEADER: [u8; 3] = [0x6c, 0x1b, 0x01];

const HOM_ALT: u8 = 0b00;
const MISSING: u8 = 0b01;
const HET: u8 = 0b10;
const HOM_REF: u8 = 0b11;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

pub struct Workspace {
    pub dir: PathBuf,
}

impl Workspace {
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

pub fn create_workspace(label: &str) -> io::Result<Workspace> {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join("bedgen-tests").join(format!(
        "{}-{}-{}",
        std::process::id(),
        id,
        label
    ));
    fs::create_dir_all(&dir)?;
    Ok(Workspace { dir })
}

/// Decodes headerless SNP-major .bed bytes into per-marker alt-allele counts
/// (`None` = missing).
pub fn decode_markers(body: &[u8], n_individuals: usize) -> Vec<Vec<Option<u8>>> {
    let bytes_per_marker = n_individuals.div_ceil(4);
    assert_eq!(body.len() % bytes_per_marker.max(1), 0);
    body.chunks(bytes_per_marker)
        .map(|block| {
            (0..n_individuals)
                .map(|idx| match code_at(block, idx) {
                    HOM_ALT => Some(2),
                    MISSING => None,
                    HET => Some(1),
                    HOM_REF => Some(0),
                    _ => unreachable!(),
                })
                .collect()
        })
        .collect()
}

/// Raw 2-bit codes in the slots past the last individual of each marker.
pub fn padding_codes(body: &[u8], n_individuals: usize) -> Vec<u8> {
    let bytes_per_marker = n_individuals.div_ceil(4);
    body.chunks(bytes_per_marker)
        .flat_map(|block| (n_individuals..bytes_per_marker * 4).map(move |idx| code_at(block, idx)))
        .collect()
}

fn code_at(block: &[u8], idx: usize) -> u8 {
    (block[idx / 4] >> ((idx % 4) * 2)) & 0b11
}

pub fn write_dosages(path: &Path, dosages: &Array2<f64>) {
    ndarray_npy::write_npy(path, dosages).unwrap();
}
