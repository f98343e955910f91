use crate::{Command, OutputArgs};
use bedgen::error::{CustomError, Result};
use bedgen::sidecar::{write_bim, write_fam};
use bedgen::source::{ColumnSource, GenotypeMatrix, RandomColumns};
use bedgen::writer::{BedWriter, check_request};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct OutputSpec {
    bed: PathBuf,
    header: bool,
    sidecars: bool,
}

impl OutputSpec {
    pub fn from_args(args: &OutputArgs) -> Self {
        Self {
            bed: PathBuf::from(&args.output),
            header: !args.no_header,
            sidecars: args.sidecars,
        }
    }

    pub fn print_paths(&self) {
        println!("BED: {}", self.bed.display());
        if self.sidecars {
            println!("FAM: {}", self.fam().display());
            println!("BIM: {}", self.bim().display());
        }
        println!();
    }

    pub fn bed(&self) -> &Path {
        self.bed.as_path()
    }

    pub fn fam(&self) -> PathBuf {
        self.bed.with_extension("fam")
    }

    pub fn bim(&self) -> PathBuf {
        self.bed.with_extension("bim")
    }
}

pub fn run(command: &Command) -> Result<()> {
    match command {
        Command::Random {
            n_individuals,
            n_markers,
            materialize,
            seed,
            output,
        } => run_random(
            *n_individuals,
            *n_markers,
            *materialize,
            *seed,
            &OutputSpec::from_args(output),
        ),
        Command::Convert { input, output } => run_convert(input, &OutputSpec::from_args(output)),
    }
}

fn run_random(
    n_individuals: usize,
    n_markers: usize,
    materialize: bool,
    seed: Option<u64>,
    spec: &OutputSpec,
) -> Result<()> {
    spec.print_paths();
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    if materialize {
        println!("Simulating {n_individuals} individuals x {n_markers} markers in memory...");
        let matrix = GenotypeMatrix::random(n_individuals, n_markers, &mut rng)?;
        write_outputs(spec, n_markers, &mut matrix.columns())
    } else {
        println!("Streaming {n_individuals} individuals x {n_markers} markers...");
        write_outputs(spec, n_markers, &mut RandomColumns::new(n_individuals, rng))
    }
}

fn run_convert(input: &Path, spec: &OutputSpec) -> Result<()> {
    println!("NPY: {}", input.display());
    spec.print_paths();

    let matrix = GenotypeMatrix::from_npy(&input)?;
    let freqs: Vec<f64> = matrix
        .allele_frequencies()
        .into_iter()
        .filter(|f| f.is_finite())
        .collect();
    println!(
        "Read {} individuals x {} markers ({} markers with calls)",
        matrix.n_individuals(),
        matrix.n_markers(),
        freqs.len()
    );
    if !freqs.is_empty() {
        let mean = freqs.iter().sum::<f64>() / freqs.len() as f64;
        println!("Mean alternate allele frequency: {mean:.4}");
    }

    write_outputs(spec, matrix.n_markers(), &mut matrix.columns())
}

fn write_outputs(spec: &OutputSpec, n_markers: usize, source: &mut dyn ColumnSource) -> Result<()> {
    if let Some(parent) = spec.bed().parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| CustomError::OutputDir { source: e })?;
    }

    let n_individuals = source.n_individuals();
    // Reject the request before the destination gets truncated
    check_request(n_individuals, n_markers, spec.header, source.n_markers())?;
    let written = BedWriter::create(&spec.bed())?
        .header(spec.header)
        .progress(progress_bar(n_markers))
        .write(n_markers, source)?;
    println!("Wrote {written} bytes to {}", spec.bed().display());

    if spec.sidecars {
        write_fam(&spec.fam(), n_individuals)?;
        write_bim(&spec.bim(), n_markers)?;
        println!("Wrote placeholder sidecars");
    }
    Ok(())
}

fn progress_bar(n_markers: usize) -> ProgressBar {
    let pb = ProgressBar::new(n_markers as u64);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:30} {pos}/{len} markers").unwrap(),
    );
    pb
}
