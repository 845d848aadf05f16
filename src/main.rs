use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use permutation_tree::experiment::{self, ExperimentConfig, ExperimentRow};
use permutation_tree::PermutationTree;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "permutation_tree",
    about = "Enumerate and index permutations through a permutation tree"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every permutation of the given characters, in lexicographic order.
    List {
        /// The symbols, one character each (e.g. `123`).
        symbols: String,
    },
    /// Print the permutation with the given 1-based rank.
    Nth {
        /// The symbols, one character each (e.g. `123`).
        symbols: String,
        /// 1-based rank in lexicographic order.
        rank: u64,
        /// Lookup strategy to use.
        #[arg(long, value_enum, default_value_t = Method::Both)]
        method: Method,
    },
    /// Time full enumeration against both lookups for growing numbers of symbols.
    Bench {
        /// Largest number of symbols to build a tree for.
        #[arg(long, default_value_t = 10)]
        max_symbols: usize,
        /// Random ranks looked up per tree size.
        #[arg(long, default_value_t = 3)]
        samples: usize,
        /// Seed for the random ranks, for reproducible runs.
        #[arg(long)]
        seed: Option<u64>,
        /// Directory receiving `timings.tsv` and `timings.gp`.
        #[arg(long, default_value = "graphs")]
        out: PathBuf,
        /// Run gnuplot on the generated script.
        #[arg(long)]
        plot: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Method {
    Traversal,
    Factorial,
    Both,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List { symbols } => run_list(&symbols)?,
        Commands::Nth {
            symbols,
            rank,
            method,
        } => run_nth(&symbols, rank, method)?,
        Commands::Bench {
            max_symbols,
            samples,
            seed,
            out,
            plot,
        } => run_bench(
            ExperimentConfig {
                max_symbols,
                samples,
                seed,
            },
            &out,
            plot,
        )?,
    }

    Ok(())
}

fn build_tree(symbols: &str) -> Result<PermutationTree<char>> {
    let chars: Vec<char> = symbols.chars().collect();
    PermutationTree::new(&chars)
        .with_context(|| format!("failed to build a permutation tree for {:?}", symbols))
}

fn render(perm: &[char]) -> String {
    perm.iter().collect()
}

fn run_list(symbols: &str) -> Result<()> {
    let tree = build_tree(symbols)?;
    let perms = tree.all_permutations();
    println!(
        "All {} permutations of {:?}:",
        tree.total_permutations(),
        tree.symbols()
    );
    let line: Vec<String> = perms.iter().map(|perm| render(perm)).collect();
    println!("{}", line.join(" "));
    Ok(())
}

fn run_nth(symbols: &str, rank: u64, method: Method) -> Result<()> {
    let tree = build_tree(symbols)?;
    if !tree.contains_rank(rank) {
        bail!(
            "rank {} is out of range, {:?} has {} permutations",
            rank,
            symbols,
            tree.total_permutations()
        );
    }

    if matches!(method, Method::Traversal | Method::Both) {
        println!("traversal: {}", render(&tree.permutation_by_traversal(rank)));
    }
    if matches!(method, Method::Factorial | Method::Both) {
        println!("factorial: {}", render(&tree.permutation_by_factorial(rank)));
    }
    Ok(())
}

fn run_bench(config: ExperimentConfig, out: &Path, plot: bool) -> Result<()> {
    let rows = experiment::run(&config).context("experiment failed")?;

    println!("n\tall (µs)\ttraversal (µs)\tfactorial (µs)");
    for row in &rows {
        println!(
            "{}\t{}\t{}\t{}",
            row.num_symbols,
            row.all_permutations.as_micros(),
            row.by_traversal.as_micros(),
            row.by_factorial.as_micros()
        );
    }

    fs::create_dir_all(out)
        .with_context(|| format!("failed to create output directory {}", out.display()))?;
    let data_path = out.join("timings.tsv");
    let script_path = out.join("timings.gp");

    let mut writer = BufWriter::new(create_file(&data_path)?);
    write_timings(&mut writer, &rows)?;
    writer.flush()?;

    let mut writer = BufWriter::new(create_file(&script_path)?);
    write_gnuplot_script(&mut writer, &data_path, &out.join("timings.png"))?;
    writer.flush()?;
    info!(data = %data_path.display(), script = %script_path.display(), "wrote timing export");

    if plot {
        run_gnuplot("gnuplot", &script_path);
    }
    Ok(())
}

fn create_file(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("failed to create {}", path.display()))
}

/// Run `program` on the script. Failures are only logged; returns whether plotting succeeded.
fn run_gnuplot(program: &str, script_path: &Path) -> bool {
    match std::process::Command::new(program).arg(script_path).status() {
        Ok(status) if status.success() => true,
        Ok(status) => {
            warn!(%status, "gnuplot exited unsuccessfully");
            false
        }
        Err(err) => {
            warn!(%err, program, "failed to execute gnuplot");
            false
        }
    }
}

fn write_timings(mut writer: impl Write, rows: &[ExperimentRow]) -> Result<()> {
    writeln!(writer, "# n\tall_us\ttraversal_us\tfactorial_us")?;
    for row in rows {
        // gnuplot can't draw zero on a log axis, so sub-microsecond timings keep their fraction
        writeln!(
            writer,
            "{}\t{:.3}\t{:.3}\t{:.3}",
            row.num_symbols,
            row.all_permutations.as_secs_f64() * 1e6,
            row.by_traversal.as_secs_f64() * 1e6,
            row.by_factorial.as_secs_f64() * 1e6
        )?;
    }
    Ok(())
}

fn write_gnuplot_script(
    mut writer: impl Write,
    data_path: &Path,
    image_path: &Path,
) -> Result<()> {
    let gp_text = format!(
        "
set term png noenhanced
set output \"{image}\"
set title \"Permutation retrieval time\"
set xlabel \"number of symbols\"
set ylabel \"time (µs)\"
set logscale y
set key left top
set grid

plot \"{data}\" using 1:2 with linespoints title \"all permutations\", \\
     \"{data}\" using 1:3 with linespoints title \"by traversal\", \\
     \"{data}\" using 1:4 with linespoints title \"by factorial\"

set output
",
        image = image_path.display(),
        data = data_path.display()
    );
    write!(writer, "{}", gp_text)?;
    Ok(())
}
