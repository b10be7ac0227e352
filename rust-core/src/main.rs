use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::info;
use nalgebra::{Matrix3, Vector3};
use wannier_rvectors::{build_mdrs_rvectors, build_ws_rvectors, BaseMatrix, SearchParams, Space};

#[derive(Parser)]
#[command(name = "wannier-rvectors")]
#[command(about = "Wigner-Seitz and MDRS R-vectors for Wannier interpolation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads to use (default: all available cores)
    #[arg(short, long, global = true)]
    threads: Option<usize>,
}

#[derive(Args)]
struct SearchArgs {
    /// Lattice vectors a1, a2, a3 as nine comma-separated numbers
    #[arg(short, long, required = true, value_delimiter = ',', allow_hyphen_values = true)]
    lattice: Vec<f64>,

    /// Grid dimensions as three comma-separated integers
    #[arg(short, long, required = true, value_delimiter = ',')]
    grid: Vec<usize>,

    /// Distance tolerance for degeneracy detection
    #[arg(long, default_value_t = wannier_rvectors::config::DEFAULT_ATOL)]
    atol: f64,

    /// Supercell shells searched on each side of the home grid
    #[arg(long, default_value_t = wannier_rvectors::config::DEFAULT_MAX_CELL)]
    max_cell: usize,

    /// Number of nearest translations inspected per point
    #[arg(long, default_value_t = wannier_rvectors::config::DEFAULT_N_NEAREST)]
    n_nearest: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Print Wigner-Seitz R-vectors and degeneracies
    Ws {
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Print MDRS translation counts for every function pair
    Mdrs {
        #[command(flatten)]
        search: SearchArgs,

        /// Function center as three comma-separated numbers (repeat per function)
        #[arg(
            short,
            long = "center",
            required = true,
            value_delimiter = ',',
            allow_hyphen_values = true
        )]
        centers: Vec<f64>,

        /// Centers are given in Cartesian coordinates instead of fractional
        #[arg(long)]
        cartesian: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Set thread pool size if specified
    if let Some(threads) = cli.threads {
        #[cfg(feature = "parallel")]
        {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .context("Failed to set thread pool size")?;
            info!("Using {} threads", threads);
        }
        #[cfg(not(feature = "parallel"))]
        {
            let _ = threads;
            log::warn!("Thread count specified but parallel feature not enabled. Ignoring.");
        }
    }

    info!("Starting wannier-rvectors v{}", wannier_rvectors::VERSION);

    match cli.command {
        Commands::Ws { search } => print_ws(&search),
        Commands::Mdrs {
            search,
            centers,
            cartesian,
        } => print_mdrs(&search, &centers, cartesian),
    }
}

fn parse_search(args: &SearchArgs) -> anyhow::Result<(Matrix3<f64>, [usize; 3], SearchParams)> {
    if args.lattice.len() != 9 {
        bail!("expected 9 lattice components, got {}", args.lattice.len());
    }
    let grid: [usize; 3] = args
        .grid
        .as_slice()
        .try_into()
        .with_context(|| format!("expected 3 grid dimensions, got {}", args.grid.len()))?;

    let lattice = Matrix3::from_column_slice(&args.lattice);
    let params = SearchParams::new()
        .with_atol(args.atol)
        .with_max_cell(args.max_cell)
        .with_n_nearest(args.n_nearest);
    Ok((lattice, grid, params))
}

fn print_ws(args: &SearchArgs) -> anyhow::Result<()> {
    let (lattice, grid, params) = parse_search(args)?;
    let rvectors = build_ws_rvectors(&lattice, grid, &params)
        .context("Wigner-Seitz construction failed")?;

    println!("{} R-vectors", rvectors.n_rvecs());
    for (rvector, degeneracy) in rvectors.iter() {
        println!("{:5} {:5} {:5} {:4}", rvector.x, rvector.y, rvector.z, degeneracy);
    }
    Ok(())
}

fn print_mdrs(args: &SearchArgs, centers: &[f64], cartesian: bool) -> anyhow::Result<()> {
    let (lattice, grid, params) = parse_search(args)?;
    if centers.is_empty() || centers.len() % 3 != 0 {
        bail!("centers must be given as triples, got {} numbers", centers.len());
    }

    let basis = BaseMatrix::from_matrix(lattice).context("invalid lattice")?;
    let space = if cartesian {
        Space::Cartesian
    } else {
        Space::Fractional
    };
    let centers: Vec<Vector3<f64>> = centers
        .chunks_exact(3)
        .map(|c| basis.to_fractional(&Vector3::new(c[0], c[1], c[2]), space))
        .collect();

    let (rvectors, refined) = build_mdrs_rvectors(&lattice, grid, &centers, &params)
        .context("MDRS construction failed")?;

    println!(
        "{} R-vectors, {} functions",
        rvectors.n_rvecs(),
        refined.n_wann()
    );
    for ((m, n, r), translations) in refined.cells() {
        let rvector = rvectors.vectors()[r];
        println!(
            "{:4} {:4} {:5} {:5} {:5} {:4}",
            m + 1,
            n + 1,
            rvector.x,
            rvector.y,
            rvector.z,
            translations.len()
        );
    }
    Ok(())
}
