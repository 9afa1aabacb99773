use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use num_bigint::BigInt;
use num_rational::BigRational;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wallcross_core::{
    all_exponents, render_fingerprints, CuratedMode, EngineConfig, Fingerprint, IndexSet,
    NormalVectorEngine, Survey, WeightTable, WeightVector,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = EngineConfig {
        dimension: cli.dimension,
        degree: cli.degree,
        parallel: !cli.sequential,
    };
    match cli.cmd {
        Command::Exponents => run_exponents(&config),
        Command::ZeroSet { source } => run_zero_set(&config, source),
        Command::Normal { case, points } => run_normal(&config, case, points),
        Command::Walls {
            source,
            points,
            derived,
        } => run_walls(&config, source, points, derived),
        Command::Survey {
            include_duplicate,
            shared,
        } => run_survey(&config, include_duplicate, shared),
        Command::Check => run_check(&config),
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "wallcross",
    about = "Wall detection between GIT strata of cubic hypersurfaces"
)]
struct Cli {
    /// Number of variables
    #[arg(long, global = true, default_value_t = 7)]
    dimension: usize,

    /// Degree of the hypersurface
    #[arg(long, global = true, default_value_t = 3)]
    degree: u32,

    /// Run the subset search on a single thread
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    sequential: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

/// Where the weight vector comes from.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct WeightSource {
    /// Case index in the weight table
    #[arg(long)]
    case: Option<usize>,

    /// Explicit weight, comma separated rationals (e.g. "1/2,-1/2,0,...")
    #[arg(long, allow_hyphen_values = true)]
    weight: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every exponent vector of the configured dimension and degree
    Exponents,

    /// Zero-weight index set of a weight vector
    ZeroSet {
        #[command(flatten)]
        source: WeightSource,
    },

    /// Single-shot normal of a face through the barycenter
    Normal {
        /// Case with a curated single-shot index set
        #[arg(long, conflicts_with = "points", required_unless_present = "points")]
        case: Option<usize>,

        /// Explicit points, ';' between points and ',' between entries
        #[arg(long)]
        points: Option<String>,
    },

    /// Enumerative facet search for one weight vector
    Walls {
        #[command(flatten)]
        source: WeightSource,

        /// Explicit index set instead of the case's (or the derived) one
        #[arg(long)]
        points: Option<String>,

        /// Use the derived zero-weight set even if the case has a curated one
        #[arg(long, action = ArgAction::SetTrue)]
        derived: bool,
    },

    /// Facet search over every case of the weight table
    Survey {
        /// Also visit the redundant duplicate entry
        #[arg(long, action = ArgAction::SetTrue)]
        include_duplicate: bool,

        /// List fingerprints shared between cases
        #[arg(long, action = ArgAction::SetTrue)]
        shared: bool,
    },

    /// Validate the weight table and curated index sets
    Check,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_weight(text: &str, dimension: usize) -> Result<WeightVector> {
    let entries = text
        .split(',')
        .map(|s| {
            let s = s.trim();
            s.parse::<BigRational>()
                .with_context(|| format!("cannot parse weight entry {:?}", s))
        })
        .collect::<Result<Vec<_>>>()?;
    if entries.len() != dimension {
        bail!(
            "weight has {} entries, expected {}",
            entries.len(),
            dimension
        );
    }
    Ok(WeightVector::new(entries)?)
}

fn parse_points(text: &str, config: &EngineConfig) -> Result<IndexSet> {
    let rows = text
        .split(';')
        .filter(|row| !row.trim().is_empty())
        .map(|row| {
            row.split(',')
                .map(|s| {
                    let s = s.trim();
                    s.parse::<i64>()
                        .with_context(|| format!("cannot parse exponent {:?}", s))
                })
                .collect::<Result<Vec<i64>>>()
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(IndexSet::from_literals(rows.as_slice(), config.dimension, config.degree)?)
}

fn resolve_weight(source: &WeightSource, config: &EngineConfig) -> Result<WeightVector> {
    match (&source.case, &source.weight) {
        (Some(k), _) => Ok(WeightTable::standard().case(*k)?.weight_vector()?),
        (None, Some(text)) => parse_weight(text, config.dimension),
        (None, None) => bail!("either --case or --weight is required"),
    }
}

fn run_exponents(config: &EngineConfig) -> Result<()> {
    let all = all_exponents(config.dimension, config.degree);
    println!(
        "Exponent vectors (dimension={}, degree={}) count={}",
        config.dimension,
        config.degree,
        all.len()
    );
    for (i, e) in all.iter().enumerate() {
        println!("  {:>3}) {}", i + 1, e);
    }
    Ok(())
}

fn run_zero_set(config: &EngineConfig, source: WeightSource) -> Result<()> {
    let weight = resolve_weight(&source, config)?;
    let universe = all_exponents(config.dimension, config.degree);
    let set = IndexSet::zero_weight(&weight, &universe);
    println!("Zero-weight set of {} (size={})", weight, set.len());
    print!("{}", set);
    Ok(())
}

fn run_normal(config: &EngineConfig, case: Option<usize>, points: Option<String>) -> Result<()> {
    let engine = NormalVectorEngine::new(config.clone());
    let index_set = match (case, points) {
        (_, Some(text)) => parse_points(&text, config)?,
        (Some(k), None) => {
            let entry = WeightTable::standard().case(k)?;
            match entry.curated {
                Some(curated) if curated.mode == CuratedMode::SingleShot => {
                    entry.curated_index_set(config)?
                }
                _ => bail!("case {} has no curated single-shot index set", k),
            }
        }
        (None, None) => bail!("either --case or --points is required"),
    };

    let normal = engine
        .single_shot_normal(&index_set)
        .context("single-shot normal computation failed")?;
    info!(normal = %render_normal(&normal), points = index_set.len(), "face normal");
    println!("{}", render_fingerprints(&[Fingerprint::of(&normal)]));
    Ok(())
}

fn run_walls(
    config: &EngineConfig,
    source: WeightSource,
    points: Option<String>,
    derived: bool,
) -> Result<()> {
    let engine = NormalVectorEngine::new(config.clone());
    let weight = resolve_weight(&source, config)?;
    let index_set = match (points, source.case) {
        (Some(text), _) => parse_points(&text, config)?,
        (None, Some(k)) if !derived => WeightTable::standard().case(k)?.index_set(config)?,
        (None, _) => {
            let universe = all_exponents(config.dimension, config.degree);
            IndexSet::zero_weight(&weight, &universe)
        }
    };

    let search = engine.enumerate_facets(&weight, &index_set)?;
    info!(
        points = index_set.len(),
        subsets = search.stats.subsets,
        degenerate = search.stats.degenerate,
        non_supporting = search.stats.non_supporting,
        low_dimensional = search.stats.low_dimensional,
        "facet search"
    );
    for facet in search.facets.values() {
        info!(
            normal = %render_normal(&facet.inward_normal),
            offset = %facet.offset,
            on_wall = facet.equality_set.len(),
            "wall"
        );
    }
    println!("{}", render_fingerprints(search.fingerprints().iter().rev()));
    Ok(())
}

fn run_survey(config: &EngineConfig, include_duplicate: bool, shared: bool) -> Result<()> {
    let engine = NormalVectorEngine::new(config.clone());
    let report = Survey::run(&engine, &WeightTable::standard(), include_duplicate);
    print!("{}", report);

    if shared {
        let walls = report.shared_walls();
        if walls.is_empty() {
            println!("\nNo wall is shared between cases.");
        } else {
            println!("\nShared walls:");
            for (fp, ks) in &walls {
                let ks: Vec<String> = ks.iter().map(|k| k.to_string()).collect();
                println!("  {} <- k={}", fp, ks.join(","));
            }
        }
    }

    if !report.failures.is_empty() {
        for (k, err) in &report.failures {
            eprintln!("k={} failed: {}", k, err);
        }
        bail!("{} case(s) failed", report.failures.len());
    }
    Ok(())
}

fn run_check(config: &EngineConfig) -> Result<()> {
    let table = WeightTable::standard();
    table.verify(config).context("weight table self-check failed")?;
    println!(
        "Weight table OK: {} cases (+1 duplicate), curated sets valid",
        table.cases(false).count()
    );
    Ok(())
}

fn render_normal(normal: &[BigInt]) -> String {
    let parts: Vec<String> = normal.iter().map(|x| x.to_string()).collect();
    format!("({})", parts.join(", "))
}
