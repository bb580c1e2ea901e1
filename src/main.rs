extern crate clap;
use clap::{Arg, App, ArgMatches};

use milia::{Config, Error, Metric, Quantity, tabulate};
use milia::cosmology::{check_hubble, check_matter, check_vacuum};
use milia::table::redshift_grid;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

fn parse_value(matches: &ArgMatches, name: &str) -> Result<Option<f64>, Error> {
    match matches.value_of(name) {
        Some(s) => s.parse::<f64>()
            .map(Some)
            .map_err(|e| Error::Argument(format!("--{} '{}': {}", name, s, e))),
        None => Ok(None)
    }
}

/// START:STOP:N
fn parse_grid(grid: &str) -> Result<Vec<f64>, Error> {
    let parts: Vec<&str> = grid.split(':').collect();
    if parts.len() != 3 {
        return Err(Error::Argument(format!("grid '{}' is not of the form START:STOP:N", grid)));
    }
    let n = parts[2].parse::<usize>()
        .map_err(|e| Error::Argument(format!("grid point count '{}': {}", parts[2], e)))?;
    Ok(redshift_grid(parts[0].parse()?, parts[1].parse()?, n)?.to_vec())
}

fn configure(matches: &ArgMatches) -> Result<Config, Error> {
    let mut config = match matches.value_of("config") {
        Some(path) => Config::load(path)?,
        None => Config::default()
    };
    if let Some(h) = parse_value(matches, "hubble")? {
        config.cosmology.hubble = check_hubble(h)?;
    }
    if let Some(m) = parse_value(matches, "matter")? {
        config.cosmology.matter = check_matter(m)?;
    }
    if let Some(v) = parse_value(matches, "vacuum")? {
        config.cosmology.vacuum = check_vacuum(v)?;
    }
    Ok(config)
}

fn print_table<M: Metric>(metric: &M, redshifts: &[f64], quantities: &[Quantity]) -> Result<(), Error> {
    let table = tabulate(metric, redshifts, quantities)?;
    let natural = metric.is_natural();
    let header: Vec<String> = quantities.iter()
        .map(|q| format!("{} [{}]", q, q.unit(natural)))
        .collect();
    println!("# z\t{}", header.join("\t"));
    for row in table.rows() {
        let cells: Vec<String> = row.iter().skip(1).map(|x| format!("{:.8e}", x)).collect();
        println!("{}\t{}", row[0], cells.join("\t"));
    }
    Ok(())
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let config = configure(matches)?;
    let natural = matches.is_present("natural");

    let quantities: Vec<Quantity> = match matches.values_of("quantity") {
        Some(names) => names.map(|s| s.parse::<Quantity>()).collect::<Result<Vec<_>, _>>()?,
        None => Quantity::ALL.iter()
            .copied()
            .filter(|q| !(natural && *q == Quantity::AngularScale))
            .collect()
    };

    let mut redshifts = match matches.value_of("grid") {
        Some(grid) => parse_grid(grid)?,
        None => Vec::new()
    };
    if let Some(values) = matches.values_of("REDSHIFT") {
        for s in values {
            redshifts.push(s.parse::<f64>()
                .map_err(|e| Error::Argument(format!("redshift '{}': {}", s, e)))?);
        }
    }
    debug!(?quantities, points = redshifts.len(), "tabulating");

    if natural {
        let metric = config.natural_metric()?;
        info!("using {}", metric);
        print_table(&metric, &redshifts, &quantities)
    } else {
        let metric = config.metric()?;
        info!("using {}", metric);
        print_table(&metric, &redshifts, &quantities)
    }
}

fn main() {
    let matches = App::new("milia")
        .version("0.1.0")
        .about("Distances, times and volumes in FLRW cosmologies.")
        .arg(Arg::with_name("hubble")
             .long("hubble")
             .value_name("H0")
             .help("Hubble parameter in km/s/Mpc")
             .takes_value(true))
        .arg(Arg::with_name("matter")
             .long("matter")
             .value_name("OMEGA_M")
             .help("Matter density")
             .takes_value(true))
        .arg(Arg::with_name("vacuum")
             .long("vacuum")
             .value_name("OMEGA_L")
             .help("Vacuum energy density")
             .allow_hyphen_values(true)
             .takes_value(true))
        .arg(Arg::with_name("natural")
             .long("natural")
             .help("Report in units of the Hubble radius and Hubble time"))
        .arg(Arg::with_name("config")
             .short("c")
             .long("config")
             .value_name("FILE")
             .help("TOML file with [cosmology] and [quadrature] tables")
             .takes_value(true))
        .arg(Arg::with_name("quantity")
             .short("q")
             .long("quantity")
             .value_name("QUANTITY")
             .help("Column to print, repeatable (default: all)")
             .takes_value(true)
             .multiple(true)
             .number_of_values(1)
             .possible_values(&Quantity::NAMES))
        .arg(Arg::with_name("grid")
             .long("grid")
             .value_name("START:STOP:N")
             .help("Evenly spaced redshifts, before any listed ones")
             .takes_value(true))
        .arg(Arg::with_name("verbose")
             .short("v")
             .multiple(true)
             .help("Log more to stderr, repeatable"))
        .arg(Arg::with_name("REDSHIFT")
             .help("Redshifts to evaluate at")
             .multiple(true)
             .required_unless("grid")
             .index(1))
        .get_matches();

    init_logging(matches.occurrences_of("verbose"));

    if let Err(e) = run(&matches) {
        eprintln!("milia: {}", e);
        std::process::exit(1);
    }
}
