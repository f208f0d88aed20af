//! Symmetric team scatter driver over generated input, inverse square kernel.
use std::time::Instant;

use mpi::topology::SimpleCommunicator;
use mpi::traits::Communicator;

use teamscatter::helpers::random_system;
use teamscatter::io;
use teamscatter::profile;
use teamscatter::schedule::serial;
use teamscatter::{EvalError, InvSq, SymmetricTeamScatter};

const SEED: u64 = 1337;

fn abort_on_error<T>(world: &SimpleCommunicator, result: Result<T, EvalError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            if world.rank() == 0 {
                eprintln!("Quitting. {}", e);
            }
            world.abort(1);
        }
    }
}

struct Args {
    n: usize,
    teamsize: i32,
    check_errors: bool,
}

fn parse_args() -> Result<Args, String> {
    let raw: Vec<String> = std::env::args().collect();
    let usage = format!("Usage: {} NUMPOINTS [-c TEAMSIZE] [-nocheck]", raw[0]);

    let mut teamsize = 1;
    let mut check_errors = true;
    let mut positional = Vec::new();

    let mut iter = raw.iter().skip(1);
    while let Some(a) = iter.next() {
        match a.as_str() {
            "-c" => {
                let value = iter.next().ok_or("-c option requires one argument")?;
                teamsize = value
                    .parse()
                    .map_err(|_| format!("bad teamsize: {}", value))?;
            }
            "-nocheck" => check_errors = false,
            _ => positional.push(a.clone()),
        }
    }

    let n = positional
        .first()
        .ok_or(usage.clone())?
        .parse()
        .map_err(|_| usage)?;

    Ok(Args {
        n,
        teamsize,
        check_errors,
    })
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
    };

    let universe = mpi::initialize().unwrap();
    let world = universe.world();
    let rank = world.rank();

    let kernel = InvSq::<f64>::default();

    let mut sources = Vec::new();
    let mut charges = Vec::new();
    if rank == 0 {
        (sources, charges) = random_system(args.n, SEED);

        println!("N = {}", args.n);
        println!("P = {}", world.size());
        println!("Teamsize = {}", args.teamsize);
    }

    let mut schedule = abort_on_error(
        &world,
        SymmetricTeamScatter::new(&world, kernel, args.teamsize),
    );

    let start = Instant::now();
    let result = abort_on_error(&world, schedule.evaluate(&sources, &charges));
    let time = start.elapsed().as_secs_f64();

    let averages = profile::average_to_master(&world, schedule.times());

    if let Some(averages) = averages {
        println!("Label\tComputation\tSplit\tShift\tSendReceive\tReduce");
        println!(
            "C={}\t{:e}\t{:e}\t{:e}\t{:e}\t{:e}",
            args.teamsize, averages[0], averages[1], averages[2], averages[3], averages[4]
        );
        println!("Rank 0 Total Time: {:e}", time);
    }

    if let Some(result) = result {
        if args.check_errors {
            verify(&kernel, &sources, &charges, &result);
        }
    }
}

fn verify(
    kernel: &InvSq<f64>,
    sources: &[teamscatter::Point3<f64>],
    charges: &[f64],
    result: &[f64],
) {
    let n = charges.len();
    let path = io::reference_path("invsq", n, SEED);

    match io::read_scalars::<f64>(&path) {
        Ok(exact) => {
            println!("Reading result from {}", path.display());
            assert_eq!(exact.len(), n);
            println!("Error: {:e}", io::relative_error(result, &exact));
        }
        Err(_) => {
            println!("Computing direct matvec...");

            let start = Instant::now();
            let exact = serial::evaluate(kernel, sources, charges, sources);
            let direct_time = start.elapsed().as_secs_f64();

            println!("Error: {:e}", io::relative_error(result, &exact));
            println!("DirectCompTime: {:e}", direct_time);

            std::fs::create_dir_all("data").unwrap();
            io::write_scalars(&path, &exact).unwrap();
        }
    }
}
