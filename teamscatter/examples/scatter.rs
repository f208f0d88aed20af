//! Ring scatter driver over file input, non-parametric Bayesian kernel.
use std::time::Instant;

use mpi::topology::SimpleCommunicator;
use mpi::traits::Communicator;

use teamscatter::io;
use teamscatter::profile;
use teamscatter::schedule::serial;
use teamscatter::{EvalError, NonParaBayesian, RingScatter};

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

fn main() {
    let mut arg: Vec<String> = std::env::args().collect();

    let mut check_errors = true;
    arg.retain(|a| {
        if a == "-nocheck" {
            check_errors = false;
            false
        } else {
            true
        }
    });

    if arg.len() < 3 {
        eprintln!("Usage: {} PHI_FILE SIGMA_FILE [-nocheck]", arg[0]);
        std::process::exit(1);
    }

    let universe = mpi::initialize().unwrap();
    let world = universe.world();
    let rank = world.rank();

    let kernel = NonParaBayesian::new(1.0, 1.0);

    let mut sources = Vec::new();
    let mut charges = Vec::new();
    if rank == 0 {
        sources = abort_on_error(&world, io::read_points::<f64>(&arg[1]).map_err(Into::into));
        charges = abort_on_error(&world, io::read_scalars::<f64>(&arg[2]).map_err(Into::into));
        assert_eq!(sources.len(), charges.len());

        println!("N = {}", charges.len());
        println!("P = {}", world.size());
    }

    let mut schedule = RingScatter::new(&world, kernel);

    let start = Instant::now();
    let result = abort_on_error(&world, schedule.evaluate(&sources, &charges));
    let time = start.elapsed().as_secs_f64();

    let averages = profile::average_to_master(&world, schedule.times());

    if let Some(averages) = averages {
        println!("Label\tComputation\tSplit\tShift\tReduce");
        println!(
            "p={}\t{:e}\t{:e}\t{:e}\t{:e}",
            world.size(),
            averages[0],
            averages[1],
            averages[2],
            averages[4]
        );
        println!("Rank 0 Total Time: {:e}", time);
    }

    if let Some(result) = result {
        if check_errors {
            println!("Computing direct matvec...");
            let exact = serial::evaluate(&kernel, &sources, &charges, &sources);
            println!("Error: {:e}", io::relative_error(&result, &exact));
        }

        std::fs::create_dir_all("data").unwrap();
        io::write_scalars("data/phi.txt", &result).unwrap();
    }
}
