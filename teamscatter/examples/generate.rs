//! Write a random source file and charge file for the file-driven drivers.
use teamscatter::helpers::random_system;
use teamscatter::io;

const SEED: u64 = 1337;

fn main() {
    let arg: Vec<String> = std::env::args().collect();

    if arg.len() < 4 {
        eprintln!("Usage: {} PHI_FILE SIGMA_FILE N", arg[0]);
        std::process::exit(1);
    }

    let n: usize = match arg[3].parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("Usage: {} PHI_FILE SIGMA_FILE N", arg[0]);
            std::process::exit(1);
        }
    };

    let (sources, charges) = random_system::<f64>(n, SEED);

    if let Err(e) = io::write_points(&arg[1], &sources) {
        eprintln!("failed to write {}: {}", arg[1], e);
        std::process::exit(1);
    }
    if let Err(e) = io::write_scalars(&arg[2], &charges) {
        eprintln!("failed to write {}: {}", arg[2], e);
        std::process::exit(1);
    }
}
