use clap::Parser;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tally_hash::TallyOps;
use tally_hash::TallyTable;
use tally_hash::counter::DEFAULT_SCHEDULE;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'n', long = "values", default_value_t = 100_000)]
    values: usize,

    #[arg(short = 'l', long = "load_factor", default_value_t = 0.75)]
    load_factor: f64,
}

/// K&R-style string hash: full width, the table does the modulo.
struct KrOps;

impl TallyOps<String> for KrOps {
    fn hash_value(&self, value: &String) -> u64 {
        value
            .bytes()
            .fold(0, |h, b| h.wrapping_mul(31).wrapping_add(b as u64))
    }

    fn equivalent(&self, a: &String, b: &String) -> bool {
        a == b
    }
}

/// 3 to 72 visible characters.
fn random_string(rng: &mut SmallRng) -> String {
    let length = rng.random_range(3..=72);
    (0..length)
        .map(|_| rng.random_range(b'!'..=b'~') as char)
        .collect()
}

fn main() {
    let args = Args::parse();

    println!(
        "Tallying {} random strings (load factor {:.2})",
        args.values, args.load_factor
    );

    let mut table = TallyTable::new(KrOps, DEFAULT_SCHEDULE, args.load_factor);
    let mut rng = SmallRng::from_os_rng();
    let mut duplicates = 0u64;

    for _ in 0..args.values {
        if !table.add(random_string(&mut rng)).is_new() {
            duplicates += 1;
        }
    }

    println!("Unique entries: {}", table.unique_entries());
    println!("Total entries:  {}", table.total_entries());
    println!("Duplicates:     {duplicates}");
    println!("Capacity:       {}", table.capacity());
    println!(
        "Occupancy:      {:.2}%",
        (table.unique_entries() as f64 / table.capacity() as f64) * 100.0
    );

    let metrics = table.metrics();
    println!("Non-empty chains:     {}", metrics.num_chains);
    println!("Longest chain:        {}", metrics.max_chain_len);
    println!("Average chain length: {:.4}", metrics.avg_chain_len);
}
