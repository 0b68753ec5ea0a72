use std::path::PathBuf;

use clap::Parser;

use dsep_rs::io::{read_network, read_query};

#[derive(Debug, Parser)]
#[command(author, version, about = "Checks whether <X|Z|Y> holds in the DAG of a Bayesian network")]
struct Cli {
    /// Path to the Bayesian network file.
    #[arg(value_name = "NETWORK")]
    network: PathBuf,

    /// Path to the query file (X, Y and Z on three lines).
    #[arg(value_name = "QUERY")]
    query: PathBuf,

    /// Directory to write `ancestral.dot` and `moral.dot` into.
    #[clap(long, value_name = "DIR")]
    dot: Option<PathBuf>,

    /// Print every node of the network.
    #[clap(long)]
    dump: bool,

    /// Enable debug logging.
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let dag = read_network(&args.network)?;
    let query = read_query(&args.query)?;

    println!("Bayesian Network variable names: ");
    for node in dag.nodes() {
        if args.dump {
            println!("{}", node);
        } else {
            println!("\tNode {}: {}", node.id.get(), node.name);
        }
    }

    println!("XYZ File variable names: ");
    for (label, set) in [("X", &query.x), ("Y", &query.y), ("Z", &query.z)] {
        println!("\tSET {}: ", label);
        println!("\t\t{}", set.iter().cloned().collect::<Vec<_>>().join(" "));
    }

    let time_total = std::time::Instant::now();
    let result = dag.d_separation(&query);
    println!();
    println!("{}G : {}", query, result.separated);

    if let Some(dir) = &args.dot {
        std::fs::create_dir_all(dir)?;
        std::fs::write(dir.join("ancestral.dot"), result.ancestral.to_dot(Some(&query))?)?;
        std::fs::write(dir.join("moral.dot"), result.moral.to_dot(Some(&query))?)?;
        println!("Wrote ancestral.dot and moral.dot to {}", dir.display());
    }

    log::info!(
        "Ancestral subgraph: {} nodes, moral graph: {} edges",
        result.ancestral.len(),
        result.moral.edge_count()
    );
    log::info!("Total time: {:.3} s", time_total.elapsed().as_secs_f64());

    Ok(())
}
