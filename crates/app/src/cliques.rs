use cliques::prelude::*;

use log::info;

use std::io::Read;
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = cli::create()?;

    info!(
        "Enumerating maximal cliques ({} bit node ids)",
        if args.use_32_bit { "32" } else { "64" }
    );

    if args.use_32_bit {
        run::<u32>(args)
    } else {
        run::<usize>(args)
    }
}

fn run<NI: Idx>(args: cli::AppArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut graph: UndirectedALGraph<NI> = match &args.path {
        Some(path) => {
            info!("Reading graph from: {:?}", path);
            GraphBuilder::new()
                .file_format(EdgeListInput::default())
                .path(path)
                .build()?
        }
        None => {
            info!("Reading graph from standard input");
            let mut bytes = Vec::new();
            std::io::stdin().lock().read_to_end(&mut bytes)?;
            let edge_list = EdgeList::try_from(bytes.as_slice())?;
            UndirectedALGraph::from((edge_list, ListLayout::Unsorted))
        }
    };

    for run in 1..=args.runs {
        match &args.export {
            Some(file) => {
                let start = Instant::now();
                let (count, tree) =
                    maximal_cliques_with_tree(&mut graph, SearchTreeConfig::default());
                let elapsed = start.elapsed();

                println!("Clique count: {}", count);
                println!("Elapsed Time: {} ms", elapsed.as_millis());

                let stats = tree.stats();
                println!("Search tree nodes: {}", stats.nodes);
                println!("Explored nodes: {}", stats.explored);
                println!("Pruned nodes: {}", stats.pruned);
                println!("Pruning ratio: {:.2}%", stats.pruning_ratio() * 100.0);
                println!("Leaves: {}", stats.leaves);
                println!("Max depth: {}", stats.max_depth);

                // a failed export still leaves the enumeration result usable
                match tree.export_csv(file) {
                    Ok(()) => info!("Wrote search tree to {:?}", file),
                    Err(error) => {
                        eprintln!("Failed to write search tree to {:?}: {}", file, error)
                    }
                }
            }
            None => {
                let start = Instant::now();
                let count = maximal_cliques(&mut graph);
                let elapsed = start.elapsed();

                println!("Clique count: {}", count);
                println!("Elapsed Time: {} ms", elapsed.as_millis());
            }
        }

        info!("Run {} of {} finished", run, args.runs);
    }

    Ok(())
}

mod cli {
    use pico_args::Arguments;
    use std::{convert::Infallible, ffi::OsStr, path::PathBuf};

    const DEFAULT_EXPORT_FILE: &str = "search_tree.csv";

    #[derive(Debug)]
    pub(crate) struct AppArgs {
        pub(crate) path: Option<PathBuf>,
        pub(crate) export: Option<PathBuf>,
        pub(crate) runs: usize,
        pub(crate) use_32_bit: bool,
    }

    pub(crate) fn create() -> Result<AppArgs, Box<dyn std::error::Error>> {
        let mut pargs = Arguments::from_env();

        fn as_path_buf(arg: &OsStr) -> Result<PathBuf, Infallible> {
            Ok(arg.into())
        }

        let path = pargs.opt_value_from_os_str(["-p", "--path"], as_path_buf)?;
        let runs = pargs.opt_value_from_str(["-r", "--runs"])?.unwrap_or(1);
        let use_32_bit = pargs.contains("--use-32-bit");

        let export = if pargs.contains(["-e", "--export-tree"]) {
            // the filename is optional; the first leftover token that does
            // not look like a flag is taken, everything else is ignored
            // for forward compatibility
            let file = pargs
                .finish()
                .into_iter()
                .find(|arg| !arg.to_string_lossy().starts_with('-'))
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));
            Some(file)
        } else {
            let _ = pargs.finish();
            None
        };

        Ok(AppArgs {
            path,
            export,
            runs,
            use_32_bit,
        })
    }
}
