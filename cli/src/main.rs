use clap::{Parser, Subcommand};
use mazer_common::db::core::{RoutedDesign, RoutingDB};
use mazer_common::db::{parser, writer};
use mazer_common::util::config::Config;
use mazer_common::util::{check, generator, logger, visualization};
use mazer_router::grid::DEFAULT_DIRECTIONS;
use mazer_router::report::RouteSummary;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,

    /// Overrides [routing].enable_net_reordering from the config.
    #[arg(long)]
    reorder: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Route the configured netlist (the default).
    Route,
    /// Emit a random benchmark netlist.
    Generate {
        #[arg(long, default_value_t = 100)]
        rows: u32,
        #[arg(long, default_value_t = 100)]
        cols: u32,
        #[arg(long, default_value_t = 20)]
        nets: usize,
        #[arg(long, default_value_t = 50)]
        obstacles: usize,
        #[arg(long, default_value_t = 3)]
        pins: usize,
        #[arg(long, default_value_t = 5)]
        via_cost: i64,
        #[arg(long, default_value_t = 10)]
        non_pref_cost: i64,
        #[arg(long, default_value = "inputs/random.txt")]
        output: String,
    },
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let mut config = if args.config.exists() {
        log::info!("Loading configuration from {:?}", args.config);
        let config_str = std::fs::read_to_string(&args.config)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
        toml::from_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?
    } else {
        log::warn!(
            "Configuration file {:?} not found. Using internal defaults.",
            args.config
        );
        Config::default()
    };
    if args.reorder {
        config.routing.enable_net_reordering = true;
    }

    let command = args.command.unwrap_or(Commands::Route);

    match command {
        Commands::Generate {
            rows,
            cols,
            nets,
            obstacles,
            pins,
            via_cost,
            non_pref_cost,
            output,
        } => {
            prepare_output_dir(&output)?;
            generator::generate_random_netlist(
                &output,
                rows,
                cols,
                nets,
                obstacles,
                pins,
                via_cost,
                non_pref_cost,
            )?;
            log::info!("Generated: {}", output);
        }
        Commands::Route => {
            if !Path::new(&config.input.netlist_file).exists() {
                return Err(anyhow::anyhow!(
                    "Netlist file missing: '{}'",
                    config.input.netlist_file
                ));
            }
            prepare_output_dir(&config.input.output_file)?;

            if run_routing(&config).is_err() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn run_routing(config: &Config) -> anyhow::Result<()> {
    let db = parser::netlist::parse(&config.input.netlist_file)?;
    let design = mazer_router::route(&db, &config.routing)?;

    show_routing_info(&db, &design);

    if let Err(e) = check::run_route_check(&db, &design) {
        return Err(anyhow::anyhow!(e));
    }

    writer::write_routes(&design, &config.input.output_file)?;

    if let Some(image_file) = &config.input.image_file {
        prepare_output_dir(image_file)?;
        visualization::draw_routed_grid(&db, &design, image_file);
    }

    Ok(())
}

fn show_routing_info(db: &RoutingDB, design: &RoutedDesign) {
    let rule = "════════════════════════════════════════════";
    println!("{}", rule);
    for net in &design.nets {
        println!("Net: net{}", net.id);
        if net.path.is_empty() {
            println!("No route found");
            println!("{}", rule);
            continue;
        }
        let summary = RouteSummary::of_path(
            &net.path,
            DEFAULT_DIRECTIONS,
            db.via_cost,
            db.non_pref_cost,
        );
        println!(
            "Vias: {} | Preferred: {} | Non-pref: {}",
            summary.vias, summary.preferred, summary.non_preferred
        );
        println!("Total cost: {}", summary.total_cost);
        println!("{}", rule);
    }
}

fn prepare_output_dir(file: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(file).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
