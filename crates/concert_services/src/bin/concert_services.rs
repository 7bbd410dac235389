//! Concert Services CLI
//!
//! Usage:
//!   concert_services validate services/
//!   concert_services validate services/waypoint_navigation/waypoint_navigation.link_graph
//!   concert_services show services/teleop/teleop.interactions -f json
//!   concert_services herd --turtles leonardo,raphael --existing leonardo

use concert_services::cli::{CliArgs, Command, HerdArgs, OutputFormat, ShowArgs, ValidateArgs};
use concert_services::{herd, Descriptor, HerdConfig, ServicePackage};
use std::path::Path;

fn main() {
    let args: CliArgs = argh::from_env();

    let env = env_logger::Env::default()
        .default_filter_or(concert_services::cli::log_filter(&args.log_level));
    env_logger::init_from_env(env);

    let result = match args.command {
        Command::Validate(validate) => run_validate(validate),
        Command::Show(show) => run_show(show),
        Command::Herd(herd) => run_herd(herd),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run_validate(args: ValidateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(&args.path);
    if path.is_dir() {
        let package = ServicePackage::scan(path)?;
        println!("Services directory '{}' is valid", package.root().display());
        for (file, graph) in package.graphs() {
            println!("  {}: {}", file.display(), Descriptor::ServiceGraph(graph.clone()).summary());
        }
        for (file, roles) in package.teleop_roles() {
            println!("  {}: {}", file.display(), Descriptor::TeleopRoles(roles.clone()).summary());
        }
        if package.is_empty() {
            log::warn!("No descriptor files found under {}", args.path);
        }
    } else {
        log::info!("Loading descriptor: {}", args.path);
        let descriptor = Descriptor::from_file(path)?;
        println!("Descriptor '{}' is valid", args.path);
        println!("  {}", descriptor.summary());
    }
    Ok(())
}

fn run_show(args: ShowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let descriptor = Descriptor::from_file(&args.path)?;
    let text = match args.format {
        OutputFormat::Yaml => descriptor.to_yaml()?,
        OutputFormat::Json => descriptor.to_json()?,
    };
    println!("{}", text.trim_end());
    Ok(())
}

fn run_herd(args: HerdArgs) -> Result<(), Box<dyn std::error::Error>> {
    let requested = args.turtles.unwrap_or_default();
    if requested.is_empty() {
        return Err("no turtles requested (use --turtles a,b)".into());
    }
    let existing = args.existing.unwrap_or_default();

    let config = HerdConfig {
        base_port: args.base_port,
        ..Default::default()
    };

    let names = herd::establish_unique_names(existing.as_slice(), requested.as_slice());
    log::info!("Herding turtles: {}", names.join(", "));

    let launches = herd::launch_configurations(names.as_slice(), &config)?;
    println!("# turtles\n{}\n", names.join("\n"));
    println!("# launcher\n{}", herd::render_concert_launch(&launches));
    println!("# flip rules");
    for rule in herd::flip_rules(names.as_slice(), false) {
        println!("{}", serde_json::to_string(&rule)?);
    }
    Ok(())
}
