//! # Home Planner report
//!
//! Loads a saved floorplan layout and prints the product overview and, for
//! every camera, how much of the plan it covers and which doors and windows
//! it can see.
//!
//! ```text
//! home_planner <layout.json> [settings.json]
//! ```

use std::env;
use std::process;

use log::{error, info};

use home_planner::config::PlannerSettings;
use home_planner::document::Floorplan;
use home_planner::error::Result;
use home_planner::plan::{CameraTier, ObserverKind};

fn run(layout_path: &str, settings_path: Option<&str>) -> Result<()> {
    let settings = match settings_path {
        Some(path) => PlannerSettings::load(path)?,
        None => PlannerSettings::default(),
    };
    let plan = Floorplan::load(layout_path)?;

    if let Some(template) = &plan.template {
        println!("Template: {} ({})", template.name, template.image);
    }
    println!(
        "{} walls, {} doors, {} windows",
        plan.walls.len(),
        plan.doors.len(),
        plan.windows.len()
    );

    let counts = plan.product_counts();
    println!("Products:");
    let kinds = CameraTier::all()
        .iter()
        .map(|tier| ObserverKind::Camera(*tier))
        .chain(std::iter::once(ObserverKind::Sensor));
    for kind in kinds {
        println!("  {:<12} x{}", kind.name(), counts.get(kind));
    }
    println!("  {:<12} x{}", "Total", counts.total());

    for coverage in plan.camera_coverage(&settings) {
        let seen = plan.fixtures_in_view(coverage.observer)?;
        println!(
            "{} #{} at ({:.1}, {:.1}): area {:.1}, {}/{} fan rays visible, {} fixtures in view",
            coverage.kind.name(),
            coverage.observer,
            coverage.position.x,
            coverage.position.y,
            coverage.area,
            coverage.visible_fan_rays(),
            coverage.fan.len(),
            seen.len()
        );
        for (kind, index) in seen {
            println!("    {} {}", kind.name(), index);
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    info!("Home Planner starting...");

    let args: Vec<String> = env::args().collect();
    let Some(layout_path) = args.get(1) else {
        eprintln!("usage: home_planner <layout.json> [settings.json]");
        process::exit(2);
    };

    if let Err(err) = run(layout_path, args.get(2).map(String::as_str)) {
        error!("{}", err);
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
