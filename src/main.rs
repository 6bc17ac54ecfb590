use rodsim::{NVec2, Scenario, ScenarioConfig};
use rodsim::run_2d;
use rodsim::{bench_step, bench_step_curve};

use clap::Parser;
use anyhow::{Context, Result};

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Rod-and-pendulum dynamics viewer")]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "reference.yaml")]
    file_name: String,

    /// Run this many steps without a window and print the final state
    #[arg(long)]
    headless: Option<usize>,

    /// Run the step benchmarks and exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario(file_name: &str) -> Result<Scenario> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let scenario_cfg = ScenarioConfig::from_path(&config_path)?;

    let scenario = Scenario::build_scenario(scenario_cfg, NVec2::zeros())
        .with_context(|| format!("invalid scenario {}", config_path.display()))?;

    Ok(scenario)
}

fn run_headless(mut scenario: Scenario, steps: usize) -> Result<()> {
    for _ in 0..steps {
        scenario.advance();
    }

    for (i, rod) in scenario.rods.iter().enumerate() {
        rod.check_finite().with_context(|| format!("rod {i} diverged"))?;
        println!(
            "rod {i}: angle = {:.9}, omega = {:.9}, alpha = {:.9}, tracer = {:.6}",
            rod.state.angle, rod.state.angular_velocity, rod.state.angular_acceleration, rod.tracer_angle
        );
        for ((end, bob), pos) in rod.bobs().zip(rod.bob_positions()) {
            println!(
                "  bob {:>8} ({end:?}): angle = {:.9}, omega = {:.9}, pos = ({:.3}, {:.3})",
                bob.tag, bob.state.angle, bob.state.angular_velocity, pos.x, pos.y
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        bench_step();
        bench_step_curve();
        return Ok(());
    }

    let scenario = load_scenario(&args.file_name)?;

    match args.headless {
        Some(steps) => run_headless(scenario, steps)?,
        None => run_2d(scenario),
    }

    Ok(())
}
