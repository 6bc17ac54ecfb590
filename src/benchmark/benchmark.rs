use std::time::Instant;

use crate::simulation::params::Parameters;
use crate::simulation::scenario::{BobSpec, RodSystemBuilder};
use crate::simulation::states::{NVec2, RodEnd, RodSystem};

/// Build `n` rods with `bobs_per_rod` bobs each, spread over both ends
fn make_rods(n: usize, bobs_per_rod: usize) -> Vec<RodSystem> {
    let params = Parameters::default();
    (0..n)
        .filter_map(|i| {
            let i_f = i as f64;
            // deterministic geometry, no rand needed
            let mut builder = RodSystemBuilder::new(NVec2::new(i_f, 0.0), 400.0)
                .angle((i_f * 0.37).sin());
            for j in 0..bobs_per_rod {
                let j_f = j as f64;
                let end = if j % 2 == 0 { RodEnd::First } else { RodEnd::Second };
                let spec = BobSpec::new(100.0 + 10.0 * j_f, 10.0 + j_f, (i_f * 0.13 + j_f).cos(), "");
                builder = builder.bob(spec, end);
            }
            builder.build(params).ok()
        })
        .collect()
}

/// Time `RodSystem::step` over growing rod counts
pub fn bench_step() {
    let ns = [100, 1_000, 10_000, 100_000];
    let steps = 100;

    for n in ns {
        let mut rods = make_rods(n, 2);

        // Warm up
        for rod in rods.iter_mut() {
            rod.step(1.0);
        }

        let t0 = Instant::now();
        for _ in 0..steps {
            for rod in rods.iter_mut() {
                rod.step(1.0);
            }
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        println!("rods = {n:7}, step = {:10.6} s, per rod = {:8.3} ns", per_step, per_step * 1e9 / n as f64);
    }
}

/// Per-rod step cost as the bob count grows
/// Paste output directly into a spreadsheet to graph
pub fn bench_step_curve() {
    println!("bobs,ns_per_rod_step");

    let rods_n = 1_000;
    let steps = 50;

    for bobs in (0..=64).step_by(4) {
        let mut rods = make_rods(rods_n, bobs);

        let t0 = Instant::now();
        for _ in 0..steps {
            for rod in rods.iter_mut() {
                rod.step(1.0);
            }
        }
        let ns = t0.elapsed().as_secs_f64() * 1e9 / (steps * rods_n) as f64;

        println!("{},{:.3}", bobs, ns);
    }
}
