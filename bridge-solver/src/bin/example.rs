//! Bridge Solver Example - Warren Truss Footbridge

use anyhow::Result;
use bridge_solver::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== Bridge Solver Example: Warren Truss ===\n");

    // Build a small Warren truss (coordinates in input units):
    //
    //      N4      N5      N6
    //     /  \    /  \    /  \
    //   N0 -- N1 -- N2 -- N3
    //   ^                  ^
    //  Fixed            Fixed
    //
    let mut model = BridgeModel::new();

    let panel = 300.0;
    let rise = 250.0;

    // Bottom chord
    let n0 = model.add_node(0.0, 0.0);
    let n1 = model.add_node(panel, 0.0);
    let n2 = model.add_node(2.0 * panel, 0.0);
    let n3 = model.add_node(3.0 * panel, 0.0);

    // Top chord
    let n4 = model.add_node(0.5 * panel, rise);
    let n5 = model.add_node(1.5 * panel, rise);
    let n6 = model.add_node(2.5 * panel, rise);

    // Bottom chord members
    model.add_beam(n0, n1);
    model.add_beam(n1, n2);
    model.add_beam(n2, n3);

    // Top chord members
    model.add_beam(n4, n5);
    model.add_beam(n5, n6);

    // Diagonals
    model.add_beam(n0, n4);
    model.add_beam(n4, n1);
    model.add_beam(n1, n5);
    model.add_beam(n5, n2);
    model.add_beam(n2, n6);
    model.add_beam(n6, n3);

    // Abutments
    model.add_support(n0);
    model.add_support(n3);

    // Deck loads at the interior bottom-chord nodes (N, downward)
    model.add_load(n1, 0.0, -15000.0);
    model.add_load(n2, 0.0, -15000.0);

    // Fixed seed so repeated runs print the same numbers
    let config = AnalysisConfig::seeded(2024);

    println!("Running analysis...\n");
    let assessment = analyze(&model, &config)?;

    println!("Status:        {:?}", assessment.status);
    println!("Max stress:    {:.2} MPa", assessment.max_stress / 1e6);
    println!("Safety factor: {:.2}", assessment.safety_factor);

    if let Some(detail) = &assessment.detailed_analysis {
        println!("\nStability:");
        println!("  {}", detail.stability.status);
        println!(
            "  determinacy {}, components {}",
            detail.stability.static_determinacy, detail.stability.connected_components
        );

        println!("\nSafety:");
        println!(
            "  strength {:.2}, stability {:.2}, combined {:.2}",
            detail.safety.strength_safety_factor,
            detail.safety.stability_safety_factor,
            detail.safety.combined_safety_factor
        );

        match &detail.failure_analysis.most_likely_failure {
            Some(failure) => println!(
                "\nMost likely failure: {:?} on beam {} (p = {:.2})",
                failure.mode, failure.beam_index, failure.probability
            ),
            None => println!("\nNo failure modes triggered"),
        }
    }

    println!("\nFull report:");
    println!("{}", serde_json::to_string_pretty(&assessment)?);

    Ok(())
}
