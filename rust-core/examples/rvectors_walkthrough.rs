/// Walkthrough of the two R-vector constructors
///
/// Builds the Wigner-Seitz R-vectors of a silicon-like fcc lattice, then
/// refines them for two localized functions sitting on the two atoms.
use nalgebra::Vector3;
use wannier_rvectors::lattice::face_centered_cubic_lattice;
use wannier_rvectors::{build_mdrs_rvectors, build_ws_rvectors, SearchParams};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let lattice = face_centered_cubic_lattice(5.43)?;
    let grid = [4, 4, 4];
    let params = SearchParams::default();

    println!("1. Wigner-Seitz R-vectors:");
    let rvectors = build_ws_rvectors(lattice.base_matrix(), grid, &params)?;
    println!("   Number of R-vectors: {}", rvectors.n_rvecs());
    println!("   Maximum degeneracy: {}", rvectors.max_degeneracy());
    println!("   Weight sum: {:.6}\n", rvectors.weight_sum());

    println!("2. MDRS refinement:");
    let centers = [Vector3::zeros(), Vector3::new(0.25, 0.25, 0.25)];
    let (rvectors, refined) = build_mdrs_rvectors(lattice.base_matrix(), grid, &centers, &params)?;
    println!("   Functions: {}", refined.n_wann());
    println!("   Maximum cell degeneracy: {}", refined.max_degeneracy());

    let expanded = refined.expand()?;
    println!(
        "   Expanded R-vectors: {} (from {})",
        expanded.n_rvecs(),
        rvectors.n_rvecs()
    );

    Ok(())
}
