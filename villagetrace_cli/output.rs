use std::fmt::Write;

use villagetrace_app::cqrs::queries::Reconstruction;
use villagetrace_game::models::village::VillageState;

/// Renders a reconstruction for the terminal.
///
/// Compositions are listed one per line as `building: level` pairs, as long as there
/// are at most `limit` of them. Past that only their number is reported.
pub fn render(reconstruction: &Reconstruction, limit: usize) -> String {
    let mut out = String::new();
    let count = reconstruction.compositions.len();

    let _ = writeln!(
        out,
        "Village {} on {}: {} score increases",
        reconstruction.village_id,
        reconstruction.world,
        reconstruction.increases.len()
    );

    match count {
        0 => out.push_str("No building composition matches the points history.\n"),
        n if n > limit => {
            let _ = writeln!(out, "{n} possible compositions (more than {limit}, not listed)");
        }
        n => {
            let _ = writeln!(out, "{n} possible compositions:");
            for composition in &reconstruction.compositions {
                let _ = writeln!(out, "{}", render_composition(composition));
            }
        }
    }
    out
}

fn render_composition(state: &VillageState) -> String {
    let levels: Vec<String> = state
        .levels()
        .map(|(building, level)| format!("{building}: {level}"))
        .collect();
    format!("[{}] {} points", levels.join(", "), state.score())
}
