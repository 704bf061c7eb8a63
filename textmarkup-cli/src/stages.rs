use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use textmarkup_core::ParseStages;

/// Write every captured stage of one parse to `output_dir`.
///
/// `html` is the renderer's output for the same parse; `input_name` is
/// recorded in the summary so dumps can be told apart.
pub fn save_stages(
    stages: &ParseStages,
    html: &str,
    input_name: &str,
    output_dir: &Path,
) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create stage directory {}", output_dir.display()))?;

    // Stage 1: raw blocks from the splitter
    write_json(output_dir, "blocks.json", &stages.blocks)?;
    log::info!("  💾 blocks.json ({} blocks)", stages.blocks.len());

    // Stage 2: blocks after inline filters
    write_json(output_dir, "filtered_blocks.json", &stages.filtered_blocks)?;
    log::info!("  💾 filtered_blocks.json");

    // Stage 3: classification per block
    write_json(output_dir, "classifications.json", &stages.classifications)?;
    log::info!("  💾 classifications.json");

    // Stage 4: handler events and rendered output
    write_json(output_dir, "events.json", &stages.events)?;
    log::info!("  💾 events.json ({} events)", stages.events.len());

    fs::write(output_dir.join("output.html"), html)?;
    log::info!("  💾 output.html ({} bytes)", html.len());

    // Summary file: quick reference for validation scripts
    let summary = serde_json::json!({
        "input": input_name,
        "captured_at": chrono::Utc::now().to_rfc3339(),
        "stage_counts": {
            "blocks": stages.block_count(),
            "events": stages.events.len(),
            "html_bytes": html.len(),
        }
    });
    write_json(output_dir, "summary.json", &summary)?;
    log::info!("  💾 summary.json");

    Ok(())
}

fn write_json<T>(output_dir: &Path, name: &str, value: &T) -> Result<()>
where
    T: serde::Serialize + ?Sized,
{
    let path = output_dir.join(name);
    let json = serde_json::to_string_pretty(value)?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))
}
