use grid_objects::config::{load_config, load_grid, RuntimeConfig};
use grid_objects::diagnostics::AssemblyReport;
use grid_objects::image::io::{
    load_label_image, save_image, save_label_image, save_mask, write_json_file,
};
use grid_objects::image::render::render_overlay;
use grid_objects::{Entity, IdentifyObjectsInGrid, MemoryStore, ObjectStore};
use image::DynamicImage;
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage() -> String {
    "Usage: identify_grid <config.json>".to_string()
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;
    let mut store = build_store(&config)?;

    let module = IdentifyObjectsInGrid::new(config.settings.clone());
    let mut debug_result = Ok(());
    let report = module
        .run_with_observer(&mut store, |frame| {
            if let Some(dir) = &config.output.debug_dir {
                let overlay = render_overlay(frame.labels, frame.overlay, frame.gridlines);
                debug_result = save_image(
                    &DynamicImage::ImageRgb8(overlay),
                    &dir.join("overlay.png"),
                );
            }
        })
        .map_err(|e| e.to_string())?;
    debug_result?;

    save_artifacts(&store, &report, &config.output.dir)?;
    print_text_summary(&report);

    if let Some(path) = &config.output.json_out {
        write_json_file(path, &report)?;
        println!("\nJSON report written to {}", path.display());
    }
    if let Some(dir) = &config.output.debug_dir {
        println!("Debug overlay written to {}", dir.display());
    }
    Ok(())
}

fn build_store(config: &RuntimeConfig) -> Result<MemoryStore, String> {
    let settings = &config.settings;
    let grid = load_grid(&config.grid_path)?;
    let mut store = MemoryStore::new().with(&settings.grid_name, Entity::Grid(grid));
    if let Some(path) = &config.guide_path {
        let name = settings
            .guide_objects_name
            .as_deref()
            .ok_or("guide_path is set but settings.guideObjectsName is missing")?;
        store.put(name, Entity::Labels(load_label_image(path)?));
    }
    Ok(store)
}

fn artifact_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.png"))
}

fn save_artifacts(
    store: &MemoryStore,
    report: &AssemblyReport,
    dir: &Path,
) -> Result<(), String> {
    for name in &report.artifacts {
        let path = artifact_path(dir, name);
        match store.get(name).map_err(|e| e.to_string())? {
            Entity::Labels(labels) => save_label_image(labels, &path)?,
            Entity::Outline(mask) => save_mask(mask, &path)?,
            Entity::Rendered(img) => save_image(img, &path)?,
            Entity::Grid(_) => continue,
        }
        println!("Saved {} -> {}", name, path.display());
    }
    Ok(())
}

fn print_text_summary(report: &AssemblyReport) {
    let stats = &report.stats;
    println!("\nAssembly summary");
    println!("  objects: {}", report.objects_name);
    println!(
        "  grid: {}x{} cells on {}x{} canvas",
        report.grid.rows, report.grid.cols, report.grid.canvas_width, report.grid.canvas_height
    );
    println!("  shape: {} (diameter {})", report.shape, report.diameter);
    if let Some(r) = report.radius {
        println!("  radius: {r}px");
    }
    println!(
        "  cells: {} (outside canvas {}) labelled_px={} outline_px={}",
        stats.cells, stats.empty_cells, stats.labelled_pixels, report.outline_pixels
    );
    if stats.components_kept + stats.components_rejected > 0 || stats.fallback_cells > 0 {
        println!(
            "  natural: kept={} rejected={} fallback_cells={}",
            stats.components_kept, stats.components_rejected, stats.fallback_cells
        );
    }
    let stages: Vec<String> = report
        .timing
        .stages
        .iter()
        .map(|s| format!("{}={:.3}", s.label, s.elapsed_ms))
        .collect();
    println!(
        "  timings (ms): {} total={:.3}",
        stages.join(" "),
        report.timing.total_ms
    );
}
