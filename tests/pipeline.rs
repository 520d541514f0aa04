mod common;

use common::synthetic::{centred_blobs, paint_square, tiled_grid};
use grid_objects::config::{ArtifactName, LabelMatrixSettings};
use grid_objects::image::render::RenderMode;
use grid_objects::image::{ImageView, LabelImage};
use grid_objects::prelude::*;
use grid_objects::shape::DiskElement;

fn store_with_grid(grid: GridGeometry) -> MemoryStore {
    MemoryStore::new().with("Grid", Entity::Grid(grid))
}

#[test]
fn rectangle_run_publishes_objects_and_optional_artifacts() {
    let _ = env_logger::builder().is_test(true).try_init();
    let grid = tiled_grid(2, 3, 16);
    let mut store = store_with_grid(grid.clone());

    let mut settings = IdentifySettings::new("Grid", "Spots", ShapeKind::Rectangle);
    settings.outline_name = ArtifactName::named("SpotOutlines");
    settings.label_matrix = Some(LabelMatrixSettings {
        name: ArtifactName::named("SpotColors"),
        mode: RenderMode::Rgb,
    });
    let report = IdentifyObjectsInGrid::new(settings)
        .run(&mut store)
        .expect("rectangle run");

    let spots = store.labels("Spots").expect("objects stored");
    assert_eq!((spots.w, spots.h), (48, 32));
    assert_eq!(spots.max_label(), 6);
    assert!(store.outline("SpotOutlines").is_ok());
    assert!(store.rendered("SpotColors").is_ok());
    assert_eq!(report.artifacts, vec!["Spots", "SpotColors", "SpotOutlines"]);
    assert_eq!(report.stats.cells, 6);
    assert!(report.radius.is_none());
    assert!(report.outline_pixels > 0);
    assert!(report.timing.stage_ms("assemble").is_some());
}

#[test]
fn do_not_save_skips_optional_artifacts() {
    let mut store = store_with_grid(tiled_grid(2, 2, 10));
    let mut settings = IdentifySettings::new("Grid", "Spots", ShapeKind::Rectangle);
    settings.outline_name = ArtifactName::from("Do not save".to_string());
    IdentifyObjectsInGrid::new(settings)
        .run(&mut store)
        .expect("rectangle run");
    assert_eq!(store.len(), 2, "only the grid and the objects are stored");
}

#[test]
fn automatic_diameter_uses_median_guide_area() {
    let grid = tiled_grid(1, 3, 40);
    let mut guide = LabelImage::new(120, 40);
    // areas 50, 200 and 98 -> median 98 -> radius 5
    paint_square(&mut guide, 5, 5, 5, 1);
    paint_square(&mut guide, 5, 10, 5, 1);
    paint_square(&mut guide, 45, 10, 10, 2);
    paint_square(&mut guide, 45, 20, 10, 2);
    paint_square(&mut guide, 85, 10, 7, 3);
    paint_square(&mut guide, 85, 17, 7, 3);
    let mut store = store_with_grid(grid).with("Nuclei", Entity::Labels(guide));

    let mut settings = IdentifySettings::new("Grid", "Spots", ShapeKind::Circle);
    settings.guide_objects_name = Some("Nuclei".to_string());
    let report = IdentifyObjectsInGrid::new(settings)
        .run(&mut store)
        .expect("circle run");
    assert_eq!(report.radius, Some(5));

    let spots = store.labels("Spots").unwrap();
    let disk = DiskElement::new(5).pixel_count();
    for id in 1..=3 {
        assert_eq!(spots.count_where(|v| v == id), disk);
    }
}

#[test]
fn fixed_diameter_needs_no_guide() {
    let mut store = store_with_grid(tiled_grid(2, 2, 30));
    let mut settings = IdentifySettings::new("Grid", "Spots", ShapeKind::Circle);
    settings.diameter = DiameterMode::Fixed(13);
    let report = IdentifyObjectsInGrid::new(settings)
        .run(&mut store)
        .expect("circle run");
    assert_eq!(report.radius, Some(6));
}

#[test]
fn oversized_fixed_diameter_fills_cells_without_scaling_with_radius() {
    let mut store = store_with_grid(tiled_grid(2, 2, 10));
    let mut settings = IdentifySettings::new("Grid", "Spots", ShapeKind::Circle);
    settings.diameter = DiameterMode::Fixed(4_000_000_000);
    let report = IdentifyObjectsInGrid::new(settings)
        .run(&mut store)
        .expect("circle run");
    assert_eq!(report.radius, Some(2_000_000_000));
    assert_eq!(report.stats.labelled_pixels, 400);
    let spots = store.labels("Spots").unwrap();
    for id in 1..=4 {
        assert_eq!(spots.count_where(|v| v == id), 100);
    }
}

#[test]
fn natural_run_relabels_guide_objects_per_cell() {
    let grid = tiled_grid(3, 4, 20);
    let guide = centred_blobs(&grid, 6);
    let mut store = store_with_grid(grid.clone()).with("Nuclei", Entity::Labels(guide));

    let mut settings = IdentifySettings::new("Grid", "Spots", ShapeKind::Natural);
    settings.guide_objects_name = Some("Nuclei".to_string());
    let report = IdentifyObjectsInGrid::new(settings)
        .run(&mut store)
        .expect("natural run");
    assert_eq!(report.stats.components_kept, 12);
    assert_eq!(report.stats.fallback_cells, 0);

    let spots = store.labels("Spots").unwrap();
    for cell in grid.cells() {
        assert_eq!(spots.count_where(|v| v == cell.id), 36);
        let e = cell.extent;
        assert_eq!(spots.get(e.x0 + 10, e.y0 + 10), cell.id);
    }
}

#[test]
fn observer_sees_the_finished_frame() {
    let grid = tiled_grid(2, 2, 10);
    let mut store = store_with_grid(grid);
    let settings = IdentifySettings::new("Grid", "Spots", ShapeKind::Rectangle);
    let mut seen = None;
    IdentifyObjectsInGrid::new(settings)
        .run_with_observer(&mut store, |frame| {
            seen = Some((
                frame.labels.count_where(|v| v > 0),
                frame.overlay.w,
                frame.gridlines.x.clone(),
            ));
        })
        .expect("rectangle run");
    assert_eq!(seen, Some((400, 20, vec![0, 10, 20])));
}

#[test]
fn missing_inputs_abort_without_writing() {
    let mut store = MemoryStore::new();
    let settings = IdentifySettings::new("Grid", "Spots", ShapeKind::Rectangle);
    let err = IdentifyObjectsInGrid::new(settings).run(&mut store).unwrap_err();
    assert_eq!(err, GridError::NotFound("Grid".to_string()));
    assert!(store.is_empty());

    let mut store = store_with_grid(tiled_grid(2, 2, 10));
    let mut settings = IdentifySettings::new("Grid", "Spots", ShapeKind::Natural);
    let module = IdentifyObjectsInGrid::new(settings.clone());
    assert!(matches!(
        module.run(&mut store),
        Err(GridError::MissingGuideObjects(_))
    ));
    settings.guide_objects_name = Some("Nuclei".to_string());
    let err = IdentifyObjectsInGrid::new(settings).run(&mut store).unwrap_err();
    assert_eq!(err, GridError::NotFound("Nuclei".to_string()));
    assert!(!store.contains("Spots"));
}

#[test]
fn automatic_radius_without_components_is_fatal() {
    let grid = tiled_grid(2, 2, 10);
    let mut store = store_with_grid(grid).with("Nuclei", Entity::Labels(LabelImage::new(20, 20)));
    let mut settings = IdentifySettings::new("Grid", "Spots", ShapeKind::Circle);
    settings.guide_objects_name = Some("Nuclei".to_string());
    let err = IdentifyObjectsInGrid::new(settings).run(&mut store).unwrap_err();
    assert_eq!(err, GridError::NoComponents);
    assert!(!store.contains("Spots"));
}

#[test]
fn unknown_shape_token_is_rejected_before_any_work() {
    let json = r#"{"gridName": "Grid", "objectsName": "Spots", "shape": "Ellipse"}"#;
    assert!(serde_json::from_str::<IdentifySettings>(json).is_err());
    assert_eq!(
        "Ellipse".parse::<ShapeKind>(),
        Err(GridError::UnknownShape("Ellipse".to_string()))
    );
}
