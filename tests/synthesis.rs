//! Validates partitioning, model aggregation, the propagating synthesis
//! pass, and the image I/O collaborators

use patchloom::algorithm::checklist::VisitChecklist;
use patchloom::algorithm::model::ModelAggregator;
use patchloom::io::configuration::FALLBACK_COLOR;
use patchloom::io::image::{fill_random, load_pixel_buffer, palette_color, save_pixel_buffer};
use patchloom::spatial::buffer::{Color, OUT_OF_BOUNDS_COLOR, PixelBuffer};
use patchloom::spatial::partition::{PartitionGrid, Rect};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn palette_buffer(width: usize, height: usize) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            buffer.set([x as i32, y as i32], palette_color(y * width + x));
        }
    }
    buffer
}

fn buffers_equal(left: &PixelBuffer, right: &PixelBuffer) -> bool {
    if left.width() != right.width() || left.height() != right.height() {
        return false;
    }
    for y in 0..left.height() as i32 {
        for x in 0..left.width() as i32 {
            if left.get([x, y]) != right.get([x, y]) {
                return false;
            }
        }
    }
    true
}

#[test]
fn test_buffer_out_of_bounds_reads_and_writes() {
    let mut buffer = PixelBuffer::new(2, 2);
    let color = Color::new(9, 9, 9, 255);
    buffer.fill(color);

    assert_eq!(buffer.get([-1, 0]), OUT_OF_BOUNDS_COLOR);
    assert_eq!(buffer.get([0, -1]), OUT_OF_BOUNDS_COLOR);
    assert_eq!(buffer.get([2, 0]), OUT_OF_BOUNDS_COLOR);
    assert_eq!(buffer.get([0, 2]), OUT_OF_BOUNDS_COLOR);

    // Out-of-bounds writes are dropped without disturbing the grid
    buffer.set([-1, -1], Color::new(1, 1, 1, 1));
    buffer.set([5, 5], Color::new(1, 1, 1, 1));
    for y in 0..2 {
        for x in 0..2 {
            assert_eq!(buffer.get([x, y]), color);
        }
    }
}

#[test]
fn test_copy_region_translates_to_local_origin() {
    let buffer = palette_buffer(4, 4);
    let region = Rect::from_corners([2, 2], [4, 4]);
    let copy = buffer.copy_region(region);

    assert_eq!(copy.width(), 2);
    assert_eq!(copy.height(), 2);
    for y in 0..2 {
        for x in 0..2 {
            assert_eq!(copy.get([x, y]), buffer.get([x + 2, y + 2]));
        }
    }
}

#[test]
fn test_composite_into_overwrites_at_offset() {
    let mut target = PixelBuffer::new(4, 4);
    target.fill(Color::new(1, 1, 1, 255));

    let mut patch = PixelBuffer::new(2, 2);
    patch.fill(Color::new(200, 200, 200, 255));

    patch.composite_into(&mut target, [2, 2]);

    assert_eq!(target.get([1, 1]), Color::new(1, 1, 1, 255));
    assert_eq!(target.get([2, 2]), Color::new(200, 200, 200, 255));
    assert_eq!(target.get([3, 3]), Color::new(200, 200, 200, 255));
}

#[test]
fn test_partition_grid_covers_source_exactly() {
    let Ok(grid) = PartitionGrid::new(4, 4, 2, 2) else {
        unreachable!("a 4x4 source must subdivide into 2x2 partitions");
    };

    assert_eq!(grid.len(), 4);
    assert_eq!(grid.region_width(), 2);
    assert_eq!(grid.region_height(), 2);

    // Every source cell is covered by exactly one region
    let mut coverage = [[0u8; 4]; 4];
    for region in grid.regions() {
        for y in region.min[1]..region.max[1] {
            for x in region.min[0]..region.max[0] {
                if let Some(cell) = coverage
                    .get_mut(y as usize)
                    .and_then(|row| row.get_mut(x as usize))
                {
                    *cell += 1;
                }
            }
        }
    }
    for row in &coverage {
        for &count in row {
            assert_eq!(count, 1, "partitions must neither gap nor overlap");
        }
    }
}

#[test]
fn test_partition_grid_rejects_invalid_subdivisions() {
    assert!(PartitionGrid::new(0, 4, 2, 2).is_err());
    assert!(PartitionGrid::new(4, 0, 2, 2).is_err());
    assert!(PartitionGrid::new(4, 4, 0, 2).is_err());
    assert!(PartitionGrid::new(4, 4, 2, 0).is_err());
    // Uneven subdivisions are reported, never silently truncated
    assert!(PartitionGrid::new(5, 4, 2, 2).is_err());
    assert!(PartitionGrid::new(4, 6, 2, 4).is_err());
}

#[test]
fn test_checklist_marks_and_bounds() {
    let mut checklist = VisitChecklist::new(3, 2);

    assert_eq!(checklist.len(), 6);
    assert!(!checklist.is_visited([1, 1]));

    checklist.mark([1, 1]);
    assert!(checklist.is_visited([1, 1]));
    assert_eq!(checklist.visited_count(), 1);

    // Out-of-range positions read as unvisited and marks are dropped
    assert!(!checklist.is_visited([-1, 0]));
    checklist.mark([-1, 0]);
    checklist.mark([3, 0]);
    assert_eq!(checklist.visited_count(), 1);

    checklist.mark_all();
    assert!(checklist.is_complete());
}

#[test]
fn test_model_build_partitions_and_dimensions() {
    let mut aggregator = ModelAggregator::new(11);
    let Ok(model) = aggregator.build("quad", palette_buffer(4, 4), 2, 2) else {
        unreachable!("building a 2x2 model over a 4x4 source must succeed");
    };

    assert_eq!(model.partition_count(), 4);
    assert_eq!(model.subdivisions, [2, 2]);
    assert_eq!(model.output.width(), model.source.width());
    assert_eq!(model.output.height(), model.source.height());
    for partition in &model.partitions {
        assert_eq!(partition.pixels.width(), 2);
        assert_eq!(partition.pixels.height(), 2);
        assert_eq!(partition.output.width(), 2);
        assert_eq!(partition.output.height(), 2);
    }
}

#[test]
fn test_model_ids_increase_per_aggregator() {
    let mut aggregator = ModelAggregator::new(3);
    let Ok(first) = aggregator.build("first", palette_buffer(2, 2), 1, 1) else {
        unreachable!("model build must succeed");
    };
    let Ok(second) = aggregator.build("second", palette_buffer(2, 2), 1, 1) else {
        unreachable!("model build must succeed");
    };
    assert!(second.id > first.id);
}

#[test]
fn test_model_weights_are_sum_of_partition_weights() {
    let mut aggregator = ModelAggregator::new(21);
    let Ok(model) = aggregator.build("additive", palette_buffer(4, 4), 2, 2) else {
        unreachable!("model build must succeed");
    };

    for (color, _) in model.weights.entries() {
        let partition_sum: f64 = model
            .partitions
            .iter()
            .map(|partition| partition.weights.total_weight(*color))
            .sum();
        assert!(
            (model.weights.total_weight(*color) - partition_sum).abs() < 1e-9,
            "model-wide weight for {color:?} must equal the partition sum"
        );
    }
}

#[test]
fn test_uniform_source_synthesizes_uniformly() {
    let color = palette_color(1);
    let mut source = PixelBuffer::new(4, 4);
    source.fill(color);

    let mut aggregator = ModelAggregator::new(77);
    let Ok(mut model) = aggregator.build("uniform", source, 2, 2) else {
        unreachable!("model build must succeed");
    };
    if let Err(error) = aggregator.synthesize(&mut model) {
        unreachable!("synthesis of a uniform source must succeed: {error}");
    }

    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(
                model.output.get([x, y]),
                color,
                "a single-color table admits only one outcome"
            );
        }
    }
}

#[test]
fn test_synthesis_resolves_every_position() {
    let mut aggregator = ModelAggregator::new(5);
    let Ok(mut model) = aggregator.build("full", palette_buffer(6, 6), 3, 3) else {
        unreachable!("model build must succeed");
    };
    if let Err(error) = aggregator.synthesize(&mut model) {
        unreachable!("synthesis must succeed: {error}");
    }

    let report = model.synthesis_report();
    assert_eq!(report.resolved(), 36);
    for partition in &model.partitions {
        assert!(partition.checklist.is_complete());
    }

    let variance = model.variance_percentage();
    assert!((0.0..=100.0).contains(&variance));
}

#[test]
fn test_synthesis_is_deterministic_for_fixed_seed() {
    let source = palette_buffer(6, 6);

    let run = |seed: u64| -> PixelBuffer {
        let mut aggregator = ModelAggregator::new(seed);
        let Ok(mut model) = aggregator.build("repeat", source.clone(), 2, 2) else {
            unreachable!("model build must succeed");
        };
        if let Err(error) = aggregator.synthesize(&mut model) {
            unreachable!("synthesis must succeed: {error}");
        }
        model.output
    };

    let first = run(3141);
    let second = run(3141);
    assert!(
        buffers_equal(&first, &second),
        "identical seeds and sources must reproduce the output exactly"
    );
}

#[test]
fn test_degenerate_partition_falls_back_without_failing_the_run() {
    // A 1x1 partition has no valid neighbors, so its weight table is empty
    let mut aggregator = ModelAggregator::new(8);
    let Ok(mut model) = aggregator.build("degenerate", palette_buffer(1, 1), 1, 1) else {
        unreachable!("model build must succeed");
    };

    if let Err(error) = aggregator.synthesize(&mut model) {
        unreachable!("degenerate partitions must resolve via fallback: {error}");
    }

    assert_eq!(model.output.get([0, 0]), FALLBACK_COLOR);
    let Some(partition) = model.partitions.first() else {
        unreachable!("the model must hold one partition");
    };
    assert!(partition.report.is_none());
    assert!(partition.checklist.is_complete());
}

#[test]
fn test_fill_random_floods_each_region_with_one_color() {
    let mut rng = StdRng::seed_from_u64(17);
    let Ok(buffer) = fill_random(8, 8, 2, 2, &mut rng) else {
        unreachable!("an 8x8 sample with 2x2 regions must generate");
    };
    let Ok(grid) = PartitionGrid::new(8, 8, 2, 2) else {
        unreachable!("an 8x8 source must subdivide into 2x2 partitions");
    };

    for region in grid.regions() {
        let expected = buffer.get(region.min);
        for y in region.min[1]..region.max[1] {
            for x in region.min[0]..region.max[0] {
                assert_eq!(
                    buffer.get([x, y]),
                    expected,
                    "every region cell must share the region color"
                );
            }
        }
    }
}

#[test]
fn test_save_load_and_overwrite() {
    let Ok(dir) = tempfile::tempdir() else {
        unreachable!("temporary directory creation must succeed");
    };
    let path = dir.path().join("texture.png");

    let buffer = palette_buffer(4, 4);
    if let Err(error) = save_pixel_buffer(&buffer, &path) {
        unreachable!("saving a buffer must succeed: {error}");
    }

    // A second save overwrites the existing file instead of erroring
    let mut replacement = PixelBuffer::new(2, 2);
    replacement.fill(palette_color(3));
    if let Err(error) = save_pixel_buffer(&replacement, &path) {
        unreachable!("overwriting an existing file must succeed: {error}");
    }

    let Ok(loaded) = load_pixel_buffer(&path) else {
        unreachable!("loading the saved file must succeed");
    };
    assert!(buffers_equal(&loaded, &replacement));
}

#[test]
fn test_load_missing_file_is_an_image_load_error() {
    let Ok(dir) = tempfile::tempdir() else {
        unreachable!("temporary directory creation must succeed");
    };
    let path = dir.path().join("missing.png");

    match load_pixel_buffer(&path) {
        Err(patchloom::SynthesisError::ImageLoad { .. }) => {}
        other => unreachable!("expected an image load error, got {other:?}"),
    }
}
