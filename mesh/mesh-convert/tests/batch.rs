//! End-to-end batch conversion against real files.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use mesh_convert::{
    collect_inputs, BatchConverter, BatchEvent, BatchState, ConversionJob, ConvertOptions,
    FnSink, NamingMode, OutputNamer,
};

// =============================================================================
// Fixtures
// =============================================================================

/// Tetrahedron with corners at the origin and on the three axes, scaled by `size`.
fn tetra_stl(size: f64) -> String {
    let p = [
        [0.0, 0.0, 0.0],
        [size, 0.0, 0.0],
        [0.0, size, 0.0],
        [0.0, 0.0, size],
    ];
    let faces = [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];

    let mut out = String::from("solid tetra\n");
    for f in faces {
        out.push_str("facet normal 0 0 0\n outer loop\n");
        for i in f {
            let [x, y, z] = p[i];
            out.push_str(&format!("  vertex {x} {y} {z}\n"));
        }
        out.push_str(" endloop\nendfacet\n");
    }
    out.push_str("endsolid tetra\n");
    out
}

fn write_inputs(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let path = dir.join(name);
            std::fs::write(&path, tetra_stl(1.0 + i as f64)).unwrap();
            path
        })
        .collect()
}

fn jobs_for(inputs: &[PathBuf], out_dir: &Path) -> Arc<[ConversionJob]> {
    OutputNamer::new(NamingMode::SameName, Some(out_dir.to_path_buf()))
        .resolve(inputs)
        .unwrap()
        .into()
}

fn options() -> Arc<ConvertOptions> {
    Arc::new(ConvertOptions::default())
}

fn progress(events: &[BatchEvent]) -> Vec<u8> {
    events
        .iter()
        .filter_map(|e| match e {
            BatchEvent::Progress(p) => Some(*p),
            _ => None,
        })
        .collect()
}

fn done(events: &[BatchEvent]) -> (bool, String) {
    match events.last() {
        Some(BatchEvent::Done { success, message }) => (*success, message.clone()),
        other => panic!("last event is not Done: {other:?}"),
    }
}

// =============================================================================
// Outcomes
// =============================================================================

#[test]
fn empty_batch_fails_without_progress() {
    let mut batch = BatchConverter::new(Arc::from(Vec::new()), options());
    let mut events = Vec::new();

    assert_eq!(batch.run(&mut events), BatchState::Failed);
    assert!(progress(&events).is_empty());
    assert_eq!(done(&events), (false, "No files to convert.".to_string()));
}

#[test]
fn all_jobs_convert() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let inputs = write_inputs(dir.path(), &["a.stl", "b.stl", "c.stl"]);

    let mut batch = BatchConverter::new(jobs_for(&inputs, &out), options());
    let mut events = Vec::new();

    assert_eq!(batch.run(&mut events), BatchState::Completed);
    assert_eq!(progress(&events), [0, 33, 66, 100]);
    assert_eq!(
        done(&events),
        (true, "Converted 3 file(s) successfully.".to_string())
    );
    for name in ["a.obj", "b.obj", "c.obj"] {
        assert!(out.join(name).exists(), "{name} missing");
    }

    let logs: Vec<&str> = events
        .iter()
        .filter_map(|e| match e {
            BatchEvent::Log(text) => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(logs[0], "Starting conversion of 3 file(s)...");
    assert_eq!(logs[1], "\n[1/3] Loading: a.stl");
    assert!(logs[2].starts_with("Exported: a.obj\n  Verts: 4 | Faces: 4\n"));
    assert!(logs[2].contains("Extents:   (1.00, 1.00, 1.00)"));
    assert!(logs[6].contains("Extents:   (3.00, 3.00, 3.00)"));
}

#[test]
fn cancel_after_first_job() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let inputs = write_inputs(dir.path(), &["one.stl", "two.stl", "three.stl"]);

    let mut batch = BatchConverter::new(jobs_for(&inputs, &out), options());
    let cancel = batch.cancel_handle();
    let mut events = Vec::new();

    let state = batch.run(FnSink(|event: BatchEvent| {
        if matches!(event, BatchEvent::Progress(p) if p > 0) {
            cancel.cancel();
        }
        events.push(event);
    }));

    assert_eq!(state, BatchState::Cancelled);
    assert_eq!(progress(&events), [0, 33]);
    assert_eq!(done(&events), (false, "Cancelled by user.".to_string()));
    assert!(events.contains(&BatchEvent::Log("Cancelled.".into())));

    assert!(out.join("one.obj").exists());
    assert!(!out.join("two.obj").exists());
    assert!(!out.join("three.obj").exists());
    assert!(!events
        .iter()
        .any(|e| matches!(e, BatchEvent::Log(t) if t.contains("Loading: two.stl"))));
}

#[test]
fn load_error_stops_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let mut inputs = write_inputs(dir.path(), &["good.stl"]);

    let broken = dir.path().join("broken.stl");
    std::fs::write(&broken, b"solid x\nfacet normal 0 0 1\nouter loop\nvertex 1 two 3\n").unwrap();
    inputs.push(broken);
    inputs.extend(write_inputs(dir.path(), &["later.stl"]));

    let mut batch = BatchConverter::new(jobs_for(&inputs, &out), options());
    let mut events = Vec::new();

    assert_eq!(batch.run(&mut events), BatchState::Failed);
    let (success, message) = done(&events);
    assert!(!success);
    assert!(message.starts_with("Failed: "), "{message}");
    assert_eq!(progress(&events), [0, 33]);

    assert!(out.join("good.obj").exists());
    assert!(!out.join("broken.obj").exists());
    assert!(!out.join("later.obj").exists());
}

// =============================================================================
// Worker thread
// =============================================================================

#[test]
fn spawned_batch_streams_events() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    write_inputs(dir.path(), &["x.stl", "y.STL"]);
    std::fs::write(dir.path().join("readme.txt"), b"ignored").unwrap();

    let inputs = collect_inputs([dir.path()]);
    assert_eq!(inputs.len(), 2);

    let batch = BatchConverter::new(jobs_for(&inputs, &out), options());
    let handle = batch.spawn().unwrap();
    let events: Vec<BatchEvent> = handle.events.iter().collect();

    assert_eq!(handle.wait(), BatchState::Completed);
    assert_eq!(progress(&events), [0, 50, 100]);
    assert!(done(&events).0);
    assert!(out.join("x.obj").exists());
    assert!(out.join("y.obj").exists());
}

#[test]
fn cancel_before_start_converts_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let inputs = write_inputs(dir.path(), &["only.stl"]);

    let batch = BatchConverter::new(jobs_for(&inputs, &out), options());
    batch.cancel_handle().cancel();

    let handle = batch.spawn().unwrap();
    let events: Vec<BatchEvent> = handle.events.iter().collect();

    assert_eq!(handle.wait(), BatchState::Cancelled);
    assert_eq!(progress(&events), [0]);
    assert!(!out.join("only.obj").exists());
}

#[test]
fn spawned_batch_at_extreme_coordinates_reports_done() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let input = dir.path().join("far.stl");
    std::fs::write(
        &input,
        "solid far\nfacet normal 0 0 1\n outer loop\n  vertex 1e12 0 0\n  vertex 0 1 0\n  vertex -1e12 0 0\n endloop\nendfacet\nendsolid far\n",
    )
    .unwrap();

    let batch = BatchConverter::new(jobs_for(&[input], &out), options());
    let handle = batch.spawn().unwrap();
    let events: Vec<BatchEvent> = handle.events.iter().collect();

    assert_eq!(handle.wait(), BatchState::Completed);
    assert!(done(&events).0);
    assert!(out.join("far.obj").exists());
}

#[test]
fn spawned_batch_with_failing_job_still_reports_done() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let input = dir.path().join("broken.stl");
    std::fs::write(&input, b"solid broken\nfacet normal 0 0 1\nouter loop\nvertex 1 two 3\n").unwrap();

    let batch = BatchConverter::new(jobs_for(&[input], &out), options());
    let handle = batch.spawn().unwrap();
    let events: Vec<BatchEvent> = handle.events.iter().collect();

    assert_eq!(handle.wait(), BatchState::Failed);
    let (success, message) = done(&events);
    assert!(!success);
    assert!(message.starts_with("Failed: "), "{message}");
}
