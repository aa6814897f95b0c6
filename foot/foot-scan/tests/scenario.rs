//! End-to-end scan sessions driven through the public API.

mod common;

use std::f64::consts::PI;
use std::thread;

use approx::assert_relative_eq;
use common::{FLOOR_Y, ellipsoid, reference_foot};
use foot_scan::{
    AcceptResult, FailureKind, MeasurementExtractor, PhaseKind, ScanError, ScanEvent, ScanParams,
    ScanPhase, ScanSession, ScanWorker,
};
use foot_sizing::{SizeFormat, SizeGender};
use foot_types::{FootSide, GroundReference, GroundTransform};

fn floor() -> GroundTransform {
    GroundTransform::from_translation(0.0, FLOOR_Y, 0.0)
}

/// Started session with the floor detected.
fn grounded() -> ScanSession {
    let mut session = ScanSession::default();
    session.start();
    assert!(session.on_ground_detected(&floor()).unwrap());
    session
}

#[test]
fn reference_foot_scan() {
    let mut session = grounded();
    for k in 0..4 {
        let batch = reference_foot(0.0, f64::from(k) * PI / 64.0);
        assert!(session.ingest_batch(&batch).unwrap().is_accepted());
    }
    assert_eq!(session.status_message(), "4 sections captured");

    let m = session.finish(FootSide::Left).unwrap();
    assert_relative_eq!(m.length_cm(), 27.0, epsilon = 1e-6);
    assert_relative_eq!(m.width_cm(), 10.0, epsilon = 1e-6);
    assert_relative_eq!(m.arch_height_cm().unwrap(), 10.0, epsilon = 1e-6);
    assert_eq!(m.foot_side(), FootSide::Left);
    assert_eq!(m.source_batch_count(), 4);

    // 27.0 cm falls on the 27.1 cm row.
    assert_eq!(
        session.formatted_size(SizeFormat::Us, SizeGender::Mens).as_deref(),
        Some("US Men's 10")
    );
    let all = session.all_formats(SizeGender::Mens).unwrap();
    assert_eq!(all.get(SizeFormat::Eu, SizeGender::Mens), Some("44"));
    assert_eq!(all.get(SizeFormat::Jp, SizeGender::Mens), Some("280"));
}

#[test]
fn rotated_foot_measures_the_same() {
    let mut session = grounded();
    for k in 0..3 {
        let batch = reference_foot(PI / 5.0, f64::from(k) * PI / 64.0);
        assert!(session.ingest_batch(&batch).unwrap().is_accepted());
    }
    let m = session.finish(FootSide::Right).unwrap();
    assert_relative_eq!(m.length_cm(), 27.0, epsilon = 1e-5);
    assert_relative_eq!(m.width_cm(), 10.0, epsilon = 1e-5);
}

#[test]
fn second_ground_detection_is_ignored() {
    let mut session = grounded();
    let higher = GroundTransform::from_translation(0.0, 0.5, 0.0);
    assert!(!session.on_ground_detected(&higher).unwrap());
    assert_relative_eq!(session.ground().ground_y(), FLOOR_Y);
}

#[test]
fn drifted_batch_leaves_points_unchanged() {
    let mut session = grounded();
    session.ingest_batch(&reference_foot(0.0, 0.0)).unwrap();
    let before = session.points().clone();

    let elsewhere = ellipsoid(0.5, 0.0, 0.27, 0.10, 0.10, 0.0, 0.0, 32);
    match session.ingest_batch(&elsewhere).unwrap() {
        AcceptResult::Rejected(ScanError::DriftRejected { distance, tolerance }) => {
            assert_relative_eq!(distance, 0.5, epsilon = 1e-9);
            assert_relative_eq!(tolerance, 0.20);
        }
        other => panic!("expected drift rejection, got {other:?}"),
    }
    assert_eq!(session.points(), &before);
}

#[test]
fn oversized_batch_is_rejected() {
    let mut session = grounded();
    let sweep = ellipsoid(0.0, 0.0, 0.80, 0.10, 0.10, 0.0, 0.0, 32);
    let result = session.ingest_batch(&sweep).unwrap();
    assert!(matches!(
        result.reason(),
        Some(ScanError::OutOfBounds { what: "batch z extent", .. })
    ));
    assert!(session.points().is_empty());
}

#[test]
fn floor_points_are_dropped() {
    let mut session = grounded();
    let batch = reference_foot(0.0, 0.0);
    let AcceptResult::Accepted { kept, .. } = session.ingest_batch(&batch).unwrap() else {
        panic!("reference batch should be accepted");
    };
    assert!(kept < batch.len());
    let ground = GroundReference::at(FLOOR_Y);
    assert!(session
        .points()
        .points()
        .iter()
        .all(|v| v.height_above(&ground) > 0.005));
}

#[test]
fn implausibly_long_scan_fails() {
    let mut session = grounded();
    for _ in 0..3 {
        let batch = ellipsoid(0.0, 0.0, 0.50, 0.10, 0.10, 0.0, 0.0, 32);
        assert!(session.ingest_batch(&batch).unwrap().is_accepted());
    }
    let err = session.finish(FootSide::Left).unwrap_err();
    assert!(matches!(err, ScanError::OutOfBounds { what: "foot length", .. }));
    let ScanPhase::Failed(failure) = session.phase() else {
        panic!("session should have failed");
    };
    assert_eq!(failure.kind, FailureKind::CouldNotCalculate);
    assert!(session.measurement().is_none());
}

#[test]
fn too_few_batches_fail_before_measuring() {
    let mut session = grounded();
    session.ingest_batch(&reference_foot(0.0, 0.0)).unwrap();
    session.ingest_batch(&reference_foot(0.0, 0.0)).unwrap();

    let err = session.finish(FootSide::Left).unwrap_err();
    assert_eq!(err, ScanError::insufficient("accepted batches", 3, 2));
    assert_eq!(
        session.failure().map(|f| f.kind),
        Some(FailureKind::InsufficientData)
    );
}

#[test]
fn finished_session_accepts_nothing_until_restart() {
    let mut session = grounded();
    for _ in 0..3 {
        session.ingest_batch(&reference_foot(0.0, 0.0)).unwrap();
    }
    session.finish(FootSide::Right).unwrap();

    assert!(matches!(
        session.ingest_batch(&reference_foot(0.0, 0.0)),
        Err(ScanError::InvalidPhase { .. })
    ));
    assert_eq!(session.accepted_batch_count(), 3);

    session.restart().unwrap();
    assert_eq!(session.phase().kind(), PhaseKind::Idle);
    assert_eq!(session.accepted_batch_count(), 0);
    assert!(!session.ground_established());
    assert!(session.measurement().is_none());

    session.start();
    assert!(session.on_ground_detected(&floor()).unwrap());
}

#[test]
fn event_log_records_the_scan() {
    let mut session = grounded();
    session.ingest_batch(&reference_foot(0.0, 0.0)).unwrap();
    session.ingest_batch(&reference_foot(0.0, 0.0)[..20]).unwrap();
    session.abandon();

    let kinds: Vec<&str> = session
        .drain_events()
        .iter()
        .map(|e| match e {
            ScanEvent::Started => "started",
            ScanEvent::GroundDetected { .. } => "ground",
            ScanEvent::BatchAccepted { .. } => "accepted",
            ScanEvent::BatchRejected { .. } => "rejected",
            ScanEvent::Diagnostic(_) => "diagnostic",
            ScanEvent::Finished(_) => "finished",
            ScanEvent::Failed(_) => "failed",
            ScanEvent::Restarted => "restarted",
            ScanEvent::Abandoned => "abandoned",
        })
        .collect();
    assert_eq!(kinds, ["started", "ground", "accepted", "rejected", "abandoned"]);
}

#[test]
fn snapshot_measures_on_another_thread() {
    let mut session = grounded();
    for _ in 0..3 {
        session.ingest_batch(&reference_foot(0.0, 0.0)).unwrap();
    }
    let snapshot = session.points().snapshot();
    let extractor = MeasurementExtractor::new(ScanParams::default());
    let ground = *session.ground();

    let extraction = thread::spawn(move || extractor.extract(&snapshot, &ground, FootSide::Left))
        .join()
        .unwrap()
        .unwrap();
    assert_relative_eq!(extraction.measurement.length_cm(), 27.0, epsilon = 1e-6);
    // The session itself is untouched.
    assert_eq!(session.phase().kind(), PhaseKind::Scanning);
}

#[test]
fn worker_serializes_concurrent_producers() {
    let worker = ScanWorker::spawn(ScanSession::default()).unwrap();
    let handle = worker.handle();
    handle.start().unwrap();
    handle.ground_detected(floor()).unwrap();

    let producers: Vec<_> = (0..6)
        .map(|k| {
            let h = handle.clone();
            thread::spawn(move || h.submit(reference_foot(0.0, f64::from(k) * PI / 64.0)))
        })
        .collect();
    for p in producers {
        p.join().unwrap().unwrap();
    }

    let m = handle.finish(FootSide::Left).unwrap();
    assert_eq!(m.source_batch_count(), 6);
    assert_relative_eq!(m.length_cm(), 27.0, epsilon = 1e-6);

    let session = worker.shutdown().unwrap();
    assert_eq!(session.measurement(), Some(&m));
}
