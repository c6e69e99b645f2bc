//! End-to-end pipeline scenarios with stub scorers: synthetic planar frames
//! in, confidence verdicts out.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use vigil_camera::{Plane, RawFrame, latest_frame_channel};
use vigil_infer::testing::{StubProvider, StubScorer};
use vigil_infer::{ModelSource, ScorerRegistry};
use vigil_session::{Presenter, Session, SessionConfig, Verdict, run_session};

/// Planar YUV420 frame of one solid gray level (neutral chroma).
fn solid_frame(width: u32, height: u32, luma: u8) -> RawFrame {
    let pixels = width as usize * height as usize;
    RawFrame::new(
        width,
        height,
        vec![
            Plane::new(vec![luma; pixels], width as usize, 1),
            Plane::new(vec![128; pixels / 4], width as usize / 2, 1),
            Plane::new(vec![128; pixels / 4], width as usize / 2, 1),
        ],
    )
}

fn registry_with(name: &str, scorer: StubScorer) -> ScorerRegistry {
    let scorer = Mutex::new(Some(scorer));
    let provider = StubProvider::new(move || {
        scorer
            .lock()
            .unwrap()
            .take()
            .expect("stub scorer loaded twice")
    });
    let mut registry = ScorerRegistry::new();
    registry
        .load(name, ModelSource::Memory(vec![]), &provider)
        .unwrap();
    registry
}

#[test]
fn single_frame_model_scores_black_frame_with_zero_tensor() {
    let scorer = StubScorer::new(vec![1, 128, 128, 3], vec![1, 1], vec![0.73]);
    let calls = scorer.calls();
    let mut registry = registry_with("base", scorer);

    let mut session = Session::start(&SessionConfig::default(), &mut registry).unwrap();
    assert!(!session.is_temporal());

    let verdict = session.process_frame(solid_frame(128, 128, 0)).unwrap();
    assert_eq!(verdict.score, 0.73);
    assert!(verdict.flagged);

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].shape, vec![1, 128, 128, 3]);
    // Black survives the lossy JPEG step essentially unchanged.
    assert!(calls[0].data.iter().all(|v| v.abs() < 0.02));
}

#[test]
fn temporal_model_warms_up_then_scores_stacked_window() {
    let scorer = StubScorer::new(vec![1, 8, 128, 128, 3], vec![1, 1], vec![0.4]);
    let calls = scorer.calls();
    let mut registry = registry_with("gru", scorer);

    let config = SessionConfig::default().with_model("gru");
    let mut session = Session::start(&config, &mut registry).unwrap();
    assert!(session.is_temporal());

    // Seven distinct frames: warm-up, no scorer invocation.
    for step in 0..7u8 {
        let verdict = session.process_frame(solid_frame(128, 128, step * 30));
        assert!(verdict.is_none());
    }
    assert!(calls.lock().unwrap().is_empty());

    // Eighth frame fills the window: exactly one invocation.
    let verdict = session.process_frame(solid_frame(128, 128, 210)).unwrap();
    assert_eq!(verdict.score, 0.4);
    assert!(!verdict.flagged);

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].shape, vec![1, 8, 128, 128, 3]);

    // Time slices must be stacked in push order: the solid gray levels were
    // strictly increasing, so each slice is brighter than the previous one.
    let slice = 128 * 128 * 3;
    let levels: Vec<f32> = (0..8).map(|t| calls[0].data[t * slice]).collect();
    for pair in levels.windows(2) {
        assert!(pair[0] < pair[1], "slices out of order: {levels:?}");
    }
}

#[test]
fn malformed_frame_is_skipped_and_stream_continues() {
    let scorer = StubScorer::new(vec![1, 128, 128, 3], vec![1, 1], vec![0.1]);
    let calls = scorer.calls();
    let mut registry = registry_with("base", scorer);
    let mut session = Session::start(&SessionConfig::default(), &mut registry).unwrap();

    // Two planes instead of three: logged, dropped, no invocation.
    let bad = RawFrame::new(
        128,
        128,
        vec![
            Plane::new(vec![0; 128 * 128], 128, 1),
            Plane::new(vec![128; 128 * 128 / 4], 64, 1),
        ],
    );
    assert!(session.process_frame(bad).is_none());
    assert!(calls.lock().unwrap().is_empty());

    // Next frame goes through normally.
    assert!(session.process_frame(solid_frame(128, 128, 40)).is_some());
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[test]
fn frame_is_released_even_when_conversion_fails() {
    let scorer = StubScorer::new(vec![1, 128, 128, 3], vec![1, 1], vec![0.1]);
    let mut registry = registry_with("base", scorer);
    let mut session = Session::start(&SessionConfig::default(), &mut registry).unwrap();

    let released = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&released);
    let bad = RawFrame::new(128, 128, vec![]).with_release_hook(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert!(session.process_frame(bad).is_none());
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

struct RecordingPresenter {
    verdicts: Mutex<Vec<Verdict>>,
}

impl Presenter for RecordingPresenter {
    fn present(&self, verdict: Verdict) {
        self.verdicts.lock().unwrap().push(verdict);
    }
}

#[tokio::test]
async fn run_session_presents_verdicts_until_source_closes() {
    let scorer = StubScorer::new(vec![1, 64, 64, 3], vec![1], vec![0.9]);
    let mut registry = registry_with("base", scorer);
    let mut session = Session::start(&SessionConfig::default(), &mut registry).unwrap();

    let (feed, source) = latest_frame_channel();
    feed.submit(solid_frame(64, 64, 10));
    drop(feed);

    let presenter = RecordingPresenter {
        verdicts: Mutex::new(Vec::new()),
    };
    run_session(&mut session, source, &presenter).await;

    let verdicts = presenter.verdicts.lock().unwrap();
    assert_eq!(verdicts.len(), 1);
    assert_eq!(verdicts[0].score, 0.9);
    assert!(verdicts[0].flagged);
}
