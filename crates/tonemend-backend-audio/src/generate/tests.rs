//! Tests for the generation orchestrator.

use std::io::Cursor;
use std::ops::ControlFlow;
use std::sync::mpsc;

use pretty_assertions::assert_eq;
use tonemend_spec::{ModulationMode, ProgressEvent, Role, SynthesisRequest};

use super::*;
use crate::bands::BANDS;
use crate::synthesis::DEFAULT_TARGET_PEAK;
use crate::wav::{compute_pcm_hash, WavHeader};

const SHORT: SynthesisSettings = SynthesisSettings {
    block_seconds: 0.25,
    ramp_seconds: 0.1,
    target_peak: DEFAULT_TARGET_PEAK,
};

// 2 full blocks of 11025 samples plus a 4410-sample tail
const SHORT_SECONDS: f64 = 0.6;

fn request(sham: bool) -> SynthesisRequest {
    SynthesisRequest::builder(4800.0)
        .modulation_mode(ModulationMode::Amplitude)
        .duration_minutes(5)
        .generate_sham_file(sham)
        .seed(7)
        .build()
        .unwrap()
}

fn short_generator(request: &SynthesisRequest) -> Generator<'_> {
    Generator::new(request, SHORT)
        .unwrap()
        .with_duration_seconds(SHORT_SECONDS)
        .unwrap()
}

fn render_to_vec(band: &Band, base_seed: u32, role: Role) -> (Vec<u8>, WavSummary) {
    let job = RoleJob {
        role,
        band,
        mode: ModulationMode::Phase,
        base_seed,
        with_sham: false,
    };
    let plan = BlockPlan::new(SHORT_SECONDS, SHORT.block_seconds);
    let (cursor, summary) =
        render_role_to_writer(&job, &plan, &SHORT, Cursor::new(Vec::new()), &mut NoProgress)
            .unwrap();
    (cursor.into_inner(), summary)
}

fn dir_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

// =========================================================================
// Block plan
// =========================================================================

#[test]
fn test_five_minute_plan_without_remainder() {
    let plan = BlockPlan::new(300.0, 4.0);
    assert_eq!(plan.total_samples, 13_230_000);
    assert_eq!(plan.block_samples, 176_400);
    assert_eq!(plan.full_blocks, 75);
    assert_eq!(plan.remainder_samples, 0);
    assert_eq!(plan.total_blocks(), 75);
    assert_eq!(plan.block_lengths().map(|n| n as u64).sum::<u64>(), 13_230_000);
}

#[test]
fn test_five_minute_plan_with_remainder() {
    let plan = BlockPlan::new(300.0, 7.0);
    assert_eq!(plan.block_samples, 308_700);
    assert_eq!(plan.full_blocks, 42);
    // 300 - 42 * 7 = 6 seconds
    assert_eq!(plan.remainder_samples, 264_600);
    assert_eq!(plan.total_blocks(), 43);

    let lengths: Vec<usize> = plan.block_lengths().collect();
    assert_eq!(lengths.len(), 43);
    assert_eq!(lengths[41], 308_700);
    assert_eq!(lengths[42], 264_600);
    assert_eq!(lengths.iter().map(|&n| n as u64).sum::<u64>(), 13_230_000);
    assert!((plan.duration_seconds() - 300.0).abs() < 1e-9);
}

#[test]
fn test_short_plan() {
    let plan = BlockPlan::new(SHORT_SECONDS, SHORT.block_seconds);
    assert_eq!(plan.block_lengths().collect::<Vec<_>>(), vec![11_025, 11_025, 4_410]);
}

#[test]
fn test_empty_plan() {
    let plan = BlockPlan::new(0.0, 4.0);
    assert_eq!(plan.total_blocks(), 0);
    assert_eq!(plan.block_lengths().count(), 0);
}

#[test]
fn test_generator_plans_request_duration() {
    let request = request(false);
    let generator = Generator::new(&request, SynthesisSettings::default()).unwrap();
    assert_eq!(generator.plan().total_samples, 13_230_000);
    assert_eq!(generator.state(), GeneratorState::Idle);
    assert_eq!(generator.bands().active.name, "4–8 kHz");
}

#[test]
fn test_generator_rejects_bad_settings() {
    let request = request(false);
    let settings = SynthesisSettings {
        target_peak: 2.0,
        ..SHORT
    };
    assert!(matches!(
        Generator::new(&request, settings),
        Err(AudioError::InvalidSettings { .. })
    ));
}

#[test]
fn test_override_duration_must_be_positive() {
    let request = request(false);
    for seconds in [f64::NAN, f64::INFINITY, 0.0, -3.0, 1e-9] {
        let result = Generator::new(&request, SHORT)
            .unwrap()
            .with_duration_seconds(seconds);
        assert!(
            matches!(result, Err(AudioError::InvalidSettings { ref name, .. }) if name == "duration_seconds"),
            "{seconds} should be rejected"
        );
    }
}

#[test]
fn test_override_duration_replaces_plan() {
    let request = request(false);
    let generator = short_generator(&request);
    assert_eq!(generator.plan().total_samples, 26_460);
    assert_eq!(generator.plan().total_blocks(), 3);
}

// =========================================================================
// Determinism
// =========================================================================

#[test]
fn test_same_seed_same_bytes() {
    let (a, summary_a) = render_to_vec(&BANDS[3], 99, Role::Active);
    let (b, summary_b) = render_to_vec(&BANDS[3], 99, Role::Active);
    assert!(a == b, "renders differ");
    assert_eq!(summary_a, summary_b);
    assert_eq!(a.len(), 44 + 2 * 26_460);
}

#[test]
fn test_seed_and_role_change_output() {
    let (base, _) = render_to_vec(&BANDS[3], 99, Role::Active);
    let (other_seed, _) = render_to_vec(&BANDS[3], 100, Role::Active);
    let (other_role, _) = render_to_vec(&BANDS[3], 99, Role::Sham);
    assert!(base != other_seed);
    assert!(base != other_role);
}

// =========================================================================
// Progress and cancellation
// =========================================================================

#[test]
fn test_progress_active_only() {
    let request = request(false);
    let dir = tempfile::tempdir().unwrap();
    let mut events = Vec::new();
    let mut sink = |event: &ProgressEvent| {
        events.push(*event);
        ControlFlow::Continue(())
    };

    short_generator(&request).run(dir.path(), &mut sink).unwrap();

    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e.role == Role::Active && e.total_blocks == 3));
    assert_eq!(events[2].blocks_completed, 3);
    assert_eq!(events[2].fraction, 1.0);
}

#[test]
fn test_progress_with_sham() {
    let request = request(true);
    let dir = tempfile::tempdir().unwrap();
    let (tx, rx) = mpsc::channel();

    short_generator(&request)
        .run(dir.path(), &mut ChannelSink(tx))
        .unwrap();

    let events: Vec<ProgressEvent> = rx.iter().collect();
    assert_eq!(events.len(), 6);
    assert_eq!(events[2].role, Role::Active);
    assert_eq!(events[2].fraction, 0.5);
    assert_eq!(events[3].role, Role::Sham);
    assert_eq!(events[5].fraction, 1.0);
    assert!(events.windows(2).all(|w| w[0].fraction < w[1].fraction));
}

#[test]
fn test_cancel_flag_leaves_no_file() {
    let request = request(true);
    let dir = tempfile::tempdir().unwrap();
    let mut flag = CancelFlag::new();
    flag.cancel();

    let mut generator = short_generator(&request);
    let err = generator.run(dir.path(), &mut flag).unwrap_err();

    assert!(matches!(err, AudioError::Cancelled));
    assert_eq!(generator.state(), GeneratorState::Failed);
    assert_eq!(dir_entries(dir.path()), 0);
}

#[test]
fn test_cancel_during_sham_removes_active_file() {
    let request = request(true);
    let dir = tempfile::tempdir().unwrap();
    let mut sink = |event: &ProgressEvent| {
        if event.role == Role::Sham {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    };

    let err = short_generator(&request)
        .run(dir.path(), &mut sink)
        .unwrap_err();

    assert!(matches!(err, AudioError::Cancelled));
    assert_eq!(dir_entries(dir.path()), 0);
}

#[test]
fn test_dropped_receiver_cancels() {
    let request = request(false);
    let dir = tempfile::tempdir().unwrap();
    let (tx, rx) = mpsc::channel();
    drop(rx);

    let err = short_generator(&request)
        .run(dir.path(), &mut ChannelSink(tx))
        .unwrap_err();
    assert!(matches!(err, AudioError::Cancelled));
    assert_eq!(dir_entries(dir.path()), 0);
}

#[test]
fn test_generator_runs_once() {
    let request = request(false);
    let dir = tempfile::tempdir().unwrap();
    let mut generator = short_generator(&request);
    generator.run(dir.path(), &mut NoProgress).unwrap();
    assert_eq!(generator.state(), GeneratorState::Complete);

    assert!(matches!(
        generator.run(dir.path(), &mut NoProgress),
        Err(AudioError::Synthesis { .. })
    ));
}

// =========================================================================
// End to end
// =========================================================================

#[test]
fn test_generates_both_files() {
    let request = request(true);
    let dir = tempfile::tempdir().unwrap();
    let result = short_generator(&request)
        .run(dir.path(), &mut NoProgress)
        .unwrap();

    let active = dir.path().join("tonemend_4800hz_amplitude_5min_active.wav");
    let sham = dir.path().join("tonemend_4800hz_amplitude_5min_sham.wav");
    assert_eq!(result.active, active.display().to_string());
    assert_eq!(result.sham, Some(sham.display().to_string()));
    assert_eq!(dir_entries(dir.path()), 2);

    assert_eq!(result.target_frequency_hz, 4800);
    assert_eq!(result.duration_minutes, 5);
    assert_eq!(result.seed, 7);
    assert_eq!(result.total_samples, 26_460);
    assert_eq!(result.active_band.name, "4–8 kHz");
    assert_eq!(result.sham_band.as_ref().map(|b| b.name.as_str()), Some("1–2 kHz"));

    let active_bytes = std::fs::read(&active).unwrap();
    let header = WavHeader::parse(&active_bytes).unwrap();
    assert!(header.check(active_bytes.len() as u64).is_empty());
    assert_eq!(header.num_samples(), 26_460);
    assert_eq!(compute_pcm_hash(&active_bytes), Some(result.active_pcm_hash.clone()));

    let sham_bytes = std::fs::read(&sham).unwrap();
    assert_eq!(compute_pcm_hash(&sham_bytes), result.sham_pcm_hash);
    assert!(active_bytes != sham_bytes);
}

#[test]
fn test_file_matches_in_memory_render() {
    let request = request(false);
    let dir = tempfile::tempdir().unwrap();
    let result = short_generator(&request)
        .run(dir.path(), &mut NoProgress)
        .unwrap();
    assert_eq!(result.sham, None);
    assert_eq!(result.sham_pcm_hash, None);

    let job = RoleJob {
        role: Role::Active,
        band: &BANDS[4],
        mode: ModulationMode::Amplitude,
        base_seed: 7,
        with_sham: false,
    };
    let plan = BlockPlan::new(SHORT_SECONDS, SHORT.block_seconds);
    let (cursor, summary) =
        render_role_to_writer(&job, &plan, &SHORT, Cursor::new(Vec::new()), &mut NoProgress)
            .unwrap();

    assert_eq!(summary.pcm_hash, result.active_pcm_hash);
    assert!(std::fs::read(&result.active).unwrap() == cursor.into_inner());
}

#[test]
fn test_rerun_overwrites_identically() {
    let request = request(false);
    let dir = tempfile::tempdir().unwrap();
    let first = short_generator(&request)
        .run(dir.path(), &mut NoProgress)
        .unwrap();
    let second = short_generator(&request)
        .run(dir.path(), &mut NoProgress)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(dir_entries(dir.path()), 1);
}

#[test]
fn test_missing_output_dir_is_io_error() {
    let request = request(false);
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    let err = short_generator(&request)
        .run(&missing, &mut NoProgress)
        .unwrap_err();
    assert!(matches!(err, AudioError::Io(_)));
}
