use approx::assert_abs_diff_eq;

use rom_tracker::config::Config;
use rom_tracker::pose::{face, Landmark, LandmarkFrame, PoseLandmark};
use rom_tracker::report::SessionReport;
use rom_tracker::{AngleCalculator, JointRegistry, PerformanceBand, Session, SessionStats};

const WIDTH: u32 = 100;
const HEIGHT: u32 = 100;

/// 指定した点以外は信頼度0のポーズフレーム
fn pose_frame(timestamp_us: u64, points: &[(PoseLandmark, (f32, f32), f32)]) -> LandmarkFrame {
    let mut pose = vec![Landmark::with_visibility(0.0, 0.0, 0.0); PoseLandmark::COUNT];
    for &(index, (x, y), visibility) in points {
        pose[index.index()] = Landmark::with_visibility(x, y, visibility);
    }
    LandmarkFrame::new(timestamp_us).with_pose(pose)
}

/// Face Mesh は visibility を持たない
fn face_frame(points: &[(usize, (f32, f32))]) -> LandmarkFrame {
    let mut mesh = vec![Landmark::new(0.5, 0.5); face::COUNT];
    for &(index, (x, y)) in points {
        mesh[index] = Landmark::new(x, y);
    }
    LandmarkFrame::new(0).with_face(mesh)
}

fn left_arm(wrist: (f32, f32), wrist_visibility: f32) -> LandmarkFrame {
    pose_frame(
        0,
        &[
            (PoseLandmark::LeftShoulder, (0.2, 0.5), 0.9),
            (PoseLandmark::LeftElbow, (0.4, 0.5), 0.9),
            (PoseLandmark::LeftWrist, wrist, wrist_visibility),
        ],
    )
}

fn right_arm(wrist: (f32, f32)) -> LandmarkFrame {
    pose_frame(
        0,
        &[
            (PoseLandmark::RightShoulder, (0.8, 0.5), 0.9),
            (PoseLandmark::RightElbow, (0.6, 0.5), 0.9),
            (PoseLandmark::RightWrist, wrist, 0.9),
        ],
    )
}

fn session() -> Session {
    let registry = JointRegistry::builtin().unwrap();
    Session::new(registry, AngleCalculator::new(WIDTH, HEIGHT), "leftElbow").unwrap()
}

#[test]
fn straight_arm_reads_zero_and_right_angle_reads_ninety() {
    let registry = JointRegistry::builtin().unwrap();
    let elbow = registry.by_id("leftElbow").unwrap();
    let calc = AngleCalculator::new(WIDTH, HEIGHT);

    let straight = calc.compute(elbow, &left_arm((0.6, 0.5), 0.9));
    assert_abs_diff_eq!(straight.angle.unwrap(), 0.0, epsilon = 1e-3);

    let bent_up = calc.compute(elbow, &left_arm((0.4, 0.3), 0.9)).angle.unwrap();
    let bent_down = calc.compute(elbow, &left_arm((0.4, 0.7), 0.9)).angle.unwrap();
    assert_abs_diff_eq!(bent_up.abs(), 90.0, epsilon = 1e-3);
    assert_abs_diff_eq!(bent_down.abs(), 90.0, epsilon = 1e-3);
    assert!(bent_up.signum() != bent_down.signum());
}

#[test]
fn mirrored_elbow_bends_rate_alike() {
    let registry = JointRegistry::builtin().unwrap();
    let calc = AngleCalculator::new(WIDTH, HEIGHT);
    let left_elbow = registry.by_id("leftElbow").unwrap();
    let right_elbow = registry.by_id("rightElbow").unwrap();

    for wrist_y in [0.7, 0.3] {
        let left = calc.compute(left_elbow, &left_arm((0.4, wrist_y), 0.9)).angle.unwrap();
        let right = calc.compute(right_elbow, &right_arm((0.6, wrist_y))).angle.unwrap();
        assert_abs_diff_eq!(left, right, epsilon = 1e-3);
        assert_eq!(
            rom_tracker::classify(left, left_elbow.thresholds().as_ref()),
            rom_tracker::classify(right, right_elbow.thresholds().as_ref())
        );
    }
}

#[test]
fn mirrored_knee_bends_read_alike() {
    let registry = JointRegistry::builtin().unwrap();
    let calc = AngleCalculator::new(WIDTH, HEIGHT);
    let frame = pose_frame(
        0,
        &[
            (PoseLandmark::LeftHip, (0.4, 0.3), 0.9),
            (PoseLandmark::LeftKnee, (0.4, 0.5), 0.9),
            (PoseLandmark::LeftAnkle, (0.25, 0.6), 0.9),
            (PoseLandmark::RightHip, (0.6, 0.3), 0.9),
            (PoseLandmark::RightKnee, (0.6, 0.5), 0.9),
            (PoseLandmark::RightAnkle, (0.75, 0.6), 0.9),
        ],
    );
    let left = calc.compute(registry.by_id("leftKnee").unwrap(), &frame).angle.unwrap();
    let right = calc.compute(registry.by_id("rightKnee").unwrap(), &frame).angle.unwrap();
    assert_abs_diff_eq!(left, right, epsilon = 1e-3);
}

#[test]
fn tilt_left_negates_shared_geometry() {
    let registry = JointRegistry::builtin().unwrap();
    let calc = AngleCalculator::new(WIDTH, HEIGHT);
    let frame = face_frame(&[(face::LEFT_EYE_OUTER, (0.0, 0.0)), (face::RIGHT_EYE_OUTER, (0.1, 0.1))]);

    let right = calc.compute(registry.by_id("headTiltRight").unwrap(), &frame);
    let left = calc.compute(registry.by_id("headTiltLeft").unwrap(), &frame);
    assert_abs_diff_eq!(right.angle.unwrap(), 45.0, epsilon = 1e-3);
    assert_abs_diff_eq!(left.angle.unwrap(), -45.0, epsilon = 1e-3);
}

#[test]
fn head_turn_pair_shares_magnitude() {
    let registry = JointRegistry::builtin().unwrap();
    let calc = AngleCalculator::new(WIDTH, HEIGHT);
    let frame = face_frame(&[
        (face::NOSE_TIP, (0.6, 0.5)),
        (face::LEFT_CHEEK, (0.2, 0.5)),
        (face::RIGHT_CHEEK, (0.8, 0.5)),
    ]);

    // left 40, right 20, width 60 → ratio 1/3 → 30°
    let right = calc.compute(registry.by_id("headTurnRight").unwrap(), &frame).angle.unwrap();
    let left = calc.compute(registry.by_id("headTurnLeft").unwrap(), &frame).angle.unwrap();
    assert_abs_diff_eq!(right, 30.0, epsilon = 1e-2);
    assert_abs_diff_eq!(left, -right, epsilon = 1e-6);
}

#[test]
fn occluded_frame_leaves_stats_unchanged() {
    let mut s = session();
    s.process(&left_arm((0.4, 0.3), 0.9));
    let before = s.stats();
    assert!(before.min.is_some());

    let m = s.process(&left_arm((0.6, 0.5), 0.5));
    assert_eq!(m.sample.angle, None);
    assert_eq!(s.stats(), before);
    assert!(s.capture().is_none());
    assert!(s.reading().starts_with("Waiting for landmarks..."));
}

#[test]
fn switching_joint_clears_extremes() {
    let mut s = session();
    s.process(&left_arm((0.6, 0.5), 0.9));
    s.process(&left_arm((0.4, 0.3), 0.9));
    assert!(s.stats().span().unwrap() > 80.0);

    s.select("rightKnee").unwrap();
    assert_eq!(s.stats(), SessionStats { min: None, max: None });
}

#[test]
fn unknown_joint_fails_loudly() {
    let mut s = session();
    assert!(s.select("leftAntenna").is_err());
    assert!(JointRegistry::builtin().unwrap().by_id("leftAntenna").is_err());
}

#[test]
fn capture_and_export_report() {
    let mut config = Config::default();
    config.session.width = WIDTH;
    config.session.height = HEIGHT;
    let mut s = Session::from_config(&config).unwrap();

    let mut report = SessionReport::new("Jordan", "2026-10-14");
    s.process(&left_arm((0.4, 0.7), 0.9));
    let shot = s.capture().unwrap();
    assert_eq!(shot.angle, 90.0);
    // 140/100/60 elbow thresholds
    assert_eq!(shot.band, PerformanceBand::Poor);
    report.push(shot);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    report.save(&path).unwrap();
    let loaded = SessionReport::load(&path).unwrap();
    assert_eq!(loaded.snapshots.len(), 1);
    assert!(loaded.render_text().contains("Performance: Poor"));
}

#[test]
fn invalid_engine_config_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[engine]\nmax_yaw_deg = nan\n").unwrap();
    assert!(Config::load_or_default(&path).is_err());

    let mut config = Config::default();
    config.engine.max_yaw_deg = f32::INFINITY;
    assert!(Session::from_config(&config).is_err());
}

#[test]
fn extra_joints_from_config() {
    let config: Config = toml::from_str(
        r#"
        [session]
        default_joint = "leftWrist"

        [[joints]]
        id = "leftWrist"
        label = "Left Wrist"
        indices = [13, 15, 19]
        calc = "Flexion"
        "#,
    )
    .unwrap();
    let s = Session::from_config(&config).unwrap();
    assert_eq!(s.joint().label(), "Left Wrist");
}
