//! Default rule table embedded at compile time.
//!
//! Used when the rules directory holds no threshold rules. Left-side rules
//! extend their right-side counterparts and are listed after them.

/// `(relative path, YAML source)` pairs under `data/rules/`.
pub const DEFAULT_RULES: &[(&str, &str)] = &[
    (
        "scoring/scoring-config.yml",
        include_str!("../../../data/rules/scoring/scoring-config.yml"),
    ),
    (
        "joint_angle/hip-flexion-r.yml",
        include_str!("../../../data/rules/joint_angle/hip-flexion-r.yml"),
    ),
    (
        "joint_angle/hip-flexion-l.yml",
        include_str!("../../../data/rules/joint_angle/hip-flexion-l.yml"),
    ),
    (
        "joint_angle/hip-rotation-r.yml",
        include_str!("../../../data/rules/joint_angle/hip-rotation-r.yml"),
    ),
    (
        "joint_angle/hip-rotation-l.yml",
        include_str!("../../../data/rules/joint_angle/hip-rotation-l.yml"),
    ),
    (
        "joint_angle/knee-flexion-r.yml",
        include_str!("../../../data/rules/joint_angle/knee-flexion-r.yml"),
    ),
    (
        "joint_angle/knee-flexion-l.yml",
        include_str!("../../../data/rules/joint_angle/knee-flexion-l.yml"),
    ),
    (
        "joint_angle/knee-hyperextension-r.yml",
        include_str!("../../../data/rules/joint_angle/knee-hyperextension-r.yml"),
    ),
    (
        "joint_angle/knee-hyperextension-l.yml",
        include_str!("../../../data/rules/joint_angle/knee-hyperextension-l.yml"),
    ),
    (
        "joint_angle/knee-valgus-r.yml",
        include_str!("../../../data/rules/joint_angle/knee-valgus-r.yml"),
    ),
    (
        "joint_angle/knee-valgus-l.yml",
        include_str!("../../../data/rules/joint_angle/knee-valgus-l.yml"),
    ),
    (
        "joint_angle/lumbar-bending.yml",
        include_str!("../../../data/rules/joint_angle/lumbar-bending.yml"),
    ),
    (
        "joint_angle/scapula-abduction-r.yml",
        include_str!("../../../data/rules/joint_angle/scapula-abduction-r.yml"),
    ),
    (
        "joint_angle/scapula-abduction-l.yml",
        include_str!("../../../data/rules/joint_angle/scapula-abduction-l.yml"),
    ),
    (
        "joint_angle/scapula-upward-rotation-r.yml",
        include_str!("../../../data/rules/joint_angle/scapula-upward-rotation-r.yml"),
    ),
    (
        "joint_angle/scapula-upward-rotation-l.yml",
        include_str!("../../../data/rules/joint_angle/scapula-upward-rotation-l.yml"),
    ),
    (
        "joint_load/hip-rotation-torque-r.yml",
        include_str!("../../../data/rules/joint_load/hip-rotation-torque-r.yml"),
    ),
    (
        "joint_load/hip-rotation-torque-l.yml",
        include_str!("../../../data/rules/joint_load/hip-rotation-torque-l.yml"),
    ),
    (
        "joint_load/knee-anterior-shear.yml",
        include_str!("../../../data/rules/joint_load/knee-anterior-shear.yml"),
    ),
    (
        "kinematic/knee-angular-velocity-r.yml",
        include_str!("../../../data/rules/kinematic/knee-angular-velocity-r.yml"),
    ),
    (
        "kinematic/knee-angular-velocity-l.yml",
        include_str!("../../../data/rules/kinematic/knee-angular-velocity-l.yml"),
    ),
    (
        "kinematic/pelvis-rotation-acceleration.yml",
        include_str!("../../../data/rules/kinematic/pelvis-rotation-acceleration.yml"),
    ),
    (
        "kinematic/shoulder-velocity-r.yml",
        include_str!("../../../data/rules/kinematic/shoulder-velocity-r.yml"),
    ),
    (
        "kinematic/shoulder-velocity-l.yml",
        include_str!("../../../data/rules/kinematic/shoulder-velocity-l.yml"),
    ),
    (
        "muscle_load/gastrocnemius-overload.yml",
        include_str!("../../../data/rules/muscle_load/gastrocnemius-overload.yml"),
    ),
    (
        "muscle_load/gluteus-medius-underactivation.yml",
        include_str!("../../../data/rules/muscle_load/gluteus-medius-underactivation.yml"),
    ),
    (
        "muscle_load/hamstring-quadriceps-ratio.yml",
        include_str!("../../../data/rules/muscle_load/hamstring-quadriceps-ratio.yml"),
    ),
    (
        "muscle_load/overactivation-gaslat-r.yml",
        include_str!("../../../data/rules/muscle_load/overactivation-gaslat-r.yml"),
    ),
    (
        "muscle_load/overactivation-gaslat-l.yml",
        include_str!("../../../data/rules/muscle_load/overactivation-gaslat-l.yml"),
    ),
    (
        "muscle_load/overactivation-gasmed-r.yml",
        include_str!("../../../data/rules/muscle_load/overactivation-gasmed-r.yml"),
    ),
    (
        "muscle_load/overactivation-gasmed-l.yml",
        include_str!("../../../data/rules/muscle_load/overactivation-gasmed-l.yml"),
    ),
    (
        "muscle_load/overactivation-glut-max-r.yml",
        include_str!("../../../data/rules/muscle_load/overactivation-glut-max-r.yml"),
    ),
    (
        "muscle_load/overactivation-glut-max-l.yml",
        include_str!("../../../data/rules/muscle_load/overactivation-glut-max-l.yml"),
    ),
    (
        "muscle_load/overactivation-rect-fem-r.yml",
        include_str!("../../../data/rules/muscle_load/overactivation-rect-fem-r.yml"),
    ),
    (
        "muscle_load/overactivation-rect-fem-l.yml",
        include_str!("../../../data/rules/muscle_load/overactivation-rect-fem-l.yml"),
    ),
    (
        "muscle_load/rectus-femoris-late-swing.yml",
        include_str!("../../../data/rules/muscle_load/rectus-femoris-late-swing.yml"),
    ),
    (
        "posture/foot-pronation-r.yml",
        include_str!("../../../data/rules/posture/foot-pronation-r.yml"),
    ),
    (
        "posture/foot-pronation-l.yml",
        include_str!("../../../data/rules/posture/foot-pronation-l.yml"),
    ),
    (
        "posture/knee-valgus-alignment-r.yml",
        include_str!("../../../data/rules/posture/knee-valgus-alignment-r.yml"),
    ),
    (
        "posture/knee-valgus-alignment-l.yml",
        include_str!("../../../data/rules/posture/knee-valgus-alignment-l.yml"),
    ),
    (
        "posture/knee-varus-alignment-r.yml",
        include_str!("../../../data/rules/posture/knee-varus-alignment-r.yml"),
    ),
    (
        "posture/knee-varus-alignment-l.yml",
        include_str!("../../../data/rules/posture/knee-varus-alignment-l.yml"),
    ),
    (
        "posture/pelvic-tilt.yml",
        include_str!("../../../data/rules/posture/pelvic-tilt.yml"),
    ),
    (
        "posture/trunk-lean.yml",
        include_str!("../../../data/rules/posture/trunk-lean.yml"),
    ),
];
