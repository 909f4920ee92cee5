//! Column naming convention of the supported full-body skeletal model.
//!
//! Names outside these lists are allowed but produce validation warnings.

use crate::schema::TableSource;

/// Generalized coordinates reported by inverse kinematics (side-less form
/// for bilateral joints is listed with both `_r` and `_l`).
pub const COORDINATES: &[&str] = &[
    "pelvis_tilt",
    "pelvis_list",
    "pelvis_rotation",
    "pelvis_tx",
    "pelvis_ty",
    "pelvis_tz",
    "hip_flexion_r",
    "hip_adduction_r",
    "hip_rotation_r",
    "knee_angle_r",
    "knee_valgus_r",
    "ankle_angle_r",
    "subtalar_angle_r",
    "mtp_angle_r",
    "hip_flexion_l",
    "hip_adduction_l",
    "hip_rotation_l",
    "knee_angle_l",
    "knee_valgus_l",
    "ankle_angle_l",
    "subtalar_angle_l",
    "mtp_angle_l",
    "lumbar_extension",
    "lumbar_bending",
    "lumbar_rotation",
    "scapula_abduction_r",
    "scapula_elevation_r",
    "scapula_upward_rot_r",
    "scapula_abduction_l",
    "scapula_elevation_l",
    "scapula_upward_rot_l",
    "shoulder_r_x",
    "shoulder_r_y",
    "shoulder_r_z",
    "shoulder_l_x",
    "shoulder_l_y",
    "shoulder_l_z",
    "elbow_flexion_r",
    "elbow_flexion_l",
    "pro_sup_r",
    "pro_sup_l",
];

/// Muscle actuators reported by static optimization.
pub const MUSCLES: &[&str] = &[
    "bflh_r", "bfsh_r", "semimem_r", "semiten_r", "vaslat_r", "vasmed_r", "vasint_r", "recfem_r",
    "rect_fem_r", "gaslat_r", "gasmed_r", "glmed1_r", "glmed2_r", "glmed3_r", "glut_max_r",
    "soleus_r", "tibant_r", "iliacus_r", "psoas_r", "bflh_l", "bfsh_l", "semimem_l", "semiten_l",
    "vaslat_l", "vasmed_l", "vasint_l", "recfem_l", "rect_fem_l", "gaslat_l", "gasmed_l",
    "glmed1_l", "glmed2_l", "glmed3_l", "glut_max_l", "soleus_l", "tibant_l", "iliacus_l",
    "psoas_l",
];

/// Suffixes inverse dynamics appends to coordinate names.
pub const LOAD_SUFFIXES: &[&str] = &["_moment", "_force"];

/// Whether `label` is a known exact column of `table`.
pub fn is_known_column(table: TableSource, label: &str) -> bool {
    match table {
        TableSource::Ik => COORDINATES.contains(&label),
        TableSource::InverseDynamics => LOAD_SUFFIXES.iter().any(|suffix| {
            label
                .strip_suffix(suffix)
                .is_some_and(|coord| COORDINATES.contains(&coord))
        }),
        TableSource::SoActivation | TableSource::SoForce => MUSCLES.contains(&label),
    }
}

/// Whether `fragment` occurs in at least one known column of `table`.
pub fn matches_known_column(table: TableSource, fragment: &str) -> bool {
    known_columns(table).iter().any(|c| c.contains(fragment))
}

/// All known exact column names of `table`.
pub fn known_columns(table: TableSource) -> Vec<String> {
    match table {
        TableSource::Ik => COORDINATES.iter().map(|c| c.to_string()).collect(),
        TableSource::InverseDynamics => COORDINATES
            .iter()
            .flat_map(|c| LOAD_SUFFIXES.iter().map(move |s| format!("{c}{s}")))
            .collect(),
        TableSource::SoActivation | TableSource::SoForce => {
            MUSCLES.iter().map(|m| m.to_string()).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_columns_use_coordinate_names() {
        assert!(is_known_column(TableSource::InverseDynamics, "hip_rotation_r_moment"));
        assert!(is_known_column(TableSource::InverseDynamics, "pelvis_tz_force"));
        assert!(!is_known_column(TableSource::InverseDynamics, "hip_rotation_r"));
    }

    #[test]
    fn fragments_match_muscles() {
        assert!(matches_known_column(TableSource::SoActivation, "glmed"));
        assert!(matches_known_column(TableSource::SoForce, "gaslat"));
        assert!(!matches_known_column(TableSource::SoForce, "deltoid"));
    }
}
