use crate::resolution::{validate_dimensions, MAX_SCALE_FACTOR};
use crate::system::SystemProfile;

fn snes() -> SystemProfile {
    SystemProfile::new("Super Nintendo Entertainment System")
        .with_resolution(256, 224)
        .with_resolution(512, 448)
        .with_scaling(true)
}

#[test]
fn unconstrained_system_accepts_anything() {
    let system = SystemProfile::new("Arcade");
    assert!(validate_dimensions(&system, 1, 1).is_ok());
    assert!(validate_dimensions(&system, 1337, 42).is_ok());
    assert!(validate_dimensions(&system, 3840, 2160).is_ok());
}

#[test]
fn exact_base_match_passes() {
    let system = snes();
    assert!(validate_dimensions(&system, 256, 224).is_ok());
    assert!(validate_dimensions(&system, 512, 448).is_ok());
}

#[test]
fn exact_match_passes_even_with_scaling_disabled() {
    let system = snes().with_scaling(false);
    assert!(validate_dimensions(&system, 256, 224).is_ok());
}

#[test]
fn symmetric_2x_and_3x_multiples_pass() {
    let system = snes();
    for k in 2..=MAX_SCALE_FACTOR {
        assert!(
            validate_dimensions(&system, 256 * k, 224 * k).is_ok(),
            "{}x scale should pass",
            k
        );
    }
}

#[test]
fn fourth_multiple_fails() {
    let system = snes();
    assert!(validate_dimensions(&system, 256 * 4, 224 * 4).is_err());
}

#[test]
fn asymmetric_multiple_fails() {
    let system = snes();
    // 2x wide by 1x tall is an anamorphic stretch, not a scaled capture.
    assert!(validate_dimensions(&system, 512, 224).is_err());
    // 2x wide by 3x tall is divisible on both axes but not symmetric.
    assert!(validate_dimensions(&system, 512, 672).is_err());
}

#[test]
fn multiples_fail_when_scaling_disabled() {
    let system = snes().with_scaling(false);
    assert!(validate_dimensions(&system, 512, 448).is_ok()); // still a base
    assert!(validate_dimensions(&system, 768, 672).is_err()); // clean 3x of 256x224
}

#[test]
fn near_multiple_with_remainder_fails() {
    let system = snes();
    assert!(validate_dimensions(&system, 513, 448).is_err());
    assert!(validate_dimensions(&system, 512, 449).is_err());
}

#[test]
fn smpte_601_exact_match_passes_for_analog_systems() {
    let system = SystemProfile::new("PlayStation 2")
        .with_resolution(640, 448)
        .with_scaling(true)
        .with_analog_tv_output(true);
    // Unrelated to any configured base resolution.
    assert!(validate_dimensions(&system, 720, 480).is_ok());
    assert!(validate_dimensions(&system, 704, 576).is_ok());
}

#[test]
fn smpte_601_is_never_scaled() {
    let system = SystemProfile::new("PlayStation 2")
        .with_resolution(640, 448)
        .with_scaling(true)
        .with_analog_tv_output(true);
    assert!(validate_dimensions(&system, 1440, 960).is_err());
}

#[test]
fn smpte_601_fails_without_analog_output() {
    let system = snes();
    assert!(validate_dimensions(&system, 720, 480).is_err());
}

#[test]
fn rejection_message_names_candidate_system_and_resolutions() {
    let system = snes();
    let message = validate_dimensions(&system, 880, 700)
        .unwrap_err()
        .to_string();
    assert!(message.contains("880x700"));
    assert!(message.contains("Super Nintendo Entertainment System"));
    assert!(message.contains("256x224, 512x448"));
    assert!(message.contains("2x and 3x"));
    assert!(!message.contains("SMPTE 601"));
}

#[test]
fn rejection_message_mentions_smpte_only_for_analog_systems() {
    let system = snes().with_analog_tv_output(true);
    let message = validate_dimensions(&system, 880, 700)
        .unwrap_err()
        .to_string();
    assert!(message.contains("SMPTE 601"));
    assert!(message.contains("704x480, 720x480, 720x486, 704x576, 720x576"));
}

#[test]
fn zero_sized_base_resolution_never_matches_by_scaling() {
    let system = SystemProfile::new("Broken")
        .with_resolution(0, 0)
        .with_scaling(true);
    assert!(validate_dimensions(&system, 256, 224).is_err());
}
