// tests/plant_growth.rs
use glam::{Quat, Vec3};
use symbios_flora::{
    InterpParams, PlantGeometry, PlantInterpreter, PlantPreset, RuleMap, SeededRng, rewrite,
};

fn still_params() -> InterpParams {
    InterpParams {
        angle_variance: 0.0,
        gravity: 0.0,
        ..Default::default()
    }
}

fn run(params: InterpParams, input: &str, seed: u64) -> PlantGeometry {
    PlantInterpreter::new(params).interpret(input, &mut SeededRng::with_seed(seed))
}

#[test]
fn test_rewrite_growth_scenario() {
    let rules = RuleMap::from_slots(["A=AB"]);
    assert_eq!(rewrite("A", &rules, 0), "A");
    assert_eq!(rewrite("A", &rules, 3), "ABBB");
}

#[test]
fn test_large_rewrite_completes() {
    let rules = RuleMap::from_slots(["A=F[+A][-A]FA", "F=FF"]);
    let symbols = rewrite("A", &rules, 10);
    assert!(symbols.len() > 50_000, "len = {}", symbols.len());
}

#[test]
fn test_determinism_without_jitter() {
    let rules = PlantPreset::default().rule_map();
    let symbols = rewrite("A", &rules, 5);
    let params = InterpParams {
        angle_variance: 0.0,
        ..Default::default()
    };
    let a = run(params, &symbols, 1);
    let b = run(params, &symbols, 1);
    assert!(!a.branches.is_empty());
    assert_eq!(a, b);
}

#[test]
fn test_seed_reproducibility() {
    let symbols = "F[+F][-F]&F^F\\F/F";
    let params = InterpParams {
        angle_variance: 20.0,
        gravity: 0.0,
        ..Default::default()
    };
    let interpreter = PlantInterpreter::new(params);

    let mut rng = SeededRng::with_seed(1234);
    let first = interpreter.interpret(symbols, &mut rng);
    rng.set_seed(1234);
    let second = interpreter.interpret(symbols, &mut rng);
    assert_eq!(first, second);

    let other = interpreter.interpret(symbols, &mut SeededRng::with_seed(99));
    assert_ne!(first, other, "different seeds should jitter differently");
}

#[test]
fn test_radius_taper_is_continuous() {
    let plant = run(still_params(), "FFF", 0);
    assert_eq!(plant.branches.len(), 3);
    for pair in plant.branches.windows(2) {
        assert_eq!(pair[1].radius_bottom, pair[0].radius_top);
        assert_eq!(pair[1].start, pair[0].end);
    }
    assert_eq!(plant.branches[0].radius_bottom, 1.0);
    assert_eq!(plant.branches[0].radius_top, 0.9);
}

#[test]
fn test_brackets_do_not_leak() {
    let interpreter = PlantInterpreter::new(InterpParams {
        angle_variance: 10.0,
        ..Default::default()
    });
    let mut rng = SeededRng::with_seed(5);
    let (_, before) = interpreter.interpret_with_state("F", &mut rng);
    rng.set_seed(5);
    let (plant, after) =
        interpreter.interpret_with_state("F[+F!(0.1)\"(0.2)[&F]F]", &mut rng);

    assert_eq!(after, before);
    assert_eq!(plant.branches.len(), 4);
}

#[test]
fn test_mainline_continues_after_branch() {
    let plant = run(still_params(), "F[+F]F", 0);
    assert_eq!(plant.branches.len(), 3);
    let trunk = &plant.branches[0];
    let side = &plant.branches[1];
    let cont = &plant.branches[2];

    assert_eq!(side.start, trunk.end);
    assert_eq!(cont.start, trunk.end);
    assert_eq!(cont.direction(), Vec3::Y);
    assert_eq!(cont.radius_bottom, trunk.radius_top);
    assert!(side.direction().x > 0.0, "'+' turns toward +X: {:?}", side.direction());
}

#[test]
fn test_parameter_override() {
    let params = InterpParams {
        init_length: 7.0,
        init_width: 3.0,
        ..still_params()
    };
    let plant = run(params, "F(2.5,0.3)", 0);
    let seg = &plant.branches[0];
    assert_eq!(seg.start, Vec3::ZERO);
    assert_eq!(seg.end, Vec3::new(0.0, 2.5, 0.0));
    assert_eq!(seg.length(), 2.5);
    assert_eq!(seg.radius_bottom, 0.3);
}

#[test]
fn test_malformed_parameters_fall_back() {
    let bare = run(still_params(), "F+F", 0);
    assert_eq!(run(still_params(), "F(abc)+F", 0), bare);
    assert_eq!(run(still_params(), "F()+()F", 0), bare);
    assert_eq!(run(still_params(), "F+(x,1)F", 0), bare);

    // An unterminated list is skipped as ordinary characters.
    let open = run(still_params(), "F(1.5", 0);
    assert_eq!(open.branches.len(), 1);
    assert_eq!(open.branches[0].length(), 1.0);
}

#[test]
fn test_stray_close_bracket_is_noop() {
    let plant = run(InterpParams::default(), "F]F", 0);
    assert_eq!(plant.branches.len(), 2);
    assert_eq!(plant.branches[0].start, Vec3::ZERO);
    assert_eq!(plant.branches[0].direction(), Vec3::Y);
    assert_eq!(plant.branches[1].direction(), plant.branches[0].direction());
}

#[test]
fn test_deep_nesting_restores_exactly() {
    let params = InterpParams {
        width_decay: 1.0,
        ..still_params()
    };
    let input = "[F".repeat(1100) + "[F]F";
    let (plant, end) = PlantInterpreter::new(params)
        .interpret_with_state(&input, &mut SeededRng::default());

    assert_eq!(plant.branches.len(), 1102);
    let inner = &plant.branches[1100];
    let last = &plant.branches[1101];
    assert_eq!(inner.start, Vec3::new(0.0, 1100.0, 0.0));
    assert_eq!(last.start, Vec3::new(0.0, 1100.0, 0.0));
    assert_eq!(end.position, Vec3::new(0.0, 1101.0, 0.0));
}

fn heading_after(prefix: &str) -> Vec3 {
    let params = InterpParams {
        angle: 90.0,
        ..still_params()
    };
    let plant = run(params, &format!("{prefix}F"), 0);
    plant.branches[0].direction()
}

#[test]
fn test_yaw_signs() {
    assert!(heading_after("+").abs_diff_eq(Vec3::X, 1e-6));
    assert!(heading_after("-").abs_diff_eq(Vec3::NEG_X, 1e-6));
}

#[test]
fn test_pitch_signs() {
    assert!(heading_after("&").abs_diff_eq(Vec3::Z, 1e-6));
    assert!(heading_after("^").abs_diff_eq(Vec3::NEG_Z, 1e-6));
}

#[test]
fn test_roll_signs() {
    // Roll keeps the heading; a following pitch reveals which way the frame turned.
    assert!(heading_after("\\").abs_diff_eq(Vec3::Y, 1e-6));
    assert!(heading_after("/").abs_diff_eq(Vec3::Y, 1e-6));
    assert!(heading_after("\\&").abs_diff_eq(Vec3::X, 1e-6));
    assert!(heading_after("/&").abs_diff_eq(Vec3::NEG_X, 1e-6));
}

#[test]
fn test_jittered_angle_stays_within_variance() {
    let params = InterpParams {
        angle: 90.0,
        angle_variance: 10.0,
        gravity: 0.0,
        ..Default::default()
    };
    let interpreter = PlantInterpreter::new(params);
    for seed in 1..200 {
        let plant = interpreter.interpret("+F", &mut SeededRng::with_seed(seed));
        let dir = plant.branches[0].direction();
        let turned = dir.angle_between(Vec3::Y).to_degrees();
        assert!(dir.x > 0.0, "seed {seed}: {dir:?}");
        assert!((80.0 - 1e-3..=100.0 + 1e-3).contains(&turned), "seed {seed}: {turned}");
    }
}

#[test]
fn test_trailing_push_is_harmless() {
    let plant = run(still_params(), "F[[F", 0);
    assert_eq!(plant.branches.len(), 2);
}

#[test]
fn test_zero_gravity_is_pure_translation() {
    let plant = run(still_params(), "&(40)F+(70)F/(10)F", 0);
    for seg in &plant.branches {
        let heading = seg.rotation * Vec3::Y;
        assert!(seg.direction().abs_diff_eq(heading, 1e-6));
    }
    // Only the explicit turns change the heading.
    let tilted = Quat::from_axis_angle(Vec3::X, 40f32.to_radians()) * Vec3::Y;
    assert!(plant.branches[0].direction().abs_diff_eq(tilted, 1e-6));
}

#[test]
fn test_gravity_droops_thin_branches() {
    let params = InterpParams {
        angle_variance: 0.0,
        gravity: 5.0,
        ..Default::default()
    };
    let plant = run(params, "&(90)!(0.05)FFFF", 0);
    let first = plant.branches[0].direction();
    let last = plant.branches[3].direction();
    assert!(last.y < first.y, "first {first:?}, last {last:?}");
    for seg in &plant.branches {
        assert!((seg.rotation.length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn test_organs() {
    let params = InterpParams {
        flower_size: 1.5,
        leaf_size: 0.7,
        bud_size: 0.2,
        ..still_params()
    };
    let plant = run(params, "FKL(2)M(0)X(5)F", 0);
    assert_eq!(plant.flowers.len(), 1);
    assert_eq!(plant.leaves.len(), 1);
    assert_eq!(plant.buds.len(), 1);

    let tip = plant.branches[0].end;
    assert_eq!(plant.flowers[0].position, tip);
    assert_eq!(plant.flowers[0].scale, 1.5);
    assert_eq!(plant.leaves[0].scale, 2.0);
    assert_eq!(plant.buds[0].scale, 0.0);
    assert_eq!(plant.leaves[0].thickness, plant.branches[0].radius_top);

    // Organs do not move the turtle; unknown X(5) is consumed silently.
    assert_eq!(plant.branches[1].start, tip);
}

#[test]
fn test_turn_around() {
    let plant = run(still_params(), "F|F", 0);
    assert!(plant.branches[1].direction().abs_diff_eq(Vec3::NEG_Y, 1e-6));
    assert!(plant.branches[1].end.abs_diff_eq(Vec3::ZERO, 1e-6));
}

#[test]
fn test_preset_pipeline() {
    let preset = PlantPreset {
        generations: 4,
        seed: 42,
        ..Default::default()
    };
    let json = preset.to_json().unwrap();
    let loaded = PlantPreset::from_json(&json).unwrap();
    assert_eq!(loaded, preset);

    let a = preset.generate();
    let b = loaded.generate_bounded(10).unwrap();
    assert_eq!(a, b);

    let m = &a.metrics;
    assert_eq!(m.generations, 4);
    assert_eq!(m.string_length, a.symbols.len());
    assert_eq!(m.branch_segments, m.branch_count_f);
    assert_eq!(m.leaves, a.geometry.leaves.len());
    assert!(m.bracket_pushes > 0);
    assert!(m.max_branch_depth >= 1);
    assert!(m.bbox_height > 0.0);
}
