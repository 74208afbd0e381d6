use jostle::geom::point;
use jostle::{
    ForceMap, Item, NoJitter, SeededJitter, SeparationMethod, SeparationParams, apply_forces,
    separate,
};

fn displacement(before: &Item, after: &Item) -> f64 {
    (after.position - before.position).length()
}

#[test]
fn coincident_pair_separates_by_at_least_the_margin() {
    let mut items = vec![Item::new(0.0, 0.0, 2.0, 2.0), Item::new(0.0, 0.0, 2.0, 2.0)];
    let forces = separate(&items, &SeparationParams::axis(0.5), &mut NoJitter);
    assert!(apply_forces(forces, &mut items));

    let d = items[1].position - items[0].position;
    assert!(
        d.x.abs() >= 0.5 || d.y.abs() >= 0.5,
        "centers only {d:?} apart"
    );
    // Equal overlap on both axes resolves along x, lower index toward negative.
    assert!(items[0].position.x < 0.0);
    assert!(items[1].position.x > 0.0);
    assert_eq!(items[0].position.y, 0.0);
}

#[test]
fn axis_method_is_deterministic_for_identical_items() {
    let start = vec![Item::new(1.0, 1.0, 3.0, 2.0); 3];
    let run = || {
        let mut items = start.clone();
        for _ in 0..5 {
            let forces = separate(&items, &SeparationParams::axis(0.25), &mut NoJitter);
            apply_forces(forces, &mut items);
        }
        items
    };
    let a = run();
    let b = run();
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.position.x.to_bits(), y.position.x.to_bits());
        assert_eq!(x.position.y.to_bits(), y.position.y.to_bits());
    }
    // y overlap is the smaller one; the first item goes negative, the last positive.
    assert!(a[0].position.y < 1.0);
    assert!(a[2].position.y > 1.0);
    assert!(a.iter().all(|it| it.position.x == 1.0));
}

#[test]
fn smaller_item_moves_at_least_as_far_as_larger_one() {
    for method in [SeparationMethod::Axis, SeparationMethod::Radial] {
        let before = vec![Item::new(0.0, 0.0, 6.0, 4.0), Item::new(1.0, 0.5, 1.0, 1.0)];
        let mut items = before.clone();
        let params = SeparationParams {
            margin: 0.5,
            method,
            ..Default::default()
        };
        let forces = separate(&items, &params, &mut NoJitter);
        apply_forces(forces, &mut items);

        let big = displacement(&before[0], &items[0]);
        let small = displacement(&before[1], &items[1]);
        assert!(small > 0.0, "{method:?}: small item did not move");
        assert!(small >= big, "{method:?}: small moved {small}, big moved {big}");
    }
}

#[test]
fn strength_scales_every_push() {
    let items = vec![Item::new(0.0, 0.0, 2.0, 2.0), Item::new(1.0, 0.0, 2.0, 2.0)];
    let full = separate(&items, &SeparationParams::axis(0.0), &mut NoJitter);
    let half = separate(
        &items,
        &SeparationParams {
            strength: 0.5,
            ..SeparationParams::axis(0.0)
        },
        &mut NoJitter,
    );
    for i in 0..items.len() {
        let f = full.get(i).unwrap();
        let h = half.get(i).unwrap();
        assert!((f * 0.5 - h).length() < 1e-12);
    }
}

#[test]
fn fewer_than_two_items_produce_no_forces() {
    let empty: Vec<Item> = Vec::new();
    assert!(separate(&empty, &SeparationParams::radial(1.0), &mut NoJitter).has_no_entries());

    let one = vec![Item::new(0.0, 0.0, 1.0, 1.0)];
    let forces = separate(&one, &SeparationParams::radial(1.0), &mut NoJitter);
    assert!(forces.has_no_entries());
    assert_eq!(forces.slot_count(), 1);
}

#[test]
fn radial_coincident_items_never_produce_nan() {
    let mut items = vec![Item::new(3.0, 3.0, 1.0, 2.0); 4];
    let mut jitter = SeededJitter::new(11);
    for _ in 0..10 {
        let forces = separate(&items, &SeparationParams::radial(0.5), &mut jitter);
        apply_forces(forces, &mut items);
    }
    for item in &items {
        assert!(item.position.x.is_finite() && item.position.y.is_finite());
    }
    let distinct = items
        .iter()
        .enumerate()
        .all(|(i, a)| items[i + 1..].iter().all(|b| a.position != b.position));
    assert!(distinct, "coincident items were not pulled apart: {items:?}");
}

#[test]
fn forces_are_read_against_one_snapshot() {
    // The middle item is pushed by both neighbours; with a shared snapshot the pushes cancel.
    let mut items = vec![
        Item::new(-1.5, 0.0, 2.0, 2.0),
        Item::new(0.0, 0.0, 2.0, 2.0),
        Item::new(1.5, 0.0, 2.0, 2.0),
    ];
    let forces: ForceMap = separate(&items, &SeparationParams::axis(0.0), &mut NoJitter);
    apply_forces(forces, &mut items);
    assert_eq!(items[1].position, point(0.0, 0.0));
    assert!(items[0].position.x < -1.5);
    assert!(items[2].position.x > 1.5);
}
