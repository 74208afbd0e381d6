use jostle::jitter::XorShift64Star;
use jostle::{Error, Item, snap_to_grid};

fn random_items(seed: u64, n: usize) -> Vec<Item> {
    let mut rng = XorShift64Star::new(seed);
    (0..n)
        .map(|_| {
            Item::new(
                rng.next_f64_range(-50.0, 50.0),
                rng.next_f64_range(-50.0, 50.0),
                rng.next_f64_range(0.5, 12.0),
                rng.next_f64_range(0.5, 12.0),
            )
        })
        .collect()
}

fn is_multiple_of(value: f64, cell: f64) -> bool {
    let k = value / cell;
    (k - k.round()).abs() < 1e-9
}

#[test]
fn snap_to_grid_is_idempotent() {
    for (seed, cell) in [(1, 1.0), (2, 0.25), (3, 5.0), (4, 3.7)] {
        let mut items = random_items(seed, 40);
        snap_to_grid(&mut items, cell).unwrap();
        let once = items.clone();
        snap_to_grid(&mut items, cell).unwrap();
        for (a, b) in once.iter().zip(&items) {
            assert!(
                (a.position - b.position).length() < 1e-9,
                "second snap moved {:?} to {:?} (cell {cell})",
                a.position,
                b.position
            );
        }
    }
}

#[test]
fn snap_to_grid_aligns_top_left_corners() {
    for (seed, cell) in [(5, 1.0), (6, 0.5), (7, 8.0)] {
        let mut items = random_items(seed, 40);
        let sizes: Vec<_> = items.iter().map(|it| it.size).collect();
        snap_to_grid(&mut items, cell).unwrap();
        for (item, size) in items.iter().zip(sizes) {
            let tl = item.top_left();
            assert!(is_multiple_of(tl.x, cell), "x {} not on grid {cell}", tl.x);
            assert!(is_multiple_of(tl.y, cell), "y {} not on grid {cell}", tl.y);
            assert_eq!(item.size, size);
        }
    }
}

#[test]
fn snap_to_grid_rounds_half_cells_up_for_positive_corners() {
    // top-left (2.5, 0.5)
    let mut items = vec![Item::new(3.0, 1.0, 1.0, 1.0)];
    snap_to_grid(&mut items, 1.0).unwrap();
    assert_eq!(items[0].top_left(), jostle::geom::point(3.0, 1.0));
}

#[test]
fn snap_to_grid_rounds_negative_half_cells_up() {
    // top-left (-0.5, -0.5) goes to (0, 0), never to (-1, -1)
    let mut items = vec![Item::new(0.0, 0.0, 1.0, 1.0), Item::new(-2.0, 0.0, 3.0, 1.0)];
    snap_to_grid(&mut items, 1.0).unwrap();
    assert_eq!(items[0].position, jostle::geom::point(0.5, 0.5));
    // top-left (-3.5, -0.5) goes to (-3, 0)
    assert_eq!(items[1].position, jostle::geom::point(-1.5, 0.5));
}

#[test]
fn snap_to_grid_rejects_invalid_cells_without_moving_items() {
    let mut items = random_items(8, 5);
    let before = items.clone();
    for cell in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            snap_to_grid(&mut items, cell),
            Err(Error::InvalidGridSize { .. })
        ));
    }
    assert_eq!(items, before);
}

#[test]
fn snap_to_grid_on_empty_slice_is_a_no_op() {
    let mut items: Vec<Item> = Vec::new();
    snap_to_grid(&mut items, 1.0).unwrap();
    assert!(items.is_empty());
}
