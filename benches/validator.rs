//! Benchmark for win-hand validation
//!
//! Measures HandValidator::is_winning_hand on winning, losing and
//! wildcard-heavy hands, plus validation of freshly dealt random hands.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use okey_engine::tiles::{build_set, lay_out, shuffle};
use okey_engine::{Color, GameRng, HandValidator, Tile, TileId};

fn hand(faces: &[(Color, u8)]) -> Vec<Tile> {
    faces
        .iter()
        .enumerate()
        .map(|(i, &(c, n))| Tile::new(TileId::new(i as u8), c, n))
        .collect()
}

fn winning() -> Vec<Tile> {
    use Color::{Black, Blue, Red};
    hand(&[
        (Red, 1), (Red, 2), (Red, 3), (Red, 4),
        (Black, 5), (Black, 6), (Black, 7),
        (Blue, 10), (Blue, 11), (Blue, 12), (Blue, 13),
        (Red, 8), (Black, 8), (Blue, 8),
    ])
}

fn bench_fixed_hands(c: &mut Criterion) {
    let validator = HandValidator::default();
    let mut group = c.benchmark_group("is_winning_hand");

    let valid = winning();
    let mut one_off = winning();
    one_off[13] = Tile::new(TileId::new(13), Color::Yellow, 11);
    let mut wild = winning();
    wild[1] = wild[1].as_wildcard();
    wild[9] = wild[9].as_wildcard();

    for (name, tiles) in [("valid", &valid), ("one_off", &one_off), ("two_wildcards", &wild)] {
        group.bench_with_input(BenchmarkId::from_parameter(name), tiles, |b, tiles| {
            b.iter(|| validator.is_winning_hand(black_box(tiles)))
        });
    }

    group.finish();
}

fn bench_dealt_hands(c: &mut Criterion) {
    let validator = HandValidator::default();
    let mut rng = GameRng::new(42);
    let hands: Vec<Vec<Tile>> = (0..64)
        .flat_map(|_| {
            let layout = lay_out(shuffle(&build_set(), &mut rng), 4, 14).unwrap();
            layout.hands
        })
        .collect();

    c.bench_function("dealt_hands_256", |b| {
        b.iter(|| {
            hands
                .iter()
                .filter(|h| validator.is_winning_hand(black_box(h)))
                .count()
        })
    });
}

criterion_group!(benches, bench_fixed_hands, bench_dealt_hands);
criterion_main!(benches);
