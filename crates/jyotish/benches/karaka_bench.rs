use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jyotish::ephemeris::{FixedEphemeris, NodeConvention};
use jyotish::vedic::{rank_chara_karakas, whole_sign_houses, SiderealLongitudes};
use jyotish::{compute_chart, Planet};

fn bench_rank_chara_karakas(c: &mut Criterion) {
    let longitudes = SiderealLongitudes::new([15.0, 200.0, 95.0, 10.0, 340.0, 75.0, 260.0, 100.0]);

    c.bench_function("rank_chara_karakas", |b| {
        b.iter(|| rank_chara_karakas(black_box(&longitudes)))
    });

    c.bench_function("whole_sign_houses", |b| {
        b.iter(|| whole_sign_houses(black_box(&longitudes), black_box(132.5)))
    });
}

fn bench_compute_chart(c: &mut Criterion) {
    let eph = FixedEphemeris::from_longitudes(&[
        (Planet::Sun, 15.0),
        (Planet::Moon, 200.0),
        (Planet::Mars, 95.0),
        (Planet::Mercury, 10.0),
        (Planet::Jupiter, 340.0),
        (Planet::Venus, 75.0),
        (Planet::Saturn, 260.0),
        (Planet::Rahu, 100.0),
    ])
    .with_ascendant(132.5);

    c.bench_function("compute_chart_fixed", |b| {
        b.iter(|| {
            compute_chart(
                &eph,
                black_box(2_451_545.0),
                black_box(46.05),
                black_box(14.5),
                NodeConvention::True,
            )
        })
    });
}

criterion_group!(benches, bench_rank_chara_karakas, bench_compute_chart);
criterion_main!(benches);
