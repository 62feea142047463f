use std::convert::Infallible;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use valhalla::{Action, Actor, ActorProviding, Engine};

/// Engine that answers immediately, so only actor dispatch is measured.
struct ConstEngine;

impl Engine for ConstEngine {
    type Error = Infallible;

    fn route(&self, request: &str, _config_path: &str) -> Result<String, Infallible> {
        Ok(request.to_owned())
    }

    fn height(&self, request: &str, _config_path: &str) -> Result<String, Infallible> {
        Ok(request.to_owned())
    }
}

const ROUTE_REQUEST: &str = concat!(
    r#"{"locations":[{"lat":40.744014,"lon":-73.990508},{"lat":40.739735,"lon":-73.979713}],"#,
    r#""costing":"auto","directions_options":{"units":"miles"}}"#
);

fn bench_route(c: &mut Criterion) {
    let actor = Actor::new("/data/valhalla.json", ConstEngine);

    c.bench_function("route_passthrough", |b| {
        b.iter(|| black_box(actor.route(black_box(ROUTE_REQUEST)).unwrap()));
    });
}

fn bench_action_dispatch(c: &mut Criterion) {
    let actor = Actor::new("/data/valhalla.json", ConstEngine);

    c.bench_function("action_invoke", |b| {
        b.iter(|| {
            for action in Action::ALL {
                black_box(action.invoke(&actor, black_box(ROUTE_REQUEST)).unwrap());
            }
        });
    });
}

fn bench_large_request(c: &mut Criterion) {
    let actor = Actor::new("/data/valhalla.json", ConstEngine);
    let shape: Vec<String> = (0..10_000)
        .map(|i| format!(r#"{{"lat":{:.6},"lon":{:.6}}}"#, 40.0 + i as f64 * 1e-4, -73.0))
        .collect();
    let request = format!(r#"{{"range":true,"shape":[{}]}}"#, shape.join(","));

    c.bench_function("height_10k_points", |b| {
        b.iter(|| black_box(actor.height(black_box(&request)).unwrap()));
    });
}

criterion_group!(benches, bench_route, bench_action_dispatch, bench_large_request);
criterion_main!(benches);
