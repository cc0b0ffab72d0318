// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clustered map on a headless surface.
//!
//! Generates a few dozen points around a fixed center, renders them as pins
//! and cluster bubbles, taps the first cluster to zoom in, then refreshes the
//! point list.
//!
//! Run:
//! - `cargo run -p understory_demos --example clustered_map`

use anyhow::{Context, Result};
use kurbo::{Size, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use understory_annotations::{Coordinate, GeoPoint, PointId, PointStore};
use understory_cluster::{MarkerRequest, MarkerVisual};
use understory_map_host::{HeadlessSurface, MapHost, MapHostConfig, Span, Viewport};

const NAMES: &[&str] = &[
    "Ava", "Ben", "Cleo", "Dev", "Eli", "Fay", "Gus", "Hana", "Ivo", "Jun", "Kai", "Lena", "Milo",
    "Nia", "Omar", "Pia", "",
];

/// Produces points scattered north-east of a center.
struct LocationGenerator {
    rng: StdRng,
    center: Coordinate,
    next_id: u128,
}

impl LocationGenerator {
    fn new(seed: u64, center: Coordinate) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            center,
            next_id: 1,
        }
    }

    fn point(&mut self) -> GeoPoint {
        let lat = self.center.latitude + self.rng.gen_range(-0.01..0.02);
        let lon = self.center.longitude + self.rng.gen_range(-0.01..0.02);
        let title = NAMES[self.rng.gen_range(0..NAMES.len())];
        let id = PointId(self.next_id);
        self.next_id += 1;
        GeoPoint::new(id, Coordinate::new(lat, lon)).with_title(title)
    }

    fn points(&mut self, n: usize) -> Vec<GeoPoint> {
        (0..n).map(|_| self.point()).collect()
    }
}

fn describe(host: &MapHost<HeadlessSurface>) {
    let v = host.viewport();
    println!(
        "viewport {:.4},{:.4} span {:.3}",
        v.center.latitude, v.center.longitude, v.span.latitude_delta
    );
    for marker in host.surface().markers() {
        let Some(d) = marker.descriptor() else {
            continue;
        };
        let at = marker.anchor();
        match &d.visual {
            MarkerVisual::Pin { .. } => println!("  pin     @ ({:>5.1}, {:>5.1})", at.x, at.y),
            MarkerVisual::Cluster { summary, .. } => println!(
                "  cluster @ ({:>5.1}, {:>5.1}) {:?} {}",
                at.x,
                at.y,
                summary.labels(),
                summary.overflow_badge().unwrap_or_default()
            ),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let center = Coordinate::try_new(36.1147, -115.1728)?;
    let config = MapHostConfig {
        initial_viewport: Viewport::try_new(center, Span::new(0.05, 0.05))?,
        ..MapHostConfig::default()
    };
    let mut host = MapHost::try_new(HeadlessSurface::new(Size::new(390.0, 844.0)), config)?;

    let mut generator = LocationGenerator::new(7, center);
    let mut points = generator.points(30);
    host.update(&points.iter().cloned().collect::<PointStore>());
    host.render();
    describe(&host);

    let tap = host
        .surface()
        .markers()
        .iter()
        .find(|m| matches!(m.request(), MarkerRequest::Cluster(_)))
        .map(|m| m.anchor() + Vec2::new(0.0, -25.0))
        .context("no clusters at the initial zoom level")?;
    host.tap(tap);
    host.render();
    describe(&host);

    // Drop a third of the points and add a few new ones.
    points.drain(..10);
    points.extend(generator.points(5));
    let diff = host.update(&points.into_iter().collect());
    println!(
        "refresh: -{} +{}",
        diff.to_remove.len(),
        diff.to_add.len()
    );
    host.render();
    describe(&host);

    Ok(())
}
