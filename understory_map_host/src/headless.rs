// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A GUI-free [`MapSurface`] with a screen-space grid clusterer.
//!
//! Coordinates are projected linearly from the viewport onto a pixel surface
//! of the configured size. Visible annotations that fall into the same grid
//! cell are grouped into one cluster. Groups appear in the order of their
//! first member, so rendering is deterministic for a given live set.
//!
//! Removing an annotation retires every marker that shows it, and a region
//! change retires all markers, so taps never resolve to stale geometry.

use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use kurbo::{Point, Size};
use understory_annotations::{Coordinate, GeoPoint, LiveAnnotations, PointId};
use understory_cluster::{
    ClusterGroup, ClusterPresenter, MarkerDescriptor, MarkerRequest, MarkerRole, MarkerSlot,
    ReusePool,
};

use crate::selection::Transition;
use crate::surface::{Chrome, MapSurface, SurfaceConfig};
use crate::viewport::Viewport;

/// Default edge length of a clustering cell, in pixels.
pub const DEFAULT_CELL_SIZE: f64 = 64.0;

/// A marker currently on screen.
#[derive(Debug)]
pub struct DisplayedMarker {
    request: MarkerRequest,
    anchor: Point,
    slot: MarkerSlot<MarkerDescriptor>,
}

impl DisplayedMarker {
    /// What the marker shows.
    pub fn request(&self) -> &MarkerRequest {
        &self.request
    }

    /// Screen position of the marker's anchor.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Descriptor bound to the marker's slot.
    pub fn descriptor(&self) -> Option<&MarkerDescriptor> {
        self.slot.content()
    }

    /// Whether the marker shows any annotation in `ids`.
    fn shows_any(&self, ids: &HashSet<PointId>) -> bool {
        match &self.request {
            MarkerRequest::Singleton(p) => ids.contains(&p.id()),
            MarkerRequest::Cluster(g) => g.members().iter().any(|p| ids.contains(&p.id())),
        }
    }

    /// Whether a screen-space point falls on the marker.
    pub fn hit(&self, pt: Point) -> bool {
        self.descriptor()
            .is_some_and(|d| d.contains((pt - self.anchor).to_point()))
    }
}

/// Reference [`MapSurface`] that runs without a windowing toolkit.
#[derive(Debug)]
pub struct HeadlessSurface {
    annotations: LiveAnnotations,
    viewport: Viewport,
    size: Size,
    cell_size: f64,
    chrome: Chrome,
    pool: ReusePool<MarkerDescriptor>,
    displayed: Vec<DisplayedMarker>,
    last_transition: Option<Transition>,
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new(Size::new(390.0, 844.0))
    }
}

impl HeadlessSurface {
    /// Create an empty surface of `size` pixels.
    pub fn new(size: Size) -> Self {
        Self {
            annotations: LiveAnnotations::new(),
            viewport: Viewport::default(),
            size,
            cell_size: DEFAULT_CELL_SIZE,
            chrome: Chrome::default(),
            pool: ReusePool::new(),
            displayed: Vec::new(),
            last_transition: None,
        }
    }

    /// Use `cell_size` pixel cells for grouping.
    ///
    /// Non-positive or non-finite sizes keep the current value.
    #[must_use]
    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        if cell_size.is_finite() && cell_size > 0.0 {
            self.cell_size = cell_size;
        }
        self
    }

    /// Live annotations.
    pub fn annotations(&self) -> &LiveAnnotations {
        &self.annotations
    }

    /// Surface size in pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Chrome shown.
    pub fn chrome(&self) -> Chrome {
        self.chrome
    }

    /// Markers from the last render, in grouping order.
    pub fn markers(&self) -> &[DisplayedMarker] {
        &self.displayed
    }

    /// Transition used by the most recent viewport change.
    pub fn last_transition(&self) -> Option<Transition> {
        self.last_transition
    }

    /// Marker slots created so far. Stays flat when slots are reused.
    pub fn slots_created(&self) -> usize {
        self.pool.created()
    }

    /// Screen position of `c` in the current viewport.
    pub fn project(&self, c: Coordinate) -> Point {
        let v = &self.viewport;
        let x = (c.longitude - v.west()) / v.span.longitude_delta * self.size.width;
        let y = (v.north() - c.latitude) / v.span.latitude_delta * self.size.height;
        Point::new(x, y)
    }

    /// Recycle the slots of displayed markers matching `stale`.
    fn retire_markers(&mut self, mut stale: impl FnMut(&DisplayedMarker) -> bool) {
        let (retired, kept): (Vec<_>, Vec<_>) =
            core::mem::take(&mut self.displayed).into_iter().partition(|m| stale(m));
        self.displayed = kept;
        for marker in retired {
            self.pool.recycle(marker.slot);
        }
    }

    /// Group visible annotations by grid cell.
    fn group_visible(&self) -> Vec<MarkerRequest> {
        let mut cells: HashMap<(i32, i32), usize> = HashMap::new();
        let mut groups: Vec<Vec<GeoPoint>> = Vec::new();
        for (_, point) in self.annotations.iter() {
            if !self.viewport.contains(point.coordinate()) {
                continue;
            }
            let p = self.project(point.coordinate());
            let cell = (
                cell_coord(p.x, self.cell_size),
                cell_coord(p.y, self.cell_size),
            );
            let slot = *cells.entry(cell).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(point.clone());
        }
        groups
            .into_iter()
            .filter_map(|mut members| match members.len() {
                0 => None,
                1 => members.pop().map(MarkerRequest::Singleton),
                _ => Some(MarkerRequest::Cluster(ClusterGroup::new(members))),
            })
            .collect()
    }
}

impl MapSurface for HeadlessSurface {
    fn configure(&mut self, config: &SurfaceConfig) {
        self.viewport = config.viewport;
        self.chrome = config.chrome;
    }

    fn register_marker(&mut self, role: MarkerRole) {
        self.pool.register(role);
    }

    fn visit_annotation_ids<F: FnMut(PointId)>(&self, f: F) {
        self.annotations.ids().for_each(f);
    }

    fn remove_annotations(&mut self, ids: &[PointId]) {
        for id in ids {
            self.annotations.remove(*id);
        }
        let removed: HashSet<PointId> = ids.iter().copied().collect();
        self.retire_markers(|m| m.shows_any(&removed));
    }

    fn add_annotations(&mut self, points: &[GeoPoint]) {
        for point in points {
            self.annotations.insert(point.clone());
        }
    }

    fn set_viewport(&mut self, viewport: Viewport, transition: Transition) {
        self.viewport = viewport;
        self.last_transition = Some(transition);
        self.retire_markers(|_| true);
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn render_markers(&mut self, presenter: &ClusterPresenter) {
        self.retire_markers(|_| true);
        for request in self.group_visible() {
            let role = request.role();
            let Some(mut slot) = self.pool.dequeue(role) else {
                tracing::warn!(?role, "no marker registered for role; skipping");
                continue;
            };
            presenter.present_into(&mut slot, &request);
            let anchor = self.project(request.coordinate());
            self.displayed.push(DisplayedMarker {
                request,
                anchor,
                slot,
            });
        }
        tracing::trace!(
            markers = self.displayed.len(),
            annotations = self.annotations.len(),
            "rendered markers"
        );
    }

    fn marker_at(&self, pt: Point) -> Option<MarkerRequest> {
        self.displayed
            .iter()
            .rev()
            .find(|m| m.hit(pt))
            .map(|m| m.request.clone())
    }
}

/// Cell index of `value`, rounding toward negative infinity.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Cell indices are intentionally i32; out-of-range values are saturated."
)]
fn cell_coord(value: f64, cell_size: f64) -> i32 {
    let t = value / cell_size;
    let coord = t as i32;
    if t < 0.0 && f64::from(coord) > t {
        coord.saturating_sub(1)
    } else {
        coord
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MapHost, MapHostConfig};
    use crate::selection::DEFAULT_ZOOM_SPAN;
    use crate::viewport::Span;
    use kurbo::Vec2;
    use understory_annotations::PointStore;

    fn point(id: u128, title: &str, lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(PointId(id), Coordinate::new(lat, lon)).with_title(title)
    }

    fn snapshot() -> PointStore {
        [
            point(1, "Ann", 0.1, 0.1),
            point(2, "Bo", 0.12, 0.12),
            point(3, "Cy", -0.3, -0.3),
        ]
        .into_iter()
        .collect()
    }

    fn host() -> MapHost<HeadlessSurface> {
        let surface = HeadlessSurface::new(Size::new(100.0, 100.0)).with_cell_size(50.0);
        let config = MapHostConfig {
            initial_viewport: Viewport::new(Coordinate::new(0.0, 0.0), Span::new(1.0, 1.0)),
            ..MapHostConfig::default()
        };
        MapHost::new(surface, config)
    }

    #[test]
    fn cell_coord_rounds_down() {
        assert_eq!(cell_coord(0.0, 64.0), 0);
        assert_eq!(cell_coord(63.9, 64.0), 0);
        assert_eq!(cell_coord(64.0, 64.0), 1);
        assert_eq!(cell_coord(-0.5, 64.0), -1);
        assert_eq!(cell_coord(-64.0, 64.0), -1);
    }

    #[test]
    fn projection_maps_edges_to_surface_corners() {
        let h = host();
        let s = h.surface();
        assert_eq!(s.project(Coordinate::new(0.5, -0.5)), Point::new(0.0, 0.0));
        assert_eq!(s.project(Coordinate::new(-0.5, 0.5)), Point::new(100.0, 100.0));
    }

    #[test]
    fn nearby_points_cluster_and_split_after_zoom() {
        let mut h = host();
        h.update(&snapshot());
        h.render();

        let roles: Vec<_> = h.surface().markers().iter().map(|m| m.request().role()).collect();
        assert_eq!(roles, [MarkerRole::Cluster, MarkerRole::Pin]);
        let summary = h.surface().markers()[0]
            .descriptor()
            .and_then(MarkerDescriptor::summary)
            .expect("cluster marker is bound");
        assert_eq!(summary.labels(), ["A", "B"]);
        assert_eq!(summary.overflow(), 0);

        h.set_viewport(Viewport::new(Coordinate::new(0.11, 0.11), Span::new(0.1, 0.1)));
        h.render();
        let roles: Vec<_> = h.surface().markers().iter().map(|m| m.request().role()).collect();
        assert_eq!(roles, [MarkerRole::Pin, MarkerRole::Pin], "Cy is off screen");
    }

    #[test]
    fn slots_are_reused_across_renders() {
        let mut h = host();
        h.update(&snapshot());
        h.render();
        let created = h.surface().slots_created();
        h.render();
        h.render();
        assert_eq!(h.surface().slots_created(), created);
        assert!(h.surface().markers().iter().all(|m| m.descriptor().is_some()));
    }

    #[test]
    fn tap_on_cluster_zooms_to_it() {
        let mut h = host();
        h.update(&snapshot());
        h.render();

        let cluster = &h.surface().markers()[0];
        let center = match cluster.request() {
            MarkerRequest::Cluster(g) => g.coordinate(),
            MarkerRequest::Singleton(_) => panic!("first marker is the cluster"),
        };
        // Middle of the capsule, above the anchor.
        let tap = cluster.anchor() + Vec2::new(0.0, -25.0);

        assert!(h.tap(tap));
        assert_eq!(h.viewport(), Viewport::new(center, DEFAULT_ZOOM_SPAN));
        assert_eq!(h.surface().last_transition(), Some(Transition::Animated));
    }

    #[test]
    fn tap_on_pin_or_empty_space_is_ignored() {
        let mut h = host();
        h.update(&snapshot());
        h.render();
        let before = h.viewport();

        let pin = h.surface().markers()[1].anchor();
        assert!(!h.tap(pin));
        assert!(!h.tap(Point::new(-500.0, -500.0)));
        assert_eq!(h.viewport(), before);
    }

    #[test]
    fn unregistered_role_is_skipped() {
        let mut s = HeadlessSurface::new(Size::new(100.0, 100.0)).with_cell_size(50.0);
        s.configure(&SurfaceConfig {
            viewport: Viewport::new(Coordinate::new(0.0, 0.0), Span::new(1.0, 1.0)),
            chrome: Chrome::empty(),
        });
        s.register_marker(MarkerRole::Pin);
        s.add_annotations(snapshot().as_slice());
        s.render_markers(&ClusterPresenter::default());
        assert_eq!(s.markers().len(), 1);
        assert_eq!(s.markers()[0].request().role(), MarkerRole::Pin);
    }

    #[test]
    fn removed_annotations_disappear_from_markers() {
        let mut h = host();
        h.update(&snapshot());
        h.update(&[point(3, "Cy", -0.3, -0.3)].into_iter().collect());
        h.render();
        assert_eq!(h.surface().annotations().len(), 1);
        assert_eq!(h.surface().markers().len(), 1);
        assert!(h.surface().annotations().contains(PointId(3)));
    }

    #[test]
    fn tap_on_removed_cluster_is_ignored() {
        let mut h = host();
        h.update(&snapshot());
        h.render();
        let bubble = h.surface().markers()[0].anchor() + Vec2::new(0.0, -25.0);
        let before = h.viewport();

        h.update(&PointStore::new());
        assert!(h.surface().annotations().is_empty());
        assert!(h.surface().markers().is_empty(), "markers outlived their annotations");
        assert!(!h.tap(bubble));
        assert_eq!(h.viewport(), before);
    }

    #[test]
    fn removing_one_member_retires_only_its_markers() {
        let mut h = host();
        h.update(&snapshot());
        h.render();

        // Drop Bo: the Ann+Bo cluster goes, the Cy pin stays.
        h.update(&[point(1, "Ann", 0.1, 0.1), point(3, "Cy", -0.3, -0.3)].into_iter().collect());
        let shown: Vec<_> = h.surface().markers().iter().map(|m| m.request().role()).collect();
        assert_eq!(shown, [MarkerRole::Pin]);
        assert_eq!(h.surface().markers()[0].request().coordinate(), Coordinate::new(-0.3, -0.3));

        h.render();
        let roles: Vec<_> = h.surface().markers().iter().map(|m| m.request().role()).collect();
        assert_eq!(roles, [MarkerRole::Pin, MarkerRole::Pin]);
    }

    #[test]
    fn region_change_retires_markers_until_next_render() {
        let mut h = host();
        h.update(&snapshot());
        h.render();
        let created = h.surface().slots_created();
        let old_pin = h.surface().markers()[1].anchor();

        h.set_viewport(Viewport::new(Coordinate::new(0.05, 0.05), Span::new(1.0, 1.0)));
        assert!(h.surface().markers().is_empty());
        assert!(h.surface().marker_at(old_pin).is_none());

        h.render();
        let pin = h.surface().markers()[1].anchor();
        assert_ne!(pin, old_pin, "anchors follow the new projection");
        assert_eq!(h.surface().slots_created(), created);
    }
}
