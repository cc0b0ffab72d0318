// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host wiring a [`MapSurface`] to reconciliation, presentation, and selection.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use understory_annotations::{AnnotationReconciler, PointStore, Reconciliation};
use understory_cluster::{
    AvatarStyle, ClusterPresenter, MarkerDescriptor, MarkerRequest, MarkerRole,
};

use crate::selection::{DEFAULT_ZOOM_SPAN, SelectionController, Transition};
use crate::surface::{Chrome, MapSurface, SurfaceConfig};
use crate::viewport::{Span, Viewport, ViewportError};

/// Configuration for a [`MapHost`].
#[derive(Clone, Debug, PartialEq)]
pub struct MapHostConfig {
    /// Region shown when the host is created.
    pub initial_viewport: Viewport,
    /// Chrome to show. Everything is hidden by default.
    pub chrome: Chrome,
    /// Avatar used by pins and under cluster bubbles.
    pub avatar: AvatarStyle,
    /// Span used when zooming into an activated cluster.
    pub zoom_span: Span,
}

impl Default for MapHostConfig {
    fn default() -> Self {
        Self {
            initial_viewport: Viewport::default(),
            chrome: Chrome::default(),
            avatar: AvatarStyle::default(),
            zoom_span: DEFAULT_ZOOM_SPAN,
        }
    }
}

type ViewportObserver = Box<dyn FnMut(&Viewport)>;

/// Owns a map surface and keeps it in step with the application.
///
/// - [`update`](Self::update) converges the surface's live annotations to a
///   [`PointStore`] snapshot, removing before adding.
/// - [`render`](Self::render) lets the surface regroup and present markers
///   through the host's [`ClusterPresenter`].
/// - [`activate`](Self::activate) and [`tap`](Self::tap) zoom into clusters.
///
/// Every region change goes through the host, so [`viewport`](Self::viewport)
/// always reflects the last region requested or reported.
pub struct MapHost<S> {
    surface: S,
    presenter: ClusterPresenter,
    selection: SelectionController,
    reconciler: AnnotationReconciler,
    viewport: Viewport,
    observer: Option<ViewportObserver>,
}

impl<S: fmt::Debug> fmt::Debug for MapHost<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapHost")
            .field("surface", &self.surface)
            .field("presenter", &self.presenter)
            .field("selection", &self.selection)
            .field("viewport", &self.viewport)
            .field("has_observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

impl<S: MapSurface> MapHost<S> {
    /// Configure `surface` and register both marker roles.
    pub fn new(mut surface: S, config: MapHostConfig) -> Self {
        surface.configure(&SurfaceConfig {
            viewport: config.initial_viewport,
            chrome: config.chrome,
        });
        for role in MarkerRole::ALL {
            surface.register_marker(role);
        }
        Self {
            surface,
            presenter: ClusterPresenter::new(config.avatar),
            selection: SelectionController::new(config.zoom_span),
            reconciler: AnnotationReconciler::new(),
            viewport: config.initial_viewport,
            observer: None,
        }
    }

    /// Like [`new`](Self::new), but reject an invalid initial viewport or zoom span.
    pub fn try_new(surface: S, config: MapHostConfig) -> Result<Self, ViewportError> {
        config.initial_viewport.validate()?;
        if !config.zoom_span.is_valid() {
            return Err(ViewportError::InvalidSpan(config.zoom_span));
        }
        Ok(Self::new(surface, config))
    }

    /// Converge the live annotations to `points`.
    ///
    /// Removals are applied before additions. Annotations whose id is in both
    /// sets are left untouched. Returns what was applied.
    pub fn update(&mut self, points: &PointStore) -> Reconciliation {
        let mut live = Vec::new();
        self.surface.visit_annotation_ids(|id| live.push(id));
        let diff = self.reconciler.reconcile(live, points);
        if !diff.to_remove.is_empty() {
            self.surface.remove_annotations(&diff.to_remove);
        }
        if !diff.to_add.is_empty() {
            self.surface.add_annotations(&diff.to_add);
        }
        tracing::debug!(
            removed = diff.to_remove.len(),
            added = diff.to_add.len(),
            live = points.len(),
            "updated annotations"
        );
        diff
    }

    /// Jump to `viewport`.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.change_region(viewport, Transition::Immediate);
    }

    /// Record a region change the surface made on its own, such as a user pan.
    pub fn region_did_change(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.notify();
    }

    /// Current region.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Call `observer` after every viewport change. Replaces any previous observer.
    pub fn set_viewport_observer(&mut self, observer: impl FnMut(&Viewport) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Stop notifying about viewport changes.
    pub fn clear_viewport_observer(&mut self) {
        self.observer = None;
    }

    /// Descriptor for one marker request.
    pub fn marker_for(&self, request: &MarkerRequest) -> MarkerDescriptor {
        self.presenter.present(request)
    }

    /// Let the surface regroup its annotations and present every marker.
    pub fn render(&mut self) {
        self.surface.render_markers(&self.presenter);
    }

    /// Handle activation of a marker. Returns whether the region changed.
    ///
    /// Clusters zoom onto their representative coordinate. Pins are ignored.
    pub fn activate(&mut self, request: &MarkerRequest) -> bool {
        let Some(change) = self.selection.activate(request) else {
            return false;
        };
        tracing::debug!(
            latitude = change.viewport.center.latitude,
            longitude = change.viewport.center.longitude,
            "zooming to cluster"
        );
        self.change_region(change.viewport, change.transition);
        true
    }

    /// Activate the marker under a screen-space point, if any.
    pub fn tap(&mut self, pt: Point) -> bool {
        match self.surface.marker_at(pt) {
            Some(request) => self.activate(&request),
            None => false,
        }
    }

    /// The presenter used for every marker.
    pub fn presenter(&self) -> &ClusterPresenter {
        &self.presenter
    }

    /// The hosted surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the hosted surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Give the surface back.
    pub fn into_surface(self) -> S {
        self.surface
    }

    fn change_region(&mut self, viewport: Viewport, transition: Transition) {
        self.surface.set_viewport(viewport, transition);
        self.viewport = viewport;
        self.notify();
    }

    fn notify(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.viewport);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;
    use understory_annotations::{Coordinate, GeoPoint, PointId};
    use understory_cluster::ClusterGroup;

    #[derive(Clone, Debug, PartialEq)]
    enum Op {
        Configure(SurfaceConfig),
        Register(MarkerRole),
        Remove(Vec<PointId>),
        Add(Vec<PointId>),
        SetViewport(Viewport, Transition),
    }

    #[derive(Debug, Default)]
    struct RecordingSurface {
        live: Vec<PointId>,
        viewport: Viewport,
        ops: Vec<Op>,
        rendered: Vec<MarkerDescriptor>,
    }

    impl MapSurface for RecordingSurface {
        fn configure(&mut self, config: &SurfaceConfig) {
            self.viewport = config.viewport;
            self.ops.push(Op::Configure(*config));
        }

        fn register_marker(&mut self, role: MarkerRole) {
            self.ops.push(Op::Register(role));
        }

        fn visit_annotation_ids<F: FnMut(PointId)>(&self, f: F) {
            self.live.iter().copied().for_each(f);
        }

        fn remove_annotations(&mut self, ids: &[PointId]) {
            self.live.retain(|id| !ids.contains(id));
            self.ops.push(Op::Remove(ids.to_vec()));
        }

        fn add_annotations(&mut self, points: &[GeoPoint]) {
            self.live.extend(points.iter().map(GeoPoint::id));
            self.ops.push(Op::Add(points.iter().map(GeoPoint::id).collect()));
        }

        fn set_viewport(&mut self, viewport: Viewport, transition: Transition) {
            self.viewport = viewport;
            self.ops.push(Op::SetViewport(viewport, transition));
        }

        fn viewport(&self) -> Viewport {
            self.viewport
        }

        fn render_markers(&mut self, presenter: &ClusterPresenter) {
            self.rendered = self
                .live
                .iter()
                .map(|id| {
                    let p = GeoPoint::new(*id, Coordinate::new(0.0, 0.0));
                    presenter.present(&MarkerRequest::Singleton(p))
                })
                .collect();
        }
    }

    fn store(ids: &[u128]) -> PointStore {
        ids.iter()
            .map(|id| GeoPoint::new(PointId(*id), Coordinate::new(0.0, 0.0)))
            .collect()
    }

    fn host() -> MapHost<RecordingSurface> {
        MapHost::new(RecordingSurface::default(), MapHostConfig::default())
    }

    #[test]
    fn creation_configures_and_registers_both_roles() {
        let h = host();
        assert_eq!(
            h.surface().ops,
            vec![
                Op::Configure(SurfaceConfig {
                    viewport: Viewport::default(),
                    chrome: Chrome::empty(),
                }),
                Op::Register(MarkerRole::Pin),
                Op::Register(MarkerRole::Cluster),
            ]
        );
    }

    #[test]
    fn update_removes_before_adding() {
        let mut h = host();
        h.update(&store(&[1, 2, 3]));
        h.surface_mut().ops.clear();

        let diff = h.update(&store(&[2, 3, 4]));
        assert_eq!(diff.to_remove, vec![PointId(1)]);
        assert_eq!(
            h.surface().ops,
            vec![Op::Remove(vec![PointId(1)]), Op::Add(vec![PointId(4)])]
        );
    }

    #[test]
    fn repeated_updates_never_duplicate() {
        let mut h = host();
        let snapshots: [&[u128]; 5] = [&[1, 2], &[2, 3], &[2, 3], &[], &[5, 5, 6]];
        for ids in snapshots {
            h.update(&store(ids));
            let mut live = h.surface().live.clone();
            live.sort();
            let before = live.len();
            live.dedup();
            assert_eq!(live.len(), before, "duplicate live annotation");
        }
        let second = h.update(&store(&[5, 6]));
        assert!(second.is_empty());
    }

    #[test]
    fn render_routes_through_presenter() {
        let mut h = host();
        h.update(&store(&[1, 2]));
        h.render();
        assert_eq!(h.surface().rendered.len(), 2);
        assert!(
            h.surface()
                .rendered
                .iter()
                .all(|d| d.role == MarkerRole::Pin)
        );
    }

    #[test]
    fn activating_cluster_zooms_and_notifies() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut h = host();
        let sink = seen.clone();
        h.set_viewport_observer(move |v| sink.borrow_mut().push(*v));

        let at = Coordinate::new(36.12, -115.17);
        let group = ClusterGroup::with_coordinate(vec![], at);
        assert!(h.activate(&MarkerRequest::Cluster(group)));

        let expected = Viewport::new(at, DEFAULT_ZOOM_SPAN);
        assert_eq!(h.viewport(), expected);
        assert_eq!(
            h.surface().ops.last(),
            Some(&Op::SetViewport(expected, Transition::Animated))
        );
        assert_eq!(*seen.borrow(), vec![expected]);
    }

    #[test]
    fn activating_pin_is_ignored() {
        let mut h = host();
        let before = h.viewport();
        let p = GeoPoint::new(PointId(1), Coordinate::new(1.0, 1.0));
        assert!(!h.activate(&MarkerRequest::Singleton(p)));
        assert_eq!(h.viewport(), before);
        assert!(!h.tap(Point::ORIGIN), "surface without hit testing");
    }

    #[test]
    fn external_and_reported_region_changes() {
        let count = Rc::new(RefCell::new(0));
        let mut h = host();
        let sink = count.clone();
        h.set_viewport_observer(move |_| *sink.borrow_mut() += 1);

        let v = Viewport::new(Coordinate::new(1.0, 2.0), Span::new(0.5, 0.5));
        h.set_viewport(v);
        assert_eq!(
            h.surface().ops.last(),
            Some(&Op::SetViewport(v, Transition::Immediate))
        );

        let panned = Viewport::new(Coordinate::new(1.1, 2.0), Span::new(0.5, 0.5));
        let ops_before = h.surface().ops.len();
        h.region_did_change(panned);
        assert_eq!(h.viewport(), panned);
        assert_eq!(h.surface().ops.len(), ops_before, "reported change is not echoed");
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn try_new_rejects_bad_config() {
        let config = MapHostConfig {
            zoom_span: Span::new(-1.0, 0.01),
            ..MapHostConfig::default()
        };
        assert!(matches!(
            MapHost::try_new(RecordingSurface::default(), config),
            Err(ViewportError::InvalidSpan(_))
        ));
    }
}
