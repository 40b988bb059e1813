//! Render instrumentation counters.
//!
//! Counters are shared across render threads and only ever incremented, so they use
//! relaxed atomics. Nothing in the tracing path reads them back.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Running tallies for one render.
#[derive(Debug, Default)]
pub struct RenderStats {
    primary_rays: AtomicU64,
    triangle_tests: AtomicU64,
    triangle_hits: AtomicU64,
    bbox_hits: AtomicU64,
    object_hits: AtomicU64,
}

impl RenderStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_primary_ray(&self) {
        self.primary_rays.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_triangle_test(&self) {
        self.triangle_tests.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_triangle_hit(&self) {
        self.triangle_hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_bbox_hit(&self) {
        self.bbox_hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_object_hit(&self) {
        self.object_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy the current counter values.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            primary_rays: self.primary_rays.load(Ordering::Relaxed),
            triangle_tests: self.triangle_tests.load(Ordering::Relaxed),
            triangle_hits: self.triangle_hits.load(Ordering::Relaxed),
            bbox_hits: self.bbox_hits.load(Ordering::Relaxed),
            object_hits: self.object_hits.load(Ordering::Relaxed),
        }
    }
}

/// Plain copy of [`RenderStats`] at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub primary_rays: u64,
    pub triangle_tests: u64,
    pub triangle_hits: u64,
    pub bbox_hits: u64,
    pub object_hits: u64,
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Primary rays                : {}", self.primary_rays)?;
        writeln!(f, "Ray-triangle tests          : {}", self.triangle_tests)?;
        writeln!(f, "Ray-triangle intersections  : {}", self.triangle_hits)?;
        writeln!(f, "Bounding volume hits        : {}", self.bbox_hits)?;
        write!(f, "Object intersections        : {}", self.object_hits)
    }
}
