//! Guidance grid generation.
//!
//! An AB-line defines a family of parallel tracks. Tracks are indexed by
//! their lateral offset from the world origin: track `i` passes through
//! `i * spacing * lateral_axis(heading)` and runs along
//! `travel_direction(heading)`. The machine occupies the track whose index
//! is nearest to its own lateral offset.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use fieldguide_core::{lateral_axis, travel_direction, ABLine, GuidanceConfig, Point};
use tracing::{debug, trace, warn};

/// Styling class of a generated track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackClass {
    /// The pass the machine currently occupies.
    Active,
    /// One of the next few passes on the positive side of the active one.
    NextUp,
    Background,
}

/// One parallel guidance line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub index: i32,
    /// Point on the track at zero travel distance.
    pub origin: Point,
    pub start: Point,
    pub end: Point,
    pub class: TrackClass,
}

/// Parameters controlling which tracks are produced and how far they reach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    pub window: i32,
    pub half_length: f64,
    pub next_up_count: i32,
}

impl GridParams {
    pub fn from_config(config: &GuidanceConfig) -> Self {
        Self {
            window: config.track_window.max(0),
            half_length: config.track_half_length,
            next_up_count: config.next_up_count.max(0),
        }
    }
}

impl Default for GridParams {
    fn default() -> Self {
        Self::from_config(&GuidanceConfig::default())
    }
}

/// Classifies `index` relative to the machine's current track.
pub fn classify(index: i32, current: i32, next_up_count: i32) -> TrackClass {
    if index == current {
        TrackClass::Active
    } else if index > current && index <= current.saturating_add(next_up_count) {
        TrackClass::NextUp
    } else {
        TrackClass::Background
    }
}

/// Index of the track nearest to `machine`.
///
/// Ties round half away from zero: with spacing 10 a machine at x = 5 is on
/// track 1 and one at x = -5 is on track -1. A non-positive spacing breaks
/// the AB-line contract; the result is then 0.
pub fn current_track_index(heading_deg: f64, spacing: f64, machine: Point) -> i32 {
    if !(spacing.is_finite() && spacing > 0.0) {
        return 0;
    }
    let lateral = machine.dot(&lateral_axis(heading_deg));
    // `as` saturates for out-of-range floats and maps NaN to 0
    (lateral / spacing).round() as i32
}

/// Origin of track `index` (its point at zero travel distance).
pub fn track_origin(heading_deg: f64, spacing: f64, index: i32) -> Point {
    lateral_axis(heading_deg) * (f64::from(index) * spacing)
}

/// The tracks for one AB-line and machine position.
#[derive(Debug, Clone, Default)]
pub struct GuidanceGrid {
    current_index: i32,
    tracks: Vec<Track>,
}

impl GuidanceGrid {
    /// Generates tracks `-window..=window`, classified around the machine's
    /// current track.
    pub fn generate(line: &ABLine, machine: Point, params: &GridParams) -> Self {
        if !line.has_valid_spacing() {
            warn!(
                "AB-line {} has non-positive spacing {}; no tracks generated",
                line.id, line.spacing
            );
            return Self::default();
        }

        let current = current_track_index(line.heading, line.spacing, machine);
        let direction = travel_direction(line.heading);
        let reach = direction * params.half_length;

        let tracks: Vec<Track> = (-params.window..=params.window)
            .map(|index| {
                let origin = track_origin(line.heading, line.spacing, index);
                Track {
                    index,
                    origin,
                    start: origin - reach,
                    end: origin + reach,
                    class: classify(index, current, params.next_up_count),
                }
            })
            .collect();

        trace!(
            "Generated {} tracks, current index {} (heading {:.1})",
            tracks.len(),
            current,
            line.heading
        );

        Self {
            current_index: current,
            tracks,
        }
    }

    pub fn current_index(&self) -> i32 {
        self.current_index
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// The track the machine occupies, if it falls inside the window.
    pub fn active(&self) -> Option<&Track> {
        self.tracks.iter().find(|t| t.class == TrackClass::Active)
    }
}

/// Keeps the last generated grid and rebuilds it only when its inputs
/// change.
#[derive(Debug, Default, Clone)]
pub struct TrackCache {
    content_hash: Option<u64>,
    grid: GuidanceGrid,
}

impl TrackCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn hash_inputs(line: &ABLine, machine: Point, params: &GridParams) -> u64 {
        let mut hasher = DefaultHasher::new();
        line.heading.to_bits().hash(&mut hasher);
        line.spacing.to_bits().hash(&mut hasher);
        // The grid only depends on the machine through its track index
        current_track_index(line.heading, line.spacing, machine).hash(&mut hasher);
        params.window.hash(&mut hasher);
        params.half_length.to_bits().hash(&mut hasher);
        params.next_up_count.hash(&mut hasher);
        hasher.finish()
    }

    pub fn needs_update(&self, line: &ABLine, machine: Point, params: &GridParams) -> bool {
        self.content_hash != Some(Self::hash_inputs(line, machine, params))
    }

    /// Returns the grid for these inputs, regenerating only on change.
    pub fn get(&mut self, line: &ABLine, machine: Point, params: &GridParams) -> &GuidanceGrid {
        let hash = Self::hash_inputs(line, machine, params);
        if self.content_hash != Some(hash) {
            debug!("Rebuilding guidance grid for AB-line {}", line.id);
            self.grid = GuidanceGrid::generate(line, machine, params);
            self.content_hash = Some(hash);
        }
        &self.grid
    }

    pub fn invalidate(&mut self) {
        self.content_hash = None;
    }
}
