//! Tracker catalogue and the fixed set of trackers run on every frame

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::bbox::Bbox;
use crate::error::{Result, TrackError};

/// Anything the trackers can run on
pub trait Frame {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// Common interface for single-target visual trackers
///
/// Implementations wrap an external algorithm. The tracker state is created
/// once from the first frame and mutated in place by every `update`.
pub trait VisualTracker<F: Frame> {
    /// Seed the tracker with the region of interest.
    /// Returns false when the algorithm refuses the region.
    fn init(&mut self, frame: &F, roi: Bbox) -> Result<bool>;

    /// Locate the region in a new frame, `None` when the tracker lost it
    fn update(&mut self, frame: &F) -> Result<Option<Bbox>>;
}

/// Available tracking algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TrackerKind {
    Boosting,
    Mil,
    Kcf,
    Tld,
    MedianFlow,
    Mosse,
    Csrt,
}

impl TrackerKind {
    /// Running every tracker drops the loop to a couple of frames per
    /// second, so only the fast pair is enabled by default.
    pub const DEFAULT_SET: [TrackerKind; 2] = [TrackerKind::Kcf, TrackerKind::Mosse];

    pub fn all() -> Vec<Self> {
        vec![
            Self::Boosting,
            Self::Mil,
            Self::Kcf,
            Self::Tld,
            Self::MedianFlow,
            Self::Mosse,
            Self::Csrt,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Boosting => "boosting",
            Self::Mil => "MIL",
            Self::Kcf => "KCF",
            Self::Tld => "TLD",
            Self::MedianFlow => "MedianFlow",
            Self::Mosse => "MOSSE",
            Self::Csrt => "CSRT",
        }
    }

    /// Overlay color in BGR channel order
    pub fn color(&self) -> [u8; 3] {
        match self {
            Self::Boosting => [255, 0, 0],
            Self::Mil => [0, 255, 0],
            Self::Kcf => [0, 0, 255],
            Self::Tld => [255, 255, 0],
            Self::MedianFlow => [255, 0, 255],
            Self::Mosse => [0, 255, 255],
            Self::Csrt => [255, 255, 255],
        }
    }
}

impl fmt::Display for TrackerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TrackerKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::all().iter().map(|k| k.name()).collect();
                format!("unknown tracker '{}', expected one of {}", wanted, known.join(", "))
            })
    }
}

impl TryFrom<String> for TrackerKind {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TrackerKind> for String {
    fn from(kind: TrackerKind) -> Self {
        kind.name().to_string()
    }
}

/// Box produced by one tracker for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackResult {
    pub kind: TrackerKind,
    pub bbox: Bbox,
}

/// Ordered set of named trackers, fixed once built
pub struct TrackerSet<F: Frame> {
    entries: Vec<(TrackerKind, Box<dyn VisualTracker<F>>)>,
}

impl<F: Frame> TrackerSet<F> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a tracker. A kind that is already present keeps its first instance.
    pub fn insert(&mut self, kind: TrackerKind, tracker: Box<dyn VisualTracker<F>>) -> bool {
        if self.contains(kind) {
            log::warn!("Tracker {} configured twice, keeping the first one", kind);
            return false;
        }
        self.entries.push((kind, tracker));
        true
    }

    pub fn contains(&self, kind: TrackerKind) -> bool {
        self.entries.iter().any(|(k, _)| *k == kind)
    }

    pub fn kinds(&self) -> Vec<TrackerKind> {
        self.entries.iter().map(|(k, _)| *k).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Seed every tracker with the same region of interest
    pub fn initialize(&mut self, frame: &F, roi: Bbox) -> Result<()> {
        for (kind, tracker) in self.entries.iter_mut() {
            let accepted = tracker.init(frame, roi).map_err(|e| {
                log::error!("{} tracker init failed: {}", kind, e);
                TrackError::TrackerInit {
                    name: kind.name().to_string(),
                }
            })?;
            if !accepted {
                return Err(TrackError::TrackerInit {
                    name: kind.name().to_string(),
                });
            }
            log::debug!("Initialized {} tracker with {}", kind, roi);
        }
        Ok(())
    }

    /// Run every tracker on the frame and keep the ones that found the target
    pub fn update(&mut self, frame: &F) -> Vec<TrackResult> {
        let mut results = Vec::with_capacity(self.entries.len());
        for (kind, tracker) in self.entries.iter_mut() {
            match tracker.update(frame) {
                Ok(Some(bbox)) => results.push(TrackResult { kind: *kind, bbox }),
                Ok(None) => log::trace!("{} lost the target", kind),
                Err(e) => log::warn!("{} update failed: {}", kind, e),
            }
        }
        results
    }
}

impl<F: Frame> Default for TrackerSet<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;

    pub struct TestFrame {
        pub width: u32,
        pub height: u32,
    }

    impl Frame for TestFrame {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }
    }

    /// Tracker that replays a scripted sequence of outcomes
    pub struct ScriptedTracker {
        pub accept_init: bool,
        pub outcomes: VecDeque<Result<Option<Bbox>>>,
    }

    impl ScriptedTracker {
        pub fn new(outcomes: Vec<Option<Bbox>>) -> Self {
            Self {
                accept_init: true,
                outcomes: outcomes.into_iter().map(Ok).collect(),
            }
        }
    }

    impl VisualTracker<TestFrame> for ScriptedTracker {
        fn init(&mut self, _frame: &TestFrame, _roi: Bbox) -> Result<bool> {
            Ok(self.accept_init)
        }

        fn update(&mut self, _frame: &TestFrame) -> Result<Option<Bbox>> {
            self.outcomes.pop_front().unwrap_or(Ok(None))
        }
    }

    fn frame() -> TestFrame {
        TestFrame {
            width: 100,
            height: 100,
        }
    }

    #[test]
    fn test_kind_parse_is_case_insensitive() {
        assert_eq!("kcf".parse::<TrackerKind>().unwrap(), TrackerKind::Kcf);
        assert_eq!(
            " medianflow ".parse::<TrackerKind>().unwrap(),
            TrackerKind::MedianFlow
        );
        assert_eq!("Boosting".parse::<TrackerKind>().unwrap(), TrackerKind::Boosting);
        assert!("goturn".parse::<TrackerKind>().is_err());
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in TrackerKind::all() {
            assert_eq!(kind.name().parse::<TrackerKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_duplicate_kind_is_ignored() {
        let mut set: TrackerSet<TestFrame> = TrackerSet::new();
        assert!(set.insert(TrackerKind::Kcf, Box::new(ScriptedTracker::new(vec![]))));
        assert!(!set.insert(TrackerKind::Kcf, Box::new(ScriptedTracker::new(vec![]))));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_initialize_rejected_names_tracker() {
        let mut set: TrackerSet<TestFrame> = TrackerSet::new();
        set.insert(TrackerKind::Kcf, Box::new(ScriptedTracker::new(vec![])));
        let mut refusing = ScriptedTracker::new(vec![]);
        refusing.accept_init = false;
        set.insert(TrackerKind::Mosse, Box::new(refusing));

        let err = set
            .initialize(&frame(), Bbox::new(1.0, 1.0, 10.0, 10.0))
            .unwrap_err();
        assert_eq!(err.to_string(), "Cannot initialize MOSSE tracker");
    }

    #[test]
    fn test_update_keeps_successes_in_order() {
        let hit = Bbox::new(5.0, 5.0, 10.0, 10.0);
        let mut failing = ScriptedTracker::new(vec![]);
        failing
            .outcomes
            .push_back(Err(TrackError::backend("model exploded")));

        let mut set: TrackerSet<TestFrame> = TrackerSet::new();
        set.insert(TrackerKind::Csrt, Box::new(ScriptedTracker::new(vec![None])));
        set.insert(TrackerKind::Mil, Box::new(failing));
        set.insert(TrackerKind::Kcf, Box::new(ScriptedTracker::new(vec![Some(hit)])));
        set.insert(TrackerKind::Mosse, Box::new(ScriptedTracker::new(vec![Some(hit)])));

        let results = set.update(&frame());
        let kinds: Vec<_> = results.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![TrackerKind::Kcf, TrackerKind::Mosse]);
        assert_eq!(results[0].bbox, hit);
    }
}
