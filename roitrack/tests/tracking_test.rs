use roitrack::{
    Bbox, Display, Frame, FrameSource, LoopControl, OutputFormat, PollingConfig, PollingLoop,
    Reporter, Result, TrackError, TrackResult, TrackerKind, TrackerSet, VisualTracker,
};

/// Frame whose size changes between reads, like a camera switching resolution
struct Image {
    width: u32,
    height: u32,
}

impl Frame for Image {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

struct SizeSequence {
    sizes: Vec<Option<(u32, u32)>>,
    next: usize,
}

impl FrameSource<Image> for SizeSequence {
    fn read(&mut self) -> Result<Image> {
        let size = self.sizes.get(self.next).copied().flatten();
        self.next += 1;
        size.map(|(width, height)| Image { width, height })
            .ok_or_else(|| TrackError::frame_read("file is being rewritten"))
    }
}

/// Follows a target drifting right by 10px per frame
struct DriftTracker {
    current: Option<Bbox>,
}

impl VisualTracker<Image> for DriftTracker {
    fn init(&mut self, _frame: &Image, roi: Bbox) -> Result<bool> {
        self.current = Some(roi);
        Ok(true)
    }

    fn update(&mut self, _frame: &Image) -> Result<Option<Bbox>> {
        if let Some(bbox) = self.current.as_mut() {
            bbox.x += 10.0;
        }
        Ok(self.current)
    }
}

/// Never finds anything
struct BlindTracker;

impl VisualTracker<Image> for BlindTracker {
    fn init(&mut self, _frame: &Image, _roi: Bbox) -> Result<bool> {
        Ok(true)
    }

    fn update(&mut self, _frame: &Image) -> Result<Option<Bbox>> {
        Ok(None)
    }
}

struct Headless;

impl Display<Image> for Headless {
    fn show(
        &mut self,
        _frame: &mut Image,
        _results: &[TrackResult],
        _trackers: &[TrackerKind],
        _fps: f64,
    ) -> Result<LoopControl> {
        Ok(LoopControl::Continue)
    }
}

#[test]
fn test_first_successful_tracker_is_reported_per_frame() {
    let mut source = SizeSequence {
        sizes: vec![
            Some((200, 100)),
            None,
            Some((200, 100)),
            Some((400, 200)),
        ],
        next: 0,
    };

    let mut trackers: TrackerSet<Image> = TrackerSet::new();
    trackers.insert(TrackerKind::Mosse, Box::new(BlindTracker));
    trackers.insert(TrackerKind::Kcf, Box::new(DriftTracker { current: None }));

    let first = Image {
        width: 200,
        height: 100,
    };
    trackers
        .initialize(&first, Bbox::new(0.0, 50.0, 20.0, 10.0))
        .unwrap();

    let mut reporter = Reporter::new(Vec::new(), OutputFormat::Tuple);
    let config = PollingConfig {
        max_frames: Some(3),
        ..Default::default()
    };
    let stats = PollingLoop::new(config)
        .run(&mut source, &mut trackers, &mut Headless, &mut reporter)
        .unwrap();

    assert_eq!(stats.total_frames, 3);
    assert_eq!(stats.tracked_frames, 3);
    assert_eq!(stats.read_failures, 1);

    let text = String::from_utf8(reporter.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "(0.05, 0.5, 0.1, 0.1)",
            "(0.1, 0.5, 0.1, 0.1)",
            // Same pixels on a frame twice the size
            "(0.075, 0.25, 0.05, 0.05)",
        ]
    );
}

#[test]
fn test_malformed_roi_is_rejected() {
    let parsed: Vec<f64> = "10,20,30"
        .split(',')
        .map(|s| s.parse().unwrap())
        .collect();
    let err = Bbox::from_components(&parsed).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Bounding box has invalid format: expected 4 components, got 3"
    );
}
