use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Instant;

use blobtrack_core::detection::ThresholdWindow;
use blobtrack_core::io::{open_source_or_unopened, VideoSource};
use blobtrack_core::pipeline::{FrameAnalysis, FrameTransformer, PlaybackConfig};
use blobtrack_core::playback::{Input, Key, Playback, PlaybackState, Transition};
use tracing::info;

use crate::convert::{frame_to_color_image, mask_to_color_image};
use crate::panels;
use crate::states::ViewportState;

pub const MAIN_TITLE: &str = "Main frame";
const CONTROL_TITLE: &str = "Control";
const MASK_TITLE: &str = "Transformed frame";

/// Three surfaces over one playback: the root viewport shows the annotated
/// video, two immediate viewports show the sliders and the mask.
///
/// The blocking "wait for a key with a timeout" of the playback loop becomes a
/// deadline: each update either consumes one queued key press or, once the
/// deadline has passed, a timeout.
pub struct BlobTrackApp {
    pub playback: Playback<Box<dyn VideoSource>>,
    transformer: FrameTransformer,
    config: PlaybackConfig,
    pub window: ThresholdWindow,
    /// Position of the reset slider.
    pub reset_trigger: u8,
    pub input_path: PathBuf,
    pub open_tx: mpsc::Sender<PathBuf>,
    open_rx: mpsc::Receiver<PathBuf>,
    /// When the current input wait times out. `None` until the first frame.
    deadline: Option<Instant>,
    /// Key presses not yet handed to the playback.
    pending_keys: VecDeque<Key>,
    pub last_analysis: Option<FrameAnalysis>,
    main_view: ViewportState,
    mask_view: ViewportState,
}

impl BlobTrackApp {
    pub fn new(input: &Path, config: PlaybackConfig) -> Self {
        let (open_tx, open_rx) = mpsc::channel();
        Self {
            playback: Playback::new(open_source_or_unopened(input)),
            transformer: FrameTransformer::new(&config),
            config,
            window: ThresholdWindow::default(),
            reset_trigger: 0,
            input_path: input.to_path_buf(),
            open_tx,
            open_rx,
            deadline: None,
            pending_keys: VecDeque::new(),
            last_analysis: None,
            main_view: ViewportState::new("main_frame"),
            mask_view: ViewportState::new("transformed_frame"),
        }
    }

    /// Switch to videos picked in the file dialog.
    fn poll_open_requests(&mut self) {
        while let Ok(path) = self.open_rx.try_recv() {
            info!(path = %path.display(), "switching video");
            self.playback = Playback::new(open_source_or_unopened(&path));
            self.input_path = path;
            self.deadline = None;
            self.pending_keys.clear();
            self.last_analysis = None;
        }
    }

    /// Run at most one playback tick.
    fn step(&mut self, ctx: &egui::Context) {
        if self.playback.state() == PlaybackState::Closed {
            return;
        }
        let Some(deadline) = self.deadline else {
            self.advance(ctx);
            return;
        };

        let Some(input) = next_input(&mut self.pending_keys, Instant::now() >= deadline) else {
            return;
        };

        match self.playback.handle(input) {
            Transition::Advance | Transition::Resume => self.advance(ctx),
            Transition::Pause | Transition::StayPaused => {
                self.refresh_mask(ctx);
                self.arm_deadline();
            }
            Transition::Close => {}
        }
    }

    fn advance(&mut self, ctx: &egui::Context) {
        self.window.clamp();
        let Some(frame) = self.playback.acquire() else {
            return;
        };
        let analysis = self.transformer.analyze(frame, &self.window);
        let label = format!("#{}", analysis.annotated.metadata.frame_index);

        self.mask_view
            .set_image(ctx, mask_to_color_image(&analysis.mask), label.clone());
        self.main_view
            .set_image(ctx, frame_to_color_image(&analysis.annotated), label);
        self.last_analysis = Some(analysis);
        self.arm_deadline();
    }

    /// Recompute the held frame's mask with the current sliders.
    fn refresh_mask(&mut self, ctx: &egui::Context) {
        self.window.clamp();
        if let Some(frame) = self.playback.current_frame() {
            let mask = self.transformer.mask(frame, &self.window);
            let label = format!("#{} (refreshed)", frame.metadata.frame_index);
            self.mask_view.set_image(ctx, mask_to_color_image(&mask), label);
        }
    }

    fn arm_deadline(&mut self) {
        self.deadline = Some(Instant::now() + self.playback.wait_timeout(&self.config));
    }

    fn surface_closed(&mut self, title: &str) {
        if !self.playback.is_closed() {
            info!("'{title}' window closed");
            self.playback.close();
        }
    }

    fn show_control_surface(&mut self, ctx: &egui::Context, keys: &mut Vec<Key>) {
        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("control"),
            egui::ViewportBuilder::default()
                .with_title(CONTROL_TITLE)
                .with_inner_size([360.0, 420.0]),
            |ctx, _class| {
                collect_keys(ctx, keys);
                panels::controls::show(ctx, self);
                if ctx.input(|i| i.viewport().close_requested()) {
                    self.surface_closed(CONTROL_TITLE);
                }
            },
        );
    }

    fn show_mask_surface(&mut self, ctx: &egui::Context, keys: &mut Vec<Key>) {
        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("transformed_frame"),
            egui::ViewportBuilder::default()
                .with_title(MASK_TITLE)
                .with_inner_size([640.0, 480.0]),
            |ctx, _class| {
                collect_keys(ctx, keys);
                panels::viewport::show(ctx, &mut self.mask_view, "No mask yet");
                if ctx.input(|i| i.viewport().close_requested()) {
                    self.surface_closed(MASK_TITLE);
                }
            },
        );
    }
}

impl eframe::App for BlobTrackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_open_requests();

        let mut keys = Vec::new();
        collect_keys(ctx, &mut keys);
        if ctx.input(|i| i.viewport().close_requested()) {
            self.surface_closed(MAIN_TITLE);
        }

        self.show_control_surface(ctx, &mut keys);
        self.show_mask_surface(ctx, &mut keys);
        self.pending_keys.extend(keys);
        self.step(ctx);

        panels::viewport::show(ctx, &mut self.main_view, "No frame yet");

        if self.playback.is_closed() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        } else if !self.pending_keys.is_empty() {
            ctx.request_repaint();
        } else if let Some(deadline) = self.deadline {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        } else {
            ctx.request_repaint();
        }
    }
}

/// The next playback input: a queued quit wins over everything before it,
/// otherwise keys are handed over one at a time in arrival order, and a
/// timeout only once the queue is empty.
fn next_input(pending: &mut VecDeque<Key>, timed_out: bool) -> Option<Input> {
    if pending.contains(&Key::Quit) {
        pending.clear();
        return Some(Input::Key(Key::Quit));
    }
    match pending.pop_front() {
        Some(key) => Some(Input::Key(key)),
        None if timed_out => Some(Input::Timeout),
        None => None,
    }
}

/// Key presses of the current viewport, in arrival order.
fn collect_keys(ctx: &egui::Context, keys: &mut Vec<Key>) {
    ctx.input(|i| {
        for event in &i.events {
            if let egui::Event::Key {
                key,
                pressed: true,
                repeat: false,
                ..
            } = event
            {
                keys.push(map_key(*key));
            }
        }
    });
}

fn map_key(key: egui::Key) -> Key {
    match key {
        egui::Key::Space => Key::from_char(' '),
        egui::Key::Q => Key::from_char('q'),
        _ => Key::Other,
    }
}
