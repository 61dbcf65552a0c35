use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::{debug, info};

use scrollto_core::memory::NodeId;
use scrollto_core::position::{get_scroll_left, get_scroll_top};
use scrollto_core::{
    ActionKind, AnimationOptions, AnimationPhase, Coords, EasingType, FrameScheduler,
    MemoryDocument, ScrollConfig, ScrollHandle, ScrollHost, ScrollService, TickScheduler,
};

use super::layout::Layout;

/// Upper bound on simulated frames; a 60fps run this long is over four hours
const MAX_FRAMES: u64 = 1_000_000;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// TOML page layout
    #[arg(short, long)]
    pub layout: PathBuf,

    /// Scroll to the element matching this selector
    #[arg(long, conflicts_with_all = ["x", "y", "top", "bottom"])]
    pub to: Option<String>,

    /// Horizontal target offset
    #[arg(long)]
    pub x: Option<f64>,

    /// Vertical target offset
    #[arg(long)]
    pub y: Option<f64>,

    /// Scroll to the top of the container
    #[arg(long, conflicts_with_all = ["x", "y", "bottom"])]
    pub top: bool,

    /// Scroll to the bottom of the container
    #[arg(long, conflicts_with_all = ["x", "y"])]
    pub bottom: bool,

    /// Selector of the scrolling container
    #[arg(short, long)]
    pub container: Option<String>,

    /// Animation length in milliseconds
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// Wait before starting, in milliseconds
    #[arg(long)]
    pub delay: Option<f64>,

    /// Added to the target on both axes
    #[arg(long, allow_hyphen_values = true)]
    pub offset: Option<f64>,

    /// Easing preset (see `scrollto easings`)
    #[arg(short, long)]
    pub easing: Option<EasingType>,

    /// Animate the horizontal offset as well
    #[arg(long)]
    pub scroll_x: bool,

    /// Frames per second
    #[arg(long)]
    pub frame_rate: Option<u32>,

    /// Cancel the animation this many milliseconds after the call
    #[arg(long)]
    pub cancel_after: Option<f64>,

    /// Pace frames with the wall clock instead of virtual time
    #[arg(long)]
    pub realtime: bool,

    /// Print frames as JSON
    #[arg(long)]
    pub json: bool,
}

impl SimulateArgs {
    /// Defaults from the config file with command-line overrides applied
    pub fn effective_config(&self, base: &ScrollConfig) -> ScrollConfig {
        let mut config = base.clone();
        if let Some(container) = &self.container {
            config.container = container.clone();
        }
        if let Some(duration) = self.duration {
            config.duration_ms = duration;
        }
        if let Some(delay) = self.delay {
            config.delay_ms = delay;
        }
        if let Some(offset) = self.offset {
            config.offset = offset;
        }
        if let Some(easing) = self.easing {
            config.easing = easing;
        }
        if let Some(frame_rate) = self.frame_rate {
            config.frame_rate = frame_rate;
        }
        config.scroll_x |= self.scroll_x;
        config
    }

    fn action(&self) -> Result<(ActionKind, AnimationOptions<NodeId>)> {
        if self.top {
            return Ok((ActionKind::ScrollToTop, AnimationOptions::new()));
        }
        if self.bottom {
            return Ok((ActionKind::ScrollToBottom, AnimationOptions::new()));
        }
        if let Some(selector) = &self.to {
            return Ok((ActionKind::ScrollTo, AnimationOptions::new().element_selector(selector)));
        }

        let mut options = AnimationOptions::new();
        options.x = self.x;
        options.y = self.y;
        if options.x.is_none() && options.y.is_none() {
            bail!("nothing to scroll to: pass --to, --x/--y, --top or --bottom");
        }
        Ok((ActionKind::ScrollTo, options))
    }
}

/// Scroll offsets of the container after one frame
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub frame: u64,
    pub time_ms: f64,
    pub x: f64,
    pub y: f64,
    pub phase: &'static str,
}

/// A lifecycle callback firing
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub kind: &'static str,
    pub time_ms: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Serialize)]
struct Report<'a> {
    container: &'a str,
    outcome: &'static str,
    frames: &'a [Frame],
    events: &'a [Event],
}

fn phase_name(phase: AnimationPhase) -> &'static str {
    match phase {
        AnimationPhase::Pending => "pending",
        AnimationPhase::Running => "running",
        AnimationPhase::Completed => "completed",
        AnimationPhase::Aborted => "aborted",
    }
}

/// One animation running against an in-memory page
pub struct Simulation {
    doc: MemoryDocument,
    scheduler: Rc<TickScheduler>,
    container: NodeId,
    container_selector: String,
    handle: ScrollHandle,
    started_at: f64,
    cancel_after: Option<f64>,
    frames: Vec<Frame>,
    events: Rc<RefCell<Vec<Event>>>,
}

impl Simulation {
    pub fn start(layout: &Layout, config: &ScrollConfig, args: &SimulateArgs) -> Result<Self> {
        let doc = layout.build()?;
        let container = doc
            .query_selector(&config.container)
            .with_context(|| format!("container {} is not in the layout", config.container))?;

        let scheduler = Rc::new(TickScheduler::new());
        let service = ScrollService::with_config(
            Rc::new(doc.clone()),
            Rc::clone(&scheduler),
            config,
        );
        let events = Rc::new(RefCell::new(Vec::new()));

        let recorder = |kind: &'static str| {
            let doc = doc.clone();
            let scheduler = Rc::clone(&scheduler);
            let events = Rc::clone(&events);
            move |_: Option<&NodeId>, _: Coords| {
                events.borrow_mut().push(Event {
                    kind,
                    time_ms: scheduler.now(),
                    x: get_scroll_left(&doc, &container),
                    y: get_scroll_top(&doc, &container),
                });
            }
        };

        let (kind, options) = args.action()?;
        let options = options
            .on_start(recorder("start"))
            .on_done(recorder("done"))
            .on_aborting(recorder("aborting"));

        let handle = service.run_action(kind, options)?;
        info!(
            ?kind,
            container = %config.container,
            duration_ms = config.duration_ms,
            easing = %config.easing,
            "Simulation started"
        );

        Ok(Self {
            container_selector: config.container.clone(),
            started_at: scheduler.now(),
            doc,
            scheduler,
            container,
            handle,
            cancel_after: args.cancel_after,
            frames: Vec::new(),
            events,
        })
    }

    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    /// Run one frame at `now` and record it. Returns false once the animation
    /// has stopped scheduling frames.
    pub fn frame(&mut self, now: f64) -> bool {
        if let Some(after) = self.cancel_after {
            if now - self.started_at >= after && !self.handle.is_cancelled() {
                debug!(time_ms = now, "Cancelling animation");
                self.handle.cancel();
            }
        }

        self.scheduler.frame_at(now);
        self.frames.push(Frame {
            frame: self.scheduler.frame_count(),
            time_ms: now - self.started_at,
            x: get_scroll_left(&self.doc, &self.container),
            y: get_scroll_top(&self.doc, &self.container),
            phase: phase_name(self.handle.phase()),
        });

        !self.scheduler.is_idle()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn phase(&self) -> AnimationPhase {
        self.handle.phase()
    }

    /// Frames and events as a JSON document
    pub fn to_json(&self) -> Result<String> {
        let events = self.events();
        let report = Report {
            container: &self.container_selector,
            outcome: phase_name(self.phase()),
            frames: &self.frames,
            events: &events,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }

    fn print(&self, json: bool) -> Result<()> {
        if json {
            println!("{}", self.to_json()?);
            return Ok(());
        }

        let events = self.events();
        println!(
            "Frames ({}) in {}, {}:\n",
            self.frames.len(),
            self.container_selector,
            phase_name(self.phase())
        );
        println!("  {:>5} {:>9} {:>9} {:>9}  phase", "frame", "time_ms", "x", "y");
        for frame in &self.frames {
            println!(
                "  {:>5} {:>9.1} {:>9.1} {:>9.1}  {}",
                frame.frame, frame.time_ms, frame.x, frame.y, frame.phase
            );
        }

        if !events.is_empty() {
            println!("\nEvents:");
            for event in &events {
                println!(
                    "  {:<9} at {:>7.1}ms  ({:.1}, {:.1})",
                    event.kind,
                    event.time_ms - self.started_at,
                    event.x,
                    event.y
                );
            }
        }

        Ok(())
    }
}

/// Step in fixed increments of virtual time
pub fn drive_virtual(sim: &mut Simulation, frame_interval: Duration) -> Result<()> {
    let frame_ms = frame_interval.as_secs_f64() * 1000.0;
    while sim.frame(sim.now() + frame_ms) {
        if sim.frames().len() as u64 >= MAX_FRAMES {
            bail!("animation still running after {} frames", MAX_FRAMES);
        }
    }
    Ok(())
}

/// Step on a wall-clock interval
pub async fn drive_realtime(sim: &mut Simulation, frame_interval: Duration) -> Result<()> {
    let mut ticker = tokio::time::interval(frame_interval);
    ticker.tick().await;
    let origin = tokio::time::Instant::now();
    let base = sim.now();

    loop {
        ticker.tick().await;
        let now = base + origin.elapsed().as_secs_f64() * 1000.0;
        if !sim.frame(now) {
            return Ok(());
        }
    }
}

pub async fn run(base: &ScrollConfig, args: SimulateArgs) -> Result<()> {
    let config = args.effective_config(base);
    let layout = Layout::load(&args.layout)?;
    let mut sim = Simulation::start(&layout, &config, &args)?;

    if args.realtime {
        drive_realtime(&mut sim, config.frame_interval()).await?;
    } else {
        drive_virtual(&mut sim, config.frame_interval())?;
    }

    sim.print(args.json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const PAGE: &str = r##"
        [viewport]
        width = 1280
        height = 800
        scroll_height = 4000

        [[element]]
        selector = "#pricing"
        top = 2400

        [[element]]
        selector = "#list"
        top = 100
        width = 300
        height = 400
        scroll_height = 1400
    "##;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: SimulateArgs,
    }

    fn args(extra: &[&str]) -> SimulateArgs {
        let argv = ["scrollto", "--layout", "page.toml"].iter().chain(extra);
        TestCli::try_parse_from(argv).unwrap().args
    }

    fn start(extra: &[&str]) -> (Simulation, ScrollConfig) {
        let args = args(extra);
        let config = args.effective_config(&ScrollConfig::default());
        let layout = Layout::parse(PAGE).unwrap();
        (Simulation::start(&layout, &config, &args).unwrap(), config)
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let args = args(
            &["--y", "10", "--duration", "250", "--offset", "-40", "--easing", "quad-out"],
        );
        let config = args.effective_config(&ScrollConfig::default());

        assert_eq!(config.duration_ms, 250.0);
        assert_eq!(config.offset, -40.0);
        assert_eq!(config.easing, EasingType::QuadOut);
        assert_eq!(config.container, "body");
    }

    #[test]
    fn test_conflicting_targets_rejected() {
        let argv = ["scrollto", "--layout", "page.toml", "--to", "#a", "--y", "10"];
        assert!(TestCli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_missing_target_rejected() {
        let args = args(&[]);
        let layout = Layout::parse(PAGE).unwrap();
        assert!(Simulation::start(&layout, &ScrollConfig::default(), &args).is_err());
    }

    #[test]
    fn test_virtual_run_reaches_element() {
        let (mut sim, config) = start(&["--to", "#pricing", "--frame-rate", "50"]);
        drive_virtual(&mut sim, config.frame_interval()).unwrap();

        let last = sim.frames().last().unwrap();
        assert_eq!(last.y, 2400.0);
        assert_eq!(last.phase, "completed");
        // 500ms at 20ms per frame, plus the frame that lands on the end
        assert_eq!(sim.frames().len(), 25);
        assert!(sim.frames().windows(2).all(|w| w[0].y <= w[1].y));

        let kinds: Vec<_> = sim.events().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec!["start", "done"]);
    }

    #[test]
    fn test_bottom_of_container() {
        let (mut sim, config) = start(&["--bottom", "--container", "#list"]);
        drive_virtual(&mut sim, config.frame_interval()).unwrap();

        assert_eq!(sim.frames().last().unwrap().y, 1000.0);
        assert_eq!(sim.phase(), AnimationPhase::Completed);
    }

    #[test]
    fn test_cancel_after_aborts() {
        let (mut sim, config) = start(&["--y", "3000", "--cancel-after", "200"]);
        drive_virtual(&mut sim, config.frame_interval()).unwrap();

        assert_eq!(sim.phase(), AnimationPhase::Aborted);
        let last = sim.frames().last().unwrap();
        assert!(last.y > 0.0 && last.y < 3000.0);
        let kinds: Vec<_> = sim.events().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec!["start", "aborting"]);
    }

    #[test]
    fn test_json_report_carries_outcome() {
        let (mut sim, config) = start(&["--top", "--container", "#list", "--duration", "0"]);
        drive_virtual(&mut sim, config.frame_interval()).unwrap();

        let report: serde_json::Value = serde_json::from_str(&sim.to_json().unwrap()).unwrap();
        assert_eq!(report["container"], "#list");
        assert_eq!(report["outcome"], "completed");
        assert_eq!(report["frames"].as_array().unwrap().len(), 1);
        assert_eq!(report["events"][1]["kind"], "done");
    }

    #[tokio::test(start_paused = true)]
    async fn test_realtime_follows_clock() {
        let (mut sim, config) = start(&["--y", "1200", "--duration", "300"]);
        drive_realtime(&mut sim, config.frame_interval()).await.unwrap();

        let frames = sim.frames();
        assert_eq!(frames.last().unwrap().y, 1200.0);
        assert!(frames.last().unwrap().time_ms >= 300.0);
        assert!(frames.windows(2).all(|w| w[1].time_ms > w[0].time_ms));
        assert!(frames.len() >= 18 && frames.len() <= 21);
    }
}
