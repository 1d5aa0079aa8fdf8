//! Jacket page demo
//!
//! Scrolls a virtual viewport through the jacket product page on one task
//! while a 60 Hz frame loop renders the model pose to the terminal.
//!
//! ```text
//! jacket-demo [--json] [--page page.json]
//! ```

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};

use parallax_core::{ParallaxResult, SectionId};
use parallax_runtime::{init_logging, ChromePort, LogFormat, PageConfig, SceneFrame, ScenePort, Stage, StageConfig};
use parallax_state::{JacketSection, PageSetup, SharedActiveSection};
use parallax_time::{FrameClock, FrameClockConfig};
use parallax_visibility::{PageLayout, VisibilityBank, Viewport};

const VIEWPORT_WIDTH: f32 = 1280.0;
const VIEWPORT_HEIGHT: f32 = 800.0;
const SECTION_HEIGHT: f32 = 800.0;
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const LAYOUT_INTERVAL: Duration = Duration::from_millis(50);
/// Scroll speed in pixels per second
const SCROLL_SPEED: f32 = 900.0;
/// Time spent reading each section
const DWELL: Duration = Duration::from_millis(1500);

struct Args {
    format: LogFormat,
    page: Option<String>,
}

fn parse_args() -> Args {
    let mut args = Args {
        format: LogFormat::Pretty,
        page: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => args.format = LogFormat::Json,
            "--page" => args.page = iter.next(),
            other => eprintln!("ignoring unknown argument {other}"),
        }
    }
    args
}

fn load_page(path: Option<&str>) -> Result<(PageSetup, StageConfig), Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            let config = PageConfig::from_json(&json)?;
            Ok((config.setup()?, config.stage_config()?))
        }
        None => Ok((PageSetup::jacket(), StageConfig::default())),
    }
}

/// Prints a line every quarter second of frames
struct TerminalScene {
    every: u64,
}

impl ScenePort for TerminalScene {
    fn present(&mut self, frame: &SceneFrame) {
        if frame.index % self.every != 0 {
            return;
        }
        let t = &frame.transform;
        println!(
            "frame {:>5}  rotY {:>7.3}  rotX {:>7.3}  scale {:>5.3}  origin ({:.2}, {:.2}, {:.2})",
            frame.index,
            t.rotation_y,
            t.rotation_x,
            t.scale,
            frame.model.w_axis.x,
            frame.model.w_axis.y,
            frame.model.w_axis.z,
        );
    }
}

/// Logs feature-panel highlights
struct LoggingChrome;

impl ChromePort for LoggingChrome {
    fn section_activated(&mut self, section: &SectionId) {
        let title = JacketSection::from_id(section.as_str())
            .map(JacketSection::title)
            .unwrap_or("custom section");
        tracing::info!(section = %section, title, "highlight panel");
    }
}

/// Scroll the page, then signal the frame loop whether or not the scroll
/// finished cleanly
async fn scroll_page(
    page: PageSetup,
    layout: PageLayout,
    active: SharedActiveSection,
    done: watch::Sender<bool>,
) -> ParallaxResult<()> {
    let result = scroll_through(&page, &layout, &active).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "scrolling stopped");
    }
    let _ = done.send(true);
    result
}

/// Scroll the viewport down through every section and back to the top,
/// writing entries into the shared active slot.
async fn scroll_through(
    page: &PageSetup,
    layout: &PageLayout,
    active: &SharedActiveSection,
) -> ParallaxResult<()> {
    let mut bank = VisibilityBank::new(page.sections());
    let mut viewport = Viewport::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);

    let mut stops: Vec<f32> = (1..=page.sections().len())
        .map(|i| i as f32 * SECTION_HEIGHT)
        .collect();
    stops.push(0.0);

    let mut ticker = interval(LAYOUT_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let step = SCROLL_SPEED * LAYOUT_INTERVAL.as_secs_f32();
    let mut y = 0.0f32;

    for stop in stops {
        while (y - stop).abs() > f32::EPSILON {
            ticker.tick().await;
            y = if y < stop { (y + step).min(stop) } else { (y - step).max(stop) };
            viewport.scroll_to(y);

            let entered = bank.observe(&viewport, layout)?;
            if !entered.is_empty() {
                active.enter_all(entered.into_iter().map(|e| e.section));
            }
        }
        tracing::debug!(scroll_y = y, "reached section");
        tokio::time::sleep(DWELL).await;
    }
    Ok(())
}

/// Sections stacked below a hero of the same height
fn page_layout(page: &PageSetup) -> PageLayout {
    let ids: Vec<SectionId> = page.sections().iter().map(|d| d.id.clone()).collect();
    PageLayout::stacked(&ids, SECTION_HEIGHT, SECTION_HEIGHT, VIEWPORT_WIDTH)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args();
    init_logging(args.format);

    let (page, config) = load_page(args.page.as_deref())?;
    let mut stage = Stage::with_config(page.clone(), config);
    let (done_tx, done_rx) = watch::channel(false);

    let layout = page_layout(&page);
    let scroller = tokio::spawn(scroll_page(page, layout, stage.active_handle(), done_tx));

    let mut clock = FrameClock::with_config(FrameClockConfig::capped());
    let mut scene = TerminalScene { every: 15 };
    let mut chrome = LoggingChrome;
    let mut ticker = interval(FRAME_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        stage.run_frame(&mut clock, &mut scene, &mut chrome);
        // A panicking scroller never signals; is_finished covers it
        let scrolled = *done_rx.borrow() || scroller.is_finished();
        if scrolled && stage.is_settled() {
            break;
        }
    }

    scroller.await??;

    let stats = stage.stats();
    tracing::info!(
        frames = stats.frames,
        transitions = stats.transitions,
        fallbacks = stats.fallbacks,
        recoveries = stage.recoveries(),
        "demo finished"
    );
    Ok(())
}
