//! Headless rubberband demo.
//!
//! Simulates a vertical list inside an overscroll controller through two
//! scripted gestures: a drag past the top edge that springs back on
//! release, and a fling that hits the boundary and bounces. Emits one
//! JSON sample per frame on stdout; set RUST_LOG=debug for the
//! controller's own transition log.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use serde::Serialize;

use rubberband_core::{
    Axis, OverscrollConfig, OverscrollController, ScrollCapability, ScrollChild, ScrollSource,
    Tick,
};

/// Simulated frame period, milliseconds.
const FRAME_MS: u32 = 16;

/// A scrollable list model: a content position clamped to [0, max].
struct ListModel {
    position: i32,
    max_position: i32,
}

impl ListModel {
    /// Scroll by `delta`, returning the unconsumed remainder.
    fn scroll_by(&mut self, delta: i32) -> i32 {
        let target = (self.position + delta).clamp(0, self.max_position);
        let consumed = target - self.position;
        self.position = target;
        delta - consumed
    }
}

/// The controller's handle onto the simulated list.
#[derive(Clone)]
struct ListHandle(Rc<RefCell<ListModel>>);

impl ListHandle {
    fn new(position: i32, max_position: i32) -> Self {
        Self(Rc::new(RefCell::new(ListModel {
            position,
            max_position,
        })))
    }
}

impl ScrollChild for ListHandle {
    fn capability(&self, _axis: Axis) -> ScrollCapability {
        let list = self.0.borrow();
        ScrollCapability {
            forward: list.position < list.max_position,
            backward: list.position > 0,
        }
    }

    fn is_attached(&self) -> bool {
        true
    }
}

#[derive(Serialize)]
struct FrameSample<'a> {
    scenario: &'a str,
    frame: u32,
    list_position: i32,
    virtual_offset: i32,
    actual_offset: i32,
    phase: &'a str,
}

fn phase_name(controller: &OverscrollController<ListHandle>) -> &'static str {
    use rubberband_core::AnimationPhase::*;
    match controller.phase() {
        Idle => "idle",
        MockFling => "mock_fling",
        BounceDecay => "bounce_decay",
        SpringBack => "spring_back",
    }
}

fn emit(
    scenario: &str,
    frame: u32,
    list: &ListHandle,
    controller: &OverscrollController<ListHandle>,
) -> Result<()> {
    let sample = FrameSample {
        scenario,
        frame,
        list_position: list.0.borrow().position,
        virtual_offset: controller.virtual_offset(),
        actual_offset: controller.actual_offset(),
        phase: phase_name(controller),
    };
    println!("{}", serde_json::to_string(&sample)?);
    Ok(())
}

/// Run the animation frame loop until the controller goes idle.
fn run_animation(
    scenario: &str,
    frame: &mut u32,
    list: &ListHandle,
    controller: &mut OverscrollController<ListHandle>,
) -> Result<()> {
    while let Some(token) = controller.frame_token() {
        match controller.tick(token, FRAME_MS) {
            Tick::Continue(_) | Tick::Finished => {}
            Tick::Stale => break,
        }
        *frame += 1;
        emit(scenario, *frame, list, controller)?;
    }
    Ok(())
}

/// Drag 20 frames past the top edge, then release.
fn drag_and_release(
    list: &ListHandle,
    controller: &mut OverscrollController<ListHandle>,
) -> Result<()> {
    let scenario = "drag_release";
    let mut frame = 0;

    controller.start_scroll(Axis::Vertical, ScrollSource::Touch);
    for _ in 0..20 {
        let delta = -12;
        let consumed = controller.on_pre_scroll(delta, ScrollSource::Touch);
        let unconsumed = list.0.borrow_mut().scroll_by(delta - consumed);
        controller.on_post_scroll(unconsumed, ScrollSource::Touch);
        frame += 1;
        emit(scenario, frame, list, controller)?;
    }

    controller.stop_scroll(ScrollSource::Touch);
    log::info!("drag released at virtual {}", controller.virtual_offset());
    run_animation(scenario, &mut frame, list, controller)
}

/// Fling backward from just below the top; the list runs out of content
/// mid-fling and the remainder bounces.
fn fling_into_boundary(
    list: &ListHandle,
    controller: &mut OverscrollController<ListHandle>,
) -> Result<()> {
    let scenario = "fling_bounce";
    let mut frame = 0;

    controller.start_scroll(Axis::Vertical, ScrollSource::Fling);
    let fling_velocity = -900.0;
    if !controller.on_pre_fling(fling_velocity) {
        // The child keeps the fling; the controller shadows it.
        controller.on_fling(fling_velocity, true);
    }

    // The child's own fling: constant-ish steps for simplicity, reporting
    // whatever the content could not absorb. It ends its stream the
    // moment it hits the boundary, before the bounce moves anything.
    loop {
        let delta = (fling_velocity * f64::from(FRAME_MS) / 1000.0) as i32;
        let unconsumed = list.0.borrow_mut().scroll_by(delta);
        controller.on_post_scroll(unconsumed, ScrollSource::Fling);
        if unconsumed != 0 {
            controller.stop_scroll(ScrollSource::Fling);
            frame += 1;
            emit(scenario, frame, list, controller)?;
            break;
        }
        if let Some(token) = controller.frame_token() {
            controller.tick(token, FRAME_MS);
        }
        frame += 1;
        emit(scenario, frame, list, controller)?;
    }

    run_animation(scenario, &mut frame, list, controller)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = OverscrollConfig::default();
    log::info!(
        "starting demo (axis {:?}, factor {})",
        config.axis,
        config.overscroll_distance_factor
    );

    // A 200-unit viewport over 60 units of scrollable content.
    let list = ListHandle::new(60, 60);
    let mut controller = OverscrollController::new(config, list.clone())?;
    controller.set_viewport_extent(200);
    log::info!(
        "max overscroll distance: {}",
        controller.max_overscroll_distance()
    );

    // Scenario 1: the list sits at the top; drag down past the edge.
    list.0.borrow_mut().position = 0;
    drag_and_release(&list, &mut controller)?;

    // Scenario 2: fling backward from just below the top.
    list.0.borrow_mut().position = 60;
    fling_into_boundary(&list, &mut controller)?;

    log::info!("demo finished at rest: virtual {}", controller.virtual_offset());
    Ok(())
}
