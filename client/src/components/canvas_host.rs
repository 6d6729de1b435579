//! Bridge component between Leptos state and the imperative `canvas::Engine`.
//!
//! ARCHITECTURE
//! ============
//! The engine owns the document, selection and viewport. This host forwards
//! DOM input to it, drains the panel commands queued in `SceneState`, and
//! publishes snapshots back into reactive state after every batch of actions.

use leptos::prelude::*;

use canvas::consts::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};

use crate::state::canvas_view::CanvasViewState;
#[cfg(feature = "csr")]
use crate::state::scene::{SceneCommand, SceneState};
#[cfg(feature = "csr")]
use crate::state::ui::UiState;
#[cfg(feature = "csr")]
use crate::util::canvas_input::{
    map_button, map_modifiers, map_tool, pointer_point, should_prevent_default_key, tool_type, wheel_point,
};

#[cfg(feature = "csr")]
use gloo_timers::callback::Interval;
#[cfg(feature = "csr")]
use std::cell::RefCell;
#[cfg(feature = "csr")]
use std::rc::Rc;

#[cfg(feature = "csr")]
use canvas::engine::{Action, Engine};
#[cfg(feature = "csr")]
use canvas::input::{Key as CanvasKey, WheelDelta};
#[cfg(feature = "csr")]
use js_sys::Date;

/// Redraw interval while the selection marker is animating (~30 fps).
#[cfg(feature = "csr")]
const MARKER_TICK_MS: u32 = 33;

#[cfg(feature = "csr")]
type SharedEngine = Rc<RefCell<Option<Engine>>>;

/// Signals the host writes engine snapshots into.
#[cfg(feature = "csr")]
#[derive(Clone, Copy)]
struct HostSignals {
    ui: RwSignal<UiState>,
    scene: RwSignal<SceneState>,
    canvas_view: RwSignal<CanvasViewState>,
}

#[cfg(feature = "csr")]
fn render_now(engine: &Engine) {
    if let Err(err) = engine.render(Date::now()) {
        log::error!("canvas render failed: {err:?}");
    }
}

#[cfg(feature = "csr")]
fn publish_scene(engine: &Engine, scene: RwSignal<SceneState>) {
    scene.update(|s| s.sync(engine.shapes(), engine.selection()));
}

#[cfg(feature = "csr")]
fn publish_tool(engine: &Engine, ui: RwSignal<UiState>) {
    let tool = tool_type(engine.tool());
    if ui.with_untracked(|u| u.active_tool != tool) {
        ui.update(|u| u.active_tool = tool);
    }
}

#[cfg(feature = "csr")]
fn publish_view(engine: &Engine, canvas_view: RwSignal<CanvasViewState>) {
    let next = CanvasViewState::from_camera(&engine.camera(), engine.cursor());
    if canvas_view.with_untracked(|view| *view != next) {
        canvas_view.set(next);
    }
}

/// Reflect a batch of engine actions in reactive state and redraw if asked.
#[cfg(feature = "csr")]
fn process_actions(actions: Vec<Action>, engine: &Engine, signals: HostSignals) {
    if actions.is_empty() {
        return;
    }
    let mut scene_changed = false;
    let mut needs_render = false;
    for action in actions {
        match action {
            Action::ToolChanged(_) => publish_tool(engine, signals.ui),
            Action::ShapeCreated(_)
            | Action::ShapeUpdated { .. }
            | Action::ShapeDeleted { .. }
            | Action::ShapesReordered { .. }
            | Action::SelectionChanged(_) => scene_changed = true,
            Action::RenderNeeded => needs_render = true,
            // Cursor and camera are re-read from the engine below.
            Action::SetCursor(_) | Action::ViewChanged(_) => {}
        }
    }
    if scene_changed {
        publish_scene(engine, signals.scene);
    }
    publish_view(engine, signals.canvas_view);
    if needs_render {
        render_now(engine);
    }
}

/// Apply one queued panel edit to the engine.
#[cfg(feature = "csr")]
fn apply_command(engine: &mut Engine, command: SceneCommand, scene: RwSignal<SceneState>) -> Vec<Action> {
    match command {
        SceneCommand::Select(id) => engine.select(Some(id)),
        SceneCommand::Delete(id) => engine.remove_shape(id),
        SceneCommand::Reorder { from, to } => engine.reorder_shape(from, to).unwrap_or_else(|err| {
            log::warn!("reorder {from} -> {to} rejected: {err}");
            Vec::new()
        }),
        SceneCommand::SetAttribute { id, key, value } => match engine.set_attribute(id, &key, &value) {
            Ok(actions) => {
                scene.update(SceneState::accept_edit);
                actions
            }
            Err(err) => {
                log::warn!("attribute {key}={value:?} on shape {id} rejected: {err}");
                scene.update(|s| s.reject_edit(err.to_string()));
                Vec::new()
            }
        },
    }
}

#[cfg(feature = "csr")]
fn end_gesture(engine: &SharedEngine, signals: HostSignals) {
    if let Some(engine) = engine.borrow_mut().as_mut() {
        let actions = engine.on_pointer_up();
        process_actions(actions, engine, signals);
    }
}

/// Canvas host component.
///
/// Mounts `canvas::engine::Engine` on the `<canvas>` element, keeps it in
/// sync with the toolbar and panels, and renders on every change.
#[component]
pub fn CanvasHost() -> impl IntoView {
    let canvas_view = expect_context::<RwSignal<CanvasViewState>>();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    #[cfg(feature = "csr")]
    let signals = HostSignals {
        ui: expect_context::<RwSignal<UiState>>(),
        scene: expect_context::<RwSignal<SceneState>>(),
        canvas_view,
    };
    #[cfg(feature = "csr")]
    let engine: SharedEngine = Rc::new(RefCell::new(None));
    #[cfg(feature = "csr")]
    let last_home_viewport_seq = RwSignal::new(0_u64);
    #[cfg(feature = "csr")]
    let marker_tick = Rc::new(RefCell::new(None::<Interval>));

    // Mount the engine once the canvas element exists.
    #[cfg(feature = "csr")]
    {
        let engine = Rc::clone(&engine);
        Effect::new(move || {
            let Some(canvas) = canvas_ref.get() else {
                return;
            };
            if engine.borrow().is_some() {
                return;
            }
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            let mut instance = Engine::new(canvas);
            instance.set_canvas_size(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT, dpr);
            instance.set_tool(map_tool(signals.ui.get_untracked().active_tool));
            log::debug!("canvas engine mounted ({} shapes, dpr {dpr})", instance.shapes().len());
            publish_scene(&instance, signals.scene);
            publish_view(&instance, signals.canvas_view);
            render_now(&instance);
            *engine.borrow_mut() = Some(instance);
        });
    }

    // Toolbar -> engine tool.
    #[cfg(feature = "csr")]
    {
        let engine = Rc::clone(&engine);
        Effect::new(move || {
            let tool = map_tool(signals.ui.with(|u| u.active_tool));
            if let Some(engine) = engine.borrow_mut().as_mut()
                && engine.core.ui.tool != tool
            {
                let actions = engine.set_tool(tool);
                process_actions(actions, engine, signals);
            }
        });
    }

    // "Reset pan & zoom" requests.
    #[cfg(feature = "csr")]
    {
        let engine = Rc::clone(&engine);
        Effect::new(move || {
            let seq = signals.ui.with(|u| u.home_viewport_seq);
            if seq == last_home_viewport_seq.get_untracked() {
                return;
            }
            if let Some(engine) = engine.borrow_mut().as_mut() {
                last_home_viewport_seq.set(seq);
                let actions = engine.reset_view();
                process_actions(actions, engine, signals);
            }
        });
    }

    // Drain panel commands in submission order.
    #[cfg(feature = "csr")]
    {
        let engine = Rc::clone(&engine);
        Effect::new(move || {
            if !signals.scene.with(SceneState::has_pending) {
                return;
            }
            let mut guard = engine.borrow_mut();
            let Some(engine) = guard.as_mut() else {
                return;
            };
            let commands = signals.scene.try_update(SceneState::take_pending).unwrap_or_default();
            let mut actions = Vec::new();
            for command in commands {
                actions.extend(apply_command(engine, command, signals.scene));
            }
            process_actions(actions, engine, signals);
        });
    }

    // Keep redrawing while a selection marker is visible.
    #[cfg(feature = "csr")]
    {
        let engine = Rc::clone(&engine);
        let marker_tick = Rc::clone(&marker_tick);
        Effect::new(move || {
            if signals.scene.with(|s| s.selected.is_none()) {
                marker_tick.borrow_mut().take();
                return;
            }
            if marker_tick.borrow().is_some() {
                return;
            }
            let engine = Rc::clone(&engine);
            let tick = Interval::new(MARKER_TICK_MS, move || {
                if let Ok(guard) = engine.try_borrow()
                    && let Some(engine) = guard.as_ref()
                {
                    render_now(engine);
                }
            });
            *marker_tick.borrow_mut() = Some(tick);
        });
    }

    let on_pointer_down = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::PointerEvent| {
                if ev.button() == 1 {
                    // Suppress the browser's middle-click autoscroll.
                    ev.prevent_default();
                }
                if let Some(canvas) = canvas_ref.get() {
                    if canvas.focus().is_err() {
                        log::debug!("canvas refused focus");
                    }
                    if canvas.set_pointer_capture(ev.pointer_id()).is_err() {
                        log::debug!("pointer capture failed for {}", ev.pointer_id());
                    }
                }
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    let point = pointer_point(&ev);
                    let button = map_button(ev.button());
                    let actions = engine.on_pointer_down(point, button);
                    process_actions(actions, engine, signals);
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_move = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::PointerEvent| {
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    let point = pointer_point(&ev);
                    match engine.on_pointer_move(point) {
                        Ok(actions) => process_actions(actions, engine, signals),
                        Err(err) => {
                            log::error!("gesture abandoned: {err}");
                            publish_tool(engine, signals.ui);
                            publish_view(engine, signals.canvas_view);
                        }
                    }
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_up = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::PointerEvent| {
                if let Some(canvas) = canvas_ref.get()
                    && canvas.release_pointer_capture(ev.pointer_id()).is_err()
                {
                    log::debug!("pointer {} was not captured", ev.pointer_id());
                }
                end_gesture(&engine, signals);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    // Pointer cancel, or leaving the canvas without capture, ends the gesture like a release.
    let on_pointer_cancel = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |_ev: leptos::ev::PointerEvent| end_gesture(&engine, signals)
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_wheel = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::WheelEvent| {
                // Keeps ctrl-wheel from zooming the page and plain wheel from scrolling it.
                ev.prevent_default();
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    let point = wheel_point(&ev);
                    let delta = WheelDelta { dx: ev.delta_x(), dy: ev.delta_y() };
                    let modifiers = map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
                    let actions = engine.on_wheel(point, delta, modifiers);
                    process_actions(actions, engine, signals);
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::WheelEvent| {}
        }
    };

    let on_key_down = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::KeyboardEvent| {
                let key = ev.key();
                if should_prevent_default_key(&key) {
                    ev.prevent_default();
                }
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    let actions = engine.on_key_down(CanvasKey(key));
                    process_actions(actions, engine, signals);
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::KeyboardEvent| {}
        }
    };

    view! {
        <canvas
            class="canvas-host"
            node_ref=canvas_ref
            tabindex="0"
            style:width=format!("{DEFAULT_CANVAS_WIDTH}px")
            style:height=format!("{DEFAULT_CANVAS_HEIGHT}px")
            style:cursor=move || canvas_view.get().cursor
            on:pointerdown=on_pointer_down
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up
            on:pointercancel=on_pointer_cancel.clone()
            on:pointerleave=on_pointer_cancel
            on:wheel=on_wheel
            on:keydown=on_key_down
        >
            "Your browser does not support canvas."
        </canvas>
    }
}
