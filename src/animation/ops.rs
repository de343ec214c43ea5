//! Shorthand constructors for common actions.

use std::sync::Arc;

use crate::animation::action::{Action, ActionKind, Delay};
use crate::animation::ease::Ease;
use crate::animation::group::{Group, Loop};
use crate::animation::tween::{Tween, TweenKind};
use crate::animation::walk::Walk;
use crate::assets::store::FrameSequence;
use crate::foundation::core::{BezPath, Point, Vec2};
use crate::node::tree::{NodeId, NodeTree};

/// Wrap a tween kind with a duration and easing.
pub fn tween(duration: f64, kind: TweenKind, ease: Ease) -> Action {
    Action::new(ActionKind::Tween(Tween::new(duration, kind).with_ease(ease)))
}

/// Move by a relative offset.
pub fn move_by(duration: f64, delta: Vec2) -> Action {
    tween(duration, TweenKind::MoveBy(delta), Ease::Linear)
}

/// Move to an absolute position.
pub fn move_to(duration: f64, to: Point) -> Action {
    tween(duration, TweenKind::MoveTo { from: None, to }, Ease::Linear)
}

/// Jump by a relative offset.
pub fn jump_by(duration: f64, delta: Vec2, height: f64, jumps: u32) -> Action {
    tween(
        duration,
        TweenKind::JumpBy {
            delta,
            height,
            jumps: jumps.max(1),
        },
        Ease::Linear,
    )
}

/// Add to the scale.
pub fn scale_by(duration: f64, delta: Vec2) -> Action {
    tween(duration, TweenKind::ScaleBy(delta), Ease::Linear)
}

/// Scale to an absolute value.
pub fn scale_to(duration: f64, to: Vec2) -> Action {
    tween(duration, TweenKind::ScaleTo { from: None, to }, Ease::Linear)
}

/// Rotate by `degrees`.
pub fn rotate_by(duration: f64, degrees: f64) -> Action {
    tween(duration, TweenKind::RotateBy(degrees), Ease::Linear)
}

/// Rotate to `degrees`.
pub fn rotate_to(duration: f64, degrees: f64) -> Action {
    tween(
        duration,
        TweenKind::RotateTo {
            from: None,
            to: degrees,
        },
        Ease::Linear,
    )
}

/// Fade between two explicit opacities.
pub fn fade(duration: f64, from: f64, to: f64) -> Action {
    tween(
        duration,
        TweenKind::Opacity {
            from: Some(from),
            to,
        },
        Ease::Linear,
    )
}

/// Fade from the current opacity to `to`.
pub fn fade_to(duration: f64, to: f64) -> Action {
    tween(duration, TweenKind::Opacity { from: None, to }, Ease::Linear)
}

/// Fade to fully opaque.
pub fn fade_in(duration: f64) -> Action {
    fade_to(duration, 1.0)
}

/// Fade to fully transparent.
pub fn fade_out(duration: f64) -> Action {
    fade_to(duration, 0.0)
}

/// Play a frame sequence once over `duration`.
pub fn animate(duration: f64, frames: Arc<FrameSequence>) -> Action {
    tween(duration, TweenKind::Animate(frames), Ease::Linear)
}

/// Call `f` with eased progress every tick for `duration`.
pub fn custom(duration: f64, f: impl Fn(&mut NodeTree, NodeId, f64) + 'static) -> Action {
    tween(duration, TweenKind::Custom(Arc::new(f)), Ease::Linear)
}

/// Do nothing for `duration`.
pub fn delay(duration: f64) -> Action {
    Action::new(ActionKind::Delay(Delay::new(duration)))
}

/// Call `f` once.
pub fn call(f: impl Fn(&mut NodeTree, NodeId) + 'static) -> Action {
    Action::new(ActionKind::Callback(Arc::new(f)))
}

/// Run `actions` one after another.
pub fn sequence(actions: Vec<Action>) -> Action {
    Action::new(ActionKind::Group(Group::sequence(actions)))
}

/// Run `actions` together.
pub fn parallel(actions: Vec<Action>) -> Action {
    Action::new(ActionKind::Group(Group::parallel(actions)))
}

/// Repeat `action` `times` times.
pub fn repeat(action: Action, times: u32) -> Action {
    let times = i32::try_from(times).unwrap_or(i32::MAX);
    Action::new(ActionKind::Loop(Loop::new(action, times)))
}

/// Repeat `action` until stopped.
pub fn forever(action: Action) -> Action {
    Action::new(ActionKind::Loop(Loop::new(action, -1)))
}

/// Walk along `path` over `duration`.
pub fn walk(duration: f64, path: BezPath, rotating: bool) -> Action {
    Action::new(ActionKind::Walk(
        Walk::new(duration, path).rotating(rotating),
    ))
}
