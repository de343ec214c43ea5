//! Tableau is a 2D scene-graph engine core.
//!
//! A [`Stage`] shows one [`Scene`] at a time. Each scene owns a [`NodeTree`]: an arena of
//! [`Node`]s linked by parent/child ids, each carrying a [`Transform`], optional drawable
//! [`Content`], attached [`Action`]s, periodic [`Task`]s and event [`Listener`]s.
//!
//! # Frame overview
//!
//! 1. **Events**: window events are dispatched through the current scene, children first and
//!    topmost first, until a listener marks the event handled.
//! 2. **Deferred work**: closures posted from other threads (for example HTTP completions) run
//!    on the main thread against the [`Stage`].
//! 3. **Update**: tasks, actions and update hooks advance by the frame delta; a running
//!    [`Transition`] advances both of its scenes.
//! 4. **Render**: nodes are drawn in z order through the [`Renderer`] trait.
//!
//! The [`Application`] type runs this loop over a [`Window`] and a [`Renderer`]. The
//! [`HeadlessWindow`] and [`RecordingRenderer`] pair makes the whole loop deterministic and
//! inspectable without a platform window.
//!
//! Action constructors live in [`ops`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod app;
mod assets;
mod event;
mod foundation;
mod network;
mod node;
mod render;
mod scene;
mod transform;

pub use animation::ops;

pub use animation::action::{Action, ActionCallback, ActionKind, ActionState, Delay};
pub use animation::ease::Ease;
pub use animation::group::{Group, Loop};
pub use animation::tween::{Lerp, ProgressCallback, Tween, TweenKind};
pub use animation::walk::Walk;
pub use app::application::Application;
pub use app::config::{AppConfig, NetworkConfig};
pub use app::deferred::{Deferred, DeferredQueue, DeferredSender};
pub use app::window::{HeadlessWindow, Window};
pub use assets::loader::{ImageLoader, ResourceLoader};
pub use assets::manifest::{FontEntry, ImageEntry, Manifest, ManifestReport, ManifestVersion};
pub use assets::store::{FontCollection, Frame, FrameSequence, ResourceCache, Texture};
pub use event::event::{Event, EventType, KeyCode, MouseButton, MouseEvent};
pub use event::listener::{EventCtx, Listener, ListenerCallback};
pub use foundation::core::{Affine, BezPath, Color, Point, Rect, SceneId, Size, Vec2};
pub use foundation::error::{TableauError, TableauResult};
pub use network::client::{HttpClient, ResponseCallback};
#[cfg(feature = "http")]
pub use network::transport::ReqwestTransport;
pub use network::transport::{HttpRequest, HttpResponse, Method, Timeouts, Transport};
pub use node::button::{BUTTON_LISTENER, Button, ButtonCallback, ButtonState};
pub use node::node::{Content, Node, Shape, ShapeStyle, Text, UpdateHook};
pub use node::task::{Task, TaskCallback};
pub use node::tree::{NodeId, NodeTree};
pub use render::backend::{LayerArea, Renderer};
pub use render::recording::{DrawOp, RecordingRenderer};
pub use scene::scene::{Scene, SceneHook};
pub use scene::stage::Stage;
pub use scene::transition::{MoveDirection, Transition, TransitionKind};
pub use transform::affine::{Matrices, Transform};
pub use transform::geometry::Quad;
