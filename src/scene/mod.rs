//! Scenes, transitions and the stage that switches between them.

pub(crate) mod scene;
pub(crate) mod stage;
pub(crate) mod transition;
