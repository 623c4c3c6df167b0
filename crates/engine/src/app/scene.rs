use std::time::Duration;

use super::{DrawList, InputEvent, Vec2, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKey {
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    /// Activate the other scene, loading it first if it never was.
    SwitchTo(SceneKey),
    /// Unload and reload the target scene, then activate it.
    HardResetTo(SceneKey),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorHint {
    #[default]
    Default,
    Pointer,
    Crosshair,
}

pub trait Scene {
    fn load(&mut self);
    fn handle_input(&mut self, event: &InputEvent, viewport: Viewport) -> SceneCommand;
    fn update(&mut self, elapsed: Duration, viewport: Viewport) -> SceneCommand;
    fn render(&self, viewport: Viewport, draw_list: &mut DrawList);
    fn unload(&mut self);
    /// Pure query; must not change scene state.
    fn cursor_hint(&self, _pointer_px: Vec2, _viewport: Viewport) -> CursorHint {
        CursorHint::Default
    }
    fn title(&self) -> Option<String> {
        None
    }
}

struct SceneRuntime {
    scene: Box<dyn Scene>,
    is_loaded: bool,
}

impl SceneRuntime {
    fn new(scene: Box<dyn Scene>) -> Self {
        Self {
            scene,
            is_loaded: false,
        }
    }

    fn load_if_needed(&mut self) {
        if self.is_loaded {
            return;
        }
        self.scene.load();
        self.is_loaded = true;
    }

    fn unload_if_loaded(&mut self) {
        if self.is_loaded {
            self.scene.unload();
            self.is_loaded = false;
        }
    }
}

pub(crate) struct SceneMachine {
    scene_a: SceneRuntime,
    scene_b: SceneRuntime,
    active_scene: SceneKey,
}

impl SceneMachine {
    pub(crate) fn new(
        scene_a: Box<dyn Scene>,
        scene_b: Box<dyn Scene>,
        active_scene: SceneKey,
    ) -> Self {
        Self {
            scene_a: SceneRuntime::new(scene_a),
            scene_b: SceneRuntime::new(scene_b),
            active_scene,
        }
    }

    pub(crate) fn active_scene(&self) -> SceneKey {
        self.active_scene
    }

    pub(crate) fn load_active(&mut self) {
        self.active_runtime_mut().load_if_needed();
    }

    pub(crate) fn handle_input_active(
        &mut self,
        event: &InputEvent,
        viewport: Viewport,
    ) -> SceneCommand {
        self.active_runtime_mut()
            .scene
            .handle_input(event, viewport)
    }

    pub(crate) fn update_active(&mut self, elapsed: Duration, viewport: Viewport) -> SceneCommand {
        self.active_runtime_mut().scene.update(elapsed, viewport)
    }

    pub(crate) fn render_active(&self, viewport: Viewport, draw_list: &mut DrawList) {
        self.active_runtime_ref().scene.render(viewport, draw_list);
    }

    pub(crate) fn cursor_hint_active(&self, pointer_px: Vec2, viewport: Viewport) -> CursorHint {
        self.active_runtime_ref()
            .scene
            .cursor_hint(pointer_px, viewport)
    }

    pub(crate) fn title_active(&self) -> Option<String> {
        self.active_runtime_ref().scene.title()
    }

    pub(crate) fn apply(&mut self, command: SceneCommand) -> bool {
        match command {
            SceneCommand::None => false,
            SceneCommand::SwitchTo(next_scene) => self.switch_to(next_scene),
            SceneCommand::HardResetTo(next_scene) => self.hard_reset_to(next_scene),
        }
    }

    fn switch_to(&mut self, next_scene: SceneKey) -> bool {
        if self.active_scene == next_scene {
            return false;
        }
        self.runtime_mut(next_scene).load_if_needed();
        self.active_scene = next_scene;
        true
    }

    fn hard_reset_to(&mut self, next_scene: SceneKey) -> bool {
        let runtime = self.runtime_mut(next_scene);
        runtime.unload_if_loaded();
        runtime.load_if_needed();
        self.active_scene = next_scene;
        true
    }

    pub(crate) fn shutdown_all(&mut self) {
        self.scene_a.unload_if_loaded();
        self.scene_b.unload_if_loaded();
    }

    fn active_runtime_mut(&mut self) -> &mut SceneRuntime {
        self.runtime_mut(self.active_scene)
    }

    fn active_runtime_ref(&self) -> &SceneRuntime {
        self.runtime_ref(self.active_scene)
    }

    fn runtime_mut(&mut self, key: SceneKey) -> &mut SceneRuntime {
        match key {
            SceneKey::A => &mut self.scene_a,
            SceneKey::B => &mut self.scene_b,
        }
    }

    fn runtime_ref(&self, key: SceneKey) -> &SceneRuntime {
        match key {
            SceneKey::A => &self.scene_a,
            SceneKey::B => &self.scene_b,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    type Log = Rc<RefCell<Vec<String>>>;

    struct RecordingScene {
        name: &'static str,
        log: Log,
        on_update: SceneCommand,
    }

    impl RecordingScene {
        fn boxed(name: &'static str, log: &Log, on_update: SceneCommand) -> Box<dyn Scene> {
            Box::new(Self {
                name,
                log: Rc::clone(log),
                on_update,
            })
        }

        fn record(&self, what: &str) {
            self.log.borrow_mut().push(format!("{}:{what}", self.name));
        }
    }

    impl Scene for RecordingScene {
        fn load(&mut self) {
            self.record("load");
        }

        fn handle_input(&mut self, _event: &InputEvent, _viewport: Viewport) -> SceneCommand {
            self.record("input");
            SceneCommand::None
        }

        fn update(&mut self, _elapsed: Duration, _viewport: Viewport) -> SceneCommand {
            self.record("update");
            self.on_update
        }

        fn render(&self, _viewport: Viewport, draw_list: &mut DrawList) {
            draw_list.clear([0, 0, 0, 255]);
        }

        fn unload(&mut self) {
            self.record("unload");
        }

        fn title(&self) -> Option<String> {
            Some(self.name.to_string())
        }
    }

    fn machine(log: &Log, a_update: SceneCommand) -> SceneMachine {
        SceneMachine::new(
            RecordingScene::boxed("a", log, a_update),
            RecordingScene::boxed("b", log, SceneCommand::None),
            SceneKey::A,
        )
    }

    #[test]
    fn load_active_is_idempotent() {
        let log = Log::default();
        let mut scenes = machine(&log, SceneCommand::None);
        scenes.load_active();
        scenes.load_active();
        assert_eq!(*log.borrow(), vec!["a:load"]);
    }

    #[test]
    fn switch_loads_target_once_and_keeps_previous_loaded() {
        let log = Log::default();
        let mut scenes = machine(&log, SceneCommand::SwitchTo(SceneKey::B));
        scenes.load_active();

        let command = scenes.update_active(Duration::from_millis(16), Viewport::default());
        assert!(scenes.apply(command));
        assert_eq!(scenes.active_scene(), SceneKey::B);
        assert!(scenes.apply(SceneCommand::SwitchTo(SceneKey::A)));
        assert!(scenes.apply(SceneCommand::SwitchTo(SceneKey::B)));

        assert_eq!(*log.borrow(), vec!["a:load", "a:update", "b:load"]);
        assert_eq!(scenes.title_active().as_deref(), Some("b"));
    }

    #[test]
    fn switch_to_active_scene_is_noop() {
        let log = Log::default();
        let mut scenes = machine(&log, SceneCommand::None);
        scenes.load_active();
        assert!(!scenes.apply(SceneCommand::SwitchTo(SceneKey::A)));
        assert!(!scenes.apply(SceneCommand::None));
    }

    #[test]
    fn hard_reset_reloads_target() {
        let log = Log::default();
        let mut scenes = machine(&log, SceneCommand::None);
        scenes.load_active();
        assert!(scenes.apply(SceneCommand::SwitchTo(SceneKey::B)));
        assert!(scenes.apply(SceneCommand::SwitchTo(SceneKey::A)));
        assert!(scenes.apply(SceneCommand::HardResetTo(SceneKey::B)));

        assert_eq!(
            *log.borrow(),
            vec!["a:load", "b:load", "b:unload", "b:load"]
        );
        assert_eq!(scenes.active_scene(), SceneKey::B);
    }

    #[test]
    fn shutdown_unloads_every_loaded_scene() {
        let log = Log::default();
        let mut scenes = machine(&log, SceneCommand::None);
        scenes.load_active();
        scenes.shutdown_all();
        scenes.shutdown_all();
        assert_eq!(*log.borrow(), vec!["a:load", "a:unload"]);
    }

    #[test]
    fn input_goes_to_active_scene_only() {
        let log = Log::default();
        let mut scenes = machine(&log, SceneCommand::None);
        scenes.load_active();
        let _ = scenes.handle_input_active(&InputEvent::TouchEnd, Viewport::default());
        let mut draw_list = DrawList::default();
        scenes.render_active(Viewport::default(), &mut draw_list);

        assert_eq!(*log.borrow(), vec!["a:load", "a:input"]);
        assert_eq!(draw_list.len(), 1);
        assert_eq!(
            scenes.cursor_hint_active(Vec2::ZERO, Viewport::default()),
            CursorHint::Default
        );
    }
}
