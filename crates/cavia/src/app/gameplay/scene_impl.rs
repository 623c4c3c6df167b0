pub(crate) struct ExploreScene {
    state: GameState<Hud>,
    input: InputResolver,
    colors: CaviaColors,
    store: SharedStore,
    customization_scene: SceneKey,
}

impl ExploreScene {
    pub(crate) fn new(
        config: GameConfig,
        catalog: Box<dyn WorldCatalog>,
        store: SharedStore,
        customization_scene: SceneKey,
    ) -> Self {
        Self {
            state: GameState::new(config, catalog, Hud::default()),
            input: InputResolver::default(),
            colors: CaviaColors::default(),
            store,
            customization_scene,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &GameState<Hud> {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn colors(&self) -> &CaviaColors {
        &self.colors
    }
}

impl Scene for ExploreScene {
    fn load(&mut self) {
        self.input = InputResolver::default();
        self.colors = load_colors(&*self.store.borrow());
        let start_world = self.state.config().start_world;
        self.state.change_world(start_world);
        let worlds = self
            .state
            .catalog()
            .list_worlds()
            .iter()
            .map(|entry| format!("{}={}", entry.id, entry.display_name))
            .collect::<Vec<_>>()
            .join(" ");
        info!(world = %start_world, worlds = %worlds, "explore_scene_loaded");
    }

    fn handle_input(&mut self, event: &InputEvent, _viewport: Viewport) -> SceneCommand {
        match *event {
            InputEvent::KeyDown(Key::Tab) => {
                // Key-ups go to the other scene from here on.
                self.input = InputResolver::default();
                return SceneCommand::SwitchTo(self.customization_scene);
            }
            InputEvent::KeyDown(Key::Digit(digit)) => {
                if let Some(world) = WorldId::from_digit(digit) {
                    self.state.change_world(world);
                }
                return SceneCommand::None;
            }
            _ => {}
        }

        let intent = self.input.resolve(event, &self.state);
        self.state.apply_intent(intent, self.input.held());
        SceneCommand::None
    }

    fn update(&mut self, _elapsed: Duration, viewport: Viewport) -> SceneCommand {
        self.state.update(self.input.held(), viewport);
        SceneCommand::None
    }

    fn render(&self, viewport: Viewport, draw_list: &mut DrawList) {
        draw_scene(draw_list, &self.state, &self.colors, viewport);
    }

    fn unload(&mut self) {
        info!(world = %self.state.mode().world(), "explore_scene_unloaded");
    }

    fn cursor_hint(&self, pointer_px: Vec2, _viewport: Viewport) -> CursorHint {
        cursor_hint_at(pointer_px, &self.state)
    }

    fn title(&self) -> Option<String> {
        Some(self.state.ui().title())
    }
}
