pub(crate) trait UiNotifier {
    fn on_world_changed(&mut self, display_name: &str);
    fn on_location_changed(&mut self, display_name: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Hud {
    world_label: String,
    location_label: String,
}

impl Hud {
    #[cfg(test)]
    pub(crate) fn world_label(&self) -> &str {
        &self.world_label
    }

    #[cfg(test)]
    pub(crate) fn location_label(&self) -> &str {
        &self.location_label
    }

    pub(crate) fn title(&self) -> String {
        format!(
            "{GAME_TITLE} - {} - {}",
            self.world_label, self.location_label
        )
    }
}

impl UiNotifier for Hud {
    fn on_world_changed(&mut self, display_name: &str) {
        self.world_label = display_name.to_string();
    }

    fn on_location_changed(&mut self, display_name: &str) {
        self.location_label = display_name.to_string();
    }
}

pub(crate) struct GameState<U: UiNotifier> {
    config: GameConfig,
    catalog: Box<dyn WorldCatalog>,
    mode: Mode,
    player: PlayerState,
    camera: Camera2D,
    ui: U,
}

impl<U: UiNotifier> GameState<U> {
    pub(crate) fn new(config: GameConfig, catalog: Box<dyn WorldCatalog>, ui: U) -> Self {
        let player = PlayerState::new(config.world_spawn, config.player_speed);
        Self {
            mode: Mode::Outside(config.start_world),
            config,
            catalog,
            player,
            camera: Camera2D::default(),
            ui,
        }
    }

    pub(crate) fn config(&self) -> &GameConfig {
        &self.config
    }

    pub(crate) fn catalog(&self) -> &dyn WorldCatalog {
        self.catalog.as_ref()
    }

    pub(crate) fn mode(&self) -> &Mode {
        &self.mode
    }

    pub(crate) fn player(&self) -> &PlayerState {
        &self.player
    }

    pub(crate) fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub(crate) fn ui(&self) -> &U {
        &self.ui
    }

    pub(crate) fn visible_buildings(&self) -> &[Building] {
        match &self.mode {
            Mode::Outside(world) => self.catalog.buildings(*world),
            Mode::Inside { .. } => &[],
        }
    }

    pub(crate) fn bounds(&self) -> Rect {
        let size = if self.mode.is_inside() {
            self.config.interior_size
        } else {
            self.config.world_size
        };
        Rect::new(0.0, 0.0, size.x, size.y)
    }

    pub(crate) fn change_world(&mut self, world: WorldId) {
        if let Mode::Inside { building, .. } = &self.mode {
            debug!(building = building.name, "interior_left_by_world_change");
        }
        self.mode = Mode::Outside(world);
        self.player.reset(self.config.world_spawn);
        self.camera.reset();
        self.ui.on_world_changed(world.display_name());
        self.ui.on_location_changed(OUTSIDE_LABEL);
        info!(world = %world, "world_changed");
    }

    /// Panics when `building` is not part of the current world's catalog.
    pub(crate) fn enter_building(&mut self, building: &Building) -> bool {
        let world = match &self.mode {
            Mode::Outside(world) => *world,
            Mode::Inside { .. } => {
                debug!(building = building.name, "enter_building_ignored_already_inside");
                return false;
            }
        };
        assert!(
            self.catalog.buildings(world).contains(building),
            "building '{}' is not in the catalog of world '{}'",
            building.name,
            world
        );

        self.mode = Mode::Inside {
            world,
            building: building.clone(),
        };
        self.player.place_at(self.config.interior_spawn);
        self.ui.on_location_changed(building.name);
        info!(world = %world, building = building.name, "building_entered");
        true
    }

    pub(crate) fn exit_building(&mut self) -> bool {
        let (world, building) = match &self.mode {
            Mode::Inside { world, building } => (*world, building.clone()),
            Mode::Outside(_) => {
                debug!("exit_building_ignored_already_outside");
                return false;
            }
        };

        self.mode = Mode::Outside(world);
        self.player
            .place_at(building.exit_spawn(self.config.exit_spawn_offset));
        self.ui.on_location_changed(OUTSIDE_LABEL);
        info!(world = %world, building = building.name, "building_exited");
        true
    }

    pub(crate) fn set_target(&mut self, target: Vec2) {
        self.player.set_target(target);
    }

    pub(crate) fn step_with_keys(&mut self, held: &HeldKeys) {
        move_with_keys(&mut self.player, held);
        let bounds = self.bounds();
        clamp_player(&mut self.player, bounds, self.config.bounds_margin);
    }

    pub(crate) fn update(&mut self, held: &HeldKeys, viewport: Viewport) {
        let bounds = self.bounds();
        advance_player(&mut self.player, held, bounds, &self.config);
        if !self.mode.is_inside() {
            self.camera.follow(
                self.player.position,
                viewport,
                self.config.world_size,
                self.config.camera_smooth_factor,
            );
        }
    }

    pub(crate) fn apply_intent(&mut self, intent: Intent, held: &HeldKeys) {
        match intent {
            Intent::None => {}
            Intent::SetTarget(target) => self.set_target(target),
            Intent::EnterBuilding(building) => {
                self.enter_building(&building);
            }
            Intent::ExitBuilding => {
                self.exit_building();
            }
            Intent::KeyStep => self.step_with_keys(held),
        }
    }
}
