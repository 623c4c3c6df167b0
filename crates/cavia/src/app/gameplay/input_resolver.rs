#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Intent {
    None,
    SetTarget(Vec2),
    EnterBuilding(Building),
    ExitBuilding,
    KeyStep,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct InputResolver {
    held: HeldKeys,
    touch_origin: Option<Vec2>,
}

impl InputResolver {
    pub(crate) fn held(&self) -> &HeldKeys {
        &self.held
    }

    #[cfg(test)]
    pub(crate) fn touch_origin(&self) -> Option<Vec2> {
        self.touch_origin
    }

    pub(crate) fn resolve<U: UiNotifier>(
        &mut self,
        event: &InputEvent,
        state: &GameState<U>,
    ) -> Intent {
        match *event {
            InputEvent::KeyDown(key) => {
                self.held.set(key, true);
                if key.is_movement() {
                    Intent::KeyStep
                } else if key == Key::Escape && state.mode().is_inside() {
                    Intent::ExitBuilding
                } else {
                    Intent::None
                }
            }
            InputEvent::KeyUp(key) => {
                self.held.set(key, false);
                Intent::None
            }
            InputEvent::PointerDown(point) => resolve_click(point, state),
            InputEvent::PointerMove(_) => Intent::None,
            InputEvent::TouchStart {
                position,
                touch_count,
            } => {
                self.touch_origin = Some(position);
                if touch_count == 1 {
                    resolve_click(position, state)
                } else {
                    Intent::None
                }
            }
            InputEvent::TouchMove {
                position,
                touch_count,
            } => {
                if touch_count != 1 {
                    return Intent::None;
                }
                let Some(origin) = self.touch_origin else {
                    return Intent::None;
                };
                match swipe_direction(origin, position, state.config().swipe_threshold) {
                    Some(direction) if self.hold_swipe(direction) => Intent::KeyStep,
                    _ => Intent::None,
                }
            }
            InputEvent::TouchEnd => {
                self.touch_origin = None;
                self.held.release_arrows();
                Intent::None
            }
        }
    }

    fn hold_swipe(&mut self, direction: Direction) -> bool {
        let key = direction.arrow_key();
        let opposite = direction.opposite().arrow_key();
        let changed = !self.held.is_down(key) || self.held.is_down(opposite);
        self.held.set(key, true);
        self.held.set(opposite, false);
        changed
    }
}

fn resolve_click<U: UiNotifier>(screen: Vec2, state: &GameState<U>) -> Intent {
    match state.mode() {
        Mode::Outside(_) => {
            let world_point = screen_to_world(screen, state.camera());
            match building_at(state.visible_buildings(), world_point) {
                Some(building) => Intent::EnterBuilding(building.clone()),
                None => Intent::SetTarget(world_point),
            }
        }
        Mode::Inside { .. } => {
            if state.config().exit_zone.contains(screen) {
                Intent::ExitBuilding
            } else {
                Intent::SetTarget(screen)
            }
        }
    }
}

fn cursor_hint_at<U: UiNotifier>(screen: Vec2, state: &GameState<U>) -> CursorHint {
    let over_target = match state.mode() {
        Mode::Outside(_) => {
            let world_point = screen_to_world(screen, state.camera());
            building_at(state.visible_buildings(), world_point).is_some()
        }
        Mode::Inside { .. } => state.config().exit_zone.contains(screen),
    };
    if over_target {
        CursorHint::Pointer
    } else {
        CursorHint::Crosshair
    }
}

fn swipe_direction(origin: Vec2, current: Vec2, threshold: f32) -> Option<Direction> {
    let dx = current.x - origin.x;
    let dy = current.y - origin.y;
    if dx.abs() <= threshold && dy.abs() <= threshold {
        return None;
    }
    let direction = if dx.abs() > dy.abs() {
        if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if dy > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    };
    Some(direction)
}
