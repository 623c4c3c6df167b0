#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum WorldId {
    Stad,
    Natuur,
    Strand,
    Winter,
    Woestijn,
    Jungle,
    Zwembad,
    Dierenstad,
}

impl WorldId {
    pub(crate) const ALL: [WorldId; 8] = [
        WorldId::Stad,
        WorldId::Natuur,
        WorldId::Strand,
        WorldId::Winter,
        WorldId::Woestijn,
        WorldId::Jungle,
        WorldId::Zwembad,
        WorldId::Dierenstad,
    ];

    pub(crate) fn token(self) -> &'static str {
        match self {
            WorldId::Stad => "stad",
            WorldId::Natuur => "natuur",
            WorldId::Strand => "strand",
            WorldId::Winter => "winter",
            WorldId::Woestijn => "woestijn",
            WorldId::Jungle => "jungle",
            WorldId::Zwembad => "zwembad",
            WorldId::Dierenstad => "dierenstad",
        }
    }

    pub(crate) fn display_name(self) -> &'static str {
        match self {
            WorldId::Stad => "Stad",
            WorldId::Natuur => "Natuur",
            WorldId::Strand => "Strand",
            WorldId::Winter => "Winter",
            WorldId::Woestijn => "Woestijn",
            WorldId::Jungle => "Jungle",
            WorldId::Zwembad => "Zwembad",
            WorldId::Dierenstad => "Dierenstad",
        }
    }

    pub(crate) fn from_digit(digit: u8) -> Option<WorldId> {
        let index = usize::from(digit).checked_sub(1)?;
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown world '{token}'; expected one of: {}", world_token_list())]
pub(crate) struct UnknownWorldError {
    token: String,
}

impl FromStr for WorldId {
    type Err = UnknownWorldError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let token = raw.trim();
        Self::ALL
            .into_iter()
            .find(|world| world.token().eq_ignore_ascii_case(token))
            .ok_or_else(|| UnknownWorldError {
                token: raw.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Building {
    pub(crate) name: &'static str,
    pub(crate) rect: Rect,
    pub(crate) color: Rgba,
}

impl Building {
    pub(crate) fn exit_spawn(&self, offset: f32) -> Vec2 {
        Vec2::new(self.rect.center_x(), self.rect.bottom() + offset)
    }
}

/// Exclusive on every bound: `min_x < x < max_x` and `y > min_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ExitZone {
    pub(crate) min_x: f32,
    pub(crate) max_x: f32,
    pub(crate) min_y: f32,
}

impl ExitZone {
    pub(crate) fn contains(&self, point: Vec2) -> bool {
        point.y > self.min_y && point.x > self.min_x && point.x < self.max_x
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Mode {
    Outside(WorldId),
    Inside { world: WorldId, building: Building },
}

impl Mode {
    pub(crate) fn world(&self) -> WorldId {
        match self {
            Mode::Outside(world) | Mode::Inside { world, .. } => *world,
        }
    }

    pub(crate) fn is_inside(&self) -> bool {
        matches!(self, Mode::Inside { .. })
    }

    #[cfg(test)]
    pub(crate) fn building(&self) -> Option<&Building> {
        match self {
            Mode::Outside(_) => None,
            Mode::Inside { building, .. } => Some(building),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlayerState {
    pub(crate) position: Vec2,
    pub(crate) speed: f32,
    target: Option<Vec2>,
    pub(crate) is_moving: bool,
    pub(crate) animation_phase: f32,
}

impl PlayerState {
    pub(crate) fn new(position: Vec2, speed: f32) -> Self {
        Self {
            position,
            speed,
            target: None,
            is_moving: false,
            animation_phase: 0.0,
        }
    }

    pub(crate) fn target(&self) -> Option<Vec2> {
        self.target
    }

    pub(crate) fn set_target(&mut self, target: Vec2) {
        self.target = Some(target);
    }

    pub(crate) fn clear_target(&mut self) {
        self.target = None;
    }

    pub(crate) fn place_at(&mut self, position: Vec2) {
        self.position = position;
        self.clear_target();
    }

    pub(crate) fn reset(&mut self, spawn: Vec2) {
        self.place_at(spawn);
        self.is_moving = false;
        self.animation_phase = 0.0;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GameConfig {
    pub(crate) player_speed: f32,
    pub(crate) arrival_threshold: f32,
    pub(crate) animation_increment: f32,
    pub(crate) bounds_margin: f32,
    pub(crate) world_size: Vec2,
    pub(crate) camera_smooth_factor: f32,
    pub(crate) world_spawn: Vec2,
    pub(crate) interior_size: Vec2,
    pub(crate) interior_spawn: Vec2,
    pub(crate) exit_zone: ExitZone,
    pub(crate) exit_spawn_offset: f32,
    pub(crate) swipe_threshold: f32,
    pub(crate) start_world: WorldId,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            arrival_threshold: ARRIVAL_THRESHOLD,
            animation_increment: ANIMATION_INCREMENT,
            bounds_margin: BOUNDS_MARGIN,
            world_size: WORLD_SIZE,
            camera_smooth_factor: CAMERA_SMOOTH_FACTOR_DEFAULT,
            world_spawn: WORLD_SPAWN,
            interior_size: INTERIOR_SIZE,
            interior_spawn: INTERIOR_SPAWN,
            exit_zone: EXIT_ZONE,
            exit_spawn_offset: EXIT_SPAWN_OFFSET,
            swipe_threshold: SWIPE_THRESHOLD,
            start_world: WorldId::Stad,
        }
    }
}
