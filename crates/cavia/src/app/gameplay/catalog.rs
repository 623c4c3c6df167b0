#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WorldEntry {
    pub(crate) id: WorldId,
    pub(crate) display_name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WorldBackdrop {
    pub(crate) sky: Rgba,
    pub(crate) ground: Rgba,
    pub(crate) horizon_y: f32,
}

pub(crate) trait WorldCatalog {
    fn list_worlds(&self) -> Vec<WorldEntry>;
    fn buildings(&self, world: WorldId) -> &[Building];
    fn backdrop(&self, world: WorldId) -> WorldBackdrop;
}

#[derive(Debug, Clone)]
pub(crate) struct StaticWorldCatalog {
    buildings: HashMap<WorldId, Vec<Building>>,
}

impl StaticWorldCatalog {
    pub(crate) fn new() -> Self {
        let mut buildings = HashMap::new();
        buildings.insert(
            WorldId::Stad,
            vec![
                building("Hotel", 100.0, 300.0, 200.0, 250.0, rgb(0x696969)),
                building("Café", 350.0, 320.0, 150.0, 230.0, rgb(0x8B7355)),
                building("Huis 1", 550.0, 280.0, 180.0, 270.0, rgb(0x778899)),
                building("Winkel", 780.0, 300.0, 160.0, 250.0, rgb(0x4682B4)),
                building("Huis 2", 990.0, 310.0, 170.0, 240.0, rgb(0x6B8E23)),
            ],
        );
        buildings.insert(
            WorldId::Dierenstad,
            vec![
                building("Kapper", 200.0, 350.0, 200.0, 250.0, rgb(0xFFB6C1)),
                building("Supermarkt", 500.0, 350.0, 200.0, 250.0, rgb(0x90EE90)),
                building("Dierenwinkel", 800.0, 350.0, 200.0, 250.0, rgb(0x87CEEB)),
                building("Ziekenhuis", 1100.0, 350.0, 200.0, 250.0, rgb(0xFF6347)),
            ],
        );
        Self { buildings }
    }
}

impl Default for StaticWorldCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldCatalog for StaticWorldCatalog {
    fn list_worlds(&self) -> Vec<WorldEntry> {
        WorldId::ALL
            .into_iter()
            .map(|id| WorldEntry {
                id,
                display_name: id.display_name(),
            })
            .collect()
    }

    fn buildings(&self, world: WorldId) -> &[Building] {
        self.buildings
            .get(&world)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn backdrop(&self, world: WorldId) -> WorldBackdrop {
        let (sky, ground, horizon_y) = match world {
            WorldId::Stad => (0x87CEEB, 0x696969, 550.0),
            WorldId::Natuur => (0x87CEEB, 0x228B22, 500.0),
            WorldId::Strand => (0x87CEEB, 0xF4A460, 600.0),
            WorldId::Winter => (0xB0E0E6, 0xFFFFFF, 500.0),
            WorldId::Woestijn => (0xFFE4B5, 0xDEB887, 400.0),
            WorldId::Jungle => (0x98FB98, 0x556B2F, 500.0),
            WorldId::Zwembad => (0xF0F8FF, 0x4682B4, 500.0),
            WorldId::Dierenstad => (0xFFE4B5, 0xD2691E, 600.0),
        };
        WorldBackdrop {
            sky: rgb(sky),
            ground: rgb(ground),
            horizon_y,
        }
    }
}

fn building(name: &'static str, x: f32, y: f32, w: f32, h: f32, color: Rgba) -> Building {
    Building {
        name,
        rect: Rect::new(x, y, w, h),
        color,
    }
}
