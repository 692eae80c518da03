use ramsight_core::{
    BoxedGameDecoder, Category, GameDecoder, GameObject, ObjectRegistry, Position, RamSnapshot,
    Rgb, Size, high_nibble, signed_nibble,
};
use tracing::{debug, trace};

use super::{
    ID,
    layout::{self, enemy, missile, player},
    raw,
};

/// Registry slot indices.
pub mod slot {
    pub const PLAYER: usize = 0;
    pub const MISSILE: usize = 1;
    pub const FIRST_ENEMY: usize = 2;
    pub const SCORE: usize = 8;
    pub const LIVES: usize = 9;
    pub const FUEL_METER: usize = 10;
    pub const LEN: usize = 11;
}

/// How many slots above its own a slot looks for an object that moved down.
const SLOT_SHIFT_WINDOW: usize = 1;

const LANE_STEP: i32 = 15;
const X_CORRECTION_BIAS: i32 = 6;
/// Distance above the top edge at which a new object spawns.
const SPAWN_MARGIN: i32 = 5;
/// Objects are visible while their top is above this line.
const PLAYFIELD_BOTTOM: i32 = 161;
/// Bottom edges are clipped to this line.
const CLIP_BOTTOM: i32 = 162;
/// The missile's y counter starts from this line.
const MISSILE_BASE_Y: i32 = 162;

const YELLOW: Rgb = [232, 232, 74];
const PLAYER_Y: i32 = 145;

const SCORE_RIGHT_X: i32 = 97;
const GLYPH_WIDTH: i32 = 6;
const GLYPH_ADVANCE: i32 = 8;

/// Objects that scroll down the river.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
enum EnemyKind {
    Jet,
    Helicopter,
    Tanker,
    Bridge,
    FuelDepot,
}

impl EnemyKind {
    fn from_type_code(code: u8) -> Option<Self> {
        match code {
            enemy::TYPE_JET => Some(Self::Jet),
            enemy::TYPE_HELICOPTER | enemy::TYPE_HELICOPTER_ALT => Some(Self::Helicopter),
            enemy::TYPE_TANKER => Some(Self::Tanker),
            enemy::TYPE_BRIDGE => Some(Self::Bridge),
            enemy::TYPE_FUEL_DEPOT => Some(Self::FuelDepot),
            _ => None,
        }
    }

    const fn category(self) -> Category {
        match self {
            Self::Jet => Category::Jet,
            Self::Helicopter => Category::Helicopter,
            Self::Tanker => Category::Tanker,
            Self::Bridge => Category::Bridge,
            Self::FuelDepot => Category::FuelDepot,
        }
    }

    const fn width(self) -> i32 {
        match self {
            Self::Jet => 10,
            Self::Helicopter => 8,
            Self::Tanker => 16,
            Self::Bridge => 32,
            Self::FuelDepot => 7,
        }
    }

    const fn final_height(self) -> i32 {
        match self {
            Self::Jet | Self::Helicopter => 10,
            Self::Tanker => 8,
            Self::Bridge => 18,
            Self::FuelDepot => 24,
        }
    }

    /// Bridges appear at full height, everything else grows from a single line.
    const fn initial_height(self) -> i32 {
        match self {
            Self::Bridge => self.final_height(),
            Self::Jet | Self::Helicopter | Self::Tanker | Self::FuelDepot => 1,
        }
    }

    const fn rgb(self) -> Rgb {
        match self {
            Self::Jet => [117, 181, 239],
            Self::Helicopter => [0, 64, 48],
            Self::Tanker => [84, 160, 197],
            Self::Bridge => [134, 134, 29],
            Self::FuelDepot => [210, 91, 94],
        }
    }

    /// Helicopters and fuel depots spawn one extra line above the edge.
    const fn spawns_higher(self) -> bool {
        matches!(self, Self::Helicopter | Self::FuelDepot)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DescentPhase {
    /// Above the top edge, moving down.
    Entering,
    /// At the top edge, growing one line per frame.
    Growing,
    /// Full height, moving down.
    Descending,
}

/// A scrolling object followed across frames, visible or not.
#[derive(Debug, Clone)]
struct Track {
    kind: EnemyKind,
    object: GameObject,
    phase: DescentPhase,
}

impl Track {
    fn spawn(kind: EnemyKind, x: i32) -> Self {
        let h = kind.initial_height();
        let mut y = -SPAWN_MARGIN;
        if kind.spawns_higher() {
            y -= h;
        }
        let object = GameObject::new(kind.category())
            .with_position(Position::new(x, y))
            .with_size(Size::new(kind.width(), h))
            .with_rgb(kind.rgb());
        Self {
            kind,
            object,
            phase: DescentPhase::Entering,
        }
    }

    /// Moves the object to its position for the next frame.
    fn advance(&mut self, x: i32, scrolling: bool) {
        let Position { y, .. } = self.object.position();
        let h = self.object.h();
        let mut next_y = y;
        if scrolling {
            if y < 0 {
                next_y += 1;
                self.phase = DescentPhase::Entering;
            } else if y == 0
                && h < self.kind.final_height()
                && self.phase != DescentPhase::Descending
            {
                self.object.set_height(h + 1);
                self.phase = DescentPhase::Growing;
            } else {
                next_y += 1;
                self.phase = DescentPhase::Descending;
            }
        }
        self.object.set_position(Position::new(x, next_y));
    }

    /// Turns the object into a `kind` at the same place, keeping its history.
    fn reclassify(&mut self, kind: EnemyKind) {
        let h = self.object.h().min(kind.final_height());
        let mut object = GameObject::new(kind.category())
            .with_position(self.object.prev_position())
            .with_size(Size::new(kind.width(), h))
            .with_rgb(kind.rgb());
        object.set_position(self.object.position());
        self.kind = kind;
        self.object = object;
    }

    fn clip_to_playfield(&mut self) {
        let y = self.object.y();
        if y + self.object.h() > CLIP_BOTTOM {
            self.object.set_height((CLIP_BOTTOM - y).max(0));
        }
    }
}

/// Revised-mode decoder for River Raid.
///
/// # Example
///
/// ```
/// use ramsight_core::{Category, GameDecoder, RamSnapshot, RAM_SIZE};
/// use ramsight_games::riverraid::RiverRaidDecoder;
///
/// let mut decoder = RiverRaidDecoder::new();
/// let mut registry = decoder.initialize(false);
///
/// let mut bytes = [0; RAM_SIZE];
/// bytes[51] = 76; // player x
/// decoder.decode(&mut registry, &RamSnapshot::new(bytes), false);
///
/// let player = registry.get(0).unwrap();
/// assert_eq!(player.category(), Category::Player);
/// assert_eq!((player.x(), player.y()), (77, 145));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RiverRaidDecoder {
    tracks: [Option<Track>; enemy::SLOTS],
    prev_status: Option<u8>,
}

impl RiverRaidDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn boxed() -> BoxedGameDecoder {
        Box::new(Self::new())
    }

    /// The river stands still while the status byte holds the same non-zero value.
    fn is_scrolling(&self, ram: &RamSnapshot) -> bool {
        let status = ram[player::STATUS];
        status == 0 || self.prev_status != Some(status)
    }

    fn decode_player(registry: &mut ObjectRegistry, ram: &RamSnapshot) {
        let x = i32::from(ram[player::X]) + 1;
        match registry.get_mut(slot::PLAYER) {
            Some(player) => player.set_position(Position::new(x, PLAYER_Y)),
            None => registry.set(
                slot::PLAYER,
                player_template().with_position(Position::new(x, PLAYER_Y)),
            ),
        }
    }

    fn decode_missile(registry: &mut ObjectRegistry, ram: &RamSnapshot) {
        let x = ram[missile::X];
        let y = MISSILE_BASE_Y - i32::from(ram[missile::Y]);
        if x == 0 || y < 0 {
            registry.clear(slot::MISSILE);
            return;
        }
        let position = Position::new(i32::from(x) - 1, y);
        match registry.get_mut(slot::MISSILE) {
            Some(missile) => missile.set_position(position),
            None => registry.set(slot::MISSILE, missile_template().with_position(position)),
        }
    }

    fn decode_enemies(&mut self, registry: &mut ObjectRegistry, ram: &RamSnapshot) {
        let scrolling = self.is_scrolling(ram);
        let lanes = ram.bytes::<{ enemy::SLOTS }>(enemy::LANE);
        let sizes = ram.bytes::<{ enemy::SLOTS }>(enemy::SIZE);
        let types = ram.bytes::<{ enemy::SLOTS }>(enemy::TYPE);

        for i in 0..enemy::SLOTS {
            let Some(kind) = EnemyKind::from_type_code(types[i]) else {
                if types[i] > enemy::TYPE_FUEL_DEPOT {
                    debug!(slot = i, code = types[i], "unknown object type code");
                }
                if self.tracks[i].take().is_some() {
                    trace!(slot = i, "object removed");
                }
                continue;
            };
            let x = lane_x(lanes[i], sizes[i]);

            let mut track = match self.tracks[i].take() {
                Some(track) if track.kind == kind => track,
                current => {
                    if let Some((from, track)) = self.take_shifted(i, kind) {
                        trace!(slot = i, from, %kind, "object moved down a slot");
                        track
                    } else if let Some(mut track) = current {
                        debug!(slot = i, from = %track.kind, to = %kind, "object reclassified");
                        track.reclassify(kind);
                        track
                    } else {
                        let mut track = Track::spawn(kind, x);
                        track.object.set_orientation(orientation(sizes[i]));
                        trace!(slot = i, %kind, y = track.object.y(), "object spawned");
                        self.tracks[i] = Some(track);
                        continue;
                    }
                }
            };
            track.advance(x, scrolling);
            track.object.set_orientation(orientation(sizes[i]));
            track.clip_to_playfield();

            if track.object.y() >= PLAYFIELD_BOTTOM {
                trace!(slot = i, %kind, "object left the playfield");
                continue;
            }
            self.tracks[i] = Some(track);
        }

        for (i, track) in self.tracks.iter().enumerate() {
            let slot = slot::FIRST_ENEMY + i;
            match track {
                Some(track) if (0..PLAYFIELD_BOTTOM).contains(&track.object.y()) => {
                    registry.set(slot, track.object.clone());
                }
                _ => registry.clear(slot),
            }
        }
    }

    /// Takes a `kind` tracker from the slots just above `slot`, if any.
    fn take_shifted(&mut self, slot: usize, kind: EnemyKind) -> Option<(usize, Track)> {
        let last = (slot + SLOT_SHIFT_WINDOW).min(enemy::SLOTS - 1);
        (slot + 1..=last).find_map(|from| {
            let entry = &mut self.tracks[from];
            if entry.as_ref().is_some_and(|track| track.kind == kind) {
                entry.take().map(|track| (from, track))
            } else {
                None
            }
        })
    }

    fn decode_hud(registry: &mut ObjectRegistry, ram: &RamSnapshot) {
        let extra_digits = i32::try_from(layout::SCORE.lit_digits(ram) - 1).unwrap_or(0);
        let mut score = registry.take(slot::SCORE).unwrap_or_else(score_template);
        score.set_position(Position::new(
            SCORE_RIGHT_X - GLYPH_ADVANCE * extra_digits,
            score.y(),
        ));
        score.set_width(GLYPH_WIDTH + GLYPH_ADVANCE * extra_digits);
        score.set_value(i64::from(layout::SCORE.decode(ram)));
        registry.set(slot::SCORE, score);

        let mut lives = registry.take(slot::LIVES).unwrap_or_else(lives_template);
        lives.set_position(lives.position());
        lives.set_value(i64::from(raw::lives(ram)));
        registry.set(slot::LIVES, lives);

        let mut fuel = registry.take(slot::FUEL_METER).unwrap_or_else(fuel_meter_template);
        fuel.set_position(fuel.position());
        fuel.set_value(i64::from(ram[layout::hud::FUEL_HIGH]) * 100 / 255);
        registry.set(slot::FUEL_METER, fuel);
    }
}

impl GameDecoder for RiverRaidDecoder {
    fn game_id(&self) -> &str {
        ID
    }

    fn initialize(&mut self, hud: bool) -> ObjectRegistry {
        *self = Self::new();
        let mut registry = ObjectRegistry::new(slot::LEN);
        registry.set(slot::PLAYER, player_template());
        if hud {
            registry.set(slot::SCORE, score_template());
            registry.set(slot::LIVES, lives_template());
            registry.set(slot::FUEL_METER, fuel_meter_template());
        }
        registry
    }

    fn decode(&mut self, registry: &mut ObjectRegistry, ram: &RamSnapshot, hud: bool) {
        registry.advance();
        Self::decode_player(registry, ram);
        Self::decode_missile(registry, ram);
        self.decode_enemies(registry, ram);
        if hud {
            Self::decode_hud(registry, ram);
        } else {
            for slot in [slot::SCORE, slot::LIVES, slot::FUEL_METER] {
                registry.clear(slot);
            }
        }
        self.prev_status = Some(ram[player::STATUS]);
    }

    fn clone_boxed(&self) -> BoxedGameDecoder {
        Box::new(self.clone())
    }
}

/// Absolute x of an enemy slot from its lane and size byte.
fn lane_x(lane: u8, size: u8) -> i32 {
    let correction = i32::from(signed_nibble(high_nibble(size))) - X_CORRECTION_BIAS;
    LANE_STEP * i32::from(lane) - correction
}

fn orientation(size: u8) -> i32 {
    i32::from((size & 0x0F) >> 3)
}

fn player_template() -> GameObject {
    GameObject::new(Category::Player)
        .with_position(Position::new(77, PLAYER_Y))
        .with_size(Size::new(7, 13))
        .with_rgb(YELLOW)
}

fn missile_template() -> GameObject {
    GameObject::new(Category::PlayerMissile)
        .with_size(Size::new(1, 8))
        .with_rgb(YELLOW)
}

fn score_template() -> GameObject {
    GameObject::new(Category::PlayerScore)
        .with_position(Position::new(SCORE_RIGHT_X, 165))
        .with_size(Size::new(GLYPH_WIDTH, 8))
        .with_rgb(YELLOW)
}

fn lives_template() -> GameObject {
    GameObject::new(Category::Lives)
        .with_position(Position::new(57, 192))
        .with_size(Size::new(6, 8))
        .with_rgb(YELLOW)
}

fn fuel_meter_template() -> GameObject {
    GameObject::new(Category::FuelMeter)
        .with_position(Position::new(56, 176))
        .with_size(Size::new(48, 9))
        .with_rgb(YELLOW)
}
