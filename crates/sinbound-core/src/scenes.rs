//! Page scenes: each composes generators and projects world-space output
//! through a [`Camera`] so surfaces only ever receive screen-space entities.

use glam::{Vec2, Vec3};

use crate::analysis::LevelKind;
use crate::camera::{Camera, Projected};
use crate::carousel::{CarouselLayout, CarouselState, ItemPose};
use crate::color::{Rgb, RADIO_BACKDROP};
use crate::render_loop::Backdrop;
use crate::visuals::{
    Butterfly, ConfettiShower, ExpandingRings, FrameInput, HalftoneGrids, HalftoneOverlay, MetaballField,
    MetaballParams, NeonGridParams, NeonGrids, RadioDiscs, RhythmLane, RingsParams, Shape, Universe, Viewport,
    Visual, VisualEntity,
};

const METABALL_SEED: u64 = 0x5eed_0b1a;
const CONFETTI_SEED: u64 = 0xc0f_e771;

pub trait Scene {
    fn name(&self) -> &'static str;

    fn backdrop(&self) -> Backdrop {
        Backdrop::Clear
    }

    /// Step persistent state for one frame.
    fn advance(&mut self, input: &FrameInput<'_>);

    /// Append this frame's screen-space entities to `out`, back to front.
    fn render(&self, input: &FrameInput<'_>, out: &mut Vec<VisualEntity>);
}

/// Project world-space entities into `out`, farthest first.
///
/// Radii and ring thickness scale with depth; glow blur stays in pixels.
pub fn project_entities(camera: &Camera, viewport: Viewport, world: &[VisualEntity], out: &mut Vec<VisualEntity>) {
    let mut camera = camera.clone();
    camera.set_viewport(viewport);
    let start = out.len();
    for entity in world {
        let Some(p) = camera.project(entity.position, viewport) else {
            continue;
        };
        out.push(screen_entity(entity, p));
    }
    out[start..].sort_by(|a, b| b.position.z.total_cmp(&a.position.z));
}

fn screen_entity(entity: &VisualEntity, p: Projected) -> VisualEntity {
    let shape = match entity.shape {
        Shape::Ring { thickness } => Shape::Ring {
            thickness: thickness * p.scale,
        },
        other => other,
    };
    VisualEntity {
        position: Vec3::new(p.screen.x, p.screen.y, p.depth),
        radius: entity.radius * p.scale,
        shape,
        ..*entity
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HomeStyle {
    /// Expanding rings between two perspective neon lattices.
    #[default]
    Neon,
    /// Flat mirrored halftone grids over the rings.
    Halftone,
}

pub struct HomeScene {
    style: HomeStyle,
    camera: Camera,
    rings: ExpandingRings,
    grids: NeonGrids,
    halftone: HalftoneGrids,
}

impl HomeScene {
    pub fn new(style: HomeStyle) -> Self {
        Self {
            style,
            camera: Camera::looking_at_origin(40.0, 60.0),
            rings: ExpandingRings::new(RingsParams {
                level: LevelKind::Drive,
                ..RingsParams::default()
            }),
            grids: NeonGrids::new(NeonGridParams {
                level: LevelKind::Drive,
                ..NeonGridParams::default()
            }),
            halftone: HalftoneGrids::default(),
        }
    }

    pub fn style(&self) -> HomeStyle {
        self.style
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.grids.set_hovered(hovered);
    }

    pub fn rings(&self) -> &ExpandingRings {
        &self.rings
    }

    pub fn grids(&self) -> &NeonGrids {
        &self.grids
    }
}

impl Default for HomeScene {
    fn default() -> Self {
        Self::new(HomeStyle::Neon)
    }
}

impl Scene for HomeScene {
    fn name(&self) -> &'static str {
        "home"
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop::Fill(Rgb::BLACK)
    }

    fn advance(&mut self, input: &FrameInput<'_>) {
        self.rings.advance(input);
        self.grids.advance(input);
    }

    fn render(&self, input: &FrameInput<'_>, out: &mut Vec<VisualEntity>) {
        let mut world = Vec::new();
        self.rings.generate(input, &mut world);
        if self.style == HomeStyle::Neon {
            self.grids.generate(input, &mut world);
        }
        project_entities(&self.camera, input.viewport, &world, out);
        if self.style == HomeStyle::Halftone {
            self.halftone.generate(input, out);
        }
    }
}

/// A carousel card placed on screen this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardPlacement {
    pub pose: ItemPose,
    pub screen: Vec2,
    /// Pixels per world unit at the card's depth.
    pub scale: f32,
    pub depth: f32,
}

pub struct RadioScene {
    discs: RadioDiscs,
    metaballs: MetaballField,
    overlay: HalftoneOverlay,
    carousel: CarouselState,
    /// Card half-width in world units before item scaling.
    card_half_width: f32,
    pointer: Vec2,
    now_sec: f64,
}

impl RadioScene {
    pub fn new(item_count: usize) -> Self {
        Self::with_layout(CarouselLayout::BIG, item_count)
    }

    pub fn with_layout(layout: CarouselLayout, item_count: usize) -> Self {
        Self {
            discs: RadioDiscs::default(),
            metaballs: MetaballField::new(MetaballParams::default(), METABALL_SEED),
            overlay: HalftoneOverlay::default(),
            carousel: CarouselState::new(layout, item_count),
            card_half_width: 2.4,
            pointer: Vec2::ZERO,
            now_sec: 0.0,
        }
    }

    pub fn carousel(&self) -> &CarouselState {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut CarouselState {
        &mut self.carousel
    }

    pub fn card_half_width(&self) -> f32 {
        self.card_half_width
    }

    /// Scene time of the last frame, for carousel selection timestamps.
    pub fn now_sec(&self) -> f64 {
        self.now_sec
    }

    /// Cards in draw order (back to front).
    pub fn placements(&self, viewport: Viewport) -> Vec<CardPlacement> {
        let mut camera = self.carousel.camera(self.pointer);
        camera.set_viewport(viewport);
        let mut cards: Vec<CardPlacement> = self
            .carousel
            .poses(self.now_sec)
            .into_iter()
            .filter_map(|pose| {
                camera.project(pose.position, viewport).map(|p| CardPlacement {
                    pose,
                    screen: p.screen,
                    scale: p.scale,
                    depth: p.depth,
                })
            })
            .collect();
        cards.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        cards
    }
}

impl Scene for RadioScene {
    fn name(&self) -> &'static str {
        "radio"
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop::Fill(RADIO_BACKDROP)
    }

    fn advance(&mut self, input: &FrameInput<'_>) {
        self.now_sec = input.time.elapsed_sec;
        self.pointer = input.pointer;
        self.metaballs.advance(input);
        self.carousel.update(input.time.delta_sec, input.time.elapsed_sec);
    }

    fn render(&self, input: &FrameInput<'_>, out: &mut Vec<VisualEntity>) {
        self.discs.generate(input, out);
        self.metaballs.generate(input, out);
        for card in self.placements(input.viewport) {
            let half = self.card_half_width * card.pose.scale * card.scale;
            let opacity = if card.pose.active || card.pose.hovered { 0.48 } else { 0.28 };
            out.push(
                VisualEntity::dot(
                    Vec3::new(card.screen.x, card.screen.y, card.depth),
                    half,
                    card.pose.glow_color,
                    opacity,
                )
                .with_shape(Shape::Glow {
                    blur: 24.0 * card.pose.emissive,
                }),
            );
        }
        self.overlay.generate(input, out);
    }
}

pub struct PlayerScene {
    universe: Universe,
    confetti: ConfettiShower,
    rhythm: RhythmLane,
    burst_pending: bool,
}

impl PlayerScene {
    pub fn new() -> Self {
        Self {
            universe: Universe::default(),
            confetti: ConfettiShower::new(CONFETTI_SEED),
            rhythm: RhythmLane::default(),
            burst_pending: false,
        }
    }

    /// Queue a confetti burst for the next frame.
    pub fn celebrate(&mut self) {
        self.burst_pending = true;
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.rhythm.set_playing(playing);
    }

    /// The track ended.
    pub fn track_ended(&mut self) {
        self.rhythm.fail();
    }

    pub fn rhythm(&self) -> &RhythmLane {
        &self.rhythm
    }

    pub fn confetti(&self) -> &ConfettiShower {
        &self.confetti
    }
}

impl Default for PlayerScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for PlayerScene {
    fn name(&self) -> &'static str {
        "player"
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop::Fill(Rgb::BLACK)
    }

    fn advance(&mut self, input: &FrameInput<'_>) {
        if self.burst_pending {
            self.burst_pending = false;
            self.confetti.burst(input.time.elapsed_sec);
        }
        self.universe.advance(input);
        self.confetti.advance(input);
        self.rhythm.advance(input);
    }

    fn render(&self, input: &FrameInput<'_>, out: &mut Vec<VisualEntity>) {
        let mut world = Vec::new();
        self.universe.generate(input, &mut world);
        let camera = self.universe.params().camera(input.pointer);
        project_entities(&camera, input.viewport, &world, out);
        self.rhythm.generate(input, out);
        self.confetti.generate(input, out);
    }
}

#[derive(Default)]
pub struct LoadingScene {
    butterfly: Butterfly,
}

impl LoadingScene {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scene for LoadingScene {
    fn name(&self) -> &'static str {
        "loading"
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop::Veil {
            color: Rgb::BLACK,
            alpha: self.butterfly.params().veil_alpha,
        }
    }

    fn advance(&mut self, input: &FrameInput<'_>) {
        self.butterfly.advance(input);
    }

    fn render(&self, input: &FrameInput<'_>, out: &mut Vec<VisualEntity>) {
        self.butterfly.generate(input, out);
    }
}
