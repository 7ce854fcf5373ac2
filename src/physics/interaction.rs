//! Pointer/keyboard state machine that edits the scene and owns the run flag.
//!
//! The driver feeds events strictly in order:
//! `on_pointer_down` -> any number of `on_pointer_drag` -> `on_pointer_up`,
//! with `on_command` and `tick` interleaved between them.
//!
//! - click (no drag, or a drag shorter than the pick radius): new mass
//! - drag from near one mass to near another: new link
//! - drag with the cut modifier: every link under the pointer is removed live

use bevy::prelude::*;
use tracing::{debug, info};

use super::link::{Link, LinkError};
use super::mass::{Mass, MassId};
use super::scene::Scene;
use super::solver;
use crate::config::SandboxConfig;

/// Keyboard modifiers sampled with a pointer event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// New masses are created locked.
    pub lock: bool,
    /// Drags sever links instead of drawing one.
    pub cut: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        lock: false,
        cut: false,
    };
    pub const LOCK: Self = Self {
        lock: true,
        cut: false,
    };
    pub const CUT: Self = Self {
        lock: false,
        cut: true,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Reset,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    /// Rubber band from `start` to `current`; nothing is mutated until release.
    DraggingLink { start: Vec2, current: Vec2 },
    /// Links are cut on every move; release just ends the gesture.
    DraggingCut,
}

/// What a pointer release did to the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerOutcome {
    MassCreated(MassId),
    LinkCreated { a: MassId, b: MassId },
    /// One end of the drag was farther than the pick radius from every mass.
    NoTarget,
    /// Both ends resolved to masses but the link was invalid.
    LinkRejected(LinkError),
    CutFinished,
}

/// One independent sandbox: scene, run flag and the gesture in progress.
#[derive(Clone, Debug, Default)]
pub struct Sandbox {
    config: SandboxConfig,
    scene: Scene,
    running: bool,
    drag: DragState,
    /// Where the button went down; the anchor for a link drag.
    pressed_at: Option<Vec2>,
}

impl Sandbox {
    pub fn new(config: SandboxConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Start from a prepared scene (not running).
    pub fn with_scene(config: SandboxConfig, scene: Scene) -> Self {
        Self {
            config,
            scene,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    pub fn masses(&self) -> &[Mass] {
        self.scene.masses()
    }

    pub fn links(&self) -> &[Link] {
        self.scene.links()
    }

    pub fn link_segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.scene.link_segments()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Start and current pointer of an in-progress link drag.
    pub fn rubber_band(&self) -> Option<(Vec2, Vec2)> {
        match self.drag {
            DragState::DraggingLink { start, current } => Some((start, current)),
            _ => None,
        }
    }

    // --------------------- Pointer events ---------------------

    pub fn on_pointer_down(&mut self, pos: Vec2) {
        self.pressed_at = Some(pos);
    }

    pub fn on_pointer_drag(&mut self, pos: Vec2, modifiers: Modifiers) {
        if modifiers.cut && self.config.cut_mode {
            self.drag = DragState::DraggingCut;
            self.scene.cut_links_near(pos, self.config.cut_threshold);
            return;
        }
        self.drag = match self.drag {
            DragState::Idle => DragState::DraggingLink {
                start: self.pressed_at.unwrap_or(pos),
                current: pos,
            },
            DragState::DraggingLink { start, .. } => DragState::DraggingLink {
                start,
                current: pos,
            },
            DragState::DraggingCut => DragState::DraggingCut,
        };
    }

    pub fn on_pointer_up(&mut self, pos: Vec2, modifiers: Modifiers) -> PointerOutcome {
        self.pressed_at = None;
        match std::mem::take(&mut self.drag) {
            DragState::Idle => self.click(pos, modifiers),
            DragState::DraggingCut => PointerOutcome::CutFinished,
            DragState::DraggingLink { start, .. } => {
                if start.distance(pos) <= self.config.pick_radius {
                    self.click(pos, modifiers)
                } else {
                    self.finish_link(start, pos)
                }
            }
        }
    }

    fn click(&mut self, pos: Vec2, modifiers: Modifiers) -> PointerOutcome {
        let id = self.scene.add_mass(pos, modifiers.lock);
        debug!(%id, ?pos, locked = modifiers.lock, "mass created");
        PointerOutcome::MassCreated(id)
    }

    fn finish_link(&mut self, start: Vec2, end: Vec2) -> PointerOutcome {
        let Some(a) = self.pick(start) else {
            return PointerOutcome::NoTarget;
        };
        let Some(b) = self.pick(end) else {
            return PointerOutcome::NoTarget;
        };
        match self.scene.add_link(a, b) {
            Ok(link) => {
                debug!(%a, %b, rest_length = link.rest_length(), "link created");
                PointerOutcome::LinkCreated { a, b }
            }
            Err(err) => {
                debug!(%err, "link rejected");
                PointerOutcome::LinkRejected(err)
            }
        }
    }

    /// Nearest mass to `pos`, if it lies within the pick radius.
    fn pick(&self, pos: Vec2) -> Option<MassId> {
        self.scene
            .nearest_mass(pos)
            .filter(|&(_, d)| d <= self.config.pick_radius)
            .map(|(id, _)| id)
    }

    // --------------------- Commands & simulation ---------------------

    pub fn on_command(&mut self, command: Command) {
        match command {
            Command::Start => {
                if !self.running {
                    info!(
                        masses = self.scene.masses().len(),
                        links = self.scene.links().len(),
                        "simulation started"
                    );
                }
                self.running = true;
            }
            Command::Reset => {
                if self.running || !self.scene.is_empty() {
                    info!("simulation reset");
                }
                self.running = false;
                self.scene.clear();
                self.drag = DragState::Idle;
                self.pressed_at = None;
            }
        }
    }

    /// Advance one fixed step if running. Returns whether a step ran.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        solver::step(&mut self.scene, &self.config);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(sandbox: &mut Sandbox, from: Vec2, to: Vec2, modifiers: Modifiers) -> PointerOutcome {
        sandbox.on_pointer_down(from);
        sandbox.on_pointer_drag(from.lerp(to, 0.5), modifiers);
        sandbox.on_pointer_drag(to, modifiers);
        sandbox.on_pointer_up(to, modifiers)
    }

    fn click(sandbox: &mut Sandbox, at: Vec2, modifiers: Modifiers) -> PointerOutcome {
        sandbox.on_pointer_down(at);
        sandbox.on_pointer_up(at, modifiers)
    }

    #[test]
    fn click_creates_mass() {
        let mut s = Sandbox::default();
        assert_eq!(
            click(&mut s, Vec2::new(1.0, 2.0), Modifiers::NONE),
            PointerOutcome::MassCreated(MassId(0))
        );
        assert_eq!(
            click(&mut s, Vec2::new(3.0, 4.0), Modifiers::LOCK),
            PointerOutcome::MassCreated(MassId(1))
        );
        assert!(!s.masses()[0].locked);
        assert!(s.masses()[1].locked);
    }

    #[test]
    fn short_drag_is_a_click_at_release() {
        let mut s = Sandbox::default();
        let out = drag(&mut s, Vec2::ZERO, Vec2::new(12.0, 0.0), Modifiers::LOCK);
        assert_eq!(out, PointerOutcome::MassCreated(MassId(0)));
        assert_eq!(s.masses()[0].position, Vec2::new(12.0, 0.0));
        assert!(s.masses()[0].locked);
    }

    #[test]
    fn drag_of_exactly_pick_radius_is_a_click() {
        let mut s = Sandbox::new(SandboxConfig::default().with_pick_radius(20.0));
        click(&mut s, Vec2::ZERO, Modifiers::NONE);
        let out = drag(&mut s, Vec2::ZERO, Vec2::new(20.0, 0.0), Modifiers::NONE);
        assert_eq!(out, PointerOutcome::MassCreated(MassId(1)));
        assert_eq!(s.masses()[1].position, Vec2::new(20.0, 0.0));
        assert!(s.links().is_empty());
    }

    #[test]
    fn mass_exactly_pick_radius_away_is_picked() {
        let mut s = Sandbox::new(SandboxConfig::default().with_pick_radius(20.0));
        click(&mut s, Vec2::ZERO, Modifiers::NONE);
        click(&mut s, Vec2::new(100.0, 0.0), Modifiers::NONE);
        let out = drag(&mut s, Vec2::new(0.0, 20.0), Vec2::new(100.0, -20.0), Modifiers::NONE);
        assert_eq!(out, PointerOutcome::LinkCreated { a: MassId(0), b: MassId(1) });
        assert_eq!(s.links().len(), 1);
    }

    #[test]
    fn rubber_band_tracks_pointer_without_mutation() {
        let mut s = Sandbox::default();
        click(&mut s, Vec2::ZERO, Modifiers::NONE);
        s.on_pointer_down(Vec2::ZERO);
        s.on_pointer_drag(Vec2::new(40.0, 0.0), Modifiers::NONE);
        s.on_pointer_drag(Vec2::new(80.0, 5.0), Modifiers::NONE);
        assert_eq!(s.rubber_band(), Some((Vec2::ZERO, Vec2::new(80.0, 5.0))));
        assert_eq!(s.masses().len(), 1);
        assert!(s.links().is_empty());
    }

    #[test]
    fn link_needs_masses_at_both_ends() {
        let mut s = Sandbox::default();
        click(&mut s, Vec2::ZERO, Modifiers::NONE);
        let out = drag(&mut s, Vec2::new(5.0, 5.0), Vec2::new(100.0, 0.0), Modifiers::NONE);
        assert_eq!(out, PointerOutcome::NoTarget);
        let out = drag(&mut s, Vec2::new(100.0, 0.0), Vec2::new(3.0, 0.0), Modifiers::NONE);
        assert_eq!(out, PointerOutcome::NoTarget);
        assert!(s.links().is_empty());
        assert_eq!(s.drag_state(), DragState::Idle);
    }

    #[test]
    fn self_link_is_rejected() {
        // Both drag ends are within the pick radius of the same single mass,
        // while the drag itself is longer than the pick radius.
        let mut s = Sandbox::new(SandboxConfig::default().with_pick_radius(20.0));
        click(&mut s, Vec2::ZERO, Modifiers::NONE);
        let out = drag(&mut s, Vec2::new(-15.0, 0.0), Vec2::new(15.0, 0.0), Modifiers::NONE);
        assert_eq!(out, PointerOutcome::LinkRejected(LinkError::SelfLink(MassId(0))));
        assert!(s.links().is_empty());
        assert_eq!(s.masses().len(), 1);
    }

    #[test]
    fn nearest_pick_prefers_first_inserted() {
        let mut s = Sandbox::default();
        click(&mut s, Vec2::new(-5.0, 0.0), Modifiers::NONE);
        click(&mut s, Vec2::new(5.0, 0.0), Modifiers::NONE);
        click(&mut s, Vec2::new(100.0, 0.0), Modifiers::NONE);
        let out = drag(&mut s, Vec2::ZERO, Vec2::new(100.0, 0.0), Modifiers::NONE);
        assert_eq!(out, PointerOutcome::LinkCreated { a: MassId(0), b: MassId(2) });
    }

    #[test]
    fn cut_is_live_and_ignored_when_disabled() {
        let scene = Scene::cloth(Vec2::ZERO, 2, 1, 100.0, 0).unwrap();
        let mut s = Sandbox::with_scene(SandboxConfig::default(), scene.clone());
        s.on_pointer_down(Vec2::new(50.0, 40.0));
        s.on_pointer_drag(Vec2::new(50.0, 2.0), Modifiers::CUT);
        // Removed before release.
        assert!(s.links().is_empty());
        let out = s.on_pointer_up(Vec2::new(50.0, -40.0), Modifiers::CUT);
        assert_eq!(out, PointerOutcome::CutFinished);
        assert_eq!(s.masses().len(), 2);

        let config = SandboxConfig::default().with_cut_mode(false);
        let mut no_cut = Sandbox::with_scene(config, scene);
        no_cut.on_pointer_down(Vec2::new(50.0, 40.0));
        no_cut.on_pointer_drag(Vec2::new(50.0, 2.0), Modifiers::CUT);
        assert_eq!(no_cut.links().len(), 1);
        assert!(no_cut.rubber_band().is_some());
    }

    #[test]
    fn cut_key_mid_link_drag_switches_to_cutting() {
        let scene = Scene::cloth(Vec2::ZERO, 2, 1, 100.0, 0).unwrap();
        let mut s = Sandbox::with_scene(SandboxConfig::default(), scene);
        s.on_pointer_down(Vec2::new(50.0, 40.0));
        s.on_pointer_drag(Vec2::new(50.0, 30.0), Modifiers::NONE);
        assert!(s.rubber_band().is_some());
        assert_eq!(s.links().len(), 1);

        s.on_pointer_drag(Vec2::new(50.0, 1.0), Modifiers::CUT);
        assert_eq!(s.drag_state(), DragState::DraggingCut);
        assert!(s.links().is_empty());
        assert_eq!(s.rubber_band(), None);

        let out = s.on_pointer_up(Vec2::new(50.0, -40.0), Modifiers::NONE);
        assert_eq!(out, PointerOutcome::CutFinished);
        assert_eq!(s.masses().len(), 2);
        assert!(s.links().is_empty());
    }

    #[test]
    fn releasing_cut_key_keeps_the_gesture_a_cut() {
        let mut s = Sandbox::default();
        click(&mut s, Vec2::new(0.0, 0.0), Modifiers::NONE);
        click(&mut s, Vec2::new(100.0, 0.0), Modifiers::NONE);
        s.on_pointer_down(Vec2::new(0.0, 0.0));
        s.on_pointer_drag(Vec2::new(0.0, 30.0), Modifiers::CUT);
        s.on_pointer_drag(Vec2::new(50.0, 30.0), Modifiers::NONE);
        s.on_pointer_drag(Vec2::new(100.0, 0.0), Modifiers::NONE);
        assert_eq!(s.drag_state(), DragState::DraggingCut);
        assert_eq!(s.rubber_band(), None);

        // Ends on a mass, far from the start: still no link and no new mass.
        let out = s.on_pointer_up(Vec2::new(100.0, 0.0), Modifiers::NONE);
        assert_eq!(out, PointerOutcome::CutFinished);
        assert_eq!(s.masses().len(), 2);
        assert!(s.links().is_empty());
        assert_eq!(s.drag_state(), DragState::Idle);
    }

    #[test]
    fn tick_only_while_running() {
        let mut s = Sandbox::default();
        click(&mut s, Vec2::new(0.0, 100.0), Modifiers::NONE);
        assert!(!s.tick());
        assert_eq!(s.masses()[0].position, Vec2::new(0.0, 100.0));

        s.on_command(Command::Start);
        s.on_command(Command::Start);
        assert!(s.is_running());
        assert!(s.tick());
        assert!(s.masses()[0].position.y < 100.0);
    }

    #[test]
    fn reset_clears_everything_and_is_idempotent() {
        let scene = Scene::cloth(Vec2::ZERO, 3, 3, 10.0, 1).unwrap();
        let mut s = Sandbox::with_scene(SandboxConfig::default(), scene);
        s.on_command(Command::Start);
        s.on_pointer_down(Vec2::ZERO);
        s.on_pointer_drag(Vec2::new(50.0, 0.0), Modifiers::NONE);

        s.on_command(Command::Reset);
        s.on_command(Command::Reset);
        assert!(!s.is_running());
        assert!(s.masses().is_empty());
        assert!(s.links().is_empty());
        assert_eq!(s.drag_state(), DragState::Idle);
        assert_eq!(s.rubber_band(), None);
    }
}
