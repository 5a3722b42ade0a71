//! Controller module - the piece lifecycle state machine
//!
//! `Spawning -> Falling -> (Locking -> LineClearCheck -> Spawning) | GameOver`
//!
//! The controller owns the field, the object arena, the falling piece and the
//! staged next piece. Every move is split into unit steps; each step is
//! applied to the piece, checked against the boundary and the objects found
//! under the new cells, and undone when it collides.

use log::{debug, info, trace};

use crate::capability::{
    Collidable, Contact, GravityAffected, PlayerControllable, Positionable, Turn,
};
use crate::collision::collides;
use crate::error::EngineError;
use crate::field::Field;
use crate::map::MapSpec;
use crate::objects::{Object, Objects, Wall};
use crate::piece::Piece;
use crate::rng::{PieceSource, UniformPieces};
use crate::snapshot::Snapshot;
use crate::types::{
    Cell, GameAction, GameEvent, ObjectId, Point, VisualTag, GRAVITY_INTERVAL_MS,
};

/// Tunables handed to [`Controller::new`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Spawn origin; `None` means top row, `width / 2 - 1`
    pub spawn: Option<Point>,
    pub gravity_interval_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            spawn: None,
            gravity_interval_ms: GRAVITY_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Spawning,
    Falling,
    Locking,
    LineClearCheck,
    GameOver,
}

/// What the caller's loop should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    GameOver,
    Quit,
}

/// Result of a compound move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub requested: Point,
    /// Net displacement actually applied
    pub moved: Point,
    /// The step that stopped the move, if any
    pub contact: Option<Contact>,
}

impl MoveOutcome {
    fn none(requested: Point) -> Self {
        Self {
            requested,
            moved: Point::ZERO,
            contact: None,
        }
    }

    pub fn completed(&self) -> bool {
        self.contact.is_none() && self.moved == self.requested
    }

    pub fn blocked(&self) -> bool {
        self.contact.is_some()
    }
}

/// Receiver of the events the controller emits
pub trait EventObserver {
    fn on_event(&mut self, event: &GameEvent);
}

/// Writes every event to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl EventObserver for LogObserver {
    fn on_event(&mut self, event: &GameEvent) {
        info!(target: "fieldtris::events", "{}", event);
    }
}

/// Collaborators owned by one controller for its whole lifetime
pub struct EngineContext {
    pub observer: Box<dyn EventObserver>,
    pub pieces: Box<dyn PieceSource>,
}

impl EngineContext {
    pub fn new(pieces: impl PieceSource + 'static) -> Self {
        Self {
            observer: Box::new(LogObserver),
            pieces: Box::new(pieces),
        }
    }

    pub fn with_observer(mut self, observer: impl EventObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(UniformPieces::default())
    }
}

/// What a rejected step ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    Boundary,
    Object(ObjectId),
}

impl Hit {
    fn other(self) -> Option<ObjectId> {
        match self {
            Hit::Boundary => None,
            Hit::Object(id) => Some(id),
        }
    }
}

pub struct Controller {
    ctx: EngineContext,
    config: ControllerConfig,
    field: Field,
    objects: Objects,
    wall: Option<ObjectId>,
    current: Option<ObjectId>,
    next: Option<Piece>,
    spawn_origin: Point,
    gravity_timer_ms: u32,
    pending_spawn: bool,
    phase: Phase,
    quit: bool,
    started: bool,
    events: Vec<GameEvent>,
}

impl Controller {
    /// Build a controller for `map`, seeding the field with its walls
    pub fn new(
        map: &MapSpec,
        config: ControllerConfig,
        ctx: EngineContext,
    ) -> Result<Self, EngineError> {
        let mut field = Field::new(map.width, map.height)?;
        let mut objects = Objects::new();

        if let Some(&p) = map.walls.iter().find(|&&p| !field.contains(p)) {
            return Err(EngineError::WallOutOfBounds(p));
        }

        let spawn_origin = config
            .spawn
            .unwrap_or(Point::new(map.width / 2 - 1, 0));
        if !field.contains(spawn_origin) {
            return Err(EngineError::SpawnOutOfBounds(spawn_origin));
        }

        let wall = if map.walls.is_empty() {
            None
        } else {
            let cells: Vec<Cell> = map
                .walls
                .iter()
                .map(|&p| Cell::at(p, VisualTag::Wall))
                .collect();
            let id = objects.insert(Object::Wall(Wall::new(cells.clone())));
            field.update(id, &cells);
            Some(id)
        };

        debug!(
            "controller ready: {}x{} board, {} wall cells, spawn at {}",
            map.width,
            map.height,
            map.walls.len(),
            spawn_origin
        );

        Ok(Self {
            ctx,
            config,
            field,
            objects,
            wall,
            current: None,
            next: None,
            spawn_origin,
            gravity_timer_ms: 0,
            pending_spawn: true,
            phase: Phase::Spawning,
            quit: false,
            started: false,
            events: Vec::new(),
        })
    }

    /// Run the first spawn cycle; later calls do nothing
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    /// Advance the gravity timer by `elapsed_ms`.
    ///
    /// A pending spawn cycle runs first. Gravity is applied once the timer
    /// reaches the configured interval. Does nothing before [`start`](Self::start).
    pub fn tick(&mut self, elapsed_ms: u32) -> RunState {
        if !self.started || self.halted() {
            return self.run_state();
        }

        self.settle();

        self.gravity_timer_ms = self.gravity_timer_ms.saturating_add(elapsed_ms);
        if self.gravity_timer_ms >= self.config.gravity_interval_ms {
            self.gravity_timer_ms = 0;
            self.apply_gravity();
            self.settle();
        }

        self.run_state()
    }

    /// Apply one gravity step now, regardless of the timer
    pub fn gravity_tick(&mut self) -> RunState {
        if !self.started || self.halted() {
            return self.run_state();
        }

        self.settle();
        self.gravity_timer_ms = 0;
        self.apply_gravity();
        self.settle();

        self.run_state()
    }

    pub fn run_state(&self) -> RunState {
        if self.quit {
            RunState::Quit
        } else if self.phase == Phase::GameOver {
            RunState::GameOver
        } else {
            RunState::Running
        }
    }

    fn halted(&self) -> bool {
        self.quit || self.phase == Phase::GameOver
    }

    /// Finish a lock: clear lines, then spawn
    fn settle(&mut self) {
        if !self.pending_spawn || self.halted() {
            return;
        }
        self.line_clear_check();
        self.spawn();
    }

    fn stage_next(&mut self) -> Piece {
        let kind = self.ctx.pieces.next_kind();
        Piece::spawn(kind, self.spawn_origin)
    }

    /// Promote the staged piece and stage a new one
    fn spawn(&mut self) {
        if self.halted() {
            return;
        }
        self.phase = Phase::Spawning;

        // First cycle: nothing staged yet, so stage twice.
        if self.next.is_none() {
            let staged = self.stage_next();
            self.next = Some(staged);
        }
        let staged = self.stage_next();
        let Some(mut piece) = self.next.replace(staged) else {
            return;
        };

        piece.set_gravity_enabled(true);
        piece.set_collidable(true);
        piece.set_player_controlled(true);

        let kind = piece.kind();
        let cells = piece.cells().to_vec();
        let id = self.objects.insert(Object::Piece(piece));

        if let Some(hit) = self.find_blocker(id) {
            info!("spawn of {:?} blocked by {:?}", kind, hit);
            self.objects.remove(id);
            self.game_over();
            return;
        }

        self.field.update(id, &cells);
        self.current = Some(id);
        self.pending_spawn = false;
        self.gravity_timer_ms = 0;
        self.phase = Phase::Falling;
        info!("spawned {:?} as {} at {}", kind, id, self.spawn_origin);
    }

    /// Remove every filled row, then split pieces left disconnected
    fn line_clear_check(&mut self) {
        self.phase = Phase::LineClearCheck;

        let mut cleared = 0;
        for y in 0..self.field.height() {
            if !self.field.check_filled(y, &self.objects) {
                continue;
            }
            let removed = self.field.remove_line(y, &mut self.objects);
            debug!("row {} cleared, {} cells removed", y, removed.len());
            cleared += 1;
            self.emit(GameEvent::LineCleared(y));
        }
        if cleared == 0 {
            return;
        }

        self.field.restructure(&mut self.objects);
        for id in self.objects.reap_destroyed() {
            self.field.clear(id);
            debug!("{} destroyed", id);
            if self.current == Some(id) {
                self.current = None;
                self.pending_spawn = true;
            }
        }
    }

    fn game_over(&mut self) {
        if self.phase == Phase::GameOver {
            return;
        }
        self.phase = Phase::GameOver;
        self.pending_spawn = false;
        if let Some(piece) = self.current.and_then(|id| self.objects.piece_mut(id)) {
            piece.set_player_controlled(false);
        }
        self.emit(GameEvent::GameOver);
    }

    fn emit(&mut self, event: GameEvent) {
        self.ctx.observer.on_event(&event);
        self.events.push(event);
    }

    /// Events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// First boundary or object hit by the current cells of `id`
    fn find_blocker(&self, id: ObjectId) -> Option<Hit> {
        let me = self.objects.get(id)?.collidable();
        if !me.is_collidable() {
            return None;
        }
        if me.cells().iter().any(|c| !self.field.contains(c.pos())) {
            return Some(Hit::Boundary);
        }

        self.field
            .owners_at(me.cells().iter().map(Cell::pos))
            .into_iter()
            .find(|&other| {
                self.objects
                    .get(other)
                    .is_some_and(|obj| collides(id, me, other, obj.collidable()))
            })
            .map(Hit::Object)
    }

    /// Apply one unit step to a piece, undoing it on collision
    fn try_step(&mut self, id: ObjectId, delta: Point) -> Result<(), Contact> {
        let Some(piece) = self.objects.piece_mut(id) else {
            return Err(Contact { other: None, delta });
        };
        piece.move_by(delta);

        if let Some(hit) = self.find_blocker(id) {
            if let Some(piece) = self.objects.piece_mut(id) {
                piece.move_by(-delta);
            }
            let contact = Contact {
                other: hit.other(),
                delta,
            };
            self.handle_collision(id, contact);
            return Err(contact);
        }

        if let Some(obj) = self.objects.get(id) {
            self.field.update(id, obj.cells());
        }
        trace!("{} stepped {}", id, delta);
        Ok(())
    }

    fn handle_collision(&mut self, id: ObjectId, contact: Contact) {
        if let Some(obj) = self.objects.get_mut(id) {
            obj.collidable_mut().on_collided(contact);
        }
        if let Some(other) = contact.other.and_then(|o| self.objects.get_mut(o)) {
            other.collidable_mut().on_collided(Contact {
                other: Some(id),
                delta: contact.delta,
            });
        }

        if self.current != Some(id) || contact.delta.y <= 0 {
            return;
        }

        let at_spawn = self
            .objects
            .piece(id)
            .is_some_and(|p| p.origin().y == self.spawn_origin.y);
        if at_spawn {
            info!("{} cannot leave the spawn row", id);
            self.game_over();
        } else {
            self.lock(id);
        }
    }

    fn lock(&mut self, id: ObjectId) {
        self.phase = Phase::Locking;
        if let Some(piece) = self.objects.piece_mut(id) {
            piece.set_player_controlled(false);
        }
        self.current = None;
        self.pending_spawn = true;
        self.emit(GameEvent::Locked(id));
    }

    /// Move `id` by `delta`, one unit step at a time.
    ///
    /// Horizontal steps run before vertical ones. The first blocked step ends
    /// the move, so the object stops in front of the first obstacle.
    pub fn move_object(&mut self, id: ObjectId, delta: Point) -> MoveOutcome {
        let mut outcome = MoveOutcome::none(delta);
        if self.halted() {
            return outcome;
        }

        let unit_x = Point::new(delta.x.signum(), 0);
        let unit_y = Point::new(0, delta.y.signum());
        let steps = std::iter::repeat(unit_x)
            .take(delta.x.unsigned_abs() as usize)
            .chain(std::iter::repeat(unit_y).take(delta.y.unsigned_abs() as usize));

        for step in steps {
            match self.try_step(id, step) {
                Ok(()) => outcome.moved += step,
                Err(contact) => {
                    outcome.contact = Some(contact);
                    break;
                }
            }
        }
        outcome
    }

    /// Move the falling piece; see [`move_object`](Self::move_object)
    pub fn move_current(&mut self, delta: Point) -> MoveOutcome {
        match self.current {
            Some(id) => self.move_object(id, delta),
            None => MoveOutcome::none(delta),
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.move_current(Point::LEFT).completed()
    }

    pub fn move_right(&mut self) -> bool {
        self.move_current(Point::RIGHT).completed()
    }

    pub fn move_down(&mut self) -> bool {
        self.move_current(Point::DOWN).completed()
    }

    /// Turn the falling piece clockwise in place; rejected turns are undone
    pub fn rotate(&mut self) -> bool {
        if self.halted() {
            return false;
        }
        let Some(id) = self.current else {
            return false;
        };
        let Some(piece) = self.objects.piece_mut(id) else {
            return false;
        };
        piece.rotate(Turn::Clockwise);

        if let Some(hit) = self.find_blocker(id) {
            if let Some(piece) = self.objects.piece_mut(id) {
                piece.rotate(Turn::Clockwise.inverse());
            }
            debug!("rotation of {} rejected by {:?}", id, hit);
            return false;
        }

        if let Some(obj) = self.objects.get(id) {
            self.field.update(id, obj.cells());
        }
        true
    }

    pub fn quit(&mut self) -> bool {
        info!("quit requested");
        self.quit = true;
        true
    }

    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::MoveDown => self.move_down(),
            GameAction::Rotate => self.rotate(),
            GameAction::Quit => self.quit(),
        }
    }

    /// One downward step for every gravity-enabled piece.
    ///
    /// Loose pieces move lowest first; the player piece moves last, so it
    /// only locks against objects that have already settled this pass.
    fn apply_gravity(&mut self) {
        let mut falling: Vec<(i32, ObjectId)> = self
            .field
            .children()
            .filter(|&id| Some(id) != self.current)
            .filter_map(|id| {
                let piece = self.objects.piece(id)?;
                if !piece.gravity_enabled() {
                    return None;
                }
                Some((piece.bottom()?, id))
            })
            .collect();
        falling.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        let player = self
            .current
            .filter(|&id| self.objects.piece(id).is_some_and(|p| p.gravity_enabled()));

        for id in falling.into_iter().map(|(_, id)| id).chain(player) {
            if self.halted() {
                break;
            }
            let _ = self.try_step(id, Point::DOWN);
        }
    }

    /// Register a settled piece, e.g. to build a puzzle or a test board
    pub fn place(&mut self, piece: Piece) -> Result<ObjectId, EngineError> {
        for cell in piece.cells() {
            let p = cell.pos();
            if !self.field.contains(p) {
                return Err(EngineError::OutOfBounds(p));
            }
            if self.field.owner_at(p).is_some() {
                return Err(EngineError::Occupied(p));
            }
        }

        let cells = piece.cells().to_vec();
        let id = self.objects.insert(Object::Piece(piece));
        self.field.update(id, &cells);
        debug!("placed {} with {} cells", id, cells.len());
        Ok(id)
    }

    /// Every cell on the field: walls first, then pieces in handle order
    pub fn drawable_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.field
            .children()
            .filter_map(|id| self.objects.get(id))
            .flat_map(|obj| obj.cells().iter().copied())
    }

    pub fn snapshot_into(&self, out: &mut Snapshot) {
        out.width = self.field.width();
        out.height = self.field.height();
        out.cells.clear();
        out.cells.extend(self.drawable_cells());
        out.current = self.current;
        out.current_cells.clear();
        if let Some(piece) = self.current_piece() {
            out.current_cells.extend_from_slice(piece.cells());
        }
        out.next = self.next.as_ref().and_then(Piece::kind);
        out.objects = self.field.children().count();
        out.phase = self.phase;
        out.game_over = self.is_game_over();
        out.quit = self.quit;
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut s = Snapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn objects(&self) -> &Objects {
        &self.objects
    }

    pub fn wall_id(&self) -> Option<ObjectId> {
        self.wall
    }

    pub fn current_id(&self) -> Option<ObjectId> {
        self.current
    }

    pub fn current_piece(&self) -> Option<&Piece> {
        self.current.and_then(|id| self.objects.piece(id))
    }

    /// The staged piece shown as a preview
    pub fn next_piece(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    pub fn spawn_origin(&self) -> Point {
        self.spawn_origin
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn is_quit(&self) -> bool {
        self.quit
    }

    pub fn is_spawn_pending(&self) -> bool {
        self.pending_spawn
    }
}
